//! Phasing domain: begin/end phases in response to dash messages.

use std::collections::HashSet;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{DashEnded, DashStarted, MovementTuning, Player};
use crate::phasing::hooks::AvianCollisionToggle;
use crate::phasing::{
    DashPhaseManager, PhaseCandidate, PhaseIgnoreTable, PhaseProtected, PhaseRequest,
};

pub(crate) fn begin_dash_phase(
    mut dash_started: MessageReader<DashStarted>,
    tuning: Res<MovementTuning>,
    mut table: ResMut<PhaseIgnoreTable>,
    mut players: Query<(&mut CollisionLayers, &mut DashPhaseManager), With<Player>>,
    colliders: Query<(Entity, &CollisionLayers, Has<Sensor>), (With<Collider>, Without<Player>)>,
    protected_roots: Query<Entity, With<PhaseProtected>>,
    children: Query<&Children>,
) {
    for started in dash_started.read() {
        let Ok((mut player_layers, mut manager)) = players.get_mut(started.player) else {
            continue;
        };

        // Every entity in a protected object's hierarchy
        let mut protected = HashSet::new();
        for root in &protected_roots {
            protected.insert(root);
            protected.extend(children.iter_descendants(root));
        }

        let protected_bits = protected
            .iter()
            .filter_map(|entity| colliders.get(*entity).ok())
            .fold(0, |bits, (_, layers, _)| bits | layers.memberships.0);

        let candidates = colliders
            .iter()
            .map(|(entity, layers, is_sensor)| PhaseCandidate {
                entity,
                layers: layers.memberships.0,
                is_sensor,
                protected: protected.contains(&entity),
            })
            .collect();

        let request = PhaseRequest {
            player: Some(started.player),
            phase_bits: tuning.phase_bits(),
            ground_bits: tuning.ground_bits(),
            protected_bits,
            candidates,
        };

        let mut toggle = AvianCollisionToggle {
            player: started.player,
            player_layers: &mut player_layers,
            table: &mut table,
        };
        let summary = manager.begin_phase(&mut toggle, &request);
        debug!(
            "Phase begin: layers={:#b}, pairs={}",
            summary.layers, summary.pairs
        );
    }
}

pub(crate) fn end_dash_phase(
    mut dash_ended: MessageReader<DashEnded>,
    mut table: ResMut<PhaseIgnoreTable>,
    mut players: Query<(&mut CollisionLayers, &mut DashPhaseManager), With<Player>>,
) {
    for ended in dash_ended.read() {
        let Ok((mut player_layers, mut manager)) = players.get_mut(ended.player) else {
            continue;
        };

        let mut toggle = AvianCollisionToggle {
            player: ended.player,
            player_layers: &mut player_layers,
            table: &mut table,
        };
        let summary = manager.end_phase(&mut toggle);
        debug!(
            "Phase end: restored layers={:#b}, pairs={}",
            summary.layers, summary.pairs
        );
    }
}

/// A player despawned mid-dash never sees its `DashEnded`, so drop its
/// ignored pairs here.
pub(crate) fn clear_removed_player_pairs(
    remove: On<Remove, Player>,
    mut table: ResMut<PhaseIgnoreTable>,
) {
    let cleared = table.remove_all_for(remove.entity);
    if cleared > 0 {
        debug!("Phase cleared for removed player: pairs={}", cleared);
    }
}
