//! Phasing domain: temporary collision suppression while the player dashes.

mod hooks;
mod manager;
mod systems;


pub use hooks::{PhaseHooks, PhaseIgnoreTable};
pub use manager::{
    CollisionToggle, DashPhaseManager, PhaseCandidate, PhaseRequest, PhaseSummary,
    effective_phase_bits,
};

use bevy::prelude::*;

use crate::core::GameplaySet;
use crate::phasing::systems::{begin_dash_phase, clear_removed_player_pairs, end_dash_phase};

/// Objects (and their children) that a dash never passes through.
#[derive(Component, Debug, Default)]
pub struct PhaseProtected;

pub struct PhasingPlugin;

impl Plugin for PhasingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhaseIgnoreTable>()
            .add_observer(clear_removed_player_pairs)
            .add_systems(
                Update,
                (end_dash_phase, begin_dash_phase)
                    .chain()
                    .in_set(GameplaySet::Phase),
            );
    }
}
