//! Phasing domain: avian2d side of collision suppression.

use std::collections::HashSet;

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::phasing::CollisionToggle;

/// Collider pairs that must not collide, order-independent.
#[derive(Resource, Debug, Default)]
pub struct PhaseIgnoreTable {
    pairs: HashSet<(Entity, Entity)>,
}

fn ordered(a: Entity, b: Entity) -> (Entity, Entity) {
    if a <= b { (a, b) } else { (b, a) }
}

impl PhaseIgnoreTable {
    pub fn contains(&self, a: Entity, b: Entity) -> bool {
        self.pairs.contains(&ordered(a, b))
    }

    pub fn insert(&mut self, a: Entity, b: Entity) -> bool {
        self.pairs.insert(ordered(a, b))
    }

    pub fn remove(&mut self, a: Entity, b: Entity) -> bool {
        self.pairs.remove(&ordered(a, b))
    }

    /// Forget every pair involving `entity`. Returns how many were removed.
    pub fn remove_all_for(&mut self, entity: Entity) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|&(a, b)| a != entity && b != entity);
        before - self.pairs.len()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Collision hooks that drop any pair listed in [`PhaseIgnoreTable`].
/// Colliders opt in with `ActiveCollisionHooks`.
#[derive(SystemParam)]
pub struct PhaseHooks<'w> {
    table: Res<'w, PhaseIgnoreTable>,
}

impl CollisionHooks for PhaseHooks<'_> {
    fn filter_pairs(&self, collider1: Entity, collider2: Entity, _commands: &mut Commands) -> bool {
        !self.table.contains(collider1, collider2)
    }

    // Pairs already in contact when a dash starts skip the broad phase filter
    fn modify_contacts(&self, contacts: &mut ContactPair, _commands: &mut Commands) -> bool {
        !self.table.contains(contacts.collider1, contacts.collider2)
    }
}

/// Applies a phase to the player's `CollisionLayers` filters and the
/// shared ignore table.
pub(crate) struct AvianCollisionToggle<'a> {
    pub player: Entity,
    pub player_layers: &'a mut CollisionLayers,
    pub table: &'a mut PhaseIgnoreTable,
}

impl CollisionToggle for AvianCollisionToggle<'_> {
    fn layer_enabled(&self, layer_bit: u32) -> bool {
        self.player_layers.filters.0 & layer_bit != 0
    }

    fn set_layer_enabled(&mut self, layer_bit: u32, enabled: bool) {
        if enabled {
            self.player_layers.filters.0 |= layer_bit;
        } else {
            self.player_layers.filters.0 &= !layer_bit;
        }
    }

    fn pair_enabled(&self, other: Entity) -> bool {
        !self.table.contains(self.player, other)
    }

    fn set_pair_enabled(&mut self, other: Entity, enabled: bool) {
        if enabled {
            self.table.remove(self.player, other);
        } else {
            self.table.insert(self.player, other);
        }
    }
}
