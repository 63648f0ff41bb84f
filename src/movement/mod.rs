//! Movement domain: player locomotion plugin wiring and public exports.

mod bootstrap;
mod components;
mod events;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::*;
pub use events::{DashEnded, DashStarted};
pub use resources::{MovementInput, MovementTuning, TrailConfig};

use bevy::prelude::*;

use crate::core::GameplaySet;
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{
    apply_dash, apply_gravity, apply_horizontal_movement, apply_jump, detect_ground,
    emit_dash_trail, fade_trail_ghosts, read_input, update_dash_timer, update_facing,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_message::<DashStarted>()
            .add_message::<DashEnded>()
            .add_systems(Startup, spawn_player)
            .add_systems(Update, read_input.in_set(GameplaySet::Input))
            .add_systems(Update, detect_ground.in_set(GameplaySet::Sense))
            .add_systems(
                Update,
                (
                    update_dash_timer,
                    apply_jump,
                    apply_dash,
                    apply_horizontal_movement,
                    apply_gravity,
                    update_facing,
                )
                    .chain()
                    .in_set(GameplaySet::Act),
            )
            .add_systems(
                Update,
                (emit_dash_trail, fade_trail_ghosts).in_set(GameplaySet::Present),
            );
    }
}
