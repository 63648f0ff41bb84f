//! Core domain: frame ordering shared by every gameplay plugin.

use bevy::prelude::*;

/// Per-frame ordering of gameplay work. Sets run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Sample the keyboard.
    Input,
    /// Ground detection and other world queries.
    Sense,
    /// Jump, dash, gravity and platform motion.
    Act,
    /// Begin or end collision phasing for dashes that started or ended.
    Phase,
    /// Visuals: trail, animation, HUD.
    Present,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GameplaySet::Input,
                GameplaySet::Sense,
                GameplaySet::Act,
                GameplaySet::Phase,
                GameplaySet::Present,
            )
                .chain(),
        )
        .add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
