//! Platforms domain: back-and-forth moving platforms.

mod components;
mod motion;
mod systems;

#[cfg(test)]
mod tests;

pub use components::MovingPlatform;
pub use motion::{
    ARRIVAL_EPSILON, Leg, MIN_SPEED, MotionAxis, MotionSpace, PlatformConfig, PlatformMotion,
    PlatformPath, PlatformPhase, move_towards,
};

use bevy::prelude::*;

use crate::core::GameplaySet;
use crate::platforms::systems::drive_platforms;

pub struct PlatformsPlugin;

impl Plugin for PlatformsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, drive_platforms.in_set(GameplaySet::Act));

        #[cfg(feature = "dev-tools")]
        app.add_systems(
            Update,
            systems::draw_platform_paths.in_set(GameplaySet::Present),
        );
    }
}
