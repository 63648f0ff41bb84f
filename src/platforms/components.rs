//! Platforms domain: moving platform component.

use bevy::prelude::*;

use crate::platforms::{PlatformConfig, PlatformMotion, PlatformPath};

#[derive(Component, Debug)]
pub struct MovingPlatform {
    pub config: PlatformConfig,
    /// Filled from the spawn transform on the first tick.
    pub path: Option<PlatformPath>,
    pub motion: PlatformMotion,
}

impl MovingPlatform {
    pub fn new(config: PlatformConfig) -> Self {
        let config = config.sanitized();
        Self {
            motion: PlatformMotion::new(&config),
            path: None,
            config,
        }
    }

    /// The frozen waypoints, computing them from `transform` if needed.
    pub fn path_or_init(&mut self, transform: &Transform) -> PlatformPath {
        *self.path.get_or_insert_with(|| {
            PlatformPath::from_config(transform.translation, transform.rotation, &self.config)
        })
    }
}
