//! Configuration domain: game tuning loaded from `assets/data/platformer.ron`.

mod loader;


pub use loader::{ConfigLoadError, load_config, load_config_or_default, parse_config};

use std::path::PathBuf;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::level::LevelConfig;
use crate::movement::MovementTuning;
use crate::platforms::PlatformConfig;
use crate::ui::HudConfig;

pub const DEFAULT_CONFIG_PATH: &str = "assets/data/platformer.ron";

/// Everything tunable about the game. Missing sections use defaults.
#[derive(Resource, Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: MovementTuning,
    pub platforms: Vec<PlatformConfig>,
    pub level: LevelConfig,
    pub hud: HudConfig,
}

impl GameConfig {
    /// Clamp every section into a usable range.
    pub fn sanitized(mut self) -> Self {
        self.player = self.player.sanitized();
        self.platforms = self
            .platforms
            .into_iter()
            .map(PlatformConfig::sanitized)
            .collect();
        self.level = self.level.sanitized();
        self.hud = self.hud.sanitized();
        self
    }

    /// Returns a summary of the loaded configuration for logging.
    pub fn summary(&self) -> String {
        format!(
            "GameConfig loaded:\n\
             - Max jumps: {}\n\
             - Dash: {}s, cooldown {}s\n\
             - Platforms: {}\n\
             - Ground blocks: {}\n\
             - Obstacles: {}",
            self.player.max_jumps,
            self.player.dash_duration,
            self.player.dash_cooldown,
            self.platforms.len(),
            self.level.ground.len(),
            self.level.obstacles.len(),
        )
    }
}

/// Loads the configuration when the plugin is built so every startup
/// system can read it.
pub struct ConfigPlugin {
    pub path: PathBuf,
}

impl Default for ConfigPlugin {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let config = load_config_or_default(&self.path);
        app.insert_resource(config.player.clone())
            .insert_resource(config);
    }
}
