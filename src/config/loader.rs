//! Loader for the RON game configuration file.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use super::GameConfig;

/// Error type for configuration loading failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a configuration from RON text. `source` names it in errors.
pub fn parse_config(source: &str, contents: &str) -> Result<GameConfig, ConfigLoadError> {
    ron_options()
        .from_str::<GameConfig>(contents)
        .map(GameConfig::sanitized)
        .map_err(|e| ConfigLoadError {
            file: source.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load and sanitise the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_config(&file_name, &contents)
}

/// Load the configuration, falling back to defaults on any failure.
pub fn load_config_or_default(path: &Path) -> GameConfig {
    match load_config(path) {
        Ok(config) => {
            info!("{}", config.summary());
            config
        }
        Err(e) => {
            warn!("{}; using default configuration", e);
            GameConfig::default().sanitized()
        }
    }
}
