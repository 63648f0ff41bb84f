//! Level domain: data-driven test level (ground, obstacles, platforms).

mod spawn;


use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::level::spawn::spawn_level;

/// An axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BlockConfig {
    pub position: [f32; 2],
    pub size: [f32; 2],
}

impl BlockConfig {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: [x, y],
            size: [width, height],
        }
    }

    pub fn sanitized(mut self) -> Self {
        self.size = self.size.map(|extent| extent.max(1.0));
        self
    }

    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::from_array(self.size)
    }
}

/// A block the dash never passes through. `parts` are child colliders,
/// positioned relative to the block.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProtectedConfig {
    pub block: BlockConfig,
    #[serde(default)]
    pub parts: Vec<BlockConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LevelConfig {
    pub player_spawn: [f32; 2],
    pub ground: Vec<BlockConfig>,
    /// Solid blocks a dash phases through.
    pub obstacles: Vec<BlockConfig>,
    pub protected: Vec<ProtectedConfig>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            player_spawn: [-300.0, -120.0],
            ground: vec![
                BlockConfig::new(0.0, -200.0, 1000.0, 40.0),
                BlockConfig::new(-250.0, -40.0, 150.0, 20.0),
            ],
            obstacles: vec![BlockConfig::new(-60.0, -140.0, 30.0, 80.0)],
            protected: vec![ProtectedConfig {
                block: BlockConfig::new(160.0, -140.0, 30.0, 80.0),
                parts: vec![BlockConfig::new(0.0, 50.0, 50.0, 20.0)],
            }],
        }
    }
}

impl LevelConfig {
    pub fn sanitized(mut self) -> Self {
        self.ground = self.ground.into_iter().map(BlockConfig::sanitized).collect();
        self.obstacles = self
            .obstacles
            .into_iter()
            .map(BlockConfig::sanitized)
            .collect();
        for protected in &mut self.protected {
            protected.block = protected.block.sanitized();
            protected.parts = protected
                .parts
                .iter()
                .map(|part| part.sanitized())
                .collect();
        }
        self
    }
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_level);
    }
}
