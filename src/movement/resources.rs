//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::{GameLayer, layer_bits};

/// Smallest usable ground probe radius.
pub(crate) const MIN_RADIUS: f32 = 0.5;

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub move_speed: f32,
    /// Apex height of a single jump in world units.
    pub jump_height: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Total jumps allowed between grounded contacts (2 = double jump).
    pub max_jumps: u8,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    /// Layers the player passes through while dashing.
    pub phase_layers: Vec<GameLayer>,
    pub ground_layers: Vec<GameLayer>,
    /// Offset of the ground probe from the player's centre. Computed from
    /// the collider when absent.
    pub ground_check_offset: Option<[f32; 2]>,
    pub ground_check_radius: f32,
    pub trail: TrailConfig,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 320.0,
            jump_height: 128.0,
            gravity: 1800.0,
            max_fall_speed: 1200.0,
            max_jumps: 2,
            dash_speed: 900.0,
            dash_duration: 0.2,
            dash_cooldown: 3.0,
            phase_layers: vec![GameLayer::Obstacle],
            ground_layers: vec![GameLayer::Ground],
            ground_check_offset: None,
            ground_check_radius: 6.0,
            trail: TrailConfig::default(),
        }
    }
}

impl MovementTuning {
    /// Clamp every field into a usable range.
    pub fn sanitized(mut self) -> Self {
        self.move_speed = self.move_speed.max(0.0);
        self.jump_height = self.jump_height.max(0.0);
        self.gravity = self.gravity.max(0.0);
        self.max_fall_speed = self.max_fall_speed.max(0.0);
        self.dash_speed = self.dash_speed.max(0.0);
        self.dash_duration = self.dash_duration.max(0.0);
        self.dash_cooldown = self.dash_cooldown.max(0.0);
        self.ground_check_radius = self.ground_check_radius.max(MIN_RADIUS);
        self.trail = self.trail.sanitized();
        self
    }

    /// Vertical velocity that reaches `jump_height` under `gravity`.
    /// Uses v = sqrt(2gh)
    pub fn jump_velocity(&self) -> f32 {
        (2.0 * self.gravity * self.jump_height).sqrt()
    }

    pub fn phase_bits(&self) -> u32 {
        layer_bits(&self.phase_layers)
    }

    pub fn ground_bits(&self) -> u32 {
        layer_bits(&self.ground_layers)
    }

    pub fn ground_check_offset(&self) -> Option<Vec2> {
        self.ground_check_offset.map(Vec2::from_array)
    }
}

/// Appearance of the dash afterimage trail.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrailConfig {
    pub enabled: bool,
    pub color: [f32; 4],
    /// Seconds an afterimage stays visible.
    pub lifetime: f32,
    /// Seconds between afterimages.
    pub interval: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: [0.55, 0.8, 1.0, 0.6],
            lifetime: 0.25,
            interval: 0.03,
        }
    }
}

impl TrailConfig {
    pub fn sanitized(mut self) -> Self {
        self.lifetime = self.lifetime.max(0.0);
        self.interval = self.interval.max(0.005);
        for channel in &mut self.color {
            *channel = channel.clamp(0.0, 1.0);
        }
        self
    }

    pub fn color(&self) -> Color {
        let [r, g, b, a] = self.color;
        Color::srgba(r, g, b, a)
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub dash_just_pressed: bool,
}
