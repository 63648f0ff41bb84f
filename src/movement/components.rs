//! Movement domain: components, physics layers and the jump/dash state machines.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Inputs or velocities below this magnitude count as "no direction".
pub const DIRECTION_DEADZONE: f32 = 0.01;

/// Jumps are only refunded while not rising faster than this.
pub const JUMP_RESET_MAX_RISE: f32 = 1.0;

/// Width and height of the player's collider and sprite.
pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum GameLayer {
    #[default]
    Default,
    /// Standable surfaces (floors, moving platforms)
    Ground,
    /// Solid obstacles the player can dash through
    Obstacle,
    /// Player character
    Player,
    /// Triggers - never block movement
    Sensor,
}

/// Combine a list of layers into raw layer bits.
pub fn layer_bits(layers: &[GameLayer]) -> u32 {
    layers.iter().fold(0, |bits, layer| bits | layer.to_bits())
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Component, Debug, Default)]
pub struct MovementState {
    /// Horizontal velocity requested by input this frame.
    pub input_velocity: f32,
    pub on_ground: bool,
    pub facing: Facing,
    pub jumps: JumpCounter,
    pub dash: DashState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn from_direction(x: f32) -> Option<Self> {
        if x > DIRECTION_DEADZONE {
            Some(Facing::Right)
        } else if x < -DIRECTION_DEADZONE {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Counts jumps since the last grounded contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpCounter {
    pub used: u8,
}

impl JumpCounter {
    /// Consume a jump if any remain. Returns whether the jump happened.
    pub fn try_jump(&mut self, max_jumps: u8) -> bool {
        if self.used >= max_jumps {
            return false;
        }
        self.used += 1;
        true
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }

    /// Refund all jumps when grounded and not rising. The frame a jump
    /// fires still reads as grounded, so an upward velocity keeps the
    /// count. Returns whether jumps were refunded.
    pub fn refresh(&mut self, on_ground: bool, vertical_velocity: f32) -> bool {
        if !on_ground || vertical_velocity > JUMP_RESET_MAX_RISE {
            return false;
        }
        self.reset();
        true
    }

    pub fn remaining(&self, max_jumps: u8) -> u8 {
        max_jumps.saturating_sub(self.used)
    }
}

/// Result of polling the dash timer for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashTick {
    Idle,
    Continuing,
    /// The dash ended this frame.
    Finished,
}

/// Dash timer state. All timestamps are seconds of game time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashState {
    pub active: bool,
    /// -1.0 or 1.0 while dashing.
    pub direction: f32,
    pub started_at: f32,
    pub ends_at: f32,
    /// Start of the most recent dash; the cooldown is measured from here.
    pub last_started_at: Option<f32>,
}

impl DashState {
    pub fn cooldown_elapsed(&self, now: f32, cooldown: f32) -> bool {
        match self.last_started_at {
            Some(started) => now - started >= cooldown,
            None => true,
        }
    }

    pub fn can_start(&self, now: f32, cooldown: f32) -> bool {
        !self.active && self.cooldown_elapsed(now, cooldown)
    }

    /// Start a dash if idle, off cooldown and given a non-zero direction.
    /// Requests that fail any of these are ignored.
    pub fn try_start(&mut self, now: f32, direction: f32, duration: f32, cooldown: f32) -> bool {
        if direction.abs() <= DIRECTION_DEADZONE || !self.can_start(now, cooldown) {
            return false;
        }
        self.active = true;
        self.direction = direction.signum();
        self.started_at = now;
        self.ends_at = now + duration.max(0.0);
        self.last_started_at = Some(now);
        true
    }

    pub fn update(&mut self, now: f32) -> DashTick {
        if !self.active {
            return DashTick::Idle;
        }
        if now >= self.ends_at {
            self.active = false;
            return DashTick::Finished;
        }
        DashTick::Continuing
    }

    /// Fraction of the cooldown that has elapsed, in `[0, 1]`.
    pub fn cooldown_progress(&self, now: f32, cooldown: f32) -> f32 {
        let Some(started) = self.last_started_at else {
            return 1.0;
        };
        if cooldown <= 0.0 {
            return 1.0;
        }
        ((now - started) / cooldown).clamp(0.0, 1.0)
    }
}

/// Pick the dash direction from input, falling back to the current velocity.
pub fn resolve_dash_direction(input_x: f32, velocity_x: f32) -> Option<f32> {
    if input_x.abs() > DIRECTION_DEADZONE {
        Some(input_x.signum())
    } else if velocity_x.abs() > DIRECTION_DEADZONE {
        Some(velocity_x.signum())
    } else {
        None
    }
}

/// Afterimage trail shown while dashing.
#[derive(Component, Debug, Default)]
pub struct DashTrail {
    pub enabled: bool,
    pub since_last: f32,
}

/// A single fading afterimage.
#[derive(Component, Debug)]
pub struct TrailGhost {
    pub age: f32,
    pub lifetime: f32,
    pub alpha: f32,
}

impl TrailGhost {
    /// Opacity left at the current age.
    pub fn current_alpha(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        self.alpha * (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}
