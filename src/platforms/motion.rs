//! Platforms domain: waypoint path and the oscillation state machine.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Distance at which a platform counts as having reached its target.
pub const ARRIVAL_EPSILON: f32 = 0.001;

/// Speeds are floored to this so a platform always makes progress.
pub const MIN_SPEED: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum MotionAxis {
    X,
    #[default]
    Y,
    Z,
}

impl MotionAxis {
    pub fn unit(self) -> Vec3 {
        match self {
            MotionAxis::X => Vec3::X,
            MotionAxis::Y => Vec3::Y,
            MotionAxis::Z => Vec3::Z,
        }
    }
}

/// Whether the motion axis follows the platform's own rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum MotionSpace {
    #[default]
    World,
    Local,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub axis: MotionAxis,
    pub space: MotionSpace,
    pub speed: f32,
    pub distance_up: f32,
    pub distance_down: f32,
    pub wait_at_top: f32,
    pub wait_at_bottom: f32,
    pub start_moving_up: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            size: [160.0, 20.0],
            axis: MotionAxis::Y,
            space: MotionSpace::World,
            speed: 120.0,
            distance_up: 200.0,
            distance_down: 0.0,
            wait_at_top: 0.5,
            wait_at_bottom: 0.0,
            start_moving_up: true,
        }
    }
}

impl PlatformConfig {
    /// Clamp distances and waits to zero and floor the speed.
    pub fn sanitized(mut self) -> Self {
        self.speed = self.speed.max(MIN_SPEED);
        self.distance_up = self.distance_up.max(0.0);
        self.distance_down = self.distance_down.max(0.0);
        self.wait_at_top = self.wait_at_top.max(0.0);
        self.wait_at_bottom = self.wait_at_bottom.max(0.0);
        self.size = self.size.map(|extent| extent.max(1.0));
        self
    }

    /// Direction of travel towards the top waypoint.
    pub fn direction(&self, rotation: Quat) -> Vec3 {
        match self.space {
            MotionSpace::World => self.axis.unit(),
            MotionSpace::Local => rotation * self.axis.unit(),
        }
    }
}

/// Fixed waypoints, computed once from the start position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformPath {
    pub start: Vec3,
    pub top: Vec3,
    pub bottom: Vec3,
}

impl PlatformPath {
    pub fn new(start: Vec3, direction: Vec3, distance_up: f32, distance_down: f32) -> Self {
        let direction = direction.normalize_or_zero();
        Self {
            start,
            top: start + direction * distance_up.max(0.0),
            bottom: start - direction * distance_down.max(0.0),
        }
    }

    pub fn from_config(start: Vec3, rotation: Quat, config: &PlatformConfig) -> Self {
        Self::new(
            start,
            config.direction(rotation),
            config.distance_up,
            config.distance_down,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    ToTop,
    ToBottom,
}

impl Leg {
    pub fn flipped(self) -> Self {
        match self {
            Leg::ToTop => Leg::ToBottom,
            Leg::ToBottom => Leg::ToTop,
        }
    }

    pub fn target(self, path: &PlatformPath) -> Vec3 {
        match self {
            Leg::ToTop => path.top,
            Leg::ToBottom => path.bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformPhase {
    Moving(Leg),
    /// Paused at an end; `next` starts once `remaining` runs out.
    Waiting { next: Leg, remaining: f32 },
}

/// Step `current` towards `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let offset = target - current;
    let distance = offset.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        return target;
    }
    current + offset / distance * max_delta
}

/// Back-and-forth mover. Runs forever once started.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformMotion {
    pub phase: PlatformPhase,
    pub speed: f32,
    pub wait_at_top: f32,
    pub wait_at_bottom: f32,
}

impl PlatformMotion {
    pub fn new(config: &PlatformConfig) -> Self {
        let leg = if config.start_moving_up {
            Leg::ToTop
        } else {
            Leg::ToBottom
        };
        Self {
            phase: PlatformPhase::Moving(leg),
            speed: config.speed.max(MIN_SPEED),
            wait_at_top: config.wait_at_top.max(0.0),
            wait_at_bottom: config.wait_at_bottom.max(0.0),
        }
    }

    fn wait_after(&self, leg: Leg) -> f32 {
        match leg {
            Leg::ToTop => self.wait_at_top,
            Leg::ToBottom => self.wait_at_bottom,
        }
    }

    /// Advance one frame and return the new position.
    pub fn tick(&mut self, current: Vec3, dt: f32, path: &PlatformPath) -> Vec3 {
        match self.phase {
            PlatformPhase::Waiting { next, remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    PlatformPhase::Moving(next)
                } else {
                    PlatformPhase::Waiting { next, remaining }
                };
                current
            }
            PlatformPhase::Moving(leg) => {
                let target = leg.target(path);
                let next = move_towards(current, target, self.speed * dt.max(0.0));
                if next.distance(target) > ARRIVAL_EPSILON {
                    return next;
                }

                // Arrived: snap exactly and pause before the return trip
                let wait = self.wait_after(leg);
                self.phase = if wait > 0.0 {
                    PlatformPhase::Waiting {
                        next: leg.flipped(),
                        remaining: wait,
                    }
                } else {
                    PlatformPhase::Moving(leg.flipped())
                };
                target
            }
        }
    }
}
