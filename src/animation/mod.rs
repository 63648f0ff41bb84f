//! Animation state machine and playback for the player.
//!
//! Movement systems emit [`AnimationTrigger`]s on jump, dash and landing
//! edges; the state machine here derives the looping state from the
//! movement state and drives a simple squash/stretch presentation.

use avian2d::prelude::*;
use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::core::GameplaySet;
use crate::movement::{MovementState, PLAYER_SIZE, Player};

#[cfg(test)]
mod tests;

/// Vertical speed below which the player counts as neither rising nor falling.
const AIRBORNE_SPEED_THRESHOLD: f32 = 5.0;

/// Horizontal speed above which a grounded player is running.
const RUN_SPEED_THRESHOLD: f32 = 1.0;

/// Animation states for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
    Dash,
}

impl AnimationState {
    /// Peak sprite scale for this state (x, y).
    pub fn stretch(self) -> Vec2 {
        match self {
            AnimationState::Idle => Vec2::ONE,
            AnimationState::Run => Vec2::new(1.0, 0.97),
            AnimationState::Jump => Vec2::new(0.9, 1.1),
            AnimationState::Fall => Vec2::new(0.95, 1.05),
            AnimationState::Dash => Vec2::new(1.25, 0.8),
        }
    }
}

/// Component for animation playback on the player sprite.
#[derive(Component, Debug)]
pub struct PlayerAnimation {
    pub state: AnimationState,
    /// Previous state (for detecting transitions).
    pub previous_state: AnimationState,
    /// Current frame index (0-based).
    pub current_frame: u32,
    pub total_frames: u32,
    /// Time accumulator for frame timing.
    pub frame_timer: f32,
    /// Seconds per frame.
    pub frame_duration: f32,
    pub looping: bool,
    pub finished: bool,
}

impl Default for PlayerAnimation {
    fn default() -> Self {
        Self {
            state: AnimationState::Idle,
            previous_state: AnimationState::Idle,
            current_frame: 0,
            total_frames: 4,
            frame_timer: 0.0,
            frame_duration: 0.15,
            looping: true,
            finished: false,
        }
    }
}

impl PlayerAnimation {
    /// Set the animation state, resetting playback if it changed.
    /// Returns whether the state changed.
    pub fn set_state(&mut self, state: AnimationState) -> bool {
        if self.state == state {
            return false;
        }
        self.previous_state = self.state;
        self.state = state;
        self.rewind();
        true
    }

    /// Restart the current state from its first frame.
    pub fn rewind(&mut self) {
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;
        self.looping = matches!(self.state, AnimationState::Idle | AnimationState::Run);
        self.total_frames = match self.state {
            AnimationState::Idle => 4,
            AnimationState::Run => 6,
            AnimationState::Jump | AnimationState::Fall => 2,
            AnimationState::Dash => 3,
        };
        self.frame_duration = match self.state {
            AnimationState::Dash => 0.06,
            _ => 0.15,
        };
    }

    /// Sprite scale for the current frame. One-shot states start at their
    /// peak pose and ease back to rest by the last frame; looping states
    /// alternate between the pose and rest.
    pub fn stretch(&self) -> Vec2 {
        let pose = self.state.stretch();
        if self.looping {
            return if self.current_frame % 2 == 0 {
                pose
            } else {
                Vec2::ONE
            };
        }
        let last = self.total_frames.saturating_sub(1).max(1);
        if self.current_frame >= last {
            return Vec2::ONE;
        }
        pose.lerp(Vec2::ONE, self.current_frame as f32 / last as f32)
    }

    /// Advance playback by `dt`. Returns true when a one-shot animation
    /// reaches its last frame.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.finished {
            return false;
        }

        self.frame_timer += dt;
        if self.frame_timer < self.frame_duration {
            return false;
        }
        self.frame_timer -= self.frame_duration;
        self.current_frame += 1;

        if self.current_frame < self.total_frames {
            return false;
        }
        if self.looping {
            self.current_frame = 0;
            false
        } else {
            self.current_frame = self.total_frames - 1;
            self.finished = true;
            true
        }
    }
}

/// Pick the animation for the current movement state and velocity.
pub fn select_animation_state(state: &MovementState, velocity: Vec2) -> AnimationState {
    if state.dash.active {
        AnimationState::Dash
    } else if !state.on_ground && velocity.y > AIRBORNE_SPEED_THRESHOLD {
        AnimationState::Jump
    } else if !state.on_ground && velocity.y < -AIRBORNE_SPEED_THRESHOLD {
        AnimationState::Fall
    } else if velocity.x.abs() > RUN_SPEED_THRESHOLD {
        AnimationState::Run
    } else {
        AnimationState::Idle
    }
}

/// One-shot animation cues from gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTrigger {
    Jumped { entity: Entity },
    Dashed { entity: Entity },
    Landed { entity: Entity },
}

impl Message for AnimationTrigger {}

impl AnimationTrigger {
    pub fn entity(&self) -> Entity {
        match *self {
            AnimationTrigger::Jumped { entity }
            | AnimationTrigger::Dashed { entity }
            | AnimationTrigger::Landed { entity } => entity,
        }
    }
}

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AnimationTrigger>()
            .add_systems(
                Update,
                (
                    apply_animation_triggers,
                    animation_state_machine,
                    update_animation_frames,
                    present_animation,
                )
                    .chain()
                    .in_set(GameplaySet::Present),
            );
    }
}

/// Restart one-shot animations when gameplay fires a trigger, so a
/// double jump replays the jump even though the state did not change.
pub fn apply_animation_triggers(
    mut triggers: MessageReader<AnimationTrigger>,
    mut query: Query<&mut PlayerAnimation>,
) {
    for trigger in triggers.read() {
        let Ok(mut animation) = query.get_mut(trigger.entity()) else {
            continue;
        };
        let state = match trigger {
            AnimationTrigger::Jumped { .. } => AnimationState::Jump,
            AnimationTrigger::Dashed { .. } => AnimationState::Dash,
            AnimationTrigger::Landed { .. } => AnimationState::Idle,
        };
        if !animation.set_state(state) {
            animation.rewind();
        }
    }
}

/// System that applies animation state based on movement state.
pub fn animation_state_machine(
    mut query: Query<(&MovementState, &LinearVelocity, &mut PlayerAnimation), With<Player>>,
) {
    for (state, velocity, mut animation) in &mut query {
        let to = select_animation_state(state, velocity.0);
        if animation.set_state(to) {
            debug!("Animation: {:?} -> {:?}", animation.previous_state, to);
        }
    }
}

/// System that updates animation frames based on time.
pub fn update_animation_frames(time: Res<Time>, mut query: Query<&mut PlayerAnimation>) {
    for mut animation in &mut query {
        if animation.advance(time.delta_secs()) {
            debug!("Animation {:?} finished", animation.state);
        }
    }
}

/// Squash and stretch the sprite to match the current frame.
pub fn present_animation(
    mut query: Query<(&PlayerAnimation, &mut Sprite), (With<Player>, Changed<PlayerAnimation>)>,
) {
    for (animation, mut sprite) in &mut query {
        sprite.custom_size = Some(PLAYER_SIZE * animation.stretch());
    }
}
