//! Animation: tests for state selection and frame playback.

use bevy::prelude::*;

use super::{AnimationState, PlayerAnimation, select_animation_state};
use crate::movement::MovementState;

fn grounded() -> MovementState {
    MovementState {
        on_ground: true,
        ..default()
    }
}

#[test]
fn test_select_state_on_ground() {
    assert_eq!(
        select_animation_state(&grounded(), Vec2::ZERO),
        AnimationState::Idle
    );
    assert_eq!(
        select_animation_state(&grounded(), Vec2::new(320.0, 0.0)),
        AnimationState::Run
    );
}

#[test]
fn test_select_state_in_air() {
    let airborne = MovementState::default();
    assert_eq!(
        select_animation_state(&airborne, Vec2::new(0.0, 400.0)),
        AnimationState::Jump
    );
    assert_eq!(
        select_animation_state(&airborne, Vec2::new(0.0, -400.0)),
        AnimationState::Fall
    );
}

#[test]
fn test_dash_overrides_everything() {
    let mut state = MovementState::default();
    state.dash.try_start(0.0, 1.0, 0.2, 3.0);
    assert_eq!(
        select_animation_state(&state, Vec2::new(0.0, -400.0)),
        AnimationState::Dash
    );
}

#[test]
fn test_set_state_tracks_previous_and_resets_frame() {
    let mut animation = PlayerAnimation::default();
    animation.current_frame = 3;

    assert!(animation.set_state(AnimationState::Jump));
    assert_eq!(animation.previous_state, AnimationState::Idle);
    assert_eq!(animation.current_frame, 0);
    assert!(!animation.looping);

    assert!(!animation.set_state(AnimationState::Jump));
}

#[test]
fn test_looping_animation_wraps() {
    let mut animation = PlayerAnimation::default();
    for _ in 0..animation.total_frames {
        assert!(!animation.advance(animation.frame_duration));
    }
    assert_eq!(animation.current_frame, 0);
    assert!(!animation.finished);
}

#[test]
fn test_one_shot_animation_finishes_on_last_frame() {
    let mut animation = PlayerAnimation::default();
    animation.set_state(AnimationState::Dash);

    let mut finished = false;
    for _ in 0..10 {
        finished |= animation.advance(0.06);
    }

    assert!(finished);
    assert!(animation.finished);
    assert_eq!(animation.current_frame, animation.total_frames - 1);
}

#[test]
fn test_one_shot_pulse_eases_back_to_rest() {
    let mut animation = PlayerAnimation::default();
    animation.set_state(AnimationState::Jump);
    assert_eq!(animation.stretch(), AnimationState::Jump.stretch());

    while !animation.advance(animation.frame_duration) {}

    assert_eq!(animation.stretch(), Vec2::ONE);
}

#[test]
fn test_rewind_replays_the_pulse() {
    let mut animation = PlayerAnimation::default();
    animation.set_state(AnimationState::Jump);
    while !animation.advance(animation.frame_duration) {}

    // Second jump while already in the Jump state
    assert!(!animation.set_state(AnimationState::Jump));
    animation.rewind();

    assert_eq!(animation.stretch(), AnimationState::Jump.stretch());
}

#[test]
fn test_run_alternates_between_pose_and_rest() {
    let mut animation = PlayerAnimation::default();
    animation.set_state(AnimationState::Run);
    assert_eq!(animation.stretch(), AnimationState::Run.stretch());

    animation.advance(animation.frame_duration);
    assert_eq!(animation.stretch(), Vec2::ONE);

    animation.advance(animation.frame_duration);
    assert_eq!(animation.stretch(), AnimationState::Run.stretch());
}
