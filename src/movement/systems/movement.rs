//! Movement domain: locomotion systems for velocity, jumping and dashing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::AnimationTrigger;
use crate::movement::{
    DashEnded, DashStarted, DashTick, DashTrail, Facing, MovementInput, MovementState,
    MovementTuning, Player, resolve_dash_direction,
};

/// Ends dashes whose duration has elapsed.
pub(crate) fn update_dash_timer(
    time: Res<Time>,
    mut query: Query<(Entity, &mut MovementState, Option<&mut DashTrail>), With<Player>>,
    mut dash_ended: MessageWriter<DashEnded>,
) {
    let now = time.elapsed_secs();

    for (entity, mut state, trail) in &mut query {
        if state.dash.update(now) == DashTick::Finished {
            if let Some(mut trail) = trail {
                trail.enabled = false;
            }
            dash_ended.write(DashEnded { player: entity });
            debug!("Dash finished at t={:.3}", now);
        }
    }
}

pub(crate) fn apply_jump(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(Entity, &mut MovementState, &mut LinearVelocity), With<Player>>,
    mut triggers: MessageWriter<AnimationTrigger>,
) {
    if !input.jump_just_pressed {
        return;
    }

    for (entity, mut state, mut velocity) in &mut query {
        if !state.jumps.try_jump(tuning.max_jumps) {
            continue;
        }

        velocity.y = tuning.jump_velocity();
        state.on_ground = false;
        triggers.write(AnimationTrigger::Jumped { entity });
        debug!(
            "Jump: jumps_remaining={}",
            state.jumps.remaining(tuning.max_jumps)
        );
    }
}

pub(crate) fn apply_dash(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<
        (
            Entity,
            &mut MovementState,
            &mut LinearVelocity,
            Option<&mut DashTrail>,
        ),
        With<Player>,
    >,
    mut dash_started: MessageWriter<DashStarted>,
    mut triggers: MessageWriter<AnimationTrigger>,
) {
    let now = time.elapsed_secs();

    for (entity, mut state, mut velocity, trail) in &mut query {
        let direction = if input.dash_just_pressed {
            resolve_dash_direction(input.axis.x, velocity.x)
        } else {
            None
        };

        let started = direction.is_some_and(|direction| {
            state.dash.try_start(
                now,
                direction,
                tuning.dash_duration,
                tuning.dash_cooldown,
            )
        });

        if started {
            if let Some(mut trail) = trail {
                trail.enabled = true;
                trail.since_last = 0.0;
            }
            dash_started.write(DashStarted {
                player: entity,
                direction: state.dash.direction,
            });
            triggers.write(AnimationTrigger::Dashed { entity });
            debug!(
                "Dash started: direction={}, until t={:.3}",
                state.dash.direction, state.dash.ends_at
            );
        }

        // Velocity stays locked for the whole dash
        if state.dash.active {
            velocity.x = state.dash.direction * tuning.dash_speed;
        }
    }
}

pub(crate) fn apply_horizontal_movement(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut MovementState, &mut LinearVelocity), With<Player>>,
) {
    for (mut state, mut velocity) in &mut query {
        state.input_velocity = input.axis.x * tuning.move_speed;

        if state.dash.active {
            continue;
        }
        velocity.x = state.input_velocity;
    }
}

pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut LinearVelocity, With<Player>>,
) {
    let dt = time.delta_secs();

    for mut velocity in &mut query {
        velocity.y = (velocity.y - tuning.gravity * dt).max(-tuning.max_fall_speed);
    }
}

pub(crate) fn update_facing(
    input: Res<MovementInput>,
    mut query: Query<(&mut MovementState, &mut Sprite), With<Player>>,
) {
    for (mut state, mut sprite) in &mut query {
        let facing = if state.dash.active {
            Facing::from_direction(state.dash.direction)
        } else {
            Facing::from_direction(input.axis.x)
        };

        if let Some(facing) = facing {
            state.facing = facing;
        }
        sprite.flip_x = state.facing == Facing::Left;
    }
}
