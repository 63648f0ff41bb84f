//! Movement domain: tests for jump counting, dash timing and tuning.

use avian2d::prelude::*;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use super::bootstrap::spawn_player;
use super::systems::collisions::{ground_probe_offset, supports_from_below};
use super::{
    DashState, DashTick, Facing, GameLayer, JUMP_RESET_MAX_RISE, JumpCounter, MovementTuning,
    Player, TrailConfig, TrailGhost, layer_bits, resolve_dash_direction,
};
use crate::config::GameConfig;
use crate::phasing::DashPhaseManager;

// -----------------------------------------------------------------------------
// Jump tests
// -----------------------------------------------------------------------------

#[test]
fn test_double_jump_then_third_is_ignored() {
    let mut jumps = JumpCounter::default();

    assert!(jumps.try_jump(2));
    assert!(jumps.try_jump(2));
    assert!(!jumps.try_jump(2));
    assert_eq!(jumps.used, 2);
}

#[test]
fn test_grounding_restores_jumps() {
    let mut jumps = JumpCounter::default();
    jumps.try_jump(2);
    jumps.try_jump(2);
    assert_eq!(jumps.remaining(2), 0);

    jumps.reset();

    assert_eq!(jumps.remaining(2), 2);
    assert!(jumps.try_jump(2));
}

#[test]
fn test_grounded_and_falling_refunds_jumps() {
    let mut jumps = JumpCounter::default();
    jumps.try_jump(2);
    jumps.try_jump(2);

    assert!(jumps.refresh(true, -50.0));
    assert_eq!(jumps.used, 0);

    // Resting on the floor counts too
    jumps.try_jump(2);
    assert!(jumps.refresh(true, 0.0));
    assert_eq!(jumps.used, 0);
}

#[test]
fn test_grounded_while_rising_keeps_jump_count() {
    let tuning = MovementTuning::default();
    let mut jumps = JumpCounter::default();
    assert!(jumps.try_jump(tuning.max_jumps));

    // Frame after the jump: the ground check still touches the floor
    assert!(!jumps.refresh(true, tuning.jump_velocity()));
    assert!(!jumps.refresh(true, JUMP_RESET_MAX_RISE + 0.5));
    assert_eq!(jumps.used, 1);
}

#[test]
fn test_airborne_never_refunds_jumps() {
    let mut jumps = JumpCounter::default();
    jumps.try_jump(2);

    for velocity in [-400.0, 0.0, 400.0] {
        assert!(!jumps.refresh(false, velocity));
    }
    assert_eq!(jumps.used, 1);
}

#[test]
fn test_jump_count_never_exceeds_max() {
    for max_jumps in 0..4u8 {
        let mut jumps = JumpCounter::default();
        for _ in 0..10 {
            jumps.try_jump(max_jumps);
            assert!(jumps.used <= max_jumps);
        }
    }
}

#[test]
fn test_zero_max_jumps_never_jumps() {
    let mut jumps = JumpCounter::default();
    assert!(!jumps.try_jump(0));
}

// -----------------------------------------------------------------------------
// Dash tests
// -----------------------------------------------------------------------------

#[test]
fn test_dash_locks_for_duration_then_finishes() {
    let mut dash = DashState::default();
    assert!(dash.try_start(0.0, 1.0, 0.2, 3.0));

    assert_eq!(dash.update(0.1), DashTick::Continuing);
    assert!(dash.active);
    assert_eq!(dash.update(0.2), DashTick::Finished);
    assert!(!dash.active);
    assert_eq!(dash.update(0.3), DashTick::Idle);
}

#[test]
fn test_dash_respects_cooldown_from_start() {
    let mut dash = DashState::default();
    assert!(dash.try_start(0.0, 1.0, 0.2, 3.0));
    dash.update(0.25);

    // Attempt at t=1 is inside the cooldown window
    assert!(!dash.try_start(1.0, 1.0, 0.2, 3.0));
    assert_eq!(dash.last_started_at, Some(0.0));

    // Attempt at t=3.1 succeeds
    assert!(dash.try_start(3.1, -1.0, 0.2, 3.0));
    assert_eq!(dash.direction, -1.0);
    assert_eq!(dash.last_started_at, Some(3.1));
}

#[test]
fn test_dash_ignored_while_dashing() {
    let mut dash = DashState::default();
    assert!(dash.try_start(0.0, 1.0, 1.0, 0.0));

    assert!(!dash.try_start(0.5, -1.0, 1.0, 0.0));
    assert_eq!(dash.direction, 1.0);
    assert_eq!(dash.started_at, 0.0);
}

#[test]
fn test_dash_requires_direction() {
    let mut dash = DashState::default();
    assert!(!dash.try_start(0.0, 0.0, 0.2, 3.0));
    assert!(dash.last_started_at.is_none());
}

#[test]
fn test_repeated_attempts_do_not_extend_cooldown() {
    let mut dash = DashState::default();
    dash.try_start(0.0, 1.0, 0.2, 3.0);
    dash.update(0.2);

    let mut t = 0.3;
    while t < 3.0 {
        assert!(!dash.try_start(t, 1.0, 0.2, 3.0));
        t += 0.1;
    }
    assert!(dash.try_start(3.0, 1.0, 0.2, 3.0));
}

#[test]
fn test_cooldown_progress() {
    let mut dash = DashState::default();
    assert_eq!(dash.cooldown_progress(0.0, 3.0), 1.0);

    dash.try_start(1.0, 1.0, 0.2, 3.0);
    assert_eq!(dash.cooldown_progress(1.0, 3.0), 0.0);
    assert!((dash.cooldown_progress(2.5, 3.0) - 0.5).abs() < 1e-6);
    assert_eq!(dash.cooldown_progress(10.0, 3.0), 1.0);
    assert_eq!(dash.cooldown_progress(1.5, 0.0), 1.0);
}

#[test]
fn test_dash_direction_prefers_input() {
    assert_eq!(resolve_dash_direction(-0.7, 300.0), Some(-1.0));
    assert_eq!(resolve_dash_direction(0.0, 300.0), Some(1.0));
    assert_eq!(resolve_dash_direction(0.0, -5.0), Some(-1.0));
    assert_eq!(resolve_dash_direction(0.0, 0.0), None);
}

#[test]
fn test_facing_from_direction() {
    assert_eq!(Facing::from_direction(1.0), Some(Facing::Right));
    assert_eq!(Facing::from_direction(-1.0), Some(Facing::Left));
    assert_eq!(Facing::from_direction(0.0), None);
}

// -----------------------------------------------------------------------------
// Tuning tests
// -----------------------------------------------------------------------------

#[test]
fn test_jump_velocity_reaches_jump_height() {
    let tuning = MovementTuning {
        jump_height: 100.0,
        gravity: 2000.0,
        ..default()
    };
    let v = tuning.jump_velocity();
    let apex = v * v / (2.0 * tuning.gravity);
    assert!((apex - 100.0).abs() < 1e-3);
}

#[test]
fn test_sanitized_clamps_negative_values() {
    let tuning = MovementTuning {
        move_speed: -5.0,
        jump_height: -1.0,
        dash_duration: -0.2,
        dash_cooldown: -3.0,
        ground_check_radius: -2.0,
        trail: TrailConfig {
            lifetime: -1.0,
            interval: 0.0,
            color: [2.0, -1.0, 0.5, 1.5],
            ..default()
        },
        ..default()
    }
    .sanitized();

    assert_eq!(tuning.move_speed, 0.0);
    assert_eq!(tuning.jump_height, 0.0);
    assert_eq!(tuning.dash_duration, 0.0);
    assert_eq!(tuning.dash_cooldown, 0.0);
    assert!(tuning.ground_check_radius > 0.0);
    assert_eq!(tuning.trail.lifetime, 0.0);
    assert!(tuning.trail.interval > 0.0);
    assert_eq!(tuning.trail.color, [1.0, 0.0, 0.5, 1.0]);
}

#[test]
fn test_layer_bits_combine() {
    let bits = layer_bits(&[GameLayer::Ground, GameLayer::Obstacle]);
    assert_eq!(bits, GameLayer::Ground.to_bits() | GameLayer::Obstacle.to_bits());
    assert_eq!(layer_bits(&[]), 0);
}

// -----------------------------------------------------------------------------
// Ground detection helpers
// -----------------------------------------------------------------------------

#[test]
fn test_supports_from_below() {
    // Normal pointing from the player down into the floor
    assert!(supports_from_below(Vec2::NEG_Y));
    // Wall to the right
    assert!(!supports_from_below(Vec2::X));
    // Ceiling above
    assert!(!supports_from_below(Vec2::Y));
}

#[test]
fn test_ground_probe_defaults_to_collider_bottom() {
    let collider = Collider::rectangle(24.0, 48.0);
    assert_eq!(ground_probe_offset(None, &collider), Vec2::new(0.0, -24.0));
    assert_eq!(
        ground_probe_offset(Some(Vec2::new(1.0, -30.0)), &collider),
        Vec2::new(1.0, -30.0)
    );
}

#[test]
fn test_trail_ghost_fades_out() {
    let mut ghost = TrailGhost {
        age: 0.0,
        lifetime: 0.5,
        alpha: 0.8,
    };
    assert!((ghost.current_alpha() - 0.8).abs() < 1e-6);
    ghost.age = 0.25;
    assert!((ghost.current_alpha() - 0.4).abs() < 1e-6);
    ghost.age = 1.0;
    assert_eq!(ghost.current_alpha(), 0.0);
}

// -----------------------------------------------------------------------------
// Bootstrap tests
// -----------------------------------------------------------------------------

#[test]
fn test_spawned_player_can_phase_on_first_frame() {
    let mut world = World::new();
    world.insert_resource(GameConfig::default());
    world.insert_resource(MovementTuning::default());

    world
        .run_system_once(spawn_player)
        .expect("spawn system runs");
    // A second run must not add another player
    world
        .run_system_once(spawn_player)
        .expect("spawn system runs");

    let mut players = world.query_filtered::<Option<&DashPhaseManager>, With<Player>>();
    let managers: Vec<_> = players.iter(&world).collect();
    assert_eq!(managers.len(), 1);
    assert!(managers[0].is_some_and(|manager| !manager.is_active()));
}
