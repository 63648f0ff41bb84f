//! Platforms domain: tests for waypoint computation and oscillation.

use bevy::prelude::*;

use super::{
    Leg, MIN_SPEED, MotionAxis, MotionSpace, MovingPlatform, PlatformConfig, PlatformMotion,
    PlatformPath, PlatformPhase, move_towards,
};

const DT: f32 = 1.0 / 60.0;

fn config(distance_up: f32, distance_down: f32) -> PlatformConfig {
    PlatformConfig {
        speed: 4.0,
        distance_up,
        distance_down,
        wait_at_top: 0.5,
        wait_at_bottom: 0.0,
        start_moving_up: true,
        ..default()
    }
}

/// Tick until the platform leaves its current phase or `max_ticks` pass.
fn run_until_phase_changes(
    motion: &mut PlatformMotion,
    position: &mut Vec3,
    path: &PlatformPath,
    max_ticks: usize,
) -> f32 {
    let start_phase = motion.phase;
    let mut elapsed = 0.0;
    for _ in 0..max_ticks {
        *position = motion.tick(*position, DT, path);
        elapsed += DT;
        if motion.phase != start_phase {
            break;
        }
    }
    elapsed
}

// -----------------------------------------------------------------------------
// Path tests
// -----------------------------------------------------------------------------

#[test]
fn test_path_from_distances() {
    let path = PlatformPath::new(Vec3::new(1.0, 1.0, 0.0), Vec3::Y, 2.0, 3.0);
    assert_eq!(path.top, Vec3::new(1.0, 3.0, 0.0));
    assert_eq!(path.bottom, Vec3::new(1.0, -2.0, 0.0));
}

#[test]
fn test_path_clamps_negative_distances() {
    let path = PlatformPath::new(Vec3::ZERO, Vec3::X, -4.0, -1.0);
    assert_eq!(path.top, Vec3::ZERO);
    assert_eq!(path.bottom, Vec3::ZERO);
}

#[test]
fn test_local_space_follows_rotation() {
    let config = PlatformConfig {
        axis: MotionAxis::Y,
        space: MotionSpace::Local,
        distance_up: 1.0,
        distance_down: 0.0,
        ..default()
    };
    let rotation = Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2);
    let path = PlatformPath::from_config(Vec3::ZERO, rotation, &config);
    assert!(path.top.distance(Vec3::X) < 1e-5);

    let world = PlatformConfig {
        space: MotionSpace::World,
        ..config
    };
    let path = PlatformPath::from_config(Vec3::ZERO, rotation, &world);
    assert_eq!(path.top, Vec3::Y);
}

#[test]
fn test_sanitized_config() {
    let config = PlatformConfig {
        speed: 0.0,
        distance_up: -1.0,
        distance_down: -2.0,
        wait_at_top: -0.5,
        wait_at_bottom: -0.5,
        ..default()
    }
    .sanitized();

    assert_eq!(config.speed, MIN_SPEED);
    assert_eq!(config.distance_up, 0.0);
    assert_eq!(config.distance_down, 0.0);
    assert_eq!(config.wait_at_top, 0.0);
    assert_eq!(config.wait_at_bottom, 0.0);
}

// -----------------------------------------------------------------------------
// move_towards tests
// -----------------------------------------------------------------------------

#[test]
fn test_move_towards_steps_without_overshoot() {
    let step = move_towards(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0), 0.5);
    assert_eq!(step, Vec3::new(0.0, 0.5, 0.0));

    let arrive = move_towards(Vec3::new(0.0, 1.9, 0.0), Vec3::new(0.0, 2.0, 0.0), 0.5);
    assert_eq!(arrive, Vec3::new(0.0, 2.0, 0.0));
}

#[test]
fn test_move_towards_at_target_stays() {
    assert_eq!(move_towards(Vec3::ONE, Vec3::ONE, 1.0), Vec3::ONE);
}

// -----------------------------------------------------------------------------
// Oscillation tests
// -----------------------------------------------------------------------------

#[test]
fn test_initial_direction() {
    let up = PlatformMotion::new(&config(2.0, 0.0));
    assert_eq!(up.phase, PlatformPhase::Moving(Leg::ToTop));

    let down = PlatformMotion::new(&PlatformConfig {
        start_moving_up: false,
        ..config(2.0, 0.0)
    });
    assert_eq!(down.phase, PlatformPhase::Moving(Leg::ToBottom));
}

#[test]
fn test_up_wait_down_cycle() {
    // distance_up=2, distance_down=0, wait_at_top=0.5, start moving up
    let cfg = config(2.0, 0.0);
    let path = PlatformPath::new(Vec3::ZERO, Vec3::Y, cfg.distance_up, cfg.distance_down);
    let mut motion = PlatformMotion::new(&cfg);
    let mut position = Vec3::ZERO;

    // Travel to the top and snap exactly
    run_until_phase_changes(&mut motion, &mut position, &path, 1000);
    assert_eq!(position, Vec3::new(0.0, 2.0, 0.0));
    assert!(matches!(
        motion.phase,
        PlatformPhase::Waiting {
            next: Leg::ToBottom,
            ..
        }
    ));

    // Wait at the top for ~0.5s without moving
    let waited = run_until_phase_changes(&mut motion, &mut position, &path, 1000);
    assert!((waited - 0.5).abs() <= DT + 1e-4);
    assert_eq!(position, Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(motion.phase, PlatformPhase::Moving(Leg::ToBottom));

    // Back to the origin; no wait at the bottom
    run_until_phase_changes(&mut motion, &mut position, &path, 1000);
    assert_eq!(position, Vec3::ZERO);
    assert_eq!(motion.phase, PlatformPhase::Moving(Leg::ToTop));
}

#[test]
fn test_oscillation_stays_between_waypoints() {
    let cfg = PlatformConfig {
        speed: 3.0,
        wait_at_top: 0.1,
        wait_at_bottom: 0.2,
        ..config(1.5, 0.75)
    };
    let start = Vec3::new(5.0, -1.0, 0.0);
    let path = PlatformPath::from_config(start, Quat::IDENTITY, &cfg);
    let mut motion = PlatformMotion::new(&cfg);
    let mut position = start;
    let mut reached_top = 0;
    let mut reached_bottom = 0;

    for _ in 0..5000 {
        position = motion.tick(position, DT, &path);
        assert!(position.y <= path.top.y && position.y >= path.bottom.y);
        assert_eq!(position.x, start.x);
        if position == path.top {
            reached_top += 1;
        }
        if position == path.bottom {
            reached_bottom += 1;
        }
    }

    assert!(reached_top > 0);
    assert!(reached_bottom > 0);
}

#[test]
fn test_zero_length_path_keeps_flipping_in_place() {
    let cfg = PlatformConfig {
        wait_at_top: 0.0,
        ..config(0.0, 0.0)
    };
    let path = PlatformPath::new(Vec3::ZERO, Vec3::Y, 0.0, 0.0);
    let mut motion = PlatformMotion::new(&cfg);

    let position = motion.tick(Vec3::ZERO, DT, &path);
    assert_eq!(position, Vec3::ZERO);
    assert_eq!(motion.phase, PlatformPhase::Moving(Leg::ToBottom));
}

#[test]
fn test_path_is_frozen_on_first_use() {
    let mut platform = MovingPlatform::new(config(2.0, 0.0));
    assert!(platform.path.is_none());

    let first = platform.path_or_init(&Transform::from_xyz(0.0, 0.0, 0.0));
    let later = platform.path_or_init(&Transform::from_xyz(10.0, 10.0, 0.0));

    assert_eq!(first, later);
    assert_eq!(first.top, Vec3::new(0.0, 2.0, 0.0));
}
