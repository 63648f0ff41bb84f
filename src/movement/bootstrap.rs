//! Movement domain: player bootstrap from level data.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::PlayerAnimation;
use crate::config::GameConfig;
use crate::movement::{
    DashTrail, GameLayer, MovementState, MovementTuning, PLAYER_SIZE, Player,
};
use crate::phasing::DashPhaseManager;

/// Spawn the player at the level's spawn point.
pub(crate) fn spawn_player(
    mut commands: Commands,
    config: Res<GameConfig>,
    tuning: Res<MovementTuning>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let spawn = Vec2::from_array(config.level.player_spawn);
    info!(
        "Spawning player at {:?}: speed={}, max_jumps={}, dash={}s/{}s cooldown",
        spawn, tuning.move_speed, tuning.max_jumps, tuning.dash_duration, tuning.dash_cooldown
    );

    let mut player = commands.spawn((
        // Identity & Movement
        (
            Player,
            MovementState::default(),
            DashPhaseManager::default(),
            PlayerAnimation::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(spawn.x, spawn.y, 1.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Gravity is applied by the movement systems
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollidingEntities::default(),
            ActiveCollisionHooks::FILTER_PAIRS | ActiveCollisionHooks::MODIFY_CONTACTS,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Obstacle, GameLayer::Sensor],
            ),
        ),
    ));

    if tuning.trail.enabled {
        player.insert(DashTrail::default());
    }
}
