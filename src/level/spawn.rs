//! Level domain: spawning the configured level geometry.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::config::GameConfig;
use crate::level::BlockConfig;
use crate::movement::GameLayer;
use crate::phasing::PhaseProtected;
use crate::platforms::MovingPlatform;

const GROUND_COLOR: Color = Color::srgb(0.4, 0.5, 0.4);
const OBSTACLE_COLOR: Color = Color::srgb(0.55, 0.3, 0.3);
const PROTECTED_COLOR: Color = Color::srgb(0.75, 0.65, 0.25);
const PLATFORM_COLOR: Color = Color::srgb(0.5, 0.4, 0.3);

fn solid_block(block: &BlockConfig, color: Color, layers: CollisionLayers) -> impl Bundle {
    let size = block.size();
    let position = block.position();
    (
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 0.0),
        Collider::rectangle(size.x, size.y),
        layers,
    )
}

pub(crate) fn spawn_level(mut commands: Commands, config: Res<GameConfig>) {
    let level = &config.level;

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let obstacle_layers = CollisionLayers::new(GameLayer::Obstacle, [GameLayer::Player]);

    for block in &level.ground {
        commands.spawn((
            solid_block(block, GROUND_COLOR, ground_layers),
            RigidBody::Static,
        ));
    }

    for block in &level.obstacles {
        commands.spawn((
            solid_block(block, OBSTACLE_COLOR, obstacle_layers),
            RigidBody::Static,
        ));
    }

    for protected in &level.protected {
        commands
            .spawn((
                PhaseProtected,
                solid_block(&protected.block, PROTECTED_COLOR, obstacle_layers),
                RigidBody::Static,
            ))
            .with_children(|parent| {
                for part in &protected.parts {
                    parent.spawn(solid_block(part, PROTECTED_COLOR, obstacle_layers));
                }
            });
    }

    for platform in &config.platforms {
        let block = BlockConfig {
            position: platform.position,
            size: platform.size,
        };
        commands.spawn((
            MovingPlatform::new(platform.clone()),
            solid_block(&block, PLATFORM_COLOR, ground_layers),
            RigidBody::Kinematic,
        ));
    }

    info!(
        "Level spawned: {} ground, {} obstacles, {} protected, {} platforms",
        level.ground.len(),
        level.obstacles.len(),
        level.protected.len(),
        config.platforms.len()
    );
}
