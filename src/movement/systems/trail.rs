//! Movement domain: dash afterimage trail.

use bevy::prelude::*;

use crate::movement::{DashTrail, MovementTuning, Player, TrailGhost};

/// Ghosts render just behind the player.
const GHOST_Z_OFFSET: f32 = -0.1;

pub(crate) fn emit_dash_trail(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &Sprite, &mut DashTrail), With<Player>>,
) {
    let dt = time.delta_secs();
    let trail = &tuning.trail;

    for (transform, sprite, mut dash_trail) in &mut query {
        if !dash_trail.enabled {
            continue;
        }

        dash_trail.since_last += dt;
        if dash_trail.since_last < trail.interval {
            continue;
        }
        dash_trail.since_last = 0.0;

        let color = trail.color();
        commands.spawn((
            TrailGhost {
                age: 0.0,
                lifetime: trail.lifetime,
                alpha: color.alpha(),
            },
            Sprite {
                color,
                custom_size: sprite.custom_size,
                flip_x: sprite.flip_x,
                ..default()
            },
            Transform::from_translation(
                transform.translation + Vec3::new(0.0, 0.0, GHOST_Z_OFFSET),
            ),
        ));
    }
}

pub(crate) fn fade_trail_ghosts(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut TrailGhost, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut ghost, mut sprite) in &mut query {
        ghost.age += dt;
        if ghost.age >= ghost.lifetime {
            commands.entity(entity).despawn();
            continue;
        }
        sprite.color = sprite.color.with_alpha(ghost.current_alpha());
    }
}
