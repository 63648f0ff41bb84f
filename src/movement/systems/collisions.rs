//! Movement domain: ground detection.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::AnimationTrigger;
use crate::movement::{MovementState, MovementTuning, Player};

/// Minimum upward component of a contact normal for it to count as floor.
pub(crate) const GROUND_NORMAL_MIN_Y: f32 = 0.5;

/// Half height used when the player collider is not a rectangle.
const FALLBACK_HALF_HEIGHT: f32 = 24.0;

/// True if a contact normal pointing from the player towards the other
/// collider means the other collider is supporting the player from below.
pub(crate) fn supports_from_below(normal_towards_other: Vec2) -> bool {
    -normal_towards_other.y > GROUND_NORMAL_MIN_Y
}

/// Where the ground probe sits relative to the player's centre.
pub(crate) fn ground_probe_offset(configured: Option<Vec2>, collider: &Collider) -> Vec2 {
    configured.unwrap_or_else(|| {
        let half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => FALLBACK_HALF_HEIGHT,
        };
        Vec2::new(0.0, -half_height)
    })
}

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    collisions: Collisions,
    tuning: Res<MovementTuning>,
    layers_query: Query<&CollisionLayers>,
    mut query: Query<
        (
            Entity,
            &Transform,
            &Collider,
            &LinearVelocity,
            &CollidingEntities,
            &mut MovementState,
        ),
        With<Player>,
    >,
    mut triggers: MessageWriter<AnimationTrigger>,
) {
    let ground_bits = tuning.ground_bits();

    for (entity, transform, collider, velocity, colliding, mut state) in &mut query {
        let was_on_ground = state.on_ground;

        // Overlap probe at the feet against the ground layers
        let probe = transform.translation.truncate()
            + ground_probe_offset(tuning.ground_check_offset(), collider);
        let filter =
            SpatialQueryFilter::from_mask(LayerMask(ground_bits)).with_excluded_entities([entity]);
        let probe_hit = !spatial_query
            .shape_intersections(
                &Collider::circle(tuning.ground_check_radius),
                probe,
                0.0,
                &filter,
            )
            .is_empty();

        // Fallback: already touching something on a ground layer
        let touching_ground = colliding.iter().any(|other| {
            layers_query
                .get(*other)
                .is_ok_and(|layers| layers.memberships.0 & ground_bits != 0)
        });

        // Any contact whose normal holds the player up
        let standing_on_contact = collisions.collisions_with(entity).any(|pair| {
            pair.manifolds.iter().any(|manifold| {
                let towards_other = if pair.collider1 == entity {
                    manifold.normal
                } else {
                    -manifold.normal
                };
                supports_from_below(towards_other)
            })
        });

        state.on_ground = probe_hit || touching_ground || standing_on_contact;

        let on_ground = state.on_ground;
        state.jumps.refresh(on_ground, velocity.y);

        if state.on_ground && !was_on_ground {
            triggers.write(AnimationTrigger::Landed { entity });
            debug!(
                "Landed: probe={}, touching={}, contact={}",
                probe_hit, touching_ground, standing_on_contact
            );
        } else if !state.on_ground && was_on_ground {
            debug!("Left ground: jumps_used={}", state.jumps.used);
        }
    }
}
