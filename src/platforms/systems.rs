//! Platforms domain: per-frame platform motion and path gizmos.

use bevy::prelude::*;

use crate::platforms::MovingPlatform;

pub(crate) fn drive_platforms(
    time: Res<Time>,
    mut query: Query<(&mut MovingPlatform, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (mut platform, mut transform) in &mut query {
        let path = platform.path_or_init(&transform);
        transform.translation = platform.motion.tick(transform.translation, dt, &path);
    }
}

/// Draws the waypoints each platform actually travels between.
#[cfg(feature = "dev-tools")]
pub(crate) fn draw_platform_paths(mut gizmos: Gizmos, query: Query<&MovingPlatform>) {
    const PATH_COLOR: Color = Color::srgb(0.3, 0.9, 0.9);
    const MARKER_RADIUS: f32 = 6.0;

    for platform in &query {
        let Some(path) = platform.path else {
            continue;
        };
        let top = path.top.truncate();
        let bottom = path.bottom.truncate();

        gizmos.line_2d(bottom, top, PATH_COLOR);
        gizmos.circle_2d(top, MARKER_RADIUS, PATH_COLOR);
        gizmos.circle_2d(bottom, MARKER_RADIUS, PATH_COLOR);
    }
}
