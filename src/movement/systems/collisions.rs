//! Movement domain: ground and wall contact detection.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{ContactFlags, GameLayer, KinematicBody};

/// How far past the body's edge a contact ray reaches.
const CONTACT_PROBE: f32 = 4.0;

/// Refresh every body's contact flags from ray casts against level geometry.
/// A body without a collider keeps its last flags for this tick.
pub(crate) fn detect_contacts(
    spatial_query: SpatialQuery,
    mut query: Query<(&mut KinematicBody, Has<Collider>)>,
) {
    // Filter to level geometry only (not actors, pickups, etc.)
    let level_filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (mut body, has_collider) in &mut query {
        if !has_collider {
            body.apply_contacts(None);
            continue;
        }

        let origin = body.position;
        let half = body.half_size;

        // Cast a short ray downward from the feet
        let feet = origin - Vec2::new(0.0, half.y);
        let grounded = spatial_query
            .cast_ray(feet, Dir2::NEG_Y, CONTACT_PROBE, true, &level_filter)
            .is_some();

        let blocked_left = spatial_query
            .cast_ray(
                origin,
                Dir2::NEG_X,
                half.x + CONTACT_PROBE,
                true,
                &level_filter,
            )
            .is_some();

        let blocked_right = spatial_query
            .cast_ray(origin, Dir2::X, half.x + CONTACT_PROBE, true, &level_filter)
            .is_some();

        let was_grounded = body.is_grounded();
        body.apply_contacts(Some(ContactFlags {
            grounded,
            blocked_left,
            blocked_right,
        }));

        if body.is_grounded() != was_grounded {
            debug!(
                "Contact change at ({:.0}, {:.0}): grounded={}",
                origin.x,
                origin.y,
                body.is_grounded()
            );
        }
    }
}
