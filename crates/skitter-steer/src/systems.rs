//! Late-tick systems: head tracking, then root motion.

use bevy::prelude::*;
use skitter_core::convert::{
    isometry_from_transform, quat_from_rotation, rotation_from_quat, vector_from_vec3,
    write_isometry,
};

use crate::components::{HeadTracking, RootMotion, SteeringTarget};

/// World position of the single [`SteeringTarget`], or `None` if there is
/// not exactly one.
fn target_position(targets: &Query<&GlobalTransform, With<SteeringTarget>>) -> Option<Vec3> {
    match targets.single() {
        Ok(global) => Some(global.translation()),
        Err(err) => {
            debug!("no steering target this tick: {err}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// track_heads
// ---------------------------------------------------------------------------

/// Turn every tracked head toward the steering target.
///
/// The rest frame of a head is recovered from its last propagated world
/// rotation and its current local rotation.
#[allow(clippy::needless_pass_by_value)]
pub fn track_heads(
    time: Res<Time>,
    targets: Query<&GlobalTransform, With<SteeringTarget>>,
    mut heads: Query<(&HeadTracking, &GlobalTransform, &mut Transform), Without<SteeringTarget>>,
) {
    let Some(target) = target_position(&targets) else {
        return;
    };
    let target = vector_from_vec3(target);
    let dt = time.delta_secs_f64();

    for (tracking, global, mut transform) in &mut heads {
        let current = rotation_from_quat(transform.rotation);
        let (_, world_rotation, world_position) = global.to_scale_rotation_translation();
        let parent_rotation = rotation_from_quat(world_rotation) * current.inverse();
        let next = tracking.0.update(
            &current,
            &vector_from_vec3(world_position),
            &parent_rotation,
            &target,
            dt,
        );
        transform.rotation = quat_from_rotation(&next);
    }
}

// ---------------------------------------------------------------------------
// steer_bodies
// ---------------------------------------------------------------------------

/// Advance every root-motion controller and move its body.
#[allow(clippy::needless_pass_by_value)]
pub fn steer_bodies(
    time: Res<Time>,
    targets: Query<&GlobalTransform, With<SteeringTarget>>,
    mut bodies: Query<(&mut RootMotion, &mut Transform), Without<SteeringTarget>>,
) {
    let Some(target) = target_position(&targets) else {
        return;
    };
    let target = vector_from_vec3(target);
    let dt = time.delta_secs_f64();

    for (mut motion, mut transform) in &mut bodies {
        let mut pose = isometry_from_transform(&transform);
        motion.last_sample = motion.controller.update(&mut pose, &target, dt);
        write_isometry(&mut transform, &pose);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
