//! Conversions between Bevy's `f32` glam types and the `f64` nalgebra types
//! the controllers run on.

use bevy::prelude::{GlobalTransform, Quat, Transform, Vec3};
use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};

#[must_use]
pub fn vector_from_vec3(v: Vec3) -> Vector3<f64> {
    Vector3::new(f64::from(v.x), f64::from(v.y), f64::from(v.z))
}

#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn vec3_from_vector(v: &Vector3<f64>) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

#[must_use]
pub fn rotation_from_quat(q: Quat) -> UnitQuaternion<f64> {
    UnitQuaternion::from_quaternion(Quaternion::new(
        f64::from(q.w),
        f64::from(q.x),
        f64::from(q.y),
        f64::from(q.z),
    ))
}

#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn quat_from_rotation(q: &UnitQuaternion<f64>) -> Quat {
    Quat::from_xyzw(q.i as f32, q.j as f32, q.k as f32, q.w as f32).normalize()
}

/// Pose of a transform, ignoring scale.
#[must_use]
pub fn isometry_from_transform(t: &Transform) -> Isometry3<f64> {
    Isometry3::from_parts(
        Translation3::from(vector_from_vec3(t.translation)),
        rotation_from_quat(t.rotation),
    )
}

/// World pose of a global transform, ignoring scale.
#[must_use]
pub fn isometry_from_global(t: &GlobalTransform) -> Isometry3<f64> {
    let (_, rotation, translation) = t.to_scale_rotation_translation();
    Isometry3::from_parts(
        Translation3::from(vector_from_vec3(translation)),
        rotation_from_quat(rotation),
    )
}

/// Overwrite translation and rotation of `t`, keeping its scale.
pub fn write_isometry(t: &mut Transform, pose: &Isometry3<f64>) {
    t.translation = vec3_from_vector(&pose.translation.vector);
    t.rotation = quat_from_rotation(&pose.rotation);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
