//! Small vector/rotation helpers shared by the gait and steering controllers.
//!
//! Conventions: right-handed, +Y up, local forward is -Z. All angles are in
//! radians. Every helper tolerates zero-length inputs and returns a finite
//! fallback instead of NaN.

use nalgebra::{Unit, UnitQuaternion, Vector3};

/// Vectors shorter than this are treated as zero-length.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// World up axis (+Y).
#[must_use]
pub fn world_up() -> Vector3<f64> {
    Vector3::y()
}

/// Local forward axis (-Z).
#[must_use]
pub fn local_forward() -> Vector3<f64> {
    -Vector3::z()
}

/// Interpolation factor of the frame-rate independent exponential smoothing
/// law: `1 - exp(-rate * dt)`.
///
/// Lerping toward a goal by this factor every tick converges at the same
/// speed regardless of tick length.
#[must_use]
pub fn smoothing_factor(rate: f64, dt: f64) -> f64 {
    1.0 - (-rate * dt).exp()
}

/// Scalar linear interpolation (unclamped).
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a).mul_add(t, a)
}

/// Remove the component of `v` along `normal`.
///
/// `normal` need not be unit length. A zero normal returns `v` unchanged.
#[must_use]
pub fn project_on_plane(v: &Vector3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    let n2 = normal.norm_squared();
    if n2 < DEGENERATE_EPSILON {
        return *v;
    }
    v - normal * (v.dot(normal) / n2)
}

/// Signed angle from `from` to `to`, with the sign taken from `axis`.
///
/// Positive when turning `from` toward `to` is counter-clockwise around
/// `axis`. Exactly opposite vectors give `+pi`. Zero-length inputs give 0.
#[must_use]
pub fn signed_angle(from: &Vector3<f64>, to: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    let (Some(f), Some(t)) = (
        from.try_normalize(DEGENERATE_EPSILON),
        to.try_normalize(DEGENERATE_EPSILON),
    ) else {
        return 0.0;
    };
    let cross = f.cross(&t);
    let unsigned = cross.norm().atan2(f.dot(&t));
    if axis.dot(&cross) < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

/// A unit vector perpendicular to `v`, preferring one in the horizontal
/// plane so that a half-turn becomes a yaw rather than a pitch.
fn any_perpendicular(v: &Vector3<f64>) -> Unit<Vector3<f64>> {
    let candidate = project_on_plane(&world_up(), v);
    Unit::try_new(candidate, DEGENERATE_EPSILON)
        .unwrap_or_else(|| Unit::new_normalize(project_on_plane(&Vector3::x(), v)))
}

/// Rotate the direction `current` toward `target` by at most `max_radians`.
///
/// Returns a unit vector. The result equals the normalized `target` when it
/// is already within `max_radians`. A zero `target` keeps `current`.
#[must_use]
pub fn rotate_towards(current: &Vector3<f64>, target: &Vector3<f64>, max_radians: f64) -> Vector3<f64> {
    let Some(from) = current.try_normalize(DEGENERATE_EPSILON) else {
        return target
            .try_normalize(DEGENERATE_EPSILON)
            .unwrap_or_else(local_forward);
    };
    let Some(to) = target.try_normalize(DEGENERATE_EPSILON) else {
        return from;
    };

    let cross = from.cross(&to);
    let angle = cross.norm().atan2(from.dot(&to));
    if angle <= max_radians {
        return to;
    }

    let axis = Unit::try_new(cross, DEGENERATE_EPSILON).unwrap_or_else(|| any_perpendicular(&from));
    UnitQuaternion::from_axis_angle(&axis, max_radians.max(0.0)) * from
}

/// Rotation whose local forward (-Z) points along `forward` with +Y as close
/// to `up` as possible.
///
/// Falls back to another up axis when `forward` is parallel to `up`, and to
/// identity when `forward` is zero.
#[must_use]
pub fn look_rotation(forward: &Vector3<f64>, up: &Vector3<f64>) -> UnitQuaternion<f64> {
    let Some(f) = forward.try_normalize(DEGENERATE_EPSILON) else {
        return UnitQuaternion::identity();
    };
    let up = if f.cross(up).norm_squared() < DEGENERATE_EPSILON {
        if f.y.abs() < 0.9 { Vector3::y() } else { Vector3::z() }
    } else {
        *up
    };
    // face_towards maps +Z onto its argument, so aim +Z backwards.
    UnitQuaternion::face_towards(&-f, &up)
}

/// Spherical interpolation that is exact at both ends and never panics.
#[must_use]
pub fn slerp(a: &UnitQuaternion<f64>, b: &UnitQuaternion<f64>, t: f64) -> UnitQuaternion<f64> {
    if t <= 0.0 {
        *a
    } else if t >= 1.0 {
        *b
    } else {
        a.try_slerp(b, t, DEGENERATE_EPSILON).unwrap_or(*b)
    }
}

/// Rotation of `angle` radians around world +Y.
#[must_use]
pub fn yaw_rotation(angle: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    #[test]
    fn smoothing_factor_bounds() {
        assert_abs_diff_eq!(smoothing_factor(5.0, 0.0), 0.0);
        assert!(smoothing_factor(5.0, 0.016) > 0.0);
        assert!(smoothing_factor(5.0, 0.016) < 1.0);
        assert_abs_diff_eq!(smoothing_factor(5.0, 100.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn smoothing_is_frame_rate_independent() {
        // Two half-ticks must land where one full tick lands.
        let rate = 3.0;
        let one = lerp(0.0, 1.0, smoothing_factor(rate, 0.1));
        let half = lerp(0.0, 1.0, smoothing_factor(rate, 0.05));
        let two = lerp(half, 1.0, smoothing_factor(rate, 0.05));
        assert_relative_eq!(one, two, epsilon = 1e-12);
    }

    #[test]
    fn project_removes_normal_component() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let p = project_on_plane(&v, &Vector3::y());
        assert_relative_eq!(p, Vector3::new(1.0, 0.0, 3.0));
        // Non-unit normal
        let p2 = project_on_plane(&v, &(Vector3::y() * 4.0));
        assert_relative_eq!(p2, Vector3::new(1.0, 0.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn project_on_zero_normal_is_identity() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(project_on_plane(&v, &Vector3::zeros()), v);
    }

    #[test]
    fn signed_angle_sign_follows_right_hand_rule() {
        let fwd = local_forward();
        // -X is to the left of -Z; turning left is CCW around +Y.
        let left = -Vector3::x();
        assert_relative_eq!(signed_angle(&fwd, &left, &world_up()), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(
            signed_angle(&fwd, &Vector3::x(), &world_up()),
            -FRAC_PI_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn signed_angle_behind_is_plus_pi() {
        let a = signed_angle(&local_forward(), &Vector3::z(), &world_up());
        assert_relative_eq!(a, PI, epsilon = 1e-12);
    }

    #[test]
    fn signed_angle_degenerate_is_zero() {
        assert_eq!(signed_angle(&Vector3::zeros(), &Vector3::x(), &world_up()), 0.0);
        assert_eq!(signed_angle(&Vector3::x(), &Vector3::zeros(), &world_up()), 0.0);
    }

    #[test]
    fn rotate_towards_within_limit_reaches_target() {
        let target = Vector3::new(0.1, 0.0, -1.0);
        let out = rotate_towards(&local_forward(), &target, FRAC_PI_4);
        assert_relative_eq!(out, target.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn rotate_towards_clamps_angle() {
        let out = rotate_towards(&local_forward(), &Vector3::x(), FRAC_PI_4);
        assert_relative_eq!(out.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(out.angle(&local_forward()), FRAC_PI_4, epsilon = 1e-12);
        // Stays in the plane spanned by forward and target.
        assert_abs_diff_eq!(out.y, 0.0, epsilon = 1e-12);
        assert!(out.x > 0.0);
    }

    #[test]
    fn rotate_towards_opposite_turns_horizontally() {
        let out = rotate_towards(&local_forward(), &Vector3::z(), FRAC_PI_4);
        assert_relative_eq!(out.angle(&local_forward()), FRAC_PI_4, epsilon = 1e-9);
        assert_abs_diff_eq!(out.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn rotate_towards_zero_target_keeps_current() {
        let out = rotate_towards(&Vector3::x(), &Vector3::zeros(), 0.5);
        assert_relative_eq!(out, Vector3::x());
    }

    #[test]
    fn look_rotation_maps_forward() {
        let dir = Vector3::new(1.0, 0.0, 0.0);
        let q = look_rotation(&dir, &world_up());
        assert_relative_eq!(q * local_forward(), dir, epsilon = 1e-12);
        assert_relative_eq!(q * Vector3::y(), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn look_rotation_forward_is_identity() {
        let q = look_rotation(&local_forward(), &world_up());
        assert_relative_eq!(q.angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn look_rotation_straight_up_is_finite() {
        let q = look_rotation(&Vector3::y(), &world_up());
        let f = q * local_forward();
        assert!(f.iter().all(|c| c.is_finite()));
        assert_relative_eq!(f, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn slerp_is_exact_at_ends() {
        let a = yaw_rotation(0.3);
        let b = yaw_rotation(1.2);
        assert_eq!(slerp(&a, &b, 0.0), a);
        assert_eq!(slerp(&a, &b, 1.0), b);
        assert_relative_eq!(slerp(&a, &b, 0.5).angle(), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn yaw_rotation_turns_forward_left() {
        let f = yaw_rotation(FRAC_PI_2) * local_forward();
        assert_relative_eq!(f, -Vector3::x(), epsilon = 1e-12);
    }
}
