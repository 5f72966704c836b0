//! Constrained look-at for a head joint.

use nalgebra::{UnitQuaternion, Vector3};
use skitter_core::config::HeadTrackingConfig;
use skitter_core::math::{local_forward, look_rotation, rotate_towards, slerp, smoothing_factor, world_up};

/// Turns a head joint toward a target, never more than `max_turn_angle` away
/// from its rest forward, with exponential smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadTracker {
    config: HeadTrackingConfig,
}

impl HeadTracker {
    #[must_use]
    pub const fn new(config: HeadTrackingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &HeadTrackingConfig {
        &self.config
    }

    /// Local rotation the head would settle at for a look direction given in
    /// the head's rest frame.
    #[must_use]
    pub fn goal_rotation(&self, local_direction: &Vector3<f64>) -> UnitQuaternion<f64> {
        let clamped = rotate_towards(&local_forward(), local_direction, self.config.max_turn_angle);
        look_rotation(&clamped, &world_up())
    }

    /// New local rotation of the head after one tick.
    ///
    /// `head_position` is the joint's world position and `parent_rotation`
    /// the world rotation of its rest frame (the parent's world rotation).
    #[must_use]
    pub fn update(
        &self,
        current_local: &UnitQuaternion<f64>,
        head_position: &Vector3<f64>,
        parent_rotation: &UnitQuaternion<f64>,
        target: &Vector3<f64>,
        dt: f64,
    ) -> UnitQuaternion<f64> {
        let local_direction = parent_rotation.inverse() * (target - head_position);
        let goal = self.goal_rotation(&local_direction);
        slerp(current_local, &goal, smoothing_factor(self.config.tracking_speed, dt))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;
    use skitter_core::math::yaw_rotation;

    use super::*;

    fn tracker() -> HeadTracker {
        HeadTracker::new(HeadTrackingConfig {
            max_turn_angle: 0.5,
            tracking_speed: 5.0,
        })
    }

    fn settle(tracker: &HeadTracker, parent: &UnitQuaternion<f64>, target: &Vector3<f64>) -> UnitQuaternion<f64> {
        let mut local = UnitQuaternion::identity();
        for _ in 0..2000 {
            local = tracker.update(&local, &Vector3::zeros(), parent, target, 0.01);
        }
        local
    }

    #[test]
    fn looks_at_target_inside_cone() {
        let t = tracker();
        let target = Vector3::new(0.2, 0.0, -1.0);
        let local = settle(&t, &UnitQuaternion::identity(), &target);
        assert_relative_eq!(local * local_forward(), target.normalize(), epsilon = 1e-6);
    }

    #[test]
    fn clamps_to_cone() {
        let t = tracker();
        // Target straight to the right.
        let local = settle(&t, &UnitQuaternion::identity(), &Vector3::x());
        let facing = local * local_forward();
        assert_relative_eq!(facing.angle(&local_forward()), 0.5, epsilon = 1e-6);
        assert!(facing.x > 0.0);
    }

    #[test]
    fn direction_is_taken_in_parent_frame() {
        let t = tracker();
        // Parent turned a quarter left; a target to the world left is dead
        // ahead in the rest frame.
        let parent = yaw_rotation(FRAC_PI_2);
        let local = settle(&t, &parent, &Vector3::new(-3.0, 0.0, 0.0));
        assert_relative_eq!(local.angle(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn smoothing_moves_partway() {
        let t = tracker();
        let current = UnitQuaternion::identity();
        let next = t.update(&current, &Vector3::zeros(), &current, &Vector3::new(-1.0, 0.0, -1.0), 0.01);
        let goal = t.goal_rotation(&Vector3::new(-1.0, 0.0, -1.0));
        assert!(next.angle() > 0.0);
        assert!(next.angle() < goal.angle());
    }

    #[test]
    fn target_at_head_looks_forward() {
        let t = tracker();
        let next = t.update(&yaw_rotation(0.3), &Vector3::zeros(), &UnitQuaternion::identity(), &Vector3::zeros(), 100.0);
        assert!(next.coords.iter().all(|c| c.is_finite()));
        assert_relative_eq!(next.angle(), 0.0, epsilon = 1e-9);
    }
}
