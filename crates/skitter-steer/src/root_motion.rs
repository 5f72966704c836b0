//! Root-motion steering toward a target position.
//!
//! The body turns in place until the target is within `max_angle` of its
//! forward axis, and walks toward or away from the target to stay inside the
//! `[min_distance, max_distance]` band. Yaw rate and velocity both approach
//! their desired values through frame-rate independent exponential
//! smoothing, so starts and stops are soft.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Isometry3, Translation3, Vector3};
use skitter_core::config::SteeringConfig;
use skitter_core::math::{
    DEGENERATE_EPSILON, local_forward, project_on_plane, signed_angle, smoothing_factor,
    yaw_rotation,
};

/// What the controller saw and wanted on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringSample {
    /// Signed yaw from body forward to the target, positive to the left (rad).
    pub angle_to_target: f64,
    /// Straight-line distance from body to target (meters).
    pub distance: f64,
    pub desired_angular_velocity: f64,
    pub desired_velocity: Vector3<f64>,
}

impl Default for SteeringSample {
    fn default() -> Self {
        Self {
            angle_to_target: 0.0,
            distance: 0.0,
            desired_angular_velocity: 0.0,
            desired_velocity: Vector3::zeros(),
        }
    }
}

/// Smoothed yaw-rate and velocity controller.
#[derive(Debug, Clone, PartialEq)]
pub struct SteeringController {
    config: SteeringConfig,
    angular_velocity: f64,
    velocity: Vector3<f64>,
}

impl SteeringController {
    /// A controller at rest.
    #[must_use]
    pub fn new(config: SteeringConfig) -> Self {
        Self {
            config,
            angular_velocity: 0.0,
            velocity: Vector3::zeros(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &SteeringConfig {
        &self.config
    }

    /// Current yaw rate around world +Y (rad/s).
    #[must_use]
    pub const fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Current world-space velocity (m/s).
    #[must_use]
    pub const fn velocity(&self) -> &Vector3<f64> {
        &self.velocity
    }

    /// Full-throttle turn toward the side of the target, or zero inside the
    /// facing deadzone.
    #[must_use]
    pub fn desired_angular_velocity(&self, angle_to_target: f64) -> f64 {
        if angle_to_target.abs() <= self.config.max_angle {
            0.0
        } else {
            self.config.turn_speed.copysign(angle_to_target)
        }
    }

    /// Full-speed walk along `toward` (horizontal, any length) to get back
    /// inside the distance band. Zero when facing away from the target.
    #[must_use]
    pub fn desired_velocity(&self, angle_to_target: f64, distance: f64, toward: &Vector3<f64>) -> Vector3<f64> {
        if angle_to_target.abs() >= FRAC_PI_2 {
            return Vector3::zeros();
        }
        let Some(dir) = toward.try_normalize(DEGENERATE_EPSILON) else {
            return Vector3::zeros();
        };
        if distance > self.config.max_distance {
            dir * self.config.move_speed
        } else if distance < self.config.min_distance {
            -dir * self.config.move_speed
        } else {
            Vector3::zeros()
        }
    }

    /// Steer `body` toward `target` for one tick of `dt` seconds.
    ///
    /// The angle and toward-target direction are measured once, before the
    /// yaw of this tick is applied.
    pub fn update(&mut self, body: &mut Isometry3<f64>, target: &Vector3<f64>, dt: f64) -> SteeringSample {
        let up = body.rotation * Vector3::y();
        let forward = body.rotation * local_forward();
        let toward = target - body.translation.vector;
        let toward_flat = project_on_plane(&toward, &up);
        let angle_to_target = signed_angle(&forward, &toward_flat, &up);
        let distance = toward.norm();

        let desired_angular_velocity = self.desired_angular_velocity(angle_to_target);
        self.angular_velocity += (desired_angular_velocity - self.angular_velocity)
            * smoothing_factor(self.config.turn_acceleration, dt);
        body.rotation = yaw_rotation(self.angular_velocity * dt) * body.rotation;

        let desired_velocity = self.desired_velocity(angle_to_target, distance, &toward_flat);
        self.velocity += (desired_velocity - self.velocity) * smoothing_factor(self.config.move_acceleration, dt);
        body.translation = Translation3::from(body.translation.vector + self.velocity * dt);

        SteeringSample {
            angle_to_target,
            distance,
            desired_angular_velocity,
            desired_velocity,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
