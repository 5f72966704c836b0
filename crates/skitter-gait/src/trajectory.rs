//! Lifted foot trajectory for a single step.
//!
//! A step moves the foot from its current pose to a landing pose along a
//! quadratic Bezier curve. The control point sits above the midpoint of the
//! two ends, raised along the home anchor's up axis by half the step length,
//! which lifts the foot clear of the ground. Rotation is slerped between the
//! two end rotations and ignores the lift. Both are driven by the same eased
//! normalized time.

use nalgebra::{Isometry3, Translation3, Vector3};
use skitter_core::math::slerp;

use crate::easing::ease_in_out_cubic;

/// Quadratic Bezier in Bernstein form.
///
/// The weights at `t = 0` and `t = 1` are exactly `(1, 0, 0)` and
/// `(0, 0, 1)`, so the curve returns its end points bit-for-bit.
fn quadratic_bezier(p0: &Vector3<f64>, p1: &Vector3<f64>, p2: &Vector3<f64>, t: f64) -> Vector3<f64> {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// Result of advancing a trajectory by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSample {
    /// Pose the foot should take this tick.
    pub pose: Isometry3<f64>,
    /// `true` once elapsed time has reached the duration. The pose is then
    /// exactly the end pose.
    pub finished: bool,
}

/// One in-flight step, from lift-off to landing.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTrajectory {
    start: Isometry3<f64>,
    end: Isometry3<f64>,
    control: Vector3<f64>,
    elapsed: f64,
    duration: f64,
}

impl StepTrajectory {
    /// Plan a step from `start` to `end`.
    ///
    /// `lift_axis` should be unit length; the control point is raised along it
    /// by half the straight-line step length.
    #[must_use]
    pub fn new(
        start: Isometry3<f64>,
        end: Isometry3<f64>,
        lift_axis: &Vector3<f64>,
        duration: f64,
    ) -> Self {
        let a = start.translation.vector;
        let b = end.translation.vector;
        let control = (a + b) * 0.5 + lift_axis * ((b - a).norm() * 0.5);
        Self {
            start,
            end,
            control,
            elapsed: 0.0,
            duration,
        }
    }

    /// Pose at normalized time `t` (clamped to `[0, 1]`, then eased).
    #[must_use]
    pub fn sample(&self, t: f64) -> Isometry3<f64> {
        let s = ease_in_out_cubic(t);
        let position = quadratic_bezier(
            &self.start.translation.vector,
            &self.control,
            &self.end.translation.vector,
            s,
        );
        let rotation = slerp(&self.start.rotation, &self.end.rotation, s);
        Isometry3::from_parts(Translation3::from(position), rotation)
    }

    /// Advance by `dt` seconds and sample.
    ///
    /// Time is added before sampling, so the first call already moves the
    /// foot and the call that crosses the duration lands exactly on `end`.
    pub fn advance(&mut self, dt: f64) -> StepSample {
        self.elapsed += dt.max(0.0);
        let finished = self.elapsed >= self.duration;
        let pose = if finished {
            self.end
        } else {
            self.sample(self.elapsed / self.duration)
        };
        StepSample { pose, finished }
    }

    /// Normalized progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[must_use]
    pub const fn start(&self) -> &Isometry3<f64> {
        &self.start
    }

    #[must_use]
    pub const fn end(&self) -> &Isometry3<f64> {
        &self.end
    }

    /// The lifted Bezier control point.
    #[must_use]
    pub const fn control_point(&self) -> &Vector3<f64> {
        &self.control
    }

    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
