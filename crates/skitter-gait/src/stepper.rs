//! Single-leg stepping state machine.
//!
//! A [`Leg`] keeps its foot planted until the foot drifts farther than
//! `trigger_distance` from the home anchor, then runs one
//! [`StepTrajectory`] to completion, landing slightly past the anchor.
//!
//! ```text
//!            distance > trigger && Idle
//!   Idle ─────────────────────────────────► Stepping
//!    ▲                                        │
//!    └──────── elapsed >= move_duration ──────┘
//!              (foot snapped to end pose)
//! ```
//!
//! The foot pose only changes while stepping. Trigger checks are ignored
//! while a step is in flight, so a leg never runs two trajectories at once.

use bevy::log::debug;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use skitter_core::config::StepConfig;
use skitter_core::math::{DEGENERATE_EPSILON, project_on_plane, world_up};
use skitter_core::types::LegId;

use crate::trajectory::StepTrajectory;

/// Whether a leg is planted or mid-step.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StepState {
    #[default]
    Idle,
    Stepping(StepTrajectory),
}

/// One leg: its home anchor, its commanded foot pose and its step state.
#[derive(Debug, Clone)]
pub struct Leg {
    id: LegId,
    config: StepConfig,
    home: Isometry3<f64>,
    foot: Isometry3<f64>,
    state: StepState,
    steps_taken: u64,
}

impl Leg {
    /// Create an idle leg with its foot planted at `foot` and its home
    /// anchor at the same pose.
    #[must_use]
    pub fn new(id: LegId, config: StepConfig, foot: Isometry3<f64>) -> Self {
        Self {
            id,
            config,
            home: foot,
            foot,
            state: StepState::Idle,
            steps_taken: 0,
        }
    }

    /// Builder: start with a home anchor different from the foot.
    #[must_use]
    pub fn with_home(mut self, home: Isometry3<f64>) -> Self {
        self.home = home;
        self
    }

    #[must_use]
    pub const fn id(&self) -> LegId {
        self.id
    }

    #[must_use]
    pub const fn config(&self) -> &StepConfig {
        &self.config
    }

    /// Home anchor pose.
    #[must_use]
    pub const fn home(&self) -> &Isometry3<f64> {
        &self.home
    }

    /// Commanded foot pose (the IK target).
    #[must_use]
    pub const fn foot(&self) -> &Isometry3<f64> {
        &self.foot
    }

    #[must_use]
    pub const fn state(&self) -> &StepState {
        &self.state
    }

    /// `true` while a step is in flight.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        matches!(self.state, StepState::Stepping(_))
    }

    /// Number of steps that have landed.
    #[must_use]
    pub const fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn set_home(&mut self, home: Isometry3<f64>) {
        self.home = home;
    }

    pub fn set_home_position(&mut self, position: Vector3<f64>) {
        self.home.translation = Translation3::from(position);
    }

    pub fn set_home_rotation(&mut self, rotation: UnitQuaternion<f64>) {
        self.home.rotation = rotation;
    }

    /// Put the foot straight onto its home anchor, cancelling any step in
    /// flight. Used when a rig is first placed on the ground.
    pub fn plant_at_home(&mut self) {
        self.foot = self.home;
        self.state = StepState::Idle;
    }

    #[must_use]
    pub fn distance_from_home(&self) -> f64 {
        (self.home.translation.vector - self.foot.translation.vector).norm()
    }

    /// `true` if [`try_step`](Self::try_step) would start a step now.
    #[must_use]
    pub fn wants_step(&self) -> bool {
        !self.is_moving() && self.distance_from_home() > self.config.trigger_distance
    }

    /// Extra travel past the home anchor for a step starting now.
    ///
    /// Points along the horizontal part of foot→home. The vertical part is
    /// dropped because nothing grounds the landing point; a foot directly
    /// above or below its anchor gets no overshoot.
    ///
    /// The length is always `overshoot_fraction * trigger_distance`. It does
    /// not grow with the distance to home, so a foot dragged far behind
    /// lands the same distance past its anchor as one that just tripped the
    /// trigger.
    #[must_use]
    pub fn overshoot_vector(&self) -> Vector3<f64> {
        let toward_home = self.home.translation.vector - self.foot.translation.vector;
        project_on_plane(&toward_home, &world_up())
            .try_normalize(DEGENERATE_EPSILON)
            .map_or_else(Vector3::zeros, |dir| dir * self.config.overshoot_distance())
    }

    /// Trigger check. Starts a step if the leg is idle and too far from home.
    ///
    /// A started step takes its first sample with this same `dt`. Returns
    /// `true` if a step started.
    pub fn try_step(&mut self, dt: f64) -> bool {
        if !self.wants_step() {
            return false;
        }

        let landing = Isometry3::from_parts(
            Translation3::from(self.home.translation.vector + self.overshoot_vector()),
            self.home.rotation,
        );
        let lift_axis = self.home.rotation * world_up();
        let mut trajectory =
            StepTrajectory::new(self.foot, landing, &lift_axis, self.config.move_duration);

        debug!(
            "leg {} stepping: {:.3} m from home, landing at [{:.3}, {:.3}, {:.3}]",
            self.id,
            self.distance_from_home(),
            landing.translation.x,
            landing.translation.y,
            landing.translation.z,
        );

        let first = trajectory.advance(dt);
        self.foot = first.pose;
        if first.finished {
            self.land(landing);
        } else {
            self.state = StepState::Stepping(trajectory);
        }
        true
    }

    /// Move an in-flight step forward by `dt`. Returns `true` on the tick the
    /// foot lands. Does nothing while idle.
    pub fn advance(&mut self, dt: f64) -> bool {
        let StepState::Stepping(trajectory) = &mut self.state else {
            return false;
        };
        let sample = trajectory.advance(dt);
        let end = *trajectory.end();
        self.foot = sample.pose;
        if sample.finished {
            self.land(end);
            return true;
        }
        false
    }

    fn land(&mut self, end: Isometry3<f64>) {
        self.foot = end;
        self.state = StepState::Idle;
        self.steps_taken += 1;
        debug!("leg {} landed after {} steps", self.id, self.steps_taken);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use skitter_core::math::yaw_rotation;

    use super::*;

    fn at(x: f64, y: f64, z: f64) -> Isometry3<f64> {
        Isometry3::translation(x, y, z)
    }

    fn config(trigger: f64, overshoot: f64, duration: f64) -> StepConfig {
        StepConfig {
            trigger_distance: trigger,
            move_duration: duration,
            overshoot_fraction: overshoot,
        }
    }

    fn run_to_landing(leg: &mut Leg, dt: f64) -> (usize, f64) {
        let mut ticks = 0;
        let mut time = 0.0;
        while leg.is_moving() {
            leg.advance(dt);
            ticks += 1;
            time += dt;
            assert!(ticks < 10_000, "step never landed");
        }
        (ticks, time)
    }

    #[test]
    fn idle_within_trigger_distance() {
        let mut leg = Leg::new(LegId::FrontLeft, config(0.5, 0.1, 0.2), at(0.4, 0.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));
        assert!(!leg.wants_step());
        assert!(!leg.try_step(0.016));
        assert!(!leg.is_moving());
        assert_eq!(*leg.foot(), at(0.4, 0.0, 0.0));
    }

    #[test]
    fn exact_trigger_distance_does_not_step() {
        let mut leg = Leg::new(LegId::FrontLeft, config(0.5, 0.1, 0.2), at(0.5, 0.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));
        assert!(!leg.try_step(0.016));
    }

    #[test]
    fn steps_home_with_overshoot() {
        // Home (0,0,0), foot (1,0,0), trigger 0.5, overshoot 0.1.
        let duration = 0.25;
        let mut leg = Leg::new(LegId::FrontLeft, config(0.5, 0.1, duration), at(1.0, 0.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));

        let dt = 1.0 / 60.0;
        assert!(leg.try_step(dt));
        assert!(leg.is_moving());
        let (_, time) = run_to_landing(&mut leg, dt);

        // Landed 0.05 past home, continuing the foot→home direction (-X).
        assert_relative_eq!(leg.foot().translation.vector, Vector3::new(-0.05, 0.0, 0.0), epsilon = 1e-12);
        assert!(!leg.is_moving());
        assert!(time + dt >= duration);
        assert_eq!(leg.steps_taken(), 1);
    }

    #[test]
    fn landing_pose_is_exactly_trajectory_end() {
        let mut leg = Leg::new(LegId::BackLeft, config(0.3, 0.7, 0.2), at(0.31, 0.02, -0.44))
            .with_home(Isometry3::from_parts(Translation3::new(-0.1, 0.0, 0.05), yaw_rotation(0.4)));
        assert!(leg.try_step(0.013));
        let end = match leg.state() {
            StepState::Stepping(traj) => *traj.end(),
            StepState::Idle => panic!("step should be in flight"),
        };
        run_to_landing(&mut leg, 0.013);
        assert_eq!(*leg.foot(), end);
        assert_eq!(leg.foot().rotation, yaw_rotation(0.4));
    }

    #[test]
    fn retrigger_while_moving_is_ignored() {
        let mut leg = Leg::new(LegId::FrontRight, config(0.5, 0.1, 0.5), at(2.0, 0.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));
        assert!(leg.try_step(0.01));
        let in_flight = leg.state().clone();

        // Move the anchor far away; a second trigger must not replace the step.
        leg.set_home_position(Vector3::new(0.0, 0.0, 5.0));
        assert!(!leg.try_step(0.01));
        assert_eq!(*leg.state(), in_flight);
    }

    #[test]
    fn overshoot_direction_fixed_at_step_start() {
        let mut leg = Leg::new(LegId::FrontLeft, config(0.5, 0.1, 0.2), at(1.0, 0.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));
        assert!(leg.try_step(0.01));
        // Anchor drifts mid-step; landing point does not change.
        leg.set_home_position(Vector3::new(0.0, 0.0, 3.0));
        run_to_landing(&mut leg, 0.01);
        assert_relative_eq!(leg.foot().translation.vector, Vector3::new(-0.05, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn overshoot_ignores_vertical_offset() {
        let leg = Leg::new(LegId::FrontLeft, config(0.5, 1.0, 0.2), at(1.0, 2.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));
        let v = leg.overshoot_vector();
        assert_relative_eq!(v, Vector3::new(-0.5, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn overshoot_length_ignores_step_length() {
        let near = Leg::new(LegId::FrontLeft, config(0.5, 0.2, 0.2), at(0.6, 0.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));
        let far = Leg::new(LegId::FrontLeft, config(0.5, 0.2, 0.2), at(4.0, 0.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));
        assert_relative_eq!(near.overshoot_vector(), Vector3::new(-0.1, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(far.overshoot_vector(), near.overshoot_vector(), epsilon = 1e-12);
    }

    #[test]
    fn plant_snaps_idle_foot_onto_home() {
        let mut leg = Leg::new(LegId::BackLeft, config(0.5, 0.1, 0.2), at(0.0, 1.0, 0.0))
            .with_home(at(0.1, -0.3, 0.0));
        leg.plant_at_home();
        assert_eq!(*leg.foot(), at(0.1, -0.3, 0.0));
        assert!(!leg.is_moving());
        assert_eq!(leg.steps_taken(), 0);
    }

    #[test]
    fn vertical_only_offset_has_no_overshoot() {
        let mut leg = Leg::new(LegId::FrontLeft, config(0.5, 1.0, 0.2), at(0.0, 1.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));
        assert_eq!(leg.overshoot_vector(), Vector3::zeros());
        assert!(leg.try_step(0.01));
        run_to_landing(&mut leg, 0.01);
        let p = leg.foot().translation.vector;
        assert!(p.iter().all(|c| c.is_finite()));
        assert_eq!(p, Vector3::zeros());
    }

    #[test]
    fn foot_only_changes_while_moving() {
        let mut leg = Leg::new(LegId::BackRight, config(0.5, 0.1, 0.1), at(0.2, 0.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));
        let planted = *leg.foot();
        for _ in 0..10 {
            assert!(!leg.advance(0.02));
        }
        assert_eq!(*leg.foot(), planted);
    }

    #[test]
    fn step_lifts_foot_off_ground() {
        let mut leg = Leg::new(LegId::FrontLeft, config(0.5, 0.0, 0.2), at(1.0, 0.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));
        assert!(leg.try_step(0.01));
        let mut max_y: f64 = 0.0;
        while leg.is_moving() {
            leg.advance(0.01);
            max_y = max_y.max(leg.foot().translation.y);
        }
        assert!(max_y > 0.2, "foot should clear the ground, peak {max_y}");
    }

    #[test]
    fn single_tick_longer_than_duration_lands_immediately() {
        let mut leg = Leg::new(LegId::FrontLeft, config(0.5, 0.1, 0.05), at(1.0, 0.0, 0.0))
            .with_home(at(0.0, 0.0, 0.0));
        assert!(leg.try_step(0.1));
        assert!(!leg.is_moving());
        assert_relative_eq!(leg.foot().translation.vector, Vector3::new(-0.05, 0.0, 0.0), epsilon = 1e-12);
        assert_eq!(leg.steps_taken(), 1);
    }
}
