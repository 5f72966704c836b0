//! ECS components and resources for legged creatures.

use std::sync::Arc;

use bevy::prelude::*;
use nalgebra::{Isometry3, Point3, Translation3};
use skitter_core::config::CreatureConfig;
use skitter_core::error::RigError;
use skitter_core::types::LegId;

use crate::body_height::BodyHeightController;
use crate::coordinator::{GaitCoordinator, GaitTick};
use crate::ground::GroundProbe;
use crate::stepper::Leg;

/// Gait state of one creature. Lives on the creature's body entity.
#[derive(Component, Debug, Clone)]
pub struct Gait {
    pub coordinator: GaitCoordinator,
    /// Report of the most recent tick.
    pub last_tick: GaitTick,
}

impl Gait {
    #[must_use]
    pub fn new(coordinator: GaitCoordinator) -> Self {
        Self {
            coordinator,
            last_tick: GaitTick::default(),
        }
    }

    /// Four legs planted under the layout corners of a body at `body`.
    pub fn from_config(config: &CreatureConfig, body: &Isometry3<f64>) -> Result<Self, RigError> {
        let legs = LegId::ALL.map(|id| {
            let corner = body * Point3::from(config.layout.foot_offset(id));
            let foot = Isometry3::from_parts(Translation3::from(corner.coords), body.rotation);
            Leg::new(id, config.step, foot)
        });
        GaitCoordinator::from_legs(legs).map(Self::new)
    }
}

/// Marks the entity whose world position is a leg's ground probe origin.
///
/// The entity's world rotation becomes the home anchor's rotation, so it is
/// usually a child of the body.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegProbe {
    /// Body entity carrying the [`Gait`].
    pub creature: Entity,
    pub leg: LegId,
}

/// Marks the IK target entity of a leg. Its `Transform` is overwritten with
/// the commanded foot pose every tick, so it must not have a parent.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootTarget {
    /// Body entity carrying the [`Gait`].
    pub creature: Entity,
    pub leg: LegId,
}

/// Ride-height controller on a body entity.
#[derive(Component, Debug, Clone)]
pub struct BodyLift(pub BodyHeightController);

/// World ground query shared by every creature.
#[derive(Resource, Clone)]
pub struct GroundQuery {
    pub probe: Arc<dyn GroundProbe>,
    /// Longest downward cast (meters).
    pub max_distance: f64,
}

impl std::fmt::Debug for GroundQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroundQuery")
            .field("probe", &self.probe.name())
            .field("max_distance", &self.max_distance)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use skitter_core::math::yaw_rotation;

    use super::*;

    #[test]
    fn from_config_plants_feet_under_layout() {
        let config = CreatureConfig::default();
        let body = Isometry3::translation(1.0, 0.0, 2.0);
        let gait = Gait::from_config(&config, &body).unwrap();
        let fl = gait.coordinator.leg(LegId::FrontLeft).foot().translation.vector;
        assert_relative_eq!(fl, Vector3::new(0.4, 0.0, 1.3), epsilon = 1e-12);
        assert!(gait.last_tick.started.is_empty());
    }

    #[test]
    fn from_config_follows_body_yaw() {
        let config = CreatureConfig::default();
        let body = Isometry3::from_parts(Translation3::identity(), yaw_rotation(std::f64::consts::PI));
        let gait = Gait::from_config(&config, &body).unwrap();
        // Half a turn puts the front-left corner at the back right.
        let fl = gait.coordinator.leg(LegId::FrontLeft).foot().translation.vector;
        assert_relative_eq!(fl, Vector3::new(0.6, 0.0, 0.7), epsilon = 1e-12);
        assert_eq!(gait.coordinator.leg(LegId::FrontLeft).home().rotation, body.rotation);
    }
}
