//! ECS components for steering and head tracking.

use bevy::prelude::*;
use skitter_core::config::CreatureConfig;

use crate::head::HeadTracker;
use crate::root_motion::{SteeringController, SteeringSample};

/// Marks the entity every creature steers toward and looks at.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteeringTarget;

/// Root-motion controller on a body entity. The body's `Transform` is
/// driven directly, so the body should not have a parent.
#[derive(Component, Debug, Clone)]
pub struct RootMotion {
    pub controller: SteeringController,
    /// What the controller saw on its most recent tick.
    pub last_sample: SteeringSample,
}

impl RootMotion {
    #[must_use]
    pub fn new(controller: SteeringController) -> Self {
        Self {
            controller,
            last_sample: SteeringSample::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &CreatureConfig) -> Self {
        Self::new(SteeringController::new(config.steering))
    }
}

/// Look-at controller on a head joint entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HeadTracking(pub HeadTracker);

impl HeadTracking {
    #[must_use]
    pub const fn from_config(config: &CreatureConfig) -> Self {
        Self(HeadTracker::new(config.head))
    }
}
