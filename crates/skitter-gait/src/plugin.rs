//! Bevy plugin wiring the gait systems into [`SkitterSet`].

use std::sync::Arc;

use bevy::prelude::*;
use skitter_core::SkitterSet;

use crate::components::GroundQuery;
use crate::ground::GroundProbe;
use crate::systems::{lift_bodies, sense_ground, step_gaits, write_foot_targets};

/// Bevy plugin that senses the ground, steps legs and lifts bodies.
///
/// # Usage
///
/// ```ignore
/// app.add_plugins(SkitterCorePlugin)
///     .add_plugins(SkitterGaitPlugin::new(FlatGround::new(0.0)));
/// ```
///
/// Systems run in [`SkitterSet::Sense`], [`SkitterSet::Step`] and
/// [`SkitterSet::Lift`]. Requires [`SkitterCorePlugin`](skitter_core::SkitterCorePlugin)
/// for set ordering.
pub struct SkitterGaitPlugin {
    probe: Arc<dyn GroundProbe>,
    max_distance: f64,
}

impl SkitterGaitPlugin {
    /// Create the plugin with the world's ground probe and unbounded probe
    /// distance.
    pub fn new(probe: impl GroundProbe) -> Self {
        Self {
            probe: Arc::new(probe),
            max_distance: f64::INFINITY,
        }
    }

    /// Builder: limit how far below its origin a probe may hit.
    #[must_use]
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// The name of the ground probe.
    pub fn probe_name(&self) -> &str {
        self.probe.name()
    }
}

impl Plugin for SkitterGaitPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GroundQuery {
            probe: Arc::clone(&self.probe),
            max_distance: self.max_distance,
        })
        .add_systems(
            Update,
            (
                sense_ground.in_set(SkitterSet::Sense),
                (step_gaits, write_foot_targets)
                    .chain()
                    .in_set(SkitterSet::Step),
                lift_bodies.in_set(SkitterSet::Lift),
            ),
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
