//! Shared scene setup for skitter demos.

use std::time::Duration;

use bevy::app::{Plugins, TaskPoolPlugin};
use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use skitter_core::SkitterCorePlugin;
use skitter_core::config::CreatureConfig;
use skitter_core::convert::rotation_from_quat;
use skitter_core::error::SkitterError;
use skitter_core::math::{local_forward, signed_angle};
use skitter_core::types::{DiagonalPair, LegId};
use skitter_gait::SkitterGaitPlugin;
use skitter_gait::components::Gait;
use skitter_gait::ground::GroundProbe;
use skitter_gait::rig::{LegRig, spawn_leg_rig};
use skitter_steer::SkitterSteerPlugin;
use skitter_steer::spawn::{spawn_steering, spawn_target};

/// A headless app holding one spider and its target.
pub struct SpiderScene {
    pub app: App,
    pub legs: LegRig,
    pub head: Entity,
    pub target: Entity,
}

/// One line of the demo's progress report.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiderSnapshot {
    pub elapsed: f64,
    pub position: Vec3,
    /// Heading around +Y, positive to the left of -Z (rad).
    pub yaw: f64,
    pub active: DiagonalPair,
    pub moving: Vec<LegId>,
}

impl SpiderScene {
    /// Build an app with every skitter plugin over `ground`, then spawn a
    /// spider at the origin and a target at `target`.
    ///
    /// `extra` is added before the skitter plugins, e.g. a `LogPlugin`.
    pub fn new<M>(
        config: &CreatureConfig,
        ground: impl GroundProbe,
        target: Vec3,
        extra: impl Plugins<M>,
    ) -> Result<Self, SkitterError> {
        let mut app = App::new();
        app.add_plugins(TaskPoolPlugin::default())
            .add_plugins(extra)
            .add_plugins(SkitterCorePlugin)
            .add_plugins(TransformPlugin)
            .add_plugins(
                SkitterGaitPlugin::new(ground).with_max_distance(config.ground.max_probe_distance),
            )
            .add_plugins(SkitterSteerPlugin)
            .insert_resource(config.clone());
        app.finish();
        app.cleanup();

        let world = app.world_mut();
        let pose = Transform::default();
        let legs = spawn_leg_rig(world, config, pose)?;
        let head = spawn_steering(world, config, legs.body, pose);
        let target = spawn_target(world, target);

        Ok(Self {
            app,
            legs,
            head,
            target,
        })
    }

    /// Advance the clock by `dt` seconds and run one frame.
    pub fn tick(&mut self, dt: f64) {
        self.app
            .world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f64(dt));
        self.app.update();
    }

    #[must_use]
    pub fn gait(&self) -> Option<&Gait> {
        self.app.world().get::<Gait>(self.legs.body)
    }

    /// Where the spider is and what its legs are doing.
    #[must_use]
    pub fn snapshot(&self) -> Option<SpiderSnapshot> {
        let world = self.app.world();
        let body = world.get::<Transform>(self.legs.body)?;
        let gait = self.gait()?;
        let forward = rotation_from_quat(body.rotation) * local_forward();
        Some(SpiderSnapshot {
            elapsed: world.resource::<Time>().elapsed_secs_f64(),
            position: body.translation,
            yaw: signed_angle(&local_forward(), &forward, &nalgebra::Vector3::y()),
            active: gait.coordinator.active_pair(),
            moving: gait.coordinator.moving_legs().collect(),
        })
    }

    /// Steps landed so far, indexed by [`LegId::index`].
    #[must_use]
    pub fn steps_per_leg(&self) -> [u64; 4] {
        self.gait().map_or([0; 4], |gait| {
            LegId::ALL.map(|id| gait.coordinator.leg(id).steps_taken())
        })
    }
}
