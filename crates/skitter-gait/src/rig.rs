//! Spawning a four-legged body with its probe and foot target entities.

use bevy::prelude::*;
use nalgebra::Point3;
use skitter_core::config::CreatureConfig;
use skitter_core::convert::{isometry_from_transform, vec3_from_vector, write_isometry};
use skitter_core::error::SkitterError;
use skitter_core::types::LegId;

use crate::body_height::BodyHeightController;
use crate::components::{BodyLift, FootTarget, Gait, GroundQuery, LegProbe};

/// Entities making up one legged body. Arrays are indexed by
/// [`LegId::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegRig {
    pub body: Entity,
    pub probes: [Entity; 4],
    pub feet: [Entity; 4],
}

impl LegRig {
    #[must_use]
    pub const fn probe(&self, leg: LegId) -> Entity {
        self.probes[leg.index()]
    }

    #[must_use]
    pub const fn foot(&self, leg: LegId) -> Entity {
        self.feet[leg.index()]
    }
}

/// Spawn a body at `pose` with feet planted under its layout corners.
///
/// The config is validated first. When the world already holds a
/// [`GroundQuery`], every home anchor is cast onto the ground below its
/// probe and the feet are planted there, so a rig spawned over terrain
/// starts grounded instead of stepping down on its first ticks.
///
/// Probe entities are children of the body at the layout probe offsets.
/// Their `GlobalTransform` is filled in up front so the first tick senses
/// the right place. Foot targets are top-level. A [`BodyLift`] is added only
/// when the ride-height controller is enabled.
pub fn spawn_leg_rig(
    world: &mut World,
    config: &CreatureConfig,
    pose: Transform,
) -> Result<LegRig, SkitterError> {
    config.validate()?;
    let body_pose = isometry_from_transform(&pose);
    let mut gait = Gait::from_config(config, &body_pose)?;

    if let Some(ground) = world.get_resource::<GroundQuery>() {
        let origins = LegId::ALL.map(|id| {
            (body_pose * Point3::from(config.layout.probe_offset(id))).coords
        });
        let hits = gait
            .coordinator
            .attach_all(ground.probe.as_ref(), &origins, ground.max_distance);
        debug!("rig spawned on {}: {hits}/4 legs found ground", ground.probe.name());
        for id in LegId::ALL {
            gait.coordinator.leg_mut(id).plant_at_home();
        }
    }
    let feet_poses = LegId::ALL.map(|id| *gait.coordinator.leg(id).foot());

    let mut body = world.spawn((gait, pose, GlobalTransform::from(pose)));
    if config.body.enabled {
        body.insert(BodyLift(BodyHeightController::new(config.body)));
    }
    let body = body.id();

    let probes = LegId::ALL.map(|leg| {
        let local = Transform::from_translation(vec3_from_vector(&config.layout.probe_offset(leg)));
        world
            .spawn((
                LegProbe { creature: body, leg },
                local,
                GlobalTransform::from(pose * local),
                ChildOf(body),
            ))
            .id()
    });

    let feet = LegId::ALL.map(|leg| {
        let mut transform = Transform::default();
        write_isometry(&mut transform, &feet_poses[leg.index()]);
        world
            .spawn((FootTarget { creature: body, leg }, transform, GlobalTransform::from(transform)))
            .id()
    });

    Ok(LegRig { body, probes, feet })
}
