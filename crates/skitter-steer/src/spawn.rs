//! Spawning head joints and steering targets.

use bevy::prelude::*;
use skitter_core::config::CreatureConfig;

use crate::components::{HeadTracking, RootMotion, SteeringTarget};

/// Head joint offset from the body origin.
pub const HEAD_OFFSET: Vec3 = Vec3::new(0.0, 0.2, -0.8);

/// Give `body` (at `pose`) root motion and a tracked head joint at
/// [`HEAD_OFFSET`]. Returns the head entity.
pub fn spawn_steering(
    world: &mut World,
    config: &CreatureConfig,
    body: Entity,
    pose: Transform,
) -> Entity {
    world.entity_mut(body).insert(RootMotion::from_config(config));

    let local = Transform::from_translation(HEAD_OFFSET);
    world
        .spawn((
            HeadTracking::from_config(config),
            local,
            GlobalTransform::from(pose * local),
            ChildOf(body),
        ))
        .id()
}

/// Spawn the steering target at `at`.
pub fn spawn_target(world: &mut World, at: Vec3) -> Entity {
    let transform = Transform::from_translation(at);
    world
        .spawn((SteeringTarget, transform, GlobalTransform::from(transform)))
        .id()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_hangs_off_body() {
        let mut world = World::new();
        let pose = Transform::from_xyz(1.0, 0.5, 0.0);
        let body = world.spawn((pose, GlobalTransform::from(pose))).id();
        let head = spawn_steering(&mut world, &CreatureConfig::default(), body, pose);

        assert!(world.get::<RootMotion>(body).is_some());
        assert!(world.get::<HeadTracking>(head).is_some());
        assert_eq!(world.get::<ChildOf>(head).map(ChildOf::parent), Some(body));
        let at = world.get::<GlobalTransform>(head).unwrap().translation();
        assert!((at - (pose.translation + HEAD_OFFSET)).length() < 1e-6);
    }

    #[test]
    fn target_is_marked_and_placed() {
        let mut world = World::new();
        let target = spawn_target(&mut world, Vec3::new(0.0, 0.0, -4.0));
        assert!(world.get::<SteeringTarget>(target).is_some());
        assert_eq!(
            world.get::<GlobalTransform>(target).unwrap().translation(),
            Vec3::new(0.0, 0.0, -4.0)
        );
    }
}
