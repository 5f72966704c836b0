//! Entity spawn helpers for tests.

use bevy::prelude::*;
use skitter_core::config::CreatureConfig;
use skitter_gait::rig::{LegRig, spawn_leg_rig};
use skitter_steer::spawn::spawn_steering;

pub use skitter_steer::spawn::spawn_target;

/// Every entity of a spawned spider.
#[derive(Debug, Clone, Copy)]
pub struct SpiderRig {
    pub legs: LegRig,
    pub head: Entity,
}

impl SpiderRig {
    #[must_use]
    pub const fn body(&self) -> Entity {
        self.legs.body
    }
}

/// Spawn a full spider at `pose`: legged body with root motion, and a head
/// joint parented to the body. Panics on an invalid config.
pub fn spawn_spider(world: &mut World, config: &CreatureConfig, pose: Transform) -> SpiderRig {
    let legs = spawn_leg_rig(world, config, pose).unwrap();
    let head = spawn_steering(world, config, legs.body, pose);
    SpiderRig { legs, head }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use skitter_gait::components::Gait;
    use skitter_gait::ground::FlatGround;
    use skitter_steer::components::{HeadTracking, RootMotion};

    use super::*;
    use crate::app::spider_test_app;

    #[test]
    fn spider_has_every_part() {
        let mut app = spider_test_app(FlatGround::new(0.0));
        let rig = spawn_spider(app.world_mut(), &CreatureConfig::default(), Transform::default());

        let world = app.world();
        assert!(world.get::<Gait>(rig.body()).is_some());
        assert!(world.get::<RootMotion>(rig.body()).is_some());
        assert!(world.get::<HeadTracking>(rig.head).is_some());
        assert_eq!(world.get::<ChildOf>(rig.head).map(ChildOf::parent), Some(rig.body()));
    }

    #[test]
    fn spider_app_runs_with_target() {
        let mut app = spider_test_app(FlatGround::new(0.0));
        spawn_spider(app.world_mut(), &CreatureConfig::default(), Transform::default());
        spawn_target(app.world_mut(), Vec3::new(0.0, 0.0, -10.0));
        crate::app::run_ticks(&mut app, 1.0 / 60.0, 10);
    }
}
