// skitter-gait: Procedural leg placement for four-legged creatures.
//
// Each leg keeps its foot planted until it drifts too far from a home anchor
// re-projected onto the ground every tick, then swings it along a lifted
// Bezier arc to just past the anchor. Legs step in diagonal pairs, one pair
// at a time. The pure controllers take an explicit `dt`; the Bevy plugin
// feeds them from `Time` and writes foot poses onto IK target entities.

pub mod body_height;
pub mod components;
pub mod coordinator;
pub mod easing;
pub mod ground;
pub mod plugin;
pub mod rig;
pub mod stepper;
pub mod systems;
pub mod trajectory;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        body_height::BodyHeightController,
        components::{BodyLift, FootTarget, Gait, GroundQuery, LegProbe},
        coordinator::{GaitCoordinator, GaitTick},
        ground::{FlatGround, GroundHit, GroundProbe, TerrainFn, attach_to_ground},
        plugin::SkitterGaitPlugin,
        rig::{LegRig, spawn_leg_rig},
        stepper::{Leg, StepState},
        trajectory::{StepSample, StepTrajectory},
    };
}

pub use plugin::SkitterGaitPlugin;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify the prelude re-exports compile.
    #[test]
    fn prelude_exports() {
        use prelude::*;

        fn _accepts_probe(_: &dyn GroundProbe) {}

        let _ground = FlatGround::default();
        let _gait = GaitCoordinator::quadruped(
            skitter_core::config::StepConfig::default(),
            [nalgebra::Isometry3::identity(); 4],
        );
    }
}
