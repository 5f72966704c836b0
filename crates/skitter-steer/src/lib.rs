// skitter-steer: Root motion and head tracking for skitter creatures.
//
// A creature body turns toward and walks after a single tracked target,
// keeping inside a distance band, while its head joint follows the target
// within a cone. Both run in the late tick so they see the gait results of
// the same frame.

pub mod components;
pub mod head;
pub mod plugin;
pub mod root_motion;
pub mod spawn;
pub mod systems;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        components::{HeadTracking, RootMotion, SteeringTarget},
        head::HeadTracker,
        plugin::SkitterSteerPlugin,
        root_motion::{SteeringController, SteeringSample},
        spawn::{HEAD_OFFSET, spawn_steering, spawn_target},
    };
}

pub use plugin::SkitterSteerPlugin;
