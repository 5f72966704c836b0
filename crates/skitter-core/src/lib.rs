// skitter-core: Types, math, config, errors and system ordering for skitter
// procedural locomotion.

pub mod config;
pub mod convert;
pub mod error;
pub mod math;
pub mod types;

use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub use config::CreatureConfig;
pub use error::{ConfigError, RigError, SkitterError};
pub use types::{DiagonalPair, LegId};

// ---------------------------------------------------------------------------
// SkitterSet
// ---------------------------------------------------------------------------

/// Per-frame ordering of the locomotion systems.
///
/// `Sense -> Step -> Lift` run in `Update`; `Look -> Steer` run in
/// `PostUpdate` (the late tick) ahead of transform propagation.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkitterSet {
    /// Ground probes refresh every leg's home anchor.
    Sense,
    /// Gait coordinator advances steps and writes foot targets.
    Step,
    /// Body ride-height correction.
    Lift,
    /// Head tracking.
    Look,
    /// Root-motion steering.
    Steer,
}

// ---------------------------------------------------------------------------
// SkitterCorePlugin
// ---------------------------------------------------------------------------

/// Configures [`SkitterSet`] ordering and makes sure a [`Time`] resource exists.
pub struct SkitterCorePlugin;

impl Plugin for SkitterCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Time>()
            .configure_sets(
                Update,
                (SkitterSet::Sense, SkitterSet::Step, SkitterSet::Lift).chain(),
            )
            .configure_sets(
                PostUpdate,
                (SkitterSet::Look, SkitterSet::Steer)
                    .chain()
                    .before(TransformSystem::TransformPropagate),
            );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
