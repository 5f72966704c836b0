//! Bevy plugin wiring steering and head tracking into the late tick.

use bevy::prelude::*;
use skitter_core::SkitterSet;

use crate::systems::{steer_bodies, track_heads};

/// Bevy plugin that turns heads and steers bodies toward the
/// [`SteeringTarget`](crate::components::SteeringTarget).
///
/// Systems run in `PostUpdate`, in [`SkitterSet::Look`] then
/// [`SkitterSet::Steer`], ahead of transform propagation.
pub struct SkitterSteerPlugin;

impl Plugin for SkitterSteerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (
                track_heads.in_set(SkitterSet::Look),
                steer_bodies.in_set(SkitterSet::Steer),
            ),
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
