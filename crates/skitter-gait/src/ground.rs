//! Ground sensing for leg home anchors.
//!
//! Each tick a leg's home anchor is re-projected onto the ground below its
//! probe origin. The world query is abstract: anything that can answer a
//! straight-down ray cast implements [`GroundProbe`].

use bevy::log::trace;
use nalgebra::Vector3;

use crate::stepper::Leg;

/// Result of a downward probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// World-space contact point.
    pub point: Vector3<f64>,
    /// Distance from the probe origin to `point`.
    pub distance: f64,
}

/// Straight-down ray cast against the world.
///
/// Implementations must be `Send + Sync` so a single probe can be shared by
/// every creature through a Bevy resource.
pub trait GroundProbe: Send + Sync + 'static {
    /// Cast from `origin` along world -Y. Returns the nearest hit within
    /// `max_distance`, or `None`.
    fn cast_down(&self, origin: &Vector3<f64>, max_distance: f64) -> Option<GroundHit>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// FlatGround
// ---------------------------------------------------------------------------

/// Infinite horizontal plane at a fixed height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround {
    height: f64,
}

impl FlatGround {
    #[must_use]
    pub const fn new(height: f64) -> Self {
        Self { height }
    }

    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
}

impl Default for FlatGround {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl GroundProbe for FlatGround {
    fn cast_down(&self, origin: &Vector3<f64>, max_distance: f64) -> Option<GroundHit> {
        let distance = origin.y - self.height;
        (distance >= 0.0 && distance <= max_distance).then(|| GroundHit {
            point: Vector3::new(origin.x, self.height, origin.z),
            distance,
        })
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "flat"
    }
}

// ---------------------------------------------------------------------------
// TerrainFn
// ---------------------------------------------------------------------------

/// Height field given by a closure `(x, z) -> y`.
///
/// Only terrain below the origin counts as a hit; a probe that starts
/// underground misses.
pub struct TerrainFn<F> {
    height_at: F,
    name: String,
}

impl<F> TerrainFn<F>
where
    F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, height_at: F) -> Self {
        Self {
            height_at,
            name: name.into(),
        }
    }

    /// Terrain height under `(x, z)`.
    pub fn height(&self, x: f64, z: f64) -> f64 {
        (self.height_at)(x, z)
    }
}

impl<F> GroundProbe for TerrainFn<F>
where
    F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
{
    fn cast_down(&self, origin: &Vector3<f64>, max_distance: f64) -> Option<GroundHit> {
        let y = self.height(origin.x, origin.z);
        if !y.is_finite() {
            return None;
        }
        let distance = origin.y - y;
        (distance >= 0.0 && distance <= max_distance).then(|| GroundHit {
            point: Vector3::new(origin.x, y, origin.z),
            distance,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> std::fmt::Debug for TerrainFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerrainFn").field("name", &self.name).finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Attachment
// ---------------------------------------------------------------------------

/// Move `leg`'s home anchor onto the ground below `origin`.
///
/// Only the anchor position changes; its rotation is untouched. On a miss
/// the previous anchor is kept. Returns `true` on a hit.
pub fn attach_to_ground(
    leg: &mut Leg,
    probe: &dyn GroundProbe,
    origin: &Vector3<f64>,
    max_distance: f64,
) -> bool {
    if let Some(hit) = probe.cast_down(origin, max_distance) {
        leg.set_home_position(hit.point);
        true
    } else {
        trace!(
            "leg {} probe '{}' missed below [{:.3}, {:.3}, {:.3}], keeping anchor",
            leg.id(),
            probe.name(),
            origin.x,
            origin.y,
            origin.z,
        );
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
