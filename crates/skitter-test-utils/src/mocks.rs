//! Mock ground probes for testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::Vector3;
use skitter_gait::ground::{GroundHit, GroundProbe};

// ---------------------------------------------------------------------------
// NoGround
// ---------------------------------------------------------------------------

/// A world with nothing to stand on. Every probe misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGround;

impl GroundProbe for NoGround {
    fn cast_down(&self, _origin: &Vector3<f64>, _max_distance: f64) -> Option<GroundHit> {
        None
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "NoGround"
    }
}

// ---------------------------------------------------------------------------
// StepGround
// ---------------------------------------------------------------------------

/// Flat ground at `low` that rises to `high` for `z <= edge_z` (ahead of a
/// body walking along -Z).
#[derive(Debug, Clone, Copy)]
pub struct StepGround {
    pub edge_z: f64,
    pub low: f64,
    pub high: f64,
}

impl StepGround {
    #[must_use]
    pub fn height_at(&self, z: f64) -> f64 {
        if z <= self.edge_z { self.high } else { self.low }
    }
}

impl GroundProbe for StepGround {
    fn cast_down(&self, origin: &Vector3<f64>, max_distance: f64) -> Option<GroundHit> {
        let height = self.height_at(origin.z);
        let distance = origin.y - height;
        (distance >= 0.0 && distance <= max_distance).then(|| GroundHit {
            point: Vector3::new(origin.x, height, origin.z),
            distance,
        })
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "StepGround"
    }
}

// ---------------------------------------------------------------------------
// CountingProbe
// ---------------------------------------------------------------------------

/// Wraps another probe and counts casts. Clones share the counter, so keep
/// one clone to read the count after handing the probe to a plugin.
#[derive(Debug, Clone, Default)]
pub struct CountingProbe<P> {
    inner: P,
    casts: Arc<AtomicUsize>,
}

impl<P: GroundProbe> CountingProbe<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            casts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of casts so far, across all clones.
    pub fn casts(&self) -> usize {
        self.casts.load(Ordering::Relaxed)
    }
}

impl<P: GroundProbe> GroundProbe for CountingProbe<P> {
    fn cast_down(&self, origin: &Vector3<f64>, max_distance: f64) -> Option<GroundHit> {
        self.casts.fetch_add(1, Ordering::Relaxed);
        self.inner.cast_down(origin, max_distance)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
