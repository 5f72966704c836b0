//! Shared test fixtures and utilities for skitter crates.
//!
//! Provides Bevy test app builders with a manually driven clock, a spider
//! rig spawner, and mock ground probes.

pub mod app;
pub mod mocks;
pub mod spawn;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use app::{advance_time, minimal_test_app, run_ticks, spider_test_app};
pub use mocks::{CountingProbe, NoGround, StepGround};
pub use spawn::{SpiderRig, spawn_spider, spawn_target};
