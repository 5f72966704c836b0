//! Bevy test app builders with a manually advanced clock.

use std::time::Duration;

use bevy::app::TaskPoolPlugin;
use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use skitter_gait::ground::GroundProbe;

/// Create a minimal test app with only the core plugin.
///
/// Provides `SkitterSet` ordering and a `Time` resource that only moves when
/// [`advance_time`] is called.
pub fn minimal_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(skitter_core::SkitterCorePlugin);
    app.finish();
    app.cleanup();
    app
}

/// Create a full-stack test app over `ground`: task pools, core, transform
/// propagation, gait and steering plugins.
pub fn spider_test_app(ground: impl GroundProbe) -> App {
    let mut app = App::new();
    app.add_plugins(TaskPoolPlugin::default());
    app.add_plugins(skitter_core::SkitterCorePlugin);
    app.add_plugins(TransformPlugin);
    app.add_plugins(skitter_gait::SkitterGaitPlugin::new(ground));
    app.add_plugins(skitter_steer::SkitterSteerPlugin);
    app.finish();
    app.cleanup();
    app
}

/// Advance the clock by `dt` seconds and run one frame.
pub fn advance_time(app: &mut App, dt: f64) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f64(dt));
    app.update();
}

/// Run `ticks` frames of `dt` seconds each.
pub fn run_ticks(app: &mut App, dt: f64, ticks: usize) {
    for _ in 0..ticks {
        advance_time(app, dt);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
