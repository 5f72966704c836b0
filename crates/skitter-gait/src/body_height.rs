//! Body ride-height correction.
//!
//! When the body sinks closer to the ground reference than `ride_height`, a
//! linear lift raises it back to `ground + ride_height` over
//! `lift_duration`. A lift in progress runs to completion before the height
//! is checked again.

use bevy::log::debug;
use skitter_core::config::BodyHeightConfig;
use skitter_core::math::lerp;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Lift {
    from: f64,
    to: f64,
    elapsed: f64,
}

/// Keeps a body at its ride height above the ground reference.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyHeightController {
    config: BodyHeightConfig,
    lift: Option<Lift>,
}

impl BodyHeightController {
    #[must_use]
    pub const fn new(config: BodyHeightConfig) -> Self {
        Self { config, lift: None }
    }

    #[must_use]
    pub const fn config(&self) -> &BodyHeightConfig {
        &self.config
    }

    /// `true` while a lift is in progress.
    #[must_use]
    pub const fn is_lifting(&self) -> bool {
        self.lift.is_some()
    }

    /// Advance by `dt`. Returns the body height to apply this tick, or `None`
    /// if the body should be left where it is.
    pub fn update(&mut self, body_y: f64, ground_y: f64, dt: f64) -> Option<f64> {
        if !self.config.enabled {
            return None;
        }

        if self.lift.is_none() {
            if (body_y - ground_y).abs() >= self.config.ride_height {
                return None;
            }
            let to = ground_y + self.config.ride_height;
            debug!("body lift from {body_y:.3} to {to:.3}");
            self.lift = Some(Lift {
                from: body_y,
                to,
                elapsed: 0.0,
            });
        }

        let lift = self.lift.as_mut()?;
        lift.elapsed += dt.max(0.0);
        if lift.elapsed >= self.config.lift_duration {
            let to = lift.to;
            self.lift = None;
            return Some(to);
        }
        Some(lerp(lift.from, lift.to, lift.elapsed / self.config.lift_duration))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
