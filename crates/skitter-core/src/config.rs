use std::f64::consts::{FRAC_PI_3, PI};

use bevy::prelude::Resource;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::LegId;

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value <= 0.0 || value.is_nan() {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value < 0.0 || value.is_nan() {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn angle_threshold(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value <= 0.0 || value > PI || value.is_nan() {
        return Err(ConfigError::InvalidValue {
            field: field.into(),
            message: format!("{value} rad is outside (0, pi]"),
        });
    }
    Ok(())
}

const fn unbounded() -> f64 {
    f64::INFINITY
}

// ---------------------------------------------------------------------------
// StepConfig
// ---------------------------------------------------------------------------

/// Per-leg stepping tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// A step starts once the foot is farther than this from its home anchor (meters).
    pub trigger_distance: f64,
    /// How long one step takes (seconds).
    pub move_duration: f64,
    /// Fraction of `trigger_distance` to land past the home anchor.
    pub overshoot_fraction: f64,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            trigger_distance: 0.35,
            move_duration: 0.2,
            overshoot_fraction: 0.5,
        }
    }
}

impl StepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("step.trigger_distance", self.trigger_distance)?;
        positive("step.move_duration", self.move_duration)?;
        non_negative("step.overshoot_fraction", self.overshoot_fraction)
    }

    /// Horizontal distance a step lands past the home anchor.
    #[must_use]
    pub fn overshoot_distance(&self) -> f64 {
        self.trigger_distance * self.overshoot_fraction
    }
}

// ---------------------------------------------------------------------------
// GroundConfig
// ---------------------------------------------------------------------------

/// Ground probe tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundConfig {
    /// Longest downward probe (meters). Unbounded by default.
    #[serde(default = "unbounded")]
    pub max_probe_distance: f64,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            max_probe_distance: unbounded(),
        }
    }
}

impl GroundConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("ground.max_probe_distance", self.max_probe_distance)
    }
}

// ---------------------------------------------------------------------------
// SteeringConfig
// ---------------------------------------------------------------------------

/// Root-motion steering tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Full-throttle yaw rate (rad/s).
    pub turn_speed: f64,
    /// Full-throttle ground speed (m/s).
    pub move_speed: f64,
    /// Exponential smoothing rate toward the desired yaw rate (1/s).
    pub turn_acceleration: f64,
    /// Exponential smoothing rate toward the desired velocity (1/s).
    pub move_acceleration: f64,
    /// Back away when closer than this to the target (meters).
    pub min_distance: f64,
    /// Approach when farther than this from the target (meters).
    pub max_distance: f64,
    /// Facing deadzone: only turn when the target is more than this off-axis (rad).
    pub max_angle: f64,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            turn_speed: 100_f64.to_radians(),
            move_speed: 2.0,
            turn_acceleration: 5.0,
            move_acceleration: 5.0,
            min_distance: 2.0,
            max_distance: 4.0,
            max_angle: 10_f64.to_radians(),
        }
    }
}

impl SteeringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("steering.turn_speed", self.turn_speed)?;
        positive("steering.move_speed", self.move_speed)?;
        positive("steering.turn_acceleration", self.turn_acceleration)?;
        positive("steering.move_acceleration", self.move_acceleration)?;
        non_negative("steering.min_distance", self.min_distance)?;
        non_negative("steering.max_distance", self.max_distance)?;
        if self.min_distance > self.max_distance {
            return Err(ConfigError::InvertedRange {
                min_field: "steering.min_distance",
                max_field: "steering.max_distance",
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        angle_threshold("steering.max_angle", self.max_angle)
    }
}

// ---------------------------------------------------------------------------
// HeadTrackingConfig
// ---------------------------------------------------------------------------

/// Head look-at tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadTrackingConfig {
    /// Widest the head may turn away from body forward (rad).
    pub max_turn_angle: f64,
    /// Exponential smoothing rate toward the look rotation (1/s).
    pub tracking_speed: f64,
}

impl Default for HeadTrackingConfig {
    fn default() -> Self {
        Self {
            max_turn_angle: FRAC_PI_3,
            tracking_speed: 5.0,
        }
    }
}

impl HeadTrackingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        angle_threshold("head.max_turn_angle", self.max_turn_angle)?;
        positive("head.tracking_speed", self.tracking_speed)
    }
}

// ---------------------------------------------------------------------------
// BodyHeightConfig
// ---------------------------------------------------------------------------

/// Body ride-height tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyHeightConfig {
    /// Whether the ride-height controller runs at all.
    pub enabled: bool,
    /// Height to keep the body above the ground reference (meters).
    pub ride_height: f64,
    /// How long a corrective lift takes (seconds).
    pub lift_duration: f64,
}

impl Default for BodyHeightConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ride_height: 0.82,
            lift_duration: 0.25,
        }
    }
}

impl BodyHeightConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("body.ride_height", self.ride_height)?;
        positive("body.lift_duration", self.lift_duration)
    }
}

// ---------------------------------------------------------------------------
// LayoutConfig
// ---------------------------------------------------------------------------

/// Where the four legs sit on the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Lateral distance from the body center to a leg's home (meters).
    pub half_width: f64,
    /// Longitudinal distance from the body center to a leg's home (meters).
    pub half_length: f64,
    /// Height above the body origin the ground probe is cast from (meters).
    pub probe_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            half_width: 0.6,
            half_length: 0.7,
            probe_height: 1.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("layout.half_width", self.half_width)?;
        non_negative("layout.half_length", self.half_length)?;
        non_negative("layout.probe_height", self.probe_height)
    }

    /// Body-frame home offset of a leg on the ground plane (y = 0).
    ///
    /// Left is -X, front is -Z.
    #[must_use]
    pub fn foot_offset(&self, leg: LegId) -> Vector3<f64> {
        let x = if leg.is_left() { -self.half_width } else { self.half_width };
        let z = if leg.is_front() { -self.half_length } else { self.half_length };
        Vector3::new(x, 0.0, z)
    }

    /// Body-frame origin of a leg's downward ground probe.
    #[must_use]
    pub fn probe_offset(&self, leg: LegId) -> Vector3<f64> {
        self.foot_offset(leg) + Vector3::new(0.0, self.probe_height, 0.0)
    }
}

// ---------------------------------------------------------------------------
// CreatureConfig
// ---------------------------------------------------------------------------

/// Every tunable of one creature, supplied at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Resource)]
pub struct CreatureConfig {
    #[serde(default)]
    pub step: StepConfig,
    #[serde(default)]
    pub ground: GroundConfig,
    #[serde(default)]
    pub steering: SteeringConfig,
    #[serde(default)]
    pub head: HeadTrackingConfig,
    #[serde(default)]
    pub body: BodyHeightConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl CreatureConfig {
    /// Validate every section. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.step.validate()?;
        self.ground.validate()?;
        self.steering.validate()?;
        self.head.validate()?;
        self.body.validate()?;
        self.layout.validate()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        CreatureConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = CreatureConfig::from_toml_str("").unwrap();
        assert_eq!(config, CreatureConfig::default());
        assert!(config.ground.max_probe_distance.is_infinite());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = CreatureConfig::from_toml_str(
            r"
            [step]
            trigger_distance = 0.5

            [steering]
            min_distance = 1.0
            ",
        )
        .unwrap();
        assert_relative_eq!(config.step.trigger_distance, 0.5);
        assert_relative_eq!(config.step.move_duration, StepConfig::default().move_duration);
        assert_relative_eq!(config.steering.min_distance, 1.0);
        assert_relative_eq!(config.steering.max_distance, 4.0);
    }

    #[test]
    fn rejects_non_positive_duration() {
        let err = CreatureConfig::from_toml_str("[step]\nmove_duration = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "step.move_duration",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_overshoot() {
        let err = CreatureConfig::from_toml_str("[step]\novershoot_fraction = -0.1").unwrap_err();
        assert!(matches!(err, ConfigError::Negative { .. }));
    }

    #[test]
    fn rejects_inverted_distance_band() {
        let mut config = CreatureConfig::default();
        config.steering.min_distance = 5.0;
        config.steering.max_distance = 3.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { .. })
        ));
    }

    #[test]
    fn rejects_angle_outside_half_turn() {
        let mut config = CreatureConfig::default();
        config.head.max_turn_angle = 4.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rejects_nan() {
        let mut config = CreatureConfig::default();
        config.steering.turn_speed = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_toml_error() {
        let err = CreatureConfig::from_toml_str("[step\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CreatureConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = CreatureConfig::default();
        config.ground.max_probe_distance = 12.0;
        config.body.enabled = true;
        let text = toml::to_string(&config).unwrap();
        let back = CreatureConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn overshoot_distance_scales_trigger() {
        let step = StepConfig {
            trigger_distance: 0.5,
            move_duration: 0.1,
            overshoot_fraction: 0.1,
        };
        assert_relative_eq!(step.overshoot_distance(), 0.05);
    }

    #[test]
    fn layout_offsets_place_legs_on_corners() {
        let layout = LayoutConfig::default();
        let fl = layout.foot_offset(LegId::FrontLeft);
        assert!(fl.x < 0.0 && fl.z < 0.0);
        let br = layout.foot_offset(LegId::BackRight);
        assert_relative_eq!(br, -fl);
        let probe = layout.probe_offset(LegId::BackLeft);
        assert_relative_eq!(probe.y, layout.probe_height);
    }
}
