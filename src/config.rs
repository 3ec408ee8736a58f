//! Engine configuration: tunable thresholds with defaults, environment
//! overrides, JSON loading, and validation.
//!
//! Every value has a default in [`crate::consts`]. Hosts can build an
//! [`EngineConfig`] directly, read overrides from `MULTITOUCH_*` environment
//! variables with [`EngineConfig::from_env`], or deserialize a partial JSON
//! document with [`EngineConfig::from_json`]. Missing values take their
//! defaults; present but invalid values are rejected with a [`ConfigError`].
//!
//! The three grid thresholds are independent on purpose. Their intended
//! ordering is `snap < sticky <= activate`, but the shipped defaults are all
//! equal, which leaves the partial-attraction band empty. The engine keeps
//! whatever it is given and logs a warning instead of reordering values.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DOUBLE_TAP_DISTANCE, DEFAULT_DOUBLE_TAP_WINDOW_MS, DEFAULT_GRID_ACTIVATE_THRESHOLD,
    DEFAULT_GRID_SNAP_THRESHOLD, DEFAULT_GRID_STICKY_THRESHOLD, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE,
    DEFAULT_ROTATION_ACTIVATION_DEG, DEFAULT_ROTATION_SNAP_THRESHOLD_DEG,
};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {raw:?}")]
    InvalidEnv { var: String, raw: String },
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("minimum scale must be positive, got {0}")]
    NonPositiveScale(f64),
    #[error("scale limits inverted: min {min} > max {max}")]
    InvertedScale { min: f64, max: f64 },
    #[error("invalid config document: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// SECTIONS
// =============================================================================

/// Proximity bands for grid snapping, in reference-frame units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSnapConfig {
    /// Edge distance below which a line is highlighted.
    pub activate_threshold: f64,
    /// Edge distance below which an edge is partially pulled toward a line.
    pub sticky_threshold: f64,
    /// Edge distance at or below which an edge lands exactly on a line.
    pub snap_threshold: f64,
}

impl Default for GridSnapConfig {
    fn default() -> Self {
        Self {
            activate_threshold: DEFAULT_GRID_ACTIVATE_THRESHOLD,
            sticky_threshold: DEFAULT_GRID_STICKY_THRESHOLD,
            snap_threshold: DEFAULT_GRID_SNAP_THRESHOLD,
        }
    }
}

impl GridSnapConfig {
    #[must_use]
    pub fn new(activate_threshold: f64, sticky_threshold: f64, snap_threshold: f64) -> Self {
        Self { activate_threshold, sticky_threshold, snap_threshold }
    }

    /// Whether any distance falls strictly between `snap` and `sticky`.
    #[must_use]
    pub fn has_attraction_band(&self) -> bool {
        self.sticky_threshold > self.snap_threshold
    }
}

/// Rotation hysteresis and snapping, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Angular change a gesture must exceed before any rotation applies.
    pub activation_deg: f64,
    /// Distance from a quarter turn within which the rotation snaps onto it.
    pub snap_threshold_deg: f64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            activation_deg: DEFAULT_ROTATION_ACTIVATION_DEG,
            snap_threshold_deg: DEFAULT_ROTATION_SNAP_THRESHOLD_DEG,
        }
    }
}

/// Bounds on the two-finger scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: DEFAULT_MIN_SCALE, max: DEFAULT_MAX_SCALE }
    }
}

/// Double-tap recognition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    /// Two taps closer together than this (milliseconds) form a double tap.
    pub double_tap_window_ms: u64,
    /// Two taps nearer than this form a double tap.
    pub double_tap_distance: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self { double_tap_window_ms: DEFAULT_DOUBLE_TAP_WINDOW_MS, double_tap_distance: DEFAULT_DOUBLE_TAP_DISTANCE }
    }
}

// =============================================================================
// ENGINE CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub grid: GridSnapConfig,
    pub rotation: RotationConfig,
    pub scale: ScaleLimits,
    pub tap: TapConfig,
}

impl EngineConfig {
    /// Build a config from environment variables, defaulting unset ones.
    ///
    /// Optional:
    /// - `MULTITOUCH_GRID_ACTIVATE_THRESHOLD`: default 1
    /// - `MULTITOUCH_GRID_STICKY_THRESHOLD`: default 1
    /// - `MULTITOUCH_GRID_SNAP_THRESHOLD`: default 1
    /// - `MULTITOUCH_ROTATION_ACTIVATION_DEG`: default 10
    /// - `MULTITOUCH_ROTATION_SNAP_DEG`: default 5
    /// - `MULTITOUCH_MIN_SCALE`: default 0.3
    /// - `MULTITOUCH_MAX_SCALE`: default 3.0
    /// - `MULTITOUCH_DOUBLE_TAP_WINDOW_MS`: default 500
    /// - `MULTITOUCH_DOUBLE_TAP_DISTANCE`: default 20
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for a value that does not parse and
    /// any error from [`EngineConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let grid = GridSnapConfig {
            activate_threshold: env_parse("MULTITOUCH_GRID_ACTIVATE_THRESHOLD", DEFAULT_GRID_ACTIVATE_THRESHOLD)?,
            sticky_threshold: env_parse("MULTITOUCH_GRID_STICKY_THRESHOLD", DEFAULT_GRID_STICKY_THRESHOLD)?,
            snap_threshold: env_parse("MULTITOUCH_GRID_SNAP_THRESHOLD", DEFAULT_GRID_SNAP_THRESHOLD)?,
        };
        let rotation = RotationConfig {
            activation_deg: env_parse("MULTITOUCH_ROTATION_ACTIVATION_DEG", DEFAULT_ROTATION_ACTIVATION_DEG)?,
            snap_threshold_deg: env_parse("MULTITOUCH_ROTATION_SNAP_DEG", DEFAULT_ROTATION_SNAP_THRESHOLD_DEG)?,
        };
        let scale = ScaleLimits {
            min: env_parse("MULTITOUCH_MIN_SCALE", DEFAULT_MIN_SCALE)?,
            max: env_parse("MULTITOUCH_MAX_SCALE", DEFAULT_MAX_SCALE)?,
        };
        let tap = TapConfig {
            double_tap_window_ms: env_parse("MULTITOUCH_DOUBLE_TAP_WINDOW_MS", DEFAULT_DOUBLE_TAP_WINDOW_MS)?,
            double_tap_distance: env_parse("MULTITOUCH_DOUBLE_TAP_DISTANCE", DEFAULT_DOUBLE_TAP_DISTANCE)?,
        };

        let config = Self { grid, rotation, scale, tap };
        config.validate()?;
        Ok(config)
    }

    /// Parse a (possibly partial) JSON document; absent fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input and any error from
    /// [`EngineConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    ///
    /// Threshold ordering is not checked; see the module docs.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("grid.activate_threshold", self.grid.activate_threshold)?;
        non_negative("grid.sticky_threshold", self.grid.sticky_threshold)?;
        non_negative("grid.snap_threshold", self.grid.snap_threshold)?;
        non_negative("rotation.activation_deg", self.rotation.activation_deg)?;
        non_negative("rotation.snap_threshold_deg", self.rotation.snap_threshold_deg)?;
        non_negative("scale.min", self.scale.min)?;
        non_negative("scale.max", self.scale.max)?;
        non_negative("tap.double_tap_distance", self.tap.double_tap_distance)?;

        if self.scale.min <= 0.0 {
            return Err(ConfigError::NonPositiveScale(self.scale.min));
        }
        if self.scale.min > self.scale.max {
            return Err(ConfigError::InvertedScale { min: self.scale.min, max: self.scale.max });
        }
        Ok(())
    }

    /// Log settings that are valid but probably not what was intended.
    pub(crate) fn warn_suspicious(&self) {
        let grid = &self.grid;
        if !grid.has_attraction_band() {
            tracing::warn!(
                sticky = grid.sticky_threshold,
                snap = grid.snap_threshold,
                "grid sticky threshold does not exceed snap threshold; partial attraction is disabled"
            );
        }
        if grid.activate_threshold < grid.sticky_threshold {
            tracing::warn!(
                activate = grid.activate_threshold,
                sticky = grid.sticky_threshold,
                "grid activate threshold is below sticky threshold; attracted edges may not highlight"
            );
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidEnv { var: key.to_owned(), raw }),
        Err(_) => Ok(default),
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}
