//! Physics tuning configuration.
//!
//! All movement and collision knobs live here. Configuration can be loaded
//! from and saved to a TOML file; values are validated on load and invalid
//! files are rejected rather than silently adjusted.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

use karst_common::{ConfigError, CoreResult};

/// Configuration file name.
const CONFIG_FILE: &str = "karst.toml";

/// Tuning parameters for body movement and collision resolution.
///
/// Velocities are in world units per second, accelerations in units per
/// second squared, and timing windows in milliseconds. Gravity is positive
/// because y grows downward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // === Vertical movement ===
    /// Gravity acceleration (positive = down)
    pub gravity: f32,
    /// Maximum downward speed (terminal velocity)
    pub max_fall_speed: f32,
    /// Maximum upward speed
    pub max_rise_speed: f32,

    // === Horizontal movement ===
    /// Horizontal acceleration while input is held
    pub acceleration: f32,
    /// Maximum horizontal speed
    pub max_run_speed: f32,
    /// Horizontal deceleration while no input is held
    pub friction: f32,

    // === Jumping ===
    /// Upward launch speed of a jump
    pub jump_velocity: f32,
    /// Fraction of upward speed kept when the jump button is released early (0-1)
    pub jump_cut_multiplier: f32,
    /// How long after leaving a ledge a jump is still allowed
    pub coyote_time_ms: f32,
    /// How long before landing a jump press is remembered
    pub jump_buffer_ms: f32,

    // === Collision resolution ===
    /// Separation margin left between surfaces after push-out
    pub collision_epsilon: f32,
    /// How far below the feet the grounded-retention probe reaches
    pub ground_snap_distance: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            // Vertical
            gravity: 800.0,
            max_fall_speed: 600.0,
            max_rise_speed: 600.0,

            // Horizontal
            acceleration: 1800.0,
            max_run_speed: 200.0,
            friction: 2600.0,

            // Jumping
            jump_velocity: 350.0,
            jump_cut_multiplier: 0.45,
            coyote_time_ms: 80.0,
            jump_buffer_ms: 100.0,

            // Collision
            collision_epsilon: 0.001,
            ground_snap_distance: 6.0,
        }
    }
}

impl PhysicsConfig {
    /// Load configuration from the default file location.
    pub fn load() -> CoreResult<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file falls back to defaults; an unreadable, unparseable,
    /// or invalid file is an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Physics config not found, using defaults");
            return Ok(Self::default());
        }

        let mut contents = String::new();
        fs::File::open(path)?.read_to_string(&mut contents)?;

        let config: Self = toml::from_str(&contents).map_err(|e| {
            warn!("Failed to parse physics config {}: {e}", path.display());
            ConfigError::Parse(e.to_string())
        })?;

        config.validate()?;
        info!("Loaded physics config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default file location.
    pub fn save(&self) -> CoreResult<()> {
        self.save_to(CONFIG_FILE)
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> CoreResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved physics config to {}", path.display());
        Ok(())
    }

    /// Check every tuning value, returning the first problem found.
    ///
    /// Magnitudes must be finite and non-negative, and the jump cut
    /// multiplier must lie in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_magnitude("gravity", self.gravity)?;
        ensure_magnitude("max_fall_speed", self.max_fall_speed)?;
        ensure_magnitude("max_rise_speed", self.max_rise_speed)?;
        ensure_magnitude("acceleration", self.acceleration)?;
        ensure_magnitude("max_run_speed", self.max_run_speed)?;
        ensure_magnitude("friction", self.friction)?;
        ensure_magnitude("jump_velocity", self.jump_velocity)?;
        ensure_magnitude("coyote_time_ms", self.coyote_time_ms)?;
        ensure_magnitude("jump_buffer_ms", self.jump_buffer_ms)?;
        ensure_magnitude("collision_epsilon", self.collision_epsilon)?;
        ensure_magnitude("ground_snap_distance", self.ground_snap_distance)?;

        let cut = self.jump_cut_multiplier;
        if !cut.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "jump_cut_multiplier",
                value: cut,
            });
        }
        if !(0.0..=1.0).contains(&cut) {
            return Err(ConfigError::OutOfRange {
                field: "jump_cut_multiplier",
                min: 0.0,
                max: 1.0,
                value: cut,
            });
        }

        Ok(())
    }
}

/// A magnitude field must be finite and non-negative.
fn ensure_magnitude(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field, value });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use karst_common::CoreError;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = PhysicsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gravity, 800.0);
        assert_eq!(config.jump_velocity, 350.0);
        assert_eq!(config.coyote_time_ms, 80.0);
    }

    #[test]
    fn test_negative_gravity_rejected() {
        let config = PhysicsConfig {
            gravity: -800.0,
            ..Default::default()
        };
        let err = config.validate().expect_err("negative gravity must fail");
        assert!(matches!(err, ConfigError::Negative { field: "gravity", .. }));
    }

    #[test]
    fn test_nan_friction_rejected() {
        let config = PhysicsConfig {
            friction: f32::NAN,
            ..Default::default()
        };
        let err = config.validate().expect_err("NaN friction must fail");
        assert!(matches!(err, ConfigError::NotFinite { field: "friction", .. }));
    }

    #[test]
    fn test_jump_cut_out_of_range_rejected() {
        let config = PhysicsConfig {
            jump_cut_multiplier: 1.5,
            ..Default::default()
        };
        let err = config.validate().expect_err("cut > 1 must fail");
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "jump_cut_multiplier",
                ..
            }
        ));
    }

    #[test]
    fn test_values_are_not_clamped() {
        // Validation reports problems instead of rewriting the config.
        let config = PhysicsConfig {
            max_fall_speed: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.max_fall_speed, -1.0);
    }

    #[test]
    fn test_config_save_load_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("physics.toml");

        let config = PhysicsConfig {
            gravity: 900.0,
            jump_velocity: 400.0,
            ..Default::default()
        };
        config.save_to(&config_path).expect("Failed to save config");

        let loaded = PhysicsConfig::load_from(&config_path).expect("Failed to load config");
        assert_eq!(loaded.gravity, 900.0);
        assert_eq!(loaded.jump_velocity, 400.0);
        assert_eq!(loaded.friction, config.friction);
    }

    #[test]
    fn test_config_load_missing_file_uses_defaults() {
        let config = PhysicsConfig::load_from("/nonexistent/path/karst.toml")
            .expect("missing file should fall back to defaults");
        assert_eq!(config.gravity, 800.0);
    }

    #[test]
    fn test_config_load_rejects_invalid_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("bad.toml");

        let config = PhysicsConfig {
            jump_velocity: -350.0,
            ..Default::default()
        };
        // Write the raw file directly; save_to would happily persist it,
        // the gate is on load.
        let contents = toml::to_string_pretty(&config).expect("serialize");
        std::fs::write(&config_path, contents).expect("write");

        let err = PhysicsConfig::load_from(&config_path).expect_err("invalid value must fail");
        assert!(matches!(err, CoreError::Config(ConfigError::Negative { .. })));
    }

    #[test]
    fn test_config_load_rejects_garbage() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("garbage.toml");
        std::fs::write(&config_path, "gravity = \"sideways\"").expect("write");

        let err = PhysicsConfig::load_from(&config_path).expect_err("garbage must fail");
        assert!(matches!(err, CoreError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_toml_serialization() {
        let config = PhysicsConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");

        assert!(toml_str.contains("gravity"));
        assert!(toml_str.contains("coyote_time_ms"));
    }
}
