//! Configuration loading for plexus.
//!
//! Settings live in a TOML file in the platform config directory. A
//! missing file means defaults; a malformed or out-of-range one is an
//! error.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use plexus_core::{DisplaySettings, FieldSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PLEXUS_CONFIG";

/// Environment variable forcing the initial reduced-motion preference.
pub const REDUCED_MOTION_ENV: &str = "PLEXUS_REDUCED_MOTION";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub field: FieldSettings,
    pub display: DisplaySettings,
}

impl Config {
    /// Default location of the config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "plexus").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from `PLEXUS_CONFIG` or the default path, then apply
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(Self::default_path);
        let mut config = match path {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        if let Some(value) = std::env::var_os(REDUCED_MOTION_ENV)
            && let Some(reduce) = parse_flag(&value.to_string_lossy())
        {
            config.display.reduced_motion = reduce;
        }
        Ok(config)
    }

    /// Load a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the animation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.field;
        if !is_positive(field.connection_distance) {
            return Err(invalid("field.connection_distance", "must be positive"));
        }
        if field.max_speed.is_nan() || field.max_speed < 0.0 {
            return Err(invalid("field.max_speed", "must not be negative"));
        }
        if !is_positive(field.min_radius) {
            return Err(invalid("field.min_radius", "must be positive"));
        }
        if field.max_radius.is_nan() || field.max_radius < field.min_radius {
            return Err(invalid("field.max_radius", "must be at least min_radius"));
        }
        for (key, alpha) in [
            ("field.particle_alpha", field.particle_alpha),
            ("field.max_line_alpha", field.max_line_alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(invalid(key, "must be between 0 and 1"));
            }
        }
        if self.display.fps == 0 {
            return Err(invalid("display.fps", "must be positive"));
        }
        if self.display.cell_width_px == 0 || self.display.cell_height_px == 0 {
            return Err(invalid("display.cell_width_px", "cell size must be positive"));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.to_string(),
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
