//! Application settings and paths.
//!
//! Settings live in `settings.json` under the XDG configuration directory
//! (`~/.config/bannergrab` on Linux). Command-line flags override them.

use crate::cli::OutputFormat;
use crate::error::{ConfigError, ConfigResult};
use crate::types::PortSpec;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/bannergrab)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform configuration directory.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "bannergrab", "bannergrab")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Connect/read timeout in seconds.
    pub default_timeout_secs: f64,
    /// Port list used when `--ports` is not given.
    pub default_ports: String,
    /// Enable verbose output by default.
    pub verbose: bool,
    /// Console output format.
    pub default_output_format: OutputFormat,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_timeout_secs: 2.0,
            default_ports: "80,443".to_string(),
            verbose: false,
            default_output_format: OutputFormat::Plain,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    ///
    /// A missing file, or a platform without a config directory, yields
    /// the defaults.
    pub fn load() -> ConfigResult<Self> {
        let file = match Paths::new() {
            Ok(paths) => paths.settings_file(),
            Err(e) => {
                debug!(error = %e, "no config directory, using default settings");
                return Ok(Self::default());
            }
        };

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.validate()?;

        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Check that every field holds a usable value.
    pub fn validate(&self) -> ConfigResult<()> {
        self.timeout()?;
        self.default_ports
            .parse::<PortSpec>()
            .map_err(|e| ConfigError::InvalidValue(format!("default_ports: {}", e)))?;
        Ok(())
    }

    /// The configured timeout as a `Duration`.
    pub fn timeout(&self) -> ConfigResult<Duration> {
        seconds_to_duration(self.default_timeout_secs)
    }
}

/// Convert a positive, finite number of seconds into a `Duration`.
pub fn seconds_to_duration(secs: f64) -> ConfigResult<Duration> {
    if !(secs > 0.0) {
        return Err(ConfigError::InvalidValue(format!(
            "timeout must be a positive number of seconds, got {}",
            secs
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| ConfigError::InvalidValue(format!("timeout {}: {}", secs, e)))
}
