//! Synthesis Configuration - waveform constants, dataset preset, output target
//!
//! Every struct implements `Default` with the fixed constants from
//! `defaults`, so a run with no config file reproduces the reference dataset.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::dataset::{OutputFormat, Preset};
use crate::types::TimeAxis;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one generation run.
///
/// Load with `SynthConfig::load()` which searches:
/// 1. `$PAVEMENT_SYNTH_CONFIG` env var
/// 2. `./synth_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Sample rate, window length, gravity offset
    #[serde(default)]
    pub waveform: WaveformParams,

    /// Which dataset to build and how to seed it
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Where and how to write the table
    #[serde(default)]
    pub output: OutputConfig,
}

impl SynthConfig {
    /// Load configuration using the standard search order:
    /// 1. `$PAVEMENT_SYNTH_CONFIG` environment variable
    /// 2. `./synth_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), preset = %config.dataset.preset, "Loaded synth config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(preset = %config.dataset.preset, "Loaded synth config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No synth config found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the effective config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate every section; all problems are reported together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.waveform.collect_errors();

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Output path, falling back to the preset's file name.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.dataset.preset.default_output_file()))
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Waveform Parameters
// ============================================================================

/// Constants shared by every generator. Passed explicitly into each call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformParams {
    /// IMU sample rate (Hz)
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hz: f64,

    /// Window length per sample (seconds)
    #[serde(default = "default_window_duration")]
    pub window_duration_s: f64,

    /// Static offset on acc_z (g)
    #[serde(default = "default_gravity")]
    pub gravity: f64,
}

fn default_sample_rate() -> f64 {
    defaults::SAMPLE_RATE_HZ
}
fn default_window_duration() -> f64 {
    defaults::WINDOW_DURATION_S
}
fn default_gravity() -> f64 {
    defaults::GRAVITY
}

impl Default for WaveformParams {
    fn default() -> Self {
        Self {
            sample_rate_hz: default_sample_rate(),
            window_duration_s: default_window_duration(),
            gravity: default_gravity(),
        }
    }
}

impl WaveformParams {
    /// Points per window: `round(sample_rate × duration)`.
    pub fn n_points(&self) -> usize {
        let n = (self.sample_rate_hz * self.window_duration_s).round();
        if n.is_finite() && n > 0.0 {
            n as usize
        } else {
            0
        }
    }

    /// Seconds between consecutive samples
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sample_rate_hz
    }

    pub fn time_axis(&self) -> TimeAxis {
        TimeAxis::new(self)
    }

    /// Reject parameters that cannot produce a valid window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors = self.collect_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn collect_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz <= 0.0 {
            errors.push(format!(
                "waveform.sample_rate_hz must be a positive finite number (got {})",
                self.sample_rate_hz
            ));
        }
        if !self.window_duration_s.is_finite() || self.window_duration_s <= 0.0 {
            errors.push(format!(
                "waveform.window_duration_s must be a positive finite number (got {})",
                self.window_duration_s
            ));
        }
        if !self.gravity.is_finite() {
            errors.push(format!("waveform.gravity must be finite (got {})", self.gravity));
        }

        // Only meaningful once rate and duration are sane
        if errors.is_empty() && self.n_points() < defaults::MIN_WINDOW_POINTS {
            errors.push(format!(
                "window of {:.3}s at {:.1} Hz has {} points, need at least {}",
                self.window_duration_s,
                self.sample_rate_hz,
                self.n_points(),
                defaults::MIN_WINDOW_POINTS
            ));
        }

        errors
    }
}

// ============================================================================
// Dataset
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Which kind/count plan to generate
    #[serde(default)]
    pub preset: Preset,

    /// Fixed seed for a reproducible run; drawn from OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination file, `-` for stdout. Defaults to the preset's file name.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub format: OutputFormat,
}
