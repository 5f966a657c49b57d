//! System-wide default constants.
//!
//! The fixed waveform and dataset parameters live here so every generator
//! and every default config value reads from one place.

// ============================================================================
// Waveform
// ============================================================================

/// IMU sample rate (Hz).
pub const SAMPLE_RATE_HZ: f64 = 100.0;

/// Length of one sample window (seconds). 2 s at 100 Hz = 200 points.
pub const WINDOW_DURATION_S: f64 = 2.0;

/// Static offset on acc_z, in g. Negative because the sensor's Z axis points up.
pub const GRAVITY: f64 = -1.0;

/// Fewest points a window may have; the transition generator splits it in two.
pub const MIN_WINDOW_POINTS: usize = 2;

/// Sample rates outside this band are legal but produce a range warning.
/// Below 50 Hz the 25 Hz vibration component aliases.
pub const TYPICAL_SAMPLE_RATE_HZ: (f64, f64) = (50.0, 2_000.0);

// ============================================================================
// Dataset presets
// ============================================================================

/// Samples per class in the three-class baseline dataset.
pub const BASELINE_SAMPLES_PER_CLASS: usize = 2_000;

/// Samples per primitive kind in the composite dataset.
pub const COMPOSITE_BASE_SAMPLES: usize = 1_500;

/// Samples per composite kind in the composite dataset.
pub const COMPOSITE_MIXED_SAMPLES: usize = 1_000;

/// Output file written by the baseline preset.
pub const BASELINE_OUTPUT_FILE: &str = "pavement_simulation_data.csv";

/// Output file written by the composite preset.
pub const COMPOSITE_OUTPUT_FILE: &str = "pavement_simulation_data_realista.csv";

// ============================================================================
// Config discovery
// ============================================================================

/// Environment variable holding an explicit config path.
pub const CONFIG_ENV_VAR: &str = "PAVEMENT_SYNTH_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "synth_config.toml";
