//! Config validation: unknown-key detection with Levenshtein suggestions
//! and plausibility range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Unknown keys never break a config.

use std::collections::HashSet;

use super::defaults;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `SynthConfig`.
///
/// Kept in step with the structs in synth_config.rs by hand.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [waveform]
        "waveform",
        "waveform.sample_rate_hz",
        "waveform.window_duration_s",
        "waveform.gravity",
        // [dataset]
        "dataset",
        "dataset.preset",
        "dataset.seed",
        // [output]
        "output",
        "output.path",
        "output.format",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties go to the lexicographically smaller key so the suggestion is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // serde reports the parse error later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Plausibility checks on a parsed config.
///
/// Returns (errors, warnings). Hard limits (positivity, finiteness) are
/// enforced by `WaveformParams::validate`; this only flags values that are
/// legal but unlike any real IMU.
pub fn validate_physical_ranges(
    config: &super::SynthConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let errors = Vec::new();
    let mut warnings = Vec::new();

    let w = &config.waveform;
    let (lo, hi) = defaults::TYPICAL_SAMPLE_RATE_HZ;
    if w.sample_rate_hz.is_finite()
        && w.sample_rate_hz > 0.0
        && !(lo..=hi).contains(&w.sample_rate_hz)
    {
        warnings.push(ValidationWarning {
            field: "waveform.sample_rate_hz".to_string(),
            message: format!(
                "sample_rate_hz = {:.1} is outside typical IMU range ({lo:.0}-{hi:.0} Hz)",
                w.sample_rate_hz
            ),
            suggestion: None,
        });
    }

    // Gravity is in g; anything far from 1 g in magnitude is a units mistake
    if w.gravity.is_finite() && !(0.5..=2.0).contains(&w.gravity.abs()) {
        warnings.push(ValidationWarning {
            field: "waveform.gravity".to_string(),
            message: format!(
                "gravity = {:.2} looks wrong, expected about -1.0 g (values are in g, not m/s^2)",
                w.gravity
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
