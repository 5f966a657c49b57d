//! Dataset assembly - labeled samples collected into one flat table
//!
//! - `plan`: ordered kind/count lists and the two presets
//! - `assembler`: runs a plan, assigns sample ids, seeds each sample
//! - `progress`: human-readable progress, never touches generated values
//! - `export`: CSV and JSON Lines writers
//! - `summary`: per-label counts and acc_z statistics

mod assembler;
mod export;
mod plan;
mod progress;
mod summary;

pub use assembler::{sample_seed, BatchAssembler};
pub use export::{export, write_csv, write_json_lines, OutputFormat, OutputTarget, CSV_HEADER};
pub use plan::{GenerationPlan, Preset};
pub use progress::{LogProgress, ProgressReporter, SilentProgress};
pub use summary::{DatasetSummary, LabelStats};

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::synthesis::SynthesisError;
use crate::types::{GeneratorKind, Signal, TerrainClass, TimeAxis, CHANNEL_COUNT};

/// Errors while building or writing a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Sample {sample_id} ({kind}) failed: {source}")]
    Synthesis {
        sample_id: u64,
        kind: GeneratorKind,
        #[source]
        source: SynthesisError,
    },

    #[error("Invalid waveform parameters: {0}")]
    Config(String),

    #[error("Dataset invariant violated: {0}")]
    Invariant(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Sample
// ============================================================================

/// One generated signal with its id and label. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub sample_id: u64,
    pub kind: GeneratorKind,
    pub label: TerrainClass,
    pub signal: Signal,
}

/// One row of the output table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputRow {
    pub sample_id: u64,
    pub timestamp: f64,
    pub acc_x: f64,
    pub acc_y: f64,
    pub acc_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub label: &'static str,
}

impl OutputRow {
    fn new(sample: &Sample, timestamp: f64, values: &[f64; CHANNEL_COUNT]) -> Self {
        let [acc_x, acc_y, acc_z, gyro_x, gyro_y, gyro_z] = *values;
        Self {
            sample_id: sample.sample_id,
            timestamp,
            acc_x,
            acc_y,
            acc_z,
            gyro_x,
            gyro_y,
            gyro_z,
            label: sample.label.label(),
        }
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// All samples of one run plus the time axis they share.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    time_axis: TimeAxis,
    samples: Vec<Sample>,
    seed: u64,
}

impl Dataset {
    pub(crate) fn new(time_axis: TimeAxis, samples: Vec<Sample>, seed: u64) -> Self {
        Self {
            time_axis,
            samples,
            seed,
        }
    }

    pub fn time_axis(&self) -> &TimeAxis {
        &self.time_axis
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Run seed; feeding it back reproduces this dataset exactly
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn row_count(&self) -> usize {
        self.samples.len() * self.time_axis.len()
    }

    /// Rows ordered by sample id, then timestep
    pub fn rows(&self) -> impl Iterator<Item = OutputRow> + '_ {
        self.samples.iter().flat_map(move |sample| {
            self.time_axis
                .values()
                .iter()
                .zip(sample.signal.rows())
                .map(move |(&t, values)| OutputRow::new(sample, t, values))
        })
    }

    /// Samples per label, in severity order
    pub fn label_counts(&self) -> BTreeMap<TerrainClass, usize> {
        let mut counts = BTreeMap::new();
        for sample in &self.samples {
            *counts.entry(sample.label).or_insert(0) += 1;
        }
        counts
    }

    /// Check the table invariants: ids contiguous from 0 in order, every
    /// sample exactly one time axis long, label matching its kind.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let n_points = self.time_axis.len();
        for (expected_id, sample) in (0u64..).zip(&self.samples) {
            if sample.sample_id != expected_id {
                return Err(DatasetError::Invariant(format!(
                    "sample at position {expected_id} has id {}",
                    sample.sample_id
                )));
            }
            if sample.signal.len() != n_points {
                return Err(DatasetError::Invariant(format!(
                    "sample {} has {} rows, expected {n_points}",
                    sample.sample_id,
                    sample.signal.len()
                )));
            }
            if sample.label != sample.kind.label() {
                return Err(DatasetError::Invariant(format!(
                    "sample {} of kind {} labeled {}",
                    sample.sample_id, sample.kind, sample.label
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaveformParams;

    fn tiny_dataset() -> Dataset {
        let params = WaveformParams {
            sample_rate_hz: 4.0,
            window_duration_s: 1.0,
            ..Default::default()
        };
        let axis = params.time_axis();
        let samples = (0..3u64)
            .map(|id| Sample {
                sample_id: id,
                kind: GeneratorKind::SmoothToIrregular,
                label: GeneratorKind::SmoothToIrregular.label(),
                signal: Signal::from_rows(vec![[id as f64; CHANNEL_COUNT]; 4]),
            })
            .collect();
        Dataset::new(axis, samples, 0)
    }

    #[test]
    fn test_rows_are_ordered_by_id_then_time() {
        let ds = tiny_dataset();
        let rows: Vec<OutputRow> = ds.rows().collect();
        assert_eq!(rows.len(), ds.row_count());
        assert_eq!(rows.len(), 12);

        let keys: Vec<(u64, f64)> = rows.iter().map(|r| (r.sample_id, r.timestamp)).collect();
        assert_eq!(keys[0], (0, 0.0));
        assert_eq!(keys[3], (0, 0.75));
        assert_eq!(keys[4], (1, 0.0));
        assert!(rows.iter().all(|r| r.label == "irregular"));
        assert!((rows[5].gyro_z - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(tiny_dataset().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_sample() {
        let mut ds = tiny_dataset();
        ds.samples[1].signal = Signal::zeros(3);
        assert!(matches!(ds.validate(), Err(DatasetError::Invariant(_))));
    }

    #[test]
    fn test_validate_rejects_gap_in_ids() {
        let mut ds = tiny_dataset();
        ds.samples[2].sample_id = 7;
        assert!(matches!(ds.validate(), Err(DatasetError::Invariant(_))));
    }

    #[test]
    fn test_validate_rejects_wrong_label() {
        let mut ds = tiny_dataset();
        ds.samples[0].label = TerrainClass::Smooth;
        assert!(ds.validate().is_err());
    }

    #[test]
    fn test_label_counts() {
        let counts = tiny_dataset().label_counts();
        assert_eq!(counts.get(&TerrainClass::Irregular), Some(&3));
        assert_eq!(counts.get(&TerrainClass::Smooth), None);
    }
}
