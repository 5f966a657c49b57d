//! Per-label summary of a generated dataset, logged after each run

use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use tracing::info;

use super::Dataset;
use crate::types::{Channel, TerrainClass};

/// Statistics for all samples sharing one label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStats {
    pub samples: usize,
    pub rows: usize,
    /// Mean vertical acceleration (g); sits near the gravity offset
    pub acc_z_mean: f64,
    /// Sample standard deviation of vertical acceleration (g)
    pub acc_z_std: f64,
    /// Largest |gyro_x| seen (deg/s)
    pub gyro_x_peak: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_samples: usize,
    pub total_rows: usize,
    pub seed: u64,
    pub per_label: BTreeMap<TerrainClass, LabelStats>,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut acc_z: BTreeMap<TerrainClass, Vec<f64>> = BTreeMap::new();
        let mut gyro_x: BTreeMap<TerrainClass, Vec<f64>> = BTreeMap::new();
        let mut samples: BTreeMap<TerrainClass, usize> = BTreeMap::new();

        for sample in dataset.samples() {
            *samples.entry(sample.label).or_insert(0) += 1;
            acc_z
                .entry(sample.label)
                .or_default()
                .extend(sample.signal.channel(Channel::AccZ));
            gyro_x
                .entry(sample.label)
                .or_default()
                .extend(sample.signal.channel(Channel::GyroX));
        }

        let per_label = samples
            .into_iter()
            .map(|(label, count)| {
                let z = acc_z.remove(&label).unwrap_or_default();
                let gx = gyro_x.remove(&label).unwrap_or_default();
                let stats = LabelStats {
                    samples: count,
                    rows: z.len(),
                    acc_z_mean: z.iter().mean(),
                    acc_z_std: z.iter().std_dev(),
                    gyro_x_peak: gx.iter().abs_max(),
                };
                (label, stats)
            })
            .collect();

        Self {
            total_samples: dataset.sample_count(),
            total_rows: dataset.row_count(),
            seed: dataset.seed(),
            per_label,
        }
    }

    /// One info line for the run, one per label
    pub fn log(&self) {
        info!(
            samples = self.total_samples,
            rows = self.total_rows,
            seed = self.seed,
            "Dataset summary"
        );
        for (label, stats) in &self.per_label {
            info!(
                label = %label,
                samples = stats.samples,
                acc_z_mean = stats.acc_z_mean,
                acc_z_std = stats.acc_z_std,
                gyro_x_peak = stats.gyro_x_peak,
                "Label stats"
            );
        }
    }
}
