//! pavement-synth: synthetic 6-axis IMU traces of road pavement
//!
//! Generates labeled accelerometer + gyroscope windows for training terrain
//! classifiers without a physical sensor.
//!
//! ## Layout
//!
//! - **types**: terrain classes, generator kinds, signal container, time axis
//! - **config**: waveform parameters, dataset preset, output target (TOML)
//! - **synthesis**: smooth/irregular carriers, pothole impulse, composites
//! - **dataset**: generation plans, parallel batch assembly, CSV/JSONL export

pub mod config;
pub mod dataset;
pub mod synthesis;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, SynthConfig, WaveformParams};

// Re-export commonly used types
pub use types::{Channel, GeneratorKind, Signal, TerrainClass, TimeAxis, CHANNEL_COUNT};

// Re-export dataset pipeline
pub use dataset::{
    BatchAssembler, Dataset, DatasetError, DatasetSummary, GenerationPlan, OutputFormat,
    OutputTarget, Preset, Sample,
};

pub use synthesis::SynthesisError;
