//! Batch assembler: runs a generation plan into a `Dataset`
//!
//! Sample ids are fixed before any generation starts (plan order, contiguous
//! from 0, never reset per kind). Each sample draws from its own `StdRng`
//! seeded from `(run seed, sample_id)`, so samples are generated in parallel
//! with rayon and a fixed run seed gives a bit-identical table regardless of
//! thread count.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use super::{Dataset, DatasetError, GenerationPlan, LogProgress, ProgressReporter, Sample};
use crate::config::WaveformParams;
use crate::synthesis;
use crate::types::{GeneratorKind, TimeAxis};

/// Per-sample seed derived from the run seed (SplitMix64 finalizer).
pub fn sample_seed(run_seed: u64, sample_id: u64) -> u64 {
    let mut z = run_seed.wrapping_add(sample_id.wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Builds datasets from generation plans.
pub struct BatchAssembler {
    params: WaveformParams,
    seed: Option<u64>,
    progress: Box<dyn ProgressReporter>,
}

impl BatchAssembler {
    /// Assembler with no fixed seed that logs progress through `tracing`
    pub fn new(params: WaveformParams) -> Self {
        Self {
            params,
            seed: None,
            progress: Box::new(LogProgress::new()),
        }
    }

    /// Fix the run seed. `None` draws one from OS entropy on each run.
    #[must_use]
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn progress(mut self, reporter: impl ProgressReporter + 'static) -> Self {
        self.progress = Box::new(reporter);
        self
    }

    pub fn params(&self) -> &WaveformParams {
        &self.params
    }

    /// Generate every sample of `plan`, in plan order.
    ///
    /// Fails before generating anything if the waveform parameters are
    /// invalid; any generator failure aborts the whole batch.
    pub fn run(&mut self, plan: &GenerationPlan) -> Result<Dataset, DatasetError> {
        self.params
            .validate()
            .map_err(|e| DatasetError::Config(e.to_string().trim_end().to_string()))?;

        let run_seed = match self.seed {
            Some(seed) => seed,
            None => {
                let seed = StdRng::from_entropy().gen::<u64>();
                info!(seed, "No seed given, drew run seed from OS entropy");
                seed
            }
        };

        let time = self.params.time_axis();
        let total = plan.total_samples();
        let mut samples: Vec<Sample> = Vec::with_capacity(total);

        self.progress.begin(plan.entries().len(), total);

        let mut next_id: u64 = 0;
        for (done, &(kind, count)) in plan.entries().iter().enumerate() {
            let first_id = next_id;
            let batch = generate_batch(kind, first_id, count, run_seed, &self.params, &time)?;
            next_id += batch.len() as u64;

            debug!(kind = %kind, first_id, last_id = next_id.saturating_sub(1), "Batch generated");
            samples.extend(batch);
            self.progress.kind_finished(kind, count, done + 1);
        }

        self.progress.finish();

        let dataset = Dataset::new(time, samples, run_seed);
        dataset.validate()?;
        Ok(dataset)
    }
}

fn generate_batch(
    kind: GeneratorKind,
    first_id: u64,
    count: usize,
    run_seed: u64,
    params: &WaveformParams,
    time: &TimeAxis,
) -> Result<Vec<Sample>, DatasetError> {
    let label = kind.label();
    (0..count)
        .into_par_iter()
        .map(|offset| -> Result<Sample, DatasetError> {
            let sample_id = first_id + offset as u64;
            let mut rng = StdRng::seed_from_u64(sample_seed(run_seed, sample_id));
            let signal = synthesis::generate(kind, params, time, &mut rng).map_err(|source| {
                DatasetError::Synthesis {
                    sample_id,
                    kind,
                    source,
                }
            })?;
            Ok(Sample {
                sample_id,
                kind,
                label,
                signal,
            })
        })
        .collect()
}
