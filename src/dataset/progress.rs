//! Progress reporting for the batch loop

use std::time::Instant;
use tracing::info;

use crate::types::GeneratorKind;

/// Observer of a batch run. Called from the assembling thread only.
pub trait ProgressReporter: Send {
    /// Run is starting with `total_kinds` plan entries and `total_samples` samples
    fn begin(&mut self, total_kinds: usize, total_samples: usize);

    /// One plan entry finished; `done_kinds` counts entries completed so far
    fn kind_finished(&mut self, kind: GeneratorKind, produced: usize, done_kinds: usize);

    fn finish(&mut self);
}

/// Emits `tracing` info lines, one per finished kind.
#[derive(Debug, Default)]
pub struct LogProgress {
    total_kinds: usize,
    started: Option<Instant>,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for LogProgress {
    fn begin(&mut self, total_kinds: usize, total_samples: usize) {
        self.total_kinds = total_kinds;
        self.started = Some(Instant::now());
        info!(kinds = total_kinds, samples = total_samples, "Generating signal types");
    }

    fn kind_finished(&mut self, kind: GeneratorKind, produced: usize, done_kinds: usize) {
        let percent = if self.total_kinds == 0 {
            100
        } else {
            done_kinds * 100 / self.total_kinds
        };
        info!(
            kind = %kind,
            label = %kind.label(),
            samples = produced,
            "Signal types: {}/{} ({}%)",
            done_kinds,
            self.total_kinds,
            percent
        );
    }

    fn finish(&mut self) {
        let elapsed = self.started.map(|s| s.elapsed().as_secs_f64()).unwrap_or_default();
        info!(elapsed_s = elapsed, "Generation complete");
    }
}

/// Reports nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn begin(&mut self, _total_kinds: usize, _total_samples: usize) {}

    fn kind_finished(&mut self, _kind: GeneratorKind, _produced: usize, _done_kinds: usize) {}

    fn finish(&mut self) {}
}
