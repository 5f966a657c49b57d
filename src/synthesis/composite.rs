//! Composite generators built from the base generators and the impulse

use rand::Rng;

use super::{irregular, pothole_impulse, smooth, SynthesisError};
use crate::config::WaveformParams;
use crate::types::{Signal, TimeAxis};

/// Isolated pothole on flat pavement: smooth carrier plus one impulse.
pub fn pothole<R: Rng + ?Sized>(
    params: &WaveformParams,
    time: &TimeAxis,
    rng: &mut R,
) -> Result<Signal, SynthesisError> {
    let carrier = smooth(params, time, rng)?;
    let impulse = pothole_impulse(params, time, rng)?;
    carrier.superimpose(&impulse)
}

/// Pothole on rough pavement: irregular carrier plus one independent impulse.
pub fn pothole_in_irregular<R: Rng + ?Sized>(
    params: &WaveformParams,
    time: &TimeAxis,
    rng: &mut R,
) -> Result<Signal, SynthesisError> {
    let carrier = irregular(params, time, rng)?;
    let impulse = pothole_impulse(params, time, rng)?;
    carrier.superimpose(&impulse)
}

/// Paved to rough crossing: hard cut at `n_points / 2`, no cross-fade.
///
/// The first half comes from one smooth draw, the second half from one
/// irregular draw; the unused halves are discarded.
pub fn smooth_to_irregular<R: Rng + ?Sized>(
    params: &WaveformParams,
    time: &TimeAxis,
    rng: &mut R,
) -> Result<Signal, SynthesisError> {
    let split = time.len() / 2;
    let head = smooth(params, time, rng)?;
    let tail = irregular(params, time, rng)?;
    Signal::splice(&head, &tail, split)
}
