//! Base terrain generators: smooth pavement and irregular pavement

use rand::Rng;
use std::f64::consts::PI;

use super::{gaussian, SynthesisError};
use crate::config::WaveformParams;
use crate::types::{Channel, Signal, TimeAxis, CHANNEL_COUNT};

// ============================================================================
// Noise and vibration model
// ============================================================================

/// Smooth pavement noise σ per channel (acc in g, gyro in deg/s)
const SMOOTH_NOISE_SIGMA: [f64; CHANNEL_COUNT] = [0.03, 0.03, 0.04, 2.5, 2.5, 2.5];

/// Irregular pavement noise σ per channel, larger than smooth on every axis
const IRREGULAR_NOISE_SIGMA: [f64; CHANNEL_COUNT] = [0.1, 0.15, 0.2, 15.0, 15.0, 15.0];

/// One sinusoidal vibration component
#[derive(Debug, Clone, Copy)]
struct Tone {
    amplitude: f64,
    freq_hz: f64,
}

impl Tone {
    const fn new(amplitude: f64, freq_hz: f64) -> Self {
        Self { amplitude, freq_hz }
    }

    fn at(self, t: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.freq_hz * t).sin()
    }
}

/// Vibration tones per channel. acc_z mixes two tones so no single frequency
/// identifies the class; gyro amplitudes are an order of magnitude above acc.
const IRREGULAR_TONES: [&[Tone]; CHANNEL_COUNT] = [
    &[],
    &[Tone::new(0.3, 15.0)],
    &[Tone::new(0.4, 18.0), Tone::new(0.2, 25.0)],
    &[Tone::new(40.0, 10.0)],
    &[Tone::new(25.0, 12.0)],
    &[Tone::new(30.0, 8.0)],
];

/// Constant offset per channel: gravity on acc_z, zero elsewhere
fn channel_offset(params: &WaveformParams, channel: Channel) -> f64 {
    if channel == Channel::AccZ {
        params.gravity
    } else {
        0.0
    }
}

// ============================================================================
// Generators
// ============================================================================

/// Flat pavement: i.i.d. Gaussian noise only.
pub fn smooth<R: Rng + ?Sized>(
    params: &WaveformParams,
    time: &TimeAxis,
    rng: &mut R,
) -> Result<Signal, SynthesisError> {
    let n = time.len();
    let mut columns: [Vec<f64>; CHANNEL_COUNT] = Default::default();
    for ch in Channel::ALL {
        columns[ch.index()] = gaussian(
            rng,
            n,
            channel_offset(params, ch),
            SMOOTH_NOISE_SIGMA[ch.index()],
        )?;
    }
    Signal::from_columns(columns)
}

/// Rough pavement: deterministic multi-tone vibration plus channel noise.
pub fn irregular<R: Rng + ?Sized>(
    params: &WaveformParams,
    time: &TimeAxis,
    rng: &mut R,
) -> Result<Signal, SynthesisError> {
    let n = time.len();
    let mut columns: [Vec<f64>; CHANNEL_COUNT] = Default::default();
    for ch in Channel::ALL {
        let tones = IRREGULAR_TONES[ch.index()];
        let noise = gaussian(
            rng,
            n,
            channel_offset(params, ch),
            IRREGULAR_NOISE_SIGMA[ch.index()],
        )?;
        columns[ch.index()] = time
            .values()
            .iter()
            .zip(noise)
            .map(|(&t, base)| base + tones.iter().map(|tone| tone.at(t)).sum::<f64>())
            .collect();
    }
    Signal::from_columns(columns)
}
