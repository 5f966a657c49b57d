//! Signal synthesis - per-class waveform models and their composition
//!
//! Every generator takes the run's `WaveformParams`, the shared `TimeAxis`
//! and an explicit random source, and returns one `n_points x 6` `Signal`:
//!
//! - **base**: smooth (noise only) and irregular (multi-tone vibration + noise)
//! - **impulse**: the correlated pothole transient on a zero carrier
//! - **composite**: pothole on smooth, pothole on irregular, smooth to irregular

mod base;
mod composite;
mod impulse;

pub use base::{irregular, smooth};
pub use composite::{pothole, pothole_in_irregular, smooth_to_irregular};
pub use impulse::{pothole_impulse, pothole_impulse_at, ImpactProfile, ImpactSpike};

use rand::Rng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

use crate::config::WaveformParams;
use crate::types::{GeneratorKind, Signal, TimeAxis};

/// Errors raised while building a signal
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Signal has {actual_rows} rows, expected {expected_rows}")]
    ShapeMismatch { expected_rows: usize, actual_rows: usize },

    #[error("Cannot split a {len}-row signal at row {at}")]
    InvalidSplit { at: usize, len: usize },

    #[error("Invalid noise distribution: {0}")]
    InvalidNoise(String),

    #[error("Window of {0}s leaves no room for an impact")]
    InvalidWindow(f64),
}

/// Produce one signal of the given kind.
///
/// The result is checked against the time axis length before it is returned,
/// so a malformed signal never reaches the dataset.
pub fn generate<R: Rng + ?Sized>(
    kind: GeneratorKind,
    params: &WaveformParams,
    time: &TimeAxis,
    rng: &mut R,
) -> Result<Signal, SynthesisError> {
    let signal = match kind {
        GeneratorKind::Smooth => smooth(params, time, rng)?,
        GeneratorKind::Irregular => irregular(params, time, rng)?,
        GeneratorKind::Pothole => pothole(params, time, rng)?,
        GeneratorKind::PotholeInIrregular => pothole_in_irregular(params, time, rng)?,
        GeneratorKind::SmoothToIrregular => smooth_to_irregular(params, time, rng)?,
    };
    signal.ensure_shape(time.len())?;
    Ok(signal)
}

/// `len` i.i.d. draws from N(mean, sigma)
pub(crate) fn gaussian<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    mean: f64,
    sigma: f64,
) -> Result<Vec<f64>, SynthesisError> {
    let normal = Normal::new(mean, sigma).map_err(|e| SynthesisError::InvalidNoise(e.to_string()))?;
    Ok((0..len).map(|_| normal.sample(rng)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Channel, CHANNEL_COUNT};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_kind_has_reference_shape() {
        let params = WaveformParams::default();
        let time = params.time_axis();
        let mut rng = StdRng::seed_from_u64(1);

        for kind in GeneratorKind::ALL {
            let signal = generate(kind, &params, &time, &mut rng).unwrap();
            assert_eq!(signal.len(), 200, "{kind} row count");
            assert_eq!(signal.rows()[0].len(), CHANNEL_COUNT);
            assert!(
                signal.rows().iter().flatten().all(|v| v.is_finite()),
                "{kind} produced a non-finite value"
            );
        }
    }

    #[test]
    fn test_shape_follows_custom_window() {
        let params = WaveformParams {
            sample_rate_hz: 250.0,
            window_duration_s: 1.0,
            ..Default::default()
        };
        let time = params.time_axis();
        let mut rng = StdRng::seed_from_u64(2);

        for kind in GeneratorKind::ALL {
            assert_eq!(generate(kind, &params, &time, &mut rng).unwrap().len(), 250);
        }
    }

    #[test]
    fn test_same_seed_same_signal() {
        let params = WaveformParams::default();
        let time = params.time_axis();

        for kind in GeneratorKind::ALL {
            let a = generate(kind, &params, &time, &mut StdRng::seed_from_u64(9)).unwrap();
            let b = generate(kind, &params, &time, &mut StdRng::seed_from_u64(9)).unwrap();
            let c = generate(kind, &params, &time, &mut StdRng::seed_from_u64(10)).unwrap();
            assert_eq!(a, b);
            assert_ne!(a, c);
        }
    }

    #[test]
    fn test_gaussian_rejects_bad_sigma() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            gaussian(&mut rng, 4, 0.0, f64::NAN),
            Err(SynthesisError::InvalidNoise(_))
        ));
        assert_eq!(gaussian(&mut rng, 4, 0.0, 1.0).unwrap().len(), 4);
    }

    #[test]
    fn test_pothole_peak_is_on_acc_z_gyro_x() {
        let params = WaveformParams::default();
        let time = params.time_axis();
        let mut rng = StdRng::seed_from_u64(3);
        let signal = generate(GeneratorKind::Pothole, &params, &time, &mut rng).unwrap();

        let peak_acc_z = signal.channel(Channel::AccZ).fold(f64::MIN, f64::max);
        let peak_gyro_x = signal.channel(Channel::GyroX).fold(f64::MIN, f64::max);
        assert!(peak_acc_z > 1.5, "acc_z peak {peak_acc_z}");
        assert!(peak_gyro_x > 300.0, "gyro_x peak {peak_gyro_x}");
    }
}
