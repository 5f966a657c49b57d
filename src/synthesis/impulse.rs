//! Pothole impulse: a correlated 6-axis Gaussian-envelope burst on a zero carrier
//!
//! The impulse is built on its own so it can be superimposed on any carrier
//! signal (smooth or irregular) with `Signal::superimpose`.

use rand::Rng;

use super::SynthesisError;
use crate::config::WaveformParams;
use crate::types::{Channel, Signal, TimeAxis, CHANNEL_COUNT};

/// Contribution of the impact to one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactSpike {
    pub channel: Channel,
    /// Peak value, sign gives direction
    pub amplitude: f64,
    /// Delay after the main impact (seconds)
    pub lag_s: f64,
}

/// Shape of a pothole strike across all six channels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactProfile {
    pub spikes: [ImpactSpike; CHANNEL_COUNT],
    /// Envelope σ for acceleration channels (seconds)
    pub acc_sigma_s: f64,
    /// Envelope σ for gyro channels (seconds), wider than the linear jolt
    pub gyro_sigma_s: f64,
    /// Impact time is drawn from this fraction range of the window
    pub impact_window: (f64, f64),
}

/// Mechanical lag of the lateral / roll response behind the vertical hit
const LATERAL_LAG_S: f64 = 0.005;

impl Default for ImpactProfile {
    fn default() -> Self {
        let spike = |channel, amplitude, lag_s| ImpactSpike {
            channel,
            amplitude,
            lag_s,
        };
        Self {
            spikes: [
                // Vertical jolt, largest linear response
                spike(Channel::AccZ, 3.5, 0.0),
                // Forward deceleration
                spike(Channel::AccX, -2.0, 0.0),
                // Lateral sway
                spike(Channel::AccY, 1.5, LATERAL_LAG_S),
                // Pitch
                spike(Channel::GyroX, 450.0, 0.0),
                // Roll
                spike(Channel::GyroY, -300.0, LATERAL_LAG_S),
                // Yaw
                spike(Channel::GyroZ, 100.0, 0.0),
            ],
            acc_sigma_s: 0.022,
            gyro_sigma_s: 0.025,
            impact_window: (0.3, 0.7),
        }
    }
}

impl ImpactProfile {
    fn sigma_for(&self, channel: Channel) -> f64 {
        if channel.is_gyro() {
            self.gyro_sigma_s
        } else {
            self.acc_sigma_s
        }
    }

    /// Earliest and latest impact time for a window of `duration_s`
    pub fn impact_bounds(&self, duration_s: f64) -> (f64, f64) {
        (
            duration_s * self.impact_window.0,
            duration_s * self.impact_window.1,
        )
    }
}

fn gaussian_envelope(t: f64, center: f64, sigma: f64) -> f64 {
    (-(t - center).powi(2) / (2.0 * sigma * sigma)).exp()
}

/// Deterministic impulse centered at `impact_s`.
pub fn pothole_impulse_at(time: &TimeAxis, impact_s: f64) -> Signal {
    let profile = ImpactProfile::default();
    let mut signal = Signal::zeros(time.len());

    for spike in &profile.spikes {
        let sigma = profile.sigma_for(spike.channel);
        let center = impact_s + spike.lag_s;
        let idx = spike.channel.index();
        for (row, &t) in signal.rows_mut().iter_mut().zip(time.values()) {
            row[idx] += spike.amplitude * gaussian_envelope(t, center, sigma);
        }
    }

    signal
}

/// Impulse at a uniformly drawn time in the middle 40% of the window.
pub fn pothole_impulse<R: Rng + ?Sized>(
    params: &WaveformParams,
    time: &TimeAxis,
    rng: &mut R,
) -> Result<Signal, SynthesisError> {
    let (lo, hi) = ImpactProfile::default().impact_bounds(params.window_duration_s);
    if !(lo < hi) {
        return Err(SynthesisError::InvalidWindow(params.window_duration_s));
    }
    let impact_s = rng.gen_range(lo..hi);
    Ok(pothole_impulse_at(time, impact_s))
}
