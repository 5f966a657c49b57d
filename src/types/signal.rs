//! Multi-axis signal container and the shared time axis

use serde::{Deserialize, Serialize};

use crate::config::WaveformParams;
use crate::synthesis::SynthesisError;

/// Number of physical channels in every signal (3 acc + 3 gyro)
pub const CHANNEL_COUNT: usize = 6;

// ============================================================================
// Channel
// ============================================================================

/// One measured axis, in output column order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    AccX,
    AccY,
    AccZ,
    GyroX,
    GyroY,
    GyroZ,
}

impl Channel {
    /// All channels in column order
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::AccX,
        Channel::AccY,
        Channel::AccZ,
        Channel::GyroX,
        Channel::GyroY,
        Channel::GyroZ,
    ];

    /// Column index inside a signal row
    pub const fn index(self) -> usize {
        match self {
            Channel::AccX => 0,
            Channel::AccY => 1,
            Channel::AccZ => 2,
            Channel::GyroX => 3,
            Channel::GyroY => 4,
            Channel::GyroZ => 5,
        }
    }

    /// Column name used in exported tables
    pub const fn name(self) -> &'static str {
        match self {
            Channel::AccX => "acc_x",
            Channel::AccY => "acc_y",
            Channel::AccZ => "acc_z",
            Channel::GyroX => "gyro_x",
            Channel::GyroY => "gyro_y",
            Channel::GyroZ => "gyro_z",
        }
    }

    pub const fn is_gyro(self) -> bool {
        matches!(self, Channel::GyroX | Channel::GyroY | Channel::GyroZ)
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Signal
// ============================================================================

/// A fixed-length 6-axis trace, stored row-major (one row per timestep).
///
/// Generators never hand out a signal of the wrong length: every constructor
/// path used by `synthesis` ends with [`Signal::ensure_shape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    rows: Vec<[f64; CHANNEL_COUNT]>,
}

impl Signal {
    /// All-zero signal with `len` rows
    pub fn zeros(len: usize) -> Self {
        Self {
            rows: vec![[0.0; CHANNEL_COUNT]; len],
        }
    }

    pub fn from_rows(rows: Vec<[f64; CHANNEL_COUNT]>) -> Self {
        Self { rows }
    }

    /// Build a signal from six equally long columns.
    pub fn from_columns(columns: [Vec<f64>; CHANNEL_COUNT]) -> Result<Self, SynthesisError> {
        let len = columns[0].len();
        if let Some(bad) = columns.iter().find(|c| c.len() != len) {
            return Err(SynthesisError::ShapeMismatch {
                expected_rows: len,
                actual_rows: bad.len(),
            });
        }

        let rows = (0..len)
            .map(|i| std::array::from_fn(|ch| columns[ch][i]))
            .collect();
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[[f64; CHANNEL_COUNT]] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64; CHANNEL_COUNT]> {
        self.rows.get(index)
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [[f64; CHANNEL_COUNT]] {
        &mut self.rows
    }

    /// Values of one channel over time
    pub fn channel(&self, channel: Channel) -> impl Iterator<Item = f64> + '_ {
        let idx = channel.index();
        self.rows.iter().map(move |row| row[idx])
    }

    /// Row index of the largest value on `channel` (first one on ties)
    pub fn argmax(&self, channel: Channel) -> Option<usize> {
        self.channel(channel)
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| i)
    }

    /// Fail unless the signal has exactly `expected_rows` rows.
    pub fn ensure_shape(&self, expected_rows: usize) -> Result<(), SynthesisError> {
        if self.rows.len() == expected_rows {
            Ok(())
        } else {
            Err(SynthesisError::ShapeMismatch {
                expected_rows,
                actual_rows: self.rows.len(),
            })
        }
    }

    /// Elementwise sum of two signals of equal length. Neither input is modified.
    pub fn superimpose(&self, other: &Signal) -> Result<Signal, SynthesisError> {
        other.ensure_shape(self.len())?;
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| std::array::from_fn(|ch| a[ch] + b[ch]))
            .collect();
        Ok(Signal { rows })
    }

    /// Hard cut along the time axis: rows `..at` from `head`, rows `at..` from `tail`.
    ///
    /// Both inputs must share a length, and `at` must leave both parts non-empty.
    pub fn splice(head: &Signal, tail: &Signal, at: usize) -> Result<Signal, SynthesisError> {
        tail.ensure_shape(head.len())?;
        if at == 0 || at >= head.len() {
            return Err(SynthesisError::InvalidSplit { at, len: head.len() });
        }

        let mut rows = Vec::with_capacity(head.len());
        rows.extend_from_slice(&head.rows[..at]);
        rows.extend_from_slice(&tail.rows[at..]);
        Ok(Signal { rows })
    }
}

// ============================================================================
// Time Axis
// ============================================================================

/// Per-sample timestamps, `t_i = i / sample_rate` for `i in 0..n_points`.
///
/// Built once per run and shared read-only by every sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    values: Vec<f64>,
    sample_rate_hz: f64,
}

impl TimeAxis {
    pub fn new(params: &WaveformParams) -> Self {
        let n = params.n_points();
        let rate = params.sample_rate_hz;
        // Divide per index so printed values stay clean (0.07, not 0.07000000000000001)
        let values = (0..n).map(|i| i as f64 / rate).collect();
        Self {
            values,
            sample_rate_hz: rate,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// Window length in seconds (one interval past the last timestamp)
    pub fn duration(&self) -> f64 {
        self.values.len() as f64 / self.sample_rate_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize, offset: f64) -> Signal {
        Signal::from_rows(
            (0..len)
                .map(|i| [i as f64 + offset; CHANNEL_COUNT])
                .collect(),
        )
    }

    #[test]
    fn test_channel_indices_match_column_order() {
        for (i, ch) in Channel::ALL.iter().enumerate() {
            assert_eq!(ch.index(), i);
        }
        assert_eq!(Channel::AccZ.name(), "acc_z");
        assert!(Channel::GyroY.is_gyro());
        assert!(!Channel::AccY.is_gyro());
    }

    #[test]
    fn test_time_axis_default_window() {
        let axis = TimeAxis::new(&WaveformParams::default());
        assert_eq!(axis.len(), 200);
        assert_eq!(axis.get(0), Some(0.0));
        assert_eq!(axis.get(1), Some(0.01));
        assert_eq!(axis.get(199), Some(1.99));
        assert!((axis.duration() - 2.0).abs() < 1e-12);

        for pair in axis.values().windows(2) {
            assert!((pair[1] - pair[0] - 0.01).abs() < 1e-12);
        }
    }

    #[test]
    fn test_superimpose_leaves_inputs_untouched() {
        let a = ramp(4, 0.0);
        let b = ramp(4, 10.0);
        let sum = a.superimpose(&b).unwrap();

        assert_eq!(sum.row(3), Some(&[16.0; CHANNEL_COUNT]));
        assert_eq!(a, ramp(4, 0.0));
        assert_eq!(b, ramp(4, 10.0));
    }

    #[test]
    fn test_superimpose_rejects_length_mismatch() {
        let err = ramp(4, 0.0).superimpose(&ramp(5, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::ShapeMismatch { expected_rows: 4, actual_rows: 5 }
        ));
    }

    #[test]
    fn test_splice_is_hard_cut() {
        let head = ramp(6, 0.0);
        let tail = ramp(6, 100.0);
        let spliced = Signal::splice(&head, &tail, 3).unwrap();

        let acc_z: Vec<f64> = spliced.channel(Channel::AccZ).collect();
        assert_eq!(acc_z, vec![0.0, 1.0, 2.0, 103.0, 104.0, 105.0]);
    }

    #[test]
    fn test_splice_rejects_degenerate_cut() {
        let s = ramp(4, 0.0);
        assert!(Signal::splice(&s, &s, 0).is_err());
        assert!(Signal::splice(&s, &s, 4).is_err());
    }

    #[test]
    fn test_from_columns_and_argmax() {
        let mut cols: [Vec<f64>; CHANNEL_COUNT] = Default::default();
        for col in &mut cols {
            *col = vec![0.0; 5];
        }
        cols[Channel::GyroX.index()][3] = 7.5;

        let s = Signal::from_columns(cols).unwrap();
        assert_eq!(s.len(), 5);
        assert_eq!(s.argmax(Channel::GyroX), Some(3));
        assert_eq!(s.argmax(Channel::AccX), Some(0));
    }

    #[test]
    fn test_from_columns_rejects_ragged() {
        let mut cols: [Vec<f64>; CHANNEL_COUNT] = Default::default();
        for col in &mut cols {
            *col = vec![0.0; 5];
        }
        cols[4].pop();
        assert!(Signal::from_columns(cols).is_err());
    }
}
