//! Sample lookup.
//!
//! Times are expected to be non-decreasing. The bracket search picks the
//! first sample with `t >= q`, so for repeated times the earliest one wins.

use crate::{InterpError, InterpMode, InterpResult};

/// Borrowed `(time, value)` samples, validated for equal non-zero length.
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    times: &'a [f64],
    values: &'a [f64],
}

impl<'a> Series<'a> {
    pub fn new(times: &'a [f64], values: &'a [f64]) -> InterpResult<Self> {
        if times.len() != values.len() {
            return Err(InterpError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.is_empty() {
            return Err(InterpError::EmptySeries);
        }
        Ok(Self { times, values })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &'a [f64] {
        self.times
    }

    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Value at query time `q`.
    pub fn at(&self, q: f64, mode: InterpMode) -> f64 {
        let (t, v) = (self.times, self.values);
        let last = v.len() - 1;
        match mode {
            InterpMode::Linear => match self.first_at_or_after(q) {
                None | Some(0) => 0.0,
                Some(i) => lerp(t[i - 1], v[i - 1], t[i], v[i], q),
            },
            InterpMode::LinearVolume => match self.first_at_or_after(q) {
                None => v[last],
                Some(0) => v[0],
                Some(i) => lerp(t[i - 1], v[i - 1], t[i], v[i], q),
            },
            InterpMode::Backwards => match self.first_at_or_after(q) {
                None => 0.0,
                Some(i) => v[i],
            },
            InterpMode::Forwards => {
                for (i, &ti) in t.iter().enumerate() {
                    if q < ti {
                        return if i == 0 { 0.0 } else { v[i - 1] };
                    }
                    if q == ti {
                        return v[i];
                    }
                }
                0.0
            }
        }
    }

    /// Values at each of `targets`.
    pub fn resample(&self, targets: &[f64], mode: InterpMode) -> Vec<f64> {
        targets.iter().map(|&q| self.at(q, mode)).collect()
    }

    fn first_at_or_after(&self, q: f64) -> Option<usize> {
        self.times.iter().position(|&t| q <= t)
    }
}

fn lerp(t0: f64, v0: f64, t1: f64, v1: f64, q: f64) -> f64 {
    v0 + (v1 - v0) / (t1 - t0) * (q - t0)
}

/// Single lookup without building a [`Series`] first.
pub fn interpolate(q: f64, times: &[f64], values: &[f64], mode: InterpMode) -> InterpResult<f64> {
    Ok(Series::new(times, values)?.at(q, mode))
}

pub fn resample(
    targets: &[f64],
    times: &[f64],
    values: &[f64],
    mode: InterpMode,
) -> InterpResult<Vec<f64>> {
    Ok(Series::new(times, values)?.resample(targets, mode))
}
