//! Rate and cumulative conversion.
//!
//! Both functions start from zero at the first sample. Rates are treated as
//! constant backwards over each interval.

use crate::{InterpError, InterpResult};

fn check(times: &[f64], values: &[f64]) -> InterpResult<()> {
    if times.len() != values.len() {
        return Err(InterpError::LengthMismatch {
            times: times.len(),
            values: values.len(),
        });
    }
    Ok(())
}

/// `cum[i] = cum[i-1] + rate[i] * (t[i] - t[i-1])`, `cum[0] = 0`.
pub fn cumulative_from_rate(times: &[f64], rates: &[f64]) -> InterpResult<Vec<f64>> {
    check(times, rates)?;
    let mut out = Vec::with_capacity(rates.len());
    let mut acc = 0.0;
    for i in 0..rates.len() {
        if i > 0 {
            acc += rates[i] * (times[i] - times[i - 1]);
        }
        out.push(acc);
    }
    Ok(out)
}

/// `rate[i] = (cum[i] - cum[i-1]) / (t[i] - t[i-1])`, `rate[0] = 0`.
///
/// Equal consecutive times have no defined rate and are rejected.
pub fn rate_from_cumulative(times: &[f64], cumulative: &[f64]) -> InterpResult<Vec<f64>> {
    check(times, cumulative)?;
    let mut out = Vec::with_capacity(cumulative.len());
    for i in 0..cumulative.len() {
        if i == 0 {
            out.push(0.0);
            continue;
        }
        let dt = times[i] - times[i - 1];
        if dt == 0.0 {
            return Err(InterpError::RepeatedTimestamp { index: i });
        }
        out.push((cumulative[i] - cumulative[i - 1]) / dt);
    }
    Ok(out)
}
