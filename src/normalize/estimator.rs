//! Outlier-robust range estimation from order statistics

use std::cmp::Ordering;

use tracing::{debug, info};

use super::NormalizeError;
use crate::config::NormalizeConfig;
use crate::types::{Range, SampleStats};

/// Which end of the sorted samples an order statistic is counted from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    Lower,
    Upper,
}

impl Tail {
    fn ordering(self) -> fn(&f32, &f32) -> Ordering {
        match self {
            Self::Lower => f32::total_cmp,
            Self::Upper => |a: &f32, b: &f32| b.total_cmp(a),
        }
    }
}

/// Number of samples trimmed from each tail: `floor(len * epsilon / 2)`
#[inline]
#[must_use]
pub fn trim_count(len: usize, epsilon: f32) -> usize {
    ((len as f64 * f64::from(epsilon)) / 2.0).floor() as usize
}

/// The `k`-th value (0-based) counted from `tail`, found by selection.
/// Reorders `samples`. Returns `None` if `k` is out of bounds.
pub fn order_statistic(samples: &mut [f32], k: usize, tail: Tail) -> Option<f32> {
    if k >= samples.len() {
        return None;
    }
    let (_, kth, _) = samples.select_nth_unstable_by(k, tail.ordering());
    Some(*kth)
}

/// Smallest and largest sample, or `None` for an empty slice
#[must_use]
pub fn extrema(samples: &[f32]) -> Option<Range> {
    if samples.is_empty() {
        return None;
    }
    let (min, max) = samples
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &val| {
            (min.min(val), max.max(val))
        });
    Some(Range::new(min, max))
}

/// Estimate the raw extrema and the operative range of `samples`.
///
/// Overridden bounds from `config` are used verbatim; the others are the
/// order statistics at the trim count from each tail. `samples` must not
/// contain NaN and is reordered.
///
/// # Errors
///
/// `NoValidSamples` for an empty sequence, `InvertedRange` if the resulting
/// minimum exceeds the maximum.
pub fn estimate(
    samples: &mut [f32],
    config: &NormalizeConfig,
) -> Result<SampleStats, NormalizeError> {
    let extrema = extrema(samples).ok_or(NormalizeError::NoValidSamples)?;
    let trim = trim_count(samples.len(), config.epsilon());
    debug!(samples = samples.len(), trim, "selecting trimmed bounds");

    let min = match config.minimum() {
        Some(min) => min,
        None => order_statistic(samples, trim, Tail::Lower).ok_or(NormalizeError::NoValidSamples)?,
    };
    let max = match config.maximum() {
        Some(max) => max,
        None => order_statistic(samples, trim, Tail::Upper).ok_or(NormalizeError::NoValidSamples)?,
    };

    if max < min {
        return Err(NormalizeError::InvertedRange { min, max });
    }

    info!(
        extrema = %extrema,
        "Normalizing range {min} - {max}"
    );

    Ok(SampleStats {
        count: samples.len(),
        extrema,
        operative: Range::new(min, max),
    })
}
