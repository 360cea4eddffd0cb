//! Mapping the target image into [0, 1]

use tracing::info;

use super::collector::is_no_value;
use crate::config::OutlierPolicy;
use crate::types::{FloatImage, Range, RescaleSummary};

/// What happened to a single value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Disposition {
    /// Sentinel, left untouched
    Skipped,
    Rescaled(f32),
    /// Outlier above the range, with its replacement
    Above(f32),
    /// Outlier below the range (or NaN), with its replacement
    Below(f32),
}

/// Rescale one value. The sentinel check comes first, so a sentinel lying
/// inside the range is still skipped. With a zero-width range the value
/// equal to both bounds maps to 0.0.
#[inline]
#[must_use]
pub fn rescale_value(value: f32, range: Range, no_value: f32, policy: OutlierPolicy) -> Disposition {
    if is_no_value(value, no_value) {
        return Disposition::Skipped;
    }

    if value >= range.min {
        if value <= range.max {
            // f64 keeps the difference finite for any pair of finite bounds
            let delta = range.delta();
            let scaled = if delta > 0.0 {
                ((f64::from(value) - f64::from(range.min)) / delta) as f32
            } else {
                0.0
            };
            Disposition::Rescaled(scaled)
        } else {
            Disposition::Above(match policy {
                OutlierPolicy::Clamp => 1.0,
                OutlierPolicy::Discard => no_value,
            })
        }
    } else {
        Disposition::Below(match policy {
            OutlierPolicy::Clamp => 0.0,
            OutlierPolicy::Discard => no_value,
        })
    }
}

/// Rescale every value of `image` in place
pub fn rescale(
    image: &mut FloatImage,
    range: Range,
    no_value: f32,
    policy: OutlierPolicy,
) -> RescaleSummary {
    let mut summary = RescaleSummary::default();

    for value in image.values_mut() {
        match rescale_value(*value, range, no_value, policy) {
            Disposition::Skipped => summary.skipped += 1,
            Disposition::Rescaled(scaled) => {
                *value = scaled;
                summary.rescaled += 1;
            }
            Disposition::Above(replacement) => {
                *value = replacement;
                summary.above += 1;
            }
            Disposition::Below(replacement) => {
                *value = replacement;
                summary.below += 1;
            }
        }
    }

    info!(
        below = summary.below,
        above = summary.above,
        "{policy} {} outliers",
        summary.outliers()
    );
    summary
}
