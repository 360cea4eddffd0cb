//! Range estimation and rescaling
//!
//! One run loads the reference images (the target included, each name once),
//! collects the valid samples, estimates the operative range, rescales the
//! target in place and saves it.

pub mod collector;
mod error;
pub mod estimator;
pub mod rescaler;

pub use collector::ImageSet;
pub use error::NormalizeError;

use tracing::info;

use crate::config::{NormalizeConfig, OutlierPolicy};
use crate::imgio::ImageStore;
use crate::types::{RescaleSummary, SampleStats};

/// What a run observed, for reporting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub stats: SampleStats,
    pub summary: RescaleSummary,
    pub policy: OutlierPolicy,
}

/// Normalize `config.input()` and write it to `config.output()`.
///
/// # Errors
///
/// Any load, estimation or save failure aborts the run; nothing is written
/// unless every earlier stage succeeded.
pub fn run<S: ImageStore + ?Sized>(
    store: &S,
    config: &NormalizeConfig,
) -> Result<Outcome, NormalizeError> {
    // Stage 1: Load every distinct image once
    let mut images = ImageSet::load(store, config.reference_images(), config.input())?;
    info!(images = images.len(), "loaded images");

    // Stage 2: Estimate the range
    let mut samples = images.collect_samples(config.no_value());
    let stats = estimator::estimate(&mut samples, config)?;
    drop(samples);

    // Stage 3: Rescale the shared target instance
    let target = images
        .get_mut(config.input())
        .ok_or_else(|| NormalizeError::MissingTarget(config.input().to_string()))?;
    let summary = rescaler::rescale(target, stats.operative, config.no_value(), config.policy());

    // Stage 4: Persist
    store
        .save(target, config.output())
        .map_err(|source| NormalizeError::Save {
            destination: config.output().to_string(),
            source,
        })?;

    Ok(Outcome {
        stats,
        summary,
        policy: config.policy(),
    })
}
