//! Loading the reference images and gathering valid samples from them

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::NormalizeError;
use crate::imgio::ImageStore;
use crate::types::FloatImage;

/// True if `value` is the no-value sentinel. Equality is exact; a NaN
/// sentinel matches NaN values.
#[inline]
#[must_use]
pub fn is_no_value(value: f32, no_value: f32) -> bool {
    value == no_value || (no_value.is_nan() && value.is_nan())
}

/// Loaded images keyed by name, each loaded exactly once
#[derive(Debug, Default)]
pub struct ImageSet {
    images: BTreeMap<String, FloatImage>,
}

impl ImageSet {
    /// Load every distinct name in `references` plus `target`.
    ///
    /// # Errors
    ///
    /// Fails on the first image that cannot be loaded.
    pub fn load<S: ImageStore + ?Sized>(
        store: &S,
        references: &[String],
        target: &str,
    ) -> Result<Self, NormalizeError> {
        let mut images = BTreeMap::new();
        let names = references.iter().map(String::as_str).chain(std::iter::once(target));

        for name in names {
            if images.contains_key(name) {
                debug!(name, "already loaded");
                continue;
            }
            let image = store.load(name).map_err(|source| NormalizeError::Load {
                name: name.to_string(),
                source,
            })?;
            images.insert(name.to_string(), image);
        }

        Ok(Self { images })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FloatImage> {
        self.images.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FloatImage> {
        self.images.get_mut(name)
    }

    /// All values of all images except the sentinel and NaN
    #[must_use]
    pub fn collect_samples(&self, no_value: f32) -> Vec<f32> {
        let capacity = self.images.values().map(FloatImage::value_count).sum();
        let mut samples = Vec::with_capacity(capacity);

        for image in self.images.values() {
            samples.extend(
                image
                    .values()
                    .iter()
                    .copied()
                    .filter(|&value| !is_no_value(value, no_value) && !value.is_nan()),
            );
        }

        info!(
            images = self.images.len(),
            "{} valid values",
            samples.len()
        );
        samples
    }
}
