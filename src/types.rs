//! Domain types shared by the I/O layer and the normalization pipeline

use std::fmt;

/// Image dimensions in pixels plus the number of interleaved channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    /// Number of scalar values (pixels times channels)
    #[inline]
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.width * self.height * self.channels
    }

    /// `value_count`, or `None` if the product overflows
    #[inline]
    #[must_use]
    pub fn checked_value_count(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(self.channels)
    }

    #[inline]
    #[must_use]
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && matches!(self.channels, 1 | 3)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{width}x{height}x{channels}",
            width = self.width,
            height = self.height,
            channels = self.channels
        )
    }
}

/// A mutable image of 32-bit float values, stored row-major and top-to-bottom
/// with channels interleaved.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatImage {
    dimensions: Dimensions,
    data: Vec<f32>,
}

impl FloatImage {
    /// Wrap `data` as an image; returns `None` if the length does not match
    /// the dimensions.
    #[must_use]
    pub fn from_raw(dimensions: Dimensions, data: Vec<f32>) -> Option<Self> {
        (Some(data.len()) == dimensions.checked_value_count()).then_some(Self { dimensions, data })
    }

    /// Single-channel image with one row, handy for flat sample data.
    #[must_use]
    pub fn from_values(data: Vec<f32>) -> Self {
        Self {
            dimensions: Dimensions::new(data.len(), 1, 1),
            data,
        }
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    #[must_use]
    pub fn at(&self, index: usize) -> Option<f32> {
        self.data.get(index).copied()
    }
}

/// A closed value interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Width of the range, in f64 so finite bounds never overflow
    #[inline]
    #[must_use]
    pub fn delta(&self) -> f64 {
        f64::from(self.max) - f64::from(self.min)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.delta() == 0.0
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{min} - {max}", min = self.min, max = self.max)
    }
}

/// Statistics estimated from the sample sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    /// Number of valid (non-sentinel, non-NaN) samples
    pub count: usize,
    /// Raw extrema of the samples, reported only
    pub extrema: Range,
    /// Range used for rescaling
    pub operative: Range,
}

/// Outcome of rescaling the target image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RescaleSummary {
    pub rescaled: usize,
    pub skipped: usize,
    pub below: usize,
    pub above: usize,
}

impl RescaleSummary {
    #[inline]
    #[must_use]
    pub fn outliers(&self) -> usize {
        self.below + self.above
    }
}
