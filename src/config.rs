//! Validated normalization settings

use std::fmt;
use thiserror::Error;

/// Value marking missing data unless overridden with `--ignore`
pub const DEFAULT_NO_VALUE: f32 = -1.0;

/// How values outside the operative range are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutlierPolicy {
    /// Saturate to 0.0 or 1.0
    Clamp,
    /// Replace with the no-value sentinel
    #[default]
    Discard,
}

impl OutlierPolicy {
    #[must_use]
    pub fn from_clamp_flag(clamp: bool) -> Self {
        if clamp { Self::Clamp } else { Self::Discard }
    }
}

impl fmt::Display for OutlierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clamp => write!(f, "Clamped"),
            Self::Discard => write!(f, "Removed"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("epsilon is supposed to be in the interval [0.0, 1.0], got {0}")]
    EpsilonOutOfRange(f32),

    #[error("{name} must be a finite number, got {value}")]
    NonFiniteBound { name: &'static str, value: f32 },

    #[error("minimum ({min}) has to be smaller than maximum ({max})")]
    InvertedBounds { min: f32, max: f32 },

    #[error("image list contains an empty name")]
    EmptyImageName,
}

/// Immutable settings for one normalization run
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeConfig {
    input: String,
    output: String,
    reference_images: Vec<String>,
    epsilon: f32,
    no_value: f32,
    minimum: Option<f32>,
    maximum: Option<f32>,
    policy: OutlierPolicy,
}

impl NormalizeConfig {
    /// Settings with defaults: no trimming, sentinel `-1.0`, outliers discarded,
    /// statistics taken from `input` alone.
    #[must_use]
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        let input = input.into();
        Self {
            reference_images: vec![input.clone()],
            input,
            output: output.into(),
            epsilon: 0.0,
            no_value: DEFAULT_NO_VALUE,
            minimum: None,
            maximum: None,
            policy: OutlierPolicy::default(),
        }
    }

    /// Use these images for the statistics; an empty list keeps the input only.
    pub fn with_reference_images<I, S>(mut self, images: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let images: Vec<String> = images.into_iter().map(Into::into).collect();
        if images.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::EmptyImageName);
        }
        if !images.is_empty() {
            self.reference_images = images;
        }
        Ok(self)
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(ConfigError::EpsilonOutOfRange(epsilon));
        }
        self.epsilon = epsilon;
        Ok(self)
    }

    #[must_use]
    pub fn with_no_value(mut self, no_value: f32) -> Self {
        self.no_value = no_value;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: OutlierPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fix one or both ends of the operative range instead of estimating them.
    pub fn with_bounds(
        mut self,
        minimum: Option<f32>,
        maximum: Option<f32>,
    ) -> Result<Self, ConfigError> {
        check_finite("minimum", minimum)?;
        check_finite("maximum", maximum)?;
        if let (Some(min), Some(max)) = (minimum, maximum)
            && max < min
        {
            return Err(ConfigError::InvertedBounds { min, max });
        }
        self.minimum = minimum;
        self.maximum = maximum;
        Ok(self)
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn reference_images(&self) -> &[String] {
        &self.reference_images
    }

    #[must_use]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    #[must_use]
    pub fn no_value(&self) -> f32 {
        self.no_value
    }

    #[must_use]
    pub fn minimum(&self) -> Option<f32> {
        self.minimum
    }

    #[must_use]
    pub fn maximum(&self) -> Option<f32> {
        self.maximum
    }

    #[must_use]
    pub fn policy(&self) -> OutlierPolicy {
        self.policy
    }
}

fn check_finite(name: &'static str, bound: Option<f32>) -> Result<(), ConfigError> {
    match bound {
        Some(value) if !value.is_finite() => Err(ConfigError::NonFiniteBound { name, value }),
        _ => Ok(()),
    }
}
