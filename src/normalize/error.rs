use thiserror::Error;

use crate::imgio::ImageIoError;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Could not load image {name}: {source}")]
    Load {
        name: String,
        #[source]
        source: ImageIoError,
    },

    #[error("no valid values to estimate the normalization range from")]
    NoValidSamples,

    #[error("normalization range is inverted: minimum {min} exceeds maximum {max}")]
    InvertedRange { min: f32, max: f32 },

    #[error("image {0} was not loaded")]
    MissingTarget(String),

    #[error("Could not save image {destination}: {source}")]
    Save {
        destination: String,
        #[source]
        source: ImageIoError,
    },
}
