//! Loading and saving float images
//!
//! `.pfm` files go through the built-in PFM codec; any other extension is
//! handed to the `image` crate.

pub mod pfm;
mod raster;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::types::{Dimensions, FloatImage};

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed PFM file: {0}")]
    Malformed(String),

    #[error("invalid image dimensions {0}")]
    InvalidDimensions(Dimensions),

    #[error("truncated pixel data: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error(transparent)]
    Raster(#[from] image::ImageError),
}

/// Source and sink for named images
pub trait ImageStore {
    fn load(&self, name: &str) -> Result<FloatImage, ImageIoError>;

    fn save(&self, image: &FloatImage, destination: &str) -> Result<(), ImageIoError>;
}

/// Images addressed by file system path
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl ImageStore for FileStore {
    fn load(&self, name: &str) -> Result<FloatImage, ImageIoError> {
        let path = Path::new(name);
        let image = if is_pfm(path) {
            pfm::decode(BufReader::new(File::open(path)?))?
        } else {
            raster::load(path)?
        };
        debug!(path = name, dimensions = %image.dimensions(), "loaded image");
        Ok(image)
    }

    fn save(&self, image: &FloatImage, destination: &str) -> Result<(), ImageIoError> {
        let path = Path::new(destination);
        if is_pfm(path) {
            pfm::encode(image, BufWriter::new(File::create(path)?))?;
        } else {
            raster::save(image, path)?;
        }
        debug!(path = destination, dimensions = %image.dimensions(), "saved image");
        Ok(())
    }
}

fn is_pfm(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pfm"))
}
