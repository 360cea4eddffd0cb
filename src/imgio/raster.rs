//! Non-PFM formats through the `image` crate
//!
//! Grayscale sources load as one channel, everything else as float RGB
//! (alpha is dropped). Integer formats are scaled to [0, 1] on load by the
//! `image` crate's float conversion.

use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, Rgb, Rgb32FImage};

use super::ImageIoError;
use crate::types::{Dimensions, FloatImage};

pub fn load(path: &Path) -> Result<FloatImage, ImageIoError> {
    let decoded = image::open(path)?;
    let width = decoded.width() as usize;
    let height = decoded.height() as usize;
    let rgb = decoded.to_rgb32f();

    let (channels, data) = if decoded.color().has_color() {
        (3, rgb.into_raw())
    } else {
        // Gray is replicated across RGB, keep the first channel
        (1, rgb.pixels().map(|pixel| pixel.0[0]).collect())
    };

    let dimensions = Dimensions::new(width, height, channels);
    FloatImage::from_raw(dimensions, data).ok_or(ImageIoError::InvalidDimensions(dimensions))
}

/// Save through the `image` crate. OpenEXR keeps 32-bit float RGB, other
/// formats are written as 16-bit gray or RGB with values saturated to [0, 1].
pub fn save(image: &FloatImage, path: &Path) -> Result<(), ImageIoError> {
    let format = ImageFormat::from_path(path)?;
    let dimensions = image.dimensions();
    let (width, height) = checked_size(dimensions)?;

    let dynamic = match (format, dimensions.channels) {
        (ImageFormat::OpenExr, _) => {
            let data: Vec<f32> = match dimensions.channels {
                1 => image.values().iter().flat_map(|&v| [v, v, v]).collect(),
                _ => image.values().to_vec(),
            };
            let buffer: Rgb32FImage = ImageBuffer::from_raw(width, height, data)
                .ok_or(ImageIoError::InvalidDimensions(dimensions))?;
            DynamicImage::ImageRgb32F(buffer)
        }
        (_, 1) => {
            let buffer: ImageBuffer<Luma<u16>, Vec<u16>> =
                ImageBuffer::from_raw(width, height, quantize(image.values()))
                    .ok_or(ImageIoError::InvalidDimensions(dimensions))?;
            DynamicImage::ImageLuma16(buffer)
        }
        (_, 3) => {
            let buffer: ImageBuffer<Rgb<u16>, Vec<u16>> =
                ImageBuffer::from_raw(width, height, quantize(image.values()))
                    .ok_or(ImageIoError::InvalidDimensions(dimensions))?;
            DynamicImage::ImageRgb16(buffer)
        }
        _ => return Err(ImageIoError::InvalidDimensions(dimensions)),
    };

    dynamic.save_with_format(path, format)?;
    Ok(())
}

fn checked_size(dimensions: Dimensions) -> Result<(u32, u32), ImageIoError> {
    let width = u32::try_from(dimensions.width)
        .map_err(|_| ImageIoError::InvalidDimensions(dimensions))?;
    let height = u32::try_from(dimensions.height)
        .map_err(|_| ImageIoError::InvalidDimensions(dimensions))?;
    Ok((width, height))
}

// NaN saturates to 0 through the float-to-int cast
fn quantize(values: &[f32]) -> Vec<u16> {
    values
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * f32::from(u16::MAX)).round() as u16)
        .collect()
}
