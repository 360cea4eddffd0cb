//! Portable FloatMap (PFM) codec
//!
//! Layout: a `PF` (RGB) or `Pf` (grayscale) line, a `width height` line, a
//! scale line whose sign gives the byte order (negative means little endian),
//! then raw 32-bit floats with the bottom row first.

use std::io::{BufRead, Read, Write};

use super::ImageIoError;
use crate::types::{Dimensions, FloatImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

/// Decode a PFM stream into a top-to-bottom image
pub fn decode<R: BufRead>(mut reader: R) -> Result<FloatImage, ImageIoError> {
    let magic = read_token(&mut reader)?;
    let channels = match magic.as_str() {
        "Pf" => 1,
        "PF" => 3,
        other => {
            return Err(ImageIoError::Malformed(format!(
                "unknown PFM magic {other:?}"
            )));
        }
    };

    let width = parse_header_value::<usize>(&read_token(&mut reader)?, "width")?;
    let height = parse_header_value::<usize>(&read_token(&mut reader)?, "height")?;
    let scale = parse_header_value::<f32>(&read_token(&mut reader)?, "scale")?;
    if scale == 0.0 || !scale.is_finite() {
        return Err(ImageIoError::Malformed(format!("invalid scale {scale}")));
    }
    let order = if scale < 0.0 { ByteOrder::Little } else { ByteOrder::Big };

    let dimensions = Dimensions::new(width, height, channels);
    if !dimensions.is_valid() {
        return Err(ImageIoError::InvalidDimensions(dimensions));
    }

    let byte_len = dimensions
        .checked_value_count()
        .and_then(|count| count.checked_mul(4))
        .ok_or(ImageIoError::InvalidDimensions(dimensions))?;
    // The header is untrusted, so the buffer grows with the payload actually read
    let mut bytes = Vec::new();
    reader.take(byte_len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != byte_len {
        return Err(ImageIoError::Truncated {
            expected: byte_len,
            actual: bytes.len(),
        });
    }

    // Rows are stored bottom to top
    let row_bytes = dimensions.row_len() * 4;
    let data = bytes
        .rchunks_exact(row_bytes)
        .flat_map(|row| row.chunks_exact(4))
        .map(|chunk| {
            let raw = [chunk[0], chunk[1], chunk[2], chunk[3]];
            match order {
                ByteOrder::Little => f32::from_le_bytes(raw),
                ByteOrder::Big => f32::from_be_bytes(raw),
            }
        })
        .collect();

    FloatImage::from_raw(dimensions, data).ok_or(ImageIoError::InvalidDimensions(dimensions))
}

/// Encode an image as little-endian PFM
pub fn encode<W: Write>(image: &FloatImage, mut writer: W) -> Result<(), ImageIoError> {
    let dimensions = image.dimensions();
    if !dimensions.is_valid() {
        return Err(ImageIoError::InvalidDimensions(dimensions));
    }
    let magic = if dimensions.channels == 1 { "Pf" } else { "PF" };

    write!(writer, "{magic}\n{} {}\n-1.0\n", dimensions.width, dimensions.height)?;

    let row_len = dimensions.row_len();
    let mut buffer = Vec::with_capacity(row_len * 4);
    for row in image.values().rchunks_exact(row_len) {
        buffer.clear();
        buffer.extend(row.iter().flat_map(|value| value.to_le_bytes()));
        writer.write_all(&buffer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read one whitespace-delimited header token, consuming exactly one
/// trailing whitespace byte so the payload starts right after it.
fn read_token<R: BufRead>(reader: &mut R) -> Result<String, ImageIoError> {
    let mut token = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            return Err(ImageIoError::Malformed("unexpected end of header".to_string()));
        }
        if byte[0].is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            break;
        }
        token.push(byte[0]);
        if token.len() > 64 {
            return Err(ImageIoError::Malformed("header token too long".to_string()));
        }
    }
    String::from_utf8(token)
        .map_err(|_| ImageIoError::Malformed("header is not ASCII".to_string()))
}

fn parse_header_value<T: std::str::FromStr>(token: &str, field: &str) -> Result<T, ImageIoError> {
    token
        .parse()
        .map_err(|_| ImageIoError::Malformed(format!("invalid {field} {token:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn little_endian_gray(width: usize, height: usize, rows_bottom_up: &[f32]) -> Vec<u8> {
        let mut bytes = format!("Pf\n{width} {height}\n-1.0\n").into_bytes();
        bytes.extend(rows_bottom_up.iter().flat_map(|v| v.to_le_bytes()));
        bytes
    }

    #[test]
    fn test_decode_flips_rows() {
        let bytes = little_endian_gray(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let image = decode(bytes.as_slice()).unwrap();
        assert_eq!(image.dimensions(), Dimensions::new(2, 2, 1));
        assert_eq!(image.values(), &[3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn test_decode_big_endian_rgb() {
        let mut bytes = b"PF\n1 1\n1.0\n".to_vec();
        for value in [0.5f32, -1.0, 9.25] {
            bytes.extend(value.to_be_bytes());
        }
        let image = decode(bytes.as_slice()).unwrap();
        assert_eq!(image.dimensions(), Dimensions::new(1, 1, 3));
        assert_eq!(image.values(), &[0.5, -1.0, 9.25]);
    }

    #[test]
    fn test_encode_then_decode_preserves_layout() {
        let dims = Dimensions::new(3, 2, 1);
        let image = FloatImage::from_raw(dims, vec![0.0, 1.0, 2.0, 3.0, 4.0, -1.0]).unwrap();
        let mut bytes = Vec::new();
        encode(&image, &mut bytes).unwrap();
        assert!(bytes.starts_with(b"Pf\n3 2\n-1.0\n"));
        assert_eq!(decode(bytes.as_slice()).unwrap(), image);
    }

    #[test]
    fn test_truncated_payload() {
        let mut bytes = little_endian_gray(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        bytes.truncate(bytes.len() - 3);
        assert_matches!(
            decode(bytes.as_slice()),
            Err(ImageIoError::Truncated { expected: 16, actual: 13 })
        );
    }

    #[test]
    fn test_bad_magic() {
        assert_matches!(
            decode(b"P6\n1 1\n255\n".as_slice()),
            Err(ImageIoError::Malformed(_))
        );
    }

    #[test]
    fn test_zero_scale_rejected() {
        assert_matches!(
            decode(b"Pf\n1 1\n0\n\0\0\0\0".as_slice()),
            Err(ImageIoError::Malformed(_))
        );
    }

    #[test]
    fn test_zero_width_rejected() {
        assert_matches!(
            decode(b"Pf\n0 1\n-1\n".as_slice()),
            Err(ImageIoError::InvalidDimensions(_))
        );
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_matches!(
            decode(b"Pf\n4294967296 4294967296\n-1\n\0\0\0\0".as_slice()),
            Err(ImageIoError::InvalidDimensions(_))
        );
        assert_matches!(
            decode(format!("PF\n{} 1\n-1\n", usize::MAX / 2).as_bytes()),
            Err(ImageIoError::InvalidDimensions(_))
        );
    }

    #[test]
    fn test_huge_header_with_short_payload_is_truncated() {
        assert_matches!(
            decode(b"Pf\n100000 100000\n-1\n\0\0\0\0".as_slice()),
            Err(ImageIoError::Truncated { expected: 40_000_000_000, actual: 4 })
        );
    }

    #[test]
    fn test_encode_rejects_empty_image() {
        let image = FloatImage::from_values(Vec::new());
        assert_matches!(
            encode(&image, Vec::new()),
            Err(ImageIoError::InvalidDimensions(_))
        );
    }
}
