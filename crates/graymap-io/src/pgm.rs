//! PGM (portable graymap) format support
//!
//! Reads the ASCII (`P2`) and binary (`P5`) graymap variants and writes
//! the binary variant.
//!
//! # Header grammar
//!
//! ```text
//! magic      up to two non-whitespace bytes, "P2" or "P5"
//! [comment]  one optional '#' line
//! width height
//! [comment]  one optional '#' line
//! maxval
//! ```
//!
//! Comments are recognized only at the two marked positions; a `#`
//! before the magic number is rejected as an unknown format.

use crate::cursor::{Cursor, is_space};
use crate::format::PgmVariant;
use crate::{IoError, IoResult};
use graymap_core::Image;
use log::debug;
use std::io::{Read, Write};

/// Largest max value an 8-bit graymap may declare.
const MAX_8BIT_VALUE: i64 = 255;

/// Graymap header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgmHeader {
    /// Variant selected by the magic number
    pub variant: PgmVariant,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Max sample value
    pub max_value: u32,
}

/// Read only the header of a graymap held in memory.
pub fn read_header_pgm(data: &[u8]) -> IoResult<PgmHeader> {
    let mut cursor = Cursor::new(data);
    parse_header(&mut cursor)
}

/// Read a graymap from a reader.
///
/// The whole stream is read before decoding, so on error no partially
/// filled image is ever produced.
pub fn read_pgm<R: Read>(mut reader: R) -> IoResult<Image> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_pgm(&data)
}

/// Decode a graymap held in memory.
pub fn decode_pgm(data: &[u8]) -> IoResult<Image> {
    let mut cursor = Cursor::new(data);
    let header = parse_header(&mut cursor)?;
    debug!(
        "pgm header: {} {}x{} maxval {}",
        header.variant.magic(),
        header.width,
        header.height,
        header.max_value
    );

    let w = header.width as usize;
    let h = header.height as usize;
    let npixels = w
        .checked_mul(h)
        .ok_or_else(|| IoError::InvalidData(format!("image too large: {}x{}", w, h)))?;

    // One whitespace byte separates the header from a binary raster
    if header.variant == PgmVariant::Binary && cursor.peek().is_some_and(is_space) {
        cursor.consume();
    }
    // Every sample needs at least one byte in either variant
    if cursor.remaining().len() < npixels {
        return Err(IoError::InvalidData(format!(
            "truncated raster: need {} samples, {} bytes left",
            npixels,
            cursor.remaining().len()
        )));
    }

    let mut img = Image::with_max_value(header.width, header.height, header.max_value)?.into_mut();
    match header.variant {
        PgmVariant::Binary => {
            let raster = cursor.take(npixels).ok_or_else(|| {
                IoError::InvalidData(format!("truncated raster: need {} bytes", npixels))
            })?;
            for (y, src) in raster.chunks_exact(w).enumerate() {
                img.row_mut(y as u32).copy_from_slice(src);
            }
        }
        PgmVariant::Ascii => {
            for y in 0..header.height {
                let row = img.row_mut(y);
                for (x, sample) in row.iter_mut().enumerate() {
                    let val = cursor.read_int().ok_or_else(|| {
                        IoError::InvalidData(format!("missing sample at ({}, {})", x, y))
                    })?;
                    // Keep the low 8 bits
                    *sample = val as u8;
                }
            }
        }
    }

    Ok(img.into())
}

/// Write an image as a binary (`P5`) graymap.
///
/// The header is three text lines: magic, `"<width> <height>"` and the
/// max value. Rows follow with exactly `width` bytes each.
pub fn write_pgm<W: Write>(img: &Image, mut writer: W) -> IoResult<()> {
    write!(
        writer,
        "{}\n{} {}\n{}\n",
        PgmVariant::Binary.magic(),
        img.width(),
        img.height(),
        img.max_value()
    )?;
    for y in 0..img.height() {
        writer.write_all(img.row(y))?;
    }
    Ok(())
}

fn parse_header(cursor: &mut Cursor<'_>) -> IoResult<PgmHeader> {
    let token = cursor.read_token(2);
    let variant = PgmVariant::from_magic(token).ok_or_else(|| {
        IoError::UnsupportedFormat(format!(
            "magic must be P2 or P5, found {:?}",
            String::from_utf8_lossy(token)
        ))
    })?;

    cursor.skip_whitespace_and_comment();
    let width = read_dimension(cursor, "width")?;
    let height = read_dimension(cursor, "height")?;

    cursor.skip_whitespace_and_comment();
    let max_value = cursor
        .read_int()
        .ok_or_else(|| IoError::InvalidData("missing max value".to_string()))?;
    if max_value <= 0 {
        return Err(IoError::InvalidData(format!(
            "max value must be positive, found {}",
            max_value
        )));
    }
    if max_value > MAX_8BIT_VALUE {
        return Err(IoError::UnsupportedFormat(format!(
            "only 8-bit graymaps are supported, max value is {}",
            max_value
        )));
    }

    Ok(PgmHeader {
        variant,
        width,
        height,
        max_value: max_value as u32,
    })
}

fn read_dimension(cursor: &mut Cursor<'_>, name: &str) -> IoResult<u32> {
    let val = cursor
        .read_int()
        .ok_or_else(|| IoError::InvalidData(format!("missing {}", name)))?;
    match u32::try_from(val) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(IoError::InvalidData(format!(
            "{} must be a positive integer, found {}",
            name, val
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_binary() {
        let data = b"P5\n3 2\n255\n\x00\x01\x02\x0a\x20\xff";
        let img = decode_pgm(data).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.max_value(), 255);
        // Whitespace-valued samples are data, not separators
        assert_eq!(img.data(), &[0, 1, 2, 10, 32, 255]);
    }

    #[test]
    fn test_decode_ascii() {
        let data = b"P2\n3 2\n200\n0 1 2\n3\t4\n5\n";
        let img = decode_pgm(data).unwrap();
        assert_eq!(img.max_value(), 200);
        assert_eq!(img.row(0), &[0, 1, 2]);
        assert_eq!(img.row(1), &[3, 4, 5]);
    }

    #[test]
    fn test_ascii_samples_truncate_to_8_bits() {
        let data = b"P2 2 1 255 300 -1";
        let img = decode_pgm(data).unwrap();
        assert_eq!(img.data(), &[44, 255]);
    }

    #[test]
    fn test_comments_before_dimensions_and_maxval() {
        let data = b"P2\n# created by hand\n2 1\n# depth\n255\n7 8";
        let img = decode_pgm(data).unwrap();
        assert_eq!(img.data(), &[7, 8]);
    }

    #[test]
    fn test_comment_before_magic_is_rejected() {
        let data = b"# leading comment\nP2\n1 1\n255\n0";
        let err = decode_pgm(data).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_comment_between_width_and_height_is_rejected() {
        let data = b"P2\n2 # no\n1\n255\n0 0";
        let err = decode_pgm(data).unwrap_err();
        assert!(matches!(err, IoError::InvalidData(_)));
    }

    #[test]
    fn test_bad_magic() {
        let cases: [&[u8]; 4] = [b"P6\n1 1\n255\n\0", b"P\n", b"", b"XY 1 1 255 0"];
        for data in cases {
            let err = decode_pgm(data).unwrap_err();
            assert!(matches!(err, IoError::UnsupportedFormat(_)), "{:?}", data);
        }
    }

    #[test]
    fn test_bad_header_fields() {
        let cases: [&[u8]; 5] = [
            b"P5\n0 1\n255\n",
            b"P5\n-3 1\n255\n",
            b"P5\n1\n",
            b"P5\n1 1\n",
            b"P5\n1 1\n0\n\0",
        ];
        for data in cases {
            let err = decode_pgm(data).unwrap_err();
            assert!(matches!(err, IoError::InvalidData(_)), "{:?}", data);
        }
    }

    #[test]
    fn test_16bit_maxval_unsupported() {
        let err = decode_pgm(b"P5\n1 1\n65535\n\0\0").unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_truncated_raster() {
        let err = decode_pgm(b"P5\n2 2\n255\n\x01\x02\x03").unwrap_err();
        assert!(matches!(err, IoError::InvalidData(_)));

        let err = decode_pgm(b"P2\n2 2\n255\n1 2 3").unwrap_err();
        assert!(matches!(err, IoError::InvalidData(_)));

        let err = decode_pgm(b"P2\n2 1\n255\n1 x").unwrap_err();
        assert!(matches!(err, IoError::InvalidData(_)));
    }

    #[test]
    fn test_huge_dimensions_in_tiny_file() {
        let err = decode_pgm(b"P5\n4000000000 4000000000\n255\n\0").unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_write_layout() {
        let img = Image::from_vec(2, 2, 100, vec![1, 2, 3, 4]).unwrap();
        let mut out = Vec::new();
        write_pgm(&img, &mut out).unwrap();
        assert_eq!(out, b"P5\n2 2\n100\n\x01\x02\x03\x04");
    }

    #[test]
    fn test_read_header() {
        let header = read_header_pgm(b"P2\n# c\n640 480\n255\n").unwrap();
        assert_eq!(
            header,
            PgmHeader {
                variant: PgmVariant::Ascii,
                width: 640,
                height: 480,
                max_value: 255,
            }
        );
    }

    #[test]
    fn test_read_pgm_from_reader() {
        let data: &[u8] = b"P5 1 2 255\n\x05\x06";
        let img = read_pgm(data).unwrap();
        assert_eq!(img.data(), &[5, 6]);
    }
}
