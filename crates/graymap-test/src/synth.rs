//! Synthetic test images
//!
//! Deterministic generators so regression tests do not depend on
//! image files checked into the repository.

use crate::error::{TestError, TestResult};
use graymap_core::Image;

fn build(name: &str, width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> TestResult<Image> {
    let mut img = Image::new(width, height)
        .map_err(|e| TestError::ImageBuild {
            name: name.to_string(),
            message: e.to_string(),
        })?
        .into_mut();
    for y in 0..height {
        for x in 0..width {
            img.set_pixel_unchecked(x, y, f(x, y));
        }
    }
    Ok(img.into())
}

/// Image with every sample set to `value`.
pub fn constant(width: u32, height: u32, value: u8) -> TestResult<Image> {
    build("constant", width, height, |_, _| value)
}

/// Diagonal ramp: `(x * 7 + y * 13) % 256`.
pub fn ramp(width: u32, height: u32) -> TestResult<Image> {
    build("ramp", width, height, |x, y| ((x * 7 + y * 13) % 256) as u8)
}

/// Checkerboard of `cell`-sized squares alternating `lo` and `hi`.
pub fn checkerboard(width: u32, height: u32, cell: u32, lo: u8, hi: u8) -> TestResult<Image> {
    let cell = cell.max(1);
    build("checkerboard", width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { lo } else { hi }
    })
}

/// Dark image with one bright sample at `(cx, cy)`.
pub fn impulse(width: u32, height: u32, cx: u32, cy: u32, value: u8) -> TestResult<Image> {
    build("impulse", width, height, |x, y| {
        if x == cx && y == cy { value } else { 0 }
    })
}
