//! Convolution operations
//!
//! Implements 2D correlation of an 8-bit grayscale image with an
//! arbitrary kernel.
//!
//! # Boundary handling
//!
//! Kernel terms whose source pixel falls outside the image are omitted
//! from the sum. The remaining weights are not renormalized, so a
//! smoothing kernel darkens pixels near the border.

use crate::{FilterError, FilterResult, Kernel};
use graymap_core::Image;
use log::debug;

/// Convolve an image with a kernel centred on the kernel's own origin.
///
/// Kernels built by [`Kernel::gaussian`] and [`Kernel::laplacian`] are
/// centred at `size/2`.
pub fn convolve(img: &Image, kernel: &Kernel) -> FilterResult<Image> {
    convolve_at(img, kernel, kernel.center_x(), kernel.center_y())
}

/// Convolve an image with a kernel using the same `center_offset` on
/// both axes.
///
/// Output pixel `(x, y)` is the sum over kernel cells `(kx, ky)` of
/// `kernel(kx, ky) * src(x - center_offset + kx, y - center_offset + ky)`,
/// skipping source coordinates outside the image. The sum is clamped to
/// `[0, 255]` and truncated. The output is a newly allocated image with
/// the input's dimensions and max value.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `center_offset` is not
/// inside the kernel, and [`FilterError::Core`] if the output image
/// cannot be allocated.
pub fn convolve_with_offset(img: &Image, kernel: &Kernel, center_offset: u32) -> FilterResult<Image> {
    if center_offset >= kernel.width() || center_offset >= kernel.height() {
        return Err(FilterError::InvalidParameters(format!(
            "center offset {} outside {}x{} kernel",
            center_offset,
            kernel.width(),
            kernel.height()
        )));
    }
    convolve_at(img, kernel, center_offset, center_offset)
}

fn convolve_at(img: &Image, kernel: &Kernel, kcx: u32, kcy: u32) -> FilterResult<Image> {
    let w = i64::from(img.width());
    let h = i64::from(img.height());
    let kcx = i64::from(kcx);
    let kcy = i64::from(kcy);

    let mut out = img.create_template()?.into_mut();

    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0f64;

            for ky in 0..kernel.height() {
                let sy = y - kcy + i64::from(ky);
                if sy < 0 || sy >= h {
                    continue;
                }
                let src = img.row(sy as u32);
                let weights = kernel.row(ky);

                for (kx, &k) in weights.iter().enumerate() {
                    let sx = x - kcx + kx as i64;
                    if sx < 0 || sx >= w {
                        continue;
                    }
                    sum += f64::from(src[sx as usize]) * k;
                }
            }

            out.set_pixel_unchecked(x as u32, y as u32, clamp_to_u8(sum));
        }
    }

    Ok(out.into())
}

/// Clamp to `[0, 255]` and truncate toward zero.
#[inline]
fn clamp_to_u8(val: f64) -> u8 {
    val.clamp(0.0, 255.0) as u8
}

/// Apply Gaussian smoothing
///
/// Builds a `size` x `size` Gaussian kernel with the given `sigma` and
/// convolves with `center_offset = size/2`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] unless `size` is odd and
/// positive and `sigma` is finite and positive.
pub fn gaussian_blur(img: &Image, size: u32, sigma: f64) -> FilterResult<Image> {
    let kernel = Kernel::gaussian(size, sigma)?;
    debug!(
        "gaussian kernel size {} sigma {:.1}:\n{}",
        size, sigma, kernel
    );
    convolve_with_offset(img, &kernel, size / 2)
}
