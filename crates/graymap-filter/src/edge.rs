//! Laplacian edge detection
//!
//! Both Laplacian kernels have weights summing to zero, so flat regions
//! map to 0 and only intensity changes survive. Negative responses are
//! clamped to 0 by the convolution engine.

use crate::convolve::{convolve_with_offset, gaussian_blur};
use crate::{FilterResult, Kernel, LaplacianKernel};
use graymap_core::Image;

/// Center offset of the 3x3 Laplacian kernels.
const LAPLACIAN_CENTER: u32 = 1;

/// Apply Laplacian edge detection.
///
/// # Arguments
/// * `img` - Input 8-bit grayscale image
/// * `kind` - Which of the two fixed kernels to use
pub fn laplacian_edge(img: &Image, kind: LaplacianKernel) -> FilterResult<Image> {
    let kernel = Kernel::laplacian(kind);
    convolve_with_offset(img, &kernel, LAPLACIAN_CENTER)
}

/// Smooth with a Gaussian, then apply Laplacian edge detection.
///
/// # Arguments
/// * `img` - Input 8-bit grayscale image
/// * `size` - Gaussian kernel size (odd)
/// * `sigma` - Gaussian spread
/// * `kind` - Which Laplacian kernel to use
pub fn gaussian_laplacian(
    img: &Image,
    size: u32,
    sigma: f64,
    kind: LaplacianKernel,
) -> FilterResult<Image> {
    let smoothed = gaussian_blur(img, size, sigma)?;
    laplacian_edge(&smoothed, kind)
}
