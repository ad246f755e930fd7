//! graymap-filter - Image filtering operations
//!
//! This crate provides the convolution filters of the library:
//!
//! - Gaussian kernel construction
//! - Convolution with arbitrary kernels, omitting out-of-bounds terms
//! - Gaussian smoothing
//! - Laplacian edge detection with two fixed 3x3 kernels

pub mod convolve;
pub mod edge;
mod error;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, LaplacianKernel};

// Re-export commonly used functions
pub use convolve::{convolve, convolve_with_offset, gaussian_blur};
pub use edge::{gaussian_laplacian, laplacian_edge};
