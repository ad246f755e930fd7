//! Graymap - Gaussian and Laplacian filtering for portable graymaps
//!
//! Loads 8-bit grayscale images in the PGM format, applies spatial
//! convolution filters and writes the results back out.
//!
//! # Overview
//!
//! - PGM I/O (ASCII `P2` and binary `P5` in, binary `P5` out)
//! - Gaussian kernel construction and smoothing
//! - Laplacian edge detection with two fixed 3x3 kernels
//! - A batch driver that runs the full filter sweep over many files
//!
//! # Example
//!
//! ```
//! use graymap::Image;
//! use graymap::filter::{LaplacianKernel, gaussian_laplacian};
//!
//! let img = Image::from_vec(9, 9, 255, vec![200; 81]).unwrap();
//! let edges = gaussian_laplacian(&img, 3, 1.0, LaplacianKernel::Cross).unwrap();
//! assert_eq!(edges.get_pixel(4, 4), Some(0));
//! ```

pub mod batch;

// Re-export core types (primary data structures used everywhere)
pub use graymap_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use graymap_filter as filter;
pub use graymap_io as io;
