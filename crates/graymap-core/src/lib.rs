//! graymap-core - Basic data structures for grayscale image processing
//!
//! This crate provides the image container shared by the codec and
//! filter crates:
//!
//! - [`Image`] / [`ImageMut`] - 8-bit grayscale raster (immutable / mutable)
//! - [`Error`] / [`Result`] - error type for container operations

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::{DEFAULT_MAX_VALUE, Image, ImageMut};
