//! Image - The grayscale image container
//!
//! `Image` is the fundamental image type of the library. It holds one
//! 8-bit intensity sample per pixel together with the max sample value
//! recorded in the graymap header.
//!
//! # Pixel layout
//!
//! - Samples are stored in a single row-major buffer
//! - Sample `(x, y)` lives at index `y * width + x`
//! - Rows are not padded; every row has exactly `width` samples
//!
//! # Ownership model
//!
//! An `Image` exclusively owns its buffer; cloning copies the samples.
//! To modify pixel data, convert to `ImageMut` via [`Image::into_mut`]
//! or [`Image::to_mut`], then convert back with `Into<Image>`.

mod access;

use crate::error::{Error, Result};

/// Max sample value used when none is given.
pub const DEFAULT_MAX_VALUE: u32 = 255;

/// Internal image data
#[derive(Debug, Clone, PartialEq, Eq)]
struct ImageData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Max sample value from the file header
    max_value: u32,
    /// The samples (row-major, `width * height` bytes)
    data: Vec<u8>,
}

/// Allocate a zeroed sample buffer for a `width` x `height` image.
///
/// Reports allocation failure as [`Error::AllocationFailed`] instead of
/// aborting the process.
fn alloc_samples(width: u32, height: u32) -> Result<Vec<u8>> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::AllocationFailed)?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed)?;
    data.resize(len, 0);
    Ok(data)
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}

fn check_max_value(max_value: u32) -> Result<()> {
    if max_value == 0 || max_value > DEFAULT_MAX_VALUE {
        return Err(Error::InvalidMaxValue(max_value));
    }
    Ok(())
}

/// Image - 8-bit grayscale raster
///
/// # Examples
///
/// ```
/// use graymap_core::Image;
///
/// let img = Image::new(640, 480).unwrap();
/// assert_eq!(img.width(), 640);
/// assert_eq!(img.height(), 480);
/// assert_eq!(img.max_value(), 255);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    inner: ImageData,
}

impl Image {
    /// Create a new image with max value 255.
    ///
    /// The samples are initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, and
    /// [`Error::AllocationFailed`] if the buffer cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_max_value(width, height, DEFAULT_MAX_VALUE)
    }

    /// Create a new zeroed image with an explicit max value.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `max_value` - Max sample value (must be in `1..=255`)
    pub fn with_max_value(width: u32, height: u32, max_value: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        check_max_value(max_value)?;
        let data = alloc_samples(width, height)?;
        Ok(Image {
            inner: ImageData {
                width,
                height,
                max_value,
                data,
            },
        })
    }

    /// Create an image that adopts an existing row-major sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `data.len()` is not
    /// `width * height`.
    pub fn from_vec(width: u32, height: u32, max_value: u32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        check_max_value(max_value)?;
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Image {
            inner: ImageData {
                width,
                height,
                max_value,
                data,
            },
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the max sample value.
    #[inline]
    pub fn max_value(&self) -> u32 {
        self.inner.max_value
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Create a new image with the same dimensions and max value.
    ///
    /// The samples are initialized to zero. This is how filters obtain a
    /// fresh output buffer that never aliases their input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot be allocated.
    pub fn create_template(&self) -> Result<Self> {
        let data = alloc_samples(self.inner.width, self.inner.height)?;
        Ok(Image {
            inner: ImageData {
                width: self.inner.width,
                height: self.inner.height,
                max_value: self.inner.max_value,
                data,
            },
        })
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &Image) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Count samples that are not zero.
    pub fn count_nonzero(&self) -> usize {
        self.inner.data.iter().filter(|&&v| v != 0).count()
    }

    /// Count samples that differ between two images of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn count_diff(&self, other: &Image) -> Result<usize> {
        if !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: (self.inner.width, self.inner.height),
                actual: (other.inner.width, other.inner.height),
            });
        }
        Ok(self
            .inner
            .data
            .iter()
            .zip(&other.inner.data)
            .filter(|(a, b)| a != b)
            .count())
    }

    /// Convert into a mutable image without copying.
    pub fn into_mut(self) -> ImageMut {
        ImageMut { inner: self.inner }
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> ImageMut {
        ImageMut {
            inner: self.inner.clone(),
        }
    }
}

/// Mutable image
///
/// Allows modification of the samples. Convert back to an immutable
/// [`Image`] using `Into<Image>`.
#[derive(Debug)]
pub struct ImageMut {
    inner: ImageData,
}

impl ImageMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the max sample value.
    #[inline]
    pub fn max_value(&self) -> u32 {
        self.inner.max_value
    }

    /// Set the max sample value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMaxValue`] unless `max_value` is in `1..=255`.
    pub fn set_max_value(&mut self, max_value: u32) -> Result<()> {
        check_max_value(max_value)?;
        self.inner.max_value = max_value;
        Ok(())
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get mutable access to row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }
}

impl From<ImageMut> for Image {
    fn from(img: ImageMut) -> Self {
        Image { inner: img.inner }
    }
}
