//! Pixel access functions
//!
//! Functions for getting and setting individual samples. Coordinates
//! are `(x, y)` with `x` the column and `y` the row.

use super::{Image, ImageMut};
use crate::error::{Error, Result};

impl Image {
    /// Get a sample value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a sample value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }
}

impl ImageMut {
    /// Get a sample value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a sample value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// Set a sample value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        if x >= self.inner.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.inner.width as usize,
            });
        }
        if y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.inner.height as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a sample value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let idx = y as usize * self.inner.width as usize + x as usize;
        self.inner.data[idx] = val;
    }
}
