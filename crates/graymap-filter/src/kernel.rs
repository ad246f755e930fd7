//! Convolution kernels
//!
//! Defines the kernel structure used by the convolution engine, the
//! Gaussian kernel builder and the two fixed Laplacian kernels.

use crate::{FilterError, FilterResult};
use std::fmt;
use std::str::FromStr;

/// Fixed 3x3 Laplacian edge kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaplacianKernel {
    /// 4-neighbour kernel `{{0,-1,0},{-1,4,-1},{0,-1,0}}`
    Cross,
    /// 8-neighbour kernel `{{-1,-1,-1},{-1,8,-1},{-1,-1,-1}}`
    Full,
}

impl LaplacianKernel {
    /// Both kernels, in a stable order.
    pub const ALL: [LaplacianKernel; 2] = [LaplacianKernel::Cross, LaplacianKernel::Full];

    /// The integer weights, row by row.
    pub const fn matrix(self) -> [[i32; 3]; 3] {
        match self {
            Self::Cross => [[0, -1, 0], [-1, 4, -1], [0, -1, 0]],
            Self::Full => [[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]],
        }
    }

    /// Short lowercase name, used in file names and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cross => "cross",
            Self::Full => "full",
        }
    }
}

impl FromStr for LaplacianKernel {
    type Err = FilterError;

    fn from_str(s: &str) -> FilterResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                FilterError::InvalidParameters(format!(
                    "unknown laplacian kernel '{}' (expected cross or full)",
                    s
                ))
            })
    }
}

/// A 2D convolution kernel
///
/// Weights are stored row-major; `(x, y)` addresses column `x` of row `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f64>,
}

impl Kernel {
    /// Create a zero-filled kernel with the center at `(width/2, height/2)`.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(graymap_core::Error::AllocationFailed)?;
        let mut data: Vec<f64> = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| graymap_core::Error::AllocationFailed)?;
        data.resize(len, 0.0);
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data,
        })
    }

    /// Create a kernel from row-major values.
    pub fn from_slice(width: u32, height: u32, data: &[f64]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values for a {}x{} kernel, got {}",
                kernel.data.len(),
                width,
                height,
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(size, size)?;
        let val = 1.0 / (size as f64 * size as f64);
        kernel.data.fill(val);
        Ok(kernel)
    }

    /// Create a normalized isotropic Gaussian kernel.
    ///
    /// Cell `(i, j)` gets `exp(-((i-c)^2 + (j-c)^2) / (2 sigma^2))` with
    /// `c = size/2`; the weights are then divided by their sum. The
    /// `1 / (2 pi sigma^2)` factor of the continuous Gaussian cancels in
    /// that division and is left out, so a huge sigma yields a uniform
    /// kernel rather than all-zero weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] unless `size` is odd and
    /// positive and `sigma` is finite and positive.
    pub fn gaussian(size: u32, sigma: f64) -> FilterResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "gaussian size must be odd and positive, got {}",
                size
            )));
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(FilterError::InvalidKernel(format!(
                "gaussian sigma must be finite and positive, got {}",
                sigma
            )));
        }

        let mut kernel = Self::new(size, size)?;
        let c = (size / 2) as i64;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let n = size as usize;

        for i in 0..n {
            for j in 0..n {
                let di = i as i64 - c;
                let dj = j as i64 - c;
                let r2 = (di * di + dj * dj) as f64;
                // The center stays 1 even when two_sigma_sq underflows to 0
                kernel.data[i * n + j] = if r2 == 0.0 {
                    1.0
                } else {
                    (-r2 / two_sigma_sq).exp()
                };
            }
        }
        kernel.normalize()?;
        Ok(kernel)
    }

    /// Create one of the fixed Laplacian kernels, centered at `(1, 1)`.
    pub fn laplacian(kind: LaplacianKernel) -> Self {
        let data = kind
            .matrix()
            .iter()
            .flatten()
            .map(|&v| f64::from(v))
            .collect();
        Self {
            width: 3,
            height: 3,
            cx: 1,
            cy: 1,
            data,
        }
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Set the center coordinates.
    pub fn set_center(&mut self, cx: u32, cy: u32) -> FilterResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(FilterError::InvalidParameters(format!(
                "center ({}, {}) outside {}x{} kernel",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get the weights of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f64] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set a value at (x, y).
    pub fn set(&mut self, x: u32, y: u32, value: f64) -> FilterResult<()> {
        if x >= self.width || y >= self.height {
            return Err(FilterError::InvalidParameters(format!(
                "({}, {}) outside {}x{} kernel",
                x, y, self.width, self.height
            )));
        }
        self.data[(y * self.width + x) as usize] = value;
        Ok(())
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if the values sum to zero.
    pub fn normalize(&mut self) -> FilterResult<()> {
        let sum = self.sum();
        if sum == 0.0 || !sum.is_finite() {
            return Err(FilterError::InvalidKernel(format!(
                "cannot normalize kernel with sum {}",
                sum
            )));
        }
        for v in &mut self.data {
            *v /= sum;
        }
        Ok(())
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row: Vec<String> = self.row(y).iter().map(|v| format!("{:.6}", v)).collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
