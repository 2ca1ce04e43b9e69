//! Correlation kernels
//!
//! A [`Kernel`] is a small grid of `f32` weights with odd width and height,
//! so its centre is always the element at `(width / 2, height / 2)`.
//! Constructors reject even sizes; the correlator relies on that.
//!
//! The Correlator never normalizes. Smoothing builders here return kernels
//! whose weights sum to 1, derivative builders return kernels whose
//! absolute weights sum to 1.

use crate::{FilterError, FilterResult};

/// Axis along which [`Kernel::gaussian_derivative`] differentiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeAxis {
    /// Weight varies with the row offset (responds to vertical change)
    Vertical,
    /// Weight varies with the column offset (responds to horizontal change)
    Horizontal,
}

/// A 2D correlation kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel (odd)
    width: u32,
    /// Height of the kernel (odd)
    height: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a zero kernel with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if either dimension is even.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        check_odd(width, height)?;
        Ok(Kernel {
            width,
            height,
            data: vec![0.0; (width as usize) * (height as usize)],
        })
    }

    /// Create a kernel from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if either dimension is even or
    /// the slice length doesn't match.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        check_odd(width, height)?;
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "data length {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Kernel {
            width,
            height,
            data: data.to_vec(),
        })
    }

    /// 1x1 kernel with weight 1.
    pub fn identity() -> Self {
        Kernel {
            width: 1,
            height: 1,
            data: vec![1.0],
        }
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(size, size)?;
        let weight = 1.0 / (size as f32 * size as f32);
        kernel.data.fill(weight);
        Ok(kernel)
    }

    /// Create a normalized Gaussian kernel of side `2 * half_size + 1`.
    ///
    /// Weights are `exp(-(i² + j²) / (2σ²))` for offsets `i, j` from the
    /// centre, scaled to sum to 1.
    pub fn gaussian(half_size: u32, sigma: f32) -> FilterResult<Self> {
        check_sigma(sigma)?;
        let mut kernel = Self::from_offsets(half_size, |i, j| gaussian_weight(i, j, sigma))?;
        kernel.normalize();
        Ok(kernel)
    }

    /// Create a normalized binomial kernel of side `2 * half_size + 1`.
    ///
    /// Element `(x, y)` is `C(n, x) * C(n, y)` with `n = 2 * half_size + 1`,
    /// scaled to sum to 1. Any `half_size` is accepted; tail weights too
    /// small for `f32` become 0.
    pub fn binomial(half_size: u32) -> FilterResult<Self> {
        let row = binomial_row(2 * half_size + 1);
        let half = half_size as i32;
        let mut kernel = Self::from_offsets(half_size, |i, j| {
            (row[(i + half) as usize] * row[(j + half) as usize]) as f32
        })?;
        kernel.normalize();
        Ok(kernel)
    }

    /// Create a first-derivative-of-Gaussian kernel of side `2 * half_size + 1`.
    ///
    /// Weights are `G(i, j) * -(offset / σ²)` where `offset` is the row
    /// offset for [`DerivativeAxis::Vertical`] and the column offset for
    /// [`DerivativeAxis::Horizontal`]. The result is scaled so that the sum
    /// of absolute weights is 1.
    ///
    /// The sign convention makes the raw kernel respond negatively to
    /// intensity increasing along the axis; use [`Kernel::negated`] for a
    /// positive response.
    pub fn gaussian_derivative(
        half_size: u32,
        sigma: f32,
        axis: DerivativeAxis,
    ) -> FilterResult<Self> {
        check_sigma(sigma)?;
        if half_size == 0 {
            return Err(FilterError::InvalidKernel(
                "derivative kernel needs half_size >= 1".to_string(),
            ));
        }
        let var = sigma * sigma;
        let mut kernel = Self::from_offsets(half_size, |i, j| {
            let offset = match axis {
                DerivativeAxis::Vertical => i,
                DerivativeAxis::Horizontal => j,
            };
            gaussian_weight(i, j, sigma) * (-(offset as f32) / var)
        })?;
        kernel.normalize_abs();
        Ok(kernel)
    }

    /// 3x3 Sobel kernel for horizontal change, in eighths.
    pub fn sobel_x() -> Self {
        Kernel {
            width: 3,
            height: 3,
            data: [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0]
                .iter()
                .map(|v| v / 8.0)
                .collect(),
        }
    }

    /// 3x3 Sobel kernel for vertical change, in eighths.
    pub fn sobel_y() -> Self {
        Kernel {
            width: 3,
            height: 3,
            data: [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0]
                .iter()
                .map(|v| v / 8.0)
                .collect(),
        }
    }

    /// Build a square kernel from a function of (row offset, column offset).
    fn from_offsets(half_size: u32, f: impl Fn(i32, i32) -> f32) -> FilterResult<Self> {
        let side = 2 * half_size + 1;
        let half = half_size as i32;
        let mut kernel = Self::new(side, side)?;
        for y in 0..side {
            for x in 0..side {
                let i = y as i32 - half;
                let j = x as i32 - half;
                kernel.data[(y * side + x) as usize] = f(i, j);
            }
        }
        Ok(kernel)
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

    /// Get the centre column.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.width / 2
    }

    /// Get the centre row.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.height / 2
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set a value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if (x, y) is outside the kernel.
    pub fn set(&mut self, x: u32, y: u32, value: f32) -> FilterResult<()> {
        if x >= self.width || y >= self.height {
            return Err(FilterError::InvalidParameters(format!(
                "({x}, {y}) outside {}x{} kernel",
                self.width, self.height
            )));
        }
        self.data[(y * self.width + x) as usize] = value;
        Ok(())
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Get the sum of absolute kernel values.
    pub fn abs_sum(&self) -> f32 {
        self.data.iter().map(|v| v.abs()).sum()
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// Leaves the kernel unchanged if the sum is zero.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            self.scale_inplace(1.0 / sum);
        }
    }

    /// Normalize the kernel so that absolute values sum to 1.
    ///
    /// Leaves the kernel unchanged if every weight is zero.
    pub fn normalize_abs(&mut self) {
        let sum = self.abs_sum();
        if sum != 0.0 {
            self.scale_inplace(1.0 / sum);
        }
    }

    fn scale_inplace(&mut self, factor: f32) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    /// Copy of the kernel with every weight multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        let mut out = self.clone();
        out.scale_inplace(factor);
        out
    }

    /// Copy of the kernel with every weight negated.
    pub fn negated(&self) -> Self {
        self.scaled(-1.0)
    }

    /// Element-wise sum of two kernels of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if the sizes differ.
    pub fn add(&self, other: &Kernel) -> FilterResult<Self> {
        if self.width != other.width || self.height != other.height {
            return Err(FilterError::InvalidKernel(format!(
                "cannot add {}x{} and {}x{} kernels",
                self.width, self.height, other.width, other.height
            )));
        }
        Ok(Kernel {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
        })
    }
}

/// Binomial coefficient `C(n, k)`; 0 when `k > n`.
///
/// Returns `None` if the value does not fit in a `u64`.
pub fn binomial_coefficient(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    // Each partial product C(n-k+i, i) is an integer and grows with i
    let mut acc = 1u64;
    for i in 1..=k {
        let next = u128::from(acc) * u128::from(n - k + i) / u128::from(i);
        acc = u64::try_from(next).ok()?;
    }
    Some(acc)
}

/// `C(n, k)` for `k` in `0..n`, scaled so the sum is 1.
///
/// Built outward from the central coefficient with the ratio
/// `C(n, k - 1) / C(n, k) = k / (n - k + 1)`, so nothing overflows.
fn binomial_row(n: u32) -> Vec<f64> {
    let n = n as usize;
    let mid = n / 2;
    let mut row = vec![0.0f64; n];
    row[mid] = 1.0;
    for k in (1..=mid).rev() {
        row[k - 1] = row[k] * k as f64 / (n - k + 1) as f64;
    }
    for k in mid..n - 1 {
        row[k + 1] = row[k] * (n - k) as f64 / (k + 1) as f64;
    }
    let total: f64 = row.iter().sum();
    row.iter_mut().for_each(|c| *c /= total);
    row
}

fn gaussian_weight(i: i32, j: i32, sigma: f32) -> f32 {
    let r2 = (i * i + j * j) as f32;
    (-r2 / (2.0 * sigma * sigma)).exp()
}

fn check_odd(width: u32, height: u32) -> FilterResult<()> {
    if width % 2 == 0 || height % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "dimensions must be odd, got {width}x{height}"
        )));
    }
    Ok(())
}

fn check_sigma(sigma: f32) -> FilterResult<()> {
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(FilterError::InvalidParameters(format!(
            "sigma must be positive and finite, got {sigma}"
        )));
    }
    Ok(())
}
