//! Floating-point raster
//!
//! Correlation output, gradient magnitude and gradient orientation are kept
//! as `f32` so they are neither clipped to 8 bits nor rounded. An [`FPix`]
//! has the same geometry as the [`Pix`] it was derived from and converts
//! back with [`FPix::to_pix_truncated`].
//!
//! # Examples
//!
//! ```
//! use lumen_core::FPix;
//!
//! let mut response = FPix::new(100, 100).unwrap();
//! response.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(response.get_pixel(10, 20).unwrap(), 0.5);
//! assert_eq!(response.max(), Some((0.5, 10, 20)));
//! ```

use crate::error::{Error, Result};
use crate::pix::Pix;

/// Row-major `f32` raster; sample `(x, y)` lives at `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FPix {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FPix {
    /// Zero-filled raster.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for a zero width or height.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Raster with every sample set to `value`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for a zero width or height.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(FPix {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        })
    }

    /// Wrap row-major samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for a zero width or height and
    /// `Error::InvalidParameter` if `data` has the wrong length.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "{} samples given for a {width}x{height} raster",
                data.len()
            )));
        }
        Ok(FPix {
            width,
            height,
            data,
        })
    }

    /// Samples of an 8-bit image as floats, unchanged.
    pub fn from_pix(pix: &Pix) -> FPix {
        FPix {
            width: pix.width(),
            height: pix.height(),
            data: pix.data().iter().map(|&v| f32::from(v)).collect(),
        }
    }

    /// Zeroed raster of the same size.
    pub fn create_template(&self) -> FPix {
        FPix {
            width: self.width,
            height: self.height,
            data: vec![0.0; self.data.len()],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Sample at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` outside the raster.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        self.check_bounds(x, y)?;
        Ok(self.get_pixel_unchecked(x, y))
    }

    /// Overwrite the sample at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` outside the raster.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        self.check_bounds(x, y)?;
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the raster.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[self.index(x, y)]
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the raster.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Sample at signed coordinates, `None` outside the raster.
    #[inline]
    pub fn get_pixel_signed(&self, x: i64, y: i64) -> Option<f32> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(self.get_pixel_unchecked(x as u32, y as u32))
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Quantize to 8 bits with a saturating cast.
    ///
    /// Fractions are dropped toward zero, negatives become 0, values above
    /// 255 become 255 and NaN becomes 0.
    ///
    /// # Errors
    ///
    /// Propagates the error from building the output [`Pix`].
    pub fn to_pix_truncated(&self) -> Result<Pix> {
        let data = self.data.iter().map(|&v| v as u8).collect();
        Pix::from_data(self.width, self.height, data)
    }

    /// Element-wise sum.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the sizes differ.
    pub fn add(&self, other: &FPix) -> Result<FPix> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a + b)
            .collect();
        Ok(FPix {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Scale every sample in place.
    pub fn mul_constant(&mut self, factor: f32) {
        self.data.iter_mut().for_each(|v| *v *= factor);
    }

    /// Largest sample and its position, first in raster order.
    ///
    /// NaN samples are ignored; `None` if there are no others.
    pub fn max(&self) -> Option<(f32, u32, u32)> {
        let mut best: Option<(f32, usize)> = None;
        for (idx, &v) in self.data.iter().enumerate() {
            if v.is_nan() || best.is_some_and(|(b, _)| v <= b) {
                continue;
            }
            best = Some((v, idx));
        }
        let w = self.width as usize;
        best.map(|(v, idx)| (v, (idx % w) as u32, (idx / w) as u32))
    }

    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Number of NaN or infinite samples.
    pub fn count_non_finite(&self) -> usize {
        self.data.iter().filter(|v| !v.is_finite()).count()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}
