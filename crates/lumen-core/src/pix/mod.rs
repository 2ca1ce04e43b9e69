//! PIX - The 8-bit grayscale raster
//!
//! `Pix` is the image type every component consumes. Each sample is one
//! unsigned byte; binary results use the same type restricted to
//! [`BINARY_OFF`](crate::BINARY_OFF) and [`BINARY_ON`](crate::BINARY_ON).
//!
//! # Pixel layout
//!
//! - Samples are stored row-major with no padding
//! - The sample at column `x`, row `y` lives at index `y * width + x`
//! - Origin is the top-left corner
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;
mod arith;
mod histogram;

pub use histogram::GrayHistogram;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples (row-major, no padding)
    data: Vec<u8>,
}

impl PixData {
    fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(PixData {
            width,
            height,
            data: vec![value; size],
        })
    }
}

/// PIX - 8-bit grayscale raster
///
/// Clones share the underlying samples through an `Arc`.
///
/// # Examples
///
/// ```
/// use lumen_core::Pix;
///
/// let pix = Pix::new(640, 480).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// assert_eq!(pix.get_pixel(10, 10), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with all samples set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0)
    }

    /// Create a new PIX with all samples set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: u8) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::filled(width, height, value)?),
        })
    }

    /// Create a PIX from row-major sample data.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length
    /// doesn't match `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                data,
            }),
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

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
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
        let start = (y as usize) * w;
        &self.inner.data[start..start + w]
    }

    /// Create a new zero-filled PIX with the same dimensions.
    pub fn create_template(&self) -> Self {
        let size = self.inner.data.len();
        Pix {
            inner: Arc::new(PixData {
                width: self.inner.width,
                height: self.inner.height,
                data: vec![0u8; size],
            }),
        }
    }

    /// Check if two PIX have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Return an error unless `other` has the same dimensions.
    pub fn check_same_size(&self, other: &Pix) -> Result<()> {
        if self.sizes_equal(other) {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            })
        }
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zero-filled mutable PIX.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::filled(width, height, 0)?,
        })
    }

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

    /// Set every sample to `value`.
    pub fn set_all(&mut self, value: u8) {
        self.inner.data.fill(value);
    }
}

impl From<PixMut> for Pix {
    fn from(pix: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix.inner),
        }
    }
}
