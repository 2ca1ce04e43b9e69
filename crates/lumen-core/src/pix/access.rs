//! Pixel access functions
//!
//! Bounds-checked and unchecked accessors for individual samples.

use super::{Pix, PixMut};
use crate::error::{Error, Result};

impl Pix {
    /// Get a sample at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a sample without bounds checking against the width.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the data buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[(y as usize) * (self.width() as usize) + (x as usize)]
    }

    /// Get a sample at signed coordinates, `None` if outside the image.
    ///
    /// Neighbourhood loops use this to exclude out-of-bounds positions.
    #[inline]
    pub fn get_pixel_signed(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return None;
        }
        Some(self.get_pixel_unchecked(x as u32, y as u32))
    }
}

impl PixMut {
    /// Get a sample at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a sample without bounds checking against the width.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[(y as usize) * (self.width() as usize) + (x as usize)]
    }

    /// Set a sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a sample without bounds checking against the width.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the data buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let idx = (y as usize) * (self.width() as usize) + (x as usize);
        self.data_mut()[idx] = val;
    }
}
