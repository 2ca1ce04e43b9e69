//! lumen-core - Basic raster types for grayscale image processing
//!
//! This crate provides the fundamental data structures shared by the
//! filtering, morphology and thresholding crates:
//!
//! - [`Pix`] / [`PixMut`] - 8-bit grayscale raster (immutable / mutable)
//! - [`FPix`] - Floating-point raster for intermediate results
//! - [`GrayHistogram`] - Fixed 256-bin intensity histogram
//!
//! Binary outputs (edge maps, thresholded images) are ordinary `Pix`
//! rasters holding only [`BINARY_OFF`] and [`BINARY_ON`].

pub mod error;
pub mod fpix;
pub mod pix;

pub use error::{Error, Result};
pub use fpix::FPix;
pub use pix::{GrayHistogram, Pix, PixMut};

/// Value of a background pixel in a binary raster.
pub const BINARY_OFF: u8 = 0;

/// Value of a foreground pixel in a binary raster.
pub const BINARY_ON: u8 = 255;
