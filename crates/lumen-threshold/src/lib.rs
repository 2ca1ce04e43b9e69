//! lumen-threshold - Global binarization of grayscale images
//!
//! - [`threshold_to_binary`] - fixed threshold, `>= t` becomes foreground
//! - [`isodata`] - iterative intermeans threshold selection from the
//!   gray histogram, followed by binarization
//!
//! Binary outputs hold only `0` and `255`.

pub mod binarize;
mod error;
pub mod isodata;

pub use binarize::threshold_to_binary;
pub use error::{ThresholdError, ThresholdResult};
pub use isodata::{
    IsodataEstimate, IsodataOptions, IsodataResult, Termination, isodata,
    isodata_threshold, isodata_threshold_from_histogram,
};
