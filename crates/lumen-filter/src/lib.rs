//! lumen-filter - Spatial filtering of grayscale rasters
//!
//! This crate provides:
//!
//! - Correlation with arbitrary odd-sized kernels, zero padded at borders
//! - Kernel builders (box, Gaussian, binomial, Gaussian derivative, Sobel)
//! - Gradient-based edge detection with non-maximum suppression
//! - Rank filtering (median)
//! - Linear blending of two images

pub mod blend;
pub mod correlate;
pub mod edge;
mod error;
pub mod kernel;
pub mod rank;

pub use error::{FilterError, FilterResult};
pub use kernel::{DerivativeAxis, Kernel, binomial_coefficient};

// Re-export commonly used functions
pub use blend::{blend_gray, smooth_blend};
pub use correlate::{correlate, correlate_fpix, correlate_to_pix};
pub use edge::{
    EdgeDetector, EdgeOptions, GaussianDerivativeOptions, GradientField, StepDirection,
    detect_edges,
};
pub use rank::{median_filter, rank_filter};
