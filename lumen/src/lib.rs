//! Lumen - Grayscale image processing primitives
//!
//! # Overview
//!
//! - Correlation with arbitrary odd-sized kernels ([`filter`])
//! - Gradient edge detection with non-maximum suppression ([`filter`])
//! - Grayscale erosion, dilation, opening and closing ([`morph`])
//! - Isodata threshold selection and binarization ([`threshold`])
//!
//! Every operation takes its inputs by reference and returns a freshly
//! allocated result; nothing is cached between calls except in the
//! explicit [`filter::EdgeDetector`] pipeline object.
//!
//! # Example
//!
//! ```
//! use lumen::Pix;
//! use lumen::filter::{Kernel, correlate};
//! use lumen::morph::top_hat_gray;
//! use lumen::threshold::isodata_threshold;
//!
//! let pix = Pix::new_with_value(32, 32, 40).unwrap();
//! let smoothed = correlate(&pix, &Kernel::gaussian(2, 2.5).unwrap()).unwrap();
//! assert_eq!(smoothed.dimensions(), (32, 32));
//!
//! let flattened = top_hat_gray(&pix, 3).unwrap();
//! let (threshold, binary) = isodata_threshold(&flattened).unwrap();
//! assert_eq!(threshold, 128);
//! assert_eq!(binary.count_value(255), 0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use lumen_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use lumen_filter as filter;
pub use lumen_morph as morph;
pub use lumen_threshold as threshold;
