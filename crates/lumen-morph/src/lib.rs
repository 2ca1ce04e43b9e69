//! lumen-morph - Grayscale morphology
//!
//! Flat square structuring elements of side `2 * radius + 1`. The window is
//! clipped to the image, so samples outside the image never take part in
//! the minimum or maximum.
//!
//! # Examples
//!
//! ```
//! use lumen_core::Pix;
//! use lumen_morph::{close_gray, open_gray};
//!
//! let pix = Pix::from_data(3, 1, vec![10, 200, 10]).unwrap();
//! let opened = open_gray(&pix, 1).unwrap();
//! assert_eq!(opened.data(), &[10, 10, 10]);
//! let closed = close_gray(&pix, 1).unwrap();
//! assert_eq!(closed.data(), &[200, 200, 200]);
//! ```

mod error;
pub mod grayscale;

pub use error::{MorphError, MorphResult};
pub use grayscale::{
    GrayMorphOp, MorphOptions, bottom_hat_gray, close_gray, dilate_gray, erode_gray,
    gradient_gray, morph_gray, open_gray, top_hat_gray,
};
