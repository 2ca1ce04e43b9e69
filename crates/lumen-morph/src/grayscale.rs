//! Grayscale morphological operations
//!
//! Implements erosion, dilation, opening and closing for 8-bit grayscale
//! images with a square structuring element.
//!
//! # Algorithm
//!
//! - **Dilation**: maximum sample value in the window
//! - **Erosion**: minimum sample value in the window
//! - **Opening**: erosion followed by dilation (removes small bright features)
//! - **Closing**: dilation followed by erosion (fills small dark features)
//!
//! Every output pixel rescans its whole window, so the cost is
//! `O(width * height * radius²)`.

use crate::MorphResult;
use lumen_core::{Pix, PixMut};
use tracing::debug;

/// Options for grayscale morphology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphOptions {
    /// Window half size; the structuring element is `2 * radius + 1` square.
    /// Interactive front ends usually offer 0 to 10.
    pub radius: u32,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self { radius: 3 }
    }
}

/// A grayscale morphological operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrayMorphOp {
    /// Window minimum
    Erode,
    /// Window maximum
    Dilate,
    /// Erode then dilate
    Open,
    /// Dilate then erode
    Close,
    /// Image minus its opening
    TopHat,
    /// Closing minus the image
    BottomHat,
    /// Dilation minus erosion
    Gradient,
}

/// Apply `op` with the radius from `options`.
pub fn morph_gray(pix: &Pix, op: GrayMorphOp, options: &MorphOptions) -> MorphResult<Pix> {
    let r = options.radius;
    debug!(?op, radius = r, "grayscale morphology");
    match op {
        GrayMorphOp::Erode => erode_gray(pix, r),
        GrayMorphOp::Dilate => dilate_gray(pix, r),
        GrayMorphOp::Open => open_gray(pix, r),
        GrayMorphOp::Close => close_gray(pix, r),
        GrayMorphOp::TopHat => top_hat_gray(pix, r),
        GrayMorphOp::BottomHat => bottom_hat_gray(pix, r),
        GrayMorphOp::Gradient => gradient_gray(pix, r),
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

/// Window minimum or maximum with the window clipped to the image.
fn window_extreme(pix: &Pix, radius: u32, extreme: Extreme) -> MorphResult<Pix> {
    if radius == 0 {
        return Ok(pix.deep_clone());
    }

    let w = pix.width() as i64;
    let h = pix.height() as i64;
    let r = radius as i64;
    let mut out = PixMut::new(pix.width(), pix.height())?;

    for y in 0..h {
        let y0 = (y - r).max(0) as u32;
        let y1 = (y + r).min(h - 1) as u32;
        for x in 0..w {
            let x0 = (x - r).max(0) as usize;
            let x1 = (x + r).min(w - 1) as usize;

            let mut acc = match extreme {
                Extreme::Min => u8::MAX,
                Extreme::Max => u8::MIN,
            };
            for sy in y0..=y1 {
                let row = &pix.row(sy)[x0..=x1];
                acc = match extreme {
                    Extreme::Min => row.iter().fold(acc, |a, &v| a.min(v)),
                    Extreme::Max => row.iter().fold(acc, |a, &v| a.max(v)),
                };
            }
            out.set_pixel_unchecked(x as u32, y as u32, acc);
        }
    }

    Ok(out.into())
}

/// Dilate a grayscale image with a square structuring element
///
/// Dilation computes the maximum pixel value in the window, which expands
/// bright regions and shrinks dark regions. Radius 0 returns a copy.
pub fn dilate_gray(pix: &Pix, radius: u32) -> MorphResult<Pix> {
    window_extreme(pix, radius, Extreme::Max)
}

/// Erode a grayscale image with a square structuring element
///
/// Erosion computes the minimum pixel value in the window, which shrinks
/// bright regions and expands dark regions. Radius 0 returns a copy.
pub fn erode_gray(pix: &Pix, radius: u32) -> MorphResult<Pix> {
    window_extreme(pix, radius, Extreme::Min)
}

/// Open a grayscale image (erosion followed by dilation)
///
/// Opening removes small bright features while preserving the overall shape.
pub fn open_gray(pix: &Pix, radius: u32) -> MorphResult<Pix> {
    let eroded = erode_gray(pix, radius)?;
    dilate_gray(&eroded, radius)
}

/// Close a grayscale image (dilation followed by erosion)
///
/// Closing fills small dark features while preserving the overall shape.
pub fn close_gray(pix: &Pix, radius: u32) -> MorphResult<Pix> {
    let dilated = dilate_gray(pix, radius)?;
    erode_gray(&dilated, radius)
}

/// Grayscale morphological gradient (dilation - erosion)
///
/// Highlights edges and boundaries in the image.
pub fn gradient_gray(pix: &Pix, radius: u32) -> MorphResult<Pix> {
    let dilated = dilate_gray(pix, radius)?;
    let eroded = erode_gray(pix, radius)?;
    Ok(dilated.arith_subtract(&eroded)?)
}

/// Grayscale top-hat transform (image - opening)
///
/// Extracts bright features smaller than the structuring element, and
/// flattens slowly varying background ahead of global thresholding.
pub fn top_hat_gray(pix: &Pix, radius: u32) -> MorphResult<Pix> {
    let opened = open_gray(pix, radius)?;
    Ok(pix.arith_subtract(&opened)?)
}

/// Grayscale bottom-hat transform (closing - image)
///
/// Extracts dark features smaller than the structuring element.
pub fn bottom_hat_gray(pix: &Pix, radius: u32) -> MorphResult<Pix> {
    let closed = close_gray(pix, radius)?;
    Ok(closed.arith_subtract(pix)?)
}
