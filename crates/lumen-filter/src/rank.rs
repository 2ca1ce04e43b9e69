//! Rank filtering operations
//!
//! Order-statistic filters over a square window of side `2 * half_size + 1`.
//! The window is clipped to the image, so border pixels rank fewer samples.

use crate::{FilterError, FilterResult};
use lumen_core::{Pix, PixMut};

/// Apply a rank filter to a grayscale image.
///
/// For each pixel the in-bounds window samples are ordered and the one at
/// index `floor(rank * (n - 1))` is taken, where `n` is the number of
/// samples.
///
/// # Arguments
/// * `pix` - Input image
/// * `half_size` - Window half size (side is `2 * half_size + 1`)
/// * `rank` - Rank value in [0.0, 1.0] (0.0=min, 0.5=median, 1.0=max)
pub fn rank_filter(pix: &Pix, half_size: u32, rank: f32) -> FilterResult<Pix> {
    if !(0.0..=1.0).contains(&rank) {
        return Err(FilterError::InvalidParameters(format!(
            "rank must be in [0.0, 1.0], got {rank}"
        )));
    }
    if half_size == 0 {
        return Ok(pix.deep_clone());
    }

    let w = pix.width() as i64;
    let h = pix.height() as i64;
    let r = half_size as i64;
    let side = 2 * half_size as usize + 1;

    let mut out = PixMut::new(pix.width(), pix.height())?;
    let mut window: Vec<u8> = Vec::with_capacity(side * side);

    for y in 0..h {
        let y0 = (y - r).max(0);
        let y1 = (y + r).min(h - 1);
        for x in 0..w {
            let x0 = (x - r).max(0);
            let x1 = (x + r).min(w - 1);

            window.clear();
            for sy in y0..=y1 {
                let row = pix.row(sy as u32);
                window.extend_from_slice(&row[x0 as usize..=x1 as usize]);
            }

            let idx = (rank * (window.len() - 1) as f32).floor() as usize;
            let (_, &mut value, _) = window.select_nth_unstable(idx);
            out.set_pixel_unchecked(x as u32, y as u32, value);
        }
    }

    Ok(out.into())
}

/// Apply a median filter (rank = 0.5).
///
/// Returns the true median of the in-bounds samples; with an even sample
/// count (only possible at borders) the lower of the two middle values.
pub fn median_filter(pix: &Pix, half_size: u32) -> FilterResult<Pix> {
    rank_filter(pix, half_size, 0.5)
}
