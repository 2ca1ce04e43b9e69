//! Synthetic test rasters
//!
//! Deterministic images with known structure, so regression tests can
//! assert exact values without decoding image files.

use crate::TestResult;
use lumen_core::{Pix, PixMut};

/// Every pixel set to `value`.
pub fn constant(width: u32, height: u32, value: u8) -> TestResult<Pix> {
    Ok(Pix::new_with_value(width, height, value)?)
}

/// Zero image with a single pixel at (x, y) set to `value`.
pub fn impulse(width: u32, height: u32, x: u32, y: u32, value: u8) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height)?;
    pm.set_pixel(x, y, value)?;
    Ok(pm.into())
}

/// Columns `< split` are `left`, the rest `right` (a vertical step edge).
pub fn vertical_step(width: u32, height: u32, split: u32, left: u8, right: u8) -> TestResult<Pix> {
    from_fn(width, height, |x, _| if x < split { left } else { right })
}

/// Background `bg` with an axis-aligned filled square of side `size`
/// whose top-left corner is at (x0, y0).
pub fn square(width: u32, height: u32, x0: u32, y0: u32, size: u32, bg: u8, fg: u8) -> TestResult<Pix> {
    from_fn(width, height, |x, y| {
        if (x0..x0 + size).contains(&x) && (y0..y0 + size).contains(&y) {
            fg
        } else {
            bg
        }
    })
}

/// Half the pixels `low`, half `high`, interleaved as a checkerboard.
///
/// With an even pixel count the histogram has exactly 50% of its mass at
/// each of the two levels.
pub fn bimodal(width: u32, height: u32, low: u8, high: u8) -> TestResult<Pix> {
    from_fn(width, height, |x, y| if (x + y) % 2 == 0 { low } else { high })
}

/// Horizontal ramp from 0 at the left edge to 255 at the right edge.
pub fn ramp(width: u32, height: u32) -> TestResult<Pix> {
    let span = width.saturating_sub(1).max(1);
    from_fn(width, height, |x, _| ((x * 255) / span) as u8)
}

/// Pseudo-random samples from a fixed-seed generator.
pub fn noise(width: u32, height: u32, seed: u32) -> TestResult<Pix> {
    let mut rng = SimpleRng::new(seed);
    let data = (0..(width as usize) * (height as usize))
        .map(|_| (rng.next() >> 56) as u8)
        .collect();
    Ok(Pix::from_data(width, height, data)?)
}

/// Build an image by evaluating `f(x, y)` at every pixel.
pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, f(x, y));
        }
    }
    Ok(pm.into())
}

/// Simple linear congruential generator for reproducible randomness
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed) ^ 0x9e37_79b9_7f4a_7c15,
        }
    }

    fn next(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse() {
        let pix = impulse(5, 5, 2, 2, 9).unwrap();
        assert_eq!(pix.get_pixel(2, 2), Some(9));
        assert_eq!(pix.count_value(0), 24);
    }

    #[test]
    fn test_bimodal_is_balanced() {
        let pix = bimodal(8, 6, 50, 200).unwrap();
        assert_eq!(pix.count_value(50), 24);
        assert_eq!(pix.count_value(200), 24);
    }

    #[test]
    fn test_square_and_steps() {
        let sq = square(10, 10, 2, 3, 4, 0, 255).unwrap();
        assert_eq!(sq.count_value(255), 16);
        assert_eq!(sq.get_pixel(2, 3), Some(255));
        assert_eq!(sq.get_pixel(6, 3), Some(0));

        let v = vertical_step(6, 2, 3, 10, 20).unwrap();
        assert_eq!(v.row(0), &[10, 10, 10, 20, 20, 20]);
    }

    #[test]
    fn test_ramp_endpoints() {
        let r = ramp(16, 1).unwrap();
        assert_eq!(r.get_pixel(0, 0), Some(0));
        assert_eq!(r.get_pixel(15, 0), Some(255));
    }

    #[test]
    fn test_noise_is_deterministic() {
        let a = noise(16, 16, 7).unwrap();
        let b = noise(16, 16, 7).unwrap();
        let c = noise(16, 16, 8).unwrap();
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
        let (lo, hi) = a.min_max();
        assert!(hi > lo);
    }
}
