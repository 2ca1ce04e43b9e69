//! Linear blending of grayscale images

use crate::correlate::correlate_to_pix;
use crate::{FilterError, FilterResult, Kernel};
use lumen_core::{Pix, PixMut};

/// Blend two images of equal size.
///
/// Each output pixel is `lambda * a + (1 - lambda) * b`, rounded to the
/// nearest integer.
///
/// # Errors
///
/// Returns an error if the sizes differ or `lambda` is outside [0.0, 1.0].
pub fn blend_gray(a: &Pix, b: &Pix, lambda: f32) -> FilterResult<Pix> {
    if !(0.0..=1.0).contains(&lambda) {
        return Err(FilterError::InvalidParameters(format!(
            "lambda must be in [0.0, 1.0], got {lambda}"
        )));
    }
    a.check_same_size(b)?;

    let mut out = PixMut::new(a.width(), a.height())?;
    for (dst, (&va, &vb)) in out
        .data_mut()
        .iter_mut()
        .zip(a.data().iter().zip(b.data().iter()))
    {
        let v = lambda * va as f32 + (1.0 - lambda) * vb as f32;
        *dst = v.round().clamp(0.0, 255.0) as u8;
    }

    Ok(out.into())
}

/// Correlate `pix` with `kernel` and blend the result back into `pix`.
///
/// `lambda` weights the input image. With a smoothing kernel this
/// softens the image while keeping part of its detail.
pub fn smooth_blend(pix: &Pix, kernel: &Kernel, lambda: f32) -> FilterResult<Pix> {
    let filtered = correlate_to_pix(pix, kernel)?;
    blend_gray(pix, &filtered, lambda)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints_and_midpoint() {
        let a = Pix::new_with_value(2, 2, 200).unwrap();
        let b = Pix::new_with_value(2, 2, 50).unwrap();
        assert!(blend_gray(&a, &b, 1.0).unwrap().equals(&a));
        assert!(blend_gray(&a, &b, 0.0).unwrap().equals(&b));
        assert_eq!(blend_gray(&a, &b, 0.5).unwrap().get_pixel(0, 0), Some(125));
    }

    #[test]
    fn test_blend_rejects_bad_input() {
        let a = Pix::new(2, 2).unwrap();
        let b = Pix::new(3, 2).unwrap();
        assert!(blend_gray(&a, &b, 0.5).is_err());
        assert!(blend_gray(&a, &a, -0.1).is_err());
    }

    #[test]
    fn test_smooth_blend_constant_interior() {
        let pix = Pix::new_with_value(7, 7, 80).unwrap();
        let k = Kernel::box_kernel(3).unwrap();
        let out = smooth_blend(&pix, &k, 0.5).unwrap();
        // Interior box average is 80 up to rounding in the kernel weights
        let v = out.get_pixel(3, 3).unwrap();
        assert!((79..=80).contains(&v));
        // Zero padding darkens the corner
        assert!(out.get_pixel(0, 0).unwrap() < 80);
    }
}
