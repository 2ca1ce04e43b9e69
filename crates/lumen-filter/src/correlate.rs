//! Correlation operations
//!
//! Computes `out(i, j) = Σ image(i+k-kh, j+l-kw) * kernel(k, l)` where
//! `kh`/`kw` are the kernel's centre row/column. Samples outside the image
//! contribute zero. The kernel is not flipped and not normalized.

use crate::{FilterResult, Kernel};
use lumen_core::{FPix, Pix};

/// Correlate an 8-bit grayscale image with a kernel.
///
/// Returns a floating-point raster of the same size. Border samples outside
/// the image are treated as zero, so results near the border are attenuated
/// compared to the interior.
///
/// # Panics
///
/// Panics if the kernel has an even dimension. [`Kernel`] constructors
/// never produce one.
pub fn correlate(pix: &Pix, kernel: &Kernel) -> FilterResult<FPix> {
    correlate_fpix(&FPix::from_pix(pix), kernel)
}

/// Correlate a floating-point raster with a kernel.
///
/// Same border handling as [`correlate`].
///
/// # Panics
///
/// Panics if the kernel has an even dimension.
pub fn correlate_fpix(fpix: &FPix, kernel: &Kernel) -> FilterResult<FPix> {
    assert!(
        kernel.width() % 2 == 1 && kernel.height() % 2 == 1,
        "kernel dimensions must be odd"
    );

    let w = fpix.width();
    let h = fpix.height();
    let kw = kernel.width();
    let kh = kernel.height();
    let kcx = kernel.center_x() as i64;
    let kcy = kernel.center_y() as i64;
    let weights = kernel.data();

    let mut out = FPix::new(w, h)?;

    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0f32;

            for ky in 0..kh {
                let sy = y as i64 + (ky as i64 - kcy);
                if sy < 0 || sy >= h as i64 {
                    continue;
                }
                let src = fpix.row(sy as u32);
                let krow = &weights[(ky * kw) as usize..((ky + 1) * kw) as usize];

                for (kx, &k) in krow.iter().enumerate() {
                    let sx = x as i64 + (kx as i64 - kcx);
                    // Zero padding
                    if sx < 0 || sx >= w as i64 {
                        continue;
                    }
                    sum += src[sx as usize] * k;
                }
            }

            out.set_pixel_unchecked(x, y, sum);
        }
    }

    Ok(out)
}

/// Correlate and quantize the result back to 8 bits.
///
/// Each value is converted with a saturating cast: fractions are truncated
/// toward zero, negatives become 0, values above 255 become 255, NaN
/// becomes 0.
pub fn correlate_to_pix(pix: &Pix, kernel: &Kernel) -> FilterResult<Pix> {
    Ok(correlate(pix, kernel)?.to_pix_truncated()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_3x3() -> Pix {
        Pix::from_data(3, 3, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap()
    }

    #[test]
    fn test_identity_kernel() {
        let pix = ramp_3x3();
        let out = correlate(&pix, &Kernel::identity()).unwrap();
        assert_eq!(out, FPix::from_pix(&pix));
    }

    #[test]
    fn test_kernel_is_not_flipped() {
        // Weight 1 at the right neighbour picks the sample to the right
        let mut k = Kernel::new(3, 1).unwrap();
        k.set(2, 0, 1.0).unwrap();
        let out = correlate(&ramp_3x3(), &k).unwrap();
        assert_eq!(out.row(0), &[2.0, 3.0, 0.0]);
        assert_eq!(out.row(2), &[8.0, 9.0, 0.0]);
    }

    #[test]
    fn test_zero_padding_at_corner() {
        let pix = Pix::new_with_value(4, 4, 9).unwrap();
        let ones = Kernel::box_kernel(3).unwrap().scaled(9.0);
        let out = correlate(&pix, &ones).unwrap();
        // Corner sees 4 of 9 samples, edge 6, interior 9
        assert!((out.get_pixel(0, 0).unwrap() - 36.0).abs() < 1e-4);
        assert!((out.get_pixel(1, 0).unwrap() - 54.0).abs() < 1e-4);
        assert!((out.get_pixel(1, 1).unwrap() - 81.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_normalization() {
        let pix = Pix::new_with_value(3, 3, 100).unwrap();
        let k = Kernel::from_slice(1, 1, &[3.0]).unwrap();
        let out = correlate(&pix, &k).unwrap();
        assert_eq!(out.get_pixel(1, 1).unwrap(), 300.0);
        // Saturates on quantization
        let q = correlate_to_pix(&pix, &k).unwrap();
        assert_eq!(q.get_pixel(1, 1), Some(255));
    }

    #[test]
    fn test_to_pix_truncates() {
        let pix = Pix::from_data(3, 1, vec![10, 11, 0]).unwrap();
        let k = Kernel::from_slice(1, 1, &[0.5]).unwrap();
        let q = correlate_to_pix(&pix, &k).unwrap();
        assert_eq!(q.data(), &[5, 5, 0]);

        let neg = Kernel::from_slice(1, 1, &[-1.0]).unwrap();
        let q = correlate_to_pix(&pix, &neg).unwrap();
        assert_eq!(q.data(), &[0, 0, 0]);
    }

    #[test]
    fn test_single_pixel_image() {
        let pix = Pix::new_with_value(1, 1, 20).unwrap();
        let out = correlate(&pix, &Kernel::box_kernel(5).unwrap()).unwrap();
        assert!((out.get_pixel(0, 0).unwrap() - 20.0 / 25.0).abs() < 1e-5);
    }
}
