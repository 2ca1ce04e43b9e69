//! Gradient edge detection with non-maximum suppression
//!
//! Edges are found in two stages:
//!
//! 1. [`GradientField::compute`] correlates the image with a pair of
//!    derivative kernels and stores the gradient magnitude and orientation.
//! 2. [`GradientField::suppress`] quantizes each orientation to one of three
//!    step directions and keeps a pixel only if its magnitude exceeds the
//!    threshold and both neighbours along the step.
//!
//! The first kernel (`dx`) measures change down the rows and the second
//! (`dy`) change across the columns. The orientation `atan(gx / gy)` is
//! then the angle of the gradient measured from the horizontal axis.
//! [`Kernel::gaussian_derivative`] with [`DerivativeAxis::Vertical`] and
//! [`DerivativeAxis::Horizontal`], or [`Kernel::sobel_y`] and
//! [`Kernel::sobel_x`], give such a pair.
//!
//! Stage 2 is cheap, so callers that tune the threshold interactively keep
//! the [`GradientField`] (or an [`EdgeDetector`]) and re-run only that
//! stage.
//!
//! [`DerivativeAxis::Vertical`]: crate::DerivativeAxis::Vertical
//! [`DerivativeAxis::Horizontal`]: crate::DerivativeAxis::Horizontal

use std::f32::consts::FRAC_PI_8;

use crate::correlate::correlate;
use crate::{DerivativeAxis, FilterError, FilterResult, Kernel};
use lumen_core::{BINARY_ON, FPix, Pix, PixMut};
use tracing::debug;

/// Quantized direction along which neighbours are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepDirection {
    /// Left and right neighbours (row step 0, column step 1)
    Horizontal,
    /// Up-left and down-right neighbours (row step 1, column step 1)
    Diagonal,
    /// Up and down neighbours (row step 1, column step 0)
    Vertical,
}

impl StepDirection {
    /// Quantize an orientation in radians by its absolute value.
    ///
    /// `|θ| < π/8` maps to [`Horizontal`](Self::Horizontal),
    /// `π/8 <= |θ| < 3π/8` to [`Diagonal`](Self::Diagonal) and anything
    /// larger to [`Vertical`](Self::Vertical). NaN (zero gradient) maps to
    /// `Horizontal`.
    ///
    /// Both signs of a diagonal orientation map to the same
    /// down-right step.
    pub fn from_orientation(theta: f32) -> Self {
        let a = theta.abs();
        if a >= 3.0 * FRAC_PI_8 {
            StepDirection::Vertical
        } else if a >= FRAC_PI_8 {
            StepDirection::Diagonal
        } else {
            StepDirection::Horizontal
        }
    }

    /// Step as (column offset, row offset).
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        match self {
            StepDirection::Horizontal => (1, 0),
            StepDirection::Diagonal => (1, 1),
            StepDirection::Vertical => (0, 1),
        }
    }
}

/// Per-pixel gradient magnitude and orientation.
#[derive(Debug, Clone)]
pub struct GradientField {
    magnitude: FPix,
    orientation: FPix,
}

impl GradientField {
    /// Correlate `pix` with both kernels and derive magnitude and orientation.
    ///
    /// Kernels should be of the same scale (for example both normalized by
    /// their absolute sums); this is not checked.
    ///
    /// Division by zero in `gx / gy` follows IEEE rules: a nonzero
    /// numerator gives ±π/2 and `0 / 0` gives NaN.
    pub fn compute(pix: &Pix, dx: &Kernel, dy: &Kernel) -> FilterResult<Self> {
        let gx = correlate(pix, dx)?;
        let gy = correlate(pix, dy)?;
        let field = Self::from_components(&gx, &gy)?;
        debug!(
            width = pix.width(),
            height = pix.height(),
            max_magnitude = field.magnitude.max().map_or(0.0, |(m, _, _)| m),
            non_finite = field.orientation.count_non_finite(),
            "computed gradient field"
        );
        Ok(field)
    }

    /// Build the field from precomputed derivative responses.
    ///
    /// # Errors
    ///
    /// Returns an error if `gx` and `gy` differ in size.
    pub fn from_components(gx: &FPix, gy: &FPix) -> FilterResult<Self> {
        if gx.dimensions() != gy.dimensions() {
            return Err(lumen_core::Error::DimensionMismatch {
                expected: gx.dimensions(),
                actual: gy.dimensions(),
            }
            .into());
        }

        let mut magnitude = gx.create_template();
        let mut orientation = gx.create_template();

        for ((m, o), (&x, &y)) in magnitude
            .data_mut()
            .iter_mut()
            .zip(orientation.data_mut().iter_mut())
            .zip(gx.data().iter().zip(gy.data().iter()))
        {
            *m = (x * x + y * y).sqrt();
            *o = (x / y).atan();
        }

        Ok(GradientField {
            magnitude,
            orientation,
        })
    }

    /// Gradient magnitude `sqrt(gx² + gy²)`.
    pub fn magnitude(&self) -> &FPix {
        &self.magnitude
    }

    /// Gradient orientation `atan(gx / gy)` in radians.
    pub fn orientation(&self) -> &FPix {
        &self.orientation
    }

    /// Width of the field.
    pub fn width(&self) -> u32 {
        self.magnitude.width()
    }

    /// Height of the field.
    pub fn height(&self) -> u32 {
        self.magnitude.height()
    }

    /// Quantized step direction at (x, y), if in bounds.
    pub fn direction_at(&self, x: u32, y: u32) -> Option<StepDirection> {
        self.orientation
            .get_pixel(x, y)
            .ok()
            .map(StepDirection::from_orientation)
    }

    /// Quantized step direction for every pixel, row-major.
    pub fn directions(&self) -> Vec<StepDirection> {
        self.orientation
            .data()
            .iter()
            .map(|&t| StepDirection::from_orientation(t))
            .collect()
    }

    /// Non-maximum suppression.
    ///
    /// A pixel becomes 255 if its magnitude is greater than `threshold` and
    /// strictly greater than both neighbours along its step direction.
    /// Neighbours outside the image are not compared. All other pixels are
    /// 0.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `threshold` is NaN.
    pub fn suppress(&self, threshold: f32) -> FilterResult<Pix> {
        check_threshold(threshold)?;
        let w = self.width();
        let h = self.height();
        let mag = &self.magnitude;

        let mut out = PixMut::new(w, h)?;
        let mut count = 0usize;

        for y in 0..h {
            for x in 0..w {
                let g = mag.get_pixel_unchecked(x, y);
                if !(g > threshold) {
                    continue;
                }

                let step =
                    StepDirection::from_orientation(self.orientation.get_pixel_unchecked(x, y));
                let (sx, sy) = step.offset();
                let (xi, yi) = (x as i64, y as i64);

                let before = mag.get_pixel_signed(xi - sx, yi - sy);
                let after = mag.get_pixel_signed(xi + sx, yi + sy);
                let is_max = before.is_none_or(|n| g > n) && after.is_none_or(|n| g > n);

                if is_max {
                    out.set_pixel_unchecked(x, y, BINARY_ON);
                    count += 1;
                }
            }
        }

        debug!(threshold, edges = count, "non-maximum suppression");
        Ok(out.into())
    }
}

/// Options for edge extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeOptions {
    /// Minimum gradient magnitude for an edge pixel (exclusive).
    /// Interactive front ends usually offer 0 to 50.
    pub threshold: f32,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self { threshold: 10.0 }
    }
}

/// Parameters of the Gaussian-derivative kernel pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianDerivativeOptions {
    /// Kernel side is `2 * half_size + 1`
    pub half_size: u32,
    /// Gaussian spread σ
    pub sigma: f32,
}

impl Default for GaussianDerivativeOptions {
    fn default() -> Self {
        Self {
            half_size: 2,
            sigma: 2.5,
        }
    }
}

impl GaussianDerivativeOptions {
    /// Build the `(dx, dy)` kernel pair.
    ///
    /// Both are negated so that intensity increasing down the rows (for
    /// `dx`) or across the columns (for `dy`) gives a positive response.
    pub fn kernels(&self) -> FilterResult<(Kernel, Kernel)> {
        let dx = Kernel::gaussian_derivative(self.half_size, self.sigma, DerivativeAxis::Vertical)?;
        let dy =
            Kernel::gaussian_derivative(self.half_size, self.sigma, DerivativeAxis::Horizontal)?;
        Ok((dx.negated(), dy.negated()))
    }
}

/// Edge detection pipeline with a cached gradient field.
///
/// # Examples
///
/// ```
/// use lumen_core::Pix;
/// use lumen_filter::{EdgeDetector, EdgeOptions, GaussianDerivativeOptions};
///
/// let pix = Pix::new_with_value(16, 16, 80).unwrap();
/// let mut detector = EdgeDetector::gaussian(
///     &pix,
///     &GaussianDerivativeOptions::default(),
///     EdgeOptions::default(),
/// )
/// .unwrap();
/// detector.set_threshold(25.0).unwrap();
/// let edges = detector.edges().unwrap();
/// assert_eq!(edges.width(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    gradients: GradientField,
    options: EdgeOptions,
}

impl EdgeDetector {
    /// Compute the gradient field of `pix` with the given kernel pair.
    pub fn new(pix: &Pix, dx: &Kernel, dy: &Kernel, options: EdgeOptions) -> FilterResult<Self> {
        check_threshold(options.threshold)?;
        Ok(Self {
            gradients: GradientField::compute(pix, dx, dy)?,
            options,
        })
    }

    /// Compute the gradient field with negated Gaussian-derivative kernels.
    pub fn gaussian(
        pix: &Pix,
        kernel_options: &GaussianDerivativeOptions,
        options: EdgeOptions,
    ) -> FilterResult<Self> {
        let (dx, dy) = kernel_options.kernels()?;
        Self::new(pix, &dx, &dy, options)
    }

    /// Current threshold.
    pub fn threshold(&self) -> f32 {
        self.options.threshold
    }

    /// Change the threshold. The gradient field is kept.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `threshold` is NaN; the
    /// previous threshold stays in effect.
    pub fn set_threshold(&mut self, threshold: f32) -> FilterResult<()> {
        check_threshold(threshold)?;
        self.options.threshold = threshold;
        Ok(())
    }

    /// Cached gradient field.
    pub fn gradients(&self) -> &GradientField {
        &self.gradients
    }

    /// Binary edge map for the current threshold.
    pub fn edges(&self) -> FilterResult<Pix> {
        self.gradients.suppress(self.options.threshold)
    }
}

/// Detect edges in one call.
///
/// Equivalent to `GradientField::compute(pix, dx, dy)?.suppress(threshold)`.
pub fn detect_edges(pix: &Pix, dx: &Kernel, dy: &Kernel, threshold: f32) -> FilterResult<Pix> {
    check_threshold(threshold)?;
    GradientField::compute(pix, dx, dy)?.suppress(threshold)
}

fn check_threshold(threshold: f32) -> FilterResult<()> {
    if threshold.is_nan() {
        return Err(FilterError::InvalidParameters(
            "edge threshold must not be NaN".to_string(),
        ));
    }
    Ok(())
}
