//! Isodata (iterative intermeans) threshold selection
//!
//! Starting from an initial guess `θ`, the gray levels are split into a
//! lower partition `[0, floor(θ)]` and an upper partition
//! `(floor(θ), 255]`. The next guess is the midpoint of the two partition
//! means:
//!
//! ```text
//! φ(θ) = 0.5 * (mean_lower(θ) + mean_upper(θ))
//! ```
//!
//! The iteration stops once `|θ - φ(θ)|` drops below the tolerance and the
//! threshold is `θ` rounded to the nearest integer. Both means come from
//! prefix sums of the histogram, so each step is O(1).
//!
//! Two guards make the iteration total:
//!
//! - if a partition has no samples but the histogram holds at least two
//!   gray levels, `θ` is reset to the overall mean, which always splits
//!   the occupied levels; a single-level histogram stops at the current
//!   `θ` ([`Termination::DegeneratePartition`]);
//! - at most `max_iterations` steps are taken
//!   ([`Termination::IterationLimit`]).

use crate::binarize::threshold_to_binary;
use crate::{ThresholdError, ThresholdResult};
use lumen_core::{GrayHistogram, Pix};
use tracing::{debug, warn};

/// Options for isodata threshold selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsodataOptions {
    /// Starting guess, in [0, 255]
    pub initial: f64,
    /// Convergence tolerance on `|θ - φ(θ)|`
    pub tolerance: f64,
    /// Upper bound on the number of `φ` evaluations
    pub max_iterations: u32,
}

impl Default for IsodataOptions {
    fn default() -> Self {
        Self {
            initial: 127.5,
            tolerance: 1e-3,
            max_iterations: 256,
        }
    }
}

impl IsodataOptions {
    fn validate(&self) -> ThresholdResult<()> {
        if !(0.0..=255.0).contains(&self.initial) {
            return Err(ThresholdError::InvalidParameters(format!(
                "initial guess must be in [0, 255], got {}",
                self.initial
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(ThresholdError::InvalidParameters(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(ThresholdError::InvalidParameters(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Why the iteration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// `|θ - φ(θ)|` fell below the tolerance
    Converged,
    /// The histogram holds a single gray level; the current `θ` was kept
    DegeneratePartition,
    /// `max_iterations` was reached; the last `θ` was kept
    IterationLimit,
}

/// Threshold selected from a histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsodataEstimate {
    /// Final threshold, `θ` rounded to nearest
    pub threshold: u8,
    /// Final fixed-point value
    pub theta: f64,
    /// Number of `φ` evaluations performed
    pub iterations: u32,
    /// How the iteration ended
    pub termination: Termination,
}

/// Threshold and binarized image.
#[derive(Debug, Clone)]
pub struct IsodataResult {
    /// Final threshold, `θ` rounded to nearest
    pub threshold: u8,
    /// Final fixed-point value
    pub theta: f64,
    /// Number of `φ` evaluations performed
    pub iterations: u32,
    /// How the iteration ended
    pub termination: Termination,
    /// `>= threshold` as 255, the rest 0
    pub binary: Pix,
}

/// Prefix sums needed to evaluate `φ` in constant time.
struct Intermeans {
    cumulative: [u64; 256],
    weighted: [u64; 256],
}

impl Intermeans {
    fn new(hist: &GrayHistogram) -> Self {
        Self {
            cumulative: hist.cumulative(),
            weighted: hist.weighted_cumulative(),
        }
    }

    /// `φ(θ)`, or `None` if either partition is empty.
    fn phi(&self, theta: f64) -> Option<f64> {
        let k = (theta.floor() as usize).min(255);
        let total = self.cumulative[255];
        let total_weighted = self.weighted[255];

        let n_lower = self.cumulative[k];
        let n_upper = total - n_lower;
        if n_lower == 0 || n_upper == 0 {
            return None;
        }

        let mean_lower = self.weighted[k] as f64 / n_lower as f64;
        let mean_upper = (total_weighted - self.weighted[k]) as f64 / n_upper as f64;
        Some(0.5 * (mean_lower + mean_upper))
    }

    /// Mean gray level of the whole histogram.
    fn overall_mean(&self) -> f64 {
        self.weighted[255] as f64 / self.cumulative[255] as f64
    }
}

/// Select a threshold from a gray histogram.
///
/// # Errors
///
/// Returns [`ThresholdError::InvalidParameters`] if the options are out of
/// range or the histogram is empty.
pub fn isodata_threshold_from_histogram(
    hist: &GrayHistogram,
    options: &IsodataOptions,
) -> ThresholdResult<IsodataEstimate> {
    options.validate()?;
    if hist.total() == 0 {
        return Err(ThresholdError::InvalidParameters(
            "histogram has no samples".to_string(),
        ));
    }

    let means = Intermeans::new(hist);
    let mut theta = options.initial;
    let mut iterations = 0;
    let mut termination = Termination::IterationLimit;

    while iterations < options.max_iterations {
        iterations += 1;
        let Some(next) = means.phi(theta) else {
            if hist.occupied_levels() < 2 {
                termination = Termination::DegeneratePartition;
                break;
            }
            // min < mean < max, so the mean has samples on both sides
            let mean = means.overall_mean();
            debug!(
                iteration = iterations,
                theta, mean, "isodata partition empty, restarting at mean"
            );
            theta = mean;
            continue;
        };
        debug!(iteration = iterations, theta, next, "isodata step");
        if (theta - next).abs() < options.tolerance {
            termination = Termination::Converged;
            break;
        }
        theta = next;
    }

    match termination {
        Termination::Converged => {}
        Termination::DegeneratePartition => warn!(
            theta,
            iterations,
            occupied_levels = hist.occupied_levels(),
            "isodata histogram has a single level, keeping current threshold"
        ),
        Termination::IterationLimit => {
            warn!(theta, iterations, "isodata did not converge, using last threshold")
        }
    }

    // Partition means lie in [0, 255], so theta does too
    let threshold = theta.round().clamp(0.0, 255.0) as u8;
    Ok(IsodataEstimate {
        threshold,
        theta,
        iterations,
        termination,
    })
}

/// Select an isodata threshold for `pix` and binarize it.
pub fn isodata(pix: &Pix, options: &IsodataOptions) -> ThresholdResult<IsodataResult> {
    let estimate = isodata_threshold_from_histogram(&pix.gray_histogram(), options)?;
    let binary = threshold_to_binary(pix, estimate.threshold)?;
    debug!(
        threshold = estimate.threshold,
        iterations = estimate.iterations,
        "isodata threshold selected"
    );
    Ok(IsodataResult {
        threshold: estimate.threshold,
        theta: estimate.theta,
        iterations: estimate.iterations,
        termination: estimate.termination,
        binary,
    })
}

/// Isodata threshold and binary image with default options.
pub fn isodata_threshold(pix: &Pix) -> ThresholdResult<(u8, Pix)> {
    let result = isodata(pix, &IsodataOptions::default())?;
    Ok((result.threshold, result.binary))
}
