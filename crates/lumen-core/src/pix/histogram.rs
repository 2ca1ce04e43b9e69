//! Gray-level histogram
//!
//! A fixed 256-bin histogram of an 8-bit raster together with the prefix
//! sums the isodata thresholder needs. All buffers are plain arrays; the
//! sizes are known at compile time.

use super::Pix;

/// Number of gray levels in an 8-bit raster.
pub const GRAY_LEVELS: usize = 256;

/// Histogram of sample values of an 8-bit raster.
///
/// # Examples
///
/// ```
/// use lumen_core::{GrayHistogram, Pix};
///
/// let pix = Pix::from_data(4, 1, vec![0, 0, 10, 255]).unwrap();
/// let hist = GrayHistogram::from_pix(&pix);
/// assert_eq!(hist.count(0), 2);
/// assert_eq!(hist.total(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayHistogram {
    counts: [u32; GRAY_LEVELS],
}

impl GrayHistogram {
    /// Build the histogram of every sample in `pix`.
    pub fn from_pix(pix: &Pix) -> Self {
        let mut counts = [0u32; GRAY_LEVELS];
        for &v in pix.data() {
            counts[v as usize] += 1;
        }
        GrayHistogram { counts }
    }

    /// Wrap precomputed counts.
    pub fn from_counts(counts: [u32; GRAY_LEVELS]) -> Self {
        GrayHistogram { counts }
    }

    /// Count for one gray level.
    #[inline]
    pub fn count(&self, level: u8) -> u32 {
        self.counts[level as usize]
    }

    /// All 256 counts.
    #[inline]
    pub fn counts(&self) -> &[u32; GRAY_LEVELS] {
        &self.counts
    }

    /// Total number of samples counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Prefix sums: `cumulative[i] = sum of counts[0..=i]`.
    pub fn cumulative(&self) -> [u64; GRAY_LEVELS] {
        let mut out = [0u64; GRAY_LEVELS];
        let mut acc = 0u64;
        for (dst, &c) in out.iter_mut().zip(self.counts.iter()) {
            acc += u64::from(c);
            *dst = acc;
        }
        out
    }

    /// Prefix sums of the intensity-weighted histogram:
    /// `weighted[i] = sum of k * counts[k] for k in 0..=i`.
    pub fn weighted_cumulative(&self) -> [u64; GRAY_LEVELS] {
        let mut out = [0u64; GRAY_LEVELS];
        let mut acc = 0u64;
        for (level, (dst, &c)) in out.iter_mut().zip(self.counts.iter()).enumerate() {
            acc += level as u64 * u64::from(c);
            *dst = acc;
        }
        out
    }

    /// Number of distinct gray levels present.
    pub fn occupied_levels(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

impl Pix {
    /// Compute the 256-bin gray histogram of this image.
    pub fn gray_histogram(&self) -> GrayHistogram {
        GrayHistogram::from_pix(self)
    }
}
