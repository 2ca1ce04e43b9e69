//! Fixed-threshold binarization

use crate::ThresholdResult;
use lumen_core::{BINARY_OFF, BINARY_ON, Pix};

/// Convert a grayscale image to binary using a fixed threshold
///
/// Pixels >= threshold become 255, pixels < threshold become 0. A threshold
/// of 0 therefore marks every pixel as foreground.
pub fn threshold_to_binary(pix: &Pix, threshold: u8) -> ThresholdResult<Pix> {
    let data = pix
        .data()
        .iter()
        .map(|&v| if v >= threshold { BINARY_ON } else { BINARY_OFF })
        .collect();
    Ok(Pix::from_data(pix.width(), pix.height(), data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_inclusive_high_side() {
        let pix = Pix::from_data(4, 1, vec![0, 99, 100, 255]).unwrap();
        let bin = threshold_to_binary(&pix, 100).unwrap();
        assert_eq!(bin.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_threshold_extremes() {
        let pix = Pix::from_data(3, 1, vec![0, 128, 255]).unwrap();
        assert_eq!(threshold_to_binary(&pix, 0).unwrap().count_value(255), 3);
        assert_eq!(threshold_to_binary(&pix, 255).unwrap().data(), &[0, 0, 255]);
    }
}
