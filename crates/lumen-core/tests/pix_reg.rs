//! Raster regression test
//!
//! Histogram prefix sums, saturating arithmetic and float conversions on
//! synthetic images.

use lumen_core::{FPix, GrayHistogram};
use lumen_test::{RegParams, synth};

#[test]
fn pix_reg() {
    let mut rp = RegParams::new("pix");

    // --- Test 1: histogram of a ramp ---
    let ramp = synth::ramp(256, 3).expect("ramp");
    let hist = GrayHistogram::from_pix(&ramp);
    rp.compare_values(768.0, hist.total() as f64, 0.0);
    rp.compare_values(256.0, hist.occupied_levels() as f64, 0.0);
    let cum = hist.cumulative();
    rp.compare_values(3.0, cum[0] as f64, 0.0);
    rp.compare_values(384.0, cum[127] as f64, 0.0);
    let wcum = hist.weighted_cumulative();
    // 3 * (0 + 1 + ... + 255)
    rp.compare_values(3.0 * 32640.0, wcum[255] as f64, 0.0);

    // --- Test 2: saturating arithmetic ---
    let low = synth::constant(8, 8, 100).expect("low");
    let high = synth::constant(8, 8, 200).expect("high");
    let sum = high.arith_add(&low).expect("add");
    rp.compare_values(64.0, sum.count_value(255) as f64, 0.0);
    let diff = low.arith_subtract(&high).expect("subtract");
    rp.compare_values(64.0, diff.count_value(0) as f64, 0.0);
    let diff = high.arith_subtract(&low).expect("subtract");
    rp.compare_pix(&low, &diff);
    let small = synth::constant(4, 4, 1).expect("small");
    rp.check(low.arith_add(&small).is_err(), "size mismatch rejected");

    // --- Test 3: inversion is an involution ---
    let noise = synth::noise(17, 11, 4).expect("noise");
    rp.compare_pix(&noise, &noise.invert().invert());

    // --- Test 4: float round trip and truncation ---
    let fpix = FPix::from_pix(&noise);
    rp.compare_pix(&noise, &fpix.to_pix_truncated().expect("quantize"));
    let mut scaled = fpix.clone();
    scaled.mul_constant(0.5);
    let halved = scaled.to_pix_truncated().expect("quantize");
    let truncates = noise
        .data()
        .iter()
        .zip(halved.data())
        .all(|(&a, &b)| b == a / 2);
    rp.check(truncates, "half values truncate toward zero");

    let mut negative = fpix.clone();
    negative.mul_constant(-1.0);
    rp.compare_values(
        (noise.width() * noise.height()) as f64,
        negative.to_pix_truncated().expect("quantize").count_value(0) as f64,
        0.0,
    );

    assert!(rp.cleanup(), "pix regression test failed");
}
