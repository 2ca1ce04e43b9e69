//! End-to-end regression test through the facade crate
//!
//! Smoothing, edge extraction and background flattening chained the way
//! an interactive front end drives them.

use lumen::filter::{
    EdgeDetector, EdgeOptions, GaussianDerivativeOptions, Kernel, smooth_blend,
};
use lumen::morph::{GrayMorphOp, MorphOptions, morph_gray};
use lumen::threshold::{IsodataOptions, Termination, isodata};
use lumen::{BINARY_OFF, BINARY_ON, Pix};
use lumen_test::{RegParams, synth};

fn is_binary(pix: &Pix) -> bool {
    pix.data().iter().all(|&v| v == BINARY_OFF || v == BINARY_ON)
}

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    // Bright square on a dark background with mild noise
    let square = synth::square(40, 40, 12, 12, 16, 30, 180).expect("square");
    let noise = synth::noise(40, 40, 21).expect("noise");
    let scene = synth::from_fn(40, 40, |x, y| {
        let s = square.get_pixel_unchecked(x, y);
        let n = noise.get_pixel_unchecked(x, y) / 32;
        s.saturating_add(n)
    })
    .expect("scene");

    // --- Smoothing blend keeps size and stays within the input range ---
    let gaussian = Kernel::gaussian(2, 2.5).expect("gaussian");
    let smoothed = smooth_blend(&scene, &gaussian, 0.5).expect("smooth blend");
    rp.compare_values(40.0, smoothed.width() as f64, 0.0);
    let (_, hi) = smoothed.min_max();
    let (_, scene_hi) = scene.min_max();
    rp.check(hi <= scene_hi, "blend does not exceed the input maximum");

    // --- Edges: threshold sweep on one cached gradient field ---
    let mut detector = EdgeDetector::gaussian(
        &smoothed,
        &GaussianDerivativeOptions::default(),
        EdgeOptions::default(),
    )
    .expect("edge detector");
    let edges = detector.edges().expect("edges");
    rp.check(is_binary(&edges), "edge map is binary");
    // The square outline passes through (12, 20) and (27, 20)
    let near_left = (10..=14).any(|x| edges.get_pixel(x, 20) == Some(BINARY_ON));
    let near_right = (25..=29).any(|x| edges.get_pixel(x, 20) == Some(BINARY_ON));
    rp.check(near_left, "left side of the square is an edge");
    rp.check(near_right, "right side of the square is an edge");
    // Centre of the square is flat after smoothing
    rp.compare_values(0.0, edges.get_pixel(20, 20).expect("pixel") as f64, 0.0);

    detector.set_threshold(50.0).expect("threshold");
    let strong = detector.edges().expect("strong edges");
    rp.check(
        strong.count_value(BINARY_ON) <= edges.count_value(BINARY_ON),
        "higher threshold keeps fewer edges",
    );

    // --- Background flattening then isodata ---
    let morph = MorphOptions { radius: 10 };
    let flattened = morph_gray(&scene, GrayMorphOp::TopHat, &morph).expect("top hat");
    let result = isodata(&flattened, &IsodataOptions::default()).expect("isodata");
    rp.check(is_binary(&result.binary), "isodata output is binary");
    rp.check(
        result.termination != Termination::IterationLimit,
        "isodata terminates early",
    );

    let direct = isodata(&scene, &IsodataOptions::default()).expect("isodata raw");
    rp.check(
        direct.termination == Termination::Converged,
        "raw scene converges",
    );
    // The square is 16x16 = 256 pixels
    rp.compare_values(256.0, direct.binary.count_value(BINARY_ON) as f64, 0.0);

    assert!(rp.cleanup(), "pipeline regression test failed");
}
