//! Rank filter and blending regression test

use lumen_filter::{Kernel, blend_gray, median_filter, rank_filter, smooth_blend};
use lumen_test::{RegParams, synth};

#[test]
fn rank_reg() {
    let mut rp = RegParams::new("rank");

    // --- Test 1: median removes isolated impulses ---
    let mut pm = synth::constant(15, 15, 40).expect("constant").to_mut();
    for &(x, y) in &[(3u32, 3u32), (7, 7), (11, 4)] {
        pm.set_pixel(x, y, 255).expect("set");
    }
    let speckled = lumen_core::Pix::from(pm);
    let cleaned = median_filter(&speckled, 1).expect("median");
    rp.compare_pix(&synth::constant(15, 15, 40).expect("constant"), &cleaned);

    // --- Test 2: rank ordering min <= median <= max ---
    let noise = synth::noise(20, 20, 3).expect("noise");
    let lo = rank_filter(&noise, 2, 0.0).expect("min");
    let mid = median_filter(&noise, 2).expect("median");
    let hi = rank_filter(&noise, 2, 1.0).expect("max");
    let ordered = lo
        .data()
        .iter()
        .zip(mid.data())
        .zip(hi.data())
        .all(|((a, b), c)| a <= b && b <= c);
    rp.check(ordered, "min <= median <= max");

    // --- Test 3: median preserves a clean step edge ---
    let step = synth::vertical_step(12, 6, 6, 20, 220).expect("step");
    let out = median_filter(&step, 1).expect("median");
    rp.compare_pix(&step, &out);

    // --- Test 4: blending ---
    let a = synth::constant(4, 4, 200).expect("a");
    let b = synth::constant(4, 4, 100).expect("b");
    let mixed = blend_gray(&a, &b, 0.25).expect("blend");
    rp.compare_values(125.0, mixed.get_pixel(1, 1).expect("pixel") as f64, 0.0);

    let smoothed = smooth_blend(&noise, &Kernel::gaussian(2, 2.5).expect("gaussian"), 0.5)
        .expect("smooth blend");
    rp.compare_values(noise.width() as f64, smoothed.width() as f64, 0.0);

    assert!(rp.cleanup(), "rank regression test failed");
}
