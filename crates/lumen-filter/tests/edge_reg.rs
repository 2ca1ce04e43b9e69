//! Edge detection regression test
//!
//! Gradient orientation buckets, non-maximum suppression on a soft step,
//! sparsity along the step direction and threshold reuse.

use lumen_filter::{
    EdgeDetector, EdgeOptions, GaussianDerivativeOptions, GradientField, Kernel, StepDirection,
    detect_edges,
};
use lumen_test::{RegParams, synth};

#[test]
fn edge_reg() {
    let mut rp = RegParams::new("edge");

    // --- Test 1: soft vertical edge with Sobel kernels ---
    // Columns: 0 0 0 100 200 ... 200; the right border also responds
    // because samples past it are zero.
    let (w, h) = (10u32, 8u32);
    let soft = synth::from_fn(w, h, |x, _| match x {
        0..=2 => 0,
        3 => 100,
        _ => 200,
    })
    .expect("soft step");
    let edges = detect_edges(&soft, &Kernel::sobel_y(), &Kernel::sobel_x(), 10.0).expect("edges");
    for y in 1..h - 1 {
        for x in 0..w {
            let expected = if x == 3 || x == w - 1 { 255 } else { 0 };
            rp.compare_values(
                expected as f64,
                edges.get_pixel(x, y).expect("pixel") as f64,
                0.0,
            );
        }
    }

    // --- Test 2: orientation of a horizontal edge ---
    let horiz = synth::from_fn(8, 10, |_, y| match y {
        0..=3 => 0,
        4 => 100,
        _ => 200,
    })
    .expect("horizontal soft step");
    let field =
        GradientField::compute(&horiz, &Kernel::sobel_y(), &Kernel::sobel_x()).expect("field");
    rp.check(
        field.direction_at(3, 4) == Some(StepDirection::Vertical),
        "horizontal edge compares up/down neighbours",
    );
    let edges = field.suppress(10.0).expect("suppress");
    for x in 1..7 {
        rp.compare_values(255.0, edges.get_pixel(x, 4).expect("pixel") as f64, 0.0);
        rp.compare_values(0.0, edges.get_pixel(x, 3).expect("pixel") as f64, 0.0);
        rp.compare_values(0.0, edges.get_pixel(x, 5).expect("pixel") as f64, 0.0);
    }

    // --- Test 3: sparsity along the step direction ---
    let noise = synth::noise(40, 30, 11).expect("noise");
    let detector = EdgeDetector::gaussian(
        &noise,
        &GaussianDerivativeOptions::default(),
        EdgeOptions { threshold: 2.0 },
    )
    .expect("detector");
    let field = detector.gradients();
    let edges = detector.edges().expect("edges");
    let directions = field.directions();
    rp.compare_values(
        (noise.width() * noise.height()) as f64,
        directions.len() as f64,
        0.0,
    );

    let mut adjacent = 0;
    for y in 0..noise.height() {
        for x in 0..noise.width() {
            if edges.get_pixel_unchecked(x, y) == 0 {
                continue;
            }
            let dir = directions[(y * noise.width() + x) as usize];
            let (sx, sy) = dir.offset();
            let (nx, ny) = (x as i64 + sx, y as i64 + sy);
            let neighbour = (
                edges.get_pixel_signed(nx, ny),
                field.direction_at(nx as u32, ny as u32),
            );
            if neighbour == (Some(255), Some(dir)) {
                adjacent += 1;
            }
        }
    }
    rp.compare_values(0.0, adjacent as f64, 0.0);
    rp.check(edges.count_value(255) > 0, "noise produces some edges");

    // --- Test 4: raising the threshold never adds edges ---
    let mut detector = detector;
    let mut last = usize::MAX;
    for &t in &[0.0f32, 2.0, 5.0, 10.0, 25.0, 50.0] {
        detector.set_threshold(t).expect("threshold");
        let count = detector.edges().expect("edges").count_value(255);
        rp.check(count <= last, "edge count non-increasing in threshold");
        last = count;
    }
    // A NaN threshold is refused and the last one stays in effect
    rp.check(detector.set_threshold(f32::NAN).is_err(), "NaN threshold rejected");
    rp.compare_values(50.0, detector.threshold() as f64, 0.0);
    let kept = detector.edges().expect("edges").count_value(255);
    rp.compare_values(last as f64, kept as f64, 0.0);
    rp.check(
        detector.gradients().suppress(f32::NAN).is_err(),
        "NaN threshold rejected by suppression",
    );

    // --- Test 5: constant image, interior free of edges ---
    let flat = synth::constant(16, 16, 90).expect("constant");
    let (dx, dy) = GaussianDerivativeOptions::default()
        .kernels()
        .expect("kernels");
    let edges = detect_edges(&flat, &dx, &dy, 10.0).expect("edges");
    let mut interior = 0;
    for y in 2..14 {
        for x in 2..14 {
            interior += usize::from(edges.get_pixel_unchecked(x, y) != 0);
        }
    }
    rp.compare_values(0.0, interior as f64, 0.0);

    assert!(rp.cleanup(), "edge regression test failed");
}
