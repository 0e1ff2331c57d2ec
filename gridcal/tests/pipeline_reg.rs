//! End-to-end pipeline regression test
//!
//! Runs the whole correction chain in its fixed order on a synthetic
//! sensor frame: statistics, dark subtraction, gain flattening, defect
//! interpolation, mean filtering, then histogram equalization.

use gridcal::correct::{dark_correct, defect_correct, gain_correct, normalize};
use gridcal::filter::{EqualizeWorkspace, Kernel, histogram_equalize, mean_filter};
use gridcal::stats::{count_where, histogram, mean};
use gridcal::{Engine, EngineConfig, Grid, ValueRange};
use gridcal_test::{RegParams, noise_grid};

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    let engine = Engine::new(EngineConfig {
        threads: Some(4),
        parallel_threshold: 1,
    })
    .expect("build engine");

    // Synthetic acquisition: signal plus a fixed dark level of 500
    let width = 256;
    let height = 192;
    let mut frame = noise_grid(width, height, 0xacc, 2000, 3000);
    let dark = Grid::new_with_value(width, height, 500u16).unwrap();
    let n = frame.element_count();

    let raw_mean = mean(&engine, &frame);
    eprintln!("raw mean: {raw_mean:.1}");

    // --- Stage 1: dark correction shifts the mean down by the dark level ---
    dark_correct(&engine, &mut frame, &dark, 0).expect("dark_correct");
    let dark_mean = mean(&engine, &frame);
    rp.compare_values(raw_mean - 500.0, dark_mean, 1e-6);

    // --- Stage 2: gain correction against a vignetting reference ---
    // Columns fall off toward the edges; the frame shares the shading,
    // so flattening pulls every cell toward the reference mean scale.
    let mut gain: Grid<u16> = Grid::new(width, height).unwrap();
    engine.fill(&mut gain, |x, _| 3000 - (x * 4) as u16);
    let normalized = normalize(&engine, &gain);
    gain_correct(&engine, &mut frame, &normalized, 0.0, 16_383.0).expect("gain_correct");
    let count_in_range = count_where(&engine, &frame, |v| v <= 16_383);
    rp.compare_values(n as f64, count_in_range as f64, 0.0);

    // --- Stage 3: defect interpolation removes the marked hot pixels ---
    let mut defects: Grid<u8> = Grid::new(width, height).unwrap();
    for &(x, y) in &[(0u32, 0u32), (17, 3), (128, 96), (255, 191)] {
        frame.set(x, y, u16::MAX).unwrap();
        defects.set(x, y, 1).unwrap();
    }
    let kernel = Kernel::gaussian(5, 1.5).expect("kernel");
    defect_correct(&engine, &mut frame, &defects, &kernel).expect("defect_correct");
    let saturated = count_where(&engine, &frame, |v| v == u16::MAX);
    rp.compare_values(0.0, saturated as f64, 0.0);

    // --- Stage 4: mean filter smooths without shifting the mean much ---
    let before_mean = mean(&engine, &frame);
    let smoothed = mean_filter(&engine, &frame, 1).expect("mean_filter");
    let after_mean = mean(&engine, &smoothed);
    rp.compare_values(before_mean, after_mean, before_mean * 0.02);
    let mut frame = smoothed;

    // --- Stage 5: equalization stretches into the output range ---
    let range = ValueRange::new(0.0, 16_384.0).unwrap();
    let num_bins = 16_384;
    let mut hist = histogram(&engine, &frame, &range, num_bins).expect("histogram");
    rp.compare_values(n as f64, hist.total() as f64, 0.0);

    let mut workspace = EqualizeWorkspace::new(num_bins);
    histogram_equalize(
        &engine,
        &mut frame,
        &mut hist,
        &mut workspace,
        &range,
        16_383u16,
    )
    .expect("equalize");

    // Cumulative histogram ends at the element count
    rp.compare_values(n as f64, hist.counts()[num_bins - 1] as f64, 0.0);
    // LUT is monotone and the brightest cells reach the ceiling
    let lut = workspace.lut();
    rp.check(
        lut.windows(2).all(|w| w[0] <= w[1]),
        "equalization LUT is non-decreasing",
    );
    let max_out = frame.as_slice().iter().copied().max().unwrap();
    rp.compare_values(16_383.0, max_out as f64, 0.0);

    assert!(rp.cleanup(), "pipeline regression test failed");
}
