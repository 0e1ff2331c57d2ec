//! Filter regression test
//!
//! Mean filter and equalization over synthetic frames, parallel vs
//! sequential agreement, and the boundary contracts.

use gridcal_core::{Grid, ValueRange};
use gridcal_engine::{Engine, EngineConfig};
use gridcal_filter::{EqualizeWorkspace, histogram_equalize, mean_filter};
use gridcal_stats::histogram;
use gridcal_test::{RegParams, noise_grid, ramp_grid};

#[test]
fn filter_reg() {
    let mut rp = RegParams::new("filter");

    let seq = Engine::sequential();
    let par = Engine::new(EngineConfig {
        threads: Some(4),
        parallel_threshold: 1,
    })
    .expect("build parallel engine");

    // --- Test 1: constant frame is a fixed point of the mean filter ---
    let constant = Grid::new_with_value(33, 21, 7u16).unwrap();
    for &half in &[1u32, 2, 5] {
        let filtered = mean_filter(&par, &constant, half).expect("mean_filter");
        rp.check(filtered == constant, "constant frame unchanged");
    }

    // --- Test 2: mean filter preserves the global mean on interior-heavy
    // frames and agrees across engines ---
    let frame = noise_grid(128, 96, 42, 100, 4000);
    let filt_seq = mean_filter(&seq, &frame, 2).expect("sequential filter");
    let filt_par = mean_filter(&par, &frame, 2).expect("parallel filter");
    rp.check(filt_seq == filt_par, "mean filter matches across engines");
    let mean_in = gridcal_stats::mean(&seq, &frame);
    let mean_out = gridcal_stats::mean(&seq, &filt_seq);
    eprintln!("mean before {mean_in:.2}, after {mean_out:.2}");
    rp.compare_values(mean_in, mean_out, mean_in * 0.02);

    // --- Test 3: equalization LUT is non-decreasing on a narrow ramp ---
    let mut image = ramp_grid(64, 64, 500, 1499);
    let range = ValueRange::new(0.0, 4096.0).unwrap();
    let num_bins = 4096;
    let mut hist = histogram(&par, &image, &range, num_bins).expect("histogram");
    let mut workspace = EqualizeWorkspace::new(num_bins);
    histogram_equalize(&par, &mut image, &mut hist, &mut workspace, &range, 4095u16)
        .expect("equalize");
    let lut = workspace.lut();
    rp.check(
        lut.windows(2).all(|w| w[0] <= w[1]),
        "equalization LUT is non-decreasing",
    );

    // --- Test 4: equalized narrow-band image spans the output range ---
    // Input occupied [500, 1500); after remapping the brightest cells sit
    // at the ceiling.
    let max = image.as_slice().iter().copied().max().unwrap();
    rp.compare_values(4095.0, max as f64, 0.0);

    assert!(rp.cleanup(), "filter regression test failed");
}
