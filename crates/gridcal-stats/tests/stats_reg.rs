//! Statistics regression test
//!
//! Histogram conservation and atomicity: a large frame hashed into a
//! handful of bins from many threads must not lose a single count.

use gridcal_core::ValueRange;
use gridcal_engine::{Engine, EngineConfig};
use gridcal_stats::{count_where, histogram, mean};
use gridcal_test::{RegParams, noise_grid};

#[test]
fn stats_reg() {
    let mut rp = RegParams::new("stats");

    let par = Engine::new(EngineConfig {
        threads: Some(8),
        parallel_threshold: 1,
    })
    .expect("build parallel engine");
    let seq = Engine::sequential();

    let frame = noise_grid(512, 512, 0xcafe, 0, 4096);
    let n = frame.element_count();

    // --- Test 1: count_where(always true) == element_count ---
    rp.compare_values(n as f64, count_where(&par, &frame, |_| true) as f64, 0.0);

    // --- Test 2: histogram bins sum to element_count under contention ---
    // Four bins over half a million cells maximizes concurrent hits per bin.
    let range = ValueRange::new(0.0, 4096.0).unwrap();
    let hist = histogram(&par, &frame, &range, 4).expect("histogram");
    rp.compare_values(n as f64, hist.total() as f64, 0.0);

    // --- Test 3: parallel histogram equals sequential histogram ---
    let hist_seq = histogram(&seq, &frame, &range, 4).expect("sequential histogram");
    rp.check(hist == hist_seq, "histogram matches across engines");

    // --- Test 4: mean agrees across engines ---
    let mean_par = mean(&par, &frame);
    let mean_seq = mean(&seq, &frame);
    rp.compare_values(mean_seq, mean_par, 1e-9);

    // --- Test 5: thresholded count is consistent with the histogram ---
    // Bin 0 covers [0, 1024); counting cells below 1024 must agree.
    let below = count_where(&par, &frame, |v| v < 1024) as f64;
    rp.compare_values(hist.count(0).unwrap() as f64, below, 0.0);

    assert!(rp.cleanup(), "stats regression test failed");
}
