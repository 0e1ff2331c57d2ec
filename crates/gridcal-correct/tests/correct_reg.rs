//! Correction pipeline regression test
//!
//! The calibration stages run in pipeline order on small frames with
//! hand-checkable values.

use gridcal_core::Grid;
use gridcal_correct::{dark_correct, defect_correct, gain_correct, normalize};
use gridcal_engine::{Engine, EngineConfig};
use gridcal_filter::Kernel;
use gridcal_test::{RegParams, noise_grid};

#[test]
fn correct_reg() {
    let mut rp = RegParams::new("correct");

    let engine = Engine::new(EngineConfig {
        threads: Some(4),
        parallel_threshold: 1,
    })
    .expect("build engine");

    // --- Test 1: 4x4 frame, dark map of 2, offset 0 ---
    let mut frame = Grid::from_data(
        4,
        4,
        (10u16..26).collect::<Vec<_>>(),
    )
    .unwrap();
    let dark = Grid::new_with_value(4, 4, 2u16).unwrap();
    dark_correct(&engine, &mut frame, &dark, 0).expect("dark_correct");
    for y in 0..4 {
        for x in 0..4 {
            let expected = 10.0 + (y * 4 + x) as f64 - 2.0;
            rp.compare_values(expected, frame.get(x, y).unwrap() as f64, 0.0);
        }
    }

    // --- Test 2: uniform gain reference normalizes to exactly 1 ---
    let gain = Grid::new_with_value(32, 32, 4000u16).unwrap();
    let normalized = normalize(&engine, &gain);
    rp.check(
        normalized.as_slice().iter().all(|&g| g == 1.0),
        "uniform gain normalizes to 1",
    );

    let mut input = noise_grid(32, 32, 99, 0, 4096);
    let before = input.clone();
    gain_correct(&engine, &mut input, &normalized, 0.0, 65535.0).expect("gain_correct");
    rp.check(input == before, "identity gain leaves frame unchanged");

    // --- Test 3: defect correction is a no-op on a clean defect map ---
    let mut clean = noise_grid(32, 32, 123, 0, 4096);
    let untouched = clean.clone();
    let defects: Grid<u8> = Grid::new(32, 32).unwrap();
    let kernel = Kernel::gaussian(3, 1.0).expect("kernel");
    defect_correct(&engine, &mut clean, &defects, &kernel).expect("defect_correct");
    rp.check(clean == untouched, "all-zero defect map is a no-op");

    // --- Test 4: a hot pixel at the frame corner interpolates from its
    // three in-bounds neighbors ---
    let mut hot = Grid::new_with_value(8, 8, 200u16).unwrap();
    hot.set(0, 0, 9999).unwrap();
    let mut defect_map: Grid<u8> = Grid::new(8, 8).unwrap();
    defect_map.set(0, 0, 1).unwrap();
    defect_correct(&engine, &mut hot, &defect_map, &kernel).expect("corner defect");
    rp.compare_values(200.0, hot.get(0, 0).unwrap() as f64, 0.0);

    assert!(rp.cleanup(), "correction regression test failed");
}
