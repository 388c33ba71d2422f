#![allow(dead_code)]

use std::f64::consts::PI;
use std::path::PathBuf;

pub fn assert_approx(name: &str, actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{name}: expected {expected}, got {actual} (diff {diff} > {tolerance})"
    );
}

pub fn assert_relative(name: &str, actual: f64, expected: f64, max_relative: f64) {
    let diff = (actual - expected).abs();
    let scale = expected.abs().max(actual.abs());
    assert!(
        diff <= max_relative * scale,
        "{name}: expected {expected}, got {actual} (relative {} > {max_relative})",
        diff / scale
    );
}

/// Analytic SASA total of two spheres with radii `r1`, `r2` at center
/// distance `d`, probed by `probe`: full sphere areas minus the two buried
/// caps.
pub fn two_sphere_total(r1: f64, r2: f64, d: f64, probe: f64) -> f64 {
    let ra = r1 + probe;
    let rb = r2 + probe;

    if d >= ra + rb {
        return 4.0 * PI * (ra * ra + rb * rb);
    }
    if d <= (ra - rb).abs() {
        let r = ra.max(rb);
        return 4.0 * PI * r * r;
    }

    let ha = ra - (d * d + ra * ra - rb * rb) / (2.0 * d);
    let hb = rb - (d * d + rb * rb - ra * ra) / (2.0 * d);
    4.0 * PI * (ra * ra + rb * rb) - 2.0 * PI * (ra * ha + rb * hb)
}

/// Path to a file under `tests/data`, or `None` (with a notice) when the
/// file is not present so the test can be skipped.
pub fn require_test_file(name: &str) -> Option<PathBuf> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let path = PathBuf::from(manifest_dir).join("tests/data").join(name);
    if path.exists() {
        Some(path)
    } else {
        eprintln!("skipping: test data file {} not found", path.display());
        None
    }
}
