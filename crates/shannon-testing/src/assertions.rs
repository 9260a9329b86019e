//! Common assertions for shannon testing

/// Asserts that an entropy value is within `tolerance` of `expected`
/// and inside the valid byte-entropy range.
pub fn assert_entropy_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (0.0..=8.0).contains(&actual),
        "Entropy {} outside [0, 8]",
        actual
    );
    assert!(
        (actual - expected).abs() <= tolerance,
        "Entropy mismatch: expected {} +/- {}, got {}",
        expected,
        tolerance,
        actual
    );
}

/// Parses the value out of a `File entropy is: <value>/8` line
pub fn parse_ratio_line(line: &str) -> Option<f64> {
    line.trim()
        .strip_prefix("File entropy is: ")?
        .strip_suffix("/8")?
        .parse()
        .ok()
}
