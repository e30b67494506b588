//! Tests for the centralized configuration constants.

use super::*;

/// Ensures the tolerance constants are ordered sensibly.
///
/// # Examples
/// ```
/// use config::constants::{EPSILON_TOLERANCE, WELD_EPSILON};
/// assert!(EPSILON_TOLERANCE < WELD_EPSILON);
/// ```
#[test]
fn tolerances_are_ordered() {
    assert!(EPSILON_TOLERANCE > 0.0);
    assert!(WELD_EPSILON > EPSILON_TOLERANCE);
    assert!(WELD_EPSILON < DEFAULT_GRAIN_SIZE);
}

/// Validates the segment clamp range.
#[test]
fn segment_bounds_form_a_range() {
    assert!(MIN_SEGMENTS >= 3);
    assert!(MAX_SEGMENTS > MIN_SEGMENTS);
}

/// Path probing must be fine enough to catch curvature.
#[test]
fn probe_count_is_usable() {
    assert!(PATH_LENGTH_PROBES >= 8);
}
