//! Assertion helpers for pointer scenarios.

use tactus_geometry::Point;
use tactus_input::{Pointer, PointerButton};

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

/// Assert that a pointer moved by `expected` between the last two commits.
pub fn assert_delta(pointer: &Pointer, expected: Point, msg: &str) {
    assert_point_approx_eq(pointer.delta(), expected, 1e-4, msg);
}

/// Assert that no button carries a pressed or released edge.
pub fn assert_no_edges(pointer: &Pointer, msg: &str) {
    for button in PointerButton::ALL {
        assert!(
            !pointer.was_pressed(button) && !pointer.was_released(button),
            "{}: {:?} still has an edge on pointer {}",
            msg,
            button,
            pointer
        );
    }
}
