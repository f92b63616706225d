//! Easing curves for camera transitions.

/// Cubic ease-in-out: accelerates through the first half and decelerates
/// through the second, with zero velocity at both ends.
///
/// Input is clamped to `[0, 1]`.
#[must_use]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}
