//! Easing curve applied to normalized step time.

/// Cubic ease-in/ease-out over `[0, 1]`.
///
/// Input outside the unit interval is clamped, so the curve never
/// overshoots its endpoints.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
    }
}
