//! Min/max normalization shared by statistics and visual encoding.

/// Normalizes `value` into `[0, 1]` against the given range.
///
/// Values outside the range clamp to the nearest endpoint. A degenerate
/// range (`min == max`) returns the neutral midpoint 0.5 instead of
/// dividing by zero, so a single-arc dataset still renders.
///
/// # Examples
/// ```
/// use trade_sim_core::normalize;
///
/// assert!((normalize(5.0, 0.0, 10.0) - 0.5).abs() < f64::EPSILON);
/// assert!((normalize(-3.0, 0.0, 10.0) - 0.0).abs() < f64::EPSILON);
/// assert!((normalize(7.0, 7.0, 7.0) - 0.5).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        return 0.5;
    }
    ((value - min) / range).clamp(0.0, 1.0)
}
