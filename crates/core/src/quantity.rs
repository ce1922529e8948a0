//! Quantity coercion and clamping.
//!
//! Quantity inputs are truncated to integers; non-finite input coerces to
//! zero before any clamping applies. Stock ceilings are optional: `None`
//! means unlimited, zero means out of stock.

/// Truncate a numeric input to an integer quantity.
///
/// Non-finite values coerce to zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation is the documented coercion"
)]
#[must_use]
pub fn coerce(value: f64) -> i64 {
    if value.is_finite() { value.trunc() as i64 } else { 0 }
}

/// Convert a quantity into a factor for money arithmetic.
#[expect(
    clippy::cast_precision_loss,
    reason = "line quantities stay far below 2^52"
)]
#[must_use]
pub fn units(quantity: i64) -> f64 {
    quantity as f64
}

/// Normalize an optional stock ceiling.
///
/// `None` stays unlimited; any non-positive report collapses to zero
/// (out of stock).
#[must_use]
pub fn normalize_cap(cap: Option<i64>) -> Option<i64> {
    cap.map(|value| if value <= 0 { 0 } else { value })
}

/// Merge two stock ceilings; the stricter one wins.
#[must_use]
pub fn merge_caps(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    match (a, b) {
        (None, other) | (other, None) => other,
        (Some(a), Some(b)) => Some(a.min(b)),
    }
}

/// Clamp a requested quantity against an optional ceiling.
///
/// Requests floor at one (zero, negative, or garbage input behaves as a
/// request for one); a ceiling of zero eliminates the quantity entirely.
#[must_use]
pub fn clamp(quantity: i64, cap: Option<i64>) -> i64 {
    let quantity = quantity.max(1);

    match normalize_cap(cap) {
        None => quantity,
        Some(0) => 0,
        Some(max) => quantity.min(max),
    }
}
