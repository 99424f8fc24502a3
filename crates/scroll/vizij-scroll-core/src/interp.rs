//! Interpolation helpers shared by timeline effects.
//!
//! - lerp (two-weight form so `a == 1` lands exactly on `y`)
//! - scale_percent (scroll percentage -> local progress inside a segment)

/// Linear interpolation between `x` and `y`.
///
/// `a` is not clamped. Progress values computed by [`scale_percent`] can sit
/// slightly outside `[0, 1]` near segment boundaries and are passed through.
#[inline]
pub fn lerp(x: f32, y: f32, a: f32) -> f32 {
    (1.0 - a) * x + a * y
}

/// Map a scroll percentage into the local progress of the `[start, end)` segment.
///
/// Returns a non-finite value when `start == end`; segments with equal
/// endpoints are rejected when a timeline entry is registered.
#[inline]
pub fn scale_percent(percent: f32, start: f32, end: f32) -> f32 {
    (percent - start) / (end - start)
}
