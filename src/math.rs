//! # Easing and Interpolation Helpers
//!
//! Small, pure numeric functions shared by every glyph animation. A glyph
//! transition is a single progress scalar `t` in `[0, 1]`; each sub-shape of
//! the glyph scopes that scalar to its own window with [`progress`] and then
//! shapes it with one of the easing curves below.
//!
//! ## Curves
//! - **Ease-in** (`accelerate`): `t^k`, slow start.
//! - **Ease-out** (`decelerate`): `1 - (1 - t)^k`, slow finish.
//!
//! The named variants ([`accelerate5`], [`decelerate2`], [`decelerate3`],
//! [`decelerate5`]) are the only exponents the glyph catalog uses.

/// Linear interpolation from `min` to `max` by `f`.
///
/// `f` is not clamped, callers pass values already in `[0, 1]`.
///
/// # Example
/// ```
/// use form_clock_lib::math::lerp;
///
/// assert_eq!(lerp(0.5, 100.0, 144.0), 122.0);
/// ```
#[inline]
pub fn lerp(f: f32, min: f32, max: f32) -> f32 {
    min + (max - min) * f
}

/// Clamps `value` into `[min, max]`.
#[inline]
pub fn constrain(value: f32, min: f32, max: f32) -> f32 {
    value.clamp(min, max)
}

/// Maps `value` from `[min, max]` onto `[0, 1]`, clamped at both ends.
///
/// A degenerate window (`max <= min`) behaves like a step: anything below
/// `min` is 0, everything else is 1.
///
/// # Example
/// ```
/// use form_clock_lib::math::progress;
///
/// assert_eq!(progress(0.25, 0.0, 0.5), 0.5);
/// assert_eq!(progress(0.9, 0.0, 0.5), 1.0);
/// assert_eq!(progress(-3.0, 0.0, 0.5), 0.0);
/// ```
#[inline]
pub fn progress(value: f32, min: f32, max: f32) -> f32 {
    if max <= min {
        return if value < min { 0.0 } else { 1.0 };
    }
    constrain((value - min) / (max - min), 0.0, 1.0)
}

/// Ease-in curve `t^k`.
#[inline]
pub fn accelerate(t: f32, k: i32) -> f32 {
    t.powi(k)
}

/// Ease-out curve `1 - (1 - t)^k`.
#[inline]
pub fn decelerate(t: f32, k: i32) -> f32 {
    1.0 - (1.0 - t).powi(k)
}

#[inline]
pub fn accelerate5(t: f32) -> f32 {
    accelerate(t, 5)
}

#[inline]
pub fn decelerate2(t: f32) -> f32 {
    decelerate(t, 2)
}

#[inline]
pub fn decelerate3(t: f32) -> f32 {
    decelerate(t, 3)
}

#[inline]
pub fn decelerate5(t: f32) -> f32 {
    decelerate(t, 5)
}
