//! Easing curves shared by the strip brightness model and the camera track.
//!
//! The WGSL side mirrors [`ramp`] in `assets/shaders/modules/ease.wgsl`;
//! keep the two in sync.

use std::f32::consts::FRAC_PI_2;

/// Camera move easing: `sin(pi/2 * t)`, fast start and gentle arrival.
///
/// Input is clamped to `[0.0, 1.0]`; output is also in `[0.0, 1.0]`.
#[inline]
pub fn quarter_sine(t: f32) -> f32 {
    (FRAC_PI_2 * t.clamp(0.0, 1.0)).sin()
}

/// Linear interpolation from `a` to `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Brightness ramp: `lerp(1, sin(90deg * x), 0.2)`.
///
/// Dips to 0.8 at `x = 0` and rises smoothly back to 1.0 at `x = 1`, so
/// brightness never toggles abruptly between neighbouring cells.
#[inline]
pub fn ramp(x: f32) -> f32 {
    lerp(1.0, (FRAC_PI_2 * x).sin(), 0.2)
}
