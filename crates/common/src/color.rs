//! Scalar and color blend helpers shared by the sky and terrain shaders.

use glam::Vec3;

/// Rec. 601 luma weights.
pub const LUMA_WEIGHTS: Vec3 = Vec3::new(0.299, 0.587, 0.114);

/// Display gamma used by the optional linear-space round trip.
pub const DISPLAY_GAMMA: f32 = 2.2;

/// Hermite interpolation of `x` over `[edge0, edge1]`, clamped to [0, 1].
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// `a * (1 - t) + b * t`. Returns `a` exactly at `t = 0` and `b` exactly at `t = 1`.
pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Perceptual brightness using `LUMA_WEIGHTS`.
pub fn luminance(color: Vec3) -> f32 {
    color.dot(LUMA_WEIGHTS)
}

/// Push `color` away from (amount > 1) or toward (amount < 1) its own gray.
pub fn saturate(color: Vec3, amount: f32) -> Vec3 {
    mix(Vec3::splat(luminance(color)), color, amount)
}

/// Display-encoded color to linear light.
pub fn to_linear(color: Vec3) -> Vec3 {
    color.max(Vec3::ZERO).powf(DISPLAY_GAMMA)
}

/// Linear light back to display encoding.
pub fn to_display(color: Vec3) -> Vec3 {
    color.max(Vec3::ZERO).powf(1.0 / DISPLAY_GAMMA)
}
