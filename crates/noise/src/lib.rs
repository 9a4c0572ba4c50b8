//! Deterministic 2D simplex noise.
//!
//! A pure function of its input: no seed, no tables, no hidden state. The
//! lattice hash is a polynomial permutation evaluated modulo 289, and lattice
//! coordinates are folded into `[0, 289)` before hashing so every intermediate
//! stays an exactly representable integer in f32 even at large inputs.
//!
//! # Invariants
//! - Identical input gives bit-identical output on every call and every run.
//! - Output is C1-continuous and lies in roughly [-1, 1].

use glam::{Vec2, Vec3};

/// Skew/unskew constants for the triangular lattice.
const SKEW_X: f32 = 0.211_324_87; // (3 - sqrt(3)) / 6
const SKEW_Y: f32 = 0.366_025_42; // (sqrt(3) - 1) / 2
const SKEW_Z: f32 = -0.577_350_26; // -1 + 2 * SKEW_X
/// Maps a hash in [0, 289) onto 41 gradient directions around the circle.
const GRADIENT_STEP: f32 = 1.0 / 41.0;

/// Amplitude of the detail octave relative to the base octave.
pub const DETAIL_AMPLITUDE: f32 = 0.5;

fn mod289(x: f32) -> f32 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: f32) -> f32 {
    mod289((x * 34.0 + 1.0) * x)
}

/// Single-octave simplex noise at `v`.
pub fn simplex2(v: Vec2) -> f32 {
    // Corner of the skewed cell containing v, and the offset from it.
    let i = (v + Vec2::splat(v.x * SKEW_Y + v.y * SKEW_Y)).floor();
    let x0 = v - i + Vec2::splat(i.x * SKEW_X + i.y * SKEW_X);

    // Middle corner depends on which triangle of the cell we are in.
    let i1 = if x0.x > x0.y { Vec2::X } else { Vec2::Y };
    let x1 = x0 + Vec2::splat(SKEW_X) - i1;
    let x2 = x0 + Vec2::splat(SKEW_Z);

    let i = Vec2::new(mod289(i.x), mod289(i.y));
    let p = Vec3::new(
        permute(permute(i.y) + i.x),
        permute(permute(i.y + i1.y) + i.x + i1.x),
        permute(permute(i.y + 1.0) + i.x + 1.0),
    );

    // Quartic radial falloff per corner.
    let mut m = (Vec3::splat(0.5)
        - Vec3::new(x0.length_squared(), x1.length_squared(), x2.length_squared()))
    .max(Vec3::ZERO);
    m *= m;
    m *= m;

    // Hash -> gradient on a diamond, normalized below.
    let scaled = p * GRADIENT_STEP;
    let x = 2.0 * (scaled - scaled.floor()) - Vec3::ONE;
    let h = x.abs() - Vec3::splat(0.5);
    let a0 = x - (x + Vec3::splat(0.5)).floor();

    // Cheap inverse-sqrt approximation of the gradient length.
    m *= Vec3::splat(1.792_842_9) - 0.853_734_7 * (a0 * a0 + h * h);

    let g = Vec3::new(
        a0.x * x0.x + h.x * x0.y,
        a0.y * x1.x + h.y * x1.y,
        a0.z * x2.x + h.z * x2.y,
    );
    130.0 * m.dot(g)
}

/// Base octave plus one octave at twice the frequency and half the amplitude.
pub fn turbulence2(v: Vec2) -> f32 {
    simplex2(v) + DETAIL_AMPLITUDE * simplex2(v * 2.0)
}

pub fn crate_info() -> &'static str {
    "blockshade-noise v0.1.0"
}
