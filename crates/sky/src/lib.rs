//! Infinite procedural sky.
//!
//! A fullscreen quad is shaded by reconstructing each fragment's view ray and
//! composing a horizon-to-zenith gradient, quantized "blocky" clouds drifting
//! with the wind, and an additive sun glare and halo.
//!
//! # Invariants
//! - Output depends only on the view ray direction and elapsed time, never on
//!   camera position.
//! - Clouds are only evaluated above a small positive `ray.y` gate, so the
//!   cloud-plane projection never divides by a near-zero height.

mod composer;
mod config;
mod ray;

pub use composer::SkyComposer;
pub use config::SkyConfig;
pub use ray::{MIN_HOMOGENEOUS_W, reconstruct_ray};

pub fn crate_info() -> &'static str {
    "blockshade-sky v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("sky"));
    }
}
