//! Terrain chunk surface shading.
//!
//! Albedo from a layered block atlas is lit by the mesher's baked shading
//! scalar, tinted blue below the water line, fogged toward the background by
//! distance and finally given a small saturation boost.
//!
//! # Invariants
//! - The underwater tint applies iff `world_position.y < water_line`.
//! - The fog factor never decreases with distance and reaches exactly 1.
//! - Shading never fails; atlas layer indices are trusted and only clamped.

mod atlas;
mod config;
mod shader;

pub use atlas::{AtlasError, AtlasSampler, TextureArray};
pub use config::{FogLaw, LightRemap, TerrainConfig, UnderwaterTint};
pub use shader::{TerrainShader, is_underwater};

pub fn crate_info() -> &'static str {
    "blockshade-terrain v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("terrain"));
    }
}
