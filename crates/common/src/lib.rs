//! Shared types for the blockshade pipeline: per-fragment inputs, the per-frame
//! uniform snapshot, output colors, and the scalar/vector blend helpers every
//! shader stage uses.
//!
//! # Invariants
//! - Nothing here holds state across fragments; all types are plain values.
//! - `SceneUniforms` is read-only during a draw. Only the frame orchestrator writes it.

pub mod color;
mod error;
pub mod gpu;
mod types;

pub use error::ConfigError;
pub use gpu::{SceneUniformsGpu, SkyVertex, TerrainVertex};
pub use types::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_WATER_LINE, FragmentInput, OutputColor, SceneUniforms,
    SkyFragment,
};

pub fn crate_info() -> &'static str {
    "blockshade-common v0.1.0"
}
