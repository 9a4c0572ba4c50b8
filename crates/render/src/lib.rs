//! Rendering plumbing shared by the sky and terrain shaders.
//!
//! # Invariants
//! - Fragment shaders are pure: output depends only on the fragment input and
//!   the uniform snapshot.
//! - Evaluation order across pixels is unspecified; results do not depend on it
//!   or on the number of worker threads.
//! - Uniforms are published once per frame by [`FrameOrchestrator`] and are
//!   immutable while a frame is being evaluated.

mod camera;
mod frame;
mod renderer;
pub mod vertex;

pub use camera::FlyCamera;
pub use frame::{FrameOrchestrator, FrameTimer};
pub use renderer::{FragmentShader, Framebuffer, FramebufferError, render_fullscreen};
pub use vertex::{SKY_QUAD, SkyVaryings, TerrainVaryings, TerrainVertexStage, Varyings};

pub fn crate_info() -> &'static str {
    "blockshade-render v0.1.0"
}
