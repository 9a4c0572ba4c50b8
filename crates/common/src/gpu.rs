//! Byte layouts of the per-vertex attributes and the uniform block as a GPU
//! backend would upload them.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Terrain vertex: position (3f), texcoord `u, v, layer` (3f), baked shading (1f).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 3],
    pub shading: f32,
}

impl TerrainVertex {
    pub fn new(position: Vec3, texcoord: Vec3, shading: f32) -> Self {
        Self {
            position: position.to_array(),
            texcoord: texcoord.to_array(),
            shading,
        }
    }
}

/// Fullscreen sky quad vertex. The texcoord is carried but unused.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SkyVertex {
    pub texcoord: [f32; 2],
    pub position: [f32; 3],
}

/// std140-compatible scene uniform block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SceneUniformsGpu {
    pub proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub inv_proj_view: [[f32; 4]; 4],
    pub background_color: [f32; 3],
    pub water_line: f32,
    pub view_position: [f32; 3],
    pub time: f32,
    pub resolution: [f32; 2],
    pub _pad: [f32; 2],
}
