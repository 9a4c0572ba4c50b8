//! Demo composite: blocky noise terrain over the sky.
//!
//! Each pixel's view ray is marched through a column heightfield. A hit becomes
//! a one-vertex terrain draw (vertex stage, then the terrain shader); a miss
//! falls through to the sky.

use blockshade_common::{OutputColor, SceneUniforms, TerrainVertex};
use blockshade_noise::turbulence2;
use blockshade_render::{FragmentShader, Framebuffer, FramebufferError, TerrainVertexStage, vertex::pixel_to_ndc};
use blockshade_sky::{SkyComposer, reconstruct_ray};
use blockshade_terrain::{AtlasError, AtlasSampler, TerrainShader, TextureArray};
use glam::{Vec2, Vec3};

pub const LAYER_GRASS: f32 = 0.0;
pub const LAYER_SAND: f32 = 1.0;
pub const LAYER_STONE: f32 = 2.0;

const TILE: u32 = 16;
const MARCH_STEP: f32 = 0.25;
const MARCH_DISTANCE: f32 = 400.0;

/// Grass, sand and stone, each a two-tone checker.
pub fn checker_atlas() -> Result<TextureArray, AtlasError> {
    let palettes = [
        ([88, 150, 60], [72, 128, 50]),
        ([219, 204, 140], [200, 186, 124]),
        ([128, 128, 128], [104, 104, 108]),
    ];
    let layers: Vec<Vec<u8>> = palettes
        .iter()
        .map(|(light, dark)| {
            (0..TILE * TILE)
                .flat_map(|i| {
                    let (x, y) = (i % TILE, i / TILE);
                    let [r, g, b] = if (x / 4 + y / 4) % 2 == 0 { *light } else { *dark };
                    [r, g, b, 255]
                })
                .collect()
        })
        .collect();
    TextureArray::from_layers(TILE, TILE, &layers)
}

/// Top surface height of the column containing `(x, z)`.
pub fn column_height(x: f32, z: f32) -> f32 {
    let cell = Vec2::new(x.floor(), z.floor());
    (8.0 + 9.0 * turbulence2(cell * 0.025)).floor()
}

/// Surface point found by [`march`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    pub position: Vec3,
    pub texcoord: Vec3,
    pub shading: f32,
}

impl GroundHit {
    pub fn vertex(&self) -> TerrainVertex {
        TerrainVertex::new(self.position, self.texcoord, self.shading)
    }
}

fn layer_for(height: f32, water_line: f32) -> f32 {
    if height < water_line - 2.0 {
        LAYER_STONE
    } else if height < water_line + 1.0 {
        LAYER_SAND
    } else {
        LAYER_GRASS
    }
}

/// Step along the ray until it drops into a column.
pub fn march(origin: Vec3, dir: Vec3, water_line: f32) -> Option<GroundHit> {
    let mut prev = origin;
    let mut t = MARCH_STEP;
    while t < MARCH_DISTANCE {
        let p = origin + dir * t;
        let height = column_height(p.x, p.z);
        if p.y <= height {
            let layer = layer_for(height, water_line);
            let (texcoord, shading) = if prev.y > column_height(prev.x, prev.z) && prev.y > height {
                (Vec3::new(p.x.fract().abs(), p.z.fract().abs(), layer), 1.0)
            } else if p.x.floor() != prev.x.floor() {
                (Vec3::new(p.z.fract().abs(), 1.0 - p.y.fract().abs(), layer), 0.8)
            } else {
                (Vec3::new(p.x.fract().abs(), 1.0 - p.y.fract().abs(), layer), 0.6)
            };
            return Some(GroundHit {
                position: p,
                texcoord,
                shading,
            });
        }
        prev = p;
        t += MARCH_STEP;
    }
    None
}

/// Shade the demo scene for one uniform snapshot.
pub fn render<A>(
    sky: &SkyComposer,
    terrain: &TerrainShader<A>,
    uniforms: &SceneUniforms,
    width: u32,
    height: u32,
) -> Result<Framebuffer, FramebufferError>
where
    A: AtlasSampler + Sync,
{
    // The demo never installs a model matrix.
    let stage = TerrainVertexStage::new(true);
    Framebuffer::evaluate(width, height, |x, y| {
        let ray = reconstruct_ray(pixel_to_ndc(x, y, width, height), &uniforms.inv_proj_view);
        match march(uniforms.view_position, ray, uniforms.water_line) {
            Some(hit) => {
                let fragment = stage.run(&hit.vertex(), uniforms).to_fragment();
                terrain.shade(&fragment, uniforms)
            }
            None => OutputColor::new(sky.compose(ray, uniforms.time)),
        }
    })
}
