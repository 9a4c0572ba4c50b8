//! Vertex/interpolation stage for the two geometry types.
//!
//! The sky is a fullscreen quad passed straight through to clip space at the
//! far plane. Terrain vertices go through model, view and projection. The
//! rasterizer's linear interpolation is modelled by [`Varyings::interpolate`].

use blockshade_common::{FragmentInput, SceneUniforms, SkyVertex, TerrainVertex};
use glam::{Vec2, Vec3, Vec4};

/// Fullscreen quad as a triangle strip covering [-1, 1] x [-1, 1].
pub const SKY_QUAD: [SkyVertex; 4] = [
    SkyVertex {
        texcoord: [0.0, 0.0],
        position: [-1.0, -1.0, 0.0],
    },
    SkyVertex {
        texcoord: [1.0, 0.0],
        position: [1.0, -1.0, 0.0],
    },
    SkyVertex {
        texcoord: [0.0, 1.0],
        position: [-1.0, 1.0, 0.0],
    },
    SkyVertex {
        texcoord: [1.0, 1.0],
        position: [1.0, 1.0, 0.0],
    },
];

/// Attributes that the rasterizer interpolates across a triangle.
pub trait Varyings: Copy {
    /// Linear blend of three vertices' outputs by barycentric weights.
    fn interpolate(a: &Self, b: &Self, c: &Self, barycentric: Vec3) -> Self;
}

fn blend<T>(a: T, b: T, c: T, w: Vec3) -> T
where
    T: std::ops::Mul<f32, Output = T> + std::ops::Add<Output = T>,
{
    a * w.x + b * w.y + c * w.z
}

/// Center of pixel `(x, y)` in NDC, row 0 at the top.
pub fn pixel_to_ndc(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) / width as f32 * 2.0 - 1.0,
        1.0 - (y as f32 + 0.5) / height as f32 * 2.0,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyVaryings {
    /// Always `(x, y, 1, 1)`: the far plane.
    pub clip: Vec4,
    pub ndc_xy: Vec2,
}

/// Pass the quad corner through untransformed.
pub fn sky_vertex(vertex: &SkyVertex) -> SkyVaryings {
    let xy = Vec2::new(vertex.position[0], vertex.position[1]);
    SkyVaryings {
        clip: Vec4::new(xy.x, xy.y, 1.0, 1.0),
        ndc_xy: xy,
    }
}

impl Varyings for SkyVaryings {
    fn interpolate(a: &Self, b: &Self, c: &Self, w: Vec3) -> Self {
        Self {
            clip: blend(a.clip, b.clip, c.clip, w),
            ndc_xy: blend(a.ndc_xy, b.ndc_xy, c.ndc_xy, w),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainVaryings {
    pub clip: Vec4,
    pub world_position: Vec3,
    pub texcoord: Vec3,
    pub shading: f32,
}

impl TerrainVaryings {
    /// Resolve the fragment-stage input after interpolation.
    ///
    /// The fog pseudo-distance is window depth (NDC z remapped to [0, 1])
    /// multiplied by clip `w`, i.e. `frag_coord.z / frag_coord.w`.
    pub fn to_fragment(&self) -> FragmentInput {
        let window_depth = self.clip.z / self.clip.w * 0.5 + 0.5;
        FragmentInput {
            texcoord: self.texcoord,
            shading: self.shading,
            world_position: self.world_position,
            clip_depth_over_w: window_depth * self.clip.w,
        }
    }
}

impl Varyings for TerrainVaryings {
    fn interpolate(a: &Self, b: &Self, c: &Self, w: Vec3) -> Self {
        Self {
            clip: blend(a.clip, b.clip, c.clip, w),
            world_position: blend(a.world_position, b.world_position, c.world_position, w),
            texcoord: blend(a.texcoord, b.texcoord, c.texcoord, w),
            shading: blend(a.shading, b.shading, c.shading, w),
        }
    }
}

/// Terrain vertex transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerrainVertexStage {
    /// The caller guarantees the model matrix is identity for this draw, so the
    /// model multiply is skipped. Output is unchanged when the guarantee holds.
    pub skip_model_transform: bool,
}

impl TerrainVertexStage {
    pub fn new(skip_model_transform: bool) -> Self {
        Self {
            skip_model_transform,
        }
    }

    pub fn run(&self, vertex: &TerrainVertex, uniforms: &SceneUniforms) -> TerrainVaryings {
        let local = Vec3::from_array(vertex.position);
        let world_position = if self.skip_model_transform {
            local
        } else {
            (uniforms.model * local.extend(1.0)).truncate()
        };
        TerrainVaryings {
            clip: uniforms.proj_view() * world_position.extend(1.0),
            world_position,
            texcoord: Vec3::from_array(vertex.texcoord),
            shading: vertex.shading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    fn camera_uniforms() -> SceneUniforms {
        let proj = Mat4::perspective_rh_gl(65f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
        let eye = Vec3::new(0.0, 20.0, 0.0);
        let view = Mat4::look_at_rh(eye, eye + Vec3::NEG_Z, Vec3::Y);
        SceneUniforms::from_camera(proj, view, eye)
    }

    #[test]
    fn sky_vertices_sit_on_far_plane() {
        for v in &SKY_QUAD {
            let out = sky_vertex(v);
            assert_eq!(out.clip.z, 1.0);
            assert_eq!(out.clip.w, 1.0);
            assert_eq!(out.ndc_xy, Vec2::new(v.position[0], v.position[1]));
        }
    }

    #[test]
    fn sky_interpolation_matches_pixel_centers() {
        // Triangle (-1,-1), (1,-1), (-1,1) covers the lower-left half.
        let [a, b, c, _] = SKY_QUAD.map(|v| sky_vertex(&v));
        let ndc = pixel_to_ndc(1, 6, 8, 8);
        let wb = (ndc.x + 1.0) / 2.0;
        let wc = (ndc.y + 1.0) / 2.0;
        let out = SkyVaryings::interpolate(&a, &b, &c, Vec3::new(1.0 - wb - wc, wb, wc));
        assert!(out.ndc_xy.abs_diff_eq(ndc, 1e-6));
    }

    #[test]
    fn identity_skip_is_a_no_op() {
        let uniforms = camera_uniforms();
        let v = TerrainVertex::new(Vec3::new(3.0, 11.0, -30.0), Vec3::new(0.25, 0.75, 2.0), 0.6);
        let full = TerrainVertexStage::new(false).run(&v, &uniforms);
        let fast = TerrainVertexStage::new(true).run(&v, &uniforms);
        assert_eq!(full, fast);
    }

    #[test]
    fn model_matrix_moves_world_position() {
        let mut uniforms = camera_uniforms();
        uniforms.model = Mat4::from_translation(Vec3::new(16.0, 0.0, 32.0));
        let v = TerrainVertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 1.0);
        let out = TerrainVertexStage::new(false).run(&v, &uniforms);
        assert_eq!(out.world_position, Vec3::new(17.0, 2.0, 35.0));
        assert_eq!(out.texcoord, Vec3::ZERO);
        assert_eq!(out.shading, 1.0);
    }

    #[test]
    fn fog_distance_grows_with_depth() {
        let uniforms = camera_uniforms();
        let stage = TerrainVertexStage::default();
        let near = stage.run(&TerrainVertex::new(Vec3::new(0.0, 20.0, -5.0), Vec3::ZERO, 1.0), &uniforms);
        let far = stage.run(&TerrainVertex::new(Vec3::new(0.0, 20.0, -500.0), Vec3::ZERO, 1.0), &uniforms);
        let near = near.to_fragment().clip_depth_over_w;
        let far = far.to_fragment().clip_depth_over_w;
        assert!(near > 0.0);
        assert!(far > near);
        // Window depth approaches 1 well before the far plane, so this tracks view distance.
        assert!((far - 500.0).abs() < 1.0);
    }

    #[test]
    fn terrain_attributes_interpolate_linearly() {
        let uniforms = camera_uniforms();
        let stage = TerrainVertexStage::default();
        let a = stage.run(&TerrainVertex::new(Vec3::new(0.0, 10.0, -10.0), Vec3::new(0.0, 0.0, 1.0), 0.4), &uniforms);
        let b = stage.run(&TerrainVertex::new(Vec3::new(1.0, 10.0, -10.0), Vec3::new(1.0, 0.0, 1.0), 1.0), &uniforms);
        let c = stage.run(&TerrainVertex::new(Vec3::new(0.0, 11.0, -10.0), Vec3::new(0.0, 1.0, 1.0), 0.4), &uniforms);
        let mid = TerrainVaryings::interpolate(&a, &b, &c, Vec3::new(0.5, 0.5, 0.0));
        assert!((mid.shading - 0.7).abs() < 1e-6);
        assert_eq!(mid.texcoord, Vec3::new(0.5, 0.0, 1.0));
        assert_eq!(mid.world_position, Vec3::new(0.5, 10.0, -10.0));
    }
}
