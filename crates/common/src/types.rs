use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::gpu::SceneUniformsGpu;

/// Light sky blue used as the clear color and the fog target.
pub const DEFAULT_BACKGROUND_COLOR: Vec3 = Vec3::new(0.58, 0.83, 0.99);

/// World-space height of the water surface.
pub const DEFAULT_WATER_LINE: f32 = 11.95;

/// Interpolated inputs for one terrain fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FragmentInput {
    /// Atlas UV in `xy`, texture-array layer in `z`.
    pub texcoord: Vec3,
    /// Baked face lighting and ambient occlusion, 0 darkest to 1 brightest.
    pub shading: f32,
    pub world_position: Vec3,
    /// Window depth times clip `w`; grows with distance from the camera.
    pub clip_depth_over_w: f32,
}

impl Default for FragmentInput {
    fn default() -> Self {
        Self {
            texcoord: Vec3::ZERO,
            shading: 1.0,
            world_position: Vec3::ZERO,
            clip_depth_over_w: 0.0,
        }
    }
}

/// Interpolated input for one sky fragment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SkyFragment {
    /// Normalized device coordinates in [-1, 1].
    pub ndc_xy: Vec2,
}

/// Final color of a fragment. Both surfaces are opaque, so alpha is implied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputColor {
    pub rgb: Vec3,
}

impl OutputColor {
    pub const BLACK: Self = Self { rgb: Vec3::ZERO };

    pub fn new(rgb: Vec3) -> Self {
        Self { rgb }
    }

    /// Alpha is always 1.0.
    pub fn rgba(&self) -> Vec4 {
        self.rgb.extend(1.0)
    }

    /// Quantize to 8-bit RGBA, clamping out-of-range channels like a unorm target.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.rgb.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
        [
            c.x.round() as u8,
            c.y.round() as u8,
            c.z.round() as u8,
            255,
        ]
    }
}

/// Per-frame uniform snapshot shared by every fragment of a draw.
///
/// Written once per frame by the frame orchestrator, read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneUniforms {
    pub proj: Mat4,
    pub view: Mat4,
    /// Terrain only; may be identity.
    pub model: Mat4,
    /// Sky only: inverse of `proj * view` with the view's translation removed.
    pub inv_proj_view: Mat4,
    pub background_color: Vec3,
    pub water_line: f32,
    /// Seconds since the orchestrator started.
    pub time: f32,
    pub resolution: Vec2,
    pub view_position: Vec3,
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            proj: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            inv_proj_view: Mat4::IDENTITY,
            background_color: DEFAULT_BACKGROUND_COLOR,
            water_line: DEFAULT_WATER_LINE,
            time: 0.0,
            resolution: Vec2::new(800.0, 600.0),
            view_position: Vec3::ZERO,
        }
    }
}

impl SceneUniforms {
    /// Build a snapshot from camera matrices, deriving the sky inverse.
    pub fn from_camera(proj: Mat4, view: Mat4, view_position: Vec3) -> Self {
        Self {
            proj,
            view,
            inv_proj_view: Self::sky_inverse(proj, view),
            view_position,
            ..Self::default()
        }
    }

    /// `inverse(proj * rotation_only(view))`.
    ///
    /// Dropping the translation keeps far-plane points direction-only for any
    /// finite far distance, so the sky never shifts as the camera moves.
    pub fn sky_inverse(proj: Mat4, view: Mat4) -> Mat4 {
        let rotation = Mat4::from_mat3(Mat3::from_mat4(view));
        (proj * rotation).inverse()
    }

    pub fn proj_view(&self) -> Mat4 {
        self.proj * self.view
    }

    pub fn to_gpu(&self) -> SceneUniformsGpu {
        SceneUniformsGpu {
            proj: self.proj.to_cols_array_2d(),
            view: self.view.to_cols_array_2d(),
            model: self.model.to_cols_array_2d(),
            inv_proj_view: self.inv_proj_view.to_cols_array_2d(),
            background_color: self.background_color.to_array(),
            water_line: self.water_line,
            view_position: self.view_position.to_array(),
            time: self.time,
            resolution: self.resolution.to_array(),
            _pad: [0.0; 2],
        }
    }
}
