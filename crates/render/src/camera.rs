use glam::{Mat4, Vec3};

/// Yaw/pitch camera producing the view and projection matrices the scene
/// uniforms carry. Camera control lives outside the shading core; this type
/// only turns a pose into matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    /// Radians; 0 looks down +X, -90 degrees looks down -Z.
    pub yaw: f32,
    /// Radians, clamped to just under +-90 degrees.
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 24.0, 0.0),
            yaw: -90.0_f32.to_radians(),
            pitch: -10.0_f32.to_radians(),
            fov: 65.0_f32.to_radians(),
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl FlyCamera {
    const PITCH_LIMIT_DEGREES: f32 = 89.0;

    /// Camera at `position` looking along the given yaw/pitch, in degrees.
    pub fn looking(position: Vec3, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        let mut camera = Self {
            position,
            ..Self::default()
        };
        camera.yaw = yaw_degrees.to_radians();
        camera.pitch = 0.0;
        camera.rotate(0.0, pitch_degrees);
        camera
    }

    /// Unit view direction from yaw and pitch.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Turn by the given angles in degrees. Pitch is clamped short of the poles
    /// so the view basis never degenerates.
    pub fn rotate(&mut self, yaw_degrees: f32, pitch_degrees: f32) {
        let limit = Self::PITCH_LIMIT_DEGREES.to_radians();
        self.yaw += yaw_degrees.to_radians();
        self.pitch = (self.pitch + pitch_degrees.to_radians()).clamp(-limit, limit);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// OpenGL-convention perspective: NDC z in [-1, 1], far plane at +1.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    /// `proj * view` for the current viewport.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
