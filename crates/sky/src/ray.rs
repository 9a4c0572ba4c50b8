use glam::{Mat4, Vec2, Vec3, Vec4};

/// Below this magnitude the homogeneous divisor is treated as zero.
pub const MIN_HOMOGENEOUS_W: f32 = 1e-6;

/// World-space view direction through `ndc_xy`, taken at the far plane.
///
/// The far-plane clip point `(x, y, 1, 1)` is unprojected and divided by its
/// `w`. When `w` is (near) zero the point lies at infinity, as with an
/// infinite-far projection, and its `xyz` already is the direction; the
/// division is skipped. A zero vector falls back to straight up.
pub fn reconstruct_ray(ndc_xy: Vec2, inv_proj_view: &Mat4) -> Vec3 {
    let eye = *inv_proj_view * Vec4::new(ndc_xy.x, ndc_xy.y, 1.0, 1.0);
    let point = if eye.w.abs() < MIN_HOMOGENEOUS_W {
        tracing::trace!(w = eye.w, "ray reconstruction hit a degenerate divisor");
        eye.truncate()
    } else {
        eye.truncate() / eye.w
    };
    point.try_normalize().unwrap_or(Vec3::Y)
}
