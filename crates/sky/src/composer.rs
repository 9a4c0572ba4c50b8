use blockshade_common::color::{mix, smoothstep};
use blockshade_common::{ConfigError, OutputColor, SceneUniforms, SkyFragment};
use blockshade_noise::turbulence2;
use blockshade_render::FragmentShader;
use glam::{Vec2, Vec3};

use crate::config::SkyConfig;
use crate::ray::reconstruct_ray;

/// Sky color for a view ray: gradient, then clouds, then additive sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyComposer {
    config: SkyConfig,
    sun_direction: Vec3,
}

impl SkyComposer {
    /// Validates `config` before building the composer.
    pub fn new(config: SkyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sun_direction: config.sun_direction.normalize(),
            config,
        })
    }

    /// Active sky tuning.
    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    /// Unit vector toward the sun.
    pub fn sun_direction(&self) -> Vec3 {
        self.sun_direction
    }

    /// Horizon-to-zenith blend. Rays below the horizon get the `ray.y = 0` color.
    pub fn gradient(&self, ray: Vec3) -> Vec3 {
        let [low, high] = self.config.gradient_band;
        let t = smoothstep(low, high, ray.y.max(0.0));
        mix(self.config.horizon_color, self.config.zenith_color, t)
    }

    /// Where the ray meets the cloud plane, shifted downwind by `time`.
    /// `None` at or below the gate.
    pub fn cloud_plane(&self, ray: Vec3, time: f32) -> Option<Vec2> {
        if ray.y <= self.config.cloud_gate {
            return None;
        }
        let hit = Vec2::new(ray.x, ray.z) / ray.y;
        Some(hit + Vec2::new(time * self.config.wind_speed, 0.0))
    }

    /// Snap a plane coordinate to the corner of its cloud block.
    pub fn quantize(&self, plane: Vec2) -> Vec2 {
        let cell = self.config.cloud_cell_size;
        (plane / cell).floor() * cell
    }

    /// Near-binary cloud coverage in [0, 1].
    pub fn cloud_mask(&self, ray: Vec3, time: f32) -> f32 {
        let Some(plane) = self.cloud_plane(ray, time) else {
            return 0.0;
        };
        let block = self.quantize(plane);
        let density = turbulence2(block * self.config.cloud_scale).max(0.0);
        let [low, high] = self.config.cloud_band;
        smoothstep(low, high, density)
    }

    /// How strongly clouds show along this ray: zero at the gate, rising
    /// exponentially toward `cloud_opacity` overhead.
    pub fn cloud_weight(&self, ray: Vec3) -> f32 {
        let height = (ray.y - self.config.cloud_gate).max(0.0);
        self.config.cloud_opacity * (1.0 - (-self.config.cloud_horizon_falloff * height).exp())
    }

    /// Additive glare and halo around the sun.
    pub fn sun(&self, ray: Vec3) -> Vec3 {
        let cos_theta = ray.dot(self.sun_direction).max(0.0);
        let glare = cos_theta.powf(self.config.glare_exponent);
        let halo = cos_theta.powf(self.config.halo_exponent) * self.config.halo_strength;
        self.config.sun_color * (glare + halo)
    }

    /// Full sky color for a unit view ray at `time` seconds.
    pub fn compose(&self, ray: Vec3, time: f32) -> Vec3 {
        let mut color = self.gradient(ray);
        let mask = self.cloud_mask(ray, time);
        if mask > 0.0 {
            color = mix(color, self.config.cloud_color, mask * self.cloud_weight(ray));
        }
        color + self.sun(ray)
    }
}

impl Default for SkyComposer {
    fn default() -> Self {
        let config = SkyConfig::default();
        Self {
            sun_direction: config.sun_direction.normalize(),
            config,
        }
    }
}

impl FragmentShader for SkyComposer {
    type Input = SkyFragment;

    fn shade(&self, input: &SkyFragment, uniforms: &SceneUniforms) -> OutputColor {
        let ray = reconstruct_ray(input.ndc_xy, &uniforms.inv_proj_view);
        OutputColor::new(self.compose(ray, uniforms.time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockshade_render::{FlyCamera, render_fullscreen};

    fn upward_rays() -> impl Iterator<Item = Vec3> {
        (-20..=20).flat_map(|z| {
            (-20..=20).map(move |x| Vec3::new(x as f32 * 0.15, 1.0, z as f32 * 0.15).normalize())
        })
    }

    #[test]
    fn zenith_gradient_is_exact() {
        let sky = SkyComposer::default();
        assert_eq!(sky.gradient(Vec3::Y), sky.config().zenith_color);
    }

    #[test]
    fn looking_down_is_gradient_only() {
        let sky = SkyComposer::default();
        let down = Vec3::NEG_Y;
        assert!(sky.cloud_plane(down, 10.0).is_none());
        assert_eq!(sky.cloud_mask(down, 10.0), 0.0);
        assert_eq!(sky.compose(down, 10.0), sky.gradient(down));

        let c = sky.config();
        let color = sky.gradient(down);
        assert!(color.distance(c.horizon_color) < color.distance(c.zenith_color));
    }

    #[test]
    fn below_horizon_matches_horizon_level() {
        let sky = SkyComposer::default();
        let level = Vec3::new(1.0, 0.0, 0.0);
        let below = Vec3::new(1.0, -0.5, 0.0).normalize();
        assert_eq!(sky.gradient(level), sky.gradient(below));
    }

    #[test]
    fn gate_is_strict() {
        let sky = SkyComposer::default();
        let at_gate = Vec3::new(0.0, sky.config().cloud_gate, 1.0);
        assert!(sky.cloud_plane(at_gate, 0.0).is_none());
        let above = Vec3::new(0.0, 0.2, 1.0).normalize();
        assert!(sky.cloud_plane(above, 0.0).is_some());
    }

    #[test]
    fn cloud_weight_fades_toward_horizon() {
        let sky = SkyComposer::default();
        let gate = sky.config().cloud_gate;
        assert_eq!(sky.cloud_weight(Vec3::new(1.0, gate, 0.0)), 0.0);
        let low = sky.cloud_weight(Vec3::new(0.0, 0.1, 1.0).normalize());
        let high = sky.cloud_weight(Vec3::new(0.0, 0.8, 0.2).normalize());
        assert!(low > 0.0);
        assert!(high > low);
        assert!(high <= sky.config().cloud_opacity);
    }

    #[test]
    fn wind_moves_plane_along_x_only() {
        let sky = SkyComposer::default();
        let ray = Vec3::new(0.2, 0.9, -0.3).normalize();
        let still = sky.cloud_plane(ray, 0.0).unwrap();
        let later = sky.cloud_plane(ray, 50.0).unwrap();
        assert!((later.x - still.x - 50.0 * sky.config().wind_speed).abs() < 1e-5);
        assert_eq!(later.y, still.y);
    }

    #[test]
    fn quantized_blocks_share_one_mask() {
        let sky = SkyComposer::default();
        let cell = sky.config().cloud_cell_size;
        let corner = Vec2::new(3.0, -2.0) * cell;
        let inside = corner + Vec2::splat(cell * 0.4);
        assert!(sky.quantize(inside).abs_diff_eq(corner, 1e-5));
        let neighbour = corner + Vec2::new(cell * 1.5, cell * 0.4);
        assert!(sky.quantize(neighbour).abs_diff_eq(corner + Vec2::new(cell, 0.0), 1e-5));
    }

    #[test]
    fn mask_is_near_binary_with_partial_coverage() {
        let sky = SkyComposer::default();
        let masks: Vec<f32> = upward_rays().map(|r| sky.cloud_mask(r, 0.0)).collect();
        assert!(masks.iter().all(|m| (0.0..=1.0).contains(m)));
        let cloudy = masks.iter().filter(|&&m| m >= 1.0).count();
        let clear = masks.iter().filter(|&&m| m <= 0.0).count();
        assert!(cloudy > 0, "expected some cloud blocks");
        assert!(clear > cloudy, "expected mostly clear sky");
    }

    #[test]
    fn clouds_brighten_toward_white() {
        let sky = SkyComposer::default();
        let Some(ray) = upward_rays().find(|&r| sky.cloud_mask(r, 0.0) >= 1.0) else {
            panic!("no cloudy ray found");
        };
        let base = sky.gradient(ray) + sky.sun(ray);
        let shaded = sky.compose(ray, 0.0);
        assert!(shaded.x > base.x);
        assert!(shaded.y > base.y);
    }

    #[test]
    fn sun_terms_are_additive_and_directional() {
        let sky = SkyComposer::default();
        let c = sky.config();
        let at_sun = sky.sun(sky.sun_direction());
        assert!(at_sun.abs_diff_eq(c.sun_color * (1.0 + c.halo_strength), 1e-3));

        let away = -sky.sun_direction();
        assert_eq!(sky.sun(away), Vec3::ZERO);

        // Glare is much tighter than the halo.
        let off_axis = (sky.sun_direction() + Vec3::new(0.1, 0.0, 0.0)).normalize();
        let cos = off_axis.dot(sky.sun_direction());
        assert!(cos.powf(c.glare_exponent) < cos.powf(c.halo_exponent));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SkyConfig {
            cloud_scale: -1.0,
            ..SkyConfig::default()
        };
        assert!(SkyComposer::new(config).is_err());
    }

    #[test]
    fn fullscreen_shading_ignores_camera_position() {
        let sky = SkyComposer::default();
        let here = FlyCamera::looking(Vec3::new(0.0, 20.0, 0.0), -90.0, 30.0);
        let there = FlyCamera::looking(Vec3::new(500.0, 80.0, -900.0), -90.0, 30.0);
        let a = SceneUniforms::from_camera(here.projection_matrix(), here.view_matrix(), here.position);
        let b = SceneUniforms::from_camera(there.projection_matrix(), there.view_matrix(), there.position);
        let fa = render_fullscreen(&sky, &a, 24, 16).unwrap();
        let fb = render_fullscreen(&sky, &b, 24, 16).unwrap();
        for (pa, pb) in fa.pixels().iter().zip(fb.pixels()) {
            assert!(pa.rgb.abs_diff_eq(pb.rgb, 1e-4));
        }
    }

    #[test]
    fn looking_up_is_mostly_zenith() {
        let sky = SkyComposer::default();
        let cam = FlyCamera::looking(Vec3::ZERO, -90.0, 89.0);
        let uniforms = SceneUniforms::from_camera(cam.projection_matrix(), cam.view_matrix(), cam.position);
        let color = sky.shade(&SkyFragment { ndc_xy: Vec2::ZERO }, &uniforms).rgb;
        let ray = reconstruct_ray(Vec2::ZERO, &uniforms.inv_proj_view);
        assert!(ray.y > 0.99);
        assert_eq!(color, sky.compose(ray, 0.0));
        assert!(sky.gradient(ray).abs_diff_eq(sky.config().zenith_color, 1e-6));
    }
}
