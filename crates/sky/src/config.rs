use blockshade_common::ConfigError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Tuning for the sky composer.
///
/// Distances on the cloud plane are in plane units: the plane sits one unit
/// above the eye, so a ray `(x, y, z)` hits it at `(x / y, z / y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub horizon_color: Vec3,
    pub zenith_color: Vec3,
    /// `max(0, ray.y)` band over which the gradient goes from horizon to zenith.
    pub gradient_band: [f32; 2],

    /// Clouds are skipped unless `ray.y` is strictly above this.
    pub cloud_gate: f32,
    /// Edge length of one cloud block on the plane.
    pub cloud_cell_size: f32,
    /// Noise frequency applied to quantized plane coordinates.
    pub cloud_scale: f32,
    /// Plane units per second along +x.
    pub wind_speed: f32,
    /// Noise band mapped onto the cloud mask by smoothstep.
    pub cloud_band: [f32; 2],
    pub cloud_color: Vec3,
    /// Maximum cloud blend weight, reached overhead.
    pub cloud_opacity: f32,
    /// Rate at which cloud weight rises from zero at the gate.
    pub cloud_horizon_falloff: f32,

    /// Direction toward the sun; normalized on use.
    pub sun_direction: Vec3,
    pub sun_color: Vec3,
    pub glare_exponent: f32,
    pub halo_exponent: f32,
    pub halo_strength: f32,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self::blocky()
    }
}

impl SkyConfig {
    pub const PRESETS: [&'static str; 2] = ["blocky", "soft"];

    /// Large, hard-edged cloud blocks matching the voxel terrain.
    pub fn blocky() -> Self {
        Self {
            horizon_color: Vec3::new(0.78, 0.9, 1.0),
            zenith_color: Vec3::new(0.3, 0.55, 0.95),
            gradient_band: [-0.2, 0.5],
            cloud_gate: 0.05,
            cloud_cell_size: 0.08,
            cloud_scale: 2.0,
            wind_speed: 0.02,
            cloud_band: [0.6, 0.65],
            cloud_color: Vec3::ONE,
            cloud_opacity: 0.9,
            cloud_horizon_falloff: 6.0,
            sun_direction: Vec3::new(0.4, 0.5, -0.75),
            sun_color: Vec3::new(1.0, 0.95, 0.8),
            glare_exponent: 200.0,
            halo_exponent: 50.0,
            halo_strength: 0.25,
        }
    }

    /// Finer blocks and wider mask edges for a less stylized look.
    pub fn soft() -> Self {
        Self {
            cloud_cell_size: 0.03,
            cloud_band: [0.45, 0.7],
            cloud_opacity: 0.75,
            cloud_horizon_falloff: 4.0,
            halo_strength: 0.35,
            ..Self::blocky()
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "blocky" => Some(Self::blocky()),
            "soft" => Some(Self::soft()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::ensure_range("gradient_band", self.gradient_band[0], self.gradient_band[1])?;
        ConfigError::ensure_non_negative("cloud_gate", self.cloud_gate)?;
        ConfigError::ensure_positive("cloud_cell_size", self.cloud_cell_size)?;
        ConfigError::ensure_positive("cloud_scale", self.cloud_scale)?;
        ConfigError::ensure_finite("wind_speed", self.wind_speed)?;
        ConfigError::ensure_range("cloud_band", self.cloud_band[0], self.cloud_band[1])?;
        ConfigError::ensure_non_negative("cloud_opacity", self.cloud_opacity)?;
        ConfigError::ensure_non_negative("cloud_horizon_falloff", self.cloud_horizon_falloff)?;
        if !self.sun_direction.is_finite() || self.sun_direction.length_squared() == 0.0 {
            return Err(ConfigError::ZeroDirection {
                field: "sun_direction",
            });
        }
        ConfigError::ensure_positive("glare_exponent", self.glare_exponent)?;
        ConfigError::ensure_positive("halo_exponent", self.halo_exponent)?;
        ConfigError::ensure_non_negative("halo_strength", self.halo_strength)?;
        Ok(())
    }
}
