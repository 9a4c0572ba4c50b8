use blockshade_common::ConfigError;
use blockshade_common::color::smoothstep;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Distance-to-fog law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FogLaw {
    /// `1 - exp(-density * distance)`.
    Exponential { density: f32 },
    /// `clamp(distance * scale, 0, 1)`.
    Linear { scale: f32 },
}

impl FogLaw {
    /// Fog factor in [0, 1], non-decreasing in `distance`.
    pub fn factor(&self, distance: f32) -> f32 {
        let distance = distance.max(0.0);
        match *self {
            Self::Exponential { density } => (1.0 - (-density * distance).exp()).clamp(0.0, 1.0),
            Self::Linear { scale } => (distance * scale).clamp(0.0, 1.0),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Exponential { density } => ConfigError::ensure_non_negative("fog.density", density),
            Self::Linear { scale } => ConfigError::ensure_non_negative("fog.scale", scale),
        }
    }
}

/// How the baked shading scalar maps onto the shadow/sunlight blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightRemap {
    /// Hermite `smoothstep` over the shading range.
    Smooth,
    /// Clamped linear ramp over the shading range.
    Linear,
}

impl LightRemap {
    /// Map `shading` to a [0, 1] light factor over `[low, high]`.
    pub fn apply(&self, shading: f32, [low, high]: [f32; 2]) -> f32 {
        match self {
            Self::Smooth => smoothstep(low, high, shading),
            Self::Linear => ((shading - low) / (high - low)).clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Color multiplied into fragments below the water line.
pub enum UnderwaterTint {
    /// Pale blue, keeps most of the albedo.
    Soft,
    /// Saturated blue that drops the red channel.
    Strong,
}

impl UnderwaterTint {
    /// Multiplier applied to the lit color.
    pub fn color(&self) -> Vec3 {
        match self {
            Self::Soft => Vec3::new(0.35, 0.55, 0.85),
            Self::Strong => Vec3::new(0.0, 0.3, 1.0),
        }
    }
}

/// Tuning for the terrain surface shader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub fog: FogLaw,
    /// Decode albedo to linear before lighting and encode the result after.
    pub gamma_corrected: bool,
    pub light_remap: LightRemap,
    /// Baked shading range the mesher emits, darkest to brightest.
    pub shading_range: [f32; 2],
    pub shadow_tint: Vec3,
    pub sunlight_tint: Vec3,
    pub underwater: UnderwaterTint,
    /// Blend factor away from grayscale; 1.0 leaves color untouched.
    pub saturation: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self::optimized()
    }
}

impl TerrainConfig {
    pub const PRESETS: [&'static str; 3] = ["optimized", "classic", "high_quality"];

    pub fn optimized() -> Self {
        Self {
            fog: FogLaw::Exponential { density: 0.0008 },
            gamma_corrected: false,
            light_remap: LightRemap::Smooth,
            shading_range: [0.4, 1.0],
            shadow_tint: Vec3::new(0.72, 0.78, 0.92),
            sunlight_tint: Vec3::new(1.0, 0.97, 0.9),
            underwater: UnderwaterTint::Soft,
            saturation: 1.06,
        }
    }

    /// Linear fog, hard light remap and the strong blue underwater tint.
    pub fn classic() -> Self {
        Self {
            fog: FogLaw::Linear { scale: 0.0025 },
            light_remap: LightRemap::Linear,
            underwater: UnderwaterTint::Strong,
            saturation: 1.08,
            ..Self::optimized()
        }
    }

    pub fn high_quality() -> Self {
        Self {
            gamma_corrected: true,
            ..Self::optimized()
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "optimized" => Some(Self::optimized()),
            "classic" => Some(Self::classic()),
            "high_quality" => Some(Self::high_quality()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fog.validate()?;
        ConfigError::ensure_range("shading_range", self.shading_range[0], self.shading_range[1])?;
        ConfigError::ensure_positive("saturation", self.saturation)?;
        for (field, tint) in [("shadow_tint", self.shadow_tint), ("sunlight_tint", self.sunlight_tint)] {
            if !tint.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        for name in TerrainConfig::PRESETS {
            let config = TerrainConfig::preset(name).unwrap();
            assert!(config.validate().is_ok(), "{name}");
        }
        assert!(TerrainConfig::preset("cinematic").is_none());
    }

    #[test]
    fn default_is_optimized() {
        let config = TerrainConfig::default();
        assert_eq!(config, TerrainConfig::optimized());
        assert!(!config.gamma_corrected);
        assert_eq!(config.fog, FogLaw::Exponential { density: 0.0008 });
        assert_eq!(config.underwater, UnderwaterTint::Soft);
    }

    #[test]
    fn exponential_fog_is_monotone_and_saturates() {
        let fog = FogLaw::Exponential { density: 0.0008 };
        let mut previous = fog.factor(0.0);
        assert_eq!(previous, 0.0);
        for step in 1..=200 {
            let f = fog.factor(step as f32 * 50.0);
            assert!(f >= previous);
            previous = f;
        }
        assert_eq!(fog.factor(1.0e6), 1.0);
    }

    #[test]
    fn linear_fog_clamps() {
        let fog = FogLaw::Linear { scale: 0.0025 };
        assert_eq!(fog.factor(-10.0), 0.0);
        assert!((fog.factor(200.0) - 0.5).abs() < 1e-6);
        assert_eq!(fog.factor(400.0), 1.0);
        assert_eq!(fog.factor(1.0e6), 1.0);
    }

    #[test]
    fn remaps_agree_at_the_ends() {
        let range = [0.4, 1.0];
        for remap in [LightRemap::Smooth, LightRemap::Linear] {
            assert_eq!(remap.apply(0.4, range), 0.0);
            assert_eq!(remap.apply(1.0, range), 1.0);
            assert_eq!(remap.apply(0.1, range), 0.0);
        }
        // Smooth is softer near the dark end.
        assert!(LightRemap::Smooth.apply(0.55, range) < LightRemap::Linear.apply(0.55, range));
    }

    #[test]
    fn rejects_bad_values() {
        let negative_fog = TerrainConfig {
            fog: FogLaw::Exponential { density: -1.0 },
            ..TerrainConfig::default()
        };
        assert!(matches!(
            negative_fog.validate(),
            Err(ConfigError::Negative {
                field: "fog.density",
                ..
            })
        ));

        let flat = TerrainConfig {
            shading_range: [0.6, 0.6],
            ..TerrainConfig::default()
        };
        assert!(flat.validate().is_err());
    }

    #[test]
    fn fog_law_is_tagged_by_mode() {
        let yaml = "fog:\n  mode: linear\n  scale: 0.01\nunderwater: strong\n";
        let config: TerrainConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.fog, FogLaw::Linear { scale: 0.01 });
        assert_eq!(config.underwater, UnderwaterTint::Strong);
        assert_eq!(config.saturation, TerrainConfig::default().saturation);

        let json = serde_json::to_string(&TerrainConfig::classic()).unwrap();
        assert!(json.contains(r#""mode":"linear""#));
    }
}
