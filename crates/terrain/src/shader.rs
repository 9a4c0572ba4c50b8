use blockshade_common::color::{mix, saturate, to_display, to_linear};
use blockshade_common::{ConfigError, FragmentInput, OutputColor, SceneUniforms};
use blockshade_render::FragmentShader;
use glam::Vec3;

use crate::atlas::AtlasSampler;
use crate::config::TerrainConfig;

/// Underwater tint applies strictly below the water line.
pub fn is_underwater(world_y: f32, water_line: f32) -> bool {
    world_y < water_line
}

/// Surface color for chunk fragments.
#[derive(Debug, Clone)]
pub struct TerrainShader<A> {
    config: TerrainConfig,
    atlas: A,
}

impl<A: AtlasSampler> TerrainShader<A> {
    /// Fails if `config` does not validate.
    pub fn new(config: TerrainConfig, atlas: A) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(fog = ?config.fog, gamma = config.gamma_corrected, "terrain shader configured");
        Ok(Self { config, atlas })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Baked shading remapped to [0, 1]: 0 is fully shadowed, 1 full sun.
    pub fn light_factor(&self, shading: f32) -> f32 {
        self.config.light_remap.apply(shading, self.config.shading_range)
    }

    /// Shadow tint blended toward sunlight tint by `light_factor`.
    pub fn light_tint(&self, shading: f32) -> Vec3 {
        mix(self.config.shadow_tint, self.config.sunlight_tint, self.light_factor(shading))
    }

    /// Everything after the atlas lookup.
    pub fn shade_albedo(&self, albedo: Vec3, input: &FragmentInput, uniforms: &SceneUniforms) -> Vec3 {
        let gamma = self.config.gamma_corrected;
        let (albedo, background) = if gamma {
            (to_linear(albedo), to_linear(uniforms.background_color))
        } else {
            (albedo, uniforms.background_color)
        };

        let mut color = albedo * input.shading * self.light_tint(input.shading);
        if is_underwater(input.world_position.y, uniforms.water_line) {
            color *= self.config.underwater.color();
        }

        let fog = self.config.fog.factor(input.clip_depth_over_w);
        color = mix(color, background, fog);

        if gamma {
            color = to_display(color);
        }
        // Runs after fog, so fully fogged fragments are the saturated background.
        saturate(color, self.config.saturation)
    }
}

impl<A: AtlasSampler> FragmentShader for TerrainShader<A> {
    type Input = FragmentInput;

    fn shade(&self, input: &FragmentInput, uniforms: &SceneUniforms) -> OutputColor {
        let texel = self.atlas.sample(input.texcoord.truncate(), input.texcoord.z);
        OutputColor::new(self.shade_albedo(texel.truncate(), input, uniforms))
    }
}
