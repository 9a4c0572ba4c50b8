//! Pipeline configuration file: `{ sky: SkyConfig, terrain: TerrainConfig }`
//! as YAML, or JSON when the file ends in `.json`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use blockshade_sky::SkyConfig;
use blockshade_terrain::TerrainConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sky: SkyConfig,
    pub terrain: TerrainConfig,
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let config: Self = if is_json(path) {
            serde_json::from_str(&txt).context("parse config json")?
        } else {
            serde_yaml::from_str(&txt).context("parse config yaml")?
        };
        config.sky.validate().context("invalid sky config")?;
        config.terrain.validate().context("invalid terrain config")?;
        tracing::debug!(path = %path.display(), "pipeline config loaded");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let txt = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        std::fs::write(path, txt).with_context(|| format!("write config: {}", path.display()))
    }

    /// Optional file, then named presets replacing whole sections.
    pub fn resolve(path: Option<&Path>, sky_preset: Option<&str>, terrain_preset: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(name) = sky_preset {
            let Some(sky) = SkyConfig::preset(name) else {
                bail!("unknown sky preset '{name}' (known: {})", SkyConfig::PRESETS.join(", "));
            };
            config.sky = sky;
        }
        if let Some(name) = terrain_preset {
            let Some(terrain) = TerrainConfig::preset(name) else {
                bail!(
                    "unknown terrain preset '{name}' (known: {})",
                    TerrainConfig::PRESETS.join(", ")
                );
            };
            config.terrain = terrain;
        }
        Ok(config)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
