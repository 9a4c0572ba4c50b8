use glam::{Vec2, Vec4};

/// Source of block albedo, indexed by UV and texture-array layer.
pub trait AtlasSampler {
    /// RGBA in [0, 1] at `uv` on `layer`.
    fn sample(&self, uv: Vec2, layer: f32) -> Vec4;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    #[error("texture array needs at least one layer")]
    NoLayers,
    #[error("texture array layers must be non-empty, got {width}x{height}")]
    EmptyLayer { width: u32, height: u32 },
    #[error("layer {layer} has {actual} bytes, expected {expected}")]
    LayerSize {
        layer: usize,
        expected: usize,
        actual: usize,
    },
}

/// RGBA8 texture array with nearest filtering and repeat wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureArray {
    width: u32,
    height: u32,
    layers: usize,
    texels: Vec<[u8; 4]>,
}

impl TextureArray {
    /// Build from tightly packed RGBA8 layers of identical size.
    pub fn from_layers(width: u32, height: u32, layers: &[Vec<u8>]) -> Result<Self, AtlasError> {
        if layers.is_empty() {
            return Err(AtlasError::NoLayers);
        }
        if width == 0 || height == 0 {
            return Err(AtlasError::EmptyLayer { width, height });
        }
        let expected = width as usize * height as usize * 4;
        let mut texels = Vec::with_capacity(expected / 4 * layers.len());
        for (layer, bytes) in layers.iter().enumerate() {
            if bytes.len() != expected {
                return Err(AtlasError::LayerSize {
                    layer,
                    expected,
                    actual: bytes.len(),
                });
            }
            texels.extend(bytes.chunks_exact(4).map(|t| [t[0], t[1], t[2], t[3]]));
        }
        tracing::debug!(width, height, layers = layers.len(), "texture array built");
        Ok(Self {
            width,
            height,
            layers: layers.len(),
            texels,
        })
    }

    /// One 1x1 layer per color.
    pub fn solid(colors: &[[u8; 4]]) -> Result<Self, AtlasError> {
        let layers: Vec<Vec<u8>> = colors.iter().map(|c| c.to_vec()).collect();
        Self::from_layers(1, 1, &layers)
    }

    /// Number of layers; out-of-range layer indices clamp to the last one.
    pub fn layer_count(&self) -> usize {
        self.layers
    }

    /// Round to the nearest layer and clamp into range, as texture-array
    /// hardware does.
    fn layer_index(&self, layer: f32) -> usize {
        let nearest = (layer + 0.5).floor().max(0.0) as usize;
        nearest.min(self.layers - 1)
    }

    fn wrap(coord: f32, size: u32) -> usize {
        let repeated = coord - coord.floor();
        ((repeated * size as f32) as usize).min(size as usize - 1)
    }
}

impl AtlasSampler for TextureArray {
    fn sample(&self, uv: Vec2, layer: f32) -> Vec4 {
        let x = Self::wrap(uv.x, self.width);
        let y = Self::wrap(uv.y, self.height);
        let layer_len = self.width as usize * self.height as usize;
        let index = self.layer_index(layer) * layer_len + y * self.width as usize + x;
        let [r, g, b, a] = self.texels[index];
        Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
    }
}
