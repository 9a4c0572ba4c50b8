use blockshade_common::{OutputColor, SceneUniforms, SkyFragment};
use rayon::prelude::*;

use crate::vertex::pixel_to_ndc;

/// Per-fragment shading interface. Sky and terrain shaders implement this.
///
/// A shader reads one interpolated fragment and the frame's uniform snapshot and
/// produces a color. It never mutates either, so any number of fragments can be
/// shaded concurrently against the same snapshot.
pub trait FragmentShader {
    /// Interpolated per-fragment input this shader consumes.
    type Input;

    /// Shade one fragment.
    fn shade(&self, input: &Self::Input, uniforms: &SceneUniforms) -> OutputColor;
}

/// Errors from framebuffer construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FramebufferError {
    #[error("framebuffer must have a non-zero size, got {width}x{height}")]
    Empty { width: u32, height: u32 },
}

/// CPU color target, row-major with row 0 at the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<OutputColor>,
}

impl Framebuffer {
    /// Create a black framebuffer.
    pub fn new(width: u32, height: u32) -> Result<Self, FramebufferError> {
        if width == 0 || height == 0 {
            return Err(FramebufferError::Empty { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![OutputColor::BLACK; width as usize * height as usize],
        })
    }

    /// Evaluate `f(x, y)` for every pixel, one row per rayon task. Worker count
    /// comes from the current rayon pool.
    pub fn evaluate<F>(width: u32, height: u32, f: F) -> Result<Self, FramebufferError>
    where
        F: Fn(u32, u32) -> OutputColor + Sync,
    {
        let mut fb = Self::new(width, height)?;
        let _span = tracing::debug_span!(
            "evaluate",
            width,
            height,
            threads = rayon::current_num_threads()
        )
        .entered();

        fb.pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.iter_mut().enumerate() {
                    *px = f(x as u32, y as u32);
                }
            });

        tracing::debug!(pixels = fb.pixels.len(), "framebuffer evaluated");
        Ok(fb)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[OutputColor] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<OutputColor> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Tightly packed RGBA8 bytes, clamped like a unorm render target.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }
}

/// Shade the fullscreen sky quad at `width x height`.
///
/// Each pixel receives the NDC of its center, which is what linear
/// interpolation of the quad's corner positions yields there.
pub fn render_fullscreen<S>(
    shader: &S,
    uniforms: &SceneUniforms,
    width: u32,
    height: u32,
) -> Result<Framebuffer, FramebufferError>
where
    S: FragmentShader<Input = SkyFragment> + Sync,
{
    Framebuffer::evaluate(width, height, |x, y| {
        let fragment = SkyFragment {
            ndc_xy: pixel_to_ndc(x, y, width, height),
        };
        shader.shade(&fragment, uniforms)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Encodes the fragment's NDC into the color so tests can inspect it.
    struct NdcShader;

    impl FragmentShader for NdcShader {
        type Input = SkyFragment;

        fn shade(&self, input: &SkyFragment, _uniforms: &SceneUniforms) -> OutputColor {
            OutputColor::new(Vec3::new(input.ndc_xy.x, input.ndc_xy.y, 0.0))
        }
    }

    #[test]
    fn zero_sized_target_is_rejected() {
        assert_eq!(
            Framebuffer::new(0, 4),
            Err(FramebufferError::Empty {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn evaluate_visits_every_pixel_once() {
        let fb = Framebuffer::evaluate(7, 5, |x, y| {
            OutputColor::new(Vec3::new(x as f32, y as f32, 1.0))
        })
        .unwrap();
        for y in 0..5 {
            for x in 0..7 {
                let c = fb.get(x, y).unwrap();
                assert_eq!(c.rgb, Vec3::new(x as f32, y as f32, 1.0));
            }
        }
        assert!(fb.get(7, 0).is_none());
    }

    #[test]
    fn thread_count_does_not_change_output() {
        let uniforms = SceneUniforms::default();
        let render_with = |threads: usize| {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap();
            pool.install(|| render_fullscreen(&NdcShader, &uniforms, 16, 9).unwrap())
        };
        let single = render_with(1);
        assert_eq!(single, render_with(8));
        assert_eq!(single, render_with(64));
        assert_eq!(single, render_fullscreen(&NdcShader, &uniforms, 16, 9).unwrap());
    }

    #[test]
    fn fullscreen_ndc_spans_the_quad() {
        let uniforms = SceneUniforms::default();
        let fb = render_fullscreen(&NdcShader, &uniforms, 4, 4).unwrap();
        let top_left = fb.get(0, 0).unwrap().rgb;
        let bottom_right = fb.get(3, 3).unwrap().rgb;
        assert_eq!(top_left.x, -0.75);
        assert_eq!(top_left.y, 0.75);
        assert_eq!(bottom_right.x, 0.75);
        assert_eq!(bottom_right.y, -0.75);
    }

    #[test]
    fn rgba8_packing() {
        let fb = Framebuffer::evaluate(2, 1, |_, _| OutputColor::new(Vec3::ONE)).unwrap();
        assert_eq!(fb.to_rgba8(), vec![255; 8]);
    }
}
