use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use blockshade_common::{DEFAULT_BACKGROUND_COLOR, DEFAULT_WATER_LINE, SceneUniforms};
use glam::{Mat4, Vec2, Vec3};

use crate::camera::FlyCamera;

/// Single writer of the scene uniforms.
///
/// Each [`advance`](Self::advance) builds a fresh snapshot and publishes it as an
/// `Arc`. Readers shading a frame hold their own `Arc` and never observe a
/// partially updated snapshot; the next frame replaces the pointer, not the data.
#[derive(Debug, Clone)]
pub struct FrameOrchestrator {
    frame: u64,
    elapsed: f32,
    background_color: Vec3,
    water_line: f32,
    model: Mat4,
    resolution: Vec2,
    current: Arc<SceneUniforms>,
}

impl FrameOrchestrator {
    pub fn new(width: u32, height: u32) -> Self {
        let resolution = Vec2::new(width as f32, height as f32);
        Self {
            frame: 0,
            elapsed: 0.0,
            background_color: DEFAULT_BACKGROUND_COLOR,
            water_line: DEFAULT_WATER_LINE,
            model: Mat4::IDENTITY,
            resolution,
            current: Arc::new(SceneUniforms {
                resolution,
                ..SceneUniforms::default()
            }),
        }
    }

    pub fn with_background(mut self, color: Vec3) -> Self {
        self.background_color = color;
        self
    }

    /// Height below which terrain takes the underwater tint.
    pub fn with_water_line(mut self, water_line: f32) -> Self {
        self.water_line = water_line;
        self
    }

    /// Model matrix for the next published snapshots.
    pub fn set_model(&mut self, model: Mat4) {
        self.model = model;
    }

    /// Frames published so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds accumulated across all published frames.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Arc<SceneUniforms> {
        Arc::clone(&self.current)
    }

    /// Change the viewport and keep the camera's aspect in step.
    pub fn resize(&mut self, width: u32, height: u32, camera: &mut FlyCamera) {
        self.resolution = Vec2::new(width as f32, height as f32);
        camera.set_viewport(width, height);
        tracing::debug!(width, height, "viewport resized");
    }

    /// Advance time by `dt` seconds and publish the next snapshot.
    pub fn advance(&mut self, dt: f32, camera: &FlyCamera) -> Arc<SceneUniforms> {
        let _span = tracing::info_span!("frame_advance", frame = self.frame + 1).entered();

        self.frame += 1;
        self.elapsed += dt.max(0.0);

        let proj = camera.projection_matrix();
        let view = camera.view_matrix();
        let uniforms = SceneUniforms {
            model: self.model,
            background_color: self.background_color,
            water_line: self.water_line,
            time: self.elapsed,
            resolution: self.resolution,
            ..SceneUniforms::from_camera(proj, view, camera.position)
        };
        self.current = Arc::new(uniforms);

        tracing::trace!(time = self.elapsed, "uniforms published");
        self.snapshot()
    }
}

/// Rolling window of recent frame durations.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: VecDeque<Duration>,
    capacity: usize,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record one frame, evicting the oldest once the window is full.
    pub fn record(&mut self, dt: Duration) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(dt);
    }

    /// Samples currently held.
    pub fn count(&self) -> usize {
        self.samples.len()
    }

    /// Most recent sample, if any.
    pub fn last(&self) -> Option<Duration> {
        self.samples.back().copied()
    }

    /// Mean of the held samples, zero when empty.
    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    /// Slowest held sample, zero when empty.
    pub fn max(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    /// Fastest held sample, zero when empty.
    pub fn min(&self) -> Duration {
        self.samples.iter().copied().min().unwrap_or(Duration::ZERO)
    }
}
