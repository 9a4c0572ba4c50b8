mod config;
mod scene;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use blockshade_common::{DEFAULT_BACKGROUND_COLOR, DEFAULT_WATER_LINE, FragmentInput, SceneUniforms, SceneUniformsGpu, TerrainVertex};
use blockshade_render::{FlyCamera, FragmentShader, FrameOrchestrator, FrameTimer, Framebuffer, render_fullscreen};
use blockshade_sky::{SkyComposer, SkyConfig};
use blockshade_terrain::{TerrainConfig, TerrainShader, is_underwater};
use clap::{Args, Parser, Subcommand};
use glam::Vec3;
use tracing_subscriber::EnvFilter;

use crate::config::PipelineConfig;

const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "blockshade-cli", about = "Render and probe the blockshade shading pipeline")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Pipeline config file (YAML, or JSON by extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Replace the sky section with a named preset
    #[arg(long, global = true)]
    sky_preset: Option<String>,

    /// Replace the terrain section with a named preset
    #[arg(long, global = true)]
    terrain_preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct View {
    #[arg(long, default_value = "320")]
    width: u32,
    #[arg(long, default_value = "180")]
    height: u32,
    /// Seconds of elapsed time before the first frame
    #[arg(long, default_value = "0")]
    time: f32,
    /// Camera yaw in degrees (-90 looks down -Z)
    #[arg(long, default_value = "-90", allow_negative_numbers = true)]
    yaw: f32,
    /// Camera pitch in degrees
    #[arg(long, default_value = "15", allow_negative_numbers = true)]
    pitch: f32,
    /// Camera height above the origin
    #[arg(long, default_value = "30")]
    eye_height: f32,
    /// Frames to render; the last one is written
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,
    /// Worker threads, 0 for rayon's default of one per core
    #[arg(long, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the active configuration
    Info,
    /// List sky and terrain presets
    Presets,
    /// Render the sky alone to a PNG
    Sky {
        #[command(flatten)]
        view: View,
        #[arg(short, long, default_value = "sky.png")]
        out: PathBuf,
    },
    /// Render the demo terrain over the sky to a PNG
    Scene {
        #[command(flatten)]
        view: View,
        #[arg(long, default_value_t = DEFAULT_WATER_LINE)]
        water_line: f32,
        /// Fog and background color as `r,g,b` in [0, 1]
        #[arg(long, value_delimiter = ',', num_args = 3)]
        background: Option<Vec<f32>>,
        #[arg(short, long, default_value = "scene.png")]
        out: PathBuf,
    },
    /// Shade one terrain fragment and print the result
    Probe {
        /// Baked shading scalar (0.4 darkest .. 1.0 brightest)
        #[arg(long, default_value = "1.0")]
        shading: f32,
        /// World-space height of the fragment
        #[arg(long, default_value = "64", allow_negative_numbers = true)]
        y: f32,
        /// Fog pseudo-distance
        #[arg(long, default_value = "0")]
        depth: f32,
        /// Atlas layer (0 grass, 1 sand, 2 stone)
        #[arg(long, default_value = "0")]
        layer: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = PipelineConfig::resolve(
        cli.config.as_deref(),
        cli.sky_preset.as_deref(),
        cli.terrain_preset.as_deref(),
    )?;

    match cli.command {
        Commands::Info => {
            println!("blockshade-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", blockshade_common::crate_info());
            println!("noise: {}", blockshade_noise::crate_info());
            println!("render: {}", blockshade_render::crate_info());
            println!("sky: {}", blockshade_sky::crate_info());
            println!("terrain: {}", blockshade_terrain::crate_info());
            println!(
                "layouts: terrain vertex {} B, uniform block {} B",
                std::mem::size_of::<TerrainVertex>(),
                std::mem::size_of::<SceneUniformsGpu>()
            );
            println!(
                "sky: cell={} gate={} wind={}/s",
                config.sky.cloud_cell_size, config.sky.cloud_gate, config.sky.wind_speed
            );
            println!(
                "terrain: fog={:?} gamma={} remap={:?} underwater={:?} saturation={}",
                config.terrain.fog,
                config.terrain.gamma_corrected,
                config.terrain.light_remap,
                config.terrain.underwater,
                config.terrain.saturation
            );
        }
        Commands::Presets => {
            for name in SkyConfig::PRESETS {
                if let Some(preset) = SkyConfig::preset(name) {
                    println!("--- sky: {name}\n{}", serde_yaml::to_string(&preset)?);
                }
            }
            for name in TerrainConfig::PRESETS {
                if let Some(preset) = TerrainConfig::preset(name) {
                    println!("--- terrain: {name}\n{}", serde_yaml::to_string(&preset)?);
                }
            }
        }
        Commands::Sky { view, out } => {
            let sky = SkyComposer::new(config.sky)?;
            let fb = run_frames(&view, DEFAULT_WATER_LINE, DEFAULT_BACKGROUND_COLOR, |uniforms| {
                render_fullscreen(&sky, uniforms, view.width, view.height)
            })?;
            write_png(&fb, &out)?;
        }
        Commands::Scene {
            view,
            water_line,
            background,
            out,
        } => {
            let background = match background.as_deref() {
                Some(&[r, g, b]) => Vec3::new(r, g, b),
                Some(other) => anyhow::bail!("--background takes three components, got {}", other.len()),
                None => DEFAULT_BACKGROUND_COLOR,
            };
            let sky = SkyComposer::new(config.sky)?;
            let atlas = scene::checker_atlas()?;
            let terrain = TerrainShader::new(config.terrain, atlas)?;
            let fb = run_frames(&view, water_line, background, |uniforms| {
                scene::render(&sky, &terrain, uniforms, view.width, view.height)
            })?;
            write_png(&fb, &out)?;
        }
        Commands::Probe { shading, y, depth, layer } => {
            let terrain = TerrainShader::new(config.terrain, scene::checker_atlas()?)?;
            let uniforms = SceneUniforms::default();
            let input = FragmentInput {
                texcoord: Vec3::new(0.1, 0.1, layer),
                shading,
                world_position: Vec3::new(0.0, y, 0.0),
                clip_depth_over_w: depth,
            };
            let color = terrain.shade(&input, &uniforms);
            println!("light factor: {:.4}", terrain.light_factor(shading));
            println!("underwater: {}", is_underwater(y, uniforms.water_line));
            println!("fog factor: {:.4}", config.terrain.fog.factor(depth));
            println!("rgb: {:.4} {:.4} {:.4}", color.rgb.x, color.rgb.y, color.rgb.z);
            println!("rgba8: {:?}", color.to_rgba8());
        }
    }

    Ok(())
}

/// Drive the orchestrator for `view.frames` frames, timing each draw, and
/// return the last framebuffer.
fn run_frames<F>(view: &View, water_line: f32, background: Vec3, mut draw: F) -> anyhow::Result<Framebuffer>
where
    F: FnMut(&SceneUniforms) -> Result<Framebuffer, blockshade_render::FramebufferError>,
{
    if view.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(view.threads)
            .build_global()
            .context("configure worker threads")?;
    }
    let threads = rayon::current_num_threads();
    let mut camera = FlyCamera::looking(Vec3::new(0.0, view.eye_height, 0.0), view.yaw, view.pitch);
    let mut orchestrator = FrameOrchestrator::new(view.width, view.height)
        .with_water_line(water_line)
        .with_background(background);
    orchestrator.resize(view.width, view.height, &mut camera);

    let mut timer = FrameTimer::new(120);
    let mut last = None;
    for frame in 0..view.frames {
        let dt = if frame == 0 { view.time } else { FRAME_DT };
        let uniforms = orchestrator.advance(dt, &camera);
        let start = Instant::now();
        last = Some(draw(&uniforms)?);
        timer.record(start.elapsed());
    }

    tracing::info!(
        frames = timer.count(),
        threads,
        avg_ms = timer.average().as_secs_f64() * 1000.0,
        min_ms = timer.min().as_secs_f64() * 1000.0,
        max_ms = timer.max().as_secs_f64() * 1000.0,
        "rendered"
    );
    last.context("no frames rendered")
}

fn write_png(fb: &Framebuffer, path: &Path) -> anyhow::Result<()> {
    let img = image::RgbaImage::from_raw(fb.width(), fb.height(), fb.to_rgba8())
        .context("framebuffer size does not match its pixel data")?;
    img.save(path)
        .with_context(|| format!("write image: {}", path.display()))?;
    println!("Saved {}x{} to {}", fb.width(), fb.height(), path.display());
    Ok(())
}
