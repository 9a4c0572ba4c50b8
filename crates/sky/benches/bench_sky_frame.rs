use std::hint::black_box;
use std::time::Instant;

use blockshade_render::{FlyCamera, FrameOrchestrator, render_fullscreen};
use blockshade_sky::{SkyComposer, SkyConfig};

fn bench_frame(label: &str, config: SkyConfig, width: u32, height: u32, threads: usize, frames: u32) {
    let sky = SkyComposer::new(config).expect("preset config is valid");
    let camera = FlyCamera::looking(glam::Vec3::new(0.0, 30.0, 0.0), -90.0, 25.0);
    let mut orchestrator = FrameOrchestrator::new(width, height);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("thread pool");

    let start = Instant::now();
    for _ in 0..frames {
        let uniforms = orchestrator.advance(1.0 / 60.0, &camera);
        let fb = pool
            .install(|| render_fullscreen(black_box(&sky), &uniforms, width, height))
            .expect("non-empty target");
        black_box(fb);
    }
    let elapsed = start.elapsed();
    let per_frame = elapsed / frames;
    println!(
        "  {label} ({width}x{height}, {threads} threads, {frames} frames): {per_frame:?}/frame, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Sky Frame Benchmarks ===\n");

    let threads = rayon::current_num_threads();

    println!("Single thread:");
    bench_frame("blocky", SkyConfig::blocky(), 320, 180, 1, 20);
    bench_frame("soft", SkyConfig::soft(), 320, 180, 1, 20);

    println!("\nAll cores:");
    bench_frame("blocky", SkyConfig::blocky(), 320, 180, threads, 20);
    bench_frame("blocky", SkyConfig::blocky(), 1280, 720, threads, 5);

    println!("\n=== Done ===");
}
