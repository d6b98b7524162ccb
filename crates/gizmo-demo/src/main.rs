//! Renders one showcase frame of debug gizmos offscreen and writes it to a
//! PNG.
//!
//! Usage: `gizmo-demo [OUTPUT.png]` (default `gizmos.png`). Log level via
//! `RUST_LOG`.

mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result};

use gizmo_engine::device::{Gpu, GpuInit, OffscreenTarget};
use gizmo_engine::logging::{init_logging, LoggingConfig};
use gizmo_engine::{Color, DepthConfig, GizmoRenderer, GizmoRendererConfig, Gizmos, RenderCtx};

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;
const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
const BACKGROUND: Color = Color::new(0.08, 0.08, 0.1, 1.0);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("gizmos.png"));

    let gpu = Gpu::headless_blocking(GpuInit::default())?;
    let depth = DepthConfig {
        compare: wgpu::CompareFunction::LessEqual,
        ..DepthConfig::default()
    };
    let target = OffscreenTarget::new(&gpu, WIDTH, HEIGHT, COLOR_FORMAT, Some(depth.format))?;

    let ctx = RenderCtx::new(gpu.device(), gpu.queue(), target.format());
    let mut gizmos = Gizmos::default();
    let mut renderer = GizmoRenderer::new(&ctx, gizmos.capacity(), GizmoRendererConfig::with_depth(depth))?;

    gizmos.clear();
    scene::build(&mut gizmos, 0.6);
    let stats = gizmos.stats();
    log::info!(
        "frame: {} lines, {} opaque tris, {} alpha tris ({} dropped)",
        stats.lines,
        stats.opaque_tris,
        stats.alpha_tris,
        stats.dropped()
    );

    let (view, projection) = scene::camera(WIDTH as f32 / HEIGHT as f32);

    let mut encoder = gpu.create_encoder("gizmo-demo frame encoder");
    target.clear(&mut encoder, BACKGROUND);
    {
        let mut render_target = target.render_target(&mut encoder);
        renderer.draw(&ctx, &mut render_target, &gizmos, &view, &projection);
    }
    gpu.submit(encoder);

    let pixels = target.read_rgba8(&gpu)?;
    let image = image::RgbaImage::from_raw(WIDTH, HEIGHT, pixels)
        .context("read-back size does not match the target")?;
    image
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    log::info!("wrote {}", output.display());
    Ok(())
}
