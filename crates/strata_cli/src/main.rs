//! Strata command line renderer.
//!
//! Builds a scene from a JSON config (or the built-in orbit scene), moves the
//! camera along the configured path and writes one numbered image per frame.

mod camera_path;
mod cli;
mod config;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use strata_renderer::{render, save, Camera, ImageFormat, RenderConfig};

use crate::cli::{Args, Format};
use crate::config::Config;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let config = load_config(&args)?;
    let format = ImageFormat::from_extension(&config.output.format)
        .with_context(|| format!("Invalid output format {:?}", config.output.format))?;

    let scene = config.build_scene();
    let render_config = RenderConfig {
        max_depth: config.camera.max_depth,
    };
    let mut camera = Camera::new()
        .with_resolution(config.camera.width, config.camera.height)
        .with_fov(config.camera.fov_degrees.to_radians());
    let target = config.target();

    let directory = &config.output.directory;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create output directory {}", directory.display()))?;

    log::info!(
        "Rendering {} frames at {}x{} into {}",
        config.frames,
        camera.width,
        camera.height,
        directory.display()
    );

    let start = Instant::now();
    for index in 0..config.frames {
        camera.position = config.path.position(index, config.frames, target);
        camera.look_at(target);

        let frame = render(&camera, &scene, &render_config);
        let path = frame_path(directory, index, format);
        save(&frame, &path).with_context(|| format!("Failed to save {}", path.display()))?;

        log::info!("Frame {}/{} -> {}", index + 1, config.frames, path.display());
    }

    log::info!("Rendered {} frames in {:?}", config.frames, start.elapsed());
    Ok(())
}

/// Read the config file (if any) and apply command line overrides.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => {
            log::info!("No config given; using the built-in orbit scene");
            Config::default()
        }
    };

    if let Some(dir) = &args.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(frames) = args.frames {
        config.frames = frames;
    }
    if let Some(format) = args.format {
        config.output.format = match format {
            Format::Ppm => ImageFormat::Ppm,
            Format::Png => ImageFormat::Png,
        }
        .extension()
        .to_string();
    }
    if let Some(width) = args.width {
        config.camera.width = width;
    }
    if let Some(height) = args.height {
        config.camera.height = height;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// `<directory>/frame0042.<ext>`
fn frame_path(directory: &std::path::Path, index: u32, format: ImageFormat) -> PathBuf {
    directory.join(format!("frame{:04}.{}", index, format.extension()))
}
