//! Photogrid demo - entry point.
//!
//! Loads a photo manifest, drives the layout engine through a scripted
//! scroll session, and prints what a renderer would mount each frame.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use photogrid::engine::{MasonryEngine, Viewport};
use photogrid::layout::ScrollMetrics;
use photogrid::model::PhotoManifest;

/// Masonry layout engine demo driver
#[derive(Parser, Debug)]
#[command(name = "photogrid")]
#[command(version)]
#[command(about = "Simulates an infinite-scroll masonry grid over a photo manifest")]
pub struct Args {
    /// Path to the JSON photo manifest
    pub manifest: PathBuf,

    /// Viewport width in pixels
    #[arg(long, default_value = "1280", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "800", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Photos per simulated page fetch
    #[arg(long, default_value = "40", value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: u32,

    /// Number of scroll frames to simulate
    #[arg(long, default_value = "60")]
    pub frames: u32,

    /// Scroll distance per frame in pixels
    #[arg(long, default_value = "400")]
    pub scroll_step: u32,

    /// Override the target column width
    #[arg(long)]
    pub column_width: Option<usize>,

    /// Override the maximum column count
    #[arg(long)]
    pub max_columns: Option<usize>,

    /// Path to log file for tracing output
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults -> config file -> CLI args.
    let config = {
        let config_file = photogrid::config::load_config_with_precedence(args.config.clone())?;
        let merged = photogrid::config::merge_config(config_file);
        photogrid::config::apply_cli_overrides(
            merged,
            args.column_width,
            args.max_columns,
            args.log_file.clone(),
        )
    };
    config.grid.validate()?;

    photogrid::logging::init(&config.log_file_path)?;
    info!(config = ?config, "configuration loaded and resolved");

    let manifest = PhotoManifest::load(&args.manifest)?;
    info!(photos = manifest.len(), path = %args.manifest.display(), "manifest loaded");

    let per_page = args.per_page as usize;
    let mut engine = MasonryEngine::new(config.grid);
    engine.set_viewport(Viewport::new(args.width as usize, args.height as usize));
    engine.set_total_height_callback(|height| info!(height, "scroll area resized"));

    // First page, as if fetched on initial render.
    engine.append_photos(manifest.page(0, per_page).iter().copied());
    let mut next_page = 1;

    println!(
        "{} photos, {} columns of {}px",
        manifest.len(),
        engine.column_count(),
        engine.column_width()
    );

    for frame in 0..args.frames {
        let scroll_top = frame as usize * args.scroll_step as usize;
        let total = engine.total_height();
        engine.on_scroll(ScrollMetrics {
            scroll_top: scroll_top.min(total),
            scroll_height: total,
            client_height: args.height as usize,
        });

        // Page fetches resolve instantly here, so loading is never
        // observed true across a frame.
        if let Some(update) = engine.on_frame(false) {
            if update.load_more && next_page < manifest.page_count(per_page) {
                engine.append_photos(manifest.page(next_page, per_page).iter().copied());
                next_page += 1;
            }
        }

        let window = engine.window();
        let mounted: usize = window.iter().map(|c| c.len()).sum();
        let visible = window.iter().flatten().filter(|m| m.visible).count();
        println!(
            "frame {frame:>3}  scroll {:>6}  mounted {mounted:>3}  visible {visible:>3}  total {}",
            engine.scroll_top(),
            engine.total_height()
        );
    }

    Ok(())
}
