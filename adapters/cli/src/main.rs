#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Walker experience.

mod config;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use maze_walker_rendering::{
    render_scene, Background, Canvas, PixelCanvas, Presentation, RenderingBackend,
};
use maze_walker_rendering_macroquad::MacroquadBackend;
use maze_walker_system_maze_generation::Maze;
use maze_walker_world::query;

use crate::{
    config::WalkerConfig,
    session::{MazeColors, Session},
};

const WINDOW_TITLE: &str = "Maze Walker";

/// Command-line arguments; every flag overrides the configuration file.
#[derive(Debug, Parser)]
#[command(name = "maze-walker", about = "Walk a randomly generated maze")]
struct CliArgs {
    /// TOML configuration file to load before applying flags.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of tiles along the horizontal axis.
    #[arg(long)]
    tiles_x: Option<u32>,
    /// Number of tiles along the vertical axis.
    #[arg(long)]
    tiles_y: Option<u32>,
    /// Seed for a reproducible maze.
    #[arg(long)]
    seed: Option<u64>,
    /// World-space width visible across the window.
    #[arg(long, value_name = "UNITS")]
    range: Option<f64>,
    /// Generate the maze without collectible panels.
    #[arg(long)]
    no_panels: bool,
    /// Repaint the checkerboard every frame instead of caching it.
    #[arg(long)]
    no_background_cache: bool,
    /// Window width in pixels; also sizes the headless frame.
    #[arg(long, value_name = "PIXELS")]
    window_width: Option<u32>,
    /// Window height in pixels; also sizes the headless frame.
    #[arg(long, value_name = "PIXELS")]
    window_height: Option<u32>,
    /// Render as fast as possible.
    #[arg(long)]
    no_vsync: bool,
    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,
    /// Render a single headless frame and exit.
    #[arg(long)]
    dry_run: bool,
}

impl CliArgs {
    fn resolve_config(&self) -> Result<WalkerConfig> {
        let mut config = match &self.config {
            Some(path) => WalkerConfig::load(path)?,
            None => WalkerConfig::default(),
        };

        if let Some(tiles_x) = self.tiles_x {
            config.maze.tiles_x = tiles_x;
        }
        if let Some(tiles_y) = self.tiles_y {
            config.maze.tiles_y = tiles_y;
        }
        if self.seed.is_some() {
            config.maze.seed = self.seed;
        }
        if let Some(range) = self.range {
            config.camera.range_x = range;
        }
        if let Some(width) = self.window_width {
            config.window.width = width;
        }
        if let Some(height) = self.window_height {
            config.window.height = height;
        }
        config.maze.panels &= !self.no_panels;
        config.window.background_cache &= !self.no_background_cache;
        config.window.vsync &= !self.no_vsync;
        config.window.show_fps |= self.show_fps;

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

/// Entry point for the Maze Walker command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let config = args.resolve_config()?;

    let maze = match config.maze.seed {
        Some(seed) => Maze::from_seed(config.maze.tiles_x, config.maze.tiles_y, seed),
        None => Maze::generate(config.maze.tiles_x, config.maze.tiles_y),
    };
    let palette = &config.palette;
    let mut session = Session::new(
        &maze,
        MazeColors {
            wall: palette.wall,
            panel: palette.panel,
        },
        config.maze.panels,
    );
    info!("{}", query::welcome_banner(session.world()));

    let scene = session.scene(palette.ego, config.camera.range_x);
    let background = Background::new(palette.floor_even, palette.floor_odd)
        .with_caching(config.window.background_cache);

    if args.dry_run {
        let mut canvas = PixelCanvas::new(config.window.width, config.window.height);
        let (width, height) = canvas.size();
        let viewport = scene.viewport(width, height);
        let mut background = background;
        let stats = render_scene(&mut canvas, &mut background, &scene, &viewport);
        info!(
            "{}x{} maze in a {width}x{height} frame: {} obstacles drawn, {} culled, \
             {} panels to collect",
            config.maze.tiles_x,
            config.maze.tiles_y,
            stats.drawn,
            stats.culled,
            query::collectible_panels(session.world()).len(),
        );
        return Ok(());
    }

    let backend = MacroquadBackend::new()
        .with_window_size(
            i32::try_from(config.window.width).unwrap_or(i32::MAX),
            i32::try_from(config.window.height).unwrap_or(i32::MAX),
        )
        .with_vsync(config.window.vsync)
        .with_show_fps(config.window.show_fps);
    backend.run(
        Presentation::new(WINDOW_TITLE, background, scene),
        move |input, scene| session.update(input, scene),
    )
}
