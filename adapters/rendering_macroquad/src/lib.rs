#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Walker.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

mod canvas;

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use anyhow::Result;
use glam::DVec2;
use log::info;
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};
use maze_walker_rendering::{render_scene, FrameInput, Presentation, RenderingBackend, Scene};

use self::canvas::MacroquadCanvas;

const DEFAULT_WINDOW_WIDTH: i32 = 960;
const DEFAULT_WINDOW_HEIGHT: i32 = 480;
const SCORE_FONT_SIZE: f32 = 28.0;

/// Snapshot of edge-triggered keyboard and mouse input observed during a
/// single frame.
#[derive(Clone, Copy, Debug, Default)]
struct InputSnapshot {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Left click position in window pixels.
    click: Option<DVec2>,
    /// Right click or `Space` stops the current walk.
    cancel: bool,
}

impl InputSnapshot {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let click = is_mouse_button_pressed(MouseButton::Left).then(|| {
            let (x, y) = mouse_position();
            DVec2::new(f64::from(x), f64::from(y))
        });
        let cancel = is_mouse_button_pressed(MouseButton::Right) || is_key_pressed(KeyCode::Space);

        Self {
            quit_requested,
            click,
            cancel,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_size: (i32, i32),
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            window_size: (DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures the initial window size in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_size = (width.max(1), height.max(1));
        self
    }
}

/// Durations measured for a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    update: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    update_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_update: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.update_accum += breakdown.update;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            let Some(removed) = self.frame_times.pop_front() else {
                break;
            };
            self.window_duration = self.window_duration.saturating_sub(removed);
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_update: self.update_accum / self.frames,
            avg_render: self.render_accum / self.frames,
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.update_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_size,
        } = self;

        let Presentation {
            window_title,
            background,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.0,
            window_height: window_size.1,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut background = background;
            let mut canvas = MacroquadCanvas::default();
            let mut fps_counter = FpsCounter::default();
            let (width, height) = surface_size();
            let mut viewport = scene.viewport(width, height);

            loop {
                let input = InputSnapshot::poll();
                if input.quit_requested {
                    break;
                }

                let update_start = Instant::now();
                update_scene(
                    FrameInput {
                        viewport,
                        click: input.click,
                        cancel: input.cancel,
                    },
                    &mut scene,
                );
                let update_duration = update_start.elapsed();

                let render_start = Instant::now();
                let (width, height) = surface_size();
                viewport = scene.viewport(width, height);
                canvas.resize(width, height);
                let _ = render_scene(&mut canvas, &mut background, &scene, &viewport);
                let _ = macroquad::text::draw_text(
                    &format!("Score: {}", scene.score),
                    12.0,
                    SCORE_FONT_SIZE,
                    SCORE_FONT_SIZE,
                    macroquad::color::WHITE,
                );
                let render_duration = render_start.elapsed();

                let frame_dt = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    update: update_duration,
                    render: render_duration,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_update,
                        avg_render,
                    }) = fps_metrics
                    {
                        info!(
                            "FPS: {:.2} (10s avg: {:.2}) | update: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_update.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn surface_size() -> (u32, u32) {
    let width = macroquad::window::screen_width().max(1.0) as u32;
    let height = macroquad::window::screen_height().max(1.0) as u32;
    (width, height)
}

fn to_macroquad_color(color: maze_walker_core::Color) -> macroquad::color::Color {
    macroquad::color::Color::from_rgba(color.red(), color.green(), color.blue(), color.alpha())
}
