#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Walker adapters.
//!
//! Drawing goes through the [`Canvas`] seam so that the same scene code runs
//! against a window backend or the headless [`PixelCanvas`]. Every world
//! coordinate is mapped through the frame's [`Viewport`].

mod background;
mod raster;

use anyhow::Result as AnyResult;
use glam::DVec2;
use maze_walker_core::{Color, Obstacle, Viewport};

pub use background::{Background, DEFAULT_FLOOR_EVEN, DEFAULT_FLOOR_ODD};
pub use raster::{PixelCanvas, RasterImage};

/// Radius of the ego marker in pixels, independent of zoom.
pub const EGO_RADIUS_PIXELS: f64 = 10.0;

/// Default fill color of the ego marker.
pub const DEFAULT_EGO_COLOR: Color = Color::from_rgb(0x00, 0xa8, 0x3e);

/// World-space width shown across the surface by default.
pub const DEFAULT_RANGE_X: f64 = 10.0;

/// Pixel surface that scene elements are drawn onto.
pub trait Canvas {
    /// Width and height of the surface in pixels.
    fn size(&self) -> (u32, u32);

    /// Replaces the surface contents with `image`, anchored at the top-left.
    fn put_image(&mut self, image: &RasterImage);

    /// Fills a polygon given in pixel coordinates.
    fn fill_polygon(&mut self, points: &[DVec2], color: Color);

    /// Fills a circle given in pixel coordinates.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color);
}

/// Camera that follows a focus point with a fixed horizontal range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-space width visible across the surface.
    pub range_x: f64,
    /// World-space point shown at the center of the surface.
    pub focus: DVec2,
}

impl Camera {
    /// Creates a camera centered on `focus`.
    #[must_use]
    pub const fn new(range_x: f64, focus: DVec2) -> Self {
        Self { range_x, focus }
    }

    /// Viewport for a surface of the provided size.
    ///
    /// The vertical range follows the surface aspect ratio so world units
    /// stay square on screen.
    #[must_use]
    pub fn viewport(&self, width: u32, height: u32) -> Viewport {
        let range_y = self.range_x * f64::from(height) / f64::from(width);
        Viewport::new(
            width,
            height,
            DVec2::new(self.range_x, range_y),
            self.focus,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_RANGE_X, DVec2::ZERO)
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Viewport the previous frame was drawn with.
    pub viewport: Viewport,
    /// Pixel position of a primary click registered on this frame.
    pub click: Option<DVec2>,
    /// Whether the player asked to stop the current walk.
    pub cancel: bool,
}

/// Scene description combining the maze, the ego and the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Walls and panels of the loaded maze.
    pub obstacles: Vec<Obstacle>,
    /// World-space position of the ego.
    pub ego: DVec2,
    /// Fill color of the ego marker.
    pub ego_color: Color,
    /// Camera used to frame the scene.
    pub camera: Camera,
    /// Number of panels collected so far.
    pub score: u32,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(obstacles: Vec<Obstacle>, ego: DVec2, ego_color: Color, camera: Camera) -> Self {
        Self {
            obstacles,
            ego,
            ego_color,
            camera,
            score: 0,
        }
    }

    /// Viewport that frames the scene on a surface of the provided size.
    #[must_use]
    pub fn viewport(&self, width: u32, height: u32) -> Viewport {
        self.camera.viewport(width, height)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Checkerboard painted behind the scene.
    pub background: Background,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, background: Background, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            background,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Walker scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the per-frame input
    /// captured by the adapter and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Counters describing a single rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Obstacles that were filled.
    pub drawn: usize,
    /// Obstacles skipped because they were off screen or inactive.
    pub culled: usize,
}

/// Draws an obstacle unless it is off screen or an already collected panel.
///
/// Returns whether anything was drawn.
pub fn render_obstacle<C>(canvas: &mut C, obstacle: &Obstacle, viewport: &Viewport) -> bool
where
    C: Canvas + ?Sized,
{
    if !obstacle.is_active() || obstacle.is_outside_view(viewport.range, viewport.offset) {
        return false;
    }
    let points: Vec<DVec2> = obstacle
        .polygon()
        .iter()
        .map(|vertex| viewport.to_pixels(*vertex))
        .collect();
    canvas.fill_polygon(&points, obstacle.color());
    true
}

/// Draws the ego marker at its world position.
pub fn render_entity<C>(canvas: &mut C, position: DVec2, color: Color, viewport: &Viewport)
where
    C: Canvas + ?Sized,
{
    canvas.fill_circle(viewport.to_pixels(position), EGO_RADIUS_PIXELS, color);
}

/// Draws the background, every obstacle, and finally the ego.
pub fn render_scene<C>(
    canvas: &mut C,
    background: &mut Background,
    scene: &Scene,
    viewport: &Viewport,
) -> FrameStats
where
    C: Canvas + ?Sized,
{
    background.render(canvas, viewport);

    let mut stats = FrameStats::default();
    for obstacle in &scene.obstacles {
        if render_obstacle(canvas, obstacle, viewport) {
            stats.drawn += 1;
        } else {
            stats.culled += 1;
        }
    }

    render_entity(canvas, scene.ego, scene.ego_color, viewport);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_walker_core::{BoundingBox, ObstacleKind};

    #[derive(Default)]
    struct RecordingCanvas {
        images: usize,
        polygons: Vec<(Vec<DVec2>, Color)>,
        circles: Vec<(DVec2, f64, Color)>,
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> (u32, u32) {
            (200, 100)
        }

        fn put_image(&mut self, _image: &RasterImage) {
            self.images += 1;
        }

        fn fill_polygon(&mut self, points: &[DVec2], color: Color) {
            self.polygons.push((points.to_vec(), color));
        }

        fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
            self.circles.push((center, radius, color));
        }
    }

    const WALL: Color = Color::from_rgb(0x10, 0x10, 0x10);

    fn wall(min: (f64, f64), max: (f64, f64)) -> Obstacle {
        Obstacle::rectangle(
            BoundingBox::new(DVec2::new(min.0, min.1), DVec2::new(max.0, max.1)),
            WALL,
            ObstacleKind::StaticWall,
        )
    }

    fn viewport() -> Viewport {
        Camera::new(10.0, DVec2::ZERO).viewport(200, 100)
    }

    #[test]
    fn camera_keeps_units_square() {
        let viewport = viewport();
        assert_eq!(viewport.range, DVec2::new(10.0, 5.0));
        assert_eq!(viewport.pixels_per_unit(), DVec2::new(20.0, 20.0));
        assert_eq!(viewport.offset, DVec2::ZERO);
    }

    #[test]
    fn obstacle_vertices_are_transformed_to_pixels() {
        let mut canvas = RecordingCanvas::default();
        let drawn = render_obstacle(&mut canvas, &wall((0.0, 0.0), (1.0, 0.5)), &viewport());

        assert!(drawn);
        assert_eq!(
            canvas.polygons,
            vec![(
                vec![
                    DVec2::new(100.0, 50.0),
                    DVec2::new(120.0, 50.0),
                    DVec2::new(120.0, 40.0),
                    DVec2::new(100.0, 40.0),
                ],
                WALL,
            )]
        );
    }

    #[test]
    fn off_screen_and_collected_obstacles_are_culled() {
        let mut canvas = RecordingCanvas::default();
        let viewport = viewport();

        let beyond = wall((6.0, 0.0), (7.0, 1.0));
        assert!(!render_obstacle(&mut canvas, &beyond, &viewport));
        // Touching the right edge still counts as visible.
        let touching = wall((5.0, 0.0), (6.0, 1.0));
        assert!(render_obstacle(&mut canvas, &touching, &viewport));

        let mut panel = Obstacle::rectangle(
            BoundingBox::new(DVec2::ZERO, DVec2::ONE),
            WALL,
            ObstacleKind::InteractivePanel { active: true },
        );
        assert!(panel.trigger());
        assert!(!render_obstacle(&mut canvas, &panel, &viewport));
        assert_eq!(canvas.polygons.len(), 1);
    }

    #[test]
    fn entity_radius_ignores_zoom() {
        let mut canvas = RecordingCanvas::default();
        let zoomed_out = Camera::new(100.0, DVec2::ZERO).viewport(200, 100);
        render_entity(&mut canvas, DVec2::ZERO, DEFAULT_EGO_COLOR, &viewport());
        render_entity(&mut canvas, DVec2::ZERO, DEFAULT_EGO_COLOR, &zoomed_out);

        assert_eq!(
            canvas.circles,
            vec![
                (DVec2::new(100.0, 50.0), EGO_RADIUS_PIXELS, DEFAULT_EGO_COLOR),
                (DVec2::new(100.0, 50.0), EGO_RADIUS_PIXELS, DEFAULT_EGO_COLOR),
            ]
        );
    }

    #[test]
    fn scene_draws_background_obstacles_then_ego() {
        let scene = Scene::new(
            vec![wall((-1.0, -1.0), (1.0, -0.5)), wall((40.0, 0.0), (41.0, 1.0))],
            DVec2::new(0.0, 1.0),
            DEFAULT_EGO_COLOR,
            Camera::default(),
        );
        let viewport = scene.viewport(200, 100);
        let mut canvas = PixelCanvas::new(200, 100);
        let mut background = Background::default();

        let stats = render_scene(&mut canvas, &mut background, &scene, &viewport);

        assert_eq!(stats, FrameStats { drawn: 1, culled: 1 });
        // Ego at (0, 1) lands on pixel (100, 30).
        assert_eq!(canvas.pixel(100, 30), Some(DEFAULT_EGO_COLOR));
        // Wall spans pixels x 80..120, y 60..70.
        assert_eq!(canvas.pixel(100, 65), Some(WALL));
        // Tile (2, 1) is odd.
        assert_eq!(canvas.pixel(150, 20), Some(DEFAULT_FLOOR_ODD));
    }
}
