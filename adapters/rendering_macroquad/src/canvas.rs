//! [`Canvas`] implementation that draws straight onto the macroquad window.

use glam::DVec2;
use macroquad::{
    color::WHITE,
    math::Vec2 as MacroquadVec2,
    texture::{self, FilterMode, Image, Texture2D},
};
use maze_walker_core::Color;
use maze_walker_rendering::{Canvas, RasterImage};

use crate::to_macroquad_color;

/// Window surface of the current frame.
///
/// Raster images are uploaded into a single reusable texture that is
/// recreated whenever the window size changes.
#[derive(Debug, Default)]
pub(crate) struct MacroquadCanvas {
    width: u32,
    height: u32,
    texture: Option<(Texture2D, u16, u16)>,
}

impl MacroquadCanvas {
    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn upload(&mut self, image: &RasterImage) -> Option<Texture2D> {
        let width = u16::try_from(image.width()).ok()?;
        let height = u16::try_from(image.height()).ok()?;

        match self.texture {
            Some((texture, cached_width, cached_height))
                if cached_width == width && cached_height == height =>
            {
                texture.update(&Image {
                    bytes: image.as_bytes().to_vec(),
                    width,
                    height,
                });
                Some(texture)
            }
            _ => {
                if let Some((stale, _, _)) = self.texture.take() {
                    stale.delete();
                }
                let texture = Texture2D::from_rgba8(width, height, image.as_bytes());
                texture.set_filter(FilterMode::Nearest);
                self.texture = Some((texture, width, height));
                Some(texture)
            }
        }
    }
}

impl Canvas for MacroquadCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn put_image(&mut self, image: &RasterImage) {
        if let Some(texture) = self.upload(image) {
            texture::draw_texture(texture, 0.0, 0.0, WHITE);
        }
    }

    fn fill_polygon(&mut self, points: &[DVec2], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let color = to_macroquad_color(color);
        let anchor = to_screen(*first);
        // Fan triangulation; maze polygons are convex.
        for pair in rest.windows(2) {
            macroquad::shapes::draw_triangle(anchor, to_screen(pair[0]), to_screen(pair[1]), color);
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        macroquad::shapes::draw_circle(
            center.x as f32,
            center.y as f32,
            radius as f32,
            to_macroquad_color(color),
        );
    }
}

fn to_screen(point: DVec2) -> MacroquadVec2 {
    MacroquadVec2::new(point.x as f32, point.y as f32)
}
