//! Software RGBA raster used for the background cache and headless frames.

use glam::DVec2;
use maze_walker_core::Color;

use crate::Canvas;

const CHANNELS: usize = 4;

/// Owned RGBA8 image stored row-major from the top-left pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Creates a fully transparent image.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Reads a pixel, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let index = self.index(x, y)?;
        let rgba = self.pixels.get(index..index + CHANNELS)?;
        Some(Color::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3]))
    }

    /// Overwrites every pixel of the half-open rectangle `[x0, x1) x [y0, y1)`,
    /// clipped to the image.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Color) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let rgba = color.to_rgba();
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(index) = self.index(x, y) {
                    self.pixels[index..index + CHANNELS].copy_from_slice(&rgba);
                }
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    fn blend(&mut self, x: i64, y: i64, color: Color) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        let Some(index) = self.index(x, y) else {
            return;
        };

        let alpha = u16::from(color.alpha());
        let source = color.to_rgba();
        let target = &mut self.pixels[index..index + CHANNELS];
        for channel in 0..3 {
            target[channel] = blend_channel(source[channel], target[channel], alpha);
        }
        target[3] = (alpha + (u16::from(target[3]) * (255 - alpha) + 127) / 255) as u8;
    }
}

fn blend_channel(source: u8, target: u8, alpha: u16) -> u8 {
    let mixed = u16::from(source) * alpha + u16::from(target) * (255 - alpha);
    ((mixed + 127) / 255) as u8
}

/// Headless [`Canvas`] backed by a [`RasterImage`].
///
/// Polygons and circles are filled by sampling pixel centers and composited
/// with source-over blending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelCanvas {
    image: RasterImage,
}

impl PixelCanvas {
    /// Creates a transparent canvas.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RasterImage::new(width, height),
        }
    }

    /// Reads a pixel, or `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.pixel(x, y)
    }

    fn blend_span(&mut self, y: i64, first: i64, end: i64, color: Color) {
        let first = first.max(0);
        let end = end.min(i64::from(self.image.width));
        for x in first..end {
            self.image.blend(x, y, color);
        }
    }
}

impl Canvas for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        (self.image.width, self.image.height)
    }

    fn put_image(&mut self, image: &RasterImage) {
        let width = image.width.min(self.image.width) as usize;
        let height = image.height.min(self.image.height);
        for y in 0..height {
            let (Some(source), Some(target)) = (image.index(0, y), self.image.index(0, y)) else {
                continue;
            };
            let bytes = width * CHANNELS;
            self.image.pixels[target..target + bytes]
                .copy_from_slice(&image.pixels[source..source + bytes]);
        }
    }

    fn fill_polygon(&mut self, points: &[DVec2], color: Color) {
        if points.len() < 3 {
            return;
        }

        let (min_y, max_y) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), point| {
                (low.min(point.y), high.max(point.y))
            });
        let first_row = (min_y - 0.5).ceil().max(0.0) as i64;
        let last_row = ((max_y - 0.5).ceil() as i64).min(i64::from(self.image.height));

        let mut crossings = Vec::with_capacity(points.len());
        for y in first_row..last_row {
            crossings.clear();
            let sample = y as f64 + 0.5;
            for (index, start) in points.iter().enumerate() {
                let end = points[(index + 1) % points.len()];
                if (start.y <= sample && end.y > sample) || (end.y <= sample && start.y > sample) {
                    let t = (sample - start.y) / (end.y - start.y);
                    crossings.push(start.x + t * (end.x - start.x));
                }
            }
            crossings.sort_by(f64::total_cmp);
            // Pixel x is covered when its center x + 0.5 lies in [left, right).
            for pair in crossings.chunks_exact(2) {
                let first = (pair[0] - 0.5).ceil() as i64;
                let end = (pair[1] - 0.5).ceil() as i64;
                self.blend_span(y, first, end, color);
            }
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let first_row = (center.y - radius - 0.5).ceil().max(0.0) as i64;
        let last_row = ((center.y + radius - 0.5).floor() as i64)
            .min(i64::from(self.image.height) - 1);

        for y in first_row..=last_row {
            let dy = y as f64 + 0.5 - center.y;
            let reach = radius * radius - dy * dy;
            if reach < 0.0 {
                continue;
            }
            let half = reach.sqrt();
            let first = (center.x - half - 0.5).ceil() as i64;
            let last = (center.x + half - 0.5).floor() as i64;
            self.blend_span(y, first, last + 1, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::from_rgb(0xff, 0, 0);

    #[test]
    fn polygon_fill_covers_pixel_centers_inside() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.fill_polygon(
            &[
                DVec2::new(2.0, 2.0),
                DVec2::new(6.0, 2.0),
                DVec2::new(6.0, 5.0),
                DVec2::new(2.0, 5.0),
            ],
            RED,
        );

        let filled: usize = (0..10)
            .flat_map(|y| (0..10).map(move |x| (x, y)))
            .filter(|(x, y)| canvas.pixel(*x, *y) == Some(RED))
            .count();
        assert_eq!(filled, 12);
        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(5, 4), Some(RED));
        assert_eq!(canvas.pixel(6, 4), Some(Color::from_rgba(0, 0, 0, 0)));
    }

    #[test]
    fn polygon_fill_clips_to_canvas() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_polygon(
            &[
                DVec2::new(-10.0, -10.0),
                DVec2::new(10.0, -10.0),
                DVec2::new(10.0, 10.0),
                DVec2::new(-10.0, 10.0),
            ],
            RED,
        );
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(canvas.pixel(x, y), Some(RED));
            }
        }
    }

    #[test]
    fn translucent_fill_blends_over_existing_pixels() {
        let mut canvas = PixelCanvas::new(1, 1);
        let mut base = RasterImage::new(1, 1);
        base.fill_rect(0, 0, 1, 1, Color::from_rgb(0, 0, 0xff));
        canvas.put_image(&base);

        let translucent = Color::from_rgba(0xff, 0, 0, 0x80);
        canvas.fill_circle(DVec2::new(0.5, 0.5), 2.0, translucent);
        let pixel = canvas.pixel(0, 0).expect("pixel inside canvas");
        assert_eq!(pixel.red(), 0x80);
        assert_eq!(pixel.blue(), 0x7f);
        assert_eq!(pixel.alpha(), 0xff);
    }

    #[test]
    fn circle_fill_is_symmetric() {
        let mut canvas = PixelCanvas::new(40, 40);
        canvas.fill_circle(DVec2::new(20.0, 20.0), 10.0, RED);

        assert_eq!(canvas.pixel(20, 20), Some(RED));
        assert_eq!(canvas.pixel(10, 20), Some(RED));
        assert_eq!(canvas.pixel(29, 20), Some(RED));
        assert_eq!(canvas.pixel(9, 20), Some(Color::from_rgba(0, 0, 0, 0)));
        assert_eq!(canvas.pixel(30, 20), Some(Color::from_rgba(0, 0, 0, 0)));
        for y in 0..40 {
            for x in 0..20 {
                assert_eq!(canvas.pixel(x, y), canvas.pixel(39 - x, y));
                assert_eq!(canvas.pixel(y, x), canvas.pixel(y, 39 - x));
            }
        }
    }
}
