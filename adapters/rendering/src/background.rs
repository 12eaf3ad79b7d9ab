//! Infinite checkerboard of unit tiles drawn behind the maze.

use maze_walker_core::{Color, DVec2, Viewport};

use crate::{Canvas, RasterImage};

/// Floor color of tiles whose coordinate sum is even.
pub const DEFAULT_FLOOR_EVEN: Color = Color::from_rgb(0x00, 0x69, 0xbe);

/// Floor color of tiles whose coordinate sum is odd.
pub const DEFAULT_FLOOR_ODD: Color = Color::from_rgb(0x00, 0x3f, 0x72);

/// Checkerboard painter with an optional raster cache.
///
/// Tiles are assigned in world space per pixel center, so panning never
/// makes tiles shimmer. The cached raster is reused while the viewport it was
/// drawn for is unchanged.
#[derive(Clone, Debug)]
pub struct Background {
    even: Color,
    odd: Color,
    caching: bool,
    cache: Option<CachedRaster>,
}

#[derive(Clone, Debug)]
struct CachedRaster {
    viewport: Viewport,
    image: RasterImage,
}

impl Background {
    /// Creates a caching background with the provided tile colors.
    #[must_use]
    pub const fn new(even: Color, odd: Color) -> Self {
        Self {
            even,
            odd,
            caching: true,
            cache: None,
        }
    }

    /// Creates a background that rasterizes every frame.
    #[must_use]
    pub const fn without_cache(even: Color, odd: Color) -> Self {
        Self {
            even,
            odd,
            caching: false,
            cache: None,
        }
    }

    /// Enables or disables the raster cache, dropping any cached frame.
    #[must_use]
    pub fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self.cache = None;
        self
    }

    /// Paints the checkerboard covering the whole viewport onto `canvas`.
    pub fn render<C>(&mut self, canvas: &mut C, viewport: &Viewport)
    where
        C: Canvas + ?Sized,
    {
        if !self.caching {
            canvas.put_image(&self.rasterize(viewport));
            return;
        }

        match &self.cache {
            Some(cached) if cached.viewport == *viewport => canvas.put_image(&cached.image),
            _ => {
                let image = self.rasterize(viewport);
                canvas.put_image(&image);
                self.cache = Some(CachedRaster {
                    viewport: *viewport,
                    image,
                });
            }
        }
    }

    /// Rasterizes the checkerboard for the provided viewport.
    ///
    /// Every pixel column and row takes the tile under its center, so the
    /// cost depends on the surface size and never on the visible range.
    #[must_use]
    pub fn rasterize(&self, viewport: &Viewport) -> RasterImage {
        let mut image = RasterImage::new(viewport.width, viewport.height);
        let columns: Vec<i64> = (0..viewport.width)
            .map(|x| tile_index(viewport.to_world(DVec2::new(pixel_center(x), 0.0)).x))
            .collect();

        for y in 0..viewport.height {
            let row = tile_index(viewport.to_world(DVec2::new(0.0, pixel_center(y))).y);
            let mut run_start = 0;
            let mut run_color = None;
            for (x, column) in (0..viewport.width).zip(&columns) {
                let color = self.tile_color(*column, row);
                match run_color {
                    Some(current) if current == color => {}
                    Some(current) => {
                        image.fill_rect(run_start, y, x, y + 1, current);
                        run_start = x;
                        run_color = Some(color);
                    }
                    None => run_color = Some(color),
                }
            }
            if let Some(current) = run_color {
                image.fill_rect(run_start, y, viewport.width, y + 1, current);
            }
        }

        image
    }

    fn tile_color(&self, column: i64, row: i64) -> Color {
        if (column.rem_euclid(2) + row.rem_euclid(2)) % 2 == 0 {
            self.even
        } else {
            self.odd
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new(DEFAULT_FLOOR_EVEN, DEFAULT_FLOOR_ODD)
    }
}

fn pixel_center(index: u32) -> f64 {
    f64::from(index) + 0.5
}

fn tile_index(coordinate: f64) -> i64 {
    coordinate.floor() as i64
}
