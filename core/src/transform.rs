//! Bidirectional mapping between world space and pixel space.
//!
//! World Y grows upward while pixel Y grows downward, so both conversions
//! flip the vertical axis around the view center.

use glam::DVec2;

use crate::BoundingBox;

/// Camera parameters that place a world-space window onto a pixel surface.
///
/// `width` and `height` as well as both components of `range` must be
/// positive. Zero values are a caller error and make the conversions produce
/// infinities or NaN rather than panicking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width of the drawing surface in pixels.
    pub width: u32,
    /// Height of the drawing surface in pixels.
    pub height: u32,
    /// World-space span visible along each axis.
    pub range: DVec2,
    /// World-space coordinate shown at the center of the surface.
    pub offset: DVec2,
}

impl Viewport {
    /// Creates a new viewport descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32, range: DVec2, offset: DVec2) -> Self {
        Self {
            width,
            height,
            range,
            offset,
        }
    }

    /// Transforms a world-space coordinate into a pixel position.
    #[must_use]
    pub fn to_pixels(&self, world: DVec2) -> DVec2 {
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        DVec2::new(
            width * ((world.x - self.offset.x) + self.range.x / 2.0) / self.range.x,
            height * (-(world.y - self.offset.y) + self.range.y / 2.0) / self.range.y,
        )
    }

    /// Transforms a pixel position into a world-space coordinate.
    #[must_use]
    pub fn to_world(&self, pixel: DVec2) -> DVec2 {
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        DVec2::new(
            pixel.x * self.range.x / width - self.range.x / 2.0 + self.offset.x,
            -pixel.y * self.range.y / height + self.range.y / 2.0 + self.offset.y,
        )
    }

    /// World-space rectangle covered by the surface.
    #[must_use]
    pub fn visible_bounds(&self) -> BoundingBox {
        let half = self.range / 2.0;
        BoundingBox::new(self.offset - half, self.offset + half)
    }

    /// Number of pixels spanned by one world unit along each axis.
    #[must_use]
    pub fn pixels_per_unit(&self) -> DVec2 {
        DVec2::new(
            f64::from(self.width) / self.range.x,
            f64::from(self.height) / self.range.y,
        )
    }
}
