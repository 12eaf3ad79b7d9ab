//! Polygon obstacles and their axis-aligned bounding boxes.

use glam::DVec2;
use thiserror::Error;

use crate::Color;

/// Minimum number of vertices a polygon needs to enclose an area.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Errors raised when constructing or mutating obstacle geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The polygon had fewer than three vertices.
    #[error("polygon needs at least 3 vertices (received {vertices})")]
    InvalidGeometry {
        /// Number of vertices that were supplied.
        vertices: usize,
    },
}

/// Axis-aligned rectangle in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Lower-left corner.
    pub min: DVec2,
    /// Upper-right corner.
    pub max: DVec2,
}

impl BoundingBox {
    /// Creates a bounding box from its corners.
    #[must_use]
    pub const fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Computes the tight bounding box of the provided points.
    ///
    /// Returns `None` when `points` is empty.
    #[must_use]
    pub fn from_points(points: &[DVec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |bounds, point| {
            Self::new(bounds.min.min(*point), bounds.max.max(*point))
        }))
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        self.min.x <= point.x
            && self.max.x >= point.x
            && self.min.y <= point.y
            && self.max.y >= point.y
    }

    /// Reports whether the two boxes share no area. Touching edges overlap.
    #[must_use]
    pub fn is_disjoint(&self, other: &BoundingBox) -> bool {
        self.min.x > other.max.x
            || self.max.x < other.min.x
            || self.min.y > other.max.y
            || self.max.y < other.min.y
    }

    /// Smallest box that covers both boxes.
    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Extent of the box along each axis.
    #[must_use]
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}

/// Capability attached to an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Solid wall that blocks the ego.
    StaticWall,
    /// Collectible panel that is triggered once when the ego walks onto it.
    InteractivePanel {
        /// Whether the panel can still be collected.
        active: bool,
    },
}

/// Filled polygon placed in the world.
///
/// The bounding box is derived from the vertices and recomputed by every
/// mutator, so [`Obstacle::bounding_box`] is always tight.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    polygon: Vec<DVec2>,
    color: Color,
    kind: ObstacleKind,
    bounding_box: BoundingBox,
}

impl Obstacle {
    /// Creates an obstacle of the provided kind.
    ///
    /// Fails with [`GeometryError::InvalidGeometry`] when the polygon has
    /// fewer than three vertices.
    pub fn new(
        polygon: Vec<DVec2>,
        color: Color,
        kind: ObstacleKind,
    ) -> Result<Self, GeometryError> {
        let bounding_box = tight_bounds(&polygon)?;
        Ok(Self {
            polygon,
            color,
            kind,
            bounding_box,
        })
    }

    /// Creates an axis-aligned rectangle covering `bounds`, wound
    /// counter-clockwise starting at the lower-left corner.
    #[must_use]
    pub fn rectangle(bounds: BoundingBox, color: Color, kind: ObstacleKind) -> Self {
        let BoundingBox { min, max } = bounds;
        Self {
            polygon: vec![
                min,
                DVec2::new(max.x, min.y),
                max,
                DVec2::new(min.x, max.y),
            ],
            color,
            kind,
            bounding_box: BoundingBox::new(min.min(max), min.max(max)),
        }
    }

    /// Creates a static wall.
    pub fn wall(polygon: Vec<DVec2>, color: Color) -> Result<Self, GeometryError> {
        Self::new(polygon, color, ObstacleKind::StaticWall)
    }

    /// Creates an active collectible panel.
    pub fn panel(polygon: Vec<DVec2>, color: Color) -> Result<Self, GeometryError> {
        let kind = ObstacleKind::InteractivePanel { active: true };
        Self::new(polygon, color, kind)
    }

    /// Vertices of the polygon in world space.
    #[must_use]
    pub fn polygon(&self) -> &[DVec2] {
        &self.polygon
    }

    /// Fill color of the polygon.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Capability attached to the obstacle.
    #[must_use]
    pub const fn kind(&self) -> ObstacleKind {
        self.kind
    }

    /// Cached tight bounding box of the polygon.
    #[must_use]
    pub const fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Replaces the vertices, keeping the previous ones when the new polygon
    /// is degenerate.
    pub fn set_polygon(&mut self, polygon: Vec<DVec2>) -> Result<(), GeometryError> {
        if polygon.len() < MIN_POLYGON_VERTICES {
            return Err(GeometryError::InvalidGeometry {
                vertices: polygon.len(),
            });
        }
        self.polygon = polygon;
        self.recompute_bounding_box();
        Ok(())
    }

    /// Moves every vertex by `delta`.
    pub fn translate(&mut self, delta: DVec2) {
        for vertex in &mut self.polygon {
            *vertex += delta;
        }
        self.recompute_bounding_box();
    }

    /// Recomputes the cached bounding box from the current vertices.
    pub fn recompute_bounding_box(&mut self) {
        if let Some(bounds) = BoundingBox::from_points(&self.polygon) {
            self.bounding_box = bounds;
        }
    }

    /// Reports whether the bounding box lies entirely outside the view
    /// rectangle centered at `offset` with the provided `range`.
    #[must_use]
    pub fn is_outside_view(&self, range: DVec2, offset: DVec2) -> bool {
        let half = range / 2.0;
        let view = BoundingBox::new(offset - half, offset + half);
        self.bounding_box.is_disjoint(&view)
    }

    /// Bounding-box containment test.
    ///
    /// Only exact for axis-aligned rectangles, which is all the maze emits.
    #[must_use]
    pub fn contains_point(&self, point: DVec2) -> bool {
        self.bounding_box.contains(point)
    }

    /// Whether the obstacle still participates in drawing and interaction.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        match self.kind {
            ObstacleKind::StaticWall => true,
            ObstacleKind::InteractivePanel { active } => active,
        }
    }

    /// Whether the obstacle stops the ego.
    #[must_use]
    pub const fn blocks_movement(&self) -> bool {
        matches!(self.kind, ObstacleKind::StaticWall)
    }

    /// Whether the obstacle is a panel that can still be collected.
    #[must_use]
    pub const fn is_collectible(&self) -> bool {
        matches!(self.kind, ObstacleKind::InteractivePanel { active: true })
    }

    /// Deactivates an active panel.
    ///
    /// Returns `true` only on the call that performed the transition; walls
    /// and already-triggered panels return `false`.
    pub fn trigger(&mut self) -> bool {
        match &mut self.kind {
            ObstacleKind::InteractivePanel { active } if *active => {
                *active = false;
                true
            }
            _ => false,
        }
    }
}

fn tight_bounds(polygon: &[DVec2]) -> Result<BoundingBox, GeometryError> {
    if polygon.len() < MIN_POLYGON_VERTICES {
        return Err(GeometryError::InvalidGeometry {
            vertices: polygon.len(),
        });
    }
    BoundingBox::from_points(polygon).ok_or(GeometryError::InvalidGeometry { vertices: 0 })
}
