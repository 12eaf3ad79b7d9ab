#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomised maze generation that emits wall and panel polygons.
//!
//! The maze is stored as a checkered grid of `(2 * tiles + 1)` cells per
//! axis. Cells whose column and row share parity are nodes; every other cell
//! is a gateway between two neighbouring nodes that is either open or closed.
//! Wall emission is a local decision per gateway, so no graph traversal is
//! needed and disconnected regions are allowed. Only enclosure is guaranteed:
//! every gateway on the outer border is closed.

use log::debug;
use maze_walker_core::{BoundingBox, Color, DVec2, Obstacle, ObstacleKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Thickness of every wall strip in world units.
pub const WALL_THICKNESS: f64 = 0.25;

/// Probability that an interior gateway is open.
pub const OPEN_GATEWAY_PROBABILITY: f64 = 0.5;

/// Share of tiles that receive a collectible panel.
pub const PANEL_DENSITY: f64 = 0.07;

/// Inset between a panel and the edges of its tile.
pub const PANEL_MARGIN: f64 = 0.2;

/// Default fill color of wall strips.
pub const DEFAULT_WALL_COLOR: Color = Color::from_rgb(0x10, 0x10, 0x10);

/// Default fill color of collectible panels.
pub const DEFAULT_PANEL_COLOR: Color = Color::from_rgba(0xeb, 0x23, 0xd0, 0x88);

/// Single entry of the maze grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridCell {
    /// Junction or tile cell that is never rendered directly.
    Node,
    /// Passage between two neighbouring nodes.
    Gateway {
        /// Whether the passage can be walked through.
        open: bool,
    },
}

/// Location of a cell within the maze grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    column: usize,
    row: usize,
}

impl GridPosition {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }
}

/// Dense checkered table of nodes and gateways.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    columns: usize,
    rows: usize,
    cells: Vec<GridCell>,
}

impl MazeGrid {
    fn generate<R>(tiles_x: u32, tiles_y: u32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let columns = grid_length(tiles_x);
        let rows = grid_length(tiles_y);
        let mut cells = Vec::with_capacity(columns * rows);

        for row in 0..rows {
            for column in 0..columns {
                let cell = if column % 2 == row % 2 {
                    GridCell::Node
                } else if column == 0 || column == columns - 1 || row == 0 || row == rows - 1 {
                    GridCell::Gateway { open: false }
                } else {
                    GridCell::Gateway {
                        open: rng.gen_bool(OPEN_GATEWAY_PROBABILITY),
                    }
                };
                cells.push(cell);
            }
        }

        Self {
            columns,
            rows,
            cells,
        }
    }

    /// Number of grid columns, `2 * tiles_x + 1`.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of grid rows, `2 * tiles_y + 1`.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the cell at the provided position, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, position: GridPosition) -> Option<GridCell> {
        if position.column >= self.columns || position.row >= self.rows {
            return None;
        }
        self.cells
            .get(position.row * self.columns + position.column)
            .copied()
    }

    /// Returns whether the gateway at `position` is open, or `None` for nodes
    /// and positions outside the grid.
    #[must_use]
    pub fn gateway(&self, position: GridPosition) -> Option<bool> {
        match self.cell(position)? {
            GridCell::Node => None,
            GridCell::Gateway { open } => Some(open),
        }
    }

    /// Reports whether the position lies on the outermost ring of the grid.
    #[must_use]
    pub fn is_border(&self, position: GridPosition) -> bool {
        position.column == 0
            || position.row == 0
            || position.column + 1 == self.columns
            || position.row + 1 == self.rows
    }

    /// Iterates over every gateway in row-major order.
    pub fn gateways(&self) -> impl Iterator<Item = (GridPosition, bool)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            let position = GridPosition::new(index % self.columns, index / self.columns);
            match cell {
                GridCell::Node => None,
                GridCell::Gateway { open } => Some((position, *open)),
            }
        })
    }
}

/// Randomly generated maze together with its world-space placement.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    tiles_x: u32,
    tiles_y: u32,
    grid: MazeGrid,
    panel_positions: Vec<GridPosition>,
    origin: DVec2,
}

impl Maze {
    /// Generates a maze using the thread-local entropy source.
    #[must_use]
    pub fn generate(tiles_x: u32, tiles_y: u32) -> Self {
        Self::generate_with_rng(tiles_x, tiles_y, &mut rand::thread_rng())
    }

    /// Generates a reproducible maze from the provided seed.
    #[must_use]
    pub fn from_seed(tiles_x: u32, tiles_y: u32, seed: u64) -> Self {
        Self::generate_with_rng(tiles_x, tiles_y, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Generates a maze drawing every random decision from `rng`.
    ///
    /// Gateways are decided first in row-major order, followed by the panel
    /// positions. Tile counts of zero are not meaningful.
    #[must_use]
    pub fn generate_with_rng<R>(tiles_x: u32, tiles_y: u32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let grid = MazeGrid::generate(tiles_x, tiles_y, rng);

        let panel_count = panel_count(tiles_x, tiles_y);
        let mut panel_positions = Vec::with_capacity(panel_count);
        for _ in 0..panel_count {
            // Several panels may share one tile.
            let column = rng.gen_range(0..tiles_x) as usize * 2 + 1;
            let row = rng.gen_range(0..tiles_y) as usize * 2 + 1;
            panel_positions.push(GridPosition::new(column, row));
        }

        let origin = grid_origin(grid.columns(), grid.rows());
        debug!(
            "generated {tiles_x}x{tiles_y} maze: {} of {} gateways open, {} panels",
            grid.gateways().filter(|(_, open)| *open).count(),
            grid.gateways().count(),
            panel_positions.len(),
        );

        Self {
            tiles_x,
            tiles_y,
            grid,
            panel_positions,
            origin,
        }
    }

    /// Number of tiles along each axis.
    #[must_use]
    pub const fn tiles(&self) -> (u32, u32) {
        (self.tiles_x, self.tiles_y)
    }

    /// Underlying node/gateway grid.
    #[must_use]
    pub const fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Grid positions of the tiles that host a collectible panel.
    #[must_use]
    pub fn panel_positions(&self) -> &[GridPosition] {
        &self.panel_positions
    }

    /// World-space coordinate of the grid's upper-left corner.
    #[must_use]
    pub const fn origin(&self) -> DVec2 {
        self.origin
    }

    /// World-space square covered by a grid cell.
    #[must_use]
    pub fn cell_bounds(&self, position: GridPosition) -> BoundingBox {
        let left = self.origin.x + position.column as f64;
        let top = self.origin.y - position.row as f64;
        BoundingBox::new(DVec2::new(left, top - 1.0), DVec2::new(left + 1.0, top))
    }

    /// Emits one rectangular wall strip per gateway edge.
    #[must_use]
    pub fn walls(&self, color: Color) -> Vec<Obstacle> {
        let t = WALL_THICKNESS;
        let last_column = self.grid.columns().saturating_sub(1);
        let last_row = self.grid.rows().saturating_sub(1);
        let mut strips = Vec::new();

        for (position, open) in self.grid.gateways() {
            let cell = self.cell_bounds(position);
            let (left, right) = (cell.min.x, cell.max.x);
            let (bottom, top) = (cell.min.y, cell.max.y);

            if position.row % 2 == 0 {
                // Passage between vertically adjacent tiles.
                if open {
                    strips.push(rect(left - t, bottom, left, top));
                    strips.push(rect(right, bottom, right + t, top));
                } else {
                    if position.row != 0 {
                        strips.push(rect(left - t, top - t, right + t, top));
                    }
                    if position.row != last_row {
                        strips.push(rect(left - t, bottom, right + t, bottom + t));
                    }
                }
            } else if open {
                // Passage between horizontally adjacent tiles.
                strips.push(rect(left, top, right, top + t));
                strips.push(rect(left, bottom - t, right, bottom));
            } else {
                if position.column != 0 {
                    strips.push(rect(left, bottom - t, left + t, top + t));
                }
                if position.column != last_column {
                    strips.push(rect(right - t, bottom - t, right, top + t));
                }
            }
        }

        strips
            .into_iter()
            .map(|bounds| Obstacle::rectangle(bounds, color, ObstacleKind::StaticWall))
            .collect()
    }

    /// Emits one active panel per panel position, inset within its tile.
    #[must_use]
    pub fn panels(&self, color: Color) -> Vec<Obstacle> {
        self.panel_positions
            .iter()
            .map(|position| {
                let cell = self.cell_bounds(*position);
                let bounds = BoundingBox::new(
                    cell.min + DVec2::splat(PANEL_MARGIN),
                    cell.max - DVec2::splat(PANEL_MARGIN),
                );
                Obstacle::rectangle(
                    bounds,
                    color,
                    ObstacleKind::InteractivePanel { active: true },
                )
            })
            .collect()
    }

    /// Rectangle enclosing every wall strip, including their thickness.
    #[must_use]
    pub fn outer_bounds(&self) -> BoundingBox {
        let t = WALL_THICKNESS;
        let columns = self.grid.columns() as f64;
        let rows = self.grid.rows() as f64;
        BoundingBox::new(
            DVec2::new(self.origin.x + 1.0 - t, self.origin.y - rows + 1.0 - t),
            DVec2::new(self.origin.x + columns - 1.0 + t, self.origin.y - 1.0 + t),
        )
    }

    /// World-space center of the tile at the provided tile indices.
    #[must_use]
    pub fn tile_center(&self, column: u32, row: u32) -> DVec2 {
        let position = GridPosition::new(column as usize * 2 + 1, row as usize * 2 + 1);
        let cell = self.cell_bounds(position);
        (cell.min + cell.max) / 2.0
    }

    /// Center of the tile nearest to the world origin, used as spawn point.
    #[must_use]
    pub fn start_position(&self) -> DVec2 {
        // Tile centers sit at origin + 2 * index + 1.5 along each axis.
        let column = nearest_tile((-self.origin.x - 1.5) / 2.0, self.tiles_x);
        let row = nearest_tile((self.origin.y - 1.5) / 2.0, self.tiles_y);
        self.tile_center(column, row)
    }
}

fn grid_length(tiles: u32) -> usize {
    tiles as usize * 2 + 1
}

fn panel_count(tiles_x: u32, tiles_y: u32) -> usize {
    let tiles = u64::from(tiles_x) * u64::from(tiles_y);
    (tiles as f64 * PANEL_DENSITY).floor() as usize
}

fn grid_origin(columns: usize, rows: usize) -> DVec2 {
    let mut top = rows as f64 / 2.0;
    if ((rows - 1) / 2) % 2 == 0 {
        top += 1.0;
    }
    DVec2::new(-(columns as f64) / 2.0, top)
}

fn nearest_tile(index: f64, tiles: u32) -> u32 {
    if tiles == 0 {
        return 0;
    }
    index.round().clamp(0.0, f64::from(tiles - 1)) as u32
}

fn rect(left: f64, bottom: f64, right: f64, top: f64) -> BoundingBox {
    BoundingBox::new(DVec2::new(left, bottom), DVec2::new(right, top))
}
