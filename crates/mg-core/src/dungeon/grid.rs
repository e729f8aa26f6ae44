//! Grid cell codes and the rendered output grid.
//!
//! The grid is write-only during final stamping; path search never reads it
//! and works on its own blocking map instead.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Cell-type code, the fixed table exposed to renderers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter,
)]
#[repr(u8)]
pub enum CellKind {
    #[default]
    Void = 0,
    Floor = 1,
    Wall = 2,
    Door = 3,
    Archway = 4,
    CorridorFloor = 5,
    CorridorWall = 6,
    Portal = 7,
    Entrance = 8,
    Exit = 9,
}

impl CellKind {
    /// Numeric code of this cell
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Check if this cell belongs to a room (floor or wall ring)
    pub const fn is_room(self) -> bool {
        matches!(self, CellKind::Floor | CellKind::Wall)
    }

    /// Check if this cell is part of a carved corridor
    pub const fn is_corridor(self) -> bool {
        matches!(self, CellKind::CorridorFloor | CellKind::CorridorWall)
    }

    /// Check if a walker could stand on this cell
    pub const fn is_passable(self) -> bool {
        matches!(
            self,
            CellKind::Floor
                | CellKind::Door
                | CellKind::Archway
                | CellKind::CorridorFloor
                | CellKind::Portal
                | CellKind::Entrance
                | CellKind::Exit
        )
    }
}

/// A single grid coordinate
///
/// `Ord` so points can key deterministic ordered sets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The four orthogonal neighbors that stay inside `width` x `height`
    pub fn neighbors4(self, width: usize, height: usize) -> impl Iterator<Item = Point> {
        const DELTAS: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
        self.offset_all(&DELTAS, width, height)
    }

    /// All eight neighbors, diagonals included, clipped to the grid
    pub fn neighbors8(self, width: usize, height: usize) -> impl Iterator<Item = Point> {
        const DELTAS: [(i64, i64); 8] = [
            (0, -1),
            (0, 1),
            (-1, 0),
            (1, 0),
            (-1, -1),
            (1, -1),
            (-1, 1),
            (1, 1),
        ];
        self.offset_all(&DELTAS, width, height)
    }

    fn offset_all(
        self,
        deltas: &'static [(i64, i64)],
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = Point> {
        deltas.iter().filter_map(move |&(dx, dy)| {
            let nx = self.x as i64 + dx;
            let ny = self.y as i64 + dy;
            if nx >= 0 && ny >= 0 && (nx as usize) < width && (ny as usize) < height {
                Some(Point::new(nx as usize, ny as usize))
            } else {
                None
            }
        })
    }
}

/// Width x height array of cell codes, the final rendered output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Create an all-void grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellKind::Void; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (x, y)
    ///
    /// Panics when the coordinate is out of bounds: a layout point resolving
    /// outside the grid is a broken generation invariant, not a user error.
    pub fn get(&self, x: usize, y: usize) -> CellKind {
        assert!(
            x < self.width && y < self.height,
            "grid access out of bounds: ({}, {}) on {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        self.cells[y * self.width + x]
    }

    /// Stamp a cell at (x, y); same bounds contract as [`Grid::get`]
    pub fn set(&mut self, x: usize, y: usize, kind: CellKind) {
        assert!(
            x < self.width && y < self.height,
            "grid stamp out of bounds: ({}, {}) on {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        self.cells[y * self.width + x] = kind;
    }

    /// Stamp `kind` only if the cell is still void
    pub fn set_if_void(&mut self, x: usize, y: usize, kind: CellKind) {
        if self.get(x, y) == CellKind::Void {
            self.set(x, y, kind);
        }
    }

    /// Iterate rows top to bottom, each row a slice of cells left to right
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.width)
    }

    /// Count cells of a given kind
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }
}
