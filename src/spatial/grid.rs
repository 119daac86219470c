//! Occupancy grid of cell states with bounds-checked access
//!
//! The grid is a single owned buffer stored row-major (`index = y * width + x`).
//! Every read and write goes through an accessor that validates coordinates, so
//! packers never touch the buffer directly and the no-overlap invariant is
//! enforced in one place.

use ndarray::{Array2, s};
use serde::{Deserialize, Serialize};

use crate::spatial::geometry::{Footprint, rect_cells};

/// State of a single grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum CellType {
    /// Fillable cell of a uniform room
    #[default]
    Empty,
    /// Covered by a placed floor tile
    FloorMesh,
    /// Held back for wall geometry
    WallBoundary,
    /// Held back for a doorway
    Doorway,
    /// Kept clear of floor tiles by a forced-empty override
    Reserved,
    /// Fillable cell of an irregular room
    Custom,
    /// Outside the room
    Void,
}

impl CellType {
    /// Every cell state in declaration order
    pub const ALL: [Self; 7] = [
        Self::Empty,
        Self::FloorMesh,
        Self::WallBoundary,
        Self::Doorway,
        Self::Reserved,
        Self::Custom,
        Self::Void,
    ];

    /// Whether the cell is part of the room interior
    ///
    /// Interior cells are the fillable states plus anything a floor phase wrote
    /// over them. Walls, doorways and corners live on the non-interior cells
    /// bordering them.
    pub const fn is_room(self) -> bool {
        matches!(
            self,
            Self::Empty | Self::FloorMesh | Self::Reserved | Self::Custom
        )
    }
}

/// Integer cell coordinate
///
/// Coordinates are signed so boundary cells just outside the grid (such as
/// the wall ring of a rectangular room) can be named.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridCoord {
    /// Column, increasing toward North
    pub x: i32,
    /// Row, increasing toward East
    pub y: i32,
}

impl GridCoord {
    /// Create a coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by the given deltas
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Row-major grid of cell states owned by one generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    /// Cell states indexed `[y, x]`
    cells: Array2<CellType>,
}

impl OccupancyGrid {
    /// Create a grid with every cell set to `initial`
    pub fn new(width: usize, height: usize, initial: CellType) -> Self {
        Self {
            cells: Array2::from_elem((height, width), initial),
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index_of(&self, coord: GridCoord) -> Option<[usize; 2]> {
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        (x < self.width() && y < self.height()).then_some([y, x])
    }

    /// Row-major linear index of a coordinate
    pub fn linear_index(&self, coord: GridCoord) -> Option<usize> {
        self.index_of(coord).map(|[y, x]| y * self.width() + x)
    }

    /// Whether the coordinate lies inside the grid
    pub fn is_valid(&self, coord: GridCoord) -> bool {
        self.index_of(coord).is_some()
    }

    /// State at a coordinate, `Empty` when out of bounds
    pub fn get(&self, coord: GridCoord) -> CellType {
        self.index_of(coord)
            .and_then(|index| self.cells.get(index))
            .copied()
            .unwrap_or(CellType::Empty)
    }

    /// Write a state, returning false when the coordinate is out of bounds
    pub fn set(&mut self, coord: GridCoord, state: CellType) -> bool {
        let Some(index) = self.index_of(coord) else {
            return false;
        };
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = state;
                true
            }
            None => false,
        }
    }

    /// Whether every cell of the rectangle is in bounds and equals `required`
    ///
    /// Rectangles that leave the grid or have a zero dimension are rejected
    /// wholesale.
    pub fn is_area_available(
        &self,
        start: GridCoord,
        footprint: Footprint,
        required: CellType,
    ) -> bool {
        if footprint.width == 0 || footprint.height == 0 {
            return false;
        }
        let Some([y0, x0]) = self.index_of(start) else {
            return false;
        };
        let (Some(x1), Some(y1)) = (
            x0.checked_add(footprint.width),
            y0.checked_add(footprint.height),
        ) else {
            return false;
        };
        if x1 > self.width() || y1 > self.height() {
            return false;
        }

        self.cells
            .slice(s![y0..y1, x0..x1])
            .iter()
            .all(|&cell| cell == required)
    }

    /// Write `state` into every in-bounds cell of the rectangle
    ///
    /// Returns the number of cells written.
    pub fn mark_area(&mut self, start: GridCoord, footprint: Footprint, state: CellType) -> usize {
        rect_cells(start, footprint)
            .filter(|&coord| self.set(coord, state))
            .count()
    }

    /// Return the floor cells of the rectangle to the fillable state
    ///
    /// Only `FloorMesh` and `Reserved` cells are rewritten; cells outside the
    /// room keep their state. Returns the number of cells changed.
    pub fn clear_area(&mut self, start: GridCoord, footprint: Footprint, fillable: CellType) -> usize {
        rect_cells(start, footprint)
            .filter(|&coord| {
                matches!(self.get(coord), CellType::FloorMesh | CellType::Reserved)
                    && self.set(coord, fillable)
            })
            .count()
    }

    /// Set every cell to one state
    pub fn fill(&mut self, state: CellType) {
        self.cells.fill(state);
    }

    /// Rewrite every cell in state `from` to state `to`
    ///
    /// Returns the number of cells changed.
    pub fn reset_cells(&mut self, from: CellType, to: CellType) -> usize {
        let mut changed = 0;
        for cell in &mut self.cells {
            if *cell == from {
                *cell = to;
                changed += 1;
            }
        }
        changed
    }

    /// Number of cells in the given state
    pub fn count(&self, state: CellType) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Number of interior cells
    pub fn room_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_room()).count()
    }

    /// Percentage of all cells covered by floor tiles
    pub fn occupancy_percentage(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.count(CellType::FloorMesh) as f64 / self.len() as f64 * 100.0
    }

    /// Iterate cells in row-major order (y outer, x inner)
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellType)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), &cell)| (GridCoord::new(x as i32, y as i32), cell))
    }
}
