//! Boolean occupancy grid the ceiling packer fills
//!
//! The ceiling does not share cell states with the floor. It only tracks which
//! cells already carry a ceiling tile. Cells outside the room start occupied so
//! chunky rooms get a ceiling matching their silhouette.

use bitvec::prelude::*;

use crate::algorithm::packing::PackingSurface;
use crate::spatial::geometry::{Footprint, rect_cells};
use crate::spatial::grid::{GridCoord, OccupancyGrid};

/// Occupied flag per cell, row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CeilingGrid {
    width: usize,
    height: usize,
    occupied: BitVec,
}

impl CeilingGrid {
    /// Grid with every cell free
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            occupied: bitvec![0; width * height],
        }
    }

    /// Grid whose free cells are exactly the room's interior cells
    pub fn from_room(grid: &OccupancyGrid) -> Self {
        let mut ceiling = Self::new(grid.width(), grid.height());
        for (coord, state) in grid.iter() {
            if !state.is_room() {
                ceiling.set_occupied(coord);
            }
        }
        ceiling
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    fn index_of(&self, coord: GridCoord) -> Option<usize> {
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Whether a cell is taken, out-of-bounds cells counting as taken
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.index_of(coord)
            .is_none_or(|index| self.occupied.get(index).as_deref() == Some(&true))
    }

    /// Mark one cell taken, returning false when it is out of bounds
    pub fn set_occupied(&mut self, coord: GridCoord) -> bool {
        match self.index_of(coord) {
            Some(index) if index < self.occupied.len() => {
                self.occupied.set(index, true);
                true
            }
            _ => false,
        }
    }

    /// Number of taken cells
    pub fn occupied_count(&self) -> usize {
        self.occupied.count_ones()
    }
}

impl PackingSurface for CeilingGrid {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn is_available(&self, start: GridCoord, footprint: Footprint) -> bool {
        footprint.area() > 0 && rect_cells(start, footprint).all(|cell| !self.is_occupied(cell))
    }

    fn occupy(&mut self, start: GridCoord, footprint: Footprint) {
        for cell in rect_cells(start, footprint) {
            self.set_occupied(cell);
        }
    }

    fn reserve(&mut self, cell: GridCoord) -> bool {
        !self.is_occupied(cell) && self.set_occupied(cell)
    }
}
