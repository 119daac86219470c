//! Placement statistics gathered while packing

use serde::Serialize;
use std::collections::BTreeMap;

use crate::io::configuration::{LARGE_TILE_AREA, MEDIUM_TILE_AREA, SMALL_TILE_AREA};
use crate::spatial::geometry::Footprint;
use crate::spatial::grid::{CellType, OccupancyGrid};

/// Reporting class of a tile by area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SizeClass {
    /// Sixteen cells or more
    Large,
    /// Four to fifteen cells
    Medium,
    /// Two or three cells
    Small,
    /// A single cell
    Filler,
}

impl SizeClass {
    /// Class of a footprint
    pub const fn of(footprint: Footprint) -> Self {
        let area = footprint.area();
        if area >= LARGE_TILE_AREA {
            Self::Large
        } else if area >= MEDIUM_TILE_AREA {
            Self::Medium
        } else if area >= SMALL_TILE_AREA {
            Self::Small
        } else {
            Self::Filler
        }
    }
}

/// Where a tile placement came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlacementSource {
    /// Designer-specified position
    Forced,
    /// Size-descending greedy pass
    Greedy,
    /// Small-size gap fill pass
    GapFill,
}

/// Counts from one floor or ceiling packing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PackingStats {
    /// Tiles of sixteen cells or more
    pub large: usize,
    /// Tiles of four to fifteen cells
    pub medium: usize,
    /// Tiles of two or three cells
    pub small: usize,
    /// Single-cell tiles
    pub filler: usize,
    /// Forced placements committed
    pub forced_placed: usize,
    /// Forced placements that did not fit
    pub forced_skipped: usize,
    /// Cells reserved by forced-empty overrides
    pub reserved_cells: usize,
    /// Tiles from the greedy pass
    pub greedy_placed: usize,
    /// Tiles from the gap fill pass
    pub gap_fill_placed: usize,
}

impl PackingStats {
    /// Count a committed tile
    pub const fn record(&mut self, footprint: Footprint, source: PlacementSource) {
        match SizeClass::of(footprint) {
            SizeClass::Large => self.large += 1,
            SizeClass::Medium => self.medium += 1,
            SizeClass::Small => self.small += 1,
            SizeClass::Filler => self.filler += 1,
        }
        match source {
            PlacementSource::Forced => self.forced_placed += 1,
            PlacementSource::Greedy => self.greedy_placed += 1,
            PlacementSource::GapFill => self.gap_fill_placed += 1,
        }
    }

    /// Total tiles placed
    pub const fn total_placed(&self) -> usize {
        self.forced_placed + self.greedy_placed + self.gap_fill_placed
    }
}

/// Counts from one wall packing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WallStats {
    /// Forced walls committed
    pub forced_placed: usize,
    /// Forced walls rejected
    pub forced_skipped: usize,
    /// Modules from the greedy pass
    pub greedy_placed: usize,
    /// Boundary cells nothing could cover
    pub gap_cells: usize,
    /// Boundary cells left open for doorways
    pub doorway_cells: usize,
}

impl WallStats {
    /// Total wall segments placed
    pub const fn total_placed(&self) -> usize {
        self.forced_placed + self.greedy_placed
    }
}

/// Cell census of a grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomStatistics {
    /// Cells per state
    pub cell_counts: BTreeMap<CellType, usize>,
    /// Interior cells
    pub room_cells: usize,
    /// Percentage of all cells under floor tiles
    pub occupancy_percentage: f64,
}

impl RoomStatistics {
    /// Count every state in a grid
    pub fn from_grid(grid: &OccupancyGrid) -> Self {
        let cell_counts = CellType::ALL
            .iter()
            .map(|&state| (state, grid.count(state)))
            .filter(|&(_, count)| count > 0)
            .collect();

        Self {
            cell_counts,
            room_cells: grid.room_cell_count(),
            occupancy_percentage: grid.occupancy_percentage(),
        }
    }

    /// Cells in one state
    pub fn count(&self, state: CellType) -> usize {
        self.cell_counts.get(&state).copied().unwrap_or(0)
    }
}
