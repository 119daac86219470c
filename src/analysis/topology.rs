//! Read-only classification of room cells by their surrounding walls

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::spatial::edges::Direction;
use crate::spatial::grid::{GridCoord, OccupancyGrid};

/// Placement zone of a room cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Zone {
    /// No adjacent wall
    Center,
    /// One wall, or two on opposite sides
    Border,
    /// Two walls on adjacent sides
    Corner,
    /// Three walls
    DeadEnd,
    /// Walled in on every side
    Isolated,
}

impl Zone {
    /// All zones in declaration order
    pub const ALL: [Self; 5] = [
        Self::Center,
        Self::Border,
        Self::Corner,
        Self::DeadEnd,
        Self::Isolated,
    ];
}

/// Wall and opening directions of one room cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellMetadata {
    /// Directions whose neighbour is outside the room
    pub walls: Vec<Direction>,
    /// Wall directions whose neighbour is a doorway cell
    pub openings: Vec<Direction>,
    /// Zone derived from the walls
    pub zone: Zone,
}

/// Zone for a set of wall directions
pub fn classify_zone(walls: &[Direction]) -> Zone {
    match walls {
        [] => Zone::Center,
        &[first, second] if first.is_perpendicular(second) => Zone::Corner,
        [_] | [_, _] => Zone::Border,
        [_, _, _] => Zone::DeadEnd,
        _ => Zone::Isolated,
    }
}

/// Metadata for every room cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyMap {
    cells: HashMap<GridCoord, CellMetadata>,
}

impl TopologyMap {
    /// Classify every room cell of `grid`
    ///
    /// `doorway_cells` holds the boundary cells doorways open onto, including
    /// those outside the grid.
    pub fn analyze(grid: &OccupancyGrid, doorway_cells: &BTreeSet<GridCoord>) -> Self {
        let cells = grid
            .iter()
            .filter(|(_, state)| state.is_room())
            .map(|(coord, _)| {
                let walls: Vec<Direction> = Direction::ALL
                    .into_iter()
                    .filter(|direction| {
                        let neighbor = direction.step(coord);
                        !grid.is_valid(neighbor) || !grid.get(neighbor).is_room()
                    })
                    .collect();
                let openings = walls
                    .iter()
                    .copied()
                    .filter(|direction| doorway_cells.contains(&direction.step(coord)))
                    .collect();
                let zone = classify_zone(&walls);
                (
                    coord,
                    CellMetadata {
                        walls,
                        openings,
                        zone,
                    },
                )
            })
            .collect();

        Self { cells }
    }

    /// Metadata of one cell, `None` for cells outside the room
    pub fn get(&self, coord: GridCoord) -> Option<&CellMetadata> {
        self.cells.get(&coord)
    }

    /// Cells in a zone, sorted by coordinate
    pub fn cells_in_zone(&self, zone: Zone) -> Vec<GridCoord> {
        let mut cells: Vec<GridCoord> = self
            .cells
            .iter()
            .filter(|(_, metadata)| metadata.zone == zone)
            .map(|(coord, _)| *coord)
            .collect();
        cells.sort_unstable();
        cells
    }

    /// Number of cells per zone, zones without cells omitted
    pub fn zone_counts(&self) -> BTreeMap<Zone, usize> {
        let mut counts = BTreeMap::new();
        for metadata in self.cells.values() {
            *counts.entry(metadata.zone).or_insert(0) += 1;
        }
        counts
    }

    /// Cells with at least one opening, sorted by coordinate
    pub fn cells_with_openings(&self) -> Vec<GridCoord> {
        let mut cells: Vec<GridCoord> = self
            .cells
            .iter()
            .filter(|(_, metadata)| !metadata.openings.is_empty())
            .map(|(coord, _)| *coord)
            .collect();
        cells.sort_unstable();
        cells
    }

    /// Number of classified cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cells were classified
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
