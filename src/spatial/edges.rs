//! Cardinal directions and the boundary cells that border a room on each side

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::spatial::geometry::Vec3;
use crate::spatial::grid::{GridCoord, OccupancyGrid};

/// Cardinal direction, also used to name the four wall edges of a room
///
/// North is `+x`, South `-x`, East `+y` and West `-y`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Direction {
    /// `+x`
    North,
    /// `-x`
    South,
    /// `+y`
    East,
    /// `-y`
    West,
}

impl Direction {
    /// Edges in packing order
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Cell offset one step in this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (1, 0),
            Self::South => (-1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }

    /// Neighbouring coordinate in this direction
    pub const fn step(self, coord: GridCoord) -> GridCoord {
        let (dx, dy) = self.offset();
        coord.offset(dx, dy)
    }

    /// Direction pointing the other way
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Whether two directions are at right angles
    pub const fn is_perpendicular(self, other: Self) -> bool {
        self.runs_along_y() != other.runs_along_y()
    }

    /// Whether the wall on this side runs along the `y` axis
    ///
    /// North and South walls face along `x` and so extend along `y`.
    pub const fn runs_along_y(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Yaw of a wall mesh facing into the room from this edge
    pub const fn wall_yaw(self) -> f64 {
        match self {
            Self::North => 180.0,
            Self::South => 0.0,
            Self::East => 270.0,
            Self::West => 90.0,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        };
        f.write_str(name)
    }
}

/// Ordered boundary cells along each edge of a room
///
/// A boundary cell on edge `d` is the neighbour in direction `d` of an interior
/// cell, where that neighbour is out of bounds or not interior. Cells claimed by
/// interior corners are left out. Each list is sorted by the axis perpendicular
/// to the edge and then along it, so straight runs are contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomEdges {
    cells: [Vec<GridCoord>; 4],
}

impl RoomEdges {
    /// Collect boundary cells from the grid silhouette
    pub fn from_grid(grid: &OccupancyGrid, claimed: &BTreeSet<GridCoord>) -> Self {
        let mut cells: [Vec<GridCoord>; 4] = Default::default();

        for edge in Direction::ALL {
            let mut boundary: Vec<GridCoord> = grid
                .iter()
                .filter(|(_, state)| state.is_room())
                .map(|(coord, _)| edge.step(coord))
                .filter(|&neighbor| !grid.is_valid(neighbor) || !grid.get(neighbor).is_room())
                .filter(|neighbor| !claimed.contains(neighbor))
                .collect();

            if edge.runs_along_y() {
                boundary.sort_by_key(|coord| (coord.x, coord.y));
            } else {
                boundary.sort_by_key(|coord| (coord.y, coord.x));
            }

            if let Some(slot) = cells.get_mut(edge.slot()) {
                *slot = boundary;
            }
        }

        Self { cells }
    }

    /// Boundary cells of one edge
    pub fn cells(&self, edge: Direction) -> &[GridCoord] {
        self.cells
            .get(edge.slot())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of boundary cells on one edge
    pub fn len(&self, edge: Direction) -> usize {
        self.cells(edge).len()
    }

    /// Edge lengths in `Direction::ALL` order
    pub fn lengths(&self) -> [usize; 4] {
        Direction::ALL.map(|edge| self.len(edge))
    }

    /// Boundary cells `start..start + span` of an edge, if all exist
    pub fn span(&self, edge: Direction, start: usize, span: usize) -> Option<&[GridCoord]> {
        self.cells(edge).get(start..start.checked_add(span)?)
    }

    /// Number of boundary cells across all edges
    pub fn total_len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}

/// Whether a run of boundary cells forms one straight, gap-free line
pub fn is_contiguous(cells: &[GridCoord], edge: Direction) -> bool {
    let (dx, dy) = if edge.runs_along_y() { (0, 1) } else { (1, 0) };
    cells
        .windows(2)
        .all(|pair| matches!(pair, [a, b] if a.offset(dx, dy) == *b))
}

/// World position of the room face covered by a run of boundary cells
///
/// `start` is the first boundary cell of the run and `span` its length. The
/// result lies on the line between the room and the boundary cells, centred
/// along the run and shifted along the edge normal axis by `normal_offset`.
pub fn edge_face_position(
    edge: Direction,
    start: GridCoord,
    span: usize,
    cell_size: f64,
    normal_offset: f64,
) -> Vec3 {
    let half_span = span as f64 / 2.0;
    match edge {
        Direction::North => Vec3::new(
            (start.x as f64).mul_add(cell_size, normal_offset),
            (start.y as f64 + half_span) * cell_size,
            0.0,
        ),
        Direction::South => Vec3::new(
            (start.x as f64 + 1.0).mul_add(cell_size, normal_offset),
            (start.y as f64 + half_span) * cell_size,
            0.0,
        ),
        Direction::East => Vec3::new(
            (start.x as f64 + half_span) * cell_size,
            (start.y as f64).mul_add(cell_size, normal_offset),
            0.0,
        ),
        Direction::West => Vec3::new(
            (start.x as f64 + half_span) * cell_size,
            (start.y as f64 + 1.0).mul_add(cell_size, normal_offset),
            0.0,
        ),
    }
}
