//! Corner piece placement for rectangular and irregular rooms

use serde::Serialize;

use crate::io::style::{CornerSettings, MeshRef};
use crate::spatial::edges::Direction;
use crate::spatial::geometry::{Transform, Vec3, grid_to_local};
use crate::spatial::grid::{CellType, GridCoord, OccupancyGrid};

/// Which corner a piece fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CornerPosition {
    /// `(0, 0)`
    SouthWest,
    /// `(0, H)`
    SouthEast,
    /// `(W, H)`
    NorthEast,
    /// `(W, 0)`
    NorthWest,
    /// Concave corner of an irregular room
    Interior,
}

/// Committed corner piece
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedCorner {
    /// Corner identifier
    pub corner: CornerPosition,
    /// Mesh to spawn
    pub mesh: MeshRef,
    /// World transform of the mesh
    pub transform: Transform,
    /// Claimed cell of an interior corner
    pub cell: Option<GridCoord>,
    /// Directions from the claimed cell toward the room
    pub room_sides: Vec<Direction>,
}

/// The four corners of a `width` x `height` rectangle
pub fn rectangle_corners(
    width: usize,
    height: usize,
    cell_size: f64,
    mesh: &MeshRef,
    settings: &CornerSettings,
) -> Vec<PlacedCorner> {
    let far_x = width as f64 * cell_size;
    let far_y = height as f64 * cell_size;

    [
        (CornerPosition::SouthWest, Vec3::new(0.0, 0.0, 0.0), settings.south_west),
        (CornerPosition::SouthEast, Vec3::new(0.0, far_y, 0.0), settings.south_east),
        (CornerPosition::NorthEast, Vec3::new(far_x, far_y, 0.0), settings.north_east),
        (CornerPosition::NorthWest, Vec3::new(far_x, 0.0, 0.0), settings.north_west),
    ]
    .into_iter()
    .map(|(corner, base, placement)| PlacedCorner {
        corner,
        mesh: mesh.clone(),
        transform: Transform::new(base + placement.offset, placement.rotation),
        cell: None,
        room_sides: Vec::new(),
    })
    .collect()
}

/// Room-side directions of a void cell that forms a concave corner
///
/// A void cell is a corner when exactly two orthogonal neighbours are interior
/// and those two lie on adjacent sides. Opposite neighbours make a corridor
/// pinch instead.
pub fn interior_corner_sides(grid: &OccupancyGrid, cell: GridCoord) -> Option<[Direction; 2]> {
    if !grid.is_valid(cell) || grid.get(cell) != CellType::Void {
        return None;
    }

    let occupied: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|direction| {
            let neighbor = direction.step(cell);
            grid.is_valid(neighbor) && grid.get(neighbor).is_room()
        })
        .collect();

    match occupied.as_slice() {
        &[first, second] if first.is_perpendicular(second) => Some([first, second]),
        _ => None,
    }
}

/// Every concave corner of an irregular room, in row-major cell order
pub fn interior_corners(grid: &OccupancyGrid, cell_size: f64, mesh: &MeshRef) -> Vec<PlacedCorner> {
    grid.iter()
        .filter_map(|(cell, _)| {
            interior_corner_sides(grid, cell).map(|sides| PlacedCorner {
                corner: CornerPosition::Interior,
                mesh: mesh.clone(),
                transform: Transform::from_location(grid_to_local(cell, cell_size)),
                cell: Some(cell),
                room_sides: sides.to_vec(),
            })
        })
        .collect()
}
