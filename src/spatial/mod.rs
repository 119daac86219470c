//! Spatial data structures for room layout
//!
//! This module contains:
//! - The occupancy grid and its cell states
//! - Footprints, rotations and world transforms
//! - Room edges and their boundary cells
//! - Room shape strategies

/// Boundary cells and cardinal directions
pub mod edges;
/// Footprints, rotations and transforms
pub mod geometry;
/// Occupancy grid and cell states
pub mod grid;
/// Uniform and chunky room shapes
pub mod shape;

pub use grid::{CellType, GridCoord, OccupancyGrid};
