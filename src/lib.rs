//! Procedural room interior layout on an occupancy grid
//!
//! A room is a grid of cells shaped either as a plain rectangle or as a base
//! block with random protrusions. Floor and ceiling tiles are packed greedily
//! from weighted pools, walls are packed along each edge and stacked in
//! layers, corners and doorways are placed on the boundary, and a final pass
//! classifies every cell by its surrounding walls.

/// Room generator and its packing phases
pub mod algorithm;
/// Statistics and topology analysis of generated rooms
pub mod analysis;
/// Style loading, exports, CLI and error handling
pub mod io;
/// Grid, geometry, edges and room shapes
pub mod spatial;

pub use algorithm::executor::{GenerationPhase, RoomGenerator};
pub use io::error::{GenerationError, Result};
pub use io::style::RoomConfig;
