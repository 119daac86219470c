//! Post-generation analysis of a room

/// Placement counts and cell census
pub mod statistics;
/// Zone classification of room cells
pub mod topology;
