/// Ceiling occupancy grid
pub mod ceiling;
/// Corner piece placement for rectangular and irregular rooms
pub mod corners;
/// Doorway layout planning and caching
pub mod doorways;
/// Room generator orchestrating every phase
pub mod executor;
/// Greedy tile packing shared by floors and ceilings
pub mod packing;
/// Seeded weighted random selection
pub mod selection;
/// Wall module packing and vertical stacking
pub mod walls;
