//! Generation constants and runtime configuration defaults

use crate::spatial::geometry::Footprint;

/// World-space side length of one cell when a style does not set one
pub const DEFAULT_CELL_SIZE: f64 = 100.0;

// Frozen packing order: changing either table changes every seeded layout
/// Target footprints of the size-descending floor and ceiling pass
pub const GREEDY_TARGET_SIZES: [Footprint; 7] = [
    Footprint::new(4, 4),
    Footprint::new(2, 4),
    Footprint::new(4, 2),
    Footprint::new(2, 2),
    Footprint::new(1, 2),
    Footprint::new(2, 1),
    Footprint::new(1, 1),
];
/// Target footprints of the gap-fill pass
pub const GAP_FILL_SIZES: [Footprint; 5] = [
    Footprint::new(1, 4),
    Footprint::new(4, 1),
    Footprint::new(1, 2),
    Footprint::new(2, 1),
    Footprint::new(1, 1),
];

// Reporting thresholds by tile area in cells
/// Smallest area counted as a large tile
pub const LARGE_TILE_AREA: usize = 16;
/// Smallest area counted as a medium tile
pub const MEDIUM_TILE_AREA: usize = 4;
/// Smallest area counted as a small tile
pub const SMALL_TILE_AREA: usize = 2;

/// Cells per chunk along each axis for irregular rooms
pub const CHUNK_SIZE: usize = 2;
/// Smallest chunk grid an irregular room can be built on
pub const MIN_CHUNK_GRID: usize = 2;
/// Default minimum number of protrusions
pub const DEFAULT_MIN_PROTRUSIONS: usize = 3;
/// Default maximum number of protrusions
pub const DEFAULT_MAX_PROTRUSIONS: usize = 8;
/// Default minimum protrusion width and depth in chunks
pub const DEFAULT_MIN_PROTRUSION_SIZE: usize = 2;
/// Default maximum protrusion width and depth in chunks
pub const DEFAULT_MAX_PROTRUSION_SIZE: usize = 4;
/// Default share of the chunk grid covered by the base rectangle
pub const DEFAULT_BASE_FRACTION: f64 = 0.7;

/// Vertical offset between stacked wall layers lacking an attachment point
pub const DEFAULT_WALL_HEIGHT: f64 = 400.0;
/// Default height of the ceiling plane
pub const DEFAULT_CEILING_HEIGHT: f64 = 400.0;

/// Fewest edges that receive a doorway in multi-edge mode
pub const MIN_DOORWAY_EDGES: usize = 2;
/// Most edges that can receive a doorway in multi-edge mode
pub const MAX_DOORWAY_EDGES: usize = 4;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Default values for command-line parameters
/// Grid width used when none is given on the command line
pub const DEFAULT_GRID_WIDTH: usize = 10;
/// Pixels drawn per cell in preview images
pub const PREVIEW_PIXELS_PER_CELL: u32 = 16;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_layout";
/// Extension of style and layout files
pub const STYLE_EXTENSION: &str = "json";
