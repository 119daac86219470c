//! Room shape strategies that lay down the initial occupied silhouette
//!
//! A uniform room fills the whole rectangle. A chunky room is grown on a
//! half-resolution chunk grid (one chunk = 2x2 cells) from a base rectangle at
//! the origin plus random protrusions, which keeps every wall run and concave
//! corner aligned to even cell boundaries.

use log::debug;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::algorithm::selection::RandomSelector;
use crate::io::configuration::{
    CHUNK_SIZE, DEFAULT_BASE_FRACTION, DEFAULT_MAX_PROTRUSION_SIZE, DEFAULT_MAX_PROTRUSIONS,
    DEFAULT_MIN_PROTRUSION_SIZE, DEFAULT_MIN_PROTRUSIONS, MAX_GRID_DIMENSION, MIN_CHUNK_GRID,
};
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::spatial::edges::Direction;
use crate::spatial::geometry::Footprint;
use crate::spatial::grid::{CellType, GridCoord, OccupancyGrid};

/// Parameters of an irregular room
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkyParams {
    /// Fewest protrusions drawn
    pub min_protrusions: usize,
    /// Most protrusions drawn
    pub max_protrusions: usize,
    /// Smallest protrusion width and depth in chunks
    pub min_protrusion_size: usize,
    /// Largest protrusion width and depth in chunks
    pub max_protrusion_size: usize,
    /// Share of the chunk grid covered by the base rectangle
    pub base_fraction: f64,
}

impl Default for ChunkyParams {
    fn default() -> Self {
        Self {
            min_protrusions: DEFAULT_MIN_PROTRUSIONS,
            max_protrusions: DEFAULT_MAX_PROTRUSIONS,
            min_protrusion_size: DEFAULT_MIN_PROTRUSION_SIZE,
            max_protrusion_size: DEFAULT_MAX_PROTRUSION_SIZE,
            base_fraction: DEFAULT_BASE_FRACTION,
        }
    }
}

/// Strategy that creates the initial grid of a room
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoomShape {
    /// Full rectangle of `Empty` cells
    #[default]
    Uniform,
    /// Base rectangle plus protrusions of `Custom` cells
    Chunky(ChunkyParams),
}

/// Grid produced by a shape strategy and what went into it
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOutcome {
    /// Initialized grid
    pub grid: OccupancyGrid,
    /// Base rectangle in cells, anchored at the origin
    pub base: Footprint,
    /// Protrusions merged into the silhouette
    pub protrusions_kept: usize,
    /// Protrusions discarded after clamping
    pub protrusions_discarded: usize,
}

impl RoomShape {
    /// Cell state the packers fill for this shape
    pub const fn fillable(&self) -> CellType {
        match self {
            Self::Uniform => CellType::Empty,
            Self::Chunky(_) => CellType::Custom,
        }
    }

    /// Smallest grid the shape can be built on
    pub const fn min_dimensions(&self) -> (usize, usize) {
        match self {
            Self::Uniform => (1, 1),
            Self::Chunky(_) => (CHUNK_SIZE * MIN_CHUNK_GRID, CHUNK_SIZE * MIN_CHUNK_GRID),
        }
    }

    /// Check the shape's parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for inverted ranges, a zero protrusion
    /// size, or a base fraction outside `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let Self::Chunky(params) = self else {
            return Ok(());
        };

        if params.min_protrusions > params.max_protrusions {
            return Err(invalid_parameter(
                "min_protrusions",
                &params.min_protrusions,
                &format!("exceeds max_protrusions ({})", params.max_protrusions),
            ));
        }
        if params.min_protrusion_size == 0 {
            return Err(invalid_parameter(
                "min_protrusion_size",
                &params.min_protrusion_size,
                &"protrusions must be at least one chunk",
            ));
        }
        if params.min_protrusion_size > params.max_protrusion_size {
            return Err(invalid_parameter(
                "min_protrusion_size",
                &params.min_protrusion_size,
                &format!(
                    "exceeds max_protrusion_size ({})",
                    params.max_protrusion_size
                ),
            ));
        }
        if !(params.base_fraction > 0.0 && params.base_fraction <= 1.0) {
            return Err(invalid_parameter(
                "base_fraction",
                &params.base_fraction,
                &"must lie in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Build the initial grid
    ///
    /// # Errors
    ///
    /// Returns `GridTooSmall` when the dimensions are below
    /// [`RoomShape::min_dimensions`] and `InvalidParameter` for dimensions above
    /// the supported maximum or invalid shape parameters. No grid is produced on
    /// failure.
    pub fn create_grid(
        &self,
        width: usize,
        height: usize,
        selector: &mut RandomSelector,
    ) -> Result<ShapeOutcome> {
        if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "grid_size",
                &format!("{width}x{height}"),
                &format!("dimensions are limited to {MAX_GRID_DIMENSION}"),
            ));
        }
        let (min_width, min_height) = self.min_dimensions();
        if width < min_width || height < min_height {
            return Err(GenerationError::GridTooSmall {
                width,
                height,
                min_width,
                min_height,
            });
        }
        self.validate()?;

        match self {
            Self::Uniform => Ok(ShapeOutcome {
                grid: OccupancyGrid::new(width, height, CellType::Empty),
                base: Footprint::new(width, height),
                protrusions_kept: 0,
                protrusions_discarded: 0,
            }),
            Self::Chunky(params) => Ok(build_chunky(width, height, params, selector)),
        }
    }
}

/// Rectangle on the chunk grid, signed so protrusions may start off-grid
#[derive(Debug, Clone, Copy)]
struct ChunkRect {
    x: i64,
    y: i64,
    width: usize,
    height: usize,
}

fn build_chunky(
    width: usize,
    height: usize,
    params: &ChunkyParams,
    selector: &mut RandomSelector,
) -> ShapeOutcome {
    let chunks_x = width / CHUNK_SIZE;
    let chunks_y = height / CHUNK_SIZE;
    let mut chunks = Array2::from_elem((chunks_y, chunks_x), false);

    let base_extent = |chunk_dim: usize| -> usize {
        let scaled = (chunk_dim as f64 * params.base_fraction).floor() as usize;
        ((scaled / 2) * 2).clamp(MIN_CHUNK_GRID, chunk_dim)
    };
    let base = ChunkRect {
        x: 0,
        y: 0,
        width: base_extent(chunks_x),
        height: base_extent(chunks_y),
    };
    mark_chunks(&mut chunks, base);

    let count = selector.range_inclusive(params.min_protrusions, params.max_protrusions);
    let mut kept = 0;
    for _ in 0..count {
        let candidate = draw_protrusion(base, params, selector);
        match clamp_to_chunk_grid(candidate, chunks_x, chunks_y) {
            Some(rect)
                if rect.width >= params.min_protrusion_size
                    && rect.height >= params.min_protrusion_size =>
            {
                mark_chunks(&mut chunks, rect);
                kept += 1;
            }
            _ => debug!("Discarded protrusion {candidate:?} after clamping"),
        }
    }

    let fillable = CellType::Custom;
    let mut grid = OccupancyGrid::new(width, height, CellType::Void);
    for ((cy, cx), &marked) in chunks.indexed_iter() {
        if !marked {
            continue;
        }
        let origin = GridCoord::new((cx * CHUNK_SIZE) as i32, (cy * CHUNK_SIZE) as i32);
        grid.mark_area(origin, Footprint::new(CHUNK_SIZE, CHUNK_SIZE), fillable);
    }

    ShapeOutcome {
        grid,
        base: Footprint::new(base.width * CHUNK_SIZE, base.height * CHUNK_SIZE),
        protrusions_kept: kept,
        protrusions_discarded: count - kept,
    }
}

fn draw_protrusion(
    base: ChunkRect,
    params: &ChunkyParams,
    selector: &mut RandomSelector,
) -> ChunkRect {
    let edge = selector
        .choose(&Direction::ALL)
        .copied()
        .unwrap_or(Direction::North);
    let width = selector.range_inclusive(params.min_protrusion_size, params.max_protrusion_size);
    let depth = selector.range_inclusive(params.min_protrusion_size, params.max_protrusion_size);

    let edge_length = if edge.runs_along_y() {
        base.height
    } else {
        base.width
    };
    let offset = selector.range_inclusive(0, edge_length.saturating_sub(width).max(1)) as i64;

    // North and South protrude along x, East and West along y
    match edge {
        Direction::North => ChunkRect {
            x: base.x + base.width as i64,
            y: base.y + offset,
            width: depth,
            height: width,
        },
        Direction::South => ChunkRect {
            x: base.x - depth as i64,
            y: base.y + offset,
            width: depth,
            height: width,
        },
        Direction::East => ChunkRect {
            x: base.x + offset,
            y: base.y + base.height as i64,
            width,
            height: depth,
        },
        Direction::West => ChunkRect {
            x: base.x + offset,
            y: base.y - depth as i64,
            width,
            height: depth,
        },
    }
}

// Moves the start inside the grid, then trims the extent to what remains
fn clamp_to_chunk_grid(rect: ChunkRect, chunks_x: usize, chunks_y: usize) -> Option<ChunkRect> {
    let max_x = chunks_x.checked_sub(1)? as i64;
    let max_y = chunks_y.checked_sub(1)? as i64;
    let x = rect.x.clamp(0, max_x);
    let y = rect.y.clamp(0, max_y);
    Some(ChunkRect {
        x,
        y,
        width: rect.width.min(chunks_x - x as usize),
        height: rect.height.min(chunks_y - y as usize),
    })
}

fn mark_chunks(chunks: &mut Array2<bool>, rect: ChunkRect) {
    for dy in 0..rect.height {
        for dx in 0..rect.width {
            let x = rect.x as usize + dx;
            let y = rect.y as usize + dy;
            if let Some(chunk) = chunks.get_mut([y, x]) {
                *chunk = true;
            }
        }
    }
}
