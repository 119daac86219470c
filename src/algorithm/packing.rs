//! Four-phase greedy tile packing shared by floors and ceilings
//!
//! Phases run in strict priority order and are never revisited:
//! 1. Forced-empty cells are reserved
//! 2. Forced placements are committed at their exact positions
//! 3. A size-descending greedy scan places the largest tiles it can
//! 4. A gap-fill scan over small sizes mops up what is left
//!
//! Floors pack into the shared occupancy grid, ceilings into their own
//! [`CeilingGrid`](crate::algorithm::ceiling::CeilingGrid); both sit behind the
//! [`PackingSurface`] seam.

use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::algorithm::selection::RandomSelector;
use crate::analysis::statistics::{PackingStats, PlacementSource};
use crate::io::configuration::{GAP_FILL_SIZES, GREEDY_TARGET_SIZES};
use crate::io::style::{CellRegion, ForcedTile, TileEntry};
use crate::spatial::geometry::{Footprint, Rotation, Rotator, Transform, mesh_transform};
use crate::spatial::grid::{CellType, GridCoord, OccupancyGrid};

/// Occupancy store a packer can fill
pub trait PackingSurface {
    /// Dimensions as `(width, height)`
    fn dimensions(&self) -> (usize, usize);

    /// Whether every cell of the rectangle is in bounds and free
    fn is_available(&self, start: GridCoord, footprint: Footprint) -> bool;

    /// Claim every cell of the rectangle for a tile
    fn occupy(&mut self, start: GridCoord, footprint: Footprint);

    /// Keep a free cell out of reach of every later phase
    ///
    /// Returns whether the cell was free and is now reserved.
    fn reserve(&mut self, cell: GridCoord) -> bool;
}

/// Floor packing over the room's occupancy grid
pub struct FloorSurface<'a> {
    grid: &'a mut OccupancyGrid,
    fillable: CellType,
}

impl<'a> FloorSurface<'a> {
    /// Pack into cells in the `fillable` state
    pub const fn new(grid: &'a mut OccupancyGrid, fillable: CellType) -> Self {
        Self { grid, fillable }
    }
}

impl PackingSurface for FloorSurface<'_> {
    fn dimensions(&self) -> (usize, usize) {
        (self.grid.width(), self.grid.height())
    }

    fn is_available(&self, start: GridCoord, footprint: Footprint) -> bool {
        self.grid.is_area_available(start, footprint, self.fillable)
    }

    fn occupy(&mut self, start: GridCoord, footprint: Footprint) {
        self.grid.mark_area(start, footprint, CellType::FloorMesh);
    }

    fn reserve(&mut self, cell: GridCoord) -> bool {
        self.grid.is_valid(cell)
            && self.grid.get(cell) == self.fillable
            && self.grid.set(cell, CellType::Reserved)
    }
}

/// Committed floor or ceiling tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedTile {
    /// Minimum corner of the covered cells
    pub position: GridCoord,
    /// Covered cells after rotation
    pub footprint: Footprint,
    /// Rotation the mesh is placed with
    pub rotation: Rotation,
    /// Pool entry the tile came from
    pub tile: TileEntry,
    /// World transform of the mesh
    pub transform: Transform,
    /// Phase that placed the tile
    pub source: PlacementSource,
}

/// Inputs of one packing run
#[derive(Debug, Clone, Copy)]
pub struct PackingRequest<'a> {
    /// Weighted tiles for the greedy phases
    pub pool: &'a [TileEntry],
    /// Exact-position placements
    pub forced: &'a [ForcedTile],
    /// Rectangles kept free
    pub forced_empty_regions: &'a [CellRegion],
    /// Individual cells kept free
    pub forced_empty_cells: &'a [GridCoord],
    /// Height of the tile plane
    pub height: f64,
    /// Rotation applied beneath each tile's own yaw
    pub base_rotation: Rotator,
    /// World size of a cell
    pub cell_size: f64,
}

/// Result of one packing run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackingOutcome {
    /// Tiles in commit order
    pub placements: Vec<PlacedTile>,
    /// Counts by phase and size class
    pub stats: PackingStats,
}

/// Pool entry usable for one target size, with the rotations that produce it
struct Candidate<'a> {
    tile: &'a TileEntry,
    rotations: Vec<Rotation>,
}

/// Run all four phases against a surface
pub fn pack_tiles<S: PackingSurface>(
    surface: &mut S,
    request: &PackingRequest<'_>,
    selector: &mut RandomSelector,
) -> PackingOutcome {
    let mut outcome = PackingOutcome::default();
    let (width, height) = surface.dimensions();

    for cell in expand_forced_empty(
        request.forced_empty_regions,
        request.forced_empty_cells,
        width,
        height,
    ) {
        if surface.reserve(cell) {
            outcome.stats.reserved_cells += 1;
        }
    }

    place_forced(surface, request, &mut outcome);

    let passes = GREEDY_TARGET_SIZES
        .iter()
        .map(|&target| (target, PlacementSource::Greedy))
        .chain(
            GAP_FILL_SIZES
                .iter()
                .map(|&target| (target, PlacementSource::GapFill)),
        );
    for (target, source) in passes {
        fill_with_size(surface, request, target, source, selector, &mut outcome);
    }

    outcome
}

/// Union of forced-empty regions and cells, clamped to the grid
///
/// Region corners may be given in any order. Cells outside the grid are dropped.
pub fn expand_forced_empty(
    regions: &[CellRegion],
    cells: &[GridCoord],
    width: usize,
    height: usize,
) -> BTreeSet<GridCoord> {
    let mut expanded = BTreeSet::new();
    if width == 0 || height == 0 {
        return expanded;
    }
    let max_x = width as i32 - 1;
    let max_y = height as i32 - 1;

    for region in regions {
        let min_x = region.start.x.min(region.end.x).clamp(0, max_x);
        let min_y = region.start.y.min(region.end.y).clamp(0, max_y);
        let hi_x = region.start.x.max(region.end.x).clamp(0, max_x);
        let hi_y = region.start.y.max(region.end.y).clamp(0, max_y);
        for y in min_y..=hi_y {
            for x in min_x..=hi_x {
                expanded.insert(GridCoord::new(x, y));
            }
        }
    }

    expanded.extend(
        cells
            .iter()
            .filter(|cell| (0..=max_x).contains(&cell.x) && (0..=max_y).contains(&cell.y)),
    );
    expanded
}

fn place_forced<S: PackingSurface>(
    surface: &mut S,
    request: &PackingRequest<'_>,
    outcome: &mut PackingOutcome,
) {
    for forced in request.forced {
        if !forced.tile.mesh.is_set() {
            warn!(
                "Skipping forced tile at ({}, {}): no mesh assigned",
                forced.position.x, forced.position.y
            );
            outcome.stats.forced_skipped += 1;
            continue;
        }

        let fitting = forced.candidate_rotations().into_iter().find(|rotation| {
            surface.is_available(forced.position, rotation.apply(forced.tile.footprint))
        });

        match fitting {
            Some(rotation) => commit(
                surface,
                request,
                forced.position,
                &forced.tile,
                rotation,
                PlacementSource::Forced,
                outcome,
            ),
            None => {
                warn!(
                    "Skipping forced tile '{}' at ({}, {}): no rotation fits",
                    forced.tile.mesh.as_str(),
                    forced.position.x,
                    forced.position.y
                );
                outcome.stats.forced_skipped += 1;
            }
        }
    }
}

fn fill_with_size<S: PackingSurface>(
    surface: &mut S,
    request: &PackingRequest<'_>,
    target: Footprint,
    source: PlacementSource,
    selector: &mut RandomSelector,
    outcome: &mut PackingOutcome,
) {
    let candidates: Vec<Candidate<'_>> = request
        .pool
        .iter()
        .filter(|tile| tile.mesh.is_set())
        .filter_map(|tile| {
            let rotations: Vec<Rotation> = tile
                .effective_rotations()
                .into_iter()
                .filter(|rotation| rotation.apply(tile.footprint) == target)
                .collect();
            (!rotations.is_empty()).then_some(Candidate { tile, rotations })
        })
        .collect();

    if candidates.is_empty() {
        return;
    }

    let (width, height) = surface.dimensions();
    let mut placed = 0;
    for y in 0..height {
        for x in 0..width {
            let position = GridCoord::new(x as i32, y as i32);
            if !surface.is_available(position, target) {
                continue;
            }

            let Some(candidate) = selector.weighted_pick(&candidates, |c| c.tile.weight) else {
                continue;
            };
            let rotation = selector
                .choose(&candidate.rotations)
                .copied()
                .unwrap_or_default();

            commit(
                surface,
                request,
                position,
                candidate.tile,
                rotation,
                source,
                outcome,
            );
            placed += 1;
        }
    }

    debug!("Placed {placed} tiles of size {target} ({source:?})");
}

fn commit<S: PackingSurface>(
    surface: &mut S,
    request: &PackingRequest<'_>,
    position: GridCoord,
    tile: &TileEntry,
    rotation: Rotation,
    source: PlacementSource,
    outcome: &mut PackingOutcome,
) {
    let footprint = rotation.apply(tile.footprint);
    surface.occupy(position, footprint);

    let local = mesh_transform(
        position,
        footprint,
        rotation,
        request.height,
        request.cell_size,
    );
    let transform = Transform::new(local.location, request.base_rotation.combine(local.rotation));

    outcome.placements.push(PlacedTile {
        position,
        footprint,
        rotation,
        tile: tile.clone(),
        transform,
        source,
    });
    outcome.stats.record(footprint, source);
}
