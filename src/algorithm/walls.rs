//! Wall module packing along room edges and vertical layer stacking
//!
//! Each edge is packed left to right over its ordered boundary cells. Forced
//! walls go first and become exclusion ranges; the greedy pass then takes the
//! widest module that fits at each offset. Committed segments grow middle and
//! top layers by chaining attachment points upward.

use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::algorithm::selection::RandomSelector;
use crate::analysis::statistics::WallStats;
use crate::io::style::{ForcedWall, LayerMesh, WallModule, WallStyle};
use crate::spatial::edges::{Direction, RoomEdges, edge_face_position, is_contiguous};
use crate::spatial::geometry::{Rotator, Transform, Vec3};
use crate::spatial::grid::GridCoord;

/// Base wall module committed to a run of boundary cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallSegment {
    /// Edge the segment lies on
    pub edge: Direction,
    /// Index of the first covered boundary cell
    pub start_cell: usize,
    /// Number of covered boundary cells
    pub span: usize,
    /// Covered boundary cells
    pub cells: Vec<GridCoord>,
    /// Module placed
    pub module: WallModule,
    /// World transform of the base layer
    pub base_transform: Transform,
    /// Whether the segment came from a forced wall
    pub forced: bool,
}

impl WallSegment {
    /// Whether this segment's index range overlaps another range on the same edge
    pub fn overlaps(&self, edge: Direction, start: usize, span: usize) -> bool {
        self.edge == edge && ranges_overlap(self.start_cell, self.span, start, span)
    }
}

/// Wall segment with the transforms of its stacked layers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWall {
    /// Base segment
    pub segment: WallSegment,
    /// First middle layer
    pub middle1: Option<Transform>,
    /// Second middle layer
    pub middle2: Option<Transform>,
    /// Cap layer
    pub top: Option<Transform>,
}

/// Result of packing every edge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallOutcome {
    /// Segments in commit order, forced walls first
    pub segments: Vec<WallSegment>,
    /// Counts by phase
    pub stats: WallStats,
}

/// Whether half-open ranges `[a, a + a_len)` and `[b, b + b_len)` intersect
pub const fn ranges_overlap(a: usize, a_len: usize, b: usize, b_len: usize) -> bool {
    a < b.saturating_add(b_len) && b < a.saturating_add(a_len)
}

/// Pack forced walls, then greedily fill every edge
pub fn pack_walls(
    edges: &RoomEdges,
    doorway_cells: &BTreeSet<GridCoord>,
    forced: &[ForcedWall],
    style: &WallStyle,
    cell_size: f64,
    selector: &mut RandomSelector,
) -> WallOutcome {
    let mut outcome = WallOutcome::default();

    for wall in forced {
        let edge_length = edges.len(wall.edge);
        let Some(cells) = edges.span(wall.edge, wall.start_cell, wall.module.footprint) else {
            warn!(
                "Skipping forced wall on {} edge: cells {}..{} exceed edge length {edge_length}",
                wall.edge,
                wall.start_cell,
                wall.start_cell.saturating_add(wall.module.footprint)
            );
            outcome.stats.forced_skipped += 1;
            continue;
        };
        if outcome
            .segments
            .iter()
            .any(|segment| segment.overlaps(wall.edge, wall.start_cell, wall.module.footprint))
        {
            warn!(
                "Skipping forced wall on {} edge at cell {}: overlaps an earlier forced wall",
                wall.edge, wall.start_cell
            );
            outcome.stats.forced_skipped += 1;
            continue;
        }

        outcome.segments.push(build_segment(
            wall.edge,
            wall.start_cell,
            cells,
            &wall.module,
            style,
            cell_size,
            true,
        ));
        outcome.stats.forced_placed += 1;
    }

    for edge in Direction::ALL {
        fill_edge(edge, edges, doorway_cells, style, cell_size, selector, &mut outcome);
    }

    outcome
}

fn fill_edge(
    edge: Direction,
    edges: &RoomEdges,
    doorway_cells: &BTreeSet<GridCoord>,
    style: &WallStyle,
    cell_size: f64,
    selector: &mut RandomSelector,
    outcome: &mut WallOutcome,
) {
    let cells = edges.cells(edge);
    let forced_ranges: Vec<(usize, usize)> = outcome
        .segments
        .iter()
        .filter(|segment| segment.forced && segment.edge == edge)
        .map(|segment| (segment.start_cell, segment.span))
        .collect();
    let in_forced = |start: usize, span: usize| {
        forced_ranges
            .iter()
            .any(|&(s, l)| ranges_overlap(start, span, s, l))
    };

    let mut index = 0;
    while let Some(cell) = cells.get(index) {
        if doorway_cells.contains(cell) {
            outcome.stats.doorway_cells += 1;
            index += 1;
            continue;
        }
        if in_forced(index, 1) {
            index += 1;
            continue;
        }

        let remaining = cells.len() - index;
        let fitting: Vec<&WallModule> = style
            .modules
            .iter()
            .filter(|module| module.base.mesh.is_set())
            .filter(|module| module.footprint > 0 && module.footprint <= remaining)
            .filter(|module| !in_forced(index, module.footprint))
            .filter(|module| {
                edges.span(edge, index, module.footprint).is_some_and(|run| {
                    is_contiguous(run, edge) && !run.iter().any(|c| doorway_cells.contains(c))
                })
            })
            .collect();

        let widest = fitting.iter().map(|module| module.footprint).max();
        let Some(widest) = widest else {
            debug!("No wall module fits {edge} edge at cell {index}");
            outcome.stats.gap_cells += 1;
            index += 1;
            continue;
        };
        let ties: Vec<&WallModule> = fitting
            .into_iter()
            .filter(|module| module.footprint == widest)
            .collect();
        let Some(module) = selector.weighted_pick(&ties, |module| module.weight).copied() else {
            index += 1;
            continue;
        };

        if let Some(run) = edges.span(edge, index, module.footprint) {
            outcome
                .segments
                .push(build_segment(edge, index, run, module, style, cell_size, false));
            outcome.stats.greedy_placed += 1;
        }
        index += module.footprint;
    }
}

fn build_segment(
    edge: Direction,
    start_cell: usize,
    cells: &[GridCoord],
    module: &WallModule,
    style: &WallStyle,
    cell_size: f64,
    forced: bool,
) -> WallSegment {
    let first = cells.first().copied().unwrap_or_default();
    let location = edge_face_position(
        edge,
        first,
        cells.len(),
        cell_size,
        style.edge_offsets.get(edge),
    );

    WallSegment {
        edge,
        start_cell,
        span: cells.len(),
        cells: cells.to_vec(),
        module: module.clone(),
        base_transform: Transform::new(location, Rotator::from_yaw(edge.wall_yaw())),
        forced,
    }
}

// Transform of the layer resting on `below`, placed at `below_transform`
fn layer_above(below_transform: &Transform, below: &LayerMesh, fallback_height: f64) -> Transform {
    let attachment = below
        .top_attachment
        .unwrap_or_else(|| Transform::from_location(Vec3::new(0.0, 0.0, fallback_height)));
    below_transform.child(&attachment)
}

/// Derive the middle and top layer transforms of a segment
///
/// Middle-1 rests on the base, middle-2 only on an existing middle-1, and the
/// top on the highest layer present. Layers without a mesh are not stacked.
pub fn stack_layers(segment: WallSegment, fallback_height: f64) -> PlacedWall {
    let module = &segment.module;
    let base = segment.base_transform;

    let middle1 = module
        .middle1
        .as_ref()
        .filter(|layer| layer.mesh.is_set())
        .map(|layer| (layer, layer_above(&base, &module.base, fallback_height)));
    let middle2 = middle1.and_then(|(below, below_transform)| {
        module
            .middle2
            .as_ref()
            .filter(|layer| layer.mesh.is_set())
            .map(|layer| (layer, layer_above(&below_transform, below, fallback_height)))
    });

    let top = module.top.as_ref().filter(|layer| layer.mesh.is_set()).map(|_| {
        let (support, support_transform) = middle2
            .or(middle1)
            .unwrap_or((&module.base, base));
        layer_above(&support_transform, support, fallback_height)
    });

    let middle1 = middle1.map(|(_, transform)| transform);
    let middle2 = middle2.map(|(_, transform)| transform);

    PlacedWall {
        segment,
        middle1,
        middle2,
        top,
    }
}
