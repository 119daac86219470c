//! Doorway layout planning with a fingerprinted layout cache
//!
//! A layout (edge, start cell, width, style) is the durable decision; the frame
//! and actor transforms are derived from it each time using the style's current
//! offsets. Layouts are cached so repeated generation keeps doorways where they
//! were while offsets are tuned. The cache remembers the grid dimensions, edge
//! lengths and default style it was built for and is discarded when any of them
//! change.

use log::{debug, warn};
use serde::Serialize;

use crate::algorithm::selection::RandomSelector;
use crate::io::configuration::{MAX_DOORWAY_EDGES, MIN_DOORWAY_EDGES};
use crate::io::error::{GenerationError, Result};
use crate::io::style::{DoorOffsets, DoorStyle, DoorwayConfig, DoorwayPlacement, ForcedDoorway, MeshRef};
use crate::spatial::edges::{Direction, RoomEdges, edge_face_position, is_contiguous};
use crate::spatial::geometry::{Rotator, Transform};
use crate::spatial::grid::GridCoord;

/// Durable doorway decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoorwayLayout {
    /// Edge the doorway is cut into
    pub edge: Direction,
    /// Index of the first boundary cell
    pub start_cell: usize,
    /// Boundary cells covered
    pub width: usize,
    /// Door style name
    pub style: String,
    /// Whether the doorway was placed automatically
    pub standard: bool,
    /// Offsets used instead of the style's for manual doorways
    pub manual_offsets: DoorOffsets,
}

impl DoorwayLayout {
    /// Whether another layout covers any of the same cells on the same edge
    pub fn overlaps(&self, other: &Self) -> bool {
        self.edge == other.edge
            && other.start_cell < self.start_cell.saturating_add(self.width)
            && self.start_cell < other.start_cell.saturating_add(other.width)
    }

    /// Boundary cells covered, if they still exist on the edge
    pub fn cells<'a>(&self, edges: &'a RoomEdges) -> Option<&'a [GridCoord]> {
        edges.span(self.edge, self.start_cell, self.width)
    }
}

/// Doorway with derived transforms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedDoorway {
    /// Layout the placement was derived from
    pub layout: DoorwayLayout,
    /// Frame mesh
    pub frame_mesh: MeshRef,
    /// Interactable door mesh
    pub actor_mesh: Option<MeshRef>,
    /// World transform of the frame
    pub frame_transform: Transform,
    /// World transform of the door actor
    pub actor_transform: Transform,
    /// Boundary cells the doorway opens
    pub cells: Vec<GridCoord>,
}

/// What a set of cached layouts was planned against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheFingerprint {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Edge lengths in `Direction::ALL` order
    pub edge_lengths: [usize; 4],
    /// Default door style name
    pub default_style: Option<String>,
}

impl CacheFingerprint {
    /// Fingerprint of the current room
    pub fn new(width: usize, height: usize, edges: &RoomEdges, config: &DoorwayConfig) -> Self {
        Self {
            width,
            height,
            edge_lengths: edges.lengths(),
            default_style: config.default_style.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct DoorwayCache {
    fingerprint: CacheFingerprint,
    layouts: Vec<DoorwayLayout>,
}

/// Plans doorway layouts and keeps them between calls
#[derive(Debug, Clone, Default)]
pub struct DoorwayPlanner {
    cache: Option<DoorwayCache>,
}

impl DoorwayPlanner {
    /// Planner with no cached layouts
    pub const fn new() -> Self {
        Self { cache: None }
    }

    /// Whether layouts are cached
    pub const fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Cached layouts, if any
    pub fn cached_layouts(&self) -> Option<&[DoorwayLayout]> {
        self.cache.as_ref().map(|cache| cache.layouts.as_slice())
    }

    /// Drop cached layouts so the next plan recomputes them
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Layouts for the room, reusing the cache when it still matches
    ///
    /// # Errors
    ///
    /// Returns `MissingStyle` when automatic doorways are requested without a
    /// defined default door style.
    pub fn plan(
        &mut self,
        fingerprint: CacheFingerprint,
        edges: &RoomEdges,
        config: &DoorwayConfig,
        forced: &[ForcedDoorway],
        selector: &mut RandomSelector,
    ) -> Result<Vec<DoorwayLayout>> {
        if let Some(cache) = &self.cache {
            if cache_is_valid(cache, &fingerprint, edges, config) {
                debug!("Reusing {} cached doorway layouts", cache.layouts.len());
                return Ok(cache.layouts.clone());
            }
            warn!("Cached doorway layouts no longer match the room, replanning");
        }

        let layouts = compute_layouts(edges, config, forced, selector)?;
        self.cache = Some(DoorwayCache {
            fingerprint,
            layouts: layouts.clone(),
        });
        Ok(layouts)
    }
}

fn cache_is_valid(
    cache: &DoorwayCache,
    fingerprint: &CacheFingerprint,
    edges: &RoomEdges,
    config: &DoorwayConfig,
) -> bool {
    cache.fingerprint == *fingerprint
        && cache
            .layouts
            .iter()
            .all(|layout| layout.cells(edges).is_some() && config.style(&layout.style).is_some())
}

fn compute_layouts(
    edges: &RoomEdges,
    config: &DoorwayConfig,
    forced: &[ForcedDoorway],
    selector: &mut RandomSelector,
) -> Result<Vec<DoorwayLayout>> {
    let mut layouts: Vec<DoorwayLayout> = Vec::new();

    for doorway in forced {
        let style = match doorway.style.as_deref() {
            Some(name) => config.style(name),
            None => config.default_door(),
        };
        let Some(style) = style else {
            warn!(
                "Skipping manual doorway on {} edge: door style not found",
                doorway.edge
            );
            continue;
        };

        let layout = DoorwayLayout {
            edge: doorway.edge,
            start_cell: doorway.start_cell,
            width: style.total_width(),
            style: style.name.clone(),
            standard: false,
            manual_offsets: doorway.offsets,
        };
        if layout.cells(edges).is_none() {
            warn!(
                "Skipping manual doorway on {} edge: cells {}..{} exceed edge length {}",
                layout.edge,
                layout.start_cell,
                layout.start_cell.saturating_add(layout.width),
                edges.len(layout.edge)
            );
            continue;
        }
        if layouts.iter().any(|existing| existing.overlaps(&layout)) {
            warn!(
                "Skipping manual doorway on {} edge at cell {}: overlaps another doorway",
                layout.edge, layout.start_cell
            );
            continue;
        }
        layouts.push(layout);
    }

    let Some(placement) = config.standard else {
        return Ok(layouts);
    };
    let style = config.default_door().ok_or(GenerationError::MissingStyle {
        style: "default door style",
    })?;

    for edge in standard_edges(placement, selector) {
        match centered_layout(edge, edges, style) {
            Some(layout) if layouts.iter().any(|existing| existing.overlaps(&layout)) => {
                debug!("Standard doorway on {edge} edge overlaps an existing doorway");
            }
            Some(layout) => layouts.push(layout),
            None => debug!("No room for a standard doorway on {edge} edge"),
        }
    }

    Ok(layouts)
}

fn standard_edges(placement: DoorwayPlacement, selector: &mut RandomSelector) -> Vec<Direction> {
    match placement {
        DoorwayPlacement::Edge { edge } => vec![edge],
        DoorwayPlacement::RandomEdge => selector.choose(&Direction::ALL).copied().into_iter().collect(),
        DoorwayPlacement::RandomEdges { count } => {
            let mut shuffled = Direction::ALL;
            selector.shuffle(&mut shuffled);
            let count = count.clamp(MIN_DOORWAY_EDGES, MAX_DOORWAY_EDGES);
            shuffled.into_iter().take(count).collect()
        }
    }
}

// Centred on the edge; irregular edges fall back to the nearest straight window
fn centered_layout(edge: Direction, edges: &RoomEdges, style: &DoorStyle) -> Option<DoorwayLayout> {
    let width = style.total_width();
    let length = edges.len(edge);
    let last_start = length.checked_sub(width)?;
    let centre = last_start / 2;

    let mut starts: Vec<usize> = (0..=last_start).collect();
    starts.sort_by_key(|&start| (start.abs_diff(centre), start));

    starts
        .into_iter()
        .find(|&start| {
            edges
                .span(edge, start, width)
                .is_some_and(|run| is_contiguous(run, edge))
        })
        .map(|start_cell| DoorwayLayout {
            edge,
            start_cell,
            width,
            style: style.name.clone(),
            standard: true,
            manual_offsets: DoorOffsets::default(),
        })
}

/// Derive frame and actor transforms for a layout
///
/// Returns `None` when the layout's cells no longer exist on the edge.
pub fn derive_placement(
    layout: &DoorwayLayout,
    style: &DoorStyle,
    edges: &RoomEdges,
    cell_size: f64,
) -> Option<PlacedDoorway> {
    let cells = layout.cells(edges)?;
    let first = *cells.first()?;
    let base = edge_face_position(layout.edge, first, layout.width, cell_size, 0.0);

    let offsets = if layout.standard {
        style.offsets.get(layout.edge)
    } else {
        layout.manual_offsets
    };
    let rotation = Rotator::from_yaw(layout.edge.wall_yaw()).combine(style.rotation_offset);

    Some(PlacedDoorway {
        layout: layout.clone(),
        frame_mesh: style.frame_mesh.clone(),
        actor_mesh: style.actor_mesh.clone(),
        frame_transform: Transform::new(base + offsets.frame, rotation),
        actor_transform: Transform::new(base + offsets.actor, rotation),
        cells: cells.to_vec(),
    })
}
