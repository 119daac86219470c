//! Room style data model loaded from JSON
//!
//! A [`RoomConfig`] bundles everything a generator consumes: tile pools, wall
//! modules, door styles, designer overrides and the random seed. Mesh
//! references are opaque names that are only ever tested for being set.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::io::configuration::{
    DEFAULT_CEILING_HEIGHT, DEFAULT_CELL_SIZE, DEFAULT_WALL_HEIGHT, MAX_GRID_DIMENSION,
};
use crate::io::error::{GenerationError, Result, file_system_error, invalid_parameter};
use crate::spatial::edges::Direction;
use crate::spatial::geometry::{Footprint, Rotation, Rotator, Transform, Vec3};
use crate::spatial::grid::GridCoord;
use crate::spatial::shape::RoomShape;

/// Opaque handle to a mesh asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshRef(String);

impl MeshRef {
    /// Reference a mesh by name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Whether a mesh is assigned
    pub fn is_set(&self) -> bool {
        !self.0.trim().is_empty()
    }

    /// Asset name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Floor or ceiling tile in a weighted pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileEntry {
    /// Mesh to spawn
    pub mesh: MeshRef,
    /// Unrotated footprint in cells
    pub footprint: Footprint,
    /// Rotations the tile may be placed with, empty meaning only 0°
    pub allowed_rotations: Vec<Rotation>,
    /// Relative selection weight
    pub weight: f64,
}

impl Default for TileEntry {
    fn default() -> Self {
        Self {
            mesh: MeshRef::default(),
            footprint: Footprint::default(),
            allowed_rotations: Vec::new(),
            weight: 1.0,
        }
    }
}

impl TileEntry {
    /// Create a tile entry with no rotation freedom
    pub fn new(mesh: impl Into<String>, footprint: Footprint, weight: f64) -> Self {
        Self {
            mesh: MeshRef::new(mesh),
            footprint,
            allowed_rotations: Vec::new(),
            weight,
        }
    }

    /// Builder-style rotation list
    #[must_use]
    pub fn with_rotations(mut self, rotations: &[Rotation]) -> Self {
        self.allowed_rotations = rotations.to_vec();
        self
    }

    /// Declared rotations, or 0° alone when none are declared
    pub fn effective_rotations(&self) -> Vec<Rotation> {
        if self.allowed_rotations.is_empty() {
            vec![Rotation::Deg0]
        } else {
            self.allowed_rotations.clone()
        }
    }
}

/// Tile placed at an exact position ahead of greedy filling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForcedTile {
    /// Minimum corner of the placement
    pub position: GridCoord,
    /// Tile to place
    pub tile: TileEntry,
    /// Rotations to try in order, overriding the tile's own list
    #[serde(default)]
    pub rotations: Vec<Rotation>,
}

impl ForcedTile {
    /// Rotations to try: the override, then the tile's list, then 0°
    pub fn candidate_rotations(&self) -> Vec<Rotation> {
        if self.rotations.is_empty() {
            self.tile.effective_rotations()
        } else {
            self.rotations.clone()
        }
    }
}

/// Rectangle of cells kept free of tiles, corners in any order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRegion {
    /// One corner (inclusive)
    pub start: GridCoord,
    /// Opposite corner (inclusive)
    pub end: GridCoord,
}

/// Floor tile pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorStyle {
    /// Weighted tiles
    pub tile_pool: Vec<TileEntry>,
}

/// Ceiling tile pool and plane placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CeilingStyle {
    /// Weighted tiles
    pub tile_pool: Vec<TileEntry>,
    /// Height of the ceiling plane
    pub height: f64,
    /// Rotation applied to every ceiling tile before its own yaw
    pub rotation: Rotator,
}

impl Default for CeilingStyle {
    fn default() -> Self {
        Self {
            tile_pool: Vec::new(),
            height: DEFAULT_CEILING_HEIGHT,
            rotation: Rotator::ZERO,
        }
    }
}

/// One mesh layer of a wall module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerMesh {
    /// Mesh to spawn
    pub mesh: MeshRef,
    /// Where the next layer up attaches, relative to this layer
    pub top_attachment: Option<Transform>,
}

impl LayerMesh {
    /// Layer without an attachment point
    pub fn new(mesh: impl Into<String>) -> Self {
        Self {
            mesh: MeshRef::new(mesh),
            top_attachment: None,
        }
    }
}

/// Wall module spanning one or more boundary cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallModule {
    /// Cells covered along the edge
    pub footprint: usize,
    /// Ground layer
    pub base: LayerMesh,
    /// First stacked layer
    pub middle1: Option<LayerMesh>,
    /// Second stacked layer, used only above `middle1`
    pub middle2: Option<LayerMesh>,
    /// Cap layer
    pub top: Option<LayerMesh>,
    /// Relative selection weight among equally wide modules
    pub weight: f64,
}

impl Default for WallModule {
    fn default() -> Self {
        Self {
            footprint: 1,
            base: LayerMesh::default(),
            middle1: None,
            middle2: None,
            top: None,
            weight: 1.0,
        }
    }
}

impl WallModule {
    /// Single-layer module
    pub fn new(base: impl Into<String>, footprint: usize) -> Self {
        Self {
            footprint,
            base: LayerMesh::new(base),
            ..Self::default()
        }
    }
}

/// Per-edge scalar offsets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeOffsets {
    /// North edge
    pub north: f64,
    /// South edge
    pub south: f64,
    /// East edge
    pub east: f64,
    /// West edge
    pub west: f64,
}

impl EdgeOffsets {
    /// Offset of one edge
    pub const fn get(&self, edge: Direction) -> f64 {
        match edge {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }
}

/// Rotation and offset of one rectangle corner piece
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerPlacement {
    /// Orientation of the corner mesh
    pub rotation: Rotator,
    /// Offset from the geometric corner
    pub offset: Vec3,
}

impl CornerPlacement {
    const fn yawed(yaw: f64) -> Self {
        Self {
            rotation: Rotator::from_yaw(yaw),
            offset: Vec3::ZERO,
        }
    }
}

/// Placement of each rectangle corner piece
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerSettings {
    /// Corner at `(0, 0)`
    pub south_west: CornerPlacement,
    /// Corner at `(0, H)`
    pub south_east: CornerPlacement,
    /// Corner at `(W, H)`
    pub north_east: CornerPlacement,
    /// Corner at `(W, 0)`
    pub north_west: CornerPlacement,
}

impl Default for CornerSettings {
    fn default() -> Self {
        Self {
            south_west: CornerPlacement::yawed(0.0),
            south_east: CornerPlacement::yawed(270.0),
            north_east: CornerPlacement::yawed(180.0),
            north_west: CornerPlacement::yawed(90.0),
        }
    }
}

/// Wall modules and the pieces that trim them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallStyle {
    /// Modules available to the greedy pass
    pub modules: Vec<WallModule>,
    /// Vertical offset between layers lacking an attachment point
    pub wall_height: f64,
    /// Offset of each edge's wall line along its normal axis
    pub edge_offsets: EdgeOffsets,
    /// Corner piece, absent meaning no corners
    pub corner_mesh: Option<MeshRef>,
    /// Placement of the four rectangle corners
    pub corners: CornerSettings,
}

impl Default for WallStyle {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
            wall_height: DEFAULT_WALL_HEIGHT,
            edge_offsets: EdgeOffsets::default(),
            corner_mesh: None,
            corners: CornerSettings::default(),
        }
    }
}

/// Wall module pinned to an edge position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForcedWall {
    /// Edge to place on
    pub edge: Direction,
    /// Index of the first boundary cell
    pub start_cell: usize,
    /// Module to place
    pub module: WallModule,
}

/// Frame and actor offsets of a doorway
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorOffsets {
    /// Offset of the door frame
    pub frame: Vec3,
    /// Offset of the door actor
    pub actor: Vec3,
}

/// Door offsets for each edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorEdgeOffsets {
    /// North edge
    pub north: DoorOffsets,
    /// South edge
    pub south: DoorOffsets,
    /// East edge
    pub east: DoorOffsets,
    /// West edge
    pub west: DoorOffsets,
}

impl DoorEdgeOffsets {
    /// Offsets of one edge
    pub const fn get(&self, edge: Direction) -> DoorOffsets {
        match edge {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }
}

/// Named door style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorStyle {
    /// Style name referenced by layouts
    pub name: String,
    /// Frame mesh
    pub frame_mesh: MeshRef,
    /// Interactable door mesh
    pub actor_mesh: Option<MeshRef>,
    /// Cells covered by the frame
    pub frame_footprint: usize,
    /// Filler cells on each side of the frame
    pub side_fill_cells: usize,
    /// Per-edge offsets
    pub offsets: DoorEdgeOffsets,
    /// Rotation added to the edge yaw
    pub rotation_offset: Rotator,
}

impl Default for DoorStyle {
    fn default() -> Self {
        Self {
            name: String::new(),
            frame_mesh: MeshRef::default(),
            actor_mesh: None,
            frame_footprint: 1,
            side_fill_cells: 0,
            offsets: DoorEdgeOffsets::default(),
            rotation_offset: Rotator::ZERO,
        }
    }
}

impl DoorStyle {
    /// Style with a frame and no side fill
    pub fn new(name: impl Into<String>, frame_mesh: impl Into<String>, footprint: usize) -> Self {
        Self {
            name: name.into(),
            frame_mesh: MeshRef::new(frame_mesh),
            frame_footprint: footprint,
            ..Self::default()
        }
    }

    /// Doorway width in cells, frame plus both side fills
    pub const fn total_width(&self) -> usize {
        self.frame_footprint
            .saturating_add(self.side_fill_cells.saturating_mul(2))
    }
}

/// Edges that receive the automatic doorway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DoorwayPlacement {
    /// One edge chosen at random
    RandomEdge,
    /// One fixed edge
    Edge {
        /// Edge to use
        edge: Direction,
    },
    /// Several distinct random edges, clamped to 2..=4
    RandomEdges {
        /// Number of edges
        count: usize,
    },
}

/// Door styles and automatic doorway settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorwayConfig {
    /// Available door styles
    pub styles: Vec<DoorStyle>,
    /// Style used by automatic doorways and manual ones that name none
    pub default_style: Option<String>,
    /// Automatic doorway placement, absent meaning manual doorways only
    pub standard: Option<DoorwayPlacement>,
}

impl DoorwayConfig {
    /// Look up a style by name
    pub fn style(&self, name: &str) -> Option<&DoorStyle> {
        self.styles.iter().find(|style| style.name == name)
    }

    /// The default style, if one is named and defined
    pub fn default_door(&self) -> Option<&DoorStyle> {
        self.default_style.as_deref().and_then(|name| self.style(name))
    }
}

/// Doorway pinned to an edge position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForcedDoorway {
    /// Edge to place on
    pub edge: Direction,
    /// Index of the first boundary cell
    pub start_cell: usize,
    /// Door style name, the default style when absent
    #[serde(default)]
    pub style: Option<String>,
    /// Offsets used instead of the style's per-edge offsets
    #[serde(default)]
    pub offsets: DoorOffsets,
}

/// Complete description of one room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Display name
    pub name: String,
    /// World-space side length of a cell
    pub cell_size: f64,
    /// Seed for deterministic generation, random when absent
    pub seed: Option<u64>,
    /// Shape strategy
    pub shape: RoomShape,
    /// Floor tiles
    pub floor: Option<FloorStyle>,
    /// Ceiling tiles
    pub ceiling: Option<CeilingStyle>,
    /// Walls and corners
    pub walls: Option<WallStyle>,
    /// Doors
    pub doorways: DoorwayConfig,
    /// Floor tiles placed before greedy filling
    pub forced_floor: Vec<ForcedTile>,
    /// Rectangles kept free of floor tiles
    pub forced_empty_regions: Vec<CellRegion>,
    /// Individual cells kept free of floor tiles
    pub forced_empty_cells: Vec<GridCoord>,
    /// Ceiling tiles placed before greedy filling
    pub forced_ceiling: Vec<ForcedTile>,
    /// Walls placed before greedy filling
    pub forced_walls: Vec<ForcedWall>,
    /// Doorways placed before automatic ones
    pub forced_doorways: Vec<ForcedDoorway>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            cell_size: DEFAULT_CELL_SIZE,
            seed: None,
            shape: RoomShape::Uniform,
            floor: None,
            ceiling: None,
            walls: None,
            doorways: DoorwayConfig::default(),
            forced_floor: Vec::new(),
            forced_empty_regions: Vec::new(),
            forced_empty_cells: Vec::new(),
            forced_ceiling: Vec::new(),
            forced_walls: Vec::new(),
            forced_doorways: Vec::new(),
        }
    }
}

impl RoomConfig {
    /// Load a room style from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is not valid JSON for
    /// this model, or fails validation.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| file_system_error(path, "open style", e))?;
        let config: Self = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            GenerationError::StyleLoad {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check parameters that would make generation meaningless
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending value.
    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(invalid_parameter(
                "cell_size",
                &self.cell_size,
                &"must be a positive finite number",
            ));
        }

        self.shape.validate()?;

        let floor_tiles = self.floor.iter().flat_map(|style| &style.tile_pool);
        let ceiling_tiles = self.ceiling.iter().flat_map(|style| &style.tile_pool);
        let forced_tiles = self
            .forced_floor
            .iter()
            .chain(&self.forced_ceiling)
            .map(|forced| &forced.tile);
        for tile in floor_tiles.chain(ceiling_tiles).chain(forced_tiles) {
            validate_tile(tile)?;
        }

        let modules = self.walls.iter().flat_map(|style| &style.modules);
        let forced_modules = self.forced_walls.iter().map(|forced| &forced.module);
        for module in modules.chain(forced_modules) {
            if module.footprint == 0 || module.footprint > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    "wall_module.footprint",
                    &module.footprint,
                    &"must cover at least one cell",
                ));
            }
            validate_weight("wall_module.weight", module.weight)?;
        }

        for style in &self.doorways.styles {
            if style.frame_footprint == 0 || style.total_width() > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    "door_style.frame_footprint",
                    &style.name,
                    &format!("door must cover between 1 and {MAX_GRID_DIMENSION} cells"),
                ));
            }
        }

        Ok(())
    }
}

fn validate_tile(tile: &TileEntry) -> Result<()> {
    let in_range = |side: usize| (1..=MAX_GRID_DIMENSION).contains(&side);
    if !(in_range(tile.footprint.width) && in_range(tile.footprint.height)) {
        return Err(invalid_parameter(
            "tile.footprint",
            &tile.footprint,
            &format!("both dimensions must be between 1 and {MAX_GRID_DIMENSION} cells"),
        ));
    }
    validate_weight("tile.weight", tile.weight)
}

fn validate_weight(parameter: &'static str, weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            &weight,
            &"weights must be finite and non-negative",
        ))
    }
}
