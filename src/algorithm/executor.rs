//! Room generator orchestrating every placement phase
//!
//! A [`RoomGenerator`] owns the occupancy grid, the ceiling grid and every
//! placement list. Phases are independently re-invocable and clearable; the
//! usual order is shape, floor, corners, doorways, walls, ceiling and finally
//! topology. Corners go before walls because interior corners claim boundary
//! cells the wall packer must skip.

use log::{debug, info};
use std::collections::BTreeSet;
use std::fmt;

use crate::algorithm::ceiling::CeilingGrid;
use crate::algorithm::corners::{PlacedCorner, interior_corners, rectangle_corners};
use crate::algorithm::doorways::{
    CacheFingerprint, DoorwayLayout, DoorwayPlanner, PlacedDoorway, derive_placement,
};
use crate::algorithm::packing::{FloorSurface, PackingRequest, PlacedTile, pack_tiles};
use crate::algorithm::selection::RandomSelector;
use crate::algorithm::walls::{PlacedWall, pack_walls, stack_layers};
use crate::analysis::statistics::{PackingStats, RoomStatistics, WallStats};
use crate::analysis::topology::TopologyMap;
use crate::io::configuration::DEFAULT_CELL_SIZE;
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::io::style::RoomConfig;
use crate::spatial::edges::RoomEdges;
use crate::spatial::geometry::{Footprint, Rotator, Vec3, grid_to_local, local_to_grid, rect_cells};
use crate::spatial::grid::{CellType, GridCoord, OccupancyGrid};
use crate::spatial::shape::{RoomShape, ShapeOutcome};

/// One step of a full generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationPhase {
    /// Build the grid from the room shape
    Shape,
    /// Pack floor tiles
    Floor,
    /// Place corner pieces
    Corners,
    /// Plan and place doorways
    Doorways,
    /// Pack and stack walls
    Walls,
    /// Pack ceiling tiles
    Ceiling,
    /// Classify room cells
    Topology,
}

impl GenerationPhase {
    /// Phases in execution order
    pub const ALL: [Self; 7] = [
        Self::Shape,
        Self::Floor,
        Self::Corners,
        Self::Doorways,
        Self::Walls,
        Self::Ceiling,
        Self::Topology,
    ];

    /// Short lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Floor => "floor",
            Self::Corners => "corners",
            Self::Doorways => "doorways",
            Self::Walls => "walls",
            Self::Ceiling => "ceiling",
            Self::Topology => "topology",
        }
    }
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owns a room's grid and every placement made into it
#[derive(Debug, Clone)]
pub struct RoomGenerator {
    config: Option<RoomConfig>,
    grid_size: (usize, usize),
    shape: Option<ShapeOutcome>,
    ceiling_grid: Option<CeilingGrid>,
    selector: RandomSelector,

    floor_tiles: Vec<PlacedTile>,
    floor_stats: PackingStats,
    ceiling_tiles: Vec<PlacedTile>,
    ceiling_stats: PackingStats,
    walls: Vec<PlacedWall>,
    wall_stats: WallStats,
    corners: Vec<PlacedCorner>,
    claimed_corner_cells: BTreeSet<GridCoord>,

    doorway_planner: DoorwayPlanner,
    doorways: Vec<PlacedDoorway>,
    doorway_cells: BTreeSet<GridCoord>,

    topology: Option<TopologyMap>,
}

impl Default for RoomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomGenerator {
    /// Uninitialized generator
    pub fn new() -> Self {
        Self {
            config: None,
            grid_size: (0, 0),
            shape: None,
            ceiling_grid: None,
            selector: RandomSelector::new(0),
            floor_tiles: Vec::new(),
            floor_stats: PackingStats::default(),
            ceiling_tiles: Vec::new(),
            ceiling_stats: PackingStats::default(),
            walls: Vec::new(),
            wall_stats: WallStats::default(),
            corners: Vec::new(),
            claimed_corner_cells: BTreeSet::new(),
            doorway_planner: DoorwayPlanner::new(),
            doorways: Vec::new(),
            doorway_cells: BTreeSet::new(),
            topology: None,
        }
    }

    /// Bind a room configuration and grid size
    ///
    /// Any previous grid, placements and doorway cache are discarded.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the configuration fails validation or
    /// a dimension is zero. The generator is left unchanged on failure.
    pub fn initialize(&mut self, config: RoomConfig, width: usize, height: usize) -> Result<()> {
        config.validate()?;
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "grid_size",
                &format!("{width}x{height}"),
                &"both dimensions must be at least 1",
            ));
        }

        info!(
            "Initialized room '{}' at {width}x{height} cells",
            config.name
        );
        self.config = Some(config);
        self.grid_size = (width, height);
        self.clear_grid();
        Ok(())
    }

    /// Replace the bound configuration, keeping the grid size and placements
    ///
    /// Cached doorway layouts are kept and revalidated against their
    /// fingerprint on the next doorway run, so style offsets can be tuned
    /// without moving doorways. A changed room shape discards the grid and
    /// placements.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` before `initialize`, or `InvalidParameter` when
    /// the configuration fails validation. The generator is left unchanged on
    /// failure.
    pub fn update_config(&mut self, config: RoomConfig) -> Result<()> {
        let current = self.require_config("update_config")?;
        config.validate()?;

        if current.shape != config.shape {
            debug!("Room shape changed, discarding the grid");
            self.clear_placements();
            self.shape = None;
        }
        self.config = Some(config);
        self.topology = None;
        Ok(())
    }

    /// Whether a configuration is bound
    pub const fn is_initialized(&self) -> bool {
        self.config.is_some()
    }

    /// Bound configuration
    pub const fn config(&self) -> Option<&RoomConfig> {
        self.config.as_ref()
    }

    /// Requested grid size as `(width, height)`
    pub const fn grid_size(&self) -> (usize, usize) {
        self.grid_size
    }

    /// World size of a cell
    pub fn cell_size(&self) -> f64 {
        self.config
            .as_ref()
            .map_or(DEFAULT_CELL_SIZE, |config| config.cell_size)
    }

    fn require_config(&self, operation: &'static str) -> Result<&RoomConfig> {
        self.config
            .as_ref()
            .ok_or(GenerationError::NotInitialized { operation })
    }

    fn require_grid(&self, operation: &'static str) -> Result<&OccupancyGrid> {
        self.require_config(operation)?;
        self.shape
            .as_ref()
            .map(|shape| &shape.grid)
            .ok_or(GenerationError::GridNotCreated { operation })
    }

    /// Build the grid from the configured shape
    ///
    /// The random stream is re-seeded from the configured seed, so a fixed
    /// seed and call sequence reproduce the same room. Previous placements are
    /// discarded; the doorway cache is kept and revalidated on next use.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` before `initialize`, and `GridTooSmall` or
    /// `InvalidParameter` when the shape rejects the grid size. Prior state is
    /// kept on failure.
    pub fn create_grid(&mut self) -> Result<()> {
        let config = self.require_config("create_grid")?;
        let (width, height) = self.grid_size;

        let mut selector = RandomSelector::from_seed_option(config.seed);
        let outcome = config.shape.create_grid(width, height, &mut selector)?;
        info!(
            "Created {width}x{height} grid with {} room cells ({} protrusions kept, {} discarded)",
            outcome.grid.room_cell_count(),
            outcome.protrusions_kept,
            outcome.protrusions_discarded
        );

        self.clear_placements();
        self.selector = selector;
        self.shape = Some(outcome);
        Ok(())
    }

    /// Pack the floor
    ///
    /// Previous floor tiles are cleared first. Returns the number of tiles
    /// placed.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized`, `GridNotCreated`, `MissingStyle` without a
    /// floor style, or `EmptyPool` when the floor pool is empty. Nothing is
    /// changed on failure.
    pub fn generate_floor(&mut self) -> Result<usize> {
        self.require_grid("generate_floor")?;
        let Some(config) = self.config.as_ref() else {
            return Err(GenerationError::NotInitialized {
                operation: "generate_floor",
            });
        };
        let floor = config
            .floor
            .as_ref()
            .ok_or(GenerationError::MissingStyle { style: "floor" })?;
        if floor.tile_pool.is_empty() {
            return Err(GenerationError::EmptyPool {
                pool: "floor tile pool",
            });
        }

        let Some(shape) = self.shape.as_mut() else {
            return Err(GenerationError::GridNotCreated {
                operation: "generate_floor",
            });
        };
        let fillable = config.shape.fillable();
        shape.grid.reset_cells(CellType::FloorMesh, fillable);
        shape.grid.reset_cells(CellType::Reserved, fillable);

        let request = PackingRequest {
            pool: &floor.tile_pool,
            forced: &config.forced_floor,
            forced_empty_regions: &config.forced_empty_regions,
            forced_empty_cells: &config.forced_empty_cells,
            height: 0.0,
            base_rotation: Rotator::ZERO,
            cell_size: config.cell_size,
        };
        let mut surface = FloorSurface::new(&mut shape.grid, fillable);
        let outcome = pack_tiles(&mut surface, &request, &mut self.selector);

        log_packing("floor", &outcome.stats);
        self.floor_tiles = outcome.placements;
        self.floor_stats = outcome.stats;
        self.topology = None;
        Ok(self.floor_stats.total_placed())
    }

    /// Place corner pieces
    ///
    /// Rectangular rooms get their four outer corners. Irregular rooms get a
    /// piece on every concave corner cell, and those cells are claimed so wall
    /// packing skips them. Returns the number of corners placed.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized`, `GridNotCreated`, or `MissingStyle` without a
    /// wall style. A wall style without a corner mesh places nothing.
    pub fn generate_corners(&mut self) -> Result<usize> {
        let grid = self.require_grid("generate_corners")?;
        let Some(config) = self.config.as_ref() else {
            return Err(GenerationError::NotInitialized {
                operation: "generate_corners",
            });
        };
        let style = config
            .walls
            .as_ref()
            .ok_or(GenerationError::MissingStyle { style: "walls" })?;

        let (corners, claimed) = match style.corner_mesh.as_ref().filter(|mesh| mesh.is_set()) {
            None => {
                debug!("No corner mesh configured, skipping corners");
                (Vec::new(), BTreeSet::new())
            }
            Some(mesh) => match config.shape {
                RoomShape::Uniform => (
                    rectangle_corners(
                        grid.width(),
                        grid.height(),
                        config.cell_size,
                        mesh,
                        &style.corners,
                    ),
                    BTreeSet::new(),
                ),
                RoomShape::Chunky(_) => {
                    let corners = interior_corners(grid, config.cell_size, mesh);
                    let claimed = corners.iter().filter_map(|corner| corner.cell).collect();
                    (corners, claimed)
                }
            },
        };

        info!("Placed {} corners", corners.len());
        self.corners = corners;
        self.claimed_corner_cells = claimed;
        self.topology = None;
        Ok(self.corners.len())
    }

    /// Plan doorway layouts and place them
    ///
    /// Cached layouts are reused while they still match the room. Returns the
    /// number of doorways placed.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized`, `GridNotCreated`, or `MissingStyle` when
    /// automatic doorways are configured without a default door style.
    pub fn generate_doorways(&mut self) -> Result<usize> {
        let grid = self.require_grid("generate_doorways")?;
        let Some(config) = self.config.as_ref() else {
            return Err(GenerationError::NotInitialized {
                operation: "generate_doorways",
            });
        };

        let edges = RoomEdges::from_grid(grid, &self.claimed_corner_cells);
        let fingerprint = CacheFingerprint::new(grid.width(), grid.height(), &edges, &config.doorways);
        let layouts = self.doorway_planner.plan(
            fingerprint,
            &edges,
            &config.doorways,
            &config.forced_doorways,
            &mut self.selector,
        )?;

        let doorways: Vec<PlacedDoorway> = layouts
            .iter()
            .filter_map(|layout| {
                let style = config.doorways.style(&layout.style)?;
                derive_placement(layout, style, &edges, config.cell_size)
            })
            .collect();
        let doorway_cells: BTreeSet<GridCoord> = doorways
            .iter()
            .flat_map(|doorway| doorway.cells.iter().copied())
            .collect();

        if let Some(shape) = self.shape.as_mut() {
            shape.grid.reset_cells(CellType::Doorway, CellType::Void);
            for &cell in &doorway_cells {
                shape.grid.set(cell, CellType::Doorway);
            }
        }

        info!(
            "Placed {} doorways covering {} boundary cells",
            doorways.len(),
            doorway_cells.len()
        );
        self.doorways = doorways;
        self.doorway_cells = doorway_cells;
        self.topology = None;
        Ok(self.doorways.len())
    }

    /// Pack walls along every edge and stack their upper layers
    ///
    /// Doorways are planned first when none are placed. Previous walls are
    /// replaced. Returns the number of wall segments placed.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized`, `GridNotCreated`, `MissingStyle` without a
    /// wall style, `EmptyPool` when the style has no modules, or any error
    /// from doorway planning.
    pub fn generate_walls(&mut self) -> Result<usize> {
        self.require_grid("generate_walls")?;
        let style = self
            .config
            .as_ref()
            .and_then(|config| config.walls.as_ref())
            .ok_or(GenerationError::MissingStyle { style: "walls" })?;
        if style.modules.is_empty() {
            return Err(GenerationError::EmptyPool {
                pool: "wall modules",
            });
        }

        if self.doorways.is_empty() {
            self.generate_doorways()?;
        }

        let (Some(config), Some(shape)) = (self.config.as_ref(), self.shape.as_ref()) else {
            return Err(GenerationError::GridNotCreated {
                operation: "generate_walls",
            });
        };
        let Some(style) = config.walls.as_ref() else {
            return Err(GenerationError::MissingStyle { style: "walls" });
        };

        let edges = RoomEdges::from_grid(&shape.grid, &self.claimed_corner_cells);
        let outcome = pack_walls(
            &edges,
            &self.doorway_cells,
            &config.forced_walls,
            style,
            config.cell_size,
            &mut self.selector,
        );

        info!(
            "Placed {} wall segments ({} forced, {} skipped, {} gap cells, {} doorway cells)",
            outcome.stats.total_placed(),
            outcome.stats.forced_placed,
            outcome.stats.forced_skipped,
            outcome.stats.gap_cells,
            outcome.stats.doorway_cells
        );
        self.walls = outcome
            .segments
            .into_iter()
            .map(|segment| stack_layers(segment, style.wall_height))
            .collect();
        self.wall_stats = outcome.stats;
        self.topology = None;
        Ok(self.walls.len())
    }

    /// Pack the ceiling
    ///
    /// The ceiling packs into its own occupancy, seeded from the room
    /// silhouette. Returns the number of tiles placed.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized`, `GridNotCreated`, `MissingStyle` without a
    /// ceiling style, or `EmptyPool` when the ceiling pool is empty.
    pub fn generate_ceiling(&mut self) -> Result<usize> {
        let grid = self.require_grid("generate_ceiling")?;
        let Some(config) = self.config.as_ref() else {
            return Err(GenerationError::NotInitialized {
                operation: "generate_ceiling",
            });
        };
        let ceiling = config
            .ceiling
            .as_ref()
            .ok_or(GenerationError::MissingStyle { style: "ceiling" })?;
        if ceiling.tile_pool.is_empty() {
            return Err(GenerationError::EmptyPool {
                pool: "ceiling tile pool",
            });
        }

        let mut surface = CeilingGrid::from_room(grid);
        let request = PackingRequest {
            pool: &ceiling.tile_pool,
            forced: &config.forced_ceiling,
            forced_empty_regions: &[],
            forced_empty_cells: &[],
            height: ceiling.height,
            base_rotation: ceiling.rotation,
            cell_size: config.cell_size,
        };
        let outcome = pack_tiles(&mut surface, &request, &mut self.selector);

        log_packing("ceiling", &outcome.stats);
        self.ceiling_tiles = outcome.placements;
        self.ceiling_stats = outcome.stats;
        self.ceiling_grid = Some(surface);
        self.topology = None;
        Ok(self.ceiling_stats.total_placed())
    }

    /// Classify every room cell and store the result
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` or `GridNotCreated`.
    pub fn analyze_topology(&mut self) -> Result<&TopologyMap> {
        let grid = self.require_grid("analyze_topology")?;
        let topology = TopologyMap::analyze(grid, &self.doorway_cells);
        debug!("Classified {} room cells", topology.len());
        Ok(self.topology.insert(topology))
    }

    /// Run one phase
    ///
    /// Returns the number of items the phase produced.
    ///
    /// # Errors
    ///
    /// Returns the phase's own error.
    pub fn run_phase(&mut self, phase: GenerationPhase) -> Result<usize> {
        match phase {
            GenerationPhase::Shape => {
                self.create_grid()?;
                Ok(self.grid().map_or(0, OccupancyGrid::room_cell_count))
            }
            GenerationPhase::Floor => self.generate_floor(),
            GenerationPhase::Corners => self.generate_corners(),
            GenerationPhase::Doorways => self.generate_doorways(),
            GenerationPhase::Walls => self.generate_walls(),
            GenerationPhase::Ceiling => self.generate_ceiling(),
            GenerationPhase::Topology => self.analyze_topology().map(TopologyMap::len),
        }
    }

    /// Whether the bound configuration has what a phase needs
    ///
    /// Phases whose style block is absent are skipped by full runs.
    pub fn is_configured(&self, phase: GenerationPhase) -> bool {
        let Some(config) = self.config.as_ref() else {
            return false;
        };
        match phase {
            GenerationPhase::Shape | GenerationPhase::Doorways | GenerationPhase::Topology => true,
            GenerationPhase::Floor => config.floor.is_some(),
            GenerationPhase::Corners | GenerationPhase::Walls => config.walls.is_some(),
            GenerationPhase::Ceiling => config.ceiling.is_some(),
        }
    }

    /// Run every configured phase in order
    ///
    /// # Errors
    ///
    /// Returns the first phase error.
    pub fn generate_all(&mut self) -> Result<()> {
        for phase in GenerationPhase::ALL {
            if self.is_configured(phase) {
                self.run_phase(phase)?;
            } else {
                debug!("Skipping {phase} phase: not configured");
            }
        }
        Ok(())
    }

    /// Remove floor tiles and return their cells to the fillable state
    pub fn clear_floor(&mut self) {
        if let (Some(shape), Some(config)) = (self.shape.as_mut(), self.config.as_ref()) {
            let fillable = config.shape.fillable();
            shape.grid.reset_cells(CellType::FloorMesh, fillable);
            shape.grid.reset_cells(CellType::Reserved, fillable);
        }
        self.floor_tiles.clear();
        self.floor_stats = PackingStats::default();
        self.topology = None;
    }

    /// Remove wall segments
    pub fn clear_walls(&mut self) {
        self.walls.clear();
        self.wall_stats = WallStats::default();
        self.topology = None;
    }

    /// Remove corner pieces and release claimed cells
    pub fn clear_corners(&mut self) {
        self.corners.clear();
        self.claimed_corner_cells.clear();
        self.topology = None;
    }

    /// Remove ceiling tiles
    pub fn clear_ceiling(&mut self) {
        self.ceiling_tiles.clear();
        self.ceiling_stats = PackingStats::default();
        self.ceiling_grid = None;
        self.topology = None;
    }

    /// Remove placed doorways, keeping cached layouts for the next run
    pub fn clear_placed_doorways(&mut self) {
        if let Some(shape) = self.shape.as_mut() {
            shape.grid.reset_cells(CellType::Doorway, CellType::Void);
        }
        self.doorways.clear();
        self.doorway_cells.clear();
        self.topology = None;
    }

    /// Remove placed doorways and discard cached layouts
    pub fn clear_doorway_layouts(&mut self) {
        self.clear_placed_doorways();
        self.doorway_planner.invalidate();
    }

    /// Discard the grid, every placement and the doorway cache
    pub fn clear_grid(&mut self) {
        self.clear_placements();
        self.doorway_planner.invalidate();
        self.shape = None;
    }

    fn clear_placements(&mut self) {
        self.floor_tiles.clear();
        self.floor_stats = PackingStats::default();
        self.clear_ceiling();
        self.clear_walls();
        self.clear_corners();
        self.doorways.clear();
        self.doorway_cells.clear();
        self.topology = None;
    }

    /// Return a rectangle of cells to the fillable state
    ///
    /// Floor tiles overlapping the rectangle are removed along with all of
    /// their cells. Cells outside the room keep their state. Returns the number
    /// of cells reset.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` or `GridNotCreated`.
    pub fn clear_area(&mut self, start: GridCoord, footprint: Footprint) -> Result<usize> {
        self.require_grid("clear_area")?;
        let Some(fillable) = self.config.as_ref().map(|config| config.shape.fillable()) else {
            return Err(GenerationError::NotInitialized {
                operation: "clear_area",
            });
        };
        let Some(shape) = self.shape.as_mut() else {
            return Err(GenerationError::GridNotCreated {
                operation: "clear_area",
            });
        };

        let cleared: BTreeSet<GridCoord> = rect_cells(start, footprint).collect();
        let mut reset = 0;
        self.floor_tiles.retain(|tile| {
            let overlaps = rect_cells(tile.position, tile.footprint).any(|cell| cleared.contains(&cell));
            if overlaps {
                reset += shape.grid.clear_area(tile.position, tile.footprint, fillable);
            }
            !overlaps
        });
        reset += cleared
            .iter()
            .filter(|&&cell| matches!(shape.grid.get(cell), CellType::FloorMesh | CellType::Reserved))
            .count();
        shape.grid.clear_area(start, footprint, fillable);
        self.topology = None;
        Ok(reset)
    }

    /// Occupancy grid, once created
    pub fn grid(&self) -> Option<&OccupancyGrid> {
        self.shape.as_ref().map(|shape| &shape.grid)
    }

    /// Shape outcome of the current grid
    pub const fn shape_outcome(&self) -> Option<&ShapeOutcome> {
        self.shape.as_ref()
    }

    /// Ceiling occupancy after the last ceiling run
    pub const fn ceiling_grid(&self) -> Option<&CeilingGrid> {
        self.ceiling_grid.as_ref()
    }

    /// Boundary cells of the current grid
    pub fn edges(&self) -> Option<RoomEdges> {
        self.grid()
            .map(|grid| RoomEdges::from_grid(grid, &self.claimed_corner_cells))
    }

    /// Floor tiles in commit order
    pub fn floor_tiles(&self) -> &[PlacedTile] {
        &self.floor_tiles
    }

    /// Counts from the last floor run
    pub const fn floor_stats(&self) -> &PackingStats {
        &self.floor_stats
    }

    /// Ceiling tiles in commit order
    pub fn ceiling_tiles(&self) -> &[PlacedTile] {
        &self.ceiling_tiles
    }

    /// Counts from the last ceiling run
    pub const fn ceiling_stats(&self) -> &PackingStats {
        &self.ceiling_stats
    }

    /// Wall segments with their stacked layers
    pub fn walls(&self) -> &[PlacedWall] {
        &self.walls
    }

    /// Counts from the last wall run
    pub const fn wall_stats(&self) -> &WallStats {
        &self.wall_stats
    }

    /// Corner pieces
    pub fn corners(&self) -> &[PlacedCorner] {
        &self.corners
    }

    /// Cells claimed by interior corners
    pub const fn claimed_corner_cells(&self) -> &BTreeSet<GridCoord> {
        &self.claimed_corner_cells
    }

    /// Placed doorways
    pub fn doorways(&self) -> &[PlacedDoorway] {
        &self.doorways
    }

    /// Boundary cells opened by doorways, including cells outside the grid
    pub const fn doorway_cells(&self) -> &BTreeSet<GridCoord> {
        &self.doorway_cells
    }

    /// Cached doorway layouts, if any
    pub fn doorway_layouts(&self) -> Option<&[DoorwayLayout]> {
        self.doorway_planner.cached_layouts()
    }

    /// Stored topology, cleared by every mutating call
    pub const fn topology(&self) -> Option<&TopologyMap> {
        self.topology.as_ref()
    }

    /// Cells currently in a state
    pub fn cell_count(&self, state: CellType) -> usize {
        self.grid().map_or(0, |grid| grid.count(state))
    }

    /// Percentage of all cells covered by floor tiles
    pub fn occupancy_percentage(&self) -> f64 {
        self.grid().map_or(0.0, OccupancyGrid::occupancy_percentage)
    }

    /// Cell census of the current grid
    pub fn statistics(&self) -> Option<RoomStatistics> {
        self.grid().map(RoomStatistics::from_grid)
    }

    /// Local-space centre of a cell
    pub fn grid_to_local(&self, coord: GridCoord) -> Vec3 {
        grid_to_local(coord, self.cell_size())
    }

    /// Cell containing a local-space point
    pub fn local_to_grid(&self, point: Vec3) -> GridCoord {
        local_to_grid(point, self.cell_size())
    }
}

fn log_packing(surface: &str, stats: &PackingStats) {
    info!(
        "Placed {} {surface} tiles: {} large, {} medium, {} small, {} filler ({} forced, {} forced skipped, {} reserved)",
        stats.total_placed(),
        stats.large,
        stats.medium,
        stats.small,
        stats.filler,
        stats.forced_placed,
        stats.forced_skipped,
        stats.reserved_cells
    );
}
