//! Serializable snapshot of a generated room

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::algorithm::corners::PlacedCorner;
use crate::algorithm::doorways::PlacedDoorway;
use crate::algorithm::executor::RoomGenerator;
use crate::algorithm::packing::PlacedTile;
use crate::algorithm::walls::PlacedWall;
use crate::analysis::statistics::{PackingStats, RoomStatistics, WallStats};
use crate::analysis::topology::Zone;
use crate::io::error::{GenerationError, Result, file_system_error};
use crate::spatial::geometry::Footprint;

/// Everything a generator placed, ready to be written out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomLayout {
    /// Room name from the style
    pub name: String,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// World size of a cell
    pub cell_size: f64,
    /// Configured seed, absent for entropy-seeded runs
    pub seed: Option<u64>,
    /// Base rectangle of the room shape
    pub base: Option<Footprint>,
    /// Floor tiles
    pub floor: Vec<PlacedTile>,
    /// Ceiling tiles
    pub ceiling: Vec<PlacedTile>,
    /// Wall segments with stacked layers
    pub walls: Vec<PlacedWall>,
    /// Corner pieces
    pub corners: Vec<PlacedCorner>,
    /// Doorways
    pub doorways: Vec<PlacedDoorway>,
    /// Floor packing counts
    pub floor_stats: PackingStats,
    /// Ceiling packing counts
    pub ceiling_stats: PackingStats,
    /// Wall packing counts
    pub wall_stats: WallStats,
    /// Cell census
    pub statistics: Option<RoomStatistics>,
    /// Room cells per zone, empty until topology has been analyzed
    pub zones: BTreeMap<Zone, usize>,
}

impl RoomLayout {
    /// Snapshot the current state of a generator
    pub fn capture(generator: &RoomGenerator) -> Self {
        let (width, height) = generator.grid_size();
        let config = generator.config();

        Self {
            name: config.map(|c| c.name.clone()).unwrap_or_default(),
            width,
            height,
            cell_size: generator.cell_size(),
            seed: config.and_then(|c| c.seed),
            base: generator.shape_outcome().map(|shape| shape.base),
            floor: generator.floor_tiles().to_vec(),
            ceiling: generator.ceiling_tiles().to_vec(),
            walls: generator.walls().to_vec(),
            corners: generator.corners().to_vec(),
            doorways: generator.doorways().to_vec(),
            floor_stats: *generator.floor_stats(),
            ceiling_stats: *generator.ceiling_stats(),
            wall_stats: *generator.wall_stats(),
            statistics: generator.statistics(),
            zones: generator
                .topology()
                .map(|topology| topology.zone_counts())
                .unwrap_or_default(),
        }
    }

    /// Total number of placed meshes across every list
    pub fn placement_count(&self) -> usize {
        self.floor.len() + self.ceiling.len() + self.walls.len() + self.corners.len() + self.doorways.len()
    }

    /// Write the snapshot as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or serialization fails.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| file_system_error(path, "create layout", e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|e| {
            GenerationError::LayoutExport {
                path: path.to_path_buf(),
                source: e,
            }
        })
    }
}
