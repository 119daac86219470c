//! Tests for the four-phase greedy tile packer

#[cfg(test)]
mod tests {
    use roomgen::algorithm::packing::{
        FloorSurface, PackingOutcome, PackingRequest, expand_forced_empty, pack_tiles,
    };
    use roomgen::algorithm::selection::RandomSelector;
    use roomgen::analysis::statistics::PlacementSource;
    use roomgen::io::style::{CellRegion, ForcedTile, TileEntry};
    use roomgen::spatial::geometry::{Footprint, Rotation, Rotator, rect_cells};
    use roomgen::spatial::grid::{CellType, GridCoord, OccupancyGrid};
    use std::collections::BTreeSet;

    fn request<'a>(
        pool: &'a [TileEntry],
        forced: &'a [ForcedTile],
        regions: &'a [CellRegion],
        cells: &'a [GridCoord],
    ) -> PackingRequest<'a> {
        PackingRequest {
            pool,
            forced,
            forced_empty_regions: regions,
            forced_empty_cells: cells,
            height: 0.0,
            base_rotation: Rotator::ZERO,
            cell_size: 100.0,
        }
    }

    fn pack_floor(grid: &mut OccupancyGrid, request: &PackingRequest<'_>, seed: u64) -> PackingOutcome {
        let mut surface = FloorSurface::new(grid, CellType::Empty);
        pack_tiles(&mut surface, request, &mut RandomSelector::new(seed))
    }

    fn assert_no_overlap(outcome: &PackingOutcome) {
        let mut covered = BTreeSet::new();
        for tile in &outcome.placements {
            for cell in rect_cells(tile.position, tile.footprint) {
                assert!(covered.insert(cell), "cell {cell:?} covered twice");
            }
        }
    }

    // Tests a mixed pool covers a room completely without overlap
    // Verified by comparing covered cells against the grid's floor cells
    #[test]
    fn test_pack_covers_room_without_overlap() {
        let pool = vec![
            TileEntry::new("big", Footprint::new(4, 4), 1.0),
            TileEntry::new("mid", Footprint::new(2, 2), 1.0),
            TileEntry::new("one", Footprint::new(1, 1), 1.0),
        ];
        let mut grid = OccupancyGrid::new(9, 7, CellType::Empty);

        let outcome = pack_floor(&mut grid, &request(&pool, &[], &[], &[]), 3);

        assert_no_overlap(&outcome);
        let covered: usize = outcome.placements.iter().map(|t| t.footprint.area()).sum();
        assert_eq!(covered, 63);
        assert_eq!(grid.count(CellType::FloorMesh), 63);
        assert_eq!(outcome.stats.large, 2);
        assert_eq!(outcome.stats.total_placed(), outcome.placements.len());
    }

    // Tests greedy scanning places the largest sizes first at row-major positions
    #[test]
    fn test_greedy_prefers_largest_size() {
        let pool = vec![
            TileEntry::new("big", Footprint::new(4, 4), 1.0),
            TileEntry::new("one", Footprint::new(1, 1), 1.0),
        ];
        let mut grid = OccupancyGrid::new(4, 4, CellType::Empty);

        let outcome = pack_floor(&mut grid, &request(&pool, &[], &[], &[]), 1);

        assert_eq!(outcome.placements.len(), 1);
        assert_eq!(outcome.placements.first().map(|t| t.position), Some(GridCoord::new(0, 0)));
        assert_eq!(outcome.stats.greedy_placed, 1);
    }

    // Tests a tile only matches a target its allowed rotations can produce
    // Verified by a 2x1 tile restricted to 0° never filling a 1x2 slot
    #[test]
    fn test_rotation_restriction_limits_targets() {
        let pool = vec![TileEntry::new("bar", Footprint::new(2, 1), 1.0)];
        let mut grid = OccupancyGrid::new(1, 2, CellType::Empty);

        let outcome = pack_floor(&mut grid, &request(&pool, &[], &[], &[]), 1);
        assert!(outcome.placements.is_empty());

        let rotating = vec![
            TileEntry::new("bar", Footprint::new(2, 1), 1.0)
                .with_rotations(&[Rotation::Deg0, Rotation::Deg90]),
        ];
        let mut grid = OccupancyGrid::new(1, 2, CellType::Empty);
        let outcome = pack_floor(&mut grid, &request(&rotating, &[], &[], &[]), 1);

        assert_eq!(outcome.placements.len(), 1);
        assert_eq!(outcome.placements.first().map(|t| t.rotation), Some(Rotation::Deg90));
        assert_eq!(outcome.placements.first().map(|t| t.footprint), Some(Footprint::new(1, 2)));
    }

    // Tests tiles without a mesh are never placed
    #[test]
    fn test_unset_mesh_ignored() {
        let pool = vec![
            TileEntry::new("", Footprint::new(1, 1), 10.0),
            TileEntry::new("real", Footprint::new(1, 1), 1.0),
        ];
        let mut grid = OccupancyGrid::new(3, 3, CellType::Empty);

        let outcome = pack_floor(&mut grid, &request(&pool, &[], &[], &[]), 2);

        assert_eq!(outcome.placements.len(), 9);
        assert!(outcome.placements.iter().all(|t| t.tile.mesh.as_str() == "real"));
    }

    // Tests forced-empty cells stay reserved and forced tiles land first
    #[test]
    fn test_forced_phases_run_first() {
        let pool = vec![TileEntry::new("one", Footprint::new(1, 1), 1.0)];
        let forced = vec![ForcedTile {
            position: GridCoord::new(2, 2),
            tile: TileEntry::new("rug", Footprint::new(2, 2), 1.0),
            rotations: Vec::new(),
        }];
        let cells = vec![GridCoord::new(0, 0), GridCoord::new(9, 9)];
        let mut grid = OccupancyGrid::new(5, 5, CellType::Empty);

        let outcome = pack_floor(&mut grid, &request(&pool, &forced, &[], &cells), 4);

        assert_eq!(outcome.stats.reserved_cells, 1);
        assert_eq!(grid.get(GridCoord::new(0, 0)), CellType::Reserved);
        assert_eq!(outcome.stats.forced_placed, 1);
        assert_eq!(outcome.placements.first().map(|t| t.source), Some(PlacementSource::Forced));
        assert_eq!(outcome.placements.len(), 1 + 25 - 4 - 1);
        assert_no_overlap(&outcome);
    }

    // Tests forced tiles that do not fit are skipped and counted
    #[test]
    fn test_forced_tile_skipped_when_blocked() {
        let forced = vec![
            ForcedTile {
                position: GridCoord::new(0, 0),
                tile: TileEntry::new("a", Footprint::new(2, 2), 1.0),
                rotations: Vec::new(),
            },
            ForcedTile {
                position: GridCoord::new(1, 1),
                tile: TileEntry::new("b", Footprint::new(2, 2), 1.0),
                rotations: Vec::new(),
            },
            ForcedTile {
                position: GridCoord::new(2, 0),
                tile: TileEntry::new("", Footprint::new(1, 1), 1.0),
                rotations: Vec::new(),
            },
        ];
        let mut grid = OccupancyGrid::new(4, 4, CellType::Empty);

        let outcome = pack_floor(&mut grid, &request(&[], &forced, &[], &[]), 1);

        assert_eq!(outcome.stats.forced_placed, 1);
        assert_eq!(outcome.stats.forced_skipped, 2);
    }

    // Tests a forced tile falls through its rotations until one fits
    #[test]
    fn test_forced_tile_tries_rotations() {
        let forced = vec![ForcedTile {
            position: GridCoord::new(0, 0),
            tile: TileEntry::new("bench", Footprint::new(3, 1), 1.0),
            rotations: vec![Rotation::Deg0, Rotation::Deg90],
        }];
        let mut grid = OccupancyGrid::new(1, 3, CellType::Empty);

        let outcome = pack_floor(&mut grid, &request(&[], &forced, &[], &[]), 1);

        assert_eq!(outcome.placements.first().map(|t| t.rotation), Some(Rotation::Deg90));
        assert_eq!(grid.count(CellType::FloorMesh), 3);
    }

    // Tests region expansion handles reversed corners and clamps to the grid
    #[test]
    fn test_expand_forced_empty() {
        let regions = vec![CellRegion {
            start: GridCoord::new(3, 1),
            end: GridCoord::new(1, -4),
        }];
        let cells = vec![GridCoord::new(1, 1), GridCoord::new(-1, 0), GridCoord::new(0, 4)];

        let expanded = expand_forced_empty(&regions, &cells, 4, 4);

        assert_eq!(expanded.len(), 6);
        assert!(expanded.contains(&GridCoord::new(3, 0)));
        assert!(expanded.contains(&GridCoord::new(1, 1)));
        assert!(!expanded.contains(&GridCoord::new(0, 4)));
        assert!(expand_forced_empty(&regions, &cells, 0, 4).is_empty());
    }

    // Tests placement transforms centre the rotated footprint
    #[test]
    fn test_placement_transform() {
        let pool = vec![TileEntry::new("mid", Footprint::new(2, 2), 1.0)];
        let mut grid = OccupancyGrid::new(2, 2, CellType::Empty);

        let outcome = pack_floor(&mut grid, &request(&pool, &[], &[], &[]), 1);
        let location = outcome.placements.first().map(|t| t.transform.location);

        assert_eq!(location.map(|l| (l.x, l.y)), Some((100.0, 100.0)));
    }
}
