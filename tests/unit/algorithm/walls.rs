//! Tests for wall packing and vertical layer stacking

#[cfg(test)]
mod tests {
    use roomgen::algorithm::selection::RandomSelector;
    use roomgen::algorithm::walls::{WallSegment, pack_walls, ranges_overlap, stack_layers};
    use roomgen::io::style::{ForcedWall, LayerMesh, WallModule, WallStyle};
    use roomgen::spatial::edges::{Direction, RoomEdges};
    use roomgen::spatial::geometry::{Rotator, Transform, Vec3};
    use roomgen::spatial::grid::{CellType, GridCoord, OccupancyGrid};
    use std::collections::BTreeSet;

    fn room_edges(width: usize, height: usize) -> RoomEdges {
        let grid = OccupancyGrid::new(width, height, CellType::Empty);
        RoomEdges::from_grid(&grid, &BTreeSet::new())
    }

    fn style(modules: Vec<WallModule>) -> WallStyle {
        WallStyle {
            modules,
            ..WallStyle::default()
        }
    }

    fn spans_on(segments: &[WallSegment], edge: Direction) -> Vec<(usize, usize)> {
        segments
            .iter()
            .filter(|segment| segment.edge == edge)
            .map(|segment| (segment.start_cell, segment.span))
            .collect()
    }

    // Tests every edge is covered greedily with the widest module that fits
    // Verified by a 4x3 room: north/south edges of 3 cells, east/west of 4
    #[test]
    fn test_greedy_widest_first() {
        let edges = room_edges(4, 3);
        let wall_style = style(vec![WallModule::new("narrow", 1), WallModule::new("wide", 2)]);

        let outcome = pack_walls(
            &edges,
            &BTreeSet::new(),
            &[],
            &wall_style,
            100.0,
            &mut RandomSelector::new(1),
        );

        assert_eq!(spans_on(&outcome.segments, Direction::North), vec![(0, 2), (2, 1)]);
        assert_eq!(spans_on(&outcome.segments, Direction::East), vec![(0, 2), (2, 2)]);
        assert_eq!(outcome.stats.greedy_placed, 8);
        assert_eq!(outcome.stats.gap_cells, 0);
        let covered: usize = outcome.segments.iter().map(|segment| segment.span).sum();
        assert_eq!(covered, edges.total_len());
    }

    // Tests doorway cells are never covered and no module spans across them
    #[test]
    fn test_doorway_cells_skipped() {
        let edges = room_edges(4, 3);
        let wall_style = style(vec![WallModule::new("narrow", 1), WallModule::new("wide", 2)]);
        let doorway: BTreeSet<GridCoord> = [GridCoord::new(4, 1)].into_iter().collect();

        let outcome = pack_walls(
            &edges,
            &doorway,
            &[],
            &wall_style,
            100.0,
            &mut RandomSelector::new(1),
        );

        assert_eq!(spans_on(&outcome.segments, Direction::North), vec![(0, 1), (2, 1)]);
        assert_eq!(outcome.stats.doorway_cells, 1);
        assert!(
            outcome
                .segments
                .iter()
                .all(|segment| !segment.cells.contains(&GridCoord::new(4, 1)))
        );
    }

    // Tests forced walls are placed first and greedy filling works around them
    #[test]
    fn test_forced_walls_exclude_greedy() {
        let edges = room_edges(4, 3);
        let wall_style = style(vec![WallModule::new("narrow", 1), WallModule::new("wide", 2)]);
        let forced = vec![
            ForcedWall {
                edge: Direction::East,
                start_cell: 1,
                module: WallModule::new("arch", 2),
            },
            ForcedWall {
                edge: Direction::East,
                start_cell: 2,
                module: WallModule::new("arch", 1),
            },
            ForcedWall {
                edge: Direction::West,
                start_cell: 3,
                module: WallModule::new("arch", 2),
            },
        ];

        let outcome = pack_walls(
            &edges,
            &BTreeSet::new(),
            &forced,
            &wall_style,
            100.0,
            &mut RandomSelector::new(1),
        );

        assert_eq!(outcome.stats.forced_placed, 1);
        assert_eq!(outcome.stats.forced_skipped, 2);
        assert!(outcome.segments.first().is_some_and(|segment| segment.forced));
        assert_eq!(
            spans_on(&outcome.segments, Direction::East),
            vec![(1, 2), (0, 1), (3, 1)]
        );
    }

    // Tests modules without a mesh are ignored and uncovered cells are counted
    #[test]
    fn test_gap_cells_counted() {
        let edges = room_edges(2, 2);
        let wall_style = style(vec![WallModule::new("", 1), WallModule::new("wide", 2)]);

        let outcome = pack_walls(
            &edges,
            &[GridCoord::new(2, 0)].into_iter().collect(),
            &[],
            &wall_style,
            100.0,
            &mut RandomSelector::new(1),
        );

        // North edge keeps one cell that only the unset 1-wide module could fill
        assert!(spans_on(&outcome.segments, Direction::North).is_empty());
        assert_eq!(outcome.stats.gap_cells, 1);
        assert_eq!(outcome.stats.greedy_placed, 3);
    }

    // Tests equally wide modules are chosen by weight
    #[test]
    fn test_weighted_ties() {
        let edges = room_edges(6, 6);
        let mut never = WallModule::new("never", 2);
        never.weight = 0.0;
        let wall_style = style(vec![never, WallModule::new("always", 2)]);

        let outcome = pack_walls(
            &edges,
            &BTreeSet::new(),
            &[],
            &wall_style,
            100.0,
            &mut RandomSelector::new(5),
        );

        assert_eq!(outcome.segments.len(), 12);
        assert!(
            outcome
                .segments
                .iter()
                .all(|segment| segment.module.base.mesh.as_str() == "always")
        );
    }

    // Tests base transforms use the edge yaw and sit on the room face
    #[test]
    fn test_segment_transform() {
        let edges = room_edges(4, 3);
        let mut wall_style = style(vec![WallModule::new("wide", 2)]);
        wall_style.edge_offsets.north = -5.0;

        let outcome = pack_walls(
            &edges,
            &BTreeSet::new(),
            &[],
            &wall_style,
            100.0,
            &mut RandomSelector::new(1),
        );
        let north = outcome
            .segments
            .iter()
            .find(|segment| segment.edge == Direction::North)
            .expect("north segment");

        assert_eq!(north.base_transform.location, Vec3::new(395.0, 100.0, 0.0));
        assert_eq!(north.base_transform.rotation.yaw, 180.0);
    }

    fn segment_with(module: WallModule) -> WallSegment {
        WallSegment {
            edge: Direction::South,
            start_cell: 0,
            span: module.footprint,
            cells: vec![GridCoord::new(-1, 0)],
            module,
            base_transform: Transform::new(Vec3::new(0.0, 50.0, 0.0), Rotator::ZERO),
            forced: false,
        }
    }

    // Tests layers chain upward through attachment points or the wall height
    #[test]
    fn test_stack_full_module() {
        let mut module = WallModule::new("base", 1);
        module.base.top_attachment = Some(Transform::from_location(Vec3::new(0.0, 0.0, 250.0)));
        module.middle1 = Some(LayerMesh::new("middle"));
        module.middle2 = Some(LayerMesh::new("upper"));
        module.top = Some(LayerMesh::new("cap"));

        let placed = stack_layers(segment_with(module), 400.0);

        let z = |t: Option<Transform>| t.map(|t| t.location.z);
        assert_eq!(z(placed.middle1), Some(250.0));
        assert_eq!(z(placed.middle2), Some(650.0));
        assert_eq!(z(placed.top), Some(1050.0));
    }

    // Tests a second middle layer needs the first and the top falls back to the base
    #[test]
    fn test_stack_skips_orphan_middle() {
        let mut module = WallModule::new("base", 1);
        module.middle2 = Some(LayerMesh::new("upper"));
        module.top = Some(LayerMesh::new("cap"));

        let placed = stack_layers(segment_with(module), 400.0);

        assert_eq!(placed.middle1, None);
        assert_eq!(placed.middle2, None);
        assert_eq!(placed.top.map(|t| t.location), Some(Vec3::new(0.0, 50.0, 400.0)));
    }

    // Tests layers with an empty mesh name are not stacked
    #[test]
    fn test_stack_skips_unset_layers() {
        let mut module = WallModule::new("base", 1);
        module.middle1 = Some(LayerMesh::new(""));
        module.middle2 = Some(LayerMesh::new("upper"));
        module.top = Some(LayerMesh::new("cap"));

        let placed = stack_layers(segment_with(module), 400.0);

        assert_eq!(placed.middle1, None);
        assert_eq!(placed.middle2, None);
        assert_eq!(placed.top.map(|t| t.location), Some(Vec3::new(0.0, 50.0, 400.0)));

        let mut capless = WallModule::new("base", 1);
        capless.top = Some(LayerMesh::new(""));
        assert_eq!(stack_layers(segment_with(capless), 400.0).top, None);
    }

    // Tests a base-only module stacks nothing
    #[test]
    fn test_stack_base_only() {
        let placed = stack_layers(segment_with(WallModule::new("base", 1)), 400.0);

        assert_eq!((placed.middle1, placed.middle2, placed.top), (None, None, None));
    }

    // Tests half-open range overlap
    #[test]
    fn test_ranges_overlap() {
        assert!(ranges_overlap(0, 2, 1, 2));
        assert!(ranges_overlap(3, 1, 0, 4));
        assert!(!ranges_overlap(0, 2, 2, 2));
        assert!(!ranges_overlap(5, 1, 0, 5));
        assert!(!ranges_overlap(0, 0, 0, 3));
    }
}
