//! Tests for room cell zone classification

#[cfg(test)]
mod tests {
    use roomgen::analysis::topology::{TopologyMap, Zone, classify_zone};
    use roomgen::spatial::edges::Direction;
    use roomgen::spatial::geometry::Footprint;
    use roomgen::spatial::grid::{CellType, GridCoord, OccupancyGrid};
    use std::collections::BTreeSet;

    // Tests zone rules by wall count and arrangement
    // Verified by swapping the corner and border arms
    #[test]
    fn test_classify_zone() {
        assert_eq!(classify_zone(&[]), Zone::Center);
        assert_eq!(classify_zone(&[Direction::East]), Zone::Border);
        assert_eq!(
            classify_zone(&[Direction::North, Direction::South]),
            Zone::Border
        );
        assert_eq!(
            classify_zone(&[Direction::South, Direction::West]),
            Zone::Corner
        );
        assert_eq!(
            classify_zone(&[Direction::North, Direction::South, Direction::East]),
            Zone::DeadEnd
        );
        assert_eq!(classify_zone(&Direction::ALL), Zone::Isolated);
    }

    // Tests a rectangle splits into corners, borders and a centre
    #[test]
    fn test_rectangle_zones() {
        let grid = OccupancyGrid::new(4, 3, CellType::Empty);

        let topology = TopologyMap::analyze(&grid, &BTreeSet::new());

        assert_eq!(topology.len(), 12);
        let counts = topology.zone_counts();
        assert_eq!(counts.get(&Zone::Corner), Some(&4));
        assert_eq!(counts.get(&Zone::Border), Some(&6));
        assert_eq!(counts.get(&Zone::Center), Some(&2));
        assert_eq!(
            topology.cells_in_zone(Zone::Center),
            vec![GridCoord::new(1, 1), GridCoord::new(2, 1)]
        );
        let corner = topology.get(GridCoord::new(0, 0)).expect("room cell");
        assert_eq!(corner.walls, vec![Direction::South, Direction::West]);
    }

    // Tests corridor cells and isolated cells in an irregular room
    #[test]
    fn test_irregular_zones() {
        let mut grid = OccupancyGrid::new(5, 5, CellType::Void);
        grid.mark_area(GridCoord::new(0, 2), Footprint::new(4, 1), CellType::Custom);
        grid.set(GridCoord::new(4, 4), CellType::Custom);

        let topology = TopologyMap::analyze(&grid, &BTreeSet::new());

        assert_eq!(topology.get(GridCoord::new(0, 2)).map(|m| m.zone), Some(Zone::DeadEnd));
        assert_eq!(topology.get(GridCoord::new(1, 2)).map(|m| m.zone), Some(Zone::Border));
        assert_eq!(topology.get(GridCoord::new(4, 4)).map(|m| m.zone), Some(Zone::Isolated));
        assert!(topology.get(GridCoord::new(0, 0)).is_none());
    }

    // Tests openings record walls that face doorway cells, including off-grid ones
    #[test]
    fn test_openings() {
        let grid = OccupancyGrid::new(3, 3, CellType::Empty);
        let doorways: BTreeSet<GridCoord> = [GridCoord::new(3, 1), GridCoord::new(1, -1)]
            .into_iter()
            .collect();

        let topology = TopologyMap::analyze(&grid, &doorways);

        assert_eq!(
            topology.cells_with_openings(),
            vec![GridCoord::new(1, 0), GridCoord::new(2, 1)]
        );
        let cell = topology.get(GridCoord::new(2, 1)).expect("room cell");
        assert_eq!(cell.openings, vec![Direction::North]);
        assert_eq!(cell.zone, Zone::Border);
    }

    // Tests an empty grid has no classified cells
    #[test]
    fn test_empty_topology() {
        let grid = OccupancyGrid::new(2, 2, CellType::Void);

        let topology = TopologyMap::analyze(&grid, &BTreeSet::new());

        assert!(topology.is_empty());
        assert!(topology.zone_counts().is_empty());
    }
}
