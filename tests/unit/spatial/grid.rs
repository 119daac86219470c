//! Tests for occupancy grid access, area queries and bulk rewrites

#[cfg(test)]
mod tests {
    use roomgen::spatial::geometry::Footprint;
    use roomgen::spatial::grid::{CellType, GridCoord, OccupancyGrid};

    // Tests that out-of-bounds reads fall back to the default state
    // Verified by reading negative and past-the-end coordinates
    #[test]
    fn test_get_out_of_bounds_returns_empty() {
        let grid = OccupancyGrid::new(3, 2, CellType::Void);

        assert_eq!(grid.get(GridCoord::new(0, 0)), CellType::Void);
        assert_eq!(grid.get(GridCoord::new(-1, 0)), CellType::Empty);
        assert_eq!(grid.get(GridCoord::new(3, 0)), CellType::Empty);
        assert_eq!(grid.get(GridCoord::new(0, 2)), CellType::Empty);
    }

    // Tests that writes outside the grid are rejected
    #[test]
    fn test_set_reports_bounds() {
        let mut grid = OccupancyGrid::new(3, 2, CellType::Empty);

        assert!(grid.set(GridCoord::new(2, 1), CellType::FloorMesh));
        assert!(!grid.set(GridCoord::new(3, 1), CellType::FloorMesh));
        assert!(!grid.set(GridCoord::new(0, -1), CellType::FloorMesh));
        assert_eq!(grid.count(CellType::FloorMesh), 1);
    }

    // Tests row-major linear indexing
    #[test]
    fn test_linear_index_is_row_major() {
        let grid = OccupancyGrid::new(4, 3, CellType::Empty);

        assert_eq!(grid.linear_index(GridCoord::new(0, 0)), Some(0));
        assert_eq!(grid.linear_index(GridCoord::new(3, 0)), Some(3));
        assert_eq!(grid.linear_index(GridCoord::new(1, 2)), Some(9));
        assert_eq!(grid.linear_index(GridCoord::new(4, 0)), None);
    }

    // Tests that a marked rectangle stops being available and becomes available again once cleared
    // Verified by marking, checking, then clearing the same area
    #[test]
    fn test_area_availability_round_trip() {
        let mut grid = OccupancyGrid::new(6, 6, CellType::Empty);
        let start = GridCoord::new(1, 2);
        let footprint = Footprint::new(3, 2);

        assert!(grid.is_area_available(start, footprint, CellType::Empty));
        assert_eq!(grid.mark_area(start, footprint, CellType::FloorMesh), 6);
        assert!(!grid.is_area_available(start, footprint, CellType::Empty));
        assert!(grid.is_area_available(start, footprint, CellType::FloorMesh));

        assert_eq!(grid.clear_area(start, footprint, CellType::Empty), 6);
        assert!(grid.is_area_available(start, footprint, CellType::Empty));
    }

    // Tests that rectangles leaving the grid are rejected wholesale
    #[test]
    fn test_area_out_of_range_rejected() {
        let grid = OccupancyGrid::new(4, 4, CellType::Empty);

        assert!(!grid.is_area_available(GridCoord::new(3, 0), Footprint::new(2, 1), CellType::Empty));
        assert!(!grid.is_area_available(GridCoord::new(0, 3), Footprint::new(1, 2), CellType::Empty));
        assert!(!grid.is_area_available(GridCoord::new(-1, 0), Footprint::new(1, 1), CellType::Empty));
        assert!(!grid.is_area_available(GridCoord::new(0, 0), Footprint::new(0, 2), CellType::Empty));
    }

    // Tests that footprints too large to add to a start cell are unavailable
    #[test]
    fn test_area_availability_huge_footprint() {
        let grid = OccupancyGrid::new(10, 10, CellType::Empty);

        assert!(!grid.is_area_available(GridCoord::new(1, 1), Footprint::new(usize::MAX, 1), CellType::Empty));
        assert!(!grid.is_area_available(GridCoord::new(1, 1), Footprint::new(1, usize::MAX), CellType::Empty));
    }

    // Tests that clearing resets floor cells only and leaves non-room cells in place
    #[test]
    fn test_clear_area_keeps_non_room_cells() {
        let mut grid = OccupancyGrid::new(4, 1, CellType::Custom);
        grid.set(GridCoord::new(0, 0), CellType::FloorMesh);
        grid.set(GridCoord::new(1, 0), CellType::Reserved);
        grid.set(GridCoord::new(2, 0), CellType::Void);
        grid.set(GridCoord::new(3, 0), CellType::Doorway);

        let reset = grid.clear_area(GridCoord::new(0, 0), Footprint::new(4, 1), CellType::Custom);

        assert_eq!(reset, 2);
        assert_eq!(grid.count(CellType::Custom), 2);
        assert_eq!(grid.get(GridCoord::new(2, 0)), CellType::Void);
        assert_eq!(grid.get(GridCoord::new(3, 0)), CellType::Doorway);
    }

    // Tests that partially out-of-bounds marking writes only valid cells
    #[test]
    fn test_mark_area_clips_to_grid() {
        let mut grid = OccupancyGrid::new(3, 3, CellType::Empty);

        let written = grid.mark_area(GridCoord::new(2, 2), Footprint::new(2, 2), CellType::Reserved);

        assert_eq!(written, 1);
        assert_eq!(grid.count(CellType::Reserved), 1);
    }

    // Tests bulk state rewrites and occupancy percentage
    #[test]
    fn test_reset_cells_and_occupancy() {
        let mut grid = OccupancyGrid::new(5, 2, CellType::Empty);
        grid.mark_area(GridCoord::new(0, 0), Footprint::new(5, 1), CellType::FloorMesh);

        assert!((grid.occupancy_percentage() - 50.0).abs() < 1e-9);
        assert_eq!(grid.reset_cells(CellType::FloorMesh, CellType::Empty), 5);
        assert!(grid.occupancy_percentage().abs() < 1e-9);
        assert_eq!(grid.count(CellType::Empty), 10);
    }

    // Tests which states count as room interior
    #[test]
    fn test_room_cell_states() {
        assert!(CellType::Empty.is_room());
        assert!(CellType::FloorMesh.is_room());
        assert!(CellType::Reserved.is_room());
        assert!(CellType::Custom.is_room());
        assert!(!CellType::Void.is_room());
        assert!(!CellType::Doorway.is_room());
        assert!(!CellType::WallBoundary.is_room());

        let mut grid = OccupancyGrid::new(2, 2, CellType::Void);
        grid.set(GridCoord::new(1, 1), CellType::Custom);
        assert_eq!(grid.room_cell_count(), 1);
    }

    // Tests iteration order is y outer, x inner
    #[test]
    fn test_iter_row_major() {
        let grid = OccupancyGrid::new(2, 2, CellType::Empty);
        let coords: Vec<GridCoord> = grid.iter().map(|(coord, _)| coord).collect();

        assert_eq!(
            coords,
            vec![
                GridCoord::new(0, 0),
                GridCoord::new(1, 0),
                GridCoord::new(0, 1),
                GridCoord::new(1, 1),
            ]
        );
    }

    // Tests fill overwrites every cell
    #[test]
    fn test_fill() {
        let mut grid = OccupancyGrid::new(3, 3, CellType::Empty);
        grid.fill(CellType::Void);

        assert_eq!(grid.count(CellType::Void), 9);
        assert_eq!(grid.len(), 9);
        assert!(!grid.is_empty());
    }
}
