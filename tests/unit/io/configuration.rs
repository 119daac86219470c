//! Tests for generation constants and their relationships

#[cfg(test)]
mod tests {
    use roomgen::io::configuration::{
        CHUNK_SIZE, DEFAULT_BASE_FRACTION, DEFAULT_MAX_PROTRUSION_SIZE, DEFAULT_MAX_PROTRUSIONS,
        DEFAULT_MIN_PROTRUSION_SIZE, DEFAULT_MIN_PROTRUSIONS, GAP_FILL_SIZES, GREEDY_TARGET_SIZES,
        LARGE_TILE_AREA, MAX_DOORWAY_EDGES, MAX_GRID_DIMENSION, MAX_INDIVIDUAL_PROGRESS_BARS,
        MEDIUM_TILE_AREA, MIN_CHUNK_GRID, MIN_DOORWAY_EDGES, OUTPUT_SUFFIX, SMALL_TILE_AREA,
        STYLE_EXTENSION,
    };
    use roomgen::spatial::geometry::Footprint;

    // Tests the greedy pass runs from the largest footprint down to single cells
    // Verified by swapping the first two target sizes
    #[test]
    fn test_greedy_sizes_descend() {
        assert_eq!(GREEDY_TARGET_SIZES.first(), Some(&Footprint::new(4, 4)));
        assert_eq!(GREEDY_TARGET_SIZES.last(), Some(&Footprint::new(1, 1)));
        assert!(
            GREEDY_TARGET_SIZES
                .windows(2)
                .all(|pair| matches!(pair, [a, b] if a.area() >= b.area()))
        );
    }

    // Tests the gap-fill pass only uses thin footprints
    #[test]
    fn test_gap_fill_sizes_are_thin() {
        assert!(
            GAP_FILL_SIZES
                .iter()
                .all(|size| size.width == 1 || size.height == 1)
        );
        assert_eq!(GAP_FILL_SIZES.last(), Some(&Footprint::new(1, 1)));
    }

    // Tests size-class thresholds are strictly ordered
    #[test]
    fn test_tile_area_thresholds() {
        assert!(LARGE_TILE_AREA > MEDIUM_TILE_AREA);
        assert!(MEDIUM_TILE_AREA > SMALL_TILE_AREA);
        assert_eq!(SMALL_TILE_AREA, 2);
    }

    // Tests irregular-room defaults form valid ranges
    #[test]
    fn test_chunky_defaults() {
        assert_eq!(CHUNK_SIZE, 2);
        assert_eq!(MIN_CHUNK_GRID, 2);
        assert!(DEFAULT_MIN_PROTRUSIONS <= DEFAULT_MAX_PROTRUSIONS);
        assert!(DEFAULT_MIN_PROTRUSION_SIZE <= DEFAULT_MAX_PROTRUSION_SIZE);
        assert!(DEFAULT_BASE_FRACTION > 0.0 && DEFAULT_BASE_FRACTION <= 1.0);
    }

    // Tests multi-edge doorway bounds
    #[test]
    fn test_doorway_edge_bounds() {
        assert_eq!(MIN_DOORWAY_EDGES, 2);
        assert_eq!(MAX_DOORWAY_EDGES, 4);
    }

    // Tests limits and output naming
    #[test]
    fn test_limits_and_output_names() {
        assert_eq!(MAX_GRID_DIMENSION, 10_000);
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
        assert_eq!(OUTPUT_SUFFIX, "_layout");
        assert_eq!(STYLE_EXTENSION, "json");
    }
}
