//! Tests for PNG preview rendering and export

#[cfg(test)]
mod tests {
    use roomgen::io::image::{export_layout_as_png, render_layout};
    use roomgen::io::style::{FloorStyle, MeshRef, TileEntry, WallModule, WallStyle};
    use roomgen::spatial::geometry::Footprint;
    use roomgen::{GenerationError, RoomConfig, RoomGenerator};
    use tempfile::TempDir;

    fn generated_room(width: usize, height: usize) -> RoomGenerator {
        let config = RoomConfig {
            seed: Some(3),
            floor: Some(FloorStyle {
                tile_pool: vec![TileEntry::new("floor", Footprint::new(1, 1), 1.0)],
            }),
            walls: Some(WallStyle {
                modules: vec![WallModule::new("wall", 1)],
                corner_mesh: Some(MeshRef::new("corner")),
                ..WallStyle::default()
            }),
            ..RoomConfig::default()
        };
        let mut generator = RoomGenerator::new();
        generator
            .initialize(config, width, height)
            .expect("valid configuration");
        generator.generate_all().expect("generation succeeds");
        generator
    }

    // Tests the image covers the grid plus a one-cell ring
    // Verified by dropping the ring from the size calculation
    #[test]
    fn test_render_dimensions() {
        let generator = generated_room(5, 3);

        let image = render_layout(&generator, 4).expect("render");

        assert_eq!(image.dimensions(), (7 * 4, 5 * 4));
    }

    // Tests ring cells are painted for walls and corners
    #[test]
    fn test_render_paints_ring() {
        let generator = generated_room(4, 4);

        let image = render_layout(&generator, 2).expect("render");

        // Corner at (-1, -1), wall at (-1, 0) and floor at (0, 0)
        let alpha = |x: u32, y: u32| image.get_pixel(x, y).0[3];
        assert_eq!(alpha(0, 0), 255);
        assert_eq!(alpha(0, 2), 255);
        assert_eq!(alpha(3, 3), 255);
        assert_ne!(image.get_pixel(0, 2), image.get_pixel(2, 2));
    }

    // Tests rendering needs a grid and a positive block size
    #[test]
    fn test_render_errors() {
        let generator = generated_room(3, 3);
        assert!(matches!(
            render_layout(&generator, 0),
            Err(GenerationError::InvalidParameter { .. })
        ));

        let mut empty = RoomGenerator::new();
        empty
            .initialize(RoomConfig::default(), 3, 3)
            .expect("valid configuration");
        assert!(matches!(
            render_layout(&empty, 4),
            Err(GenerationError::GridNotCreated { .. })
        ));
    }

    // Tests export creates missing parent directories
    // Verified by disabling directory creation
    #[test]
    fn test_export_creates_file() {
        let temp_dir = TempDir::new().expect("temp dir");
        let output = temp_dir.path().join("previews").join("room.png");
        let generator = generated_room(4, 3);

        export_layout_as_png(&generator, &output, 8).expect("export");

        assert!(output.exists());
        let reloaded = image::open(&output).expect("readable png");
        assert_eq!((reloaded.width(), reloaded.height()), (6 * 8, 5 * 8));
    }
}
