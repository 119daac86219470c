//! PNG preview of a generated room
//!
//! One square block of pixels per cell, with a one-cell ring around the grid
//! so walls, doorways and corners on the outer boundary are visible.

use image::{ImageBuffer, Rgba, RgbaImage};
use std::collections::BTreeMap;
use std::path::Path;

use crate::algorithm::corners::CornerPosition;
use crate::algorithm::executor::RoomGenerator;
use crate::io::error::{GenerationError, Result, file_system_error, invalid_parameter};
use crate::spatial::grid::{CellType, GridCoord};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const WALL: Rgba<u8> = Rgba([60, 60, 70, 255]);
const DOORWAY: Rgba<u8> = Rgba([200, 120, 40, 255]);
const CORNER: Rgba<u8> = Rgba([30, 30, 35, 255]);

const fn cell_color(state: CellType) -> Rgba<u8> {
    match state {
        CellType::Empty | CellType::Custom => Rgba([235, 235, 225, 255]),
        CellType::FloorMesh => Rgba([150, 190, 140, 255]),
        CellType::Reserved => Rgba([210, 90, 90, 255]),
        CellType::WallBoundary => WALL,
        CellType::Doorway => DOORWAY,
        CellType::Void => TRANSPARENT,
    }
}

/// Render the generator's grid and boundary pieces to a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - No grid has been created
/// - `pixels_per_cell` is zero
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layout_as_png(
    generator: &RoomGenerator,
    output_path: &Path,
    pixels_per_cell: u32,
) -> Result<()> {
    let image = render_layout(generator, pixels_per_cell)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    image
        .save(output_path)
        .map_err(|e| GenerationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Render the generator's grid and boundary pieces to an image
///
/// # Errors
///
/// Returns `GridNotCreated` without a grid and `InvalidParameter` for a zero
/// block size.
pub fn render_layout(generator: &RoomGenerator, pixels_per_cell: u32) -> Result<RgbaImage> {
    if pixels_per_cell == 0 {
        return Err(invalid_parameter(
            "pixels_per_cell",
            &pixels_per_cell,
            &"must be at least 1",
        ));
    }
    let grid = generator.grid().ok_or(GenerationError::GridNotCreated {
        operation: "render_layout",
    })?;

    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut colors: BTreeMap<GridCoord, Rgba<u8>> = grid
        .iter()
        .map(|(coord, state)| (coord, cell_color(state)))
        .collect();

    for wall in generator.walls() {
        for &cell in &wall.segment.cells {
            colors.insert(cell, WALL);
        }
    }
    for &cell in generator.doorway_cells() {
        colors.insert(cell, DOORWAY);
    }
    for corner in generator.corners() {
        let cell = match corner.corner {
            CornerPosition::SouthWest => Some(GridCoord::new(-1, -1)),
            CornerPosition::SouthEast => Some(GridCoord::new(-1, height)),
            CornerPosition::NorthEast => Some(GridCoord::new(width, height)),
            CornerPosition::NorthWest => Some(GridCoord::new(width, -1)),
            CornerPosition::Interior => corner.cell,
        };
        if let Some(cell) = cell {
            colors.insert(cell, CORNER);
        }
    }

    let image_width = (grid.width() as u32 + 2) * pixels_per_cell;
    let image_height = (grid.height() as u32 + 2) * pixels_per_cell;
    let mut image = ImageBuffer::from_pixel(image_width, image_height, TRANSPARENT);

    for (coord, color) in colors {
        let (Ok(column), Ok(row)) = (u32::try_from(coord.x + 1), u32::try_from(coord.y + 1)) else {
            continue;
        };
        let left = column * pixels_per_cell;
        let top = row * pixels_per_cell;
        if left >= image_width || top >= image_height {
            continue;
        }
        for dy in 0..pixels_per_cell {
            for dx in 0..pixels_per_cell {
                image.put_pixel(left + dx, top + dy, color);
            }
        }
    }

    Ok(image)
}
