//! Grid sizing from the viewport.

use life_grid::GridSize;

const WIDTH_RATIO: f64 = 0.85;
const TALL_VIEWPORT_MIN_HEIGHT: u32 = 1000;
const TALL_HEIGHT_RATIO: f64 = 0.75;
const SHORT_HEIGHT_RATIO: f64 = 0.65;

/// How many cells fit in a share of the viewport, leaving room around the grid.
/// Never returns a zero dimension, even for a minimized window.
pub fn grid_size_for_viewport(
    viewport_width: u32,
    viewport_height: u32,
    cell_pixel_width: u32,
) -> GridSize {
    let height_ratio = if viewport_height > TALL_VIEWPORT_MIN_HEIGHT {
        TALL_HEIGHT_RATIO
    } else {
        SHORT_HEIGHT_RATIO
    };
    let width = scaled_cell_count(viewport_width, cell_pixel_width, WIDTH_RATIO);
    let height = scaled_cell_count(viewport_height, cell_pixel_width, height_ratio);
    GridSize::new(width.max(1), height.max(1))
}

fn scaled_cell_count(viewport_extent: u32, cell_pixel_width: u32, ratio: f64) -> u32 {
    let cells = viewport_extent / cell_pixel_width.max(1);
    (cells as f64 * ratio).floor() as u32
}

/// Raster size holding every cell plus a one-pixel line on each side of it.
pub fn surface_size(grid_size: GridSize, cell_pixel_width: u32) -> (u32, u32) {
    let pitch = cell_pixel_width + 1;
    (grid_size.width * pitch + 1, grid_size.height * pitch + 1)
}
