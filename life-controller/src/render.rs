//! Cell ages onto an RGBA raster.
//!
//! Cells sit on a fixed pitch of `cell_pixel_width + 1` pixels with a one-pixel
//! grid line between neighbors and around the border. Grid lines are drawn once
//! per raster; each frame only repaints the cell interiors.

use crate::color::{ColorMode, Rgba, color_for};
use crate::config::LifeConfig;
use crate::dimensions::surface_size;
use life_grid::GridSize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let pixels = background.repeat(width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGBA bytes, four per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let index = self.pixel_index(x, y)?;
        let mut color = [0; 4];
        color.copy_from_slice(&self.pixels[index..index + 4]);
        Some(color)
    }

    /// Fills a rectangle, clipped to the raster.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }
        let row_bytes = self.width as usize * 4;
        let rows = self
            .pixels
            .chunks_exact_mut(row_bytes)
            .take(y_end as usize)
            .skip(y as usize);
        for row in rows {
            let span = &mut row[x as usize * 4..x_end as usize * 4];
            for pixel in span.chunks_exact_mut(4) {
                pixel.copy_from_slice(&color);
            }
        }
    }

    fn pixel_index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * 4)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct Renderer {
    cell_pixel_width: u32,
    grid_line_color: Rgba,
    dead_cell_color: Rgba,
    live_cell_color: Rgba,
    age_palette: Vec<Rgba>,
    raster: Option<Raster>,
}

impl Renderer {
    pub fn new(config: &LifeConfig) -> Self {
        Self {
            cell_pixel_width: config.cell_pixel_width,
            grid_line_color: config.grid_line_color,
            dead_cell_color: config.dead_cell_color,
            live_cell_color: config.live_cell_color,
            age_palette: config.age_palette.clone(),
            raster: None,
        }
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    /// Allocates a blank raster sized for `grid_size`, replacing any previous one.
    pub fn reset(&mut self, grid_size: GridSize) {
        let (width, height) = surface_size(grid_size, self.cell_pixel_width);
        self.raster = Some(Raster::new(width, height, self.dead_cell_color));
    }

    pub fn draw_grid_lines(&mut self, grid_size: GridSize) {
        let pitch = self.cell_pixel_width + 1;
        let color = self.grid_line_color;
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        let line_length_x = grid_size.width * pitch + 1;
        let line_length_y = grid_size.height * pitch + 1;

        for col in 0..=grid_size.width {
            raster.fill_rect(col * pitch, 0, 1, line_length_y, color);
        }
        for row in 0..=grid_size.height {
            raster.fill_rect(0, row * pitch, line_length_x, 1, color);
        }
    }

    pub fn draw_cells(&mut self, ages: &[u32], grid_size: GridSize, mode: ColorMode) {
        let cell = self.cell_pixel_width;
        let pitch = cell + 1;
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        debug_assert_eq!(ages.len(), grid_size.num_cells());

        for (row, row_ages) in ages.chunks_exact(grid_size.width as usize).enumerate() {
            for (col, &age) in row_ages.iter().enumerate() {
                let color = color_for(
                    age,
                    mode,
                    &self.age_palette,
                    self.dead_cell_color,
                    self.live_cell_color,
                );
                let x = col as u32 * pitch + 1;
                let y = row as u32 * pitch + 1;
                raster.fill_rect(x, y, cell, cell, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEAD_CELL_COLOR, GRID_LINE_COLOR, LIVE_CELL_COLOR};

    fn config() -> LifeConfig {
        LifeConfig {
            cell_pixel_width: 2,
            age_palette: vec![[1, 0, 0, 0xff], [2, 0, 0, 0xff], [3, 0, 0, 0xff]],
            ..LifeConfig::default()
        }
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut raster = Raster::new(4, 3, [0; 4]);
        raster.fill_rect(2, 1, 10, 10, [9; 4]);
        assert_eq!(raster.pixel(1, 1), Some([0; 4]));
        assert_eq!(raster.pixel(2, 1), Some([9; 4]));
        assert_eq!(raster.pixel(3, 2), Some([9; 4]));
        assert_eq!(raster.pixel(3, 0), Some([0; 4]));
        assert_eq!(raster.pixel(4, 0), None);
    }

    #[test]
    fn drawing_without_raster_is_a_no_op() {
        let mut renderer = Renderer::new(&config());
        let size = GridSize::new(2, 2);
        renderer.draw_grid_lines(size);
        renderer.draw_cells(&[1, 0, 0, 1], size, ColorMode::Aged);
        assert!(renderer.raster().is_none());
    }

    #[test]
    fn grid_lines_frame_every_cell() {
        let mut renderer = Renderer::new(&config());
        let size = GridSize::new(2, 2);
        renderer.reset(size);
        renderer.draw_grid_lines(size);
        let raster = renderer.raster().unwrap();

        assert_eq!((raster.width(), raster.height()), (7, 7));
        for i in 0..7 {
            for line in [0, 3, 6] {
                assert_eq!(raster.pixel(line, i), Some(GRID_LINE_COLOR));
                assert_eq!(raster.pixel(i, line), Some(GRID_LINE_COLOR));
            }
        }
        assert_eq!(raster.pixel(1, 1), Some(DEAD_CELL_COLOR));
        assert_eq!(raster.pixel(5, 4), Some(DEAD_CELL_COLOR));
    }

    #[test]
    fn cells_fill_their_blocks_only() {
        let mut renderer = Renderer::new(&config());
        let size = GridSize::new(3, 2);
        renderer.reset(size);
        renderer.draw_grid_lines(size);
        // Row 0: dead, age 1, age 4. Row 1: age 2, dead, age 100.
        renderer.draw_cells(&[0, 1, 4, 2, 0, 100], size, ColorMode::Aged);
        let raster = renderer.raster().unwrap();

        // Cell (0, 1) covers x 4..=5, y 1..=2.
        for (x, y) in [(4, 1), (5, 1), (4, 2), (5, 2)] {
            assert_eq!(raster.pixel(x, y), Some([1, 0, 0, 0xff]));
        }
        assert_eq!(raster.pixel(3, 1), Some(GRID_LINE_COLOR));
        assert_eq!(raster.pixel(6, 1), Some(GRID_LINE_COLOR));
        assert_eq!(raster.pixel(1, 1), Some(DEAD_CELL_COLOR));
        assert_eq!(raster.pixel(7, 1), Some([3, 0, 0, 0xff]));
        assert_eq!(raster.pixel(1, 4), Some([2, 0, 0, 0xff]));
        assert_eq!(raster.pixel(4, 4), Some(DEAD_CELL_COLOR));
        assert_eq!(raster.pixel(8, 5), Some([3, 0, 0, 0xff]));
    }

    #[test]
    fn flat_mode_paints_live_color() {
        let mut renderer = Renderer::new(&config());
        let size = GridSize::new(1, 1);
        renderer.reset(size);
        renderer.draw_cells(&[9], size, ColorMode::Flat);
        assert_eq!(renderer.raster().unwrap().pixel(1, 1), Some(LIVE_CELL_COLOR));
    }

    #[test]
    fn reset_replaces_raster_size() {
        let mut renderer = Renderer::new(&config());
        renderer.reset(GridSize::new(2, 2));
        renderer.reset(GridSize::new(4, 1));
        let raster = renderer.raster().unwrap();
        assert_eq!((raster.width(), raster.height()), (13, 4));
    }
}
