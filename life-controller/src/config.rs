use crate::color::Rgba;
use std::time::Duration;

pub const CELL_PIXEL_WIDTH: u32 = 5;
pub const TICK_INTERVAL_MILLIS: u64 = 200;
pub const RANDOM_LIFE_ODDS: f64 = 0.3;

pub const GRID_LINE_COLOR: Rgba = [0xcc, 0xcc, 0xcc, 0xff];
pub const DEAD_CELL_COLOR: Rgba = [0xff, 0xff, 0xff, 0xff];
pub const LIVE_CELL_COLOR: Rgba = [0x00, 0x00, 0x00, 0xff];

/// Age buckets from newborn (age 1) to ancient (age 512 and up), cool to hot.
pub const AGE_PALETTE: [Rgba; 10] = [
    [0x31, 0x36, 0x95, 0xff],
    [0x45, 0x75, 0xb4, 0xff],
    [0x74, 0xad, 0xd1, 0xff],
    [0x4d, 0xac, 0x26, 0xff],
    [0xb8, 0xe1, 0x86, 0xff],
    [0xfe, 0xe0, 0x90, 0xff],
    [0xfd, 0xae, 0x61, 0xff],
    [0xf4, 0x6d, 0x43, 0xff],
    [0xd7, 0x30, 0x27, 0xff],
    [0xa5, 0x00, 0x26, 0xff],
];

#[derive(Clone, Debug)]
pub struct LifeConfig {
    pub cell_pixel_width: u32,
    pub tick_interval: Duration,
    pub grid_line_color: Rgba,
    pub dead_cell_color: Rgba,
    pub live_cell_color: Rgba,
    pub age_palette: Vec<Rgba>,
    pub random_life_odds: f64,
}

impl LifeConfig {
    /// Pixel distance from one cell's top-left corner to the next: the cell
    /// plus the one-pixel grid line.
    pub fn cell_pitch(&self) -> u32 {
        self.cell_pixel_width + 1
    }
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            cell_pixel_width: CELL_PIXEL_WIDTH,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MILLIS),
            grid_line_color: GRID_LINE_COLOR,
            dead_cell_color: DEAD_CELL_COLOR,
            live_cell_color: LIVE_CELL_COLOR,
            age_palette: AGE_PALETTE.to_vec(),
            random_life_odds: RANDOM_LIFE_ODDS,
        }
    }
}
