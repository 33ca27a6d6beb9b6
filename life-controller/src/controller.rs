use crate::color::ColorMode;
use crate::config::LifeConfig;
use crate::dimensions::{grid_size_for_viewport, surface_size};
use crate::input::{PointerGesture, PointerPos};
use crate::render::{Raster, Renderer};
use crate::scheduler::Scheduler;
use life_grid::{GridSize, LifeGrid, Loc, Random};
use log::{debug, info};
use std::time::Instant;

/// Everything the window needs between events: the live grid, the raster it is
/// drawn on, the animation timer, the color mode and the pointer gesture.
///
/// Until the first [`Controller::on_resize`] there is no grid and no raster,
/// and every other handler does nothing.
#[derive(Debug)]
pub struct Controller {
    config: LifeConfig,
    grid: Option<LifeGrid>,
    renderer: Renderer,
    scheduler: Scheduler,
    color_mode: ColorMode,
    gesture: PointerGesture,
    rand: Random,
    needs_present: bool,
}

impl Controller {
    pub fn new(config: LifeConfig) -> Self {
        Self::with_random(config, Random::new())
    }

    pub fn with_random(config: LifeConfig, rand: Random) -> Self {
        Self {
            renderer: Renderer::new(&config),
            scheduler: Scheduler::new(config.tick_interval),
            config,
            grid: None,
            color_mode: ColorMode::default(),
            gesture: PointerGesture::default(),
            rand,
            needs_present: false,
        }
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn grid(&self) -> Option<&LifeGrid> {
        self.grid.as_ref()
    }

    pub fn grid_size(&self) -> Option<GridSize> {
        self.grid.as_ref().map(LifeGrid::size)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn gesture(&self) -> PointerGesture {
        self.gesture
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.renderer.raster()
    }

    /// When the host should next call [`Controller::on_wakeup`].
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Whether the raster changed since the last call.
    pub fn take_needs_present(&mut self) -> bool {
        std::mem::take(&mut self.needs_present)
    }

    /// Rebuilds the grid for a new viewport. Any running animation is stopped
    /// first so no tick can reach the grid being replaced. Returns the size of
    /// the new raster.
    pub fn on_resize(&mut self, viewport_width: u32, viewport_height: u32) -> (u32, u32) {
        self.stop();
        let grid_size =
            grid_size_for_viewport(viewport_width, viewport_height, self.config.cell_pixel_width);
        info!(
            "viewport {}x{}: {}x{} cells",
            viewport_width, viewport_height, grid_size.width, grid_size.height
        );

        self.gesture.release();
        self.grid = Some(LifeGrid::new(grid_size));
        self.renderer.reset(grid_size);
        self.renderer.draw_grid_lines(grid_size);
        self.redraw();
        surface_size(grid_size, self.config.cell_pixel_width)
    }

    pub fn on_start_stop(&mut self, now: Instant) {
        if self.scheduler.is_running() {
            self.stop();
            return;
        }
        let Self {
            grid,
            renderer,
            scheduler,
            color_mode,
            needs_present,
            ..
        } = self;
        let Some(grid) = grid.as_mut() else {
            return;
        };
        scheduler.start(now, || {
            Self::cycle(grid, renderer, *color_mode);
            *needs_present = true;
        });
        info!("started at generation {}", grid.generation());
    }

    /// Runs the animation if its timer is due. Returns whether a generation
    /// was advanced.
    pub fn on_wakeup(&mut self, now: Instant) -> bool {
        let Self {
            grid,
            renderer,
            scheduler,
            color_mode,
            needs_present,
            ..
        } = self;
        let Some(grid) = grid.as_mut() else {
            scheduler.stop();
            return false;
        };
        scheduler.poll(now, || {
            Self::cycle(grid, renderer, *color_mode);
            *needs_present = true;
        })
    }

    pub fn on_clear(&mut self) {
        if let Some(grid) = self.grid.as_mut() {
            grid.clear_grid();
            info!("cleared");
            self.redraw();
        }
    }

    pub fn on_randomize(&mut self) {
        if let Some(grid) = self.grid.as_mut() {
            grid.randomize(&mut self.rand, self.config.random_life_odds);
            info!("randomized: {} live cells", grid.live_count());
            self.redraw();
        }
    }

    pub fn on_color_mode_changed(&mut self) {
        self.color_mode = self.color_mode.toggled();
        info!("color mode {:?}", self.color_mode);
        self.redraw();
    }

    pub fn on_pointer_down(&mut self, pos: PointerPos) {
        let Some(cell) = self.pointer_cell(pos) else {
            return;
        };
        let cell = self.gesture.press(cell);
        self.toggle(cell);
    }

    pub fn on_pointer_move(&mut self, pos: PointerPos) {
        let (Some(cell), Some(grid)) = (self.pointer_cell(pos), self.grid.as_ref()) else {
            return;
        };
        if let Some(cell) = self.gesture.move_to(cell, |loc| grid.is_alive(loc)) {
            self.toggle(cell);
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.gesture.release();
    }

    fn pointer_cell(&self, pos: PointerPos) -> Option<Loc> {
        self.grid_size().map(|size| pos.cell(size, self.config.cell_pixel_width))
    }

    fn toggle(&mut self, cell: Loc) {
        if let Some(grid) = self.grid.as_mut() {
            grid.toggle_cell(cell.row, cell.col);
            debug!("toggled ({}, {})", cell.row, cell.col);
            self.redraw();
        }
    }

    fn stop(&mut self) {
        if self.scheduler.is_running() {
            self.scheduler.stop();
            info!(
                "stopped at generation {}",
                self.grid.as_ref().map_or(0, LifeGrid::generation)
            );
        }
    }

    fn redraw(&mut self) {
        if let Some(grid) = self.grid.as_ref() {
            self.renderer.draw_cells(grid.cell_ages(), grid.size(), self.color_mode);
            self.needs_present = true;
        }
    }

    fn cycle(grid: &mut LifeGrid, renderer: &mut Renderer, color_mode: ColorMode) {
        grid.tick();
        renderer.draw_cells(grid.cell_ages(), grid.size(), color_mode);
    }
}
