//! Pointer positions to cells, and click versus drag-paint.

use life_grid::{GridSize, Loc};

/// A pointer position in raster pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The cell under the pointer, clamped onto the grid.
    pub fn cell(&self, grid_size: GridSize, cell_pixel_width: u32) -> Loc {
        let pitch = (cell_pixel_width + 1) as f64;
        let clamp = |pos: f64, cells: u32| ((pos / pitch).floor().max(0.0) as u32).min(cells - 1);
        Loc::new(clamp(self.y, grid_size.height), clamp(self.x, grid_size.width))
    }
}

/// One press-move-release interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerGesture {
    active: bool,
    last_cell: Option<Loc>,
}

impl PointerGesture {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_cell(&self) -> Option<Loc> {
        self.last_cell
    }

    /// Begins a gesture on `cell`, which is always toggled, so a plain click
    /// can erase as well as paint.
    pub fn press(&mut self, cell: Loc) -> Loc {
        self.active = true;
        self.last_cell = Some(cell);
        cell
    }

    /// Continues a gesture onto `cell`. Returns the cell to toggle, if any.
    ///
    /// A drag only paints: it skips the cell it is still on and any live cell.
    /// Only the previous cell is remembered, so re-entering a cell that was
    /// killed mid-drag paints it again.
    pub fn move_to<F>(&mut self, cell: Loc, is_alive: F) -> Option<Loc>
    where
        F: Fn(Loc) -> bool,
    {
        if !self.active {
            return None;
        }
        let repeated = self.last_cell == Some(cell);
        self.last_cell = Some(cell);
        if repeated || is_alive(cell) {
            None
        } else {
            Some(cell)
        }
    }

    pub fn release(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    fn size() -> GridSize {
        GridSize::new(10, 4)
    }

    #[test]
    fn position_maps_to_cell_on_pitch() {
        // Cell pixel width 5 puts a new cell every 6 pixels.
        assert_eq!(PointerPos::new(0.0, 0.0).cell(size(), 5), Loc::new(0, 0));
        assert_eq!(PointerPos::new(5.9, 5.9).cell(size(), 5), Loc::new(0, 0));
        assert_eq!(PointerPos::new(6.0, 12.0).cell(size(), 5), Loc::new(2, 1));
    }

    #[test]
    fn position_past_the_grid_is_clamped() {
        assert_eq!(PointerPos::new(1000.0, 1000.0).cell(size(), 5), Loc::new(3, 9));
        assert_eq!(PointerPos::new(-4.0, -1.0).cell(size(), 5), Loc::new(0, 0));
    }

    #[test]
    fn drag_paints_each_new_cell_once() {
        let alive = RefCell::new(HashSet::new());
        let mut gesture = PointerGesture::default();
        let mut toggled = vec![];
        let mut visit = |gesture: &mut PointerGesture, first: bool, loc: Loc| {
            let is_alive = |loc| alive.borrow().contains(&loc);
            let cell = if first {
                Some(gesture.press(loc))
            } else {
                gesture.move_to(loc, is_alive)
            };
            if let Some(cell) = cell {
                alive.borrow_mut().insert(cell);
                toggled.push(cell);
            }
        };

        visit(&mut gesture, true, Loc::new(0, 0));
        visit(&mut gesture, false, Loc::new(0, 1));
        visit(&mut gesture, false, Loc::new(0, 1));
        visit(&mut gesture, false, Loc::new(0, 2));
        visit(&mut gesture, false, Loc::new(0, 1));
        gesture.release();

        assert_eq!(toggled, vec![Loc::new(0, 0), Loc::new(0, 1), Loc::new(0, 2)]);
        assert!(!gesture.is_active());
        assert_eq!(gesture.last_cell(), None);
    }

    #[test]
    fn drag_never_erases_live_cells() {
        let mut gesture = PointerGesture::default();
        let live = Loc::new(1, 1);
        assert_eq!(gesture.press(Loc::new(1, 0)), Loc::new(1, 0));
        assert_eq!(gesture.move_to(live, |loc| loc == live), None);
        assert_eq!(gesture.last_cell(), Some(live));
    }

    #[test]
    fn moving_back_onto_a_cell_killed_mid_drag_repaints_it() {
        let mut gesture = PointerGesture::default();
        gesture.press(Loc::new(0, 0));
        assert_eq!(gesture.move_to(Loc::new(0, 1), |_| false), Some(Loc::new(0, 1)));
        assert_eq!(gesture.move_to(Loc::new(0, 0), |_| false), Some(Loc::new(0, 0)));
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut gesture = PointerGesture::default();
        assert_eq!(gesture.move_to(Loc::new(0, 0), |_| false), None);
        assert_eq!(gesture.last_cell(), None);
    }

    #[test]
    fn new_press_on_same_cell_toggles_again() {
        let mut gesture = PointerGesture::default();
        gesture.press(Loc::new(0, 0));
        assert_eq!(gesture.move_to(Loc::new(0, 0), |_| false), None);
        gesture.release();
        assert_eq!(gesture.press(Loc::new(0, 0)), Loc::new(0, 0));
    }
}
