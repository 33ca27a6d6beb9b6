#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! The Game of Life engine: a dense, row-major buffer of cell ages advanced
//! one generation at a time under the standard B3/S23 rule.
//!
//! A cell's age is 0 when it is dead and counts consecutive live generations
//! otherwise. The grid is toroidal: neighbors wrap around the edges.

use rand::SeedableRng;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::mem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0);
        Self { width, height }
    }

    pub fn num_cells(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, size: GridSize) -> Option<usize> {
        if self.row < size.height && self.col < size.width {
            Some(self.row as usize * size.width as usize + self.col as usize)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub struct LifeGrid {
    size: GridSize,
    cells: Vec<u32>,
    next_cells: Vec<u32>,
    generation: u64,
}

impl LifeGrid {
    /// Allocates an all-dead grid.
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![0; size.num_cells()],
            next_cells: vec![0; size.num_cells()],
            generation: 0,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Generations advanced since creation or the last [`LifeGrid::clear_grid`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Row-major view of every cell's age. The borrow ends before the next
    /// mutating call, so a snapshot can never outlive the state it shows.
    pub fn cell_ages(&self) -> &[u32] {
        &self.cells
    }

    pub fn age(&self, loc: Loc) -> Option<u32> {
        loc.grid_index(self.size).map(|index| self.cells[index])
    }

    pub fn is_alive(&self, loc: Loc) -> bool {
        self.age(loc).is_some_and(|age| age > 0)
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&age| age > 0).count()
    }

    pub fn tick(&mut self) {
        self.update_cells();
        mem::swap(&mut self.next_cells, &mut self.cells);
        self.generation += 1;
    }

    /// Flips a cell between dead and newly born. Ignores locations off the grid.
    pub fn toggle_cell(&mut self, row: u32, col: u32) {
        if let Some(index) = Loc::new(row, col).grid_index(self.size) {
            let age = &mut self.cells[index];
            *age = if *age == 0 { 1 } else { 0 };
        }
    }

    /// Brings each listed `(row, col)` to life, leaving already-live cells alone.
    pub fn set_cells(&mut self, cells: &[(u32, u32)]) {
        for &(row, col) in cells {
            if let Some(index) = Loc::new(row, col).grid_index(self.size)
                && self.cells[index] == 0
            {
                self.cells[index] = 1;
            }
        }
    }

    pub fn clear_grid(&mut self) {
        self.cells.fill(0);
        self.generation = 0;
    }

    /// Replaces the grid with fresh random life, each cell born with probability `p`.
    pub fn randomize(&mut self, rand: &mut Random, p: f64) {
        for age in self.cells.iter_mut() {
            *age = if rand.next_bool(p) { 1 } else { 0 };
        }
        self.generation = 0;
    }

    fn update_cells(&mut self) {
        let size = self.size;
        let cells = &self.cells;
        self.next_cells
            .par_chunks_mut(size.width as usize)
            .enumerate()
            .for_each(|(row, next_row)| {
                for (col, next) in next_row.iter_mut().enumerate() {
                    let loc = Loc::new(row as u32, col as u32);
                    let neighborhood = Neighborhood::new(cells, size, loc);
                    *next = next_age(neighborhood.center(), neighborhood.num_live_neighbors());
                }
            });
    }
}

fn next_age(age: u32, live_neighbors: u32) -> u32 {
    match (age, live_neighbors) {
        (0, 3) => 1,
        (0, _) => 0,
        (_, 2 | 3) => age.saturating_add(1),
        _ => 0,
    }
}

pub struct Neighborhood<'a> {
    cells: &'a [u32],
    width: u32,
    rows: [u32; 3],
    cols: [u32; 3],
}

impl<'a> Neighborhood<'a> {
    pub fn new(cells: &'a [u32], size: GridSize, center: Loc) -> Self {
        let (row_above, row_below) = Self::adjacent_indexes(center.row, size.height);
        let (col_left, col_right) = Self::adjacent_indexes(center.col, size.width);
        Self {
            cells,
            width: size.width,
            rows: [row_above, center.row, row_below],
            cols: [col_left, center.col, col_right],
        }
    }

    pub fn center(&self) -> u32 {
        self.cell(1, 1)
    }

    pub fn cell(&self, row: u32, col: u32) -> u32 {
        let row = self.rows[row as usize] as usize;
        let col = self.cols[col as usize] as usize;
        self.cells[row * self.width as usize + col]
    }

    pub fn num_live_neighbors(&self) -> u32 {
        let mut result = 0;
        self.for_neighbor_cells(|age| {
            if age > 0 {
                result += 1;
            }
        });
        result
    }

    /// Visits the eight surrounding cells. On grids one or two cells across,
    /// wrapped positions that land back on the center are skipped.
    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(u32),
    {
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) == (1, 1) || self.is_center(row, col) {
                    continue;
                }
                f(self.cell(row, col));
            }
        }
    }

    fn is_center(&self, row: u32, col: u32) -> bool {
        self.rows[row as usize] == self.rows[1] && self.cols[col as usize] == self.cols[1]
    }

    fn adjacent_indexes(cell_index: u32, max: u32) -> (u32, u32) {
        (
            Self::modulo(cell_index as i64 - 1, max),
            Self::modulo(cell_index as i64 + 1, max),
        )
    }

    fn modulo(val: i64, max: u32) -> u32 {
        val.rem_euclid(max as i64) as u32
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
