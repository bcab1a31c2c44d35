//! Conway's Game of Life on a toroidal grid

use rand::Rng;
use std::time::Duration;

/// Slowest and fastest speed multipliers
pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 10;

/// Row-major boolean grid whose edges wrap around
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build a grid from rows of text, `#` or `O` for live cells.
    /// Short rows are padded with dead cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                grid.cells[y * width + x] = matches!(ch, '#' | 'O');
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = alive;
        }
    }

    pub fn toggle(&mut self, row: usize, col: usize) {
        if row < self.height && col < self.width {
            let idx = row * self.width + col;
            self.cells[idx] = !self.cells[idx];
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Fill with a random soup, each cell alive with probability `density`.
    /// A NaN density leaves every cell dead.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        for cell in &mut self.cells {
            *cell = rng.gen_bool(density);
        }
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Live cells among the 8 neighbours, wrapping at every edge
    #[inline]
    pub fn neighbors(&self, row: usize, col: usize) -> u8 {
        let w = self.width as i64;
        let h = self.height as i64;
        let mut count = 0u8;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let ny = (row as i64 + dy).rem_euclid(h) as usize;
                let nx = (col as i64 + dx).rem_euclid(w) as usize;
                if self.cells[ny * self.width + nx] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Write the next generation into `next`, reading only `self`.
    /// `next` is resized when its dimensions differ.
    pub fn step_into(&self, next: &mut Grid) {
        if next.width != self.width || next.height != self.height {
            *next = Grid::new(self.width, self.height);
        }
        for row in 0..self.height {
            for col in 0..self.width {
                let alive = self.cells[row * self.width + col];
                let n = self.neighbors(row, col);
                next.cells[row * self.width + col] =
                    matches!((alive, n), (true, 2) | (true, 3) | (false, 3));
            }
        }
    }

    /// Next generation as a fresh grid
    pub fn step(&self) -> Grid {
        let mut next = Grid::new(self.width, self.height);
        self.step_into(&mut next);
        next
    }
}

/// A running game: double-buffered grid plus play state
pub struct Life {
    grid: Grid,
    back: Grid,
    generation: u64,
    paused: bool,
    speed: u32,
}

impl Life {
    /// Starts paused with every cell dead
    pub fn new(width: usize, height: usize, speed: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            back: Grid::new(width, height),
            generation: 0,
            paused: true,
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Tick period for the current speed (one second divided by speed)
    pub fn period(&self) -> Duration {
        Duration::from_millis(1000 / self.speed as u64)
    }

    /// Advance one generation. Whole-grid swap, so no half-updated state is
    /// ever observable.
    pub fn step(&mut self) {
        self.grid.step_into(&mut self.back);
        std::mem::swap(&mut self.grid, &mut self.back);
        self.generation += 1;
    }

    /// Flip a cell. Ignored while running or out of range.
    pub fn toggle_cell(&mut self, row: usize, col: usize) {
        if self.paused {
            self.grid.toggle(row, col);
        }
    }

    /// Kill every cell and pause
    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
        self.paused = true;
    }

    /// Replace the grid with a random soup. Same pause rule as `toggle_cell`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        if self.paused {
            self.grid.randomize(rng, density);
            self.generation = 0;
        }
    }

    /// New dimensions discard the current pattern
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.grid.width || height != self.grid.height {
            self.grid = Grid::new(width, height);
            self.back = Grid::new(width, height);
            self.generation = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn nan_density_is_an_empty_soup() {
        let mut grid = Grid::new(4, 4);
        grid.randomize(&mut StdRng::seed_from_u64(1), f64::NAN);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn empty_grid_stays_empty() {
        let grid = Grid::new(3, 3);
        assert_eq!(grid.step().live_count(), 0);
    }

    #[test]
    fn lone_cell_dies() {
        let grid = Grid::from_rows(&["....", ".#..", "....", "...."]);
        assert_eq!(grid.step().live_count(), 0);
    }

    #[test]
    fn blinker_has_period_two() {
        let start = Grid::from_rows(&[
            ".....", //
            ".....",
            ".###.",
            ".....",
            ".....",
        ]);
        let vertical = Grid::from_rows(&[
            ".....", //
            "..#..",
            "..#..",
            "..#..",
            ".....",
        ]);
        let one = start.step();
        assert_eq!(one, vertical);
        assert_eq!(one.step(), start);
    }

    #[test]
    fn neighbors_wrap_around_edges() {
        let grid = Grid::from_rows(&["#...", "....", "....", "...#"]);
        // (0,0) and (3,3) are diagonal neighbours on a torus
        assert_eq!(grid.neighbors(0, 0), 1);
        assert_eq!(grid.neighbors(3, 3), 1);
        assert_eq!(grid.neighbors(0, 3), 2);
    }

    #[test]
    fn block_is_stable_across_the_seam() {
        let grid = Grid::from_rows(&["#..#", "....", "....", "#..#"]);
        assert_eq!(grid.step(), grid);
    }

    #[test]
    fn toggle_only_while_paused() {
        let mut life = Life::new(5, 5, 1);
        life.toggle_cell(1, 1);
        assert!(life.grid().get(1, 1));

        life.set_paused(false);
        life.toggle_cell(2, 2);
        assert!(!life.grid().get(2, 2));

        // out of range is silently ignored
        life.set_paused(true);
        life.toggle_cell(9, 9);
        assert_eq!(life.grid().live_count(), 1);
    }

    #[test]
    fn step_counts_generations_and_swaps_buffers() {
        let mut life = Life::new(5, 5, 3);
        for col in 1..4 {
            life.toggle_cell(2, col);
        }
        life.step();
        life.step();
        assert_eq!(life.generation(), 2);
        assert!(life.grid().get(2, 1) && life.grid().get(2, 3));
        assert!(!life.grid().get(1, 2));
    }

    #[test]
    fn clear_pauses_and_kills() {
        let mut life = Life::new(4, 4, 5);
        let mut rng = StdRng::seed_from_u64(7);
        life.randomize(&mut rng, 1.0);
        assert_eq!(life.grid().live_count(), 16);
        life.set_paused(false);
        life.clear();
        assert!(life.is_paused());
        assert_eq!(life.grid().live_count(), 0);
    }

    #[test]
    fn speed_is_clamped_and_sets_period() {
        let mut life = Life::new(2, 2, 0);
        assert_eq!(life.speed(), MIN_SPEED);
        assert_eq!(life.period(), Duration::from_millis(1000));
        life.set_speed(40);
        assert_eq!(life.speed(), MAX_SPEED);
        assert_eq!(life.period(), Duration::from_millis(100));
    }
}
