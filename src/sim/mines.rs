//! Minesweeper board: generation, flags and flood reveal

use super::Outcome;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Offsets of the 8 surrounding tiles
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub mine: bool,
    /// Mines among the 8 neighbours, fixed at generation
    pub adjacent: u8,
    pub revealed: bool,
    pub flagged: bool,
}

#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    mine_count: usize,
    tiles: Vec<Tile>,
    outcome: Outcome,
    exploded: Option<(usize, usize)>,
}

impl Board {
    /// Random board. Mines are the first `mines` positions of a shuffled list
    /// of every tile, so there are never duplicates; `mines` is capped so at
    /// least one safe tile remains.
    pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, mines: usize, rng: &mut R) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let mines = mines.min(rows * cols - 1);

        let mut positions: Vec<usize> = (0..rows * cols).collect();
        positions.shuffle(rng);

        let mut tiles = vec![Tile::default(); rows * cols];
        for &idx in &positions[..mines] {
            tiles[idx].mine = true;
        }
        Self::from_tiles(rows, cols, tiles)
    }

    /// Board with mines at the given `(row, col)` positions.
    /// Out-of-range positions are dropped and duplicates collapse.
    pub fn with_mines(rows: usize, cols: usize, mines: &[(usize, usize)]) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let mut tiles = vec![Tile::default(); rows * cols];
        for &(r, c) in mines {
            if r < rows && c < cols {
                tiles[r * cols + c].mine = true;
            }
        }
        Self::from_tiles(rows, cols, tiles)
    }

    fn from_tiles(rows: usize, cols: usize, mut tiles: Vec<Tile>) -> Self {
        let mut mine_count = 0;
        for r in 0..rows {
            for c in 0..cols {
                if !tiles[r * cols + c].mine {
                    continue;
                }
                mine_count += 1;
                for (nr, nc) in neighbors(rows, cols, r, c) {
                    tiles[nr * cols + nc].adjacent += 1;
                }
            }
        }
        Self {
            rows,
            cols,
            mine_count,
            tiles,
            outcome: Outcome::Running,
            exploded: None,
        }
    }

    /// New random layout with the same size and mine count
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::generate(self.rows, self.cols, self.mine_count, rng);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The mine that ended the game, if any
    pub fn exploded(&self) -> Option<(usize, usize)> {
        self.exploded
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        if row < self.rows && col < self.cols {
            Some(&self.tiles[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn flags_placed(&self) -> usize {
        self.tiles.iter().filter(|t| t.flagged).count()
    }

    /// Mine counter shown to the player
    pub fn mines_remaining(&self) -> usize {
        self.mine_count.saturating_sub(self.flags_placed())
    }

    pub fn revealed_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.revealed).count()
    }

    /// Reveal a tile. A mine loses the game; a zero tile floods outwards
    /// breadth-first through connected zero tiles, revealing their borders.
    /// Flagged, revealed or out-of-range tiles and finished games are ignored.
    pub fn reveal(&mut self, row: usize, col: usize) -> Outcome {
        if self.outcome.is_over() {
            return self.outcome;
        }
        let Some(tile) = self.tile(row, col) else {
            return self.outcome;
        };
        if tile.flagged || tile.revealed {
            return self.outcome;
        }
        if tile.mine {
            self.outcome = Outcome::Lost;
            self.exploded = Some((row, col));
            return self.outcome;
        }

        let mut queue = VecDeque::new();
        queue.push_back((row, col));
        while let Some((r, c)) = queue.pop_front() {
            let idx = r * self.cols + c;
            let tile = &mut self.tiles[idx];
            if tile.revealed || tile.mine || tile.flagged {
                continue;
            }
            tile.revealed = true;
            if tile.adjacent != 0 {
                continue;
            }
            for (nr, nc) in neighbors(self.rows, self.cols, r, c) {
                let n = &self.tiles[nr * self.cols + nc];
                if !n.revealed && !n.mine {
                    queue.push_back((nr, nc));
                }
            }
        }

        if self.tiles.iter().all(|t| t.mine || t.revealed) {
            self.outcome = Outcome::Won;
        }
        self.outcome
    }

    /// Flip the flag on a hidden tile. No effect on revealed tiles or once
    /// the game is over.
    pub fn toggle_flag(&mut self, row: usize, col: usize) {
        if self.outcome.is_over() || row >= self.rows || col >= self.cols {
            return;
        }
        let tile = &mut self.tiles[row * self.cols + col];
        if !tile.revealed {
            tile.flagged = !tile.flagged;
        }
    }
}

/// In-bounds neighbours of `(row, col)`; the board does not wrap
fn neighbors(rows: usize, cols: usize, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    NEIGHBORS.iter().filter_map(move |&(dr, dc)| {
        let r = row as i32 + dr;
        let c = col as i32 + dc;
        if r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols {
            Some((r as usize, c as usize))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generate_places_exact_mine_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let board = Board::generate(10, 8, 10, &mut rng);
        let mines = (0..10)
            .flat_map(|r| (0..8).map(move |c| (r, c)))
            .filter(|&(r, c)| board.tile(r, c).is_some_and(|t| t.mine))
            .count();
        assert_eq!(mines, 10);
        assert_eq!(board.mine_count(), 10);
    }

    #[test]
    fn mine_count_is_capped() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::generate(2, 2, 99, &mut rng);
        assert_eq!(board.mine_count(), 3);
        let board = Board::generate(0, 0, 5, &mut rng);
        assert_eq!((board.rows(), board.cols(), board.mine_count()), (1, 1, 0));
    }

    #[test]
    fn corner_mine_counts() {
        let board = Board::with_mines(3, 3, &[(0, 0)]);
        assert_eq!(board.tile(0, 1).map(|t| t.adjacent), Some(1));
        assert_eq!(board.tile(1, 1).map(|t| t.adjacent), Some(1));
        assert_eq!(board.tile(2, 2).map(|t| t.adjacent), Some(0));
    }

    #[test]
    fn flood_reveal_wins_open_board() {
        let mut board = Board::with_mines(3, 3, &[(0, 0)]);
        assert_eq!(board.reveal(2, 2), Outcome::Won);
        assert_eq!(board.revealed_count(), 8);
        assert!(!board.tile(0, 0).is_some_and(|t| t.revealed));
    }

    #[test]
    fn two_by_two_needs_every_safe_tile() {
        let mut board = Board::with_mines(2, 2, &[(0, 0)]);
        assert_eq!(board.reveal(1, 1), Outcome::Running);
        assert_eq!(board.revealed_count(), 1);
        assert_eq!(board.reveal(0, 1), Outcome::Running);
        assert_eq!(board.reveal(1, 0), Outcome::Won);
    }

    #[test]
    fn flood_stops_at_numbers() {
        // column of mines splits the board; reveal on the left stays left
        let mut board = Board::with_mines(3, 5, &[(0, 2), (1, 2), (2, 2)]);
        board.reveal(1, 0);
        for r in 0..3 {
            assert!(board.tile(r, 0).is_some_and(|t| t.revealed));
            assert!(board.tile(r, 1).is_some_and(|t| t.revealed));
            assert!(!board.tile(r, 3).is_some_and(|t| t.revealed));
        }
        assert_eq!(board.outcome(), Outcome::Running);
    }

    #[test]
    fn mine_loses_without_revealing() {
        let mut board = Board::with_mines(3, 3, &[(1, 1)]);
        assert_eq!(board.reveal(1, 1), Outcome::Lost);
        assert_eq!(board.exploded(), Some((1, 1)));
        assert_eq!(board.revealed_count(), 0);
        // finished games ignore further input
        board.reveal(0, 0);
        board.toggle_flag(0, 1);
        assert_eq!(board.revealed_count(), 0);
        assert_eq!(board.flags_placed(), 0);
    }

    #[test]
    fn flags_block_reveal_and_flood() {
        let mut board = Board::with_mines(1, 5, &[(0, 4)]);
        board.toggle_flag(0, 0);
        assert_eq!(board.reveal(0, 0), Outcome::Running);
        assert_eq!(board.revealed_count(), 0);

        board.toggle_flag(0, 1);
        board.toggle_flag(0, 0);
        board.reveal(0, 0);
        // flood stops at the flag on (0, 1)
        assert_eq!(board.revealed_count(), 1);
        assert_eq!(board.mines_remaining(), 0);
    }

    #[test]
    fn revealed_tiles_cannot_be_flagged() {
        let mut board = Board::with_mines(2, 3, &[(0, 2)]);
        board.reveal(1, 0);
        board.toggle_flag(1, 0);
        assert!(!board.tile(1, 0).is_some_and(|t| t.flagged));
        board.toggle_flag(5, 5);
        assert_eq!(board.flags_placed(), 0);
    }

    #[test]
    fn reset_keeps_dimensions() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut board = Board::with_mines(4, 6, &[(0, 0), (3, 5)]);
        board.reveal(0, 0);
        board.reset(&mut rng);
        assert_eq!((board.rows(), board.cols(), board.mine_count()), (4, 6, 2));
        assert_eq!(board.outcome(), Outcome::Running);
        assert_eq!(board.revealed_count(), 0);
    }
}
