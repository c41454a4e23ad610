//! Immutable sliding-puzzle boards.
//!
//! This module defines:
//! - `Direction`: the four ways the blank can travel across the grid.
//! - `Board`: one `n`×`n` configuration of tiles. It computes the distance
//!   heuristics, the goal test, neighboring boards and the "twin" board used by
//!   the solver to detect unsolvable inputs.
//!
//! Boards are never modified after construction. Every derived board
//! (a neighbor, a twin, the result of a slide) is a fresh value.
use crate::error::{PuzzleError, Result};
use crate::heuristics;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// Direction in which the blank travels during one slide.
///
/// Moving the blank `Down` slides the tile below it up into the gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order neighbors and twin candidates are scanned.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    /// Row and column delta applied to the blank.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The direction that undoes this one.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One configuration of an `n`×`n` sliding puzzle.
///
/// Tiles are stored row-major in a flat array; `0` is the blank. The blank's
/// index is cached so slides do not have to search for it.
///
/// # Examples
/// ```
/// use npuzzle_solver::board::Board;
///
/// let board = Board::new(&[vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 0]]).unwrap();
/// assert!(board.is_goal());
/// assert_eq!(board.neighbors().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    n: usize,
    tiles: Box<[u32]>,
    blank: usize,
}

impl Board {
    /// Builds a board from its rows.
    ///
    /// # Errors
    /// Returns `PuzzleError::InvalidArgument` if `rows` is empty, if any row
    /// does not have exactly `rows.len()` entries, or if the entries are not a
    /// permutation of `0..n²`.
    pub fn new(rows: &[Vec<u32>]) -> Result<Self> {
        let n = rows.len();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(PuzzleError::InvalidArgument(format!(
                    "row {} has {} tiles, expected {}",
                    r,
                    row.len(),
                    n
                )));
            }
        }
        Self::from_tiles(n, rows.concat())
    }

    /// Builds a board from `n²` tiles listed row by row.
    ///
    /// # Errors
    /// Returns `PuzzleError::InvalidArgument` if `n` is zero, if `tiles` has the
    /// wrong length, or if a value is out of range or repeated.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::board::Board;
    ///
    /// assert!(Board::from_tiles(2, vec![1, 2, 3, 0]).unwrap().is_goal());
    /// assert!(Board::from_tiles(2, vec![1, 1, 3, 0]).is_err());
    /// ```
    pub fn from_tiles(n: usize, tiles: Vec<u32>) -> Result<Self> {
        if n == 0 {
            return Err(PuzzleError::InvalidArgument(
                "board dimension must be at least 1".to_string(),
            ));
        }
        let cells = n
            .checked_mul(n)
            .filter(|&cells| cells <= u32::MAX as usize)
            .ok_or_else(|| {
                PuzzleError::InvalidArgument(format!("board dimension {} is too large", n))
            })?;
        if tiles.len() != cells {
            return Err(PuzzleError::InvalidArgument(format!(
                "expected {} tiles for a {}x{} board, found {}",
                cells,
                n,
                n,
                tiles.len()
            )));
        }

        let mut seen = vec![false; cells];
        let mut blank = 0;
        for (i, &tile) in tiles.iter().enumerate() {
            let value = tile as usize;
            if value >= cells {
                return Err(PuzzleError::InvalidArgument(format!(
                    "tile {} is out of range 0..{}",
                    tile, cells
                )));
            }
            if seen[value] {
                return Err(PuzzleError::InvalidArgument(format!(
                    "tile {} appears more than once",
                    tile
                )));
            }
            seen[value] = true;
            if tile == 0 {
                blank = i;
            }
        }

        Ok(Board {
            n,
            tiles: tiles.into_boxed_slice(),
            blank,
        })
    }

    /// Returns the solved `n`×`n` board.
    ///
    /// # Errors
    /// Returns `PuzzleError::InvalidArgument` if `n` is zero.
    pub fn goal(n: usize) -> Result<Self> {
        let cells = n.checked_mul(n).unwrap_or(0);
        Self::from_tiles(n, (0..cells).map(|i| heuristics::goal_tile(n, i)).collect())
    }

    /// Returns a solvable board produced by `walk_len` random slides from the goal.
    ///
    /// Immediate back-tracking is avoided where another slide exists, so the
    /// walk drifts away from the goal. The same `seed` always yields the same board.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::board::Board;
    ///
    /// let a = Board::scrambled(3, 30, 7).unwrap();
    /// let b = Board::scrambled(3, 30, 7).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn scrambled(n: usize, walk_len: usize, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Self::goal(n)?;
        let mut last: Option<Direction> = None;

        for _ in 0..walk_len {
            let mut options = board.legal_directions();
            if options.len() > 1 {
                if let Some(previous) = last {
                    options.retain(|&d| d != previous.opposite());
                }
            }
            let Some(&dir) = options.choose(&mut rng) else {
                break; // 1x1 board, nothing can move
            };
            if let Some(next) = board.slide(dir) {
                board = next;
                last = Some(dir);
            }
        }
        Ok(board)
    }

    /// Returns a uniformly shuffled board. Roughly half of these are unsolvable.
    pub fn shuffled(n: usize, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let cells = n.checked_mul(n).unwrap_or(0);
        let mut tiles: Vec<u32> = (0..cells as u32).collect();
        tiles.shuffle(&mut rng);
        Self::from_tiles(n, tiles)
    }

    /// Board dimension `n`.
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Returns the tile at (`row`, `col`); `0` is the blank.
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below `dimension()`.
    pub fn tile(&self, row: usize, col: usize) -> u32 {
        assert!(row < self.n && col < self.n, "cell ({}, {}) is off the board", row, col);
        self.tiles[row * self.n + col]
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// (row, col) of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.n, self.blank % self.n)
    }

    /// Number of tiles out of place.
    pub fn hamming(&self) -> usize {
        heuristics::hamming(self)
    }

    /// Sum of the Manhattan distances from each tile to its goal cell.
    pub fn manhattan(&self) -> usize {
        heuristics::manhattan(self)
    }

    /// Is this the solved configuration?
    pub fn is_goal(&self) -> bool {
        self.hamming() == 0
    }

    // Index of the cell the blank would move to, if it stays on the board.
    fn step(&self, dir: Direction) -> Option<usize> {
        let (dr, dc) = dir.offset();
        let (row, col) = self.blank_position();
        let new_row = row.checked_add_signed(dr).filter(|&r| r < self.n)?;
        let new_col = col.checked_add_signed(dc).filter(|&c| c < self.n)?;
        Some(new_row * self.n + new_col)
    }

    // New board with cells `a` and `b` exchanged.
    fn swapped(&self, a: usize, b: usize) -> Board {
        let mut tiles = self.tiles.clone();
        tiles.swap(a, b);
        let blank = if self.blank == a {
            b
        } else if self.blank == b {
            a
        } else {
            self.blank
        };
        Board {
            n: self.n,
            tiles,
            blank,
        }
    }

    /// Moves the blank one cell in `dir`, returning the new board, or `None`
    /// when that would leave the grid.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::board::{Board, Direction};
    ///
    /// let goal = Board::goal(3).unwrap();
    /// assert!(goal.slide(Direction::Down).is_none());
    /// let moved = goal.slide(Direction::Left).unwrap();
    /// assert_eq!(moved.tile(2, 2), 8);
    /// assert_eq!(moved.blank_position(), (2, 1));
    /// ```
    pub fn slide(&self, dir: Direction) -> Option<Board> {
        self.step(dir).map(|target| self.swapped(self.blank, target))
    }

    /// Directions in which the blank can move, in `Direction::ALL` order.
    pub fn legal_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&d| self.step(d).is_some())
            .collect()
    }

    /// All boards reachable with a single slide.
    ///
    /// Two for a corner blank, three on an edge, four in the interior, none on
    /// a 1x1 board. Callers must not depend on the order.
    pub fn neighbors(&self) -> Vec<Board> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.slide(d))
            .collect()
    }

    /// A board equal to this one except that two tiles next to the blank are exchanged.
    ///
    /// The pair is the first two cells found next to the blank when scanning
    /// below, above, right, left. Exchanging two tiles flips the permutation
    /// parity, so exactly one of a board and its twin is solvable.
    ///
    /// Returns `None` when fewer than two tiles touch the blank, which only
    /// happens on a 1x1 board.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::board::Board;
    ///
    /// let board = Board::new(&[vec![1, 0], vec![2, 3]]).unwrap();
    /// let twin = board.twin().unwrap();
    /// assert_eq!(twin.tiles(), &[3, 0, 2, 1]);
    /// assert!(Board::goal(1).unwrap().twin().is_none());
    /// ```
    pub fn twin(&self) -> Option<Board> {
        let mut around_blank = Direction::ALL.iter().filter_map(|&d| self.step(d));
        let first = around_blank.next()?;
        let second = around_blank.next()?;
        Some(self.swapped(first, second))
    }
}

impl fmt::Display for Board {
    /// Writes `n` on the first line, then one line of space-separated tiles per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.n * self.n - 1).to_string().len();
        write!(f, "{}", self.n)?;
        for row in self.tiles.chunks(self.n) {
            writeln!(f)?;
            for (c, tile) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", tile, width = width)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u32]]) -> Board {
        let rows: Vec<Vec<u32>> = rows.iter().map(|r| r.to_vec()).collect();
        Board::new(&rows).unwrap()
    }

    fn differing_cells(a: &Board, b: &Board) -> usize {
        a.tiles()
            .iter()
            .zip(b.tiles())
            .filter(|(x, y)| x != y)
            .count()
    }

    #[test]
    fn test_goal_board() {
        let goal = Board::goal(3).unwrap();
        assert_eq!(goal.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(goal.blank_position(), (2, 2));
        assert_eq!(goal.dimension(), 3);
        assert!(goal.is_goal());
        assert_eq!(goal.hamming(), 0);
        assert_eq!(goal.manhattan(), 0);
    }

    #[test]
    fn test_new_reads_rows() {
        let b = board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]);
        assert_eq!(b.tile(0, 0), 8);
        assert_eq!(b.tile(1, 2), 2);
        assert_eq!(b.blank_position(), (1, 1));
        assert!(!b.is_goal());
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let rows = vec![vec![1, 2, 3], vec![4, 0], vec![5, 6, 7]];
        let err = Board::new(&rows).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidArgument(_)));
        assert!(err.to_string().contains("row 1 has 2 tiles"));
    }

    #[test]
    fn test_from_tiles_rejects_bad_permutations() {
        assert!(matches!(
            Board::from_tiles(2, vec![1, 2, 2, 0]),
            Err(PuzzleError::InvalidArgument(_))
        ));
        assert!(matches!(
            Board::from_tiles(2, vec![1, 2, 4, 0]),
            Err(PuzzleError::InvalidArgument(_))
        ));
        assert!(matches!(
            Board::from_tiles(2, vec![1, 2, 0]),
            Err(PuzzleError::InvalidArgument(_))
        ));
        assert!(matches!(
            Board::from_tiles(0, vec![]),
            Err(PuzzleError::InvalidArgument(_))
        ));
        let no_rows: Vec<Vec<u32>> = Vec::new();
        assert!(Board::new(&no_rows).is_err());
    }

    #[test]
    fn test_one_by_one_board_is_goal() {
        let b = Board::from_tiles(1, vec![0]).unwrap();
        assert!(b.is_goal());
        assert!(b.neighbors().is_empty());
        assert!(b.twin().is_none());
        assert!(b.legal_directions().is_empty());
    }

    #[test]
    fn test_goal_test_agrees_with_distances() {
        for seed in 0..30 {
            let b = Board::scrambled(3, (seed % 6) as usize, seed).unwrap();
            assert_eq!(b.is_goal(), b.hamming() == 0);
            assert_eq!(b.is_goal(), b.manhattan() == 0);
        }
    }

    #[test]
    fn test_equality_is_structural() {
        let a = board(&[&[1, 2], &[3, 0]]);
        let b = Board::goal(2).unwrap();
        let c = board(&[&[1, 2], &[0, 3]]);
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, c);
        assert_ne!(Board::goal(2).unwrap(), Board::goal(3).unwrap());
    }

    #[test]
    fn test_neighbor_counts() {
        // Corner
        assert_eq!(Board::goal(3).unwrap().neighbors().len(), 2);
        // Edge
        assert_eq!(board(&[&[1, 0, 3], &[4, 2, 5], &[7, 8, 6]]).neighbors().len(), 3);
        // Interior
        assert_eq!(board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]).neighbors().len(), 4);
        // 2x2, blank in a corner
        assert_eq!(board(&[&[1, 0], &[2, 3]]).neighbors().len(), 2);
    }

    #[test]
    fn test_neighbors_are_single_slides() {
        let b = board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]);
        let neighbors = b.neighbors();
        let expected = [
            board(&[&[8, 1, 3], &[4, 6, 2], &[7, 0, 5]]),
            board(&[&[8, 0, 3], &[4, 1, 2], &[7, 6, 5]]),
            board(&[&[8, 1, 3], &[4, 2, 0], &[7, 6, 5]]),
            board(&[&[8, 1, 3], &[0, 4, 2], &[7, 6, 5]]),
        ];
        assert_eq!(neighbors.len(), expected.len());
        for e in &expected {
            assert!(neighbors.contains(e), "missing neighbor\n{}", e);
        }
        // The source board is untouched.
        assert_eq!(b.tile(1, 1), 0);
    }

    #[test]
    fn test_neighbor_manhattan_changes_by_one() {
        for seed in 0..25 {
            let b = Board::shuffled(4, seed).unwrap();
            for nb in b.neighbors() {
                assert_eq!(b.manhattan().abs_diff(nb.manhattan()), 1, "seed {}", seed);
                assert_eq!(differing_cells(&b, &nb), 2);
            }
        }
    }

    #[test]
    fn test_slide_and_opposite_round_trip() {
        let b = board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]);
        for dir in Direction::ALL {
            let moved = b.slide(dir).unwrap();
            assert_eq!(moved.slide(dir.opposite()).unwrap(), b);
        }
    }

    #[test]
    fn test_legal_directions_at_corner() {
        let goal = Board::goal(3).unwrap();
        assert_eq!(goal.legal_directions(), vec![Direction::Up, Direction::Left]);
    }

    #[test]
    fn test_twin_swaps_two_tiles_next_to_blank() {
        let b = board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]);
        let twin = b.twin().unwrap();
        // Below (6) and above (1) are exchanged.
        assert_eq!(twin, board(&[&[8, 6, 3], &[4, 0, 2], &[7, 1, 5]]));
        assert_eq!(twin.blank_position(), b.blank_position());
    }

    #[test]
    fn test_twin_differs_in_exactly_two_cells() {
        for seed in 0..30 {
            let b = Board::shuffled(3, seed).unwrap();
            let twin = b.twin().unwrap();
            assert_eq!(differing_cells(&b, &twin), 2);
            assert_eq!(twin.blank_position(), b.blank_position());
            assert_eq!(b.twin().unwrap(), twin, "twin must be deterministic");
        }
    }

    #[test]
    fn test_scrambled_is_deterministic_and_valid() {
        let a = Board::scrambled(4, 50, 514514).unwrap();
        let b = Board::scrambled(4, 50, 514514).unwrap();
        assert_eq!(a, b);
        let mut sorted = a.tiles().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<u32>>());
        assert_eq!(Board::scrambled(3, 0, 1).unwrap(), Board::goal(3).unwrap());
        assert!(Board::scrambled(1, 10, 1).unwrap().is_goal());
    }

    #[test]
    fn test_shuffled_with_seed_determinism() {
        assert_eq!(Board::shuffled(3, 42).unwrap(), Board::shuffled(3, 42).unwrap());
        let distinct = (0..10)
            .map(|seed| Board::shuffled(3, seed).unwrap())
            .filter(|b| *b != Board::shuffled(3, 0).unwrap())
            .count();
        assert!(distinct > 0);
    }

    #[test]
    fn test_display_format() {
        let b = board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]);
        assert_eq!(b.to_string(), "3\n8 1 3\n4 0 2\n7 6 5");

        let wide = Board::goal(4).unwrap();
        assert_eq!(
            wide.to_string(),
            "4\n 1  2  3  4\n 5  6  7  8\n 9 10 11 12\n13 14 15  0"
        );
    }

    #[test]
    fn test_direction_display_and_opposite() {
        assert_eq!(Direction::Up.to_string(), "Up");
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dr, dc) = dir.offset();
            let (or, oc) = dir.opposite().offset();
            assert_eq!((dr + or, dc + oc), (0, 0));
        }
    }
}
