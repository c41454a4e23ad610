use crate::board::Board;

/// Selects the distance estimate used as the `h` term of the search priority.
///
/// Both estimates are admissible, so either one yields a minimum-move solution.
/// Manhattan is never smaller than Hamming and usually expands far fewer nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Number of tiles out of place.
    Hamming,
    /// Sum of the row and column distances of every tile to its goal cell.
    #[default]
    Manhattan,
}

impl Heuristic {
    /// Evaluates this heuristic for `board`.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::board::Board;
    /// use npuzzle_solver::heuristics::Heuristic;
    ///
    /// let board = Board::new(&[vec![8, 1, 3], vec![4, 0, 2], vec![7, 6, 5]]).unwrap();
    /// assert_eq!(Heuristic::Hamming.evaluate(&board), 5);
    /// assert_eq!(Heuristic::Manhattan.evaluate(&board), 10);
    /// ```
    pub fn evaluate(self, board: &Board) -> usize {
        match self {
            Heuristic::Hamming => hamming(board),
            Heuristic::Manhattan => manhattan(board),
        }
    }

    /// Short lowercase name, used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Hamming => "hamming",
            Heuristic::Manhattan => "manhattan",
        }
    }
}

/// Returns the tile that belongs at flat `index` of a solved `n`×`n` board.
pub fn goal_tile(n: usize, index: usize) -> u32 {
    if index + 1 == n * n {
        0
    } else {
        (index + 1) as u32
    }
}

/// Returns the (row, col) goal cell of a non-blank `tile` on an `n`×`n` board.
pub fn goal_position(n: usize, tile: u32) -> (usize, usize) {
    let target = tile as usize - 1;
    (target / n, target % n)
}

/// Counts the non-blank tiles that are not in their goal cell.
pub fn hamming(board: &Board) -> usize {
    let n = board.dimension();
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(i, &tile)| tile != 0 && tile != goal_tile(n, i))
        .count()
}

/// Sums `|Δrow| + |Δcol|` between each non-blank tile and its goal cell.
///
/// A single slide moves one tile by one cell, so the value changes by exactly
/// one per move. That makes it consistent as well as admissible.
pub fn manhattan(board: &Board) -> usize {
    let n = board.dimension();
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != 0)
        .map(|(i, &tile)| {
            let (goal_row, goal_col) = goal_position(n, tile);
            (i / n).abs_diff(goal_row) + (i % n).abs_diff(goal_col)
        })
        .sum()
}

/// Counts pairs of non-blank tiles that appear in the wrong relative order
/// when the board is read row by row.
pub fn count_inversions(tiles: &[u32]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

/// Decides solvability from permutation parity.
///
/// The solver never calls this: it detects unsolvable boards by racing the
/// board against its twin. This is an independent check for tests and reports.
///
/// # Examples
/// ```
/// use npuzzle_solver::board::Board;
/// use npuzzle_solver::heuristics::is_solvable_by_parity;
///
/// let swapped = Board::new(&[vec![1, 2, 3], vec![4, 5, 6], vec![8, 7, 0]]).unwrap();
/// assert!(!is_solvable_by_parity(&swapped));
/// ```
pub fn is_solvable_by_parity(board: &Board) -> bool {
    let n = board.dimension();
    let inversions = count_inversions(board.tiles());
    if n % 2 == 1 {
        inversions % 2 == 0
    } else {
        // Even width: each vertical slide changes the blank row and the inversion
        // parity together, so their sum keeps the goal's parity.
        let (blank_row, _) = board.blank_position();
        (inversions + blank_row) % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u32]]) -> Board {
        let rows: Vec<Vec<u32>> = rows.iter().map(|r| r.to_vec()).collect();
        Board::new(&rows).unwrap()
    }

    #[test]
    fn test_goal_tile_layout() {
        let tiles: Vec<u32> = (0..9).map(|i| goal_tile(3, i)).collect();
        assert_eq!(tiles, vec![1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(goal_tile(1, 0), 0);
    }

    #[test]
    fn test_goal_position() {
        assert_eq!(goal_position(3, 1), (0, 0));
        assert_eq!(goal_position(3, 6), (1, 2));
        assert_eq!(goal_position(4, 15), (3, 2));
    }

    #[test]
    fn test_hamming_and_manhattan_reference_board() {
        let b = board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]);
        assert_eq!(hamming(&b), 5);
        assert_eq!(manhattan(&b), 10);
    }

    #[test]
    fn test_heuristics_ignore_blank() {
        // Only the blank is away from its goal cell after one slide.
        let b = board(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]);
        assert_eq!(hamming(&b), 1);
        assert_eq!(manhattan(&b), 1);
    }

    #[test]
    fn test_manhattan_never_below_hamming() {
        for seed in 0..20 {
            let b = Board::shuffled(4, seed).unwrap();
            assert!(manhattan(&b) >= hamming(&b), "seed {}", seed);
        }
    }

    #[test]
    fn test_heuristic_selector() {
        let b = board(&[&[0, 1, 3], &[4, 2, 5], &[7, 8, 6]]);
        assert_eq!(Heuristic::Hamming.evaluate(&b), 4);
        assert_eq!(Heuristic::Manhattan.evaluate(&b), 4);
        assert_eq!(Heuristic::default(), Heuristic::Manhattan);
        assert_eq!(Heuristic::Hamming.name(), "hamming");
    }

    #[test]
    fn test_count_inversions() {
        assert_eq!(count_inversions(&[1, 2, 3, 4, 5, 6, 7, 8, 0]), 0);
        assert_eq!(count_inversions(&[1, 2, 3, 4, 5, 6, 8, 7, 0]), 1);
        assert_eq!(count_inversions(&[3, 0, 2, 1]), 3);
    }

    #[test]
    fn test_parity_on_known_boards() {
        assert!(is_solvable_by_parity(&Board::goal(3).unwrap()));
        assert!(is_solvable_by_parity(&Board::goal(4).unwrap()));
        assert!(is_solvable_by_parity(&board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]])));
        assert!(!is_solvable_by_parity(&board(&[&[1, 2, 3], &[4, 5, 6], &[8, 7, 0]])));
        assert!(!is_solvable_by_parity(&board(&[&[1, 0], &[2, 3]])));
        assert!(is_solvable_by_parity(&board(&[&[3, 0], &[2, 1]])));
    }

    #[test]
    fn test_scrambled_boards_are_solvable_by_parity() {
        for seed in 0..20 {
            for n in 2..=5 {
                let b = Board::scrambled(n, 40, seed).unwrap();
                assert!(is_solvable_by_parity(&b), "n {} seed {}", n, seed);
            }
        }
    }

    #[test]
    fn test_twin_flips_parity() {
        for seed in 0..30 {
            for n in 2..=4 {
                let b = Board::shuffled(n, seed).unwrap();
                let twin = b.twin().unwrap();
                assert_ne!(is_solvable_by_parity(&b), is_solvable_by_parity(&twin));
            }
        }
    }
}
