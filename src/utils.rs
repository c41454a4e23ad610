use crate::board::Board;
use crate::error::{PuzzleError, Result};
use std::fs;
use std::path::Path;

/// Parses a board from text: the dimension `n`, then `n²` tiles in row-major order.
///
/// Tokens may be separated by any whitespace, so the layout produced by
/// `Board`'s `Display` impl reads back unchanged, as does everything on one line.
///
/// # Errors
/// * `PuzzleError::Parse` if the input is empty, a token is not a non-negative
///   integer, or the number of tiles is not `n²`. `line` is 1-based.
/// * `PuzzleError::InvalidArgument` if the tiles are not a permutation of `0..n²`.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_str;
///
/// let board = board_from_str("3\n 0 1 3\n 4 2 5\n 7 8 6\n").unwrap();
/// assert_eq!(board.dimension(), 3);
/// assert_eq!(board.tile(1, 1), 2);
///
/// assert!(board_from_str("2\n1 2\n3").is_err());
/// assert!(board_from_str("2\n1 x\n3 0").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board> {
    let mut tokens = s.lines().enumerate().flat_map(|(i, line)| {
        line.split_whitespace().map(move |token| (i + 1, token))
    });

    let (line, first) = tokens.next().ok_or_else(|| PuzzleError::Parse {
        line: 1,
        message: "input is empty".to_string(),
    })?;
    let n: usize = first.parse().map_err(|_| PuzzleError::Parse {
        line,
        message: format!("expected board dimension, found '{}'", first),
    })?;
    if n == 0 {
        return Err(PuzzleError::Parse {
            line,
            message: "board dimension must be at least 1".to_string(),
        });
    }

    let expected = n.saturating_mul(n);
    let mut tiles = Vec::with_capacity(expected.min(1 << 16));
    let mut last_line = line;
    for (line, token) in tokens {
        last_line = line;
        if tiles.len() == expected {
            return Err(PuzzleError::Parse {
                line,
                message: format!("expected {} tiles, found extra token '{}'", expected, token),
            });
        }
        let tile: u32 = token.parse().map_err(|_| PuzzleError::Parse {
            line,
            message: format!("'{}' is not a tile number", token),
        })?;
        tiles.push(tile);
    }
    if tiles.len() != expected {
        return Err(PuzzleError::Parse {
            line: last_line,
            message: format!("expected {} tiles, found {}", expected, tiles.len()),
        });
    }

    Board::from_tiles(n, tiles)
}

/// Parses a board given as one string per row, tiles separated by whitespace.
///
/// The dimension is the number of rows.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_rows;
///
/// let board = board_from_rows(&["1 2 3", "4 5 6", "7 8 0"]).unwrap();
/// assert!(board.is_goal());
/// assert!(board_from_rows(&["1 2", "0"]).is_err());
/// ```
pub fn board_from_rows(rows: &[&str]) -> Result<Board> {
    let mut grid = Vec::with_capacity(rows.len());
    for (r, row) in rows.iter().enumerate() {
        let parsed = row
            .split_whitespace()
            .map(|token| {
                token.parse::<u32>().map_err(|_| PuzzleError::Parse {
                    line: r + 1,
                    message: format!("'{}' is not a tile number", token),
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        grid.push(parsed);
    }
    Board::new(&grid)
}

/// Reads and parses a board file in the `board_from_str` format.
pub fn read_board_file(path: impl AsRef<Path>) -> Result<Board> {
    let content = fs::read_to_string(path)?;
    board_from_str(&content)
}
