//! # N-Puzzle Solver Library
//!
//! This library models the classic `n`×`n` sliding puzzle and finds
//! minimum-move solutions with A*. Unsolvable boards are detected during the
//! same search by racing the board against its "twin", a copy with two tiles
//! exchanged; no separate parity check is needed.
//!
//! It is used by three binaries:
//! - `solve_puzzle`: reads a board file and prints a shortest solution.
//! - `human_player`: an interactive game on a scrambled board, with hints.
//! - `heuristic_evaluator`: compares the Hamming and Manhattan priorities on
//!   seeded random boards.
//!
//! ## Modules
//! - `board`: the immutable `Board` and the `Direction` of a slide.
//! - `heuristics`: Hamming and Manhattan distances, plus a parity-based
//!   solvability check used as an independent oracle.
//! - `solver`: the dual-frontier A* search (`Solver`, `SolveOptions`).
//! - `utils`: parsing boards from text and files.
//! - `error`: the `PuzzleError` type shared by all of the above.

pub mod board;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use error::{PuzzleError, Result};
