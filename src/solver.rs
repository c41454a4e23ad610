//! A* search for minimum-move solutions.
//!
//! The solver races two searches in lock-step: one from the initial board and
//! one from its twin. Exactly one of the two is solvable, so whichever side
//! reaches the goal first also answers the solvability question. No parity
//! computation is needed.
use crate::board::Board;
use crate::error::{PuzzleError, Result};
use crate::heuristics::Heuristic;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use tracing::{debug, info};

/// Expansions between two progress events.
const PROGRESS_INTERVAL: u64 = 100_000;

/// Knobs for `Solver::with_options`.
///
/// The default (Manhattan priority, no limit, no cancel flag) behaves exactly
/// like `Solver::new`.
#[derive(Clone, Debug, Default)]
pub struct SolveOptions {
    /// Estimate added to the move count to order the frontiers.
    pub heuristic: Heuristic,
    /// Give up once this many nodes have been expanded across both frontiers.
    pub expansion_limit: Option<u64>,
    /// Checked once per lock-step round; setting it stops the search.
    pub cancel: Option<Arc<AtomicBool>>,
}

/// Work done by a search, summed over both frontiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes removed from a frontier and expanded into their neighbors.
    pub expanded: u64,
    /// Nodes inserted into a frontier, including the two roots.
    pub enqueued: u64,
}

// One board reached by the search, linked back to the node it came from.
// `estimate` caches the heuristic so it is computed once per node.
struct SearchNode {
    board: Board,
    moves: usize,
    estimate: usize,
    prev: Option<Rc<SearchNode>>,
}

// Heap entry. `seq` breaks priority ties in insertion order.
struct QueuedNode {
    priority: usize,
    seq: u64,
    node: Rc<SearchNode>,
}

impl Eq for QueuedNode {}
impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}
impl Ord for QueuedNode {
    // Reversed so the max-heap yields the smallest priority, then the oldest entry.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Frontier {
    heap: BinaryHeap<QueuedNode>,
    next_seq: u64,
    heuristic: Heuristic,
}

impl Frontier {
    fn seeded(root: Board, heuristic: Heuristic, stats: &mut SearchStats) -> Self {
        let mut frontier = Frontier {
            heap: BinaryHeap::new(),
            next_seq: 0,
            heuristic,
        };
        frontier.push(root, 0, None, stats);
        frontier
    }

    fn push(
        &mut self,
        board: Board,
        moves: usize,
        prev: Option<Rc<SearchNode>>,
        stats: &mut SearchStats,
    ) {
        let estimate = self.heuristic.evaluate(&board);
        let node = Rc::new(SearchNode {
            board,
            moves,
            estimate,
            prev,
        });
        self.heap.push(QueuedNode {
            priority: node.moves + node.estimate,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
        stats.enqueued += 1;
    }

    fn pop(&mut self) -> Option<Rc<SearchNode>> {
        self.heap.pop().map(|entry| entry.node)
    }

    // Pushes every neighbor of `node` except the board it was reached from.
    // Longer cycles are not detected.
    fn expand(&mut self, node: &Rc<SearchNode>, stats: &mut SearchStats) {
        stats.expanded += 1;
        for neighbor in node.board.neighbors() {
            let is_parent = node
                .prev
                .as_ref()
                .is_some_and(|prev| prev.board == neighbor);
            if !is_parent {
                self.push(neighbor, node.moves + 1, Some(Rc::clone(node)), stats);
            }
        }
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

enum Outcome {
    Solved(Rc<SearchNode>),
    Unsolvable,
}

/// Solves a sliding puzzle with A*, detecting unsolvable boards along the way.
///
/// The whole search runs inside the constructor; the accessors only read the result.
///
/// # Examples
/// ```
/// use npuzzle_solver::board::Board;
/// use npuzzle_solver::solver::Solver;
///
/// let board = Board::new(&[vec![0, 1, 3], vec![4, 2, 5], vec![7, 8, 6]]).unwrap();
/// let solver = Solver::new(board.clone());
/// assert!(solver.is_solvable());
/// assert_eq!(solver.moves(), Some(4));
///
/// let path: Vec<&Board> = solver.solution().unwrap().collect();
/// assert_eq!(path.len(), 5);
/// assert_eq!(path[0], &board);
/// assert!(path[4].is_goal());
///
/// let swapped = Board::new(&[vec![1, 2, 3], vec![4, 5, 6], vec![8, 7, 0]]).unwrap();
/// let solver = Solver::new(swapped);
/// assert!(!solver.is_solvable());
/// assert_eq!(solver.moves(), None);
/// assert!(solver.solution().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Solver {
    solution: Option<Vec<Board>>,
    stats: SearchStats,
}

impl Solver {
    /// Runs the search to completion with the default options.
    pub fn new(initial: Board) -> Self {
        match Self::with_options(initial, &SolveOptions::default()) {
            Ok(solver) => solver,
            // Only an expansion limit or a cancel flag can stop the search early.
            Err(err) => unreachable!("unbounded search stopped early: {}", err),
        }
    }

    /// Runs the search with a chosen heuristic and optional stopping conditions.
    ///
    /// # Errors
    /// Returns `PuzzleError::ExpansionLimit` if `options.expansion_limit` is
    /// reached, or `PuzzleError::Cancelled` if `options.cancel` is set, before
    /// either frontier reaches the goal.
    pub fn with_options(initial: Board, options: &SolveOptions) -> Result<Self> {
        info!(
            event = "solve_start",
            dimension = initial.dimension(),
            heuristic = options.heuristic.name(),
            estimate = options.heuristic.evaluate(&initial),
        );

        let mut stats = SearchStats::default();
        let solution = match search(initial, options, &mut stats)? {
            Outcome::Solved(goal) => Some(backtrace(&goal)),
            Outcome::Unsolvable => None,
        };
        let solver = Solver { solution, stats };

        info!(
            event = "solve_end",
            solvable = solver.is_solvable(),
            moves = ?solver.moves(),
            expanded = stats.expanded,
            enqueued = stats.enqueued,
        );
        Ok(solver)
    }

    /// Is the initial board solvable?
    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Minimum number of moves to solve the initial board, or `None` if it is unsolvable.
    pub fn moves(&self) -> Option<usize> {
        self.solution.as_ref().map(|path| path.len() - 1)
    }

    /// Boards of a shortest solution, from the initial board to the goal inclusive.
    ///
    /// Returns `None` if the initial board is unsolvable.
    pub fn solution(&self) -> Option<std::slice::Iter<'_, Board>> {
        self.solution.as_ref().map(|path| path.iter())
    }

    /// Search effort spent by both frontiers.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

fn search(initial: Board, options: &SolveOptions, stats: &mut SearchStats) -> Result<Outcome> {
    let heuristic = options.heuristic;
    let twin = initial.twin();
    let mut main = Frontier::seeded(initial, heuristic, stats);
    // Only a 1x1 board has no twin, and that board is already the goal.
    let mut shadow = twin.map(|board| Frontier::seeded(board, heuristic, stats));
    let mut next_report = PROGRESS_INTERVAL;

    loop {
        if options
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(AtomicOrdering::Relaxed))
        {
            return Err(PuzzleError::Cancelled);
        }

        match main.pop() {
            Some(node) if node.board.is_goal() => return Ok(Outcome::Solved(node)),
            Some(node) => main.expand(&node, stats),
            // Not reachable for n >= 2: every board has a neighbor besides its parent.
            None => return Ok(Outcome::Unsolvable),
        }

        let shadow_drained = match shadow.as_mut() {
            Some(frontier) => match frontier.pop() {
                Some(node) if node.board.is_goal() => return Ok(Outcome::Unsolvable),
                Some(node) => {
                    frontier.expand(&node, stats);
                    false
                }
                None => true,
            },
            None => false,
        };
        if shadow_drained {
            shadow = None;
        }

        if stats.expanded >= next_report {
            next_report += PROGRESS_INTERVAL;
            debug!(
                event = "search_progress",
                expanded = stats.expanded,
                frontier = main.len(),
                twin_frontier = shadow.as_ref().map_or(0, Frontier::len),
            );
        }

        if let Some(limit) = options.expansion_limit {
            if stats.expanded >= limit {
                return Err(PuzzleError::ExpansionLimit {
                    expanded: stats.expanded,
                });
            }
        }
    }
}

// Walks the predecessor links from the goal back to the root.
fn backtrace(goal: &Rc<SearchNode>) -> Vec<Board> {
    let mut path = Vec::with_capacity(goal.moves + 1);
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node.board.clone());
        current = node.prev.as_ref();
    }
    path.reverse();
    path
}
