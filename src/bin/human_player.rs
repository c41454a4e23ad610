use clap::Parser;
use npuzzle_solver::board::{Board, Direction};
use npuzzle_solver::solver::{SolveOptions, Solver};
use std::io::{self, Write}; // For input/output
use tracing_subscriber::EnvFilter;

/// Hints give up after this many expansions so the prompt stays responsive.
const HINT_EXPANSION_LIMIT: u64 = 2_000_000;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board dimension
    #[clap(short, long, default_value_t = 3)]
    size: usize,

    /// Seed for the scramble
    #[clap(long, default_value_t = 514514)]
    seed: u64,

    /// Number of random slides applied to the solved board
    #[clap(long, default_value_t = 40)]
    scramble: usize,
}

fn parse_direction(input: &str) -> Option<Direction> {
    match input {
        "w" => Some(Direction::Up),
        "s" => Some(Direction::Down),
        "a" => Some(Direction::Left),
        "d" => Some(Direction::Right),
        _ => None,
    }
}

// The direction that turns `from` into `to`, if they are one slide apart.
fn direction_between(from: &Board, to: &Board) -> Option<Direction> {
    Direction::ALL
        .into_iter()
        .find(|&dir| from.slide(dir).as_ref() == Some(to))
}

fn print_hint(board: &Board) {
    let options = SolveOptions {
        expansion_limit: Some(HINT_EXPANSION_LIMIT),
        ..SolveOptions::default()
    };
    match Solver::with_options(board.clone(), &options) {
        Ok(solver) => match solver.solution().and_then(|mut path| path.nth(1)) {
            Some(next) => {
                let moves = solver.moves().unwrap_or(0);
                match direction_between(board, next) {
                    Some(dir) => println!("Hint: move {} ({} moves left).", dir, moves),
                    None => println!("Hint unavailable."),
                }
            }
            None if solver.is_solvable() => println!("Already solved."),
            None => println!("This board cannot be solved."),
        },
        Err(e) => println!("Hint unavailable: {}", e),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut board = match Board::scrambled(args.size, args.scramble, args.seed) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Cannot create board: {}", e);
            return;
        }
    };
    let mut steps = 0;
    println!("Welcome to the sliding puzzle!");

    loop {
        println!("---------------------");
        println!("Steps: {}, Manhattan distance: {}", steps, board.manhattan());
        println!("{}", board);

        if board.is_goal() {
            println!();
            println!("---------------------");
            println!("Solved in {} steps!", steps);
            println!("---------------------");
            break;
        }

        print!("Move the blank with w/a/s/d, 'h' for a hint, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let trimmed_input = input.trim();
        match trimmed_input {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "h" => print_hint(&board),
            other => match parse_direction(other) {
                Some(dir) => match board.slide(dir) {
                    Some(next) => {
                        board = next;
                        steps += 1;
                    }
                    None => println!("Invalid move: the blank cannot move {}.", dir),
                },
                None => println!("Invalid input. Use w/a/s/d, 'h', or 'q'."),
            },
        }
    }
}
