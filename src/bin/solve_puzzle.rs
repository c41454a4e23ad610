use clap::{Parser, ValueEnum};
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::{SolveOptions, Solver};
use npuzzle_solver::utils::read_board_file;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicArg {
    Hamming,
    Manhattan,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Hamming => Heuristic::Hamming,
            HeuristicArg::Manhattan => Heuristic::Manhattan,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file: n, then n lines of n tiles (0 is the blank)
    board_file: PathBuf,

    /// Distance estimate used to order the search
    #[clap(long, value_enum, default_value = "manhattan")]
    heuristic: HeuristicArg,

    /// Stop after expanding this many nodes
    #[clap(long)]
    max_expansions: Option<u64>,

    /// Print only the move count, not every board of the solution
    #[clap(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("npuzzle_solver=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let initial = match read_board_file(&args.board_file) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Failed to read board from {}: {}", args.board_file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let options = SolveOptions {
        heuristic: args.heuristic.into(),
        expansion_limit: args.max_expansions,
        cancel: None,
    };
    let solver = match Solver::with_options(initial, &options) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Search aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match (solver.moves(), solver.solution()) {
        (Some(moves), Some(path)) => {
            println!("Minimum number of moves = {}", moves);
            if !args.quiet {
                for board in path {
                    println!("{}\n", board);
                }
            }
        }
        _ => println!("No solution possible"),
    }
    ExitCode::SUCCESS
}
