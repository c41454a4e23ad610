use clap::Parser;
use npuzzle_solver::board::Board;
use npuzzle_solver::heuristics::{is_solvable_by_parity, Heuristic};
use npuzzle_solver::solver::{SolveOptions, Solver};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

const START_SEED: u64 = 0;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board dimension
    #[clap(short, long, default_value_t = 3)]
    size: usize,

    /// Number of seeded boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: u64,

    /// Random slides from the goal; 0 shuffles all tiles uniformly instead
    #[clap(long, default_value_t = 0)]
    scramble: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let heuristics = [Heuristic::Hamming, Heuristic::Manhattan];

    let mut expansions: HashMap<Heuristic, Vec<u64>> = HashMap::new();
    let mut parity_mismatches = 0;
    let mut move_mismatches = 0;

    println!("Starting heuristic evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let seed = START_SEED + board_idx;
        let generated = if args.scramble == 0 {
            Board::shuffled(args.size, seed)
        } else {
            Board::scrambled(args.size, args.scramble, seed)
        };
        let initial = match generated {
            Ok(board) => board,
            Err(e) => {
                eprintln!("Cannot create board: {}", e);
                return;
            }
        };

        println!("\nEvaluating Board {} (Seed: {})\n{}", board_idx, seed, initial);

        let mut moves_seen = Vec::new();
        for heuristic in heuristics {
            let options = SolveOptions {
                heuristic,
                ..SolveOptions::default()
            };
            let solver = match Solver::with_options(initial.clone(), &options) {
                Ok(solver) => solver,
                Err(e) => {
                    eprintln!("Search failed with {}: {}", heuristic.name(), e);
                    continue;
                }
            };
            let stats = solver.stats();
            let moves = solver
                .moves()
                .map_or_else(|| "unsolvable".to_string(), |m| m.to_string());
            println!(
                "  Heuristic: {:<10}, Moves: {:<10}, Expanded: {:<10}, Enqueued: {}",
                heuristic.name(),
                moves,
                stats.expanded,
                stats.enqueued
            );

            if solver.is_solvable() != is_solvable_by_parity(&initial) {
                eprintln!(
                    "Warning: {} search disagrees with the parity check on seed {}",
                    heuristic.name(),
                    seed
                );
                parity_mismatches += 1;
            }
            moves_seen.push(solver.moves());
            expansions.entry(heuristic).or_default().push(stats.expanded);
        }

        if moves_seen.windows(2).any(|pair| pair[0] != pair[1]) {
            eprintln!("Warning: heuristics disagree on the optimal length for seed {}", seed);
            move_mismatches += 1;
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("Parity mismatches: {}", parity_mismatches);
    println!("Move count mismatches: {}", move_mismatches);
    println!("\n--- Average Expansions ---");

    for heuristic in heuristics {
        match expansions.get(&heuristic) {
            Some(counts) if !counts.is_empty() => {
                let total: u64 = counts.iter().sum();
                let average = total as f64 / counts.len() as f64;
                println!("Heuristic {:<10}: Average Expanded = {:.2}", heuristic.name(), average);
            }
            _ => println!("Heuristic {}: No searches recorded.", heuristic.name()),
        }
    }
}
