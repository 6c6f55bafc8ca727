//! Sliding-Block Puzzle Explorer
//!
//! Enumerates the board configurations reachable from the fixed starting
//! layout of a 4x5 sliding puzzle, collapsing configurations that differ
//! only by swapping interchangeable same-colored pieces.

use clap::{Parser, Subcommand};

use slidey::{explore, Board};

/// Work items processed when no explicit budget is given.
const DEFAULT_STEP_BUDGET: usize = 50_000;

/// Explores the reachable states of a 4x5 sliding-block puzzle.
#[derive(Parser)]
#[command(name = "slidey")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the breadth-first exploration and print the census.
    Explore {
        /// Maximum number of work items to process.
        #[arg(long, default_value_t = DEFAULT_STEP_BUDGET)]
        steps: usize,
    },
    /// Print the starting board.
    Show,
    /// List the legal moves of the starting board.
    Moves,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Explore { steps }) => run_explore(steps),
        Some(Command::Show) => print!("{}", Board::new()),
        Some(Command::Moves) => run_moves(),
        None => run_explore(DEFAULT_STEP_BUDGET),
    }
}

/// Runs the exploration and prints the resulting counts.
fn run_explore(steps: usize) {
    let census = explore(Board::new(), steps);
    println!("Processed {} work items", census.steps);
    println!("Reached {} distinct states", census.reached.len());
    println!("Discarded {} duplicate branches", census.duplicates);
}

/// Prints the starting board's legal moves, one per line.
fn run_moves() {
    for mv in Board::new().legal_moves() {
        println!("{mv}");
    }
}
