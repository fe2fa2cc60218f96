//! # dualcount
//!
//! `dualcount` is a command-line projected model counter. It reads CNF formulas
//! in DIMACS format and counts the assignments of a set of relevant variables
//! that extend to a model, without enumerating the remaining variables.
//!
//! The search is a dual CDCL engine:
//! 1.  **Primal search**: conflict-driven clause learning over the input formula.
//!     Every satisfying state contributes `2^u` partial models, where `u` is
//!     the number of relevant variables left unassigned.
//! 2.  **Dual search**: an optional second formula over the same shared
//!     variables, typically the negation of the first. Once it becomes
//!     unsatisfiable under the current decisions, the whole subtree is counted
//!     without searching it.
//!
//! ## Features
//!
//! -   **Projection**: relevant variables from `--relevant`, or from `c ind` /
//!     `c p show` lines of the input.
//! -   **Counting without enumeration**: explored branches are excluded either by
//!     blocking clauses or by flipping decisions in place.
//! -   **Enumeration**: prints every counted cube of relevant literals.
//! -   **Statistics**: detailed search statistics and memory usage.
//! -   **Progress lines**: with `--verbose 1`, one line per restart, reduction,
//!     simplification and model count milestone.
//!
//! ## Usage
//!
//! ```sh
//! dualcount <SUBCOMMAND> <primal.cnf> [OPTIONS]
//! ```
//!
//! ### Subcommands
//!
//! 1.  **`sat`**: Decide satisfiability, exiting with 10 or 20.
//!     ```sh
//!     dualcount sat problem.cnf
//!     ```
//!
//! 2.  **`count`**: Print the projected model count.
//!     ```sh
//!     dualcount count problem.cnf --relevant 1,2,3
//!     ```
//!
//! 3.  **`enumerate`**: Print every counted cube, then the count.
//!     ```sh
//!     dualcount enumerate circuit.cnf --dual negated.cnf --shared 8
//!     ```
//!
//! 4.  **`completions`**: Generate shell completions.
//!     ```sh
//!     dualcount completions bash > dualcount.bash
//!     ```
//!
//! ### Common Options
//!
//! -   `--dual <FILE>`: The dual formula over the shared variables `1..=k`.
//! -   `--shared <K>`: Number of shared variables.
//! -   `--relevant <LIST>`: Comma separated relevant variables.
//! -   `--negate`: Search the dual formula, certifying with the primal one.
//! -   `--limit <N>`: Stop after `N` partial models.
//! -   `-d, --debug`: Debug logging on stderr.
//! -   `--stats`: Print statistics.
//! -   Tuning: `--keepglue`, `--keepsize`, `--reduceinit`, `--reduceinc`,
//!     `--restartint`, `--subsumelimit`, `--bump`, `--block`, `--blocklimit`,
//!     `--discount`, `--discountmax`, `--phase`, `--seed`, `--relevantfirst`,
//!     `--reusetrail`, `-v, --verbose`.
//!
//! Errors are reported on stderr and end the process with exit status 1.

use crate::command_line::cli::{Cli, Commands, solve_count, solve_sat};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod command_line;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "dualcount", &mut std::io::stdout());
            return;
        }
        Commands::Sat(input) => {
            init_logging(input.debug);
            solve_sat(input)
        }
        Commands::Count(input) => {
            init_logging(input.debug);
            solve_count(input, false)
        }
        Commands::Enumerate(input) => {
            init_logging(input.debug);
            solve_count(input, true)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
