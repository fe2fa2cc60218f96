#![allow(clippy::cast_precision_loss)]

use dualcount::sat::configs::SolverOptions;
use dualcount::sat::dimacs::{Dimacs, parse_file};
use dualcount::sat::error::{ParseError, SolverError};
use dualcount::sat::literal::Variable;
use dualcount::sat::solver::Solver;
use itertools::Itertools;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Defines the command-line interface for the counter.
///
/// Uses `clap` for parsing arguments.
#[derive(clap::Parser, Debug)]
#[command(
    name = "dualcount",
    version,
    about = "A projected model counter with a dual CDCL search"
)]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute.
    #[clap(subcommand)]
    pub command: Commands,
}

/// Enumerates the available subcommands.
#[derive(clap::Subcommand, Debug)]
pub(crate) enum Commands {
    /// Decide satisfiability. Exits with 10 (satisfiable) or 20 (unsatisfiable).
    Sat(InputOptions),

    /// Count the relevant assignments that extend to a model.
    Count(InputOptions),

    /// Print every counted relevant cube, then the count.
    Enumerate(InputOptions),

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Inputs and options shared by the solving subcommands.
#[derive(clap::Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct InputOptions {
    /// Path to the primal DIMACS .cnf file.
    pub path: PathBuf,

    /// Path to a dual DIMACS .cnf file over the same shared variables.
    #[arg(long)]
    pub dual: Option<PathBuf>,

    /// Number of shared variables; they are 1..=k in both files.
    #[arg(long)]
    pub shared: Option<Variable>,

    /// Comma separated relevant variables, a subset of the shared ones.
    #[arg(long, value_delimiter = ',')]
    pub relevant: Option<Vec<Variable>>,

    /// Swap the roles of the primal and the dual file.
    #[arg(long, default_value_t = false)]
    pub negate: bool,

    /// Stop after this many partial models.
    #[arg(long)]
    pub limit: Option<u64>,

    /// Enable debug logging on stderr.
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Print statistics after solving.
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Tuning options of the search.
    #[command(flatten)]
    pub tuning: TuningOptions,
}

/// Integer valued tuning options, see `SolverOptions` for their meaning.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct TuningOptions {
    #[arg(long, default_value_t = 2)]
    keepglue: u32,
    #[arg(long, default_value_t = 3)]
    keepsize: usize,
    #[arg(long, default_value_t = 2000)]
    reduceinit: usize,
    #[arg(long, default_value_t = 300)]
    reduceinc: usize,
    #[arg(long, default_value_t = 10)]
    restartint: u64,
    #[arg(long, default_value_t = 20)]
    subsumelimit: usize,
    /// 0 off, 1 analyzed variables, 2 also reason variables.
    #[arg(long, default_value_t = 1)]
    bump: u32,
    #[arg(long, default_value_t = 1)]
    block: u32,
    #[arg(long, default_value_t = 16)]
    blocklimit: usize,
    #[arg(long, default_value_t = 1)]
    discount: u32,
    #[arg(long, default_value_t = 1_000_000)]
    discountmax: u64,
    /// 0 false, 1 true, 2 random.
    #[arg(long, default_value_t = 1)]
    phase: u32,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 0)]
    relevantfirst: u32,
    #[arg(long, default_value_t = 1)]
    reusetrail: u32,
    #[arg(short, long, default_value_t = 0)]
    verbose: u32,
}

impl From<&TuningOptions> for SolverOptions {
    fn from(t: &TuningOptions) -> Self {
        Self {
            keepglue: t.keepglue,
            keepsize: t.keepsize,
            reduceinit: t.reduceinit,
            reduceinc: t.reduceinc,
            restartint: t.restartint,
            subsumelimit: t.subsumelimit,
            bump: t.bump,
            block: t.block != 0,
            blocklimit: t.blocklimit,
            discount: t.discount != 0,
            discountmax: t.discountmax,
            phase: t.phase.into(),
            seed: t.seed,
            relevantfirst: t.relevantfirst != 0,
            reusetrail: t.reusetrail != 0,
            verbose: t.verbose,
        }
    }
}

/// Errors ending a command-line run with exit status 1.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error(transparent)]
    Solver(#[from] SolverError),
}

fn read(path: &PathBuf) -> Result<Dimacs, CliError> {
    parse_file(path).map_err(|source| CliError::Parse {
        path: path.clone(),
        source,
    })
}

/// Builds the solver for a solving subcommand.
///
/// The shared variables default to every primal variable, or with a dual file
/// to the largest projection variable, else to the variables of the smaller
/// file. The relevant variables default to the projection, else to all shared.
///
/// # Errors
///
/// Parse errors of either file and invalid variable sets.
pub(crate) fn build_solver(input: &InputOptions) -> Result<(Solver, Duration), CliError> {
    let time = Instant::now();
    let primal = read(&input.path)?;
    let dual = input.dual.as_ref().map(read).transpose()?;
    let parse_time = time.elapsed();

    let projection_max = primal
        .projection
        .as_ref()
        .and_then(|p| p.iter().max().copied());
    let shared = input.shared.unwrap_or_else(|| match (&dual, projection_max) {
        (None, _) => primal.cnf.num_vars,
        (Some(_), Some(max)) => max,
        (Some(dual), None) => primal.cnf.num_vars.min(dual.cnf.num_vars),
    });
    let relevant = input.relevant.clone().or_else(|| {
        primal
            .projection
            .as_ref()
            .map(|p| p.iter().copied().filter(|&v| v <= shared).collect_vec())
    });
    debug!(
        shared,
        relevant = relevant.as_ref().map_or(shared as usize, Vec::len),
        "variables"
    );

    let shared_vars = (1..=shared).collect_vec();
    let mut solver = Solver::new(
        primal.cnf,
        &shared_vars,
        relevant.as_deref(),
        dual.map(|d| d.cnf),
    )?
    .with_options(SolverOptions::from(&input.tuning));
    if let Some(limit) = input.limit {
        solver.limit_number_of_partial_models(limit);
    }
    Ok((solver, parse_time))
}

/// Runs `sat`. Returns the exit code.
///
/// # Errors
///
/// Any error of `build_solver` or the search.
pub(crate) fn solve_sat(input: &InputOptions) -> Result<i32, CliError> {
    let (mut solver, parse_time) = build_solver(input)?;
    let time = Instant::now();
    let result = if input.negate {
        solver.dual_sat()?
    } else {
        solver.primal_sat()?
    };
    let elapsed = time.elapsed();
    info!(result, "satisfiability decided");

    if result == dualcount::SATISFIABLE {
        println!("s SATISFIABLE");
        print_model(&solver);
    } else {
        println!("s UNSATISFIABLE");
    }
    if input.stats {
        print_stats(parse_time, elapsed, &solver);
    }
    Ok(result)
}

/// Runs `count` or, with `enumerate`, `enumerate`. Returns the exit code.
///
/// # Errors
///
/// Any error of `build_solver`, the search, or writing the cubes.
pub(crate) fn solve_count(input: &InputOptions, enumerate: bool) -> Result<i32, CliError> {
    let (mut solver, parse_time) = build_solver(input)?;
    let time = Instant::now();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let name = |var: Variable| var.to_string();
    let count = match (enumerate, input.negate) {
        (false, false) => solver.primal_count()?,
        (false, true) => solver.dual_count()?,
        (true, false) => solver.primal_enumerate(&mut out, name)?,
        (true, true) => solver.dual_enumerate(&mut out, name)?,
    };
    let elapsed = time.elapsed();

    if solver.limited() {
        println!("c model limit reached, count is a lower bound");
    }
    println!("s mc {count}");
    if input.stats {
        print_stats(parse_time, elapsed, &solver);
    }
    Ok(0)
}

fn print_model(solver: &Solver) {
    let values = (1..=solver.num_vars())
        .filter_map(|var| {
            solver
                .deref(dualcount::Literal::new(var, true))
                .map(|value| if value { var.to_string() } else { format!("-{var}") })
        })
        .join(" ");
    println!("v {values} 0");
}

/// Helper function to print a formatted statistic line.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of the search statistics.
pub(crate) fn print_stats(parse_time: Duration, elapsed: Duration, solver: &Solver) {
    let s = solver.stats();
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n========================[ Search Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line_with_rate("Dual conflicts", s.dual_conflicts, elapsed_secs);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Dual propagations", s.dual_propagations, elapsed_secs);
    stat_line("Bumped variables", s.bumped);
    stat_line("Learned clauses", s.learned);
    stat_line("Dual learned clauses", s.dual_learned);
    stat_line("Dual units", s.dual_units);
    stat_line("Partial models", s.models);
    stat_line("Blocking clauses", s.blocked);
    stat_line("Flips", s.flipped);
    stat_line("Discounts", s.discounted);
    stat_line("Subsumed clauses", s.subsumed);
    stat_line("Restarts", s.restarts);
    stat_line("Reused trails", s.reused);
    stat_line("Reductions", s.reductions);
    stat_line("Reduced clauses", s.reduced);
    stat_line("Simplifications", s.simplifications);
    stat_line("Collected clauses", s.collected);
    stat_line(
        "Memory usage (MiB)",
        format!("{:.2}", dualcount::sat::stats::allocated_mib()),
    );
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
