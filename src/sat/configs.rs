#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Tuning options of the counting engine.
//!
//! Every option is an integer so that the command line can expose all of them
//! uniformly (`--keepglue 3`, `--block 0`, ...). Booleans are encoded as `0`/`1`.

/// Initial phase of decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    False,
    #[default]
    True,
    /// Chosen by `fastrand` from `SolverOptions::seed`.
    Random,
}

impl From<u32> for Phase {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::False,
            1 => Self::True,
            _ => Self::Random,
        }
    }
}

/// Options of a `Solver`. The defaults are tuned for counting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct SolverOptions {
    /// Learned clauses with glue at most this are never reduced.
    pub keepglue: u32,
    /// Learned clauses with at most this many literals are never reduced.
    pub keepsize: usize,
    /// Learned clauses before the first reduction.
    pub reduceinit: usize,
    /// Growth of the reduction interval after each reduction.
    pub reduceinc: usize,
    /// Minimum conflicts between restarts.
    pub restartint: u64,
    /// How many recent clauses a new blocking clause tries to subsume.
    pub subsumelimit: usize,
    /// 0 disables bumping, 1 bumps analyzed variables, 2 also bumps reason variables.
    pub bump: u32,
    /// Learn blocking clauses instead of flipping.
    pub block: bool,
    /// Block only when the retracted level is at most this, 0 always blocks.
    pub blocklimit: usize,
    /// Subtract counts of flipped levels popped by backjumps.
    pub discount: bool,
    /// Maximum number of discounting backjumps.
    pub discountmax: u64,
    pub phase: Phase,
    pub seed: u64,
    /// Decide relevant variables first from the start.
    pub relevantfirst: bool,
    /// Keep the decisions that would be taken again when restarting.
    pub reusetrail: bool,
    /// Print progress lines.
    pub verbose: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            keepglue: 2,
            keepsize: 3,
            reduceinit: 2000,
            reduceinc: 300,
            restartint: 10,
            subsumelimit: 20,
            bump: 1,
            block: true,
            blocklimit: 16,
            discount: true,
            discountmax: 1_000_000,
            phase: Phase::True,
            seed: 0,
            relevantfirst: false,
            reusetrail: true,
            verbose: 0,
        }
    }
}

impl SolverOptions {
    /// Whether a retraction to `level` learns a blocking clause.
    #[must_use]
    pub const fn blocks_at(&self, level: usize) -> bool {
        self.block && (self.blocklimit == 0 || level <= self.blocklimit)
    }
}
