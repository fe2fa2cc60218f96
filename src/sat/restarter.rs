#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Glue-driven restarts with trail reuse.
//!
//! Restarts abandon the current decisions so that recently bumped variables
//! are decided first. They are scheduled from two exponential moving averages
//! of the glue of learned clauses:
//!
//! - a fast average that follows recent conflicts closely, and
//! - a slow average that reflects the search as a whole.
//!
//! A restart is due once at least `SolverOptions::restartint` conflicts have
//! passed since the previous one and the fast average exceeds the slow one by
//! more than 10%, i.e. recently learned clauses are worse than usual.
//!
//! With `SolverOptions::reusetrail` the restart does not go all the way back to
//! level 0. Decisions on variables that would be picked again anyway, because
//! they rank above the variable the solver would decide next, are kept. A
//! restart never pops a flipped level: the count stored there would be lost.

use crate::sat::literal::Variable;
use crate::sat::solver::Solver;
use crate::sat::variable::Class;
use tracing::debug;

/// An exponential moving average with bias-corrected warm up.
///
/// The smoothing factor is `1/n` for the `n`-th sample until it drops to
/// `alpha`, so early values are not dominated by the initial zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ema {
    value: f64,
    alpha: f64,
    count: u64,
}

impl Ema {
    #[must_use]
    pub const fn new(alpha: f64) -> Self {
        Self {
            value: 0.0,
            alpha,
            count: 0,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn update(&mut self, sample: f64) {
        self.count += 1;
        let beta = (1.0 / self.count as f64).max(self.alpha);
        self.value += beta * (sample - self.value);
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

/// Restart schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Restarts {
    pub fast: Ema,
    pub slow: Ema,
    /// Conflicts before which no restart happens.
    pub limit: u64,
}

impl Default for Restarts {
    fn default() -> Self {
        Self {
            fast: Ema::new(3e-2),
            slow: Ema::new(1e-5),
            limit: 0,
        }
    }
}

impl Restarts {
    /// Feeds the glue of a newly learned clause.
    pub fn update(&mut self, glue: u32) {
        self.fast.update(f64::from(glue));
        self.slow.update(f64::from(glue));
    }

    /// Whether the averages call for a restart after `conflicts` conflicts.
    #[must_use]
    pub fn due(&self, conflicts: u64) -> bool {
        conflicts >= self.limit && self.fast.value() > 1.1 * self.slow.value()
    }
}

impl Solver {
    pub(crate) fn restarting(&self) -> bool {
        self.level() > self.frames.top_flipped() && self.restarts.due(self.stats.conflicts)
    }

    /// Ranks a variable for trail reuse, higher is decided earlier.
    fn rank(&self, var: Variable) -> (bool, u64) {
        let relevant = self.relevant_first && self.vars[var].class == Class::Relevant;
        (relevant, self.vars[var].stamp)
    }

    /// Lowest level the search can restart to without deciding differently.
    pub(crate) fn reuse_trail(&mut self) -> usize {
        let floor = self.frames.top_flipped();
        if !self.options.reusetrail {
            return floor;
        }
        let Some(next) = self.next_decision() else {
            return self.level();
        };
        let next = self.rank(next);
        let reused = self
            .frames
            .decisions(self.level())
            .position(|d| self.rank(d.variable()) < next)
            .unwrap_or(self.level());
        reused.max(floor)
    }

    pub(crate) fn restart(&mut self) {
        let level = self.reuse_trail();
        self.stats.restarts += 1;
        if level > 0 {
            self.stats.reused += 1;
        }
        debug!(from = self.level(), to = level, "restarting");
        self.backtrack(level);
        self.restarts.limit = self.stats.conflicts + self.options.restartint;
        self.report('r');
    }
}
