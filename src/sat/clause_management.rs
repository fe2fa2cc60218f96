#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Maintenance of the primal and the dual clause database.
//!
//! Each database is maintained on its own schedule:
//!
//! - Reduction runs once `Schedule::learned` clauses were learned since the
//!   last one. Candidates are learned clauses that are not blocking, not the
//!   reason of an assignment, were not used in an analysis since the last
//!   reduction and exceed both `keepsize` and `keepglue`. The worse half of
//!   them, ordered by glue, then size, then age, is marked garbage.
//! - Simplification runs when new variables were fixed on level 0 and marks
//!   clauses satisfied on level 0 as garbage.
//!
//! Both end in a collection, which flushes watch lists and compacts the clause
//! array. Clause references held by reasons and by the list of blocking
//! clauses are remapped afterwards.

use crate::sat::clause::{ClauseFlags, ClauseRef};
use crate::sat::configs::SolverOptions;
use crate::sat::propagation::{Database, Side};
use crate::sat::solver::Solver;
use crate::sat::variable::{Reason, Variables};
use std::cmp::Ordering;
use tracing::debug;

impl Database {
    #[must_use]
    pub const fn reducing(&self) -> bool {
        self.schedule.learned >= self.schedule.limit
    }

    #[must_use]
    pub const fn simplifying(&self, vars: &Variables) -> bool {
        vars.fixed > self.schedule.fixed
    }

    /// Marks the worse half of the reduction candidates as garbage. Returns
    /// how many clauses were marked.
    pub fn reduce(&mut self, options: &SolverOptions) -> usize {
        let mut candidates: Vec<ClauseRef> = Vec::new();
        for (cref, clause) in self.cnf.iter_mut().enumerate() {
            if !clause.is_redundant() || clause.is_blocking() || clause.is_garbage() {
                continue;
            }
            if clause.is_used() {
                clause.flags.remove(ClauseFlags::USED);
                continue;
            }
            let kept = clause.len() <= options.keepsize || clause.glue <= options.keepglue;
            if kept || clause.is_active() {
                continue;
            }
            candidates.push(cref);
        }

        let target = candidates.len() / 2;
        if target > 0 {
            let cnf = &self.cnf;
            let worse_first = |&a: &ClauseRef, &b: &ClauseRef| -> Ordering {
                let (a, b) = (&cnf[a], &cnf[b]);
                b.glue
                    .cmp(&a.glue)
                    .then_with(|| b.len().cmp(&a.len()))
                    .then_with(|| b.id.cmp(&a.id))
            };
            candidates.select_nth_unstable_by(target, worse_first);
            for &cref in &candidates[..target] {
                self.cnf[cref].mark_garbage();
            }
        }

        self.schedule.learned = 0;
        self.schedule.limit += options.reduceinc;
        target
    }

    /// Marks every inactive clause satisfied on level 0 as garbage.
    pub fn simplify(&mut self, vars: &Variables) -> usize {
        let mut marked = 0;
        for clause in self.cnf.iter_mut() {
            if clause.is_garbage() || clause.is_active() {
                continue;
            }
            if clause
                .iter()
                .any(|&lit| vars.is_true(lit) && vars.level(lit) == 0)
            {
                clause.mark_garbage();
                marked += 1;
            }
        }
        self.schedule.fixed = vars.fixed;
        marked
    }

    /// Removes garbage clauses and fixes up every reference into the clause
    /// array. Returns the old-to-new map for references held elsewhere.
    pub fn collect(&mut self, vars: &mut Variables) -> Vec<Option<ClauseRef>> {
        self.watches.flush(&self.cnf);
        let map = self.cnf.collect_garbage();
        self.watches.remap(&map);

        for var in vars.indices() {
            let reason = match (self.side, vars[var].reason) {
                (Side::Primal, Reason::Primal(cref)) => Reason::Primal(map[cref].unwrap_or(cref)),
                (Side::Dual, Reason::Dual(cref)) => Reason::Dual(map[cref].unwrap_or(cref)),
                _ => continue,
            };
            debug_assert!(vars[var].value.is_some());
            vars[var].reason = reason;
        }
        map
    }
}

impl Solver {
    /// Runs due reductions and simplifications of both databases.
    pub(crate) fn maintain(&mut self) {
        let mut collect = [false; 2];

        if self.primal.reducing() {
            let reduced = self.primal.reduce(&self.options);
            self.stats.reductions += 1;
            self.stats.reduced += reduced as u64;
            collect[0] = true;
            debug!(side = ?Side::Primal, reduced, "reduced learned clauses");
        }
        if let Some(dual) = self.dual.as_mut().filter(|d| d.reducing()) {
            let reduced = dual.reduce(&self.options);
            self.stats.reductions += 1;
            self.stats.reduced += reduced as u64;
            collect[1] = true;
            debug!(side = ?Side::Dual, reduced, "reduced learned clauses");
        }
        if collect.iter().any(|&c| c) {
            self.report('-');
        }

        let mut simplified = false;
        if self.primal.simplifying(&self.vars) {
            let satisfied = self.primal.simplify(&self.vars);
            collect[0] |= satisfied > 0;
            simplified = true;
        }
        if let Some(dual) = self.dual.as_mut().filter(|d| d.simplifying(&self.vars)) {
            let satisfied = dual.simplify(&self.vars);
            collect[1] |= satisfied > 0;
            simplified = true;
        }
        if simplified {
            self.stats.simplifications += 1;
            self.report('s');
        }

        if collect[0] {
            let before = self.primal.cnf.len();
            let map = self.primal.collect(&mut self.vars);
            self.blocking = self
                .blocking
                .iter()
                .filter_map(|&cref| map[cref])
                .collect();
            self.stats.collected += (before - self.primal.cnf.len()) as u64;
        }
        if collect[1] {
            if let Some(dual) = self.dual.as_mut() {
                let before = dual.cnf.len();
                dual.collect(&mut self.vars);
                self.stats.collected += (before - dual.cnf.len()) as u64;
            }
        }
    }
}
