#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solver façade and the main search loop.
//!
//! A `Solver` is built once from a primal clause set, the shared variables
//! `1..=k`, the relevant subset of the shared variables and an optional dual
//! clause set over the same shared variables. It is then run exactly once
//! through one of the entry points:
//!
//! - `primal_sat` / `dual_sat`: satisfiability, returning 10 or 20.
//! - `primal_count` / `dual_count`: the number of relevant assignments that
//!   extend to a model.
//! - `primal_enumerate` / `dual_enumerate`: like counting, but every counted
//!   relevant cube is printed.
//!
//! The `dual_*` entry points swap the roles of the two clause sets: the dual
//! set is searched and the primal set certifies cubes. Private variables of the
//! set in the dual role are renumbered after the variables of the set in the
//! primal role.
//!
//! The search interleaves primal propagation, dual propagation, count events,
//! database maintenance, restarts and decisions; see `Solver::step`.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::configs::{Phase, SolverOptions};
use crate::sat::error::SolverError;
use crate::sat::frame::Frames;
use crate::sat::literal::{Literal, Variable};
use crate::sat::number::Number;
use crate::sat::propagation::{Database, Side};
use crate::sat::queue::Queues;
use crate::sat::restarter::Restarts;
use crate::sat::stats::{Progress, Reporter, Stats};
use crate::sat::trail::Trail;
use crate::sat::variable::{Class, Reason, Variables};
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::io::Write;
use tracing::debug;

/// What a run computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Stop at the first model.
    Sat,
    /// Count relevant assignments.
    #[default]
    Count,
    /// Count and print every counted relevant cube.
    Enumerate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Status {
    #[default]
    Searching,
    Satisfied,
    /// Every relevant assignment has been accounted for.
    Exhausted,
    /// Stopped by `limit_number_of_partial_models`.
    Limited,
}

#[derive(Debug, Clone)]
struct Input {
    primal: Cnf,
    dual: Option<Cnf>,
}

/// The result of `SAT` in the usual exit code convention.
pub const SATISFIABLE: i32 = 10;
/// The result of `UNSAT` in the usual exit code convention.
pub const UNSATISFIABLE: i32 = 20;

#[derive(Debug, Clone)]
pub struct Solver {
    pub(crate) options: SolverOptions,
    pub(crate) stats: Stats,
    pub(crate) reporter: Reporter,
    input: Option<Input>,
    shared: Variable,
    relevant: Option<Vec<Variable>>,

    pub(crate) vars: Variables,
    pub(crate) trail: Trail,
    pub(crate) frames: Frames,
    pub(crate) queues: Queues,
    pub(crate) primal: Database,
    pub(crate) dual: Option<Database>,
    pub(crate) restarts: Restarts,
    /// Blocking clauses of the primal database.
    pub(crate) blocking: Vec<usize>,

    pub(crate) mode: Mode,
    pub(crate) status: Status,
    pub(crate) count: Number,
    pub(crate) relevant_first: bool,
    /// Level on which the dual clause set became unsatisfiable under the trail.
    pub(crate) pending: Option<usize>,
    pub(crate) discounts: u64,
    pub(crate) model_limit: Option<u64>,
    pub(crate) milestone: Option<usize>,
    inconsistent: bool,
    has_model: bool,
}

impl Solver {
    /// Creates a solver.
    ///
    /// `shared` must be exactly the variables `1..=k` in any order. `relevant`
    /// must be a subset of `shared` and defaults to all of it.
    ///
    /// # Errors
    ///
    /// `SolverError::SharedNotDense` or `SolverError::RelevantNotShared` for
    /// malformed variable sets.
    pub fn new(
        primal: Cnf,
        shared: &[Variable],
        relevant: Option<&[Variable]>,
        dual: Option<Cnf>,
    ) -> Result<Self, SolverError> {
        let sorted = shared.iter().copied().sorted_unstable().collect_vec();
        #[allow(clippy::cast_possible_truncation)]
        if let Some((i, &var)) = sorted
            .iter()
            .enumerate()
            .find(|&(i, &v)| v != i as Variable + 1)
        {
            return Err(SolverError::SharedNotDense {
                expected: i + 1,
                found: var,
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        let k = sorted.len() as Variable;

        if let Some(&var) = relevant.and_then(|r| r.iter().find(|&&v| v == 0 || v > k)) {
            return Err(SolverError::RelevantNotShared(var));
        }

        Ok(Self {
            options: SolverOptions::default(),
            stats: Stats::default(),
            reporter: Reporter::default(),
            input: Some(Input { primal, dual }),
            shared: k,
            relevant: relevant.map(<[Variable]>::to_vec),
            vars: Variables::new(0),
            trail: Trail::default(),
            frames: Frames::default(),
            queues: Queues::default(),
            primal: Database::new(Side::Primal, 0),
            dual: None,
            restarts: Restarts::default(),
            blocking: Vec::new(),
            mode: Mode::Count,
            status: Status::Searching,
            count: Number::zero(),
            relevant_first: false,
            pending: None,
            discounts: 0,
            model_limit: None,
            milestone: None,
            inconsistent: false,
            has_model: false,
        })
    }

    /// A solver over a single clause set where every variable is shared.
    ///
    /// # Errors
    ///
    /// `SolverError::RelevantNotShared` if a relevant variable exceeds the
    /// largest variable of `cnf`.
    pub fn projected(cnf: Cnf, relevant: Option<&[Variable]>) -> Result<Self, SolverError> {
        let shared = (1..=cnf.num_vars).collect_vec();
        Self::new(cnf, &shared, relevant, None)
    }

    #[must_use]
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Variables of the search, the dual-private ones renumbered after the
    /// primal ones. 0 before the first run.
    #[must_use]
    pub fn num_vars(&self) -> Variable {
        self.vars.max_var()
    }

    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Stops the search after `limit` count events.
    pub const fn limit_number_of_partial_models(&mut self, limit: u64) {
        self.model_limit = Some(limit);
    }

    /// Whether the last count run stopped at the model limit.
    #[must_use]
    pub fn limited(&self) -> bool {
        self.status == Status::Limited
    }

    /// Value of `lit` in the first model found, `None` before any model or
    /// if the variable was left unassigned by it.
    ///
    /// A first model certified by the dual clause set only fixes the variables
    /// assigned when the dual conflict happened. Every completion of its shared
    /// variables extends to a model, but private variables without a value have
    /// no witness and stay `None`.
    #[must_use]
    pub fn deref(&self, lit: Literal) -> Option<bool> {
        if !self.has_model || lit.variable() == 0 || lit.variable() > self.vars.max_var() {
            return None;
        }
        self.vars[lit.variable()]
            .first_model
            .map(|value| value == lit.polarity())
    }

    /// Decides satisfiability of the primal clause set.
    ///
    /// # Errors
    ///
    /// `SolverError::AlreadySolved` on a second run.
    pub fn primal_sat(&mut self) -> Result<i32, SolverError> {
        self.sat(false)
    }

    /// Decides satisfiability of the dual clause set.
    ///
    /// # Errors
    ///
    /// `SolverError::MissingDual` without a dual clause set,
    /// `SolverError::AlreadySolved` on a second run.
    pub fn dual_sat(&mut self) -> Result<i32, SolverError> {
        self.sat(true)
    }

    /// Counts the relevant assignments of the primal clause set.
    ///
    /// # Errors
    ///
    /// `SolverError::AlreadySolved` on a second run.
    pub fn primal_count(&mut self) -> Result<Number, SolverError> {
        self.run(false, Mode::Count, &mut |_| Ok(()))?;
        Ok(self.count.clone())
    }

    /// Counts the relevant assignments of the dual clause set.
    ///
    /// # Errors
    ///
    /// `SolverError::MissingDual` without a dual clause set,
    /// `SolverError::AlreadySolved` on a second run.
    pub fn dual_count(&mut self) -> Result<Number, SolverError> {
        self.run(true, Mode::Count, &mut |_| Ok(()))?;
        Ok(self.count.clone())
    }

    /// Counts the relevant assignments of the primal clause set, printing one
    /// line per counted cube with the names given by `name`.
    ///
    /// # Errors
    ///
    /// `SolverError::Io` if writing fails, `SolverError::AlreadySolved` on a
    /// second run.
    pub fn primal_enumerate<W: Write, F: Fn(Variable) -> String>(
        &mut self,
        out: &mut W,
        name: F,
    ) -> Result<Number, SolverError> {
        self.enumerate(false, out, name)
    }

    /// Like `primal_enumerate` over the dual clause set.
    ///
    /// # Errors
    ///
    /// `SolverError::Io` if writing fails, `SolverError::MissingDual` without a
    /// dual clause set, `SolverError::AlreadySolved` on a second run.
    pub fn dual_enumerate<W: Write, F: Fn(Variable) -> String>(
        &mut self,
        out: &mut W,
        name: F,
    ) -> Result<Number, SolverError> {
        self.enumerate(true, out, name)
    }

    fn sat(&mut self, swap: bool) -> Result<i32, SolverError> {
        self.run(swap, Mode::Sat, &mut |_| Ok(()))?;
        Ok(if self.status == Status::Satisfied {
            SATISFIABLE
        } else {
            UNSATISFIABLE
        })
    }

    fn enumerate<W: Write, F: Fn(Variable) -> String>(
        &mut self,
        swap: bool,
        out: &mut W,
        name: F,
    ) -> Result<Number, SolverError> {
        self.run(swap, Mode::Enumerate, &mut |cube| {
            let line = if cube.is_empty() {
                "true".to_string()
            } else {
                cube.iter()
                    .map(|lit| {
                        let prefix = if lit.is_negated() { "!" } else { "" };
                        format!("{prefix}{}", name(lit.variable()))
                    })
                    .join(" ")
            };
            writeln!(out, "{line}")
        })?;
        Ok(self.count.clone())
    }

    fn run(
        &mut self,
        swap: bool,
        mode: Mode,
        visit: &mut dyn FnMut(&[Literal]) -> std::io::Result<()>,
    ) -> Result<(), SolverError> {
        self.setup(swap)?;
        self.mode = mode;
        if mode == Mode::Enumerate {
            self.options.discount = false;
        }
        self.relevant_first = self.options.relevantfirst;
        self.report('*');

        if self.inconsistent {
            self.status = Status::Exhausted;
        }
        while self.status == Status::Searching {
            self.step(visit)?;
        }
        self.stats.propagations = self.primal.propagations;
        self.stats.dual_propagations = self.dual.as_ref().map_or(0, |d| d.propagations);
        self.stats.bumped = self.queues.bumped;

        debug!(
            status = ?self.status,
            count = %self.count,
            conflicts = self.stats.conflicts,
            "search finished"
        );
        self.report('1');
        Ok(())
    }

    /// Builds variables, queues and both databases from the input.
    fn setup(&mut self, swap: bool) -> Result<(), SolverError> {
        let input = self.input.as_ref().ok_or(SolverError::AlreadySolved)?;
        if swap && input.dual.is_none() {
            return Err(SolverError::MissingDual);
        }
        let Some(Input { primal, dual }) = self.input.take() else {
            return Err(SolverError::AlreadySolved);
        };
        let (primal, dual) = match (swap, dual) {
            (true, Some(dual)) => (dual, Some(primal)),
            (_, dual) => (primal, dual),
        };

        let k = self.shared;
        let primal_max = primal.num_vars.max(k);
        let dual_max = dual.as_ref().map_or(k, |d| d.num_vars.max(k));
        let num_vars = primal_max + (dual_max - k);

        self.vars = Variables::new(num_vars);
        let relevant: FxHashSet<Variable> = self
            .relevant
            .as_ref()
            .map_or_else(|| (1..=k).collect(), |r| r.iter().copied().collect());
        for var in 1..=num_vars {
            let class = if var <= k {
                if relevant.contains(&var) {
                    Class::Relevant
                } else {
                    Class::Irrelevant
                }
            } else if var <= primal_max {
                Class::Primal
            } else {
                Class::Dual
            };
            self.vars.set_class(var, class);
        }

        let occurring = primal.occurring();
        let mut rng = fastrand::Rng::with_seed(self.options.seed);
        for var in (1..=num_vars).rev() {
            let v = &mut self.vars[var];
            v.candidate = occurring.get(var as usize).copied().unwrap_or(false);
            v.phase = match self.options.phase {
                Phase::False => false,
                Phase::True => true,
                Phase::Random => rng.bool(),
            };
            if v.candidate || v.class == Class::Dual {
                self.queues.enqueue(&mut self.vars, var);
            }
        }

        self.primal = Database::new(Side::Primal, num_vars);
        self.primal.schedule.limit = self.options.reduceinit;
        for clause in primal.iter() {
            self.add_original(Side::Primal, clause.literals.iter().copied());
        }

        if let Some(dual) = dual {
            let mut db = Database::new(Side::Dual, num_vars);
            db.schedule.limit = self.options.reduceinit;
            self.dual = Some(db);
            let offset = primal_max - k;
            for clause in dual.iter() {
                let literals = clause.literals.iter().map(|&lit| {
                    if lit.variable() > k {
                        lit.with_variable(lit.variable() + offset)
                    } else {
                        lit
                    }
                });
                self.add_original(Side::Dual, literals);
            }
        }

        debug!(
            variables = num_vars,
            shared = k,
            relevant = self.vars.relevant,
            candidates = self.queues.queue(Class::Relevant).len
                + self.queues.queue(Class::Irrelevant).len
                + self.queues.queue(Class::Primal).len,
            primal = self.primal.cnf.len(),
            literals = self.primal.cnf.num_literals(),
            dual = self.dual.as_ref().map_or(0, |d| d.cnf.len()),
            "solver set up"
        );
        Ok(())
    }

    fn add_original(&mut self, side: Side, literals: impl Iterator<Item = Literal>) {
        let mut clause = Clause::new(literals);
        if !clause.normalize() {
            return;
        }
        match (side, clause.len()) {
            (Side::Primal, 0) => self.inconsistent = true,
            (Side::Dual, 0) => self.pending = Some(0),
            (Side::Primal, 1) => self.root_unit(clause[0]),
            (Side::Dual, 1) => {
                let lit = clause[0];
                if self.vars.class(lit).is_shared() {
                    if let Some(dual) = self.dual.as_mut() {
                        dual.units.push_back(lit);
                    }
                } else {
                    match self.vars.value(lit) {
                        None => self.assign(lit, 0, Reason::Unit),
                        Some(false) => self.pending = Some(0),
                        Some(true) => {}
                    }
                }
            }
            (Side::Primal, _) => {
                self.primal.add(clause);
            }
            (Side::Dual, _) => {
                if let Some(dual) = self.dual.as_mut() {
                    dual.add(clause);
                }
            }
        }
    }

    fn root_unit(&mut self, lit: Literal) {
        match self.vars.value(lit) {
            None => self.assign(lit, 0, Reason::Unit),
            Some(false) => self.inconsistent = true,
            Some(true) => {}
        }
    }

    #[must_use]
    pub(crate) fn level(&self) -> usize {
        self.frames.level()
    }

    pub(crate) fn assign(&mut self, lit: Literal, level: usize, reason: Reason) {
        match (reason, self.dual.as_mut()) {
            (Reason::Dual(_), Some(dual)) => {
                dual.assign(&mut self.vars, &mut self.trail, lit, level, reason);
            }
            _ => self
                .primal
                .assign(&mut self.vars, &mut self.trail, lit, level, reason),
        }
    }

    /// Unassigns every level above `level` without touching any count.
    pub(crate) fn backtrack(&mut self, level: usize) {
        if level >= self.level() {
            return;
        }
        let start = self.frames[level + 1].trail;
        for lit in self.trail.backstep_to(start) {
            let var = lit.variable();
            match self.vars.unassign(var) {
                Reason::Primal(cref) => self.primal.cnf.deactivate(cref),
                Reason::Dual(cref) => {
                    if let Some(dual) = self.dual.as_mut() {
                        dual.cnf.deactivate(cref);
                    }
                }
                _ => {}
            }
            self.queues.on_unassign(&self.vars, var);
        }
        self.frames.backtrack(level);
        self.primal.backtrack(self.trail.len());
        if let Some(dual) = self.dual.as_mut() {
            dual.backtrack(self.trail.len());
        }
        if self.pending.is_some_and(|p| p > level) {
            self.pending = None;
        }
    }

    /// The unassigned decision candidate to branch on next.
    pub(crate) fn next_decision(&mut self) -> Option<Variable> {
        let relevant = self.queues.next_unassigned(&self.vars, Class::Relevant);
        if self.relevant_first && relevant.is_some() {
            return relevant;
        }
        let irrelevant = self.queues.next_unassigned(&self.vars, Class::Irrelevant);
        let private = self.queues.next_unassigned(&self.vars, Class::Primal);
        [relevant, irrelevant, private]
            .into_iter()
            .flatten()
            .max_by_key(|&v| self.vars[v].stamp)
    }

    /// Opens a new level deciding `lit`.
    pub(crate) fn decide(&mut self, lit: Literal) {
        let relevant = self.vars.class(lit) == Class::Relevant;
        self.frames.push(lit, relevant, self.trail.len());
        self.stats.decisions += 1;
        self.assign(lit, self.level(), Reason::Decision);
    }

    /// One iteration of the search loop.
    fn step(
        &mut self,
        visit: &mut dyn FnMut(&[Literal]) -> std::io::Result<()>,
    ) -> Result<(), SolverError> {
        let level = self.level();
        if let Some(conflict) = self
            .primal
            .propagate(&mut self.vars, &mut self.trail, level)
        {
            self.stats.conflicts += 1;
            self.on_primal_conflict(conflict);
            return Ok(());
        }

        if self.pending.is_none() {
            if let Some(dual) = self.dual.as_mut() {
                if let Some(conflict) = dual.propagate(&mut self.vars, &mut self.trail, level) {
                    self.on_dual_conflict(conflict);
                }
            }
        }

        if self.pending_ready() {
            return self.on_model(visit);
        }

        if level == 0 && (self.assert_units() || self.decide_dual_unit()) {
            return Ok(());
        }

        self.maintain();
        if self.restarting() {
            self.restart();
            return Ok(());
        }

        match self.next_decision() {
            Some(var) => {
                let lit = Literal::new(var, self.vars[var].phase);
                self.decide(lit);
                Ok(())
            }
            None => self.on_model(visit),
        }
    }

    /// Whether a pending dual conflict can be counted without overlapping
    /// assignments already excluded by blocking clauses.
    fn pending_ready(&self) -> bool {
        self.pending.is_some() && self.blocking_satisfied()
    }

    fn blocking_satisfied(&self) -> bool {
        self.vars.unassigned_relevant == 0
            || self.blocking.iter().all(|&cref| {
                let clause = &self.primal.cnf[cref];
                clause.is_garbage() || clause.iter().any(|&l| self.vars.is_true(l))
            })
    }

    /// Asserts queued root-level units. Returns whether anything changed.
    fn assert_units(&mut self) -> bool {
        while let Some(lit) = self.primal.units.pop_front() {
            match self.vars.value(lit) {
                Some(true) => {}
                Some(false) => {
                    self.status = Status::Exhausted;
                    return true;
                }
                None => {
                    self.assign(lit, 0, Reason::Unit);
                    return true;
                }
            }
        }
        false
    }

    /// Turns a queued dual unit on a shared literal into a dual conflict by
    /// deciding its negation. Returns whether anything changed.
    ///
    /// A unit on an irrelevant variable is only decided when the conflict can
    /// be counted right away: relevant decisions must never end up above an
    /// irrelevant one, or blocking clauses would mention it.
    fn decide_dual_unit(&mut self) -> bool {
        let counted_now = self.blocking_satisfied();
        let Some(dual) = self.dual.as_mut() else {
            return false;
        };
        for _ in 0..dual.units.len() {
            let Some(lit) = dual.units.pop_front() else {
                break;
            };
            match self.vars.value(lit) {
                Some(true) => {}
                Some(false) => {
                    self.pending = Some(0);
                    return true;
                }
                None if self.vars.class(lit) == Class::Relevant || counted_now => {
                    dual.units.push_back(lit);
                    self.stats.dual_units += 1;
                    self.decide(!lit);
                    self.pending = Some(1);
                    return true;
                }
                None => dual.units.push_back(lit),
            }
        }
        false
    }

    /// Relevant literals of the trail, ordered by variable.
    pub(crate) fn cube(&self) -> Vec<Literal> {
        self.vars
            .indices()
            .filter(|&v| self.vars[v].class == Class::Relevant)
            .filter_map(|v| self.vars[v].value.map(|value| Literal::new(v, value)))
            .collect()
    }

    pub(crate) fn snapshot_model(&mut self) {
        if self.has_model {
            return;
        }
        self.has_model = true;
        for var in self.vars.indices() {
            let v = &mut self.vars[var];
            v.first_model = v.value;
        }
        debug_assert!(
            self.pending.is_some() || self.primal.cnf.verify(&self.total_assignment()),
            "first model falsifies a primal clause"
        );
    }

    /// Current values indexed by variable, unassigned ones as `false`.
    fn total_assignment(&self) -> Vec<bool> {
        std::iter::once(false)
            .chain(self.vars.indices().map(|v| self.vars[v].value.unwrap_or(false)))
            .collect()
    }

    pub(crate) fn progress(&self) -> Progress {
        Progress {
            conflicts: self.stats.conflicts,
            clauses: self.primal.cnf.len() + self.dual.as_ref().map_or(0, |d| d.cnf.len()),
            variables: self.vars.max_var() as usize - self.vars.fixed,
            models: self.stats.models,
            log2: self.count.log2(),
        }
    }

    /// Prints a progress line with `marker` if `verbose` is set.
    pub fn report(&mut self, marker: char) {
        if self.options.verbose > 0 {
            let progress = self.progress();
            self.reporter.report(marker, &progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cnf(clauses: &[&[i32]]) -> Cnf {
        Cnf::new(clauses.iter().map(|c| c.to_vec()))
    }

    #[test]
    fn test_shared_must_be_dense() {
        let result = Solver::new(cnf(&[&[1, 2]]), &[1, 3], None, None);
        assert!(matches!(
            result,
            Err(SolverError::SharedNotDense { expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_relevant_must_be_shared() {
        let result = Solver::new(cnf(&[&[1, 2]]), &[1], Some(&[2][..]), None);
        assert!(matches!(result, Err(SolverError::RelevantNotShared(2))));
    }

    #[test]
    fn test_single_use() {
        let mut solver = Solver::projected(cnf(&[&[1]]), None).unwrap();
        assert_eq!(solver.primal_sat().unwrap(), SATISFIABLE);
        assert!(matches!(solver.primal_count(), Err(SolverError::AlreadySolved)));
    }

    #[test]
    fn test_dual_entry_needs_dual() {
        let mut solver = Solver::projected(cnf(&[&[1]]), None).unwrap();
        assert!(matches!(solver.dual_sat(), Err(SolverError::MissingDual)));
        assert_eq!(solver.primal_sat().unwrap(), SATISFIABLE);
    }

    #[test]
    fn test_deref_first_model() {
        let mut solver = Solver::projected(cnf(&[&[1], &[-1, -2]]), None).unwrap();
        assert_eq!(solver.deref(Literal::from(1)), None);
        assert_eq!(solver.primal_sat().unwrap(), SATISFIABLE);
        assert_eq!(solver.deref(Literal::from(1)), Some(true));
        assert_eq!(solver.deref(Literal::from(-2)), Some(true));
        assert_eq!(solver.deref(Literal::from(7)), None);
    }

    #[test]
    fn test_root_conflict() {
        let mut solver = Solver::projected(cnf(&[&[1], &[-1]]), None).unwrap();
        assert_eq!(solver.primal_sat().unwrap(), UNSATISFIABLE);
    }

    #[test]
    fn test_empty_clause() {
        let mut solver = Solver::projected(cnf(&[&[1, 2], &[]]), None).unwrap();
        assert!(solver.primal_count().unwrap().is_zero());
    }

    #[test]
    fn test_irrelevant_dual_unit_counts_everything() {
        // The dual is falsified once 2 is true, so every value of 1 counts.
        let primal = cnf(&[&[1, 2]]);
        let dual = cnf(&[&[-2]]);
        let mut solver = Solver::new(primal, &[1, 2], Some(&[1][..]), Some(dual)).unwrap();
        assert_eq!(solver.primal_count().unwrap().to_u64(), Some(2));
        assert!(solver.stats().dual_units > 0);
        assert_eq!(solver.stats().decisions, solver.stats().dual_units);
    }

    #[test]
    fn test_irrelevant_dual_unit_refuted_by_primal() {
        let primal = cnf(&[&[1, 2], &[-1, 2]]);
        let dual = cnf(&[&[2]]);
        let mut solver = Solver::new(primal, &[1, 2], Some(&[1][..]), Some(dual)).unwrap();
        assert_eq!(solver.primal_count().unwrap().to_u64(), Some(2));
        assert_eq!(solver.stats().dual_units, 1);
    }

    #[test]
    fn test_private_variables_renumbered() {
        let primal = cnf(&[&[1, 3]]);
        let dual = cnf(&[&[-1, 2], &[-1, -2]]);
        let mut solver = Solver::new(primal, &[1], None, Some(dual)).unwrap();
        solver.setup(false).unwrap();
        assert_eq!(solver.vars.max_var(), 4);
        assert_eq!(solver.vars[3].class, Class::Primal);
        assert_eq!(solver.vars[4].class, Class::Dual);
        assert!(solver.vars[3].candidate);
        assert!(!solver.vars[4].candidate);
    }
}
