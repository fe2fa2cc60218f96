#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Conflicts and count events.
//!
//! A count event happens when the primal clause set is satisfied by the trail
//! or when the dual clause set is falsified by it. Either way every extension
//! of the current relevant assignment is a model, so `2^u` is added to the
//! count where `u` is the number of unassigned relevant variables.
//!
//! After counting, the search retracts to the highest relevant decision that
//! has not been flipped yet and excludes the explored side, by one of:
//!
//! - blocking: learn the negation of the decisions `1..=r` as an irredundant
//!   clause, backtrack below `r` and let the clause force the other side.
//! - flipping: pop everything above `r` and re-open level `r` with the negated
//!   decision. The count of the explored side is stored in the frame so it can
//!   be discounted if a later backjump pops the flipped level again.
//!
//! Counts of flipped levels popped by a retraction are folded into the level
//! that takes their place.

use crate::sat::clause::{Clause, ClauseFlags, ClauseRef};
use crate::sat::conflict_analysis::{analyse_dual, analyse_primal, glue};
use crate::sat::error::SolverError;
use crate::sat::literal::Literal;
use crate::sat::number::Number;
use crate::sat::solver::{Mode, Solver, Status};
use crate::sat::variable::Reason;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

impl Solver {
    pub(crate) fn on_primal_conflict(&mut self, conflict: ClauseRef) {
        let level = self.level();
        if level == 0 {
            debug!("conflict on level 0");
            self.status = Status::Exhausted;
            return;
        }
        if self.frames.top().flipped {
            // Both sides of the top decision are done.
            trace!(level, "conflict on flipped level");
            self.retract(Number::zero());
            return;
        }

        let learned = analyse_primal(
            &mut self.primal.cnf,
            &mut self.vars,
            &self.trail,
            level,
            conflict,
            self.options.bump > 1,
        );
        if self.options.bump > 0 {
            let mut seen = learned.seen;
            self.queues.bump_all(&mut self.vars, &mut seen);
        }
        self.restarts.update(learned.glue);

        let mut jump = learned.jump;
        let flipped = self.frames.top_flipped();
        if flipped > jump {
            if self.options.discount && self.discounts < self.options.discountmax {
                self.discount(jump);
            } else {
                jump = flipped;
            }
        }

        self.backtrack(jump);
        self.stats.learned += 1;
        let uip = learned.literals[0];
        if learned.literals.len() == 1 && jump == 0 {
            self.assign(uip, 0, Reason::Unit);
            return;
        }
        let cref = self
            .primal
            .add(Clause::learned(learned.literals, learned.glue));
        self.primal.schedule.learned += 1;
        if self.primal.cnf[cref].is_unit() {
            self.primal.units.push_back(uip);
        }
        self.assign(uip, jump, Reason::Primal(cref));
    }

    /// Subtracts the counts of every flipped level above `level`.
    fn discount(&mut self, level: usize) {
        let mut total = Number::zero();
        for frame in self.frames.flipped_above(level) {
            total.add(&frame.count);
        }
        self.count.sub(&total);
        self.discounts += 1;
        self.stats.discounted += 1;
        debug!(level, discounted = %total, "discounting flipped levels");
    }

    pub(crate) fn on_dual_conflict(&mut self, conflict: ClauseRef) {
        let Some(dual) = self.dual.as_mut() else {
            return;
        };
        self.stats.dual_conflicts += 1;
        let learned = analyse_dual(&mut dual.cnf, &mut self.vars, conflict);
        self.pending = Some(learned.level);
        trace!(level = learned.level, size = learned.literals.len(), "dual conflict");

        match learned.literals.len() {
            0 => {}
            1 => {
                if !dual.units.contains(&learned.literals[0]) {
                    dual.units.push_back(learned.literals[0]);
                }
            }
            _ => {
                let glue = glue(&self.vars, &learned.literals, self.frames.level());
                dual.add(Clause::learned(learned.literals, glue));
                dual.schedule.learned += 1;
                self.stats.dual_learned += 1;
            }
        }
        if self.options.bump > 0 {
            let mut seen = learned.seen;
            self.queues.bump_all(&mut self.vars, &mut seen);
        }
    }

    /// Accounts for a satisfied primal or falsified dual clause set.
    pub(crate) fn on_model(
        &mut self,
        visit: &mut dyn FnMut(&[Literal]) -> std::io::Result<()>,
    ) -> Result<(), SolverError> {
        if self.mode == Mode::Sat {
            self.snapshot_model();
            self.stats.models += 1;
            self.status = Status::Satisfied;
            return Ok(());
        }

        if !self.relevant_first {
            self.relevant_first = true;
            let prefix = self.frames.relevant_prefix();
            if prefix < self.level() {
                debug!(prefix, level = self.level(), "switching to relevant decisions first");
                self.backtrack(prefix);
                return Ok(());
            }
        }

        self.snapshot_model();
        let free = self.vars.unassigned_relevant;
        self.count.add_power_of_two(free);
        self.stats.models += 1;
        if self.mode == Mode::Enumerate {
            visit(&self.cube())?;
        }

        let log2 = self.count.log2();
        if log2 > self.milestone {
            self.milestone = log2;
            self.report('m');
        }
        if self.model_limit.is_some_and(|limit| self.stats.models >= limit) {
            debug!(models = self.stats.models, "model limit reached");
            self.status = Status::Limited;
            return Ok(());
        }

        self.retract(Number::power_of_two(free));
        Ok(())
    }

    /// Leaves the subtree of the highest open relevant decision, which has
    /// been fully counted with `count` in it beyond the flipped levels above.
    fn retract(&mut self, mut count: Number) {
        let Some(level) = self.frames.top_open() else {
            debug!("no open relevant decision left");
            self.status = Status::Exhausted;
            return;
        };
        for frame in self.frames.flipped_above(level) {
            count.add(&frame.count);
        }

        if self.options.blocks_at(level) {
            self.block(level);
        } else {
            self.flip(level, count);
        }
    }

    fn block(&mut self, level: usize) {
        let literals = self.frames.decisions(level).rev().map(|d| !d).collect_vec();
        let uip = literals[0];
        self.stats.blocked += 1;
        trace!(level, size = literals.len(), "blocking");
        self.backtrack(level - 1);

        if literals.len() == 1 {
            self.assign(uip, 0, Reason::Unit);
            return;
        }
        let mut clause = Clause::new(literals);
        clause.flags.insert(ClauseFlags::BLOCKING);
        let cref = self.primal.add(clause);
        self.subsume_recent(cref);
        self.blocking.push(cref);
        self.assign(uip, level - 1, Reason::Primal(cref));
    }

    fn flip(&mut self, level: usize, count: Number) {
        let Some(decision) = self.frames[level].decision else {
            return;
        };
        self.stats.flipped += 1;
        trace!(level, %decision, "flipping");
        self.backtrack(level - 1);
        self.frames.push_flipped(!decision, self.trail.len(), count);
        self.assign(!decision, level, Reason::Flip);
    }

    /// Marks recent redundant or blocking clauses that contain every literal
    /// of the new blocking clause `cref` as garbage.
    fn subsume_recent(&mut self, cref: ClauseRef) {
        let literals: FxHashSet<Literal> = self.primal.cnf[cref].iter().copied().collect();
        let mut subsumed = 0;
        for other in (0..cref).rev().take(self.options.subsumelimit) {
            let clause = &mut self.primal.cnf[other];
            if clause.is_garbage()
                || clause.is_active()
                || !(clause.is_redundant() || clause.is_blocking())
                || clause.len() < literals.len()
            {
                continue;
            }
            if literals.iter().all(|lit| clause.literals.contains(lit)) {
                clause.mark_garbage();
                subsumed += 1;
            }
        }
        if subsumed > 0 {
            trace!(subsumed, "blocking clause subsumes recent clauses");
            self.stats.subsumed += subsumed;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sat::cnf::Cnf;
    use crate::sat::configs::SolverOptions;
    use crate::sat::solver::Solver;

    fn count_with(clauses: &[&[i32]], options: SolverOptions) -> u64 {
        let cnf = Cnf::new(clauses.iter().map(|c| c.to_vec()));
        let mut solver = Solver::projected(cnf, None)
            .unwrap()
            .with_options(options);
        solver.primal_count().unwrap().to_u64().unwrap()
    }

    #[test]
    fn test_flip_and_block_agree() {
        let clauses: &[&[i32]] = &[&[1, 2, 3], &[-1, -2], &[-2, -3], &[3, 4]];
        let blocking = SolverOptions {
            blocklimit: 0,
            ..SolverOptions::default()
        };
        let flipping = SolverOptions {
            block: false,
            ..SolverOptions::default()
        };
        let expected = count_with(clauses, SolverOptions::default());
        assert_eq!(expected, 6);
        assert_eq!(count_with(clauses, blocking), expected);
        assert_eq!(count_with(clauses, flipping), expected);
    }

    fn random_3cnf(rng: &mut fastrand::Rng, vars: i32, clauses: usize) -> Cnf {
        let mut cnf = Cnf::new((0..clauses).map(|_| {
            (0..3)
                .map(|_| {
                    let var = rng.i32(1..=vars);
                    if rng.bool() { var } else { -var }
                })
                .collect::<Vec<_>>()
        }));
        cnf.num_vars = vars.unsigned_abs();
        cnf
    }

    #[test]
    fn test_discounting_fires_and_agrees() {
        let mut rng = fastrand::Rng::with_seed(3);
        let relevant: Vec<u32> = (1..=10).collect();
        let mut discounted = 0;
        for _ in 0..6 {
            let cnf = random_3cnf(&mut rng, 70, 270);
            let run = |discount: bool| {
                let mut solver = Solver::projected(cnf.clone(), Some(relevant.as_slice()))
                    .unwrap()
                    .with_options(SolverOptions {
                        block: false,
                        discount,
                        ..SolverOptions::default()
                    });
                let count = solver.primal_count().unwrap();
                (count, solver.stats.discounted)
            };
            let (with, fired) = run(true);
            let (without, none) = run(false);
            assert_eq!(with, without);
            assert_eq!(none, 0);
            discounted += fired;
        }
        assert!(discounted > 0, "no backjump popped a flipped level");
    }

    #[test]
    fn test_blocking_unit_on_first_level() {
        assert_eq!(count_with(&[&[1, 2]], SolverOptions::default()), 3);
    }
}
