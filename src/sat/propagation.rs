#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Two-watched-literal propagation over one side of the search.
//!
//! The primal and the dual clause set each live in their own `Database` with
//! their own watch lists and their own cursor into the shared trail. Both
//! cursors only move forward until a backtrack clamps them to the new trail
//! length.
//!
//! The dual side never assigns shared variables. A dual clause that becomes
//! unit on a shared literal is left alone, except on level 0 where the literal
//! is queued in `Database::units` for the solver to turn into a dual conflict.

use crate::sat::clause::{Clause, ClauseFlags, ClauseRef};
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::trail::Trail;
use crate::sat::variable::{Class, Reason, Variables};
use crate::sat::watch::WatchedLiterals;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Primal,
    Dual,
}

impl Side {
    #[must_use]
    pub const fn reason(self, cref: ClauseRef) -> Reason {
        match self {
            Self::Primal => Reason::Primal(cref),
            Self::Dual => Reason::Dual(cref),
        }
    }

    /// Whether literals of `class` are visible to this side.
    #[must_use]
    pub const fn sees(self, class: Class) -> bool {
        !matches!(
            (self, class),
            (Self::Primal, Class::Dual) | (Self::Dual, Class::Primal)
        )
    }
}

/// Reduction schedule of one clause set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schedule {
    pub limit: usize,
    pub learned: usize,
    /// Root-level fixed variables at the last simplification.
    pub fixed: usize,
}

/// A clause set together with its propagation state.
#[derive(Debug, Clone)]
pub struct Database {
    pub side: Side,
    pub cnf: Cnf,
    pub watches: WatchedLiterals,
    /// Next trail position to propagate.
    pub next: usize,
    /// Root-level literals waiting to be asserted (primal) or turned into
    /// dual conflicts (dual).
    pub units: VecDeque<Literal>,
    pub schedule: Schedule,
    pub propagations: u64,
}

impl Database {
    #[must_use]
    pub fn new(side: Side, num_vars: Variable) -> Self {
        Self {
            side,
            cnf: Cnf::default(),
            watches: WatchedLiterals::new(num_vars),
            next: 0,
            units: VecDeque::new(),
            schedule: Schedule::default(),
            propagations: 0,
        }
    }

    /// Adds a clause and watches its first two literals if it has two.
    pub fn add(&mut self, mut clause: Clause) -> ClauseRef {
        if self.side == Side::Dual {
            clause.flags.insert(ClauseFlags::DUAL);
        }
        let cref = self.cnf.add(clause);
        if self.cnf[cref].len() > 1 {
            self.watches.add_clause(&self.cnf, cref);
        }
        cref
    }

    /// Assigns `lit` on `level` because of `reason` and records it on the trail.
    pub fn assign(
        &mut self,
        vars: &mut Variables,
        trail: &mut Trail,
        lit: Literal,
        level: usize,
        reason: Reason,
    ) {
        if let Reason::Primal(cref) | Reason::Dual(cref) = reason {
            self.cnf.activate(cref);
        }
        vars.assign(lit, level, reason);
        trail.push(lit);
    }

    /// Propagates the trail from the cursor on. Returns a falsified clause.
    pub fn propagate(
        &mut self,
        vars: &mut Variables,
        trail: &mut Trail,
        level: usize,
    ) -> Option<ClauseRef> {
        while self.next < trail.len() {
            let lit = trail[self.next];
            self.next += 1;
            if !self.side.sees(vars.class(lit)) {
                continue;
            }
            self.propagations += 1;
            if let Some(conflict) = self.propagate_literal(vars, trail, level, !lit) {
                return Some(conflict);
            }
        }
        None
    }

    fn propagate_literal(
        &mut self,
        vars: &mut Variables,
        trail: &mut Trail,
        level: usize,
        false_lit: Literal,
    ) -> Option<ClauseRef> {
        let mut watches = std::mem::take(&mut self.watches[false_lit]);
        let mut conflict = None;
        let mut i = 0;
        let mut j = 0;

        while i < watches.len() {
            let cref = watches[i];
            i += 1;

            let clause = &mut self.cnf[cref];
            if clause.is_garbage() {
                continue;
            }
            if clause[0] == false_lit {
                clause.swap(0, 1);
            }
            debug_assert_eq!(clause[1], false_lit);

            let other = clause[0];
            if vars.is_true(other) {
                watches[j] = cref;
                j += 1;
                continue;
            }

            if let Some(k) = (2..clause.len()).find(|&k| !vars.is_false(clause[k])) {
                clause.swap(1, k);
                let replacement = clause[1];
                self.watches.watch(replacement, cref);
                continue;
            }

            watches[j] = cref;
            j += 1;

            if vars.is_false(other) {
                conflict = Some(cref);
                while i < watches.len() {
                    watches[j] = watches[i];
                    j += 1;
                    i += 1;
                }
                break;
            }

            if self.side == Side::Dual && vars.class(other).is_shared() {
                if level == 0 && !self.units.contains(&other) {
                    self.units.push_back(other);
                }
                continue;
            }

            self.assign(vars, trail, other, level, self.side.reason(cref));
        }

        watches.truncate(j);
        debug_assert!(self.watches[false_lit].is_empty());
        self.watches[false_lit] = watches;
        conflict
    }

    /// Clamps the cursor after the trail shrank.
    pub fn backtrack(&mut self, trail_len: usize) {
        self.next = self.next.min(trail_len);
    }
}
