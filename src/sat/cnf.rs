#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The clause set.
//!
//! A `Cnf` owns every clause of one side of the search (primal or dual) and
//! keeps running counters over them. Clauses are referenced by their position
//! (`ClauseRef`); positions only change during `collect_garbage`, which returns
//! the mapping needed to fix up watch lists and reasons.

use crate::sat::clause::{Clause, ClauseFlags, ClauseRef};
use crate::sat::literal::{Literal, Variable};
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    clauses: Vec<Clause>,
    /// Largest variable index mentioned by any clause.
    pub num_vars: Variable,
    /// Clauses ever added, also the next clause id.
    pub added: u64,
    pub irredundant: usize,
    pub redundant: usize,
    pub active: usize,
}

impl Cnf {
    #[must_use]
    pub fn new<J, I>(clauses: I) -> Self
    where
        J: IntoIterator<Item = i32>,
        I: IntoIterator<Item = J>,
    {
        let mut cnf = Self::default();
        for clause in clauses {
            cnf.add(Clause::new(clause.into_iter().map(Literal::from)));
        }
        cnf
    }

    /// Adds a clause, assigning it the next stable id. Never fails.
    pub fn add(&mut self, mut clause: Clause) -> ClauseRef {
        debug_assert!(!clause.is_active());
        clause.id = self.added;
        self.added += 1;

        if clause.is_redundant() {
            self.redundant += 1;
        } else {
            self.irredundant += 1;
        }

        if let Some(max) = clause.iter().map(|l| l.variable()).max() {
            self.num_vars = self.num_vars.max(max);
        }

        self.clauses.push(clause);
        self.check_counters();
        self.clauses.len() - 1
    }

    /// Marks a clause as the reason of an assignment.
    pub fn activate(&mut self, cref: ClauseRef) {
        let clause = &mut self.clauses[cref];
        debug_assert!(!clause.is_active(), "clause {cref} already active");
        clause.flags.insert(ClauseFlags::ACTIVE);
        self.active += 1;
        self.check_counters();
    }

    pub fn deactivate(&mut self, cref: ClauseRef) {
        let clause = &mut self.clauses[cref];
        debug_assert!(clause.is_active(), "clause {cref} not active");
        clause.flags.remove(ClauseFlags::ACTIVE);
        debug_assert!(self.active > 0);
        self.active -= 1;
    }

    /// Removes every clause that is garbage and inactive, compacting in place.
    ///
    /// Returns the old-to-new position map; collected clauses map to `None`.
    /// Watch lists must be flushed of garbage before the map is applied.
    pub fn collect_garbage(&mut self) -> Vec<Option<ClauseRef>> {
        let mut map = Vec::with_capacity(self.clauses.len());
        let mut kept = 0;

        for i in 0..self.clauses.len() {
            let clause = &self.clauses[i];
            if clause.is_garbage() && !clause.is_active() {
                if clause.is_redundant() {
                    self.redundant -= 1;
                } else {
                    self.irredundant -= 1;
                }
                map.push(None);
            } else {
                self.clauses.swap(kept, i);
                map.push(Some(kept));
                kept += 1;
            }
        }

        self.clauses.truncate(kept);
        self.check_counters();
        map
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Clause> {
        self.clauses.iter_mut()
    }

    /// Number of literals over all clauses.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// Variables occurring in at least one clause, indexed by variable.
    #[must_use]
    pub fn occurring(&self) -> Vec<bool> {
        let mut occurs = vec![false; self.num_vars as usize + 1];
        for lit in self.clauses.iter().flat_map(Clause::iter) {
            occurs[lit.variable() as usize] = true;
        }
        occurs
    }

    /// Evaluates the irredundant clauses under a total assignment indexed by
    /// variable. Garbage clauses are skipped.
    #[must_use]
    pub fn verify(&self, model: &[bool]) -> bool {
        self.clauses
            .iter()
            .filter(|c| !c.is_redundant() && !c.is_garbage())
            .all(|c| c.iter().any(|l| model[l.variable() as usize] == l.polarity()))
    }

    fn check_counters(&self) {
        debug_assert_eq!(self.irredundant + self.redundant, self.clauses.len());
        debug_assert!(self.active <= self.clauses.len());
    }
}

impl Index<ClauseRef> for Cnf {
    type Output = Clause;

    fn index(&self, index: ClauseRef) -> &Self::Output {
        &self.clauses[index]
    }
}

impl IndexMut<ClauseRef> for Cnf {
    fn index_mut(&mut self, index: ClauseRef) -> &mut Self::Output {
        &mut self.clauses[index]
    }
}

impl From<Vec<Vec<i32>>> for Cnf {
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        Self::new(clauses)
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.irredundant)?;
        for clause in self.clauses.iter().filter(|c| !c.is_redundant()) {
            writeln!(f, "{} 0", clause.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_after_add() {
        let mut cnf = Cnf::new(vec![vec![1, 2], vec![-1, 3]]);
        assert_eq!(cnf.irredundant, 2);
        assert_eq!(cnf.num_vars, 3);

        let cref = cnf.add(Clause::learned([Literal::from(2), Literal::from(4)], 2));
        assert_eq!(cnf.redundant, 1);
        assert_eq!(cnf[cref].id, 2);
        assert_eq!(cnf.num_vars, 4);
    }

    #[test]
    fn test_activate_and_deactivate() {
        let mut cnf = Cnf::new(vec![vec![1, 2]]);
        cnf.activate(0);
        assert!(cnf[0].is_active());
        assert_eq!(cnf.active, 1);
        cnf.deactivate(0);
        assert!(!cnf[0].is_active());
        assert_eq!(cnf.active, 0);
    }

    #[test]
    fn test_collect_garbage_keeps_active() {
        let mut cnf = Cnf::new(vec![vec![1, 2], vec![2, 3], vec![3, 4], vec![4, 5]]);
        cnf[0].mark_garbage();
        cnf[1].mark_garbage();
        cnf.activate(1);

        let map = cnf.collect_garbage();
        assert_eq!(map, vec![None, Some(0), Some(1), Some(2)]);
        assert_eq!(cnf.len(), 3);
        assert_eq!(cnf.irredundant, 3);
        assert_eq!(cnf[0].id, 1);
        assert_eq!(cnf[2].id, 3);
    }

    #[test]
    fn test_verify() {
        let cnf = Cnf::new(vec![vec![1, -2], vec![2]]);
        assert!(cnf.verify(&[false, true, true]));
        assert!(!cnf.verify(&[false, false, true]));
    }

    #[test]
    fn test_display() {
        let cnf = Cnf::new(vec![vec![1, -2], vec![3]]);
        assert_eq!(cnf.to_string(), "p cnf 3 2\n1 -2 0\n3 0\n");
    }
}
