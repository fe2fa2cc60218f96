#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::clause::ClauseRef;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

pub type WatchList = SmallVec<[ClauseRef; 6]>;

/// Per-literal lists of the clauses watching that literal. A clause watches
/// its first two literals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchedLiterals(Vec<WatchList>);

impl WatchedLiterals {
    #[must_use]
    pub fn new(num_vars: Variable) -> Self {
        Self(vec![WatchList::new(); 2 * (num_vars as usize + 1)])
    }

    pub fn watch(&mut self, lit: Literal, cref: ClauseRef) {
        self[lit].push(cref);
    }

    /// Watches the first two literals of a clause.
    pub fn add_clause(&mut self, cnf: &Cnf, cref: ClauseRef) {
        let clause = &cnf[cref];
        debug_assert!(clause.len() > 1);
        debug_assert_ne!(clause[0], clause[1]);
        self.watch(clause[0], cref);
        self.watch(clause[1], cref);
    }

    /// Drops all entries of garbage clauses.
    pub fn flush(&mut self, cnf: &Cnf) {
        for list in &mut self.0 {
            list.retain(|cref| !cnf[*cref].is_garbage());
        }
    }

    /// Applies a map produced by `Cnf::collect_garbage`.
    pub fn remap(&mut self, map: &[Option<ClauseRef>]) {
        for list in &mut self.0 {
            list.retain(|cref| match map[*cref] {
                Some(new) => {
                    *cref = new;
                    true
                }
                None => false,
            });
        }
    }
}

impl Index<Literal> for WatchedLiterals {
    type Output = WatchList;

    fn index(&self, index: Literal) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl IndexMut<Literal> for WatchedLiterals {
    fn index_mut(&mut self, index: Literal) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_first_two_literals() {
        let cnf = Cnf::new(vec![vec![1, -2, 3]]);
        let mut watches = WatchedLiterals::new(cnf.num_vars);
        watches.add_clause(&cnf, 0);
        assert_eq!(watches[Literal::from(1)].as_slice(), &[0]);
        assert_eq!(watches[Literal::from(-2)].as_slice(), &[0]);
        assert!(watches[Literal::from(3)].is_empty());
    }

    #[test]
    fn test_flush_and_remap() {
        let mut cnf = Cnf::new(vec![vec![1, 2], vec![1, 3]]);
        let mut watches = WatchedLiterals::new(cnf.num_vars);
        watches.add_clause(&cnf, 0);
        watches.add_clause(&cnf, 1);

        cnf[0].mark_garbage();
        watches.flush(&cnf);
        let map = cnf.collect_garbage();
        watches.remap(&map);

        assert_eq!(watches[Literal::from(1)].as_slice(), &[0]);
        assert_eq!(watches[Literal::from(3)].as_slice(), &[0]);
        assert!(watches[Literal::from(2)].is_empty());
    }
}
