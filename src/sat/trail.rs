#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::literal::Literal;
use std::ops::Index;

/// The assignment history, shared by the primal and the dual propagators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail {
    lits: Vec<Literal>,
}

impl Index<usize> for Trail {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lits[index]
    }
}

impl Trail {
    #[must_use]
    pub fn len(&self) -> usize {
        self.lits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn push(&mut self, lit: Literal) {
        self.lits.push(lit);
    }

    /// Removes every literal from position `len` on, newest first.
    pub fn backstep_to(&mut self, len: usize) -> impl Iterator<Item = Literal> + '_ {
        self.lits.drain(len..).rev()
    }
}
