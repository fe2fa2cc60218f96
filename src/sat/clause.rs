#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::literal::Literal;
use smallvec::SmallVec;
use std::ops::{BitAnd, BitOr, Index, IndexMut, Not};

/// Position of a clause inside its owning `Cnf`.
pub type ClauseRef = usize;

/// Bookkeeping flags of a clause.
///
/// The clause set is the only place that toggles `ACTIVE` and `GARBAGE`
/// transitions that affect its counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClauseFlags(u8);

impl ClauseFlags {
    pub const NONE: Self = Self(0);
    /// Learned rather than original.
    pub const REDUNDANT: Self = Self(1);
    /// Currently the reason of an assigned literal.
    pub const ACTIVE: Self = Self(1 << 1);
    /// Marked for removal by the next collection.
    pub const GARBAGE: Self = Self(1 << 2);
    /// Belongs to the dual clause set.
    pub const DUAL: Self = Self(1 << 3);
    /// Touched by conflict analysis since the last reduction.
    pub const USED: Self = Self(1 << 4);
    /// Forbids an already counted relevant prefix.
    pub const BLOCKING: Self = Self(1 << 5);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub const fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for ClauseFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for ClauseFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl Not for ClauseFlags {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    pub literals: SmallVec<[Literal; 8]>,
    pub flags: ClauseFlags,
    pub glue: u32,
    /// Insertion order within the owning clause set, stable across collections.
    pub id: u64,
}

impl Clause {
    #[must_use]
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
            flags: ClauseFlags::NONE,
            glue: 0,
            id: 0,
        }
    }

    #[must_use]
    pub fn learned(literals: impl IntoIterator<Item = Literal>, glue: u32) -> Self {
        let mut clause = Self::new(literals);
        clause.flags.insert(ClauseFlags::REDUNDANT);
        clause.glue = glue;
        clause
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.literals.swap(i, j);
    }

    #[must_use]
    pub const fn is_redundant(&self) -> bool {
        self.flags.contains(ClauseFlags::REDUNDANT)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.flags.contains(ClauseFlags::ACTIVE)
    }

    #[must_use]
    pub const fn is_garbage(&self) -> bool {
        self.flags.contains(ClauseFlags::GARBAGE)
    }

    #[must_use]
    pub const fn is_dual(&self) -> bool {
        self.flags.contains(ClauseFlags::DUAL)
    }

    #[must_use]
    pub const fn is_used(&self) -> bool {
        self.flags.contains(ClauseFlags::USED)
    }

    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        self.flags.contains(ClauseFlags::BLOCKING)
    }

    pub const fn mark_garbage(&mut self) {
        self.flags.insert(ClauseFlags::GARBAGE);
    }

    pub const fn mark_used(&mut self) {
        self.flags.insert(ClauseFlags::USED);
    }

    /// Sorts and deduplicates the literals. Returns `false` for tautologies.
    pub fn normalize(&mut self) -> bool {
        self.literals.sort_unstable();
        self.literals.dedup();
        !self
            .literals
            .windows(2)
            .any(|pair| pair[0].variable() == pair[1].variable())
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl IndexMut<usize> for Clause {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.literals[index]
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals.into_iter().map(Literal::from))
    }
}

impl From<&[i32]> for Clause {
    fn from(literals: &[i32]) -> Self {
        Self::new(literals.iter().copied().map(Literal::from))
    }
}
