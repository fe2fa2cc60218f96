#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variables and packed literals.
//!
//! A variable is a positive index `1..=max_var`; index `0` is never used and
//! serves as the "no variable" sentinel in the decision queues. A literal packs
//! its variable and sign into one `u32` as `var * 2 + negated`, so the two
//! literals of a variable are adjacent and a literal can index watch lists
//! directly.

use std::fmt::{Display, Formatter};
use std::ops::{Neg, Not};

/// A variable index. Valid variables start at 1.
pub type Variable = u32;

/// A packed literal: `var << 1 | negated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal(u32);

impl Literal {
    /// Creates the literal of `var` with the given polarity (`true` for the positive literal).
    #[must_use]
    pub const fn new(var: Variable, polarity: bool) -> Self {
        Self((var << 1) | (!polarity) as u32)
    }

    /// Converts a signed DIMACS literal. `0` is not a literal.
    #[must_use]
    pub const fn from_i32(lit: i32) -> Self {
        debug_assert!(lit != 0);
        Self::new(lit.unsigned_abs(), lit > 0)
    }

    /// Converts back to the signed DIMACS form.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_i32(self) -> i32 {
        let var = self.variable() as i32;
        if self.is_negated() { -var } else { var }
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0 >> 1
    }

    /// `true` for the positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0 & 1 == 0
    }

    #[must_use]
    pub const fn is_negated(self) -> bool {
        self.0 & 1 == 1
    }

    /// Position of this literal in literal-indexed tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The same literal with its variable replaced.
    #[must_use]
    pub const fn with_variable(self, var: Variable) -> Self {
        Self::new(var, self.polarity())
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(self.0 ^ 1)
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        !self
    }
}

impl From<i32> for Literal {
    fn from(lit: i32) -> Self {
        Self::from_i32(lit)
    }
}

impl From<Literal> for i32 {
    fn from(lit: Literal) -> Self {
        lit.to_i32()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_i32())
    }
}
