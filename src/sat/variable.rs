#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::clause::ClauseRef;
use crate::sat::literal::{Literal, Variable};
use std::ops::{Index, IndexMut};

/// Why a variable has its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Reason {
    #[default]
    Decision,
    /// The opposite value of an exhausted decision, re-opened on the same level.
    Flip,
    /// A root-level fact without a stored clause.
    Unit,
    Primal(ClauseRef),
    Dual(ClauseRef),
}

/// Partition of the variables. Relevant and irrelevant variables are shared
/// between the primal and the dual clause set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Class {
    Relevant,
    #[default]
    Irrelevant,
    Primal,
    Dual,
}

impl Class {
    #[must_use]
    pub const fn is_shared(self) -> bool {
        matches!(self, Self::Relevant | Self::Irrelevant)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Var {
    pub value: Option<bool>,
    pub phase: bool,
    pub level: usize,
    pub reason: Reason,
    pub class: Class,
    /// Enqueue time in the decision queue of its class.
    pub stamp: u64,
    pub prev: Variable,
    pub next: Variable,
    pub seen: bool,
    /// Occurs in the primal clause set and may therefore be decided.
    pub candidate: bool,
    pub first_model: Option<bool>,
}

/// The variable arena, indexed by `Variable`; slot 0 is unused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Variables {
    vars: Vec<Var>,
    /// Relevant variables without a value.
    pub unassigned_relevant: usize,
    pub relevant: usize,
    /// Variables assigned on level 0.
    pub fixed: usize,
}

impl Variables {
    #[must_use]
    pub fn new(num_vars: Variable) -> Self {
        Self {
            vars: vec![Var::default(); num_vars as usize + 1],
            unassigned_relevant: 0,
            relevant: 0,
            fixed: 0,
        }
    }

    pub fn set_class(&mut self, var: Variable, class: Class) {
        if self[var].class == Class::Relevant {
            self.relevant -= 1;
            self.unassigned_relevant -= 1;
        }
        self[var].class = class;
        if class == Class::Relevant {
            self.relevant += 1;
            self.unassigned_relevant += 1;
        }
    }

    /// Highest variable index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn max_var(&self) -> Variable {
        self.vars.len().saturating_sub(1) as Variable
    }

    pub fn indices(&self) -> impl DoubleEndedIterator<Item = Variable> + use<> {
        1..=self.max_var()
    }

    #[must_use]
    pub fn value(&self, lit: Literal) -> Option<bool> {
        self[lit.variable()].value.map(|v| v == lit.polarity())
    }

    #[must_use]
    pub fn is_true(&self, lit: Literal) -> bool {
        self.value(lit) == Some(true)
    }

    #[must_use]
    pub fn is_false(&self, lit: Literal) -> bool {
        self.value(lit) == Some(false)
    }

    #[must_use]
    pub fn level(&self, lit: Literal) -> usize {
        self[lit.variable()].level
    }

    #[must_use]
    pub fn class(&self, lit: Literal) -> Class {
        self[lit.variable()].class
    }

    /// Records the assignment of `lit`. The trail is maintained by the caller.
    pub fn assign(&mut self, lit: Literal, level: usize, reason: Reason) {
        let var = &mut self.vars[lit.variable() as usize];
        debug_assert!(var.value.is_none(), "{lit} assigned twice");
        var.value = Some(lit.polarity());
        var.level = level;
        var.reason = reason;
        let class = var.class;
        if class == Class::Relevant {
            self.unassigned_relevant -= 1;
        }
        if level == 0 {
            self.fixed += 1;
        }
    }

    /// Clears the value of `var`, saving it as the phase. Returns the old reason.
    pub fn unassign(&mut self, var: Variable) -> Reason {
        let v = &mut self.vars[var as usize];
        let Some(value) = v.value.take() else {
            debug_assert!(false, "{var} unassigned twice");
            return v.reason;
        };
        v.phase = value;
        let reason = std::mem::take(&mut v.reason);
        let class = v.class;
        let level = v.level;
        if class == Class::Relevant {
            self.unassigned_relevant += 1;
        }
        if level == 0 {
            self.fixed -= 1;
        }
        reason
    }

    pub fn iter(&self) -> impl Iterator<Item = &Var> {
        self.vars.iter().skip(1)
    }
}

impl Index<Variable> for Variables {
    type Output = Var;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.vars[index as usize]
    }
}

impl IndexMut<Variable> for Variables {
    fn index_mut(&mut self, index: Variable) -> &mut Self::Output {
        &mut self.vars[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevant_counters() {
        let mut vars = Variables::new(3);
        vars.set_class(1, Class::Relevant);
        vars.set_class(2, Class::Relevant);
        vars.set_class(3, Class::Primal);
        assert_eq!(vars.relevant, 2);
        assert_eq!(vars.unassigned_relevant, 2);

        vars.assign(Literal::from(-1), 1, Reason::Decision);
        assert_eq!(vars.unassigned_relevant, 1);
        assert!(vars.is_false(Literal::from(1)));
        assert!(vars.is_true(Literal::from(-1)));

        vars.unassign(1);
        assert_eq!(vars.unassigned_relevant, 2);
        assert!(!vars[1].phase);
    }

    #[test]
    fn test_fixed_counter() {
        let mut vars = Variables::new(2);
        vars.set_class(1, Class::Irrelevant);
        vars.set_class(2, Class::Irrelevant);
        vars.assign(Literal::from(2), 0, Reason::Unit);
        assert_eq!(vars.fixed, 1);
        assert_eq!(vars.unassign(2), Reason::Unit);
        assert_eq!(vars.fixed, 0);
    }

    #[test]
    fn test_reclassify() {
        let mut vars = Variables::new(1);
        vars.set_class(1, Class::Relevant);
        vars.set_class(1, Class::Irrelevant);
        assert_eq!(vars.relevant, 0);
        assert_eq!(vars.unassigned_relevant, 0);
    }
}
