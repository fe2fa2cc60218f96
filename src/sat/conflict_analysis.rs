#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Conflict analysis for both sides of the search.
//!
//! `analyse_primal` is first-UIP resolution: starting from the falsified clause
//! it resolves with the reasons of current-level literals, walking the trail
//! backwards, until a single current-level literal is left. Literals fixed on
//! level 0 are dropped.
//!
//! `analyse_dual` resolves away every dual-private literal of a falsified dual
//! clause. What remains is a clause over shared literals that is implied by the
//! dual clause set and falsified by the trail.

use crate::sat::clause::ClauseRef;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::trail::Trail;
use crate::sat::variable::{Class, Reason, Variables};
use bit_vec::BitVec;

/// Result of analysing a primal conflict.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Learned {
    /// Asserting literal first, the literal on the jump level second.
    pub literals: Vec<Literal>,
    pub jump: usize,
    pub glue: u32,
    /// Variables to bump.
    pub seen: Vec<Variable>,
}

fn mark(vars: &mut Variables, seen: &mut Vec<Variable>, var: Variable) -> bool {
    if vars[var].seen {
        return false;
    }
    vars[var].seen = true;
    seen.push(var);
    true
}

fn unmark(vars: &mut Variables, seen: &[Variable]) {
    for &var in seen {
        vars[var].seen = false;
    }
}

#[must_use]
pub fn glue(vars: &Variables, literals: &[Literal], level: usize) -> u32 {
    let mut levels = BitVec::from_elem(level + 1, false);
    let mut glue = 0;
    for &lit in literals {
        let l = vars.level(lit);
        if !levels.get(l).unwrap_or(true) {
            levels.set(l, true);
            glue += 1;
        }
    }
    glue
}

/// Learns the first-UIP clause of a primal conflict on `level > 0`.
pub fn analyse_primal(
    cnf: &mut Cnf,
    vars: &mut Variables,
    trail: &Trail,
    level: usize,
    conflict: ClauseRef,
    bump_reasons: bool,
) -> Learned {
    debug_assert!(level > 0);
    let mut seen = Vec::new();
    let mut literals = vec![Literal::default()];
    let mut open = 0usize;
    let mut reason = conflict;
    let mut skip = None;
    let mut i = trail.len();

    let uip = loop {
        cnf[reason].mark_used();
        for &lit in cnf[reason].iter() {
            if Some(lit) == skip {
                continue;
            }
            let var = lit.variable();
            if vars[var].level == 0 || !mark(vars, &mut seen, var) {
                continue;
            }
            if vars[var].level == level {
                open += 1;
            } else {
                literals.push(lit);
            }
        }

        let uip = loop {
            debug_assert!(i > 0, "ran off the trail during analysis");
            i -= 1;
            let lit = trail[i];
            let var = &vars[lit.variable()];
            if var.seen && var.level == level {
                break lit;
            }
        };

        open -= 1;
        if open == 0 {
            break uip;
        }

        match vars[uip.variable()].reason {
            Reason::Primal(cref) => {
                reason = cref;
                skip = Some(uip);
            }
            other => {
                debug_assert!(false, "{uip} on level {level} has reason {other:?}");
                break uip;
            }
        }
    };
    literals[0] = !uip;

    let mut jump = 0;
    if literals.len() > 1 {
        let (k, max) = literals
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, &l)| (k, vars.level(l)))
            .max_by_key(|&(_, l)| l)
            .unwrap_or((1, 0));
        literals.swap(1, k);
        jump = max;
    }

    if bump_reasons {
        let analysed = seen.len();
        for k in 1..literals.len() {
            if let Reason::Primal(cref) = vars[literals[k].variable()].reason {
                for &lit in cnf[cref].iter() {
                    if vars[lit.variable()].level > 0 {
                        mark(vars, &mut seen, lit.variable());
                    }
                }
            }
        }
        tracing::trace!(extra = seen.len() - analysed, "bumping reason variables");
    }

    let glue = glue(vars, &literals, level);
    unmark(vars, &seen);

    Learned {
        literals,
        jump,
        glue,
        seen,
    }
}

/// Result of analysing a dual conflict.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DualLearned {
    /// Shared literals, highest levels first.
    pub literals: Vec<Literal>,
    /// Level on which the clause became falsified, 0 if empty.
    pub level: usize,
    pub seen: Vec<Variable>,
}

/// Reduces a falsified dual clause to its shared literals above level 0.
pub fn analyse_dual(cnf: &mut Cnf, vars: &mut Variables, conflict: ClauseRef) -> DualLearned {
    let mut seen = Vec::new();
    let mut literals = Vec::new();
    let mut stack = vec![conflict];

    while let Some(cref) = stack.pop() {
        debug_assert!(cnf[cref].is_dual());
        cnf[cref].mark_used();
        for &lit in cnf[cref].iter() {
            let var = lit.variable();
            if vars.is_true(lit) || vars[var].level == 0 || !mark(vars, &mut seen, var) {
                continue;
            }
            if vars[var].class == Class::Dual {
                match vars[var].reason {
                    Reason::Dual(reason) => stack.push(reason),
                    other => debug_assert!(false, "dual variable {var} with reason {other:?}"),
                }
            } else {
                literals.push(lit);
            }
        }
    }

    unmark(vars, &seen);
    literals.sort_unstable_by_key(|&l| std::cmp::Reverse(vars.level(l)));
    let level = literals.first().map_or(0, |&l| vars.level(l));

    DualLearned {
        literals,
        level,
        seen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::clause::Clause;
    use crate::sat::propagation::{Database, Side};

    fn lit(l: i32) -> Literal {
        Literal::from(l)
    }

    fn vars_of(n: Variable, class: Class) -> Variables {
        let mut vars = Variables::new(n);
        for v in 1..=n {
            vars.set_class(v, class);
        }
        vars
    }

    #[test]
    fn test_first_uip() {
        // 1@1, 2@2, then 2 -> 3, 1 & 3 -> 4, 1 & 3 -> -4.
        let mut vars = vars_of(4, Class::Relevant);
        let mut db = Database::new(Side::Primal, 4);
        for clause in [vec![-2, 3], vec![-1, -3, 4], vec![-1, -3, -4]] {
            db.add(Clause::from(clause));
        }
        let mut trail = Trail::default();
        db.assign(&mut vars, &mut trail, lit(1), 1, Reason::Decision);
        assert_eq!(db.propagate(&mut vars, &mut trail, 1), None);
        db.assign(&mut vars, &mut trail, lit(2), 2, Reason::Decision);
        let conflict = db.propagate(&mut vars, &mut trail, 2).unwrap();

        let learned = analyse_primal(&mut db.cnf, &mut vars, &trail, 2, conflict, false);
        assert_eq!(learned.literals, vec![lit(-3), lit(-1)]);
        assert_eq!(learned.jump, 1);
        assert_eq!(learned.glue, 2);
        assert!(vars.iter().all(|v| !v.seen));
    }

    #[test]
    fn test_unit_learned() {
        let mut vars = vars_of(2, Class::Irrelevant);
        let mut db = Database::new(Side::Primal, 2);
        db.add(Clause::from(vec![-1, 2]));
        db.add(Clause::from(vec![-1, -2]));
        let mut trail = Trail::default();
        db.assign(&mut vars, &mut trail, lit(1), 1, Reason::Decision);
        let conflict = db.propagate(&mut vars, &mut trail, 1).unwrap();

        let learned = analyse_primal(&mut db.cnf, &mut vars, &trail, 1, conflict, true);
        assert_eq!(learned.literals, vec![lit(-1)]);
        assert_eq!(learned.jump, 0);
        assert_eq!(learned.glue, 1);
    }

    #[test]
    fn test_dual_resolves_private_literals() {
        // Shared 1, 2; dual-private 3. Dual: (-1 | 3), (-2 | -3).
        let mut vars = Variables::new(3);
        vars.set_class(1, Class::Relevant);
        vars.set_class(2, Class::Relevant);
        vars.set_class(3, Class::Dual);
        let mut db = Database::new(Side::Dual, 3);
        db.add(Clause::from(vec![-1, 3]));
        db.add(Clause::from(vec![-2, -3]));
        let mut trail = Trail::default();
        db.assign(&mut vars, &mut trail, lit(1), 1, Reason::Decision);
        assert_eq!(db.propagate(&mut vars, &mut trail, 1), None);
        db.assign(&mut vars, &mut trail, lit(2), 2, Reason::Decision);
        let conflict = db.propagate(&mut vars, &mut trail, 2).unwrap();

        let learned = analyse_dual(&mut db.cnf, &mut vars, conflict);
        assert_eq!(learned.literals, vec![lit(-2), lit(-1)]);
        assert_eq!(learned.level, 2);
        assert!(learned.seen.contains(&3));
    }
}
