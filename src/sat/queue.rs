#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Move-to-front decision queues.
//!
//! Each variable class has its own doubly linked list threaded through the
//! `prev`/`next` fields of the variable records, ordered by enqueue time. A
//! single monotonic stamp counter is shared by all queues so that stamps of
//! different classes are comparable. The `search` cursor of a queue points to
//! the most recently considered variable; every variable behind it (towards the
//! tail) is assigned, which keeps `next_unassigned` amortized constant.

use crate::sat::literal::Variable;
use crate::sat::variable::{Class, Variables};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Queue {
    pub first: Variable,
    pub last: Variable,
    pub search: Variable,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Queues {
    queues: [Queue; 4],
    stamp: u64,
    pub bumped: u64,
}

impl Queues {
    #[must_use]
    pub const fn queue(&self, class: Class) -> &Queue {
        &self.queues[class.index()]
    }

    /// Appends `var` at the tail of the queue of its class with a fresh stamp.
    pub fn enqueue(&mut self, vars: &mut Variables, var: Variable) {
        let queue = &mut self.queues[vars[var].class.index()];
        let last = queue.last;
        vars[var].prev = last;
        vars[var].next = 0;
        if last == 0 {
            queue.first = var;
        } else {
            vars[last].next = var;
        }
        queue.last = var;
        queue.len += 1;

        self.stamp += 1;
        vars[var].stamp = self.stamp;
        if vars[var].value.is_none() {
            queue.search = var;
        }
    }

    pub fn dequeue(&mut self, vars: &mut Variables, var: Variable) {
        let queue = &mut self.queues[vars[var].class.index()];
        let (prev, next) = (vars[var].prev, vars[var].next);
        if prev == 0 {
            queue.first = next;
        } else {
            vars[prev].next = next;
        }
        if next == 0 {
            queue.last = prev;
        } else {
            vars[next].prev = prev;
        }
        if queue.search == var {
            queue.search = if prev == 0 { next } else { prev };
        }
        queue.len -= 1;
        vars[var].prev = 0;
        vars[var].next = 0;
    }

    /// Moves `var` to the most recently used end of its queue.
    pub fn bump(&mut self, vars: &mut Variables, var: Variable) {
        if vars[var].stamp == 0 {
            return;
        }
        self.dequeue(vars, var);
        self.enqueue(vars, var);
        self.bumped += 1;
    }

    /// Bumps `bumped` in the order of their current stamps, so their relative
    /// order is kept.
    pub fn bump_all(&mut self, vars: &mut Variables, bumped: &mut [Variable]) {
        bumped.sort_unstable_by_key(|&v| vars[v].stamp);
        for &var in bumped.iter() {
            self.bump(vars, var);
        }
    }

    /// The unassigned variable of `class` with the largest stamp.
    pub fn next_unassigned(&mut self, vars: &Variables, class: Class) -> Option<Variable> {
        let queue = &mut self.queues[class.index()];
        let mut var = queue.search;
        while var != 0 && vars[var].value.is_some() {
            var = vars[var].prev;
        }
        queue.search = var;
        (var != 0).then_some(var)
    }

    /// Restores the cursor invariant after `var` lost its value.
    pub fn on_unassign(&mut self, vars: &Variables, var: Variable) {
        let stamp = vars[var].stamp;
        if stamp == 0 {
            return;
        }
        let queue = &mut self.queues[vars[var].class.index()];
        if stamp > vars[queue.search].stamp {
            queue.search = var;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::Literal;
    use crate::sat::variable::Reason;

    fn setup(n: Variable) -> (Queues, Variables) {
        let mut vars = Variables::new(n);
        let mut queues = Queues::default();
        for v in (1..=n).rev() {
            vars.set_class(v, Class::Relevant);
            queues.enqueue(&mut vars, v);
        }
        (queues, vars)
    }

    /// Variables of `class` from most to least recently bumped.
    fn order(queues: &Queues, vars: &Variables, class: Class) -> Vec<Variable> {
        std::iter::successors(Some(queues.queue(class).last).filter(|&v| v != 0), |&v| {
            Some(vars[v].prev).filter(|&p| p != 0)
        })
        .collect()
    }

    #[test]
    fn test_initial_order_prefers_low_indices() {
        let (mut queues, vars) = setup(4);
        assert_eq!(queues.next_unassigned(&vars, Class::Relevant), Some(1));
        assert_eq!(order(&queues, &vars, Class::Relevant), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_bump_moves_to_front() {
        let (mut queues, mut vars) = setup(4);
        queues.bump(&mut vars, 3);
        assert_eq!(order(&queues, &vars, Class::Relevant), vec![3, 1, 2, 4]);
        assert_eq!(queues.next_unassigned(&vars, Class::Relevant), Some(3));
        assert_eq!(queues.queue(Class::Relevant).len, 4);
    }

    #[test]
    fn test_search_skips_assigned_and_recovers() {
        let (mut queues, mut vars) = setup(3);
        vars.assign(Literal::from(1), 1, Reason::Decision);
        vars.assign(Literal::from(2), 1, Reason::Decision);
        assert_eq!(queues.next_unassigned(&vars, Class::Relevant), Some(3));

        vars.unassign(1);
        queues.on_unassign(&vars, 1);
        assert_eq!(queues.next_unassigned(&vars, Class::Relevant), Some(1));
    }

    #[test]
    fn test_bump_all_keeps_relative_order() {
        let (mut queues, mut vars) = setup(5);
        let mut bumped = vec![4, 2];
        queues.bump_all(&mut vars, &mut bumped);
        assert_eq!(
            order(&queues, &vars, Class::Relevant)[..2],
            [2, 4]
        );
    }

    #[test]
    fn test_empty_queue() {
        let (mut queues, vars) = setup(2);
        assert_eq!(queues.next_unassigned(&vars, Class::Dual), None);
    }
}
