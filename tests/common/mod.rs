#![allow(dead_code)]

use dualcount::sat::cnf::Cnf;
use dualcount::sat::literal::Variable;
use proptest::prelude::*;
use std::collections::BTreeSet;

pub fn cnf(clauses: &[Vec<i32>]) -> Cnf {
    let mut cnf = Cnf::new(clauses.iter().cloned());
    cnf.num_vars = clauses
        .iter()
        .flatten()
        .map(|l| l.unsigned_abs())
        .max()
        .unwrap_or(0);
    cnf
}

fn satisfies(clauses: &[Vec<i32>], assignment: u32) -> bool {
    clauses.iter().all(|clause| {
        clause.iter().any(|&lit| {
            let value = assignment >> (lit.unsigned_abs() - 1) & 1 == 1;
            value == (lit > 0)
        })
    })
}

/// Number of assignments to `relevant` that extend to a model over `1..=num_vars`.
pub fn brute_force_count(clauses: &[Vec<i32>], num_vars: Variable, relevant: &[Variable]) -> u64 {
    let mask = relevant.iter().fold(0u32, |m, &v| m | 1 << (v - 1));
    let projections: BTreeSet<u32> = (0..1u32 << num_vars)
        .filter(|&a| satisfies(clauses, a))
        .map(|a| a & mask)
        .collect();
    projections.len() as u64
}

/// A gate of an and-inverter graph. Inputs are signed references to inputs
/// `1..=k` or to earlier gates `k+1..`.
#[derive(Debug, Clone)]
pub struct Gate {
    pub left: i32,
    pub right: i32,
}

#[derive(Debug, Clone)]
pub struct Circuit {
    pub inputs: Variable,
    pub gates: Vec<Gate>,
    /// Signed reference to the output node.
    pub output: i32,
}

impl Circuit {
    fn node(&self, values: &[bool], reference: i32) -> bool {
        values[reference.unsigned_abs() as usize] == (reference > 0)
    }

    pub fn eval(&self, inputs: u32) -> bool {
        let mut values = vec![false; self.inputs as usize + self.gates.len() + 1];
        for v in 1..=self.inputs {
            values[v as usize] = inputs >> (v - 1) & 1 == 1;
        }
        for (i, gate) in self.gates.iter().enumerate() {
            values[self.inputs as usize + 1 + i] =
                self.node(&values, gate.left) && self.node(&values, gate.right);
        }
        self.node(&values, self.output)
    }

    /// Tseitin encoding of the gates, asserting the output with `polarity`.
    pub fn tseitin(&self, polarity: bool) -> Vec<Vec<i32>> {
        let mut clauses = Vec::new();
        for (i, gate) in self.gates.iter().enumerate() {
            #[allow(clippy::cast_possible_wrap)]
            let g = (self.inputs as usize + 1 + i) as i32;
            clauses.push(vec![-g, gate.left]);
            clauses.push(vec![-g, gate.right]);
            clauses.push(vec![g, -gate.left, -gate.right]);
        }
        clauses.push(vec![if polarity { self.output } else { -self.output }]);
        clauses
    }

    /// Number of relevant input assignments with some irrelevant completion
    /// evaluating the circuit to `polarity`.
    pub fn count(&self, relevant: &[Variable], polarity: bool) -> u64 {
        let mask = relevant.iter().fold(0u32, |m, &v| m | 1 << (v - 1));
        let projections: BTreeSet<u32> = (0..1u32 << self.inputs)
            .filter(|&a| self.eval(a) == polarity)
            .map(|a| a & mask)
            .collect();
        projections.len() as u64
    }
}

pub fn arb_clauses(max_vars: i32, max_clauses: usize) -> impl Strategy<Value = Vec<Vec<i32>>> {
    let literal = (1..=max_vars, any::<bool>()).prop_map(|(v, s)| if s { v } else { -v });
    prop::collection::vec(prop::collection::vec(literal, 1..=3), 0..=max_clauses)
}

pub fn arb_circuit(inputs: Variable, max_gates: usize) -> impl Strategy<Value = Circuit> {
    prop::collection::vec((any::<u32>(), any::<bool>(), any::<u32>(), any::<bool>()), 1..=max_gates)
        .prop_flat_map(move |raw| {
            let gates: Vec<Gate> = raw
                .iter()
                .enumerate()
                .map(|(i, &(l, ls, r, rs))| {
                    #[allow(clippy::cast_possible_truncation)]
                    let nodes = inputs + i as u32;
                    let pick = |x: u32, s: bool| {
                        #[allow(clippy::cast_possible_wrap)]
                        let node = (x % nodes + 1) as i32;
                        if s { node } else { -node }
                    };
                    Gate {
                        left: pick(l, ls),
                        right: pick(r, rs),
                    }
                })
                .collect();
            #[allow(clippy::cast_possible_wrap)]
            let last = (inputs as usize + gates.len()) as i32;
            any::<bool>().prop_map(move |s| Circuit {
                inputs,
                gates: gates.clone(),
                output: if s { last } else { -last },
            })
        })
}

pub fn random_3cnf(rng: &mut fastrand::Rng, vars: i32, clauses: usize) -> Vec<Vec<i32>> {
    (0..clauses)
        .map(|_| {
            (0..3)
                .map(|_| {
                    let var = rng.i32(1..=vars);
                    if rng.bool() { var } else { -var }
                })
                .collect()
        })
        .collect()
}
