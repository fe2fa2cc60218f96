//! This crate provides a projected model counter built on a dual CDCL search.
//!
//! The engine counts the assignments of a set of relevant variables that extend
//! to a model of a CNF formula, without enumerating the irrelevant variables.
//! Optionally a second, "dual" CNF over the same shared variables certifies
//! whole subtrees of the search as models once it becomes unsatisfiable.

/// The `sat` module implements the counting engine together with its clause
/// database, DIMACS input and statistics.
pub mod sat;

pub use sat::cnf::Cnf;
pub use sat::configs::{Phase, SolverOptions};
pub use sat::error::{ParseError, SolverError};
pub use sat::literal::{Literal, Variable};
pub use sat::number::Number;
pub use sat::solver::{Mode, SATISFIABLE, Solver, UNSATISFIABLE};
