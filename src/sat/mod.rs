#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod clause;
pub mod clause_management;
pub mod cnf;
pub mod configs;
pub mod conflict_analysis;
pub mod counting;
pub mod dimacs;
pub mod error;
pub mod frame;
pub mod literal;
pub mod number;
pub mod propagation;
pub mod queue;
pub mod restarter;
pub mod solver;
pub mod stats;
pub mod trail;
pub mod variable;
pub mod watch;
