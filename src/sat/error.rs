#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::literal::Variable;
use thiserror::Error;

/// Errors reported by the solver façade.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("shared variables must be exactly 1..={expected}, found {found}")]
    SharedNotDense { expected: usize, found: Variable },

    #[error("relevant variable {0} is not shared")]
    RelevantNotShared(Variable),

    #[error("the dual entry points need a dual clause set")]
    MissingDual,

    #[error("the solver has already been run")]
    AlreadySolved,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported while reading DIMACS input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed header '{text}'")]
    Header { line: usize, text: String },

    #[error("line {line}: '{token}' is not a literal")]
    Literal { line: usize, token: String },

    #[error("line {line}: variable {var} exceeds the declared {max}")]
    VariableOutOfRange {
        line: usize,
        var: Variable,
        max: Variable,
    },
}
