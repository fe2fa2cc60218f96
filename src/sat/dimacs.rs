#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF (Conjunctive Normal Form) file format.
//!
//! The DIMACS CNF format is a standard text-based format for representing
//! boolean satisfiability problems. The format includes:
//! - Comment lines starting with 'c'.
//! - A problem line 'p cnf <`num_variables`> <`num_clauses`>'. The declared
//!   variable count is kept even if the highest variables never occur, since
//!   they still double the number of models. Literals above it are rejected.
//! - Clauses as whitespace separated integers terminated by '0'. A clause may
//!   span several lines and several clauses may share one line; a lone '0' is
//!   the empty clause.
//! - An optional '%' line to indicate end-of-data (often used in competitions).
//!
//! Projected model counting benchmarks declare the variables to project on in
//! comment lines, either as 'c ind 1 2 3 0' or as 'c p show 1 2 3 0'. Both forms
//! are collected into `Dimacs::projection`.

use crate::sat::cnf::Cnf;
use crate::sat::error::ParseError;
use crate::sat::literal::Variable;
use std::io::{self, BufRead};
use std::path::Path;

/// A parsed DIMACS file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dimacs {
    pub cnf: Cnf,
    /// Variables listed on `c ind` or `c p show` lines, `None` without such lines.
    pub projection: Option<Vec<Variable>>,
}

/// Parses DIMACS formatted data from a `BufRead` source.
///
/// It reads the input line by line:
/// - Comment lines are skipped unless they declare projection variables.
/// - The problem line fixes the maximum variable.
/// - Lines starting with '%' end the input.
/// - Every other token is parsed as an `i32` literal.
///
/// # Errors
///
/// - `ParseError::Io` if reading a line fails.
/// - `ParseError::Header` for a malformed problem line.
/// - `ParseError::Literal` for a token that is not an integer.
/// - `ParseError::VariableOutOfRange` for a literal above the declared maximum.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Dimacs, ParseError> {
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut clause = Vec::new();
    let mut declared: Option<Variable> = None;
    let mut projection: Option<Vec<Variable>> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None => {}
            Some(&"c") => {
                parts.next();
                let shown = match (parts.next(), parts.peek()) {
                    (Some("ind"), _) => true,
                    (Some("p"), Some(&"show")) => {
                        parts.next();
                        true
                    }
                    _ => false,
                };
                if shown {
                    let vars = projection.get_or_insert_with(Vec::new);
                    for token in parts {
                        let var = parse_literal(token, number)?;
                        if var == 0 {
                            break;
                        }
                        vars.push(var.unsigned_abs());
                    }
                }
            }
            Some(&"p") => {
                declared = Some(parse_header(&line, number)?);
            }
            Some(_) => {
                for token in parts {
                    let lit = parse_literal(token, number)?;
                    if lit == 0 {
                        clauses.push(std::mem::take(&mut clause));
                        continue;
                    }
                    if let Some(max) = declared.filter(|&max| lit.unsigned_abs() > max) {
                        return Err(ParseError::VariableOutOfRange {
                            line: number,
                            var: lit.unsigned_abs(),
                            max,
                        });
                    }
                    clause.push(lit);
                }
            }
        }
    }
    if !clause.is_empty() {
        clauses.push(clause);
    }

    let mut cnf = Cnf::new(clauses);
    cnf.num_vars = cnf.num_vars.max(declared.unwrap_or(0));
    if let Some(vars) = projection.as_mut() {
        vars.sort_unstable();
        vars.dedup();
    }
    Ok(Dimacs { cnf, projection })
}

fn parse_literal(token: &str, line: usize) -> Result<i32, ParseError> {
    token.parse::<i32>().map_err(|_| ParseError::Literal {
        line,
        token: token.to_string(),
    })
}

fn parse_header(text: &str, line: usize) -> Result<Variable, ParseError> {
    let malformed = || ParseError::Header {
        line,
        text: text.to_string(),
    };
    let fields: Vec<&str> = text.split_whitespace().collect();
    match fields.as_slice() {
        ["p", "cnf", vars, clauses] => {
            clauses.parse::<usize>().map_err(|_| malformed())?;
            vars.parse::<Variable>().map_err(|_| malformed())
        }
        _ => Err(malformed()),
    }
}

/// Parses a DIMACS CNF file specified by its path.
///
/// This is a convenience function that opens the file, wraps it in a `BufReader`,
/// and then calls `parse_dimacs`.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened or read, and any error
/// of `parse_dimacs` for malformed content.
pub fn parse_file<P: AsRef<Path>>(file_path: P) -> Result<Dimacs, ParseError> {
    let file = std::fs::File::open(file_path)?;
    parse_dimacs(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::Literal;
    use itertools::Itertools;
    use std::io::Cursor;

    fn literals(cnf: &Cnf, index: usize) -> Vec<i32> {
        cnf[index].iter().map(|l| Literal::to_i32(*l)).sorted().collect()
    }

    #[test]
    fn test_parse_simple_dimacs() {
        let dimacs_content = "c This is a comment\n\
                              p cnf 3 2\n\
                              1 -2 0\n\
                              2 3 0\n";
        let parsed = parse_dimacs(Cursor::new(dimacs_content)).unwrap();

        assert_eq!(parsed.cnf.len(), 2, "Should parse 2 clauses");
        assert_eq!(parsed.cnf.num_vars, 3, "Number of variables mismatch");
        assert_eq!(literals(&parsed.cnf, 0), vec![-2, 1]);
        assert_eq!(literals(&parsed.cnf, 1), vec![2, 3]);
        assert_eq!(parsed.projection, None);
    }

    #[test]
    fn test_parse_dimacs_with_empty_lines_and_end_marker() {
        let dimacs_content = "p cnf 2 2\n\
                              \n\
                              1 0\n\
                              \n\
                              -2 0\n\
                              %\n\
                              c this should be ignored";
        let parsed = parse_dimacs(Cursor::new(dimacs_content)).unwrap();

        assert_eq!(parsed.cnf.len(), 2);
        assert_eq!(literals(&parsed.cnf, 0), vec![1]);
        assert_eq!(literals(&parsed.cnf, 1), vec![-2]);
    }

    #[test]
    fn test_parse_dimacs_empty_clause() {
        let parsed = parse_dimacs(Cursor::new("p cnf 1 1\n0\n")).unwrap();
        assert_eq!(parsed.cnf.len(), 1);
        assert!(parsed.cnf[0].is_empty());
    }

    #[test]
    fn test_parse_dimacs_clause_across_lines() {
        let parsed = parse_dimacs(Cursor::new("p cnf 4 2\n1 2\n3 0 -4 0\n")).unwrap();
        assert_eq!(parsed.cnf.len(), 2);
        assert_eq!(literals(&parsed.cnf, 0), vec![1, 2, 3]);
        assert_eq!(literals(&parsed.cnf, 1), vec![-4]);
    }

    #[test]
    fn test_parse_dimacs_malformed_literal() {
        let result = parse_dimacs(Cursor::new("1 abc 0\n"));
        assert!(matches!(
            result,
            Err(ParseError::Literal { line: 1, ref token }) if token == "abc"
        ));
    }

    #[test]
    fn test_parse_dimacs_malformed_header() {
        let result = parse_dimacs(Cursor::new("p dnf 2 1\n1 0\n"));
        assert!(matches!(result, Err(ParseError::Header { line: 1, .. })));
    }

    #[test]
    fn test_parse_dimacs_variable_out_of_range() {
        let result = parse_dimacs(Cursor::new("p cnf 2 1\n1 3 0\n"));
        assert!(matches!(
            result,
            Err(ParseError::VariableOutOfRange { line: 2, var: 3, max: 2 })
        ));
    }

    #[test]
    fn test_parse_dimacs_no_clauses() {
        let parsed = parse_dimacs(Cursor::new("p cnf 2 0\n")).unwrap();
        assert!(parsed.cnf.is_empty());
        assert_eq!(parsed.cnf.num_vars, 2);
    }

    #[test]
    fn test_parse_projection() {
        let dimacs_content = "p cnf 4 1\n\
                              c ind 3 1 0\n\
                              c p show 4 0\n\
                              c ind 1 0\n\
                              1 2 3 4 0\n";
        let parsed = parse_dimacs(Cursor::new(dimacs_content)).unwrap();
        assert_eq!(parsed.projection, Some(vec![1, 3, 4]));
    }
}
