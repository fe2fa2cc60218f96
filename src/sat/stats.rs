#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Search statistics and progress lines.
//!
//! Progress lines are a side channel: they are printed only when
//! `SolverOptions::verbose` is set and never influence the search. Each line
//! starts with a marker character naming the event that triggered it:
//!
//! | marker | event                                |
//! |--------|--------------------------------------|
//! | `*`    | start of the search                  |
//! | `r`    | restart                              |
//! | `-`    | reduction of learned clauses         |
//! | `s`    | root-level simplification            |
//! | `m`    | the count crossed a new power of two |
//! | `1`    | end of the search                    |

use std::time::Instant;
use tikv_jemalloc_ctl::{epoch, stats};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stats {
    pub decisions: u64,
    pub propagations: u64,
    pub dual_propagations: u64,
    pub conflicts: u64,
    pub dual_conflicts: u64,
    pub dual_units: u64,
    pub bumped: u64,
    pub learned: u64,
    pub dual_learned: u64,
    pub models: u64,
    pub blocked: u64,
    pub flipped: u64,
    pub discounted: u64,
    pub subsumed: u64,
    pub restarts: u64,
    pub reused: u64,
    pub reductions: u64,
    pub reduced: u64,
    pub simplifications: u64,
    pub collected: u64,
}

/// Formats progress lines relative to the start of the search.
#[derive(Debug, Clone)]
pub struct Reporter {
    start: Instant,
    lines: u64,
}

impl Default for Reporter {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            lines: 0,
        }
    }
}

/// Numeric columns of a progress line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Progress {
    pub conflicts: u64,
    pub clauses: usize,
    pub variables: usize,
    pub models: u64,
    pub log2: Option<usize>,
}

impl Reporter {
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Prints one progress line, preceded by the column header every 20 lines.
    pub fn report(&mut self, marker: char, progress: &Progress) {
        if self.lines % 20 == 0 {
            println!("c");
            println!("c   seconds    MB   conflicts   clauses  variables     models  log2");
            println!("c");
        }
        self.lines += 1;
        println!("{}", self.line(marker, progress));
    }

    #[must_use]
    pub fn line(&self, marker: char, progress: &Progress) -> String {
        let log2 = progress
            .log2
            .map_or_else(|| "-".to_string(), |l| l.to_string());
        format!(
            "c {marker} {:7.2} {:5.1} {:11} {:9} {:10} {:10} {:>5}",
            self.elapsed(),
            allocated_mib(),
            progress.conflicts,
            progress.clauses,
            progress.variables,
            progress.models,
            log2
        )
    }
}

/// Memory allocated through jemalloc in MiB, 0 if the statistics are unavailable.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn allocated_mib() -> f64 {
    if epoch::advance().is_err() {
        return 0.0;
    }
    stats::allocated::read().map_or(0.0, |bytes| bytes as f64 / (1024.0 * 1024.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_columns() {
        let reporter = Reporter::default();
        let line = reporter.line(
            'r',
            &Progress {
                conflicts: 12,
                clauses: 40,
                variables: 7,
                models: 3,
                log2: Some(5),
            },
        );
        assert!(line.starts_with("c r "));
        let columns: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(columns.len(), 9);
        assert_eq!(columns[4], "12");
        assert_eq!(columns[8], "5");
    }

    #[test]
    fn test_line_without_models() {
        let reporter = Reporter::default();
        let line = reporter.line('*', &Progress::default());
        assert!(line.ends_with('-'));
    }
}
