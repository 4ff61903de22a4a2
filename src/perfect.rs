//! Perfect-graph recognition through the Strong Perfect Graph Theorem.
//!
//! A graph is perfect iff it has no odd hole and no odd antihole. Both are found with
//! the same chordless odd-cycle search: once on the graph (cycles of length `>= 5`) and
//! once on its complement (cycles of length `>= 7`).

use crate::graph::AdjacencyMatrix;
use crate::holes::{OddCycles, find_odd_cycles, find_odd_cycles_par};
use log::debug;
use std::fmt;

// ============================================================================
// Configuration
// ============================================================================

/// Decision parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecisionConfig {
    /// Split each search by start vertex over the rayon thread pool.
    pub parallel: bool,
}

fn search(
    cfg: &DecisionConfig,
    matrix: &AdjacencyMatrix,
    want_antihole_lengths: bool,
    max_results: usize,
) -> OddCycles {
    let list = matrix.adjacency_list();
    if cfg.parallel {
        find_odd_cycles_par(matrix, &list, want_antihole_lengths, max_results)
    } else {
        find_odd_cycles(matrix, &list, want_antihole_lengths, max_results)
    }
}

// ============================================================================
// Decision
// ============================================================================

/// Returns `true` iff `matrix` is perfect, stopping at the first odd hole or antihole.
///
/// The complement is only built when the graph itself has no odd hole.
pub fn decide(matrix: &AdjacencyMatrix, cfg: &DecisionConfig) -> bool {
    if !search(cfg, matrix, false, 1).is_empty() {
        debug!("Odd hole found; graph is not perfect.");
        return false;
    }

    let complement = matrix.complement();
    if !search(cfg, &complement, true, 1).is_empty() {
        debug!("Odd antihole found; graph is not perfect.");
        return false;
    }
    true
}

/// Returns `true` iff `matrix` is perfect. Single-threaded form of [`decide`].
pub fn is_perfect(matrix: &AdjacencyMatrix) -> bool {
    decide(matrix, &DecisionConfig::default())
}

// ============================================================================
// Report
// ============================================================================

/// All odd holes and odd antiholes of a graph.
///
/// Antiholes are listed as vertex sequences of the complement graph. The `Display`
/// form is the textual hole report.
#[derive(Clone, Debug, Default)]
pub struct PerfectnessReport {
    /// Chordless odd cycles of length `>= 5` in the graph.
    pub odd_holes: OddCycles,
    /// Chordless odd cycles of length `>= 7` in the complement.
    pub odd_antiholes: OddCycles,
}

impl PerfectnessReport {
    /// Returns `true` iff neither holes nor antiholes were found.
    pub fn is_perfect(&self) -> bool {
        self.odd_holes.is_empty() && self.odd_antiholes.is_empty()
    }
}

fn write_cycles(f: &mut fmt::Formatter<'_>, label: &str, cycles: &OddCycles) -> fmt::Result {
    writeln!(f, "Number of {label}: {}", cycles.len())?;
    if cycles.is_empty() {
        return Ok(());
    }

    let mut header = label.to_owned();
    if let Some(first) = header.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    writeln!(f, "{header}:")?;
    for cycle in cycles.iter() {
        let line = cycle
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "{line}")?;
    }
    Ok(())
}

impl fmt::Display for PerfectnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cycles(f, "odd holes", &self.odd_holes)?;
        write_cycles(f, "odd antiholes", &self.odd_antiholes)
    }
}

/// Enumerates every odd hole and odd antihole of `matrix`.
pub fn report(matrix: &AdjacencyMatrix, cfg: &DecisionConfig) -> PerfectnessReport {
    let odd_holes = search(cfg, matrix, false, 0);
    let complement = matrix.complement();
    let odd_antiholes = search(cfg, &complement, true, 0);
    debug!(
        "Found {} odd holes and {} odd antiholes.",
        odd_holes.len(),
        odd_antiholes.len()
    );
    PerfectnessReport {
        odd_holes,
        odd_antiholes,
    }
}

/// Exhaustive form of [`is_perfect`]: returns the verdict and the hole report text.
pub fn is_perfect_with_report(matrix: &AdjacencyMatrix) -> (bool, String) {
    let report = report(matrix, &DecisionConfig::default());
    (report.is_perfect(), report.to_string())
}

// ============================================================================
// Tests
// ============================================================================
