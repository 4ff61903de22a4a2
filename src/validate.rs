//! Fast deterministic validation against bundled graphs with known verdicts.

use crate::graph::{AdjacencyMatrix, parse_adjacency_matrix};
use crate::holes::{MIN_ANTIHOLE_LENGTH, MIN_HOLE_LENGTH, is_odd_hole};
use crate::perfect::{DecisionConfig, PerfectnessReport, decide, report};

/// Bundled graphs: file name, contents, expected verdict.
const KNOWN_GRAPHS: [(&str, &str, bool); 7] = [
    ("c5.txt", include_str!("../graphs/c5.txt"), false),
    ("c7.txt", include_str!("../graphs/c7.txt"), false),
    ("anti_c7.txt", include_str!("../graphs/anti_c7.txt"), false),
    ("petersen.txt", include_str!("../graphs/petersen.txt"), false),
    ("house.txt", include_str!("../graphs/house.txt"), true),
    ("k33.txt", include_str!("../graphs/k33.txt"), true),
    ("k6.txt", include_str!("../graphs/k6.txt"), true),
];

// ============================================================================
// Public API
// ============================================================================

/// Validates the bundled graphs:
/// - `C5`, `C7`, the Petersen graph (odd holes) and the complement of `C7` (odd
///   antihole) must be non-perfect;
/// - the house graph, `K_{3,3}` and `K_6` must be perfect.
///
/// Each graph is decided with the early-exit and the exhaustive procedure, in both the
/// sequential and the parallel configuration, and every reported cycle is re-verified.
///
/// # Errors
/// Returns an error message if any bundled graph fails validation.
pub fn validate_known_graphs() -> Result<(), String> {
    for (name, text, expected) in KNOWN_GRAPHS {
        validate_verdict(text, name, expected)?;
    }
    Ok(())
}

/// Parses `text` and checks that it decides to `expected_perfect`.
///
/// # Errors
/// Returns an error message if parsing fails, the verdicts disagree, or a reported
/// cycle is not a chordless odd cycle.
pub fn validate_verdict(text: &str, name: &str, expected_perfect: bool) -> Result<(), String> {
    let matrix = parse_adjacency_matrix(text).map_err(|e| format!("{name}: {e}"))?;
    if !matrix.is_symmetric() {
        return Err(format!("{name}: adjacency matrix is not symmetric"));
    }

    for cfg in [
        DecisionConfig::default(),
        DecisionConfig { parallel: true },
    ] {
        let fast = decide(&matrix, &cfg);
        if fast != expected_perfect {
            return Err(format!(
                "{name}: expected perfect={expected_perfect}, early-exit search says {fast}"
            ));
        }

        let full = report(&matrix, &cfg);
        if full.is_perfect() != expected_perfect {
            return Err(format!(
                "{name}: expected perfect={expected_perfect}, exhaustive search found {} holes and {} antiholes",
                full.odd_holes.len(),
                full.odd_antiholes.len()
            ));
        }
        verify_report(&matrix, &full).map_err(|e| format!("{name}: {e}"))?;
    }
    Ok(())
}

/// Checks that every hole of `report` is a chordless odd cycle of `matrix` and every
/// antihole is one of its complement.
///
/// # Errors
/// Returns an error message naming the first invalid cycle.
pub fn verify_report(matrix: &AdjacencyMatrix, report: &PerfectnessReport) -> Result<(), String> {
    for cycle in report.odd_holes.iter() {
        if !is_odd_hole(matrix, cycle, MIN_HOLE_LENGTH) {
            return Err(format!("{cycle:?} is not an odd hole"));
        }
    }

    let complement = matrix.complement();
    for cycle in report.odd_antiholes.iter() {
        if !is_odd_hole(&complement, cycle, MIN_ANTIHOLE_LENGTH) {
            return Err(format!("{cycle:?} is not an odd antihole"));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holes::OddCycles;

    #[test]
    fn bundled_graphs_have_expected_verdicts() {
        validate_known_graphs().unwrap();
    }

    #[test]
    fn bundled_graphs_have_expected_orders() {
        let orders: Vec<usize> = KNOWN_GRAPHS
            .iter()
            .map(|(_, text, _)| parse_adjacency_matrix(text).unwrap().order())
            .collect();
        assert_eq!(orders, vec![5, 7, 7, 10, 5, 6, 6]);
    }

    #[test]
    fn validate_verdict_detects_wrong_expectation() {
        let err = validate_verdict(include_str!("../graphs/c5.txt"), "c5", true).unwrap_err();
        assert!(err.contains("c5"));
        assert!(err.contains("early-exit"));
    }

    #[test]
    fn validate_verdict_rejects_malformed_input() {
        let result = validate_verdict("0100\n101\n0101\n0010\n", "bad", true);
        assert!(result.is_err());
    }

    #[test]
    fn validate_verdict_rejects_asymmetric_input() {
        let err = validate_verdict("01\n00\n", "asym", true).unwrap_err();
        assert!(err.contains("not symmetric"));
    }

    #[test]
    fn verify_report_rejects_forged_cycles() {
        let c6 = AdjacencyMatrix::cycle(6);

        let mut holes = OddCycles::new();
        holes.insert(6, vec![0, 1, 2, 3, 4]);
        let forged = PerfectnessReport {
            odd_holes: holes,
            odd_antiholes: OddCycles::new(),
        };
        assert!(verify_report(&c6, &forged).is_err());

        let mut antiholes = OddCycles::new();
        antiholes.insert(6, vec![0, 1, 2, 3, 4]);
        let forged = PerfectnessReport {
            odd_holes: OddCycles::new(),
            odd_antiholes: antiholes,
        };
        let err = verify_report(&c6, &forged).unwrap_err();
        assert!(err.contains("antihole"));
    }

    #[test]
    fn verify_report_accepts_genuine_report() {
        let matrix = parse_adjacency_matrix(include_str!("../graphs/petersen.txt")).unwrap();
        let full = report(&matrix, &DecisionConfig::default());
        assert!(!full.odd_holes.is_empty());
        verify_report(&matrix, &full).unwrap();
    }
}
