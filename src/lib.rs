//! # Perfect Graph Recognition
//!
//! Decides whether a finite undirected graph is perfect using the Strong Perfect Graph
//! Theorem: a graph is perfect iff it contains no odd hole (a chordless cycle of odd
//! length \(\ge 5\)) and no odd antihole (an odd hole of the complement).
//!
//! This crate provides:
//! - A dense bit-row adjacency matrix with complement and adjacency-list views.
//! - A backtracking **chordless odd-cycle search** with an early-exit budget and an
//!   optional rayon-parallel split by start vertex.
//! - A decision procedure and an exhaustive hole report.
//! - A batch runner for graph files and folders (used by the `is_perfect` binary).
//!
//! ## Quick Start
//!
//! ```
//! use perfect_graph::graph::AdjacencyMatrix;
//! use perfect_graph::perfect::{is_perfect, is_perfect_with_report};
//!
//! // The 5-cycle is its own odd hole.
//! let c5 = AdjacencyMatrix::cycle(5);
//! assert!(!is_perfect(&c5));
//!
//! let (perfect, report) = is_perfect_with_report(&c5);
//! assert!(!perfect);
//! assert!(report.starts_with("Number of odd holes: 1"));
//!
//! // Bipartite graphs are perfect.
//! assert!(is_perfect(&AdjacencyMatrix::complete_bipartite(3, 4)));
//! ```
//!
//! ## Working with the Search Directly
//!
//! ```
//! use perfect_graph::graph::parse_adjacency_matrix;
//! use perfect_graph::holes::find_odd_cycles;
//!
//! let g = parse_adjacency_matrix("0100001\n1010000\n0101000\n0010100\n0001010\n0000101\n1000010\n")
//!     .expect("square matrix");
//! let holes = find_odd_cycles(&g, &g.adjacency_list(), false, 0);
//! assert_eq!(holes.iter().next(), Some(&[0, 1, 2, 3, 4, 5, 6][..]));
//! ```
//!
//! ## Validating Known Graphs
//!
//! ```
//! use perfect_graph::validate::validate_known_graphs;
//!
//! validate_known_graphs().expect("bundled graphs should have their known verdicts");
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Adjacency matrix, complement, adjacency list and parsing.
//! - [`holes`]: Chordless odd-cycle enumeration.
//! - [`perfect`]: Perfection decision and hole report.
//! - [`runner`]: File/folder batch driver and benchmark CSV output.
//! - [`validate`]: Deterministic validation against bundled graphs.
//!
//! ## Performance Notes
//!
//! - The search is exponential in the worst case. The chord check and the rule that a
//!   cycle is rooted at its smallest vertex keep dense and sparse extremes cheap.
//! - [`perfect::is_perfect`] stops at the first odd hole and only builds the complement
//!   when none exists.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::inline_always)] // Hot-path adjacency queries
#![allow(clippy::doc_markdown)] // LaTeX-style notation in docs
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing

pub mod graph;
pub mod holes;
pub mod perfect;
pub mod runner;
pub mod validate;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::graph::{AdjacencyList, AdjacencyMatrix, parse_adjacency_matrix};
    pub use crate::holes::{OddCycles, find_odd_cycles, find_odd_cycles_par};
    pub use crate::perfect::{DecisionConfig, is_perfect, is_perfect_with_report};
    pub use crate::validate::validate_known_graphs;
}
