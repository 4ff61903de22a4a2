//! Dense adjacency-matrix graphs: construction, parsing, complement and adjacency lists.

use bitvec::prelude::*;
use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

// ============================================================================
// AdjacencyMatrix
// ============================================================================

/// A dense `n x n` boolean adjacency matrix, stored as one bit row per vertex.
///
/// The matrix is square by construction. Symmetry is **not** enforced: a matrix read
/// from a file may be asymmetric, and every operation still runs on it (callers are
/// expected to check [`AdjacencyMatrix::is_symmetric`] and warn). The diagonal is
/// ignored by all queries, so `has_edge(v, v)` is always `false`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AdjacencyMatrix {
    rows: Vec<BitVec>,
}

impl AdjacencyMatrix {
    /// Creates an edgeless graph on `n` vertices.
    pub fn empty(n: usize) -> Self {
        Self {
            rows: (0..n).map(|_| bitvec![0; n]).collect(),
        }
    }

    /// Creates the complete graph `K_n`.
    pub fn complete(n: usize) -> Self {
        let mut graph = Self::empty(n);
        for i in 0..n {
            for j in (i + 1)..n {
                graph.add_edge(i, j);
            }
        }
        graph
    }

    /// Creates the cycle `C_n` with edges `i -- (i + 1) mod n`.
    ///
    /// For `n < 3` this degenerates to the path on `n` vertices.
    pub fn cycle(n: usize) -> Self {
        let mut graph = Self::empty(n);
        for i in 0..n {
            let j = (i + 1) % n;
            if i != j {
                graph.add_edge(i, j);
            }
        }
        graph
    }

    /// Creates the complete bipartite graph `K_{m,k}`; vertices `0..m` form the first side.
    pub fn complete_bipartite(m: usize, k: usize) -> Self {
        let mut graph = Self::empty(m + k);
        for i in 0..m {
            for j in m..(m + k) {
                graph.add_edge(i, j);
            }
        }
        graph
    }

    /// Creates a graph on `n` vertices from an undirected edge list.
    ///
    /// Self-loops and out-of-range endpoints are skipped.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::empty(n);
        for &(u, v) in edges {
            if u < n && v < n && u != v {
                graph.add_edge(u, v);
            }
        }
        graph
    }

    /// Builds a matrix from boolean rows.
    ///
    /// # Errors
    /// Returns [`GraphParseError::NonSquare`] if some row length differs from the number of rows.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GraphParseError> {
        let n = rows.len();
        let mut out = Vec::with_capacity(n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(GraphParseError::NonSquare {
                    row: i,
                    expected: n,
                    got: row.len(),
                });
            }
            out.push(row.into_iter().collect::<BitVec>());
        }
        Ok(Self { rows: out })
    }

    /// Samples an Erdős–Rényi graph `G(n, p)`.
    pub fn new_random<R: Rng>(rng: &mut R, n: usize, p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");

        let mut graph = Self::empty(n);
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.random_bool(p) {
                    graph.add_edge(i, j);
                }
            }
        }
        graph
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn order(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the matrix has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns whether the cell `(u, v)` is set. The diagonal always reads as `false`.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        debug_assert!(u < self.order() && v < self.order());
        u != v && self.rows[u][v]
    }

    /// Returns the raw bit row of vertex `v` (diagonal included as stored).
    #[inline]
    pub fn row(&self, v: usize) -> &BitSlice {
        &self.rows[v]
    }

    /// Returns the number of set cells in row `v`, excluding the diagonal.
    pub fn degree(&self, v: usize) -> usize {
        let row = &self.rows[v];
        row.count_ones() - usize::from(row[v])
    }

    /// Returns the number of edges in the upper triangle.
    pub fn edge_count(&self) -> usize {
        let n = self.order();
        (0..n).map(|i| self.rows[i][(i + 1)..].count_ones()).sum()
    }

    /// Sets both `(u, v)` and `(v, u)`.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        debug_assert!(u != v, "self-loop at vertex {u}");
        self.rows[u].set(v, true);
        self.rows[v].set(u, true);
    }

    /// Sets a single cell without touching its mirror.
    ///
    /// This is the only way to build an asymmetric matrix programmatically.
    pub fn set(&mut self, u: usize, v: usize, value: bool) {
        self.rows[u].set(v, value);
    }

    /// Returns `true` iff `A[i][j] == A[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        let n = self.order();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.rows[i][j] != self.rows[j][i] {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the complement graph. See [`complement`].
    pub fn complement(&self) -> Self {
        complement(self)
    }

    /// Returns the adjacency list. See [`adjacency_list`].
    pub fn adjacency_list(&self) -> AdjacencyList {
        adjacency_list(self)
    }

    /// Saves the matrix as `n` lines of `0/1` characters.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, filename: impl AsRef<Path>) -> io::Result<()> {
        let mut f = File::create(filename)?;
        self.write_to(&mut f)
    }

    /// Writes the matrix as `n` lines of `0/1` characters.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        for row in &self.rows {
            for bit in row.iter().by_vals() {
                write!(w, "{}", u8::from(bit))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    /// Loads a matrix from a text file. See [`parse_adjacency_matrix`] for the format.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the matrix is not square.
    pub fn load_from_file(filename: impl AsRef<Path>) -> Result<Self, GraphParseError> {
        let file = File::open(filename).map_err(|e| GraphParseError::Io(e.to_string()))?;
        let reader = BufReader::new(file);
        let mut text = String::new();
        for line in reader.lines() {
            let line = line.map_err(|e| GraphParseError::Io(e.to_string()))?;
            text.push_str(&line);
            text.push('\n');
        }
        parse_adjacency_matrix(&text)
    }
}

// ============================================================================
// Derived views
// ============================================================================

/// Neighbor sequences of every vertex, in the order produced by [`adjacency_list`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyList {
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyList {
    /// Returns the number of vertices.
    #[inline]
    pub fn order(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns the neighbors of `v` in discovery order.
    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.neighbors[v]
    }
}

/// Builds the adjacency list of `matrix`.
///
/// Pairs are scanned as `i` ascending, then `j > i` ascending; for every set cell
/// `(i, j)` the vertex `j` is appended to `i`'s list and `i` to `j`'s list. This fixed
/// order decides which representative of a cycle the hole search finds first.
///
/// Only the upper triangle is read, so an asymmetric matrix still yields a symmetric
/// list, describing a graph that may not be the one the caller intended.
pub fn adjacency_list(matrix: &AdjacencyMatrix) -> AdjacencyList {
    let n = matrix.order();
    let mut neighbors = vec![Vec::new(); n];
    for i in 0..n {
        for j in matrix.rows[i][(i + 1)..].iter_ones().map(|k| k + i + 1) {
            neighbors[i].push(j);
            neighbors[j].push(i);
        }
    }
    AdjacencyList { neighbors }
}

/// Builds the complement of `matrix`: `(i, j)` is an edge iff `i != j` and it is not an
/// edge of the input.
///
/// Both `(i, j)` and `(j, i)` come from the upper-triangle cell, so the result is
/// symmetric even when the input is not.
pub fn complement(matrix: &AdjacencyMatrix) -> AdjacencyMatrix {
    let n = matrix.order();
    let mut out = AdjacencyMatrix::empty(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if !matrix.rows[i][j] {
                out.add_edge(i, j);
            }
        }
    }
    out
}

// ============================================================================
// Parsing
// ============================================================================

/// Errors encountered while building or reading an adjacency matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphParseError {
    /// Matrix is not square.
    NonSquare {
        /// The row index with wrong length.
        row: usize,
        /// Expected length (number of rows).
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// I/O error (file not found, etc.).
    Io(String),
}

impl fmt::Display for GraphParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphParseError::NonSquare { row, expected, got } => write!(
                f,
                "adjacency matrix is not square: row {row} has length {got}, expected {expected}"
            ),
            GraphParseError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for GraphParseError {}

/// Parses a `0/1` adjacency matrix from text.
///
/// Rules:
/// - Every character other than `0` and `1` is ignored, so `0 1 0`, `0,1,0` and `010`
///   are the same row.
/// - Lines with no `0`/`1` characters are skipped.
/// - The result must be square. Input with no rows yields the 0-vertex graph.
///
/// Symmetry and the diagonal are not checked here.
///
/// # Errors
/// Returns [`GraphParseError::NonSquare`] if a row has the wrong length.
pub fn parse_adjacency_matrix(text: &str) -> Result<AdjacencyMatrix, GraphParseError> {
    let rows: Vec<Vec<bool>> = text
        .lines()
        .map(|line| {
            line.chars()
                .filter_map(|c| match c {
                    '0' => Some(false),
                    '1' => Some(true),
                    _ => None,
                })
                .collect::<Vec<bool>>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    AdjacencyMatrix::from_rows(rows)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    // -------------------------------------------------------------------------
    // Adjacency list
    // -------------------------------------------------------------------------

    #[test]
    fn adjacency_list_follows_scan_order() {
        // 0-2, 0-3, 1-2, 2-3
        let g = AdjacencyMatrix::from_edges(4, &[(2, 3), (1, 2), (0, 3), (0, 2)]);
        let list = g.adjacency_list();
        assert_eq!(list.order(), 4);
        assert_eq!(list.neighbors(0), &[2, 3]);
        assert_eq!(list.neighbors(1), &[2]);
        assert_eq!(list.neighbors(2), &[0, 1, 3]);
        assert_eq!(list.neighbors(3), &[0, 2]);
    }

    #[test]
    fn adjacency_list_of_empty_matrix_is_empty() {
        let list = adjacency_list(&AdjacencyMatrix::empty(0));
        assert_eq!(list.order(), 0);
    }

    #[test]
    fn adjacency_list_ignores_diagonal() {
        let mut g = AdjacencyMatrix::empty(3);
        g.set(1, 1, true);
        g.add_edge(0, 2);
        let list = g.adjacency_list();
        assert!(list.neighbors(1).is_empty());
        assert_eq!(list.neighbors(0), &[2]);
    }

    #[test]
    fn adjacency_list_reads_upper_triangle_only() {
        let mut g = AdjacencyMatrix::empty(3);
        g.set(2, 0, true); // lower triangle only
        g.set(0, 1, true); // upper triangle only
        let list = g.adjacency_list();
        assert_eq!(list.neighbors(0), &[1]);
        assert_eq!(list.neighbors(1), &[0]);
        assert!(list.neighbors(2).is_empty());
    }

    // -------------------------------------------------------------------------
    // Complement
    // -------------------------------------------------------------------------

    #[test]
    fn complement_of_c5_is_pentagram() {
        let c5 = AdjacencyMatrix::cycle(5);
        let comp = c5.complement();
        for i in 0..5 {
            assert!(comp.has_edge(i, (i + 2) % 5));
            assert!(!comp.has_edge(i, (i + 1) % 5));
        }
        assert_eq!(comp.edge_count(), 5);
    }

    #[test]
    fn complement_of_complete_is_empty() {
        let comp = AdjacencyMatrix::complete(6).complement();
        assert_eq!(comp, AdjacencyMatrix::empty(6));
    }

    #[test]
    fn complement_is_an_involution_on_symmetric_graphs() {
        let mut rng = XorShiftRng::seed_from_u64(0xC0FFEE);
        for _ in 0..20 {
            let g = AdjacencyMatrix::new_random(&mut rng, 12, 0.4);
            assert_eq!(g.complement().complement(), g);
        }
    }

    #[test]
    fn complement_of_asymmetric_matrix_is_symmetric() {
        let mut g = AdjacencyMatrix::empty(4);
        g.set(0, 1, true);
        g.set(3, 2, true);
        assert!(!g.is_symmetric());
        let comp = g.complement();
        assert!(comp.is_symmetric());
        assert!(!comp.has_edge(0, 1));
        // (2, 3) is read from the upper triangle, which is unset.
        assert!(comp.has_edge(2, 3));
    }

    #[test]
    fn complement_never_sets_diagonal() {
        let comp = AdjacencyMatrix::empty(5).complement();
        for v in 0..5 {
            assert!(!comp.row(v)[v]);
            assert_eq!(comp.degree(v), 4);
        }
    }

    // -------------------------------------------------------------------------
    // Constructors and queries
    // -------------------------------------------------------------------------

    #[test]
    fn constructors_have_expected_edge_counts() {
        assert_eq!(AdjacencyMatrix::empty(7).edge_count(), 0);
        assert_eq!(AdjacencyMatrix::complete(7).edge_count(), 21);
        assert_eq!(AdjacencyMatrix::cycle(7).edge_count(), 7);
        assert_eq!(AdjacencyMatrix::cycle(2).edge_count(), 1);
        assert_eq!(AdjacencyMatrix::cycle(0).edge_count(), 0);
        assert_eq!(AdjacencyMatrix::complete_bipartite(3, 4).edge_count(), 12);
    }

    #[test]
    fn from_edges_skips_invalid_pairs() {
        let g = AdjacencyMatrix::from_edges(3, &[(0, 0), (0, 5), (1, 2)]);
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(2, 1));
    }

    #[test]
    fn has_edge_ignores_diagonal() {
        let mut g = AdjacencyMatrix::empty(2);
        g.set(0, 0, true);
        assert!(!g.has_edge(0, 0));
        assert_eq!(g.degree(0), 0);
    }

    #[test]
    fn random_graph_is_symmetric_and_seeded() {
        let mut a = XorShiftRng::seed_from_u64(7);
        let mut b = XorShiftRng::seed_from_u64(7);
        let g1 = AdjacencyMatrix::new_random(&mut a, 20, 0.3);
        let g2 = AdjacencyMatrix::new_random(&mut b, 20, 0.3);
        assert!(g1.is_symmetric());
        assert_eq!(g1, g2);
    }

    #[test]
    fn handshaking_lemma_holds() {
        let mut rng = XorShiftRng::seed_from_u64(0xBEEF);
        let g = AdjacencyMatrix::new_random(&mut rng, 25, 0.5);
        let degree_sum: usize = (0..g.order()).map(|v| g.degree(v)).sum();
        assert_eq!(degree_sum, 2 * g.edge_count());
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let err = AdjacencyMatrix::from_rows(vec![vec![false, true], vec![true]]).unwrap_err();
        assert_eq!(
            err,
            GraphParseError::NonSquare {
                row: 1,
                expected: 2,
                got: 1
            }
        );
    }

    // -------------------------------------------------------------------------
    // Parsing and I/O
    // -------------------------------------------------------------------------

    #[test]
    fn parse_ignores_separators_and_blank_lines() {
        let text = "0, 1, 0\n\n1 0 1\n  # comment\n0;1;0\n";
        let g = parse_adjacency_matrix(text).unwrap();
        assert_eq!(g.order(), 3);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 2));
        assert!(!g.has_edge(0, 2));
    }

    #[test]
    fn parse_empty_text_yields_zero_vertices() {
        let g = parse_adjacency_matrix("").unwrap();
        assert!(g.is_empty());
        let g = parse_adjacency_matrix("   \nabc\n").unwrap();
        assert_eq!(g.order(), 0);
    }

    #[test]
    fn parse_rejects_non_square() {
        let err = parse_adjacency_matrix("010\n10\n").unwrap_err();
        assert!(matches!(err, GraphParseError::NonSquare { .. }));
    }

    #[test]
    fn parse_keeps_asymmetric_matrices() {
        let g = parse_adjacency_matrix("01\n00\n").unwrap();
        assert!(!g.is_symmetric());
    }

    #[test]
    fn write_and_parse_roundtrip() {
        let mut rng = XorShiftRng::seed_from_u64(0x1234);
        let g = AdjacencyMatrix::new_random(&mut rng, 10, 0.3);

        let mut buf = Vec::new();
        g.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(parse_adjacency_matrix(&text).unwrap(), g);
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let err = AdjacencyMatrix::load_from_file("definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, GraphParseError::Io(_)));
    }

    #[test]
    fn save_and_load_file() {
        let path = std::env::temp_dir().join("perfect_graph_save_and_load.txt");
        let g = AdjacencyMatrix::cycle(6);
        g.save_to_file(&path).unwrap();
        let loaded = AdjacencyMatrix::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, g);
    }
}
