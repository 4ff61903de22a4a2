//! Enumeration of chordless odd cycles ("odd holes") by depth-first backtracking.
//!
//! The search grows simple paths from every start vertex `s`, only ever visiting
//! vertices `>= s`, so each cycle is rooted at its smallest vertex. A candidate vertex
//! adjacent to an interior path vertex would create a chord and is never explored. A
//! candidate adjacent to `s` closes a cycle, which is recorded when its length is odd
//! and at least the requested minimum.
//!
//! Applied to the complement graph with a minimum length of 7, the same search finds
//! odd antiholes (a 5-cycle is self-complementary, so it is only reported as a hole).

use crate::graph::{AdjacencyList, AdjacencyMatrix};
use bitvec::prelude::*;
use indexmap::IndexMap;
use log::{debug, trace};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shortest odd hole.
pub const MIN_HOLE_LENGTH: usize = 5;

/// Shortest odd antihole searched for in a complement graph.
pub const MIN_ANTIHOLE_LENGTH: usize = 7;

/// Returns the minimum accepted cycle length for a hole or antihole search.
#[inline]
pub const fn min_cycle_length(want_antihole_lengths: bool) -> usize {
    if want_antihole_lengths {
        MIN_ANTIHOLE_LENGTH
    } else {
        MIN_HOLE_LENGTH
    }
}

// ============================================================================
// OddCycles
// ============================================================================

/// Chordless odd cycles keyed by their vertex set.
///
/// Holds at most one cycle per vertex subset: the first ordering discovered wins.
/// Iteration follows discovery order.
#[derive(Clone, Debug, Default)]
pub struct OddCycles {
    cycles: IndexMap<BitVec, Vec<usize>>,
}

impl OddCycles {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct vertex subsets recorded.
    #[inline]
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Returns `true` if no cycle was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Iterates over the recorded vertex sequences in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.cycles.values().map(Vec::as_slice)
    }

    /// Iterates over the vertex-set keys in discovery order.
    pub fn vertex_sets(&self) -> impl Iterator<Item = &BitSlice> {
        self.cycles.keys().map(BitVec::as_bitslice)
    }

    /// Returns the recorded sequence for the given vertex set, if any.
    pub fn get(&self, vertex_set: &BitSlice) -> Option<&[usize]> {
        self.cycles.get(vertex_set).map(Vec::as_slice)
    }

    /// Records `cycle` (a sequence over a graph of `order` vertices) unless a cycle on the
    /// same vertex set is already present. Returns whether it was inserted.
    pub fn insert(&mut self, order: usize, cycle: Vec<usize>) -> bool {
        let mut key = bitvec![0; order];
        for &v in &cycle {
            key.set(v, true);
        }
        self.insert_keyed(key, cycle)
    }

    fn insert_keyed(&mut self, key: BitVec, cycle: Vec<usize>) -> bool {
        match self.cycles.entry(key) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(cycle);
                true
            }
        }
    }

    /// Appends the entries of `other` in its order, keeping existing keys.
    fn append(&mut self, other: OddCycles) {
        for (key, cycle) in other.cycles {
            self.insert_keyed(key, cycle);
        }
    }

    fn truncate(&mut self, len: usize) {
        self.cycles.truncate(len);
    }
}

// ============================================================================
// HoleSearch
// ============================================================================

/// One backtracking search over a graph.
///
/// Owns its path stack and result set, so independent searches never share state.
#[derive(Debug)]
pub struct HoleSearch<'a> {
    matrix: &'a AdjacencyMatrix,
    list: &'a AdjacencyList,
    min_length: usize,
    max_results: usize,
    path: Vec<usize>,
    cursors: Vec<usize>,
    on_path: BitVec,
    found: OddCycles,
    cutoff: Option<&'a AtomicUsize>,
}

impl<'a> HoleSearch<'a> {
    /// Prepares a search over `matrix`, visiting neighbors in `list` order.
    ///
    /// `want_antihole_lengths` raises the minimum cycle length from 5 to 7.
    /// `max_results == 0` enumerates everything; otherwise the search stops once that
    /// many vertex subsets have been recorded.
    pub fn new(
        matrix: &'a AdjacencyMatrix,
        list: &'a AdjacencyList,
        want_antihole_lengths: bool,
        max_results: usize,
    ) -> Self {
        debug_assert_eq!(matrix.order(), list.order());
        let n = matrix.order();
        Self {
            matrix,
            list,
            min_length: min_cycle_length(want_antihole_lengths),
            max_results,
            path: Vec::with_capacity(n),
            cursors: Vec::with_capacity(n),
            on_path: bitvec![0; n],
            found: OddCycles::new(),
            cutoff: None,
        }
    }

    /// Shares a cutoff with sibling searches: a search rooted at `s` gives up as soon
    /// as the cutoff drops below `s`.
    fn with_cutoff(mut self, cutoff: &'a AtomicUsize) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    /// Runs the search from every start vertex in increasing order.
    pub fn run(mut self) -> OddCycles {
        for s in 0..self.matrix.order() {
            if self.should_stop(s) {
                break;
            }
            self.search_from(s);
        }
        self.found
    }

    fn into_found(self) -> OddCycles {
        self.found
    }

    #[inline]
    fn budget_reached(&self) -> bool {
        self.max_results != 0 && self.found.len() >= self.max_results
    }

    #[inline]
    fn should_stop(&self, start: usize) -> bool {
        self.budget_reached()
            || self
                .cutoff
                .is_some_and(|cutoff| cutoff.load(Ordering::Relaxed) < start)
    }

    /// Depth-first search over chordless paths rooted at `start`.
    ///
    /// `cursors[k]` is the index of the next neighbor of `path[k]` to try. The stack
    /// lives on the heap so long paths are safe on small worker-thread stacks.
    fn search_from(&mut self, start: usize) {
        let list = self.list;
        let matrix = self.matrix;

        self.path.clear();
        self.cursors.clear();
        self.path.push(start);
        self.on_path.set(start, true);
        self.cursors.push(0);

        while let Some(&cursor) = self.cursors.last() {
            let len = self.path.len();
            let last = self.path[len - 1];
            let neighbors = list.neighbors(last);

            if cursor == neighbors.len() {
                self.cursors.pop();
                self.path.pop();
                self.on_path.set(last, false);
                continue;
            }
            if self.should_stop(start) {
                break;
            }
            self.cursors[len - 1] += 1;

            let i = neighbors[cursor];
            if i < start {
                continue;
            }
            if len > 1 && self.path[len - 2] == i {
                continue;
            }
            // Unreachable for symmetric input (an interior revisit is caught as a chord),
            // but keeps the path simple on asymmetric matrices.
            if self.on_path[i] {
                continue;
            }
            if self.has_chord(i) {
                continue;
            }

            if len > 1 && matrix.has_edge(start, i) {
                let cycle_length = len + 1;
                if cycle_length % 2 == 1 && cycle_length >= self.min_length {
                    self.record(i);
                }
                continue;
            }

            self.path.push(i);
            self.on_path.set(i, true);
            self.cursors.push(0);
        }

        for &v in &self.path {
            self.on_path.set(v, false);
        }
        self.path.clear();
        self.cursors.clear();
    }

    /// Checks `i` against the interior vertices `path[1..len-1]`.
    #[inline]
    fn has_chord(&self, i: usize) -> bool {
        let len = self.path.len();
        len > 2
            && self.path[1..len - 1]
                .iter()
                .any(|&v| self.matrix.has_edge(i, v))
    }

    fn record(&mut self, closing: usize) {
        let mut cycle = Vec::with_capacity(self.path.len() + 1);
        cycle.extend_from_slice(&self.path);
        cycle.push(closing);
        trace!("Closed chordless cycle {cycle:?}.");
        self.found.insert(self.matrix.order(), cycle);
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Finds chordless odd cycles of length `>= 5` (or `>= 7` with `want_antihole_lengths`).
///
/// `max_results == 0` enumerates all of them; a positive value stops the search as soon
/// as that many distinct vertex subsets are recorded. The result is deterministic for a
/// given matrix and adjacency list.
pub fn find_odd_cycles(
    matrix: &AdjacencyMatrix,
    list: &AdjacencyList,
    want_antihole_lengths: bool,
    max_results: usize,
) -> OddCycles {
    let found = HoleSearch::new(matrix, list, want_antihole_lengths, max_results).run();
    debug!(
        "Odd cycle search (n={}, min_length={}, budget={max_results}) found {}.",
        matrix.order(),
        min_cycle_length(want_antihole_lengths),
        found.len()
    );
    found
}

/// Parallel form of [`find_odd_cycles`], splitting the search by start vertex.
///
/// Cycles rooted at different start vertices have different vertex sets, so per-start
/// results are concatenated in start order and truncated to the budget. The output,
/// including its order, is identical to [`find_odd_cycles`].
pub fn find_odd_cycles_par(
    matrix: &AdjacencyMatrix,
    list: &AdjacencyList,
    want_antihole_lengths: bool,
    max_results: usize,
) -> OddCycles {
    // Smallest start whose own results already fill the budget.
    let cutoff = AtomicUsize::new(usize::MAX);

    let per_start: Vec<OddCycles> = (0..matrix.order())
        .into_par_iter()
        .map(|s| {
            if cutoff.load(Ordering::Relaxed) < s {
                return OddCycles::new();
            }
            let mut search = HoleSearch::new(matrix, list, want_antihole_lengths, max_results)
                .with_cutoff(&cutoff);
            search.search_from(s);
            let found = search.into_found();
            if max_results != 0 && found.len() >= max_results {
                cutoff.fetch_min(s, Ordering::Relaxed);
            }
            found
        })
        .collect();

    let mut merged = OddCycles::new();
    for part in per_start {
        merged.append(part);
        if max_results != 0 && merged.len() >= max_results {
            merged.truncate(max_results);
            break;
        }
    }
    debug!(
        "Parallel odd cycle search (n={}, min_length={}, budget={max_results}) found {}.",
        matrix.order(),
        min_cycle_length(want_antihole_lengths),
        merged.len()
    );
    merged
}

/// Returns `true` iff `cycle` lists the vertices of a chordless cycle of odd length
/// `>= min_length` in `matrix`, in cyclic order.
pub fn is_odd_hole(matrix: &AdjacencyMatrix, cycle: &[usize], min_length: usize) -> bool {
    let len = cycle.len();
    if len < min_length.max(3) || len % 2 == 0 {
        return false;
    }

    let n = matrix.order();
    let mut seen = bitvec![0; n];
    for &v in cycle {
        if v >= n || seen[v] {
            return false;
        }
        seen.set(v, true);
    }

    for a in 0..len {
        for b in (a + 1)..len {
            let consecutive = b == a + 1 || (a == 0 && b == len - 1);
            if matrix.has_edge(cycle[a], cycle[b]) != consecutive {
                return false;
            }
        }
    }
    true
}

// ============================================================================
// Tests
// ============================================================================
