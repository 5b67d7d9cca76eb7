//! ε-neighbourhood builder: bounded-BFS from every source node, producing a
//! dense Laplacian-like similarity matrix.
//!
//! Source nodes are independent, so the builder fans out across Rayon's
//! thread pool with one row of the output written per source. Each worker
//! thread keeps its own BFS queue and visited-set in thread-local storage so
//! repeated calls on the same pool reuse the same allocation instead of
//! reallocating per source (the reimplementation of the original's
//! per-worker scratch-array discipline).

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};

use rayon::prelude::*;

use crate::error::{Result, SpectralError};
use crate::matrix::DenseMatrix;

/// Input graph shape, chosen at construction.
pub enum Graph<'a> {
    /// N×N non-negative edge-weight matrix; 0 means no edge.
    WeightedAdjacency(&'a DenseMatrix),
    /// Per-node ordered neighbour lists; edges are unit-weight.
    AdjacencyList(&'a [Vec<usize>]),
}

impl Graph<'_> {
    /// Number of source nodes in the graph.
    pub fn num_nodes(&self) -> usize {
        match self {
            Graph::WeightedAdjacency(m) => m.rows(),
            Graph::AdjacencyList(list) => list.len(),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Graph::WeightedAdjacency(m) => {
                if m.rows() != m.cols() {
                    return Err(SpectralError::NotSquare {
                        rows: m.rows(),
                        cols: m.cols(),
                    });
                }
                let n = m.rows();
                for i in 0..n {
                    for j in 0..n {
                        if m.get(i, j) < 0.0 {
                            return Err(SpectralError::MalformedGraph(format!(
                                "negative edge weight at ({i}, {j})"
                            )));
                        }
                    }
                }
                Ok(())
            }
            Graph::AdjacencyList(list) => {
                let n = list.len();
                for (v, neighbours) in list.iter().enumerate() {
                    for &u in neighbours {
                        if u >= n {
                            return Err(SpectralError::MalformedGraph(format!(
                                "node {v} lists out-of-range neighbour {u}"
                            )));
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

struct QueueItem {
    node: usize,
    remaining: f64,
}

thread_local! {
    static SCRATCH: RefCell<(VecDeque<QueueItem>, HashSet<usize>)> =
        RefCell::new((VecDeque::new(), HashSet::new()));
}

/// Fill the pre-allocated N×N `sim_out` with the ε-matrix of `graph`.
///
/// `epsilon` is a remaining-budget for weighted adjacency input, or an
/// integer hop limit (truncated toward zero) for adjacency-list input.
///
/// Each source node's row is written independently and in isolation: row `s`
/// holds -1 in every column reachable from `s` within budget `epsilon`, 0
/// elsewhere off-diagonal, and on the diagonal the count of distinct other
/// nodes reached.
pub fn build(graph: &Graph, sim_out: &mut DenseMatrix, epsilon: f64) -> Result<()> {
    graph.validate()?;
    let n = graph.num_nodes();
    if sim_out.rows() != n || sim_out.cols() != n {
        return Err(SpectralError::DimensionMismatch {
            expected_rows: n,
            expected_cols: n,
            actual_rows: sim_out.rows(),
            actual_cols: sim_out.cols(),
        });
    }

    let hop_limit = epsilon.trunc();

    sim_out
        .rows_iter_mut()
        .enumerate()
        .par_bridge()
        .for_each(|(s, row)| {
            SCRATCH.with(|scratch| {
                let mut scratch = scratch.borrow_mut();
                let (queue, visited) = &mut *scratch;
                queue.clear();
                visited.clear();
                bfs_from_source(graph, s, epsilon, hop_limit, row, queue, visited);
            });
        });

    Ok(())
}

fn bfs_from_source(
    graph: &Graph,
    source: usize,
    epsilon: f64,
    hop_limit: f64,
    row: &mut [f64],
    queue: &mut VecDeque<QueueItem>,
    visited: &mut HashSet<usize>,
) {
    let initial_budget = match graph {
        Graph::WeightedAdjacency(_) => epsilon,
        Graph::AdjacencyList(_) => hop_limit,
    };

    queue.push_back(QueueItem {
        node: source,
        remaining: initial_budget,
    });

    let mut num_visited: i64 = -1;

    while let Some(QueueItem { node: v, remaining }) = queue.pop_front() {
        if !visited.insert(v) {
            continue;
        }
        num_visited += 1;
        row[v] = -1.0;

        if remaining <= 0.0 {
            continue;
        }

        match graph {
            Graph::WeightedAdjacency(m) => {
                for u in 0..m.rows() {
                    if u == v {
                        continue;
                    }
                    let w = m.get(v, u);
                    if w > 0.0 && remaining - w >= 0.0 {
                        queue.push_back(QueueItem {
                            node: u,
                            remaining: remaining - w,
                        });
                    }
                }
            }
            Graph::AdjacencyList(list) => {
                if remaining >= 1.0 {
                    for &u in &list[v] {
                        queue.push_back(QueueItem {
                            node: u,
                            remaining: remaining - 1.0,
                        });
                    }
                }
            }
        }
    }

    row[source] = num_visited as f64;
}
