//! Wires the four components into the end-to-end spectral clustering flow:
//! raw graph → ε-matrix → eigenvectors → first-k eigen-coordinates as an
//! N-point, k-dimensional cloud → k clusters.
//!
//! Each stage is strictly sequential with respect to the next (component
//! `i` finishes before component `i+1` begins); within a stage, work is
//! parallelised as described by the owning module.

use tracing::info;

use crate::epsilon::{self, Graph};
use crate::error::{Result, SpectralError};
use crate::jacobi;
use crate::kmeans::{self, ClusterResult};
use crate::matrix::DenseMatrix;

/// The point cloud projected onto the first `k` eigen-coordinates, together
/// with the cluster assignment each point converged to.
pub struct PipelineResult {
    /// `points[i]` is node `i`'s coordinates in the first-`k`-eigenvector
    /// projection.
    pub points: Vec<Vec<f64>>,
    pub clusters: ClusterResult,
}

/// Run the full pipeline on `graph`, producing `k` clusters over the first
/// `k` eigen-coordinates of its ε-neighbourhood matrix.
pub fn run(graph: &Graph, epsilon: f64, k: usize, verbose: bool) -> Result<PipelineResult> {
    let n = graph.num_nodes();
    if k > n {
        return Err(SpectralError::DegenerateInput(format!(
            "k ({k}) exceeds number of nodes ({n})"
        )));
    }

    let mut sim = DenseMatrix::construct(n, n);
    epsilon::build(graph, &mut sim, epsilon)?;
    info!(n, epsilon, "built epsilon-neighbourhood matrix");

    let mut p = DenseMatrix::construct(n, n);
    let mut evalues = vec![0.0; n];
    jacobi::eigen(&mut sim, &mut p, &mut evalues)?;
    info!("diagonalised similarity matrix");

    let points: Vec<Vec<f64>> = (0..n)
        .map(|row| (0..k).map(|col| p.get(row, col)).collect())
        .collect();

    let clusters = kmeans::cluster(&points, k, k, verbose)?;
    info!(k, "clustering converged");

    Ok(PipelineResult { points, clusters })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_two_cluster_pipeline() {
        // Two disjoint triangles: {0,1,2} and {3,4,5}, each fully connected
        // with weight 1, no edges between the two groups.
        let mut adj = DenseMatrix::construct(6, 6);
        for &(a, b) in &[(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5)] {
            adj.set(a, b, 1.0);
            adj.set(b, a, 1.0);
        }
        let graph = Graph::WeightedAdjacency(&adj);
        let result = run(&graph, 2.0, 2, false).unwrap();
        let membership = &result.clusters.membership;

        let group_a = membership[0];
        assert_eq!(membership[1], group_a);
        assert_eq!(membership[2], group_a);

        let group_b = membership[3];
        assert_eq!(membership[4], group_b);
        assert_eq!(membership[5], group_b);

        assert_ne!(group_a, group_b);
    }

    #[test]
    fn rejects_k_greater_than_num_nodes() {
        let adj = DenseMatrix::construct(3, 3);
        let graph = Graph::WeightedAdjacency(&adj);
        let err = run(&graph, 1.0, 10, false).unwrap_err();
        assert!(matches!(err, SpectralError::DegenerateInput(_)));
    }
}
