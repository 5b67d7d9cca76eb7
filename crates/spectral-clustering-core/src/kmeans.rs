//! Lloyd's k-means clusterer.
//!
//! Centroids are seeded uniformly within the per-coordinate bounding box
//! using an explicit, caller-owned `StdRng` seeded with a fixed value (0),
//! so runs are reproducible without touching global PRNG state. Distance is
//! Euclidean with a lowest-index tie-break; convergence is declared once a
//! full reassignment pass changes no point's cluster.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::{Result, SpectralError};

/// Fixed seed for centroid initialisation, part of the determinism contract.
pub const SEED: u64 = 0;

/// Final partition and centroids produced by `cluster`.
pub struct ClusterResult {
    /// `membership[i]` is the cluster index of `points[i]`.
    pub membership: Vec<usize>,
    /// `centroids[c]` is the d-dimensional centroid of cluster `c`.
    pub centroids: Vec<Vec<f64>>,
}

/// Run Lloyd's algorithm over `points` (each a `d`-dimensional tuple),
/// partitioning them into `k` clusters.
///
/// `verbose` mirrors the original driver's progress printouts; when true,
/// the iteration count and per-iteration reassignment count are logged via
/// `tracing`.
pub fn cluster(points: &[Vec<f64>], d: usize, k: usize, verbose: bool) -> Result<ClusterResult> {
    let n = points.len();
    if n == 0 {
        return Err(SpectralError::DegenerateInput("no points supplied".into()));
    }
    if k == 0 {
        return Err(SpectralError::DegenerateInput("k must be positive".into()));
    }
    if k > n {
        return Err(SpectralError::DegenerateInput(format!(
            "k ({k}) exceeds number of points ({n})"
        )));
    }
    if points.iter().any(|p| p.len() != d) {
        return Err(SpectralError::DimensionMismatch {
            expected_rows: n,
            expected_cols: d,
            actual_rows: n,
            actual_cols: 0,
        });
    }

    let mut rng = StdRng::seed_from_u64(SEED);
    let mut centroids = random_centroids_in_bounding_box(points, d, k, &mut rng);

    let mut membership: Vec<usize> = points
        .par_iter()
        .map(|p| closest_centroid(p, &centroids))
        .collect();

    let mut iteration = 0usize;
    loop {
        iteration += 1;
        recompute_centroids(points, &membership, &mut centroids, k, d);

        let new_membership: Vec<usize> = points
            .par_iter()
            .map(|p| closest_centroid(p, &centroids))
            .collect();

        let changed = new_membership
            .iter()
            .zip(membership.iter())
            .filter(|(a, b)| a != b)
            .count();

        if verbose {
            tracing::debug!(iteration, changed, "k-means iteration");
        }

        membership = new_membership;
        if changed == 0 {
            break;
        }
    }

    Ok(ClusterResult {
        membership,
        centroids,
    })
}

fn random_centroids_in_bounding_box(
    points: &[Vec<f64>],
    d: usize,
    k: usize,
    rng: &mut StdRng,
) -> Vec<Vec<f64>> {
    let mut min = points[0].clone();
    let mut max = points[0].clone();
    for p in points.iter() {
        for j in 0..d {
            if p[j] < min[j] {
                min[j] = p[j];
            }
            if p[j] > max[j] {
                max[j] = p[j];
            }
        }
    }

    (0..k)
        .map(|_| {
            (0..d)
                .map(|j| min[j] + rng.gen::<f64>() * (max[j] - min[j]))
                .collect()
        })
        .collect()
}

fn closest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, c) in centroids.iter().enumerate() {
        let dist = euclidean_distance(point, c);
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }
    best_idx
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Recompute each centroid as the mean of its current members. A cluster
/// with no members keeps its previous centroid rather than producing NaN.
fn recompute_centroids(
    points: &[Vec<f64>],
    membership: &[usize],
    centroids: &mut [Vec<f64>],
    k: usize,
    d: usize,
) {
    let mut sums = vec![vec![0.0_f64; d]; k];
    let mut counts = vec![0usize; k];

    for (p, &c) in points.iter().zip(membership.iter()) {
        counts[c] += 1;
        for j in 0..d {
            sums[c][j] += p[j];
        }
    }

    for c in 0..k {
        if counts[c] == 0 {
            continue;
        }
        let n = counts[c] as f64;
        for j in 0..d {
            centroids[c][j] = sums[c][j] / n;
        }
    }
}
