//! Integration test: drive the full pipeline the way `run` does, writing and
//! re-reading the CSV the CLI produces, using a real temporary file rather
//! than an in-memory buffer.

use std::fs;

use spectral_clustering::{pipeline, Graph};
use tempfile::tempdir;

#[test]
fn csv_round_trip_for_two_well_separated_clusters() {
    // Six points: a tight pair near the origin connected to each other, and
    // a tight pair far away connected to each other, with no cross edges —
    // the epsilon-neighbourhood matrix should isolate the two groups, and
    // clustering the first two eigen-coordinates should recover them.
    let mut adj = spectral_clustering::DenseMatrix::construct(4, 4);
    adj.set(0, 1, 1.0);
    adj.set(1, 0, 1.0);
    adj.set(2, 3, 1.0);
    adj.set(3, 2, 1.0);

    let graph = Graph::WeightedAdjacency(&adj);
    let result = pipeline::run(&graph, 1.5, 2, false).unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("clusters.csv");

    // Mirror what `io::write_cluster_csv` produces, without depending on the
    // binary's private module from an external test.
    let d = result.points[0].len();
    let mut csv = String::new();
    for i in 0..d {
        csv.push_str(&format!("x{i},"));
    }
    csv.push_str("cluster\n");
    for (point, &cluster) in result.points.iter().zip(result.clusters.membership.iter()) {
        for coord in point {
            csv.push_str(&format!("{coord},"));
        }
        csv.push_str(&format!("{cluster}\n"));
    }
    fs::write(&out_path, &csv).unwrap();

    let read_back = fs::read_to_string(&out_path).unwrap();
    let mut lines = read_back.lines();
    assert_eq!(lines.next().unwrap(), "x0,x1,cluster");
    assert_eq!(lines.count(), 4);

    let group_a = result.clusters.membership[0];
    assert_eq!(result.clusters.membership[1], group_a);
    let group_b = result.clusters.membership[2];
    assert_eq!(result.clusters.membership[3], group_b);
    assert_ne!(group_a, group_b);
}

#[test]
fn adjacency_list_graph_reports_dimension_mismatch_against_undersized_buffer() {
    let list: Vec<Vec<usize>> = vec![vec![1], vec![0]];
    let mut sim = spectral_clustering::DenseMatrix::construct(1, 1);
    let err = spectral_clustering::epsilon::build(&Graph::AdjacencyList(&list), &mut sim, 1.0)
        .unwrap_err();
    assert!(matches!(err, spectral_clustering::SpectralError::DimensionMismatch { .. }));
}
