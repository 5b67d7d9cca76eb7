//! File-format glue for the CLI driver: reading a graph input file (dense
//! matrix or adjacency list) and writing the cluster-assignment CSV.
//!
//! None of this lives in the core crate: per the component contract the
//! core only ever sees caller-owned in-memory buffers.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use spectral_clustering::DenseMatrix;

/// Which of the two supported input shapes a file holds.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InputKind {
    /// Whitespace-separated decimal NxN matrix, one row per line.
    Matrix,
    /// One line per node: neighbour count followed by that many indices.
    AdjacencyList,
}

/// Parsed graph input, owned by the CLI so it can hand borrowed views into
/// `spectral_clustering::Graph` down to the core.
pub enum ParsedGraph {
    Matrix(DenseMatrix),
    AdjacencyList(Vec<Vec<usize>>),
}

/// Read `path` as the given `kind`, expecting `num_nodes` nodes.
pub fn read_graph(path: &Path, kind: InputKind, num_nodes: usize) -> Result<ParsedGraph> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to open input file {}", path.display()))?;

    match kind {
        InputKind::Matrix => Ok(ParsedGraph::Matrix(parse_matrix(&contents, num_nodes)?)),
        InputKind::AdjacencyList => Ok(ParsedGraph::AdjacencyList(parse_adjacency_list(
            &contents, num_nodes,
        )?)),
    }
}

fn parse_matrix(contents: &str, num_nodes: usize) -> Result<DenseMatrix> {
    let mut values = contents.split_whitespace();
    let mut matrix = DenseMatrix::construct(num_nodes, num_nodes);
    for i in 0..num_nodes {
        for j in 0..num_nodes {
            let raw = values
                .next()
                .with_context(|| format!("matrix input truncated before entry ({i}, {j})"))?;
            let value: f64 = raw
                .parse()
                .with_context(|| format!("invalid float {raw:?} at matrix entry ({i}, {j})"))?;
            matrix.set(i, j, value);
        }
    }
    Ok(matrix)
}

fn parse_adjacency_list(contents: &str, num_nodes: usize) -> Result<Vec<Vec<usize>>> {
    let mut lines = contents.lines().filter(|l| !l.trim().is_empty());
    let mut adjacency = Vec::with_capacity(num_nodes);
    for node in 0..num_nodes {
        let line = lines
            .next()
            .with_context(|| format!("adjacency list truncated before node {node}"))?;
        let mut fields = line.split_whitespace();
        let count: usize = fields
            .next()
            .with_context(|| format!("missing neighbour count for node {node}"))?
            .parse()
            .with_context(|| format!("invalid neighbour count for node {node}"))?;
        let neighbours: Vec<usize> = fields
            .map(|f| f.parse::<usize>())
            .collect::<std::result::Result<_, _>>()
            .with_context(|| format!("invalid neighbour index for node {node}"))?;
        if neighbours.len() != count {
            bail!(
                "node {node} declares {count} neighbours but lists {}",
                neighbours.len()
            );
        }
        adjacency.push(neighbours);
    }
    Ok(adjacency)
}

/// Write a plain-text NxN matrix file, one row of whitespace-separated
/// floats per line (the ε-matrix-only driver's output format).
pub fn write_matrix(path: &Path, matrix: &DenseMatrix) -> Result<()> {
    let mut out = String::new();
    for row in matrix.rows_iter() {
        for value in row {
            out.push_str(&format!("{value} "));
        }
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("failed to write output file {}", path.display()))
}

/// Write the cluster-assignment CSV: header `x0,...,x(d-1),cluster` followed
/// by one row per point.
pub fn write_cluster_csv(path: &Path, points: &[Vec<f64>], membership: &[usize]) -> Result<()> {
    let d = points.first().map(|p| p.len()).unwrap_or(0);

    let mut out = String::new();
    for i in 0..d {
        out.push_str(&format!("x{i},"));
    }
    out.push_str("cluster\n");

    for (point, &cluster) in points.iter().zip(membership.iter()) {
        for coord in point {
            out.push_str(&format!("{coord},"));
        }
        out.push_str(&format!("{cluster}\n"));
    }

    fs::write(path, out).with_context(|| format!("failed to write output file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whitespace_matrix() {
        let contents = "0 1 2\n3 4 5\n6 7 8\n";
        let m = parse_matrix(contents, 3).unwrap();
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(1, 2), 5.0);
        assert_eq!(m.get(2, 2), 8.0);
    }

    #[test]
    fn parses_adjacency_list() {
        let contents = "1 1\n2 0 2\n1 1\n";
        let adj = parse_adjacency_list(contents, 3).unwrap();
        assert_eq!(adj, vec![vec![1], vec![0, 2], vec![1]]);
    }

    #[test]
    fn rejects_mismatched_neighbour_count() {
        let contents = "2 1\n";
        let err = parse_adjacency_list(contents, 1).unwrap_err();
        assert!(err.to_string().contains("declares"));
    }

    #[test]
    fn cluster_csv_has_expected_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let points = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let membership = vec![0, 1];
        write_cluster_csv(&path, &points, &membership).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), "x0,x1,cluster");
        assert_eq!(lines.next().unwrap(), "1,2,0");
        assert_eq!(lines.next().unwrap(), "3,4,1");
    }
}
