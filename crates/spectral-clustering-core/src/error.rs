//! Typed errors for contract violations at component boundaries.
//!
//! Programmer errors on `DenseMatrix` indexing (out-of-range access) are not
//! part of this enum: per the dense-matrix contract those fail loudly via
//! `debug_assert!` in debug builds and are unchecked in release. Everything
//! here is a fatal, caller-reportable condition raised by a component's
//! public entry point.

use thiserror::Error;

/// Errors returned by the ε-neighbourhood builder, the Jacobi solver, and the
/// k-means clusterer.
#[derive(Debug, Error)]
pub enum SpectralError {
    /// `sim_out` (or another pre-allocated output buffer) does not match the
    /// dimensions implied by the input.
    #[error("dimension mismatch: expected {expected_rows}x{expected_cols}, got {actual_rows}x{actual_cols}")]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    /// A weighted adjacency entry was negative, or a neighbour-list entry
    /// referenced a node outside `[0, N)`.
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    /// `eigen` was called on a non-square matrix, or `P`/`evalues` were sized
    /// inconsistently with it.
    #[error("eigen: matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// `cluster` was called with `k == 0`, `k > points.len()`, or an empty
    /// point set.
    #[error("degenerate clustering input: {0}")]
    DegenerateInput(String),
}

pub type Result<T> = std::result::Result<T, SpectralError>;
