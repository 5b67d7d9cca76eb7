//! Spectral clustering core: the numerical pipeline that turns a graph (or a
//! precomputed weighted adjacency structure) into `k` cluster assignments.
//!
//! Four components, in dependency order:
//!
//! - [`matrix`] — the dense matrix store every other component builds on.
//! - [`epsilon`] — bounded-BFS ε-neighbourhood builder.
//! - [`jacobi`] — classical Jacobi eigendecomposition.
//! - [`kmeans`] — Lloyd's k-means clusterer.
//!
//! [`pipeline::run`] wires the four into the end-to-end flow. Each component
//! also exposes its own pure functional contract for callers who want to
//! drive the stages independently (e.g. to inspect the ε-matrix or
//! eigenvectors before clustering).
//!
//! The crate performs no file I/O and holds no global state; all inputs and
//! outputs are caller-owned buffers.

pub mod epsilon;
pub mod error;
pub mod jacobi;
pub mod kmeans;
pub mod matrix;
pub mod pipeline;

pub use epsilon::Graph;
pub use error::{Result, SpectralError};
pub use kmeans::ClusterResult;
pub use matrix::DenseMatrix;
pub use pipeline::PipelineResult;
