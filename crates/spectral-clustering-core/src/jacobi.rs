//! Jacobi eigendecomposition: in-place symmetric diagonalisation by repeated
//! plane rotations that each zero the largest off-diagonal magnitude.
//!
//! The outer rotation loop is inherently sequential (each rotation depends
//! on the state left by the previous one). The max-element scan of the
//! upper triangle and the row/column updates within a single rotation are
//! independent across their index ranges and are parallelised with Rayon.

use rayon::prelude::*;

use crate::error::{Result, SpectralError};
use crate::matrix::DenseMatrix;

/// Convergence tolerance. Part of the public contract, not configurable.
pub const TOLERANCE: f64 = 1.0e-3;

/// Rotation budget multiplier (`maxRot = ROTATION_BUDGET_FACTOR * n`).
pub const ROTATION_BUDGET_FACTOR: usize = 10;

/// Diagonalise symmetric `a` in place.
///
/// `p` must be a pre-allocated N×N matrix; on return its columns hold the
/// accumulated orthogonal transform (eigenvectors). `evalues` must be a
/// pre-allocated length-N vector; on return `evalues[i] == a.get(i, i)`.
///
/// Exhausting the rotation budget without reaching `TOLERANCE` is not an
/// error: the current diagonal is returned as a best-effort result.
pub fn eigen(a: &mut DenseMatrix, p: &mut DenseMatrix, evalues: &mut [f64]) -> Result<()> {
    let n = a.rows();
    if a.rows() != a.cols() {
        return Err(SpectralError::NotSquare {
            rows: a.rows(),
            cols: a.cols(),
        });
    }
    if p.rows() != n || p.cols() != n {
        return Err(SpectralError::DimensionMismatch {
            expected_rows: n,
            expected_cols: n,
            actual_rows: p.rows(),
            actual_cols: p.cols(),
        });
    }
    if evalues.len() != n {
        return Err(SpectralError::DimensionMismatch {
            expected_rows: n,
            expected_cols: 1,
            actual_rows: evalues.len(),
            actual_cols: 1,
        });
    }

    *p = DenseMatrix::identity(n);

    let max_rotations = ROTATION_BUDGET_FACTOR * n;

    for _ in 0..max_rotations {
        let (k, l, a_max) = max_off_diagonal(a);
        if a_max < TOLERANCE {
            break;
        }
        rotate(a, p, k, l);
    }

    for (i, slot) in evalues.iter_mut().enumerate() {
        *slot = a.get(i, i);
    }

    Ok(())
}

/// Scan the strict upper triangle for the entry of greatest magnitude.
/// Returns `(k, l, |a[k][l]|)` with `k < l`.
fn max_off_diagonal(a: &DenseMatrix) -> (usize, usize, f64) {
    let n = a.rows();
    if n < 2 {
        return (0, 0, 0.0);
    }

    (0..n - 1)
        .into_par_iter()
        .map(|i| {
            let mut best = (i, i, 0.0_f64);
            for j in (i + 1)..n {
                let v = a.get(i, j).abs();
                if v >= best.2 {
                    best = (i, j, v);
                }
            }
            best
        })
        .reduce(
            || (0, 0, 0.0),
            |best, cand| if cand.2 >= best.2 { cand } else { best },
        )
}

/// Apply the rotation that zeroes `a[k][l]`, updating `a` and accumulating
/// the transform into `p`.
fn rotate(a: &mut DenseMatrix, p: &mut DenseMatrix, k: usize, l: usize) {
    let n = a.rows();
    let a_kl = a.get(k, l);
    let a_diff = a.get(l, l) - a.get(k, k);

    let t = if a_kl.abs() < a_diff.abs() * 1.0e-36 {
        a_kl / a_diff
    } else {
        let phi = a_diff / (2.0 * a_kl);
        let t = 1.0 / (phi.abs() + (phi * phi + 1.0).sqrt());
        if phi < 0.0 {
            -t
        } else {
            t
        }
    };

    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;
    let tau = s / (1.0 + c);

    let temp = a_kl;
    a.set(k, l, 0.0);
    a.set(k, k, a.get(k, k) - t * temp);
    a.set(l, l, a.get(l, l) + t * temp);

    // i < k
    for i in 0..k {
        let aik = a.get(i, k);
        let ail = a.get(i, l);
        a.set(i, k, aik - s * (ail + tau * aik));
        a.set(i, l, ail + s * (aik - tau * ail));
    }

    // k < i < l
    for i in (k + 1)..l {
        let aki = a.get(k, i);
        let ail = a.get(i, l);
        a.set(k, i, aki - s * (ail + tau * aki));
        a.set(i, l, ail + s * (aki - tau * ail));
    }

    // i > l
    for i in (l + 1)..n {
        let aki = a.get(k, i);
        let ali = a.get(l, i);
        a.set(k, i, aki - s * (ali + tau * aki));
        a.set(l, i, ali + s * (aki - tau * ali));
    }

    // Update columns k and l of the companion matrix.
    for i in 0..n {
        let pik = p.get(i, k);
        let pil = p.get(i, l);
        p.set(i, k, pik - s * (pil + tau * pik));
        p.set(i, l, pil + s * (pik - tau * pil));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_matrix_converges_in_zero_rotations() {
        let mut a = DenseMatrix::construct(3, 3);
        a.set(0, 0, 1.0);
        a.set(1, 1, 2.0);
        a.set(2, 2, 3.0);
        let original = a.clone();

        let mut p = DenseMatrix::construct(3, 3);
        let mut evalues = vec![0.0; 3];
        eigen(&mut a, &mut p, &mut evalues).unwrap();

        assert_eq!(a, original);
        assert_eq!(p, DenseMatrix::identity(3));
        assert_eq!(evalues, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn two_by_two_symmetric_matches_known_eigenpairs() {
        let mut a = DenseMatrix::construct(2, 2);
        a.set(0, 0, 2.0);
        a.set(0, 1, 1.0);
        a.set(1, 0, 1.0);
        a.set(1, 1, 2.0);

        let mut p = DenseMatrix::construct(2, 2);
        let mut evalues = vec![0.0; 2];
        eigen(&mut a, &mut p, &mut evalues).unwrap();

        let mut sorted = evalues.clone();
        sorted.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!((sorted[0] - 1.0).abs() < 1e-6);
        assert!((sorted[1] - 3.0).abs() < 1e-6);

        // Off-diagonal should be numerically zero.
        assert!(a.get(0, 1).abs() < TOLERANCE);

        // P should be orthogonal: P * P^T == I within tolerance.
        for i in 0..2 {
            for j in 0..2 {
                let mut dot = 0.0;
                for r in 0..2 {
                    dot += p.get(r, i) * p.get(r, j);
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((dot - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn single_node_matrix() {
        let mut a = DenseMatrix::construct(1, 1);
        a.set(0, 0, 7.0);
        let mut p = DenseMatrix::construct(1, 1);
        let mut evalues = vec![0.0; 1];
        eigen(&mut a, &mut p, &mut evalues).unwrap();
        assert_eq!(evalues, vec![7.0]);
        assert_eq!(p.get(0, 0), 1.0);
    }

    #[test]
    fn rejects_non_square() {
        let mut a = DenseMatrix::construct(2, 3);
        let mut p = DenseMatrix::construct(2, 2);
        let mut evalues = vec![0.0; 2];
        let err = eigen(&mut a, &mut p, &mut evalues).unwrap_err();
        assert!(matches!(err, SpectralError::NotSquare { .. }));
    }
}
