//! Dense matrix store: a rectangular N×M array of 64-bit floats with
//! row-major, contiguous storage.
//!
//! This is the foundation every other component builds on. Allocated
//! dimensions are immutable for the lifetime of the value; all elements are
//! zero-initialized at construction. Indexing is `(i, j) -> buffer[i*cols+j]`
//! (flat buffer with stride, per the reimplementation notes), which gives
//! better locality than an array of row pointers and keeps ownership simple:
//! the matrix owns one `Vec<f64>`, nothing else.

/// Out-of-range access on a `DenseMatrix` is a programmer error. In debug
/// builds it fails loudly via `debug_assert!`; in release builds the bounds
/// check is skipped and the access is unchecked, per the dense-matrix
/// contract (undefined to exploit in release).
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Allocate a `rows x cols` matrix, all entries zero.
    pub fn construct(rows: usize, cols: usize) -> Self {
        DenseMatrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(
            i < self.rows && j < self.cols,
            "DenseMatrix index ({i}, {j}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        i * self.cols + j
    }

    /// Read element `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let idx = self.index(i, j);
        unsafe { *self.data.get_unchecked(idx) }
    }

    /// Write element `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index(i, j);
        unsafe {
            *self.data.get_unchecked_mut(idx) = value;
        }
    }

    /// Immutable view of row `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        debug_assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Mutable view of row `i`.
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        debug_assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterator over rows as immutable slices.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.cols)
    }

    /// Iterator over rows as mutable slices, disjoint so it is safe to hand
    /// one to each of several parallel workers.
    pub fn rows_iter_mut(&mut self) -> impl Iterator<Item = &mut [f64]> {
        self.data.chunks_mut(self.cols)
    }

    /// Scale every element by `factor`, in place.
    pub fn scale(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|v| *v *= factor);
    }

    /// Add `other`'s elements into `self`, element-wise. Panics (debug) on
    /// mismatched dimensions.
    pub fn accumulate(&mut self, other: &DenseMatrix) {
        debug_assert_eq!(self.rows, other.rows);
        debug_assert_eq!(self.cols, other.cols);
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
    }

    /// Construct the identity matrix of size `n`.
    pub fn identity(n: usize) -> Self {
        let mut m = DenseMatrix::construct(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Raw element buffer, row-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_is_all_zero() {
        let m = DenseMatrix::construct(3, 4);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn get_set_round_trip() {
        let mut m = DenseMatrix::construct(2, 2);
        m.set(0, 1, 3.5);
        m.set(1, 0, -2.0);
        assert_eq!(m.get(0, 1), 3.5);
        assert_eq!(m.get(1, 0), -2.0);
        assert_eq!(m.get(0, 0), 0.0);
    }

    #[test]
    fn row_iteration() {
        let mut m = DenseMatrix::construct(2, 3);
        m.set(0, 0, 1.0);
        m.set(0, 1, 2.0);
        m.set(0, 2, 3.0);
        m.set(1, 0, 4.0);
        let rows: Vec<&[f64]> = m.rows_iter().collect();
        assert_eq!(rows[0], &[1.0, 2.0, 3.0]);
        assert_eq!(rows[1], &[4.0, 0.0, 0.0]);
    }

    #[test]
    fn scale_and_accumulate() {
        let mut a = DenseMatrix::construct(2, 2);
        a.set(0, 0, 1.0);
        a.set(1, 1, 2.0);
        a.scale(2.0);
        assert_eq!(a.get(0, 0), 2.0);
        assert_eq!(a.get(1, 1), 4.0);

        let mut b = DenseMatrix::identity(2);
        b.accumulate(&a);
        assert_eq!(b.get(0, 0), 3.0);
        assert_eq!(b.get(1, 1), 5.0);
        assert_eq!(b.get(0, 1), 0.0);
    }

    #[test]
    fn identity_matrix() {
        let id = DenseMatrix::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(id.get(i, j), expected);
            }
        }
    }
}
