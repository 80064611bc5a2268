// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Compressed-sparse-row matrices.
//!
//! Incidence matrices of a simplicial complex have at most `k + 1` non-zeros
//! per column and Hodge Laplacians are similarly thin, so the topology crate
//! builds everything in CSR form and only densifies on request.

use crate::{LinearOperator, TensorError};
use ndarray::{Array1, Array2, ArrayView2};
use std::collections::BTreeMap;

/// A sparse `f32` matrix in compressed-sparse-row layout.
///
/// # Invariants
/// - `indptr.len() == rows + 1`, `indptr[0] == 0`, non-decreasing.
/// - Column indices within each row are strictly increasing and `< cols`.
/// - No explicit zeros are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    rows: usize,
    cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f32>,
}

impl CsrMatrix {
    /// Creates an all-zero `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            indptr: vec![0; rows + 1],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates the `n × n` identity.
    pub fn identity(n: usize) -> Self {
        Self {
            rows: n,
            cols: n,
            indptr: (0..=n).collect(),
            indices: (0..n).collect(),
            values: vec![1.0; n],
        }
    }

    /// Builds a matrix from `(row, col, value)` triplets.
    ///
    /// Duplicate coordinates are summed; entries that sum to zero are dropped.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{CsrMatrix, LinearOperator};
    /// let m = CsrMatrix::from_triplets(2, 2, &[(0, 1, 1.0), (1, 0, -1.0), (0, 1, 2.0)]).unwrap();
    /// assert_eq!(m.get(0, 1), 3.0);
    /// assert_eq!(m.nnz(), 2);
    /// ```
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidSparse`] if a coordinate is out of range.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, f32)],
    ) -> Result<Self, TensorError> {
        let mut merged: BTreeMap<(usize, usize), f32> = BTreeMap::new();
        for &(r, c, v) in triplets {
            if r >= rows || c >= cols {
                return Err(TensorError::InvalidSparse {
                    detail: format!("entry ({r}, {c}) outside {rows}x{cols} matrix"),
                });
            }
            *merged.entry((r, c)).or_insert(0.0) += v;
        }

        let mut indptr = vec![0usize; rows + 1];
        let mut indices = Vec::with_capacity(merged.len());
        let mut values = Vec::with_capacity(merged.len());
        for ((r, c), v) in merged {
            if v == 0.0 {
                continue;
            }
            indptr[r + 1] += 1;
            indices.push(c);
            values.push(v);
        }
        for r in 0..rows {
            indptr[r + 1] += indptr[r];
        }

        Ok(Self {
            rows,
            cols,
            indptr,
            indices,
            values,
        })
    }

    /// Converts a dense matrix, keeping only its non-zero entries.
    pub fn from_dense(dense: ArrayView2<'_, f32>) -> Self {
        let (rows, cols) = dense.dim();
        let mut indptr = Vec::with_capacity(rows + 1);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        indptr.push(0);
        for row in dense.rows() {
            for (c, &v) in row.iter().enumerate() {
                if v != 0.0 {
                    indices.push(c);
                    values.push(v);
                }
            }
            indptr.push(indices.len());
        }
        Self {
            rows,
            cols,
            indptr,
            indices,
            values,
        }
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// Returns the entry at `(row, col)`, or `0.0` when it is not stored
    /// or out of range.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        if row >= self.rows {
            return 0.0;
        }
        let (cols, vals) = self.row(row);
        match cols.binary_search(&col) {
            Ok(pos) => vals[pos],
            Err(_) => 0.0,
        }
    }

    /// Returns the column indices and values stored in `row`.
    ///
    /// # Panics
    /// Panics if `row >= self.nrows()`.
    pub fn row(&self, row: usize) -> (&[usize], &[f32]) {
        let span = self.indptr[row]..self.indptr[row + 1];
        (&self.indices[span.clone()], &self.values[span])
    }

    /// Iterates over stored `(row, col, value)` entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        (0..self.rows).flat_map(move |r| {
            let (cols, vals) = self.row(r);
            cols.iter().zip(vals.iter()).map(move |(&c, &v)| (r, c, v))
        })
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        let mut counts = vec![0usize; self.cols + 1];
        for &c in &self.indices {
            counts[c + 1] += 1;
        }
        for c in 0..self.cols {
            counts[c + 1] += counts[c];
        }
        let indptr = counts.clone();
        let mut next = counts;
        let mut indices = vec![0usize; self.indices.len()];
        let mut values = vec![0.0f32; self.values.len()];
        // Rows are visited in order, so each transposed row stays sorted.
        for (r, c, v) in self.iter() {
            let slot = next[c];
            indices[slot] = r;
            values[slot] = v;
            next[c] += 1;
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            indptr,
            indices,
            values,
        }
    }

    /// Sparse product `self · rhs`.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] if the inner dimensions differ.
    pub fn matmul(&self, rhs: &CsrMatrix) -> Result<CsrMatrix, TensorError> {
        if self.cols != rhs.rows {
            return Err(TensorError::shape_mismatch(
                "sparse matmul",
                &[self.rows, self.cols],
                &[rhs.rows, rhs.cols],
            ));
        }

        let mut indptr = Vec::with_capacity(self.rows + 1);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        indptr.push(0);

        let mut acc: BTreeMap<usize, f32> = BTreeMap::new();
        for r in 0..self.rows {
            acc.clear();
            let (a_cols, a_vals) = self.row(r);
            for (&k, &a) in a_cols.iter().zip(a_vals) {
                let (b_cols, b_vals) = rhs.row(k);
                for (&c, &b) in b_cols.iter().zip(b_vals) {
                    *acc.entry(c).or_insert(0.0) += a * b;
                }
            }
            for (&c, &v) in &acc {
                if v != 0.0 {
                    indices.push(c);
                    values.push(v);
                }
            }
            indptr.push(indices.len());
        }

        Ok(CsrMatrix {
            rows: self.rows,
            cols: rhs.cols,
            indptr,
            indices,
            values,
        })
    }

    /// Element-wise sum `self + rhs`.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
    pub fn add(&self, rhs: &CsrMatrix) -> Result<CsrMatrix, TensorError> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(TensorError::shape_mismatch(
                "sparse add",
                &[self.rows, self.cols],
                &[rhs.rows, rhs.cols],
            ));
        }
        let triplets: Vec<_> = self.iter().chain(rhs.iter()).collect();
        CsrMatrix::from_triplets(self.rows, self.cols, &triplets)
    }

    /// Returns `true` if `self == selfᵀ`.
    pub fn is_symmetric(&self) -> bool {
        self.rows == self.cols && *self == self.transpose()
    }
}

impl LinearOperator for CsrMatrix {
    fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn apply(&self, x: ArrayView2<'_, f32>) -> Result<Array2<f32>, TensorError> {
        if x.nrows() != self.cols {
            return Err(TensorError::shape_mismatch(
                "sparse apply",
                &[self.rows, self.cols],
                x.shape(),
            ));
        }
        let mut out = Array2::<f32>::zeros((self.rows, x.ncols()));
        for (r, mut out_row) in out.rows_mut().into_iter().enumerate() {
            let (cols, vals) = self.row(r);
            for (&c, &v) in cols.iter().zip(vals) {
                out_row.scaled_add(v, &x.row(c));
            }
        }
        Ok(out)
    }

    fn apply_transpose(&self, x: ArrayView2<'_, f32>) -> Result<Array2<f32>, TensorError> {
        if x.nrows() != self.rows {
            return Err(TensorError::shape_mismatch(
                "sparse apply_transpose",
                &[self.rows, self.cols],
                x.shape(),
            ));
        }
        let mut out = Array2::<f32>::zeros((self.cols, x.ncols()));
        for (r, c, v) in self.iter() {
            out.row_mut(c).scaled_add(v, &x.row(r));
        }
        Ok(out)
    }

    fn row_sums(&self) -> Array1<f32> {
        (0..self.rows)
            .map(|r| self.row(r).1.iter().sum::<f32>())
            .collect()
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn to_dense(&self) -> Array2<f32> {
        let mut out = Array2::<f32>::zeros((self.rows, self.cols));
        for (r, c, v) in self.iter() {
            out[[r, c]] = v;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> CsrMatrix {
        // [[1, 0, 2],
        //  [0, 0, 0],
        //  [0, 3, 0]]
        CsrMatrix::from_triplets(3, 3, &[(0, 0, 1.0), (0, 2, 2.0), (2, 1, 3.0)]).unwrap()
    }

    #[test]
    fn test_from_triplets_and_get() {
        let m = sample();
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.get(0, 2), 2.0);
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.get(2, 1), 3.0);
        assert_eq!(m.get(9, 9), 0.0);
    }

    #[test]
    fn test_from_triplets_drops_cancelled_entries() {
        let m = CsrMatrix::from_triplets(2, 2, &[(0, 0, 1.0), (0, 0, -1.0), (1, 1, 4.0)]).unwrap();
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get(0, 0), 0.0);
    }

    #[test]
    fn test_from_triplets_out_of_range() {
        let result = CsrMatrix::from_triplets(2, 2, &[(2, 0, 1.0)]);
        assert!(matches!(result, Err(TensorError::InvalidSparse { .. })));
    }

    #[test]
    fn test_dense_roundtrip() {
        let dense = array![[0.0f32, 1.5], [-2.0, 0.0], [0.0, 0.0]];
        let m = CsrMatrix::from_dense(dense.view());
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.to_dense(), dense);
    }

    #[test]
    fn test_transpose() {
        let m = sample();
        let t = m.transpose();
        assert_eq!(t.to_dense(), m.to_dense().t().to_owned());
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_sparse_matmul_matches_dense() {
        let a = sample();
        let b = CsrMatrix::from_triplets(3, 2, &[(0, 1, 1.0), (1, 0, 2.0), (2, 0, -1.0)]).unwrap();
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.to_dense(), a.to_dense().dot(&b.to_dense()));
    }

    #[test]
    fn test_sparse_matmul_shape_mismatch() {
        let a = CsrMatrix::zeros(2, 3);
        let b = CsrMatrix::zeros(2, 3);
        assert!(a.matmul(&b).is_err());
    }

    #[test]
    fn test_add() {
        let a = sample();
        let sum = a.add(&CsrMatrix::identity(3)).unwrap();
        assert_eq!(sum.get(0, 0), 2.0);
        assert_eq!(sum.get(1, 1), 1.0);
        assert!(a.add(&CsrMatrix::zeros(2, 2)).is_err());
    }

    #[test]
    fn test_apply_matches_dense() {
        let m = sample();
        let x = array![[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]];
        assert_eq!(m.apply(x.view()).unwrap(), m.to_dense().dot(&x));
        assert_eq!(
            m.apply_transpose(x.view()).unwrap(),
            m.to_dense().t().dot(&x)
        );
    }

    #[test]
    fn test_apply_shape_mismatch() {
        let m = CsrMatrix::zeros(3, 2);
        let x = Array2::<f32>::zeros((3, 1));
        assert!(m.apply(x.view()).is_err());
        assert!(m.apply_transpose(x.view()).is_ok());
    }

    #[test]
    fn test_row_sums_and_symmetry() {
        let m = sample();
        assert_eq!(m.row_sums(), array![3.0, 0.0, 3.0]);
        assert!(!m.is_symmetric());
        let sym = m.add(&m.transpose()).unwrap();
        assert!(sym.is_symmetric());
    }
}
