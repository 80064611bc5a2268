// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`LinearOperator`] abstraction over dense and sparse matrices.

use crate::{matmul, TensorError};
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// A matrix that can be applied to a dense `(rows, channels)` signal.
///
/// Topological operators (Hodge Laplacians, incidence matrices) are handed to
/// the layers as `&dyn LinearOperator`, so callers are free to keep them
/// dense or sparse. Implementations never mutate themselves.
pub trait LinearOperator: std::fmt::Debug {
    /// Returns `(rows, cols)`.
    fn shape(&self) -> (usize, usize);

    /// Computes `self · x`.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] if `x.nrows() != cols`.
    fn apply(&self, x: ArrayView2<'_, f32>) -> Result<Array2<f32>, TensorError>;

    /// Computes `selfᵀ · x`.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] if `x.nrows() != rows`.
    fn apply_transpose(&self, x: ArrayView2<'_, f32>) -> Result<Array2<f32>, TensorError>;

    /// Sum of every row (the "neighborhood size" used for aggregation
    /// normalization).
    fn row_sums(&self) -> Array1<f32>;

    /// Number of stored non-zero entries.
    fn nnz(&self) -> usize;

    /// Materialises the operator as a dense matrix.
    fn to_dense(&self) -> Array2<f32>;

    /// Returns `true` when the operator is square.
    fn is_square(&self) -> bool {
        let (r, c) = self.shape();
        r == c
    }
}

impl LinearOperator for Array2<f32> {
    fn shape(&self) -> (usize, usize) {
        self.dim()
    }

    fn apply(&self, x: ArrayView2<'_, f32>) -> Result<Array2<f32>, TensorError> {
        matmul(self.view(), x)
    }

    fn apply_transpose(&self, x: ArrayView2<'_, f32>) -> Result<Array2<f32>, TensorError> {
        matmul(self.t(), x)
    }

    fn row_sums(&self) -> Array1<f32> {
        self.sum_axis(Axis(1))
    }

    fn nnz(&self) -> usize {
        self.iter().filter(|&&v| v != 0.0).count()
    }

    fn to_dense(&self) -> Array2<f32> {
        self.clone()
    }
}
