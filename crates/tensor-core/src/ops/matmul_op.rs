// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Matrix multiplication operation.

use crate::TensorError;
use ndarray::{Array2, ArrayView2};

/// Performs matrix multiplication: `lhs · rhs`.
///
/// `lhs` is `[M, K]`, `rhs` is `[K, N]`, and the result is `[M, N]`.
/// Views may be transposed or strided; `ndarray` picks the kernel.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the inner dimensions differ.
pub fn matmul(
    lhs: ArrayView2<'_, f32>,
    rhs: ArrayView2<'_, f32>,
) -> Result<Array2<f32>, TensorError> {
    if lhs.ncols() != rhs.nrows() {
        return Err(TensorError::shape_mismatch("matmul", lhs.shape(), rhs.shape()));
    }
    Ok(lhs.dot(&rhs))
}
