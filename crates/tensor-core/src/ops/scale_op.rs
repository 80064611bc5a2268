// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Row scaling and non-finite cleanup.

use crate::TensorError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Returns `1 / v` element-wise, mapping infinite or NaN results to `0`.
///
/// # Examples
/// ```
/// use ndarray::array;
/// use tensor_core::reciprocal_or_zero;
/// let inv = reciprocal_or_zero(array![2.0f32, 0.0, -4.0].view());
/// assert_eq!(inv, array![0.5, 0.0, -0.25]);
/// ```
pub fn reciprocal_or_zero(v: ArrayView1<'_, f32>) -> Array1<f32> {
    v.mapv(|x| {
        let inv = 1.0 / x;
        if inv.is_finite() {
            inv
        } else {
            0.0
        }
    })
}

/// Multiplies row `i` of `x` by `factors[i]`.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if `factors.len() != x.nrows()`.
pub fn scale_rows(
    x: ArrayView2<'_, f32>,
    factors: ArrayView1<'_, f32>,
) -> Result<Array2<f32>, TensorError> {
    if factors.len() != x.nrows() {
        return Err(TensorError::shape_mismatch(
            "scale_rows",
            x.shape(),
            factors.shape(),
        ));
    }
    Ok(&x * &factors.insert_axis(Axis(1)))
}

/// Replaces every infinite or NaN entry with `0` and returns how many were
/// replaced.
pub fn zero_non_finite(x: &mut Array2<f32>) -> usize {
    let mut replaced = 0;
    x.iter_mut().filter(|v| !v.is_finite()).for_each(|v| {
        *v = 0.0;
        replaced += 1;
    });
    replaced
}
