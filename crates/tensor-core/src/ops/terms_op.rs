// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Stacked-term tensors: building them and contracting them against weights.
//!
//! A stacked-term tensor has shape `(cells, channels, terms)`. Every term is
//! one `(cells, channels)` signal (an identity copy, a Chebyshev hop, a
//! cross-order message, ...) and the trailing axis keeps them in a fixed
//! order that must line up with the weight tensor's trailing axis.

use crate::TensorError;
use ndarray::{concatenate, Array2, Array3, ArrayView2, ArrayView3, Axis};

/// Views a `(cells, channels)` signal as a one-term `(cells, channels, 1)`
/// tensor without copying.
pub fn single_term(x: ArrayView2<'_, f32>) -> ArrayView3<'_, f32> {
    x.insert_axis(Axis(2))
}

/// Concatenates stacked-term tensors along the term axis, preserving order.
///
/// # Errors
/// Returns [`TensorError::Empty`] when `parts` is empty and
/// [`TensorError::ShapeMismatch`] when two parts disagree on
/// `(cells, channels)`.
pub fn concat_terms(parts: &[ArrayView3<'_, f32>]) -> Result<Array3<f32>, TensorError> {
    let first = parts.first().ok_or(TensorError::Empty { op: "concat_terms" })?;
    let (cells, channels, _) = first.dim();

    for part in &parts[1..] {
        let (c, ch, _) = part.dim();
        if c != cells || ch != channels {
            return Err(TensorError::shape_mismatch(
                "concat_terms",
                first.shape(),
                part.shape(),
            ));
        }
    }

    concatenate(Axis(2), parts).map_err(|_| TensorError::Empty { op: "concat_terms" })
}

/// Contracts a stacked-term tensor against a weight tensor:
/// `y[n, o] = Σ_{i, k} x[n, i, k] · w[i, o, k]`.
///
/// `x` is `(cells, in_channels, terms)`, `w` is
/// `(in_channels, out_channels, terms)` and the result is
/// `(cells, out_channels)`.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the channel or term axes differ.
pub fn contract_terms(
    x: ArrayView3<'_, f32>,
    w: ArrayView3<'_, f32>,
) -> Result<Array2<f32>, TensorError> {
    let (cells, in_channels, terms) = x.dim();
    let (w_in, out_channels, w_terms) = w.dim();
    if in_channels != w_in || terms != w_terms {
        return Err(TensorError::shape_mismatch(
            "contract_terms",
            x.shape(),
            w.shape(),
        ));
    }

    let mut y = Array2::<f32>::zeros((cells, out_channels));
    for k in 0..terms {
        let xk = x.index_axis(Axis(2), k);
        let wk = w.index_axis(Axis(2), k);
        ndarray::linalg::general_mat_mul(1.0, &xk, &wk, 1.0, &mut y);
    }
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array};

    #[test]
    fn test_single_term_shape() {
        let x = array![[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let t = single_term(x.view());
        assert_eq!(t.dim(), (3, 2, 1));
        assert_eq!(t[[2, 1, 0]], 6.0);
    }

    #[test]
    fn test_concat_preserves_order() {
        let a = Array::from_elem((2, 3, 1), 1.0f32);
        let b = Array::from_elem((2, 3, 2), 2.0f32);
        let c = Array::from_elem((2, 3, 1), 3.0f32);
        let out = concat_terms(&[a.view(), b.view(), c.view()]).unwrap();
        assert_eq!(out.dim(), (2, 3, 4));
        assert_eq!(out[[0, 0, 0]], 1.0);
        assert_eq!(out[[1, 2, 1]], 2.0);
        assert_eq!(out[[1, 2, 2]], 2.0);
        assert_eq!(out[[0, 1, 3]], 3.0);
    }

    #[test]
    fn test_concat_rejects_mismatched_cells() {
        let a = Array3::<f32>::zeros((2, 3, 1));
        let b = Array3::<f32>::zeros((4, 3, 1));
        let err = concat_terms(&[a.view(), b.view()]).unwrap_err();
        assert!(matches!(err, TensorError::ShapeMismatch { op: "concat_terms", .. }));
    }

    #[test]
    fn test_concat_empty() {
        assert_eq!(
            concat_terms(&[]).unwrap_err(),
            TensorError::Empty { op: "concat_terms" }
        );
    }

    #[test]
    fn test_contract_matches_explicit_sum() {
        let x = Array::from_shape_fn((3, 2, 4), |(n, i, k)| (n + 2 * i + 3 * k) as f32 * 0.5);
        let w = Array::from_shape_fn((2, 5, 4), |(i, o, k)| (i as f32 - o as f32) + k as f32 * 0.25);
        let y = contract_terms(x.view(), w.view()).unwrap();
        assert_eq!(y.dim(), (3, 5));

        for n in 0..3 {
            for o in 0..5 {
                let mut expected = 0.0f32;
                for i in 0..2 {
                    for k in 0..4 {
                        expected += x[[n, i, k]] * w[[i, o, k]];
                    }
                }
                approx::assert_abs_diff_eq!(y[[n, o]], expected, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_contract_rejects_term_mismatch() {
        let x = Array3::<f32>::zeros((3, 2, 4));
        let w = Array3::<f32>::zeros((2, 5, 3));
        assert!(contract_terms(x.view(), w.view()).is_err());
    }

    #[test]
    fn test_contract_rejects_channel_mismatch() {
        let x = Array3::<f32>::zeros((3, 2, 4));
        let w = Array3::<f32>::zeros((3, 5, 4));
        assert!(contract_terms(x.view(), w.view()).is_err());
    }
}
