// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Chebyshev-style polynomial convolution.
//!
//! For an operator `M` and a signal `X`, the hops are
//!
//! ```text
//! hop[0] = M · X
//! hop[k] = M · hop[k-1]      k = 1..order-1
//! ```
//!
//! stacked along a trailing term axis. With aggregation normalization each
//! hop is divided row-wise by that row's neighborhood size (the row sum of
//! `M`) before it feeds the next multiplication.

use ndarray::{s, Array1, Array3, ArrayView2};
use tensor_core::{reciprocal_or_zero, scale_rows, zero_non_finite, LinearOperator, TensorError};

/// Computes `order` hops of `op` applied to `x`, shape
/// `(x.nrows(), x.ncols(), order)`.
///
/// An `order` of zero yields an empty term axis.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if `op` is not square or does not
/// match the number of rows of `x`.
pub fn chebyshev_conv(
    op: &dyn LinearOperator,
    x: ArrayView2<'_, f32>,
    order: usize,
    aggr_norm: bool,
) -> Result<Array3<f32>, TensorError> {
    let (rows, cols) = op.shape();
    if rows != cols {
        return Err(TensorError::ShapeMismatch {
            op: "chebyshev_conv",
            lhs: vec![rows, cols],
            rhs: x.shape().to_vec(),
        });
    }

    let (cells, channels) = x.dim();
    let mut out = Array3::<f32>::zeros((cells, channels, order));
    if order == 0 {
        return Ok(out);
    }

    let inv_size = if aggr_norm {
        Some(neighborhood_inverse(op))
    } else {
        None
    };

    let mut hop = op.apply(x)?;
    for k in 0..order {
        if k > 0 {
            hop = op.apply(hop.view())?;
        }
        if let Some(inv) = &inv_size {
            hop = scale_rows(hop.view(), inv.view())?;
            let cleared = zero_non_finite(&mut hop);
            if cleared > 0 {
                tracing::debug!("hop {k}: cleared {cleared} non-finite entries");
            }
        }
        out.slice_mut(s![.., .., k]).assign(&hop);
    }
    Ok(out)
}

/// Inverse row sums of `op`, with isolated rows mapped to zero.
fn neighborhood_inverse(op: &dyn LinearOperator) -> Array1<f32> {
    let sizes = op.row_sums();
    let isolated = sizes.iter().filter(|&&v| v == 0.0).count();
    if isolated > 0 && isolated == sizes.len() {
        tracing::warn!(
            "aggregation normalization over an operator whose rows all sum to zero; every hop will vanish"
        );
    } else if isolated > 0 {
        tracing::debug!("aggregation normalization: {isolated} rows with zero neighborhood");
    }
    reciprocal_or_zero(sizes.view())
}
