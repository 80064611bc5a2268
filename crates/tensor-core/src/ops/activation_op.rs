// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pointwise activations applied in place.

use ndarray::{ArrayBase, DataMut, Dimension};

/// Applies the logistic sigmoid `1 / (1 + e^-x)` element-wise, in place.
///
/// Uses the split form for negative inputs so `e^x` never overflows.
pub fn sigmoid<S, D>(x: &mut ArrayBase<S, D>)
where
    S: DataMut<Elem = f32>,
    D: Dimension,
{
    x.mapv_inplace(sigmoid_scalar);
}

/// Applies the rectified linear unit `max(x, 0)` element-wise, in place.
pub fn relu<S, D>(x: &mut ArrayBase<S, D>)
where
    S: DataMut<Elem = f32>,
    D: Dimension,
{
    x.mapv_inplace(relu_scalar);
}

#[inline(always)]
fn sigmoid_scalar(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

#[inline(always)]
fn relu_scalar(x: f32) -> f32 {
    // NaN passes through.
    if x < 0.0 {
        0.0
    } else {
        x
    }
}
