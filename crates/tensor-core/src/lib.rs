// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Dense and sparse operator primitives for simplicial convolution layers.
//!
//! This crate provides:
//! - [`LinearOperator`] — the seam through which Laplacians and incidence
//!   matrices reach the layers, implemented for dense `ndarray::Array2<f32>`
//!   and for [`CsrMatrix`].
//! - [`CsrMatrix`] — a compressed-sparse-row matrix with sparse·sparse and
//!   sparse·dense products.
//! - Core operations: checked matmul, trailing-axis term concatenation, the
//!   `nik,iok->no` term contraction, row scaling, sigmoid and ReLU.
//!
//! # Conventions
//! - Signals are `(cells, channels)` matrices.
//! - Stacked convolution terms are `(cells, channels, terms)` tensors; the
//!   trailing axis is the term axis.
//! - Shape errors are reported through [`TensorError`] rather than panics.

mod error;
mod operator;
mod ops;
mod sparse;

pub use error::TensorError;
pub use operator::LinearOperator;
pub use ops::{
    concat_terms, contract_terms, matmul, reciprocal_or_zero, relu, scale_rows, sigmoid,
    single_term, zero_non_finite,
};
pub use sparse::CsrMatrix;
