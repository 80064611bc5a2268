// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor arithmetic operations.
//!
//! Each operation validates its operand shapes up front and reports
//! mismatches as [`crate::TensorError`] instead of letting `ndarray` panic.

mod activation_op;
mod matmul_op;
mod scale_op;
mod terms_op;

pub use activation_op::{relu, sigmoid};
pub use matmul_op::matmul;
pub use scale_op::{reciprocal_or_zero, scale_rows, zero_non_finite};
pub use terms_op::{concat_terms, contract_terms, single_term};
