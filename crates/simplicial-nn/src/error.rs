// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for layer construction and execution.

use simplicial_complex::Rank;

/// Errors that can occur when building or running a convolution layer.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    /// The Chebyshev order of a three-order layer must be positive.
    #[error("conv_order must be positive, got {0}")]
    InvalidConvOrder(usize),

    /// A single-order layer needs at least one positive direction order.
    #[error("conv_order_down ({down}) and conv_order_up ({up}) cannot both be zero")]
    InvalidScnnOrders { down: usize, up: usize },

    /// The highest simplex order must be at least 2.
    #[error("sc_order must be at least 2, got {0}")]
    InvalidScOrder(usize),

    /// The initialization scheme name is not recognised.
    #[error("unknown initialization '{0}'; expected 'xavier_uniform' or 'xavier_normal'")]
    UnknownInitialization(String),

    /// The update function name is not recognised.
    #[error("unknown update function '{0}'; expected 'sigmoid', 'relu' or 'none'")]
    UnknownUpdateFunction(String),

    /// The Laplacian bundle does not match the layer's `sc_order`.
    #[error("layer built for sc_order {sc_order} was given {given} Laplacians")]
    LaplacianArity { sc_order: usize, given: &'static str },

    /// A tensor operation failed while computing one output order.
    #[error("forward pass failed on {order} signals: {source}")]
    Forward {
        order: Rank,
        #[source]
        source: tensor_core::TensorError,
    },

    /// A tensor operation failed in a single-order layer.
    #[error("tensor error: {0}")]
    Tensor(#[from] tensor_core::TensorError),

    /// Operator assembly from a complex failed.
    #[error("complex error: {0}")]
    Complex(#[from] simplicial_complex::ComplexError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl LayerError {
    /// Wraps a tensor error raised while computing `order`.
    pub(crate) fn forward(order: Rank) -> impl FnOnce(tensor_core::TensorError) -> Self {
        move |source| Self::Forward { order, source }
    }
}
