// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for complex construction and loading.

/// Errors that can occur when building or loading a simplicial complex.
#[derive(Debug, thiserror::Error)]
pub enum ComplexError {
    /// The manifest file could not be read.
    #[error("failed to read complex manifest: {0}")]
    ManifestReadError(#[from] std::io::Error),

    /// The manifest JSON is malformed.
    #[error("failed to parse complex manifest: {0}")]
    ManifestParseError(#[from] serde_json::Error),

    /// A declared simplex is empty, repeats a vertex or references a node
    /// that does not exist.
    #[error("invalid simplex {simplex}: {detail}")]
    InvalidSimplex { simplex: String, detail: String },

    /// A cell dimension outside the supported range was requested.
    #[error("dimension {dim} outside supported range {min}..={max}")]
    DimensionOutOfRange { dim: usize, min: usize, max: usize },

    /// The complex as a whole is unusable.
    #[error("invalid complex: {0}")]
    InvalidComplex(String),

    /// Operator assembly failed in the tensor layer.
    #[error("operator construction failed: {0}")]
    Tensor(#[from] tensor_core::TensorError),
}
