// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The operator bundle consumed by a three-order convolution layer.

use crate::complex::Validated;
use crate::{ComplexError, SimplicialComplex};
use tensor_core::{CsrMatrix, LinearOperator};

/// Laplacians and incidence matrices for nodes, edges and triangles.
///
/// The triangle Laplacian depends on the highest simplex order the layer
/// handles:
/// - `sc_order == 2`: triangles are the top order, so only the lower part
///   exists and `laplacian_down_2` is the full triangle Laplacian;
///   `laplacian_up_2` is `None`.
/// - `sc_order > 2`: both `laplacian_down_2` and `laplacian_up_2` (through
///   tetrahedra) are present.
#[derive(Debug, Clone)]
pub struct ComplexOperators {
    /// Highest simplex order these operators were built for.
    pub sc_order: usize,
    /// Graph Laplacian `B1 B1ᵀ`, `(nodes, nodes)`.
    pub laplacian_0: CsrMatrix,
    /// Lower edge Laplacian `B1ᵀ B1`, `(edges, edges)`.
    pub laplacian_down_1: CsrMatrix,
    /// Upper edge Laplacian `B2 B2ᵀ`, `(edges, edges)`.
    pub laplacian_up_1: CsrMatrix,
    /// Lower triangle Laplacian `B2ᵀ B2`, `(triangles, triangles)`.
    pub laplacian_down_2: CsrMatrix,
    /// Upper triangle Laplacian `B3 B3ᵀ`; present only when `sc_order > 2`.
    pub laplacian_up_2: Option<CsrMatrix>,
    /// Node-to-edge incidence `B1`, `(nodes, edges)`.
    pub incidence_1: CsrMatrix,
    /// Edge-to-triangle incidence `B2`, `(edges, triangles)`.
    pub incidence_2: CsrMatrix,
}

impl ComplexOperators {
    /// Assembles the operators of `complex` for a layer with the given
    /// `sc_order`.
    ///
    /// # Errors
    /// Returns [`ComplexError::InvalidComplex`] if `sc_order < 2`.
    pub fn build(
        complex: &SimplicialComplex<Validated>,
        sc_order: usize,
    ) -> Result<Self, ComplexError> {
        if sc_order < 2 {
            return Err(ComplexError::InvalidComplex(format!(
                "sc_order must be at least 2, got {sc_order}"
            )));
        }

        let incidence_1 = complex.incidence(1)?;
        let incidence_2 = complex.incidence(2)?;
        let laplacian_up_2 = if sc_order > 2 {
            Some(complex.laplacian_up(2)?)
        } else {
            None
        };

        let ops = Self {
            sc_order,
            laplacian_0: complex.laplacian_up(0)?,
            laplacian_down_1: complex.laplacian_down(1)?,
            laplacian_up_1: complex.laplacian_up(1)?,
            laplacian_down_2: complex.laplacian_down(2)?,
            laplacian_up_2,
            incidence_1,
            incidence_2,
        };
        tracing::debug!(
            "operators for '{}' (sc_order {sc_order}): {} stored entries",
            complex.name,
            ops.total_nnz(),
        );
        Ok(ops)
    }

    /// Returns `(nodes, edges, triangles)`.
    pub fn cell_counts(&self) -> [usize; 3] {
        let (nodes, edges) = self.incidence_1.shape();
        let (_, triangles) = self.incidence_2.shape();
        [nodes, edges, triangles]
    }

    /// Total number of stored entries across all operators.
    pub fn total_nnz(&self) -> usize {
        self.named().iter().map(|(_, op)| op.nnz()).sum()
    }

    /// Returns every operator with a display name, in forward-argument order.
    pub fn named(&self) -> Vec<(&'static str, &CsrMatrix)> {
        let mut out = vec![
            ("laplacian_0", &self.laplacian_0),
            ("laplacian_down_1", &self.laplacian_down_1),
            ("laplacian_up_1", &self.laplacian_up_1),
            ("laplacian_down_2", &self.laplacian_down_2),
        ];
        if let Some(up) = &self.laplacian_up_2 {
            out.push(("laplacian_up_2", up));
        }
        out.push(("incidence_1", &self.incidence_1));
        out.push(("incidence_2", &self.incidence_2));
        out
    }
}

impl SimplicialComplex<Validated> {
    /// Shorthand for [`ComplexOperators::build`].
    pub fn operators(&self, sc_order: usize) -> Result<ComplexOperators, ComplexError> {
        ComplexOperators::build(self, sc_order)
    }
}
