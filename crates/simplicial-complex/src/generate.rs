// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Synthetic complexes.
//!
//! [`random_clique_complex`] draws an Erdős–Rényi graph and fills in every
//! clique up to the requested dimension. Handy for demos and benchmarks
//! where no real mesh is at hand.

use crate::complex::Validated;
use crate::{ComplexError, Simplex, SimplicialComplex, MAX_DIM};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builds the clique complex of a seeded random graph.
///
/// Each of the `n(n-1)/2` possible edges is kept with probability
/// `edge_probability`. Every clique of `k + 1` nodes with `k <= max_dim`
/// becomes a `k`-simplex.
///
/// # Errors
/// - [`ComplexError::InvalidComplex`] if `edge_probability` is outside `[0, 1]`
///   or `num_nodes == 0`.
/// - [`ComplexError::DimensionOutOfRange`] if `max_dim` is 0 or above
///   [`MAX_DIM`].
pub fn random_clique_complex(
    name: impl Into<String>,
    num_nodes: usize,
    edge_probability: f64,
    max_dim: usize,
    seed: u64,
) -> Result<SimplicialComplex<Validated>, ComplexError> {
    if !(0.0..=1.0).contains(&edge_probability) {
        return Err(ComplexError::InvalidComplex(format!(
            "edge probability must lie in [0, 1], got {edge_probability}"
        )));
    }
    if max_dim == 0 || max_dim > MAX_DIM {
        return Err(ComplexError::DimensionOutOfRange {
            dim: max_dim,
            min: 1,
            max: MAX_DIM,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut adjacency = vec![vec![false; num_nodes]; num_nodes];
    for i in 0..num_nodes {
        for j in (i + 1)..num_nodes {
            if rng.gen_bool(edge_probability) {
                adjacency[i][j] = true;
                adjacency[j][i] = true;
            }
        }
    }

    let mut simplices = Vec::new();
    let mut clique = Vec::with_capacity(max_dim + 1);
    for v in 0..num_nodes {
        clique.push(v);
        extend_cliques(&adjacency, &mut clique, max_dim, &mut simplices);
        clique.pop();
    }

    tracing::debug!(
        "random clique complex: {num_nodes} nodes, p={edge_probability}, {} simplices",
        simplices.len()
    );
    SimplicialComplex::new(name, num_nodes, simplices).validate()
}

/// Depth-first enumeration of cliques in ascending vertex order.
fn extend_cliques(
    adjacency: &[Vec<bool>],
    clique: &mut Vec<usize>,
    max_dim: usize,
    out: &mut Vec<Simplex>,
) {
    if clique.len() > max_dim {
        return;
    }
    let last = clique[clique.len() - 1];
    for next in (last + 1)..adjacency.len() {
        if clique.iter().all(|&v| adjacency[v][next]) {
            clique.push(next);
            out.push(Simplex::new(clique.clone()));
            extend_cliques(adjacency, clique, max_dim, out);
            clique.pop();
        }
    }
}
