// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Simplicial complex convolution across nodes, edges and triangles (SCCNN).
//!
//! Every output order mixes its own signal with the signals of the adjacent
//! orders, lifted or projected through the incidence matrices. With
//! `K = conv_order`, `id(Y)` a single term and `cheb(L, Y)` the `K` hops of
//! [`chebyshev_conv`], the stacked terms are:
//!
//! ```text
//! nodes      [id(x0) | cheb(L0, x0) | id(B1 x1) | cheb(L0, B1 x1)]                   2(1+K)
//! edges      [id(B1ᵀx0) | cheb(L1d, B1ᵀx0) | id(x1) | cheb(L1d, x1) | cheb(L1u, x1)
//!             | id(B2 x2) | cheb(L1u, B2 x2)]                                         3+4K
//! triangles  sc_order = 2: [id(x2) | cheb(L2, x2) | id(B2ᵀx1) | cheb(L2, B2ᵀx1)]    2(1+K)
//!            sc_order > 2: [id(x2) | cheb(L2d, x2) | cheb(L2u, x2)
//!                           | id(B2ᵀx1) | cheb(L2d, B2ᵀx1)]                           2+3K
//! ```
//!
//! This ordering must match the trailing axis of the weights; see
//! [`term_counts`].

use crate::chebyshev::chebyshev_conv;
use crate::{ForwardMetrics, LayerError, LayerOptions, Parameterized};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, ArrayViewMut3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use simplicial_complex::{ComplexOperators, Rank};
use std::time::Instant;
use tensor_core::{concat_terms, contract_terms, single_term, LinearOperator, TensorError};

const WEIGHT_NAMES: [&str; 3] = ["weight_0", "weight_1", "weight_2"];

/// Number of stacked terms for nodes, edges and triangles.
pub fn term_counts(conv_order: usize, sc_order: usize) -> [usize; 3] {
    let k = conv_order;
    let triangles = if sc_order > 2 { 2 + 3 * k } else { 2 * (1 + k) };
    [2 * (1 + k), 3 + 4 * k, triangles]
}

/// The Laplacians a forward pass consumes.
///
/// Which variant applies depends on the layer's `sc_order`: when triangles
/// are the top cells their Laplacian has no upper part.
#[derive(Debug, Clone, Copy)]
pub enum SccnnLaplacians<'a> {
    /// `sc_order == 2`.
    Order2 {
        l0: &'a dyn LinearOperator,
        l1_down: &'a dyn LinearOperator,
        l1_up: &'a dyn LinearOperator,
        l2: &'a dyn LinearOperator,
    },
    /// `sc_order > 2`.
    Higher {
        l0: &'a dyn LinearOperator,
        l1_down: &'a dyn LinearOperator,
        l1_up: &'a dyn LinearOperator,
        l2_down: &'a dyn LinearOperator,
        l2_up: &'a dyn LinearOperator,
    },
}

impl<'a> SccnnLaplacians<'a> {
    /// Borrows the Laplacians of an operator bundle.
    pub fn from_operators(ops: &'a ComplexOperators) -> Self {
        match &ops.laplacian_up_2 {
            Some(l2_up) => Self::Higher {
                l0: &ops.laplacian_0,
                l1_down: &ops.laplacian_down_1,
                l1_up: &ops.laplacian_up_1,
                l2_down: &ops.laplacian_down_2,
                l2_up,
            },
            None => Self::Order2 {
                l0: &ops.laplacian_0,
                l1_down: &ops.laplacian_down_1,
                l1_up: &ops.laplacian_up_1,
                l2: &ops.laplacian_down_2,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Order2 { .. } => "order-2",
            Self::Higher { .. } => "higher-order",
        }
    }

    fn node_and_edge(&self) -> (&'a dyn LinearOperator, &'a dyn LinearOperator, &'a dyn LinearOperator) {
        match *self {
            Self::Order2 { l0, l1_down, l1_up, .. } | Self::Higher { l0, l1_down, l1_up, .. } => {
                (l0, l1_down, l1_up)
            }
        }
    }
}

/// Node-to-edge and edge-to-triangle incidence matrices.
#[derive(Debug, Clone, Copy)]
pub struct SccnnIncidences<'a> {
    /// `B1`, `(nodes, edges)`.
    pub b1: &'a dyn LinearOperator,
    /// `B2`, `(edges, triangles)`.
    pub b2: &'a dyn LinearOperator,
}

impl<'a> SccnnIncidences<'a> {
    /// Borrows the incidences of an operator bundle.
    pub fn from_operators(ops: &'a ComplexOperators) -> Self {
        Self {
            b1: &ops.incidence_1,
            b2: &ops.incidence_2,
        }
    }
}

/// Outputs on nodes, edges and triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct SccnnOutput {
    pub y0: Array2<f32>,
    pub y1: Array2<f32>,
    pub y2: Array2<f32>,
}

impl SccnnOutput {
    /// Output shapes in node, edge, triangle order.
    pub fn shapes(&self) -> [(usize, usize); 3] {
        [self.y0.dim(), self.y1.dim(), self.y2.dim()]
    }

    /// Unpacks into `(y0, y1, y2)`.
    pub fn into_tuple(self) -> (Array2<f32>, Array2<f32>, Array2<f32>) {
        (self.y0, self.y1, self.y2)
    }
}

/// A simplicial complex convolutional layer over nodes, edges and triangles.
///
/// # Example
/// ```
/// use ndarray::Array2;
/// use simplicial_complex::generate::random_clique_complex;
/// use simplicial_nn::{LayerOptions, SccnnIncidences, SccnnLaplacians, SccnnLayer};
///
/// let complex = random_clique_complex("demo", 8, 0.6, 2, 1).unwrap();
/// let ops = complex.operators(2).unwrap();
/// let [n0, n1, n2] = ops.cell_counts();
///
/// let layer = SccnnLayer::new([3, 3, 3], [4, 4, 4], 2, 2, LayerOptions::default()).unwrap();
/// let out = layer
///     .forward(
///         [
///             Array2::ones((n0, 3)).view(),
///             Array2::ones((n1, 3)).view(),
///             Array2::ones((n2, 3)).view(),
///         ],
///         &SccnnLaplacians::from_operators(&ops),
///         &SccnnIncidences::from_operators(&ops),
///     )
///     .unwrap();
/// assert_eq!(out.shapes(), [(n0, 4), (n1, 4), (n2, 4)]);
/// ```
#[derive(Debug, Clone)]
pub struct SccnnLayer {
    in_channels: [usize; 3],
    out_channels: [usize; 3],
    conv_order: usize,
    sc_order: usize,
    options: LayerOptions,
    weights: [Array3<f32>; 3],
}

impl SccnnLayer {
    /// Creates and initialises the layer.
    ///
    /// # Errors
    /// - [`LayerError::InvalidConvOrder`] if `conv_order == 0`.
    /// - [`LayerError::InvalidScOrder`] if `sc_order < 2`.
    /// - [`LayerError::Config`] if any channel width is zero.
    pub fn new(
        in_channels: [usize; 3],
        out_channels: [usize; 3],
        conv_order: usize,
        sc_order: usize,
        options: LayerOptions,
    ) -> Result<Self, LayerError> {
        if conv_order == 0 {
            return Err(LayerError::InvalidConvOrder(conv_order));
        }
        if sc_order < 2 {
            return Err(LayerError::InvalidScOrder(sc_order));
        }
        if in_channels.contains(&0) || out_channels.contains(&0) {
            return Err(LayerError::Config(format!(
                "channel widths must be positive, got {in_channels:?} -> {out_channels:?}"
            )));
        }

        let terms = term_counts(conv_order, sc_order);
        let weights = [0, 1, 2].map(|i| Array3::zeros((in_channels[i], out_channels[i], terms[i])));
        let mut layer = Self {
            in_channels,
            out_channels,
            conv_order,
            sc_order,
            options,
            weights,
        };
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        layer.reset_parameters(&mut rng)?;

        tracing::info!(
            "SCCNN layer {in_channels:?} -> {out_channels:?}: conv_order {conv_order}, sc_order {sc_order}, terms {terms:?}, {} weights, update {}",
            options.initialization,
            options.update,
        );
        if options.aggr_norm {
            tracing::debug!("aggregation normalization enabled");
        }
        Ok(layer)
    }

    /// Number of Chebyshev hops per operator.
    pub fn conv_order(&self) -> usize {
        self.conv_order
    }

    /// Highest simplex order the layer was built for.
    pub fn sc_order(&self) -> usize {
        self.sc_order
    }

    pub fn in_channels(&self) -> [usize; 3] {
        self.in_channels
    }

    pub fn out_channels(&self) -> [usize; 3] {
        self.out_channels
    }

    /// Construction options.
    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    /// Stacked term counts for nodes, edges and triangles.
    pub fn term_counts(&self) -> [usize; 3] {
        term_counts(self.conv_order, self.sc_order)
    }

    /// The weight for output order `rank`, or `None` for tetrahedra.
    pub fn weight(&self, rank: Rank) -> Option<ArrayView3<'_, f32>> {
        self.weights.get(rank.dim()).map(|w| w.view())
    }

    /// Runs the layer.
    ///
    /// `x` holds the node, edge and triangle signals, each
    /// `(cells, in_channels[i])`.
    ///
    /// # Errors
    /// - [`LayerError::LaplacianArity`] if `laplacians` is the wrong variant
    ///   for this layer's `sc_order`.
    /// - [`LayerError::Forward`] for any shape disagreement, tagged with the
    ///   output order being computed.
    pub fn forward(
        &self,
        x: [ArrayView2<'_, f32>; 3],
        laplacians: &SccnnLaplacians<'_>,
        incidences: &SccnnIncidences<'_>,
    ) -> Result<SccnnOutput, LayerError> {
        self.forward_with_metrics(x, laplacians, incidences)
            .map(|(out, _)| out)
    }

    /// Runs the layer and reports per-order timings.
    pub fn forward_with_metrics(
        &self,
        x: [ArrayView2<'_, f32>; 3],
        laplacians: &SccnnLaplacians<'_>,
        incidences: &SccnnIncidences<'_>,
    ) -> Result<(SccnnOutput, ForwardMetrics), LayerError> {
        self.check_arity(laplacians)?;
        let [x0, x1, x2] = x;
        let terms = self.term_counts();
        let mut metrics = ForwardMetrics::new();
        let start = Instant::now();

        let t = Instant::now();
        let y0 = self
            .node_terms(x0, x1, laplacians, incidences)
            .and_then(|s| self.contract(0, s.view()))
            .map_err(LayerError::forward(Rank::Node))?;
        metrics.record_order(Rank::Node, terms[0], y0.dim(), t.elapsed());

        let t = Instant::now();
        let y1 = self
            .edge_terms(x0, x1, x2, laplacians, incidences)
            .and_then(|s| self.contract(1, s.view()))
            .map_err(LayerError::forward(Rank::Edge))?;
        metrics.record_order(Rank::Edge, terms[1], y1.dim(), t.elapsed());

        let t = Instant::now();
        let y2 = self
            .triangle_terms(x1, x2, laplacians, incidences)
            .and_then(|s| self.contract(2, s.view()))
            .map_err(LayerError::forward(Rank::Triangle))?;
        metrics.record_order(Rank::Triangle, terms[2], y2.dim(), t.elapsed());

        metrics.finalise(start.elapsed());
        tracing::debug!("{}", metrics.summary());
        Ok((SccnnOutput { y0, y1, y2 }, metrics))
    }

    fn check_arity(&self, laplacians: &SccnnLaplacians<'_>) -> Result<(), LayerError> {
        let matches = match laplacians {
            SccnnLaplacians::Order2 { .. } => self.sc_order == 2,
            SccnnLaplacians::Higher { .. } => self.sc_order > 2,
        };
        if matches {
            Ok(())
        } else {
            Err(LayerError::LaplacianArity {
                sc_order: self.sc_order,
                given: laplacians.kind(),
            })
        }
    }

    fn cheb(&self, op: &dyn LinearOperator, x: ArrayView2<'_, f32>) -> Result<Array3<f32>, TensorError> {
        chebyshev_conv(op, x, self.conv_order, self.options.aggr_norm)
    }

    fn contract(&self, order: usize, stacked: ArrayView3<'_, f32>) -> Result<Array2<f32>, TensorError> {
        let mut y = contract_terms(stacked, self.weights[order].view())?;
        self.options.update.apply(&mut y);
        Ok(y)
    }

    fn node_terms(
        &self,
        x0: ArrayView2<'_, f32>,
        x1: ArrayView2<'_, f32>,
        laplacians: &SccnnLaplacians<'_>,
        incidences: &SccnnIncidences<'_>,
    ) -> Result<Array3<f32>, TensorError> {
        let (l0, _, _) = laplacians.node_and_edge();
        let x0_hops = self.cheb(l0, x0)?;
        let x1_to_0 = incidences.b1.apply(x1)?;
        let x1_to_0_hops = self.cheb(l0, x1_to_0.view())?;
        concat_terms(&[
            single_term(x0.view()),
            x0_hops.view(),
            single_term(x1_to_0.view()),
            x1_to_0_hops.view(),
        ])
    }

    fn edge_terms(
        &self,
        x0: ArrayView2<'_, f32>,
        x1: ArrayView2<'_, f32>,
        x2: ArrayView2<'_, f32>,
        laplacians: &SccnnLaplacians<'_>,
        incidences: &SccnnIncidences<'_>,
    ) -> Result<Array3<f32>, TensorError> {
        let (_, l1_down, l1_up) = laplacians.node_and_edge();
        let x0_to_1 = incidences.b1.apply_transpose(x0)?;
        let x0_to_1_hops = self.cheb(l1_down, x0_to_1.view())?;
        let x1_down = self.cheb(l1_down, x1)?;
        let x1_up = self.cheb(l1_up, x1)?;
        let x2_to_1 = incidences.b2.apply(x2)?;
        let x2_to_1_hops = self.cheb(l1_up, x2_to_1.view())?;
        concat_terms(&[
            single_term(x0_to_1.view()),
            x0_to_1_hops.view(),
            single_term(x1.view()),
            x1_down.view(),
            x1_up.view(),
            single_term(x2_to_1.view()),
            x2_to_1_hops.view(),
        ])
    }

    fn triangle_terms(
        &self,
        x1: ArrayView2<'_, f32>,
        x2: ArrayView2<'_, f32>,
        laplacians: &SccnnLaplacians<'_>,
        incidences: &SccnnIncidences<'_>,
    ) -> Result<Array3<f32>, TensorError> {
        let x1_to_2 = incidences.b2.apply_transpose(x1)?;
        match *laplacians {
            SccnnLaplacians::Order2 { l2, .. } => {
                let x2_hops = self.cheb(l2, x2)?;
                let x1_to_2_hops = self.cheb(l2, x1_to_2.view())?;
                concat_terms(&[
                    single_term(x2.view()),
                    x2_hops.view(),
                    single_term(x1_to_2.view()),
                    x1_to_2_hops.view(),
                ])
            }
            SccnnLaplacians::Higher { l2_down, l2_up, .. } => {
                let x2_down = self.cheb(l2_down, x2)?;
                let x2_up = self.cheb(l2_up, x2)?;
                let x1_to_2_hops = self.cheb(l2_down, x1_to_2.view())?;
                concat_terms(&[
                    single_term(x2.view()),
                    x2_down.view(),
                    x2_up.view(),
                    single_term(x1_to_2.view()),
                    x1_to_2_hops.view(),
                ])
            }
        }
    }
}

impl Parameterized for SccnnLayer {
    fn parameters(&self) -> Vec<(&'static str, ArrayView3<'_, f32>)> {
        WEIGHT_NAMES
            .iter()
            .zip(self.weights.iter())
            .map(|(&name, w)| (name, w.view()))
            .collect()
    }

    fn parameters_mut(&mut self) -> Vec<(&'static str, ArrayViewMut3<'_, f32>)> {
        WEIGHT_NAMES
            .iter()
            .zip(self.weights.iter_mut())
            .map(|(&name, w)| (name, w.view_mut()))
            .collect()
    }

    fn reset_parameters(&mut self, rng: &mut dyn RngCore) -> Result<(), LayerError> {
        let init = self.options.initialization;
        let gain = self.options.gain;
        for w in &mut self.weights {
            init.fill(w, gain, &mut *rng)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Initialization, UpdateFunction};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, s, Array};

    fn seeded(seed: u64) -> LayerOptions {
        LayerOptions {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// A filled triangle `[0, 1, 2]`: 3 nodes, 3 edges, 1 triangle.
    struct Triangle {
        l0: Array2<f32>,
        l1_down: Array2<f32>,
        l1_up: Array2<f32>,
        l2: Array2<f32>,
        b1: Array2<f32>,
        b2: Array2<f32>,
    }

    fn triangle() -> Triangle {
        // edges [1,2], [0,2], [0,1]
        let b1 = array![[0.0f32, -1.0, -1.0], [-1.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
        let b2 = array![[1.0f32], [-1.0], [1.0]];
        Triangle {
            l0: b1.dot(&b1.t()),
            l1_down: b1.t().dot(&b1),
            l1_up: b2.dot(&b2.t()),
            l2: b2.t().dot(&b2),
            b1,
            b2,
        }
    }

    impl Triangle {
        fn laplacians(&self) -> SccnnLaplacians<'_> {
            SccnnLaplacians::Order2 {
                l0: &self.l0,
                l1_down: &self.l1_down,
                l1_up: &self.l1_up,
                l2: &self.l2,
            }
        }

        fn incidences(&self) -> SccnnIncidences<'_> {
            SccnnIncidences {
                b1: &self.b1,
                b2: &self.b2,
            }
        }
    }

    #[test]
    fn test_term_counts() {
        assert_eq!(term_counts(1, 2), [4, 7, 4]);
        assert_eq!(term_counts(3, 2), [8, 15, 8]);
        assert_eq!(term_counts(3, 3), [8, 15, 11]);
    }

    #[test]
    fn test_weight_shapes() {
        let layer = SccnnLayer::new([2, 3, 4], [5, 6, 7], 2, 3, seeded(0)).unwrap();
        assert_eq!(layer.weight(Rank::Node).unwrap().dim(), (2, 5, 6));
        assert_eq!(layer.weight(Rank::Edge).unwrap().dim(), (3, 6, 11));
        assert_eq!(layer.weight(Rank::Triangle).unwrap().dim(), (4, 7, 8));
        assert!(layer.weight(Rank::Tetrahedron).is_none());
        assert_eq!(layer.num_parameters(), 2 * 5 * 6 + 3 * 6 * 11 + 4 * 7 * 8);

        let names: Vec<_> = layer.parameters().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["weight_0", "weight_1", "weight_2"]);
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            SccnnLayer::new([1, 1, 1], [1, 1, 1], 0, 2, seeded(0)),
            Err(LayerError::InvalidConvOrder(0))
        ));
        assert!(matches!(
            SccnnLayer::new([1, 1, 1], [1, 1, 1], 1, 1, seeded(0)),
            Err(LayerError::InvalidScOrder(1))
        ));
        assert!(matches!(
            SccnnLayer::new([1, 0, 1], [1, 1, 1], 1, 2, seeded(0)),
            Err(LayerError::Config(_))
        ));
        let negative_gain = LayerOptions {
            gain: -1.0,
            initialization: Initialization::XavierUniform,
            ..seeded(0)
        };
        assert!(matches!(
            SccnnLayer::new([1, 1, 1], [1, 1, 1], 1, 2, negative_gain),
            Err(LayerError::Config(_))
        ));
    }

    #[test]
    fn test_forward_shapes() {
        let t = triangle();
        let layer = SccnnLayer::new([2, 2, 2], [3, 4, 5], 2, 2, seeded(1)).unwrap();
        let x0 = Array::from_elem((3, 2), 0.5f32);
        let x1 = Array::from_elem((3, 2), -0.5f32);
        let x2 = Array::from_elem((1, 2), 1.0f32);
        let out = layer
            .forward([x0.view(), x1.view(), x2.view()], &t.laplacians(), &t.incidences())
            .unwrap();
        assert_eq!(out.shapes(), [(3, 3), (3, 4), (1, 5)]);
    }

    #[test]
    fn test_node_output_matches_manual_composition() {
        let t = triangle();
        let mut layer = SccnnLayer::new([1, 1, 1], [1, 1, 1], 1, 2, seeded(2)).unwrap();
        // node terms: [x0, L0 x0, B1 x1, L0 B1 x1]
        let coeffs = [1.0f32, 2.0, 3.0, 4.0];
        {
            let mut params = layer.parameters_mut();
            let w0 = &mut params[0].1;
            for (k, c) in coeffs.iter().enumerate() {
                w0[[0, 0, k]] = *c;
            }
        }

        let x0 = array![[1.0f32], [2.0], [-1.0]];
        let x1 = array![[0.5f32], [0.0], [1.0]];
        let x2 = array![[2.0f32]];
        let out = layer
            .forward([x0.view(), x1.view(), x2.view()], &t.laplacians(), &t.incidences())
            .unwrap();

        let b1x1 = t.b1.dot(&x1);
        let expected = &x0 * coeffs[0]
            + &(t.l0.dot(&x0) * coeffs[1])
            + &(&b1x1 * coeffs[2])
            + &(t.l0.dot(&b1x1) * coeffs[3]);
        for (a, b) in out.y0.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
        }
    }

    /// Zeroes the `order` weight except for a unit entry at term `k`.
    fn select_term(layer: &mut SccnnLayer, order: usize, k: usize) {
        let mut params = layer.parameters_mut();
        params[order].1.fill(0.0);
        params[order].1[[0, 0, k]] = 1.0;
    }

    /// Runs `layer` once per term of `order` with only that term selected and
    /// checks each output against `expected[k]`.
    fn assert_term_layout(
        layer: &mut SccnnLayer,
        order: usize,
        laplacians: &SccnnLaplacians<'_>,
        incidences: &SccnnIncidences<'_>,
        x: [&Array2<f32>; 3],
        expected: &[Array2<f32>],
    ) {
        assert_eq!(layer.term_counts()[order], expected.len());
        for (i, a) in expected.iter().enumerate() {
            for b in &expected[i + 1..] {
                assert_ne!(a, b, "fixture terms must be distinct");
            }
        }
        for (k, term) in expected.iter().enumerate() {
            select_term(layer, order, k);
            let out = layer
                .forward([x[0].view(), x[1].view(), x[2].view()], laplacians, incidences)
                .unwrap();
            let y = [&out.y0, &out.y1, &out.y2][order];
            assert_eq!(y.dim(), term.dim());
            for (a, b) in y.iter().zip(term.iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
            }
        }
    }

    fn term_inputs() -> (Array2<f32>, Array2<f32>, Array2<f32>) {
        (
            array![[1.0f32], [2.0], [-1.0]],
            array![[0.5f32], [0.0], [1.0]],
            array![[2.0f32]],
        )
    }

    #[test]
    fn test_edge_term_order() {
        let t = triangle();
        let (x0, x1, x2) = term_inputs();
        let mut layer = SccnnLayer::new([1, 1, 1], [1, 1, 1], 1, 2, seeded(3)).unwrap();

        let b1t_x0 = t.b1.t().dot(&x0);
        let b2_x2 = t.b2.dot(&x2);
        let expected = [
            b1t_x0.clone(),
            t.l1_down.dot(&b1t_x0),
            x1.clone(),
            t.l1_down.dot(&x1),
            t.l1_up.dot(&x1),
            b2_x2.clone(),
            t.l1_up.dot(&b2_x2),
        ];
        assert_term_layout(
            &mut layer,
            1,
            &t.laplacians(),
            &t.incidences(),
            [&x0, &x1, &x2],
            &expected,
        );
    }

    #[test]
    fn test_triangle_term_order() {
        let t = triangle();
        let (x0, x1, x2) = term_inputs();
        let mut layer = SccnnLayer::new([1, 1, 1], [1, 1, 1], 1, 2, seeded(4)).unwrap();

        let b2t_x1 = t.b2.t().dot(&x1);
        let expected = [
            x2.clone(),
            t.l2.dot(&x2),
            b2t_x1.clone(),
            t.l2.dot(&b2t_x1),
        ];
        assert_term_layout(
            &mut layer,
            2,
            &t.laplacians(),
            &t.incidences(),
            [&x0, &x1, &x2],
            &expected,
        );
    }

    #[test]
    fn test_higher_order_triangle_term_order() {
        let t = triangle();
        let (x0, x1, x2) = term_inputs();
        let l2_up = array![[0.5f32]];
        let laplacians = SccnnLaplacians::Higher {
            l0: &t.l0,
            l1_down: &t.l1_down,
            l1_up: &t.l1_up,
            l2_down: &t.l2,
            l2_up: &l2_up,
        };
        let mut layer = SccnnLayer::new([1, 1, 1], [1, 1, 1], 1, 3, seeded(5)).unwrap();

        let b2t_x1 = t.b2.t().dot(&x1);
        let expected = [
            x2.clone(),
            t.l2.dot(&x2),
            l2_up.dot(&x2),
            b2t_x1.clone(),
            t.l2.dot(&b2t_x1),
        ];
        assert_term_layout(
            &mut layer,
            2,
            &laplacians,
            &t.incidences(),
            [&x0, &x1, &x2],
            &expected,
        );
    }

    #[test]
    fn test_higher_order_triangle_terms() {
        let t = triangle();
        let l2_up = Array2::<f32>::zeros((1, 1));
        let laplacians = SccnnLaplacians::Higher {
            l0: &t.l0,
            l1_down: &t.l1_down,
            l1_up: &t.l1_up,
            l2_down: &t.l2,
            l2_up: &l2_up,
        };
        let layer = SccnnLayer::new([1, 1, 1], [2, 2, 2], 2, 3, seeded(4)).unwrap();
        let x0 = Array2::<f32>::ones((3, 1));
        let x1 = Array2::<f32>::ones((3, 1));
        let x2 = Array2::<f32>::ones((1, 1));
        let out = layer
            .forward([x0.view(), x1.view(), x2.view()], &laplacians, &t.incidences())
            .unwrap();
        assert_eq!(out.y2.dim(), (1, 2));
        assert_eq!(layer.weight(Rank::Triangle).unwrap().dim(), (1, 2, 8));
    }

    #[test]
    fn test_laplacian_arity_mismatch() {
        let t = triangle();
        let layer = SccnnLayer::new([1, 1, 1], [1, 1, 1], 1, 3, seeded(5)).unwrap();
        let x = Array2::<f32>::ones((3, 1));
        let x2 = Array2::<f32>::ones((1, 1));
        let err = layer
            .forward([x.view(), x.view(), x2.view()], &t.laplacians(), &t.incidences())
            .unwrap_err();
        assert!(matches!(
            err,
            LayerError::LaplacianArity { sc_order: 3, given: "order-2" }
        ));
    }

    #[test]
    fn test_shape_error_names_order() {
        let t = triangle();
        let layer = SccnnLayer::new([1, 1, 1], [1, 1, 1], 1, 2, seeded(6)).unwrap();
        let x0 = Array2::<f32>::ones((3, 1));
        let x1 = Array2::<f32>::ones((3, 1));
        let wrong_x2 = Array2::<f32>::ones((2, 1));
        let err = layer
            .forward([x0.view(), x1.view(), wrong_x2.view()], &t.laplacians(), &t.incidences())
            .unwrap_err();
        assert!(matches!(err, LayerError::Forward { order: Rank::Edge, .. }));
    }

    #[test]
    fn test_sigmoid_and_metrics() {
        let t = triangle();
        let options = LayerOptions {
            update: UpdateFunction::Sigmoid,
            initialization: Initialization::XavierUniform,
            aggr_norm: true,
            ..seeded(7)
        };
        let layer = SccnnLayer::new([2, 2, 2], [2, 2, 2], 3, 2, options).unwrap();
        let x0 = Array::from_shape_fn((3, 2), |(i, j)| i as f32 - j as f32);
        let x1 = Array::from_shape_fn((3, 2), |(i, j)| (i * j) as f32);
        let x2 = Array::from_elem((1, 2), -2.0f32);
        let (out, metrics) = layer
            .forward_with_metrics([x0.view(), x1.view(), x2.view()], &t.laplacians(), &t.incidences())
            .unwrap();
        for y in [&out.y0, &out.y1, &out.y2] {
            assert!(y.iter().all(|&v| v > 0.0 && v < 1.0));
        }
        let terms: Vec<usize> = metrics.orders.iter().map(|o| o.terms).collect();
        assert_eq!(terms, vec![8, 15, 8]);
    }

    #[test]
    fn test_reset_changes_weights_reproducibly() {
        let mut a = SccnnLayer::new([2, 2, 2], [2, 2, 2], 1, 2, seeded(8)).unwrap();
        let mut b = a.clone();
        let before = a.weight(Rank::Edge).unwrap().to_owned();

        a.reset_parameters(&mut StdRng::seed_from_u64(100)).unwrap();
        b.reset_parameters(&mut StdRng::seed_from_u64(100)).unwrap();
        assert_ne!(a.weight(Rank::Edge).unwrap(), before.view());
        assert_eq!(
            a.weight(Rank::Node).unwrap().slice(s![.., .., 0]),
            b.weight(Rank::Node).unwrap().slice(s![.., .., 0])
        );
    }
}
