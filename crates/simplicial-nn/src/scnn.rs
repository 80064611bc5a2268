// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Single-order simplicial convolution (SCNN).
//!
//! For a signal `x` on `k`-simplices, the layer stacks
//!
//! ```text
//! [ x | cheb(L_down, x) | cheb(L_up, x) ]
//! ```
//!
//! where either Chebyshev group is omitted when its order is zero, then
//! contracts the stack with a `(in, out, 1 + down + up)` weight.

use crate::chebyshev::chebyshev_conv;
use crate::{LayerError, LayerOptions, Parameterized};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, ArrayViewMut3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tensor_core::{concat_terms, contract_terms, single_term, LinearOperator};

/// A simplicial convolution layer on one simplex order.
#[derive(Debug, Clone)]
pub struct ScnnLayer {
    in_channels: usize,
    out_channels: usize,
    conv_order_down: usize,
    conv_order_up: usize,
    options: LayerOptions,
    weight: Array3<f32>,
}

impl ScnnLayer {
    /// Creates and initialises the layer.
    ///
    /// # Errors
    /// - [`LayerError::InvalidScnnOrders`] if both orders are zero.
    /// - [`LayerError::Config`] if a channel width is zero.
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        conv_order_down: usize,
        conv_order_up: usize,
        options: LayerOptions,
    ) -> Result<Self, LayerError> {
        if conv_order_down == 0 && conv_order_up == 0 {
            return Err(LayerError::InvalidScnnOrders {
                down: conv_order_down,
                up: conv_order_up,
            });
        }
        if in_channels == 0 || out_channels == 0 {
            return Err(LayerError::Config(format!(
                "channel widths must be positive, got {in_channels} -> {out_channels}"
            )));
        }

        let terms = 1 + conv_order_down + conv_order_up;
        let mut layer = Self {
            in_channels,
            out_channels,
            conv_order_down,
            conv_order_up,
            options,
            weight: Array3::zeros((in_channels, out_channels, terms)),
        };
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        layer.reset_parameters(&mut rng)?;

        tracing::info!(
            "SCNN layer {in_channels} -> {out_channels}: {terms} terms (down {conv_order_down}, up {conv_order_up}), {}, update {}",
            options.initialization,
            options.update,
        );
        Ok(layer)
    }

    /// Input width.
    pub fn in_channels(&self) -> usize {
        self.in_channels
    }

    /// Output width.
    pub fn out_channels(&self) -> usize {
        self.out_channels
    }

    /// Number of stacked terms (the weight's trailing axis).
    pub fn num_terms(&self) -> usize {
        1 + self.conv_order_down + self.conv_order_up
    }

    /// Construction options.
    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    /// The `(in, out, terms)` weight.
    pub fn weight(&self) -> ArrayView3<'_, f32> {
        self.weight.view()
    }

    /// Runs the convolution on `x` (`(cells, in_channels)`).
    ///
    /// Both Laplacians must be `(cells, cells)`; an operator whose order is
    /// zero is never applied.
    pub fn forward(
        &self,
        x: ArrayView2<'_, f32>,
        laplacian_down: &dyn LinearOperator,
        laplacian_up: &dyn LinearOperator,
    ) -> Result<Array2<f32>, LayerError> {
        let aggr = self.options.aggr_norm;
        let down = if self.conv_order_down > 0 {
            Some(chebyshev_conv(laplacian_down, x, self.conv_order_down, aggr)?)
        } else {
            None
        };
        let up = if self.conv_order_up > 0 {
            Some(chebyshev_conv(laplacian_up, x, self.conv_order_up, aggr)?)
        } else {
            None
        };

        let mut parts = vec![single_term(x.view())];
        parts.extend(down.iter().map(|t| t.view()));
        parts.extend(up.iter().map(|t| t.view()));

        let stacked = concat_terms(&parts)?;
        let mut y = contract_terms(stacked.view(), self.weight.view())?;
        self.options.update.apply(&mut y);
        Ok(y)
    }
}

impl Parameterized for ScnnLayer {
    fn parameters(&self) -> Vec<(&'static str, ArrayView3<'_, f32>)> {
        vec![("weight", self.weight.view())]
    }

    fn parameters_mut(&mut self) -> Vec<(&'static str, ArrayViewMut3<'_, f32>)> {
        vec![("weight", self.weight.view_mut())]
    }

    fn reset_parameters(&mut self, rng: &mut dyn RngCore) -> Result<(), LayerError> {
        self.options
            .initialization
            .fill(&mut self.weight, self.options.gain, rng)
    }
}
