// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Access to a layer's learnable weights.

use crate::LayerError;
use ndarray::{ArrayView3, ArrayViewMut3};
use rand::RngCore;

/// A module that owns learnable weight tensors.
///
/// Forward passes borrow the layer immutably; an external optimizer takes
/// `&mut` access through [`Parameterized::parameters_mut`] between passes.
pub trait Parameterized {
    /// Returns every weight with its name, in a stable order.
    fn parameters(&self) -> Vec<(&'static str, ArrayView3<'_, f32>)>;

    /// Returns mutable views of every weight, in the same order as
    /// [`Parameterized::parameters`].
    fn parameters_mut(&mut self) -> Vec<(&'static str, ArrayViewMut3<'_, f32>)>;

    /// Re-draws every weight from the layer's initialization scheme.
    fn reset_parameters(&mut self, rng: &mut dyn RngCore) -> Result<(), LayerError>;

    /// Total number of scalar weights.
    fn num_parameters(&self) -> usize {
        self.parameters().iter().map(|(_, w)| w.len()).sum()
    }
}
