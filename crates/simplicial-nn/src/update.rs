// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pointwise update (nonlinearity) applied to each layer output.

use crate::LayerError;
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

/// The nonlinearity a layer applies after contracting its terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateFunction {
    /// Leave the output unchanged.
    #[default]
    Identity,
    /// Logistic sigmoid.
    Sigmoid,
    /// Rectified linear unit.
    Relu,
}

impl UpdateFunction {
    /// Parses an optional name; `None` selects [`UpdateFunction::Identity`].
    pub fn from_name(name: Option<&str>) -> Result<Self, LayerError> {
        name.map_or(Ok(Self::Identity), |n| n.parse())
    }

    /// Returns the configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "none",
            Self::Sigmoid => "sigmoid",
            Self::Relu => "relu",
        }
    }

    /// Applies the function in place.
    pub fn apply(self, x: &mut Array2<f32>) {
        match self {
            Self::Identity => {}
            Self::Sigmoid => tensor_core::sigmoid(x),
            Self::Relu => tensor_core::relu(x),
        }
    }
}

impl FromStr for UpdateFunction {
    type Err = LayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "identity" => Ok(Self::Identity),
            "sigmoid" => Ok(Self::Sigmoid),
            "relu" => Ok(Self::Relu),
            other => Err(LayerError::UnknownUpdateFunction(other.to_string())),
        }
    }
}

impl fmt::Display for UpdateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
