// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Xavier (Glorot) weight initialization for `(in, out, terms)` tensors.
//!
//! The fans follow the usual convention for 3-D weights, where the trailing
//! axis is the receptive field:
//!
//! ```text
//! fan_in  = d1 · d2
//! fan_out = d0 · d2
//! ```

use crate::LayerError;
use ndarray::Array3;
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use std::fmt;
use std::str::FromStr;

/// Default gain applied on construction and reset.
pub const DEFAULT_GAIN: f32 = 1.414;

/// Weight initialization scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Initialization {
    /// `U(-a, a)` with `a = gain · √(6 / (fan_in + fan_out))`.
    XavierUniform,
    /// `N(0, σ²)` with `σ = gain · √(2 / (fan_in + fan_out))`.
    #[default]
    XavierNormal,
}

impl Initialization {
    /// Returns the configuration name of the scheme.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::XavierUniform => "xavier_uniform",
            Self::XavierNormal => "xavier_normal",
        }
    }

    /// Overwrites every entry of `weight` with a fresh sample.
    ///
    /// # Errors
    /// Returns [`LayerError::Config`] if the weight has an empty axis or
    /// `gain` is not a positive finite number.
    pub fn fill<R: Rng + ?Sized>(
        self,
        weight: &mut Array3<f32>,
        gain: f32,
        rng: &mut R,
    ) -> Result<(), LayerError> {
        if !(gain.is_finite() && gain > 0.0) {
            return Err(LayerError::Config(format!(
                "gain must be positive and finite, got {gain}"
            )));
        }
        let (fan_in, fan_out) = fans(weight.dim());
        if fan_in == 0 || fan_out == 0 {
            return Err(LayerError::Config(format!(
                "cannot initialise weight of shape {:?}",
                weight.shape()
            )));
        }
        match self {
            Self::XavierUniform => {
                let a = xavier_bound(fan_in, fan_out, gain);
                let dist = Uniform::new_inclusive(-a, a);
                weight.iter_mut().for_each(|w| *w = dist.sample(rng));
            }
            Self::XavierNormal => {
                let std = xavier_std(fan_in, fan_out, gain);
                let dist = Normal::new(0.0, std)
                    .map_err(|e| LayerError::Config(format!("invalid normal std {std}: {e}")))?;
                weight.iter_mut().for_each(|w| *w = dist.sample(rng));
            }
        }
        Ok(())
    }
}

impl FromStr for Initialization {
    type Err = LayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xavier_uniform" => Ok(Self::XavierUniform),
            "xavier_normal" => Ok(Self::XavierNormal),
            other => Err(LayerError::UnknownInitialization(other.to_string())),
        }
    }
}

impl fmt::Display for Initialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `(fan_in, fan_out)` for a `(d0, d1, d2)` weight.
pub fn fans((d0, d1, d2): (usize, usize, usize)) -> (usize, usize) {
    (d1 * d2, d0 * d2)
}

/// Half-width of the xavier-uniform interval.
pub fn xavier_bound(fan_in: usize, fan_out: usize, gain: f32) -> f32 {
    gain * (6.0 / (fan_in + fan_out) as f32).sqrt()
}

/// Standard deviation of the xavier-normal distribution.
pub fn xavier_std(fan_in: usize, fan_out: usize, gain: f32) -> f32 {
    gain * (2.0 / (fan_in + fan_out) as f32).sqrt()
}
