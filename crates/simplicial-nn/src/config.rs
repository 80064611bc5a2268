// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! in_channels = [5, 5, 5]
//! out_channels = [8, 8, 8]
//! conv_order = 3
//! sc_order = 2
//! aggr_norm = false
//! update_func = "sigmoid"
//! initialization = "xavier_normal"
//! seed = 42
//! ```
//!
//! Names (`update_func`, `initialization`) stay strings in the file and are
//! parsed when the layer is built, so a typo fails at construction rather
//! than at the first forward pass.

use crate::init::DEFAULT_GAIN;
use crate::{Initialization, LayerError, SccnnLayer, ScnnLayer, UpdateFunction};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Typed construction options shared by both layer kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerOptions {
    /// Row-normalise every Chebyshev hop by the operator's row sums.
    pub aggr_norm: bool,
    /// Nonlinearity applied to each output.
    pub update: UpdateFunction,
    /// Weight initialization scheme.
    pub initialization: Initialization,
    /// Gain passed to the initialization scheme.
    pub gain: f32,
    /// Seed for the initialization RNG; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            aggr_norm: false,
            update: UpdateFunction::Identity,
            initialization: Initialization::XavierNormal,
            gain: DEFAULT_GAIN,
            seed: None,
        }
    }
}

/// Configuration for an [`SccnnLayer`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SccnnConfig {
    /// Input widths on nodes, edges and triangles.
    pub in_channels: [usize; 3],
    /// Output widths on nodes, edges and triangles.
    pub out_channels: [usize; 3],
    /// Number of Chebyshev hops per operator.
    pub conv_order: usize,
    /// Highest simplex order of the complex (2 = triangles are the top cells).
    #[serde(default = "default_sc_order")]
    pub sc_order: usize,
    /// Enable aggregation normalization.
    #[serde(default)]
    pub aggr_norm: bool,
    /// `"sigmoid"`, `"relu"` or `"none"`; absent means identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_func: Option<String>,
    /// `"xavier_uniform"` or `"xavier_normal"`.
    #[serde(default = "default_initialization")]
    pub initialization: String,
    /// Initialization gain.
    #[serde(default = "default_gain")]
    pub gain: f32,
    /// Optional RNG seed for reproducible weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Configuration for an [`ScnnLayer`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScnnConfig {
    /// Input width.
    pub in_channels: usize,
    /// Output width.
    pub out_channels: usize,
    /// Hops over the lower Laplacian (0 disables the term group).
    #[serde(default)]
    pub conv_order_down: usize,
    /// Hops over the upper Laplacian (0 disables the term group).
    #[serde(default)]
    pub conv_order_up: usize,
    /// Enable aggregation normalization.
    #[serde(default)]
    pub aggr_norm: bool,
    /// `"sigmoid"`, `"relu"` or `"none"`; absent means identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_func: Option<String>,
    /// `"xavier_uniform"` or `"xavier_normal"`.
    #[serde(default = "default_initialization")]
    pub initialization: String,
    /// Initialization gain.
    #[serde(default = "default_gain")]
    pub gain: f32,
    /// Optional RNG seed for reproducible weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_sc_order() -> usize {
    2
}

fn default_initialization() -> String {
    Initialization::XavierNormal.as_str().to_string()
}

fn default_gain() -> f32 {
    DEFAULT_GAIN
}

impl SccnnConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, LayerError> {
        read_toml(path)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, LayerError> {
        parse_toml(toml_str)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, LayerError> {
        write_toml(self)
    }

    /// Parses the string-valued fields into [`LayerOptions`].
    pub fn options(&self) -> Result<LayerOptions, LayerError> {
        parse_options(
            self.aggr_norm,
            self.update_func.as_deref(),
            &self.initialization,
            self.gain,
            self.seed,
        )
    }

    /// Builds the layer described by this config.
    pub fn build(&self) -> Result<SccnnLayer, LayerError> {
        SccnnLayer::new(
            self.in_channels,
            self.out_channels,
            self.conv_order,
            self.sc_order,
            self.options()?,
        )
    }
}

impl Default for SccnnConfig {
    fn default() -> Self {
        Self {
            in_channels: [5, 5, 5],
            out_channels: [5, 5, 5],
            conv_order: 3,
            sc_order: default_sc_order(),
            aggr_norm: false,
            update_func: None,
            initialization: default_initialization(),
            gain: DEFAULT_GAIN,
            seed: None,
        }
    }
}

impl ScnnConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, LayerError> {
        read_toml(path)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, LayerError> {
        parse_toml(toml_str)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, LayerError> {
        write_toml(self)
    }

    /// Parses the string-valued fields into [`LayerOptions`].
    pub fn options(&self) -> Result<LayerOptions, LayerError> {
        parse_options(
            self.aggr_norm,
            self.update_func.as_deref(),
            &self.initialization,
            self.gain,
            self.seed,
        )
    }

    /// Builds the layer described by this config.
    pub fn build(&self) -> Result<ScnnLayer, LayerError> {
        ScnnLayer::new(
            self.in_channels,
            self.out_channels,
            self.conv_order_down,
            self.conv_order_up,
            self.options()?,
        )
    }
}

impl Default for ScnnConfig {
    fn default() -> Self {
        Self {
            in_channels: 5,
            out_channels: 5,
            conv_order_down: 2,
            conv_order_up: 2,
            aggr_norm: false,
            update_func: None,
            initialization: default_initialization(),
            gain: DEFAULT_GAIN,
            seed: None,
        }
    }
}

fn parse_options(
    aggr_norm: bool,
    update_func: Option<&str>,
    initialization: &str,
    gain: f32,
    seed: Option<u64>,
) -> Result<LayerOptions, LayerError> {
    if !(gain.is_finite() && gain > 0.0) {
        return Err(LayerError::Config(format!("gain must be positive, got {gain}")));
    }
    Ok(LayerOptions {
        aggr_norm,
        update: UpdateFunction::from_name(update_func)?,
        initialization: initialization.parse()?,
        gain,
        seed,
    })
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, LayerError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        LayerError::Config(format!("cannot read config '{}': {e}", path.display()))
    })?;
    parse_toml(&content)
}

fn parse_toml<T: DeserializeOwned>(toml_str: &str) -> Result<T, LayerError> {
    toml::from_str(toml_str).map_err(|e| LayerError::Config(format!("TOML parse error: {e}")))
}

fn write_toml<T: Serialize>(value: &T) -> Result<String, LayerError> {
    toml::to_string_pretty(value)
        .map_err(|e| LayerError::Config(format!("TOML serialise error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = SccnnConfig::default();
        assert_eq!(c.sc_order, 2);
        assert_eq!(c.initialization, "xavier_normal");
        assert!(c.update_func.is_none());
        assert!(!c.aggr_norm);
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
in_channels = [4, 6, 2]
out_channels = [3, 3, 1]
conv_order = 2
sc_order = 3
aggr_norm = true
update_func = "relu"
initialization = "xavier_uniform"
seed = 11
"#;
        let c = SccnnConfig::from_toml(toml).unwrap();
        assert_eq!(c.in_channels, [4, 6, 2]);
        assert_eq!(c.out_channels, [3, 3, 1]);
        assert_eq!(c.sc_order, 3);
        assert!(c.aggr_norm);
        assert_eq!(c.seed, Some(11));

        let opts = c.options().unwrap();
        assert_eq!(opts.update, UpdateFunction::Relu);
        assert_eq!(opts.initialization, Initialization::XavierUniform);
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let toml = "in_channels = [1, 1, 1]\nout_channels = [2, 2, 2]\nconv_order = 1\n";
        let c = SccnnConfig::from_toml(toml).unwrap();
        assert_eq!(c.sc_order, 2);
        assert_eq!(c.gain, DEFAULT_GAIN);
        assert_eq!(c.options().unwrap().update, UpdateFunction::Identity);
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = SccnnConfig {
            update_func: Some("sigmoid".into()),
            seed: Some(3),
            ..Default::default()
        };
        let toml = c.to_toml().unwrap();
        let back = SccnnConfig::from_toml(&toml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_unknown_names_rejected() {
        let c = SccnnConfig {
            initialization: "he_normal".into(),
            ..Default::default()
        };
        assert!(matches!(c.build(), Err(LayerError::UnknownInitialization(_))));

        let c = SccnnConfig {
            update_func: Some("tanh".into()),
            ..Default::default()
        };
        assert!(matches!(c.build(), Err(LayerError::UnknownUpdateFunction(_))));
    }

    #[test]
    fn test_bad_gain_rejected() {
        let c = ScnnConfig {
            gain: 0.0,
            ..Default::default()
        };
        assert!(matches!(c.options(), Err(LayerError::Config(_))));
    }

    #[test]
    fn test_scnn_from_toml_and_build() {
        let toml = r#"
in_channels = 3
out_channels = 4
conv_order_down = 1
initialization = "xavier_uniform"
seed = 5
"#;
        let c = ScnnConfig::from_toml(toml).unwrap();
        assert_eq!(c.conv_order_up, 0);
        let layer = c.build().unwrap();
        assert_eq!(layer.weight().dim(), (3, 4, 2));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            SccnnConfig::from_toml("conv_order = \"three\""),
            Err(LayerError::Config(_))
        ));
    }
}
