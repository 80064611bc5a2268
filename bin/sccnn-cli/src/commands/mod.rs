// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommands and the argument groups they share.

pub mod inspect;
pub mod run;

use clap::Args;
use simplicial_complex::complex::Validated;
use simplicial_complex::generate::random_clique_complex;
use simplicial_complex::{ComplexLoader, SimplicialComplex};
use simplicial_nn::SccnnConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialises the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Where the complex comes from: a JSON manifest or a random clique complex.
#[derive(Args, Debug, Clone)]
pub struct ComplexSource {
    /// Complex manifest (`complex.json`) or a directory containing one.
    #[arg(long, conflicts_with_all = ["nodes", "edge_prob"])]
    pub complex: Option<PathBuf>,

    /// Node count of the generated complex.
    #[arg(long, default_value_t = 30)]
    pub nodes: usize,

    /// Edge probability of the generated complex.
    #[arg(long, default_value_t = 0.2)]
    pub edge_prob: f64,

    /// Seed for the generated complex and the input signals.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl ComplexSource {
    /// Loads or generates the complex. Generated complexes include
    /// tetrahedra only when `sc_order > 2`.
    pub fn resolve(&self, sc_order: usize) -> anyhow::Result<SimplicialComplex<Validated>> {
        match &self.complex {
            Some(path) => ComplexLoader::load(path).map_err(|e| {
                anyhow::anyhow!("failed to load complex from '{}': {e}", path.display())
            }),
            None => {
                let max_dim = if sc_order > 2 { 3 } else { 2 };
                let complex = random_clique_complex(
                    format!("clique-{}-{}", self.nodes, self.seed),
                    self.nodes,
                    self.edge_prob,
                    max_dim,
                    self.seed,
                )?;
                Ok(complex)
            }
        }
    }
}

/// Layer settings that override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct LayerOverrides {
    /// Chebyshev order (hops per operator).
    #[arg(short = 'k', long)]
    pub conv_order: Option<usize>,

    /// Highest simplex order (2 = triangles are the top cells).
    #[arg(long)]
    pub sc_order: Option<usize>,

    /// Output width on every order.
    #[arg(long)]
    pub out_channels: Option<usize>,

    /// Enable aggregation normalization.
    #[arg(long)]
    pub aggr_norm: bool,

    /// Update function: none, sigmoid, relu.
    #[arg(long)]
    pub update_func: Option<String>,

    /// Initialization: xavier_uniform, xavier_normal.
    #[arg(long)]
    pub initialization: Option<String>,
}

impl LayerOverrides {
    /// Starts from the file at `config` (or the defaults) and applies every
    /// flag that was given.
    pub fn resolve(&self, config: Option<&PathBuf>) -> anyhow::Result<SccnnConfig> {
        let mut cfg = match config {
            Some(path) => SccnnConfig::from_file(path)?,
            None => SccnnConfig::default(),
        };
        if let Some(k) = self.conv_order {
            cfg.conv_order = k;
        }
        if let Some(s) = self.sc_order {
            cfg.sc_order = s;
        }
        if let Some(c) = self.out_channels {
            cfg.out_channels = [c; 3];
        }
        if self.aggr_norm {
            cfg.aggr_norm = true;
        }
        if let Some(f) = &self.update_func {
            cfg.update_func = Some(f.clone());
        }
        if let Some(i) = &self.initialization {
            cfg.initialization = i.clone();
        }
        Ok(cfg)
    }
}

/// Truncates a string to `max` characters, adding "…" if truncated.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
