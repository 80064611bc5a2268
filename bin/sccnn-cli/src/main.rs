// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # sccnn
//!
//! Command-line interface for the simplicial convolution layers.
//!
//! ## Usage
//! ```bash
//! # Forward pass over a complex described in JSON
//! sccnn run --complex ./data/mesh/complex.json --conv-order 3 --update-func sigmoid
//!
//! # Forward pass over a random clique complex, layer from a TOML file
//! sccnn --config layer.toml run --nodes 50 --edge-prob 0.15
//!
//! # Inspect operators and term layout
//! sccnn inspect --nodes 20 --sc-order 3
//! ```

mod commands;

use clap::{Parser, Subcommand};
use commands::{ComplexSource, LayerOverrides};

#[derive(Parser)]
#[command(
    name = "sccnn",
    about = "Simplicial complex convolutional layers on nodes, edges and triangles",
    version,
    author
)]
struct Cli {
    /// Path to a TOML layer configuration file (CLI flags override it).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a layer and run one forward pass on random input signals.
    Run {
        #[command(flatten)]
        source: ComplexSource,

        #[command(flatten)]
        layer: LayerOverrides,

        /// Input width on every order.
        #[arg(long)]
        in_channels: Option<usize>,

        /// Use dense copies of the operators instead of sparse ones.
        #[arg(long)]
        dense: bool,
    },

    /// Print cell counts, operator shapes and the per-order term layout.
    Inspect {
        #[command(flatten)]
        source: ComplexSource,

        #[command(flatten)]
        layer: LayerOverrides,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            source,
            layer,
            in_channels,
            dense,
        } => commands::run::execute(cli.config, source, layer, in_channels, dense),
        Commands::Inspect { source, layer } => {
            commands::inspect::execute(cli.config, source, layer)
        }
    }
}
