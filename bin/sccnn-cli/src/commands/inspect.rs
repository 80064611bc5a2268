// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `sccnn inspect` command: complex, operator and weight layout.

use super::{truncate, ComplexSource, LayerOverrides};
use simplicial_complex::Rank;
use simplicial_nn::term_counts;
use std::path::PathBuf;
use tensor_core::LinearOperator;

pub fn execute(
    config: Option<PathBuf>,
    source: ComplexSource,
    overrides: LayerOverrides,
) -> anyhow::Result<()> {
    let cfg = overrides.resolve(config.as_ref())?;
    let complex = source.resolve(cfg.sc_order)?;
    let ops = complex.operators(cfg.sc_order)?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              sccnn · Complex Inspector              ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  {}", truncate(&complex.summary(), 72));
    println!();

    // ── Cells ──────────────────────────────────────────────────
    println!("  Cells:");
    for rank in Rank::ALL {
        println!("   {:<12} {:>8}", rank.as_str(), complex.num_cells(rank.dim()));
    }
    println!();

    // ── Operators ──────────────────────────────────────────────
    println!("  Operators (sc_order {}):", cfg.sc_order);
    println!("  {:<10} {:>14} {:>10} {:>10}", "Name", "Shape", "NNZ", "Density");
    println!("  {}", "-".repeat(48));
    for (name, m) in ops.named() {
        let (r, c) = m.shape();
        let cells = r * c;
        let density = if cells == 0 {
            0.0
        } else {
            m.nnz() as f64 / cells as f64 * 100.0
        };
        println!(
            "  {:<10} {:>14} {:>10} {:>9.2}%",
            name,
            format!("{r}x{c}"),
            m.nnz(),
            density,
        );
    }
    println!("  {}", "-".repeat(48));
    println!("  {:<10} {:>14} {:>10}", "Total", "", ops.total_nnz());
    println!();

    // ── Layer ──────────────────────────────────────────────────
    let terms = term_counts(cfg.conv_order, cfg.sc_order);
    println!("  Layer (conv_order {}):", cfg.conv_order);
    println!(
        "  {:<10} {:>8} {:>8} {:>8} {:>10}",
        "Order", "In", "Out", "Terms", "Params"
    );
    println!("  {}", "-".repeat(48));
    let mut total = 0usize;
    for (i, rank) in [Rank::Node, Rank::Edge, Rank::Triangle].iter().enumerate() {
        let params = cfg.in_channels[i] * cfg.out_channels[i] * terms[i];
        total += params;
        println!(
            "  {:<10} {:>8} {:>8} {:>8} {:>10}",
            rank.as_str(),
            cfg.in_channels[i],
            cfg.out_channels[i],
            terms[i],
            params,
        );
    }
    println!("  {}", "-".repeat(48));
    println!("  {:<10} {:>8} {:>8} {:>8} {:>10}", "Total", "", "", "", total);
    println!();

    Ok(())
}
