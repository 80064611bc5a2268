// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `sccnn run` command: one forward pass on random input signals.
//!
//! ```text
//! complex → operators(sc_order) → SccnnLayer::new → forward → report
//! ```

use super::{ComplexSource, LayerOverrides};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use simplicial_complex::Rank;
use simplicial_nn::{ForwardMetrics, SccnnIncidences, SccnnLaplacians, SccnnOutput};
use std::path::PathBuf;
use tensor_core::LinearOperator;

pub fn execute(
    config: Option<PathBuf>,
    source: ComplexSource,
    overrides: LayerOverrides,
    in_channels: Option<usize>,
    dense: bool,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              sccnn · Forward Runner                 ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    // ── Configuration ──────────────────────────────────────────
    let mut cfg = overrides.resolve(config.as_ref())?;
    if let Some(c) = in_channels {
        cfg.in_channels = [c; 3];
    }
    let layer = cfg.build()?;

    println!("  Layer:");
    println!("   Channels:   {:?} -> {:?}", cfg.in_channels, cfg.out_channels);
    println!("   Conv order: {}", cfg.conv_order);
    println!("   SC order:   {}", cfg.sc_order);
    println!("   Aggr norm:  {}", cfg.aggr_norm);
    println!("   Update:     {}", layer.options().update);
    println!("   Init:       {}", layer.options().initialization);
    println!("   Terms:      {:?}", layer.term_counts());
    println!();

    // ── Complex ────────────────────────────────────────────────
    println!("  [1/3] Building complex and operators...");
    let complex = source.resolve(cfg.sc_order)?;
    let ops = complex.operators(cfg.sc_order)?;
    let [n0, n1, n2] = ops.cell_counts();
    println!("        {}", complex.summary());
    if n2 == 0 {
        tracing::warn!("complex has no triangles; triangle outputs will be empty");
    }
    println!();

    // ── Signals ────────────────────────────────────────────────
    println!("  [2/3] Drawing input signals (seed {})...", source.seed);
    let mut rng = StdRng::seed_from_u64(source.seed);
    let x0 = random_signal(&mut rng, n0, cfg.in_channels[0]);
    let x1 = random_signal(&mut rng, n1, cfg.in_channels[1]);
    let x2 = random_signal(&mut rng, n2, cfg.in_channels[2]);
    println!();

    // ── Forward ────────────────────────────────────────────────
    println!(
        "  [3/3] Running forward pass ({} operators)...",
        if dense { "dense" } else { "sparse" }
    );
    let x = [x0.view(), x1.view(), x2.view()];
    let (output, metrics) = if dense {
        let mats: Vec<Array2<f32>> = ops.named().iter().map(|(_, m)| m.to_dense()).collect();
        let laplacians = match mats.as_slice() {
            [l0, l1_down, l1_up, l2, b1, b2] => (
                SccnnLaplacians::Order2 { l0, l1_down, l1_up, l2 },
                SccnnIncidences { b1, b2 },
            ),
            [l0, l1_down, l1_up, l2_down, l2_up, b1, b2] => (
                SccnnLaplacians::Higher {
                    l0,
                    l1_down,
                    l1_up,
                    l2_down,
                    l2_up,
                },
                SccnnIncidences { b1, b2 },
            ),
            other => anyhow::bail!("unexpected operator count {}", other.len()),
        };
        layer.forward_with_metrics(x, &laplacians.0, &laplacians.1)?
    } else {
        layer.forward_with_metrics(
            x,
            &SccnnLaplacians::from_operators(&ops),
            &SccnnIncidences::from_operators(&ops),
        )?
    };
    println!();

    print_results(&output, &metrics);
    Ok(())
}

fn random_signal(rng: &mut StdRng, rows: usize, cols: usize) -> Array2<f32> {
    Array2::from_shape_fn((rows, cols), |_| rng.sample::<f32, _>(StandardNormal))
}

/// Prints per-order statistics and timings.
fn print_results(output: &SccnnOutput, metrics: &ForwardMetrics) {
    println!("  ── Results ─────────────────────────────────────────");
    println!(
        "  {:<10} {:>12} {:>10} {:>10} {:>10} {:>10}",
        "Order", "Shape", "Mean", "Std", "Min", "Max",
    );
    println!("  {}", "-".repeat(68));
    for (rank, y) in [Rank::Node, Rank::Edge, Rank::Triangle]
        .iter()
        .zip([&output.y0, &output.y1, &output.y2])
    {
        let (mean, std, min, max) = stats(y);
        let (r, c) = y.dim();
        println!(
            "  {:<10} {:>12} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            rank.as_str(),
            format!("{r}x{c}"),
            mean,
            std,
            min,
            max,
        );
    }
    println!();
    println!("  {}", metrics.summary());
    println!(
        "  Compute: {:.2}ms across {} orders",
        metrics.compute_duration().as_secs_f64() * 1000.0,
        metrics.orders.len(),
    );
    println!();
}

/// Mean, population standard deviation, min and max; zeros for an empty
/// matrix.
fn stats(y: &Array2<f32>) -> (f32, f32, f32, f32) {
    if y.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let n = y.len() as f32;
    let mean = y.sum() / n;
    let var = y.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
    let min = y.iter().copied().fold(f32::INFINITY, f32::min);
    let max = y.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    (mean, var.sqrt(), min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_stats() {
        let y = array![[1.0f32, 3.0], [-1.0, 1.0]];
        let (mean, std, min, max) = stats(&y);
        assert_eq!(mean, 1.0);
        assert_eq!(std, 2.0f32.sqrt());
        assert_eq!(min, -1.0);
        assert_eq!(max, 3.0);
    }

    #[test]
    fn test_stats_empty() {
        let y = Array2::<f32>::zeros((0, 4));
        assert_eq!(stats(&y), (0.0, 0.0, 0.0, 0.0));
    }
}
