// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Forward-pass profiling.
//!
//! [`ForwardMetrics`] records, per output order, how many terms were stacked,
//! the output shape and the compute time.

use simplicial_complex::Rank;
use std::time::Duration;

/// Metrics for one output order of a forward pass.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderMetrics {
    /// Target simplex order.
    pub rank: Rank,
    /// Number of stacked convolution terms.
    pub terms: usize,
    /// Number of target cells.
    pub cells: usize,
    /// Output width.
    pub out_channels: usize,
    /// Time spent on this order.
    pub duration: Duration,
}

/// Aggregate metrics for a complete forward pass.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ForwardMetrics {
    /// Wall-clock time of the whole pass.
    pub total_duration: Duration,
    /// Per-order metrics, in node → edge → triangle order.
    pub orders: Vec<OrderMetrics>,
}

impl ForwardMetrics {
    /// Creates an empty metrics container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one finished output order.
    pub fn record_order(
        &mut self,
        rank: Rank,
        terms: usize,
        shape: (usize, usize),
        duration: Duration,
    ) {
        self.orders.push(OrderMetrics {
            rank,
            terms,
            cells: shape.0,
            out_channels: shape.1,
            duration,
        });
    }

    /// Finalises metrics with the total wall-clock time.
    pub fn finalise(&mut self, total: Duration) {
        self.total_duration = total;
    }

    /// Sum of the per-order compute times.
    pub fn compute_duration(&self) -> Duration {
        self.orders.iter().map(|o| o.duration).sum()
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        let per_order: Vec<String> = self
            .orders
            .iter()
            .map(|o| {
                format!(
                    "{} {}x{} ({} terms, {:.2}ms)",
                    o.rank,
                    o.cells,
                    o.out_channels,
                    o.terms,
                    o.duration.as_secs_f64() * 1000.0
                )
            })
            .collect();
        format!(
            "Forward: {:.2}ms total, {}",
            self.total_duration.as_secs_f64() * 1000.0,
            per_order.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics() {
        let m = ForwardMetrics::new();
        assert!(m.orders.is_empty());
        assert_eq!(m.compute_duration(), Duration::ZERO);
    }

    #[test]
    fn test_record_and_finalise() {
        let mut m = ForwardMetrics::new();
        m.record_order(Rank::Node, 8, (10, 4), Duration::from_millis(2));
        m.record_order(Rank::Edge, 15, (12, 4), Duration::from_millis(3));
        m.finalise(Duration::from_millis(6));

        assert_eq!(m.orders.len(), 2);
        assert_eq!(m.orders[1].terms, 15);
        assert_eq!(m.compute_duration(), Duration::from_millis(5));
        assert_eq!(m.total_duration, Duration::from_millis(6));
    }

    #[test]
    fn test_summary_format() {
        let mut m = ForwardMetrics::new();
        m.record_order(Rank::Triangle, 8, (3, 2), Duration::from_millis(1));
        m.finalise(Duration::from_millis(1));

        let s = m.summary();
        assert!(s.starts_with("Forward:"));
        assert!(s.contains("triangle 3x2 (8 terms"));
    }
}
