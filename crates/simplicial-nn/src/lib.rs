// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # simplicial-nn
//!
//! Convolution layers for signals on simplicial complexes.
//!
//! - [`ScnnLayer`] — one simplex order, Chebyshev hops over the lower and
//!   upper Hodge Laplacians.
//! - [`SccnnLayer`] — nodes, edges and triangles at once, with messages
//!   exchanged between adjacent orders through the incidence matrices.
//!
//! Both layers own their weights and expose them through [`Parameterized`];
//! forward passes take `&self`, so an optimizer can only touch the weights
//! between passes. Operators arrive per call as
//! [`tensor_core::LinearOperator`] trait objects, dense or sparse.
//!
//! Layers are built from [`SccnnConfig`] / [`ScnnConfig`] (TOML) or directly
//! from typed [`LayerOptions`].

pub mod chebyshev;
mod config;
mod error;
pub mod init;
mod metrics;
mod parameters;
mod sccnn;
mod scnn;
mod update;

pub use chebyshev::chebyshev_conv;
pub use config::{LayerOptions, SccnnConfig, ScnnConfig};
pub use error::LayerError;
pub use init::Initialization;
pub use metrics::{ForwardMetrics, OrderMetrics};
pub use parameters::Parameterized;
pub use sccnn::{term_counts, SccnnIncidences, SccnnLaplacians, SccnnLayer, SccnnOutput};
pub use scnn::ScnnLayer;
pub use update::UpdateFunction;
