// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # simplicial-complex
//!
//! The topological domain the convolution layers run on.
//!
//! - [`Simplex`] — an oriented cell given by its sorted vertex list.
//! - [`SimplicialComplex`] — cells of dimension 0..=3 with a **type-state
//!   pattern** (`Loaded` → `Validated`). Validation checks every declared
//!   simplex, closes the complex under taking faces and indexes the cells.
//! - Oriented incidence matrices `B_k` and Hodge Laplacians (down, up, full),
//!   built as [`tensor_core::CsrMatrix`].
//! - [`ComplexOperators`] — the Laplacian/incidence bundle a layer consumes.
//! - [`ComplexManifest`] / [`ComplexLoader`] — a JSON description on disk.
//! - [`generate::random_clique_complex`] — synthetic complexes for demos,
//!   benches and tests.
//!
//! # Example
//! ```
//! use simplicial_complex::{Simplex, SimplicialComplex};
//!
//! let complex = SimplicialComplex::new(
//!     "square",
//!     4,
//!     vec![Simplex::new(vec![0, 1, 2]), Simplex::new(vec![0, 2, 3])],
//! )
//! .validate()
//! .unwrap();
//! assert_eq!(complex.num_cells(1), 5);
//! assert_eq!(complex.euler_characteristic(), 1);
//! ```

pub mod complex;
mod error;
pub mod generate;
mod loader;
mod manifest;
mod operators;
mod simplex;

pub use complex::{SimplicialComplex, MAX_DIM};
pub use error::ComplexError;
pub use loader::ComplexLoader;
pub use manifest::ComplexManifest;
pub use operators::ComplexOperators;
pub use simplex::{Rank, Simplex};
