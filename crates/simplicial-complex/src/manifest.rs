// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON complex manifest parsing.
//!
//! The manifest (`complex.json`) lists the maximal simplices of a complex.
//! Faces are implied and filled in during validation.
//!
//! # Format
//! ```json
//! {
//!   "name": "square",
//!   "num_nodes": 4,
//!   "simplices": [[0, 1, 2], [0, 2, 3]]
//! }
//! ```

use crate::complex::Validated;
use crate::{ComplexError, Simplex, SimplicialComplex, MAX_DIM};
use std::collections::HashSet;
use std::path::Path;

/// Top-level complex manifest, deserialized from `complex.json`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComplexManifest {
    /// Human-readable complex name.
    pub name: String,
    /// Number of vertices; nodes are labelled `0..num_nodes`.
    pub num_nodes: usize,
    /// Declared simplices as vertex lists (any order, any dimension 1..=3).
    #[serde(default)]
    pub simplices: Vec<Vec<usize>>,
}

impl ComplexManifest {
    /// Loads a manifest from a JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, ComplexError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ComplexError> {
        let manifest: Self = serde_json::from_str(json)?;
        Ok(manifest)
    }

    /// Serializes the manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ComplexError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds a manifest listing every cell of dimension 1 and above of a
    /// validated complex.
    pub fn from_complex(complex: &SimplicialComplex<Validated>) -> Self {
        let simplices = (1..=MAX_DIM)
            .flat_map(|dim| complex.cells(dim).iter())
            .map(|s| s.vertices().to_vec())
            .collect();
        Self {
            name: complex.name.clone(),
            num_nodes: complex.num_nodes(),
            simplices,
        }
    }

    /// Checks the manifest without building the complex.
    ///
    /// Checks:
    /// - `num_nodes` is positive.
    /// - Every simplex has between 1 and `MAX_DIM + 1` vertices.
    /// - No simplex references a vertex outside `0..num_nodes`.
    ///
    /// Repeated simplices are allowed but logged.
    pub fn validate(&self) -> Result<(), ComplexError> {
        if self.num_nodes == 0 {
            return Err(ComplexError::InvalidComplex(format!(
                "manifest '{}' declares no nodes",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for vertices in &self.simplices {
            let simplex = Simplex::new(vertices.clone());
            if vertices.is_empty() || vertices.len() > MAX_DIM + 1 {
                return Err(ComplexError::InvalidSimplex {
                    simplex: simplex.to_string(),
                    detail: format!(
                        "expected 1 to {} vertices, got {}",
                        MAX_DIM + 1,
                        vertices.len()
                    ),
                });
            }
            if let Some(&v) = vertices.iter().find(|&&v| v >= self.num_nodes) {
                return Err(ComplexError::InvalidSimplex {
                    simplex: simplex.to_string(),
                    detail: format!("vertex {v} out of range for {} nodes", self.num_nodes),
                });
            }
            if !seen.insert(simplex.clone()) {
                tracing::warn!("manifest '{}' repeats simplex {simplex}", self.name);
            }
        }
        Ok(())
    }

    /// Validates the manifest and builds the closed, indexed complex.
    pub fn into_complex(self) -> Result<SimplicialComplex<Validated>, ComplexError> {
        self.validate()?;
        let simplices = self.simplices.into_iter().map(Simplex::new).collect();
        SimplicialComplex::new(self.name, self.num_nodes, simplices).validate()
    }
}
