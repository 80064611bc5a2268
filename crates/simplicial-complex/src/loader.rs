// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Complex loading from disk.
//!
//! A complex lives either in a standalone JSON file or in a directory that
//! contains `complex.json` (see [`ComplexManifest`]).

use crate::complex::Validated;
use crate::{ComplexError, ComplexManifest, SimplicialComplex};
use std::path::{Path, PathBuf};

/// Default manifest filename inside a complex directory.
const MANIFEST_FILE: &str = "complex.json";

/// Loads a complex from disk into a validated [`SimplicialComplex`].
///
/// # Example
/// ```no_run
/// use simplicial_complex::ComplexLoader;
/// use std::path::Path;
///
/// let complex = ComplexLoader::load(Path::new("./data/mesh")).unwrap();
/// println!("{}", complex.summary());
/// ```
pub struct ComplexLoader;

impl ComplexLoader {
    /// Loads and validates a complex from a manifest file or a directory
    /// containing `complex.json`.
    pub fn load(path: &Path) -> Result<SimplicialComplex<Validated>, ComplexError> {
        let manifest_path = Self::manifest_path(path);
        tracing::info!("loading complex from {}", manifest_path.display());
        let manifest = ComplexManifest::from_file(&manifest_path)?;
        Self::from_manifest(manifest)
    }

    /// Builds a complex from an in-memory manifest.
    pub fn from_manifest(
        manifest: ComplexManifest,
    ) -> Result<SimplicialComplex<Validated>, ComplexError> {
        let complex = manifest.into_complex()?;
        tracing::info!("{}", complex.summary());
        Ok(complex)
    }

    fn manifest_path(path: &Path) -> PathBuf {
        if path.is_dir() {
            path.join(MANIFEST_FILE)
        } else {
            path.to_path_buf()
        }
    }
}
