// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Simplices and simplex ranks.
//!
//! A [`Simplex`] is stored as its sorted vertex list; the ascending order is
//! also its orientation, so the boundary signs below are fixed once the
//! vertices are known.

use std::fmt;

/// The rank (dimension) of a cell, named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    /// 0-simplices.
    Node,
    /// 1-simplices.
    Edge,
    /// 2-simplices.
    Triangle,
    /// 3-simplices.
    Tetrahedron,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 4] = [Rank::Node, Rank::Edge, Rank::Triangle, Rank::Tetrahedron];

    /// Returns the rank for a dimension, or `None` above 3.
    pub fn from_dim(dim: usize) -> Option<Self> {
        Self::ALL.get(dim).copied()
    }

    /// Returns the dimension of cells of this rank.
    pub fn dim(self) -> usize {
        self as usize
    }

    /// Returns a human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Triangle => "triangle",
            Self::Tetrahedron => "tetrahedron",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An oriented simplex given by its vertices in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct Simplex {
    vertices: Vec<usize>,
}

impl Simplex {
    /// Creates a simplex, sorting the vertices into canonical order.
    ///
    /// Repeated vertices are kept so that validation can report them.
    pub fn new(mut vertices: Vec<usize>) -> Self {
        vertices.sort_unstable();
        Self { vertices }
    }

    /// Returns the vertices in ascending order.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Returns the dimension (`vertex count - 1`); `0` for an empty simplex.
    pub fn dim(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Returns the rank, or `None` for dimensions above 3.
    pub fn rank(&self) -> Option<Rank> {
        Rank::from_dim(self.dim())
    }

    /// Returns `true` if the simplex is empty or repeats a vertex.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.is_empty() || self.vertices.windows(2).any(|w| w[0] == w[1])
    }

    /// Returns the codimension-1 faces with their orientation signs.
    ///
    /// Dropping vertex `i` yields a face with sign `(-1)^i`. A 0-simplex has
    /// no faces.
    ///
    /// # Examples
    /// ```
    /// use simplicial_complex::Simplex;
    /// let faces = Simplex::new(vec![2, 0, 1]).boundary();
    /// assert_eq!(faces[0], (Simplex::new(vec![1, 2]), 1.0));
    /// assert_eq!(faces[1], (Simplex::new(vec![0, 2]), -1.0));
    /// assert_eq!(faces[2], (Simplex::new(vec![0, 1]), 1.0));
    /// ```
    pub fn boundary(&self) -> Vec<(Simplex, f32)> {
        if self.vertices.len() < 2 {
            return Vec::new();
        }
        (0..self.vertices.len())
            .map(|skip| {
                let face: Vec<usize> = self
                    .vertices
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &v)| v)
                    .collect();
                let sign = if skip % 2 == 0 { 1.0 } else { -1.0 };
                (Simplex { vertices: face }, sign)
            })
            .collect()
    }
}

impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

impl From<Vec<usize>> for Simplex {
    fn from(vertices: Vec<usize>) -> Self {
        Self::new(vertices)
    }
}

impl From<Simplex> for Vec<usize> {
    fn from(simplex: Simplex) -> Self {
        simplex.vertices
    }
}

impl From<&[usize]> for Simplex {
    fn from(vertices: &[usize]) -> Self {
        Self::new(vertices.to_vec())
    }
}
