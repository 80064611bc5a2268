// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Simplicial complex with type-state validation.
//!
//! # Type-State Pattern
//!
//! ```text
//! SimplicialComplex<Loaded>     — node count + declared simplices, unchecked.
//!       │  .validate()
//!       ▼
//! SimplicialComplex<Validated>  — closed under faces, indexed, operator-ready.
//! ```
//!
//! Only a validated complex hands out incidence matrices and Laplacians, so
//! a layer can never be fed operators built from a malformed cell list.
//!
//! # Cell indexing
//! Nodes are `0..num_nodes`. Higher cells are indexed in first-seen order
//! while visiting the declared simplices from lowest to highest dimension
//! (stable within a dimension); each simplex is followed by whichever of its
//! faces were not yet present.

use crate::{ComplexError, Rank, Simplex};
use std::collections::HashMap;
use std::fmt;
use tensor_core::CsrMatrix;

/// Highest cell dimension the complex stores (tetrahedra).
pub const MAX_DIM: usize = 3;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: simplices declared but not checked.
#[derive(Debug, Clone)]
pub struct Loaded;

/// Marker: complex checked, closed under faces and indexed.
#[derive(Debug, Clone)]
pub struct Validated;

/// Sealed trait for complex states.
pub trait ComplexState: fmt::Debug + Clone {}
impl ComplexState for Loaded {}
impl ComplexState for Validated {}

// ── SimplicialComplex ──────────────────────────────────────────────

/// A simplicial complex of dimension at most [`MAX_DIM`].
#[derive(Debug, Clone)]
pub struct SimplicialComplex<S: ComplexState = Loaded> {
    /// Human-readable name (e.g., `"karate-clique"`).
    pub name: String,
    num_nodes: usize,
    declared: Vec<Simplex>,
    /// `cells[d]` lists the `d`-simplices in index order (validated only).
    cells: Vec<Vec<Simplex>>,
    /// `index[d]` maps a `d`-simplex to its position in `cells[d]`.
    index: Vec<HashMap<Simplex, usize>>,
    _state: std::marker::PhantomData<S>,
}

// ── Loaded state ───────────────────────────────────────────────────

impl SimplicialComplex<Loaded> {
    /// Creates an unchecked complex over `num_nodes` nodes.
    pub fn new(name: impl Into<String>, num_nodes: usize, simplices: Vec<Simplex>) -> Self {
        Self {
            name: name.into(),
            num_nodes,
            declared: simplices,
            cells: Vec::new(),
            index: Vec::new(),
            _state: std::marker::PhantomData,
        }
    }

    /// Declares one more simplex.
    pub fn add_simplex(&mut self, simplex: impl Into<Simplex>) {
        self.declared.push(simplex.into());
    }

    /// Returns the declared simplices.
    pub fn declared(&self) -> &[Simplex] {
        &self.declared
    }

    /// Validates the declaration and transitions to the `Validated` state.
    ///
    /// # Checks
    /// - At least one node.
    /// - Every declared simplex is non-empty, has no repeated vertex, uses
    ///   only nodes `< num_nodes`, and has dimension `<= MAX_DIM`.
    ///
    /// Missing faces are added; duplicate declarations are collapsed with a
    /// warning.
    pub fn validate(self) -> Result<SimplicialComplex<Validated>, ComplexError> {
        if self.num_nodes == 0 {
            return Err(ComplexError::InvalidComplex(format!(
                "complex '{}' has no nodes",
                self.name
            )));
        }

        for simplex in &self.declared {
            check_simplex(simplex, self.num_nodes)?;
        }

        let mut cells: Vec<Vec<Simplex>> = vec![Vec::new(); MAX_DIM + 1];
        let mut index: Vec<HashMap<Simplex, usize>> = vec![HashMap::new(); MAX_DIM + 1];
        for v in 0..self.num_nodes {
            let node = Simplex::new(vec![v]);
            index[0].insert(node.clone(), v);
            cells[0].push(node);
        }

        let mut ordered: Vec<&Simplex> = self.declared.iter().collect();
        ordered.sort_by_key(|s| s.dim());

        let mut implied = 0usize;
        for simplex in ordered {
            let dim = simplex.dim();
            if index[dim].contains_key(simplex) {
                if dim > 0 {
                    tracing::warn!(
                        "complex '{}': simplex {simplex} declared more than once or implied earlier",
                        self.name,
                    );
                }
                continue;
            }
            implied += insert_closed(simplex.clone(), &mut cells, &mut index) - 1;
        }

        let complex = SimplicialComplex {
            name: self.name,
            num_nodes: self.num_nodes,
            declared: self.declared,
            cells,
            index,
            _state: std::marker::PhantomData,
        };
        tracing::debug!("{} ({implied} faces added by closure)", complex.summary());
        Ok(complex)
    }
}

/// Checks a single declared simplex against the node count.
fn check_simplex(simplex: &Simplex, num_nodes: usize) -> Result<(), ComplexError> {
    let invalid = |detail: String| ComplexError::InvalidSimplex {
        simplex: simplex.to_string(),
        detail,
    };

    if simplex.vertices().is_empty() {
        return Err(invalid("simplex has no vertices".into()));
    }
    if simplex.is_degenerate() {
        return Err(invalid("simplex repeats a vertex".into()));
    }
    if simplex.dim() > MAX_DIM {
        return Err(invalid(format!(
            "dimension {} exceeds supported maximum {MAX_DIM}",
            simplex.dim()
        )));
    }
    if let Some(&v) = simplex.vertices().iter().find(|&&v| v >= num_nodes) {
        return Err(invalid(format!("vertex {v} out of range for {num_nodes} nodes")));
    }
    Ok(())
}

/// Inserts `simplex` followed by its missing faces; returns how many cells
/// were added.
fn insert_closed(
    simplex: Simplex,
    cells: &mut [Vec<Simplex>],
    index: &mut [HashMap<Simplex, usize>],
) -> usize {
    let dim = simplex.dim();
    if index[dim].contains_key(&simplex) {
        return 0;
    }
    let faces = simplex.boundary();
    index[dim].insert(simplex.clone(), cells[dim].len());
    cells[dim].push(simplex);

    let mut added = 1;
    for (face, _) in faces {
        added += insert_closed(face, cells, index);
    }
    added
}

// ── Validated state ────────────────────────────────────────────────

impl SimplicialComplex<Validated> {
    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of `dim`-cells (`0` above [`MAX_DIM`]).
    pub fn num_cells(&self, dim: usize) -> usize {
        self.cells.get(dim).map_or(0, Vec::len)
    }

    /// Returns the `dim`-cells in index order.
    pub fn cells(&self, dim: usize) -> &[Simplex] {
        self.cells.get(dim).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the index of `simplex` among cells of its dimension.
    pub fn index_of(&self, simplex: &Simplex) -> Option<usize> {
        self.index.get(simplex.dim())?.get(simplex).copied()
    }

    /// Returns the highest dimension that has at least one cell.
    pub fn dimension(&self) -> usize {
        (0..=MAX_DIM)
            .rev()
            .find(|&d| self.num_cells(d) > 0)
            .unwrap_or(0)
    }

    /// Returns `Σ_d (-1)^d · n_d`.
    pub fn euler_characteristic(&self) -> i64 {
        (0..=MAX_DIM)
            .map(|d| {
                let n = self.num_cells(d) as i64;
                if d % 2 == 0 {
                    n
                } else {
                    -n
                }
            })
            .sum()
    }

    /// Returns the oriented incidence (boundary) matrix `B_k`.
    ///
    /// `B_k` has shape `(n_{k-1}, n_k)`; column `j` holds `(-1)^i` at the row
    /// of the face obtained by dropping vertex `i` of cell `j`.
    ///
    /// # Errors
    /// Returns [`ComplexError::DimensionOutOfRange`] unless `1 <= k <= MAX_DIM`.
    pub fn incidence(&self, k: usize) -> Result<CsrMatrix, ComplexError> {
        check_dim(k, 1, MAX_DIM)?;
        let mut triplets = Vec::with_capacity(self.num_cells(k) * (k + 1));
        for (col, simplex) in self.cells[k].iter().enumerate() {
            for (face, sign) in simplex.boundary() {
                let row = self.index[k - 1].get(&face).copied().ok_or_else(|| {
                    ComplexError::InvalidComplex(format!(
                        "face {face} of {simplex} missing from the complex"
                    ))
                })?;
                triplets.push((row, col, sign));
            }
        }
        Ok(CsrMatrix::from_triplets(
            self.num_cells(k - 1),
            self.num_cells(k),
            &triplets,
        )?)
    }

    /// Returns the lower Hodge Laplacian `L_k^down = B_kᵀ B_k`.
    ///
    /// For `k = 0` there is no lower boundary and the result is the zero
    /// matrix.
    pub fn laplacian_down(&self, k: usize) -> Result<CsrMatrix, ComplexError> {
        check_dim(k, 0, MAX_DIM)?;
        if k == 0 {
            return Ok(CsrMatrix::zeros(self.num_nodes, self.num_nodes));
        }
        let b = self.incidence(k)?;
        Ok(b.transpose().matmul(&b)?)
    }

    /// Returns the upper Hodge Laplacian `L_k^up = B_{k+1} B_{k+1}ᵀ`.
    ///
    /// For `k = MAX_DIM` there are no cofaces and the result is the zero
    /// matrix.
    pub fn laplacian_up(&self, k: usize) -> Result<CsrMatrix, ComplexError> {
        check_dim(k, 0, MAX_DIM)?;
        if k == MAX_DIM {
            let n = self.num_cells(k);
            return Ok(CsrMatrix::zeros(n, n));
        }
        let b = self.incidence(k + 1)?;
        Ok(b.matmul(&b.transpose())?)
    }

    /// Returns the full Hodge Laplacian `L_k = L_k^down + L_k^up`.
    pub fn hodge_laplacian(&self, k: usize) -> Result<CsrMatrix, ComplexError> {
        Ok(self.laplacian_down(k)?.add(&self.laplacian_up(k)?)?)
    }

    /// Returns a one-line summary of the cell counts.
    pub fn summary(&self) -> String {
        let counts: Vec<String> = Rank::ALL
            .iter()
            .filter(|r| self.num_cells(r.dim()) > 0)
            .map(|r| format!("{} {}s", self.num_cells(r.dim()), r))
            .collect();
        format!(
            "Complex '{}': dim {}, {}, euler characteristic {}",
            self.name,
            self.dimension(),
            counts.join(", "),
            self.euler_characteristic(),
        )
    }
}

fn check_dim(dim: usize, min: usize, max: usize) -> Result<(), ComplexError> {
    if dim < min || dim > max {
        return Err(ComplexError::DimensionOutOfRange { dim, min, max });
    }
    Ok(())
}

// ── Shared implementations ─────────────────────────────────────────

impl<S: ComplexState> SimplicialComplex<S> {
    /// Returns the declared node count.
    pub fn node_count(&self) -> usize {
        self.num_nodes
    }
}

impl fmt::Display for SimplicialComplex<Validated> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for rank in Rank::ALL.iter().skip(1) {
            for simplex in self.cells(rank.dim()) {
                writeln!(f, "  {rank} {simplex}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::LinearOperator;

    fn simplices(list: &[&[usize]]) -> Vec<Simplex> {
        list.iter().map(|s| Simplex::from(*s)).collect()
    }

    /// Two triangles glued along the diagonal of a square.
    fn square() -> SimplicialComplex<Validated> {
        SimplicialComplex::new("square", 4, simplices(&[&[0, 1, 2], &[0, 2, 3]]))
            .validate()
            .unwrap()
    }

    #[test]
    fn test_validate_closes_faces() {
        let c = square();
        assert_eq!(c.num_nodes(), 4);
        assert_eq!(c.num_cells(1), 5);
        assert_eq!(c.num_cells(2), 2);
        assert_eq!(c.num_cells(3), 0);
        assert_eq!(c.dimension(), 2);
        assert!(c.index_of(&Simplex::new(vec![1, 2])).is_some());
        assert!(c.index_of(&Simplex::new(vec![1, 3])).is_none());
    }

    #[test]
    fn test_declared_edges_indexed_first() {
        let c = SimplicialComplex::new("order", 3, simplices(&[&[0, 1, 2], &[1, 2]]))
            .validate()
            .unwrap();
        assert_eq!(c.cells(1)[0], Simplex::new(vec![1, 2]));
        assert_eq!(c.num_cells(1), 3);
    }

    #[test]
    fn test_duplicates_collapse() {
        let c = SimplicialComplex::new("dup", 2, simplices(&[&[0, 1], &[1, 0]]))
            .validate()
            .unwrap();
        assert_eq!(c.num_cells(1), 1);
    }

    #[test]
    fn test_validate_rejects_no_nodes() {
        let c = SimplicialComplex::new("empty", 0, vec![]);
        assert!(matches!(c.validate(), Err(ComplexError::InvalidComplex(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_range_vertex() {
        let c = SimplicialComplex::new("oob", 3, simplices(&[&[0, 3]]));
        assert!(matches!(c.validate(), Err(ComplexError::InvalidSimplex { .. })));
    }

    #[test]
    fn test_validate_rejects_repeated_vertex() {
        let c = SimplicialComplex::new("rep", 3, simplices(&[&[1, 1, 2]]));
        assert!(matches!(c.validate(), Err(ComplexError::InvalidSimplex { .. })));
    }

    #[test]
    fn test_validate_rejects_high_dimension() {
        let c = SimplicialComplex::new("4d", 5, simplices(&[&[0, 1, 2, 3, 4]]));
        assert!(matches!(c.validate(), Err(ComplexError::InvalidSimplex { .. })));
    }

    #[test]
    fn test_validate_rejects_empty_simplex() {
        let mut c = SimplicialComplex::new("hollow", 2, vec![]);
        c.add_simplex(Vec::<usize>::new());
        assert_eq!(c.declared().len(), 1);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_incidence_shapes_and_signs() {
        let c = square();
        let b1 = c.incidence(1).unwrap();
        let b2 = c.incidence(2).unwrap();
        assert_eq!(b1.shape(), (4, 5));
        assert_eq!(b2.shape(), (5, 2));

        // Every edge column has one +1 (head) and one -1 (tail).
        let col_sums = b1.to_dense().sum_axis(ndarray::Axis(0));
        assert!(col_sums.iter().all(|&s| s == 0.0));

        let e01 = c.index_of(&Simplex::new(vec![0, 1])).unwrap();
        assert_eq!(b1.get(1, e01), 1.0);
        assert_eq!(b1.get(0, e01), -1.0);
    }

    #[test]
    fn test_boundary_of_boundary_is_zero() {
        let c = SimplicialComplex::new("tet", 4, simplices(&[&[0, 1, 2, 3]]))
            .validate()
            .unwrap();
        for k in 1..MAX_DIM {
            let product = c.incidence(k).unwrap().matmul(&c.incidence(k + 1).unwrap()).unwrap();
            assert_eq!(product.nnz(), 0, "B_{k} B_{} must vanish", k + 1);
        }
    }

    #[test]
    fn test_incidence_out_of_range() {
        let c = square();
        assert!(matches!(
            c.incidence(0),
            Err(ComplexError::DimensionOutOfRange { dim: 0, .. })
        ));
        assert!(c.incidence(4).is_err());
    }

    #[test]
    fn test_graph_laplacian() {
        let c = square();
        let l0 = c.hodge_laplacian(0).unwrap();
        // Degrees on the diagonal: node 0 and 2 touch three edges.
        assert_eq!(l0.get(0, 0), 3.0);
        assert_eq!(l0.get(1, 1), 2.0);
        assert_eq!(l0.get(0, 1), -1.0);
        assert_eq!(l0.get(1, 3), 0.0);
        assert!(l0.row_sums().iter().all(|&s| s == 0.0));
        assert_eq!(l0, c.laplacian_up(0).unwrap());
    }

    #[test]
    fn test_laplacians_symmetric() {
        let c = SimplicialComplex::new("tet", 4, simplices(&[&[0, 1, 2, 3]]))
            .validate()
            .unwrap();
        for k in 0..=MAX_DIM {
            assert!(c.laplacian_down(k).unwrap().is_symmetric());
            assert!(c.laplacian_up(k).unwrap().is_symmetric());
            assert!(c.hodge_laplacian(k).unwrap().is_symmetric());
        }
    }

    #[test]
    fn test_top_dimension_laplacians() {
        let c = square();
        assert_eq!(c.laplacian_up(3).unwrap().shape(), (0, 0));
        assert_eq!(c.laplacian_down(0).unwrap().nnz(), 0);
        // Without tetrahedra the up part at dimension 2 vanishes.
        assert_eq!(c.laplacian_up(2).unwrap().nnz(), 0);
        assert_eq!(c.laplacian_down(2).unwrap().shape(), (2, 2));
    }

    #[test]
    fn test_euler_characteristic() {
        assert_eq!(square().euler_characteristic(), 1);
        let hollow = SimplicialComplex::new("circle", 3, simplices(&[&[0, 1], &[1, 2], &[0, 2]]))
            .validate()
            .unwrap();
        assert_eq!(hollow.euler_characteristic(), 0);
    }

    #[test]
    fn test_summary_and_display() {
        let c = square();
        let s = c.summary();
        assert!(s.contains("square"));
        assert!(s.contains("5 edges"));
        assert!(s.contains("2 triangles"));
        let display = format!("{c}");
        assert!(display.contains("triangle [0, 1, 2]"));
    }
}
