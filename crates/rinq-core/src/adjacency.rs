//! Validated adjacency matrices with an explicit node ordering.
//!
//! Everything downstream (centrality, QUBO formulation, solvers) consumes an
//! [`Adjacency`]: a square, symmetric, zero-diagonal matrix with finite,
//! nonnegative entries, plus one label per row mapping the matrix index back
//! to the original node identifier (a residue number, an entity ID, ...).
//!
//! # Construction
//!
//! | Source | Constructor | Node order |
//! |--------|-------------|------------|
//! | Dense matrix | [`Adjacency::new`] | `"0"`..`"n-1"` |
//! | Dense matrix + ordering | [`Adjacency::with_labels`] | as given |
//! | Edge list | [`Adjacency::from_edges`] | as given |
//! | petgraph graph | [`Adjacency::from_graph`] | node-index order |
//!
//! Weighted graphs are accepted; the formulation only assumes nonnegative
//! entries.

use crate::error::{Error, Result};
use ndarray::Array2;
use petgraph::graph::Graph;
use petgraph::visit::EdgeRef;
use petgraph::Undirected;
use std::collections::HashMap;

/// Largest `|A[i][j] - A[j][i]|` still accepted as symmetric.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Adjacency matrix of an undirected graph plus its node ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjacency {
    matrix: Array2<f64>,
    labels: Vec<String>,
}

impl Adjacency {
    /// Validate `matrix` and label nodes by their index.
    pub fn new(matrix: Array2<f64>) -> Result<Self> {
        let labels = (0..matrix.nrows()).map(|i| i.to_string()).collect();
        Self::with_labels(matrix, labels)
    }

    /// Validate `matrix` and attach an explicit node ordering:
    /// `labels[i]` names row/column `i`.
    pub fn with_labels(matrix: Array2<f64>, labels: Vec<String>) -> Result<Self> {
        validate(&matrix)?;
        if labels.len() != matrix.nrows() {
            return Err(Error::LabelCountMismatch {
                expected: matrix.nrows(),
                actual: labels.len(),
            });
        }
        index_labels(&labels)?;
        Ok(Self { matrix, labels })
    }

    /// Build from an undirected, weighted edge list over a fixed ordering.
    ///
    /// Repeated edges overwrite each other (last weight wins), matching a
    /// simple graph. Self loops are rejected like any nonzero diagonal.
    ///
    /// # Example
    ///
    /// ```
    /// use rinq_core::Adjacency;
    ///
    /// let labels = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    /// let adj = Adjacency::from_edges(labels, [("A", "B", 1.0), ("B", "C", 1.0)]).unwrap();
    /// assert_eq!(adj.len(), 3);
    /// assert_eq!(adj.edge_count(), 2);
    /// assert_eq!(adj.index_of("C"), Some(2));
    /// ```
    pub fn from_edges<S, I>(labels: Vec<String>, edges: I) -> Result<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, S, f64)>,
    {
        let index = index_labels(&labels)?;
        let n = labels.len();
        let mut matrix = Array2::zeros((n, n));

        for (from, to, weight) in edges {
            let i = *index
                .get(from.as_ref())
                .ok_or_else(|| Error::UnknownNode(from.as_ref().to_string()))?;
            let j = *index
                .get(to.as_ref())
                .ok_or_else(|| Error::UnknownNode(to.as_ref().to_string()))?;
            matrix[[i, j]] = weight;
            matrix[[j, i]] = weight;
        }

        Self::with_labels(matrix, labels)
    }

    /// Build from an undirected petgraph graph.
    ///
    /// Row `i` corresponds to `NodeIndex::new(i)`; `label` names each node and
    /// `weight` maps edge payloads to nonnegative weights (use `|_| 1.0` for an
    /// unweighted graph).
    pub fn from_graph<N, E>(
        graph: &Graph<N, E, Undirected>,
        label: impl Fn(&N) -> String,
        weight: impl Fn(&E) -> f64,
    ) -> Result<Self> {
        let n = graph.node_count();
        let mut matrix = Array2::zeros((n, n));

        for edge in graph.edge_references() {
            let (i, j) = (edge.source().index(), edge.target().index());
            let w = weight(edge.weight());
            matrix[[i, j]] = w;
            matrix[[j, i]] = w;
        }

        let labels = graph.node_indices().map(|idx| label(&graph[idx])).collect();
        Self::with_labels(matrix, labels)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    /// Always `false`: empty graphs are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// The validated matrix.
    #[must_use]
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Node ordering: `labels()[i]` names row `i`.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of node `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Matrix index of the node labelled `label`.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Number of undirected edges (nonzero upper-triangle entries).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.matrix
            .indexed_iter()
            .filter(|((i, j), &w)| j > i && w > 0.0)
            .count()
    }
}

#[allow(clippy::float_cmp)]
fn validate(matrix: &Array2<f64>) -> Result<()> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(Error::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Err(Error::EmptyGraph);
    }

    for ((row, col), &value) in matrix.indexed_iter() {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidWeight { row, col, value });
        }
        if row == col && value != 0.0 {
            return Err(Error::NonZeroDiagonal { index: row, value });
        }
        if col > row {
            let transposed = matrix[[col, row]];
            if (value - transposed).abs() > SYMMETRY_TOLERANCE {
                return Err(Error::NotSymmetric {
                    row,
                    col,
                    value,
                    transposed,
                });
            }
        }
    }
    Ok(())
}

fn index_labels(labels: &[String]) -> Result<HashMap<&str, usize>> {
    let mut index = HashMap::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if index.insert(label.as_str(), i).is_some() {
            return Err(Error::DuplicateLabel(label.clone()));
        }
    }
    Ok(index)
}
