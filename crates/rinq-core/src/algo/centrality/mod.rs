//! Centrality measures for node importance.
//!
//! # Overview
//!
//! All measures take a validated [`Adjacency`](crate::Adjacency) and return
//! one score per node, indexed like the adjacency matrix.
//!
//! | Algorithm | Question Answered | Complexity |
//! |-----------|-------------------|------------|
//! | Degree | How many connections? | O(V²) |
//! | Eigenvector | Connected to important nodes? | O(V² × iterations) |
//! | Estrada (exact) | How many closed walks, weighted by 1/k!? | O(V³) |
//! | Estrada (series) | Same, truncated after K terms | O(K × V³) |
//!
//! # Relation to the QUBO Walk Term
//!
//! The QUBO formulation in [`crate::qubo`] does not call these functions.
//! Its walk term is a cheap proxy for the same notion of importance
//! (one- and two-step walks through high-degree nodes), so these measures
//! are the natural yardstick for judging a selection.
//!
//! # References
//!
//! - Bonacich (1987). "Power and centrality"
//! - Estrada & Rodríguez-Velázquez (2005). "Subgraph centrality in complex networks"

mod degree;
mod eigenvector;
mod estrada;

pub use degree::{degree_centrality, degree_vector, normalized_degree};
pub use eigenvector::{eigenvector_centrality, EigenvectorConfig};
pub use estrada::{
    estrada_centrality_series, estrada_index, subgraph_centrality, DEFAULT_SERIES_TERMS,
};

/// Alias for [`estrada_index`]: the exact, network-level Estrada value.
pub use estrada::estrada_index as estrada_centrality_exact;

/// Node indices ordered by descending score; equal scores keep index order.
///
/// # Example
///
/// ```
/// use rinq_core::algo::centrality::rank_nodes;
///
/// assert_eq!(rank_nodes(&[0.2, 0.9, 0.2, 0.5]), vec![1, 3, 0, 2]);
/// ```
#[must_use]
pub fn rank_nodes(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}
