//! Degree centrality and the normalized degree vector.
//!
//! # Definitions
//!
//! ```text
//! d_i   = Σ_j A_ij              (weighted degree)
//! d̂     = d / ||d||₂            (unit-length degree direction)
//! C_D(i) = d_i / (n - 1)         (classic normalized degree centrality)
//! ```
//!
//! The QUBO walk term is built from d̂, so a graph without edges (‖d‖₂ = 0)
//! is rejected here instead of letting NaN leak into the formulation.
//!
//! # Limitations
//!
//! - Ignores network structure beyond immediate neighbors
//! - A node with 10 low-degree neighbors ranks same as one with 10 hubs

use crate::error::{Error, Result};
use crate::Adjacency;
use ndarray::{Array1, Axis};

/// Weighted degree of every node (row sums).
#[must_use]
pub fn degree_vector(adj: &Adjacency) -> Array1<f64> {
    adj.matrix().sum_axis(Axis(1))
}

/// Degree vector scaled to unit L2 norm.
///
/// # Errors
///
/// [`Error::ZeroDegree`] when the graph has no edges.
pub fn normalized_degree(adj: &Adjacency) -> Result<Array1<f64>> {
    let d = degree_vector(adj);
    let norm = d.dot(&d).sqrt();
    if norm <= 0.0 {
        return Err(Error::ZeroDegree);
    }
    Ok(d / norm)
}

/// Degree centrality `d_i / (n - 1)`, in `[0, 1]` for unweighted graphs.
///
/// # Example
///
/// ```
/// use rinq_core::Adjacency;
/// use rinq_core::algo::centrality::degree_centrality;
/// use ndarray::array;
///
/// // Star: 0 is the hub
/// let adj = Adjacency::new(array![
///     [0.0, 1.0, 1.0],
///     [1.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
/// ]).unwrap();
/// let c = degree_centrality(&adj);
/// assert!((c[0] - 1.0).abs() < 1e-12);
/// assert!((c[1] - 0.5).abs() < 1e-12);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(adj: &Adjacency) -> Vec<f64> {
    let n = adj.len();
    let norm_factor = if n > 1 { (n - 1) as f64 } else { 1.0 };
    degree_vector(adj)
        .iter()
        .map(|d| d / norm_factor)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_degree_star() {
        let adj = Adjacency::new(array![
            [0.0, 1.0, 1.0, 1.0],
            [1.0, 0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
        ])
        .unwrap();

        let d = degree_vector(&adj);
        assert_eq!(d.to_vec(), vec![3.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_normalized_degree_unit_norm() {
        let adj = Adjacency::new(array![
            [0.0, 1.0, 1.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
        ])
        .unwrap();

        let d_hat = normalized_degree(&adj).unwrap();
        let norm = d_hat.dot(&d_hat).sqrt();
        assert!((norm - 1.0).abs() < 1e-12, "norm = {norm}");
        // d = (2, 1, 1), ||d|| = sqrt(6)
        assert!((d_hat[0] - 2.0 / 6f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_degree_edgeless() {
        let adj = Adjacency::new(Array2::zeros((3, 3))).unwrap();
        assert_eq!(normalized_degree(&adj).unwrap_err(), Error::ZeroDegree);
    }

    #[test]
    fn test_degree_normalization_complete() {
        let adj = Adjacency::new(array![
            [0.0, 1.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 0.0],
        ])
        .unwrap();

        for c in degree_centrality(&adj) {
            assert!((c - 1.0).abs() < 1e-6);
        }
    }
}
