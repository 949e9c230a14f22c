//! Estrada index and subgraph centrality: importance via closed walks.
//!
//! # Intuition
//!
//! `(A^k)_ii` counts closed walks of length k starting and ending at node i.
//! Weighting walks of length k by `1/k!` and summing over all k gives the
//! diagonal of the matrix exponential:
//!
//! ```text
//! SC(i) = (e^A)_ii = Σ_k (A^k)_ii / k!        (subgraph centrality)
//! EE(G) = tr(e^A)  = Σ_j exp(λ_j)             (Estrada index)
//! ```
//!
//! Short walks dominate, but long walks through dense regions still count,
//! which is why the measure separates a protein core from its surface better
//! than degree does.
//!
//! # Exact vs Series
//!
//! | Function | Method | Output |
//! |----------|--------|--------|
//! | [`estrada_index`] | symmetric eigendecomposition | scalar |
//! | [`subgraph_centrality`] | symmetric eigendecomposition | per node |
//! | [`estrada_centrality_series`] | truncated Taylor series | per node |
//!
//! # Series Stability
//!
//! `A^k` grows like `ρ(A)^k` and `k!` grows super-exponentially, so neither
//! is formed on its own. The term matrix is carried forward as
//! `T_k = T_{k-1} × A / k`, which stays of order `ρ^k / k!` throughout.
//! Terms peak near `k ≈ ρ(A)` and then shrink quickly; once K is well past
//! the spectral radius the truncation error is negligible. K is a fixed
//! budget, not a convergence test: nothing checks that the tail is small.
//!
//! # References
//!
//! - Estrada (2000). "Characterization of 3D molecular structure"
//! - Estrada & Rodríguez-Velázquez (2005). "Subgraph centrality in complex networks"

use crate::error::{Error, Result};
use crate::Adjacency;
use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::Array2;

/// Default number of series terms.
pub const DEFAULT_SERIES_TERMS: usize = 100;

/// Estrada index `Σ exp(λ_j)` over the eigenvalues of the adjacency matrix.
///
/// The adjacency is symmetric, so the spectrum is real and the symmetric
/// eigensolver applies.
///
/// # Example
///
/// ```
/// use rinq_core::Adjacency;
/// use rinq_core::algo::centrality::estrada_index;
/// use ndarray::Array2;
///
/// // Edgeless graph: e^0 = I, so the index is n
/// let adj = Adjacency::new(Array2::zeros((5, 5))).unwrap();
/// assert!((estrada_index(&adj) - 5.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn estrada_index(adj: &Adjacency) -> f64 {
    let eigen = SymmetricEigen::new(to_nalgebra(adj.matrix()));
    eigen.eigenvalues.iter().map(|lambda| lambda.exp()).sum()
}

/// Exact subgraph centrality `(e^A)_ii = Σ_j U_ij² exp(λ_j)`.
///
/// Strictly positive for every node; sums to [`estrada_index`].
#[must_use]
pub fn subgraph_centrality(adj: &Adjacency) -> Vec<f64> {
    let eigen = SymmetricEigen::new(to_nalgebra(adj.matrix()));
    let weights: Vec<f64> = eigen.eigenvalues.iter().map(|l| l.exp()).collect();

    (0..adj.len())
        .map(|i| {
            eigen
                .eigenvectors
                .row(i)
                .iter()
                .zip(&weights)
                .map(|(u, w)| u * u * w)
                .sum::<f64>()
        })
        .collect()
}

/// Per-node Estrada centrality from the first `terms` terms of the series
/// `Σ_{k=0}^{terms-1} diag(A^k) / k!`.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] if `terms` is zero.
/// - [`Error::NumericalOverflow`] if any term (or the running sum) stops
///   being finite, e.g. for weights so large that `A^k / k!` overflows
///   before the factorial catches up.
///
/// # Complexity
///
/// - Time: O(terms × V³)
/// - Space: O(V²)
#[allow(clippy::cast_precision_loss)]
pub fn estrada_centrality_series(adj: &Adjacency, terms: usize) -> Result<Vec<f64>> {
    if terms == 0 {
        return Err(Error::InvalidParameter {
            name: "terms",
            reason: "series needs at least one term".into(),
        });
    }

    let a = adj.matrix();
    let n = adj.len();

    // k = 0: A^0 / 0! = I
    let mut term: Array2<f64> = Array2::eye(n);
    let mut centrality = vec![1.0; n];

    for k in 1..terms {
        term = term.dot(a) / k as f64;

        for (i, c) in centrality.iter_mut().enumerate() {
            *c += term[[i, i]];
        }

        if term.iter().any(|v| !v.is_finite()) || centrality.iter().any(|c| !c.is_finite()) {
            return Err(Error::NumericalOverflow { term: k });
        }
    }

    Ok(centrality)
}

fn to_nalgebra(m: &Array2<f64>) -> DMatrix<f64> {
    let (rows, cols) = m.dim();
    DMatrix::from_fn(rows, cols, |i, j| m[[i, j]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn path3() -> Adjacency {
        Adjacency::new(array![
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_estrada_index_single_edge() {
        // K2 spectrum is {1, -1}
        let adj = Adjacency::new(array![[0.0, 1.0], [1.0, 0.0]]).unwrap();
        let expected = 1f64.exp() + (-1f64).exp();
        assert!((estrada_index(&adj) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_subgraph_centrality_sums_to_index() {
        let adj = path3();
        let sc = subgraph_centrality(&adj);
        let total: f64 = sc.iter().sum();
        assert!((total - estrada_index(&adj)).abs() < 1e-9);
        // Middle of the path closes more walks than the ends
        assert!(sc[1] > sc[0]);
        assert!((sc[0] - sc[2]).abs() < 1e-9);
    }

    #[test]
    fn test_series_matches_exact() {
        let adj = path3();
        let exact = subgraph_centrality(&adj);
        let series = estrada_centrality_series(&adj, DEFAULT_SERIES_TERMS).unwrap();
        for (e, s) in exact.iter().zip(&series) {
            assert!((e - s).abs() < 1e-9, "exact={e} series={s}");
        }
    }

    #[test]
    fn test_series_single_term_is_identity() {
        let series = estrada_centrality_series(&path3(), 1).unwrap();
        assert_eq!(series, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_series_zero_terms_rejected() {
        let err = estrada_centrality_series(&path3(), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "terms", .. }));
    }

    #[test]
    fn test_series_overflow_reported() {
        let adj = Adjacency::new(array![[0.0, 1e200], [1e200, 0.0]]).unwrap();
        let err = estrada_centrality_series(&adj, 5).unwrap_err();
        assert_eq!(err, Error::NumericalOverflow { term: 2 });
    }
}
