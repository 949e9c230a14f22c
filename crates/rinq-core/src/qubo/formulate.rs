//! QUBO matrix construction for "pick the τ most central nodes".

use crate::adjacency::SYMMETRY_TOLERANCE;
use crate::algo::centrality::normalized_degree;
use crate::error::{Error, Result};
use crate::Adjacency;
use ndarray::Array2;
use serde::Serialize;

/// Weights of the two QUBO terms. `None` selects the size-dependent default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuboConfig {
    /// P0, weight of the walk (centrality) term. Default `1/√n`.
    pub centrality_weight: Option<f64>,
    /// P1, weight of the cardinality penalty. Default `10n`, large enough that
    /// no infeasible assignment beats a feasible one for moderate n.
    pub penalty_weight: Option<f64>,
}

/// Parameters a [`QuboMatrix`] was formulated with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormulationParams {
    /// Required number of selected nodes.
    pub tau: usize,
    /// Resolved centrality weight P0.
    pub centrality_weight: f64,
    /// Resolved penalty weight P1.
    pub penalty_weight: f64,
}

/// Symmetric QUBO matrix: minimize `xᵗQx` over binary `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuboMatrix {
    matrix: Array2<f64>,
    params: Option<FormulationParams>,
}

impl QuboMatrix {
    /// Wrap a caller-built QUBO matrix.
    ///
    /// # Errors
    ///
    /// [`Error::NotSquare`], [`Error::EmptyGraph`], [`Error::InvalidWeight`]
    /// for non-finite entries, [`Error::NotSymmetric`].
    pub fn from_array(matrix: Array2<f64>) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(Error::NotSquare { rows, cols });
        }
        if rows == 0 {
            return Err(Error::EmptyGraph);
        }
        for ((row, col), &value) in matrix.indexed_iter() {
            if !value.is_finite() {
                return Err(Error::InvalidWeight { row, col, value });
            }
            let transposed = matrix[[col, row]];
            if col > row && (value - transposed).abs() > SYMMETRY_TOLERANCE {
                return Err(Error::NotSymmetric {
                    row,
                    col,
                    value,
                    transposed,
                });
            }
        }
        Ok(Self {
            matrix,
            params: None,
        })
    }

    /// Number of binary variables (nodes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    /// Always `false`: empty problems are rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// The matrix itself.
    #[must_use]
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Formulation parameters, if built by [`formulate`].
    #[must_use]
    pub fn params(&self) -> Option<FormulationParams> {
        self.params
    }

    /// Objective value `xᵗQx` for a 0/1 assignment.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] on a wrong-length assignment,
    /// [`Error::InvalidParameter`] if an entry is not 0 or 1.
    pub fn cost(&self, assignment: &[u8]) -> Result<f64> {
        check_assignment(assignment, self.len())?;
        Ok(self.cost_unchecked(assignment))
    }

    /// `xᵗQx` restricted to the selected entries: `Σ_{i,j ∈ S} Q_ij`.
    pub(crate) fn cost_unchecked(&self, assignment: &[u8]) -> f64 {
        let selected: Vec<usize> = selected_nodes(assignment);
        selected
            .iter()
            .map(|&i| selected.iter().map(|&j| self.matrix[[i, j]]).sum::<f64>())
            .sum()
    }
}

/// Indices of the variables set to 1.
pub(crate) fn selected_nodes(assignment: &[u8]) -> Vec<usize> {
    assignment
        .iter()
        .enumerate()
        .filter(|(_, &x)| x == 1)
        .map(|(i, _)| i)
        .collect()
}

pub(crate) fn check_assignment(assignment: &[u8], n: usize) -> Result<()> {
    if assignment.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            actual: assignment.len(),
        });
    }
    if let Some(bad) = assignment.iter().find(|&&x| x > 1) {
        return Err(Error::InvalidParameter {
            name: "assignment",
            reason: format!("entries must be 0 or 1, found {bad}"),
        });
    }
    Ok(())
}

/// Build the QUBO matrix selecting `tau` central nodes of `adj`.
///
/// ```text
/// d̂ = d / ||d||₂
/// C = (1 - 2τ) I + (J - I)                     exactly-τ penalty
/// T = -(A d̂ d̂ᵗ A) - (A d̂ d̂ᵗ A A)              walk term
/// Q = P0 T + P1 C
/// ```
///
/// With `u = A d̂` and `v = A u` the walk term is `-(u uᵗ) - (u vᵗ)`. The
/// second product is not symmetric in general; it is stored as its
/// symmetric part `½(u vᵗ + v uᵗ)`, which gives every assignment exactly the
/// same cost while keeping Q symmetric entry for entry.
///
/// For any feasible x the penalty contributes the constant `-P1 τ²`; each
/// extra or missing node costs at least `P1` more.
///
/// # Errors
///
/// - [`Error::InvalidTau`] if `tau > n`
/// - [`Error::InvalidParameter`] for a negative or non-finite P0, or a
///   non-positive or non-finite P1
/// - [`Error::ZeroDegree`] if the graph has no edges
#[allow(clippy::cast_precision_loss)]
pub fn formulate(adj: &Adjacency, tau: usize, config: QuboConfig) -> Result<QuboMatrix> {
    let n = adj.len();
    if tau > n {
        return Err(Error::InvalidTau { tau, n });
    }

    let p0 = config
        .centrality_weight
        .unwrap_or_else(|| 1.0 / (n as f64).sqrt());
    let p1 = config.penalty_weight.unwrap_or(10.0 * n as f64);

    if !p0.is_finite() || p0 < 0.0 {
        return Err(Error::InvalidParameter {
            name: "centrality_weight",
            reason: format!("must be finite and nonnegative, got {p0}"),
        });
    }
    if !p1.is_finite() || p1 <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "penalty_weight",
            reason: format!("must be finite and positive, got {p1}"),
        });
    }

    let a = adj.matrix();
    let d_hat = normalized_degree(adj)?;
    let u = a.dot(&d_hat);
    let v = a.dot(&u);

    let diagonal_penalty = 1.0 - 2.0 * tau as f64;
    let mut matrix = Array2::zeros((n, n));

    for i in 0..n {
        for j in i..n {
            let walk = u[i] * u[j] + 0.5 * (u[i] * v[j] + v[i] * u[j]);
            let penalty = if i == j { diagonal_penalty } else { 1.0 };
            let q = -p0 * walk + p1 * penalty;
            matrix[[i, j]] = q;
            matrix[[j, i]] = q;
        }
    }

    tracing::debug!(
        n,
        tau,
        centrality_weight = p0,
        penalty_weight = p1,
        "formulated QUBO"
    );

    Ok(QuboMatrix {
        matrix,
        params: Some(FormulationParams {
            tau,
            centrality_weight: p0,
            penalty_weight: p1,
        }),
    })
}

/// `construct_qubo(adj, τ, P0?, P1?)`: [`formulate`] with optional weights.
///
/// # Example
///
/// ```
/// use rinq_core::{construct_qubo, Adjacency};
/// use ndarray::array;
///
/// let adj = Adjacency::new(array![
///     [0.0, 1.0, 1.0],
///     [1.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
/// ]).unwrap();
/// let q = construct_qubo(&adj, 1, None, None).unwrap();
///
/// // The hub is the cheapest single selection
/// let hub = q.cost(&[1, 0, 0]).unwrap();
/// let leaf = q.cost(&[0, 1, 0]).unwrap();
/// assert!(hub < leaf);
/// ```
pub fn construct_qubo(
    adj: &Adjacency,
    tau: usize,
    centrality_weight: Option<f64>,
    penalty_weight: Option<f64>,
) -> Result<QuboMatrix> {
    formulate(
        adj,
        tau,
        QuboConfig {
            centrality_weight,
            penalty_weight,
        },
    )
}
