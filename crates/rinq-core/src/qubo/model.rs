//! Binary quadratic model: the QUBO in linear + pairwise form.
//!
//! Samplers work on sparse couplings rather than a dense matrix:
//!
//! ```text
//! E(x) = offset + Σ_i h_i x_i + Σ_{i<j} J_ij x_i x_j
//! h_i  = Q_ii
//! J_ij = Q_ij + Q_ji
//! ```
//!
//! Since `x_i² = x_i` for binary variables, `E(x) = xᵗQx` exactly.

use super::formulate::{check_assignment, QuboMatrix};
use crate::error::Result;
use serde::Serialize;

/// Linear and pairwise coefficients over binary variables `0..n`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryQuadraticModel {
    linear: Vec<f64>,
    quadratic: Vec<(usize, usize, f64)>,
    offset: f64,
}

impl BinaryQuadraticModel {
    /// Convert a QUBO matrix. Zero couplings are dropped.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn from_qubo(qubo: &QuboMatrix) -> Self {
        let q = qubo.matrix();
        let n = qubo.len();

        let linear = (0..n).map(|i| q[[i, i]]).collect();
        let mut quadratic = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let coupling = q[[i, j]] + q[[j, i]];
                if coupling != 0.0 {
                    quadratic.push((i, j, coupling));
                }
            }
        }

        Self {
            linear,
            quadratic,
            offset: 0.0,
        }
    }

    /// Number of variables.
    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.linear.len()
    }

    /// Linear biases `h_i`.
    #[must_use]
    pub fn linear(&self) -> &[f64] {
        &self.linear
    }

    /// Couplings `(i, j, J_ij)` with `i < j`.
    #[must_use]
    pub fn quadratic(&self) -> &[(usize, usize, f64)] {
        &self.quadratic
    }

    /// Constant energy offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Energy of a 0/1 assignment.
    ///
    /// # Errors
    ///
    /// Same as [`QuboMatrix::cost`].
    pub fn energy(&self, sample: &[u8]) -> Result<f64> {
        check_assignment(sample, self.num_variables())?;
        Ok(self.energy_unchecked(sample))
    }

    pub(crate) fn energy_unchecked(&self, sample: &[u8]) -> f64 {
        let linear: f64 = self
            .linear
            .iter()
            .zip(sample)
            .filter(|(_, &x)| x == 1)
            .map(|(h, _)| h)
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .filter(|&&(i, j, _)| sample[i] == 1 && sample[j] == 1)
            .map(|&(_, _, w)| w)
            .sum();
        self.offset + linear + quadratic
    }

    /// Per-variable coupling lists: `neighbors[i]` holds `(j, J_ij)` for every
    /// coupling touching `i`.
    #[must_use]
    pub fn neighbors(&self) -> Vec<Vec<(usize, f64)>> {
        let mut neighbors = vec![Vec::new(); self.num_variables()];
        for &(i, j, w) in &self.quadratic {
            neighbors[i].push((j, w));
            neighbors[j].push((i, w));
        }
        neighbors
    }
}
