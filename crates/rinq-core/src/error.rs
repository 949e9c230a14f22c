//! Error types for rinq-core.

use thiserror::Error;

/// Error type for formulation, solving and centrality operations.
///
/// "No feasible selection" is not an error; solvers report it through
/// [`SolveOutcome::selection`](crate::anneal::SolveOutcome) being `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Adjacency or QUBO matrix is not square.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Matrix is not symmetric at the given position.
    #[error("matrix is not symmetric at ({row}, {col}): {value} vs {transposed}")]
    NotSymmetric {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Entry at (row, col).
        value: f64,
        /// Entry at (col, row).
        transposed: f64,
    },

    /// Adjacency matrix has a self loop.
    #[error("adjacency diagonal must be zero, found {value} at node {index}")]
    NonZeroDiagonal {
        /// Node index.
        index: usize,
        /// Diagonal entry.
        value: f64,
    },

    /// Entry is negative or not finite.
    #[error("invalid weight {value} at ({row}, {col})")]
    InvalidWeight {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Offending entry.
        value: f64,
    },

    /// Graph has no nodes.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// Degree vector has zero norm, so it cannot be normalized.
    #[error("graph has no edges: degree vector cannot be normalized")]
    ZeroDegree,

    /// Requested selection size is outside `[0, n]`.
    #[error("tau must lie in [0, {n}], got {tau}")]
    InvalidTau {
        /// Requested number of selected nodes.
        tau: usize,
        /// Number of nodes.
        n: usize,
    },

    /// A numeric parameter is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Inverse-temperature range is not `0 < min <= max`.
    #[error("invalid beta range ({min}, {max}): expected 0 < min <= max")]
    InvalidBetaRange {
        /// Lower inverse temperature.
        min: f64,
        /// Upper inverse temperature.
        max: f64,
    },

    /// Vector length does not match the problem size.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Problem size.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// Node ordering does not cover the matrix.
    #[error("expected {expected} node labels, got {actual}")]
    LabelCountMismatch {
        /// Number of matrix rows.
        expected: usize,
        /// Number of labels supplied.
        actual: usize,
    },

    /// Node ordering contains the same label twice.
    #[error("duplicate node label: {0}")]
    DuplicateLabel(String),

    /// Edge references a node missing from the ordering.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Power iteration hit its cap before meeting the tolerance.
    #[error("eigenvector iteration did not converge within {iterations} iterations")]
    NotConverged {
        /// Iterations performed.
        iterations: usize,
    },

    /// Series term overflowed or produced NaN.
    #[error("non-finite value in series term {term}")]
    NumericalOverflow {
        /// Index k of the offending term `A^k / k!`.
        term: usize,
    },

    /// Sampler returned reads that do not match the model.
    #[error("sampler contract violated: {0}")]
    SamplerContract(String),
}

impl Error {
    /// Whether the error is an input precondition violation (caught before
    /// any computation runs).
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        !matches!(
            self,
            Self::NotConverged { .. } | Self::NumericalOverflow { .. } | Self::SamplerContract(_)
        )
    }
}

/// Result type for rinq-core operations.
pub type Result<T> = std::result::Result<T, Error>;
