//! Central-node selection in networks: QUBO formulation, annealing solvers
//! and walk-based centrality.
//!
//! This crate is a thin facade: it re-exports `rinq-core` and adds one
//! convenience entry point. The command-line wrapper lives in `rinq-cli`.
//!
//! # Example
//!
//! ```rust
//! use rinq::{select_central_nodes, Adjacency, SolverKind};
//!
//! let labels = ["GLY12", "ALA7", "SER30", "LYS4"].map(String::from).to_vec();
//! let adj = Adjacency::from_edges(labels, [
//!     ("GLY12", "ALA7", 1.0),
//!     ("GLY12", "SER30", 1.0),
//!     ("GLY12", "LYS4", 1.0),
//! ]).unwrap();
//!
//! let outcome = select_central_nodes(&adj, 1, SolverKind::Discrete).unwrap();
//! let selection = outcome.selection.unwrap();
//! assert_eq!(selection.labels(&adj), vec!["GLY12"]);
//! ```

// Re-export core types
pub use rinq_core::{
    construct_qubo, degree_centrality, eigenvector_centrality, estrada_centrality_exact,
    estrada_centrality_series, estrada_index, formulate, normalized_degree, rank_nodes,
    solve_continuous, solve_discrete, subgraph_centrality, Adjacency, AnnealingRead,
    BinaryQuadraticModel, ContinuousAnnealer, ContinuousConfig, DiscreteAnnealer,
    EigenvectorConfig, Error, QuboConfig, QuboMatrix, Result, SampleParams, SampleSet, Sampler,
    Selection, SimulatedAnnealingSampler, SolveOutcome,
};

/// QUBO construction and the binary quadratic model.
pub mod qubo {
    pub use rinq_core::qubo::*;
}

/// Annealing solvers and the keep-best reduction.
pub mod anneal {
    pub use rinq_core::anneal::*;
}

/// Centrality measures.
pub mod algo {
    pub use rinq_core::algo::*;
}

/// Which solver [`select_central_nodes`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverKind {
    /// [`ContinuousAnnealer`] with default settings.
    Continuous,
    /// [`DiscreteAnnealer`] over [`SimulatedAnnealingSampler`] with default settings.
    #[default]
    Discrete,
}

/// Formulate the selection QUBO with default weights and solve it.
///
/// # Errors
///
/// Any formulation or solver error; an unsuccessful search is not an error
/// (see [`SolveOutcome::selection`]).
pub fn select_central_nodes(adj: &Adjacency, tau: usize, solver: SolverKind) -> Result<SolveOutcome> {
    let qubo = formulate(adj, tau, QuboConfig::default())?;
    match solver {
        SolverKind::Continuous => ContinuousAnnealer::default().solve(&qubo, tau),
        SolverKind::Discrete => {
            DiscreteAnnealer::new(SimulatedAnnealingSampler::default(), SampleParams::default())
                .solve(&qubo, tau)
        }
    }
}
