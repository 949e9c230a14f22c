// Allow minor clippy style warnings at crate level
#![allow(unused_results)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::many_single_char_names)]

//! Central-node selection in networks via QUBO formulation and annealing.
//!
//! Given an undirected weighted graph and a budget τ, pick the τ nodes that
//! are jointly most central. "Central" follows walk-based measures such as
//! eigenvector and subgraph centrality, which in protein residue networks
//! single out the residues that hold a fold together.
//!
//! - [`Adjacency`] - validated symmetric adjacency matrix with node labels
//! - [`qubo`] - builds the selection QUBO `Q = P0·T + P1·C`
//! - [`anneal`] - continuous and discrete annealing solvers
//! - [`algo::centrality`] - degree, eigenvector and Estrada centrality
//!
//! # The Formulation
//!
//! With `d̂` the normalized degree vector and `x ∈ {0,1}ⁿ` the selection:
//!
//! ```text
//! T = -(A d̂ d̂ᵗ A) - (A d̂ d̂ᵗ A A)       rewards short walks among chosen nodes
//! C = (1 - 2τ) I + (J - I)               equals (Σx - τ)² - τ² on binary x
//! Q = P0 T + P1 C                        P0 = 1/√n, P1 = 10n by default
//! ```
//!
//! Minimizing `xᵗQx` trades walk reward against the cardinality penalty.
//! P1 is large enough that the minimum always has exactly τ ones, so the
//! solvers only need to search and filter.
//!
//! # Quick Start
//!
//! ```
//! use rinq_core::{construct_qubo, solve_discrete, Adjacency};
//! use ndarray::array;
//!
//! // Path 0-1-2-3-4: the middle node is the most central
//! let adj = Adjacency::new(array![
//!     [0.0, 1.0, 0.0, 0.0, 0.0],
//!     [1.0, 0.0, 1.0, 0.0, 0.0],
//!     [0.0, 1.0, 0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0, 0.0, 1.0],
//!     [0.0, 0.0, 0.0, 1.0, 0.0],
//! ]).unwrap();
//!
//! let q = construct_qubo(&adj, 1, None, None).unwrap();
//! let outcome = solve_discrete(&q, 1, 100, (0.1, 4.0)).unwrap();
//! assert_eq!(outcome.selection.unwrap().nodes, vec![2]);
//! ```
//!
//! # Logging
//!
//! Library code emits `tracing` events only; installing a subscriber is the
//! caller's business. Solves log at `debug`, a solve with no feasible read
//! logs at `warn`.

pub mod adjacency;
pub mod algo;
pub mod anneal;
pub mod error;
pub mod qubo;

pub use adjacency::Adjacency;
pub use algo::centrality::{
    degree_centrality, eigenvector_centrality, estrada_centrality_exact,
    estrada_centrality_series, estrada_index, normalized_degree, rank_nodes,
    subgraph_centrality, EigenvectorConfig,
};
pub use anneal::{
    solve_continuous, solve_discrete, AnnealingRead, ContinuousAnnealer, ContinuousConfig,
    DiscreteAnnealer, SampleParams, SampleSet, Sampler, Selection, SimulatedAnnealingSampler,
    SolveOutcome,
};
pub use error::{Error, Result};
pub use qubo::{construct_qubo, formulate, BinaryQuadraticModel, QuboConfig, QuboMatrix};
