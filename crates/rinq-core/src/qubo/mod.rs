//! QUBO formulation of top-τ central node selection.
//!
//! # Problem
//!
//! Choose exactly τ of n nodes so that the chosen set is as "central" as
//! possible. As a QUBO:
//!
//! ```text
//! minimize xᵗQx   over x ∈ {0,1}ⁿ
//! Q = P0 T + P1 C
//! ```
//!
//! | Term | Meaning | Default weight |
//! |------|---------|----------------|
//! | T (walk) | rewards pairs reached by one- and two-step walks through high-degree nodes | P0 = 1/√n |
//! | C (cardinality) | `(Σx - τ)²` up to a constant | P1 = 10n |
//!
//! The walk term is an inexpensive stand-in for Estrada-type centrality (no
//! matrix exponential needed). Its particular mix of first and second powers
//! of A is empirical; it is not claimed to be equivalent to any exact
//! centrality measure.
//!
//! # Forms
//!
//! - [`QuboMatrix`] - dense symmetric matrix, used by the continuous solver
//! - [`BinaryQuadraticModel`] - linear + sparse pairwise form, used by samplers

mod formulate;
mod model;

pub use formulate::{construct_qubo, formulate, FormulationParams, QuboConfig, QuboMatrix};
pub use model::BinaryQuadraticModel;

pub(crate) use formulate::selected_nodes;
