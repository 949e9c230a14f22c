//! Graph algorithms over validated adjacency matrices.
//!
//! - **Centrality**: Measure node importance ([`centrality`])

/// Centrality algorithms for measuring node importance.
pub mod centrality;
