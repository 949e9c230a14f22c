//! Stochastic solvers for the node-selection QUBO.
//!
//! Both solvers run many independent reads and keep the best feasible one
//! (exactly τ nodes selected):
//!
//! | Solver | Search space | Feasibility |
//! |--------|--------------|-------------|
//! | [`ContinuousAnnealer`] | relaxation over `[0,1]ⁿ`, rounded | penalty during search, filter after |
//! | [`DiscreteAnnealer`] | binary assignments via a [`Sampler`] | filter after sampling |
//!
//! # Reads and the Reduction
//!
//! A read is a pure function `(Q, τ, seed) → AnnealingRead`; read `r` uses
//! seed `base_seed + r`. Reads share nothing, so they fan out over rayon.
//! Fan-in goes through [`BestRead`], which replaces its best only on a
//! strictly lower energy. Rayon's reduction keeps read order, so among
//! equal-energy feasible reads the one with the lowest read index wins, and
//! the result does not depend on thread scheduling.
//!
//! # No Feasible Read
//!
//! Not an error: [`SolveOutcome::selection`] is `None` and
//! [`SolveOutcome::cost`] is `+∞`. Callers may retry with more reads.

mod continuous;
mod discrete;
mod sampler;

pub use continuous::{
    solve_continuous, ContinuousAnnealer, ContinuousConfig, DEFAULT_FEASIBILITY_PENALTY,
};
pub use discrete::{solve_discrete, DiscreteAnnealer, SampleParams, SampleSet, Sampler};
pub use sampler::SimulatedAnnealingSampler;

use crate::error::{Error, Result};
use crate::qubo::{selected_nodes, QuboMatrix};
use crate::Adjacency;
use serde::Serialize;

/// One solver trial: a binary assignment and its QUBO energy `xᵗQx`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnealingRead {
    /// 0/1 value per variable.
    pub assignment: Vec<u8>,
    /// `xᵗQx` for `assignment`.
    pub energy: f64,
}

impl AnnealingRead {
    /// Number of variables set to 1.
    #[must_use]
    pub fn num_selected(&self) -> usize {
        self.assignment.iter().filter(|&&x| x == 1).count()
    }

    /// Whether exactly `tau` variables are set.
    #[must_use]
    pub fn is_feasible(&self, tau: usize) -> bool {
        self.num_selected() == tau
    }
}

/// Best feasible read of a solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Indices of the selected nodes, ascending.
    pub nodes: Vec<usize>,
    /// Full 0/1 assignment.
    pub assignment: Vec<u8>,
    /// QUBO energy of the assignment.
    pub energy: f64,
}

impl Selection {
    fn from_read(read: AnnealingRead) -> Self {
        Self {
            nodes: selected_nodes(&read.assignment),
            assignment: read.assignment,
            energy: read.energy,
        }
    }

    /// Selected nodes under the adjacency's node ordering.
    #[must_use]
    pub fn labels<'a>(&self, adj: &'a Adjacency) -> Vec<&'a str> {
        self.nodes.iter().filter_map(|&i| adj.label(i)).collect()
    }
}

/// Result of a solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveOutcome {
    /// Best feasible read, or `None` if no read selected exactly τ nodes.
    pub selection: Option<Selection>,
    /// Reads that selected exactly τ nodes.
    pub feasible_reads: usize,
    /// Reads performed.
    pub total_reads: usize,
}

impl SolveOutcome {
    /// Energy of the selection, `+∞` when there is none.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.selection
            .as_ref()
            .map_or(f64::INFINITY, |s| s.energy)
    }

    /// Whether a feasible selection was found.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.selection.is_some()
    }
}

/// Keep-best reduction cell over reads.
///
/// `offer` replaces the best only on a strictly lower energy, so
/// [`BestRead::cost`] never increases and the earliest of several
/// equal-energy reads is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct BestRead {
    tau: usize,
    best: Option<AnnealingRead>,
    feasible_reads: usize,
    total_reads: usize,
}

impl BestRead {
    /// Empty cell for selections of size `tau`.
    #[must_use]
    pub fn new(tau: usize) -> Self {
        Self {
            tau,
            best: None,
            feasible_reads: 0,
            total_reads: 0,
        }
    }

    /// Record a read. Returns `true` if it became the new best.
    pub fn offer(&mut self, read: AnnealingRead) -> bool {
        self.total_reads += 1;
        if !read.is_feasible(self.tau) {
            return false;
        }
        self.feasible_reads += 1;

        if read.energy < self.cost() {
            self.best = Some(read);
            true
        } else {
            false
        }
    }

    /// Combine two cells; `self` holds the earlier reads and wins ties.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.total_reads += other.total_reads;
        self.feasible_reads += other.feasible_reads;
        if let Some(read) = other.best {
            if read.energy < self.cost() {
                self.best = Some(read);
            }
        }
        self
    }

    /// Best feasible energy so far, `+∞` if none.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |r| r.energy)
    }

    /// Finish the reduction.
    #[must_use]
    pub fn into_outcome(self) -> SolveOutcome {
        SolveOutcome {
            selection: self.best.map(Selection::from_read),
            feasible_reads: self.feasible_reads,
            total_reads: self.total_reads,
        }
    }
}

/// Reject a τ the QUBO cannot be solved for: larger than the problem, or
/// different from the τ its cardinality penalty was built around.
fn check_tau(qubo: &QuboMatrix, tau: usize) -> Result<()> {
    let n = qubo.len();
    if tau > n {
        return Err(Error::InvalidTau { tau, n });
    }
    match qubo.params() {
        Some(params) if params.tau != tau => Err(Error::InvalidParameter {
            name: "tau",
            reason: format!("QUBO was formulated for tau = {}, got {tau}", params.tau),
        }),
        _ => Ok(()),
    }
}

fn log_outcome(solver: &'static str, tau: usize, outcome: &SolveOutcome) {
    match &outcome.selection {
        Some(selection) => tracing::debug!(
            solver,
            tau,
            energy = selection.energy,
            feasible = outcome.feasible_reads,
            total = outcome.total_reads,
            "solve finished"
        ),
        None => tracing::warn!(
            solver,
            tau,
            total = outcome.total_reads,
            "no read selected exactly tau nodes"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(assignment: &[u8], energy: f64) -> AnnealingRead {
        AnnealingRead {
            assignment: assignment.to_vec(),
            energy,
        }
    }

    #[test]
    fn test_offer_keeps_strictly_better() {
        let mut best = BestRead::new(1);
        assert!(best.offer(read(&[1, 0, 0], -3.0)));
        assert!(!best.offer(read(&[0, 1, 0], -3.0)));
        assert!(!best.offer(read(&[0, 0, 1], -1.0)));
        assert!(best.offer(read(&[0, 0, 1], -4.0)));

        let outcome = best.into_outcome();
        assert_eq!(outcome.selection.unwrap().nodes, vec![2]);
        assert_eq!(outcome.feasible_reads, 4);
        assert_eq!(outcome.total_reads, 4);
    }

    #[test]
    fn test_offer_ignores_infeasible() {
        let mut best = BestRead::new(1);
        assert!(!best.offer(read(&[1, 1, 0], -100.0)));
        assert!(!best.offer(read(&[0, 0, 0], -100.0)));

        let outcome = best.into_outcome();
        assert!(outcome.selection.is_none());
        assert_eq!(outcome.cost(), f64::INFINITY);
        assert_eq!(outcome.feasible_reads, 0);
        assert_eq!(outcome.total_reads, 2);
    }

    #[test]
    fn test_merge_prefers_left_on_ties() {
        let mut left = BestRead::new(1);
        left.offer(read(&[1, 0], -2.0));
        let mut right = BestRead::new(1);
        right.offer(read(&[0, 1], -2.0));

        let merged = left.clone().merge(right).into_outcome();
        assert_eq!(merged.selection.unwrap().nodes, vec![0]);
        assert_eq!(merged.total_reads, 2);

        let mut better = BestRead::new(1);
        better.offer(read(&[0, 1], -5.0));
        let merged = left.merge(better).into_outcome();
        assert_eq!(merged.selection.unwrap().nodes, vec![1]);
    }

    #[test]
    fn test_selection_labels() {
        let adj = Adjacency::from_edges(
            vec!["GLY12".into(), "ALA7".into(), "SER30".into()],
            [("GLY12", "ALA7", 1.0), ("ALA7", "SER30", 1.0)],
        )
        .unwrap();
        let selection = Selection::from_read(read(&[0, 1, 1], -1.0));
        assert_eq!(selection.labels(&adj), vec!["ALA7", "SER30"]);
    }
}
