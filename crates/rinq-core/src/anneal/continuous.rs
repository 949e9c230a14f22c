//! Continuous-relaxation annealer.
//!
//! # Algorithm
//!
//! Each read searches the box `[0,1]ⁿ` with a generalized simulated
//! annealing in the style of dual annealing:
//!
//! ```text
//! T(k)  = T₀ (2^(q_v-1) - 1) / ((k+2)^(q_v-1) - 1)     visiting temperature
//! step  = (T(k)/T₀) × tan(π(U - ½))                    Cauchy visit, U ~ U[0,1)
//! T_a   = T(k) / (k+1)                                  acceptance temperature
//! ```
//!
//! Per iteration the read tries `2n` candidates: n moves of the whole vector,
//! then one move per coordinate. Candidates are wrapped back into the box and
//! accepted by the Metropolis rule at `T_a`.
//!
//! The objective rounds each candidate to `{0,1}ⁿ`. A rounding with the
//! wrong number of ones scores the flat feasibility penalty; a feasible one
//! scores its true `xᵗQx`. The penalty steers the relaxation toward feasible
//! corners; it only acts at this rounding stage and is unrelated to the
//! cardinality weight P1 inside Q.
//!
//! # Limitations
//!
//! The objective is piecewise constant, so there is no gradient and no
//! local polishing step. A read that never rounds to a feasible corner
//! contributes nothing; with few reads and large n the solve can come back
//! empty. When τ = 0 or τ = n exactly one corner is feasible and the search
//! has to stumble onto it.

use super::{check_tau, log_outcome, AnnealingRead, BestRead, SolveOutcome};
use crate::error::{Error, Result};
use crate::qubo::QuboMatrix;
use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use rayon::prelude::*;
use std::f64::consts::PI;

/// Objective value for candidates that round to the wrong cardinality.
pub const DEFAULT_FEASIBILITY_PENALTY: f64 = 1e6;

/// Configuration for [`ContinuousAnnealer`].
#[derive(Debug, Clone, Copy)]
pub struct ContinuousConfig {
    /// Independent reads per solve.
    pub num_reads: usize,
    /// Annealing iterations per read.
    pub max_iterations: usize,
    /// Initial visiting temperature T₀.
    pub initial_temperature: f64,
    /// Visiting parameter q_v, in (1, 3). Larger values cool more slowly.
    pub visiting_param: f64,
    /// Objective value of candidates with the wrong number of ones.
    /// Must exceed every feasible cost.
    pub feasibility_penalty: f64,
    /// Base seed; read `r` uses `seed + r`.
    pub seed: u64,
    /// Run reads on the rayon pool.
    pub parallel: bool,
}

impl Default for ContinuousConfig {
    fn default() -> Self {
        Self {
            num_reads: 1000,
            max_iterations: 100,
            initial_temperature: 5230.0,
            visiting_param: 2.62,
            feasibility_penalty: DEFAULT_FEASIBILITY_PENALTY,
            seed: 42,
            parallel: true,
        }
    }
}

impl ContinuousConfig {
    fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "initial_temperature",
                reason: format!("must be finite and positive, got {}", self.initial_temperature),
            });
        }
        if !(self.visiting_param > 1.0 && self.visiting_param < 3.0) {
            return Err(Error::InvalidParameter {
                name: "visiting_param",
                reason: format!("must lie in (1, 3), got {}", self.visiting_param),
            });
        }
        if !self.feasibility_penalty.is_finite() {
            return Err(Error::InvalidParameter {
                name: "feasibility_penalty",
                reason: format!("must be finite, got {}", self.feasibility_penalty),
            });
        }
        Ok(())
    }
}

/// Solves a QUBO by continuous relaxation, rounding and feasibility filtering.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContinuousAnnealer {
    config: ContinuousConfig,
}

impl ContinuousAnnealer {
    /// Create an annealer.
    #[must_use]
    pub const fn new(config: ContinuousConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ContinuousConfig {
        &self.config
    }

    /// Run `num_reads` reads and keep the best feasible one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTau`] if `tau` exceeds the problem size,
    /// [`Error::InvalidParameter`] for an invalid configuration or a `tau`
    /// other than the one `qubo` was formulated for.
    pub fn solve(&self, qubo: &QuboMatrix, tau: usize) -> Result<SolveOutcome> {
        self.config.validate()?;
        check_tau(qubo, tau)?;
        self.check_penalty(qubo, tau);

        let seed = self.config.seed;
        let best = if self.config.parallel {
            (0..self.config.num_reads)
                .into_par_iter()
                .map(|r| self.read(qubo, tau, seed.wrapping_add(r as u64)))
                .fold(
                    || BestRead::new(tau),
                    |mut acc, read| {
                        acc.offer(read);
                        acc
                    },
                )
                .reduce(|| BestRead::new(tau), BestRead::merge)
        } else {
            let mut best = BestRead::new(tau);
            for r in 0..self.config.num_reads {
                let read = self.read(qubo, tau, seed.wrapping_add(r as u64));
                if best.offer(read) {
                    tracing::trace!(read = r, cost = best.cost(), "new best read");
                }
            }
            best
        };

        let outcome = best.into_outcome();
        log_outcome("continuous", tau, &outcome);
        Ok(outcome)
    }

    /// One independent read: anneal from a random point and round the best
    /// point visited.
    ///
    /// The returned energy is the true `xᵗQx` of the rounded assignment,
    /// feasible or not.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn read(&self, qubo: &QuboMatrix, tau: usize, seed: u64) -> AnnealingRead {
        let n = qubo.len();
        let cfg = &self.config;
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let mut bits = vec![0u8; n];

        let mut objective = |x: &[f64]| -> f64 {
            round_into(x, &mut bits);
            let ones = bits.iter().filter(|&&b| b == 1).count();
            if ones == tau {
                qubo.cost_unchecked(&bits)
            } else {
                cfg.feasibility_penalty
            }
        };

        let mut current: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
        let mut current_energy = objective(&current);
        let mut best = current.clone();
        let mut best_energy = current_energy;
        let mut candidate = vec![0.0; n];

        for k in 0..cfg.max_iterations {
            let temperature = self.visiting_temperature(k);
            let scale = temperature / cfg.initial_temperature;
            let acceptance = temperature / (k + 1) as f64;

            for step in 0..2 * n {
                candidate.copy_from_slice(&current);
                if step < n {
                    for x in &mut candidate {
                        *x = wrap_unit(*x + scale * cauchy(&mut rng));
                    }
                } else {
                    let i = step - n;
                    candidate[i] = wrap_unit(candidate[i] + scale * cauchy(&mut rng));
                }

                let energy = objective(&candidate);
                let delta = energy - current_energy;
                if delta <= 0.0 || rng.gen::<f64>() < (-delta / acceptance).exp() {
                    std::mem::swap(&mut current, &mut candidate);
                    current_energy = energy;
                    if energy < best_energy {
                        best.copy_from_slice(&current);
                        best_energy = energy;
                    }
                }
            }
        }

        let mut assignment = vec![0u8; n];
        round_into(&best, &mut assignment);
        AnnealingRead {
            energy: qubo.cost_unchecked(&assignment),
            assignment,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn visiting_temperature(&self, k: usize) -> f64 {
        let exponent = self.config.visiting_param - 1.0;
        let t1 = 2f64.powf(exponent) - 1.0;
        let t2 = ((k + 2) as f64).powf(exponent) - 1.0;
        self.config.initial_temperature * t1 / t2
    }

    /// Warn when a feasible cost could reach the penalty.
    fn check_penalty(&self, qubo: &QuboMatrix, tau: usize) {
        let bound = max_feasible_cost(qubo, tau);
        if self.config.feasibility_penalty <= bound {
            tracing::warn!(
                penalty = self.config.feasibility_penalty,
                bound,
                "feasibility penalty does not dominate feasible costs"
            );
        }
    }
}

/// Upper bound on `xᵗQx` over assignments with exactly τ ones.
///
/// Such a cost sums τ² entries of Q, so it cannot exceed the sum of the τ²
/// largest entries.
fn max_feasible_cost(qubo: &QuboMatrix, tau: usize) -> f64 {
    let mut entries: Vec<f64> = qubo.matrix().iter().copied().collect();
    entries.sort_unstable_by(|a, b| b.total_cmp(a));
    entries.iter().take(tau * tau).sum()
}

/// `solve_continuous(Q, τ, num_reads)` with default settings.
///
/// # Example
///
/// ```
/// use rinq_core::{construct_qubo, solve_continuous, Adjacency};
/// use ndarray::array;
///
/// // Star: the hub is the single most central node
/// let adj = Adjacency::new(array![
///     [0.0, 1.0, 1.0, 1.0],
///     [1.0, 0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0, 0.0],
/// ]).unwrap();
/// let q = construct_qubo(&adj, 1, None, None).unwrap();
/// let outcome = solve_continuous(&q, 1, 20).unwrap();
/// assert_eq!(outcome.selection.unwrap().nodes, vec![0]);
/// ```
pub fn solve_continuous(qubo: &QuboMatrix, tau: usize, num_reads: usize) -> Result<SolveOutcome> {
    ContinuousAnnealer::new(ContinuousConfig {
        num_reads,
        ..Default::default()
    })
    .solve(qubo, tau)
}

fn round_into(x: &[f64], bits: &mut [u8]) {
    for (b, &v) in bits.iter_mut().zip(x) {
        *b = u8::from(v.round() >= 1.0);
    }
}

fn wrap_unit(x: f64) -> f64 {
    x.rem_euclid(1.0)
}

fn cauchy<R: Rng>(rng: &mut R) -> f64 {
    (PI * (rng.gen::<f64>() - 0.5)).tan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{construct_qubo, Adjacency};
    use ndarray::{array, Array2};

    fn complete(n: usize) -> Adjacency {
        let mut m = Array2::ones((n, n));
        m.diag_mut().fill(0.0);
        Adjacency::new(m).unwrap()
    }

    fn small_config(num_reads: usize) -> ContinuousConfig {
        ContinuousConfig {
            num_reads,
            max_iterations: 50,
            ..Default::default()
        }
    }

    #[test]
    fn test_star_selects_hub() {
        let adj = Adjacency::new(array![
            [0.0, 1.0, 1.0, 1.0, 1.0],
            [1.0, 0.0, 0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0, 0.0],
        ])
        .unwrap();
        let q = construct_qubo(&adj, 1, None, None).unwrap();

        let outcome = ContinuousAnnealer::new(small_config(20)).solve(&q, 1).unwrap();
        let selection = outcome.selection.unwrap();
        assert_eq!(selection.nodes, vec![0]);
        assert!((selection.energy - q.cost(&selection.assignment).unwrap()).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let q = construct_qubo(&complete(5), 2, None, None).unwrap();
        let parallel = ContinuousAnnealer::new(small_config(16)).solve(&q, 2).unwrap();
        let sequential = ContinuousAnnealer::new(ContinuousConfig {
            parallel: false,
            ..small_config(16)
        })
        .solve(&q, 2)
        .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_single_feasible_corner() {
        let q = construct_qubo(&complete(4), 0, None, None).unwrap();
        let none = ContinuousAnnealer::new(small_config(10)).solve(&q, 0).unwrap();
        assert_eq!(none.selection.unwrap().assignment, vec![0, 0, 0, 0]);

        let q = construct_qubo(&complete(4), 4, None, None).unwrap();
        let all = ContinuousAnnealer::new(small_config(10)).solve(&q, 4).unwrap();
        assert_eq!(all.selection.unwrap().assignment, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_no_reads_is_unsolved() {
        let q = construct_qubo(&complete(4), 2, None, None).unwrap();
        let outcome = ContinuousAnnealer::new(small_config(0)).solve(&q, 2).unwrap();
        assert!(!outcome.is_solved());
        assert_eq!(outcome.cost(), f64::INFINITY);
        assert_eq!(outcome.total_reads, 0);
    }

    #[test]
    fn test_zero_iterations_only_rounds_start() {
        let q = construct_qubo(&complete(6), 3, None, None).unwrap();
        let annealer = ContinuousAnnealer::new(ContinuousConfig {
            max_iterations: 0,
            ..Default::default()
        });
        let read = annealer.read(&q, 3, 7);
        assert_eq!(read.assignment.len(), 6);
        assert!((read.energy - q.cost(&read.assignment).unwrap()).abs() < 1e-9);
    }

    #[test]
    fn test_read_is_deterministic() {
        let q = construct_qubo(&complete(5), 2, None, None).unwrap();
        let annealer = ContinuousAnnealer::new(small_config(1));
        assert_eq!(annealer.read(&q, 2, 99), annealer.read(&q, 2, 99));
    }

    #[test]
    fn test_rejects_bad_input() {
        let q = construct_qubo(&complete(4), 2, None, None).unwrap();
        let annealer = ContinuousAnnealer::default();
        assert_eq!(
            annealer.solve(&q, 5).unwrap_err(),
            Error::InvalidTau { tau: 5, n: 4 }
        );

        let bad = ContinuousAnnealer::new(ContinuousConfig {
            visiting_param: 3.5,
            ..Default::default()
        });
        assert!(matches!(
            bad.solve(&q, 2),
            Err(Error::InvalidParameter {
                name: "visiting_param",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_tau_other_than_formulated() {
        let q = construct_qubo(&complete(4), 1, None, None).unwrap();
        let err = ContinuousAnnealer::new(small_config(5)).solve(&q, 3).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "tau", .. }));
    }

    #[test]
    fn test_feasible_cost_bound() {
        // Every 2-subset of a 4-clique costs the same; the bound must cover it
        let q = construct_qubo(&complete(4), 2, None, None).unwrap();
        let cost = q.cost(&[1, 1, 0, 0]).unwrap();
        assert!(max_feasible_cost(&q, 2) >= cost - 1e-9);
        assert_eq!(max_feasible_cost(&q, 0), 0.0);

        // Long path at the default weights: feasible costs sit near -P1·τ²,
        // well clear of the default penalty
        let n = 100;
        let mut m = Array2::zeros((n, n));
        for i in 0..n - 1 {
            m[[i, i + 1]] = 1.0;
            m[[i + 1, i]] = 1.0;
        }
        let q = construct_qubo(&Adjacency::new(m).unwrap(), 10, None, None).unwrap();
        assert!(max_feasible_cost(&q, 10) < DEFAULT_FEASIBILITY_PENALTY);
    }

    #[test]
    fn test_visiting_temperature_schedule() {
        let annealer = ContinuousAnnealer::default();
        assert!((annealer.visiting_temperature(0) - 5230.0).abs() < 1e-9);
        assert!(annealer.visiting_temperature(10) < annealer.visiting_temperature(1));
    }

    #[test]
    fn test_wrap_stays_in_box() {
        for x in [-2.3, -0.1, 0.0, 0.4, 1.0, 7.9, 1e12] {
            let w = wrap_unit(x);
            assert!((0.0..1.0).contains(&w), "{x} wrapped to {w}");
        }
    }
}
