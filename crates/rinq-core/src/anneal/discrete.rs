//! Discrete annealing through a pluggable [`Sampler`].
//!
//! The QUBO is converted to a [`BinaryQuadraticModel`] and handed to the
//! sampler. The sampler knows nothing about τ; every returned read is
//! checked against the model and then filtered for exactly τ ones.

use super::{check_tau, log_outcome, AnnealingRead, BestRead, SimulatedAnnealingSampler, SolveOutcome};
use crate::error::{Error, Result};
use crate::qubo::{BinaryQuadraticModel, QuboMatrix};

/// Sampling parameters shared by all [`Sampler`] implementations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleParams {
    /// Independent reads.
    pub num_reads: usize,
    /// Inverse temperature range `(β_min, β_max)`.
    pub beta_range: (f64, f64),
    /// Sweeps per read.
    pub num_sweeps: usize,
    /// Base seed; read `r` uses `seed + r`.
    pub seed: u64,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            num_reads: 10_000,
            beta_range: (0.1, 4.0),
            num_sweeps: 1000,
            seed: 42,
        }
    }
}

impl SampleParams {
    /// Check the β range and sweep count.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBetaRange`] unless `0 < β_min ≤ β_max` with both
    /// finite; [`Error::InvalidParameter`] if `num_sweeps` is zero.
    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.beta_range;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(Error::InvalidBetaRange { min, max });
        }
        if self.num_sweeps == 0 {
            return Err(Error::InvalidParameter {
                name: "num_sweeps",
                reason: "at least one sweep is required".into(),
            });
        }
        Ok(())
    }
}

/// Reads returned by a [`Sampler`], in read order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    /// One entry per read.
    pub reads: Vec<AnnealingRead>,
}

/// Source of low-energy samples for a binary quadratic model.
///
/// Implementations must return, for each read, an assignment of length
/// `bqm.num_variables()` with 0/1 entries and the energy the model assigns
/// to it. [`DiscreteAnnealer`] rejects sample sets that break this.
pub trait Sampler {
    /// Draw `params.num_reads` samples.
    ///
    /// # Errors
    ///
    /// Implementation-specific; parameter validation errors at minimum.
    fn sample(&self, bqm: &BinaryQuadraticModel, params: &SampleParams) -> Result<SampleSet>;
}

/// Solves a QUBO by sampling its BQM and filtering for exactly τ selected.
#[derive(Debug, Clone, Default)]
pub struct DiscreteAnnealer<S = SimulatedAnnealingSampler> {
    sampler: S,
    params: SampleParams,
}

impl<S: Sampler> DiscreteAnnealer<S> {
    /// Create an annealer around `sampler`.
    pub fn new(sampler: S, params: SampleParams) -> Self {
        Self { sampler, params }
    }

    /// Sampling parameters.
    pub fn params(&self) -> &SampleParams {
        &self.params
    }

    /// Sample and keep the lowest-energy feasible read. Ties go to the
    /// earliest read.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTau`] if `tau` exceeds the problem size.
    /// - [`Error::InvalidParameter`] if `qubo` was formulated for another τ.
    /// - [`Error::InvalidBetaRange`] / [`Error::InvalidParameter`] for bad
    ///   sampling parameters.
    /// - [`Error::SamplerContract`] if the sampler returns the wrong number of
    ///   reads, a malformed read, or misreports an energy.
    pub fn solve(&self, qubo: &QuboMatrix, tau: usize) -> Result<SolveOutcome> {
        check_tau(qubo, tau)?;
        self.params.validate()?;

        let bqm = BinaryQuadraticModel::from_qubo(qubo);
        let samples = self.sampler.sample(&bqm, &self.params)?;
        if samples.reads.len() != self.params.num_reads {
            return Err(Error::SamplerContract(format!(
                "requested {} reads, sampler returned {}",
                self.params.num_reads,
                samples.reads.len()
            )));
        }

        let mut best = BestRead::new(tau);
        for (r, read) in samples.reads.into_iter().enumerate() {
            check_read(&bqm, r, &read)?;
            best.offer(read);
        }

        let outcome = best.into_outcome();
        log_outcome("discrete", tau, &outcome);
        Ok(outcome)
    }
}

fn check_read(bqm: &BinaryQuadraticModel, index: usize, read: &AnnealingRead) -> Result<()> {
    let n = bqm.num_variables();
    if read.assignment.len() != n {
        return Err(Error::SamplerContract(format!(
            "read {index} has {} variables, model has {n}",
            read.assignment.len()
        )));
    }
    if let Some(v) = read.assignment.iter().find(|&&v| v > 1) {
        return Err(Error::SamplerContract(format!(
            "read {index} contains non-binary value {v}"
        )));
    }
    let expected = bqm.energy_unchecked(&read.assignment);
    if (read.energy - expected).abs() > 1e-6 * expected.abs().max(1.0) || read.energy.is_nan() {
        return Err(Error::SamplerContract(format!(
            "read {index} reports energy {}, model gives {expected}",
            read.energy
        )));
    }
    Ok(())
}

/// `solve_discrete(Q, τ, num_reads, β_range)` with the default sampler.
///
/// # Errors
///
/// See [`DiscreteAnnealer::solve`].
pub fn solve_discrete(
    qubo: &QuboMatrix,
    tau: usize,
    num_reads: usize,
    beta_range: (f64, f64),
) -> Result<SolveOutcome> {
    DiscreteAnnealer::new(
        SimulatedAnnealingSampler::default(),
        SampleParams {
            num_reads,
            beta_range,
            ..Default::default()
        },
    )
    .solve(qubo, tau)
}
