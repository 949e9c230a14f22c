//! Single-flip simulated annealing over a binary quadratic model.
//!
//! Each read starts from a uniform random assignment and performs
//! `num_sweeps` sweeps. Sweep s runs at inverse temperature `β_s`, with the
//! β values spaced geometrically from `β_min` to `β_max`. A sweep visits every
//! variable in index order and proposes flipping it:
//!
//! ```text
//! ΔE_i = (1 - 2x_i) (h_i + Σ_j J_ij x_j)
//! accept if ΔE_i ≤ 0, else with probability exp(-β_s ΔE_i)
//! ```
//!
//! Local fields `h_i + Σ_j J_ij x_j` are kept up to date on every accepted
//! flip, so a sweep costs O(V + couplings).

use super::{AnnealingRead, SampleParams, SampleSet, Sampler};
use crate::error::Result;
use crate::qubo::BinaryQuadraticModel;
use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use rayon::prelude::*;

/// Default [`Sampler`] for [`super::DiscreteAnnealer`].
#[derive(Debug, Clone, Copy)]
pub struct SimulatedAnnealingSampler {
    /// Run reads on the rayon pool.
    pub parallel: bool,
}

impl Default for SimulatedAnnealingSampler {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl SimulatedAnnealingSampler {
    fn anneal(
        bqm: &BinaryQuadraticModel,
        neighbors: &[Vec<(usize, f64)>],
        schedule: &[f64],
        seed: u64,
    ) -> AnnealingRead {
        let n = bqm.num_variables();
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let mut state: Vec<u8> = (0..n).map(|_| u8::from(rng.gen::<bool>())).collect();

        let mut field: Vec<f64> = bqm.linear().to_vec();
        for (i, adj) in neighbors.iter().enumerate() {
            for &(j, w) in adj {
                if state[j] == 1 {
                    field[i] += w;
                }
            }
        }

        for &beta in schedule {
            for i in 0..n {
                let delta = if state[i] == 1 { -field[i] } else { field[i] };
                if delta <= 0.0 || rng.gen::<f64>() < (-beta * delta).exp() {
                    state[i] ^= 1;
                    let sign = if state[i] == 1 { 1.0 } else { -1.0 };
                    for &(j, w) in &neighbors[i] {
                        field[j] += sign * w;
                    }
                }
            }
        }

        AnnealingRead {
            energy: bqm.energy_unchecked(&state),
            assignment: state,
        }
    }
}

impl Sampler for SimulatedAnnealingSampler {
    fn sample(&self, bqm: &BinaryQuadraticModel, params: &SampleParams) -> Result<SampleSet> {
        params.validate()?;
        let schedule = geometric_schedule(params.beta_range, params.num_sweeps);
        let neighbors = bqm.neighbors();

        let run = |r: usize| {
            Self::anneal(bqm, &neighbors, &schedule, params.seed.wrapping_add(r as u64))
        };
        let reads = if self.parallel {
            (0..params.num_reads).into_par_iter().map(run).collect()
        } else {
            (0..params.num_reads).map(run).collect()
        };

        tracing::trace!(
            reads = params.num_reads,
            sweeps = params.num_sweeps,
            variables = bqm.num_variables(),
            "sampling finished"
        );
        Ok(SampleSet { reads })
    }
}

/// `steps` values from `min` to `max`, evenly spaced on a log scale.
#[allow(clippy::cast_precision_loss)]
fn geometric_schedule((min, max): (f64, f64), steps: usize) -> Vec<f64> {
    if steps == 1 {
        return vec![max];
    }
    let ratio = (max / min).ln() / (steps - 1) as f64;
    (0..steps).map(|s| min * (ratio * s as f64).exp()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubo::QuboMatrix;
    use ndarray::array;

    #[test]
    fn test_schedule_endpoints() {
        let schedule = geometric_schedule((0.1, 4.0), 5);
        assert_eq!(schedule.len(), 5);
        assert!((schedule[0] - 0.1).abs() < 1e-12);
        assert!((schedule[4] - 4.0).abs() < 1e-9);
        // Constant ratio between neighbours
        let r0 = schedule[1] / schedule[0];
        let r3 = schedule[4] / schedule[3];
        assert!((r0 - r3).abs() < 1e-9);

        assert_eq!(geometric_schedule((0.1, 4.0), 1), vec![4.0]);
    }

    #[test]
    fn test_reads_report_true_energy() {
        let q = QuboMatrix::from_array(array![
            [-1.0, 2.0, 0.0],
            [2.0, -1.0, -0.5],
            [0.0, -0.5, 0.5]
        ])
        .unwrap();
        let bqm = BinaryQuadraticModel::from_qubo(&q);
        let params = SampleParams {
            num_reads: 8,
            num_sweeps: 50,
            ..Default::default()
        };

        let set = SimulatedAnnealingSampler::default().sample(&bqm, &params).unwrap();
        assert_eq!(set.reads.len(), 8);
        for read in &set.reads {
            assert_eq!(read.assignment.len(), 3);
            assert!((read.energy - bqm.energy(&read.assignment).unwrap()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_finds_ground_state() {
        // Minimum is x = [1, 0, 0] with energy -1
        let q = QuboMatrix::from_array(array![
            [-1.0, 2.0, 2.0],
            [2.0, -0.5, 2.0],
            [2.0, 2.0, -0.5]
        ])
        .unwrap();
        let bqm = BinaryQuadraticModel::from_qubo(&q);
        let params = SampleParams {
            num_reads: 10,
            num_sweeps: 200,
            beta_range: (0.1, 10.0),
            ..Default::default()
        };

        let set = SimulatedAnnealingSampler::default().sample(&bqm, &params).unwrap();
        let best = set
            .reads
            .iter()
            .min_by(|a, b| a.energy.total_cmp(&b.energy))
            .unwrap();
        assert_eq!(best.assignment, vec![1, 0, 0]);
        assert!((best.energy + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let q = QuboMatrix::from_array(array![[-1.0, 0.5], [0.5, -1.0]]).unwrap();
        let bqm = BinaryQuadraticModel::from_qubo(&q);
        let params = SampleParams {
            num_reads: 6,
            num_sweeps: 20,
            ..Default::default()
        };

        let parallel = SimulatedAnnealingSampler { parallel: true }
            .sample(&bqm, &params)
            .unwrap();
        let sequential = SimulatedAnnealingSampler { parallel: false }
            .sample(&bqm, &params)
            .unwrap();
        assert_eq!(parallel, sequential);
    }
}
