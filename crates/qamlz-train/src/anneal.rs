//! The anneal driver: one sampling round per candidate weight vector.
//!
//! For a weight vector `mu` at iteration `i`, the driver builds the zoomed
//! Ising problem at scale `sigma = zoom_factor^(i+1)`, optionally prunes
//! weak variables and QAC-encodes the remainder, samples it, and returns
//! the low-energy excited states with pruned coordinates restored as 0.
//! The round repeats `fidelity` times with per-repetition seeds, yielding
//! one excited-state set per repetition.

use ndarray::Array1;
use tracing::debug;

use qamlz_hal::{SampleParams, SampleSet, Sampler};
use qamlz_ising::{IsingProblem, QacEncoder, SpinVector, prune_weak_spins, restore_pruned};

use crate::config::ModelConfig;
use crate::env::TrainEnv;
use crate::error::{TrainError, TrainResult};
use crate::hamiltonian::zoomed_problem;

/// Sample excited states around `mu`, one set per fidelity repetition.
///
/// Each set holds the unique states within the iteration's energy fraction
/// of the band minimum, capped at `max_states[iteration]` and sorted by
/// ascending energy. Repetition `r` samples with seed `base_seed + r` when
/// a base seed is given, so seeded rounds are reproducible.
///
/// An empty filtered set aborts the round with [`TrainError::NoStates`].
///
/// # Panics
///
/// Panics if `iteration` is outside the configured schedules.
pub async fn anneal(
    sampler: &dyn Sampler,
    config: &ModelConfig,
    iteration: usize,
    env: &TrainEnv,
    mu: &Array1<f64>,
    base_seed: Option<u64>,
) -> TrainResult<Vec<Vec<SpinVector>>> {
    let sigma = config.sigma(iteration);
    let problem = zoomed_problem(mu, sigma, env.c_i(), env.c_ij())?;
    debug!(
        iteration,
        sigma,
        spins = problem.num_spins(),
        fidelity = env.fidelity(),
        "anneal round"
    );

    let mut sets = Vec::with_capacity(env.fidelity() as usize);
    for repetition in 0..env.fidelity() {
        let seed = base_seed.map(|s| s.wrapping_add(u64::from(repetition)));
        sets.push(anneal_once(sampler, config, iteration, &problem, seed).await?);
    }
    Ok(sets)
}

/// One prune/encode/sample/decode/filter pass over the zoomed problem.
async fn anneal_once(
    sampler: &dyn Sampler,
    config: &ModelConfig,
    iteration: usize,
    problem: &IsingProblem,
    seed: Option<u64>,
) -> TrainResult<Vec<SpinVector>> {
    let strength = config.strengths[iteration];

    let pruned = match config.prune_cutoff_percentile {
        Some(cutoff) => Some(prune_weak_spins(problem, cutoff)?),
        None => None,
    };
    let reduced = pruned.as_ref().map_or(problem, |p| &p.problem);

    let mut params = SampleParams::new(config.num_reads)
        .with_anneal_time_us(config.anneal_time_us)
        .with_strength(strength);
    if let Some(seed) = seed {
        params = params.with_seed(seed);
    }

    let set = match &config.qac {
        Some(qac) => {
            let encoder = QacEncoder::new(qac.depth, qac.gamma)?;
            let physical = encoder.encode(reduced, strength)?;
            let physical_set = sampler.sample(&physical, &params).await?;

            // Decode reads to logical states and re-evaluate on the
            // unencoded problem; the physical energies include penalties.
            let mut reads = Vec::with_capacity(physical_set.num_reads() as usize);
            for record in physical_set.records() {
                let logical = encoder.decode(&record.state)?;
                for _ in 0..record.occurrences {
                    reads.push(logical.clone());
                }
            }
            SampleSet::from_reads(reduced, reads)?
        }
        None => sampler.sample(reduced, &params).await?,
    };

    let filtered = set
        .within_energy_fraction(config.energy_fractions[iteration])
        .truncated(config.max_states[iteration]);
    if filtered.is_empty() {
        return Err(TrainError::NoStates { iteration });
    }
    debug!(
        iteration,
        sampled = set.len(),
        kept = filtered.len(),
        "excited states selected"
    );

    match &pruned {
        Some(p) => {
            let mut restored = Vec::with_capacity(filtered.len());
            for state in filtered.states() {
                restored.push(restore_pruned(state, &p.kept, problem.num_spins())?);
            }
            Ok(restored)
        }
        None => Ok(filtered.states().cloned().collect()),
    }
}
