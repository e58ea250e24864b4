//! Simulated-annealing sampler implementation.

use std::time::Instant;

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use qamlz_hal::{HalResult, SampleParams, SampleSet, Sampler, SamplerError, SamplerProperties};
use qamlz_ising::{IsingProblem, SpinVector};

/// Default sweeps simulated per microsecond of requested anneal time.
const SWEEPS_PER_US: f64 = 200.0;

/// Classical simulated-annealing sampler.
///
/// Runs Metropolis single-spin-flip sweeps over a geometric inverse-
/// temperature ladder, one independent trajectory per requested read. The
/// ladder is normalised by the largest absolute problem term, so annealing
/// quality does not degrade as the zoom loop shrinks its problems;
/// `SampleParams::strength` then steepens the objective the way an energy
/// rescale does on hardware.
///
/// Recorded energies are always those of the submitted problem; the
/// strength multiplier affects acceptance only.
pub struct SimulatedAnnealer {
    properties: SamplerProperties,
    sweeps_per_us: f64,
    sweeps_override: Option<usize>,
    beta_hot: f64,
    beta_cold: f64,
}

impl SimulatedAnnealer {
    /// Create an annealer with default settings (2048-spin capacity).
    pub fn new() -> Self {
        Self::with_max_spins(2048)
    }

    /// Create an annealer with a custom spin capacity.
    pub fn with_max_spins(max_spins: usize) -> Self {
        Self {
            properties: SamplerProperties {
                name: "simulated-annealer".into(),
                ..SamplerProperties::simulator(max_spins)
            },
            sweeps_per_us: SWEEPS_PER_US,
            sweeps_override: None,
            beta_hot: 0.1,
            beta_cold: 10.0,
        }
    }

    /// Fix the sweep count instead of deriving it from the anneal time.
    #[must_use]
    pub fn with_sweeps(mut self, sweeps: usize) -> Self {
        self.sweeps_override = Some(sweeps);
        self
    }

    /// Override the (hot, cold) inverse-temperature endpoints.
    #[must_use]
    pub fn with_beta_range(mut self, beta_hot: f64, beta_cold: f64) -> Self {
        self.beta_hot = beta_hot;
        self.beta_cold = beta_cold;
        self
    }

    fn sweeps_for(&self, anneal_time_us: f64) -> usize {
        self.sweeps_override
            .unwrap_or_else(|| ((anneal_time_us * self.sweeps_per_us).ceil() as usize).max(1))
    }

    /// Run all reads synchronously.
    fn run_reads(&self, problem: &IsingProblem, params: &SampleParams) -> HalResult<SampleSet> {
        self.properties.ensure_fits(problem)?;
        params.validate()?;
        if params.num_reads > self.properties.max_reads {
            return Err(SamplerError::InvalidReads(format!(
                "{} reads requested but sampler supports at most {}",
                params.num_reads, self.properties.max_reads
            )));
        }

        let start = Instant::now();
        let n = problem.num_spins();
        let sweeps = self.sweeps_for(params.anneal_time_us);
        debug!(
            spins = n,
            num_reads = params.num_reads,
            sweeps,
            strength = params.strength,
            "starting anneal"
        );

        let mut rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        // Neighbour lists in both directions for O(degree) field updates.
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for c in problem.couplers() {
            adjacency[c.i].push((c.j, c.strength));
            adjacency[c.j].push((c.i, c.strength));
        }

        // Normalise the ladder so beta·dE is invariant under problem rescale.
        let scale = problem.max_abs_term();
        let (beta_hot, beta_cold) = if scale > 0.0 {
            (self.beta_hot / scale, self.beta_cold / scale)
        } else {
            (self.beta_hot, self.beta_cold)
        };
        let beta_ratio = beta_cold / beta_hot;

        let mut reads = Vec::with_capacity(params.num_reads as usize);
        for _ in 0..params.num_reads {
            let mut spins: Vec<i8> = (0..n)
                .map(|_| if rng.r#gen::<bool>() { 1 } else { -1 })
                .collect();

            for sweep in 0..sweeps {
                let beta = if sweeps == 1 {
                    beta_cold
                } else {
                    beta_hot * beta_ratio.powf(sweep as f64 / (sweeps - 1) as f64)
                };
                for i in 0..n {
                    let mut field = problem.h()[i];
                    for &(j, strength) in &adjacency[i] {
                        field += strength * f64::from(spins[j]);
                    }
                    // Flipping spin i changes the energy by -2·s_i·field.
                    let delta = -2.0 * f64::from(spins[i]) * field;
                    if delta <= 0.0
                        || rng.r#gen::<f64>() < (-beta * params.strength * delta).exp()
                    {
                        spins[i] = -spins[i];
                    }
                }
            }

            reads.push(SpinVector::new(spins)?);
        }

        let set = SampleSet::from_reads(problem, reads)?;
        debug!(
            unique_states = set.len(),
            lowest_energy = set.lowest().map(|r| r.energy),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "anneal complete"
        );
        Ok(set)
    }
}

impl Default for SimulatedAnnealer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sampler for SimulatedAnnealer {
    fn name(&self) -> &str {
        &self.properties.name
    }

    fn properties(&self) -> &SamplerProperties {
        &self.properties
    }

    #[instrument(skip(self, problem))]
    async fn sample(&self, problem: &IsingProblem, params: &SampleParams) -> HalResult<SampleSet> {
        // Runs inline: the anneal is CPU-bound and callers await it anyway.
        self.run_reads(problem, params)
    }
}
