//! Fluent builder for constructing a [`Replicate`].

use seildr_core::{
    Population, ReplicateId, ReplicateRng, ScenarioParams, SeildrResult, StageDurations,
};
use seildr_model::Compartment;

use crate::{Replicate, SimResult};

/// Fluent builder for [`Replicate`].
///
/// # Required inputs
///
/// - [`ScenarioParams`] — rates, probabilities, seeds, horizon
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                   |
/// |--------------------|-------------------------------------------|
/// | `.population(p)`   | `Population::default()` (eight aviaries)  |
/// | `.durations(d)`    | `StageDurations::default()` (5 / 10 days) |
/// | `.seed(s, id)`     | master seed 0, `ReplicateId(0)`           |
///
/// # Example
///
/// ```rust,ignore
/// let replicate = ReplicateBuilder::new(params)
///     .population(population)
///     .seed(42, ReplicateId(3))
///     .build()?;
/// let deaths = replicate.run(&mut NoopObserver)?;
/// ```
pub struct ReplicateBuilder {
    params:      ScenarioParams,
    population:  Option<Population>,
    durations:   Option<StageDurations>,
    master_seed: u64,
    replicate:   ReplicateId,
}

impl ReplicateBuilder {
    pub fn new(params: ScenarioParams) -> Self {
        Self {
            params,
            population:  None,
            durations:   None,
            master_seed: 0,
            replicate:   ReplicateId(0),
        }
    }

    /// Compartment layout and seeding policy.
    pub fn population(mut self, population: Population) -> Self {
        self.population = Some(population);
        self
    }

    /// Incubation and infectious stage lengths.
    pub fn durations(mut self, durations: StageDurations) -> Self {
        self.durations = Some(durations);
        self
    }

    /// Select the random stream: `(master_seed, replicate)` fully determines
    /// every draw this replicate makes.
    pub fn seed(mut self, master_seed: u64, replicate: ReplicateId) -> Self {
        self.master_seed = master_seed;
        self.replicate = replicate;
        self
    }

    /// Validate inputs, seed the compartments, and return a replicate in the
    /// `Initialized` phase.
    pub fn build(self) -> SimResult<Replicate> {
        let population = self.population.unwrap_or_default();
        let durations = self.durations.unwrap_or_default();

        // ── Validate ──────────────────────────────────────────────────────
        self.params.validate()?;
        durations.validate()?;
        let seeds = population.seed_counts(&self.params)?;

        // ── Seed compartments ─────────────────────────────────────────────
        let compartments = population
            .capacities
            .iter()
            .zip(seeds)
            .map(|(&capacity, (infectious, latent))| {
                let mut c = Compartment::new(capacity, durations);
                c.seed_infectious(infectious)?;
                c.seed_latent(latent)?;
                Ok(c)
            })
            .collect::<SeildrResult<Vec<_>>>()?;

        let rng = ReplicateRng::new(self.master_seed, self.replicate);
        Ok(Replicate::new(self.replicate, self.params, compartments, rng))
    }
}
