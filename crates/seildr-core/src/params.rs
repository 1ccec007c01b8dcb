//! Scenario parameters, population layout, and ensemble settings.
//!
//! Everything here is plain data with a `validate()` method.  Validation is
//! strict: out-of-range values are rejected with [`SeildrError::Config`] and
//! never silently clamped.  The simulation crates call `validate()` before
//! constructing any replicate state.

use crate::{CompartmentId, SeildrError, SeildrResult};

/// Aviary sizes of the reference facility (eight aviaries, 127 birds).
pub const DEFAULT_CAPACITIES: [u32; 8] = [36, 11, 16, 8, 25, 10, 14, 7];

// ── ScenarioParams ────────────────────────────────────────────────────────────

/// Immutable scalar configuration shared by every replicate of an ensemble.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioParams {
    /// Infectious birds placed in the index compartment on day 0.
    pub initial_infectious: u32,
    /// Latent carriers placed according to [`Population::latent_allocation`].
    pub initial_latent: u32,
    /// Within-compartment transmission rate (per day).
    pub beta_within: f64,
    /// Cross-compartment transmission rate (per day).
    pub beta_cross: f64,
    /// Probability that an individual leaving the infectious stage dies.
    pub mortality_rate: f64,
    /// Daily probability that one latent carrier reactivates.
    pub reactivation_daily_p: f64,
    /// Simulation horizon in days.
    pub days: u32,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            initial_infectious:   7,
            initial_latent:       30,
            beta_within:          0.1,
            beta_cross:           0.02,
            mortality_rate:       0.15,
            reactivation_daily_p: 1.0 / 3650.0,
            days:                 1095,
        }
    }
}

impl ScenarioParams {
    /// Check rates, probabilities, and horizon.
    ///
    /// Initial population counts are checked against capacity by
    /// [`Population::seed_counts`], which knows the compartment layout.
    pub fn validate(&self) -> SeildrResult<()> {
        check_rate("beta_within", self.beta_within)?;
        check_rate("beta_cross", self.beta_cross)?;
        check_probability("mortality_rate", self.mortality_rate)?;
        check_probability("reactivation_daily_p", self.reactivation_daily_p)?;
        if self.days == 0 {
            return Err(SeildrError::config("days must be at least 1"));
        }
        Ok(())
    }
}

fn check_rate(name: &str, value: f64) -> SeildrResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SeildrError::config(format!(
            "{name} must be a finite non-negative rate, got {value}"
        )));
    }
    Ok(())
}

fn check_probability(name: &str, value: f64) -> SeildrResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SeildrError::config(format!(
            "{name} must lie in [0, 1], got {value}"
        )));
    }
    Ok(())
}

// ── StageDurations ────────────────────────────────────────────────────────────

/// Fixed lengths of the timed disease stages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageDurations {
    /// Days an individual spends Exposed before becoming Infectious.
    pub incubation_days: u32,
    /// Days an individual spends Infectious before death or latency.
    pub infectious_days: u32,
}

impl Default for StageDurations {
    fn default() -> Self {
        Self { incubation_days: 5, infectious_days: 10 }
    }
}

impl StageDurations {
    pub fn validate(&self) -> SeildrResult<()> {
        if self.incubation_days == 0 || self.infectious_days == 0 {
            return Err(SeildrError::config(format!(
                "stage durations must be at least 1 day, got incubation={} infectious={}",
                self.incubation_days, self.infectious_days
            )));
        }
        Ok(())
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// How seeded individuals are spread across compartments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SeedAllocation {
    /// Everyone goes into the index compartment.
    Concentrated,
    /// Largest-remainder apportionment over each compartment's susceptible
    /// room left after infectious seeding.  Ties go to the lower index.
    #[default]
    Proportional,
}

/// Compartment layout and seeding policy for a replicate.
///
/// Initial infectious birds always start in `index_compartment`.  Initial
/// latent carriers follow `latent_allocation`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    /// Fixed size of every compartment, indexed by `CompartmentId`.
    pub capacities: Vec<u32>,
    /// Compartment receiving the initial infectious birds.
    pub index_compartment: CompartmentId,
    pub latent_allocation: SeedAllocation,
}

impl Default for Population {
    fn default() -> Self {
        Self {
            capacities:        DEFAULT_CAPACITIES.to_vec(),
            index_compartment: CompartmentId(0),
            latent_allocation: SeedAllocation::Proportional,
        }
    }
}

impl Population {
    /// A layout with the given capacities and default seeding policy.
    pub fn with_capacities(capacities: Vec<u32>) -> Self {
        Self { capacities, ..Self::default() }
    }

    pub fn compartment_count(&self) -> usize {
        self.capacities.len()
    }

    /// Sum of all compartment capacities.
    pub fn total_capacity(&self) -> u64 {
        self.capacities.iter().map(|&c| c as u64).sum()
    }

    /// Check the layout on its own (non-empty, positive sizes, index in range).
    pub fn validate(&self) -> SeildrResult<()> {
        if self.capacities.is_empty() {
            return Err(SeildrError::config("population has no compartments"));
        }
        if let Some(pos) = self.capacities.iter().position(|&c| c == 0) {
            return Err(SeildrError::config(format!(
                "compartment {pos} has zero capacity"
            )));
        }
        if self.index_compartment.index() >= self.capacities.len() {
            return Err(SeildrError::config(format!(
                "index compartment {} out of range for {} compartments",
                self.index_compartment,
                self.capacities.len()
            )));
        }
        Ok(())
    }

    /// Per-compartment `(infectious, latent)` seed counts for `params`.
    ///
    /// Fails if the seeds do not fit into the layout under the configured
    /// allocation policy.
    pub fn seed_counts(&self, params: &ScenarioParams) -> SeildrResult<Vec<(u32, u32)>> {
        self.validate()?;

        let index = self.index_compartment.index();
        let index_capacity = self.capacities[index];
        if params.initial_infectious > index_capacity {
            return Err(SeildrError::config(format!(
                "initial_infectious {} exceeds capacity {} of {}",
                params.initial_infectious, index_capacity, self.index_compartment
            )));
        }

        let mut infectious = vec![0u32; self.capacities.len()];
        infectious[index] = params.initial_infectious;

        let room: Vec<u32> = self
            .capacities
            .iter()
            .zip(&infectious)
            .map(|(&c, &i)| c - i)
            .collect();

        let latent = match self.latent_allocation {
            SeedAllocation::Concentrated => {
                if params.initial_latent > room[index] {
                    return Err(SeildrError::config(format!(
                        "initial_infectious {} + initial_latent {} exceed capacity {} of {}",
                        params.initial_infectious,
                        params.initial_latent,
                        index_capacity,
                        self.index_compartment
                    )));
                }
                let mut latent = vec![0u32; self.capacities.len()];
                latent[index] = params.initial_latent;
                latent
            }
            SeedAllocation::Proportional => {
                let total_room: u64 = room.iter().map(|&r| r as u64).sum();
                if params.initial_latent as u64 > total_room {
                    return Err(SeildrError::config(format!(
                        "initial_infectious {} + initial_latent {} exceed total capacity {}",
                        params.initial_infectious,
                        params.initial_latent,
                        self.total_capacity()
                    )));
                }
                apportion(params.initial_latent, &room)
            }
        };

        Ok(infectious.into_iter().zip(latent).collect())
    }
}

/// Largest-remainder (Hamilton) apportionment of `amount` over `weights`.
///
/// Requires `amount <= sum(weights)`; every share then satisfies
/// `share[i] <= weights[i]`.
fn apportion(amount: u32, weights: &[u32]) -> Vec<u32> {
    let total: u64 = weights.iter().map(|&w| w as u64).sum();
    if total == 0 || amount == 0 {
        return vec![0; weights.len()];
    }

    let mut shares = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    for (i, &w) in weights.iter().enumerate() {
        let scaled = amount as u64 * w as u64;
        shares.push((scaled / total) as u32);
        remainders.push((scaled % total, i));
    }

    let assigned: u32 = shares.iter().sum();
    let mut leftover = amount - assigned;

    // Largest remainder first; lower index wins ties.
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in &remainders {
        if leftover == 0 {
            break;
        }
        shares[i] += 1;
        leftover -= 1;
    }
    shares
}

// ── EnsembleConfig ────────────────────────────────────────────────────────────

/// How many replicates to run, on how many workers, from which master seed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnsembleConfig {
    /// Number of independent replicates (rows of the result matrix).
    pub repeats: u32,
    /// Requested worker threads.  Capped at the hardware concurrency.
    pub worker_count: usize,
    /// Master RNG seed.  The same seed always produces identical results.
    pub master_seed: u64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self { repeats: 500, worker_count: 10, master_seed: 42 }
    }
}

impl EnsembleConfig {
    pub fn validate(&self) -> SeildrResult<()> {
        if self.repeats == 0 {
            return Err(SeildrError::config("repeats must be at least 1"));
        }
        if self.worker_count == 0 {
            return Err(SeildrError::config("worker_count must be at least 1"));
        }
        Ok(())
    }

    /// Worker threads actually used: `worker_count` bounded by the number of
    /// logical cores (and never below 1).
    pub fn effective_workers(&self) -> usize {
        let hardware = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self.worker_count.clamp(1, hardware)
    }
}
