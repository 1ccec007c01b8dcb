//! The `Replicate` struct and its day loop.

use log::{debug, trace};

use seildr_core::{CompartmentId, Day, ReplicateId, ReplicateRng, ScenarioParams};
use seildr_model::{Compartment, InfectionPressure, step_compartment};

use crate::{ReplicateObserver, SimError, SimResult};

/// Lifecycle of a replicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicatePhase {
    /// Compartments seeded, no day simulated yet.
    Initialized,
    /// At least one day simulated; `next_day` is the next to run.
    Running { next_day: Day },
    /// Every day of the horizon has been simulated.
    Complete,
}

/// One independent stochastic realization of the full horizon.
///
/// Owns its compartments and its random stream exclusively; nothing is shared
/// with other replicates.  Each day:
///
/// 1. **Snapshot** the infectious count of every compartment.
/// 2. **Step** each compartment in ascending `CompartmentId` order with the
///    pressure computed from the snapshot.
/// 3. **Check** conservation and timer bookkeeping after every step; a
///    violation aborts the replicate.
/// 4. **Record** the day's across-compartment deaths.
///
/// Create via [`ReplicateBuilder`][crate::ReplicateBuilder].
pub struct Replicate {
    id:             ReplicateId,
    params:         ScenarioParams,
    compartments:   Vec<Compartment>,
    total_capacity: u64,
    rng:            ReplicateRng,
    phase:          ReplicatePhase,
    deaths:         Vec<u32>,
}

impl Replicate {
    pub(crate) fn new(
        id:           ReplicateId,
        params:       ScenarioParams,
        compartments: Vec<Compartment>,
        rng:          ReplicateRng,
    ) -> Self {
        let total_capacity = compartments.iter().map(|c| c.capacity() as u64).sum();
        let days = params.days as usize;
        Self {
            id,
            params,
            compartments,
            total_capacity,
            rng,
            phase: ReplicatePhase::Initialized,
            deaths: Vec::with_capacity(days),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn id(&self) -> ReplicateId {
        self.id
    }

    pub fn phase(&self) -> ReplicatePhase {
        self.phase
    }

    pub fn params(&self) -> &ScenarioParams {
        &self.params
    }

    /// Read-only view of every compartment, indexed by `CompartmentId`.
    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }

    /// Daily deaths recorded so far.
    pub fn deaths(&self) -> &[u32] {
        &self.deaths
    }

    /// Run every remaining day and return the `days`-length death series.
    ///
    /// Consumes the replicate: its state is discarded once the series is
    /// extracted.
    pub fn run<O: ReplicateObserver>(mut self, observer: &mut O) -> SimResult<Vec<u32>> {
        debug!("{} starting: {} days", self.id, self.params.days);
        while self.phase != ReplicatePhase::Complete {
            self.step_day(observer)?;
        }
        let total: u64 = self.deaths.iter().map(|&d| d as u64).sum();
        observer.on_replicate_end(self.id, total);
        debug!("{} complete: {total} deaths", self.id);
        Ok(self.deaths)
    }

    /// Simulate exactly one day and return its death count.
    ///
    /// Fails with [`SimError::AlreadyComplete`] once the horizon is reached.
    pub fn step_day<O: ReplicateObserver>(&mut self, observer: &mut O) -> SimResult<u32> {
        let day = match self.phase {
            ReplicatePhase::Initialized           => Day::ZERO,
            ReplicatePhase::Running { next_day }  => next_day,
            ReplicatePhase::Complete              => return Err(SimError::AlreadyComplete),
        };

        observer.on_day_start(day);

        // ── Snapshot infectious counts (previous day's state) ─────────────
        let infectious: Vec<u32> = self.compartments.iter().map(|c| c.infectious()).collect();
        let infectious_total: u32 = infectious.iter().sum();

        // ── Step compartments in ascending id order ───────────────────────
        let mut deaths_today = 0u32;
        for (i, compartment) in self.compartments.iter_mut().enumerate() {
            let id = CompartmentId(i as u32);
            let pressure = InfectionPressure {
                infectious_self:   infectious[i],
                infectious_others: infectious_total - infectious[i],
                total_capacity:    self.total_capacity,
            };

            let outcome = step_compartment(compartment, &pressure, &self.params, &mut self.rng);
            compartment.check_invariants(id, day)?;

            deaths_today += outcome.deaths;
            observer.on_compartment_stepped(day, id, &compartment.counts(), &outcome);
        }

        self.deaths.push(deaths_today);
        observer.on_day_end(day, deaths_today);
        trace!("{} {day}: {deaths_today} deaths", self.id);

        let next_day = day + 1;
        self.phase = if next_day.0 >= self.params.days {
            ReplicatePhase::Complete
        } else {
            ReplicatePhase::Running { next_day }
        };

        Ok(deaths_today)
    }
}
