//! One compartment (aviary) of the population and its timed cohorts.

use seildr_core::{CompartmentId, Day, SeildrError, SeildrResult, StageDurations};

use crate::CohortTimers;

/// Plain `Copy` snapshot of a compartment's five live counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompartmentCounts {
    pub susceptible: u32,
    pub exposed:     u32,
    pub infectious:  u32,
    pub latent:      u32,
    pub dead:        u32,
}

impl CompartmentCounts {
    /// `S + E + I + L + D`.
    pub fn total(&self) -> u64 {
        self.susceptible as u64
            + self.exposed as u64
            + self.infectious as u64
            + self.latent as u64
            + self.dead as u64
    }
}

/// A fixed-size sub-population with SEILDR counts.
///
/// Invariants, checked by [`check_invariants`](Self::check_invariants):
///
/// - `S + E + I + L + D == capacity`
/// - `exposed_timers.len() == E`
/// - `infectious_timers.len() == I`
///
/// Counts are only changed by seeding and by
/// [`step_compartment`](crate::step_compartment).
#[derive(Debug, Clone)]
pub struct Compartment {
    capacity: u32,
    pub(crate) susceptible: u32,
    pub(crate) exposed:     u32,
    pub(crate) infectious:  u32,
    pub(crate) latent:      u32,
    pub(crate) dead:        u32,
    pub(crate) exposed_timers:    CohortTimers,
    pub(crate) infectious_timers: CohortTimers,
}

impl Compartment {
    /// A fully susceptible compartment of `capacity` individuals.
    pub fn new(capacity: u32, durations: StageDurations) -> Self {
        Self {
            capacity,
            susceptible:       capacity,
            exposed:           0,
            infectious:        0,
            latent:            0,
            dead:              0,
            exposed_timers:    CohortTimers::new(durations.incubation_days),
            infectious_timers: CohortTimers::new(durations.infectious_days),
        }
    }

    /// Move `n` susceptibles straight into the infectious stage with fresh
    /// timers.
    pub fn seed_infectious(&mut self, n: u32) -> SeildrResult<()> {
        self.take_susceptible(n, "infectious")?;
        self.infectious += n;
        self.infectious_timers.push_fresh(n);
        Ok(())
    }

    /// Move `n` susceptibles into the latent pool.
    pub fn seed_latent(&mut self, n: u32) -> SeildrResult<()> {
        self.take_susceptible(n, "latent")?;
        self.latent += n;
        Ok(())
    }

    fn take_susceptible(&mut self, n: u32, what: &str) -> SeildrResult<()> {
        if n > self.susceptible {
            return Err(SeildrError::config(format!(
                "cannot seed {n} {what} into a compartment with {} susceptible",
                self.susceptible
            )));
        }
        self.susceptible -= n;
        Ok(())
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn susceptible(&self) -> u32 {
        self.susceptible
    }

    pub fn exposed(&self) -> u32 {
        self.exposed
    }

    pub fn infectious(&self) -> u32 {
        self.infectious
    }

    pub fn latent(&self) -> u32 {
        self.latent
    }

    pub fn dead(&self) -> u32 {
        self.dead
    }

    pub fn exposed_timers(&self) -> &CohortTimers {
        &self.exposed_timers
    }

    pub fn infectious_timers(&self) -> &CohortTimers {
        &self.infectious_timers
    }

    pub fn counts(&self) -> CompartmentCounts {
        CompartmentCounts {
            susceptible: self.susceptible,
            exposed:     self.exposed,
            infectious:  self.infectious,
            latent:      self.latent,
            dead:        self.dead,
        }
    }

    /// Verify conservation and timer bookkeeping.
    ///
    /// `id` and `day` only label the error.
    pub fn check_invariants(&self, id: CompartmentId, day: Day) -> SeildrResult<()> {
        let violation = |detail: String| SeildrError::InvariantViolation {
            compartment: id,
            day,
            detail,
        };

        let counts = self.counts();
        if counts.total() != self.capacity as u64 {
            return Err(violation(format!(
                "S+E+I+L+D = {} but capacity is {} ({counts:?})",
                counts.total(),
                self.capacity
            )));
        }
        if self.exposed_timers.len() != self.exposed {
            return Err(violation(format!(
                "{} exposed timers for E = {}",
                self.exposed_timers.len(),
                self.exposed
            )));
        }
        if self.infectious_timers.len() != self.infectious {
            return Err(violation(format!(
                "{} infectious timers for I = {}",
                self.infectious_timers.len(),
                self.infectious
            )));
        }
        Ok(())
    }
}
