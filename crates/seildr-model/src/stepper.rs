//! The compartment stepper: one compartment, one simulated day.
//!
//! # Sub-step order
//!
//! ```text
//! ① Force of infection   λ = β_w·I_self/capacity + β_x·I_others/total_capacity
//! ② New exposures        Binomial(S, 1 − e^−λ)          S → E, fresh incubation timers
//! ③ Exposed progression  advance exposed timers         E → I, fresh infectious timers
//! ④ Infectious resolution advance infectious timers     I → D (p = mortality) or I → L
//! ⑤ Reactivation         Binomial(L, reactivation_p)    L → I, fresh infectious timers
//! ```
//!
//! The order is part of the model.  Birds exposed in ② have their timers
//! decremented in ③ the same day, and birds promoted in ③ are decremented in
//! ④ the same day.  Reactivations from ⑤ start their countdown tomorrow.

use seildr_core::{ReplicateRng, ScenarioParams, clamp_probability};

use crate::Compartment;

/// Infectious pressure acting on one compartment for one day.
///
/// Built by the replicate engine from the previous day's snapshot so that the
/// order in which compartments are stepped does not change the pressure any
/// of them sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfectionPressure {
    /// Infectious count in the compartment being stepped.
    pub infectious_self:   u32,
    /// Infectious count summed over every other compartment.
    pub infectious_others: u32,
    /// Sum of all compartment capacities.
    pub total_capacity:    u64,
}

impl InfectionPressure {
    /// Per-susceptible daily hazard `λ_within + λ_cross`.
    pub fn force_of_infection(&self, capacity: u32, params: &ScenarioParams) -> f64 {
        let within = if capacity == 0 {
            0.0
        } else {
            params.beta_within * self.infectious_self as f64 / capacity as f64
        };
        let cross = if self.total_capacity == 0 {
            0.0
        } else {
            params.beta_cross * self.infectious_others as f64 / self.total_capacity as f64
        };
        within + cross
    }
}

/// Convert a daily hazard into a daily infection probability, `1 − e^−λ`,
/// clamped into `[0, 1]`.
#[inline]
pub fn infection_probability(lambda: f64) -> f64 {
    clamp_probability(-(-lambda).exp_m1())
}

/// Event counts produced by one compartment on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// S → E.
    pub new_exposed:         u32,
    /// E → I.
    pub progressed:          u32,
    /// Individuals leaving the infectious stage (deaths + recoveries).
    pub finished:            u32,
    /// I → D.  The compartment's contribution to the day's death tally.
    pub deaths:              u32,
    /// I → L.
    pub recovered_to_latent: u32,
    /// L → I.
    pub reactivations:       u32,
}

/// Advance `compartment` by one day.
///
/// All draws come from `rng`; given the same compartment state, pressure,
/// parameters, and generator state the result is identical.
pub fn step_compartment(
    compartment: &mut Compartment,
    pressure:    &InfectionPressure,
    params:      &ScenarioParams,
    rng:         &mut ReplicateRng,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    // ── ① + ② Force of infection and new exposures ───────────────────────
    let lambda = pressure.force_of_infection(compartment.capacity(), params);
    let p_infection = infection_probability(lambda);

    outcome.new_exposed = rng.binomial(compartment.susceptible, p_infection);
    compartment.susceptible -= outcome.new_exposed;
    compartment.exposed += outcome.new_exposed;
    compartment.exposed_timers.push_fresh(outcome.new_exposed);

    // ── ③ Exposed progression ────────────────────────────────────────────
    outcome.progressed = compartment.exposed_timers.advance();
    compartment.exposed = compartment.exposed.saturating_sub(outcome.progressed);
    compartment.infectious += outcome.progressed;
    compartment.infectious_timers.push_fresh(outcome.progressed);

    // ── ④ Infectious resolution ──────────────────────────────────────────
    outcome.finished = compartment.infectious_timers.advance();
    compartment.infectious = compartment.infectious.saturating_sub(outcome.finished);
    for _ in 0..outcome.finished {
        if rng.gen_bool(params.mortality_rate) {
            outcome.deaths += 1;
        } else {
            outcome.recovered_to_latent += 1;
        }
    }
    compartment.dead += outcome.deaths;
    compartment.latent += outcome.recovered_to_latent;

    // ── ⑤ Reactivation ───────────────────────────────────────────────────
    outcome.reactivations = rng.binomial(compartment.latent, params.reactivation_daily_p);
    compartment.latent -= outcome.reactivations;
    compartment.infectious += outcome.reactivations;
    compartment.infectious_timers.push_fresh(outcome.reactivations);

    outcome
}
