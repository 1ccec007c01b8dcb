//! Unit tests for seildr-model.

use seildr_core::{CompartmentId, Day, ReplicateId, ReplicateRng, ScenarioParams, StageDurations};

use crate::{Compartment, InfectionPressure, StepOutcome, step_compartment};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn quiet_params() -> ScenarioParams {
    ScenarioParams {
        beta_within:          0.0,
        beta_cross:           0.0,
        mortality_rate:       0.0,
        reactivation_daily_p: 0.0,
        ..ScenarioParams::default()
    }
}

fn isolated(infectious_self: u32, total_capacity: u64) -> InfectionPressure {
    InfectionPressure { infectious_self, infectious_others: 0, total_capacity }
}

fn rng() -> ReplicateRng {
    ReplicateRng::new(42, ReplicateId(0))
}

/// Step `n` days with a fixed pressure, returning each day's outcome.
fn run_days(
    c:        &mut Compartment,
    pressure: InfectionPressure,
    params:   &ScenarioParams,
    n:        usize,
) -> Vec<StepOutcome> {
    let mut rng = rng();
    (0..n)
        .map(|d| {
            let out = step_compartment(c, &pressure, params, &mut rng);
            c.check_invariants(CompartmentId(0), Day(d as u32)).unwrap();
            out
        })
        .collect()
}

// ── CohortTimers ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cohort {
    use crate::CohortTimers;

    #[test]
    fn fresh_entries_leave_after_duration_advances() {
        let mut t = CohortTimers::new(5);
        t.push_fresh(3);
        assert_eq!(t.len(), 3);
        for _ in 0..4 {
            assert_eq!(t.advance(), 0);
        }
        assert_eq!(t.advance(), 3);
        assert!(t.is_empty());
    }

    #[test]
    fn staggered_cohorts_leave_in_order() {
        let mut t = CohortTimers::new(3);
        t.push_fresh(2);
        assert_eq!(t.advance(), 0);
        t.push_fresh(5);
        assert_eq!(t.remaining_counts(), vec![0, 2, 5]);
        assert_eq!(t.advance(), 0);
        assert_eq!(t.advance(), 2);
        assert_eq!(t.advance(), 5);
        assert_eq!(t.len(), 0);
    }

    #[test]
    fn duration_one_leaves_on_first_advance() {
        let mut t = CohortTimers::new(1);
        t.push_fresh(4);
        assert_eq!(t.remaining_counts(), vec![4]);
        assert_eq!(t.advance(), 4);
    }

    #[test]
    fn zero_duration_behaves_like_one() {
        let mut t = CohortTimers::new(0);
        assert_eq!(t.duration(), 1);
        t.push_fresh(2);
        assert_eq!(t.advance(), 2);
    }

    #[test]
    fn push_zero_is_noop() {
        let mut t = CohortTimers::new(4);
        t.push_fresh(0);
        assert!(t.is_empty());
        assert_eq!(t.remaining_counts(), vec![0; 4]);
    }
}

// ── Force of infection ────────────────────────────────────────────────────────

#[cfg(test)]
mod pressure {
    use super::*;
    use crate::infection_probability;

    #[test]
    fn combines_within_and_cross_terms() {
        let params = ScenarioParams { beta_within: 0.1, beta_cross: 0.02, ..Default::default() };
        let p = InfectionPressure { infectious_self: 7, infectious_others: 10, total_capacity: 127 };
        let lambda = p.force_of_infection(36, &params);
        let expected = 0.1 * 7.0 / 36.0 + 0.02 * 10.0 / 127.0;
        assert!((lambda - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_betas_give_zero_hazard() {
        let p = InfectionPressure { infectious_self: 30, infectious_others: 90, total_capacity: 127 };
        assert_eq!(p.force_of_infection(36, &quiet_params()), 0.0);
    }

    #[test]
    fn probability_is_clamped() {
        assert_eq!(infection_probability(0.0), 0.0);
        assert_eq!(infection_probability(1e9), 1.0);
        assert!((infection_probability(1.0) - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
        assert_eq!(infection_probability(f64::NAN), 0.0);
    }
}

// ── Stepper ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stepper {
    use super::*;

    #[test]
    fn zero_transmission_never_exposes() {
        let mut c = Compartment::new(36, StageDurations::default());
        c.seed_infectious(7).unwrap();
        c.seed_latent(10).unwrap();
        let outcomes = run_days(&mut c, isolated(7, 127), &quiet_params(), 60);
        assert!(outcomes.iter().all(|o| o.new_exposed == 0));
        assert_eq!(c.exposed(), 0);
        assert_eq!(c.susceptible(), 36 - 17);
    }

    #[test]
    fn exposed_progress_after_incubation_days() {
        // Saturating pressure on day 0 exposes every susceptible; no
        // transmission afterwards.
        let durations = StageDurations { incubation_days: 5, infectious_days: 10 };
        let mut c = Compartment::new(10, durations);
        let mut rng = rng();
        let hot = ScenarioParams { beta_within: 1e6, ..quiet_params() };
        let day0 = step_compartment(&mut c, &isolated(10, 10), &hot, &mut rng);
        assert_eq!(day0.new_exposed, 10);
        assert_eq!(day0.progressed, 0);

        let quiet = quiet_params();
        let progressed: Vec<u32> = (1..=5)
            .map(|_| step_compartment(&mut c, &isolated(0, 10), &quiet, &mut rng).progressed)
            .collect();
        // Exposed on day 0 with timer 5, decremented the same day → day 4.
        assert_eq!(progressed, vec![0, 0, 0, 10, 0]);
        assert_eq!(c.infectious(), 10);
        c.check_invariants(CompartmentId(0), Day(5)).unwrap();
    }

    #[test]
    fn unit_incubation_progresses_same_day() {
        let durations = StageDurations { incubation_days: 1, infectious_days: 3 };
        let mut c = Compartment::new(4, durations);
        let hot = ScenarioParams { beta_within: 1e6, ..quiet_params() };
        let out = step_compartment(&mut c, &isolated(4, 4), &hot, &mut rng());
        assert_eq!(out.new_exposed, 4);
        assert_eq!(out.progressed, 4);
        assert_eq!(c.exposed(), 0);
        assert_eq!(c.infectious(), 4);
    }

    #[test]
    fn seeded_infectious_resolve_on_tenth_day() {
        let mut c = Compartment::new(20, StageDurations::default());
        c.seed_infectious(3).unwrap();
        let params = ScenarioParams { mortality_rate: 1.0, ..quiet_params() };
        let outcomes = run_days(&mut c, isolated(0, 20), &params, 12);
        let finished: Vec<u32> = outcomes.iter().map(|o| o.finished).collect();
        assert_eq!(finished, vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0]);
        assert_eq!(outcomes[9].deaths, 3);
        assert_eq!(c.dead(), 3);
        assert_eq!(c.infectious(), 0);
    }

    #[test]
    fn zero_mortality_sends_everyone_to_latent() {
        let mut c = Compartment::new(20, StageDurations::default());
        c.seed_infectious(5).unwrap();
        let outcomes = run_days(&mut c, isolated(0, 20), &quiet_params(), 10);
        assert_eq!(outcomes[9].recovered_to_latent, 5);
        assert_eq!(outcomes.iter().map(|o| o.deaths).sum::<u32>(), 0);
        assert_eq!(c.latent(), 5);
    }

    #[test]
    fn certain_reactivation_returns_latent_same_day() {
        let mut c = Compartment::new(20, StageDurations::default());
        c.seed_latent(4).unwrap();
        let params = ScenarioParams { reactivation_daily_p: 1.0, ..quiet_params() };
        let outcomes = run_days(&mut c, isolated(0, 20), &params, 1);
        assert_eq!(outcomes[0].reactivations, 4);
        assert_eq!(c.latent(), 0);
        assert_eq!(c.infectious(), 4);
        // Reactivated timers start counting tomorrow: full duration remains.
        assert_eq!(c.infectious_timers().remaining_counts()[9], 4);
    }

    #[test]
    fn saturating_pressure_exposes_everyone() {
        let mut c = Compartment::new(25, StageDurations::default());
        let hot = ScenarioParams { beta_within: 1e12, beta_cross: 1e12, ..quiet_params() };
        let p = InfectionPressure { infectious_self: 25, infectious_others: 102, total_capacity: 127 };
        let out = step_compartment(&mut c, &p, &hot, &mut rng());
        assert_eq!(out.new_exposed, 25);
        assert_eq!(c.susceptible(), 0);
    }

    #[test]
    fn conservation_under_mixed_dynamics() {
        let mut c = Compartment::new(36, StageDurations::default());
        c.seed_infectious(7).unwrap();
        c.seed_latent(5).unwrap();
        let params = ScenarioParams {
            beta_within:          0.4,
            beta_cross:           0.05,
            mortality_rate:       0.3,
            reactivation_daily_p: 0.05,
            ..Default::default()
        };
        let mut rng = rng();
        for d in 0..500 {
            let p = InfectionPressure {
                infectious_self:   c.infectious(),
                infectious_others: 3,
                total_capacity:    127,
            };
            let out = step_compartment(&mut c, &p, &params, &mut rng);
            assert_eq!(out.deaths + out.recovered_to_latent, out.finished);
            c.check_invariants(CompartmentId(0), Day(d)).unwrap();
        }
    }

    #[test]
    fn same_seed_same_outcomes() {
        let params = ScenarioParams { beta_within: 0.5, mortality_rate: 0.5, ..Default::default() };
        let run = || {
            let mut c = Compartment::new(30, StageDurations::default());
            c.seed_infectious(5).unwrap();
            let mut rng = ReplicateRng::new(99, ReplicateId(4));
            (0..100)
                .map(|_| {
                    let p = isolated(c.infectious(), 30);
                    step_compartment(&mut c, &p, &params, &mut rng)
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}

// ── Compartment ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod compartment {
    use super::*;

    #[test]
    fn new_is_fully_susceptible() {
        let c = Compartment::new(11, StageDurations::default());
        assert_eq!(c.susceptible(), 11);
        assert_eq!(c.counts().total(), 11);
        c.check_invariants(CompartmentId(1), Day::ZERO).unwrap();
    }

    #[test]
    fn seeding_beyond_susceptible_fails() {
        let mut c = Compartment::new(8, StageDurations::default());
        c.seed_infectious(5).unwrap();
        assert!(c.seed_latent(4).unwrap_err().is_config());
        assert_eq!(c.latent(), 0);
        assert_eq!(c.susceptible(), 3);
    }

    #[test]
    fn seeded_infectious_have_timers() {
        let mut c = Compartment::new(8, StageDurations::default());
        c.seed_infectious(2).unwrap();
        assert_eq!(c.infectious_timers().len(), 2);
        assert_eq!(c.exposed_timers().len(), 0);
        c.check_invariants(CompartmentId(0), Day::ZERO).unwrap();
    }
}
