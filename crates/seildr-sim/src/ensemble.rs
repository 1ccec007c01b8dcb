//! Monte Carlo ensemble: many independent replicates on a worker pool.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;

use seildr_core::{EnsembleConfig, Population, ReplicateId, ScenarioParams, StageDurations};

use crate::{DeathMatrix, NoopObserver, ReplicateBuilder, SimError, SimResult};

/// Signature of [`run_replicate`]; tests swap in their own to inject failures.
pub(crate) type ReplicateRunner =
    fn(&ScenarioParams, &Population, StageDurations, u64, ReplicateId) -> SimResult<Vec<u32>>;

/// Run one replicate to completion: `(params, seed) → death series`.
///
/// Pure apart from its own random stream; safe to call from any thread.
pub fn run_replicate(
    params:      &ScenarioParams,
    population:  &Population,
    durations:   StageDurations,
    master_seed: u64,
    replicate:   ReplicateId,
) -> SimResult<Vec<u32>> {
    ReplicateBuilder::new(params.clone())
        .population(population.clone())
        .durations(durations)
        .seed(master_seed, replicate)
        .build()?
        .run(&mut NoopObserver)
}

/// A validated scenario ready to be run as an ensemble.
///
/// Construction performs every configuration check, so a constructed
/// `Ensemble` can only fail at run time on worker-pool setup or an internal
/// invariant violation.
///
/// # Example
///
/// ```rust,ignore
/// let ensemble = Ensemble::new(params, Population::default(),
///                              StageDurations::default(), config)?;
/// let matrix = ensemble.run()?;
/// assert_eq!(matrix.repeats(), config.repeats as usize);
/// ```
#[derive(Debug, Clone)]
pub struct Ensemble {
    params:     ScenarioParams,
    population: Population,
    durations:  StageDurations,
    config:     EnsembleConfig,
    runner:     ReplicateRunner,
}

impl Ensemble {
    pub fn new(
        params:     ScenarioParams,
        population: Population,
        durations:  StageDurations,
        config:     EnsembleConfig,
    ) -> SimResult<Self> {
        params.validate()?;
        durations.validate()?;
        config.validate()?;
        population.seed_counts(&params)?;
        Ok(Self { params, population, durations, config, runner: run_replicate })
    }

    /// Swap the per-replicate runner.
    #[cfg(test)]
    pub(crate) fn with_runner(mut self, runner: ReplicateRunner) -> Self {
        self.runner = runner;
        self
    }

    pub fn params(&self) -> &ScenarioParams {
        &self.params
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    /// Run every replicate and assemble the `repeats × days` matrix.
    pub fn run(&self) -> SimResult<DeathMatrix> {
        self.run_with_progress(|_, _| {})
    }

    /// Like [`run`](Self::run), calling `progress(completed, total)` from the
    /// worker threads each time a replicate finishes.
    ///
    /// If any replicate fails the whole run fails with
    /// [`SimError::Replicate`] and no partial matrix is produced.  Workers
    /// stop picking up new replicates after a failure, so when several
    /// replicates would fail, which one is reported is unspecified.
    pub fn run_with_progress<F>(&self, progress: F) -> SimResult<DeathMatrix>
    where
        F: Fn(usize, usize) + Sync,
    {
        let workers = self.config.effective_workers();
        let repeats = self.config.repeats;
        let total = repeats as usize;

        info!(
            "ensemble: {repeats} replicates × {} days on {workers} workers (seed {})",
            self.params.days, self.config.master_seed
        );
        let t0 = Instant::now();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("seildr-worker-{i}"))
            .build()
            .map_err(|e| SimError::WorkerPool(e.to_string()))?;

        let completed = AtomicUsize::new(0);

        // Indexed parallel collect keeps rows in replicate order.
        let rows: Vec<Vec<u32>> = pool.install(|| {
            (0..repeats)
                .into_par_iter()
                .map(|r| -> SimResult<Vec<u32>> {
                    let replicate = ReplicateId(r);
                    let row = (self.runner)(
                        &self.params,
                        &self.population,
                        self.durations,
                        self.config.master_seed,
                        replicate,
                    )
                    .map_err(|e| SimError::Replicate { replicate, source: Box::new(e) })?;

                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    progress(done, total);
                    Ok(row)
                })
                .collect::<SimResult<Vec<_>>>()
        })?;

        let matrix = DeathMatrix::from_rows(rows, self.params.days as usize)?;
        debug!("ensemble: mean final deaths {:.2}", matrix.mean_final_total());
        info!("ensemble: finished in {:.3} s", t0.elapsed().as_secs_f64());
        Ok(matrix)
    }
}
