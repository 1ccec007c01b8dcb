//! Scenario-grid CSV loader.
//!
//! # CSV format
//!
//! One row per scenario to run.  `cores` is optional.
//!
//! ```csv
//! scenario,initial_infectious,initial_latent,mortality,reactivation,repeats,days,cores
//! do_nothing,2,10,0.1,0.00027,3000,1095,10
//! isolation_only,5,20,0.4,0.00027,3000,1095,
//! ```
//!
//! **`scenario`** must be one of the [`Management`] preset names; it fixes
//! `beta_within` and `beta_cross` from the batch table
//! ([`Management::batch_betas`]).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use seildr_core::{EnsembleConfig, Management, ScenarioParams};

use crate::{OutputError, OutputResult};

/// Worker count used when a row leaves `cores` empty.
pub const DEFAULT_CORES: usize = 10;

// ── CSV record ────────────────────────────────────────────────────────────────

/// One parsed row of the scenario grid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioRow {
    pub scenario:           Management,
    pub initial_infectious: u32,
    pub initial_latent:     u32,
    pub mortality:          f64,
    pub reactivation:       f64,
    pub repeats:            u32,
    pub days:               u32,
    #[serde(default)]
    pub cores:              Option<usize>,
}

impl ScenarioRow {
    /// Scenario parameters with the preset's batch transmission rates.
    /// Validated.
    pub fn to_params(&self) -> OutputResult<ScenarioParams> {
        let (beta_within, beta_cross) = self.scenario.batch_betas();
        let params = ScenarioParams {
            initial_infectious:   self.initial_infectious,
            initial_latent:       self.initial_latent,
            beta_within,
            beta_cross,
            mortality_rate:       self.mortality,
            reactivation_daily_p: self.reactivation,
            days:                 self.days,
        };
        params.validate()?;
        Ok(params)
    }

    /// Ensemble settings for this row under `master_seed`.
    pub fn ensemble_config(&self, master_seed: u64) -> EnsembleConfig {
        EnsembleConfig {
            repeats:      self.repeats,
            worker_count: self.cores.unwrap_or(DEFAULT_CORES),
            master_seed,
        }
    }

    /// `{scenario}_m{mortality}_i{infectious}_l{latent}`, used to name
    /// per-scenario result files.
    pub fn result_file_stem(&self) -> String {
        result_file_stem(
            self.scenario,
            self.mortality,
            self.initial_infectious,
            self.initial_latent,
        )
    }
}

/// `{scenario}_m{mortality}_i{infectious}_l{latent}`.
pub fn result_file_stem(
    scenario:           Management,
    mortality:          f64,
    initial_infectious: u32,
    initial_latent:     u32,
) -> String {
    format!("{scenario}_m{mortality}_i{initial_infectious}_l{initial_latent}")
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every row of a scenario-grid CSV file.
pub fn load_scenarios_csv(path: &Path) -> OutputResult<Vec<ScenarioRow>> {
    let file = std::fs::File::open(path)?;
    load_scenarios_reader(file)
}

/// Like [`load_scenarios_csv`] but accepts any `Read` source.
///
/// Rows naming an unknown management scenario are rejected rather than
/// skipped, so a typo cannot silently drop part of a grid.
pub fn load_scenarios_reader<R: Read>(reader: R) -> OutputResult<Vec<ScenarioRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<ScenarioRow>()
        .map(|result| result.map_err(|e| OutputError::Parse(e.to_string())))
        .collect()
}
