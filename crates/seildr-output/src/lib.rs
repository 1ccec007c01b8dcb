//! `seildr-output` — result export and scenario-grid input for seildr.
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`matrix_csv`]  | Daily (replicate-major) and cumulative (day-major) CSV     |
//! | [`summary`]     | `EnsembleSummary` (mean, 95 % interval, std), `SummaryWriter` |
//! | [`grid`]        | `ScenarioRow`, `load_scenarios_csv`                         |
//!
//! # Usage
//!
//! ```rust,ignore
//! use seildr_output::{EnsembleSummary, write_matrix_csv};
//!
//! let matrix = ensemble.run()?;
//! write_matrix_csv(Path::new("results/do_nothing.csv"), &matrix)?;
//! let s = EnsembleSummary::from_matrix(&matrix)?;
//! println!("{:.1} [{:.1} - {:.1}]", s.mean, s.lower, s.upper);
//! ```

pub mod error;
pub mod grid;
pub mod matrix_csv;
pub mod summary;


pub use error::{OutputError, OutputResult};
pub use grid::{ScenarioRow, load_scenarios_csv, load_scenarios_reader, result_file_stem};
pub use matrix_csv::{write_cumulative, write_cumulative_csv, write_matrix, write_matrix_csv};
pub use summary::{EnsembleSummary, SummaryRow, SummaryWriter, percentile};
