//! `seildr-sim` — replicate engine and ensemble orchestrator.
//!
//! # Day loop (one replicate)
//!
//! ```text
//! for day in 0..params.days:
//!   ① Snapshot  — infectious count of every compartment (previous day).
//!   ② Step      — step_compartment for each compartment in ascending id
//!                 order, pressure taken from the snapshot.
//!   ③ Check     — S+E+I+L+D == capacity and timer counts match; abort on
//!                 violation.
//!   ④ Record    — push the day's total deaths onto the series.
//! ```
//!
//! # Ensemble
//!
//! [`Ensemble::run`] executes `repeats` replicates on a dedicated Rayon pool
//! of `min(worker_count, logical cores)` threads.  Replicate `r` draws from
//! ChaCha stream `r` under the master seed, so rows are independent and each
//! is reproducible on its own.  The result is a [`DeathMatrix`] whose rows are
//! ordered by replicate index.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use seildr_core::{EnsembleConfig, Population, ScenarioParams, StageDurations};
//! use seildr_sim::Ensemble;
//!
//! let matrix = Ensemble::new(
//!     ScenarioParams::default(),
//!     Population::default(),
//!     StageDurations::default(),
//!     EnsembleConfig { repeats: 500, worker_count: 8, master_seed: 42 },
//! )?
//! .run()?;
//! ```

pub mod builder;
pub mod ensemble;
pub mod error;
pub mod matrix;
pub mod observer;
pub mod replicate;


pub use builder::ReplicateBuilder;
pub use ensemble::{Ensemble, run_replicate};
pub use error::{SimError, SimResult};
pub use matrix::DeathMatrix;
pub use observer::{NoopObserver, ReplicateObserver};
pub use replicate::{Replicate, ReplicatePhase};
