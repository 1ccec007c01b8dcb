//! `seildr-model` — per-compartment disease state and the daily stepper.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`cohort`]      | `CohortTimers` (days-remaining ring-buffer histogram)     |
//! | [`compartment`] | `Compartment` (S/E/I/L/D + timers), `CompartmentCounts`   |
//! | [`stepper`]     | `step_compartment`, `InfectionPressure`, `StepOutcome`    |
//!
//! Nothing here owns a random generator or knows about other compartments;
//! the replicate engine in `seildr-sim` supplies both.

pub mod cohort;
pub mod compartment;
pub mod stepper;

#[cfg(test)]
mod tests;

pub use cohort::CohortTimers;
pub use compartment::{Compartment, CompartmentCounts};
pub use stepper::{InfectionPressure, StepOutcome, infection_probability, step_compartment};
