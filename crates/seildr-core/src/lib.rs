//! `seildr-core` — foundational types for the `seildr` herpesvirus simulator.
//!
//! This crate is a dependency of every other `seildr-*` crate.  It has no
//! `seildr-*` dependencies and only the random-number and error crates as
//! external ones (plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `CompartmentId`, `ReplicateId`                             |
//! | [`time`]        | `Day`                                                      |
//! | [`params`]      | `ScenarioParams`, `StageDurations`, `Population`, `EnsembleConfig` |
//! | [`management`]  | `Management` presets (do nothing / isolation / biosecurity) |
//! | [`rng`]         | `ReplicateRng` (one independent stream per replicate)      |
//! | [`error`]       | `SeildrError`, `SeildrResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and parameter types. |

pub mod error;
pub mod ids;
pub mod management;
pub mod params;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SeildrError, SeildrResult};
pub use ids::{CompartmentId, ReplicateId};
pub use management::Management;
pub use params::{
    DEFAULT_CAPACITIES, EnsembleConfig, Population, ScenarioParams, SeedAllocation,
    StageDurations,
};
pub use rng::{ReplicateRng, clamp_probability};
pub use time::Day;
