//! Simulator error type.
//!
//! Sub-crates define their own error enums and wrap `SeildrError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::{CompartmentId, Day};

/// The top-level error type for `seildr-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SeildrError {
    /// Invalid scenario parameters, population layout, or ensemble settings.
    /// Always raised before any simulation work begins.
    #[error("configuration error: {0}")]
    Config(String),

    /// A conservation or bookkeeping invariant broke during stepping.  This is
    /// a bug in the stepping algorithm and aborts the replicate.
    #[error("invariant violated in {compartment} on {day}: {detail}")]
    InvariantViolation {
        compartment: CompartmentId,
        day:         Day,
        detail:      String,
    },
}

impl SeildrError {
    /// Shorthand for building a [`SeildrError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        SeildrError::Config(msg.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, SeildrError::Config(_))
    }
}

/// Shorthand result type for all `seildr-*` crates.
pub type SeildrResult<T> = Result<T, SeildrError>;
