use seildr_core::{ReplicateId, SeildrError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] SeildrError),

    #[error("could not build worker pool: {0}")]
    WorkerPool(String),

    #[error("{replicate} failed: {source}")]
    Replicate {
        replicate: ReplicateId,
        #[source]
        source:    Box<SimError>,
    },

    #[error("replicate already ran to completion")]
    AlreadyComplete,

    #[error("death series has {got} days, expected {expected}")]
    ShapeMismatch {
        expected: usize,
        got:      usize,
    },
}

impl SimError {
    /// `true` for errors raised by parameter validation.
    pub fn is_config(&self) -> bool {
        match self {
            SimError::Core(e)                 => e.is_config(),
            SimError::Replicate { source, .. } => source.is_config(),
            _                                  => false,
        }
    }

    /// `true` if a conservation or bookkeeping invariant broke mid-run.
    pub fn is_invariant_violation(&self) -> bool {
        match self {
            SimError::Core(SeildrError::InvariantViolation { .. }) => true,
            SimError::Replicate { source, .. }                     => source.is_invariant_violation(),
            _                                                      => false,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
