//! Management scenario presets.
//!
//! Each preset fixes the two transmission rates; everything else in a
//! scenario is set independently.  Two rate tables exist:
//!
//! | Preset                  | `betas()` (single runs) | `batch_betas()` (scenario grids) |
//! |-------------------------|-------------------------|----------------------------------|
//! | `do_nothing`            | 0.3, 0.02               | 0.5, 0.02                        |
//! | `isolation_only`        | 0.15, 0.01              | 0.2, 0.01                        |
//! | `isolation_biosecurity` | 0.05, 0.002             | 0.05, 0.002                      |

use std::fmt;
use std::str::FromStr;

use crate::{ScenarioParams, SeildrError};

/// A management intervention, expressed as its effect on transmission.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Management {
    /// No intervention.
    DoNothing,
    /// Symptomatic birds isolated.
    IsolationOnly,
    /// Isolation plus strict biosecurity between aviaries.
    IsolationBiosecurity,
}

impl Management {
    pub const ALL: [Management; 3] = [
        Management::DoNothing,
        Management::IsolationOnly,
        Management::IsolationBiosecurity,
    ];

    /// `(beta_within, beta_cross)` used for a single interactive scenario.
    pub fn betas(self) -> (f64, f64) {
        match self {
            Management::DoNothing            => (0.3, 0.02),
            Management::IsolationOnly        => (0.15, 0.01),
            Management::IsolationBiosecurity => (0.05, 0.002),
        }
    }

    /// `(beta_within, beta_cross)` used when running a scenario grid.
    pub fn batch_betas(self) -> (f64, f64) {
        match self {
            Management::DoNothing            => (0.5, 0.02),
            Management::IsolationOnly        => (0.2, 0.01),
            Management::IsolationBiosecurity => (0.05, 0.002),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Management::DoNothing            => "do_nothing",
            Management::IsolationOnly        => "isolation_only",
            Management::IsolationBiosecurity => "isolation_biosecurity",
        }
    }
}

impl fmt::Display for Management {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Management {
    type Err = SeildrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Management::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| {
                SeildrError::config(format!(
                    "unknown management scenario {s:?}: expected do_nothing, isolation_only, or isolation_biosecurity"
                ))
            })
    }
}

impl ScenarioParams {
    /// Runner defaults (6 infectious, 30 latent, mortality 0.15,
    /// reactivation 1/3650, 1095 days) with the preset's transmission rates.
    pub fn for_management(management: Management) -> Self {
        let (beta_within, beta_cross) = management.betas();
        Self {
            initial_infectious: 6,
            beta_within,
            beta_cross,
            ..Self::default()
        }
    }
}
