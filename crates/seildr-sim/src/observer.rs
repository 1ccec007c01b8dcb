//! Replicate observer trait for progress reporting and state inspection.

use seildr_core::{CompartmentId, Day, ReplicateId};
use seildr_model::{CompartmentCounts, StepOutcome};

/// Callbacks invoked by [`Replicate::run`][crate::Replicate::run] at key
/// points in the day loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — epidemic curve recorder
///
/// ```rust,ignore
/// struct PeakInfectious { peak: u32, today: u32 }
///
/// impl ReplicateObserver for PeakInfectious {
///     fn on_day_start(&mut self, _day: Day) { self.today = 0; }
///     fn on_compartment_stepped(&mut self, _d: Day, _id: CompartmentId,
///                               counts: &CompartmentCounts, _o: &StepOutcome) {
///         self.today += counts.infectious;
///     }
///     fn on_day_end(&mut self, _day: Day, _deaths: u32) {
///         self.peak = self.peak.max(self.today);
///     }
/// }
/// ```
pub trait ReplicateObserver {
    /// Called at the start of each day, before any compartment is stepped.
    fn on_day_start(&mut self, _day: Day) {}

    /// Called after one compartment has been stepped and its invariants
    /// verified.  `counts` is the compartment's state at the end of the day.
    fn on_compartment_stepped(
        &mut self,
        _day:         Day,
        _compartment: CompartmentId,
        _counts:      &CompartmentCounts,
        _outcome:     &StepOutcome,
    ) {}

    /// Called once every compartment has been stepped.  `deaths` is the
    /// day's across-compartment death count.
    fn on_day_end(&mut self, _day: Day, _deaths: u32) {}

    /// Called once after the final day completes.
    fn on_replicate_end(&mut self, _replicate: ReplicateId, _total_deaths: u64) {}
}

/// A [`ReplicateObserver`] that does nothing.
pub struct NoopObserver;

impl ReplicateObserver for NoopObserver {}
