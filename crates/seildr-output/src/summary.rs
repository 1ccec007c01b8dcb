//! Final-cumulative-death summaries of an ensemble.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use seildr_core::{Management, ScenarioParams};
use seildr_sim::DeathMatrix;

use crate::{OutputError, OutputResult};

/// Lower and upper percentiles of the reported 95 % interval.
pub const INTERVAL_PERCENTILES: (f64, f64) = (2.5, 97.5);

/// Distribution of total deaths over the horizon across replicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnsembleSummary {
    pub mean:  f64,
    /// 2.5th percentile.
    pub lower: f64,
    /// 97.5th percentile.
    pub upper: f64,
    /// Population standard deviation.
    pub std:   f64,
}

impl EnsembleSummary {
    pub fn from_matrix(matrix: &DeathMatrix) -> OutputResult<Self> {
        let totals: Vec<f64> = matrix.final_totals().into_iter().map(|t| t as f64).collect();
        Self::from_totals(&totals)
    }

    pub fn from_totals(totals: &[f64]) -> OutputResult<Self> {
        if totals.is_empty() {
            return Err(OutputError::Empty);
        }
        let n = totals.len() as f64;
        let mean = totals.iter().sum::<f64>() / n;
        let var = totals.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = totals.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            mean,
            lower: percentile(&sorted, INTERVAL_PERCENTILES.0),
            upper: percentile(&sorted, INTERVAL_PERCENTILES.1),
            std:   var.sqrt(),
        })
    }
}

/// `q`-th percentile of ascending `sorted`, linearly interpolating between
/// the two nearest order statistics.
///
/// # Panics
/// Panics if `sorted` is empty.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ── Summary table ─────────────────────────────────────────────────────────────

/// One row of the aggregate summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub scenario:           Management,
    pub mortality:          f64,
    pub initial_infectious: u32,
    pub initial_latent:     u32,
    pub mean_deaths:        f64,
    pub lower_deaths:       f64,
    pub upper_deaths:       f64,
    pub std_deaths:         f64,
}

impl SummaryRow {
    pub fn new(scenario: Management, params: &ScenarioParams, summary: &EnsembleSummary) -> Self {
        Self {
            scenario,
            mortality:          params.mortality_rate,
            initial_infectious: params.initial_infectious,
            initial_latent:     params.initial_latent,
            mean_deaths:        summary.mean,
            lower_deaths:       summary.lower,
            upper_deaths:       summary.upper,
            std_deaths:         summary.std,
        }
    }
}

/// Streams [`SummaryRow`]s to CSV; the header is written with the first row.
pub struct SummaryWriter<W: Write> {
    inner:    csv::Writer<W>,
    finished: bool,
}

impl SummaryWriter<File> {
    /// Create (or truncate) `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { inner: csv::Writer::from_writer(sink), finished: false }
    }

    pub fn write(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.inner.serialize(row)?;
        Ok(())
    }

    /// Flush the underlying sink.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }

    /// Flush and return the sink.
    pub fn into_inner(mut self) -> OutputResult<W> {
        self.finish()?;
        self.inner
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}
