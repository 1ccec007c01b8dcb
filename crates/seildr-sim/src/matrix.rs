//! `DeathMatrix` — the ensemble's result tensor.

use crate::{SimError, SimResult};

/// Dense row-major `repeats × days` matrix of daily (not cumulative) deaths.
///
/// Row `r` is replicate `r`'s series, regardless of which worker ran it or
/// when it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathMatrix {
    data:    Vec<u32>,
    repeats: usize,
    days:    usize,
}

impl DeathMatrix {
    /// Stack per-replicate series.  Every row must have exactly `days` entries.
    pub fn from_rows(rows: Vec<Vec<u32>>, days: usize) -> SimResult<Self> {
        let repeats = rows.len();
        let mut data = Vec::with_capacity(repeats * days);
        for row in rows {
            if row.len() != days {
                return Err(SimError::ShapeMismatch { expected: days, got: row.len() });
            }
            data.extend(row);
        }
        Ok(Self { data, repeats, days })
    }

    pub fn repeats(&self) -> usize {
        self.repeats
    }

    pub fn days(&self) -> usize {
        self.days
    }

    /// Deaths of replicate `replicate` on day `day`, or `None` if out of range.
    pub fn get(&self, replicate: usize, day: usize) -> Option<u32> {
        if replicate >= self.repeats || day >= self.days {
            return None;
        }
        Some(self.data[replicate * self.days + day])
    }

    /// The daily series of one replicate.
    ///
    /// # Panics
    /// Panics if `replicate >= repeats()`.
    pub fn row(&self, replicate: usize) -> &[u32] {
        let start = replicate * self.days;
        &self.data[start..start + self.days]
    }

    /// Iterate rows in replicate order.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // `max(1)` keeps `chunks_exact` valid for the (never validated) zero-day case.
        self.data.chunks_exact(self.days.max(1))
    }

    /// Running total of one replicate's deaths.
    pub fn cumulative_row(&self, replicate: usize) -> Vec<u64> {
        self.row(replicate)
            .iter()
            .scan(0u64, |acc, &d| {
                *acc += d as u64;
                Some(*acc)
            })
            .collect()
    }

    /// Total deaths over the horizon, one entry per replicate.
    pub fn final_totals(&self) -> Vec<u64> {
        self.rows()
            .map(|row| row.iter().map(|&d| d as u64).sum())
            .collect()
    }

    /// Mean of [`final_totals`](Self::final_totals).
    pub fn mean_final_total(&self) -> f64 {
        if self.repeats == 0 {
            return 0.0;
        }
        self.final_totals().iter().sum::<u64>() as f64 / self.repeats as f64
    }

    /// Row-major backing storage.
    pub fn into_inner(self) -> Vec<u32> {
        self.data
    }
}
