//! CSV export of the ensemble result matrix.
//!
//! Two layouts are supported:
//!
//! - **Daily, replicate-major** ([`write_matrix`]): one row per replicate,
//!   `replicate,day_0,…,day_{D-1}`.  Lossless; the layout downstream
//!   aggregation reads.
//! - **Cumulative, day-major** ([`write_cumulative`]): one row per day,
//!   `day,rep_0,…,rep_{R-1}`, each cell the replicate's running total.  Handy
//!   for plotting tools that expect a time column.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use seildr_sim::DeathMatrix;

use crate::OutputResult;

/// Write daily deaths, one row per replicate, to any `Write` sink.
pub fn write_matrix<W: Write>(sink: W, matrix: &DeathMatrix) -> OutputResult<()> {
    let mut wtr = Writer::from_writer(sink);

    let mut header = Vec::with_capacity(matrix.days() + 1);
    header.push("replicate".to_string());
    header.extend((0..matrix.days()).map(|d| format!("day_{d}")));
    wtr.write_record(&header)?;

    for (r, row) in matrix.rows().enumerate() {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(r.to_string());
        record.extend(row.iter().map(u32::to_string));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create `path` and write the daily matrix into it.
pub fn write_matrix_csv(path: &Path, matrix: &DeathMatrix) -> OutputResult<()> {
    write_matrix(File::create(path)?, matrix)
}

/// Write cumulative deaths, one row per day, to any `Write` sink.
pub fn write_cumulative<W: Write>(sink: W, matrix: &DeathMatrix) -> OutputResult<()> {
    let mut wtr = Writer::from_writer(sink);

    let mut header = Vec::with_capacity(matrix.repeats() + 1);
    header.push("day".to_string());
    header.extend((0..matrix.repeats()).map(|r| format!("rep_{r}")));
    wtr.write_record(&header)?;

    let cumulative: Vec<Vec<u64>> = (0..matrix.repeats())
        .map(|r| matrix.cumulative_row(r))
        .collect();

    for day in 0..matrix.days() {
        let mut record = Vec::with_capacity(matrix.repeats() + 1);
        record.push(day.to_string());
        record.extend(cumulative.iter().map(|series| series[day].to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create `path` and write the cumulative day-major table into it.
pub fn write_cumulative_csv(path: &Path, matrix: &DeathMatrix) -> OutputResult<()> {
    write_cumulative(File::create(path)?, matrix)
}
