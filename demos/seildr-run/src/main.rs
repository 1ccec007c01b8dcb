//! seildr-run — command-line runner for the seildr herpesvirus simulator.
//!
//! Two modes:
//!
//! - **Single scenario** (default): run one management scenario and write its
//!   daily death matrix to `<output>/<scenario>_m<mortality>_i<inf>_l<lat>.csv`.
//! - **Grid** (`--grid scenarios.csv`): run every row of a scenario grid,
//!   writing one matrix per row plus `<output>/summaries/aggregate_summary.csv`.
//!   Grid rows use the batch transmission-rate table, single runs the
//!   interactive one (see `seildr_core::Management`).
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` for per-replicate
//! messages.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use seildr_core::{EnsembleConfig, Management, Population, ScenarioParams, StageDurations};
use seildr_output::{
    EnsembleSummary, SummaryRow, SummaryWriter, load_scenarios_csv, result_file_stem,
    write_matrix_csv,
};
use seildr_sim::{DeathMatrix, Ensemble};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "seildr-run", about = "Run SEILDR herpesvirus management scenarios")]
struct Args {
    /// Management scenario: do_nothing, isolation_only, isolation_biosecurity.
    #[arg(long, default_value = "do_nothing")]
    scenario: Management,

    /// Infectious birds in the index aviary on day 0.
    #[arg(long, default_value_t = 6)]
    initial_infectious: u32,

    /// Latent carriers spread across aviaries on day 0.
    #[arg(long, default_value_t = 30)]
    initial_latent: u32,

    /// Probability that an infectious bird dies at the end of its infection.
    #[arg(long, default_value_t = 0.15)]
    mortality: f64,

    /// Daily reactivation probability per latent carrier.
    #[arg(long, default_value_t = 1.0 / 3650.0)]
    reactivation: f64,

    /// Number of stochastic replicates.
    #[arg(long, default_value_t = 500)]
    repeats: u32,

    /// Simulation horizon in days.
    #[arg(long, default_value_t = 1095)]
    days: u32,

    /// Worker threads (capped at the number of logical cores).
    #[arg(long, default_value_t = 10)]
    cores: usize,

    /// Master RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output directory.
    #[arg(long, default_value = "results")]
    output: PathBuf,

    /// Run every row of this scenario-grid CSV instead of a single scenario.
    #[arg(long)]
    grid: Option<PathBuf>,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    match &args.grid {
        Some(grid) => run_grid(grid, &args),
        None => run_single(&args),
    }
}

fn run_single(args: &Args) -> Result<()> {
    let params = ScenarioParams {
        initial_infectious:   args.initial_infectious,
        initial_latent:       args.initial_latent,
        mortality_rate:       args.mortality,
        reactivation_daily_p: args.reactivation,
        days:                 args.days,
        ..ScenarioParams::for_management(args.scenario)
    };
    let config = EnsembleConfig {
        repeats:      args.repeats,
        worker_count: args.cores,
        master_seed:  args.seed,
    };
    let stem = result_file_stem(
        args.scenario,
        args.mortality,
        args.initial_infectious,
        args.initial_latent,
    );

    println!("\nRunning scenario: {} using {} cores...", args.scenario, args.cores);
    info!("parameters: {params:?}");
    let matrix = run_and_save(&params, config, &stem, &args.output)?;
    let summary = EnsembleSummary::from_matrix(&matrix)?;

    println!(
        "Final cumulative deaths: {:.1} [{:.1} - {:.1}]",
        summary.mean, summary.lower, summary.upper
    );
    Ok(())
}

fn run_grid(grid: &Path, args: &Args) -> Result<()> {
    let rows = load_scenarios_csv(grid)
        .with_context(|| format!("loading scenario grid {}", grid.display()))?;
    println!("Loaded {} scenarios from {}", rows.len(), grid.display());

    let summaries_dir = args.output.join("summaries");
    std::fs::create_dir_all(&summaries_dir)?;
    let mut writer = SummaryWriter::create(&summaries_dir.join("aggregate_summary.csv"))?;

    let t0 = Instant::now();
    for (i, row) in rows.iter().enumerate() {
        println!(
            "\n--- [{}/{}] {} | m={} | i={} | l={} ---",
            i + 1,
            rows.len(),
            row.scenario,
            row.mortality,
            row.initial_infectious,
            row.initial_latent
        );
        let params = row.to_params()?;
        let matrix = run_and_save(
            &params,
            row.ensemble_config(args.seed),
            &row.result_file_stem(),
            &args.output,
        )?;
        let summary = EnsembleSummary::from_matrix(&matrix)?;
        writer.write(&SummaryRow::new(row.scenario, &params, &summary))?;
        println!(
            "Final cumulative deaths: {:.1} [{:.1} - {:.1}]",
            summary.mean, summary.lower, summary.upper
        );
    }
    writer.finish()?;

    println!(
        "\nAggregated {} scenarios in {:.1} s into {}",
        rows.len(),
        t0.elapsed().as_secs_f64(),
        summaries_dir.join("aggregate_summary.csv").display()
    );
    Ok(())
}

/// Run one scenario as an ensemble and save its matrix as `<output>/<stem>.csv`.
fn run_and_save(
    params: &ScenarioParams,
    config: EnsembleConfig,
    stem:   &str,
    output: &Path,
) -> Result<DeathMatrix> {
    let step = (config.repeats as usize / 10).max(1);
    let ensemble = Ensemble::new(
        params.clone(),
        Population::default(),
        StageDurations::default(),
        config,
    )?;

    let matrix = ensemble.run_with_progress(|done, total| {
        if done % step == 0 || done == total {
            info!("{done}/{total} replicates");
        }
    })?;

    let path = output.join(format!("{stem}.csv"));
    write_matrix_csv(&path, &matrix)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Saved to {}", path.display());

    Ok(matrix)
}
