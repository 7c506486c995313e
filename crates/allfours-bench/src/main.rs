use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use allfours_bench::config::{BenchConfig, ResolvedOutputs};
use allfours_bench::logging::init_logging;
use allfours_bench::tournament::TournamentRunner;

/// Seeded match harness for All Fours agents.
#[derive(Debug, Parser)]
#[command(
    name = "allfours-bench",
    author,
    version,
    about = "Deterministic All Fours match harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of matches to play.
    #[arg(long, value_name = "MATCHES")]
    matches: Option<usize>,

    /// Override the RNG seed for match generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the chalk needed to win a match.
    #[arg(long, value_name = "CHALK")]
    target: Option<u32>,

    /// Exit after validating the configuration.
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(matches) = cli.matches {
        config.matches.count = matches;
    }

    if let Some(seed) = cli.seed {
        config.matches.seed = Some(seed);
    }

    if let Some(target) = cli.target {
        config.matches.target_chalk = target;
    }

    config
        .validate()
        .with_context(|| format!("validating overrides for {}", cli.config.display()))?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let matches = config.matches.count;
    let seating = config
        .agents
        .iter()
        .map(|agent| agent.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    println!(
        "Loaded configuration '{run_id}': {matches} match{} to {} chalk, seats N/E/S/W = {seating}",
        if matches == 1 { "" } else { "es" },
        config.matches.target_chalk
    );

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = TournamentRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: no matches played.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} matches, North/South {} wins, East/West {} wins → {} rows at {}",
        summary.matches_played,
        summary.wins[0],
        summary.wins[1],
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
