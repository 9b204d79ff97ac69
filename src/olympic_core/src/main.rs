//! Olympic basketball tournament simulator CLI.
//!
//! Plays one tournament and prints the full report, or with `--simulations N`
//! plays N tournaments and prints each team's medal odds. `--trace` replaces
//! the report with one tracing event per result on stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use olympic_core::{
    run_simulations, JsonFiles, Qualification, TextReport, TraceSink, Tournament, TournamentConfig,
};

#[derive(Parser, Debug)]
#[command(name = "olympic-sim")]
#[command(about = "Simulate the Olympic basketball tournament", long_about = None)]
struct Cli {
    /// TOML config file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Groups JSON file
    #[arg(long)]
    groups: Option<PathBuf>,

    /// Exhibition results JSON file
    #[arg(long)]
    exhibitions: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Qualification rule: group-order or cross-group
    #[arg(short, long)]
    qualification: Option<Qualification>,

    /// Number of Monte Carlo runs; prints medal odds instead of a report
    #[arg(short = 'n', long)]
    simulations: Option<usize>,

    /// Log every result as a tracing event instead of printing the text report
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.trace { "olympic_core=info" } else { "olympic_core=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => TournamentConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TournamentConfig::default(),
    };
    if let Some(groups) = cli.groups {
        config.groups_path = groups;
    }
    if let Some(exhibitions) = cli.exhibitions {
        config.exhibitions_path = exhibitions;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(qualification) = cli.qualification {
        config.qualification = qualification;
    }
    if let Some(simulations) = cli.simulations {
        config.simulations = simulations;
    }

    let source = JsonFiles::new(&config.groups_path, &config.exhibitions_path);
    let mut tournament = Tournament::from_source(&source, config.simulator.clone())
        .with_context(|| {
            format!(
                "failed to load tournament data from {} and {}",
                config.groups_path.display(),
                config.exhibitions_path.display()
            )
        })?
        .with_qualification(config.qualification);

    info!(
        seed = ?config.seed,
        qualification = ?tournament.qualification(),
        forfeit_rate = tournament.config().forfeit_rate,
        "starting"
    );

    if config.simulations > 0 {
        print_odds(&tournament, &config)
    } else if cli.trace {
        tournament
            .run_seeded(config.seed, &mut TraceSink)
            .context("tournament run failed")?;
        Ok(())
    } else {
        let mut report = TextReport::new(BufWriter::new(io::stdout().lock()));
        tournament
            .run_seeded(config.seed, &mut report)
            .context("tournament run failed")?;
        report.into_inner().flush()?;
        Ok(())
    }
}

fn print_odds(tournament: &Tournament, config: &TournamentConfig) -> Result<()> {
    let odds = run_simulations(tournament, config.simulations, config.seed)
        .context("medal odds simulation failed")?;

    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "Medal odds over {} simulations:", odds.simulations)?;
    writeln!(
        out,
        "{:<24} {:>7} {:>7} {:>7} {:>7}  95% CI",
        "Team", "Gold", "Silver", "Bronze", "Podium"
    )?;

    let registry = tournament.registry();
    for (id, counts) in odds.ranked() {
        let team = registry.get(id)?;
        let (low, high) = odds.podium_interval(id, 0.95)?;
        let n = odds.simulations as f64;
        writeln!(
            out,
            "{:<24} {:>6.1}% {:>6.1}% {:>6.1}% {:>6.1}%  [{:.1}%, {:.1}%]",
            team.name,
            100.0 * counts.gold as f64 / n,
            100.0 * counts.silver as f64 / n,
            100.0 * counts.bronze as f64 / n,
            100.0 * counts.podium() as f64 / n,
            100.0 * low,
            100.0 * high
        )?;
    }
    out.flush()?;
    Ok(())
}
