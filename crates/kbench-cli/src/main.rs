mod config;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use kbench_core::{parse_file, summarize_with_threshold, Report, ResultSet};

#[derive(Parser)]
#[command(
    name = "kbench",
    version,
    about = "Benchmark log analyzer for k-stable matching experiments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a benchmark log and print the complexity analysis
    Analyze {
        /// Benchmark log produced by the solver harness
        input: PathBuf,
    },

    /// Print the parsed records as tables
    Records {
        /// Benchmark log produced by the solver harness
        input: PathBuf,

        /// Only show one section
        #[arg(short, long)]
        section: Option<CliSection>,
    },

    /// Write records and report as JSON for the plotting pipeline
    Export {
        /// Benchmark log produced by the solver harness
        input: PathBuf,

        /// Output path (default taken from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Show current configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliSection {
    Verification,
    Existence,
}

/// Everything the visualization collaborator needs in one document, so it
/// never has to re-parse log text.
#[derive(Serialize)]
struct ExportDocument<'a> {
    generated_at: DateTime<Utc>,
    source: String,
    results: &'a ResultSet,
    report: &'a Report,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load_config()?;

    match cli.command {
        Commands::Analyze { input } => cmd_analyze(&input, &config),
        Commands::Records { input, section } => cmd_records(&input, section),
        Commands::Export {
            input,
            output,
            pretty,
        } => cmd_export(&input, output, pretty, &config),
        Commands::Config => cmd_config(&config),
    }
}

/// Load the log, degrading to an empty ResultSet when the source is
/// unreadable so downstream stages report "no results" instead of aborting.
fn load_results(input: &Path) -> ResultSet {
    match parse_file(input) {
        Ok(results) => results,
        Err(e) => {
            tracing::warn!("{e}");
            ResultSet::default()
        }
    }
}

fn cmd_analyze(input: &Path, config: &config::Config) -> Result<()> {
    let results = load_results(input);
    if results.is_empty() {
        println!("No results found in input file.");
        return Ok(());
    }

    let report = summarize_with_threshold(&results, config.analysis.spread_threshold);
    print!("{}", render::render_report(&report));
    Ok(())
}

fn cmd_records(input: &Path, section: Option<CliSection>) -> Result<()> {
    let results = load_results(input);
    if results.is_empty() {
        println!("No results found in input file.");
        return Ok(());
    }

    let show_verification = !matches!(section, Some(CliSection::Existence));
    let show_existence = !matches!(section, Some(CliSection::Verification));

    if show_verification && !results.verification.is_empty() {
        println!("Verification ({} records):", results.verification.len());
        print!("{}", render::render_verification(&results.verification));
    }
    if show_existence && !results.existence.is_empty() {
        if show_verification && !results.verification.is_empty() {
            println!();
        }
        println!("Existence ({} records):", results.existence.len());
        print!("{}", render::render_existence(&results.existence));
    }
    Ok(())
}

fn cmd_export(
    input: &Path,
    output: Option<PathBuf>,
    pretty: bool,
    config: &config::Config,
) -> Result<()> {
    let results = load_results(input);
    if results.is_empty() {
        println!("No results found in input file.");
        return Ok(());
    }

    let report = summarize_with_threshold(&results, config.analysis.spread_threshold);
    let doc = ExportDocument {
        generated_at: Utc::now(),
        source: input.display().to_string(),
        results: &results,
        report: &report,
    };

    let json = if pretty || config.export.pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    }
    .context("serializing export document")?;

    let path = output.unwrap_or_else(|| PathBuf::from(&config.export.output));
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    println!("Exported {} records to {}", results.len(), path.display());
    Ok(())
}

fn cmd_config(config: &config::Config) -> Result<()> {
    println!("Config: {}", config::show_config_path());
    println!();
    println!("[analysis]");
    println!("spread_threshold = {}", config.analysis.spread_threshold);
    println!();
    println!("[export]");
    println!("pretty = {}", config.export.pretty);
    println!("output = {:?}", config.export.output);
    Ok(())
}
