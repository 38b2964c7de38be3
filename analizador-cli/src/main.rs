use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use analizador_ingest::{ParseReport, Pipeline};

#[derive(Parser, Debug)]
#[command(name = "analizador", version, about = "Normalize and categorize bank statement exports")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement file and print the normalized transactions
    Import {
        /// Path to the exported statement (bank or simple CSV)
        file: PathBuf,

        /// Emit the full report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Import { file, json } => import(&file, json),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(level),
        )
        .init();
}

fn import(path: &Path, json: bool) -> Result<()> {
    let payload = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let report = Pipeline::default().process(&payload)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &ParseReport) {
    println!(
        "Dialect: {} | {} transactions",
        report.dialect.name(),
        report.transactions.len()
    );
    for txn in &report.transactions {
        println!(
            "{}  {:>12.2}  {:<24}  {}",
            txn.date, txn.amount, txn.category, txn.concept
        );
    }

    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for txn in &report.transactions {
        *totals.entry(txn.category.as_str()).or_default() += txn.amount;
    }
    if !totals.is_empty() {
        println!("\nTotals by category:");
        for (category, total) in &totals {
            println!("  {:<24} {:>12.2}", category, total);
        }
    }

    if !report.diagnostics.is_empty() {
        println!("\n{} rows skipped:", report.diagnostics.len());
        for diag in &report.diagnostics {
            println!("  row {}: {}", diag.row, diag.message);
        }
    }
}
