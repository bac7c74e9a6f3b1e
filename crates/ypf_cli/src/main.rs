//! Youth Position Finder CLI
//!
//! Analyze coach ratings from JSON files and print or export the report.

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ypf_core::api::{analyze_batch, AnalysisRequest, BatchAnalysisRequest};
use ypf_core::attributes::AttributeId;
use ypf_core::catalog::PositionRule;
use ypf_core::{
    generate_report, render_position_details, render_text_report, report_file_name,
    AnalysisReport, PlayerIdentity, PositionCatalog,
};

#[derive(Parser)]
#[command(name = "ypf", version)]
#[command(about = "Recommend a playing position from youth player attribute ratings", long_about = None)]
struct Cli {
    /// Position catalog YAML (overrides YPF_CATALOG_PATH)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one player and print the report
    Analyze {
        /// Analysis request JSON file ("-" for stdin)
        #[arg(long)]
        input: PathBuf,

        /// Print the full JSON report instead of the text template
        #[arg(long)]
        json: bool,

        /// Also print the position description, training program and development path
        #[arg(long, conflicts_with = "json")]
        details: bool,
    },

    /// Analyze one player and write the text report to a file
    Export {
        /// Analysis request JSON file ("-" for stdin)
        #[arg(long)]
        input: PathBuf,

        /// Directory the report file is written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Analyze many players and print one ranked summary line each
    Batch {
        /// JSON array of analysis requests, or {"players": [...]}
        #[arg(long)]
        input: PathBuf,
    },

    /// List the position catalog
    Positions {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the fifteen rated attributes
    Attributes,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ypf_core=debug,ypf=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze { input, json, details } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let request = read_request(&input)?;
            let report = analyze(&request, &catalog)?;
            if json {
                let response = ypf_core::api::AnalysisResponse {
                    player: request.player.clone(),
                    text_report: render_text_report(&request.player, &report),
                    report,
                };
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", render_text_report(&request.player, &report));
                if details {
                    println!();
                    println!("{}", render_position_details(&report));
                }
            }
        }

        Commands::Export { input, out_dir } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let request = read_request(&input)?;
            let report = analyze(&request, &catalog)?;
            let path = export_report(&request.player, &report, &out_dir)?;
            println!("{}", path.display());
        }

        Commands::Batch { input } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            run_batch(&input, &catalog)?;
        }

        Commands::Positions { json } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                for rule in catalog.iter() {
                    print_position(rule);
                }
            }
        }

        Commands::Attributes => {
            for id in AttributeId::ALL {
                println!("{:<4} {} ({}) - {}", id.key(), id.label(), id.label_en(), id.description());
            }
        }
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<PositionCatalog> {
    match path {
        Some(path) => PositionCatalog::from_path(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(PositionCatalog::active().context("Failed to load position catalog")?.clone()),
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_request(path: &Path) -> Result<AnalysisRequest> {
    let json = read_input(path)?;
    serde_json::from_str(&json).with_context(|| format!("Invalid analysis request in {}", path.display()))
}

fn analyze<'c>(request: &AnalysisRequest, catalog: &'c PositionCatalog) -> Result<AnalysisReport<'c>> {
    let vector = request.validate().map_err(|e| {
        warn!("Rejected input for {}: {}", request.player.name, e);
        e
    })?;
    Ok(generate_report(&vector, catalog))
}

fn export_report(identity: &PlayerIdentity, report: &AnalysisReport<'_>, out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let path = out_dir.join(report_file_name(identity, Utc::now()));
    std::fs::write(&path, render_text_report(identity, report))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Report written to {}", path.display());
    Ok(path)
}

/// A bare array of requests, or a wrapped `{"players": [...]}` request.
fn read_batch(path: &Path) -> Result<BatchAnalysisRequest> {
    let json = read_input(path)?;
    let value: Value = serde_json::from_str(&json)
        .with_context(|| format!("Invalid batch request in {}", path.display()))?;
    match value {
        Value::Array(players) => Ok(BatchAnalysisRequest { schema_version: None, players }),
        wrapped => serde_json::from_value(wrapped)
            .with_context(|| format!("Invalid batch request in {}", path.display())),
    }
}

fn run_batch(input: &Path, catalog: &PositionCatalog) -> Result<()> {
    let request = read_batch(input)?;
    let mut response =
        analyze_batch(&request, catalog).map_err(|e| anyhow!("{} ({})", e.message, e.code))?;

    // Best match first; players without an eligible position last.
    response.results.sort_by(|a, b| {
        let score = |r: &AnalysisReport<'_>| r.primary.map_or(-1.0, |p| p.score);
        score(&b.report).total_cmp(&score(&a.report))
    });

    for (rank, result) in response.results.iter().enumerate() {
        let player = &result.player;
        match &result.report.primary {
            Some(primary) => println!(
                "{}. {} ({}) - {} {}/100, {}% {}",
                rank + 1,
                player.name,
                player.age,
                primary.name(),
                primary.score,
                primary.confidence,
                primary.recommendation
            ),
            None => println!("{}. {} ({}) - no eligible position", rank + 1, player.name, player.age),
        }
    }

    for failure in &response.failed_requests {
        eprintln!(
            "skipped #{} {}: {}",
            failure.index,
            failure.player_name.as_deref().unwrap_or("<unnamed>"),
            failure.error.message
        );
    }

    println!("Analyzed {}/{} players", response.total_analyzed, response.total_requested);

    if response.total_failed > 0 {
        bail!(
            "{} of {} players could not be analyzed",
            response.total_failed,
            response.total_requested
        );
    }
    Ok(())
}

fn print_position(rule: &PositionRule) {
    let thresholds = |table: &[(AttributeId, u8)]| {
        table.iter().map(|(id, min)| format!("{}>={}", id, min)).collect::<Vec<_>>().join(", ")
    };
    let weights = rule
        .weights
        .iter()
        .map(|(id, weight)| format!("{} {:.2}", id, weight))
        .collect::<Vec<_>>()
        .join(", ");

    println!("{:<3} {}", rule.id.code(), rule.name());
    println!("    primary:   {}", thresholds(rule.primary.as_slice()));
    println!("    secondary: {}", thresholds(rule.secondary.as_slice()));
    println!("    weights:   {}", weights);
}
