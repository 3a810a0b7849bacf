// Faultgen CLI - Synthetic 5G telemetry fault dataset generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Faultgen CLI
//!
//! ## Usage
//!
//! ```bash
//! # Reference run: 10k records, 30% faulty prior, seed 42
//! faultgen generate --output data/synthetic_5g_fault_dataset.csv --manifest
//!
//! # Check an existing artifact
//! faultgen validate data/synthetic_5g_fault_dataset.csv
//!
//! # Label prevalence and column statistics
//! faultgen summary data/synthetic_5g_fault_dataset.csv
//! ```

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use faultgen::{
    validate_dataset, Dataset, DatasetGenerator, DatasetManifest, DatasetSummary,
    GeneratorConfig,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Violations printed before truncating the list.
const MAX_REPORTED_VIOLATIONS: usize = 20;

/// Synthetic 5G telemetry fault dataset generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset and write it as CSV
    Generate(GenerateArgs),
    /// Check a CSV dataset for internal consistency
    Validate {
        /// CSV file to check
        csv: PathBuf,
        /// Manifest whose checksum the CSV must match
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Print label prevalence and column statistics
    Summary {
        /// CSV file to summarize
        csv: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// JSON configuration file (flags below override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of records
    #[arg(short = 'n', long)]
    records: Option<usize>,

    /// Prior probability of the faulty regime
    #[arg(long)]
    fault_prior: Option<f64>,

    /// Fraction of faulty records pushed into the extreme tail
    #[arg(long)]
    tail_fraction: Option<f64>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// First timestamp, e.g. "2025-01-01 00:00:00"
    #[arg(long, value_parser = parse_timestamp)]
    epoch: Option<NaiveDateTime>,

    /// Base station pool size
    #[arg(long)]
    base_stations: Option<u32>,

    /// Cell pool size
    #[arg(long)]
    cells: Option<u32>,

    /// Output CSV path
    #[arg(short, long, default_value = "synthetic_5g_fault_dataset.csv")]
    output: PathBuf,

    /// Also write <output>.manifest.json
    #[arg(long)]
    manifest: bool,
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DD HH:MM:SS, got {:?}", s))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match cli.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Command::Generate(args) => run_generate(&args),
        Command::Validate { csv, manifest } => run_validate(&csv, manifest.as_deref()),
        Command::Summary { csv, json } => run_summary(&csv, json),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Merge the config file (if any) with command-line overrides.
fn build_config(args: &GenerateArgs) -> faultgen::Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(n) = args.records {
        config.record_count = n;
    }
    if let Some(p) = args.fault_prior {
        config.fault_prior = p;
    }
    if let Some(f) = args.tail_fraction {
        config.extreme_tail_fraction = f;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(epoch) = args.epoch {
        config.epoch = epoch;
    }
    if let Some(n) = args.base_stations {
        config.base_station_pool = n;
    }
    if let Some(n) = args.cells {
        config.cell_pool = n;
    }

    Ok(config)
}

fn manifest_path(csv: &Path) -> PathBuf {
    let stem = csv
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    csv.with_file_name(format!("{}.manifest.json", stem))
}

fn run_generate(args: &GenerateArgs) -> faultgen::Result<bool> {
    let config = build_config(args)?;
    let generator = DatasetGenerator::new(config)?;
    let dataset = generator
        .generate()?
        .with_description("Synthetic 5G testbed telemetry with rule-based fault labels");

    let bytes = dataset.to_csv_bytes()?;
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.output, &bytes)?;
    info!("Dataset saved to {}", args.output.display());

    if args.manifest {
        let name = args
            .output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        let dataset = dataset.with_name(&name);
        let manifest =
            DatasetManifest::describe(&dataset, generator.config())?.with_csv_bytes(&bytes);
        let path = manifest_path(&args.output);
        manifest.to_json_file(&path)?;
        info!("Manifest saved to {}", path.display());
    }

    Ok(true)
}

/// Returns `false` when the table or its checksum fails the checks.
fn run_validate(csv: &Path, manifest: Option<&Path>) -> faultgen::Result<bool> {
    let bytes = std::fs::read(csv)?;
    let dataset = Dataset::read_csv(bytes.as_slice())?;
    let report = validate_dataset(&dataset);
    let mut ok = report.is_valid();

    for violation in report.violations.iter().take(MAX_REPORTED_VIOLATIONS) {
        warn!("{}", violation);
    }
    if report.violations.len() > MAX_REPORTED_VIOLATIONS {
        warn!(
            "... and {} more violations",
            report.violations.len() - MAX_REPORTED_VIOLATIONS
        );
    }

    if let Some(path) = manifest {
        let manifest = DatasetManifest::from_json_file(path)?;
        if manifest.matches_csv(&bytes) {
            info!("Checksum matches {}", path.display());
        } else {
            warn!("Checksum does not match {}", path.display());
            ok = false;
        }
    }

    info!(
        "Checked {} records: {} violations",
        report.records_checked,
        report.violations.len()
    );

    Ok(ok)
}

fn run_summary(csv: &Path, json: bool) -> faultgen::Result<bool> {
    let dataset = Dataset::from_csv(csv)?;
    let summary = dataset.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary));
    }

    Ok(true)
}

fn render_summary(summary: &DatasetSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Records: {}\n", summary.record_count));
    out.push_str(&format!(
        "Normal: {}  Faulty: {}  ({:.2}% faulty)\n\n",
        summary.normal_count,
        summary.faulty_count,
        summary.fault_rate * 100.0
    ));

    out.push_str("Threshold triggers:\n");
    for t in &summary.threshold_triggers {
        out.push_str(&format!("  {:<24}{:>8}\n", t.column, t.count));
    }

    out.push_str(&format!(
        "\n{:<24}{:>12}{:>12}{:>12}{:>12}\n",
        "column", "mean", "std", "min", "max"
    ));
    for c in &summary.columns {
        out.push_str(&format!(
            "{:<24}{:>12.3}{:>12.3}{:>12.3}{:>12.3}\n",
            c.column, c.mean, c.std_dev, c.min, c.max
        ));
    }
    out
}
