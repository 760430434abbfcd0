//! # benchprep
//!
//! Command-line interface for preparing anomaly-detection benchmark datasets
//! and estimating series periods.

mod input;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dataset_facade::{read_npz, Group, PrepareConfig, PrepareConfigBuilder, Preparer};
use period_facade::{Autoperiod, PeriodDetector};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::input::load_csv_column;
use crate::report::{render_dataset, render_report};

#[derive(Parser)]
#[command(name = "benchprep")]
#[command(about = "Anomaly-detection benchmark dataset preparation", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "BENCHPREP_CONFIG")]
    config: Option<PathBuf>,

    /// Output root, overriding the configuration
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Seed for generated datasets and permutation tests
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and convert the UCI and KDD corpora
    Real,

    /// Generate the synthetic toy datasets
    Toy,

    /// Generate the illustrative example datasets
    Examples,

    /// Unpack the edge-stream archives
    Graph,

    /// Download the NAB series and label windows
    Nab,

    /// Prepare every group
    All,

    /// Estimate the dominant period of a CSV column
    Period {
        /// Input CSV file with a header row
        #[arg(short, long)]
        input: PathBuf,

        /// Column name or index
        #[arg(short, long, default_value = "value")]
        column: String,

        /// Shuffles used for the power threshold
        #[arg(short, long, default_value = "100")]
        permutations: usize,
    },

    /// Summarise a saved dataset
    Inspect {
        /// `.npz` file written by a preparation run
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "benchprep=debug,dataset_core=debug,period_core=debug"
    } else {
        "benchprep=info,dataset_core=info,period_core=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}

/// Configuration file merged with command-line overrides.
fn resolve_config(cli: &Cli) -> Result<PrepareConfig> {
    let base = PrepareConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    let mut builder = PrepareConfigBuilder::from_config(base);
    if let Some(output) = &cli.output {
        builder = builder.output_root(output);
    }
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    Ok(builder.build()?)
}

fn run_prepare(cli: &Cli, groups: &[Group]) -> Result<()> {
    let config = resolve_config(cli)?;
    info!(output = %config.output_root.display(), ?groups, "starting preparation");
    let preparer = Preparer::new(config).context("failed to set up preparation")?;
    let report = preparer.run(groups).context("preparation failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

fn run_period(cli: &Cli, input: &Path, column: &str, permutations: usize) -> Result<usize> {
    let values = load_csv_column(input, column)?;
    debug!(samples = values.len(), column, "loaded series");

    let detector = Autoperiod::new()
        .with_permutations(permutations)
        .with_seed(cli.seed.unwrap_or(0));
    let period = detector
        .period_or_default(&values)
        .with_context(|| format!("period estimation failed for {}", input.display()))?;

    if cli.json {
        let json = serde_json::json!({
            "input": input,
            "column": column,
            "samples": values.len(),
            "period": period,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", period);
    }
    Ok(period)
}

fn run_inspect(cli: &Cli, file: &Path) -> Result<()> {
    let dataset =
        read_npz(file).with_context(|| format!("failed to read {}", file.display()))?;

    if cli.json {
        let json = serde_json::json!({
            "name": dataset.name,
            "rows": dataset.n_rows(),
            "features": dataset.n_features(),
            "anomalies": dataset.n_anomalies(),
            "contamination": dataset.contamination(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print!("{}", render_dataset(&dataset));
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Real => run_prepare(cli, &[Group::Real]),
        Commands::Toy => run_prepare(cli, &[Group::Toy]),
        Commands::Examples => run_prepare(cli, &[Group::Examples]),
        Commands::Graph => run_prepare(cli, &[Group::Graph]),
        Commands::Nab => run_prepare(cli, &[Group::Nab]),
        Commands::All => run_prepare(cli, &Group::ALL),
        Commands::Period {
            input,
            column,
            permutations,
        } => run_period(cli, input, column, *permutations).map(|_| ()),
        Commands::Inspect { file } => run_inspect(cli, file),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}
