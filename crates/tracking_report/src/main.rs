//! Tracking Report CLI
//!
//! Possession statistics, possession strings and coordinate CSV export for
//! one match directory (match_data.json + structured_data.json).

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use tracking_core::{Analysis, AnalysisConfig};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tracking_report")]
#[command(about = "Possession reports from football tracking data", long_about = None)]
struct Cli {
    /// Optional YAML analysis config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Team and player possession shares
    Stats {
        /// Directory holding the match documents
        #[arg(long)]
        data_dir: PathBuf,

        /// Print JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Possession strings with holder transitions
    Strings {
        /// Directory holding the match documents
        #[arg(long)]
        data_dir: PathBuf,

        /// Show at most this many strings
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Export per-frame coordinates as CSV
    Export {
        /// Directory holding the match documents
        #[arg(long)]
        data_dir: PathBuf,

        /// Output CSV file path
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn load_analysis(data_dir: &Path, config: Option<&Path>) -> Result<Analysis> {
    let config = match config {
        Some(path) => AnalysisConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    tracking_report::load_analysis(data_dir, config)
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Stats { data_dir, json } => {
            let analysis = load_analysis(&data_dir, cli.config.as_deref())?;
            if json {
                let value = tracking_report::stats_json(&analysis)?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", tracking_report::render_stats(&analysis));
            }
        }

        Commands::Strings { data_dir, limit } => {
            let analysis = load_analysis(&data_dir, cli.config.as_deref())?;
            println!("{}", analysis);
            print!(
                "{}",
                tracking_report::render_possession_strings(&analysis, limit)
            );
        }

        Commands::Export { data_dir, out } => {
            let analysis = load_analysis(&data_dir, cli.config.as_deref())?;
            let rows = tracking_report::export_locations_csv(&analysis, &out)?;
            println!("Exported {} rows to {}", rows, out.display());
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("tracking_report CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
