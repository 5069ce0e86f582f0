//! fitgen CLI
//!
//! Generates the FIT profile Go sources from an SDK release archive or a
//! profile workbook.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// fitgen - FIT profile code generator
#[derive(Parser)]
#[command(name = "fitgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SDK release archive (.zip) or profile workbook (.xls, .xlsx)
    pub input: PathBuf,

    /// Directory the Go sources are written into
    pub output_dir: PathBuf,

    /// SDK version override, e.g. 21.47 (required for workbook input)
    #[arg(long, env = "FITGEN_SDK", default_value = "")]
    pub sdk: String,

    /// Embed a generation timestamp in the generated sources
    #[arg(long)]
    pub timestamp: bool,

    /// Run all package tests after generation
    #[arg(long)]
    pub test: bool,

    /// Install packages before running the stringer
    #[arg(long)]
    pub install: bool,

    /// Enable verbose debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Toolchain configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match commands::generate::run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
