//! CLI application for extracting Earnings Per Share from financial filings.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{batch, check, config, process};

/// EPS extraction - pull the reported Earnings Per Share out of 10-K/10-Q filings
#[derive(Parser)]
#[command(name = "epscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace); overrides RUST_LOG
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract EPS from a single filing
    Process(process::ProcessArgs),

    /// Extract EPS from every filing in a directory into a CSV table
    Batch(batch::BatchArgs),

    /// Compare a result table against a reference table
    Check(check::CheckArgs),

    /// Inspect or edit the settings file
    Config(config::ConfigArgs),
}

/// Install the stderr log subscriber. Without `-v`, `RUST_LOG` applies and
/// warnings are the default.
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Check(args) => check::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
