//! Check command - compare a result table against a reference table.

use std::path::PathBuf;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::info;

use epscan_core::{compare, read_results, AccuracyReport};

use super::load_config;

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Produced results CSV
    #[arg(required = true)]
    output: PathBuf,

    /// Reference CSV with the correct values
    #[arg(required = true)]
    reference: PathBuf,

    /// Values closer than this agree (default: check.tolerance from config)
    #[arg(short, long)]
    tolerance: Option<Decimal>,
}

pub async fn run(args: CheckArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let tolerance = args.tolerance.unwrap_or(config.check.tolerance);
    if tolerance.is_sign_negative() {
        anyhow::bail!("--tolerance must not be negative");
    }

    let output = read_results(&args.output)?;
    let reference = read_results(&args.reference)?;
    info!(
        "Comparing {} rows against {} reference rows",
        output.len(),
        reference.len()
    );

    print_report(&compare(&output, &reference, tolerance));

    Ok(())
}

/// Print one line per mismatch followed by the totals.
pub fn print_report(report: &AccuracyReport) {
    for line in report_lines(report) {
        println!("{}", line);
    }

    let accuracy = format!("{:.2}%", report.accuracy());
    let accuracy = if report.mismatches.is_empty() {
        style(accuracy).green()
    } else {
        style(accuracy).yellow()
    };
    println!(
        "Total files: {}, Correctly matched EPS: {}, Accuracy: {}",
        report.total, report.matched, accuracy
    );
}

fn report_lines(report: &AccuracyReport) -> Vec<String> {
    report
        .mismatches
        .iter()
        .map(|m| {
            format!(
                "Mismatch found: {} - Output: {}, Correct: {}",
                m.filename,
                cell(m.output),
                cell(m.expected)
            )
        })
        .collect()
}

fn cell(value: Option<Decimal>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "nan".to_string())
}
