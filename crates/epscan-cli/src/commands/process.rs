//! Process command - extract EPS from a single filing.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use epscan_core::{extract_file, EpsRecord, ExtractionResult};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input filing (.htm, .html or .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// List every matched label and the figure found after it
    #[arg(long)]
    show_candidates: bool,

    /// Override the number of characters searched after a label
    #[arg(long)]
    lookahead: Option<usize>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// JSON shape of a single-file result.
#[derive(Serialize)]
struct ProcessOutput<'a> {
    filename: &'a str,
    #[serde(flatten)]
    result: &'a ExtractionResult,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(lookahead) = args.lookahead {
        config.extraction.lookahead_chars = lookahead;
        config.validate()?;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let result = extract_file(&args.input, &config)?;

    let filename = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let output = format_result(filename, &result, args.format, args.show_candidates)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_result(
    filename: &str,
    result: &ExtractionResult,
    format: OutputFormat,
    show_candidates: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&ProcessOutput { filename, result })?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Csv => format_csv(filename, result),
        OutputFormat::Text => Ok(format_text(filename, result, show_candidates)),
    }
}

fn format_csv(filename: &str, result: &ExtractionResult) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    epscan_core::report::write_results_to(&mut buf, &[EpsRecord::new(filename, result.eps)])?;
    Ok(String::from_utf8(buf)?)
}

fn format_text(filename: &str, result: &ExtractionResult, show_candidates: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", filename));
    match (result.eps, result.category) {
        (Some(eps), Some(category)) => {
            output.push_str(&format!("EPS:  {} ({})\n", eps, category));
        }
        _ => output.push_str("EPS:  not found\n"),
    }

    if show_candidates {
        output.push('\n');
        if result.matches.is_empty() {
            output.push_str("No EPS labels matched.\n");
        }
        for m in &result.matches {
            let value = result
                .candidates
                .iter()
                .find(|c| c.category == m.category)
                .map(|c| c.value.to_string())
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "  {:<16} {:>10}  {}\n",
                m.category.as_str(),
                value,
                m.label.split_whitespace().collect::<Vec<_>>().join(" ")
            ));
        }
    }

    output
}
