//! Batch processing command for a directory of filings.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use epscan_core::models::config::DocumentConfig;
use epscan_core::report::{read_results, write_results};
use epscan_core::{compare, extract_file, Category, EpsRecord, EpscanConfig};

use super::check::print_report;
use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory containing filings
    #[arg(required = true)]
    input: PathBuf,

    /// Output CSV file
    #[arg(short, long, default_value = "EPS_Results.csv")]
    output: PathBuf,

    /// Number of parallel workers (default: batch.jobs from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Reference CSV to check the results against once written
    #[arg(short, long)]
    reference: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    eps: Option<Decimal>,
    category: Option<Category>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl ProcessResult {
    fn filename(&self) -> &str {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let jobs = args.jobs.unwrap_or(config.batch.jobs);
    if jobs == 0 {
        anyhow::bail!("--jobs must be greater than zero");
    }

    if !args.input.is_dir() {
        anyhow::bail!("Input directory not found: {}", args.input.display());
    }

    let files = collect_files(&args.input, &config.document)?;
    if files.is_empty() {
        anyhow::bail!("No filings found in {}", args.input.display());
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let config = Arc::new(config);
    let results = process_files(files, Arc::clone(&config), jobs, &pb).await;
    pb.finish_and_clear();

    let records: Vec<EpsRecord> = results
        .iter()
        .map(|r| EpsRecord::new(r.filename(), r.eps))
        .collect();
    write_results(&args.output, &records)?;

    let found = results.iter().filter(|r| r.eps.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let absent = results.len() - found - failed.len();

    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} with EPS, {} without, {} failed",
        style(found).green(),
        style(absent).yellow(),
        style(failed.len()).red()
    );
    println!(
        "{} Results written to {}",
        style("✓").green(),
        args.output.display()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if let Some(reference_path) = &args.reference {
        let output = read_results(&args.output)?;
        let reference = read_results(reference_path)?;

        println!();
        print_report(&compare(&output, &reference, config.check.tolerance));
    }

    Ok(())
}

/// Filings in `dir` with a configured extension, sorted by file name.
fn collect_files(dir: &Path, config: &DocumentConfig) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if config.accepts_extension(ext) {
            files.push(path);
        } else {
            debug!("Skipping {}", path.display());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Extract every file on a bounded pool of blocking tasks, keeping input order.
async fn process_files(
    files: Vec<PathBuf>,
    config: Arc<EpscanConfig>,
    jobs: usize,
    pb: &ProgressBar,
) -> Vec<ProcessResult> {
    stream::iter(files)
        .map(|path| {
            let config = Arc::clone(&config);
            async move {
                let file_start = Instant::now();
                let task_path = path.clone();
                let outcome =
                    tokio::task::spawn_blocking(move || extract_file(&task_path, &config)).await;

                let processing_time_ms = file_start.elapsed().as_millis() as u64;
                match outcome {
                    Ok(Ok(result)) => ProcessResult {
                        path,
                        eps: result.eps,
                        category: result.category,
                        error: None,
                        processing_time_ms,
                    },
                    Ok(Err(e)) => failed(path, e.to_string(), processing_time_ms),
                    Err(e) => failed(path, format!("worker panicked: {}", e), processing_time_ms),
                }
            }
        })
        .buffered(jobs)
        .inspect(|result| {
            match (&result.error, result.eps, result.category) {
                (Some(_), _, _) => {}
                (None, Some(eps), Some(category)) => debug!(
                    "{}: {} from {} in {}ms",
                    result.filename(),
                    eps,
                    category,
                    result.processing_time_ms
                ),
                _ => debug!(
                    "{}: no EPS in {}ms",
                    result.filename(),
                    result.processing_time_ms
                ),
            }
            pb.inc(1);
        })
        .collect()
        .await
}

fn failed(path: PathBuf, error: String, processing_time_ms: u64) -> ProcessResult {
    warn!("Failed to process {}: {}", path.display(), error);
    ProcessResult {
        path,
        eps: None,
        category: None,
        error: Some(error),
        processing_time_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.htm", "a.html", "c.txt", "notes.pdf"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.htm")).unwrap();

        let files = collect_files(dir.path(), &DocumentConfig::default()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["a.html", "b.htm", "c.txt"]);
    }

    #[tokio::test]
    async fn test_process_files_keeps_order_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.htm");
        let missing = dir.path().join("b.htm");
        let blank = dir.path().join("c.htm");
        let none = dir.path().join("d.htm");
        fs::write(&good, "<p>Basic earnings per share $1.23</p>").unwrap();
        fs::write(&blank, "<html><body><img src=x></body></html>").unwrap();
        fs::write(&none, "<p>Revenue 4.5 million</p>").unwrap();

        let pb = ProgressBar::hidden();
        let results = process_files(
            vec![good, missing, blank, none],
            Arc::new(EpscanConfig::default()),
            2,
            &pb,
        )
        .await;

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].filename(), "a.htm");
        assert_eq!(results[0].eps, Some(Decimal::new(123, 2)));
        assert!(results[1].error.is_some());
        assert_eq!(results[1].eps, None);
        for result in &results[2..] {
            assert!(result.error.is_none());
            assert_eq!(result.eps, None);
        }
    }
}
