//! Batch processing command for multiple invoice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use invex_core::{DocumentField, PipelineOutcome, ResultCache};

use super::process::{apply_tier_flags, extract_file, format_data, OutputFormat};
use super::{load_config, RemoteServices};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Skip the remote LLM tier
    #[arg(long)]
    no_ai: bool,

    /// Enable the remote structured-document tier
    #[arg(long)]
    document_ai: bool,
}

/// Result of processing a single file.
struct FileReport {
    path: PathBuf,
    result: Result<PipelineOutcome, String>,
    elapsed_ms: u64,
}

impl FileReport {
    fn file_name(&self) -> &str {
        self.path.file_name().and_then(|s| s.to_str()).unwrap_or("")
    }

    fn outcome(&self) -> Option<&PipelineOutcome> {
        self.result.as_ref().ok()
    }

    /// One row of the summary CSV.
    fn summary_row(&self) -> Vec<String> {
        let mut row = vec![self.file_name().to_string()];
        match &self.result {
            Ok(outcome) => {
                let data = &outcome.data;
                row.push("success".to_string());
                row.push(outcome.method.map(|m| m.to_string()).unwrap_or_default());
                row.push(outcome.confidence.map(|c| c.to_string()).unwrap_or_default());
                row.extend(SUMMARY_FIELDS.iter().map(|f| data.field(*f)));
                row.push(self.elapsed_ms.to_string());
                row.push(String::new());
            }
            Err(error) => {
                row.push("error".to_string());
                row.extend(std::iter::repeat_n(String::new(), 2 + SUMMARY_FIELDS.len()));
                row.push(self.elapsed_ms.to_string());
                row.push(error.clone());
            }
        }
        row
    }
}

const SUMMARY_FIELDS: [DocumentField; 6] = [
    DocumentField::VatNumber,
    DocumentField::Supplier,
    DocumentField::DocumentNumber,
    DocumentField::Date,
    DocumentField::Amount,
    DocumentField::Currency,
];

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    apply_tier_flags(&mut config, args.no_ai, args.document_ai);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Duplicate documents in one batch are extracted once.
    let cache = Arc::new(ResultCache::new());
    let services = RemoteServices::from_config(&config);

    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let result = extract_file(&path, &config, &services, Some(&cache)).await;
        let elapsed_ms = file_start.elapsed().as_millis() as u64;

        let result = match result {
            Ok(outcome) => Ok(outcome),
            Err(e) if args.continue_on_error => {
                warn!("Failed to process {}: {}", path.display(), e);
                Err(e.to_string())
            }
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                anyhow::bail!("Processing failed: {}", e);
            }
        };
        reports.push(FileReport {
            path,
            result,
            elapsed_ms,
        });

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        write_outputs(output_dir, &reports, args.format)?;
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &reports)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    print_report(&reports, start);

    Ok(())
}

fn write_outputs(output_dir: &Path, reports: &[FileReport], format: OutputFormat) -> anyhow::Result<()> {
    for report in reports {
        let Some(outcome) = report.outcome() else {
            continue;
        };
        let stem = report
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("invoice");
        let output_path = output_dir.join(format!("{}.{}", stem, format.extension()));

        fs::write(&output_path, format_data(&outcome.data, format)?)?;
        debug!("Wrote output to {}", output_path.display());
    }
    Ok(())
}

fn write_summary(path: &Path, reports: &[FileReport]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "method",
        "confidence",
        "vat_number",
        "supplier",
        "document_number",
        "date",
        "amount",
        "currency",
        "processing_time_ms",
        "error",
    ])?;
    for report in reports {
        wtr.write_record(report.summary_row())?;
    }

    wtr.flush()?;
    Ok(())
}

fn print_report(reports: &[FileReport], start: Instant) {
    let succeeded = reports.iter().filter(|r| r.outcome().is_some()).count();
    let cached = reports
        .iter()
        .filter(|r| r.outcome().is_some_and(|o| o.cached))
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        reports.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} served from cache",
        style(succeeded).green(),
        style(reports.len() - succeeded).red(),
        cached
    );

    let failures: Vec<_> = reports
        .iter()
        .filter_map(|r| r.result.as_ref().err().map(|e| (r, e)))
        .collect();
    if failures.is_empty() {
        return;
    }

    println!();
    println!("{}", style("Failed files:").red());
    for (report, error) in failures {
        println!("  - {}: {}", report.path.display(), error);
    }
}
