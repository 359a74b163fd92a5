//! Process command - extract data from a single invoice file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use invex_core::models::InvexConfig;
use invex_core::{looks_like_invoice, DocumentData, DocumentField, PipelineOutcome, ResultCache};

use super::{load_config, text_extractor_for, RemoteServices};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip the remote LLM tier
    #[arg(long)]
    no_ai: bool,

    /// Enable the remote structured-document tier
    #[arg(long)]
    document_ai: bool,

    /// Show extraction confidence scores
    #[arg(long)]
    show_confidence: bool,
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

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    apply_tier_flags(&mut config, args.no_ai, args.document_ai);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Connecting services...");
    pb.set_position(10);
    let services = RemoteServices::from_config(&config);

    pb.set_message("Extracting invoice data...");
    pb.set_position(30);
    let outcome = extract_file(&args.input, &config, &services, None).await?;

    pb.finish_with_message("Done");

    let output = format_data(&outcome.data, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        print_confidence(&outcome);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// `--no-ai` and `--document-ai` override the configured tier switches.
pub fn apply_tier_flags(config: &mut InvexConfig, no_ai: bool, document_ai: bool) {
    if no_ai {
        config.extraction.enable_ai = false;
    }
    if document_ai {
        config.extraction.enable_document_ai = true;
    }
}

/// Read one file, gate it, and run the pipeline over it.
pub async fn extract_file(
    path: &Path,
    config: &InvexConfig,
    services: &RemoteServices,
    cache: Option<&Arc<ResultCache>>,
) -> anyhow::Result<PipelineOutcome> {
    let text_extractor = text_extractor_for(path, config)?;
    let bytes = fs::read(path)?;

    let text = text_extractor.extract_text(&bytes)?;
    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from {}", path.display());
    }
    if config.extraction.strict_invoice_check && !looks_like_invoice(&text) {
        anyhow::bail!(
            "{} does not look like an invoice. Set extraction.strict_invoice_check to false to process it anyway.",
            path.display()
        );
    }

    let mut pipeline = services.pipeline(text_extractor);
    if let Some(cache) = cache {
        pipeline = pipeline.with_cache(Arc::clone(cache));
    }

    Ok(pipeline
        .extract_prepared(&text, &bytes, &config.extraction)
        .await)
}

fn print_confidence(outcome: &PipelineOutcome) {
    println!();
    match (outcome.method, outcome.confidence) {
        (Some(method), Some(confidence)) => println!(
            "{} Extraction confidence: {}% ({})",
            style("ℹ").blue(),
            confidence,
            method
        ),
        _ => println!("{} No extraction tier produced a result", style("ℹ").yellow()),
    }
    for candidate in outcome.candidates.iter().skip(1) {
        println!("   runner-up: {} at {}%", candidate.method, candidate.confidence);
    }
    if outcome.cached {
        println!("{} Served from cache", style("ℹ").blue());
    }
    println!(
        "{} Processing time: {}ms",
        style("ℹ").blue(),
        outcome.processing_time_ms
    );
}

pub fn format_data(data: &DocumentData, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Csv => format_csv(data),
        OutputFormat::Text => Ok(format_text(data)),
    }
}

fn format_csv(data: &DocumentData) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(DocumentField::ALL.iter().map(|f| f.as_str()))?;
    wtr.write_record(DocumentField::ALL.iter().map(|f| data.field(*f)))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(data: &DocumentData) -> String {
    let mut output = String::new();

    output.push_str(&format!("Invoice: {}\n", data.document_number));
    output.push_str(&format!("Date: {}\n", data.date));
    output.push('\n');

    output.push_str(&format!("Supplier: {}\n", data.supplier));
    output.push_str(&format!("  VAT: {}\n", data.vat_number));
    output.push_str(&format!("Client: {}\n", data.client_name));
    output.push('\n');

    output.push_str(&format!(
        "Total: {} {}\n",
        data.field(DocumentField::Amount),
        data.currency
    ));

    output
}
