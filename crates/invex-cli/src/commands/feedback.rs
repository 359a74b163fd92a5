//! Feedback command - rate extraction results and inspect per-method metrics.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use invex_core::{DocumentData, ExtractionMethod, FeedbackEntry, FeedbackTracker, MethodMetrics};

use super::load_config;

/// Arguments for the feedback command.
#[derive(Args)]
pub struct FeedbackArgs {
    #[command(subcommand)]
    command: FeedbackCommand,
}

#[derive(Subcommand)]
enum FeedbackCommand {
    /// Record a rating for one extraction result
    Record(RecordArgs),

    /// Show aggregated metrics
    Stats {
        /// Only this method (gpt, documentAi, pattern)
        #[arg(short, long)]
        method: Option<ExtractionMethod>,

        /// Print metrics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct RecordArgs {
    /// JSON file with the extracted record
    #[arg(long)]
    original: PathBuf,

    /// JSON file with the corrected record
    #[arg(long)]
    corrected: PathBuf,

    /// Rating from 1 to 5
    #[arg(short, long)]
    rating: u8,

    /// Method that produced the original (gpt, documentAi, pattern)
    #[arg(short, long)]
    method: ExtractionMethod,
}

pub async fn run(args: FeedbackArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut tracker = FeedbackTracker::open(&config.feedback)?;

    match args.command {
        FeedbackCommand::Record(record) => record_feedback(&mut tracker, record),
        FeedbackCommand::Stats { method, json } => show_stats(&tracker, method, json),
    }
}

fn read_record(path: &Path) -> anyhow::Result<DocumentData> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid record in {}: {}", path.display(), e))
}

fn record_feedback(tracker: &mut FeedbackTracker, args: RecordArgs) -> anyhow::Result<()> {
    let original = read_record(&args.original)?;
    let corrected = read_record(&args.corrected)?;

    let entry = FeedbackEntry::new(original, corrected, args.rating, args.method)?;
    let wrong: Vec<String> = entry.incorrect_fields().map(|f| f.to_string()).collect();
    tracker.record(entry)?;

    println!(
        "{} Recorded rating {} for {}",
        style("✓").green(),
        args.rating,
        args.method
    );
    if !wrong.is_empty() {
        println!("   corrected fields: {}", wrong.join(", "));
    }

    Ok(())
}

fn show_stats(
    tracker: &FeedbackTracker,
    method: Option<ExtractionMethod>,
    json: bool,
) -> anyhow::Result<()> {
    let metrics: Vec<(ExtractionMethod, MethodMetrics)> = match method {
        Some(method) => vec![(method, tracker.metrics(method))],
        None => tracker.all_metrics().into_iter().collect(),
    };

    if json {
        let map: serde_json::Map<String, serde_json::Value> = metrics
            .iter()
            .map(|(m, stats)| Ok((m.to_string(), serde_json::to_value(stats)?)))
            .collect::<serde_json::Result<_>>()?;
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    if metrics.is_empty() {
        println!("{} No feedback recorded yet.", style("ℹ").blue());
        return Ok(());
    }

    for (method, stats) in &metrics {
        println!("{}", style(method).bold());
        println!(
            "   average rating: {:.2} over {} ratings",
            stats.average_rating, stats.total_ratings
        );
        if !stats.common_issues.is_empty() {
            let issues: Vec<String> = stats
                .common_issues
                .iter()
                .map(|(field, count)| format!("{} ({})", field, count))
                .collect();
            println!("   common issues: {}", issues.join(", "));
        }
        if let Some(updated) = stats.last_updated {
            println!("   last updated: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
        }
    }

    Ok(())
}
