//! Extract command - pull fields from a single OCR text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use recibo_core::FieldExtractionEngine;

use super::{load_config, read_input, ReviewStatus};
use crate::output::{format_result, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file produced by OCR ("-" reads stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show detected/missing fields and the review verdict
    #[arg(long)]
    review: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing file: {}", args.input.display());
    let text = read_input(&args.input, config.extraction.max_input_chars)?;

    let engine = FieldExtractionEngine::from_config(&config.extraction)?;
    let result = engine.extract_fields(&text);

    let output = format_result(&result, args.format)?;

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

    if args.review {
        let detected: Vec<_> = result.detected_fields().iter().map(|k| k.as_str()).collect();
        let missing: Vec<_> = result.missing_fields().iter().map(|k| k.as_str()).collect();

        eprintln!();
        eprintln!(
            "{} Detected {}/6 fields: {}",
            style("ℹ").blue(),
            result.detected_count(),
            detected.join(", ")
        );
        if !missing.is_empty() {
            eprintln!("{} Missing: {}", style("ℹ").blue(), missing.join(", "));
        }

        match ReviewStatus::evaluate(&result, config.review.min_fields) {
            ReviewStatus::AutoAccept => {
                eprintln!("{} {}", style("✓").green(), ReviewStatus::AutoAccept.as_str())
            }
            ReviewStatus::NeedsReview => {
                eprintln!("{} {}", style("!").yellow(), ReviewStatus::NeedsReview.as_str())
            }
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
