//! Rendering extraction results as JSON, CSV or plain text.

use recibo_core::receipt::rules::format_amount;
use recibo_core::{ExtractionResult, FieldKind};

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
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

/// Column order shared by per-file CSV output and the batch summary.
pub const CSV_FIELDS: [&str; 6] = ["bank", "amount", "reference", "date", "account", "beneficiary"];

/// Field values in [`CSV_FIELDS`] order; absent slots are empty strings.
pub fn csv_values(result: &ExtractionResult) -> [String; 6] {
    [
        result.bank().unwrap_or_default().to_string(),
        result.amount().map(|a| a.to_string()).unwrap_or_default(),
        result.reference().unwrap_or_default().to_string(),
        result.date().map(|d| d.to_string()).unwrap_or_default(),
        result.account().unwrap_or_default().to_string(),
        result.beneficiary().unwrap_or_default().to_string(),
    ]
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_FIELDS)?;
    wtr.write_record(csv_values(result))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    for kind in FieldKind::ALL {
        let value = match kind {
            FieldKind::Bank => result.bank().map(str::to_string),
            FieldKind::Amount => result.amount().map(format_amount),
            FieldKind::Reference => result.reference().map(str::to_string),
            FieldKind::Date => result.date().map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string()),
            FieldKind::Account => result.account().map(str::to_string),
            FieldKind::Beneficiary => result.beneficiary().map(str::to_string),
        };
        let label = format!("{}:", kind);
        output.push_str(&format!(
            "{:<13}{}\n",
            label,
            value.as_deref().unwrap_or("-")
        ));
    }

    output
}
