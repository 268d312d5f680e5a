//! Banks command - show the active bank profile table.

use clap::Args;
use console::style;

use recibo_core::receipt::LabelField;
use recibo_core::{BankProfile, FieldExtractionEngine};

use super::load_config;

/// Arguments for the banks command.
#[derive(Args)]
pub struct BanksArgs {
    /// Also print every label pattern
    #[arg(long)]
    labels: bool,
}

const FIELDS: [LabelField; 5] = [
    LabelField::Amount,
    LabelField::Date,
    LabelField::Reference,
    LabelField::Account,
    LabelField::Beneficiary,
];

pub async fn run(args: BanksArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let engine = FieldExtractionEngine::from_config(&config.extraction)?;
    let table = engine.table();

    println!("{}", style("Detection order:").bold());
    for (i, profile) in table.profiles().iter().enumerate() {
        println!(
            "  {:>2}. {:<12} keywords: {}",
            i + 1,
            style(profile.code()).cyan(),
            profile.keywords().join(", ")
        );
        print_labels(profile, args.labels);
    }

    println!();
    println!(
        "{} {} (used when no keyword matches; its labels back up every bank)",
        style("Fallback:").bold(),
        style(table.generic().code()).cyan()
    );
    print_labels(table.generic(), args.labels);

    Ok(())
}

fn print_labels(profile: &BankProfile, verbose: bool) {
    if !verbose {
        let counts: Vec<_> = FIELDS
            .iter()
            .map(|f| format!("{}={}", f, profile.labels(*f).len()))
            .collect();
        println!("      labels: {}", counts.join(" "));
        return;
    }

    for field in FIELDS {
        for label in profile.labels(field) {
            println!("      {:<12} {}", field.as_str(), label.as_str());
        }
    }
}
