//! Subcommands and the helpers they share.

pub mod banks;
pub mod batch;
pub mod config;
pub mod extract;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use recibo_core::{ExtractionResult, ReciboConfig};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recibo")
        .join("config.json")
}

/// Load the config given with `--config`, else the default file if present,
/// else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ReciboConfig> {
    if let Some(path) = config_path {
        return Ok(ReciboConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(ReciboConfig::from_file(&default_path)?)
    } else {
        Ok(ReciboConfig::default())
    }
}

/// Read OCR text from a file, or from stdin when `path` is `-`.
///
/// Inputs longer than `max_chars` characters are rejected (0 disables the cap).
pub fn read_input(path: &Path, max_chars: usize) -> anyhow::Result<String> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        fs::read_to_string(path)?
    };

    if max_chars > 0 {
        let len = text.chars().count();
        if len > max_chars {
            anyhow::bail!(
                "Input {} has {} characters, limit is {} (extraction.max_input_chars)",
                path.display(),
                len,
                max_chars
            );
        }
    }

    Ok(text)
}

/// Review outcome for an extraction result under the configured policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    AutoAccept,
    NeedsReview,
}

impl ReviewStatus {
    pub fn evaluate(result: &ExtractionResult, min_fields: usize) -> Self {
        if result.detected_count() >= min_fields {
            ReviewStatus::AutoAccept
        } else {
            ReviewStatus::NeedsReview
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::AutoAccept => "auto-accept",
            ReviewStatus::NeedsReview => "needs-review",
        }
    }
}
