//! Bank detection over raw OCR text.

use tracing::debug;

use super::profiles::{BankProfile, ProfileTable};

/// Selects the bank profile for a text.
///
/// Profiles are checked in table order; the first one with a keyword that
/// occurs anywhere in the text (ignoring case) wins. Text matching no profile
/// gets the generic profile.
#[derive(Debug, Clone, Copy)]
pub struct BankDetector<'a> {
    table: &'a ProfileTable,
}

impl<'a> BankDetector<'a> {
    pub fn new(table: &'a ProfileTable) -> Self {
        Self { table }
    }

    pub fn detect(&self, text: &str) -> &'a BankProfile {
        let lowered = text.to_lowercase();
        match self
            .table
            .profiles()
            .iter()
            .find(|p| p.matches_lowercase(&lowered))
        {
            Some(profile) => {
                debug!(bank = profile.code(), "Detected bank");
                profile
            }
            None => {
                debug!("No bank keyword found, using generic profile");
                self.table.generic()
            }
        }
    }
}
