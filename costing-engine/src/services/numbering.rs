//! Numbering authority boundary.
//!
//! Document numbers are allocated by an injected capability, not by the
//! engine: the persistence collaborator guarantees strictly monotonic,
//! never-reused allocation per series. Gaps are tolerated (a cancelled
//! document keeps its number), reuse never is.

use std::fmt;

use backoffice_core::config::NumberingSettings;
use thiserror::Error;

/// Document number series. Invoices and credit notes are numbered
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    Invoice,
    CreditNote,
}

impl Series {
    pub fn as_str(&self) -> &'static str {
        match self {
            Series::Invoice => "invoice",
            Series::CreditNote => "credit_note",
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum NumberingError {
    #[error("The {series} number sequence is unavailable: {reason}")]
    Unavailable { series: Series, reason: String },
}

/// Capability handing out the next sequential number for a series.
pub trait NumberSequence {
    fn next(&mut self, series: Series) -> Result<u64, NumberingError>;
}

/// In-process sequence for tests and single-process callers.
#[derive(Debug, Clone)]
pub struct InMemorySequence {
    next_invoice: u64,
    next_credit_note: u64,
}

impl InMemorySequence {
    pub fn new() -> Self {
        Self::starting_at(1, 1)
    }

    pub fn starting_at(invoice: u64, credit_note: u64) -> Self {
        Self {
            next_invoice: invoice,
            next_credit_note: credit_note,
        }
    }
}

impl Default for InMemorySequence {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberSequence for InMemorySequence {
    fn next(&mut self, series: Series) -> Result<u64, NumberingError> {
        let slot = match series {
            Series::Invoice => &mut self.next_invoice,
            Series::CreditNote => &mut self.next_credit_note,
        };
        let number = *slot;
        *slot += 1;
        Ok(number)
    }
}

/// Render a sequence number as a document number, e.g. `RE-00042`.
pub fn format_number(settings: &NumberingSettings, series: Series, sequence: u64) -> String {
    let prefix = match series {
        Series::Invoice => &settings.invoice_prefix,
        Series::CreditNote => &settings.credit_note_prefix,
    };
    format!("{}-{:05}", prefix, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_are_independent() {
        let mut sequence = InMemorySequence::new();
        assert_eq!(sequence.next(Series::Invoice).unwrap(), 1);
        assert_eq!(sequence.next(Series::Invoice).unwrap(), 2);
        assert_eq!(sequence.next(Series::CreditNote).unwrap(), 1);
    }

    #[test]
    fn formats_with_configured_prefix() {
        let settings = NumberingSettings::default();
        assert_eq!(format_number(&settings, Series::Invoice, 42), "RE-00042");
        assert_eq!(format_number(&settings, Series::CreditNote, 7), "GS-00007");
    }
}
