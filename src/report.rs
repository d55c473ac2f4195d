//! Layout drift warnings and where they go.
//!
//! Small deviations in the statement's title or header lines do not corrupt
//! the table, so they are reported instead of aborting the parse.

use log::warn;
use thiserror::Error;

/// A recoverable deviation from the expected statement layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutWarning {
    /// First line of the first page is not the report title.
    #[error("Unexpected title line: {text:?}")]
    UnexpectedTitle { text: String },

    /// Second line of the first page is not `CARD <number>`.
    #[error("Unexpected card line: {text:?}")]
    UnexpectedCardLine { text: String },

    /// The card line's number could not be parsed.
    #[error("Error reading account number from {text:?}")]
    InvalidAccountNumber { text: String },

    /// A page does not start with the column header.
    #[error("Unexpected header line on page {page}: {text:?}")]
    UnexpectedHeader { page: usize, text: String },
}

/// Receives layout warnings during table assembly.
pub trait Reporter {
    fn warn(&mut self, warning: LayoutWarning);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn warn(&mut self, warning: LayoutWarning) {
        warn!("{}", warning);
    }
}

/// Collects warnings, mostly useful in tests.
impl Reporter for Vec<LayoutWarning> {
    fn warn(&mut self, warning: LayoutWarning) {
        self.push(warning);
    }
}
