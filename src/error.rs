//! Error types for statement extraction.

use thiserror::Error;

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that abort a statement parse.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to open or read the input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF could not be loaded or a page could not be decoded
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A text position fell outside the page coordinate range.
    #[error("Invalid coordinate {value}: expected a horizontal position in 0..=1100")]
    InvalidCoordinate { value: f64 },

    /// A text operator carried operands of an unexpected shape.
    #[error("Malformed content stream: operator {operator} got {found}")]
    MalformedContentStream { operator: String, found: String },

    /// A reconstructed line did not split into 8 columns.
    #[error("Invalid record line: {line:?}")]
    InvalidRecordLine { line: String },

    /// Page text could not be decoded as Windows-1252
    #[error("Failed to decode text on page {page}: {raw:?}")]
    Decode { page: u32, raw: String },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: clipper-csv <statement.pdf> [output.csv]")]
    MissingArgument,
}
