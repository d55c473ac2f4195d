//! Transaction records and the line parser that produces them.

use crate::column::COLUMN_COUNT;
use crate::error::{ExtractError, Result};
use serde::Serialize;

/// Column names, in table order.
pub const RECORD_HEADER: [&str; COLUMN_COUNT] = [
    "Date",
    "Transaction Type",
    "Location",
    "Route",
    "Product",
    "Debit",
    "Credit",
    "Balance",
];

/// Printed at the bottom of the last page, after the final transaction.
pub const DISCLAIMER_MARKER: &str = "If there is a discrepancy in the listing of the card balance";

/// Page numbering in the footer, e.g. `Page 1 of 3`.
pub const PAGE_FOOTER_MARKER: &str = "Page ";

/// One row of the transaction table.
///
/// Fields are kept as printed; amounts keep their currency formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Transaction Type")]
    pub transaction_type: String,

    #[serde(rename = "Location")]
    pub location: String,

    #[serde(rename = "Route")]
    pub route: String,

    #[serde(rename = "Product")]
    pub product: String,

    #[serde(rename = "Debit")]
    pub debit: String,

    #[serde(rename = "Credit")]
    pub credit: String,

    #[serde(rename = "Balance")]
    pub balance: String,
}

impl TransactionRecord {
    /// Builds a record from exactly eight fields.
    pub fn from_fields(fields: [String; COLUMN_COUNT]) -> Self {
        let [date, transaction_type, location, route, product, debit, credit, balance] = fields;
        TransactionRecord {
            date,
            transaction_type,
            location,
            route,
            product,
            debit,
            credit,
            balance,
        }
    }

    /// The header row.
    pub fn header() -> Self {
        Self::from_fields(RECORD_HEADER.map(String::from))
    }

    /// Fields in column order.
    pub fn fields(&self) -> [&str; COLUMN_COUNT] {
        [
            &self.date,
            &self.transaction_type,
            &self.location,
            &self.route,
            &self.product,
            &self.debit,
            &self.credit,
            &self.balance,
        ]
    }
}

/// Why ingestion of a page stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfTable {
    /// The `Page N of M` footer.
    PageFooter,

    /// The closing disclaimer after the last transaction.
    Disclaimer,
}

/// Outcome of parsing one reconstructed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Record(TransactionRecord),
    EndOfTable(EndOfTable),
}

/// Parses one tab-delimited line into a record.
///
/// Footer and disclaimer lines come back as [`ParsedLine::EndOfTable`].
/// Any other line that does not have exactly eight fields is an
/// [`ExtractError::InvalidRecordLine`].
pub fn parse_line(line: &str) -> Result<ParsedLine> {
    let parts: Vec<&str> = line.split('\t').collect();

    // The printed footer carries text in the date column, and the footer
    // may carry text from column 3 on, so only columns 1 and 2 must be empty.
    // A row with no transaction type or location and "Page " in the balance
    // column is therefore read as a footer.
    if parts.len() == COLUMN_COUNT
        && parts[1].is_empty()
        && parts[2].is_empty()
        && parts[7].contains(PAGE_FOOTER_MARKER)
    {
        return Ok(ParsedLine::EndOfTable(EndOfTable::PageFooter));
    }
    if parts.len() < COLUMN_COUNT && parts[0].contains(DISCLAIMER_MARKER) {
        return Ok(ParsedLine::EndOfTable(EndOfTable::Disclaimer));
    }

    let fields: [&str; COLUMN_COUNT] =
        parts.try_into().map_err(|_| ExtractError::InvalidRecordLine {
            line: line.to_string(),
        })?;
    let record = TransactionRecord::from_fields(fields.map(String::from));
    Ok(ParsedLine::Record(record))
}
