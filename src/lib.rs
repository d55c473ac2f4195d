//! # Clipper CSV
//!
//! Extracts the transaction table from a Clipper card "transaction history"
//! PDF statement.
//!
//! The statement has no table structure, only text placed at absolute
//! positions. Rows and columns are rebuilt from the text cursor movement and
//! then validated as 8-column transaction records.
//!
//! ## Pipeline
//!
//! - [`content`]: page content streams decoded into operators (`lopdf`)
//! - [`reconstruct`]: operators to tab/newline delimited page text
//! - [`column`]: x offset to column slot classification
//! - [`transaction`]: line to record parsing, end-of-table detection
//! - [`table`]: metadata lines, account number, final table
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//!
//! let table = clipper_csv::parse_document(File::open("statement.pdf").unwrap()).unwrap();
//! println!("card {}", table.account_number());
//! table.write_csv(std::io::stdout()).unwrap();
//! ```

pub mod column;
pub mod content;
pub mod engine;
pub mod error;
pub mod reconstruct;
pub mod report;
pub mod table;
pub mod transaction;

pub use content::{ContentSource, LopdfSource, Operand, Operation};
pub use engine::{extract_pages, parse_document, parse_document_with, parse_source};
pub use error::{ExtractError, Result};
pub use reconstruct::{reconstruct_page, CursorState};
pub use report::{LayoutWarning, LogReporter, Reporter};
pub use table::{assemble, TransactionTable};
pub use transaction::{parse_line, EndOfTable, ParsedLine, TransactionRecord};
