//! Assembles page text into the transaction table.
//!
//! The first page opens with three metadata lines:
//!
//! ```text
//! TRANSACTION HISTORY FOR
//! CARD 1234567890
//! TRANSACTION TYPE<TAB>LOCATION<TAB>ROUTE...
//! ```
//!
//! Every later page repeats only the column header line. Everything after
//! those lines is transaction rows until a footer or the disclaimer.

use crate::error::Result;
use crate::report::{LayoutWarning, Reporter};
use crate::transaction::{parse_line, ParsedLine, TransactionRecord};
use csv::WriterBuilder;
use log::debug;
use std::io::Write;

/// Expected first line of the first page.
pub const TITLE_LINE: &str = "TRANSACTION HISTORY FOR";

/// Prefix of the card line, followed by the account number.
pub const CARD_PREFIX: &str = "CARD ";

/// Prefix of the column header line on every page.
pub const COLUMN_HEADER_PREFIX: &str = "TRANSACTION TYPE\tLOCATION\tROUTE";

/// Account number used when the card line cannot be read.
pub const UNKNOWN_ACCOUNT: i64 = -1;

/// The extracted transaction history of one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionTable {
    account_number: i64,

    /// Header record first, then transactions in document order.
    records: Vec<TransactionRecord>,
}

impl TransactionTable {
    /// Card serial number, or [`UNKNOWN_ACCOUNT`].
    pub fn account_number(&self) -> i64 {
        self.account_number
    }

    /// All rows, starting with the header record.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Transaction rows without the header record.
    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.records[1..]
    }

    /// Writes the table, header included, as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        for record in &self.records {
            csv_writer.serialize(record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Builds the transaction table from reconstructed page text.
pub fn assemble(pages: &[String], reporter: &mut dyn Reporter) -> Result<TransactionTable> {
    let mut records = vec![TransactionRecord::header()];
    let mut account_number = UNKNOWN_ACCOUNT;

    for (index, page) in pages.iter().enumerate() {
        let page_number = index + 1;
        let mut lines = page.lines();

        if index == 0 {
            if let Some(title) = lines.next() {
                if title != TITLE_LINE {
                    reporter.warn(LayoutWarning::UnexpectedTitle {
                        text: title.to_string(),
                    });
                }
            }
            if let Some(card_line) = lines.next() {
                if let Some(number) = read_account_number(card_line, reporter) {
                    account_number = number;
                }
            }
        }
        if let Some(header) = lines.next() {
            if !header.starts_with(COLUMN_HEADER_PREFIX) {
                reporter.warn(LayoutWarning::UnexpectedHeader {
                    page: page_number,
                    text: header.to_string(),
                });
            }
        }

        let before = records.len();
        for line in lines {
            match parse_line(line)? {
                ParsedLine::Record(record) => records.push(record),
                ParsedLine::EndOfTable(reason) => {
                    debug!("Page {}: end of table ({:?})", page_number, reason);
                    break;
                }
            }
        }
        debug!("Page {}: {} records", page_number, records.len() - before);
    }

    Ok(TransactionTable {
        account_number,
        records,
    })
}

/// Reads the number out of a `CARD <number>` line.
fn read_account_number(line: &str, reporter: &mut dyn Reporter) -> Option<i64> {
    let parts: Vec<&str> = line.split(' ').collect();
    if !line.starts_with(CARD_PREFIX) || parts.len() != 2 {
        reporter.warn(LayoutWarning::UnexpectedCardLine {
            text: line.to_string(),
        });
        return None;
    }

    match parts[1].parse::<i64>() {
        Ok(number) => Some(number),
        Err(_) => {
            reporter.warn(LayoutWarning::InvalidAccountNumber {
                text: line.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::transaction::RECORD_HEADER;

    const ROW_1: &str = "01/02/2024 07:15 AM\tDual-tag entry\tEmbarcadero (BART)\t\tClipper Cash\t\t\t$20.00";
    const ROW_2: &str = "01/02/2024 07:40 AM\tDual-tag exit\tMontgomery (BART)\t\tClipper Cash\t$2.15\t\t$17.85";
    const ROW_3: &str = "01/03/2024 06:02 PM\tSingle-tag fare payment\tMuni\t14\tClipper Cash\t$2.50\t\t$15.35";

    fn first_page(rows: &[&str]) -> String {
        let mut lines = vec![
            TITLE_LINE.to_string(),
            "CARD 1234567890".to_string(),
            format!("{}\tPRODUCT\tDEBIT\tCREDIT\tBALANCE", COLUMN_HEADER_PREFIX),
        ];
        lines.extend(rows.iter().map(|r| r.to_string()));
        lines.join("\n")
    }

    fn later_page(rows: &[&str]) -> String {
        let mut lines = vec![format!("{}\tPRODUCT", COLUMN_HEADER_PREFIX)];
        lines.extend(rows.iter().map(|r| r.to_string()));
        lines.join("\n")
    }

    #[test]
    fn test_single_page_table() {
        let mut warnings: Vec<LayoutWarning> = Vec::new();
        let table = assemble(&[first_page(&[ROW_1, ROW_2])], &mut warnings).unwrap();

        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
        assert_eq!(table.account_number(), 1234567890);
        assert_eq!(table.records().len(), 3);
        assert_eq!(table.records()[0].fields(), RECORD_HEADER);
        assert_eq!(table.transactions()[1].balance, "$17.85");
    }

    #[test]
    fn test_pages_concatenate_in_order() {
        let pages = [
            first_page(&[ROW_1, "\t\t\t\t\t\t\tPage 1 of 2"]),
            later_page(&[ROW_2, ROW_3]),
        ];
        let mut warnings: Vec<LayoutWarning> = Vec::new();
        let table = assemble(&pages, &mut warnings).unwrap();

        let dates: Vec<&str> = table.transactions().iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            ["01/02/2024 07:15 AM", "01/02/2024 07:40 AM", "01/03/2024 06:02 PM"]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_footer_stops_only_current_page() {
        let pages = [
            first_page(&[ROW_1, "\t\t\t\t\t\t\tPage 1 of 2", "garbage after footer"]),
            later_page(&[ROW_2]),
        ];
        let table = assemble(&pages, &mut Vec::<LayoutWarning>::new()).unwrap();
        assert_eq!(table.transactions().len(), 2);
    }

    #[test]
    fn test_disclaimer_ends_table() {
        let page = first_page(&[
            ROW_1,
            "If there is a discrepancy in the listing of the card balance, contact us.",
            "Customer Service\t1-877-878-8883",
        ]);
        let table = assemble(&[page], &mut Vec::<LayoutWarning>::new()).unwrap();
        assert_eq!(table.transactions().len(), 1);
    }

    #[test]
    fn test_unexpected_metadata_warns_but_continues() {
        let page = format!("STATEMENT\nCARD \nDATE\tTYPE\n{}", ROW_1);
        let mut warnings: Vec<LayoutWarning> = Vec::new();
        let table = assemble(&[page], &mut warnings).unwrap();

        assert_eq!(table.account_number(), UNKNOWN_ACCOUNT);
        assert_eq!(table.transactions().len(), 1);
        assert_eq!(
            warnings,
            vec![
                LayoutWarning::UnexpectedTitle {
                    text: "STATEMENT".to_string()
                },
                LayoutWarning::InvalidAccountNumber {
                    text: "CARD ".to_string()
                },
                LayoutWarning::UnexpectedHeader {
                    page: 1,
                    text: "DATE\tTYPE".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_card_line_without_prefix_warns() {
        let page = first_page(&[]).replace("CARD 1234567890", "ACCOUNT 1234567890");
        let mut warnings: Vec<LayoutWarning> = Vec::new();
        let table = assemble(&[page], &mut warnings).unwrap();

        assert_eq!(table.account_number(), UNKNOWN_ACCOUNT);
        assert_eq!(
            warnings,
            vec![LayoutWarning::UnexpectedCardLine {
                text: "ACCOUNT 1234567890".to_string()
            }]
        );
    }

    #[test]
    fn test_card_line_with_extra_tokens_warns() {
        let page = first_page(&[]).replace("CARD 1234567890", "CARD 1234 5678");
        let mut warnings: Vec<LayoutWarning> = Vec::new();
        let table = assemble(&[page], &mut warnings).unwrap();

        assert_eq!(table.account_number(), UNKNOWN_ACCOUNT);
        assert!(matches!(
            warnings.as_slice(),
            [LayoutWarning::UnexpectedCardLine { .. }]
        ));
    }

    #[test]
    fn test_later_page_header_mismatch_warns() {
        let pages = [first_page(&[ROW_1]), format!("Continued\n{}", ROW_2)];
        let mut warnings: Vec<LayoutWarning> = Vec::new();
        let table = assemble(&pages, &mut warnings).unwrap();

        assert_eq!(table.transactions().len(), 2);
        assert_eq!(
            warnings,
            vec![LayoutWarning::UnexpectedHeader {
                page: 2,
                text: "Continued".to_string()
            }]
        );
    }

    #[test]
    fn test_invalid_row_aborts() {
        let page = first_page(&[ROW_1, "01/05/2024\tReload"]);
        let err = assemble(&[page], &mut Vec::<LayoutWarning>::new()).unwrap_err();
        match err {
            ExtractError::InvalidRecordLine { line } => assert_eq!(line, "01/05/2024\tReload"),
            other => panic!("Expected InvalidRecordLine, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_has_only_header() {
        let mut warnings: Vec<LayoutWarning> = Vec::new();
        let table = assemble(&[], &mut warnings).unwrap();
        assert_eq!(table.records().len(), 1);
        assert!(table.transactions().is_empty());
        assert_eq!(table.account_number(), UNKNOWN_ACCOUNT);
    }

    #[test]
    fn test_write_csv() {
        let table = assemble(&[first_page(&[ROW_2])], &mut Vec::<LayoutWarning>::new()).unwrap();
        let mut output = Vec::new();
        table.write_csv(&mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "Date,Transaction Type,Location,Route,Product,Debit,Credit,Balance\n\
             01/02/2024 07:40 AM,Dual-tag exit,Montgomery (BART),,Clipper Cash,$2.15,,$17.85\n"
        );
    }
}
