//! Document-level extraction: pages in, transaction table out.
//!
//! Pages are processed one at a time, in order. Cursor state never crosses
//! a page boundary, and the account number is only known once the first
//! page has been read.

use crate::content::{ContentSource, LopdfSource};
use crate::error::{ExtractError, Result};
use crate::reconstruct::reconstruct_page;
use crate::report::{LogReporter, Reporter};
use crate::table::{assemble, TransactionTable};
use encoding_rs::WINDOWS_1252;
use log::{debug, error};
use std::io::Read;

/// Reconstructs the text of every page.
///
/// Returns one trimmed string per page, rows separated by `\n` and columns
/// by `\t`.
pub fn extract_pages<S: ContentSource + ?Sized>(source: &S) -> Result<Vec<String>> {
    let page_count = source.page_count()?;
    debug!("Extracting text from {} pages", page_count);

    let mut pages = Vec::with_capacity(page_count as usize);
    for page in 1..=page_count {
        // Multiple content streams behave as one concatenated stream.
        let mut content = Vec::new();
        for stream in source.content_streams(page)? {
            content.extend_from_slice(&stream);
            content.push(b'\n');
        }

        let operations = source.parse_operations(&content)?;
        let raw = reconstruct_page(&operations)?;
        let text = decode_page_text(page, &raw)?;
        pages.push(text.trim().to_string());
    }
    Ok(pages)
}

/// Decodes raw page text, which the statement encodes as Windows-1252.
pub fn decode_page_text(page: u32, raw: &[u8]) -> Result<String> {
    match WINDOWS_1252.decode_without_bom_handling_and_without_replacement(raw) {
        Some(text) => Ok(text.into_owned()),
        None => {
            let raw = String::from_utf8_lossy(raw).into_owned();
            error!("Error decoding page {}: {:?}", page, raw);
            Err(ExtractError::Decode { page, raw })
        }
    }
}

/// Parses a statement PDF into its transaction table.
///
/// Layout warnings are sent to the `log` facade.
pub fn parse_document<R: Read>(reader: R) -> Result<TransactionTable> {
    parse_document_with(reader, &mut LogReporter)
}

/// Parses a statement PDF, sending layout warnings to `reporter`.
pub fn parse_document_with<R: Read>(
    mut reader: R,
    reporter: &mut dyn Reporter,
) -> Result<TransactionTable> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let source = LopdfSource::from_bytes(&bytes)?;
    parse_source(&source, reporter)
}

/// Runs page extraction and table assembly over any [`ContentSource`].
pub fn parse_source<S: ContentSource + ?Sized>(
    source: &S,
    reporter: &mut dyn Reporter,
) -> Result<TransactionTable> {
    let pages = extract_pages(source)?;
    let table = assemble(&pages, reporter)?;
    debug!(
        "Card {}: {} transactions",
        table.account_number(),
        table.transactions().len()
    );
    Ok(table)
}
