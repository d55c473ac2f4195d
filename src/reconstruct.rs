//! Rebuilds tab-delimited table text from a page's text operators.
//!
//! The statement has no table markup. Each cell is placed with an absolute
//! text matrix (`Tm`), so rows and columns are inferred from the cursor
//! movement between placements:
//!
//! - a lower y offset starts a new row (`\n`)
//! - a larger x offset on the same row crosses zero or more columns (`\t`)
//!
//! All per-page state lives in [`CursorState`], updated one operator at a
//! time by [`CursorState::apply`].

use crate::column::tab_count;
use crate::content::{Operand, Operation};
use crate::error::{ExtractError, Result};
use log::trace;

/// `TJ` spacing adjustments below this value are read as a word gap.
pub const WORD_GAP_THRESHOLD: f64 = -100.0;

/// Transient cursor state for one page.
#[derive(Debug, Default, Clone)]
pub struct CursorState {
    /// Last tracked horizontal offset, `None` until the first `Tm`.
    x: Option<f64>,

    /// Last tracked vertical offset, `None` until the first `Tm`.
    y: Option<f64>,

    /// Whether we are between `BT` and `ET`.
    in_text: bool,

    /// Raw (still Windows-1252 encoded) page text.
    text: Vec<u8>,
}

impl CursorState {
    /// Creates the state for a fresh page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one operator to the state.
    pub fn apply(&mut self, op: &Operation) -> Result<()> {
        match op.name.as_str() {
            "BT" => self.in_text = true,
            "ET" => self.in_text = false,
            "Tm" => self.set_text_matrix(op)?,
            "Td" | "TD" | "T*" => self.text.push(b'\n'),
            "Tj" if self.in_text => self.show_text(op)?,
            "TJ" if self.in_text => self.show_positioned_text(op)?,
            _ => {}
        }
        Ok(())
    }

    /// Consumes the state, returning the accumulated raw text.
    pub fn into_text(self) -> Vec<u8> {
        self.text
    }

    fn set_text_matrix(&mut self, op: &Operation) -> Result<()> {
        // a b c d e f: e and f are the x/y translation, origin bottom left.
        if op.operands.len() != 6 {
            trace!("Skipping {} with {} operands", op.name, op.operands.len());
            return Ok(());
        }
        let (Some(x), Some(y)) = (op.operands[4].as_f64(), op.operands[5].as_f64()) else {
            trace!("Skipping non-numeric {}", op);
            return Ok(());
        };

        match self.y {
            None => self.y = Some(y),
            Some(prev_y) if y < prev_y => {
                self.text.push(b'\n');
                self.x = Some(x);
                self.y = Some(y);
                return Ok(());
            }
            Some(_) => {}
        }

        match self.x {
            None => self.x = Some(x),
            Some(prev_x) if prev_x < x => {
                let tabs = tab_count(prev_x, x)?;
                self.text.extend(std::iter::repeat(b'\t').take(tabs));
                self.x = Some(x);
            }
            Some(_) => {}
        }
        Ok(())
    }

    fn show_text(&mut self, op: &Operation) -> Result<()> {
        match op.operands.first() {
            None => Ok(()),
            Some(Operand::String(bytes)) => {
                self.text.extend_from_slice(bytes);
                Ok(())
            }
            Some(other) => Err(malformed(op, other.type_name())),
        }
    }

    fn show_positioned_text(&mut self, op: &Operation) -> Result<()> {
        let items = match op.operands.first() {
            None => return Ok(()),
            Some(Operand::Array(items)) => items,
            Some(other) => return Err(malformed(op, other.type_name())),
        };

        for item in items {
            match item {
                Operand::String(bytes) => self.text.extend_from_slice(bytes),
                Operand::Integer(_) | Operand::Real(_) => {
                    if item.as_f64().is_some_and(|gap| gap < WORD_GAP_THRESHOLD) {
                        self.text.push(b' ');
                    }
                }
                other => {
                    return Err(malformed(op, &format!("array element {}", other.type_name())))
                }
            }
        }
        Ok(())
    }
}

fn malformed(op: &Operation, found: &str) -> ExtractError {
    ExtractError::MalformedContentStream {
        operator: op.name.clone(),
        found: found.to_string(),
    }
}

/// Runs a fresh [`CursorState`] over a page's operators.
pub fn reconstruct_page(operations: &[Operation]) -> Result<Vec<u8>> {
    let mut state = CursorState::new();
    for op in operations {
        state.apply(op)?;
    }
    Ok(state.into_text())
}
