//! Horizontal position to column slot classification.
//!
//! The statement lays its table out at fixed x offsets. Each text placement
//! is binned into the nearest column using the midpoint between neighbouring
//! column starts.

use crate::error::{ExtractError, Result};

/// Number of columns in a transaction row.
pub const COLUMN_COUNT: usize = 8;

/// Left edge of each column, in PDF user space units.
///
/// Date, transaction type, location, route, product, debit, credit, balance.
/// Measured from the statement layout.
pub const COLUMN_POSITIONS: [f64; COLUMN_COUNT] = [
    28.0, 133.71, 359.24, 479.05, 528.38, 655.88, 685.78, 722.22,
];

/// Largest horizontal coordinate accepted as on-page.
pub const MAX_COORDINATE: f64 = 1100.0;

/// Returns the column slot (0..=7) for a horizontal coordinate.
///
/// Coordinates outside `0..=1100` mean the coordinate system assumption no
/// longer holds and are reported as [`ExtractError::InvalidCoordinate`].
pub fn column_index(x: f64) -> Result<usize> {
    if !(0.0..=MAX_COORDINATE).contains(&x) {
        return Err(ExtractError::InvalidCoordinate { value: x });
    }

    let last = COLUMN_COUNT - 1;
    if x <= COLUMN_POSITIONS[0] {
        return Ok(0);
    }
    if x >= COLUMN_POSITIONS[last] {
        return Ok(last);
    }

    let index = COLUMN_POSITIONS
        .windows(2)
        .position(|pair| x < pair[0] + (pair[1] - pair[0]) / 2.0)
        .unwrap_or(last);
    Ok(index)
}

/// Number of tab characters separating two positions on the same line.
///
/// Callers only ask for rightward moves, so `prev < cur` must hold.
pub fn tab_count(prev: f64, cur: f64) -> Result<usize> {
    debug_assert!(prev < cur, "tab_count called with {prev} >= {cur}");
    let from = column_index(prev)?;
    let to = column_index(cur)?;
    Ok(to.saturating_sub(from))
}
