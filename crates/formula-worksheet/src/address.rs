use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::WorksheetLimits;

/// A reference to a single cell within a worksheet.
///
/// Rows and columns are **0-indexed**:
/// - `row = 0` is Excel row `1`
/// - `col = 0` is Excel column `A`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// 0-indexed row.
    pub row: u32,
    /// 0-indexed column.
    pub col: u32,
}

impl CellRef {
    /// Construct a new [`CellRef`].
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Convert to Excel A1 notation (e.g. `A1`, `BC32`).
    pub fn to_a1(self) -> String {
        format!("{}{}", col_to_name(self.col), u64::from(self.row) + 1)
    }

    /// Parse an Excel A1-style reference (e.g. `A1`, `$B$2`) within the default Excel bounds.
    pub fn from_a1(a1: &str) -> Result<Self, A1ParseError> {
        Self::from_a1_with_limits(a1, &WorksheetLimits::default())
    }

    /// Parse an A1-style reference, rejecting rows/columns outside `limits`.
    pub fn from_a1_with_limits(a1: &str, limits: &WorksheetLimits) -> Result<Self, A1ParseError> {
        let s = a1.trim();
        if s.is_empty() {
            return Err(A1ParseError::Empty);
        }

        let (col_str, row_str) = split_a1(s)?;

        let col = name_to_col(col_str)?;
        if col >= limits.max_cols {
            return Err(A1ParseError::InvalidColumn);
        }
        let row_1_based: u32 = row_str.parse().map_err(|_| A1ParseError::InvalidRow)?;
        if row_1_based == 0 || row_1_based > limits.max_rows {
            return Err(A1ParseError::InvalidRow);
        }

        Ok(Self {
            row: row_1_based - 1,
            col,
        })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// Errors that can occur when parsing an A1 cell reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum A1ParseError {
    #[error("empty A1 reference")]
    Empty,
    #[error("missing column in A1 reference")]
    MissingColumn,
    #[error("missing row in A1 reference")]
    MissingRow,
    #[error("invalid column in A1 reference")]
    InvalidColumn,
    #[error("invalid row in A1 reference")]
    InvalidRow,
    #[error("trailing characters in A1 reference")]
    TrailingCharacters,
}

/// Split `$AB$12` into `("AB", "12")`, accepting optional `$` markers.
fn split_a1(s: &str) -> Result<(&str, &str), A1ParseError> {
    let bytes = s.as_bytes();
    let mut idx = 0usize;
    if bytes.get(idx) == Some(&b'$') {
        idx += 1;
    }

    let col_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_alphabetic() {
        idx += 1;
    }
    if idx == col_start {
        return Err(A1ParseError::MissingColumn);
    }
    let col_end = idx;

    if bytes.get(idx) == Some(&b'$') {
        idx += 1;
    }

    let row_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx == row_start {
        return Err(A1ParseError::MissingRow);
    }
    if idx != bytes.len() {
        return Err(A1ParseError::TrailingCharacters);
    }

    Ok((&s[col_start..col_end], &s[row_start..idx]))
}

/// Convert a 0-based column index into Excel column letters (`0` -> `A`, `27` -> `AB`).
pub fn col_to_name(col: u32) -> String {
    // Excel columns are 1-based in A1 notation. We store 0-based internally.
    let mut n = u64::from(col) + 1;
    let mut out = Vec::<char>::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        out.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    out.iter().rev().collect()
}

/// Convert Excel column letters (case-insensitive) into a 0-based column index.
pub fn name_to_col(s: &str) -> Result<u32, A1ParseError> {
    let mut col: u32 = 0;
    for b in s.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(A1ParseError::InvalidColumn);
        }
        let v = (b.to_ascii_uppercase() - b'A') as u32 + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(v))
            .ok_or(A1ParseError::InvalidColumn)?;
    }
    if col == 0 {
        return Err(A1ParseError::InvalidColumn);
    }
    Ok(col - 1)
}
