use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::{EXCEL_MAX_COLS, EXCEL_MAX_ROWS};

/// A single cell position on a worksheet.
///
/// Coordinates are **0-indexed**, so `CellRef::new(0, 0)` renders as `A1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    /// 0-indexed row.
    pub row: u32,
    /// 0-indexed column.
    pub col: u32,
}

impl CellRef {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Render in A1 notation (e.g. `A1`, `BC32`).
    pub fn to_a1(self) -> String {
        let mut out = column_letters(self.col);
        out.push_str(&(u64::from(self.row) + 1).to_string());
        out
    }

    /// Parse an A1 reference. Absolute markers (`$B$2`) are accepted and dropped.
    pub fn from_a1(a1: &str) -> Result<Self, A1ParseError> {
        let s = a1.trim();
        if s.is_empty() {
            return Err(A1ParseError::Empty);
        }

        let s = s.strip_prefix('$').unwrap_or(s);
        let letters_end = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, rest) = s.split_at(letters_end);
        if letters.is_empty() {
            return Err(A1ParseError::MissingColumn);
        }

        let digits = rest.strip_prefix('$').unwrap_or(rest);
        let digits_end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        if digits_end == 0 {
            return Err(A1ParseError::MissingRow);
        }
        if digits_end != digits.len() {
            return Err(A1ParseError::TrailingCharacters);
        }

        let col = column_index(letters)?;
        let row: u32 = digits.parse().map_err(|_| A1ParseError::InvalidRow)?;
        if row == 0 || row > EXCEL_MAX_ROWS {
            return Err(A1ParseError::InvalidRow);
        }

        Ok(Self::new(row - 1, col))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

impl FromStr for CellRef {
    type Err = A1ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_a1(s)
    }
}

/// An inclusive rectangle of cells, normalized so `start` is the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: CellRef,
    pub end: CellRef,
}

impl Range {
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Self {
            start: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    #[inline]
    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// Render as `A1` for a single cell, otherwise `A1:B2`.
    pub fn to_a1(&self) -> String {
        self.to_string()
    }

    /// Parse `A1:B2` or a lone `C3`.
    pub fn from_a1(a1: &str) -> Result<Self, RangeParseError> {
        let s = a1.trim();
        if s.is_empty() {
            return Err(RangeParseError::Empty);
        }

        let (a, b) = s.split_once(':').unwrap_or((s, s));
        let start = CellRef::from_a1(a).map_err(RangeParseError::Cell)?;
        let end = CellRef::from_a1(b).map_err(RangeParseError::Cell)?;
        Ok(Range::new(start, end))
    }
}

impl From<CellRef> for Range {
    fn from(cell: CellRef) -> Self {
        Range::new(cell, cell)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl FromStr for Range {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_a1(s)
    }
}

/// Reasons an A1 cell reference failed to parse.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum A1ParseError {
    Empty,
    MissingColumn,
    MissingRow,
    InvalidColumn,
    InvalidRow,
    TrailingCharacters,
}

impl fmt::Display for A1ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            A1ParseError::Empty => "empty A1 reference",
            A1ParseError::MissingColumn => "missing column in A1 reference",
            A1ParseError::MissingRow => "missing row in A1 reference",
            A1ParseError::InvalidColumn => "invalid column in A1 reference",
            A1ParseError::InvalidRow => "invalid row in A1 reference",
            A1ParseError::TrailingCharacters => "trailing characters in A1 reference",
        })
    }
}

impl std::error::Error for A1ParseError {}

/// Reasons an A1 range failed to parse.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RangeParseError {
    Empty,
    Cell(A1ParseError),
}

impl fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeParseError::Empty => f.write_str("empty A1 range"),
            RangeParseError::Cell(e) => write!(f, "invalid cell reference in range: {e}"),
        }
    }
}

impl std::error::Error for RangeParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RangeParseError::Empty => None,
            RangeParseError::Cell(e) => Some(e),
        }
    }
}

// Bijective base-26: column 0 is `A`, 25 is `Z`, 26 is `AA`.
fn column_letters(col: u32) -> String {
    let mut n = u64::from(col) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn column_index(letters: &str) -> Result<u32, A1ParseError> {
    let mut col: u32 = 0;
    for b in letters.bytes() {
        let digit = u32::from(b.to_ascii_uppercase() - b'A') + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(digit))
            .ok_or(A1ParseError::InvalidColumn)?;
    }
    if col == 0 || col > EXCEL_MAX_COLS {
        return Err(A1ParseError::InvalidColumn);
    }
    Ok(col - 1)
}
