//! `sheetrel-model` defines the address primitives used when emitting worksheet parts.
//!
//! Both [`CellRef`] and [`Range`] can stand in wherever a worksheet part expects a cell
//! reference string: they render themselves in A1 notation and round-trip through
//! `serde` as plain `{row, col}` / `{start, end}` objects.

mod address;
mod cell;

pub use address::{A1ParseError, CellRef, Range, RangeParseError};
pub use cell::{EXCEL_MAX_COLS, EXCEL_MAX_ROWS};

/// Identifier of a worksheet within a workbook.
pub type WorksheetId = u32;
