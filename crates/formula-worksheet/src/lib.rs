//! `formula-worksheet` models the rows and cells of SpreadsheetML worksheets and the
//! relationship plumbing that attaches drawings to them.
//!
//! The [`Workbook`] owns every worksheet tree, the relationship set aligned with each
//! tree, and the drawing parts. [`Sheet`] and [`SheetMut`] are short-lived views selected by
//! a [`SheetId`] handle:
//! - row addressing (`ensure_row`, `add_numbered_row`, `add_row`, `rows`)
//! - on-demand structural validation (`validate`, `validate_with_path`)
//! - drawing attachment (`set_drawing`)
//!
//! Duplicate rows and cells are tolerated while building a sheet and only reported by
//! validation.

mod address;
mod drawing;
mod limits;
pub mod path;
mod relationships;
mod sheet;
mod sheet_meta;
mod workbook;
mod worksheet;

pub use address::{col_to_name, name_to_col, A1ParseError, CellRef};
pub use drawing::{Anchor, DrawingId, DrawingObject, DrawingPart};
pub use limits::{WorksheetLimits, EXCEL_MAX_COLS, EXCEL_MAX_ROWS};
pub use relationships::{DocumentType, Relationship, RelationshipType, Relationships};
pub use sheet::{SetDrawingError, Sheet, SheetId, SheetMut, SheetValidationError};
pub use sheet_meta::{
    validate_sheet_name, SheetMeta, SheetMetaError, SheetMetaIssue, SheetNameError,
    EXCEL_MAX_SHEET_NAME_LEN,
};
pub use workbook::{Workbook, WorkbookValidationError};
pub use worksheet::{Cell, DrawingRef, Row, Worksheet, WorksheetId, WorksheetValidationError};
