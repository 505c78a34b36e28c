use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::{col_to_name, name_to_col};
use crate::{A1ParseError, CellRef, WorksheetLimits};

/// Handle to a worksheet tree owned by a [`crate::Workbook`].
///
/// The same index addresses the worksheet's relationship set, so the worksheet part name is
/// `xl/worksheets/sheet{index + 1}.xml`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorksheetId(pub(crate) usize);

impl WorksheetId {
    /// 0-based position in the workbook's worksheet list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single cell record (`<c>`). Only the address is modeled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// A1-style address (`r` attribute). `None` means the cell is positioned implicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
}

impl Cell {
    pub fn new(reference: Option<String>) -> Self {
        Self { reference }
    }

    /// Cell with an explicit address.
    pub fn at(reference: impl Into<String>) -> Self {
        Self::new(Some(reference.into()))
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn set_reference(&mut self, reference: Option<String>) {
        self.reference = reference;
    }
}

/// A single row record (`<row>`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// 1-based row number (`r` attribute). `None` means no stable number was assigned yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    number: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(number: Option<u32>) -> Self {
        Self {
            number,
            cells: Vec::new(),
        }
    }

    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// Renumber the row. No uniqueness check is performed; see [`crate::Sheet::validate`].
    pub fn set_number(&mut self, number: Option<u32>) {
        self.number = number;
    }

    /// Cells in stored order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Append `cell` as-is.
    pub fn push_cell(&mut self, cell: Cell) -> &mut Cell {
        self.cells.push(cell);
        let last = self.cells.len() - 1;
        &mut self.cells[last]
    }

    /// Append a cell in the column after the right-most addressed cell of this row.
    ///
    /// Unnumbered rows produce unaddressed cells.
    pub fn add_cell(&mut self) -> &mut Cell {
        let next_col = self
            .cells
            .iter()
            .filter_map(|cell| cell.reference.as_deref().and_then(column_of))
            .max()
            .map_or(0, |col| col.saturating_add(1));
        let reference = self.number.map(|n| format!("{}{n}", col_to_name(next_col)));
        self.push_cell(Cell::new(reference))
    }

    /// Append a cell in `column` (letters, e.g. `"C"`).
    ///
    /// Like [`Row::add_cell`], unnumbered rows produce unaddressed cells. No duplicate check.
    pub fn add_named_cell(&mut self, column: &str) -> &mut Cell {
        let reference = self.number.map(|n| format!("{column}{n}"));
        self.push_cell(Cell::new(reference))
    }

    /// Return the cell addressed `column` + row number, creating it if necessary.
    pub fn ensure_cell(&mut self, column: &str) -> &mut Cell {
        let Some(number) = self.number else {
            return self.add_named_cell(column);
        };
        let wanted = format!("{column}{number}");
        match self
            .cells
            .iter()
            .position(|cell| cell.reference.as_deref() == Some(wanted.as_str()))
        {
            Some(idx) => &mut self.cells[idx],
            None => self.push_cell(Cell::at(wanted)),
        }
    }
}

/// 0-based column of an A1 address, ignoring the row part.
fn column_of(reference: &str) -> Option<u32> {
    let letters = reference.trim_start_matches('$');
    let end = letters
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(letters.len());
    name_to_col(&letters[..end]).ok()
}

/// Worksheet-level reference to its drawing part (`<drawing r:id="..."/>`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingRef {
    /// Relationship id in the worksheet's relationship set.
    pub id: String,
}

/// In-memory worksheet tree: `sheetData` rows plus the optional drawing reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worksheet {
    /// Rows in stored (insertion) order, which need not match numeric order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawing: Option<DrawingRef>,
}

/// Schema-level problems found by [`Worksheet::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorksheetValidationError {
    #[error("row {row} exceeds the maximum of {max} rows")]
    RowOutOfBounds { row: u32, max: u32 },
    #[error("invalid cell reference '{reference}': {source}")]
    InvalidCellReference {
        reference: String,
        #[source]
        source: A1ParseError,
    },
    #[error("drawing reference has an empty relationship id")]
    EmptyDrawingId,
}

impl Worksheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check per-record constraints: row numbers and cell addresses inside `limits`, and a
    /// non-empty drawing relationship id.
    ///
    /// Uniqueness of rows and cells is checked by [`crate::Sheet::validate`], not here.
    pub fn validate(&self, limits: &WorksheetLimits) -> Result<(), WorksheetValidationError> {
        for row in &self.rows {
            if let Some(n) = row.number {
                if n > limits.max_rows {
                    return Err(WorksheetValidationError::RowOutOfBounds {
                        row: n,
                        max: limits.max_rows,
                    });
                }
            }
            for reference in row.cells.iter().filter_map(Cell::reference) {
                CellRef::from_a1_with_limits(reference, limits).map_err(|source| {
                    WorksheetValidationError::InvalidCellReference {
                        reference: reference.to_string(),
                        source,
                    }
                })?;
            }
        }

        if let Some(drawing) = &self.drawing {
            if drawing.id.is_empty() {
                return Err(WorksheetValidationError::EmptyDrawingId);
            }
        }
        Ok(())
    }
}
