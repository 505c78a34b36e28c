use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drawing::DrawingId;
use crate::relationships::{DocumentType, RelationshipType, Relationships};
use crate::sheet_meta::{SheetMeta, SheetMetaError};
use crate::worksheet::{Cell, DrawingRef, Row, Worksheet, WorksheetId, WorksheetValidationError};
use crate::workbook::{SheetEntry, Workbook};

/// Handle to a sheet entry owned by a [`Workbook`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(pub(crate) usize);

impl SheetId {
    /// 0-based position in the workbook's sheet list (tab order).
    pub fn index(self) -> usize {
        self.0
    }
}

/// Errors reported by [`Sheet::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SheetValidationError {
    #[error("'{sheet}' reused row {row}")]
    DuplicateRow { sheet: String, row: u32 },
    #[error("'{sheet}' reused cell {cell}")]
    DuplicateCell { sheet: String, cell: String },
    #[error("'{sheet}' references drawing relationship {id} which is not registered")]
    DanglingDrawing { sheet: String, id: String },
    #[error(transparent)]
    Metadata(#[from] SheetMetaError),
    #[error(transparent)]
    Worksheet(#[from] WorksheetValidationError),
}

/// Errors reported by [`SheetMut::set_drawing`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetDrawingError {
    #[error("drawing {} is not tracked by this workbook", .0.index())]
    DrawingNotFound(DrawingId),
    #[error("worksheet {} is not tracked by this workbook", .0.index())]
    WorksheetNotFound(WorksheetId),
}

/// Read-only view of one sheet.
#[derive(Copy, Clone, Debug)]
pub struct Sheet<'a> {
    workbook: &'a Workbook,
    id: SheetId,
}

impl<'a> Sheet<'a> {
    /// Callers must have checked `id` against `workbook.sheets`.
    pub(crate) fn new(workbook: &'a Workbook, id: SheetId) -> Self {
        Self { workbook, id }
    }

    fn entry(&self) -> &'a SheetEntry {
        &self.workbook.sheets[self.id.0]
    }

    pub fn id(&self) -> SheetId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.entry().meta.name
    }

    pub fn meta(&self) -> &'a SheetMeta {
        &self.entry().meta
    }

    pub fn worksheet_id(&self) -> WorksheetId {
        self.entry().worksheet
    }

    /// The worksheet tree backing this sheet.
    pub fn worksheet(&self) -> &'a Worksheet {
        // Worksheets are never removed, so every sheet entry's index stays valid.
        &self.workbook.worksheets[self.entry().worksheet.0]
    }

    /// Relationship set of the worksheet part.
    pub fn relationships(&self) -> &'a Relationships {
        &self.workbook.worksheet_rels[self.entry().worksheet.0]
    }

    /// Rows in stored (insertion) order, not sorted by row number.
    pub fn rows(&self) -> &'a [Row] {
        &self.worksheet().rows
    }

    /// First row carrying `row_number`, if any.
    pub fn row(&self, row_number: u32) -> Option<&'a Row> {
        self.rows()
            .iter()
            .find(|row| row.number() == Some(row_number))
    }

    /// Row number the next [`SheetMut::add_row`] call will assign.
    pub fn next_row_number(&self) -> u32 {
        self.rows()
            .iter()
            .filter_map(Row::number)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }

    /// Drawing currently referenced by the worksheet, resolved through its relationship set.
    pub fn drawing(&self) -> Option<DrawingId> {
        let drawing = self.worksheet().drawing.as_ref()?;
        let rel = self.relationships().get(&drawing.id)?;
        let part = rel.resolved_target(&self.workbook.worksheet_part_name(self.worksheet_id()));
        let index = part
            .strip_prefix("xl/drawings/drawing")?
            .strip_suffix(".xml")?
            .parse::<usize>()
            .ok()?
            .checked_sub(1)?;
        (index < self.workbook.drawings.len()).then_some(DrawingId(index))
    }

    /// Check row/cell uniqueness, then the metadata record, then the worksheet tree itself.
    ///
    /// The first failure is returned. Rows without a number and cells without an address are
    /// never treated as duplicates.
    pub fn validate(&self) -> Result<(), SheetValidationError> {
        let worksheet = self.worksheet();

        let mut used_rows = HashSet::new();
        for row in &worksheet.rows {
            if let Some(number) = row.number() {
                if !used_rows.insert(number) {
                    return Err(SheetValidationError::DuplicateRow {
                        sheet: self.name().to_string(),
                        row: number,
                    });
                }
            }

            let mut used_cells = HashSet::new();
            for reference in row.cells().iter().filter_map(Cell::reference) {
                if !used_cells.insert(reference) {
                    return Err(SheetValidationError::DuplicateCell {
                        sheet: self.name().to_string(),
                        cell: reference.to_string(),
                    });
                }
            }
        }

        self.meta().validate()?;
        worksheet.validate(self.workbook.limits())?;

        if let Some(drawing) = &worksheet.drawing {
            if !self.relationships().contains_id(&drawing.id) {
                return Err(SheetValidationError::DanglingDrawing {
                    sheet: self.name().to_string(),
                    id: drawing.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Validate only the sheet metadata record, reporting errors under `path`.
    ///
    /// Unlike [`Sheet::validate`] this does not look at rows, cells or the worksheet tree.
    pub fn validate_with_path(&self, path: &str) -> Result<(), SheetMetaError> {
        self.meta().validate_with_path(path)
    }
}

/// Mutable view of one sheet.
#[derive(Debug)]
pub struct SheetMut<'a> {
    workbook: &'a mut Workbook,
    id: SheetId,
}

impl<'a> SheetMut<'a> {
    /// Callers must have checked `id` against `workbook.sheets`.
    pub(crate) fn new(workbook: &'a mut Workbook, id: SheetId) -> Self {
        Self { workbook, id }
    }

    /// Reborrow as a read-only [`Sheet`].
    pub fn as_sheet(&self) -> Sheet<'_> {
        Sheet::new(self.workbook, self.id)
    }

    pub fn id(&self) -> SheetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.workbook.sheets[self.id.0].meta.name
    }

    /// Rename the sheet. Uniqueness across the workbook is checked by
    /// [`Workbook::validate`], not here.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.workbook.sheets[self.id.0].meta.name = name.into();
    }

    pub fn rows(&self) -> &[Row] {
        &self.worksheet().rows
    }

    pub fn worksheet(&self) -> &Worksheet {
        &self.workbook.worksheets[self.workbook.sheets[self.id.0].worksheet.0]
    }

    pub fn worksheet_mut(&mut self) -> &mut Worksheet {
        let idx = self.workbook.sheets[self.id.0].worksheet.0;
        &mut self.workbook.worksheets[idx]
    }

    /// Return the first row numbered `row_number`, appending one if none exists.
    pub fn ensure_row(&mut self, row_number: u32) -> &mut Row {
        let existing = self
            .rows()
            .iter()
            .position(|row| row.number() == Some(row_number));
        match existing {
            Some(idx) => &mut self.worksheet_mut().rows[idx],
            None => self.add_numbered_row(row_number),
        }
    }

    /// Append a row numbered `row_number`.
    ///
    /// No duplicate check is made: reusing a number yields a sheet that fails
    /// [`Sheet::validate`]. Use [`SheetMut::ensure_row`] to find-or-create instead.
    pub fn add_numbered_row(&mut self, row_number: u32) -> &mut Row {
        let rows = &mut self.worksheet_mut().rows;
        rows.push(Row::new(Some(row_number)));
        let last = rows.len() - 1;
        &mut rows[last]
    }

    /// Append a row numbered one past the largest existing row number.
    pub fn add_row(&mut self) -> &mut Row {
        let next = self.as_sheet().next_row_number();
        self.add_numbered_row(next)
    }

    /// Point the worksheet at `drawing` through a new relationship and return its id.
    ///
    /// Every successful call registers a fresh relationship; a previously referenced
    /// drawing's relationship is left in place but no longer referenced. When either the
    /// drawing or the worksheet is unknown to this workbook nothing is modified.
    pub fn set_drawing(&mut self, drawing: DrawingId) -> Result<String, SetDrawingError> {
        let worksheet_id = self.workbook.sheets[self.id.0].worksheet;

        if drawing.0 >= self.workbook.drawings.len() {
            log::warn!(
                "sheet '{}': drawing {} is not tracked by the workbook",
                self.name(),
                drawing.0
            );
            return Err(SetDrawingError::DrawingNotFound(drawing));
        }

        let wb = &mut *self.workbook;
        let (Some(worksheet), Some(rels)) = (
            wb.worksheets.get_mut(worksheet_id.0),
            wb.worksheet_rels.get_mut(worksheet_id.0),
        ) else {
            log::warn!(
                "sheet '{}': worksheet {} is not tracked by the workbook",
                wb.sheets[self.id.0].meta.name,
                worksheet_id.0
            );
            return Err(SetDrawingError::WorksheetNotFound(worksheet_id));
        };

        let id = rels
            .add_auto_relationship(
                DocumentType::Spreadsheet,
                drawing.part_number(),
                RelationshipType::Drawing,
            )
            .id()
            .to_string();
        worksheet.drawing = Some(DrawingRef { id: id.clone() });

        log::debug!(
            "sheet '{}' linked to drawing{}.xml via {id}",
            wb.sheets[self.id.0].meta.name,
            drawing.part_number()
        );
        Ok(id)
    }
}
