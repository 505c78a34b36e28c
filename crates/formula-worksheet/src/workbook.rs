use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::drawing::{DrawingId, DrawingPart};
use crate::relationships::{DocumentType, RelationshipType, Relationships};
use crate::sheet::{Sheet, SheetId, SheetMut, SheetValidationError};
use crate::sheet_meta::SheetMeta;
use crate::worksheet::{Worksheet, WorksheetId};
use crate::WorksheetLimits;

/// A sheet entry: metadata plus the worksheet tree it displays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct SheetEntry {
    pub(crate) meta: SheetMeta,
    pub(crate) worksheet: WorksheetId,
}

/// Errors reported by [`Workbook::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorkbookValidationError {
    #[error(transparent)]
    Sheet(#[from] SheetValidationError),
    #[error("sheet name '{0}' is used more than once")]
    DuplicateSheetName(String),
}

/// Owner of every sheet, worksheet tree, relationship set and drawing.
///
/// `worksheets` and `worksheet_rels` are positionally aligned: the relationship set for
/// `worksheets[i]` is `worksheet_rels[i]`. Neither list ever shrinks, so handles stay valid
/// for the lifetime of the workbook.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Workbook {
    pub(crate) sheets: Vec<SheetEntry>,
    pub(crate) worksheets: Vec<Worksheet>,
    pub(crate) worksheet_rels: Vec<Relationships>,
    pub(crate) drawings: Vec<DrawingPart>,
    /// Relationships owned by `xl/workbook.xml`.
    relationships: Relationships,
    #[serde(skip_serializing_if = "WorksheetLimits::is_default")]
    limits: WorksheetLimits,
}

impl Workbook {
    /// Create a new empty workbook with Excel's grid limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: WorksheetLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> &WorksheetLimits {
        &self.limits
    }

    /// Append a sheet backed by a fresh, empty worksheet tree.
    ///
    /// The name is not validated here; see [`Workbook::validate`].
    pub fn add_sheet(&mut self, name: impl Into<String>) -> SheetId {
        let worksheet = WorksheetId(self.worksheets.len());
        self.worksheets.push(Worksheet::new());
        self.worksheet_rels.push(Relationships::new());

        let rel_id = self
            .relationships
            .add_auto_relationship(
                DocumentType::Spreadsheet,
                worksheet.0 + 1,
                RelationshipType::Worksheet,
            )
            .id()
            .to_string();

        let mut meta = SheetMeta::new(name, self.next_sheet_id());
        meta.relationship_id = Some(rel_id);
        self.push_sheet(meta, worksheet)
    }

    /// Append another sheet entry displaying an existing worksheet tree.
    ///
    /// Both sheets observe and mutate the same rows. Returns `None` if `worksheet` does not
    /// belong to this workbook.
    pub fn add_sheet_for_worksheet(
        &mut self,
        name: impl Into<String>,
        worksheet: WorksheetId,
    ) -> Option<SheetId> {
        if worksheet.0 >= self.worksheets.len() {
            return None;
        }
        let mut meta = SheetMeta::new(name, self.next_sheet_id());
        meta.relationship_id = self
            .sheets
            .iter()
            .find(|entry| entry.worksheet == worksheet)
            .and_then(|entry| entry.meta.relationship_id.clone());
        Some(self.push_sheet(meta, worksheet))
    }

    fn push_sheet(&mut self, meta: SheetMeta, worksheet: WorksheetId) -> SheetId {
        let id = SheetId(self.sheets.len());
        log::debug!(
            "added sheet '{}' (sheetId {}) on worksheet {}",
            meta.name,
            meta.sheet_id,
            worksheet.0
        );
        self.sheets.push(SheetEntry { meta, worksheet });
        id
    }

    fn next_sheet_id(&self) -> u32 {
        self.sheets
            .iter()
            .map(|entry| entry.meta.sheet_id)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }

    pub fn sheet(&self, id: SheetId) -> Option<Sheet<'_>> {
        (id.0 < self.sheets.len()).then(|| Sheet::new(self, id))
    }

    pub fn sheet_mut(&mut self, id: SheetId) -> Option<SheetMut<'_>> {
        if id.0 < self.sheets.len() {
            Some(SheetMut::new(self, id))
        } else {
            None
        }
    }

    /// Find a sheet by name using Excel's case-insensitive comparison.
    pub fn sheet_by_name(&self, name: &str) -> Option<Sheet<'_>> {
        self.sheets
            .iter()
            .position(|entry| sheet_name_eq(&entry.meta.name, name))
            .map(|idx| Sheet::new(self, SheetId(idx)))
    }

    /// Sheets in tab order.
    pub fn sheets(&self) -> impl Iterator<Item = Sheet<'_>> {
        (0..self.sheets.len()).map(move |idx| Sheet::new(self, SheetId(idx)))
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Append an empty drawing part.
    pub fn add_drawing(&mut self) -> DrawingId {
        self.drawings.push(DrawingPart::new());
        DrawingId(self.drawings.len() - 1)
    }

    pub fn drawing(&self, id: DrawingId) -> Option<&DrawingPart> {
        self.drawings.get(id.0)
    }

    pub fn drawing_mut(&mut self, id: DrawingId) -> Option<&mut DrawingPart> {
        self.drawings.get_mut(id.0)
    }

    pub fn drawings(&self) -> &[DrawingPart] {
        &self.drawings
    }

    pub fn worksheet(&self, id: WorksheetId) -> Option<&Worksheet> {
        self.worksheets.get(id.0)
    }

    /// Relationship set aligned with worksheet `id`.
    pub fn worksheet_relationships(&self, id: WorksheetId) -> Option<&Relationships> {
        self.worksheet_rels.get(id.0)
    }

    /// Relationships owned by the workbook part itself.
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Package part name of worksheet `id` (`xl/worksheets/sheet{n}.xml`).
    pub fn worksheet_part_name(&self, id: WorksheetId) -> String {
        format!("xl/worksheets/sheet{}.xml", id.0 + 1)
    }

    /// Validate every sheet in tab order, then require sheet names to be unique
    /// (case-insensitive). A worksheet shared by several sheets is checked once per sheet.
    pub fn validate(&self) -> Result<(), WorkbookValidationError> {
        for sheet in self.sheets() {
            sheet.validate()?;
        }

        let mut seen = HashSet::new();
        for entry in &self.sheets {
            if !seen.insert(sheet_name_casefold(&entry.meta.name)) {
                return Err(WorkbookValidationError::DuplicateSheetName(
                    entry.meta.name.clone(),
                ));
            }
        }
        Ok(())
    }
}

fn sheet_name_casefold(name: &str) -> String {
    name.to_lowercase()
}

fn sheet_name_eq(a: &str, b: &str) -> bool {
    sheet_name_casefold(a) == sheet_name_casefold(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheets_get_sequential_ids_and_workbook_relationships() {
        let mut wb = Workbook::new();
        let a = wb.add_sheet("A");
        let b = wb.add_sheet("B");

        let b = wb.sheet(b).unwrap();
        assert_eq!(b.meta().sheet_id, 2);
        assert_eq!(b.meta().relationship_id.as_deref(), Some("rId2"));
        assert_eq!(
            wb.relationships().get("rId2").unwrap().target(),
            "worksheets/sheet2.xml"
        );
        assert_eq!(wb.sheet(a).unwrap().worksheet_id().index(), 0);
    }

    #[test]
    fn unknown_handles_are_rejected() {
        let mut wb = Workbook::new();
        assert!(wb.sheet(SheetId(0)).is_none());
        assert!(wb.sheet_mut(SheetId(3)).is_none());
        assert!(wb.drawing(DrawingId(0)).is_none());
        assert!(wb.add_sheet_for_worksheet("Alias", WorksheetId(0)).is_none());
    }

    #[test]
    fn lookup_by_name_is_case_insensitive() {
        let mut wb = Workbook::new();
        let id = wb.add_sheet("Budget");
        assert_eq!(wb.sheet_by_name("BUDGET").map(|s| s.id()), Some(id));
        assert!(wb.sheet_by_name("Other").is_none());
    }
}
