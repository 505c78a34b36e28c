use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum sheet name length in UTF-16 code units (Excel-compatible).
pub const EXCEL_MAX_SHEET_NAME_LEN: usize = 31;

const INVALID_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Excel-compatible sheet name problems.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SheetNameError {
    #[error("sheet name cannot be empty")]
    Empty,
    #[error("sheet name is too long ({len} > {max})")]
    TooLong { len: usize, max: usize },
    #[error("sheet name contains invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("sheet name cannot begin or end with an apostrophe")]
    LeadingOrTrailingApostrophe,
}

/// Validate a sheet name against Excel's rules.
pub fn validate_sheet_name(name: &str) -> Result<(), SheetNameError> {
    if name.is_empty() {
        return Err(SheetNameError::Empty);
    }
    let len = name.encode_utf16().count();
    if len > EXCEL_MAX_SHEET_NAME_LEN {
        return Err(SheetNameError::TooLong {
            len,
            max: EXCEL_MAX_SHEET_NAME_LEN,
        });
    }
    if let Some(ch) = name.chars().find(|ch| INVALID_SHEET_NAME_CHARS.contains(ch)) {
        return Err(SheetNameError::InvalidCharacter(ch));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(SheetNameError::LeadingOrTrailingApostrophe);
    }
    Ok(())
}

/// A single problem with a [`SheetMeta`] record.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SheetMetaIssue {
    #[error(transparent)]
    Name(#[from] SheetNameError),
    #[error("sheet id must be at least 1")]
    ZeroSheetId,
}

impl SheetMetaIssue {
    /// Attribute the issue was found on.
    pub fn field(&self) -> &'static str {
        match self {
            SheetMetaIssue::Name(_) => "name",
            SheetMetaIssue::ZeroSheetId => "sheetId",
        }
    }
}

/// Error returned by [`SheetMeta::validate`] and [`SheetMeta::validate_with_path`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SheetMetaError {
    #[error(transparent)]
    Invalid(SheetMetaIssue),
    #[error("{path}/{}: {issue}", .issue.field())]
    AtPath { path: String, issue: SheetMetaIssue },
}

impl SheetMetaError {
    pub fn issue(&self) -> &SheetMetaIssue {
        match self {
            SheetMetaError::Invalid(issue) | SheetMetaError::AtPath { issue, .. } => issue,
        }
    }
}

/// Workbook-level sheet record (`<sheet name=".." sheetId=".." r:id=".."/>`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMeta {
    /// Display name shown on the sheet tab.
    pub name: String,
    /// Workbook-unique numeric id (`sheetId`), starting at 1.
    pub sheet_id: u32,
    /// Id of the workbook relationship pointing at the worksheet part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_id: Option<String>,
}

impl SheetMeta {
    pub fn new(name: impl Into<String>, sheet_id: u32) -> Self {
        Self {
            name: name.into(),
            sheet_id,
            relationship_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), SheetMetaError> {
        self.first_issue().map_or(Ok(()), |issue| Err(SheetMetaError::Invalid(issue)))
    }

    /// Same checks as [`SheetMeta::validate`], reporting the offending attribute under `path`.
    pub fn validate_with_path(&self, path: &str) -> Result<(), SheetMetaError> {
        self.first_issue().map_or(Ok(()), |issue| {
            Err(SheetMetaError::AtPath {
                path: path.to_string(),
                issue,
            })
        })
    }

    fn first_issue(&self) -> Option<SheetMetaIssue> {
        if let Err(err) = validate_sheet_name(&self.name) {
            return Some(err.into());
        }
        if self.sheet_id == 0 {
            return Some(SheetMetaIssue::ZeroSheetId);
        }
        None
    }
}
