use serde::{Deserialize, Serialize};

/// Excel-compatible maximum rows per worksheet (1,048,576).
pub const EXCEL_MAX_ROWS: u32 = 1_048_576;

/// Excel-compatible maximum columns per worksheet (16,384).
pub const EXCEL_MAX_COLS: u32 = 16_384;

/// Grid bounds enforced by worksheet validation.
///
/// Missing fields deserialize to the Excel defaults, so `{}` is a valid payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorksheetLimits {
    /// Largest 1-based row number a row or cell address may use.
    pub max_rows: u32,
    /// Number of addressable columns (`A` .. column `max_cols`).
    pub max_cols: u32,
}

impl Default for WorksheetLimits {
    fn default() -> Self {
        Self {
            max_rows: EXCEL_MAX_ROWS,
            max_cols: EXCEL_MAX_COLS,
        }
    }
}

impl WorksheetLimits {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_excel_bounds() {
        let limits: WorksheetLimits = serde_json::from_str(r#"{"max_rows": 500}"#).unwrap();
        assert_eq!(limits.max_rows, 500);
        assert_eq!(limits.max_cols, EXCEL_MAX_COLS);
        assert!(!limits.is_default());

        let limits: WorksheetLimits = serde_json::from_str("{}").unwrap();
        assert!(limits.is_default());
    }
}
