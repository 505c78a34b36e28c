use formula_worksheet::{Row, Workbook};
use pretty_assertions::assert_eq;

fn row_numbers(rows: &[Row]) -> Vec<Option<u32>> {
    rows.iter().map(Row::number).collect()
}

#[test]
fn ensure_row_is_idempotent() {
    let mut wb = Workbook::new();
    let id = wb.add_sheet("Sheet1");
    let mut sheet = wb.sheet_mut(id).unwrap();

    let first: *const Row = sheet.ensure_row(3);
    assert_eq!(sheet.rows().len(), 1);

    let second: *const Row = sheet.ensure_row(3);
    assert_eq!(sheet.rows().len(), 1);
    assert!(std::ptr::eq(first, second));
}

#[test]
fn ensure_row_returns_existing_row_with_its_cells() {
    let mut wb = Workbook::new();
    let id = wb.add_sheet("Sheet1");
    let mut sheet = wb.sheet_mut(id).unwrap();

    sheet.add_numbered_row(2).add_named_cell("B");
    sheet.add_numbered_row(9);

    let row = sheet.ensure_row(2);
    assert_eq!(row.cells()[0].reference(), Some("B2"));
    assert_eq!(row_numbers(sheet.rows()), vec![Some(2), Some(9)]);
}

#[test]
fn add_row_numbers_past_the_largest_existing_row() {
    let mut wb = Workbook::new();
    let id = wb.add_sheet("Sheet1");
    let mut sheet = wb.sheet_mut(id).unwrap();

    assert_eq!(sheet.add_row().number(), Some(1));
    assert_eq!(sheet.add_row().number(), Some(2));
    sheet.add_numbered_row(10);
    sheet.add_numbered_row(4);
    assert_eq!(sheet.add_row().number(), Some(11));
    assert_eq!(sheet.as_sheet().next_row_number(), 12);
}

#[test]
fn add_numbered_row_does_not_check_for_duplicates() {
    let mut wb = Workbook::new();
    let id = wb.add_sheet("Sheet1");
    let mut sheet = wb.sheet_mut(id).unwrap();

    sheet.add_numbered_row(5);
    sheet.add_numbered_row(5);
    assert_eq!(row_numbers(sheet.rows()), vec![Some(5), Some(5)]);
}

#[test]
fn rows_preserve_insertion_order() {
    let mut wb = Workbook::new();
    let id = wb.add_sheet("Sheet1");
    let mut sheet = wb.sheet_mut(id).unwrap();

    sheet.add_numbered_row(5);
    sheet.add_numbered_row(2);
    sheet.add_numbered_row(8);

    let sheet = wb.sheet(id).unwrap();
    assert_eq!(row_numbers(sheet.rows()), vec![Some(5), Some(2), Some(8)]);
    assert_eq!(sheet.row(2).and_then(Row::number), Some(2));
    assert!(sheet.row(3).is_none());
}

#[test]
fn set_name_round_trips() {
    let mut wb = Workbook::new();
    let id = wb.add_sheet("Sheet1");

    let mut sheet = wb.sheet_mut(id).unwrap();
    sheet.set_name("Sheet2");
    assert_eq!(sheet.name(), "Sheet2");
    assert_eq!(wb.sheet(id).unwrap().name(), "Sheet2");
}

#[test]
fn sheets_sharing_a_worksheet_see_the_same_rows() {
    let mut wb = Workbook::new();
    let original = wb.add_sheet("Data");
    let worksheet = wb.sheet(original).unwrap().worksheet_id();
    let alias = wb.add_sheet_for_worksheet("Data view", worksheet).unwrap();

    wb.sheet_mut(alias).unwrap().add_row().add_cell();
    wb.sheet_mut(original).unwrap().add_row();

    let original = wb.sheet(original).unwrap();
    let alias = wb.sheet(alias).unwrap();
    assert_eq!(row_numbers(original.rows()), vec![Some(1), Some(2)]);
    assert_eq!(original.rows(), alias.rows());
    assert_eq!(alias.meta().sheet_id, 2);
    assert_eq!(alias.meta().relationship_id, original.meta().relationship_id);
}
