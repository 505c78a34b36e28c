use formula_worksheet::{Cell, Row, Workbook, Worksheet};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn worksheet_json_omits_unset_fields() {
    let mut ws = Worksheet::new();
    let mut row = Row::new(Some(1));
    row.push_cell(Cell::at("A1"));
    row.push_cell(Cell::default());
    ws.rows.push(row);
    ws.rows.push(Row::new(None));

    let value = serde_json::to_value(&ws).unwrap();
    assert_eq!(
        value,
        json!({
            "rows": [
                { "number": 1, "cells": [{ "reference": "A1" }, {}] },
                {}
            ]
        })
    );

    let back: Worksheet = serde_json::from_value(value).unwrap();
    assert_eq!(back, ws);
}

#[test]
fn workbook_serializes_aligned_collections() {
    let mut wb = Workbook::new();
    let id = wb.add_sheet("Sheet1");
    let drawing = wb.add_drawing();
    wb.sheet_mut(id).unwrap().set_drawing(drawing).unwrap();

    let value = serde_json::to_value(&wb).unwrap();
    assert_eq!(value["sheets"][0]["meta"]["name"], json!("Sheet1"));
    assert_eq!(value["sheets"][0]["worksheet"], json!(0));
    assert_eq!(value["worksheets"][0]["drawing"]["id"], json!("rId1"));
    assert_eq!(
        value["worksheet_rels"][0][0]["target"],
        json!("../drawings/drawing1.xml")
    );
    assert!(value.get("limits").is_none());
}
