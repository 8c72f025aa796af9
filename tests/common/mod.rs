#![allow(dead_code)]

use std::fs;
use std::path::Path;

use rust_xlsxwriter::Workbook;
use stock_sync::model::{CatalogRow, SkuCode, StockRow};

/// A cell of a generated spreadsheet fixture.
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Empty,
}

/// Writes a single-sheet workbook whose first row is `headers`.
pub fn write_sheet(path: &Path, headers: &[&str], rows: &[Vec<Cell<'_>>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .expect("header written");
    }
    for (row_idx, row) in rows.iter().enumerate() {
        let sheet_row = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(value) => {
                    worksheet
                        .write_string(sheet_row, col as u16, *value)
                        .expect("text written");
                }
                Cell::Number(value) => {
                    worksheet
                        .write_number(sheet_row, col as u16, *value)
                        .expect("number written");
                }
                Cell::Empty => {}
            }
        }
    }
    workbook.save(path).expect("workbook saved");
}

/// Writes a three-column stock sheet with the given identifier/quantity pairs.
pub fn write_stock_sheet(path: &Path, rows: Vec<(Cell<'_>, Cell<'_>)>) {
    let rows: Vec<Vec<Cell<'_>>> = rows
        .into_iter()
        .map(|(code, qty)| vec![code, Cell::Text("description"), qty])
        .collect();
    write_sheet(path, &["Item", "Description", "Count"], &rows);
}

pub fn write_text(path: &Path, content: &str) {
    fs::write(path, content).expect("fixture written");
}

pub fn stock(code: &str, qty: f64) -> StockRow {
    StockRow {
        code: SkuCode::normalize(code).expect("valid code"),
        qty,
    }
}

pub fn catalog_row(sku: &str, inventory_qty: i64) -> CatalogRow {
    CatalogRow {
        cells: vec![sku.to_string(), inventory_qty.to_string()],
        sku: sku.to_string(),
        code: SkuCode::normalize(sku),
        inventory_qty,
    }
}
