use std::path::Path;

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook};
use tracing::instrument;

use crate::error::{Result, SyncError};
use crate::io::{
    cell_at, cell_to_number, cell_to_string, column_count, is_blank_row, read_first_sheet,
};
use crate::model::{SkuCode, StockRow};

pub const CODE_HEADER: &str = "Code";
pub const QTY_HEADER: &str = "Qty";
pub const AUDIT_SHEET: &str = "Sheet1";

/// Writes the cleaned stock sheet as a two-column workbook.
///
/// Codes are stored as text so leading zeros survive a reload. The document
/// creation time is pinned so unchanged input gives a byte-identical file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = rows.len()))]
pub fn write_audit_copy(path: &Path, rows: &[StockRow]) -> Result<()> {
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);

    let mut workbook = Workbook::new();
    workbook.set_properties(&properties);
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(AUDIT_SHEET)?;

    worksheet.write_string(0, 0, CODE_HEADER)?;
    worksheet.write_string(0, 1, QTY_HEADER)?;

    for (row_idx, row) in rows.iter().enumerate() {
        let sheet_row = (row_idx + 1) as u32;
        worksheet.write_string(sheet_row, 0, row.code.as_str())?;
        worksheet.write_number(sheet_row, 1, row.qty)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Reads back a workbook produced by [`write_audit_copy`].
///
/// Unlike the stock-sheet loader this is strict: any row that is not a valid
/// code/quantity pair is a schema error.
pub fn read_audit_copy(path: &Path) -> Result<Vec<StockRow>> {
    let range = read_first_sheet(path)?;
    if column_count(&range) < 2 {
        return Err(SyncError::schema(path, "audit copy needs Code and Qty columns"));
    }

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| SyncError::schema(path, "audit copy has no header row"))?;
    let code_header = cell_to_string(cell_at(&range, header, 0));
    let qty_header = cell_to_string(cell_at(&range, header, 1));
    if code_header != CODE_HEADER || qty_header != QTY_HEADER {
        return Err(SyncError::schema(
            path,
            format!(
                "expected headers '{CODE_HEADER}', '{QTY_HEADER}', \
                 found '{code_header}', '{qty_header}'"
            ),
        ));
    }

    let mut stock = Vec::new();
    for (index, row) in rows.enumerate() {
        if is_blank_row(row) {
            continue;
        }
        let raw = cell_to_string(cell_at(&range, row, 0));
        let code = SkuCode::normalize(&raw)
            .filter(|code| code.as_str() == raw)
            .ok_or_else(|| {
                SyncError::schema(path, format!("row {}: invalid code '{raw}'", index + 2))
            })?;
        let qty = cell_to_number(cell_at(&range, row, 1)).ok_or_else(|| {
            SyncError::schema(path, format!("row {}: quantity is not a number", index + 2))
        })?;
        stock.push(StockRow { code, qty });
    }

    Ok(stock)
}
