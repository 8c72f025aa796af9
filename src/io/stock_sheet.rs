use std::path::Path;

use tracing::{debug, instrument};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Result, SyncError};
use crate::io::{
    cell_at, cell_to_number, cell_to_string, column_count, is_blank_row, read_first_sheet,
};
use crate::model::{CODE_LEN, SkuCode, StockRow, sku_digits};

/// Column holding the SKU-like identifier.
pub const CODE_COLUMN: usize = 0;
/// Column holding the counted quantity. Column 1 is not read.
pub const QTY_COLUMN: usize = 2;

const SOURCE: &str = "stock sheet";

/// Reads the first worksheet of the stock-count spreadsheet at `path`.
///
/// The first row is treated as the header. Every data row is reduced to a
/// [`StockRow`]; rows whose identifier does not yield a five-digit code, or
/// whose quantity is not numeric, are dropped and reported to `sink`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_stock_sheet(path: &Path, sink: &mut dyn DiagnosticSink) -> Result<Vec<StockRow>> {
    let range = read_first_sheet(path)?;
    if range.is_empty() {
        return Err(SyncError::schema(path, "stock sheet has no header row"));
    }

    let width = column_count(&range);
    if width <= QTY_COLUMN {
        return Err(SyncError::schema(
            path,
            format!(
                "stock sheet needs at least {} columns, found {width}",
                QTY_COLUMN + 1
            ),
        ));
    }

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = Vec::new();

    for (index, row) in range.rows().enumerate().skip(1) {
        if is_blank_row(row) {
            continue;
        }
        // One-based, as shown by spreadsheet tools.
        let sheet_row = first_row + index + 1;

        let raw = cell_to_string(cell_at(&range, row, CODE_COLUMN));
        let Some(code) = SkuCode::normalize(&raw) else {
            let digits = sku_digits(&raw);
            sink.report(Diagnostic::DroppedStockRow {
                row: sheet_row,
                raw,
                reason: format!(
                    "code '{digits}' has {} digits, expected {CODE_LEN}",
                    digits.len()
                ),
            });
            continue;
        };

        let qty_cell = cell_at(&range, row, QTY_COLUMN);
        let Some(qty) = cell_to_number(qty_cell) else {
            sink.report(Diagnostic::Coercion {
                source: SOURCE,
                row: sheet_row,
                column: "Qty",
                value: cell_to_string(qty_cell),
                reason: "not a number",
                substituted: "row dropped",
            });
            continue;
        };

        rows.push(StockRow { code, qty });
    }

    debug!(kept = rows.len(), "stock sheet normalized");
    Ok(rows)
}
