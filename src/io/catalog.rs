use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, instrument};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Result, SyncError};
use crate::io::{ensure_exists, extension_of, parse_number};
use crate::model::{CatalogRow, MergedRow, SkuCode, normalize_catalog_sku};

pub const SKU_HEADER: &str = "Variant SKU";
pub const QTY_HEADER: &str = "Variant Inventory Qty";
pub const PUBLISHED_HEADER: &str = "Published";

const SOURCE: &str = "catalog";

/// Header row of a catalog export together with the positions of the columns
/// the reconciliation reads and rewrites.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogColumns {
    pub headers: Vec<String>,
    pub sku: usize,
    pub qty: usize,
}

impl CatalogColumns {
    /// Locates the required columns, failing when either is absent.
    pub fn resolve(path: &Path, headers: Vec<String>) -> Result<Self> {
        let find = |name: &str| {
            position_of(&headers, name).ok_or_else(|| {
                SyncError::schema(path, format!("missing required column '{name}'"))
            })
        };
        let sku = find(SKU_HEADER)?;
        let qty = find(QTY_HEADER)?;
        Ok(Self { headers, sku, qty })
    }

    pub fn published(&self) -> Option<usize> {
        position_of(&self.headers, PUBLISHED_HEADER)
    }

    /// Headers of the written catalog: the input headers, plus `Published`
    /// when the export did not already carry it.
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        if self.published().is_none() {
            headers.push(PUBLISHED_HEADER.to_string());
        }
        headers
    }
}

/// A loaded catalog export.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTable {
    pub columns: CatalogColumns,
    pub rows: Vec<CatalogRow>,
}

/// Reads the platform catalog export at `path`.
///
/// Every column and the record order are preserved. `Variant SKU` loses a
/// single leading apostrophe and is reduced to its first five digits, which
/// also form the merge key; `Variant Inventory Qty` is coerced to a non-negative integer, with every
/// substitution reported to `sink`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_catalog(path: &Path, sink: &mut dyn DiagnosticSink) -> Result<CatalogTable> {
    ensure_exists(path)?;
    let extension = extension_of(path);
    if extension != "csv" && extension != "txt" {
        return Err(SyncError::unsupported(
            path,
            format!("expected delimited text, found extension '{extension}'"),
        ));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = CatalogColumns::resolve(path, headers)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(index + 2);
        rows.push(normalize_record(&columns, &record, line, sink));
    }

    debug!(rows = rows.len(), "catalog normalized");
    Ok(CatalogTable { columns, rows })
}

fn normalize_record(
    columns: &CatalogColumns,
    record: &StringRecord,
    line: usize,
    sink: &mut dyn DiagnosticSink,
) -> CatalogRow {
    let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
    let width = columns.headers.len();
    if cells.len() > width {
        let extra = cells.split_off(width);
        sink.report(Diagnostic::ExtraCells {
            row: line,
            values: extra,
        });
    }
    cells.resize(width, String::new());

    let sku = normalize_catalog_sku(&cells[columns.sku]);
    let code = SkuCode::normalize(&sku);

    let raw_qty = &cells[columns.qty];
    let inventory_qty = match coerce_quantity(raw_qty) {
        Ok(qty) => qty,
        Err(reason) => {
            sink.report(Diagnostic::Coercion {
                source: SOURCE,
                row: line,
                column: QTY_HEADER,
                value: raw_qty.clone(),
                reason,
                substituted: "0",
            });
            0
        }
    };

    CatalogRow {
        cells,
        sku,
        code,
        inventory_qty,
    }
}

/// Parses an inventory quantity, truncating toward zero.
///
/// Returns the reason when the value has to be replaced by zero.
pub fn coerce_quantity(raw: &str) -> std::result::Result<i64, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("missing");
    }
    match parse_number(trimmed) {
        None => Err("not a number"),
        Some(value) if value < 0.0 => Err("negative"),
        Some(value) => Ok(value.trunc() as i64),
    }
}

/// Writes the reconciled catalog to `path`.
///
/// `Variant SKU`, `Variant Inventory Qty` and `Published` are rendered from
/// the typed fields of each row; every other cell is written as loaded.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = rows.len()))]
pub fn write_catalog(path: &Path, columns: &CatalogColumns, rows: &[MergedRow]) -> Result<()> {
    let headers = columns.output_headers();
    let published = columns.published().unwrap_or(columns.headers.len());

    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(&headers)?;

    for merged in rows {
        let mut cells = merged.row.cells.clone();
        cells.resize(headers.len(), String::new());
        cells[columns.sku] = merged.row.sku.clone();
        cells[columns.qty] = merged.row.inventory_qty.to_string();
        cells[published] = merged.published.as_str().to_string();
        writer.write_record(&cells)?;
    }

    writer.flush()?;
    Ok(())
}

fn position_of(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|header| header.trim() == name)
}

#[cfg(test)]
mod tests {
    use super::coerce_quantity;

    #[test]
    fn quantities_truncate_toward_zero() {
        assert_eq!(coerce_quantity("7"), Ok(7));
        assert_eq!(coerce_quantity(" 3.9 "), Ok(3));
        assert_eq!(coerce_quantity("0"), Ok(0));
    }

    #[test]
    fn invalid_quantities_report_a_reason() {
        assert_eq!(coerce_quantity("oops"), Err("not a number"));
        assert_eq!(coerce_quantity(""), Err("missing"));
        assert_eq!(coerce_quantity("-4"), Err("negative"));
        assert_eq!(coerce_quantity("NaN"), Err("not a number"));
    }
}
