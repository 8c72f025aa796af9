pub mod audit;
pub mod catalog;
pub mod stock_sheet;

use std::path::Path;

use calamine::{DataType, Range, Reader, open_workbook_auto};

use crate::error::{Result, SyncError};

/// Extensions calamine can open.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "xlsb", "xla", "xlam", "ods"];

pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(SyncError::FileNotFound(path.to_path_buf()))
    }
}

pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Opens the workbook at `path` and returns its first worksheet.
pub(crate) fn read_first_sheet(path: &Path) -> Result<Range<DataType>> {
    ensure_exists(path)?;
    let extension = extension_of(path);
    if !SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        return Err(SyncError::unsupported(
            path,
            format!("expected a spreadsheet, found extension '{extension}'"),
        ));
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|err| SyncError::unsupported(path, err.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SyncError::schema(path, "workbook contains no worksheet"))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| SyncError::schema(path, format!("missing sheet '{sheet_name}'")))??;
    Ok(range)
}

/// Number of columns spanned by `range`, counting from column A.
pub(crate) fn column_count(range: &Range<DataType>) -> usize {
    range.end().map(|(_, col)| col as usize + 1).unwrap_or(0)
}

/// Looks up an absolute column index within a row of `range`.
pub(crate) fn cell_at<'a>(
    range: &Range<DataType>,
    row: &'a [DataType],
    column: usize,
) -> Option<&'a DataType> {
    let offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    column.checked_sub(offset).and_then(|idx| row.get(idx))
}

pub(crate) fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

pub(crate) fn cell_to_number(cell: Option<&DataType>) -> Option<f64> {
    match cell {
        Some(DataType::Float(value)) => Some(*value),
        Some(DataType::Int(value)) => Some(*value as f64),
        Some(DataType::String(value)) => parse_number(value),
        _ => None,
    }
    .filter(|value| value.is_finite())
}

/// Parses trimmed text as a finite number.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub(crate) fn is_blank_row(row: &[DataType]) -> bool {
    row.iter()
        .all(|cell| cell_to_string(Some(cell)).trim().is_empty())
}
