use tracing::{info, instrument};

use crate::config::SyncPaths;
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::io::{audit, catalog, stock_sheet};
use crate::reconcile::{derive_published, merge_quantities};

/// Counts describing a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub stock_rows: usize,
    pub catalog_rows: usize,
    pub matched: usize,
    pub updated: usize,
    pub unmatched: Vec<String>,
}

/// Reconciles the catalog export against the stock sheet and writes both
/// outputs.
///
/// Both inputs are loaded and validated before anything is written, so a
/// loader failure leaves no output behind.
#[instrument(
    level = "info",
    skip_all,
    fields(stock = %paths.stock_sheet.display(), catalog = %paths.catalog.display())
)]
pub fn run(paths: &SyncPaths, sink: &mut dyn DiagnosticSink) -> Result<RunSummary> {
    let stock = stock_sheet::read_stock_sheet(&paths.stock_sheet, sink)?;
    info!(rows = stock.len(), "loaded stock sheet");

    let mut table = catalog::read_catalog(&paths.catalog, sink)?;
    info!(rows = table.rows.len(), "loaded catalog export");

    let report = merge_quantities(&stock, &mut table.rows, sink);
    info!(
        matched = report.matched,
        updated = report.updated,
        unmatched = report.unmatched.len(),
        "merged stock quantities into catalog"
    );

    let catalog_rows = table.rows.len();
    let merged = derive_published(table.rows);

    audit::write_audit_copy(&paths.audit_copy, &stock)?;
    catalog::write_catalog(&paths.catalog_output, &table.columns, &merged)?;
    info!(
        audit = %paths.audit_copy.display(),
        output = %paths.catalog_output.display(),
        "wrote reconciled outputs"
    );

    Ok(RunSummary {
        stock_rows: stock.len(),
        catalog_rows,
        matched: report.matched,
        updated: report.updated,
        unmatched: report.unmatched,
    })
}
