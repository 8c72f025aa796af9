//! Quantity merge and publication-flag derivation.

use std::collections::HashMap;

use tracing::debug;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::model::{CatalogRow, MergedRow, Published, SkuCode, StockRow};

/// Outcome of [`merge_quantities`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// Catalog rows whose code was found in the stock sheet.
    pub matched: usize,
    /// Matched rows whose quantity was overwritten.
    pub updated: usize,
    /// Non-empty catalog SKUs with no stock-sheet counterpart, in row order.
    pub unmatched: Vec<String>,
}

/// Builds the code → quantity lookup. When a code repeats, the later row
/// replaces the earlier one and the replacement is reported.
pub fn build_lookup(stock: &[StockRow], sink: &mut dyn DiagnosticSink) -> HashMap<SkuCode, f64> {
    let mut lookup = HashMap::with_capacity(stock.len());
    for row in stock {
        if let Some(previous) = lookup.insert(row.code.clone(), row.qty) {
            sink.report(Diagnostic::DuplicateCode {
                code: row.code.to_string(),
                previous,
                replacement: row.qty,
            });
        }
    }
    lookup
}

/// Left-joins `catalog` against `stock` by normalized code, updating
/// quantities in place.
///
/// A matched row takes the stock quantity (truncated toward zero) only when
/// that quantity is strictly positive; otherwise the loaded quantity stands.
/// Row count and order never change.
pub fn merge_quantities(
    stock: &[StockRow],
    catalog: &mut [CatalogRow],
    sink: &mut dyn DiagnosticSink,
) -> MergeReport {
    let lookup = build_lookup(stock, sink);
    let mut report = MergeReport::default();

    for (index, row) in catalog.iter_mut().enumerate() {
        match row.code.as_ref().and_then(|code| lookup.get(code)) {
            Some(&qty) => {
                report.matched += 1;
                let units = qty.trunc() as i64;
                if units > 0 {
                    row.inventory_qty = units;
                    report.updated += 1;
                }
            }
            None if !row.sku.is_empty() => {
                let sku = row
                    .code
                    .as_ref()
                    .map(SkuCode::to_string)
                    .unwrap_or_else(|| row.sku.clone());
                sink.report(Diagnostic::UnmatchedSku {
                    row: index,
                    sku: sku.clone(),
                });
                report.unmatched.push(sku);
            }
            None => {}
        }
    }

    debug!(
        matched = report.matched,
        updated = report.updated,
        unmatched = report.unmatched.len(),
        "quantities merged"
    );
    report
}

/// Attaches the publication flag derived from each row's final quantity.
pub fn derive_published(rows: Vec<CatalogRow>) -> Vec<MergedRow> {
    rows.into_iter()
        .map(|row| MergedRow {
            published: Published::from_quantity(row.inventory_qty),
            row,
        })
        .collect()
}
