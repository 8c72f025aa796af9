//! Non-fatal events raised while loading and merging.
//!
//! Stages never log directly; they report to the [`DiagnosticSink`] they are
//! handed. The binary wires in [`TracingSink`], tests use [`CollectingSink`]
//! to assert on what was reported.

use tracing::{debug, warn};

/// A recoverable issue encountered by one of the pipeline stages.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A value could not be read as expected and was replaced or discarded.
    Coercion {
        source: &'static str,
        row: usize,
        column: &'static str,
        value: String,
        reason: &'static str,
        substituted: &'static str,
    },
    /// A stock-sheet row whose identifier did not reduce to a full code.
    DroppedStockRow {
        row: usize,
        raw: String,
        reason: String,
    },
    /// A later stock-sheet row replaced the quantity of an earlier one.
    DuplicateCode {
        code: String,
        previous: f64,
        replacement: f64,
    },
    /// A catalog record carried more cells than the header names. The extra
    /// cells are not written back.
    ExtraCells { row: usize, values: Vec<String> },
    /// A catalog SKU that has no counterpart in the stock sheet. `row` is the
    /// zero-based record index within the catalog.
    UnmatchedSku { row: usize, sku: String },
}

/// Receiver for [`Diagnostic`] events.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::Coercion {
                source,
                row,
                column,
                value,
                reason,
                substituted,
            } if value.trim().is_empty() => {
                debug!(source, row, column, reason, substituted, "empty value defaulted")
            }
            Diagnostic::Coercion {
                source,
                row,
                column,
                value,
                reason,
                substituted,
            } => warn!(
                source,
                row,
                column,
                %value,
                reason,
                substituted,
                "value could not be coerced; default substituted"
            ),
            Diagnostic::DroppedStockRow { row, raw, reason } => {
                debug!(row, %raw, %reason, "dropped stock sheet row")
            }
            Diagnostic::DuplicateCode {
                code,
                previous,
                replacement,
            } => warn!(%code, previous, replacement, "duplicate stock code; last row wins"),
            Diagnostic::ExtraCells { row, values } => {
                warn!(row, ?values, "catalog record is wider than its header; extra cells dropped")
            }
            Diagnostic::UnmatchedSku { row, sku } => {
                warn!(row, %sku, "catalog SKU has no match in stock sheet")
            }
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coercions(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::Coercion { .. }))
    }

    /// SKUs reported as unmatched, in report order.
    pub fn unmatched_skus(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::UnmatchedSku { sku, .. } => Some(sku.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
