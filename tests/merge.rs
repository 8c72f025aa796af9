mod common;

use common::{catalog_row, stock};
use stock_sync::diagnostics::{CollectingSink, Diagnostic};
use stock_sync::model::Published;
use stock_sync::reconcile::{derive_published, merge_quantities};

#[test]
fn positive_stock_quantity_overwrites_catalog() {
    let stock_rows = vec![stock("54321", 7.0)];
    let mut catalog = vec![catalog_row("54321", 0)];
    let mut sink = CollectingSink::new();

    let report = merge_quantities(&stock_rows, &mut catalog, &mut sink);
    let merged = derive_published(catalog);

    assert_eq!(report.matched, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(merged[0].row.inventory_qty, 7);
    assert_eq!(merged[0].published, Published::True);
    assert!(sink.diagnostics.is_empty());
}

#[test]
fn unmatched_sku_keeps_quantity_and_is_reported() {
    let stock_rows = vec![stock("11111", 3.0)];
    let mut catalog = vec![catalog_row("99999", 4), catalog_row("", 0)];
    let mut sink = CollectingSink::new();

    let report = merge_quantities(&stock_rows, &mut catalog, &mut sink);

    assert_eq!(catalog[0].inventory_qty, 4);
    assert_eq!(report.unmatched, vec!["99999".to_string()]);
    assert_eq!(sink.unmatched_skus(), vec!["99999"]);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn zero_stock_quantity_leaves_catalog_untouched() {
    let stock_rows = vec![stock("22222", 0.0), stock("33333", 0.6)];
    let mut catalog = vec![catalog_row("22222", 5), catalog_row("33333", 0)];

    let report = merge_quantities(&stock_rows, &mut catalog, &mut CollectingSink::new());
    let merged = derive_published(catalog);

    assert_eq!(report.matched, 2);
    assert_eq!(report.updated, 0);
    assert_eq!(merged[0].row.inventory_qty, 5);
    assert_eq!(merged[0].published, Published::True);
    assert_eq!(merged[1].row.inventory_qty, 0);
    assert_eq!(merged[1].published, Published::False);
}

#[test]
fn duplicate_stock_codes_resolve_to_the_last_row() {
    let stock_rows = vec![stock("44444", 2.0), stock("44444-B", 9.0)];
    let mut catalog = vec![catalog_row("44444", 0)];
    let mut sink = CollectingSink::new();

    merge_quantities(&stock_rows, &mut catalog, &mut sink);

    assert_eq!(catalog[0].inventory_qty, 9);
    assert_eq!(
        sink.diagnostics,
        vec![Diagnostic::DuplicateCode {
            code: "44444".to_string(),
            previous: 2.0,
            replacement: 9.0,
        }]
    );
}

#[test]
fn merge_preserves_row_order_and_count() {
    let stock_rows = vec![stock("00002", 8.0), stock("00001", 6.0)];
    let mut catalog = vec![
        catalog_row("00001", 0),
        catalog_row("00003", 1),
        catalog_row("00002", 0),
    ];

    merge_quantities(&stock_rows, &mut catalog, &mut CollectingSink::new());

    let skus: Vec<_> = catalog.iter().map(|row| row.sku.as_str()).collect();
    let quantities: Vec<_> = catalog.iter().map(|row| row.inventory_qty).collect();
    assert_eq!(skus, vec!["00001", "00003", "00002"]);
    assert_eq!(quantities, vec![6, 1, 8]);
}

#[test]
fn negative_quantity_yields_blank_flag() {
    let mut row = catalog_row("12345", 0);
    row.inventory_qty = -1;
    let merged = derive_published(vec![row, catalog_row("12346", 0)]);

    assert_eq!(merged[0].published, Published::Blank);
    assert_eq!(merged[0].published.as_str(), "");
    assert_eq!(merged[1].published, Published::False);
}
