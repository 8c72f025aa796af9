use std::fmt;

/// Number of digits kept when deriving a merge key from a raw SKU.
pub const CODE_LEN: usize = 5;

/// A normalized SKU code: always exactly [`CODE_LEN`] ASCII digits.
///
/// Both loaders derive their merge key through [`SkuCode::normalize`], so a
/// stock-sheet row and a catalog row match exactly when their raw SKUs reduce
/// to the same five digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkuCode(String);

impl SkuCode {
    /// Strips every non-digit from `raw`, keeps the first five digits and
    /// accepts the result only when exactly five remain.
    pub fn normalize(raw: &str) -> Option<SkuCode> {
        let digits = sku_digits(raw);
        (digits.len() == CODE_LEN).then_some(SkuCode(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkuCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the digits of `raw`, truncated to at most [`CODE_LEN`] characters.
pub fn sku_digits(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(CODE_LEN)
        .collect()
}

/// Removes a single leading apostrophe, the marker spreadsheet tools prepend
/// to force a cell to be treated as text.
pub fn strip_text_marker(raw: &str) -> &str {
    raw.strip_prefix('\'').unwrap_or(raw)
}

/// Normalizes a catalog `Variant SKU` cell: strips the text marker, then
/// reduces it with the same digit rule used for merge keys.
pub fn normalize_catalog_sku(raw: &str) -> String {
    sku_digits(strip_text_marker(raw))
}

/// One cleaned row of the stock-count sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub code: SkuCode,
    pub qty: f64,
}

/// One record of the platform catalog export.
///
/// `cells` holds every column of the source record in header order; the
/// load-bearing columns are additionally exposed through typed fields and are
/// written back from those fields, not from `cells`.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub cells: Vec<String>,
    /// `Variant SKU` after normalization: the text marker removed, then at
    /// most the first five digits. Never starts with an apostrophe.
    pub sku: String,
    /// Merge key; `Some` exactly when `sku` holds five digits.
    pub code: Option<SkuCode>,
    /// `Variant Inventory Qty`, coerced to a non-negative integer.
    pub inventory_qty: i64,
}

/// Tri-state publication flag derived from the final quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Published {
    True,
    False,
    Blank,
}

impl Published {
    pub fn from_quantity(qty: i64) -> Self {
        match qty {
            q if q > 0 => Published::True,
            0 => Published::False,
            _ => Published::Blank,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Published::True => "TRUE",
            Published::False => "FALSE",
            Published::Blank => "",
        }
    }
}

impl fmt::Display for Published {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog row after quantity reconciliation and flag derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub row: CatalogRow,
    pub published: Published,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_extracts_embedded_digits() {
        let code = SkuCode::normalize("AB-12345-X").expect("five digits");
        assert_eq!(code.as_str(), "12345");
    }

    #[test]
    fn normalize_truncates_long_codes() {
        let code = SkuCode::normalize("1234567").expect("five digits");
        assert_eq!(code.as_str(), "12345");
    }

    #[test]
    fn normalize_rejects_short_codes() {
        assert_eq!(SkuCode::normalize("123"), None);
        assert_eq!(SkuCode::normalize("no digits"), None);
        assert_eq!(sku_digits("A1B2"), "12");
    }

    #[test]
    fn text_marker_is_stripped_once() {
        assert_eq!(strip_text_marker("'54321"), "54321");
        assert_eq!(strip_text_marker("''54321"), "'54321");
        assert_eq!(strip_text_marker("543'21"), "543'21");
    }

    #[test]
    fn catalog_sku_never_keeps_an_apostrophe() {
        assert_eq!(normalize_catalog_sku("'54321"), "54321");
        assert_eq!(normalize_catalog_sku("''11111-L"), "11111");
        assert_eq!(normalize_catalog_sku("'AB"), "");
    }

    #[test]
    fn published_follows_quantity_sign() {
        assert_eq!(Published::from_quantity(3), Published::True);
        assert_eq!(Published::from_quantity(0), Published::False);
        assert_eq!(Published::from_quantity(-1), Published::Blank);
        assert_eq!(Published::Blank.as_str(), "");
    }
}
