//! Header-line analysis: delimiter detection, cell normalization and
//! resolution of the canonical semantic columns via a bilingual alias table.

use crate::error::{Result, SalesDataError};

const PRODUCT_ALIASES: &[&str] = &["product", "produto"];
const QUANTITY_ALIASES: &[&str] = &["quantity", "quantidade", "qtd"];
const PRICE_ALIASES: &[&str] = &[
    "price",
    "preco",
    "preço",
    "valor",
    "valor unitário",
    "valor unitario",
    "preço unitário",
    "preco unitario",
    "unit price",
];
const DATE_ALIASES: &[&str] = &["date", "data"];
const ID_ALIASES: &[&str] = &["id"];
const TRANSACTION_ID_ALIASES: &[&str] = &["transactionid", "transaction id"];
const CATEGORY_ALIASES: &[&str] = &["category", "categoria"];
const REGION_ALIASES: &[&str] = &["region", "regiao", "região"];

/// Resolved column layout for one file.
///
/// Indices point into the split header row. Optional columns are `None` when
/// no alias matched. Duplicate aliases resolve to the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    pub delimiter: char,
    pub column_count: usize,
    pub product: usize,
    pub quantity: usize,
    pub price: usize,
    pub date: usize,
    pub id: Option<usize>,
    pub transaction_id: Option<usize>,
    pub category: Option<usize>,
    pub region: Option<usize>,
}

/// Choose the delimiter from the header line alone: semicolon only when it
/// strictly outnumbers comma. Not re-evaluated per data row.
pub fn detect_delimiter(header_line: &str) -> char {
    let commas = header_line.matches(',').count();
    let semicolons = header_line.matches(';').count();
    if semicolons > commas {
        ';'
    } else {
        ','
    }
}

/// Remove at most one leading and one trailing double quote.
pub(crate) fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Canonical form of a header cell: trimmed, lowercased, one quote layer
/// removed, `.` and `_` treated as spaces, whitespace runs collapsed.
pub fn normalize_header_cell(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let unquoted = strip_quotes(&lowered);
    let spaced: String = unquoted
        .chars()
        .map(|c| if c == '.' || c == '_' { ' ' } else { c })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.contains(&h.as_str()))
}

/// Resolve the canonical columns from a raw header line.
///
/// Fails with [`SalesDataError::MissingColumns`] naming every required field
/// that has no matching alias; optional columns are simply recorded as absent.
pub fn resolve_headers(header_line: &str) -> Result<HeaderMap> {
    let delimiter = detect_delimiter(header_line);
    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(normalize_header_cell)
        .collect();

    let required = [
        ("product", PRODUCT_ALIASES),
        ("quantity", QUANTITY_ALIASES),
        ("price", PRICE_ALIASES),
        ("date", DATE_ALIASES),
    ];

    let mut resolved = [0usize; 4];
    let mut missing = Vec::new();
    for (slot, (name, aliases)) in required.iter().enumerate() {
        match find_column(&headers, aliases) {
            Some(index) => resolved[slot] = index,
            None => missing.push((*name).to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(SalesDataError::MissingColumns(missing));
    }

    Ok(HeaderMap {
        delimiter,
        column_count: headers.len(),
        product: resolved[0],
        quantity: resolved[1],
        price: resolved[2],
        date: resolved[3],
        id: find_column(&headers, ID_ALIASES),
        transaction_id: find_column(&headers, TRANSACTION_ID_ALIASES),
        category: find_column(&headers, CATEGORY_ALIASES),
        region: find_column(&headers, REGION_ALIASES),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_prefers_comma_on_tie() {
        assert_eq!(detect_delimiter("a,b;c"), ',');
        assert_eq!(detect_delimiter("a;b;c,d"), ';');
        assert_eq!(detect_delimiter("product"), ',');
    }

    #[test]
    fn test_normalize_header_cell() {
        assert_eq!(normalize_header_cell("  \"Unit_Price\"  "), "unit price");
        assert_eq!(normalize_header_cell("transaction.id"), "transaction id");
        assert_eq!(normalize_header_cell("Preço   Unitário"), "preço unitário");
        assert_eq!(normalize_header_cell("PRODUTO"), "produto");
    }

    #[test]
    fn test_resolves_portuguese_aliases() {
        let map = resolve_headers("produto,quantidade,preço,data").unwrap();
        assert_eq!(map.delimiter, ',');
        assert_eq!(map.product, 0);
        assert_eq!(map.quantity, 1);
        assert_eq!(map.price, 2);
        assert_eq!(map.date, 3);
        assert_eq!(map.id, None);
        assert_eq!(map.category, None);
    }

    #[test]
    fn test_optional_columns_resolved() {
        let map =
            resolve_headers("id,transaction_id,product,quantity,price,date,category,region")
                .unwrap();
        assert_eq!(map.id, Some(0));
        assert_eq!(map.transaction_id, Some(1));
        assert_eq!(map.category, Some(6));
        assert_eq!(map.region, Some(7));
    }

    #[test]
    fn test_collects_every_missing_field() {
        let err = resolve_headers("sku,amount").unwrap_err();
        match err {
            SalesDataError::MissingColumns(fields) => {
                assert_eq!(fields, vec!["product", "quantity", "price", "date"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_header_first_match_wins() {
        let map = resolve_headers("date,data,product,quantity,price").unwrap();
        assert_eq!(map.date, 0);
    }
}
