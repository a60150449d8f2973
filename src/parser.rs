//! Row-level parsing of delimited sales files into canonical [`SaleRecord`]s.
//!
//! Structural problems (required columns that cannot be located) abort the
//! whole file; everything else degrades to a skipped row with a diagnostic.
//! Splitting is naive on the detected delimiter: a delimiter embedded inside
//! a quoted field is not handled (known limitation, not RFC 4180).

use crate::error::Result;
use crate::header::{resolve_headers, strip_quotes};
use crate::schema::SaleRecord;
use log::warn;
use std::fmt;

/// Why a data row was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Field count differs from the header's column count.
    ColumnCountMismatch { found: usize, expected: usize },
    /// One of product / quantity / price / date is empty after trimming.
    EmptyRequiredField,
    /// A numeric field failed to parse.
    InvalidNumber { field: &'static str, value: String },
}

/// A skipped row, with its 1-based line number in the file (header included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    pub line: usize,
    pub content: String,
    pub reason: SkipReason,
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            SkipReason::ColumnCountMismatch { found, expected } => write!(
                f,
                "Line {} skipped: column count ({}) does not match the header ({})",
                self.line, found, expected
            ),
            SkipReason::EmptyRequiredField => write!(
                f,
                "Line {} skipped: empty value in a required column",
                self.line
            ),
            SkipReason::InvalidNumber { field, value } => write!(
                f,
                "Line {} skipped: invalid {} value '{}'",
                self.line, field, value
            ),
        }
    }
}

/// Outcome of parsing one file: accepted records in input order, plus a
/// diagnostic for every skipped data row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFile {
    pub records: Vec<SaleRecord>,
    pub diagnostics: Vec<RowDiagnostic>,
}

/// Parse raw delimited text into validated sale records.
///
/// Fails only when required columns cannot be resolved from the header; an
/// input with no data rows yields an empty outcome. Skipped rows are logged
/// and reported in [`ParsedFile::diagnostics`].
pub fn parse_sales_csv(raw: &str) -> Result<ParsedFile> {
    let text = raw.trim();
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let text = text.replace('\r', "");

    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 2 {
        return Ok(ParsedFile::default());
    }

    let header = resolve_headers(lines[0])?;

    let mut parsed = ParsedFile::default();
    for (offset, line) in lines[1..].iter().enumerate() {
        // 1-based over data rows; the human-facing line number accounts for
        // the header.
        let row_index = offset + 1;
        let line_number = row_index + 1;

        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line
            .split(header.delimiter)
            .map(|v| strip_quotes(v.trim()))
            .collect();

        if values.len() != header.column_count {
            skip(
                &mut parsed,
                line_number,
                line,
                SkipReason::ColumnCountMismatch {
                    found: values.len(),
                    expected: header.column_count,
                },
            );
            continue;
        }

        let product = values[header.product];
        let quantity_raw = values[header.quantity];
        let price_raw = values[header.price];
        let date = values[header.date];

        if product.is_empty() || quantity_raw.is_empty() || price_raw.is_empty() || date.is_empty()
        {
            skip(&mut parsed, line_number, line, SkipReason::EmptyRequiredField);
            continue;
        }

        let quantity: i64 = match quantity_raw.parse() {
            Ok(q) => q,
            Err(_) => {
                skip(
                    &mut parsed,
                    line_number,
                    line,
                    SkipReason::InvalidNumber {
                        field: "quantity",
                        value: quantity_raw.to_string(),
                    },
                );
                continue;
            }
        };

        // Only the first comma acts as a decimal separator.
        let price: f64 = match price_raw.replacen(',', ".", 1).parse() {
            Ok(p) if !f64::is_nan(p) => p,
            _ => {
                skip(
                    &mut parsed,
                    line_number,
                    line,
                    SkipReason::InvalidNumber {
                        field: "price",
                        value: price_raw.to_string(),
                    },
                );
                continue;
            }
        };

        let optional = |index: Option<usize>| -> Option<String> {
            index
                .map(|i| values[i].to_string())
                .filter(|v| !v.is_empty())
        };

        parsed.records.push(SaleRecord {
            id: header
                .id
                .map(|i| values[i].to_string())
                .unwrap_or_else(|| format!("row-{row_index}")),
            date: date.to_string(),
            product: product.to_string(),
            quantity,
            price,
            transaction_id: header
                .transaction_id
                .map(|i| values[i].to_string())
                .unwrap_or_else(|| format!("trans-{row_index}")),
            category: optional(header.category),
            region: optional(header.region),
        });
    }

    Ok(parsed)
}

fn skip(parsed: &mut ParsedFile, line: usize, content: &str, reason: SkipReason) {
    let diagnostic = RowDiagnostic {
        line,
        content: content.to_string(),
        reason,
    };
    warn!("{diagnostic}");
    parsed.diagnostics.push(diagnostic);
}
