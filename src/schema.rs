use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sentinel label reported when a ranking has no data to rank.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    #[schemars(description = "Row identifier, unique within its source batch. Synthesized as 'row-N' (1-based data row) when the input has no id column.")]
    pub id: String,

    #[schemars(description = "Sale date as YYYY-MM-DD text. Validated as non-empty at parse time; rows whose date fails calendar parsing are excluded from date-based metrics only.")]
    pub date: String,

    #[schemars(description = "Product display name, used verbatim as an aggregation key. Case and whitespace are preserved, so inconsistent spellings form distinct buckets.")]
    pub product: String,

    #[schemars(description = "Unit count. Parsed as a base-10 integer; zero and negative values are accepted as-is.")]
    pub quantity: i64,

    #[schemars(description = "Unit price. A decimal comma in the input is converted to a decimal point before parsing.")]
    pub price: f64,

    #[schemars(description = "Groups line items belonging to one transaction for ticket-size averaging. Synthesized as 'trans-N' when the input has no transaction column, making each row its own transaction.")]
    pub transaction_id: String,

    #[schemars(description = "Optional category dimension. Absent rows are excluded from the category breakdown; there is no 'unknown' bucket.")]
    pub category: Option<String>,

    #[schemars(description = "Optional region dimension. Absent rows are excluded from the region breakdown.")]
    pub region: Option<String>,
}

impl SaleRecord {
    /// Revenue contribution of this line item.
    pub fn revenue(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// One source file's worth of parsed records, tagged with its origin label.
///
/// Batches combine by concatenation before aggregation; the batch identity is
/// not preserved into the resulting [`SalesMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SalesBatch {
    pub source: String,
    pub records: Vec<SaleRecord>,
}

impl SalesBatch {
    pub fn new(source: impl Into<String>, records: Vec<SaleRecord>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Immutable aggregate metrics for one analysis run.
///
/// Always derivable purely from the input record set. The grouping maps are
/// insertion-ordered: ranking ties are broken by whichever key first reached
/// the maximum, so iteration order is part of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesMetrics {
    #[schemars(description = "Total revenue: sum of price * quantity over all records.")]
    pub total_sales: f64,

    #[schemars(description = "Total revenue divided by the number of distinct transaction ids. Zero when there are no records.")]
    pub average_ticket: f64,

    #[schemars(description = "Month label with the highest accumulated revenue, e.g. 'novembro de 2024'. 'N/A' when no record carries a parseable date.")]
    pub best_month: String,

    #[schemars(description = "Product with the highest summed unit count. 'N/A' when there are no records.")]
    pub best_selling_product: String,

    #[schemars(description = "Distinct month labels encountered, in first-seen order.")]
    pub analyzed_periods: Vec<String>,

    #[schemars(description = "Category with the highest revenue, or 'N/A' when no record carries a category.")]
    pub highest_revenue_category: String,

    #[schemars(description = "Region with the highest revenue, or 'N/A' when no record carries a region.")]
    pub most_profitable_region: String,

    #[schemars(description = "Percentage change between the last two chronological months. Zero when fewer than two months exist or the earlier month's revenue is not positive.")]
    pub month_over_month_change: f64,

    #[schemars(description = "Revenue per month label, keyed in first-seen order.")]
    pub sales_by_month: IndexMap<String, f64>,

    #[schemars(description = "Units sold per product, keyed in first-seen order.")]
    pub sales_by_product: IndexMap<String, i64>,

    #[schemars(description = "Revenue per category, keyed in first-seen order.")]
    pub sales_by_category: IndexMap<String, f64>,

    #[schemars(description = "Revenue per region, keyed in first-seen order.")]
    pub sales_by_region: IndexMap<String, f64>,
}

impl SalesMetrics {
    /// The snapshot reported for an empty record set: all numbers zero, all
    /// labels `"N/A"`, all maps empty.
    pub fn empty() -> Self {
        Self {
            total_sales: 0.0,
            average_ticket: 0.0,
            best_month: NOT_AVAILABLE.to_string(),
            best_selling_product: NOT_AVAILABLE.to_string(),
            analyzed_periods: Vec::new(),
            highest_revenue_category: NOT_AVAILABLE.to_string(),
            most_profitable_region: NOT_AVAILABLE.to_string(),
            month_over_month_change: 0.0,
            sales_by_month: IndexMap::new(),
            sales_by_product: IndexMap::new(),
            sales_by_category: IndexMap::new(),
            sales_by_region: IndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_shape() {
        let metrics = SalesMetrics::empty();
        assert_eq!(metrics.total_sales, 0.0);
        assert_eq!(metrics.average_ticket, 0.0);
        assert_eq!(metrics.best_month, NOT_AVAILABLE);
        assert_eq!(metrics.best_selling_product, NOT_AVAILABLE);
        assert!(metrics.analyzed_periods.is_empty());
        assert!(metrics.sales_by_month.is_empty());
        assert!(metrics.sales_by_product.is_empty());
        assert!(metrics.sales_by_category.is_empty());
        assert!(metrics.sales_by_region.is_empty());
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = SaleRecord {
            id: "row-1".to_string(),
            date: "2024-03-15".to_string(),
            product: "Laptop Pro X".to_string(),
            quantity: 2,
            price: 1999.9,
            transaction_id: "T1".to_string(),
            category: Some("Eletrônicos".to_string()),
            region: None,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("transactionId"));

        let back: SaleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.revenue(), 3999.8);
    }
}
