//! Folds validated sale records into a single [`SalesMetrics`] snapshot.
//!
//! Every grouping map is insertion-ordered, and rankings scan those maps with
//! a strict greater-than comparison, so ties resolve to whichever key first
//! reached the maximum. Records whose date fails calendar parsing still count
//! toward revenue, units and ticket size; they are only excluded from the
//! date-based computations.

use crate::error::Result;
use crate::months::{month_label, parse_month_label};
use crate::schema::{SaleRecord, SalesBatch, SalesMetrics, NOT_AVAILABLE};
use chrono::NaiveDate;
use indexmap::IndexMap;
use log::warn;
use std::collections::HashSet;

/// Compute the metrics snapshot for a record set. Never fails: an empty
/// input yields [`SalesMetrics::empty`].
pub fn compute_sales_metrics(records: &[SaleRecord]) -> SalesMetrics {
    if records.is_empty() {
        return SalesMetrics::empty();
    }

    let total_sales: f64 = records.iter().map(SaleRecord::revenue).sum();

    let transactions: HashSet<&str> = records
        .iter()
        .map(|r| r.transaction_id.as_str())
        .collect();
    let average_ticket = if transactions.is_empty() {
        0.0
    } else {
        total_sales / transactions.len() as f64
    };

    let mut sales_by_month: IndexMap<String, f64> = IndexMap::new();
    for record in records {
        match NaiveDate::parse_from_str(&record.date, "%Y-%m-%d") {
            Ok(date) => {
                *sales_by_month.entry(month_label(date)).or_insert(0.0) += record.revenue();
            }
            Err(_) => warn!("Invalid date encountered: {}", record.date),
        }
    }
    let analyzed_periods: Vec<String> = sales_by_month.keys().cloned().collect();
    let best_month = top_key(&sales_by_month);

    let mut sales_by_product: IndexMap<String, i64> = IndexMap::new();
    for record in records {
        *sales_by_product.entry(record.product.clone()).or_insert(0) += record.quantity;
    }
    let best_selling_product = top_key(&sales_by_product);

    let mut sales_by_category: IndexMap<String, f64> = IndexMap::new();
    for record in records {
        if let Some(category) = &record.category {
            *sales_by_category.entry(category.clone()).or_insert(0.0) += record.revenue();
        }
    }
    let highest_revenue_category = top_key(&sales_by_category);

    let mut sales_by_region: IndexMap<String, f64> = IndexMap::new();
    for record in records {
        if let Some(region) = &record.region {
            *sales_by_region.entry(region.clone()).or_insert(0.0) += record.revenue();
        }
    }
    let most_profitable_region = top_key(&sales_by_region);

    let month_over_month_change = month_over_month(&sales_by_month);

    SalesMetrics {
        total_sales,
        average_ticket,
        best_month,
        best_selling_product,
        analyzed_periods,
        highest_revenue_category,
        most_profitable_region,
        month_over_month_change,
        sales_by_month,
        sales_by_product,
        sales_by_category,
        sales_by_region,
    }
}

/// Key with the maximum value; first-inserted key wins ties. `"N/A"` for an
/// empty map.
fn top_key<V: PartialOrd + Copy>(map: &IndexMap<String, V>) -> String {
    let mut best: Option<(&String, V)> = None;
    for (key, &value) in map {
        let replace = match &best {
            None => true,
            Some((_, current)) => value > *current,
        };
        if replace {
            best = Some((key, value));
        }
    }
    best.map(|(key, _)| key.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Percentage change between the last two chronological months. Zero when
/// fewer than two months exist or the earlier month's revenue is not
/// positive.
fn month_over_month(sales_by_month: &IndexMap<String, f64>) -> f64 {
    if sales_by_month.len() < 2 {
        return 0.0;
    }

    let mut ordered: Vec<(&String, f64)> = sales_by_month.iter().map(|(k, &v)| (k, v)).collect();
    ordered.sort_by_key(|(label, _)| parse_month_label(label).unwrap_or((i32::MAX, u32::MAX)));

    let last = ordered[ordered.len() - 1].1;
    let second_last = ordered[ordered.len() - 2].1;
    if second_last > 0.0 {
        (last - second_last) / second_last * 100.0
    } else {
        0.0
    }
}

impl SalesMetrics {
    /// Plain key/value rendering of the snapshot plus per-batch counts, the
    /// blob handed to the narrative-assistant layer as conversational
    /// context.
    pub fn context_summary(&self, batches: &[SalesBatch]) -> Result<String> {
        let files: Vec<&str> = batches.iter().map(|b| b.source.as_str()).collect();
        let total_entries: usize = batches.iter().map(SalesBatch::len).sum();

        Ok(format!(
            "files: {}\n\
             records: {}\n\
             totalSales: {}\n\
             averageTicket: {}\n\
             bestMonth: {}\n\
             bestSellingProduct: {}\n\
             monthOverMonthChange: {}\n\
             salesByMonth: {}\n\
             salesByProduct: {}\n\
             salesByCategory: {}\n\
             salesByRegion: {}",
            files.join(", "),
            total_entries,
            self.total_sales,
            self.average_ticket,
            self.best_month,
            self.best_selling_product,
            self.month_over_month_change,
            serde_json::to_string(&self.sales_by_month)?,
            serde_json::to_string(&self.sales_by_product)?,
            serde_json::to_string(&self.sales_by_category)?,
            serde_json::to_string(&self.sales_by_region)?,
        ))
    }
}
