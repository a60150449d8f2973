//! Deterministic demo-data generation: one year of synthetic monthly sales
//! files matching the canonical record shape. Pure functions over an explicit
//! seed, so tests and demos get reproducible catalogs.

use crate::schema::{SaleRecord, SalesBatch};
use chrono::{Datelike, Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SAMPLE_PRODUCTS: [&str; 6] = [
    "Laptop Pro X",
    "Wireless Mouse Z",
    "4K Monitor",
    "Mechanical Keyboard",
    "USB-C Hub",
    "Webcam HD",
];

pub const SAMPLE_CATEGORIES: [&str; 3] = ["Eletrônicos", "Acessórios", "Periféricos"];

pub const SAMPLE_REGIONS: [&str; 4] = ["Sudeste", "Nordeste", "Sul", "Centro-Oeste"];

// (file name, month, transaction count) for the 2024 demo year, with the
// seasonal ramp toward December.
const CATALOG_PLAN: [(&str, u32, usize); 12] = [
    ("vendas_janeiro.csv", 1, 150),
    ("vendas_fevereiro.csv", 2, 130),
    ("vendas_marco.csv", 3, 180),
    ("vendas_abril.csv", 4, 170),
    ("vendas_maio.csv", 5, 200),
    ("vendas_junho.csv", 6, 210),
    ("vendas_julho.csv", 7, 220),
    ("vendas_agosto.csv", 8, 190),
    ("vendas_setembro.csv", 9, 230),
    ("vendas_outubro.csv", 10, 250),
    ("vendas_novembro.csv", 11, 280),
    ("vendas_dezembro.csv", 12, 350),
];

const CATALOG_YEAR: i32 = 2024;

/// Generate the full twelve-file demo catalog from one seed.
pub fn sample_catalog(seed: u64) -> Vec<SalesBatch> {
    let mut rng = StdRng::seed_from_u64(seed);
    CATALOG_PLAN
        .iter()
        .map(|&(name, month, transactions)| {
            SalesBatch::new(
                name,
                generate_month(&mut rng, CATALOG_YEAR, month, transactions),
            )
        })
        .collect()
}

/// Generate one month of single-line transactions.
pub fn generate_month(
    rng: &mut StdRng,
    year: i32,
    month: u32,
    transactions: usize,
) -> Vec<SaleRecord> {
    let days = days_in_month(year, month);
    (1..=transactions)
        .map(|i| {
            let day = rng.gen_range(1..=days);
            let price = (rng.gen_range(50.0..2500.0) * 100.0_f64).round() / 100.0;
            SaleRecord {
                id: format!("{year}{month}{i}"),
                date: format!("{year}-{month:02}-{day:02}"),
                product: SAMPLE_PRODUCTS[rng.gen_range(0..SAMPLE_PRODUCTS.len())].to_string(),
                quantity: rng.gen_range(1..=3),
                price,
                transaction_id: format!("T{year}{month}{i}"),
                category: Some(
                    SAMPLE_CATEGORIES[rng.gen_range(0..SAMPLE_CATEGORIES.len())].to_string(),
                ),
                region: Some(SAMPLE_REGIONS[rng.gen_range(0..SAMPLE_REGIONS.len())].to_string()),
            }
        })
        .collect()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .map(|d| d.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_sales_metrics;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_catalog_is_deterministic_per_seed() {
        assert_eq!(sample_catalog(7), sample_catalog(7));
        assert_ne!(sample_catalog(7), sample_catalog(8));
    }

    #[test]
    fn test_catalog_shape() {
        let catalog = sample_catalog(42);
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog[0].source, "vendas_janeiro.csv");
        assert_eq!(catalog[0].len(), 150);
        assert_eq!(catalog[11].source, "vendas_dezembro.csv");
        assert_eq!(catalog[11].len(), 350);

        for record in &catalog[5].records {
            assert!(record.date.starts_with("2024-06-"));
            assert!((1..=3).contains(&record.quantity));
            assert!(record.price >= 50.0 && record.price <= 2500.0);
            assert!(record.category.is_some());
            assert!(record.region.is_some());
        }
    }

    #[test]
    fn test_catalog_aggregates_cleanly() {
        let catalog = sample_catalog(1);
        let records: Vec<_> = catalog
            .iter()
            .flat_map(|b| b.records.iter().cloned())
            .collect();
        let metrics = compute_sales_metrics(&records);

        assert!(metrics.total_sales > 0.0);
        assert_eq!(metrics.analyzed_periods.len(), 12);
        assert_eq!(metrics.sales_by_month.len(), 12);
        assert_ne!(metrics.best_selling_product, "N/A");
    }
}
