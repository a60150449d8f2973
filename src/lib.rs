//! # Sales Metrics Engine
//!
//! A library for ingesting tabular sales records (delimited text files) from
//! multiple sources, normalizing heterogeneous column naming into a canonical
//! schema, and deriving aggregate business metrics.
//!
//! ## Core Concepts
//!
//! - **Record Parser**: raw delimited text in, validated [`SaleRecord`]s out.
//!   Per-row problems are skipped and reported as diagnostics; only a header
//!   whose required columns cannot be resolved is an error.
//! - **Metrics Aggregator**: folds any number of record batches into one
//!   immutable [`SalesMetrics`] snapshot with totals, rankings and a
//!   month-over-month trend.
//! - **Deterministic rankings**: grouping maps preserve insertion order and
//!   ties go to the first key that reached the maximum, so identical input
//!   always produces an identical snapshot.
//!
//! ## Example
//!
//! ```rust
//! use sales_metrics_engine::SalesPipeline;
//!
//! let csv = "produto;quantidade;preço;data\n\
//!            Laptop Pro X;2;3500,00;2024-11-05\n\
//!            Webcam HD;1;450,90;2024-11-06\n";
//!
//! let batches = SalesPipeline::load(&[("vendas_novembro.csv", csv)]).unwrap();
//! let metrics = SalesPipeline::analyze(&batches);
//!
//! assert_eq!(metrics.best_month, "novembro de 2024");
//! assert_eq!(metrics.best_selling_product, "Laptop Pro X");
//! assert!((metrics.total_sales - 7450.9).abs() < 1e-9);
//! ```

pub mod error;
pub mod fixtures;
pub mod header;
pub mod metrics;
pub mod months;
pub mod parser;
pub mod schema;

pub use error::{Result, SalesDataError};
pub use header::{resolve_headers, HeaderMap};
pub use metrics::compute_sales_metrics;
pub use parser::{parse_sales_csv, ParsedFile, RowDiagnostic, SkipReason};
pub use schema::{SaleRecord, SalesBatch, SalesMetrics, NOT_AVAILABLE};

use log::{debug, info};

/// Stateless front door for the two-stage pipeline: load every file of a
/// submission all-or-nothing, then aggregate the union of their records.
pub struct SalesPipeline;

impl SalesPipeline {
    /// Parse each `(file name, raw text)` pair into a batch.
    ///
    /// The join is all-or-nothing: the first structural failure aborts the
    /// whole submission and no partial batch list is returned. Row-level
    /// defects never fail a file; they are logged by the parser.
    pub fn load(files: &[(&str, &str)]) -> Result<Vec<SalesBatch>> {
        let mut batches = Vec::with_capacity(files.len());
        for (name, text) in files {
            let parsed =
                parse_sales_csv(text).map_err(|source| SalesDataError::BatchLoadError {
                    file: (*name).to_string(),
                    source: Box::new(source),
                })?;
            debug!(
                "Parsed {}: {} records accepted, {} rows skipped",
                name,
                parsed.records.len(),
                parsed.diagnostics.len()
            );
            batches.push(SalesBatch::new(*name, parsed.records));
        }

        info!(
            "Loaded {} file(s) with {} sales records",
            batches.len(),
            Self::record_count(&batches)
        );
        Ok(batches)
    }

    /// Concatenate all batches and compute one snapshot for the combined
    /// record set. Zero batches yield the empty snapshot; callers that need
    /// to distinguish "nothing uploaded" from "metrics computed as zero" can
    /// check [`SalesPipeline::record_count`] or the batch list itself.
    pub fn analyze(batches: &[SalesBatch]) -> SalesMetrics {
        let records: Vec<SaleRecord> = batches
            .iter()
            .flat_map(|batch| batch.records.iter().cloned())
            .collect();
        compute_sales_metrics(&records)
    }

    /// Total record count across batches.
    pub fn record_count(batches: &[SalesBatch]) -> usize {
        batches.iter().map(SalesBatch::len).sum()
    }
}

/// One-shot convenience: load a submission and aggregate it.
pub fn analyze_sales_files(files: &[(&str, &str)]) -> Result<SalesMetrics> {
    let batches = SalesPipeline::load(files)?;
    Ok(SalesPipeline::analyze(&batches))
}
