//! SalesDash Core - sales records, ingestion, cleaning, aggregation, statistics.
//!
//! This crate contains the data half of the pipeline:
//! - Sales record types and the column contract
//! - CSV ingestion with lenient date coercion (polars)
//! - Cleaning diagnostics and `product` normalization
//! - Cleaned-copy CSV export
//! - Grouped sums, the date × product quantity pivot, price/quantity correlation
//! - Descriptive statistics

pub mod aggregate;
pub mod data;
pub mod domain;
pub mod schema;
pub mod stats;

pub use aggregate::{Aggregator, CorrelationMatrix, PricedTable, QuantityPivot, SalesSummary};
pub use data::{CleanedTable, Cleaner, CleaningReport, DataError, SalesIngestor, SalesTable};
pub use domain::{PricedRecord, SalesRecord};
pub use stats::Describe;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: pipeline types can cross thread boundaries, so the
    /// chart front-end is free to render from another thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<SalesRecord>();
        require_sync::<SalesRecord>();
        require_send::<PricedRecord>();
        require_sync::<PricedRecord>();
        require_send::<SalesTable>();
        require_sync::<SalesTable>();
        require_send::<CleanedTable>();
        require_sync::<CleanedTable>();
        require_send::<PricedTable>();
        require_sync::<PricedTable>();
        require_send::<SalesSummary>();
        require_sync::<SalesSummary>();
        require_send::<CorrelationMatrix>();
        require_sync::<CorrelationMatrix>();
        require_send::<CleaningReport>();
        require_sync::<CleaningReport>();
    }
}
