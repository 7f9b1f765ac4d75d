//! Data ingestion, cleaning and export

pub mod clean;
pub mod dates;
pub mod export;
pub mod ingest;
pub mod table;

pub use clean::{CleanedTable, Cleaner, CleaningReport};
pub use export::write_cleaned_csv;
pub use ingest::{load_csv, DataError, SalesIngestor};
pub use table::SalesTable;
