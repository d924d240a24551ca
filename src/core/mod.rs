//! Core business logic abstractions

pub mod analytics;
pub mod config;
pub mod error;
pub mod ledger;
pub mod log;
pub mod payables;
pub mod record;
pub mod store;
pub mod summary;

// Re-export main types for cleaner imports
pub use error::ForecastError;
pub use ledger::Ledger;
pub use store::{RawRecord, RecordStore, StoreError};
