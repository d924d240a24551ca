//! Record store abstractions

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A row exactly as the store returns it.
pub type RawRecord = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("store returned HTTP {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },
    #[error("failed to decode rows from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("missing credentials: environment variable {0} is not set")]
    MissingCredentials(String),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every row of `collection`, unfiltered.
    async fn fetch_all(&self, collection: &str) -> Result<Vec<RawRecord>, StoreError>;
}
