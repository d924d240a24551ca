use crate::core::config::StoreConfig;
use crate::core::store::{RawRecord, RecordStore, StoreError};
use async_trait::async_trait;
use std::fmt;
use tracing::{debug, error};

/// Reads tables through the Supabase PostgREST API.
pub struct SupabaseStore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl SupabaseStore {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("anubis/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::Client)?;
        Ok(SupabaseStore {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Builds a client from config, reading the key from the environment.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::new(&config.base_url, config.api_key()?)
    }
}

impl fmt::Debug for SupabaseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseStore")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl RecordStore for SupabaseStore {
    async fn fetch_all(&self, collection: &str) -> Result<Vec<RawRecord>, StoreError> {
        let url = format!("{}/rest/v1/{}?select=*", self.base_url, collection);
        debug!("Requesting all rows from {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|source| StoreError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| StoreError::Request {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            error!(status = status.as_u16(), response = %body, "Store rejected request");
            return Err(StoreError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<RawRecord> =
            serde_json::from_str(&body).map_err(|source| StoreError::Decode {
                url: url.clone(),
                source,
            })?;
        debug!("Fetched {} rows from {}", rows.len(), collection);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_KEY: &str = "test-key";

    async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/financial_records"))
            .and(query_param("select", "*"))
            .and(header("apikey", TEST_KEY))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_fetch_all_rows() {
        let mock_server = create_mock_server(
            200,
            r#"[
                {"id": 1, "amount": 500, "due_date": "2025-01-10", "paid": true},
                {"id": 2, "amount": "-200.50", "due_date": null}
            ]"#,
        )
        .await;
        let store = SupabaseStore::new(&mock_server.uri(), TEST_KEY.to_string()).unwrap();

        let rows = store.fetch_all("financial_records").await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["amount"], serde_json::json!(500));
        assert_eq!(rows[1]["amount"], serde_json::json!("-200.50"));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_server = create_mock_server(200, "[]").await;
        let base_url = format!("{}/", mock_server.uri());
        let store = SupabaseStore::new(&base_url, TEST_KEY.to_string()).unwrap();

        let rows = store.fetch_all("financial_records").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mock_server = create_mock_server(401, r#"{"message":"Invalid API key"}"#).await;
        let store = SupabaseStore::new(&mock_server.uri(), TEST_KEY.to_string()).unwrap();

        let err = store.fetch_all("financial_records").await.unwrap_err();
        match err {
            StoreError::Status { status, body, .. } => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_array_body_fails_to_decode() {
        let mock_server = create_mock_server(200, r#"{"rows": []}"#).await;
        let store = SupabaseStore::new(&mock_server.uri(), TEST_KEY.to_string()).unwrap();

        let err = store.fetch_all("financial_records").await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let store = SupabaseStore::new("http://127.0.0.1:1", TEST_KEY.to_string()).unwrap();

        let err = store.fetch_all("financial_records").await.unwrap_err();
        assert!(matches!(err, StoreError::Request { .. }));
    }

    #[test]
    fn test_debug_redacts_key() {
        let store = SupabaseStore::new("http://localhost", "super-secret".to_string()).unwrap();
        let printed = format!("{store:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
