//! HTTP client for the remote resource collection
//!
//! Thin wrapper over one DRF-style endpoint: list the collection with a
//! fixed page-size ceiling and apply partial updates to single records.
//! Failures propagate to the caller as-is; there is no retry and no
//! caching. The [`ResourceApi`] trait seams the client so consumers and
//! tests can substitute their own implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::error::AppResult;

/// One record in the remote collection
///
/// Fields beyond the known ones are kept verbatim so updates round-trip
/// server-side attributes this client does not model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Server-assigned identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Attributes the server reports that this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Paginated listing envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Total number of records server-side
    pub count: u32,
    /// Records in this page
    pub results: Vec<T>,
}

/// Partial update payload
///
/// Only explicitly set fields are serialized, so the server sees exactly
/// the changes and nothing else.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ResourceUpdate {
    /// An update changing nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the name
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Change the description
    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Change an attribute this client does not model
    pub fn field<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Whether no field has been set
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.extra.is_empty()
    }
}

/// Resource API seam
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Fetch one page of the collection, capped at the configured ceiling
    async fn list(&self) -> AppResult<Paginated<ResourceRecord>>;

    /// Apply a partial update to one record
    async fn update(&self, id: u64, changes: ResourceUpdate) -> AppResult<ResourceRecord>;
}

/// HTTP-based resource client implementation
pub struct ResourceClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: ClientConfig,
    /// Resolved collection URL
    collection_url: Url,
}

impl ResourceClient {
    /// Create a new resource client
    pub fn new(config: ClientConfig) -> AppResult<Self> {
        let base = Url::parse(&config.base_url)?;

        // DRF-style endpoints are slash-terminated; joins rely on it
        let mut path = config.resource_path.clone();
        if !path.ends_with('/') {
            path.push('/');
        }
        let collection_url = base.join(&path)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent("tui-modal/0.1.0")
            .build()?;

        Ok(Self {
            client,
            config,
            collection_url,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn list_url(&self) -> Url {
        let mut url = self.collection_url.clone();
        url.query_pairs_mut()
            .append_pair("limit", &self.config.page_size.to_string());
        url
    }

    fn record_url(&self, id: u64) -> AppResult<Url> {
        let url = self.collection_url.join(&format!("{}/", id))?;
        Ok(url)
    }
}

#[async_trait]
impl ResourceApi for ResourceClient {
    #[instrument(skip(self))]
    async fn list(&self) -> AppResult<Paginated<ResourceRecord>> {
        let start = Instant::now();
        let url = self.list_url();
        debug!(url = %url, "Listing resources");

        let response = self.client.get(url).send().await?.error_for_status()?;
        let page: Paginated<ResourceRecord> = response.json().await?;

        info!(
            count = page.count,
            fetched = page.results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Resource list fetched"
        );
        Ok(page)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: u64, changes: ResourceUpdate) -> AppResult<ResourceRecord> {
        let url = self.record_url(id)?;
        debug!(url = %url, "Updating resource");

        let response = self
            .client
            .patch(url)
            .json(&changes)
            .send()
            .await?
            .error_for_status()?;
        let record: ResourceRecord = response.json().await?;

        info!(id = record.id, "Resource updated");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_with(base_url: &str, resource_path: &str, page_size: u32) -> ResourceClient {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            resource_path: resource_path.to_string(),
            page_size,
            request_timeout_ms: 1000,
        };
        ResourceClient::new(config).unwrap()
    }

    #[test]
    fn list_url_carries_the_page_size_ceiling() {
        let client = client_with("http://localhost:8000", "/api/db/v0/tables/", 250);
        let url = client.list_url();
        assert_eq!(url.path(), "/api/db/v0/tables/");
        assert_eq!(url.query(), Some("limit=250"));
    }

    #[test]
    fn record_url_appends_the_id() {
        let client = client_with("http://localhost:8000", "/api/db/v0/tables/", 500);
        let url = client.record_url(42).unwrap();
        assert_eq!(url.path(), "/api/db/v0/tables/42/");
    }

    #[test]
    fn resource_path_without_trailing_slash_still_joins() {
        let client = client_with("http://localhost:8000", "/api/db/v0/tables", 500);
        let url = client.record_url(7).unwrap();
        assert_eq!(url.path(), "/api/db/v0/tables/7/");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(ResourceClient::new(config).is_err());
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let changes = ResourceUpdate::new().name("renamed");
        let body = serde_json::to_value(&changes).unwrap();
        assert_eq!(body, json!({ "name": "renamed" }));

        let changes = ResourceUpdate::new()
            .description("rows of things")
            .field("schema", json!(3));
        let body = serde_json::to_value(&changes).unwrap();
        assert_eq!(body, json!({ "description": "rows of things", "schema": 3 }));

        assert!(ResourceUpdate::new().is_empty());
        assert!(!ResourceUpdate::new().name("x").is_empty());
    }

    #[test]
    fn records_keep_unmodeled_attributes() {
        let record: ResourceRecord = serde_json::from_value(json!({
            "id": 11,
            "name": "patents",
            "description": null,
            "schema": 3,
            "import_verified": true
        }))
        .unwrap();

        assert_eq!(record.id, 11);
        assert_eq!(record.name, "patents");
        assert_eq!(record.description, None);
        assert_eq!(record.extra.get("schema"), Some(&json!(3)));
        assert_eq!(record.extra.get("import_verified"), Some(&json!(true)));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back.get("schema"), Some(&json!(3)));
    }

    #[test]
    fn paginated_envelope_deserializes() {
        let page: Paginated<ResourceRecord> = serde_json::from_value(json!({
            "count": 2,
            "results": [
                { "id": 1, "name": "alpha" },
                { "id": 2, "name": "beta", "description": "second" }
            ]
        }))
        .unwrap();

        assert_eq!(page.count, 2);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].description.as_deref(), Some("second"));
    }
}
