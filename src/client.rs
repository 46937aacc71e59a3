//! Content API client used by the backend to fetch translation entries.
//!
//! The backend only depends on the [`ContentClient`] trait; [`ContentfulClient`]
//! is the HTTP implementation against the Contentful Content Delivery API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_HOST: &str = "cdn.contentful.com";
const DEFAULT_ENVIRONMENT: &str = "master";

/// Errors raised by a content client.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid Contentful client parameters: {0}")]
    InvalidParams(String),

    #[error("Failed to send request to Contentful API: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Contentful API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse Contentful response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Construction parameters for [`ContentfulClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientParams {
    pub space: String,
    pub access_token: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_host")]
    pub host: String,
    /// Use plain HTTP instead of HTTPS
    #[serde(default)]
    pub insecure: bool,
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl ClientParams {
    pub fn new(space: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            access_token: access_token.into(),
            environment: default_environment(),
            host: default_host(),
            insecure: false,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            space: std::env::var("CONTENTFUL_SPACE_ID").context("CONTENTFUL_SPACE_ID not set")?,
            access_token: std::env::var("CONTENTFUL_ACCESS_TOKEN")
                .context("CONTENTFUL_ACCESS_TOKEN not set")?,
            environment: std::env::var("CONTENTFUL_ENVIRONMENT")
                .unwrap_or_else(|_| default_environment()),
            host: std::env::var("CONTENTFUL_HOST").unwrap_or_else(|_| default_host()),
            insecure: false,
        })
    }
}

/// Query for all entries of one content type in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntriesQuery {
    pub content_type: String,
    pub locale: String,
}

/// One record returned by the content API. `sys` metadata is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentEntry {
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EntryCollection {
    pub items: Vec<ContentEntry>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// A content API capable of answering an entries query.
#[async_trait]
pub trait ContentClient: Send + Sync {
    async fn get_entries(&self, query: &EntriesQuery) -> Result<EntryCollection, ClientError>;
}

/// Contentful Content Delivery API client.
#[derive(Debug, Clone)]
pub struct ContentfulClient {
    http: reqwest::Client,
    entries_url: String,
    access_token: String,
}

impl ContentfulClient {
    pub fn new(params: &ClientParams) -> Result<Self, ClientError> {
        if params.space.trim().is_empty() {
            return Err(ClientError::InvalidParams("space must not be empty".to_string()));
        }
        if params.access_token.trim().is_empty() {
            return Err(ClientError::InvalidParams(
                "accessToken must not be empty".to_string(),
            ));
        }

        let scheme = if params.insecure { "http" } else { "https" };
        let entries_url = format!(
            "{}://{}/spaces/{}/environments/{}/entries",
            scheme, params.host, params.space, params.environment
        );

        Ok(Self {
            http: reqwest::Client::new(),
            entries_url,
            access_token: params.access_token.clone(),
        })
    }
}

#[async_trait]
impl ContentClient for ContentfulClient {
    async fn get_entries(&self, query: &EntriesQuery) -> Result<EntryCollection, ClientError> {
        debug!(
            "GET {} (content_type={}, locale={})",
            self.entries_url, query.content_type, query.locale
        );

        let response = self
            .http
            .get(&self.entries_url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let collection: EntryCollection = serde_json::from_str(&body)?;

        // Only the first page is requested; a truncated set is passed through as-is.
        if let Some(total) = collection.total {
            if total > collection.items.len() as u64 {
                warn!(
                    "Contentful returned {} of {} entries for content type '{}' ({})",
                    collection.items.len(),
                    total,
                    query.content_type,
                    query.locale
                );
            }
        }

        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== Helper Functions ====================

    fn create_test_params(server: &MockServer) -> ClientParams {
        ClientParams {
            space: "space-id".to_string(),
            access_token: "test-token".to_string(),
            environment: "master".to_string(),
            host: server.address().to_string(),
            insecure: true,
        }
    }

    fn create_query(content_type: &str, locale: &str) -> EntriesQuery {
        EntriesQuery {
            content_type: content_type.to_string(),
            locale: locale.to_string(),
        }
    }

    // ==================== ClientParams Tests ====================

    #[test]
    fn test_client_params_deserialize_defaults() {
        let json = r#"{"space": "abc", "accessToken": "secret"}"#;
        let params: ClientParams = serde_json::from_str(json).expect("Should deserialize");

        assert_eq!(params, ClientParams::new("abc", "secret"));
        assert_eq!(params.environment, "master");
        assert_eq!(params.host, "cdn.contentful.com");
        assert!(!params.insecure);
    }

    #[test]
    fn test_client_params_deserialize_overrides() {
        let json = r#"{
            "space": "abc",
            "accessToken": "secret",
            "environment": "staging",
            "host": "preview.contentful.com"
        }"#;
        let params: ClientParams = serde_json::from_str(json).expect("Should deserialize");

        assert_eq!(params.environment, "staging");
        assert_eq!(params.host, "preview.contentful.com");
    }

    #[test]
    #[serial]
    fn test_client_params_from_env() {
        std::env::set_var("CONTENTFUL_SPACE_ID", "env-space");
        std::env::set_var("CONTENTFUL_ACCESS_TOKEN", "env-token");
        std::env::remove_var("CONTENTFUL_ENVIRONMENT");
        std::env::remove_var("CONTENTFUL_HOST");

        let params = ClientParams::from_env().expect("Should load from env");
        assert_eq!(params.space, "env-space");
        assert_eq!(params.access_token, "env-token");
        assert_eq!(params.environment, "master");
        assert_eq!(params.host, "cdn.contentful.com");

        std::env::remove_var("CONTENTFUL_SPACE_ID");
        std::env::remove_var("CONTENTFUL_ACCESS_TOKEN");
    }

    #[test]
    #[serial]
    fn test_client_params_from_env_missing_token() {
        std::env::set_var("CONTENTFUL_SPACE_ID", "env-space");
        std::env::remove_var("CONTENTFUL_ACCESS_TOKEN");

        let err = ClientParams::from_env().unwrap_err();
        assert!(err.to_string().contains("CONTENTFUL_ACCESS_TOKEN"));

        std::env::remove_var("CONTENTFUL_SPACE_ID");
    }

    // ==================== ContentfulClient::new Tests ====================

    #[test]
    fn test_new_rejects_empty_space() {
        let result = ContentfulClient::new(&ClientParams::new("", "token"));
        assert!(matches!(result, Err(ClientError::InvalidParams(_))));
    }

    #[test]
    fn test_new_rejects_blank_access_token() {
        let result = ContentfulClient::new(&ClientParams::new("space", "   "));
        assert!(matches!(result, Err(ClientError::InvalidParams(_))));
    }

    #[test]
    fn test_new_builds_entries_url() {
        let client = ContentfulClient::new(&ClientParams::new("abc", "token")).unwrap();
        assert_eq!(
            client.entries_url,
            "https://cdn.contentful.com/spaces/abc/environments/master/entries"
        );
    }

    // ==================== Response Deserialization Tests ====================

    #[test]
    fn test_entry_collection_deserialization_ignores_sys() {
        let json = r#"{
            "sys": {"type": "Array"},
            "total": 1,
            "items": [
                {"sys": {"id": "1"}, "fields": {"key": "greeting", "value": "Hello"}}
            ]
        }"#;
        let collection: EntryCollection = serde_json::from_str(json).expect("Should deserialize");

        assert_eq!(collection.items.len(), 1);
        assert_eq!(collection.total, Some(1));
        assert_eq!(collection.items[0].fields["key"], "greeting");
    }

    #[test]
    fn test_entry_without_fields_defaults_to_empty() {
        let json = r#"{"items": [{"sys": {"id": "1"}}]}"#;
        let collection: EntryCollection = serde_json::from_str(json).expect("Should deserialize");

        assert!(collection.items[0].fields.is_empty());
        assert_eq!(collection.total, None);
    }

    // ==================== get_entries Tests ====================

    #[tokio::test]
    async fn test_get_entries_sends_query_and_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spaces/space-id/environments/master/entries"))
            .and(query_param("content_type", "resource"))
            .and(query_param("locale", "es"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total": 1,
                "items": [{"fields": {"key": "greeting", "value": "Hola"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ContentfulClient::new(&create_test_params(&mock_server)).unwrap();
        let collection = client
            .get_entries(&create_query("resource", "es"))
            .await
            .expect("Should fetch entries");

        assert_eq!(collection.items.len(), 1);
        assert_eq!(collection.items[0].fields["value"], "Hola");
    }

    #[tokio::test]
    async fn test_get_entries_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("The access token you sent could not be found"))
            .mount(&mock_server)
            .await;

        let client = ContentfulClient::new(&create_test_params(&mock_server)).unwrap();
        let err = client
            .get_entries(&create_query("resource", "en"))
            .await
            .unwrap_err();

        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("access token"));
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_entries_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&mock_server)
            .await;

        let client = ContentfulClient::new(&create_test_params(&mock_server)).unwrap();
        let err = client
            .get_entries(&create_query("resource", "en"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_get_entries_passes_truncated_page_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total": 250,
                "items": [{"fields": {"key": "a", "value": "b"}}]
            })))
            .mount(&mock_server)
            .await;

        let client = ContentfulClient::new(&create_test_params(&mock_server)).unwrap();
        let collection = client
            .get_entries(&create_query("resource", "en"))
            .await
            .expect("Truncated result should not fail");

        assert_eq!(collection.items.len(), 1);
        assert_eq!(collection.total, Some(250));
    }
}
