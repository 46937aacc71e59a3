//! Backend configuration: caller-supplied options and the effective field mapping.

use serde::{Deserialize, Serialize};

use crate::client::ClientParams;

/// Effective content schema used to query and map entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSchemaOptions {
    /// Content type ID queried for translation entries
    pub content_type: String,
    /// Field holding the translation key
    pub entry_key_accessor: String,
    /// Field holding the translated string
    pub entry_value_accessor: String,
}

impl Default for ContentSchemaOptions {
    fn default() -> Self {
        Self {
            content_type: "resource".to_string(),
            entry_key_accessor: "key".to_string(),
            entry_value_accessor: "value".to_string(),
        }
    }
}

/// Options handed to the backend on `init`. Every field is optional; absent
/// fields keep whatever value is currently in effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_key_accessor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_value_accessor: Option<String>,
    /// Passed verbatim to the client connector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_params: Option<ClientParams>,
}

impl BackendOptions {
    pub fn new(client_params: ClientParams) -> Self {
        Self {
            client_params: Some(client_params),
            ..Self::default()
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_entry_key_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.entry_key_accessor = Some(accessor.into());
        self
    }

    pub fn with_entry_value_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.entry_value_accessor = Some(accessor.into());
        self
    }
}

/// Shallow override of `base` by every field present in `supplied`.
pub fn merge(base: &ContentSchemaOptions, supplied: &BackendOptions) -> ContentSchemaOptions {
    ContentSchemaOptions {
        content_type: supplied
            .content_type
            .clone()
            .unwrap_or_else(|| base.content_type.clone()),
        entry_key_accessor: supplied
            .entry_key_accessor
            .clone()
            .unwrap_or_else(|| base.entry_key_accessor.clone()),
        entry_value_accessor: supplied
            .entry_value_accessor
            .clone()
            .unwrap_or_else(|| base.entry_value_accessor.clone()),
    }
}
