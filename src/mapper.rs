use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::client::ContentEntry;
use crate::error::{BackendError, Result};

/// Translation key to translated string for a single language.
pub type ResourceMap = BTreeMap<String, String>;

/// Build a resource map from content entries.
///
/// Each entry must carry both accessor fields; the first entry missing one
/// aborts the whole mapping. Later entries overwrite earlier ones that share
/// a key.
pub fn map_entries(
    entries: &[ContentEntry],
    key_accessor: &str,
    value_accessor: &str,
) -> Result<ResourceMap> {
    let mut resources = ResourceMap::new();

    for entry in entries {
        let key = entry
            .fields
            .get(key_accessor)
            .ok_or_else(|| BackendError::MissingKeyField {
                accessor: key_accessor.to_string(),
                found: field_names(entry),
            })?;
        let value = entry
            .fields
            .get(value_accessor)
            .ok_or_else(|| BackendError::MissingValueField {
                accessor: value_accessor.to_string(),
                found: field_names(entry),
            })?;

        let key = render(key);
        if let Some(previous) = resources.insert(key.clone(), render(value)) {
            debug!("Duplicate translation key '{}' overrides '{}'", key, previous);
        }
    }

    Ok(resources)
}

fn field_names(entry: &ContentEntry) -> Vec<String> {
    let mut names: Vec<String> = entry.fields.keys().cloned().collect();
    names.sort();
    names
}

/// Strings are taken verbatim; anything else uses its compact JSON text.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
