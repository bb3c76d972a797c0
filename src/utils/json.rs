//! Decoding of PuppetDB response documents

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::TypesResult;

/// Decode a PuppetDB response into records.
///
/// Query endpoints return arrays; lookups such as `/catalogs/<certname>`
/// return a bare object, which decodes as a single record.
pub fn decode_records<T: DeserializeOwned>(contents: &str) -> TypesResult<Vec<T>> {
    let items = match serde_json::from_str(contents)? {
        Value::Array(items) => items,
        other => vec![other],
    };

    Ok(items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()?)
}
