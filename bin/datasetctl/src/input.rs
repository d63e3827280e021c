//! Decode command line inputs into dataset models.
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use serde_json::Value as Json;

use replidataset_client::models::DatasetProperties;
use replidataset_client::models::DatasetSpecification;
use replidataset_client::models::DatasetTypeMeta;

/// Unable to decode a JSON document from a file.
#[derive(Debug, thiserror::Error)]
#[error("unable to decode JSON document from '{0}'")]
pub struct InvalidJsonFile(pub String);

/// Parse a `key=value` pair for dataset properties.
pub fn parse_property(pair: &str) -> std::result::Result<(String, String), String> {
    match pair.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("property '{}' has an empty key", pair)),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("property '{}' is not in the key=value format", pair)),
    }
}

/// Build dataset properties from command line values.
pub fn properties(pairs: &[(String, String)], description: Option<&str>) -> DatasetProperties {
    let mut builder = DatasetProperties::builder();
    for (key, value) in pairs {
        builder = builder.add(key, value);
    }
    if let Some(description) = description {
        builder = builder.description(description);
    }
    builder.build()
}

/// Load a dataset specification from a JSON file.
pub fn spec(path: &Path) -> Result<DatasetSpecification> {
    let spec: Json = json_file(path)?;
    Ok(DatasetSpecification::new(spec))
}

/// Load dataset type metadata from a JSON file.
pub fn type_meta(path: &Path) -> Result<DatasetTypeMeta> {
    json_file(path)
}

fn json_file<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let display = path.display().to_string();
    let file = File::open(path).with_context(|| InvalidJsonFile(display.clone()))?;
    let value = serde_json::from_reader(file).with_context(|| InvalidJsonFile(display))?;
    Ok(value)
}
