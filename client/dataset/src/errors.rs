//! Errors during dataset administrative operations.
use crate::models::AdminOp;
use crate::models::DatasetId;

/// Dataset identifiers must have a non-empty namespace and name.
#[derive(Debug, thiserror::Error)]
#[error("dataset identifier has an empty {field}")]
pub struct InvalidDatasetId {
    pub field: &'static str,
}

/// The dataset instance was not found.
#[derive(Debug, thiserror::Error)]
#[error("dataset '{namespace}.{name}' was not found")]
pub struct DatasetNotFound {
    pub namespace: String,
    pub name: String,
}

impl DatasetNotFound {
    /// The dataset instance was not found.
    pub fn new(dataset: &DatasetId) -> Self {
        Self {
            namespace: dataset.namespace().to_string(),
            name: dataset.name().to_string(),
        }
    }
}

/// The backend returned a result that does not match the requested operation.
#[derive(Debug, thiserror::Error)]
#[error("unexpected result returned for dataset '{op}' operation")]
pub struct UnexpectedOutcome {
    pub op: AdminOp,
}
