//! Models exchanged with dataset executor services.
use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value as Json;

use crate::errors::InvalidDatasetId;

/// Identifier of a dataset instance within a namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DatasetId {
    namespace: String,
    name: String,
}

impl DatasetId {
    /// Identify the dataset `name` in `namespace`.
    ///
    /// Both values are used literally and must not be empty.
    pub fn new<S1, S2>(namespace: S1, name: S2) -> Result<DatasetId>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let namespace = namespace.into();
        let name = name.into();
        if namespace.is_empty() {
            anyhow::bail!(InvalidDatasetId { field: "namespace" });
        }
        if name.is_empty() {
            anyhow::bail!(InvalidDatasetId { field: "name" });
        }
        Ok(DatasetId { namespace, name })
    }

    /// Name of the dataset instance.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace the dataset instance belongs to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Describes the type implementing a dataset.
///
/// The document is not interpreted and is passed through as received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetTypeMeta(Json);

impl DatasetTypeMeta {
    /// Wrap a type metadata document.
    pub fn new(meta: Json) -> DatasetTypeMeta {
        DatasetTypeMeta(meta)
    }

    /// Access the type metadata document.
    pub fn as_json(&self) -> &Json {
        &self.0
    }

    /// Name of the dataset type, if the document has one.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Json::as_str)
    }

    /// Type metadata with only a type name.
    pub fn named<S: Into<String>>(name: S) -> DatasetTypeMeta {
        let mut meta = Map::new();
        meta.insert("name".into(), Json::String(name.into()));
        DatasetTypeMeta(Json::Object(meta))
    }
}

/// Configuration properties used to create or update a dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetProperties {
    properties: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl DatasetProperties {
    /// Incrementally define dataset properties.
    pub fn builder() -> DatasetPropertiesBuilder {
        DatasetPropertiesBuilder::default()
    }

    /// Optional description of the dataset.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Lookup the value of a property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// All configured properties, ordered by key.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

/// Incrementally build [`DatasetProperties`].
#[derive(Default)]
pub struct DatasetPropertiesBuilder {
    properties: BTreeMap<String, String>,
    description: Option<String>,
}

impl DatasetPropertiesBuilder {
    /// Set a property, replacing any previous value for the key.
    pub fn add<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// All properties are set, get the immutable properties object.
    pub fn build(self) -> DatasetProperties {
        DatasetProperties {
            properties: self.properties,
            description: self.description,
        }
    }

    /// Set a description for the dataset.
    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Stored specification (schema) of a dataset instance.
///
/// The specification is owned by the executor service and is never inspected by clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetSpecification(Json);

impl DatasetSpecification {
    /// Wrap a specification received from (or to be sent to) an executor service.
    pub fn new(spec: Json) -> DatasetSpecification {
        DatasetSpecification(spec)
    }

    /// Access the raw specification document.
    pub fn as_json(&self) -> &Json {
        &self.0
    }
}

/// Result of dataset create and update operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetCreationResponse {
    /// Specification of the dataset as stored by the executor service.
    pub spec: DatasetSpecification,

    /// Additional metadata returned by the executor service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Json>,
}

/// Response envelope for operations that return a single value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetAdminOpResponse {
    #[serde(default)]
    pub result: Option<Json>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Administrative operations supported by dataset executor services.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdminOp {
    Exists,
    Create,
    Update,
    Drop,
    Truncate,
    Upgrade,
}

impl AdminOp {
    /// Name of the operation on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            AdminOp::Exists => "exists",
            AdminOp::Create => "create",
            AdminOp::Update => "update",
            AdminOp::Drop => "drop",
            AdminOp::Truncate => "truncate",
            AdminOp::Upgrade => "upgrade",
        }
    }
}

impl fmt::Display for AdminOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters to create a new dataset instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationParams {
    pub type_meta: DatasetTypeMeta,
    pub properties: DatasetProperties,
}

/// Parameters to update an existing dataset instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParams {
    pub type_meta: DatasetTypeMeta,
    pub properties: DatasetProperties,
    pub existing: DatasetSpecification,
}

/// Parameters to drop a dataset instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropParams {
    pub type_meta: DatasetTypeMeta,
    pub instance_spec: DatasetSpecification,
}

/// An administrative operation along with its operation specific parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum AdminCall {
    Exists,
    Create(CreationParams),
    Update(UpdateParams),
    Drop(DropParams),
    Truncate,
    Upgrade,
}

impl AdminCall {
    /// Kind of administrative operation requested.
    pub fn op(&self) -> AdminOp {
        match self {
            AdminCall::Exists => AdminOp::Exists,
            AdminCall::Create(_) => AdminOp::Create,
            AdminCall::Update(_) => AdminOp::Update,
            AdminCall::Drop(_) => AdminOp::Drop,
            AdminCall::Truncate => AdminOp::Truncate,
            AdminCall::Upgrade => AdminOp::Upgrade,
        }
    }

    /// Encode the operation parameters, if the operation has any.
    pub fn payload(&self) -> Result<Option<Json>> {
        let payload = match self {
            AdminCall::Create(params) => Some(serde_json::to_value(params)?),
            AdminCall::Update(params) => Some(serde_json::to_value(params)?),
            AdminCall::Drop(params) => Some(serde_json::to_value(params)?),
            AdminCall::Exists | AdminCall::Truncate | AdminCall::Upgrade => None,
        };
        Ok(payload)
    }
}

/// Operation specific result of an administrative operation.
#[derive(Clone, Debug, PartialEq)]
pub enum AdminOutcome {
    /// Result of an [`AdminOp::Exists`] operation.
    Exists(bool),

    /// Result of [`AdminOp::Create`] and [`AdminOp::Update`] operations.
    Created(DatasetCreationResponse),

    /// The operation completed and returned no value.
    Done,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::AdminCall;
    use super::CreationParams;
    use super::DatasetId;
    use super::DatasetProperties;
    use super::DatasetSpecification;
    use super::DatasetTypeMeta;
    use super::DropParams;
    use super::UpdateParams;
    use crate::errors::InvalidDatasetId;

    fn type_meta() -> DatasetTypeMeta {
        serde_json::from_value(json!({
            "name": "table",
            "modules": [{"name": "core", "className": "TableModule"}],
        }))
        .unwrap()
    }

    #[test]
    fn dataset_id_rejects_empty_name() {
        let error = DatasetId::new("default", "").unwrap_err();
        let error = error.downcast_ref::<InvalidDatasetId>().unwrap();
        assert_eq!(error.field, "name");
    }

    #[test]
    fn dataset_id_rejects_empty_namespace() {
        let error = DatasetId::new("", "purchases").unwrap_err();
        let error = error.downcast_ref::<InvalidDatasetId>().unwrap();
        assert_eq!(error.field, "namespace");
    }

    #[test]
    fn dataset_id_keeps_values_literally() {
        let id = DatasetId::new("My NS", "Purchases.V2").unwrap();
        assert_eq!(id.namespace(), "My NS");
        assert_eq!(id.name(), "Purchases.V2");
        assert_eq!(id.to_string(), "My NS.Purchases.V2");
    }

    #[test]
    fn type_meta_passes_through_unknown_fields() {
        let meta = type_meta();
        assert_eq!(meta.name(), Some("table"));
        let encoded = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            encoded,
            json!({
                "name": "table",
                "modules": [{"name": "core", "className": "TableModule"}],
            }),
        );
    }

    #[test]
    fn type_meta_without_name_is_kept() {
        let meta: DatasetTypeMeta =
            serde_json::from_value(json!({"provider": "sql", "version": 2})).unwrap();
        assert_eq!(meta.name(), None);
        let call = AdminCall::Create(CreationParams {
            type_meta: meta,
            properties: DatasetProperties::default(),
        });
        let payload = call.payload().unwrap().unwrap();
        assert_eq!(payload["typeMeta"], json!({"provider": "sql", "version": 2}));
    }

    #[test]
    fn payload_absent_for_valueless_ops() {
        for call in [AdminCall::Exists, AdminCall::Truncate, AdminCall::Upgrade] {
            assert_eq!(call.payload().unwrap(), None);
        }
    }

    #[test]
    fn payload_create() {
        let properties = DatasetProperties::builder()
            .add("ttl", "3600")
            .add("codec", "snappy")
            .build();
        let call = AdminCall::Create(CreationParams {
            type_meta: DatasetTypeMeta::named("table"),
            properties,
        });
        let payload = call.payload().unwrap().unwrap();
        assert_eq!(
            payload,
            json!({
                "typeMeta": {"name": "table"},
                "properties": {"properties": {"codec": "snappy", "ttl": "3600"}},
            }),
        );
    }

    #[test]
    fn payload_drop() {
        let call = AdminCall::Drop(DropParams {
            type_meta: DatasetTypeMeta::named("table"),
            instance_spec: DatasetSpecification::new(json!({"name": "purchases"})),
        });
        let payload = call.payload().unwrap().unwrap();
        assert_eq!(
            payload,
            json!({
                "typeMeta": {"name": "table"},
                "instanceSpec": {"name": "purchases"},
            }),
        );
    }

    #[test]
    fn payload_update() {
        let properties = DatasetProperties::builder()
            .add("ttl", "60")
            .description("purchase history")
            .build();
        let call = AdminCall::Update(UpdateParams {
            type_meta: type_meta(),
            properties,
            existing: DatasetSpecification::new(json!({"name": "purchases", "ttl": "3600"})),
        });
        let payload = call.payload().unwrap().unwrap();
        assert_eq!(payload["typeMeta"], serde_json::to_value(type_meta()).unwrap());
        assert_eq!(
            payload["properties"],
            json!({"properties": {"ttl": "60"}, "description": "purchase history"}),
        );
        assert_eq!(payload["existing"], json!({"name": "purchases", "ttl": "3600"}));
    }

    #[test]
    fn properties_are_ordered_by_key() {
        let properties = DatasetProperties::builder()
            .add("z", "1")
            .add("a", "2")
            .add("m", "3")
            .build();
        let keys: Vec<&str> = properties.properties().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
        assert_eq!(properties.get("m"), Some("3"));
        assert_eq!(properties.description(), None);
    }
}
