//! Build HTTP requests for dataset administrative operations.
use std::collections::BTreeMap;

use anyhow::Result;

use replidataset_client::models::AdminCall;
use replidataset_client::models::AdminOp;
use replidataset_client::models::DatasetId;

/// Default header used to propagate the name of the principal to executors.
pub const DEFAULT_USER_ID_HEADER: &str = "X-User-Id";

/// HTTP method used by all administrative operations.
pub const METHOD: &str = "POST";

const CONTENT_TYPE_JSON: &str = "application/json";

/// Transport independent description of an administrative operation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminRequest {
    /// Encoded JSON payload, for operations that have one.
    pub body: Option<String>,

    /// Headers to attach to the request.
    pub headers: BTreeMap<String, String>,

    /// Path of the request, relative to the executor API root.
    pub path: String,

    /// Unescaped segments of the request path.
    pub segments: Vec<String>,
}

impl AdminRequest {
    /// Build the request to perform an administrative operation on a dataset.
    ///
    /// The `principal` is attached in the `user_id_header` header when known.
    pub fn build(
        dataset: &DatasetId,
        call: &AdminCall,
        principal: Option<&str>,
        user_id_header: &str,
    ) -> Result<AdminRequest> {
        let mut headers = BTreeMap::new();
        let body = match call.payload()? {
            None => None,
            Some(payload) => {
                headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());
                Some(serde_json::to_string(&payload)?)
            }
        };
        if let Some(principal) = principal {
            headers.insert(user_id_header.to_string(), principal.to_string());
        }
        Ok(AdminRequest {
            body,
            headers,
            path: AdminRequest::path(dataset, call.op()),
            segments: AdminRequest::segments(dataset, call.op()),
        })
    }

    /// Lookup a header attached to the request.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Relative path of the request for an operation on a dataset.
    ///
    /// Namespace and name are used as they are, without normalisation.
    pub fn path(dataset: &DatasetId, op: AdminOp) -> String {
        format!(
            "namespaces/{}/data/datasets/{}/admin/{}",
            dataset.namespace(),
            dataset.name(),
            op.name(),
        )
    }

    /// Segments of the relative path, with namespace and name as single segments.
    ///
    /// Transports must escape each segment so reserved characters do not alter the URL.
    pub fn segments(dataset: &DatasetId, op: AdminOp) -> Vec<String> {
        vec![
            "namespaces".to_string(),
            dataset.namespace().to_string(),
            "data".to_string(),
            "datasets".to_string(),
            dataset.name().to_string(),
            "admin".to_string(),
            op.name().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use serde_json::Value as Json;

    use replidataset_client::models::AdminCall;
    use replidataset_client::models::AdminOp;
    use replidataset_client::models::CreationParams;
    use replidataset_client::models::DatasetId;
    use replidataset_client::models::DatasetProperties;
    use replidataset_client::models::DatasetSpecification;
    use replidataset_client::models::DatasetTypeMeta;
    use replidataset_client::models::DropParams;
    use replidataset_client::models::UpdateParams;

    use super::AdminRequest;
    use super::DEFAULT_USER_ID_HEADER;

    const ALL_OPS: [AdminOp; 6] = [
        AdminOp::Exists,
        AdminOp::Create,
        AdminOp::Update,
        AdminOp::Drop,
        AdminOp::Truncate,
        AdminOp::Upgrade,
    ];

    fn calls() -> Vec<AdminCall> {
        let type_meta = DatasetTypeMeta::named("table");
        let properties = DatasetProperties::builder().add("ttl", "3600").build();
        let spec = DatasetSpecification::new(json!({"name": "purchases"}));
        vec![
            AdminCall::Exists,
            AdminCall::Create(CreationParams {
                type_meta: type_meta.clone(),
                properties: properties.clone(),
            }),
            AdminCall::Update(UpdateParams {
                type_meta: type_meta.clone(),
                properties,
                existing: spec.clone(),
            }),
            AdminCall::Drop(DropParams {
                type_meta,
                instance_spec: spec,
            }),
            AdminCall::Truncate,
            AdminCall::Upgrade,
        ]
    }

    #[test]
    fn path_is_literal_concatenation() {
        let ids = [
            ("default", "purchases"),
            ("Prod", "Purchases"),
            ("ns-1", "with.dots_and-dashes"),
            ("ünï", "cödé"),
        ];
        for (namespace, name) in ids {
            let dataset = DatasetId::new(namespace, name).unwrap();
            for op in ALL_OPS {
                let expected = format!(
                    "namespaces/{}/data/datasets/{}/admin/{}",
                    namespace,
                    name,
                    op.name()
                );
                assert_eq!(AdminRequest::path(&dataset, op), expected);
            }
        }
    }

    #[test]
    fn body_only_for_ops_with_payload() {
        let dataset = DatasetId::new("default", "purchases").unwrap();
        for call in calls() {
            let request =
                AdminRequest::build(&dataset, &call, None, DEFAULT_USER_ID_HEADER).unwrap();
            match call.op() {
                AdminOp::Create | AdminOp::Update | AdminOp::Drop => {
                    let body = request.body.clone().expect("request should have a body");
                    let body: Json = serde_json::from_str(&body).unwrap();
                    assert!(body.as_object().map(|body| !body.is_empty()).unwrap());
                    assert_eq!(request.header("Content-Type"), Some("application/json"));
                }
                _ => {
                    assert_eq!(request.body, None);
                    assert_eq!(request.header("Content-Type"), None);
                }
            }
        }
    }

    #[test]
    fn principal_header_attached_when_known() {
        let dataset = DatasetId::new("default", "purchases").unwrap();
        let request = AdminRequest::build(
            &dataset,
            &AdminCall::Exists,
            Some("alice"),
            DEFAULT_USER_ID_HEADER,
        )
        .unwrap();
        assert_eq!(request.header("X-User-Id"), Some("alice"));
    }

    #[test]
    fn principal_header_omitted_when_anonymous() {
        let dataset = DatasetId::new("default", "purchases").unwrap();
        let request =
            AdminRequest::build(&dataset, &AdminCall::Truncate, None, DEFAULT_USER_ID_HEADER)
                .unwrap();
        assert!(request.headers.is_empty());
    }

    #[test]
    fn principal_header_name_is_configurable() {
        let dataset = DatasetId::new("default", "purchases").unwrap();
        let request =
            AdminRequest::build(&dataset, &AdminCall::Upgrade, Some("bob"), "X-Principal")
                .unwrap();
        assert_eq!(request.header("X-Principal"), Some("bob"));
        assert_eq!(request.header("X-User-Id"), None);
    }

    #[test]
    fn segments_keep_reserved_characters() {
        let dataset = DatasetId::new("team/a", "a?b#c").unwrap();
        let segments = AdminRequest::segments(&dataset, AdminOp::Truncate);
        assert_eq!(
            segments,
            vec!["namespaces", "team/a", "data", "datasets", "a?b#c", "admin", "truncate"],
        );
        assert_eq!(
            AdminRequest::path(&dataset, AdminOp::Truncate),
            "namespaces/team/a/data/datasets/a?b#c/admin/truncate",
        );
    }

    #[test]
    fn build_uses_op_path() {
        let dataset = DatasetId::new("default", "purchases").unwrap();
        let request =
            AdminRequest::build(&dataset, &AdminCall::Upgrade, None, DEFAULT_USER_ID_HEADER)
                .unwrap();
        assert_eq!(
            request.path,
            "namespaces/default/data/datasets/purchases/admin/upgrade"
        );
    }
}
