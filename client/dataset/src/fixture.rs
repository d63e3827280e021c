//! In-memory dataset executor implementation for unit tests.
use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::Result;
use serde_json::json;

use replicore_context::Context;
use repliclient_utils::Conflict;

use crate::errors::DatasetNotFound;
use crate::models::AdminCall;
use crate::models::AdminOp;
use crate::models::AdminOutcome;
use crate::models::DatasetCreationResponse;
use crate::models::DatasetId;
use crate::models::DatasetProperties;
use crate::models::DatasetSpecification;
use crate::models::DatasetTypeMeta;

/// In-memory dataset executor implementation for unit tests.
#[derive(Default)]
pub struct Client {
    state: Mutex<ClientState>,
}

impl Client {
    /// List operations received so far, in order.
    pub fn calls(&self) -> Vec<(DatasetId, AdminOp)> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Store a dataset specification as if the dataset was already created.
    pub fn dataset(&self, dataset: DatasetId, spec: DatasetSpecification) -> &Self {
        let mut state = self.state.lock().unwrap();
        state.datasets.insert(dataset, spec);
        self
    }

    /// Lookup the specification currently stored for a dataset.
    pub fn spec(&self, dataset: &DatasetId) -> Option<DatasetSpecification> {
        let state = self.state.lock().unwrap();
        state.datasets.get(dataset).cloned()
    }
}

#[async_trait::async_trait]
impl super::IDatasetAdmin for Client {
    async fn execute(
        &self,
        _: &Context,
        dataset: &DatasetId,
        call: AdminCall,
    ) -> Result<AdminOutcome> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((dataset.clone(), call.op()));
        let exists = state.datasets.contains_key(dataset);
        match call {
            AdminCall::Exists => Ok(AdminOutcome::Exists(exists)),
            AdminCall::Create(_) if exists => anyhow::bail!(Conflict {
                message: format!("dataset '{}' already exists", dataset),
            }),
            AdminCall::Create(params) => {
                let spec = fixture_spec(dataset, &params.type_meta, &params.properties);
                state.datasets.insert(dataset.clone(), spec.clone());
                let response = DatasetCreationResponse {
                    spec,
                    metadata: None,
                };
                Ok(AdminOutcome::Created(response))
            }
            _ if !exists => anyhow::bail!(DatasetNotFound::new(dataset)),
            AdminCall::Update(params) => {
                let spec = fixture_spec(dataset, &params.type_meta, &params.properties);
                state.datasets.insert(dataset.clone(), spec.clone());
                let response = DatasetCreationResponse {
                    spec,
                    metadata: None,
                };
                Ok(AdminOutcome::Created(response))
            }
            AdminCall::Drop(_) => {
                state.datasets.remove(dataset);
                Ok(AdminOutcome::Done)
            }
            AdminCall::Truncate | AdminCall::Upgrade => Ok(AdminOutcome::Done),
        }
    }
}

/// Internal state to implement executor mocking.
#[derive(Default)]
struct ClientState {
    calls: Vec<(DatasetId, AdminOp)>,
    datasets: BTreeMap<DatasetId, DatasetSpecification>,
}

fn fixture_spec(
    dataset: &DatasetId,
    type_meta: &DatasetTypeMeta,
    properties: &DatasetProperties,
) -> DatasetSpecification {
    DatasetSpecification::new(json!({
        "name": dataset.name(),
        "type": type_meta.name(),
        "properties": properties.properties(),
    }))
}
