//! Async client library to perform administrative operations on datasets.
//!
//! Datasets are implemented by separately deployed executor services.
//! The [`Client`] exposes one method for each administrative operation
//! and delegates the actual work to an [`IDatasetAdmin`] backend.
use anyhow::Result;

use replicore_context::Context;

pub mod errors;
pub mod models;

#[cfg(any(test, feature = "test-fixture"))]
pub mod fixture;

use self::errors::UnexpectedOutcome;
use self::models::AdminCall;
use self::models::AdminOp;
use self::models::AdminOutcome;
use self::models::CreationParams;
use self::models::DatasetCreationResponse;
use self::models::DatasetId;
use self::models::DatasetProperties;
use self::models::DatasetSpecification;
use self::models::DatasetTypeMeta;
use self::models::DropParams;
use self::models::UpdateParams;

/// Async API client to dataset executor services.
pub struct Client {
    backend: Box<dyn IDatasetAdmin>,
}

impl Client {
    /// Create a new dataset instance and return its stored specification.
    pub async fn create(
        &self,
        context: &Context,
        dataset: &DatasetId,
        type_meta: DatasetTypeMeta,
        properties: DatasetProperties,
    ) -> Result<DatasetCreationResponse> {
        let call = AdminCall::Create(CreationParams {
            type_meta,
            properties,
        });
        let outcome = self.backend.execute(context, dataset, call).await?;
        created(AdminOp::Create, outcome)
    }

    /// Drop a dataset instance given its current specification.
    pub async fn drop(
        &self,
        context: &Context,
        dataset: &DatasetId,
        type_meta: DatasetTypeMeta,
        instance_spec: DatasetSpecification,
    ) -> Result<()> {
        let call = AdminCall::Drop(DropParams {
            type_meta,
            instance_spec,
        });
        let outcome = self.backend.execute(context, dataset, call).await?;
        done(AdminOp::Drop, outcome)
    }

    /// Check if a dataset instance exists.
    pub async fn exists(&self, context: &Context, dataset: &DatasetId) -> Result<bool> {
        let outcome = self
            .backend
            .execute(context, dataset, AdminCall::Exists)
            .await?;
        match outcome {
            AdminOutcome::Exists(exists) => Ok(exists),
            _ => anyhow::bail!(UnexpectedOutcome { op: AdminOp::Exists }),
        }
    }

    /// Remove all data from a dataset instance.
    pub async fn truncate(&self, context: &Context, dataset: &DatasetId) -> Result<()> {
        let outcome = self
            .backend
            .execute(context, dataset, AdminCall::Truncate)
            .await?;
        done(AdminOp::Truncate, outcome)
    }

    /// Update a dataset instance with new properties.
    ///
    /// The merge of existing specification and new properties is performed by the executor.
    pub async fn update(
        &self,
        context: &Context,
        dataset: &DatasetId,
        type_meta: DatasetTypeMeta,
        properties: DatasetProperties,
        existing: DatasetSpecification,
    ) -> Result<DatasetCreationResponse> {
        let call = AdminCall::Update(UpdateParams {
            type_meta,
            properties,
            existing,
        });
        let outcome = self.backend.execute(context, dataset, call).await?;
        created(AdminOp::Update, outcome)
    }

    /// Upgrade a dataset instance to the latest version of its type.
    pub async fn upgrade(&self, context: &Context, dataset: &DatasetId) -> Result<()> {
        let outcome = self
            .backend
            .execute(context, dataset, AdminCall::Upgrade)
            .await?;
        done(AdminOp::Upgrade, outcome)
    }
}

impl<B> From<B> for Client
where
    B: IDatasetAdmin + 'static,
{
    fn from(value: B) -> Self {
        let backend = Box::new(value);
        Client { backend }
    }
}

/// Interface to dataset executor clients.
///
/// Enables implementation of dataset administration across different transport protocols.
#[async_trait::async_trait]
pub trait IDatasetAdmin: Send + Sync {
    /// Perform an administrative operation on a dataset.
    ///
    /// Implementations must return the [`AdminOutcome`] variant matching the operation.
    async fn execute(
        &self,
        context: &Context,
        dataset: &DatasetId,
        call: AdminCall,
    ) -> Result<AdminOutcome>;
}

fn created(op: AdminOp, outcome: AdminOutcome) -> Result<DatasetCreationResponse> {
    match outcome {
        AdminOutcome::Created(response) => Ok(response),
        _ => anyhow::bail!(UnexpectedOutcome { op }),
    }
}

fn done(op: AdminOp, outcome: AdminOutcome) -> Result<()> {
    match outcome {
        AdminOutcome::Done => Ok(()),
        _ => anyhow::bail!(UnexpectedOutcome { op }),
    }
}
