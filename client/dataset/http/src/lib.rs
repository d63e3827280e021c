//! Dataset administration client for the HTTP(S) protocol.
//!
//! Requests are sent to an instance of the executor service located with [`Discovery`]
//! for every operation, so executors can come and go between calls.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as Json;

use replicore_context::Context;
use replicore_discovery::Discovery;
use replidataset_client::models::AdminCall;
use replidataset_client::models::AdminOp;
use replidataset_client::models::AdminOutcome;
use replidataset_client::models::DatasetAdminOpResponse;
use replidataset_client::models::DatasetCreationResponse;
use replidataset_client::models::DatasetId;
use replidataset_client::IDatasetAdmin;
use repliclient_utils::ClientOptions;
use repliclient_utils::EmptyResponse;
use repliclient_utils::InvalidResponse;
use repliclient_utils::Outcome;
use repliclient_utils::TransportError;

mod request;
mod telemetry;
mod transport;

pub use self::request::AdminRequest;
pub use self::request::DEFAULT_USER_ID_HEADER;
pub use self::request::METHOD;
pub use self::telemetry::register_metrics;
pub use self::transport::RawResponse;
pub use self::transport::ReqwestTransport;
pub use self::transport::Transport;

/// Default name of the service implementing dataset administrative operations.
pub const DEFAULT_SERVICE: &str = "dataset.executor";

/// Options for HTTP(S) dataset executor clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorOptions {
    /// Version prefix of the executor API.
    pub api_version: String,

    /// Logical name of the executor service to locate with discovery.
    pub service: String,

    /// Timeout (in seconds) for requests to executors.
    pub timeout_sec: u64,

    /// Timeout (in seconds) for new connections to executors.
    pub timeout_connect_sec: u64,

    /// Header used to propagate the name of the principal to executors.
    pub user_id_header: String,
}

impl ExecutorOptions {
    /// Low-level HTTP client options derived from these options.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions::define()
            .timeout(Duration::from_secs(self.timeout_sec))
            .timeout_connect(Duration::from_secs(self.timeout_connect_sec))
            .build()
    }
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        ExecutorOptions {
            api_version: "v3".into(),
            service: DEFAULT_SERVICE.into(),
            timeout_sec: 30,
            timeout_connect_sec: 1,
            user_id_header: DEFAULT_USER_ID_HEADER.into(),
        }
    }
}

/// Dataset administration client for the HTTP(S) protocol.
pub struct HttpClient {
    discovery: Discovery,
    options: ExecutorOptions,
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    /// Initialise a client sending requests with [`reqwest`].
    pub fn with(discovery: Discovery, options: ExecutorOptions) -> Result<HttpClient> {
        let transport = ReqwestTransport::with(&options.api_version, &options.client_options())?;
        Ok(HttpClient::with_transport(discovery, options, transport))
    }

    /// Initialise a client sending requests with a custom [`Transport`].
    pub fn with_transport<T>(
        discovery: Discovery,
        options: ExecutorOptions,
        transport: T,
    ) -> HttpClient
    where
        T: Transport + 'static,
    {
        HttpClient {
            discovery,
            options,
            transport: Arc::new(transport),
        }
    }
}

#[async_trait::async_trait]
impl IDatasetAdmin for HttpClient {
    async fn execute(
        &self,
        context: &Context,
        dataset: &DatasetId,
        call: AdminCall,
    ) -> Result<AdminOutcome> {
        let op = call.op();
        let request = AdminRequest::build(
            dataset,
            &call,
            context.principal.as_deref(),
            &self.options.user_id_header,
        )?;
        let logger = context.logger.new(slog::o!(
            "dataset" => dataset.to_string(),
            "op" => op.name(),
        ));
        slog::trace!(
            logger, "Executing dataset admin request";
            "path" => &request.path,
            "body" => request.body.as_deref(),
        );

        telemetry::OPS_COUNT.with_label_values(&[op.name()]).inc();
        let timer = telemetry::OPS_DURATION
            .with_label_values(&[op.name()])
            .start_timer();
        let result = self
            .perform(context, &logger, op, &request)
            .await
            .and_then(|body| {
                decode_outcome(op, body)
                    .with_context(|| TransportError::new(self.options.service.clone()))
            });
        timer.observe_duration();

        if let Err(error) = &result {
            telemetry::OPS_ERR.with_label_values(&[op.name()]).inc();
            slog::trace!(
                logger, "Dataset admin request failed";
                "path" => &request.path,
                "error" => format!("{:#}", error),
            );
        }
        result
    }
}

impl HttpClient {
    /// Locate an executor, send the request and classify the response.
    async fn perform(
        &self,
        context: &Context,
        logger: &slog::Logger,
        op: AdminOp,
        request: &AdminRequest,
    ) -> Result<String> {
        let service = &self.options.service;
        let endpoint = match self.discovery.resolve(context, service).await {
            Ok(endpoint) => endpoint,
            Err(cause) => {
                let target = service.clone();
                return Outcome::Transport { target, cause }.into_result();
            }
        };
        let outcome = match self.transport.execute(&endpoint, request).await {
            Err(cause) => {
                let target = endpoint.address().to_string();
                Outcome::Transport { target, cause }
            }
            Ok(response) => {
                let status = response.status.to_string();
                telemetry::HTTP_STATUS
                    .with_label_values(&[op.name(), &status])
                    .inc();
                slog::trace!(
                    logger, "Executed dataset admin request";
                    "path" => &request.path,
                    "status" => response.status,
                );
                Outcome::classify(response.status, &response.body)
            }
        };
        outcome.into_result()
    }
}

/// Response to `exists` operations as either a plain boolean or an envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExistsResponse {
    Scalar(bool),
    Envelope(DatasetAdminOpResponse),
}

/// Decode the body of a successful response into the operation specific outcome.
fn decode_outcome(op: AdminOp, body: String) -> Result<AdminOutcome> {
    match op {
        AdminOp::Exists => {
            let response = body.clone();
            let exists = match repliclient_utils::decode::<ExistsResponse>(body)? {
                None => anyhow::bail!(EmptyResponse),
                Some(ExistsResponse::Scalar(exists)) => exists,
                Some(ExistsResponse::Envelope(envelope)) => match envelope.result {
                    Some(Json::Bool(exists)) => exists,
                    _ => anyhow::bail!(InvalidResponse { response }),
                },
            };
            Ok(AdminOutcome::Exists(exists))
        }
        AdminOp::Create | AdminOp::Update => {
            match repliclient_utils::decode::<DatasetCreationResponse>(body)? {
                None => anyhow::bail!(EmptyResponse),
                Some(response) => Ok(AdminOutcome::Created(response)),
            }
        }
        AdminOp::Drop | AdminOp::Truncate | AdminOp::Upgrade => Ok(AdminOutcome::Done),
    }
}
