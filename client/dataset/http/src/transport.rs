//! Send administrative requests to executor endpoints.
use anyhow::Result;
use reqwest::Client as ReqwestClient;
use reqwest::RequestBuilder;
use reqwest::Url;

use replicore_discovery::Endpoint;
use repliclient_utils::ClientOptions;

use crate::request::AdminRequest;

/// String to set as the user agent in HTTP request.
static CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Status code and body returned by an executor, before any interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub body: Vec<u8>,
    pub status: u16,
}

/// Deliver [`AdminRequest`]s to executor endpoints.
///
/// Any error returned by implementations is reported to callers as a transport failure.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send the request to the endpoint and return the raw response.
    async fn execute(&self, endpoint: &Endpoint, request: &AdminRequest) -> Result<RawResponse>;
}

/// [`Transport`] sending requests over HTTP(S) with [`reqwest`].
pub struct ReqwestTransport {
    /// API version prefix added to all request paths.
    api_version: String,

    /// Low-level [`Client`](reqwest::Client) to perform HTTP requests with.
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Initialise a transport with [`ClientOptions`].
    pub fn with<S>(api_version: S, options: &ClientOptions) -> Result<ReqwestTransport>
    where
        S: Into<String>,
    {
        let client = options.client(CLIENT_USER_AGENT).build()?;
        let api_version = api_version.into().trim_matches('/').to_string();
        Ok(ReqwestTransport {
            api_version,
            client,
        })
    }

    /// Full URL for the request sent to the given endpoint.
    ///
    /// Every path segment is percent-encoded, so namespaces and names are always sent
    /// as a single segment whatever characters they contain.
    pub fn url(&self, endpoint: &Endpoint, request: &AdminRequest) -> Result<Url> {
        let mut url = Url::parse(endpoint.address())?;
        url.path_segments_mut()
            .map_err(|_| {
                anyhow::anyhow!("endpoint '{}' can't be a base URL", endpoint.address())
            })?
            .pop_if_empty()
            .extend(self.api_version.split('/').filter(|part| !part.is_empty()))
            .extend(&request.segments);
        Ok(url)
    }

    fn prepare(&self, endpoint: &Endpoint, request: &AdminRequest) -> Result<RequestBuilder> {
        let mut builder = self.client.post(self.url(endpoint, request)?);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        Ok(builder)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, endpoint: &Endpoint, request: &AdminRequest) -> Result<RawResponse> {
        let response = self.prepare(endpoint, request)?.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { body, status })
    }
}
