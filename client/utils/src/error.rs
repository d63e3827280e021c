//! Errors encountered during API requests or reported by the remote server.
use anyhow::Result;
use serde::de::DeserializeOwned;

/// The server rejected the request because of a conflicting resource state.
#[derive(Debug, thiserror::Error)]
#[error("the server reported a conflict: {message}")]
pub struct Conflict {
    /// Message returned by the server to describe the conflict.
    pub message: String,
}

/// The server returned an empty API response.
#[derive(Debug, thiserror::Error)]
#[error("the server returned an empty API response")]
pub struct EmptyResponse;

/// Invalid API response received.
#[derive(Debug, thiserror::Error)]
#[error("invalid API response received: {response}")]
pub struct InvalidResponse {
    pub response: String,
}

/// The server failed to process the API request.
#[derive(Debug, thiserror::Error)]
#[error("the server failed to process the API request (status {status}): {message}")]
pub struct ServerError {
    /// HTTP status code returned by the server.
    pub status: u16,

    /// Message returned by the server to describe the failure.
    pub message: String,
}

/// The request to the server did not complete.
///
/// The underlying cause (I/O, timeout, discovery, decoding) is available in the error chain.
#[derive(Debug, thiserror::Error)]
#[error("request to '{target}' did not complete")]
pub struct TransportError {
    /// Service name or URL the request was directed to.
    pub target: String,
}

impl TransportError {
    /// The request to the target did not complete.
    pub fn new<S: Into<String>>(target: S) -> Self {
        Self {
            target: target.into(),
        }
    }
}

/// Classified result of a request to a remote server.
#[derive(Debug)]
pub enum Outcome {
    /// The server processed the request and returned a (possibly empty) body.
    Success(String),

    /// The server reported a conflict with the current state of a resource.
    Conflict(String),

    /// The server failed the request for any other reason.
    Failed { status: u16, message: String },

    /// The request never completed.
    Transport {
        target: String,
        cause: anyhow::Error,
    },
}

impl Outcome {
    /// Classify a response from its status code and raw body.
    ///
    /// Only `200 OK` is considered a success.
    pub fn classify(status: u16, body: &[u8]) -> Outcome {
        let text = String::from_utf8_lossy(body).into_owned();
        match status {
            200 => Outcome::Success(text),
            409 => Outcome::Conflict(text),
            status => Outcome::Failed {
                status,
                message: text,
            },
        }
    }

    /// Convert the outcome into a result with a typed error on failure.
    pub fn into_result(self) -> Result<String> {
        match self {
            Outcome::Success(body) => Ok(body),
            Outcome::Conflict(message) => Err(anyhow::anyhow!(Conflict { message })),
            Outcome::Failed { status, message } => {
                Err(anyhow::anyhow!(ServerError { status, message }))
            }
            Outcome::Transport { target, cause } => Err(cause.context(TransportError { target })),
        }
    }
}

/// Decode the body of a successful response.
///
/// Returns `None` for empty bodies and [`InvalidResponse`] errors if the body can't be decoded.
pub fn decode<T>(body: String) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<T>(&body)
        .map_err(|error| {
            let decode = InvalidResponse { response: body };
            anyhow::anyhow!(error).context(decode)
        })
        .map(Some)
}
