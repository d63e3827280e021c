//! Errors around service endpoints lookup.

/// No live endpoint is available for the service.
#[derive(Debug, thiserror::Error)]
#[error("no live endpoint is available for service '{service}'")]
pub struct ServiceUnavailable {
    pub service: String,
}

impl ServiceUnavailable {
    /// No live endpoint is available for the service.
    pub fn new<S: Into<String>>(service: S) -> Self {
        Self {
            service: service.into(),
        }
    }
}
