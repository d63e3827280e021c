//! Locate network endpoints for logical services at run-time.
//!
//! Clients depend on the [`ServiceLocator`] lookup contract only.
//! How endpoints are discovered, cached or balanced is left to implementations.
use std::sync::Arc;

use anyhow::Result;

use replicore_context::Context;

mod fixed;

pub mod errors;

#[cfg(any(test, feature = "test-fixture"))]
pub mod fixture;

pub use self::fixed::DiscoveryConf;
pub use self::fixed::StaticDiscovery;

/// Reachable network endpoint for a service instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    address: String,
}

impl Endpoint {
    /// Endpoint for the service instance at the given address.
    pub fn new<S>(address: S) -> Endpoint
    where
        S: Into<String>,
    {
        let mut address = address.into();
        if !address.ends_with('/') {
            address.push('/');
        }
        Endpoint { address }
    }

    /// Base address of the service instance, always with a trailing slash.
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Lookup contract for service discovery implementations.
#[async_trait::async_trait]
pub trait ServiceLocator: Send + Sync {
    /// Return a reachable [`Endpoint`] for the given logical service name.
    ///
    /// Implementations must fail with [`ServiceUnavailable`](errors::ServiceUnavailable)
    /// when no live endpoint is known for the service.
    async fn resolve(&self, context: &Context, service: &str) -> Result<Endpoint>;
}

/// Resolve logical service names to [`Endpoint`]s.
#[derive(Clone)]
pub struct Discovery {
    inner: Arc<dyn ServiceLocator>,
}

impl Discovery {
    /// Return a reachable [`Endpoint`] for the given logical service name.
    ///
    /// For details see [`ServiceLocator::resolve`].
    pub async fn resolve(&self, context: &Context, service: &str) -> Result<Endpoint> {
        self.inner.resolve(context, service).await
    }
}

impl<T> From<T> for Discovery
where
    T: ServiceLocator + 'static,
{
    fn from(value: T) -> Self {
        let inner = Arc::new(value);
        Discovery { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::Endpoint;

    #[test]
    fn endpoint_adds_trailing_slash() {
        let endpoint = Endpoint::new("http://host:1234");
        assert_eq!(endpoint.address(), "http://host:1234/");
    }

    #[test]
    fn endpoint_keeps_trailing_slash() {
        let endpoint = Endpoint::new("http://host:1234/");
        assert_eq!(endpoint.address(), "http://host:1234/");
    }
}
