//! Service locators for unit tests.
use anyhow::Result;

use replicore_context::Context;

use crate::errors::ServiceUnavailable;
use crate::Endpoint;
use crate::ServiceLocator;

/// Locator that fails every lookup as if no service was running.
pub struct Unavailable;

#[async_trait::async_trait]
impl ServiceLocator for Unavailable {
    async fn resolve(&self, _: &Context, service: &str) -> Result<Endpoint> {
        anyhow::bail!(ServiceUnavailable::new(service))
    }
}

/// Locator that resolves every service to the same endpoint.
pub struct Fixed(pub Endpoint);

#[async_trait::async_trait]
impl ServiceLocator for Fixed {
    async fn resolve(&self, _: &Context, _: &str) -> Result<Endpoint> {
        Ok(self.0.clone())
    }
}
