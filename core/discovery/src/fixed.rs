//! Discover services from a fixed list of addresses set in configuration.
use std::collections::BTreeMap;

use anyhow::Result;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde::Serialize;

use replicore_context::Context;

use crate::errors::ServiceUnavailable;
use crate::Endpoint;
use crate::ServiceLocator;

/// Configuration of statically known services.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConf {
    /// Addresses of known instances for each logical service name.
    #[serde(default)]
    pub services: BTreeMap<String, Vec<String>>,
}

/// Locate services from a fixed set of addresses.
///
/// When a service has more than one address a random one is returned for every lookup.
#[derive(Clone, Debug, Default)]
pub struct StaticDiscovery {
    services: BTreeMap<String, Vec<Endpoint>>,
}

impl StaticDiscovery {
    /// Register an address for a service.
    pub fn with_address<S1, S2>(mut self, service: S1, address: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let endpoint = Endpoint::new(address);
        self.services
            .entry(service.into())
            .or_default()
            .push(endpoint);
        self
    }
}

impl From<&DiscoveryConf> for StaticDiscovery {
    fn from(conf: &DiscoveryConf) -> Self {
        let services = conf
            .services
            .iter()
            .map(|(service, addresses)| {
                let endpoints = addresses.iter().cloned().map(Endpoint::new).collect();
                (service.clone(), endpoints)
            })
            .collect();
        StaticDiscovery { services }
    }
}

#[async_trait::async_trait]
impl ServiceLocator for StaticDiscovery {
    async fn resolve(&self, context: &Context, service: &str) -> Result<Endpoint> {
        let endpoint = self
            .services
            .get(service)
            .and_then(|endpoints| endpoints.choose(&mut rand::thread_rng()));
        match endpoint {
            Some(endpoint) => {
                slog::trace!(
                    context.logger, "Resolved service endpoint";
                    "service" => service,
                    "address" => endpoint.address(),
                );
                Ok(endpoint.clone())
            }
            None => anyhow::bail!(ServiceUnavailable::new(service)),
        }
    }
}
