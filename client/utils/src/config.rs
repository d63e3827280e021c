//! Configuration options for HTTP(S) clients.
use std::time::Duration;

use reqwest::Client;
use reqwest::ClientBuilder;

/// Options to initialise clients with.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// Timeout for requests made by the client.
    pub timeout: Duration,

    /// Timeout for new connections initialised by the client.
    pub timeout_connect: Duration,
}

impl ClientOptions {
    /// Prepare a [`ClientBuilder`] configured with these options.
    pub fn client(&self, user_agent: &str) -> ClientBuilder {
        Client::builder()
            .connect_timeout(self.timeout_connect)
            .timeout(self.timeout)
            .user_agent(user_agent)
    }

    /// Define options for API clients, starting from the defaults.
    pub fn define() -> ClientOptionsBuilder {
        ClientOptionsBuilder {
            timeout: Duration::from_secs(30),
            timeout_connect: Duration::from_secs(1),
        }
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions::define().build()
    }
}

/// Incrementally build [`ClientOptions`] objects.
pub struct ClientOptionsBuilder {
    timeout: Duration,
    timeout_connect: Duration,
}

impl ClientOptionsBuilder {
    /// All options are set, get a usable options object.
    pub fn build(self) -> ClientOptions {
        self.into()
    }

    /// Set the timeout for requests made by the client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout for new connections initialised by the client.
    pub fn timeout_connect(mut self, timeout: Duration) -> Self {
        self.timeout_connect = timeout;
        self
    }
}

impl From<ClientOptionsBuilder> for ClientOptions {
    fn from(value: ClientOptionsBuilder) -> Self {
        ClientOptions {
            timeout: value.timeout,
            timeout_connect: value.timeout_connect,
        }
    }
}
