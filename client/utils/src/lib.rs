//! Utilities for HTTP clients from the [`reqwest`] crate.
mod config;
mod error;

pub use self::config::ClientOptions;
pub use self::config::ClientOptionsBuilder;
pub use self::error::decode;
pub use self::error::Conflict;
pub use self::error::EmptyResponse;
pub use self::error::InvalidResponse;
pub use self::error::Outcome;
pub use self::error::ServerError;
pub use self::error::TransportError;
