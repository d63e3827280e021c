//! The [`Context`] is a general purpose immutable container to carry scoped values around.
//!
//! Every dataset administration call receives a [`Context`] describing who is performing
//! the operation and where diagnostics should be logged.
//!
//! Contexts are organised into a tree structure:
//!
//! - A root context represents the general process wide scope.
//! - Derived contexts represents a narrower scope within their parent with additional
//!   or updated information attached to them.
//!
//! For example: the root context holds the process-wide [`Logger`] and no principal.
//! Individual operations can derive a context with the name of the user they act for
//! and a [`Logger`] decorated with the dataset being operated on.
use slog::Logger;
use slog::OwnedKV;
use slog::SendSyncRefUnwindSafeKV;

/// The [`Context`] is a general purpose container to carry scoped values around.
///
/// Refer to the [crate level docs](crate) for details.
#[derive(Clone, Debug)]
pub struct Context {
    /// Logger with contextual attributes attached to it.
    pub logger: Logger,

    /// Name of the principal (user) the operation is performed for, if known.
    ///
    /// A value of `None` indicates the operation is anonymous.
    pub principal: Option<String>,
}

impl Context {
    /// Derive a new [`Context`] by making changes to the current one.
    pub fn derive(&self) -> ContextBuilder {
        ContextBuilder {
            logger: self.logger.clone(),
            principal: self.principal.clone(),
        }
    }

    /// Derive a new [`Context`] by making changes to the current one using the provided callback.
    pub fn derive_with<F>(&self, callback: F) -> Context
    where
        F: FnOnce(ContextBuilder) -> ContextBuilder,
    {
        let builder = callback(self.derive());
        builder.build()
    }

    /// Initialise a new root context with no values attached.
    pub fn root(logger: Logger) -> ContextBuilder {
        ContextBuilder {
            logger,
            principal: None,
        }
    }
}

/// A builder for root and derived contexts.
pub struct ContextBuilder {
    logger: Logger,
    principal: Option<String>,
}

impl ContextBuilder {
    /// Clear any principal so the context to be created is anonymous.
    pub fn anonymous(mut self) -> Self {
        self.principal = None;
        self
    }

    /// Finalise the build process and return a new [`Context`].
    pub fn build(self) -> Context {
        Context {
            logger: self.logger,
            principal: self.principal,
        }
    }

    /// Update the [`Context`] logger to attach new log key/pair values.
    pub fn log_values<T>(mut self, entries: OwnedKV<T>) -> Self
    where
        T: SendSyncRefUnwindSafeKV + 'static,
    {
        self.logger = self.logger.new(entries);
        self
    }

    /// Set the name of the principal operations are performed for.
    pub fn principal<S>(mut self, name: S) -> Self
    where
        S: Into<String>,
    {
        self.principal = Some(name.into());
        self
    }
}

#[cfg(any(test, feature = "test-fixture"))]
impl Context {
    /// Create an empty context useful for test.
    pub fn fixture() -> Context {
        let logger = Logger::root(slog::Discard, slog::o!());
        Context {
            logger,
            principal: None,
        }
    }
}
