//! Error types for registry access.

use thiserror::Error;

/// Errors raised while reading or writing a rule registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// A writer panicked while holding the registry lock.
    #[error("{0} registry lock poisoned")]
    Poisoned(&'static str),

    /// A custom registry backend refused the operation.
    #[error("registry backend failure: {0}")]
    Backend(String),
}

impl RegistryError {
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
