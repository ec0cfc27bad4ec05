use thiserror::Error;

/// Failure while running a type's construction path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstructError {
    /// The type has no zero-argument construction path.
    #[error("constructor requires arguments")]
    RequiresArguments,
    /// An initializer refused to produce an instance.
    #[error("constructor failed: {0}")]
    Failed(String),
}

impl ConstructError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}
