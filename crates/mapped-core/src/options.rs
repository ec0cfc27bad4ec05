//! Configuration options for the derivation engine.

use serde::{Deserialize, Serialize};

/// Which optional subsystems [`MappedTypes::from_config`] installs.
///
/// [`MappedTypes::from_config`]: crate::MappedTypes::from_config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Install an in-memory validation registry.
    pub validation: bool,
    /// Install an in-memory transformation registry.
    pub transformation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validation: true,
            transformation: true,
        }
    }
}

impl EngineConfig {
    /// Neither subsystem installed: derivations only carry default values.
    pub fn metadata_free() -> Self {
        Self {
            validation: false,
            transformation: false,
        }
    }

    #[must_use]
    pub fn with_validation(mut self, enable: bool) -> Self {
        self.validation = enable;
        self
    }

    #[must_use]
    pub fn with_transformation(mut self, enable: bool) -> Self {
        self.transformation = enable;
        self
    }
}

/// Options for [`MappedTypes::partial_type`].
///
/// [`MappedTypes::partial_type`]: crate::MappedTypes::partial_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialOptions {
    /// Treat an explicit null like an unset value.
    ///
    /// When false, only unset properties skip validation; a null is still
    /// checked against the inherited rules.
    #[serde(alias = "skipNullProperties")]
    pub treat_null_as_unset: bool,
}

impl Default for PartialOptions {
    fn default() -> Self {
        Self {
            treat_null_as_unset: true,
        }
    }
}

impl PartialOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_treat_null_as_unset(mut self, enable: bool) -> Self {
        self.treat_null_as_unset = enable;
        self
    }
}
