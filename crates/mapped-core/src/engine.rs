//! The derivation engine and its injected subsystems.

use std::sync::Arc;

use mapped_model::{PropertyFilter, TypeDescriptor};
use mapped_registry::{
    Capability, MemoryTransformStore, MemoryValidationStore, TransformRegistry, ValidationRegistry,
};

use crate::inherit::{inherit_transformation_metadata, inherit_validation_metadata};
use crate::options::EngineConfig;

/// Derives Pick, Omit, Partial and Intersection types.
///
/// The engine owns one capability slot per optional subsystem. A slot may
/// be empty; derivations then simply carry less metadata. Derivation
/// methods never fail.
///
/// # Concurrency
///
/// Derivations are synchronous. The registries lock per call, not per
/// derivation, so two derivations running at once against the same
/// registries may interleave; when both write the same (category,
/// property, target) the surviving value is unspecified.
#[derive(Debug)]
pub struct MappedTypes {
    validation: Capability<dyn ValidationRegistry>,
    transformation: Capability<dyn TransformRegistry>,
}

impl MappedTypes {
    /// Engine with in-memory stores for both subsystems.
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut builder = Self::builder();
        if config.validation {
            builder = builder.with_validation(Arc::new(MemoryValidationStore::new()));
        }
        if config.transformation {
            builder = builder.with_transformation(Arc::new(MemoryTransformStore::new()));
        }
        builder.build()
    }

    pub fn builder() -> MappedTypesBuilder {
        MappedTypesBuilder::default()
    }

    pub fn validation(&self) -> &Capability<dyn ValidationRegistry> {
        &self.validation
    }

    pub fn transformation(&self) -> &Capability<dyn TransformRegistry> {
        &self.transformation
    }

    pub(crate) fn inherit_validation(
        &self,
        source: &TypeDescriptor,
        derived: &TypeDescriptor,
        filter: &PropertyFilter,
    ) -> Vec<String> {
        let registry = self.validation.resolve();
        inherit_validation_metadata(registry.as_deref(), source, derived, filter)
    }

    pub(crate) fn inherit_transformation(
        &self,
        source: &TypeDescriptor,
        derived: &TypeDescriptor,
        filter: &PropertyFilter,
        stack: bool,
    ) {
        let registry = self.transformation.resolve();
        inherit_transformation_metadata(registry.as_deref(), source, derived, filter, stack);
    }
}

impl Default for MappedTypes {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for an engine with custom registry implementations.
#[derive(Default)]
pub struct MappedTypesBuilder {
    validation: Option<Arc<dyn ValidationRegistry>>,
    transformation: Option<Arc<dyn TransformRegistry>>,
}

impl MappedTypesBuilder {
    #[must_use]
    pub fn with_validation(mut self, registry: Arc<dyn ValidationRegistry>) -> Self {
        self.validation = Some(registry);
        self
    }

    #[must_use]
    pub fn with_transformation(mut self, registry: Arc<dyn TransformRegistry>) -> Self {
        self.transformation = Some(registry);
        self
    }

    pub fn build(self) -> MappedTypes {
        MappedTypes {
            validation: self
                .validation
                .map_or_else(Capability::absent, Capability::present),
            transformation: self
                .transformation
                .map_or_else(Capability::absent, Capability::present),
        }
    }
}
