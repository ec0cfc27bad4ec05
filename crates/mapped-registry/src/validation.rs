//! Validation rule registry.

use std::collections::HashMap;
use std::sync::RwLock;

use mapped_model::{DeclaredType, TypeDescriptor, TypeId, ValidationRule};

use crate::error::{RegistryError, Result};

const REGISTRY_NAME: &str = "validation";

/// Storage owned by a validation subsystem.
///
/// Lookups take the full descriptor so an implementation can resolve rules
/// through the type's ancestors, the way the subsystem does when it
/// validates an instance.
pub trait ValidationRegistry: Send + Sync {
    /// Rules that apply to `ty`, in registration order.
    fn rules_for(&self, ty: &TypeDescriptor) -> Result<Vec<ValidationRule>>;

    /// Append a rule under `rule.target`.
    fn add_rule(&self, rule: ValidationRule) -> Result<()>;

    fn declared_type(&self, ty: &TypeDescriptor, property: &str) -> Result<Option<DeclaredType>>;

    fn set_declared_type(&self, ty: TypeId, property: &str, declared: DeclaredType) -> Result<()>;
}

/// In-memory [`ValidationRegistry`].
///
/// Every read and write takes the lock for that call only. Two derivations
/// running concurrently against the same store interleave at call
/// granularity, so their last-write order on a shared target is undefined.
#[derive(Debug, Default)]
pub struct MemoryValidationStore {
    rules: RwLock<HashMap<TypeId, Vec<ValidationRule>>>,
    declared: RwLock<HashMap<(TypeId, String), DeclaredType>>,
}

impl MemoryValidationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules registered directly under `ty`, ignoring ancestors.
    pub fn own_rules(&self, ty: TypeId) -> Result<Vec<ValidationRule>> {
        let rules = self
            .rules
            .read()
            .map_err(|_| RegistryError::Poisoned(REGISTRY_NAME))?;
        Ok(rules.get(&ty).cloned().unwrap_or_default())
    }
}

impl ValidationRegistry for MemoryValidationStore {
    fn rules_for(&self, ty: &TypeDescriptor) -> Result<Vec<ValidationRule>> {
        let rules = self
            .rules
            .read()
            .map_err(|_| RegistryError::Poisoned(REGISTRY_NAME))?;
        Ok(ty
            .lineage()
            .filter_map(|ancestor| rules.get(&ancestor.id()))
            .flatten()
            .cloned()
            .collect())
    }

    fn add_rule(&self, rule: ValidationRule) -> Result<()> {
        let mut rules = self
            .rules
            .write()
            .map_err(|_| RegistryError::Poisoned(REGISTRY_NAME))?;
        rules.entry(rule.target).or_default().push(rule);
        Ok(())
    }

    fn declared_type(&self, ty: &TypeDescriptor, property: &str) -> Result<Option<DeclaredType>> {
        let declared = self
            .declared
            .read()
            .map_err(|_| RegistryError::Poisoned(REGISTRY_NAME))?;
        Ok(ty
            .lineage()
            .find_map(|ancestor| declared.get(&(ancestor.id(), property.to_string())))
            .cloned())
    }

    fn set_declared_type(&self, ty: TypeId, property: &str, declared: DeclaredType) -> Result<()> {
        let mut store = self
            .declared
            .write()
            .map_err(|_| RegistryError::Poisoned(REGISTRY_NAME))?;
        store.insert((ty, property.to_string()), declared);
        Ok(())
    }
}
