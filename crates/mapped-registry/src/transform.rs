//! Transformation rule registry.

use std::collections::HashMap;
use std::sync::RwLock;

use mapped_model::{PropertyRules, TransformCategory, TransformEntry, TransformRule, TypeId};

use crate::error::{RegistryError, Result};

const REGISTRY_NAME: &str = "transformation";

/// Storage owned by a transformation subsystem: per category, a map from
/// type to its per-property rules.
pub trait TransformRegistry: Send + Sync {
    /// Rules registered directly under `ty` for `category`.
    fn entries(&self, category: TransformCategory, ty: TypeId) -> Result<Option<PropertyRules>>;

    /// Replace the rules registered under `ty` for `category`.
    fn set_entries(
        &self,
        category: TransformCategory,
        ty: TypeId,
        rules: PropertyRules,
    ) -> Result<()>;

    /// Register one rule the way a property declaration would: generic
    /// transforms accumulate, other categories keep the latest record.
    fn add_rule(&self, category: TransformCategory, rule: TransformRule) -> Result<()> {
        let ty = rule.target;
        let mut rules = self.entries(category, ty)?.unwrap_or_default();
        let property = rule.property.clone();
        let entry = if category.is_list_shaped() {
            match rules.remove(&property) {
                Some(previous) => previous.stack(TransformEntry::List(vec![rule])),
                None => TransformEntry::List(vec![rule]),
            }
        } else {
            TransformEntry::Single(rule)
        };
        rules.insert(property, entry);
        self.set_entries(category, ty, rules)
    }
}

/// In-memory [`TransformRegistry`].
///
/// Like `MemoryValidationStore`, each call locks on its own; concurrent
/// derivations writing the same (category, property, target) triple have
/// undefined last-write order.
#[derive(Debug, Default)]
pub struct MemoryTransformStore {
    categories: RwLock<HashMap<TransformCategory, HashMap<TypeId, PropertyRules>>>,
}

impl MemoryTransformStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransformRegistry for MemoryTransformStore {
    fn entries(&self, category: TransformCategory, ty: TypeId) -> Result<Option<PropertyRules>> {
        let categories = self
            .categories
            .read()
            .map_err(|_| RegistryError::Poisoned(REGISTRY_NAME))?;
        Ok(categories
            .get(&category)
            .and_then(|types| types.get(&ty))
            .cloned())
    }

    fn set_entries(
        &self,
        category: TransformCategory,
        ty: TypeId,
        rules: PropertyRules,
    ) -> Result<()> {
        let mut categories = self
            .categories
            .write()
            .map_err(|_| RegistryError::Poisoned(REGISTRY_NAME))?;
        categories.entry(category).or_default().insert(ty, rules);
        Ok(())
    }
}
