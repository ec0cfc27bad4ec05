//! Transformation rule records and their storage shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::TypeId;
use crate::value::Value;

/// Transformation rule category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransformCategory {
    TypeHint,
    Expose,
    Exclude,
    Transform,
}

impl TransformCategory {
    /// All categories, in the order inheritance processes them.
    pub const fn all() -> &'static [Self] {
        &[Self::TypeHint, Self::Expose, Self::Exclude, Self::Transform]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TypeHint => "type hint",
            Self::Expose => "expose",
            Self::Exclude => "exclude",
            Self::Transform => "transform",
        }
    }

    /// Generic transforms stack as lists; the others hold one record per
    /// property.
    pub fn is_list_shaped(&self) -> bool {
        matches!(self, Self::Transform)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRule {
    pub target: TypeId,
    pub property: String,
    pub options: BTreeMap<String, Value>,
}

impl TransformRule {
    pub fn new(target: TypeId, property: impl Into<String>) -> Self {
        Self {
            target,
            property: property.into(),
            options: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn retarget(&self, target: TypeId) -> Self {
        Self {
            target,
            ..self.clone()
        }
    }
}

/// Value stored for one property within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformEntry {
    Single(TransformRule),
    List(Vec<TransformRule>),
}

impl TransformEntry {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn rules(&self) -> &[TransformRule] {
        match self {
            Self::Single(rule) => std::slice::from_ref(rule),
            Self::List(rules) => rules,
        }
    }

    pub fn retarget(&self, target: TypeId) -> Self {
        match self {
            Self::Single(rule) => Self::Single(rule.retarget(target)),
            Self::List(rules) => {
                Self::List(rules.iter().map(|rule| rule.retarget(target)).collect())
            }
        }
    }

    /// Merge `next` on top of `self` under the stacking policy.
    ///
    /// When either side is list-shaped the result is a list holding the
    /// previous rules followed by the new ones. Two single records do not
    /// stack: the new one replaces the previous.
    pub fn stack(self, next: TransformEntry) -> TransformEntry {
        match (self, next) {
            (Self::Single(_), Self::Single(next)) => Self::Single(next),
            (previous, next) => {
                let mut rules = previous.into_rules();
                rules.extend(next.into_rules());
                Self::List(rules)
            }
        }
    }

    fn into_rules(self) -> Vec<TransformRule> {
        match self {
            Self::Single(rule) => vec![rule],
            Self::List(rules) => rules,
        }
    }
}

/// Per-property rules of one type within one category.
pub type PropertyRules = BTreeMap<String, TransformEntry>;
