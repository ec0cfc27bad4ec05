//! Validation rule records.
//!
//! The engine copies these records between types; it never evaluates
//! them. Interpretation belongs to whichever validation subsystem owns the
//! registry they are stored in.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::TypeId;
use crate::value::Value;

/// Identifier of a validation rule's kind (e.g. `isString`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleKind(Cow<'static, str>);

impl RuleKind {
    /// Skip every other rule on the property when its value is null or unset.
    pub const IS_OPTIONAL: RuleKind = RuleKind(Cow::Borrowed("isOptional"));
    /// Skip every other rule on the property only when its value is unset.
    pub const VALIDATE_IF_DEFINED: RuleKind = RuleKind(Cow::Borrowed("validateIfDefined"));

    pub fn new(kind: impl Into<String>) -> Self {
        Self(Cow::Owned(kind.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleOptions {
    pub message: Option<String>,
    pub groups: Vec<String>,
    /// Apply regardless of which groups are requested.
    pub always: bool,
}

impl RuleOptions {
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn always(mut self, always: bool) -> Self {
        self.always = always;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub kind: RuleKind,
    pub property: String,
    pub constraints: Vec<Value>,
    pub options: RuleOptions,
    /// Type the rule is registered under.
    pub target: TypeId,
}

impl ValidationRule {
    pub fn new(target: TypeId, property: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            kind,
            property: property.into(),
            constraints: Vec::new(),
            options: RuleOptions::default(),
            target,
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: impl Into<Value>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self
    }

    /// Clone of this rule registered under another type.
    pub fn retarget(&self, target: TypeId) -> Self {
        Self {
            target,
            ..self.clone()
        }
    }
}

/// Declared type of a property, needed when nested validation recurses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclaredType {
    String,
    Number,
    Boolean,
    List(Box<DeclaredType>),
    Object(TypeId),
    Any,
}
