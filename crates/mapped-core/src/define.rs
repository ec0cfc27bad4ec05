//! Declaring source types property by property.
//!
//! A [`TypeDefinition`] is the explicit counterpart of annotating a type's
//! fields: each property lists its default value, declared type,
//! validation rules and transformation rules in order. Building the
//! definition creates the descriptor and registers the rules with
//! whichever subsystems the engine has installed.
//!
//! ```ignore
//! let user = engine
//!     .define("UserDto")
//!     .property("name", |p| p.default_value("Default Name").validate(RuleKind::new("isString")))
//!     .property("password", |p| p.default_value("password123").exclude())
//!     .build();
//! ```

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use mapped_model::{
    ConstructError, DeclaredType, Instance, RuleKind, RuleOptions, TransformCategory,
    TransformRule, TypeDescriptor, TypeDescriptorBuilder, ValidationRule, Value,
};
use mapped_registry::{TransformRegistry, ValidationRegistry};
use tracing::error;

use crate::LOG_TARGET;
use crate::engine::MappedTypes;

pub struct TypeDefinition<'a> {
    engine: &'a MappedTypes,
    builder: TypeDescriptorBuilder,
    properties: Vec<PropertyDefinition>,
}

impl MappedTypes {
    /// Start declaring a source type named `name`.
    pub fn define(&self, name: impl Into<String>) -> TypeDefinition<'_> {
        TypeDefinition {
            engine: self,
            builder: TypeDescriptor::builder(name),
            properties: Vec::new(),
        }
    }
}

impl TypeDefinition<'_> {
    #[must_use]
    pub fn extends(mut self, parent: &TypeDescriptor) -> Self {
        self.builder = self.builder.extends(parent);
        self
    }

    /// Add a raw step to the construction path.
    #[must_use]
    pub fn initializer<F>(mut self, initializer: F) -> Self
    where
        F: Fn(&mut Instance) -> Result<(), ConstructError> + Send + Sync + 'static,
    {
        self.builder = self.builder.initializer(initializer);
        self
    }

    #[must_use]
    pub fn property<F>(mut self, name: impl Into<String>, configure: F) -> Self
    where
        F: FnOnce(PropertyDefinition) -> PropertyDefinition,
    {
        let property = configure(PropertyDefinition::new(name));
        if let Some(value) = &property.default {
            self.builder = self.builder.default_value(property.name.clone(), value.clone());
        }
        self.properties.push(property);
        self
    }

    /// Create the descriptor and register its metadata.
    ///
    /// Registration into a subsystem that is not installed is skipped. A
    /// registry failure is logged; the descriptor is returned regardless.
    pub fn build(self) -> TypeDescriptor {
        let ty = self.builder.build();

        if let Some(registry) = self.engine.validation().resolve()
            && let Err(err) = register_validation(registry.as_ref(), &ty, &self.properties)
        {
            report_failure(&ty, "validation", &err);
        }
        if let Some(registry) = self.engine.transformation().resolve()
            && let Err(err) = register_transformation(registry.as_ref(), &ty, &self.properties)
        {
            report_failure(&ty, "transformation", &err);
        }
        ty
    }
}

/// Metadata declared for one property.
#[derive(Debug, Clone)]
pub struct PropertyDefinition {
    name: String,
    default: Option<Value>,
    declared: Option<DeclaredType>,
    rules: Vec<PendingRule>,
    transforms: Vec<(TransformCategory, BTreeMap<String, Value>)>,
}

#[derive(Debug, Clone)]
struct PendingRule {
    kind: RuleKind,
    constraints: Vec<Value>,
    options: RuleOptions,
}

impl PropertyDefinition {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            declared: None,
            rules: Vec::new(),
            transforms: Vec::new(),
        }
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn declared(mut self, declared: DeclaredType) -> Self {
        self.declared = Some(declared);
        self
    }

    #[must_use]
    pub fn validate(self, kind: RuleKind) -> Self {
        self.validate_with(kind, Vec::new(), RuleOptions::default())
    }

    #[must_use]
    pub fn validate_with<I>(mut self, kind: RuleKind, constraints: I, options: RuleOptions) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.rules.push(PendingRule {
            kind,
            constraints: constraints.into_iter().collect(),
            options,
        });
        self
    }

    #[must_use]
    pub fn expose(self) -> Self {
        self.transform_rule(TransformCategory::Expose, BTreeMap::new())
    }

    /// Expose the property under a different serialized name.
    #[must_use]
    pub fn expose_as(self, name: impl Into<String>) -> Self {
        let options = BTreeMap::from([("name".to_string(), Value::from(name.into()))]);
        self.transform_rule(TransformCategory::Expose, options)
    }

    #[must_use]
    pub fn exclude(self) -> Self {
        self.transform_rule(TransformCategory::Exclude, BTreeMap::new())
    }

    /// Record the nested type used when converting this property.
    #[must_use]
    pub fn type_hint(self, type_name: impl Into<String>) -> Self {
        let options = BTreeMap::from([("type".to_string(), Value::from(type_name.into()))]);
        self.transform_rule(TransformCategory::TypeHint, options)
    }

    /// Attach a named custom transform; repeated calls accumulate.
    #[must_use]
    pub fn transform(self, transform: impl Into<String>) -> Self {
        let options = BTreeMap::from([("transform".to_string(), Value::from(transform.into()))]);
        self.transform_rule(TransformCategory::Transform, options)
    }

    fn transform_rule(
        mut self,
        category: TransformCategory,
        options: BTreeMap<String, Value>,
    ) -> Self {
        self.transforms.push((category, options));
        self
    }
}

fn register_validation(
    registry: &dyn ValidationRegistry,
    ty: &TypeDescriptor,
    properties: &[PropertyDefinition],
) -> Result<()> {
    for property in properties {
        if let Some(declared) = &property.declared {
            registry
                .set_declared_type(ty.id(), &property.name, declared.clone())
                .with_context(|| format!("declaring type of `{}`", property.name))?;
        }
        for pending in &property.rules {
            let rule = ValidationRule {
                kind: pending.kind.clone(),
                property: property.name.clone(),
                constraints: pending.constraints.clone(),
                options: pending.options.clone(),
                target: ty.id(),
            };
            registry.add_rule(rule).with_context(|| {
                format!("registering `{}` on `{}`", pending.kind, property.name)
            })?;
        }
    }
    Ok(())
}

fn register_transformation(
    registry: &dyn TransformRegistry,
    ty: &TypeDescriptor,
    properties: &[PropertyDefinition],
) -> Result<()> {
    for property in properties {
        for (category, options) in &property.transforms {
            let rule = TransformRule {
                target: ty.id(),
                property: property.name.clone(),
                options: options.clone(),
            };
            registry.add_rule(*category, rule).with_context(|| {
                format!("registering {} rule on `{}`", category.label(), property.name)
            })?;
        }
    }
    Ok(())
}

fn report_failure(ty: &TypeDescriptor, subsystem: &str, err: &anyhow::Error) {
    let name = ty.name();
    let detail = format!("{err:#}");
    error!(
        target: LOG_TARGET,
        source = %name,
        subsystem,
        error = %detail,
        "Cannot register {subsystem} metadata for \"{name}\" type."
    );
}
