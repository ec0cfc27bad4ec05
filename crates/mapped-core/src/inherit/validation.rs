use anyhow::{Context, Result};
use mapped_model::{PropertyFilter, TypeDescriptor};
use mapped_registry::ValidationRegistry;
use tracing::error;

use crate::LOG_TARGET;

/// Copy validation rules of `source` that pass `filter` onto `derived`.
///
/// Each surviving rule is cloned, retargeted at `derived` and registered;
/// the declared type of its property travels with it. Returns the distinct
/// property names that received at least one rule, in first-seen order.
///
/// Returns an empty list when no registry is available. A registry failure
/// is logged with the source's name and never propagated; the rules copied
/// before it stay registered, and their properties are still returned.
pub fn inherit_validation_metadata(
    registry: Option<&dyn ValidationRegistry>,
    source: &TypeDescriptor,
    derived: &TypeDescriptor,
    filter: &PropertyFilter,
) -> Vec<String> {
    let Some(registry) = registry else {
        return Vec::new();
    };
    let mut inherited: Vec<String> = Vec::new();
    if let Err(err) = copy_rules(registry, source, derived, filter, &mut inherited) {
        let name = source.name();
        let detail = format!("{err:#}");
        error!(
            target: LOG_TARGET,
            source = %name,
            error = %detail,
            copied_properties = inherited.len(),
            "Validation metadata cannot be inherited for \"{name}\" type."
        );
    }
    inherited
}

/// Records each property in `inherited` as soon as one of its rules lands.
fn copy_rules(
    registry: &dyn ValidationRegistry,
    source: &TypeDescriptor,
    derived: &TypeDescriptor,
    filter: &PropertyFilter,
    inherited: &mut Vec<String>,
) -> Result<()> {
    let rules = registry
        .rules_for(source)
        .with_context(|| format!("reading validation rules of {}", source.id()))?;

    for rule in rules.iter().filter(|rule| filter.accepts(&rule.property)) {
        let declared = registry
            .declared_type(source, &rule.property)
            .with_context(|| format!("reading declared type of `{}`", rule.property))?;
        if let Some(declared) = declared {
            registry
                .set_declared_type(derived.id(), &rule.property, declared)
                .with_context(|| format!("declaring type of `{}`", rule.property))?;
        }
        registry
            .add_rule(rule.retarget(derived.id()))
            .with_context(|| format!("registering `{}` rule on `{}`", rule.kind, rule.property))?;
        if !inherited.contains(&rule.property) {
            inherited.push(rule.property.clone());
        }
    }
    Ok(())
}
