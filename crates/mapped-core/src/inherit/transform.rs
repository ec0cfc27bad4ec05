use std::collections::BTreeSet;

use anyhow::{Context, Result};
use mapped_model::{PropertyFilter, TransformCategory, TypeDescriptor};
use mapped_registry::TransformRegistry;
use tracing::error;

use crate::LOG_TARGET;

/// Merge transformation rules of `source` and its ancestors into `derived`.
///
/// For every category the ancestor chain is walked from `source` up to,
/// but not including, the root. Each ancestor's rules that pass `filter`
/// are retargeted at `derived` and merged into what `derived` already
/// holds for that category:
///
/// - nothing registered for the property yet: the rule is installed;
/// - `stack` is true: list-shaped values concatenate (previous first),
///   single records replace;
/// - `stack` is false: a value registered before this call is replaced,
///   while values produced earlier in this same walk still stack.
///
/// A missing registry is a no-op. A registry failure is logged with the
/// source's name and never propagated; categories merged before the
/// failure stay merged.
pub fn inherit_transformation_metadata(
    registry: Option<&dyn TransformRegistry>,
    source: &TypeDescriptor,
    derived: &TypeDescriptor,
    filter: &PropertyFilter,
    stack: bool,
) {
    let Some(registry) = registry else {
        return;
    };
    let merged = TransformCategory::all().iter().try_for_each(|&category| {
        merge_category(registry, category, source, derived, filter, stack)
            .with_context(|| format!("merging {} rules", category.label()))
    });
    if let Err(err) = merged {
        let name = source.name();
        let detail = format!("{err:#}");
        error!(
            target: LOG_TARGET,
            source = %name,
            error = %detail,
            "Transformation metadata cannot be inherited for \"{name}\" type."
        );
    }
}

fn merge_category(
    registry: &dyn TransformRegistry,
    category: TransformCategory,
    source: &TypeDescriptor,
    derived: &TypeDescriptor,
    filter: &PropertyFilter,
    stack: bool,
) -> Result<()> {
    let mut walked: BTreeSet<String> = BTreeSet::new();

    for ancestor in source
        .ancestors()
        .into_iter()
        .take_while(|ancestor| !ancestor.is_root())
    {
        let Some(rules) = registry
            .entries(category, ancestor)
            .with_context(|| format!("reading rules of {ancestor}"))?
        else {
            continue;
        };

        let mut merged = registry
            .entries(category, derived.id())
            .with_context(|| format!("reading rules of {}", derived.id()))?
            .unwrap_or_default();

        for (property, entry) in rules
            .into_iter()
            .filter(|(property, _)| filter.accepts(property))
        {
            let entry = entry.retarget(derived.id());
            let next = match merged.remove(&property) {
                Some(previous) if stack || walked.contains(&property) => previous.stack(entry),
                _ => entry,
            };
            walked.insert(property.clone());
            merged.insert(property, next);
        }

        registry
            .set_entries(category, derived.id(), merged)
            .with_context(|| format!("writing rules of {}", derived.id()))?;
    }
    Ok(())
}
