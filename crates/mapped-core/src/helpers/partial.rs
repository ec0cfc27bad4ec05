use mapped_model::{PropertyFilter, RuleKind, TypeDescriptor, ValidationRule};
use tracing::{debug, debug_span, error};

use super::derived_descriptor;
use crate::LOG_TARGET;
use crate::engine::MappedTypes;
use crate::options::PartialOptions;

impl MappedTypes {
    /// Derive a type whose validated properties may be left out.
    ///
    /// Every property that inherits at least one validation rule also gets
    /// an optional-ness rule: `isOptional` (null or unset skips validation)
    /// by default, or `validateIfDefined` (only unset skips validation)
    /// when `treat_null_as_unset` is false. The result is named
    /// `Partial{source}`.
    pub fn partial_type(&self, source: &TypeDescriptor, options: PartialOptions) -> TypeDescriptor {
        let name = source.name();
        let _span = debug_span!("partial_type", source = %name).entered();
        let filter = PropertyFilter::All;
        let derived =
            derived_descriptor("PartialClassType", std::slice::from_ref(source), &filter);

        let inherited = self.inherit_validation(source, &derived, &filter);
        self.inherit_transformation(source, &derived, &filter, true);

        let kind = if options.treat_null_as_unset {
            RuleKind::IS_OPTIONAL
        } else {
            RuleKind::VALIDATE_IF_DEFINED
        };
        if let Some(registry) = self.validation().resolve() {
            for property in &inherited {
                let rule = ValidationRule::new(derived.id(), property.as_str(), kind.clone());
                if let Err(err) = registry.add_rule(rule) {
                    error!(
                        target: LOG_TARGET,
                        source = %name,
                        property = %property,
                        error = %err,
                        "Cannot mark \"{property}\" optional on partial of \"{name}\"."
                    );
                }
            }
        }

        derived.set_name(format!("Partial{name}"));
        debug!(
            derived = %derived.id(),
            optional_properties = inherited.len(),
            rule = %kind,
            "derived partial type"
        );
        derived
    }
}
