use mapped_model::{PropertyFilter, TypeDescriptor};
use tracing::{debug, debug_span};

use super::derived_descriptor;
use crate::engine::MappedTypes;

impl MappedTypes {
    /// Derive a type that keeps only `keys` of `source`.
    ///
    /// Defaults, validation rules and transformation rules are all
    /// restricted to the retained properties. Keys that `source` does not
    /// have are ignored.
    pub fn pick_type<I, S>(&self, source: &TypeDescriptor, keys: I) -> TypeDescriptor
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let _span = debug_span!("pick_type", source = %source.name()).entered();
        let filter = PropertyFilter::only(keys);
        let derived = derived_descriptor("PickClassType", std::slice::from_ref(source), &filter);

        let inherited = self.inherit_validation(source, &derived, &filter);
        self.inherit_transformation(source, &derived, &filter, true);

        debug!(
            derived = %derived.id(),
            validated_properties = inherited.len(),
            "picked properties"
        );
        derived
    }
}

#[cfg(test)]
mod tests {
    use mapped_model::Value;

    use super::*;

    #[test]
    fn keeps_only_requested_defaults() {
        let engine = MappedTypes::new();
        let source = TypeDescriptor::builder("UserDto")
            .default_value("name", "Default Name")
            .default_value("password", "password123")
            .build();

        let picked = engine.pick_type(&source, ["name", "unknown"]);
        let instance = picked.instantiate().expect("instantiate");

        assert_eq!(instance.get("name"), Some(&Value::from("Default Name")));
        assert!(!instance.is_set("password"));
        assert!(!instance.is_set("unknown"));
        assert_eq!(picked.name(), "PickClassType");
    }
}
