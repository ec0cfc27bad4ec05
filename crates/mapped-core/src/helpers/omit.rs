use mapped_model::{PropertyFilter, TypeDescriptor};
use tracing::{debug, debug_span};

use super::derived_descriptor;
use crate::engine::MappedTypes;

impl MappedTypes {
    /// Derive a type with every property of `source` except `keys`.
    pub fn omit_type<I, S>(&self, source: &TypeDescriptor, keys: I) -> TypeDescriptor
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let _span = debug_span!("omit_type", source = %source.name()).entered();
        let filter = PropertyFilter::except(keys);
        let derived = derived_descriptor("OmitClassType", std::slice::from_ref(source), &filter);

        let inherited = self.inherit_validation(source, &derived, &filter);
        self.inherit_transformation(source, &derived, &filter, true);

        debug!(
            derived = %derived.id(),
            validated_properties = inherited.len(),
            "omitted properties"
        );
        derived
    }
}
