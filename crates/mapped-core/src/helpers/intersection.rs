use mapped_model::{PropertyFilter, TypeDescriptor};
use tracing::{debug, debug_span};

use super::derived_descriptor;
use crate::engine::MappedTypes;

impl MappedTypes {
    /// Derive a type carrying the properties of every source.
    ///
    /// Defaults are taken from the first source that sets a property.
    /// Validation rules accumulate across sources without deduplication, so
    /// a value must satisfy every source. Transformation rules from a later
    /// source replace those an earlier source left on the same property.
    /// The result is named `Intersection` followed by every source name.
    pub fn intersection_type(&self, sources: &[TypeDescriptor]) -> TypeDescriptor {
        let _span = debug_span!("intersection_type", sources = sources.len()).entered();
        let filter = PropertyFilter::All;
        let derived = derived_descriptor("IntersectionClassType", sources, &filter);

        let mut validated = 0;
        for source in sources {
            validated += self.inherit_validation(source, &derived, &filter).len();
            self.inherit_transformation(source, &derived, &filter, false);
        }

        let names: String = sources.iter().map(TypeDescriptor::name).collect();
        derived.set_name(format!("Intersection{names}"));
        debug!(
            derived = %derived.id(),
            validated_properties = validated,
            "derived intersection type"
        );
        derived
    }
}
