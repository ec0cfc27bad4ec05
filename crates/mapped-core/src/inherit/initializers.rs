use mapped_model::{Instance, PropertyFilter, TypeDescriptor};

/// Copy default property values of `source` onto `target`.
///
/// A throwaway instance of `source` is constructed; each of its set
/// properties that passes `filter` and is still unset on `target` is
/// copied over. Calling this for several sources in turn gives the first
/// source the win on shared names.
///
/// If `source` cannot be constructed nothing is copied and `target` is
/// left untouched. That failure is not reported.
pub fn inherit_property_initializers(
    target: &mut Instance,
    source: &TypeDescriptor,
    filter: &PropertyFilter,
) {
    let Ok(defaults) = source.instantiate() else {
        return;
    };
    for (property, value) in defaults.iter() {
        if filter.accepts(property) && !target.is_set(property) {
            target.set(property, value.clone());
        }
    }
}
