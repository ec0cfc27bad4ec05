//! Derivation operations.
//!
//! Each operation builds a fresh descriptor whose construction path runs
//! initializer inheritance for its sources, then copies validation and
//! transformation metadata with the operation's filter.

mod intersection;
mod omit;
mod partial;
mod pick;

use mapped_model::{PropertyFilter, TypeDescriptor};

use crate::inherit::inherit_property_initializers;

/// Fresh descriptor whose instances start from the defaults of `sources`.
fn derived_descriptor(
    name: &str,
    sources: &[TypeDescriptor],
    filter: &PropertyFilter,
) -> TypeDescriptor {
    let sources = sources.to_vec();
    let filter = filter.clone();
    TypeDescriptor::builder(name)
        .initializer(move |instance| {
            for source in &sources {
                inherit_property_initializers(instance, source, &filter);
            }
            Ok(())
        })
        .build()
}
