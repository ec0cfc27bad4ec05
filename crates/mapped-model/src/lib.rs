//! Data model for mapped type derivation.
//!
//! Type descriptors, the instances they construct, property filters, and
//! the validation and transformation rule records that derived types
//! inherit.

pub mod descriptor;
pub mod error;
pub mod filter;
pub mod ids;
pub mod transform;
pub mod validation;
pub mod value;

pub use descriptor::{Initializer, Lineage, TypeDescriptor, TypeDescriptorBuilder};
pub use error::ConstructError;
pub use filter::PropertyFilter;
pub use ids::TypeId;
pub use transform::{PropertyRules, TransformCategory, TransformEntry, TransformRule};
pub use validation::{DeclaredType, RuleKind, RuleOptions, ValidationRule};
pub use value::{Instance, Value};
