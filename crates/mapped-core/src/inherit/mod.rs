//! The three inheritance mechanisms.
//!
//! Default values, validation rules and transformation rules are copied
//! independently: a failure in one never stops the other two.

mod initializers;
mod transform;
mod validation;

pub use initializers::inherit_property_initializers;
pub use transform::inherit_transformation_metadata;
pub use validation::inherit_validation_metadata;
