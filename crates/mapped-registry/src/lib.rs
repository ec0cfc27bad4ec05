//! Rule registries for mapped type derivation.
//!
//! The validation and transformation subsystems each own a registry of
//! rules keyed by type identity. This crate defines the narrow interface
//! the derivation engine needs from each ([`ValidationRegistry`],
//! [`TransformRegistry`]), in-memory implementations, and the
//! [`Capability`] slot that lets either subsystem be absent.

mod capability;
mod error;
mod transform;
mod validation;

pub use capability::Capability;
pub use error::{RegistryError, Result};
pub use transform::{MemoryTransformStore, TransformRegistry};
pub use validation::{MemoryValidationStore, ValidationRegistry};
