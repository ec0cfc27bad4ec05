//! Mapped type derivation.
//!
//! Derives "view" types from annotated source types, carrying forward
//! their default values, validation rules and transformation rules.
//!
//! # Overview
//!
//! This crate provides:
//! - **Pick / Omit**: restrict a type to, or exclude, a set of properties
//! - **Partial**: make every validated property optional
//! - **Intersection**: merge several types into one
//! - **Inheritance primitives**: the three metadata copy mechanisms the
//!   operations are built from, usable on their own
//!
//! # Example
//!
//! ```ignore
//! use mapped_core::{MappedTypes, PartialOptions};
//! use mapped_model::RuleKind;
//!
//! let engine = MappedTypes::new();
//! let user = engine
//!     .define("UserDto")
//!     .property("name", |p| p.default_value("Default Name").validate(RuleKind::new("isString")))
//!     .property("password", |p| p.default_value("password123").validate(RuleKind::new("isString")))
//!     .build();
//!
//! let response = engine.omit_type(&user, ["password"]);
//! let update = engine.partial_type(&user, PartialOptions::default());
//! ```
//!
//! # Failure model
//!
//! Derivations never fail. A source that cannot be constructed contributes
//! no defaults; a registry that errors is logged under the `mapped_types`
//! target and contributes no rules; a subsystem that is not installed is
//! skipped. The result is always a usable, possibly metadata-poor, type.

mod availability;
mod define;
mod engine;
mod helpers;
mod options;

pub mod inherit;
pub mod logging;

/// Target of every event the engine logs.
pub const LOG_TARGET: &str = "mapped_types";

// Engine
pub use engine::{MappedTypes, MappedTypesBuilder};

// Configuration
pub use options::{EngineConfig, PartialOptions};

// Definitions
pub use define::{PropertyDefinition, TypeDefinition};

// Inheritance primitives
pub use inherit::{
    inherit_property_initializers, inherit_transformation_metadata, inherit_validation_metadata,
};
