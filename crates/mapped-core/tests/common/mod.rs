//! Shared fixtures and a minimal rule evaluator for integration tests.
//!
//! The engine never evaluates rules. To check that derived types carry
//! the right rules, the tests interpret a handful of rule kinds here.

#![allow(dead_code)]

use mapped_core::MappedTypes;
use mapped_model::{DeclaredType, Instance, RuleKind, TypeDescriptor, ValidationRule, Value};

pub fn is_string() -> RuleKind {
    RuleKind::new("isString")
}

pub fn is_email() -> RuleKind {
    RuleKind::new("isEmail")
}

pub fn is_number() -> RuleKind {
    RuleKind::new("isNumber")
}

/// `UserDto` with name, email and password, each defaulted and validated.
pub fn user_dto(engine: &MappedTypes) -> TypeDescriptor {
    engine
        .define("UserDto")
        .property("name", |p| {
            p.default_value("Default Name")
                .declared(DeclaredType::String)
                .validate(is_string())
        })
        .property("email", |p| {
            p.default_value("default@example.com")
                .declared(DeclaredType::String)
                .validate(is_email())
        })
        .property("password", |p| {
            p.default_value("password123")
                .declared(DeclaredType::String)
                .validate(is_string())
        })
        .build()
}

pub fn address_dto(engine: &MappedTypes) -> TypeDescriptor {
    engine
        .define("AddressDto")
        .property("street", |p| p.default_value("Default Street").validate(is_string()))
        .property("zipCode", |p| p.default_value(12345).validate(is_number()))
        .build()
}

pub fn name_only_user(engine: &MappedTypes) -> TypeDescriptor {
    engine
        .define("UserDto")
        .property("name", |p| p.default_value("Default Name").validate(is_string()))
        .build()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub property: String,
    pub failed: Vec<String>,
}

/// Validate `instance` against the rules registered for `ty`.
///
/// One error per failing property, in the order properties first appear
/// among the rules.
pub fn validate(
    engine: &MappedTypes,
    ty: &TypeDescriptor,
    instance: &Instance,
) -> Vec<ValidationError> {
    let Some(registry) = engine.validation().resolve() else {
        return Vec::new();
    };
    let rules = registry.rules_for(ty).expect("read rules");

    let mut properties: Vec<&str> = Vec::new();
    for rule in &rules {
        if !properties.contains(&rule.property.as_str()) {
            properties.push(&rule.property);
        }
    }

    let mut errors = Vec::new();
    for property in properties {
        let group: Vec<&ValidationRule> = rules
            .iter()
            .filter(|rule| rule.property == property)
            .collect();
        let value = instance.get(property);
        let skip_null = group.iter().any(|rule| rule.kind == RuleKind::IS_OPTIONAL);
        let skip_unset = group.iter().any(|rule| rule.kind == RuleKind::VALIDATE_IF_DEFINED);
        match value {
            None if skip_null || skip_unset => continue,
            Some(value) if value.is_null() && skip_null => continue,
            _ => {}
        }
        let failed: Vec<String> = group
            .iter()
            .filter(|rule| !passes(rule, value))
            .map(|rule| rule.kind.to_string())
            .collect();
        if !failed.is_empty() {
            errors.push(ValidationError {
                property: property.to_string(),
                failed,
            });
        }
    }
    errors
}

fn passes(rule: &ValidationRule, value: Option<&Value>) -> bool {
    match rule.kind.as_str() {
        "isOptional" | "validateIfDefined" => true,
        "isString" => value.and_then(Value::as_str).is_some(),
        "isNumber" => value.is_some_and(Value::is_number),
        "isEmail" => value.and_then(Value::as_str).is_some_and(looks_like_email),
        _ => true,
    }
}

fn looks_like_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !text.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

pub fn error_properties(errors: &[ValidationError]) -> Vec<&str> {
    errors.iter().map(|error| error.property.as_str()).collect()
}
