//! Snapshots of derived rule listings and serialized configuration.

mod common;

use common::user_dto;
use mapped_core::{EngineConfig, MappedTypes, PartialOptions};
use mapped_model::TypeDescriptor;

fn rule_listing(engine: &MappedTypes, ty: &TypeDescriptor) -> String {
    let registry = engine.validation().resolve().expect("validation installed");
    let rules = registry.rules_for(ty).expect("rules");
    let lines: Vec<String> = rules
        .iter()
        .map(|rule| format!("{}: {}", rule.property, rule.kind))
        .collect();
    format!("{}\n{}", ty.name(), lines.join("\n"))
}

#[test]
fn partial_rule_listing() {
    let engine = MappedTypes::new();
    let user = user_dto(&engine);
    let update = engine.partial_type(&user, PartialOptions::default());

    insta::assert_snapshot!(rule_listing(&engine, &update), @r"
    PartialUserDto
    name: isString
    email: isEmail
    password: isString
    name: isOptional
    email: isOptional
    password: isOptional
    ");
}

#[test]
fn strict_partial_of_omit_rule_listing() {
    let engine = MappedTypes::new();
    let user = user_dto(&engine);
    let response = engine.omit_type(&user, ["password"]);
    let update =
        engine.partial_type(&response, PartialOptions::new().with_treat_null_as_unset(false));

    insta::assert_snapshot!(rule_listing(&engine, &update), @r"
    PartialOmitClassType
    name: isString
    email: isEmail
    name: validateIfDefined
    email: validateIfDefined
    ");
}

#[test]
fn engine_config_serialization() {
    insta::assert_json_snapshot!(EngineConfig::metadata_free(), @r#"
    {
      "validation": false,
      "transformation": false
    }
    "#);
}
