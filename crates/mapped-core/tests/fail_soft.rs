//! Derivations keep working when a registry fails or a source cannot be built.

mod common;

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::{is_string, user_dto, validate};
use mapped_core::{MappedTypes, PartialOptions};
use mapped_model::{
    ConstructError, DeclaredType, PropertyRules, TransformCategory, TypeDescriptor, TypeId,
    ValidationRule, Value,
};
use mapped_registry::{
    MemoryTransformStore, MemoryValidationStore, RegistryError, Result, TransformRegistry,
    ValidationRegistry,
};

struct OfflineValidation;

impl ValidationRegistry for OfflineValidation {
    fn rules_for(&self, _ty: &TypeDescriptor) -> Result<Vec<ValidationRule>> {
        Err(RegistryError::backend("validation store offline"))
    }

    fn add_rule(&self, _rule: ValidationRule) -> Result<()> {
        Err(RegistryError::backend("validation store offline"))
    }

    fn declared_type(
        &self,
        _ty: &TypeDescriptor,
        _property: &str,
    ) -> Result<Option<DeclaredType>> {
        Ok(None)
    }

    fn set_declared_type(
        &self,
        _ty: TypeId,
        _property: &str,
        _declared: DeclaredType,
    ) -> Result<()> {
        Err(RegistryError::backend("validation store offline"))
    }
}

struct OfflineTransforms;

impl TransformRegistry for OfflineTransforms {
    fn entries(&self, _category: TransformCategory, _ty: TypeId) -> Result<Option<PropertyRules>> {
        Err(RegistryError::backend("transform store offline"))
    }

    fn set_entries(
        &self,
        _category: TransformCategory,
        _ty: TypeId,
        _rules: PropertyRules,
    ) -> Result<()> {
        Err(RegistryError::backend("transform store offline"))
    }
}

/// In-memory store whose `failing_call`-th rule write is refused once.
struct FlakyValidation {
    store: MemoryValidationStore,
    writes: AtomicUsize,
    failing_call: usize,
}

impl FlakyValidation {
    fn failing_on(failing_call: usize) -> Self {
        Self {
            store: MemoryValidationStore::new(),
            writes: AtomicUsize::new(0),
            failing_call,
        }
    }
}

impl ValidationRegistry for FlakyValidation {
    fn rules_for(&self, ty: &TypeDescriptor) -> Result<Vec<ValidationRule>> {
        self.store.rules_for(ty)
    }

    fn add_rule(&self, rule: ValidationRule) -> Result<()> {
        let call = self.writes.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.failing_call {
            return Err(RegistryError::backend("transient write failure"));
        }
        self.store.add_rule(rule)
    }

    fn declared_type(
        &self,
        ty: &TypeDescriptor,
        property: &str,
    ) -> Result<Option<DeclaredType>> {
        self.store.declared_type(ty, property)
    }

    fn set_declared_type(
        &self,
        ty: TypeId,
        property: &str,
        declared: DeclaredType,
    ) -> Result<()> {
        self.store.set_declared_type(ty, property, declared)
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer").clone();
        String::from_utf8(bytes).expect("utf-8 logs")
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that records every event at info and above.
fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

#[test]
fn validation_failure_is_logged_and_absorbed() {
    let source_engine = MappedTypes::new();
    let user = user_dto(&source_engine);
    let engine = MappedTypes::builder()
        .with_validation(Arc::new(OfflineValidation))
        .with_transformation(Arc::new(MemoryTransformStore::new()))
        .build();

    let (picked, logs) = with_captured_logs(|| engine.pick_type(&user, ["name", "email"]));

    let instance = picked.instantiate().expect("instantiate");
    assert_eq!(instance.get("name"), Some(&Value::from("Default Name")));
    assert!(logs.contains("ERROR"));
    assert!(logs.contains("mapped_types"));
    assert!(logs.contains("Validation metadata cannot be inherited for \"UserDto\" type."));
    assert!(logs.contains("validation store offline"));
}

#[test]
fn transformation_failure_is_logged_and_absorbed() {
    let engine = MappedTypes::builder()
        .with_validation(Arc::new(MemoryValidationStore::new()))
        .with_transformation(Arc::new(OfflineTransforms))
        .build();
    let (user, _) = with_captured_logs(|| user_dto(&engine));

    let (omitted, logs) = with_captured_logs(|| engine.omit_type(&user, ["password"]));

    assert_eq!(omitted.property_names(), vec!["email", "name"]);
    let registry = engine.validation().resolve().expect("validation installed");
    assert_eq!(registry.rules_for(&omitted).expect("rules").len(), 2);
    assert!(logs.contains("Transformation metadata cannot be inherited for \"UserDto\" type."));
    assert!(logs.contains("transform store offline"));
}

#[test]
fn registration_failure_still_returns_the_type() {
    let engine = MappedTypes::builder()
        .with_validation(Arc::new(OfflineValidation))
        .build();

    let (user, logs) = with_captured_logs(|| {
        engine
            .define("UserDto")
            .property("name", |p| p.default_value("Default Name").validate(is_string()))
            .build()
    });

    assert_eq!(user.property_names(), vec!["name"]);
    assert!(logs.contains("Cannot register validation metadata for \"UserDto\" type."));
}

#[test]
fn partial_with_failing_validation_adds_no_optional_rules() {
    let source_engine = MappedTypes::new();
    let user = user_dto(&source_engine);
    let engine = MappedTypes::builder()
        .with_validation(Arc::new(OfflineValidation))
        .build();

    let (update, logs) =
        with_captured_logs(|| engine.partial_type(&user, PartialOptions::default()));

    assert_eq!(update.name(), "PartialUserDto");
    assert_eq!(update.property_names(), vec!["email", "name", "password"]);
    assert_eq!(logs.matches("ERROR").count(), 1);
}

#[test]
fn unconstructible_source_contributes_no_defaults() {
    let engine = MappedTypes::new();
    let needs_arguments = engine
        .define("ConfiguredDto")
        .initializer(|_| Err(ConstructError::RequiresArguments))
        .property("name", |p| p.validate(is_string()))
        .build();

    let (picked, logs) = with_captured_logs(|| engine.pick_type(&needs_arguments, ["name"]));

    let instance = picked.instantiate().expect("instantiate");
    assert!(instance.is_empty());
    assert!(!logs.contains("ERROR"));
    let registry = engine.validation().resolve().expect("validation installed");
    assert_eq!(registry.rules_for(&picked).expect("rules").len(), 1);
}

#[test]
fn partial_marks_properties_copied_before_a_failure_optional() {
    // Three writes declare the source; the fourth copies `name`, the fifth fails.
    let engine = MappedTypes::builder()
        .with_validation(Arc::new(FlakyValidation::failing_on(5)))
        .build();
    let user = user_dto(&engine);

    let (update, logs) =
        with_captured_logs(|| engine.partial_type(&user, PartialOptions::default()));

    assert!(logs.contains("Validation metadata cannot be inherited for \"UserDto\" type."));
    assert!(logs.contains("transient write failure"));
    let registry = engine.validation().resolve().expect("validation installed");
    let rules: Vec<(String, String)> = registry
        .rules_for(&update)
        .expect("rules")
        .into_iter()
        .map(|rule| (rule.property, rule.kind.to_string()))
        .collect();
    assert_eq!(
        rules,
        vec![
            ("name".to_string(), "isString".to_string()),
            ("name".to_string(), "isOptional".to_string()),
        ]
    );

    let mut instance = update.instantiate().expect("instantiate");
    for property in ["name", "email", "password"] {
        instance.unset(property);
    }
    assert!(validate(&engine, &update, &instance).is_empty());
}
