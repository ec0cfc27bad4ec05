//! Type descriptors.
//!
//! A [`TypeDescriptor`] plays two roles: it is the key under which the
//! validation and transformation registries store rules, and it is a
//! factory for default property values. Cloning a descriptor clones a
//! handle; both clones refer to the same type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::ConstructError;
use crate::ids::TypeId;
use crate::value::{Instance, Value};

/// One step of a type's construction path.
pub type Initializer = Arc<dyn Fn(&mut Instance) -> Result<(), ConstructError> + Send + Sync>;

#[derive(Clone)]
pub struct TypeDescriptor {
    inner: Arc<DescriptorInner>,
}

struct DescriptorInner {
    id: TypeId,
    name: RwLock<String>,
    parent: Option<TypeDescriptor>,
    initializers: Vec<Initializer>,
}

impl TypeDescriptor {
    pub fn builder(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name)
    }

    pub fn id(&self) -> TypeId {
        self.inner.id
    }

    pub fn name(&self) -> String {
        self.inner
            .name
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rewrite the display name. Identity is unaffected.
    pub fn set_name(&self, name: impl Into<String>) {
        *self
            .inner
            .name
            .write()
            .unwrap_or_else(PoisonError::into_inner) = name.into();
    }

    pub fn parent(&self) -> Option<&TypeDescriptor> {
        self.inner.parent.as_ref()
    }

    /// The descriptor itself followed by each parent, nearest first.
    pub fn lineage(&self) -> Lineage<'_> {
        Lineage {
            next: Some(self),
        }
    }

    /// Materialised ancestor chain: this type, its parents, then
    /// [`TypeId::ROOT`].
    pub fn ancestors(&self) -> Vec<TypeId> {
        let mut chain: Vec<TypeId> = self.lineage().map(TypeDescriptor::id).collect();
        chain.push(TypeId::ROOT);
        chain
    }

    /// Run the zero-argument construction path.
    ///
    /// Parent initializers run before this type's own, so a subtype's
    /// defaults override inherited ones.
    pub fn instantiate(&self) -> Result<Instance, ConstructError> {
        let mut instance = Instance::new();
        self.construct_into(&mut instance)?;
        Ok(instance)
    }

    /// Property names of a default instance; empty if construction fails.
    pub fn property_names(&self) -> Vec<String> {
        self.instantiate()
            .map(|instance| instance.property_names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn construct_into(&self, instance: &mut Instance) -> Result<(), ConstructError> {
        if let Some(parent) = &self.inner.parent {
            parent.construct_into(instance)?;
        }
        for initializer in &self.inner.initializers {
            initializer(instance)?;
        }
        Ok(())
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("parent", &self.parent().map(TypeDescriptor::id))
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

pub struct Lineage<'a> {
    next: Option<&'a TypeDescriptor>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

pub struct TypeDescriptorBuilder {
    name: String,
    parent: Option<TypeDescriptor>,
    initializers: Vec<Initializer>,
}

impl TypeDescriptorBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            initializers: Vec::new(),
        }
    }

    #[must_use]
    pub fn extends(mut self, parent: &TypeDescriptor) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Assign `value` to `property` on every constructed instance.
    #[must_use]
    pub fn default_value(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        let property = property.into();
        let value = value.into();
        self.initializer(move |instance| {
            instance.set(property.clone(), value.clone());
            Ok(())
        })
    }

    #[must_use]
    pub fn initializer<F>(mut self, initializer: F) -> Self
    where
        F: Fn(&mut Instance) -> Result<(), ConstructError> + Send + Sync + 'static,
    {
        self.initializers.push(Arc::new(initializer));
        self
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            inner: Arc::new(DescriptorInner {
                id: TypeId::next(),
                name: RwLock::new(self.name),
                parent: self.parent,
                initializers: self.initializers,
            }),
        }
    }
}
