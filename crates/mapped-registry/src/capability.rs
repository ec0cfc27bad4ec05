//! Swappable slots for optional subsystems.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Holds the registry of an optional subsystem, or nothing.
///
/// The slot is consulted on every [`resolve`](Capability::resolve) call and
/// never caches an absent result, so a subsystem installed or withdrawn at
/// runtime is seen by the next query.
pub struct Capability<R: ?Sized> {
    slot: RwLock<Option<Arc<R>>>,
}

impl<R: ?Sized> Capability<R> {
    pub fn absent() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    pub fn present(registry: Arc<R>) -> Self {
        Self {
            slot: RwLock::new(Some(registry)),
        }
    }

    pub fn install(&self, registry: Arc<R>) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(registry);
    }

    /// Remove the registry, returning it if one was installed.
    pub fn withdraw(&self) -> Option<Arc<R>> {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn resolve(&self) -> Option<Arc<R>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_available(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<R: ?Sized> Default for Capability<R> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<R: ?Sized> fmt::Debug for Capability<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("available", &self.is_available())
            .finish()
    }
}
