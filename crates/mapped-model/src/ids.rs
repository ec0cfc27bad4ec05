#![deny(unsafe_code)]

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a type descriptor.
///
/// Registries key their entries by this token, never by display name, so
/// two descriptors that share a name stay distinct. `TypeId::ROOT` is the
/// universal root sentinel that terminates every ancestor chain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TypeId(u64);

impl TypeId {
    pub const ROOT: TypeId = TypeId(0);

    /// Allocate a fresh, process-unique id.
    pub fn next() -> Self {
        Self(NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("type#root")
        } else {
            write!(f, "type#{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocated_ids_are_distinct_and_never_root() {
        let a = TypeId::next();
        let b = TypeId::next();
        assert_ne!(a, b);
        assert!(!a.is_root());
        assert!(!b.is_root());
        assert_eq!(TypeId::ROOT.to_string(), "type#root");
        assert_eq!(TypeId::ROOT.as_u64(), 0);
        assert_eq!(a.to_string(), format!("type#{}", a.as_u64()));
    }
}
