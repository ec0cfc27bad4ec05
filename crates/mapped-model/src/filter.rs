use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Decides which properties of a source survive onto a derived type.
///
/// One filter is shared by default-value, validation and transformation
/// inheritance within a derivation, so the three always agree on which
/// properties exist.
#[derive(Clone, Default)]
pub enum PropertyFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
    Except(BTreeSet<String>),
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl PropertyFilter {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Only(collect_names(names))
    }

    pub fn except<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Except(collect_names(names))
    }

    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    pub fn accepts(&self, property: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.contains(property),
            Self::Except(names) => !names.contains(property),
            Self::Custom(predicate) => predicate(property),
        }
    }
}

impl fmt::Debug for PropertyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(names) => f.debug_tuple("Only").field(names).finish(),
            Self::Except(names) => f.debug_tuple("Except").field(names).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn collect_names<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect()
}
