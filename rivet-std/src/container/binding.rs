//! Binding records.

use super::Container;
use rivet_core::{Arguments, ResolveError, Value};
use std::fmt;
use std::sync::Arc;

/// A factory closure. Receives the container and the caller's override arguments.
pub type FactoryFn =
    Arc<dyn Fn(&Container, &Arguments) -> Result<Value, ResolveError> + Send + Sync>;

/// How a binding produces its value.
#[derive(Clone)]
pub enum Concrete {
    /// Build the named class (or resolve it, when it names another binding).
    Class(String),
    /// Call a factory closure.
    Factory(FactoryFn),
}

impl Concrete {
    /// A class-name concrete.
    pub fn class(name: impl Into<String>) -> Self {
        Concrete::Class(name.into())
    }

    /// A factory concrete.
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&Container, &Arguments) -> Result<Value, ResolveError> + Send + Sync + 'static,
    {
        Concrete::Factory(Arc::new(factory))
    }
}

impl From<&str> for Concrete {
    fn from(name: &str) -> Self {
        Concrete::Class(name.to_owned())
    }
}

impl From<String> for Concrete {
    fn from(name: String) -> Self {
        Concrete::Class(name)
    }
}

impl fmt::Debug for Concrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concrete::Class(name) => f.debug_tuple("Class").field(name).finish(),
            Concrete::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// How long a resolved value lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// A new value on every resolution.
    Transient,
    /// Built once, then cached.
    Singleton,
    /// Supplied pre-built.
    Existing,
}

/// A registered binding.
#[derive(Clone, Debug)]
pub enum Binding {
    /// Build a fresh value on every resolution.
    Transient(Concrete),
    /// Build once and cache the result.
    Singleton(Concrete),
    /// Return a pre-built value.
    Instance(Value),
}

impl Binding {
    /// The binding's lifetime.
    pub fn lifetime(&self) -> Lifetime {
        match self {
            Binding::Transient(_) => Lifetime::Transient,
            Binding::Singleton(_) => Lifetime::Singleton,
            Binding::Instance(_) => Lifetime::Existing,
        }
    }

    /// Whether resolutions share one value.
    pub fn is_shared(&self) -> bool {
        self.lifetime() != Lifetime::Transient
    }
}
