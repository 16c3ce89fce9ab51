//! Contextual bindings.
//!
//! A contextual value overrides resolution for one key while a particular
//! concrete is being built:
//!
//! ```rust,ignore
//! container.when("App\\Mailer").needs("$from").give("noreply@example.com");
//! container.when("App\\Mailer").needs("App\\Contracts\\Transport").give_class("App\\SmtpTransport");
//! ```
//!
//! Keys starting with `$` target a parameter by name (binding rule 4). Any
//! other key is a type name and overrides how that type is resolved while the
//! scoped concrete is on top of the build stack. Contextual values registered
//! with [`Container::when_unscoped`] apply to calls made outside any build.

use crate::container::Container;
use rivet_core::{ResolveError, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Scope key used for contextual values that apply outside any build.
pub(crate) const UNSCOPED: &str = "";

/// A closure producing a contextual value.
pub type ContextFn = Arc<dyn Fn(&Container) -> Result<Value, ResolveError> + Send + Sync>;

/// A contextual override.
#[derive(Clone)]
pub enum Contextual {
    /// A literal value.
    Value(Value),
    /// A closure called with the container on every use.
    Factory(ContextFn),
    /// A class (or binding id) resolved from the container on every use.
    Class(String),
}

impl fmt::Debug for Contextual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contextual::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Contextual::Factory(_) => f.write_str("Factory(..)"),
            Contextual::Class(name) => f.debug_tuple("Class").field(name).finish(),
        }
    }
}

/// Contextual values keyed by scope, then by `$parameter` or type name.
#[derive(Clone, Default, Debug)]
pub(crate) struct ContextualTable {
    scopes: HashMap<String, HashMap<String, Contextual>>,
}

impl ContextualTable {
    pub(crate) fn insert(&mut self, scope: String, key: String, value: Contextual) {
        self.scopes.entry(scope).or_default().insert(key, value);
    }

    /// Look in `scope` first, then in the unscoped table.
    pub(crate) fn find(&self, scope: Option<&str>, key: &str) -> Option<Contextual> {
        scope
            .and_then(|s| self.scopes.get(s))
            .and_then(|entries| entries.get(key))
            .or_else(|| self.scopes.get(UNSCOPED).and_then(|e| e.get(key)))
            .cloned()
    }

    /// Look only in `scope`.
    pub(crate) fn find_scoped(&self, scope: &str, key: &str) -> Option<Contextual> {
        self.scopes.get(scope).and_then(|e| e.get(key)).cloned()
    }

    pub(crate) fn clear(&mut self) {
        self.scopes.clear();
    }
}

/// First half of `when(..).needs(..).give(..)`.
#[must_use = "call `needs` to name what is being overridden"]
pub struct ContextualBindingBuilder<'a> {
    container: &'a Container,
    scope: String,
}

impl<'a> ContextualBindingBuilder<'a> {
    pub(crate) fn new(container: &'a Container, scope: String) -> Self {
        Self { container, scope }
    }

    /// Name the `$parameter` or type being overridden.
    pub fn needs(self, key: impl Into<String>) -> ContextualNeeds<'a> {
        ContextualNeeds {
            container: self.container,
            scope: self.scope,
            key: key.into(),
        }
    }
}

/// Second half of `when(..).needs(..).give(..)`.
#[must_use = "call `give`, `give_with` or `give_class` to register the override"]
pub struct ContextualNeeds<'a> {
    container: &'a Container,
    scope: String,
    key: String,
}

impl ContextualNeeds<'_> {
    /// Supply a literal value.
    pub fn give(self, value: impl Into<Value>) {
        self.register(Contextual::Value(value.into()));
    }

    /// Supply a closure called with the container on every use.
    pub fn give_with<F>(self, factory: F)
    where
        F: Fn(&Container) -> Result<Value, ResolveError> + Send + Sync + 'static,
    {
        self.register(Contextual::Factory(Arc::new(factory)));
    }

    /// Supply a class or binding id resolved on every use.
    pub fn give_class(self, class: impl Into<String>) {
        self.register(Contextual::Class(class.into()));
    }

    fn register(self, value: Contextual) {
        self.container
            .add_contextual_binding(self.scope, self.key, value);
    }
}
