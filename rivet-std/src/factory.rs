//! Factory-pattern construction from short names.
//!
//! `create_factory("redis", "App\\Cache\\", ..)` builds `App\Cache\Redis`;
//! a name that already contains a namespace separator is used as is.

use crate::container::Container;
use rivet_core::{Arguments, ResolveError, Value};
use tracing::debug;

const NAMESPACE_SEPARATOR: char = '\\';

/// Qualify `name` with `namespace` unless it is already qualified.
///
/// The short name has the first letter of each word upper-cased.
pub fn qualify(name: &str, namespace: &str) -> String {
    if name.contains(NAMESPACE_SEPARATOR) {
        name.to_owned()
    } else {
        format!("{namespace}{}", ucwords(name))
    }
}

fn ucwords(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_ascii_whitespace() || c == '\u{0b}';
    }
    out
}

impl Container {
    /// Build the class `name` qualifies to, passing `args` positionally.
    ///
    /// Bindings are bypassed: the qualified name is constructed directly.
    pub fn create_factory(
        &self,
        name: &str,
        namespace: &str,
        args: Vec<Value>,
    ) -> Result<Value, ResolveError> {
        let class = qualify(name, namespace);
        debug!(name, class = %class, "Creating from factory name");
        self.invoke_class(&class, Arguments::positional(args))
    }

    /// [`create_factory`](Self::create_factory) with the configured namespace.
    pub fn create_factory_default(
        &self,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Value, ResolveError> {
        let namespace = self.inner.registry.lock().namespace.clone();
        self.create_factory(name, &namespace, args)
    }

    /// Set the namespace [`create_factory_default`](Self::create_factory_default) prefixes.
    pub fn set_namespace(&self, namespace: impl Into<String>) {
        self.inner.registry.lock().namespace = namespace.into();
    }

    /// [`create_factory`](Self::create_factory) on the process-wide container.
    pub fn factory(name: &str, namespace: &str, args: Vec<Value>) -> Result<Value, ResolveError> {
        Self::current().create_factory(name, namespace, args)
    }
}
