//! # The Resolution Container
//!
//! Holds named bindings, builds object graphs from class descriptors, invokes
//! callables with their parameters bound, and keeps a table of named events.
//!
//! ```text
//! resolve(id) ──alias──> canonical id ──binding?──┬── Instance ──────────────> value
//!                                                 ├── Singleton ─ cached? ──> value
//!                                                 ├── Factory ─────────────> call
//!                                                 └── Class ── build ──────> bind params ─> construct
//! ```
//!
//! # Locking
//!
//! All registries (bindings, aliases, contextual values, types, events) live
//! behind one exclusive lock per container. The lock is only held for the
//! duration of a lookup or mutation and never across a nested resolution, so
//! factories are free to resolve other dependencies.

mod binding;
mod current;

pub use binding::{Binding, Concrete, FactoryFn, Lifetime};
pub use current::{CONTAINER_CLASS, CONTAINER_INTERFACE};

use crate::config::ContainerConfig;
use crate::contextual::{Contextual, ContextualBindingBuilder, ContextualTable, UNSCOPED};
use crate::events::EventTable;
use crate::types::TypeTable;
use parking_lot::Mutex;
use rivet_core::{
    Arguments, BoundArgs, Callable, ClassDescriptor, Injectable, Instance, ResolveError, Value,
};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, trace};

/// Everything guarded by the container lock.
#[derive(Default)]
pub(crate) struct Registry {
    pub(crate) bindings: HashMap<String, Binding>,
    pub(crate) resolved: HashMap<String, Value>,
    pub(crate) aliases: HashMap<String, String>,
    pub(crate) abstract_aliases: HashMap<String, Vec<String>>,
    pub(crate) contextual: ContextualTable,
    pub(crate) types: TypeTable,
    pub(crate) events: EventTable,
    pub(crate) namespace: String,
}

impl Registry {
    fn get_alias(&self, name: &str) -> String {
        let mut current = name;
        // A hop limit keeps a cyclic alias chain from spinning forever.
        for _ in 0..=self.aliases.len() {
            match self.aliases.get(current) {
                Some(next) => current = next.as_str(),
                None => break,
            }
        }
        current.to_owned()
    }

    fn drop_stale(&mut self, id: &str) {
        self.resolved.remove(id);
        if let Some(canonical) = self.aliases.remove(id) {
            if let Some(list) = self.abstract_aliases.get_mut(&canonical) {
                list.retain(|a| a != id);
            }
        }
    }
}

pub(crate) struct Inner {
    pub(crate) registry: Mutex<Registry>,
    /// One build stack per thread, so concurrent resolutions never see each other's frames.
    pub(crate) build_stacks: Mutex<HashMap<ThreadId, Vec<String>>>,
}

impl Inner {
    fn current_scope(&self) -> Option<String> {
        let stacks = self.build_stacks.lock();
        stacks
            .get(&thread::current().id())
            .and_then(|stack| stack.last().cloned())
    }
}

/// A reflective dependency-resolution container.
///
/// Cheap to clone: clones share the same registries.
#[derive(Clone)]
pub struct Container {
    pub(crate) inner: Arc<Inner>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.inner.registry.lock();
        f.debug_struct("Container")
            .field("bindings", &registry.bindings.len())
            .field("resolved", &registry.resolved.len())
            .field("aliases", &registry.aliases.len())
            .field("classes", &registry.types.class_count())
            .field("events", &registry.events.len())
            .finish()
    }
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        debug!("Creating new resolution container");
        Self {
            inner: Arc::new(Inner {
                registry: Mutex::new(Registry::default()),
                build_stacks: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Create a container and apply `config` to it.
    pub fn with_config(config: &ContainerConfig) -> Result<Self, crate::config::ConfigError> {
        let container = Self::new();
        container.apply_config(config)?;
        Ok(container)
    }

    /// Whether both handles share the same registries.
    pub fn ptr_eq(&self, other: &Container) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ========================================================================
    // Type table
    // ========================================================================

    /// Make a class descriptor available for reflection.
    pub fn register_class(&self, descriptor: ClassDescriptor) {
        debug!(class = descriptor.name(), "Class registered");
        self.inner.registry.lock().types.insert_class(descriptor);
    }

    /// Make an [`Injectable`] type available for reflection.
    pub fn register<T: Injectable>(&self) {
        self.register_class(T::descriptor());
    }

    /// Make a free function available for invocation by name.
    pub fn register_function(&self, function: Callable) {
        debug!(function = function.name(), "Function registered");
        self.inner.registry.lock().types.insert_function(function);
    }

    /// Register every type submitted through `#[derive(Injectable)]`.
    #[cfg(feature = "inventory")]
    pub fn discover(&self) -> usize {
        let added = self.inner.registry.lock().types.discover();
        debug!(classes = added, "Discovered injectable classes");
        added
    }

    /// Look up a class descriptor.
    pub fn class(&self, name: &str) -> Option<Arc<ClassDescriptor>> {
        self.inner.registry.lock().types.class(name)
    }

    /// Whether `instance` is of `type_name`, directly or through any
    /// registered supertype chain.
    pub fn is_instance_of(&self, instance: &Instance, type_name: &str) -> bool {
        self.inner
            .registry
            .lock()
            .types
            .instance_of(instance, type_name)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a transient binding.
    pub fn bind(&self, id: impl Into<String>, concrete: impl Into<Concrete>) {
        self.add_binding(id.into(), Binding::Transient(concrete.into()));
    }

    /// Register a transient binding of `id` to itself.
    pub fn bind_self(&self, id: impl Into<String>) {
        let id = id.into();
        self.add_binding(id.clone(), Binding::Transient(Concrete::Class(id)));
    }

    /// Register a shared binding: built once, then cached.
    pub fn singleton(&self, id: impl Into<String>, concrete: impl Into<Concrete>) {
        self.add_binding(id.into(), Binding::Singleton(concrete.into()));
    }

    /// Register a shared binding of `id` to itself.
    pub fn singleton_self(&self, id: impl Into<String>) {
        let id = id.into();
        self.add_binding(id.clone(), Binding::Singleton(Concrete::Class(id)));
    }

    /// Register a pre-built value.
    pub fn instance(&self, id: impl Into<String>, value: impl Into<Value>) {
        self.add_binding(id.into(), Binding::Instance(value.into()));
    }

    fn add_binding(&self, id: String, binding: Binding) {
        debug!(id = %id, lifetime = ?binding.lifetime(), "Binding registered");
        let mut registry = self.inner.registry.lock();
        registry.drop_stale(&id);
        registry.bindings.insert(id, binding);
    }

    /// Register `alias` as an alternate name for `id`.
    ///
    /// Aliasing a name to itself is ignored.
    pub fn alias(&self, id: impl Into<String>, alias: impl Into<String>) {
        let (id, alias) = (id.into(), alias.into());
        if id == alias {
            debug!(alias = %alias, "Ignoring self-alias");
            return;
        }
        trace!(id = %id, alias = %alias, "Alias registered");
        let mut registry = self.inner.registry.lock();
        registry
            .abstract_aliases
            .entry(id.clone())
            .or_default()
            .push(alias.clone());
        registry.aliases.insert(alias, id);
    }

    /// Start a contextual binding scoped to `concrete`.
    pub fn when(&self, concrete: &str) -> ContextualBindingBuilder<'_> {
        let scope = self.get_alias(concrete);
        ContextualBindingBuilder::new(self, scope)
    }

    /// Start a contextual binding for calls made outside any build.
    pub fn when_unscoped(&self) -> ContextualBindingBuilder<'_> {
        ContextualBindingBuilder::new(self, UNSCOPED.to_owned())
    }

    pub(crate) fn add_contextual_binding(&self, scope: String, key: String, value: Contextual) {
        trace!(scope = %scope, key = %key, "Contextual binding registered");
        self.inner
            .registry
            .lock()
            .contextual
            .insert(scope, key, value);
    }

    // ========================================================================
    // Introspection and teardown
    // ========================================================================

    /// The canonical id for `name`, following alias chains.
    pub fn get_alias(&self, name: &str) -> String {
        self.inner.registry.lock().get_alias(name)
    }

    /// Whether `name` is registered as an alias.
    pub fn is_alias(&self, name: &str) -> bool {
        self.inner.registry.lock().aliases.contains_key(name)
    }

    /// The aliases registered directly for `id`.
    pub fn aliases_of(&self, id: &str) -> Vec<String> {
        self.inner
            .registry
            .lock()
            .abstract_aliases
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether `id` has a binding, a cached value, or is an alias.
    pub fn bound(&self, id: &str) -> bool {
        let registry = self.inner.registry.lock();
        registry.bindings.contains_key(id)
            || registry.resolved.contains_key(id)
            || registry.aliases.contains_key(id)
    }

    /// Alias of [`bound`](Self::bound).
    pub fn has(&self, id: &str) -> bool {
        self.bound(id)
    }

    /// Whether resolutions of `id` share one value.
    pub fn is_shared(&self, id: &str) -> bool {
        let registry = self.inner.registry.lock();
        let id = registry.get_alias(id);
        registry.resolved.contains_key(&id)
            || registry.bindings.get(&id).is_some_and(Binding::is_shared)
    }

    /// Whether a shared value for `id` has been built and cached.
    pub fn resolved(&self, id: &str) -> bool {
        let registry = self.inner.registry.lock();
        let id = registry.get_alias(id);
        registry.resolved.contains_key(&id)
            || matches!(registry.bindings.get(&id), Some(Binding::Instance(_)))
    }

    /// Drop the cached value of a singleton so the next resolution rebuilds it.
    pub fn forget_instance(&self, id: &str) {
        let mut registry = self.inner.registry.lock();
        let id = registry.get_alias(id);
        registry.resolved.remove(&id);
    }

    /// Drop every cached singleton value.
    pub fn forget_instances(&self) {
        self.inner.registry.lock().resolved.clear();
    }

    /// Remove all bindings, cached values, aliases and contextual values.
    ///
    /// Registered classes, functions and events are kept.
    pub fn flush(&self) {
        debug!("Flushing container bindings");
        let mut registry = self.inner.registry.lock();
        registry.bindings.clear();
        registry.resolved.clear();
        registry.aliases.clear();
        registry.abstract_aliases.clear();
        registry.contextual.clear();
    }

    /// The classes the calling thread is currently constructing, outermost first.
    pub fn build_stack(&self) -> Vec<String> {
        self.inner
            .build_stacks
            .lock()
            .get(&thread::current().id())
            .cloned()
            .unwrap_or_default()
    }

    /// Depth of the calling thread's build stack.
    pub fn build_stack_len(&self) -> usize {
        self.inner
            .build_stacks
            .lock()
            .get(&thread::current().id())
            .map_or(0, Vec::len)
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve `id` with no override arguments.
    pub fn make(&self, id: &str) -> Result<Value, ResolveError> {
        self.resolve(id, Arguments::new())
    }

    /// Resolve `id` and downcast the object to `T`.
    pub fn make_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>, ResolveError> {
        let value = self.make(id)?;
        let found = value.kind().to_owned();
        value
            .into_instance()
            .and_then(|instance| instance.downcast::<T>())
            .ok_or_else(|| ResolveError::TypeMismatch {
                expected: std::any::type_name::<T>().to_owned(),
                found,
            })
    }

    /// Produce the value bound to `id`, building it if needed.
    ///
    /// Unbound identifiers are treated as class names. Singleton results are
    /// cached unless the call carries override arguments or a type-based
    /// contextual override applies, since such results are call-specific.
    pub fn resolve(&self, id: &str, args: Arguments) -> Result<Value, ResolveError> {
        let (id, binding, contextual) = {
            let registry = self.inner.registry.lock();
            let id = registry.get_alias(id);
            let scope = self.inner.current_scope();
            let contextual = scope.and_then(|s| registry.contextual.find_scoped(&s, &id));

            if args.is_empty() && contextual.is_none() {
                if let Some(cached) = registry.resolved.get(&id) {
                    trace!(id = %id, "Returning cached singleton");
                    return Ok(cached.clone());
                }
            }
            let binding = registry.bindings.get(&id).cloned();
            (id, binding, contextual)
        };

        if let Some(contextual) = contextual {
            trace!(id = %id, "Resolving through contextual override");
            return self.resolve_contextual(contextual);
        }

        let (concrete, shared) = match binding {
            Some(Binding::Instance(value)) => return Ok(value),
            Some(Binding::Singleton(concrete)) => (concrete, true),
            Some(Binding::Transient(concrete)) => (concrete, false),
            None => (Concrete::Class(id.clone()), false),
        };

        let cacheable = shared && args.is_empty();
        let object = match &concrete {
            Concrete::Class(class) if *class != id => self.resolve(class, args)?,
            _ => self.build(&concrete, args)?,
        };

        if cacheable {
            debug!(id = %id, "Caching singleton");
            let mut registry = self.inner.registry.lock();
            let stored = registry.resolved.entry(id).or_insert(object);
            return Ok(stored.clone());
        }
        Ok(object)
    }

    /// Static-style resolution against the process-wide container.
    pub fn pull(id: &str, args: Arguments) -> Result<Value, ResolveError> {
        Self::current().resolve(id, args)
    }

    pub(crate) fn resolve_contextual(&self, contextual: Contextual) -> Result<Value, ResolveError> {
        match contextual {
            Contextual::Value(value) => Ok(value),
            Contextual::Factory(factory) => factory(self),
            Contextual::Class(class) => self.make(&class),
        }
    }

    /// Look up the contextual value for a parameter name in the current scope.
    pub(crate) fn contextual_parameter(&self, name: &str) -> Option<Contextual> {
        let scope = self.inner.current_scope();
        self.inner
            .registry
            .lock()
            .contextual
            .find(scope.as_deref(), &format!("${name}"))
    }

    /// Build a concrete: call a factory, or construct a class.
    pub fn build(&self, concrete: &Concrete, args: Arguments) -> Result<Value, ResolveError> {
        match concrete {
            Concrete::Factory(factory) => factory(self, &args),
            Concrete::Class(class) => self.invoke_class(class, args),
        }
    }

    /// Construct `class` from its descriptor, bypassing bindings.
    ///
    /// A public static factory method on the class takes precedence over its
    /// constructor. A concrete class with neither is built as a unit object
    /// and ignores `args`. The class is on the build stack for the duration of
    /// the call, whether it succeeds or fails.
    pub fn invoke_class(&self, class: &str, args: Arguments) -> Result<Value, ResolveError> {
        let descriptor = match self.class(class) {
            Some(descriptor) if descriptor.is_instantiable() => descriptor,
            _ => return Err(self.not_instantiable(class)),
        };

        let _frame = BuildFrame::enter(self, class)?;
        debug!(class, "Building class");

        if let Some(factory) = descriptor.factory_method() {
            let target = format!("{class}::{}()", factory.name());
            let bound = self.bind_params(factory.signature(), args, &target)?;
            return factory
                .call(None, BoundArgs::new(bound))
                .map_err(|e| ResolveError::invocation(target, e));
        }

        let object: Box<dyn Any + Send + Sync> = match descriptor.get_constructor() {
            Some(constructor) => {
                let target = format!("{class}::new()");
                let bound = self.bind_params(constructor.signature(), args, &target)?;
                constructor
                    .construct(BoundArgs::new(bound))
                    .map_err(|e| ResolveError::invocation(target, e))?
            }
            None => {
                debug!(class, "No constructor declared, building unit object");
                Box::new(())
            }
        };
        let lineage = self.inner.registry.lock().types.ancestors(class);
        Ok(Value::Object(descriptor.instantiate(object).with_lineage(lineage)))
    }

    fn not_instantiable(&self, class: &str) -> ResolveError {
        ResolveError::NotInstantiable {
            target: class.to_owned(),
            building: self.build_stack(),
        }
    }
}

/// Keeps one class on the calling thread's build stack for as long as it lives.
struct BuildFrame<'a> {
    stacks: &'a Mutex<HashMap<ThreadId, Vec<String>>>,
    thread: ThreadId,
}

impl<'a> BuildFrame<'a> {
    fn enter(container: &'a Container, class: &str) -> Result<Self, ResolveError> {
        let stacks = &container.inner.build_stacks;
        let thread = thread::current().id();
        let mut guard = stacks.lock();
        let stack = guard.entry(thread).or_default();
        if stack.iter().any(|c| c == class) {
            let mut path = stack.clone();
            path.push(class.to_owned());
            return Err(ResolveError::CircularDependency {
                target: class.to_owned(),
                path,
            });
        }
        stack.push(class.to_owned());
        Ok(Self { stacks, thread })
    }
}

impl Drop for BuildFrame<'_> {
    fn drop(&mut self) {
        let mut stacks = self.stacks.lock();
        if let Some(stack) = stacks.get_mut(&self.thread) {
            stack.pop();
            if stack.is_empty() {
                stacks.remove(&self.thread);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ClassFixture;
    use rivet_core::{Instance, Param, Signature};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn object(value: &Value) -> &Instance {
        value.as_instance().expect("object")
    }

    #[test]
    fn unbound_class_is_transient() {
        let container = Container::new();
        container.register_class(ClassFixture::unit("Clock"));

        let a = container.make("Clock").unwrap();
        let b = container.make("Clock").unwrap();
        assert!(!object(&a).ptr_eq(object(&b)));
        assert_eq!(object(&a).class(), "Clock");
    }

    #[test]
    fn singleton_factory_runs_once() {
        let container = Container::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        container.singleton(
            "clock",
            Concrete::factory(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Object(Instance::new("Clock", ())))
            }),
        );

        let a = container.make("clock").unwrap();
        let b = container.make("clock").unwrap();
        assert!(object(&a).ptr_eq(object(&b)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(container.resolved("clock"));

        container.forget_instance("clock");
        let c = container.make("clock").unwrap();
        assert!(!object(&a).ptr_eq(object(&c)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn singleton_with_arguments_is_not_cached() {
        let container = Container::new();
        container.register_class(ClassFixture::unit("Clock"));
        container.singleton_self("Clock");

        let with_args = container.resolve("Clock", Arguments::positional([1i64])).unwrap();
        let first = container.make("Clock").unwrap();
        let second = container.make("Clock").unwrap();
        assert!(!object(&with_args).ptr_eq(object(&first)));
        assert!(object(&first).ptr_eq(object(&second)));
    }

    #[test]
    fn instance_binding_returns_same_object() {
        let container = Container::new();
        let clock = Instance::new("Clock", ());
        container.instance("clock", clock.clone());

        let resolved = container.make("clock").unwrap();
        assert!(object(&resolved).ptr_eq(&clock));
        assert!(container.is_shared("clock"));
    }

    #[test]
    fn aliases_follow_chains() {
        let container = Container::new();
        container.instance("cache.store", 42i64);
        container.alias("cache.store", "cache");
        container.alias("cache", "store");

        assert_eq!(container.get_alias("store"), "cache.store");
        assert_eq!(container.make("store").unwrap(), Value::Int(42));
        assert!(container.is_alias("cache"));
        assert_eq!(container.aliases_of("cache.store"), ["cache"]);
    }

    #[test]
    fn rebinding_an_alias_unaliases_it() {
        let container = Container::new();
        container.instance("a", 1i64);
        container.alias("a", "b");
        container.instance("b", 2i64);

        assert!(!container.is_alias("b"));
        assert_eq!(container.make("b").unwrap(), Value::Int(2));
        assert!(container.aliases_of("a").is_empty());
    }

    #[test]
    fn binding_chain_resolves_through() {
        let container = Container::new();
        container.register_class(ClassFixture::unit("FileCache"));
        container.bind("Cache", "FileCache");

        let value = container.make("Cache").unwrap();
        assert_eq!(object(&value).class(), "FileCache");
    }

    #[test]
    fn interface_without_binding_is_not_instantiable() {
        let container = Container::new();
        container.register_class(ClassDescriptor::interface("Cache"));

        let err = container.make("Cache").unwrap_err();
        assert!(matches!(err, ResolveError::NotInstantiable { ref target, .. } if target == "Cache"));

        let err = container.make("Unknown").unwrap_err();
        assert!(matches!(err, ResolveError::NotInstantiable { .. }));
    }

    #[test]
    fn concrete_without_constructor_builds_unit_object() {
        let container = Container::new();
        container.register_class(ClassDescriptor::concrete("Marker").implements("Tag"));

        let marker = container
            .resolve("Marker", rivet_core::args!["ignored"])
            .unwrap();
        let marker = object(&marker);
        assert_eq!(marker.class(), "Marker");
        assert!(marker.is_a("Tag"));
        assert!(marker.downcast_ref::<()>().is_some());
        assert_eq!(container.build_stack_len(), 0);
    }

    #[test]
    fn not_instantiable_reports_build_stack() {
        let container = Container::new();
        container.register_class(ClassDescriptor::interface("Cache"));
        container.register_class(ClassFixture::with_params(
            "Repository",
            Signature::new().param(Param::new("cache").class("Cache")),
        ));

        let err = container.make("Repository").unwrap_err();
        match err {
            ResolveError::NotInstantiable { target, building } => {
                assert_eq!(target, "Cache");
                assert_eq!(building, ["Repository"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(container.build_stack_len(), 0);
    }

    #[test]
    fn circular_dependency_is_detected() {
        let container = Container::new();
        container.register_class(ClassFixture::with_params(
            "A",
            Signature::new().param(Param::new("b").class("B")),
        ));
        container.register_class(ClassFixture::with_params(
            "B",
            Signature::new().param(Param::new("a").class("A")),
        ));

        let err = container.make("A").unwrap_err();
        match err {
            ResolveError::CircularDependency { target, path } => {
                assert_eq!(target, "A");
                assert_eq!(path, ["A", "B", "A"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(container.build_stack_len(), 0);
    }

    #[test]
    fn concurrent_builds_keep_separate_stacks() {
        let container = Container::new();
        let barrier = Arc::new(std::sync::Barrier::new(2));
        let gate = barrier.clone();
        container.register_class(ClassDescriptor::concrete("Slow").constructor(
            Signature::new(),
            move |_| {
                gate.wait();
                Ok(())
            },
        ));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let container = container.clone();
                std::thread::spawn(move || container.make("Slow").map(|_| ()))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
        assert_eq!(container.build_stack_len(), 0);
    }

    #[test]
    fn factory_method_overrides_constructor() {
        let container = Container::new();
        container.register_class(
            ClassFixture::unit("Clock").factory(
                Signature::new().param(Param::new("zone").builtin("string").default("UTC")),
                |mut args| {
                    let zone: String = args.take("zone")?;
                    Ok(Value::Str(format!("clock@{zone}")))
                },
            ),
        );

        assert_eq!(container.make("Clock").unwrap(), Value::from("clock@UTC"));
        assert_eq!(
            container
                .resolve("Clock", Arguments::named([("zone", "CET")]))
                .unwrap(),
            Value::from("clock@CET")
        );
    }

    #[test]
    fn make_as_downcasts() {
        struct Config {
            debug: bool,
        }

        let container = Container::new();
        container.instance("config", Instance::new("Config", Config { debug: true }));

        let config = container.make_as::<Config>("config").unwrap();
        assert!(config.debug);

        let err = container.make_as::<String>("config").unwrap_err();
        assert!(matches!(err, ResolveError::TypeMismatch { .. }));
    }

    #[test]
    fn flush_keeps_types() {
        let container = Container::new();
        container.register_class(ClassFixture::unit("Clock"));
        container.singleton_self("Clock");
        container.alias("Clock", "clock");
        container.make("Clock").unwrap();

        container.flush();
        assert!(!container.bound("Clock"));
        assert!(!container.is_alias("clock"));
        assert!(container.make("Clock").is_ok());
    }
}
