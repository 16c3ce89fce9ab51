//! The type table: every class and free function the container can reflect on.

use rivet_core::{Callable, ClassDescriptor, Injectable, Instance, MethodDescriptor};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// Registered class and function descriptors, keyed by name.
#[derive(Clone, Default)]
pub struct TypeTable {
    classes: HashMap<String, Arc<ClassDescriptor>>,
    functions: HashMap<String, Callable>,
}

impl TypeTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a class descriptor.
    pub fn insert_class(&mut self, descriptor: ClassDescriptor) {
        self.classes
            .insert(descriptor.name().to_owned(), Arc::new(descriptor));
    }

    /// Add or replace the descriptor of an [`Injectable`] type.
    pub fn insert<T: Injectable>(&mut self) {
        self.insert_class(T::descriptor());
    }

    /// Add or replace a free function.
    pub fn insert_function(&mut self, function: Callable) {
        self.functions.insert(function.name().to_owned(), function);
    }

    /// Look up a class.
    pub fn class(&self, name: &str) -> Option<Arc<ClassDescriptor>> {
        self.classes.get(name).cloned()
    }

    /// Look up a free function.
    pub fn function(&self, name: &str) -> Option<Callable> {
        self.functions.get(name).cloned()
    }

    /// Look up a method on `class`, falling back to its supertypes nearest first.
    pub fn method(&self, class: &str, method: &str) -> Option<MethodDescriptor> {
        let descriptor = self.classes.get(class)?;
        if let Some(found) = descriptor.get_method(method) {
            return Some(found.clone());
        }
        self.ancestors(class)
            .iter()
            .filter_map(|parent| self.classes.get(&**parent))
            .find_map(|parent| parent.get_method(method).cloned())
    }

    /// Every supertype of `class`, nearest first.
    ///
    /// Declared lineage is followed through registered descriptors, so a
    /// grandparent shows up even though `class` only names its parent. Each
    /// name appears once and cyclic declarations terminate.
    pub fn ancestors(&self, class: &str) -> Vec<Arc<str>> {
        let declared = self
            .classes
            .get(class)
            .map(|d| d.lineage().to_vec())
            .unwrap_or_default();
        self.close_lineage(class, declared)
    }

    /// Whether `instance` is of `type_name` or any direct or inherited supertype.
    pub fn instance_of(&self, instance: &Instance, type_name: &str) -> bool {
        if instance.is_a(type_name) {
            return true;
        }
        let mut seeds = instance.lineage().to_vec();
        if let Some(descriptor) = self.classes.get(instance.class()) {
            seeds.extend(descriptor.lineage().iter().cloned());
        }
        self.close_lineage(instance.class(), seeds)
            .iter()
            .any(|t| &**t == type_name)
    }

    fn close_lineage(&self, class: &str, seeds: Vec<Arc<str>>) -> Vec<Arc<str>> {
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let mut queue: VecDeque<Arc<str>> = seeds.into();
        let mut closed = Vec::new();
        while let Some(next) = queue.pop_front() {
            if &*next == class || !seen.insert(next.clone()) {
                continue;
            }
            if let Some(descriptor) = self.classes.get(&*next) {
                queue.extend(descriptor.lineage().iter().cloned());
            }
            closed.push(next);
        }
        closed
    }

    /// Whether a class is registered.
    pub fn contains_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Number of registered classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Register every type submitted through `#[derive(Injectable)]`.
    ///
    /// Returns the number of descriptors added.
    #[cfg(feature = "inventory")]
    pub fn discover(&mut self) -> usize {
        let mut added = 0;
        for registration in inventory::iter::<rivet_core::ClassRegistration>() {
            self.insert_class((registration.descriptor)());
            added += 1;
        }
        added
    }
}
