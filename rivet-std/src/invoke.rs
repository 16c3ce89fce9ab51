//! # Invocation
//!
//! Calling closures, free functions and methods with their parameters bound.
//!
//! [`Container::invoke`] is the single entry point; it hands closures and
//! plain function names to [`Container::invoke_function`] and everything with
//! a receiver or a `Class::method` reference to [`Container::invoke_method`].

use crate::container::Container;
use rivet_core::{
    Arguments, BoundArgs, Callable, Instance, IntoCallable, MethodDescriptor, ResolveError,
    TargetKind, Value,
};
use std::fmt;
use tracing::debug;

/// Separator between a class and a method in a static reference.
const SCOPE_SEPARATOR: &str = "::";

// ============================================================================
// Targets
// ============================================================================

/// The object side of a method call.
#[derive(Debug, Clone)]
pub enum Receiver {
    /// An existing object.
    Object(Instance),
    /// A class name, built through [`Container::invoke_class`] before the call.
    Class(String),
}

impl From<Instance> for Receiver {
    fn from(instance: Instance) -> Self {
        Receiver::Object(instance)
    }
}

impl From<&str> for Receiver {
    fn from(class: &str) -> Self {
        Receiver::Class(class.to_owned())
    }
}

impl From<String> for Receiver {
    fn from(class: String) -> Self {
        Receiver::Class(class)
    }
}

/// Something the container can invoke.
#[derive(Clone)]
pub enum Target {
    /// An anonymous or pre-described callable.
    Closure(Callable),
    /// A free function registered by name.
    Function(String),
    /// A method on an object or on a freshly built class.
    Method(Receiver, String),
    /// A `Class::method` static reference.
    Static(String),
}

impl Target {
    /// A method target.
    pub fn method(receiver: impl Into<Receiver>, method: impl Into<String>) -> Self {
        Target::Method(receiver.into(), method.into())
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Closure(c) => f.debug_tuple("Closure").field(&c.name()).finish(),
            Target::Function(name) => f.debug_tuple("Function").field(name).finish(),
            Target::Method(receiver, method) => {
                f.debug_tuple("Method").field(receiver).field(method).finish()
            }
            Target::Static(reference) => f.debug_tuple("Static").field(reference).finish(),
        }
    }
}

impl From<&str> for Target {
    fn from(reference: &str) -> Self {
        if reference.contains(SCOPE_SEPARATOR) {
            Target::Static(reference.to_owned())
        } else {
            Target::Function(reference.to_owned())
        }
    }
}

impl From<String> for Target {
    fn from(reference: String) -> Self {
        Target::from(reference.as_str())
    }
}

impl From<Callable> for Target {
    fn from(callable: Callable) -> Self {
        Target::Closure(callable)
    }
}

impl<R: Into<Receiver>> From<(R, &str)> for Target {
    fn from((receiver, method): (R, &str)) -> Self {
        Target::method(receiver, method)
    }
}

/// A function-shaped target: a closure or a registered function name.
#[derive(Clone)]
pub enum FunctionRef {
    /// A closure or pre-described callable.
    Closure(Callable),
    /// A registered function name.
    Named(String),
}

impl From<&str> for FunctionRef {
    fn from(name: &str) -> Self {
        FunctionRef::Named(name.to_owned())
    }
}

impl From<String> for FunctionRef {
    fn from(name: String) -> Self {
        FunctionRef::Named(name)
    }
}

impl From<Callable> for FunctionRef {
    fn from(callable: Callable) -> Self {
        FunctionRef::Closure(callable)
    }
}

/// A method-shaped target: a receiver and method, or a `Class::method` reference.
#[derive(Debug, Clone)]
pub enum MethodRef {
    /// A receiver and a method name.
    Bound(Receiver, String),
    /// A `Class::method` reference, called without a receiver.
    Static(String),
}

impl From<&str> for MethodRef {
    fn from(reference: &str) -> Self {
        MethodRef::Static(reference.to_owned())
    }
}

impl<R: Into<Receiver>> From<(R, &str)> for MethodRef {
    fn from((receiver, method): (R, &str)) -> Self {
        MethodRef::Bound(receiver.into(), method.to_owned())
    }
}

// ============================================================================
// Invocation
// ============================================================================

impl Container {
    /// Invoke any target with its parameters bound.
    ///
    /// `force_accessible` allows calling non-public methods.
    pub fn invoke(
        &self,
        target: impl Into<Target>,
        args: Arguments,
        force_accessible: bool,
    ) -> Result<Value, ResolveError> {
        match target.into() {
            Target::Closure(callable) => self.invoke_function(callable, args),
            Target::Function(name) => self.invoke_function(name, args),
            Target::Method(receiver, method) => {
                self.invoke_method(MethodRef::Bound(receiver, method), args, force_accessible)
            }
            Target::Static(reference) => {
                self.invoke_method(MethodRef::Static(reference), args, force_accessible)
            }
        }
    }

    /// Invoke a closure or a registered free function.
    pub fn invoke_function(
        &self,
        function: impl Into<FunctionRef>,
        args: Arguments,
    ) -> Result<Value, ResolveError> {
        let callable = match function.into() {
            FunctionRef::Closure(callable) => callable,
            FunctionRef::Named(name) => self
                .inner
                .registry
                .lock()
                .types
                .function(&name)
                .ok_or_else(|| ResolveError::not_found(TargetKind::Function, format!("{name}()")))?,
        };
        debug!(function = callable.name(), "Invoking function");
        self.call(&callable, args)
    }

    /// Invoke a [`Callable`] produced by `#[callable]` or built by hand.
    pub fn call(&self, callable: &Callable, args: Arguments) -> Result<Value, ResolveError> {
        let target = format!("{}()", callable.name());
        let bound = self.bind_params(callable.signature(), args, &target)?;
        callable
            .call(BoundArgs::new(bound))
            .map_err(|e| ResolveError::invocation(target, e))
    }

    /// Invoke a method.
    ///
    /// A class-name receiver is built with [`invoke_class`](Self::invoke_class)
    /// first. A `Class::method` reference is called without a receiver, so the
    /// method must be static.
    pub fn invoke_method(
        &self,
        method: impl Into<MethodRef>,
        args: Arguments,
        force_accessible: bool,
    ) -> Result<Value, ResolveError> {
        let (receiver, class, name) = match method.into() {
            MethodRef::Bound(Receiver::Object(instance), name) => {
                let class = instance.class().to_owned();
                (Some(instance), class, name)
            }
            MethodRef::Bound(Receiver::Class(class), name) => {
                if self.class(&class).is_none() {
                    return Err(ResolveError::not_found(TargetKind::Class, class));
                }
                let instance = self
                    .invoke_class(&class, Arguments::new())?
                    .into_instance()
                    .ok_or_else(|| ResolveError::TypeMismatch {
                        expected: format!("instance of {class}"),
                        found: "non-object factory result".to_owned(),
                    })?;
                (Some(instance), class, name)
            }
            MethodRef::Static(reference) => {
                let Some((class, name)) = reference.split_once(SCOPE_SEPARATOR) else {
                    return Err(ResolveError::not_found(TargetKind::Method, reference));
                };
                (None, class.to_owned(), name.to_owned())
            }
        };

        let label = format!("{class}::{name}()");
        let descriptor = self
            .inner
            .registry
            .lock()
            .types
            .method(&class, &name)
            .ok_or_else(|| ResolveError::not_found(TargetKind::Method, label.clone()))?;

        if receiver.is_none() && !descriptor.is_static() {
            return Err(ResolveError::Inaccessible {
                target: label,
                reason: "non-static method called without a receiver",
            });
        }
        if !descriptor.is_public() && !force_accessible {
            return Err(ResolveError::Inaccessible {
                target: label,
                reason: "method is not public",
            });
        }

        debug!(method = %label, "Invoking method");
        let bound = self.bind_params(descriptor.signature(), args, &label)?;
        descriptor
            .call(receiver.as_ref(), BoundArgs::new(bound))
            .map_err(|e| ResolveError::invocation(label, e))
    }

    /// Bind and call an already-reflected method.
    ///
    /// Visibility is not checked: holding the descriptor is access enough.
    pub fn invoke_reflect_method(
        &self,
        instance: Option<&Instance>,
        method: &MethodDescriptor,
        args: Arguments,
    ) -> Result<Value, ResolveError> {
        let label = match instance {
            Some(instance) => format!("{}::{}()", instance.class(), method.name()),
            None => format!("{}()", method.name()),
        };
        let bound = self.bind_params(method.signature(), args, &label)?;
        method
            .call(instance, BoundArgs::new(bound))
            .map_err(|e| ResolveError::invocation(label, e))
    }

    /// Invoke anything convertible into a [`Callable`].
    pub fn invoke_callable(
        &self,
        callable: impl IntoCallable,
        args: Arguments,
    ) -> Result<Value, ResolveError> {
        self.call(&callable.into_callable(), args)
    }
}
