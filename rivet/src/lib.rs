//! # rivet - Reflective Dependency-Resolution Container
//!
//! `rivet` builds object graphs from declared constructor parameters and
//! invokes closures, functions and methods with their arguments bound
//! automatically. A small named-event table rides along for lifecycle hooks.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rivet::prelude::*;
//! use std::sync::Arc;
//!
//! #[derive(Injectable)]
//! struct Transport {
//!     #[inject(default = "localhost")]
//!     host: String,
//! }
//!
//! #[derive(Injectable)]
//! struct Mailer {
//!     transport: Arc<Transport>,
//! }
//!
//! let container = Container::new();
//! container.register::<Transport>();
//! container.register::<Mailer>();
//!
//! let mailer = container.make_as::<Mailer>("Mailer")?;
//! assert_eq!(mailer.transport.host, "localhost");
//! ```
//!
//! ## Parameter Binding
//!
//! Every parameter is bound by the first rule that applies: a supplied or
//! resolved object for class-typed parameters, the next positional argument,
//! the argument under its name (or `snake_case` name), a contextual `$name`
//! value, the declared default. See [`Container::bind_params`].

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use rivet_core::{
    // Arguments
    ArgKey,
    Arguments,
    // Errors
    BoxError,
    // Reflection
    BoundArgs,
    Callable,
    ClassDescriptor,
    ClassKind,
    Constructor,
    EventError,
    FACTORY_METHOD,
    // Values
    FromValue,
    Injectable,
    Instance,
    IntoCallable,
    IntoValue,
    MethodDescriptor,
    Param,
    ResolveError,
    RivetError,
    Signature,
    TargetKind,
    TypeHint,
    Value,
    ValueError,
    Visibility,
    args,
};

#[cfg(feature = "inventory")]
pub use rivet_core::ClassRegistration;

// Container
pub use rivet_std::{
    Binding, CONTAINER_CLASS, CONTAINER_INTERFACE, Concrete, ConfigError, Container,
    ContainerConfig, Contextual, ContextualBindingBuilder, ContextualNeeds, Lifetime, Receiver,
    Target, TypeTable, qualify,
};

/// Invocation targets.
pub mod invoke {
    pub use rivet_std::invoke::{FunctionRef, MethodRef, Receiver, Target};
}

/// Testing utilities.
pub mod testing {
    pub use rivet_std::testing::{ClassFixture, RecordingCallable};
}

/// Prelude module - common imports for Rivet.
///
/// # Usage
///
/// ```rust,ignore
/// use rivet::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Arguments, BoundArgs, Callable, ClassDescriptor, Concrete, Container, Injectable,
        Instance, IntoCallable, Param, ResolveError, Signature, Value, args,
    };

    #[cfg(feature = "macros")]
    pub use crate::callable;
}

#[cfg(feature = "macros")]
pub use rivet_macros::{Injectable, callable};

#[cfg(feature = "inventory")]
pub use inventory;

/// Registers a derived type for link-time discovery. Expands to nothing
/// unless the `inventory` feature is enabled.
#[doc(hidden)]
#[cfg(feature = "inventory")]
#[macro_export]
macro_rules! __register_class {
    ($ty:ty) => {
        $crate::inventory::submit! { $crate::ClassRegistration::of::<$ty>() }
    };
}

#[doc(hidden)]
#[cfg(not(feature = "inventory"))]
#[macro_export]
macro_rules! __register_class {
    ($ty:ty) => {};
}
