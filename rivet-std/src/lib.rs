//! # rivet-std
//!
//! The Rivet resolution container.
//!
//! This crate provides:
//! - **Registration**: [`Container::bind`], [`Container::singleton`],
//!   [`Container::instance`], [`Container::alias`] and contextual bindings
//!   through [`Container::when`]
//! - **Resolution**: [`Container::resolve`] and [`Container::make`], building
//!   object graphs from registered [`ClassDescriptor`](rivet_core::ClassDescriptor)s
//! - **Invocation**: [`Container::invoke`] for closures, functions and methods
//! - **Events**: a single-slot named event table with broadcast dispatch
//! - **Configuration**: [`ContainerConfig`] loaded from TOML
//!
//! ```rust
//! use rivet_core::{Arguments, ClassDescriptor, Param, Signature, Value};
//! use rivet_std::Container;
//!
//! struct Mailer {
//!     host: String,
//! }
//!
//! let container = Container::new();
//! container.register_class(ClassDescriptor::concrete("Mailer").constructor(
//!     Signature::new().param(Param::new("host").builtin("string").default("localhost")),
//!     |mut args| Ok(Mailer { host: args.take("host")? }),
//! ));
//! container.singleton_self("Mailer");
//!
//! let mailer = container.make_as::<Mailer>("Mailer").unwrap();
//! assert_eq!(mailer.host, "localhost");
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core vocabulary
pub use rivet_core;

mod binder;
pub mod config;
pub mod container;
pub mod contextual;
mod events;
pub mod factory;
pub mod invoke;
pub mod testing;
pub mod types;

pub use config::{ConfigError, ContainerConfig};
pub use container::{
    Binding, CONTAINER_CLASS, CONTAINER_INTERFACE, Concrete, Container, FactoryFn, Lifetime,
};
pub use contextual::{ContextFn, Contextual, ContextualBindingBuilder, ContextualNeeds};
pub use factory::qualify;
pub use invoke::{FunctionRef, MethodRef, Receiver, Target};
pub use types::TypeTable;

#[cfg(feature = "inventory")]
pub use inventory;
