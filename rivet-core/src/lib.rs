//! # rivet-core
//!
//! Core vocabulary for the Rivet resolution container.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! libraries that only need to *describe* their types to a container, without
//! pulling in the container itself.
//!
//! # Building Blocks
//!
//! ## Values ([`Value`], [`Instance`])
//!
//! Everything that flows through the container is a [`Value`]. Objects are
//! [`Instance`]s: shared, type-erased Rust values that remember the class name
//! they were built as and every supertype they declare, which is what the
//! binder's "instance of" check consults.
//!
//! ## Arguments ([`Arguments`])
//!
//! Caller-supplied overrides. An ordered key/value list whose first key
//! decides whether a call binds positionally or by name.
//!
//! ## Descriptors ([`Signature`], [`ClassDescriptor`], [`Callable`])
//!
//! The parameter tables the binder walks. One [`Param`] per formal parameter:
//! name, declared type, default.
//!
//! # Error Types
//!
//! - [`RivetError`] - Top-level error type
//! - [`ResolveError`] - Construction and invocation errors
//! - [`EventError`] - Event table errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod args;
mod error;
mod reflect;
mod signature;
mod value;

// Re-exports
pub use args::{ArgKey, Arguments};
pub use error::{BoxError, EventError, ResolveError, RivetError, TargetKind, ValueError};
#[cfg(feature = "inventory")]
pub use reflect::ClassRegistration;
pub use reflect::{
    Callable, ClassDescriptor, ClassKind, ConstructFn, Constructor, FACTORY_METHOD, FunctionFn,
    Injectable, IntoCallable, MethodDescriptor, MethodFn, Visibility,
};
pub use signature::{BoundArgs, Param, Signature, TypeHint};
pub use value::{FromValue, Instance, IntoValue, Value};

#[cfg(feature = "inventory")]
pub use inventory;

/// Build an [`Arguments`] list.
///
/// `args![a, b]` is positional; `args!{"name" => value, ...}` is name-keyed.
///
/// ```rust
/// use rivet_core::{args, Value};
///
/// let positional = args![1, "two"];
/// assert!(positional.is_positional());
///
/// let named = args! { "user_id" => 7 };
/// assert_eq!(named.get("user_id"), Some(&Value::Int(7)));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Arguments::new()
    };
    ($($name:literal => $value:expr),+ $(,)?) => {{
        let mut __args = $crate::Arguments::new();
        $( __args.insert($name, $value); )+
        __args
    }};
    ($($value:expr),+ $(,)?) => {{
        let mut __args = $crate::Arguments::new();
        $( __args.push($value); )+
        __args
    }};
}
