//! Error types for Rivet.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RivetError`] - Top-level error type for all Rivet operations
//! - [`ResolveError`] - Errors while building objects or invoking targets
//! - [`EventError`] - Errors from the named-event table
//! - [`ValueError`] - Conversion failures inside constructor and callable bodies

use std::fmt;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Rivet operations.
#[derive(Error, Debug)]
pub enum RivetError {
    /// An error occurred while resolving or invoking.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// An error occurred while dispatching an event.
    #[error("event error: {0}")]
    Event(#[from] EventError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// The kind of target named in a [`ResolveError::TargetNotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A class (type descriptor) name.
    Class,
    /// A free function name.
    Function,
    /// A `Class::method` pair.
    Method,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Class => f.write_str("class"),
            TargetKind::Function => f.write_str("function"),
            TargetKind::Method => f.write_str("method"),
        }
    }
}

/// Errors that can occur while building objects or invoking targets.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The requested type has no binding and cannot be constructed directly.
    #[error("target [{target}] is not instantiable{}", while_building(.building))]
    NotInstantiable {
        /// The type that could not be constructed.
        target: String,
        /// The build stack at the time of failure, outermost first.
        building: Vec<String>,
    },

    /// No binding rule could supply a value for a required parameter.
    #[error("missing parameter `{parameter}` for {target}")]
    MissingParameter {
        /// The parameter name.
        parameter: String,
        /// The constructor, method or function being bound.
        target: String,
    },

    /// A function, method or class named for invocation does not exist.
    #[error("{kind} not exists: {name}")]
    TargetNotFound {
        /// What kind of target was looked up.
        kind: TargetKind,
        /// The name that was looked up.
        name: String,
    },

    /// A class depends on itself, directly or transitively.
    #[error("circular dependency while building [{target}]: {}", .path.join(" -> "))]
    CircularDependency {
        /// The class that was requested a second time.
        target: String,
        /// The build stack that led back to it.
        path: Vec<String>,
    },

    /// The target exists but may not be called the way it was requested.
    #[error("{target} is not accessible: {reason}")]
    Inaccessible {
        /// The method that was requested.
        target: String,
        /// Why the call was refused.
        reason: &'static str,
    },

    /// A resolved value was not of the requested Rust type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The requested type.
        expected: String,
        /// What was actually produced.
        found: String,
    },

    /// A constructor, method or function body returned an error.
    #[error("invocation of {target} failed")]
    Invocation {
        /// The target whose body failed.
        target: String,
        /// The underlying failure.
        #[source]
        source: BoxError,
    },
}

impl ResolveError {
    /// Create a [`ResolveError::MissingParameter`].
    pub fn missing_parameter(parameter: impl Into<String>, target: impl Into<String>) -> Self {
        ResolveError::MissingParameter {
            parameter: parameter.into(),
            target: target.into(),
        }
    }

    /// Create a [`ResolveError::TargetNotFound`].
    pub fn not_found(kind: TargetKind, name: impl Into<String>) -> Self {
        ResolveError::TargetNotFound {
            kind,
            name: name.into(),
        }
    }

    /// Wrap a body failure. A `ResolveError` coming back out of a body (for
    /// example from a nested `make` inside a factory) is passed through as is.
    pub fn invocation(target: impl Into<String>, source: BoxError) -> Self {
        match source.downcast::<ResolveError>() {
            Ok(inner) => *inner,
            Err(source) => ResolveError::Invocation {
                target: target.into(),
                source,
            },
        }
    }
}

fn while_building(building: &[String]) -> String {
    if building.is_empty() {
        String::new()
    } else {
        format!(" while building [{}]", building.join(", "))
    }
}

/// Errors from the named-event table.
#[derive(Error, Debug)]
pub enum EventError {
    /// Dispatch was requested for a name with no registered handler.
    #[error("event not exists: {0}")]
    NotFound(String),

    /// The handler was found but binding or running it failed.
    #[error("event {event} failed")]
    Failed {
        /// The event name.
        event: String,
        /// The underlying failure.
        #[source]
        source: ResolveError,
    },
}

/// A value could not be converted to the type a body asked for.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("parameter `{parameter}`: expected {expected}, found {found}")]
pub struct ValueError {
    /// The parameter being converted.
    pub parameter: String,
    /// The requested Rust type.
    pub expected: &'static str,
    /// The kind of value that was supplied.
    pub found: String,
}

// Convenience conversions
impl From<BoxError> for RivetError {
    fn from(err: BoxError) -> Self {
        RivetError::Custom(err)
    }
}
