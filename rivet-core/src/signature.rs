//! Parameter descriptors.
//!
//! A [`Signature`] is the table the binder walks for every constructor,
//! method and function: one [`Param`] per formal parameter, in declaration
//! order, with its name, declared type and optional default.

use crate::error::ValueError;
use crate::value::{FromValue, Value, convert};
use std::borrow::Cow;
use std::fmt;

/// The declared type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    /// A primitive type such as `int` or `string`. Never resolved from the container.
    Builtin(&'static str),
    /// A class or interface name. Resolved from the container unless supplied.
    Class(Cow<'static, str>),
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeHint::Builtin(name) => f.write_str(name),
            TypeHint::Class(name) => f.write_str(name),
        }
    }
}

/// One formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: Cow<'static, str>,
    hint: Option<TypeHint>,
    default: Option<Value>,
}

impl Param {
    /// An untyped parameter with no default.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            hint: None,
            default: None,
        }
    }

    /// Declare a class or interface type.
    pub fn class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.hint = Some(TypeHint::Class(class.into()));
        self
    }

    /// Declare a primitive type.
    pub fn builtin(mut self, name: &'static str) -> Self {
        self.hint = Some(TypeHint::Builtin(name));
        self
    }

    /// Declare a default value.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type, if any.
    pub fn hint(&self) -> Option<&TypeHint> {
        self.hint.as_ref()
    }

    /// The declared class name, when the parameter has an object type.
    pub fn class_hint(&self) -> Option<&str> {
        match &self.hint {
            Some(TypeHint::Class(name)) => Some(name),
            _ => None,
        }
    }

    /// The declared default value, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// The ordered parameter table of one constructor, method or function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    /// A signature with no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// The parameters in declaration order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl FromIterator<Param> for Signature {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

/// Bound arguments handed to a body, one per parameter, in declaration order.
#[derive(Debug)]
pub struct BoundArgs {
    values: std::vec::IntoIter<Value>,
}

impl BoundArgs {
    /// Wrap the binder's output.
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// Take the next argument and convert it to `T`.
    ///
    /// `parameter` is only used to label a conversion failure.
    pub fn take<T: FromValue>(&mut self, parameter: &str) -> Result<T, ValueError> {
        convert(parameter, self.values.next().unwrap_or_default())
    }

    /// Take the next argument as is.
    pub fn next_value(&mut self) -> Option<Value> {
        self.values.next()
    }

    /// Number of arguments not yet taken.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}
