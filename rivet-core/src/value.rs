//! Dynamic values passed through the container.
//!
//! Constructor arguments, callable results and registered instances all
//! travel as [`Value`]. Objects are [`Instance`]s: shared, type-erased Rust
//! values tagged with the class name they were built as and every type name
//! they satisfy.

use crate::error::ValueError;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered list.
    List(Vec<Value>),
    /// An object.
    Object(Instance),
}

impl Value {
    /// A short name for the kind of value, used in diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "array",
            Value::Object(instance) => instance.class(),
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the object, if this value is one.
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// Take the object, if this value is one.
    pub fn into_instance(self) -> Option<Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// Borrow the string, if this value is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Read the integer, if this value is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Object(instance) => f.debug_tuple("Object").field(instance).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// A shared object held by the container.
///
/// Cloning an `Instance` clones the handle, not the object: two clones are
/// [`ptr_eq`](Instance::ptr_eq).
#[derive(Clone)]
pub struct Instance {
    class: Arc<str>,
    lineage: Arc<[Arc<str>]>,
    object: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    /// Wrap `object` as an instance of `class` with no declared supertypes.
    pub fn new<T: Any + Send + Sync>(class: impl Into<Arc<str>>, object: T) -> Self {
        Self::from_arc(class, Vec::new(), Arc::new(object))
    }

    /// Wrap an already shared object.
    pub fn from_arc(
        class: impl Into<Arc<str>>,
        lineage: Vec<Arc<str>>,
        object: Arc<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            class: class.into(),
            lineage: lineage.into(),
            object,
        }
    }

    /// Wrap a value of an [`Injectable`](crate::Injectable) type, taking the
    /// class name and supertypes from its descriptor.
    pub fn of<T: crate::Injectable>(object: T) -> Self {
        let descriptor = T::descriptor();
        Self::from_arc(
            descriptor.name_arc(),
            descriptor.lineage().to_vec(),
            Arc::new(object),
        )
    }

    /// The class this instance was built as.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// The declared parents and interfaces of the class.
    pub fn lineage(&self) -> &[Arc<str>] {
        &self.lineage
    }

    /// Replace the recorded supertypes, keeping the class and object.
    pub fn with_lineage(mut self, lineage: Vec<Arc<str>>) -> Self {
        self.lineage = lineage.into();
        self
    }

    /// Whether this instance is of `type_name` or one of its recorded supertypes.
    pub fn is_a(&self, type_name: &str) -> bool {
        &*self.class == type_name || self.lineage.iter().any(|t| &**t == type_name)
    }

    /// Whether both handles point to the same object.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }

    /// Borrow the object as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }

    /// Get a shared handle to the object as `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.object.clone().downcast::<T>().ok()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class)
            .field("object", &Arc::as_ptr(&self.object))
            .finish()
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Convert a [`Value`] into a Rust type.
pub trait FromValue: Sized {
    /// Human-readable name of the target type, for diagnostics.
    const EXPECTED: &'static str;

    /// Convert `value`, or hand it back if it has the wrong shape.
    fn from_value(value: Value) -> Result<Self, Value>;
}

/// Convert a Rust value into a [`Value`].
pub trait IntoValue {
    /// Perform the conversion.
    fn into_value(self) -> Value;
}

pub(crate) fn convert<T: FromValue>(parameter: &str, value: Value) -> Result<T, ValueError> {
    T::from_value(value).map_err(|rejected| ValueError {
        parameter: parameter.to_owned(),
        expected: T::EXPECTED,
        found: rejected.kind().to_owned(),
    })
}

impl FromValue for Value {
    const EXPECTED: &'static str = "value";

    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

macro_rules! impl_int_value {
    ($($t:ty),+) => {
        $(
            impl FromValue for $t {
                const EXPECTED: &'static str = stringify!($t);

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::Int(i) => <$t>::try_from(i).map_err(|_| Value::Int(i)),
                        other => Err(other),
                    }
                }
            }

            impl IntoValue for $t {
                #[allow(clippy::cast_possible_wrap, clippy::cast_lossless)]
                fn into_value(self) -> Value {
                    Value::Int(self as i64)
                }
            }
        )+
    };
}

impl_int_value!(i8, i16, i32, i64, u8, u16, u32, usize);

impl FromValue for u64 {
    const EXPECTED: &'static str = "u64";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(i) => u64::try_from(i).map_err(|_| Value::Int(i)),
            other => Err(other),
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "f64";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(x) => Ok(x),
            #[allow(clippy::cast_precision_loss)]
            Value::Int(i) => Ok(i as f64),
            other => Err(other),
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromValue for Instance {
    const EXPECTED: &'static str = "object";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(instance) => Ok(instance),
            other => Err(other),
        }
    }
}

impl<T: Any + Send + Sync> FromValue for Arc<T> {
    const EXPECTED: &'static str = "object";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(instance) => match instance.downcast::<T>() {
                Some(object) => Ok(object),
                None => Err(Value::Object(instance)),
            },
            other => Err(other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "array";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(T::from_value(item)?);
                }
                Ok(out)
            }
            other => Err(other),
        }
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for u64 {
    fn into_value(self) -> Value {
        i64::try_from(self).map_or(Value::Float(self as f64), Value::Int)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl IntoValue for Instance {
    fn into_value(self) -> Value {
        Value::Object(self)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

macro_rules! impl_from_for_value {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    value.into_value()
                }
            }
        )+
    };
}

impl_from_for_value!(bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f64, String, &str, Instance, ());

impl<T: IntoValue> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.into_value()
    }
}

impl<T: IntoValue> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        value.into_value()
    }
}
