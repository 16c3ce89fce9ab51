//! # Reflection Descriptors
//!
//! Rust has no runtime reflection, so every constructible type, method and
//! function the container can reach is described up front by a descriptor:
//!
//! - [`ClassDescriptor`] - name, kind, supertypes, constructor and methods
//! - [`MethodDescriptor`] - signature, visibility, static flag and body
//! - [`Callable`] - a closure or free function with its signature
//!
//! Descriptors are usually produced by `#[derive(Injectable)]` and
//! `#[callable]`, but can be assembled by hand with the builders below.

use crate::error::BoxError;
use crate::signature::{BoundArgs, Signature};
use crate::value::{Instance, Value};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name of the public static method a class may expose to take over its own
/// construction.
pub const FACTORY_METHOD: &str = "factory";

/// Body of a constructor: turns bound arguments into the object.
pub type ConstructFn =
    Arc<dyn Fn(BoundArgs) -> Result<Box<dyn Any + Send + Sync>, BoxError> + Send + Sync>;

/// Body of a method. Static methods receive `None`.
pub type MethodFn =
    Arc<dyn Fn(Option<&Instance>, BoundArgs) -> Result<Value, BoxError> + Send + Sync>;

/// Body of a closure or free function.
pub type FunctionFn = Arc<dyn Fn(BoundArgs) -> Result<Value, BoxError> + Send + Sync>;

/// What kind of type a descriptor describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassKind {
    /// A type that can be constructed.
    #[default]
    Concrete,
    /// A type that exists but cannot be constructed on its own.
    Abstract,
    /// A contract other types declare in their lineage.
    Interface,
}

/// Method visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Callable by anyone.
    #[default]
    Public,
    /// Callable only when access is forced.
    Protected,
    /// Callable only when access is forced.
    Private,
}

/// A constructor: its parameter table and body.
#[derive(Clone)]
pub struct Constructor {
    signature: Signature,
    body: ConstructFn,
}

impl Constructor {
    /// The constructor's parameters.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Run the body.
    pub fn construct(&self, args: BoundArgs) -> Result<Box<dyn Any + Send + Sync>, BoxError> {
        (self.body)(args)
    }
}

/// A method on a class.
#[derive(Clone)]
pub struct MethodDescriptor {
    name: Arc<str>,
    signature: Signature,
    visibility: Visibility,
    is_static: bool,
    body: MethodFn,
}

impl MethodDescriptor {
    /// A public instance method.
    pub fn new<F>(name: impl Into<Arc<str>>, signature: Signature, body: F) -> Self
    where
        F: Fn(Option<&Instance>, BoundArgs) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            signature,
            visibility: Visibility::Public,
            is_static: false,
            body: Arc::new(body),
        }
    }

    /// Mark the method static.
    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Set the visibility.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// The method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The method's parameters.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Whether the method is public.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Whether the method is static.
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Run the body.
    pub fn call(&self, receiver: Option<&Instance>, args: BoundArgs) -> Result<Value, BoxError> {
        (self.body)(receiver, args)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .finish_non_exhaustive()
    }
}

/// Everything the container knows about one type.
#[derive(Clone)]
pub struct ClassDescriptor {
    name: Arc<str>,
    kind: ClassKind,
    lineage: Vec<Arc<str>>,
    constructor: Option<Constructor>,
    methods: HashMap<String, MethodDescriptor>,
}

impl ClassDescriptor {
    /// A constructible class with no constructor yet.
    pub fn concrete(name: impl Into<Arc<str>>) -> Self {
        Self::with_kind(name, ClassKind::Concrete)
    }

    /// An abstract class.
    pub fn abstract_class(name: impl Into<Arc<str>>) -> Self {
        Self::with_kind(name, ClassKind::Abstract)
    }

    /// An interface.
    pub fn interface(name: impl Into<Arc<str>>) -> Self {
        Self::with_kind(name, ClassKind::Interface)
    }

    fn with_kind(name: impl Into<Arc<str>>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            lineage: Vec::new(),
            constructor: None,
            methods: HashMap::new(),
        }
    }

    /// Declare a parent class or implemented interface.
    pub fn implements(mut self, type_name: impl Into<Arc<str>>) -> Self {
        self.lineage.push(type_name.into());
        self
    }

    /// Set the constructor.
    pub fn constructor<T, F>(mut self, signature: Signature, body: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(BoundArgs) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.constructor = Some(Constructor {
            signature,
            body: Arc::new(move |args| {
                body(args).map(|object| Box::new(object) as Box<dyn Any + Send + Sync>)
            }),
        });
        self
    }

    /// Add a method, replacing any method of the same name.
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.insert(method.name().to_owned(), method);
        self
    }

    /// Add the public static [`FACTORY_METHOD`] that overrides construction.
    pub fn factory<F>(self, signature: Signature, body: F) -> Self
    where
        F: Fn(BoundArgs) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.method(
            MethodDescriptor::new(FACTORY_METHOD, signature, move |_, args| body(args))
                .into_static(),
        )
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class name as a shared string.
    pub fn name_arc(&self) -> Arc<str> {
        self.name.clone()
    }

    /// The kind of type.
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Declared parents and interfaces.
    pub fn lineage(&self) -> &[Arc<str>] {
        &self.lineage
    }

    /// Whether the type can be constructed at all.
    pub fn is_instantiable(&self) -> bool {
        self.kind == ClassKind::Concrete
    }

    /// The constructor, if declared.
    pub fn get_constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    /// Look up a method.
    pub fn get_method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.get(name)
    }

    /// The construction override, when the class exposes a public static [`FACTORY_METHOD`].
    pub fn factory_method(&self) -> Option<&MethodDescriptor> {
        self.get_method(FACTORY_METHOD)
            .filter(|m| m.is_public() && m.is_static())
    }

    /// Wrap a freshly constructed object as an instance of this class.
    pub fn instantiate(&self, object: Box<dyn Any + Send + Sync>) -> Instance {
        Instance::from_arc(self.name.clone(), self.lineage.clone(), Arc::from(object))
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("lineage", &self.lineage)
            .field(
                "constructor",
                &self.constructor.as_ref().map(Constructor::signature),
            )
            .field("methods", &methods)
            .finish()
    }
}

/// A closure or free function the container can invoke.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    signature: Signature,
    body: FunctionFn,
}

impl Callable {
    /// Describe a closure or function.
    pub fn new<F>(name: impl Into<Arc<str>>, signature: Signature, body: F) -> Self
    where
        F: Fn(BoundArgs) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            signature,
            body: Arc::new(body),
        }
    }

    /// The function name (`{closure}` style names are fine for anonymous ones).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameters.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Run the body.
    pub fn call(&self, args: BoundArgs) -> Result<Value, BoxError> {
        (self.body)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Conversion into a [`Callable`].
///
/// Implemented by `Callable` itself and by the unit structs `#[callable]` generates.
pub trait IntoCallable {
    /// Perform the conversion.
    fn into_callable(self) -> Callable;
}

impl IntoCallable for Callable {
    fn into_callable(self) -> Callable {
        self
    }
}

/// A type that describes its own construction.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not `Injectable`",
    label = "missing `Injectable` implementation",
    note = "Derive it with `#[derive(Injectable)]` or implement `descriptor` by hand."
)]
pub trait Injectable: Send + Sync + 'static {
    /// The class name the type is registered under.
    const CLASS: &'static str;

    /// Build the type's descriptor.
    fn descriptor() -> ClassDescriptor;
}

/// Link-time registration of an [`Injectable`] type.
///
/// Submitted to `inventory` by `#[derive(Injectable)]` when the `inventory`
/// feature is enabled.
#[cfg(feature = "inventory")]
pub struct ClassRegistration {
    /// Builds the descriptor.
    pub descriptor: fn() -> ClassDescriptor,
}

#[cfg(feature = "inventory")]
impl ClassRegistration {
    /// Registration entry for `T`.
    pub const fn of<T: Injectable>() -> Self {
        Self {
            descriptor: T::descriptor,
        }
    }
}

#[cfg(feature = "inventory")]
inventory::collect!(ClassRegistration);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Param;

    struct Clock {
        offset: i64,
    }

    #[test]
    fn factory_method_must_be_public_and_static() {
        let class = ClassDescriptor::concrete("Clock").factory(Signature::new(), |_| {
            Ok(Value::Object(Instance::new("Clock", Clock { offset: 0 })))
        });
        assert!(class.factory_method().is_some());

        let class = ClassDescriptor::concrete("Clock").method(
            MethodDescriptor::new(FACTORY_METHOD, Signature::new(), |_, _| Ok(Value::Null))
                .into_static()
                .visibility(Visibility::Private),
        );
        assert!(class.factory_method().is_none());

        let class = ClassDescriptor::concrete("Clock").method(MethodDescriptor::new(
            FACTORY_METHOD,
            Signature::new(),
            |_, _| Ok(Value::Null),
        ));
        assert!(class.factory_method().is_none());
    }

    #[test]
    fn constructor_builds_tagged_instance() {
        let class = ClassDescriptor::concrete("UtcClock")
            .implements("Clock")
            .constructor(
                Signature::new().param(Param::new("offset").builtin("int")),
                |mut args| {
                    Ok(Clock {
                        offset: args.take("offset")?,
                    })
                },
            );

        let ctor = class.get_constructor().unwrap();
        assert_eq!(ctor.signature().len(), 1);

        let object = ctor.construct(BoundArgs::new(vec![Value::Int(2)])).unwrap();
        let instance = class.instantiate(object);
        assert!(instance.is_a("Clock"));
        assert_eq!(instance.downcast_ref::<Clock>().map(|c| c.offset), Some(2));
    }

    #[test]
    fn only_concrete_is_instantiable() {
        assert!(ClassDescriptor::concrete("A").is_instantiable());
        assert!(!ClassDescriptor::abstract_class("B").is_instantiable());
        assert!(!ClassDescriptor::interface("C").is_instantiable());
    }
}
