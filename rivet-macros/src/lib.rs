//! # rivet-macros
//!
//! Procedural macros for the Rivet resolution container.
//!
//! - `#[derive(Injectable)]` - describe a struct's construction from its fields
//! - `#[callable]` - turn a free function into a `Callable`

use proc_macro::TokenStream;

mod callable;
mod injectable;
mod params;

/// Derive `Injectable` for a struct with named fields.
///
/// Each field becomes one constructor parameter, named after the field.
///
/// ```rust,ignore
/// #[derive(Injectable)]
/// #[inject(class = "App\\Mailer", implements("App\\Contracts\\Mailer"))]
/// struct Mailer {
///     transport: Arc<SmtpTransport>,
///     #[inject(class = "App\\Contracts\\Logger")]
///     logger: Instance,
///     #[inject(default = 25)]
///     port: u16,
///     #[inject(name = "fromAddress")]
///     from: String,
///     retries: Option<u32>,
///     #[inject(skip)]
///     sent: AtomicUsize,
/// }
/// ```
///
/// - `Arc<T>` fields are resolved as `T::CLASS` unless supplied
/// - `Option<T>` fields default to null
/// - `skip` fields are initialized with `Default::default()`
///
/// The class name defaults to the struct name.
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    injectable::derive_injectable_impl(input)
}

/// Turn a free function into a unit struct implementing `IntoCallable`.
///
/// ```rust,ignore
/// #[callable]
/// fn greet(name: String, #[inject(default = 1)] times: u32) -> String {
///     name.repeat(times as usize)
/// }
///
/// container.register_function(greet.into_callable());
/// container.invoke("greet", args!["hi"], false)?;
/// ```
///
/// A `Result` return is passed through with its error boxed; any other
/// return is converted with `IntoValue`.
#[proc_macro_attribute]
pub fn callable(attr: TokenStream, item: TokenStream) -> TokenStream {
    callable::callable_impl(attr, item)
}
