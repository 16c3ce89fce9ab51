//! Parameter-table generation shared by `#[derive(Injectable)]` and `#[callable]`.
//!
//! Maps a Rust type and its `#[inject(..)]` options to a `::rivet::Param`
//! expression.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Expr, GenericArgument, LitStr, PathArguments, Type};

/// Options from `#[inject(..)]` on a field or function parameter.
#[derive(Default)]
pub(crate) struct InjectOptions {
    pub class: Option<LitStr>,
    pub default: Option<Expr>,
    pub name: Option<LitStr>,
    pub skip: bool,
}

impl InjectOptions {
    /// Collect options from every `#[inject(..)]` attribute in `attrs`.
    pub(crate) fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut options = InjectOptions::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("inject")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("class") {
                    options.class = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("default") {
                    options.default = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("name") {
                    options.name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("skip") {
                    options.skip = true;
                } else {
                    return Err(meta.error("unknown inject option"));
                }
                Ok(())
            })?;
        }
        Ok(options)
    }
}

/// Strip `#[inject(..)]` attributes, which are not valid on function parameters.
pub(crate) fn strip_inject_attrs(attrs: &mut Vec<Attribute>) {
    attrs.retain(|a| !a.path().is_ident("inject"));
}

/// The declared type a Rust type maps to.
enum Hint {
    Builtin(&'static str),
    /// `Arc<T>` of an injectable type.
    Injectable(Type),
    Untyped,
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    }
}

fn first_type_argument(segment: &syn::PathSegment) -> Option<&Type> {
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        }),
        _ => None,
    }
}

/// `Some(inner)` when `ty` is `Option<inner>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident == "Option" {
        first_type_argument(segment)
    } else {
        None
    }
}

fn hint_for(ty: &Type) -> Hint {
    let Some(segment) = last_segment(ty) else {
        return Hint::Untyped;
    };
    match segment.ident.to_string().as_str() {
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "usize" => {
            Hint::Builtin("int")
        }
        "f64" => Hint::Builtin("float"),
        "bool" => Hint::Builtin("bool"),
        "String" => Hint::Builtin("string"),
        "Vec" => Hint::Builtin("array"),
        "Arc" => match first_type_argument(segment) {
            Some(inner) => Hint::Injectable(inner.clone()),
            None => Hint::Untyped,
        },
        _ => Hint::Untyped,
    }
}

/// Build the `::rivet::Param` expression for one parameter.
pub(crate) fn param_expr(name: &str, ty: &Type, options: &InjectOptions) -> TokenStream {
    let (hint_ty, optional) = match option_inner(ty) {
        Some(inner) => (inner, true),
        None => (ty, false),
    };

    let hint = match (&options.class, hint_for(hint_ty)) {
        (Some(class), _) => quote! { .class(#class) },
        (None, Hint::Injectable(inner)) => {
            quote! { .class(<#inner as ::rivet::Injectable>::CLASS) }
        }
        (None, Hint::Builtin(builtin)) => quote! { .builtin(#builtin) },
        (None, Hint::Untyped) => quote! {},
    };

    let default = match (&options.default, optional) {
        (Some(expr), _) => quote! { .default(#expr) },
        (None, true) => quote! { .default(::rivet::Value::Null) },
        (None, false) => quote! {},
    };

    quote! { ::rivet::Param::new(#name) #hint #default }
}
