//! `#[callable]`.
//!
//! Replaces a free function with a unit struct of the same name that
//! implements `IntoCallable`. The parameter table is read from the function
//! signature.

use crate::params::{InjectOptions, param_expr, strip_inject_attrs};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    FnArg, Ident, ItemFn, LitStr, Pat, ReturnType, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments for the `#[callable]` macro.
pub(crate) struct CallableArgs {
    pub name: Option<String>,
}

impl Parse for CallableArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    name = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(CallableArgs { name })
    }
}

fn returns_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Type(_, ty) => match &**ty {
            Type::Path(path) => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Result"),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

/// Implementation of the `#[callable]` attribute macro.
pub fn callable_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as CallableArgs);
    let mut input = parse_macro_input!(item as ItemFn);

    match expand(&args, &mut input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: &CallableArgs, input: &mut ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    if let Some(asyncness) = &input.sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "callable functions must be synchronous",
        ));
    }
    if !input.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.sig.generics,
            "callable functions cannot be generic",
        ));
    }

    let fn_name = input.sig.ident.clone();
    let fn_vis = &input.vis;
    let callable_name = args.name.clone().unwrap_or_else(|| fn_name.to_string());

    let mut params = Vec::new();
    let mut takes = Vec::new();
    let mut arg_names = Vec::new();

    for (i, arg) in input.sig.inputs.iter_mut().enumerate() {
        let FnArg::Typed(pat_type) = arg else {
            return Err(syn::Error::new_spanned(
                arg,
                "callable functions cannot take self",
            ));
        };
        let options = InjectOptions::from_attrs(&pat_type.attrs)?;
        strip_inject_attrs(&mut pat_type.attrs);

        let param_name = match (&options.name, &*pat_type.pat) {
            (Some(lit), _) => lit.value(),
            (None, Pat::Ident(pat)) => pat.ident.to_string().trim_start_matches('_').to_owned(),
            (None, other) => {
                return Err(syn::Error::new_spanned(
                    other,
                    "destructured parameters need #[inject(name = \"..\")]",
                ));
            }
        };

        let ty = &pat_type.ty;
        let arg_name = format_ident!("__arg_{}", i);
        params.push(param_expr(&param_name, ty, &options));
        takes.push(quote! { let #arg_name: #ty = __args.take(#param_name)?; });
        arg_names.push(arg_name);
    }

    let inputs = &input.sig.inputs;
    let output = &input.sig.output;
    let block = &input.block;

    let call = quote! { __inner(#(#arg_names),*) };
    let body = if returns_result(output) {
        quote! {
            #call
                .map(::rivet::IntoValue::into_value)
                .map_err(::core::convert::Into::into)
        }
    } else {
        quote! { ::core::result::Result::Ok(::rivet::IntoValue::into_value(#call)) }
    };

    Ok(quote! {
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Default)]
        #[doc = concat!("Callable generated by `#[rivet::callable]` on `", stringify!(#fn_name), "`")]
        #fn_vis struct #fn_name;

        impl #fn_name {
            /// The name the callable is registered under.
            pub const NAME: &'static str = #callable_name;

            /// The function's parameter table.
            pub fn signature() -> ::rivet::Signature {
                ::rivet::Signature::new() #(.param(#params))*
            }
        }

        impl ::rivet::IntoCallable for #fn_name {
            fn into_callable(self) -> ::rivet::Callable {
                fn __inner(#inputs) #output #block

                ::rivet::Callable::new(
                    Self::NAME,
                    Self::signature(),
                    |mut __args: ::rivet::BoundArgs| {
                        let _ = &mut __args;
                        #(#takes)*
                        #body
                    },
                )
            }
        }
    })
}
