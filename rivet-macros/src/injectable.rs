//! `#[derive(Injectable)]`.
//!
//! Builds a `ClassDescriptor` whose constructor takes one parameter per field,
//! in declaration order.

use crate::params::{InjectOptions, param_expr};
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Token, parse_macro_input, punctuated::Punctuated};

/// Options from `#[inject(..)]` on the struct itself.
#[derive(Default)]
struct ClassOptions {
    class: Option<LitStr>,
    implements: Vec<LitStr>,
}

impl ClassOptions {
    fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut options = ClassOptions::default();
        for attr in input.attrs.iter().filter(|a| a.path().is_ident("inject")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("class") {
                    options.class = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("implements") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let names = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                    options.implements.extend(names);
                } else {
                    return Err(meta.error("unknown inject option"));
                }
                Ok(())
            })?;
        }
        Ok(options)
    }
}

/// Implementation of `#[derive(Injectable)]`.
pub fn derive_injectable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Injectable cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &data.fields,
                    "Injectable requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Injectable can only be derived for structs",
            ));
        }
    };

    let options = ClassOptions::from_input(input)?;
    let class = match &options.class {
        Some(class) => quote! { #class },
        None => quote! { ::core::stringify!(#name) },
    };
    let implements = options.implements.iter().map(|parent| quote! { .implements(#parent) });

    let mut params = Vec::new();
    let mut inits = Vec::new();
    for field in &fields {
        let ident = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "Injectable requires named fields")
        })?;
        let field_options = InjectOptions::from_attrs(&field.attrs)?;

        if field_options.skip {
            inits.push(quote! { #ident: ::core::default::Default::default() });
            continue;
        }

        let param_name = match &field_options.name {
            Some(lit) => lit.value(),
            None => ident.to_string(),
        };
        params.push(param_expr(&param_name, &field.ty, &field_options));
        inits.push(quote! { #ident: __args.take(#param_name)? });
    }

    let construct = if matches!(&input.data, Data::Struct(d) if matches!(d.fields, Fields::Unit)) {
        quote! { Self }
    } else {
        quote! { Self { #(#inits),* } }
    };

    Ok(quote! {
        impl ::rivet::Injectable for #name {
            const CLASS: &'static str = #class;

            fn descriptor() -> ::rivet::ClassDescriptor {
                ::rivet::ClassDescriptor::concrete(<Self as ::rivet::Injectable>::CLASS)
                    #(#implements)*
                    .constructor(
                        ::rivet::Signature::new() #(.param(#params))*,
                        |mut __args: ::rivet::BoundArgs| {
                            let _ = &mut __args;
                            ::core::result::Result::Ok(#construct)
                        },
                    )
            }
        }

        ::rivet::__register_class!(#name);
    })
}
