//! Derive macro implementation for envtag

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Visibility};

mod attrs;

use attrs::{Binding, FieldAttrs};

/// `Environment` derive macro
///
/// Implements `envtag::Environment` and `envtag::Field` for a struct with
/// named fields, registering each annotated field with the binder in
/// declaration order.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env("KEY1,KEY2,required=false,default=value")]`: Bind from the first set key
/// - `#[env(nested)]`: Recurse into a nested `Environment` struct
///
/// Fields without `#[env]` are left untouched. An annotated field that is
/// not `pub` fails at bind time with `EnvError::UnexportedField`.
///
/// # Example
///
/// See the `envtag` crate documentation for usage examples.
#[proc_macro_derive(Environment, attributes(env))]
pub fn derive_environment(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "Environment only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Environment only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let mut registrations = Vec::new();
    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = field_ident.to_string();
        let field_name = field_name.trim_start_matches("r#");

        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(err) => return err.to_compile_error().into(),
        };

        let exported = matches!(field.vis, Visibility::Public(_));

        let registration = match attrs.binding {
            Binding::Skip => continue,
            Binding::Annotated(annotation) if exported => quote! {
                binder.field(#field_name, #annotation, &mut self.#field_ident)?;
            },
            Binding::Annotated(annotation) => quote! {
                binder.unexported(#field_name, #annotation)?;
            },
            Binding::Nested if exported => quote! {
                binder.nested(#field_name, &mut self.#field_ident)?;
            },
            Binding::Nested => quote! {
                binder.unexported(#field_name, "nested")?;
            },
        };
        registrations.push(registration);
    }

    let expanded = quote! {
        impl #impl_generics ::envtag::Environment for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn bind(
                &mut self,
                binder: &mut ::envtag::Binder<'_>,
            ) -> ::core::result::Result<(), ::envtag::EnvError> {
                #(#registrations)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::envtag::Field for #struct_name #ty_generics #where_clause {
            fn kind(&mut self) -> ::envtag::FieldKind<'_> {
                ::envtag::FieldKind::Record(self)
            }
        }
    };

    TokenStream::from(expanded)
}
