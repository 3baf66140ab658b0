//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts the binding of each struct field during macro
//! expansion. The annotation string itself is validated at bind time by
//! `envtag::FieldRule`, so that a malformed annotation surfaces as a runtime
//! `UnsupportedField` error naming the field.

use syn::parse::ParseStream;
use syn::{Field, Ident, LitStr};

/// How a field takes part in binding.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum Binding {
    /// No `#[env]` attribute: the field is left alone.
    #[default]
    Skip,

    /// `#[env("KEY1,KEY2,default=...")]`: the raw annotation string.
    Annotated(String),

    /// `#[env(nested)]`: recurse into the field's own annotations.
    Nested,
}

/// Parsed `#[env(...)]` attribute of a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub binding: Binding,
}

impl FieldAttrs {
    /// Extract and parse the `#[env(...)]` attribute from a struct field.
    ///
    /// Other attributes are ignored so other derives can process them.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            if attrs.binding != Binding::Skip {
                return Err(syn::Error::new_spanned(attr, "duplicate env attribute"));
            }

            attrs.binding = attr.parse_args_with(|input: ParseStream| {
                // env("KEY,...")
                if input.peek(LitStr) {
                    let annotation: LitStr = input.parse()?;
                    return Ok(Binding::Annotated(annotation.value()));
                }

                // env(nested)
                let ident: Ident = input.parse()?;
                if ident == "nested" {
                    return Ok(Binding::Nested);
                }

                Err(syn::Error::new(ident.span(), "unsupported env attribute"))
            })?;
        }

        Ok(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_annotation() {
        let field: Field = parse_quote! {
            #[env("DATABASE_URL,required")]
            pub database_url: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(
            attrs.binding,
            Binding::Annotated("DATABASE_URL,required".to_string())
        );
    }

    #[test]
    fn test_parse_annotation_keeps_default_verbatim() {
        let field: Field = parse_quote! {
            #[env("GREETING,default= hello world")]
            pub greeting: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(
            attrs.binding,
            Binding::Annotated("GREETING,default= hello world".to_string())
        );
    }

    #[test]
    fn test_parse_nested() {
        let field: Field = parse_quote! {
            #[env(nested)]
            pub database: DatabaseConfig
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.binding, Binding::Nested);
    }

    #[test]
    fn test_no_attribute_is_skipped() {
        let field: Field = parse_quote! {
            #[serde(rename = "x")]
            pub field_name: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.binding, Binding::Skip);
    }

    #[test]
    fn test_unsupported_attribute() {
        let field: Field = parse_quote! {
            #[env(flatten)]
            pub field_name: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_duplicate_attribute() {
        let field: Field = parse_quote! {
            #[env("A")]
            #[env("B")]
            pub field_name: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_bare_attribute_is_rejected() {
        let field: Field = parse_quote! {
            #[env]
            pub field_name: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }
}
