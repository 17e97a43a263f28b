//! Implementation of the `#[derive(Strand)]` macro.
//!
//! This macro generates an implementation of the `Strand` trait and
//! field name constants for building filters.

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse_quote, spanned::Spanned, Data, DeriveInput, Error, Fields, GenericParam, Ident, Result,
};

use crate::attrs::parse_strand_attrs;

/// Main implementation of the Strand derive macro.
pub fn strand_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Strand can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Strand can only be derived for structs",
            ))
        }
    };

    let mut field_inserts: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut record_names = BTreeSet::new();
    let mut const_names = BTreeSet::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let strand_attrs = parse_strand_attrs(&field.attrs)?;
        if strand_attrs.skip {
            continue;
        }

        let record_name = strand_attrs
            .rename
            .unwrap_or_else(|| field_name.to_string().trim_start_matches("r#").to_string());

        if !record_names.insert(record_name.clone()) {
            return Err(Error::new(
                field.span(),
                format!("record field '{}' is produced twice", record_name),
            ));
        }

        // Renames need not be identifiers; those fields get no constant.
        if let Ok(const_name) = syn::parse_str::<Ident>(&to_screaming_snake_case(&record_name)) {
            if !const_names.insert(const_name.to_string()) {
                return Err(Error::new(
                    field.span(),
                    format!(
                        "record field '{}' produces the constant {} twice",
                        record_name, const_name
                    ),
                ));
            }
            field_constants.push(quote! {
                /// Record field name constant for building filters.
                pub const #const_name: &'static str = #record_name;
            });
        }

        field_inserts.push(quote! {
            record.insert(#record_name, ::skein::Strand::to_value(&self.#field_name));
        });
    }

    // Every type parameter must itself convert to a value.
    let mut generics = input.generics.clone();
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::skein::Strand));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let (plain_impl_generics, _, plain_where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #plain_impl_generics #struct_name #ty_generics #plain_where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::skein::Strand for #struct_name #ty_generics #where_clause {
            fn to_value(&self) -> ::skein::Value {
                #[allow(unused_mut)]
                let mut record = ::skein::Record::new();
                #(#field_inserts)*
                ::skein::Value::Record(record)
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
