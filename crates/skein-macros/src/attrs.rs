//! Attribute parsing for the Strand derive macro.
//!
//! This module provides the parser for the `#[strand(...)]` field
//! attributes used by the `Strand` derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[strand(...)]`.
#[derive(Debug, Clone)]
pub struct StrandAttr {
    /// Leave this field out of the record.
    pub skip: bool,
    /// Record field name (default: the Rust field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for StrandAttr {
    fn default() -> Self {
        StrandAttr {
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for StrandAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = StrandAttr {
            span: input.span(),
            ..StrandAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => {
                    attr.skip = true;
                }

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        if s.value().is_empty() {
                            return Err(Error::new(s.span(), "rename must not be empty"));
                        }
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown strand attribute. Expected: skip or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && attr.rename.is_some() {
            return Err(Error::new(
                attr.span,
                "skip and rename cannot be combined",
            ));
        }

        Ok(attr)
    }
}

/// Extract `#[strand(...)]` attributes from a field's attributes.
pub fn parse_strand_attrs(attrs: &[Attribute]) -> Result<StrandAttr> {
    for attr in attrs {
        if attr.path().is_ident("strand") {
            return attr.parse_args::<StrandAttr>();
        }
    }
    Ok(StrandAttr::default())
}
