//! Proc macros for Skein.
//!
//! - [`Strand`] - Turn structs with named fields into skein record values
//!
//! Use through the `skein` crate, which re-exports the derive next to the
//! trait of the same name. Working examples live in
//! `skein/tests/strand_derive.rs`.

mod attrs;
mod derive;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Strand` trait for structs with named fields.
///
/// Every field becomes a record entry, converted with `Strand::to_value`.
/// `Option` fields that are `None` produce no entry, which matching treats
/// the same as an absent value.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Leave this field out of the record |
/// | `rename = "..."` | Use a custom record field name |
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `WorkItem::STATE`)
/// 2. Implementation of `Strand::to_value()`
///
/// # Example
///
/// ```ignore
/// use skein::{fields, Clause, Filter, Strand};
///
/// #[derive(Strand)]
/// struct WorkItem {
///     entity: String,
///     state: String,
///     #[strand(rename = "owner")]
///     assignee: Option<String>,
///     #[strand(skip)]
///     revision: u64,
/// }
///
/// let item = WorkItem {
///     entity: "WorkItem".into(),
///     state: "s1".into(),
///     assignee: None,
///     revision: 3,
/// };
///
/// let unassigned = Filter::from(fields! {
///     WorkItem::STATE => "s1",
///     WorkItem::OWNER => Clause::Absent,
/// });
/// assert!(unassigned.matches_strand(&item));
/// ```
#[proc_macro_derive(Strand, attributes(strand))]
pub fn strand_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::strand_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
