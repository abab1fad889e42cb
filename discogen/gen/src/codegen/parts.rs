//! Parts-list accessor generation.
//!
//! Request payloads are often sent sparsely: the caller fills in some fields
//! and tells the server which "parts" it is sending (or wants back). Types
//! carrying the request marker get a `to_parts()` method that lists the
//! populated fields, by wire name, in declaration order.

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::codegen::Field;
use crate::type_map::RustType;

/// How the generated accessor decides whether a field is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// `Vec`/`HashMap` fields count when non-empty.
    NonEmpty,
    /// `Option` fields count when they hold a value.
    IsSome,
    /// Required fields always hold a value.
    Always,
}

impl Presence {
    pub fn of(ty: &RustType) -> Self {
        if ty.is_collection() {
            Presence::NonEmpty
        } else if ty.is_optional() {
            Presence::IsSome
        } else {
            Presence::Always
        }
    }
}

/// Generates the `to_parts()` accessor for the type `name`.
///
/// The method checks each field in order, appends `"<wire name>,"` for each
/// populated one, and trims the single trailing comma. A type without named
/// fields gets an accessor that returns an empty string.
///
/// ## Examples
///
/// ```ignore
/// // For fields [etag: Option<String>, tags: Vec<String>]:
/// impl Video {
///     pub fn to_parts(&self) -> String {
///         let mut parts = String::new();
///         if self.etag.is_some() {
///             parts.push_str("etag,");
///         }
///         if !self.tags.is_empty() {
///             parts.push_str("tags,");
///         }
///         if parts.ends_with(',') {
///             parts.pop();
///         }
///         parts
///     }
/// }
/// ```
pub fn generate_parts_accessor(name: &Ident, fields: &[Field]) -> TokenStream {
    let body = if fields.is_empty() {
        quote! { String::new() }
    } else {
        let checks = fields.iter().map(generate_check);
        quote! {
            let mut parts = String::new();
            #(#checks)*
            if parts.ends_with(',') {
                parts.pop();
            }
            parts
        }
    };

    quote! {
        impl #name {
            /// Returns a comma-separated list of the fields that are currently set.
            ///
            /// `Option` fields count when they hold a value, lists and maps when
            /// they are non-empty. The result is suitable as a parts list that
            /// names the parts you are sending and/or the parts you want to see
            /// in the server response.
            pub fn to_parts(&self) -> String {
                #body
            }
        }
    }
}

fn generate_check(field: &Field) -> TokenStream {
    let ident = &field.ident;
    let part = format!("{},", field.wire_name);
    match Presence::of(&field.ty) {
        Presence::NonEmpty => quote! {
            if !self.#ident.is_empty() {
                parts.push_str(#part);
            }
        },
        Presence::IsSome => quote! {
            if self.#ident.is_some() {
                parts.push_str(#part);
            }
        },
        Presence::Always => quote! {
            parts.push_str(#part);
        },
    }
}
