//! Marker trait generation.
//!
//! Markers are empty traits. Each generated module declares all of them once
//! ([`generate_marker_traits`]) and every generated type implements the ones
//! the classifier assigned to it ([`generate_marker_impls`]).

use std::collections::BTreeSet;

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use strum::{EnumMessage, IntoEnumIterator};

use crate::codegen::doc_lines;
use crate::markers::Marker;

/// Generates the declarations of every marker trait.
///
/// ## Examples
///
/// ```
/// use discogen_gen::codegen::generate_marker_traits;
///
/// let code = generate_marker_traits().to_string();
/// assert!(code.contains("pub trait Part { }") || code.contains("pub trait Part {}"));
/// ```
pub fn generate_marker_traits() -> TokenStream {
    let traits = Marker::iter().map(|marker| {
        let name = format_ident!("{}", marker.to_string());
        let text = marker.get_documentation().unwrap_or_default();
        let doc = doc_lines(&text.lines().map(str::trim).collect::<Vec<_>>().join("\n"));
        quote! {
            #(#[doc = #doc])*
            pub trait #name {}
        }
    });
    quote! { #(#traits)* }
}

/// Generates one empty marker impl per marker for the type `name`.
///
/// The set is ordered, so the impls always come out in the same order.
pub fn generate_marker_impls(name: &Ident, markers: &BTreeSet<Marker>) -> TokenStream {
    let impls = markers.iter().map(|marker| {
        let marker_name = format_ident!("{}", marker.to_string());
        quote! {
            impl #marker_name for #name {}
        }
    });
    quote! { #(#impls)* }
}
