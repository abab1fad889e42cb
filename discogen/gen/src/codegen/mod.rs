//! Code generation modules for discogen.
//!
//! This module contains the generators that turn one schema into Rust source
//! fragments. Each submodule produces one fragment of a schema's generation
//! unit:
//!
//! ## Submodules
//!
//! - [`schema_doc`] - Builds the doc header, including activity cross-references
//! - [`declaration`] - Generates the struct declaration for the schema's shape
//! - [`marker_impls`] - Generates marker trait declarations and attachments
//! - [`parts`] - Generates the `to_parts()` accessor for request payloads
//!
//! ## Code Generation Flow
//!
//! 1. The header doc is built via [`SchemaDocBuilder`]
//! 2. The declaration is generated via [`generate_declaration`]
//! 3. Marker attachments are generated via [`generate_marker_impls`]
//! 4. If the schema is a request payload, the accessor is generated via
//!    [`generate_parts_accessor`]
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream` (the doc header is a list
//! of `#[doc]` lines). [`crate::output`] concatenates the fragments, validates
//! them with `syn::parse2` and formats them with `prettyplease`.

pub mod declaration;
pub mod marker_impls;
pub mod parts;
pub mod schema_doc;

pub use declaration::{Field, declared_fields, generate_declaration};
pub use marker_impls::{generate_marker_impls, generate_marker_traits};
pub use parts::{Presence, generate_parts_accessor};
pub use schema_doc::SchemaDocBuilder;

use proc_macro2::Ident;
use quote::format_ident;

use crate::errors::GeneratorError;
use crate::type_map::is_type_ident;

/// Splits text into `#[doc]` lines.
///
/// Each line gets a leading space so it renders as `/// text`; blank lines
/// stay empty so paragraphs survive formatting.
///
/// ## Examples
///
/// ```
/// use discogen_gen::codegen::doc_lines;
///
/// assert_eq!(doc_lines("One.\n\nTwo."), vec![" One.", "", " Two."]);
/// ```
pub fn doc_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                String::new()
            } else {
                format!(" {}", line)
            }
        })
        .collect()
}

/// Returns the identifier of the type generated for schema `id`.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if `id` is not a valid Rust
/// type name.
pub fn type_ident(id: &str) -> Result<Ident, GeneratorError> {
    if !is_type_ident(id) {
        return Err(GeneratorError::CodeGenError(format!(
            "schema id '{}' is not a valid type name",
            id
        )));
    }
    Ok(format_ident!("{}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_lines_trims_trailing_whitespace() {
        assert_eq!(doc_lines("Trailing   \nnext"), vec![" Trailing", " next"]);
    }

    #[test]
    fn doc_lines_of_empty_text_is_empty() {
        assert!(doc_lines("").is_empty());
    }

    #[test]
    fn type_ident_accepts_schema_ids() {
        assert_eq!(type_ident("VideoSnippet").unwrap().to_string(), "VideoSnippet");
    }

    #[test]
    fn type_ident_rejects_invalid_names() {
        for id in ["", "Video Snippet", "3D", "Self", "fn"] {
            assert!(
                matches!(type_ident(id), Err(GeneratorError::CodeGenError(_))),
                "'{}' should be rejected",
                id
            );
        }
    }
}
