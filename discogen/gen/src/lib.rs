//! Discovery-document code generator library.
//!
//! This crate generates strongly-typed Rust data types from the schema
//! catalog of a discovery document (see `discogen-define`). For every schema
//! the generated code includes:
//!
//! - A documented struct declaration, with serde attributes, whose shape
//!   follows the schema (object, list of records, list, or opaque)
//! - Marker trait impls describing the role the type plays in the API
//! - For request payloads, a `to_parts()` accessor listing the populated fields
//!
//! ## Modules
//!
//! - [`codegen`] - Code generation for the fragments of one schema
//! - [`context`] - The read-only activity cross-reference shared by a run
//! - [`markers`] - Marker kinds and the classifier deciding which apply
//! - [`type_map`] - Mapping of property descriptors to Rust types
//! - [`nested`] - Discovery of anonymous nested object types
//! - [`naming`] - Identifier and type name helpers
//! - [`output`] - Final assembly, validation, and file writing
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use discogen_gen::context::GenerationContext;
//! use discogen_gen::output::{generate_and_write, load_document};
//!
//! let doc = load_document(Path::new("youtube-api.json")).unwrap();
//! let ctx = GenerationContext::new(&doc).unwrap();
//!
//! // Generate code (dry_run=true prints instead of writing)
//! let code = generate_and_write(&doc, &ctx, Path::new("src"), "youtube3", true).unwrap();
//! println!("{}", code);
//! ```
//!
//! ## Generated Code Structure
//!
//! For a `Video` schema used as the request of `videos.insert`:
//!
//! ```text
//! /// A video resource.
//! ///
//! /// # Activities
//! /// ...
//! /// * [videos.insert](struct.VideoInsertMethodBuilder.html) (request|response)
//! #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
//! #[serde(default)]
//! pub struct Video {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     pub etag: Option<String>,
//!     ...
//! }
//!
//! impl Resource for Video {}
//! impl ResponseResult for Video {}
//! impl RequestValue for Video {}
//!
//! impl Video {
//!     pub fn to_parts(&self) -> String { ... }
//! }
//! ```

pub mod codegen;
pub mod context;
pub mod errors;
pub mod markers;
pub mod naming;
pub mod nested;
pub mod output;
pub mod type_map;

#[cfg(test)]
mod test_utils;
