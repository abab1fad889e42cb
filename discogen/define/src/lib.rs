//! Discogen Definition Library
//!
//! This crate provides the types a discovery document deserializes into.
//! These definitions are consumed by the `discogen-gen` binary to generate
//! Rust type declarations for an API's schemas.
//!
//! ## Core Types
//!
//! ### Document Types
//!
//! - [`DiscoveryDocument`] - An API description with its schema catalog and resources
//! - [`Resource`] - A group of methods, possibly nesting further resources
//! - [`Method`] - One activity, with optional request and response schemas
//! - [`Reference`] - A `$ref` pointing at a schema id
//! - [`IoRole`] - Whether a schema is an activity's request or response
//!
//! ### Schema Types
//!
//! - [`SchemaNode`] - A named schema with ordered properties
//! - [`Property`] - A (possibly nested) property descriptor
//! - [`JsonType`] - The closed set of JSON type tags
//! - [`SchemaShape`] - The declaration shape a schema dispatches to
//! - [`ShapeError`] - Structural problems found while classifying a schema
//!
//! ## Examples
//!
//! ```
//! use discogen_define::{DiscoveryDocument, JsonType, Property, SchemaNode};
//!
//! let mut doc = DiscoveryDocument {
//!     name: "youtube".to_string(),
//!     version: "v3".to_string(),
//!     ..Default::default()
//! };
//! let mut video = SchemaNode {
//!     id: "Video".to_string(),
//!     kind: Some(JsonType::Object),
//!     ..Default::default()
//! };
//! video.properties.insert("etag".to_string(), Property::of(JsonType::String));
//! doc.schemas.insert(video.id.clone(), video);
//!
//! assert_eq!(doc.schemas["Video"].properties.len(), 1);
//! ```

pub mod prelude;
pub mod schema;
pub mod types;

// Re-export main types at crate root
pub use schema::{JsonType, Property, SchemaNode, SchemaShape, ShapeError};
pub use types::{DiscoveryDocument, IoRole, Method, Reference, Resource};
