//! Convenient re-exports for working with discovery documents.
//!
//! ## Examples
//!
//! ```
//! use discogen_define::prelude::*;
//!
//! let tags = SchemaNode {
//!     id: "Tags".to_string(),
//!     kind: Some(JsonType::Array),
//!     items: Some(Box::new(Property::of(JsonType::String))),
//!     ..Default::default()
//! };
//! assert!(matches!(tags.shape(), Ok(SchemaShape::List(_))));
//! ```

pub use crate::schema::{JsonType, Property, SchemaNode, SchemaShape, ShapeError};
pub use crate::types::{DiscoveryDocument, IoRole, Method, Reference, Resource};
