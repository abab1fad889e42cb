//! Schema descriptors for request/response types.
//!
//! A discovery document describes every data shape the API exchanges as a
//! [`SchemaNode`]. Each node has ordered [`Property`] descriptors which may
//! themselves nest arrays, maps, references and anonymous objects.
//!
//! Property order is significant: generated declarations list fields in the
//! order the document declares them, so every mapping here is an
//! [`IndexMap`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// The JSON type tag of a schema or property.
///
/// Unknown tags are rejected when the document is deserialized, so every
/// descriptor that makes it into the generator carries one of these.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use discogen_define::JsonType;
///
/// assert_eq!(JsonType::from_str("object").unwrap(), JsonType::Object);
/// assert_eq!(JsonType::Boolean.to_string(), "boolean");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JsonType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    /// Arbitrary JSON value
    Any,
}

/// A property descriptor nested inside a schema.
///
/// Exactly one of `kind` or `reference` is expected to be set; the type
/// mapper treats anything else as a contract violation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<JsonType>,
    /// Name of another schema in the catalog.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Refines numeric (and some string) types, e.g. `int32` or `uint64`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Element type of an array property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,
    /// Value type of a mapping-valued property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Property>>,
    /// Fields of an anonymous object property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Property>>,
}

impl Property {
    /// Creates a property of the given JSON type.
    pub fn of(kind: JsonType) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// Creates a property referencing another schema by id.
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            reference: Some(id.into()),
            ..Default::default()
        }
    }

    /// Creates an array property with the given element descriptor.
    pub fn array_of(items: Property) -> Self {
        Self {
            kind: Some(JsonType::Array),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    /// Creates a mapping-valued property with the given value descriptor.
    pub fn map_of(values: Property) -> Self {
        Self {
            kind: Some(JsonType::Object),
            additional_properties: Some(Box::new(values)),
            ..Default::default()
        }
    }

    /// Creates an anonymous object property with the given fields.
    pub fn object(properties: IndexMap<String, Property>) -> Self {
        Self {
            kind: Some(JsonType::Object),
            properties: Some(properties),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Marks the property as required (never wrapped in `Option`).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Returns true for an anonymous object with its own field list.
    ///
    /// Such properties have no catalog entry and get a synthesized
    /// nested type instead.
    ///
    /// ## Examples
    ///
    /// ```
    /// use indexmap::IndexMap;
    /// use discogen_define::{JsonType, Property};
    ///
    /// assert!(Property::object(IndexMap::new()).is_nested_object());
    /// assert!(!Property::map_of(Property::of(JsonType::String)).is_nested_object());
    /// ```
    pub fn is_nested_object(&self) -> bool {
        self.kind == Some(JsonType::Object) && self.properties.is_some()
    }
}

/// A named schema in the document's catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaNode {
    /// Unique name of the schema, used as the generated type name.
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<JsonType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Property>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Property>>,
    /// Set for types synthesized from anonymous object properties.
    #[serde(skip)]
    pub nested: bool,
}

impl SchemaNode {
    /// Synthesizes a nested schema from an anonymous object property.
    ///
    /// The property's fields are reused verbatim; only the id is new.
    pub fn from_property(id: impl Into<String>, property: &Property) -> Self {
        Self {
            id: id.into(),
            kind: property.kind,
            description: property.description.clone(),
            format: property.format.clone(),
            properties: property.properties.clone().unwrap_or_default(),
            items: property.items.clone(),
            additional_properties: property.additional_properties.clone(),
            nested: true,
        }
    }

    /// Views the schema as a (required) property descriptor.
    ///
    /// Used to compute the underlying type of non-object schemas.
    pub fn as_property(&self) -> Property {
        Property {
            kind: self.kind,
            reference: None,
            description: self.description.clone(),
            format: self.format.clone(),
            required: true,
            items: self.items.clone(),
            additional_properties: self.additional_properties.clone(),
            properties: (!self.properties.is_empty()).then(|| self.properties.clone()),
        }
    }

    /// Classifies the schema into its declaration shape.
    ///
    /// ## Errors
    ///
    /// - [`ShapeError::MissingType`] for a schema without a `type`
    /// - [`ShapeError::MissingItems`] for an array schema without an `items`
    ///   descriptor
    ///
    /// ## Examples
    ///
    /// ```
    /// use discogen_define::{JsonType, SchemaNode, SchemaShape};
    ///
    /// let schema = SchemaNode {
    ///     id: "Empty".to_string(),
    ///     kind: Some(JsonType::Object),
    ///     ..Default::default()
    /// };
    /// assert!(matches!(schema.shape(), Ok(SchemaShape::Object(p)) if p.is_empty()));
    /// ```
    pub fn shape(&self) -> Result<SchemaShape<'_>, ShapeError> {
        match self.kind {
            Some(JsonType::Object) => Ok(SchemaShape::Object(&self.properties)),
            Some(JsonType::Array) => {
                let items = self.items.as_deref().ok_or_else(|| ShapeError::MissingItems {
                    schema: self.id.clone(),
                })?;
                match &items.properties {
                    Some(properties) if items.kind == Some(JsonType::Object) => {
                        Ok(SchemaShape::Records(properties))
                    }
                    _ => Ok(SchemaShape::List(items)),
                }
            }
            Some(_) => Ok(SchemaShape::Other),
            None => Err(ShapeError::MissingType {
                schema: self.id.clone(),
            }),
        }
    }
}

/// The declaration shape of a schema.
///
/// Every schema falls into exactly one of these; the declaration builder
/// matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaShape<'a> {
    /// An object with (possibly zero) named fields.
    Object(&'a IndexMap<String, Property>),
    /// An array whose items are anonymous objects; the item fields are
    /// declared directly on the schema.
    Records(&'a IndexMap<String, Property>),
    /// An array of anything else, declared as a newtype over a `Vec`.
    List(&'a Property),
    /// A scalar schema with no structure of its own.
    Other,
}

/// Structural problems detected while classifying a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("array schema '{schema}' has no items descriptor")]
    MissingItems { schema: String },
    #[error("schema '{schema}' has no type")]
    MissingType { schema: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> IndexMap<String, Property> {
        names
            .iter()
            .map(|n| (n.to_string(), Property::of(JsonType::String)))
            .collect()
    }

    #[test]
    fn deserializes_properties_in_document_order() {
        let json = r#"{
            "id": "Video",
            "type": "object",
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "$ref": "VideoSnippet" },
                "mid": { "type": "array", "items": { "type": "string" } }
            }
        }"#;
        let schema: SchemaNode = serde_json::from_str(json).unwrap();
        let names: Vec<_> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            schema.properties["alpha"].reference.as_deref(),
            Some("VideoSnippet")
        );
        assert!(!schema.nested);
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let json = r#"{ "id": "Odd", "type": "tuple" }"#;
        assert!(serde_json::from_str::<SchemaNode>(json).is_err());
    }

    #[test]
    fn additional_properties_uses_camel_case_key() {
        let json = r#"{ "type": "object", "additionalProperties": { "type": "integer" } }"#;
        let prop: Property = serde_json::from_str(json).unwrap();
        assert_eq!(
            prop.additional_properties.as_deref().and_then(|p| p.kind),
            Some(JsonType::Integer)
        );
        assert!(!prop.is_nested_object());
    }

    #[test]
    fn shape_object_with_and_without_properties() {
        let mut schema = SchemaNode {
            id: "Thing".to_string(),
            kind: Some(JsonType::Object),
            ..Default::default()
        };
        assert!(matches!(schema.shape(), Ok(SchemaShape::Object(p)) if p.is_empty()));

        schema.properties = fields(&["a", "b"]);
        assert!(matches!(schema.shape(), Ok(SchemaShape::Object(p)) if p.len() == 2));
    }

    #[test]
    fn shape_array_of_scalars_is_list() {
        let schema = SchemaNode {
            id: "Tags".to_string(),
            kind: Some(JsonType::Array),
            items: Some(Box::new(Property::of(JsonType::String))),
            ..Default::default()
        };
        assert!(matches!(
            schema.shape(),
            Ok(SchemaShape::List(p)) if p.kind == Some(JsonType::String)
        ));
    }

    #[test]
    fn shape_array_of_objects_is_records() {
        let schema = SchemaNode {
            id: "Rows".to_string(),
            kind: Some(JsonType::Array),
            items: Some(Box::new(Property::object(fields(&["x", "y"])))),
            ..Default::default()
        };
        match schema.shape() {
            Ok(SchemaShape::Records(props)) => {
                let names: Vec<_> = props.keys().map(String::as_str).collect();
                assert_eq!(names, vec!["x", "y"]);
            }
            other => panic!("expected records, got {:?}", other),
        }
    }

    #[test]
    fn shape_array_without_items_is_an_error() {
        let schema = SchemaNode {
            id: "Broken".to_string(),
            kind: Some(JsonType::Array),
            ..Default::default()
        };
        assert_eq!(
            schema.shape(),
            Err(ShapeError::MissingItems {
                schema: "Broken".to_string()
            })
        );
    }

    #[test]
    fn shape_scalar_is_other() {
        let scalar = SchemaNode {
            id: "Name".to_string(),
            kind: Some(JsonType::String),
            ..Default::default()
        };
        assert_eq!(scalar.shape(), Ok(SchemaShape::Other));
    }

    #[test]
    fn shape_untyped_schema_is_an_error() {
        let untyped = SchemaNode {
            id: "Blob".to_string(),
            ..Default::default()
        };
        assert_eq!(
            untyped.shape(),
            Err(ShapeError::MissingType {
                schema: "Blob".to_string()
            })
        );
    }

    #[test]
    fn from_property_copies_fields_and_flags_nested() {
        let prop = Property::object(fields(&["width", "height"])).with_description("Size");
        let nested = SchemaNode::from_property("ThumbnailSize", &prop);
        assert_eq!(nested.id, "ThumbnailSize");
        assert!(nested.nested);
        assert_eq!(nested.description.as_deref(), Some("Size"));
        assert_eq!(nested.properties, fields(&["width", "height"]));
    }

    #[test]
    fn as_property_is_required() {
        let schema = SchemaNode {
            id: "Count".to_string(),
            kind: Some(JsonType::Integer),
            format: Some("int32".to_string()),
            ..Default::default()
        };
        let prop = schema.as_property();
        assert!(prop.required);
        assert_eq!(prop.format.as_deref(), Some("int32"));
        assert!(prop.properties.is_none());
    }
}
