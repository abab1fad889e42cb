//! Discovery of nested types.
//!
//! Anonymous object properties have no catalog entry, yet the type mapper
//! refers to them by a derived name (`<Schema><Property>`). This module
//! synthesizes a [`SchemaNode`] for each of them so every derived name gets
//! a declaration of its own.

use discogen_define::{JsonType, Property, SchemaNode, SchemaShape};

use crate::errors::GeneratorError;
use crate::naming::nested_type_name;
use crate::type_map::LIST_ELEMENT;

/// Returns the synthesized nested schemas of `schemas`, in declaration order.
///
/// Nested objects inside nested objects are found too; each parent precedes
/// its children. Anonymous objects used as array items or map values are
/// named after the property holding the array or map, matching the names
/// the type mapper produces.
///
/// ## Errors
///
/// Returns `GeneratorError::Shape` if a schema on the way is an array
/// without items.
///
/// ## Examples
///
/// ```
/// use indexmap::IndexMap;
/// use discogen_define::{JsonType, Property, SchemaNode};
/// use discogen_gen::nested::iter_nested_types;
///
/// let mut size = IndexMap::new();
/// size.insert("width".to_string(), Property::of(JsonType::Integer));
/// let mut video = SchemaNode {
///     id: "Video".to_string(),
///     kind: Some(JsonType::Object),
///     ..Default::default()
/// };
/// video.properties.insert("size".to_string(), Property::object(size));
///
/// let nested = iter_nested_types([&video]).unwrap();
/// assert_eq!(nested.len(), 1);
/// assert_eq!(nested[0].id, "VideoSize");
/// assert!(nested[0].nested);
/// ```
pub fn iter_nested_types<'a>(
    schemas: impl IntoIterator<Item = &'a SchemaNode>,
) -> Result<Vec<SchemaNode>, GeneratorError> {
    let mut nested = Vec::new();
    for schema in schemas {
        collect_nested(schema, &mut nested)?;
    }
    Ok(nested)
}

fn collect_nested(schema: &SchemaNode, out: &mut Vec<SchemaNode>) -> Result<(), GeneratorError> {
    for (name, property) in declared_fields(schema)? {
        if let Some(object) = nested_object(property) {
            let node = SchemaNode::from_property(nested_type_name(&schema.id, name), object);
            let mut children = Vec::new();
            collect_nested(&node, &mut children)?;
            out.push(node);
            out.extend(children);
        }
    }
    Ok(())
}

/// Returns the properties the declaration of `schema` will map.
fn declared_fields(schema: &SchemaNode) -> Result<Vec<(&str, &Property)>, GeneratorError> {
    let fields = match schema.shape()? {
        SchemaShape::Object(properties) | SchemaShape::Records(properties) => properties
            .iter()
            .map(|(name, property)| (name.as_str(), property))
            .collect(),
        SchemaShape::List(items) => vec![(LIST_ELEMENT, items)],
        SchemaShape::Other => Vec::new(),
    };
    Ok(fields)
}

/// Finds the anonymous object a property declares, looking through array
/// items and map values.
fn nested_object(property: &Property) -> Option<&Property> {
    if property.reference.is_some() {
        return None;
    }
    if property.is_nested_object() {
        return Some(property);
    }
    match property.kind {
        Some(JsonType::Array) => property.items.as_deref().and_then(nested_object),
        Some(JsonType::Object) => property
            .additional_properties
            .as_deref()
            .and_then(nested_object),
        _ => None,
    }
}
