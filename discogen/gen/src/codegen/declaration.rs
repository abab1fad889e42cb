//! Struct declaration generation for schemas.
//!
//! Dispatches on a schema's [`SchemaShape`] and emits the matching struct:
//!
//! | Shape | Declaration |
//! |-------|-------------|
//! | object with properties | one `pub` field per property, in order |
//! | object without properties | `pub struct X {}` |
//! | array of anonymous objects | the item fields, flattened onto `X` |
//! | array of anything else | `pub struct X(pub Vec<T>);` |
//! | anything else | opaque `pub struct X;` |

use std::collections::HashSet;

use discogen_define::{Property, SchemaNode, SchemaShape};
use indexmap::IndexMap;
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::codegen::{doc_lines, type_ident};
use crate::errors::GeneratorError;
use crate::naming::mangle_ident;
use crate::type_map::{LIST_ELEMENT, RustType, is_type_ident, map_property};

/// Doc line used for properties without a description.
const NO_FIELD_DESCRIPTION: &str = "no description provided";

/// A resolved struct field.
#[derive(Debug, Clone)]
pub struct Field {
    /// Property name as written in the document (and on the wire).
    pub wire_name: String,
    /// Rust field identifier.
    pub ident: Ident,
    pub ty: RustType,
    pub description: Option<String>,
}

impl Field {
    /// Returns true if the field identifier differs from the wire name.
    pub fn is_renamed(&self) -> bool {
        self.ident != self.wire_name
    }
}

/// Resolves the named fields the declaration of `schema` will contain.
///
/// Object schemas yield their properties; arrays of anonymous objects yield
/// the item properties under the same names. List and opaque schemas have no
/// named fields.
///
/// ## Errors
///
/// - `GeneratorError::Shape` for an array schema without items
/// - any error of [`map_property`]
/// - `GeneratorError::CodeGenError` if two properties mangle to the same
///   field name
pub fn declared_fields(schema: &SchemaNode) -> Result<Vec<Field>, GeneratorError> {
    match schema.shape()? {
        SchemaShape::Object(properties) | SchemaShape::Records(properties) => {
            resolve_fields(&schema.id, properties)
        }
        SchemaShape::List(_) | SchemaShape::Other => Ok(Vec::new()),
    }
}

fn resolve_fields(
    schema: &str,
    properties: &IndexMap<String, Property>,
) -> Result<Vec<Field>, GeneratorError> {
    let mut seen = HashSet::new();
    properties
        .iter()
        .map(|(name, property)| {
            let mangled = mangle_ident(name);
            if !is_type_ident(&mangled) {
                return Err(GeneratorError::CodeGenError(format!(
                    "schema '{}': property '{}' cannot be turned into a field name",
                    schema, name
                )));
            }
            if !seen.insert(mangled.clone()) {
                return Err(GeneratorError::CodeGenError(format!(
                    "schema '{}': property '{}' collides with another field named '{}'",
                    schema, name, mangled
                )));
            }
            Ok(Field {
                wire_name: name.clone(),
                ident: format_ident!("{}", mangled),
                ty: map_property(schema, name, property)?,
                description: property.description.clone(),
            })
        })
        .collect()
}

/// Generates the struct declaration for `schema`.
///
/// ## Examples
///
/// ```
/// use discogen_define::{JsonType, Property, SchemaNode};
/// use discogen_gen::codegen::generate_declaration;
///
/// let tags = SchemaNode {
///     id: "Tags".to_string(),
///     kind: Some(JsonType::Array),
///     items: Some(Box::new(Property::of(JsonType::String))),
///     ..Default::default()
/// };
/// let code = generate_declaration(&tags).unwrap().to_string();
/// assert!(code.contains("struct Tags"));
/// assert!(code.contains("Vec < String >"));
/// ```
///
/// ## Errors
///
/// Fails on any contract violation found while resolving the schema: an
/// array without items, an unmappable property, or an invalid type name.
pub fn generate_declaration(schema: &SchemaNode) -> Result<TokenStream, GeneratorError> {
    let name = type_ident(&schema.id)?;

    let declaration = match schema.shape()? {
        SchemaShape::Object(properties) | SchemaShape::Records(properties) => {
            let fields = resolve_fields(&schema.id, properties)?;
            if fields.is_empty() {
                quote! {
                    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
                    pub struct #name {}
                }
            } else {
                let field_tokens = fields.iter().map(generate_field);
                quote! {
                    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
                    #[serde(default)]
                    pub struct #name {
                        #(#field_tokens)*
                    }
                }
            }
        }
        SchemaShape::List(items) => {
            let list = Property::array_of(items.clone());
            let ty = map_property(&schema.id, LIST_ELEMENT, &list)?;
            quote! {
                #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
                pub struct #name(pub #ty);
            }
        }
        SchemaShape::Other => quote! {
            #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
            pub struct #name;
        },
    };

    Ok(declaration)
}

/// Generates one field with its doc comment and serde attributes.
fn generate_field(field: &Field) -> TokenStream {
    let doc = doc_lines(field.description.as_deref().unwrap_or(NO_FIELD_DESCRIPTION));
    let ident = &field.ident;
    let ty = &field.ty;
    let wire_name = &field.wire_name;

    let rename = if field.is_renamed() {
        quote! { #[serde(rename = #wire_name)] }
    } else {
        quote! {}
    };

    // Unset fields are left out so sparse payloads only carry what is set
    let skip = match ty {
        RustType::Option(_) => quote! { #[serde(skip_serializing_if = "Option::is_none")] },
        RustType::Vec(_) => quote! { #[serde(skip_serializing_if = "Vec::is_empty")] },
        RustType::Map(_) => {
            quote! { #[serde(skip_serializing_if = "std::collections::HashMap::is_empty")] }
        }
        _ => quote! {},
    };

    quote! {
        #(#[doc = #doc])*
        #rename
        #skip
        pub #ident: #ty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{format_tokens, object_schema, prop};
    use discogen_define::JsonType;

    #[test]
    fn object_fields_follow_declaration_order() {
        let schema = object_schema(
            "Video",
            vec![
                ("snippet", Property::reference("VideoSnippet")),
                ("id", Property::of(JsonType::String).required()),
                ("tags", Property::array_of(prop(JsonType::String))),
            ],
        );
        let fields = declared_fields(&schema).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.ident.to_string()).collect();
        assert_eq!(names, vec!["snippet", "id", "tags"]);
        let types: Vec<_> = fields.iter().map(|f| f.ty.to_string()).collect();
        assert_eq!(types, vec!["Option<VideoSnippet>", "String", "Vec<String>"]);

        let code = format_tokens(generate_declaration(&schema).unwrap());
        let snippet = code.find("pub snippet: Option<VideoSnippet>").unwrap();
        let id = code.find("pub id: String").unwrap();
        let tags = code.find("pub tags: Vec<String>").unwrap();
        assert!(snippet < id && id < tags);
    }

    #[test]
    fn field_docs_use_description_or_fallback() {
        let schema = object_schema(
            "Video",
            vec![
                (
                    "etag",
                    Property::of(JsonType::String).with_description("Etag of this resource."),
                ),
                ("kind", prop(JsonType::String)),
            ],
        );
        let code = format_tokens(generate_declaration(&schema).unwrap());
        assert!(code.contains("/// Etag of this resource."));
        assert!(code.contains("/// no description provided"));
    }

    #[test]
    fn renamed_fields_keep_wire_name() {
        let schema = object_schema(
            "Video",
            vec![
                ("contentDetails", Property::reference("VideoContentDetails")),
                ("type", prop(JsonType::String)),
            ],
        );
        let code = format_tokens(generate_declaration(&schema).unwrap());
        assert!(code.contains("#[serde(rename = \"contentDetails\")]"));
        assert!(code.contains("pub content_details: Option<VideoContentDetails>"));
        assert!(code.contains("#[serde(rename = \"type\")]"));
        assert!(code.contains("pub type_: Option<String>"));
    }

    #[test]
    fn unset_fields_are_skipped_when_serializing() {
        let schema = object_schema(
            "Video",
            vec![
                ("etag", prop(JsonType::String)),
                ("tags", Property::array_of(prop(JsonType::String))),
                ("localizations", Property::map_of(prop(JsonType::String))),
                ("id", Property::of(JsonType::String).required()),
            ],
        );
        let code = format_tokens(generate_declaration(&schema).unwrap());
        assert!(code.contains("skip_serializing_if = \"Option::is_none\""));
        assert!(code.contains("skip_serializing_if = \"Vec::is_empty\""));
        assert!(code.contains("skip_serializing_if = \"std::collections::HashMap::is_empty\""));
        assert_eq!(code.matches("skip_serializing_if").count(), 3);
    }

    #[test]
    fn empty_object_is_zero_field_struct() {
        let schema = object_schema("Empty", vec![]);
        assert!(declared_fields(&schema).unwrap().is_empty());
        let code = format_tokens(generate_declaration(&schema).unwrap());
        assert!(code.contains("pub struct Empty {}"));
        assert!(!code.contains("#[serde(default)]"));
    }

    #[test]
    fn array_of_scalars_is_newtype_over_vec() {
        let schema = SchemaNode {
            id: "Ids".to_string(),
            kind: Some(JsonType::Array),
            items: Some(Box::new(Property::of(JsonType::Integer).with_format("int32"))),
            ..Default::default()
        };
        let code = format_tokens(generate_declaration(&schema).unwrap());
        assert!(code.contains("pub struct Ids(pub Vec<i32>);"));
        assert!(declared_fields(&schema).unwrap().is_empty());
    }

    #[test]
    fn array_of_objects_flattens_item_fields() {
        let item = object_schema(
            "Unused",
            vec![
                ("name", prop(JsonType::String)),
                ("count", Property::of(JsonType::Integer).with_format("uint32")),
            ],
        );
        let schema = SchemaNode {
            id: "Rows".to_string(),
            kind: Some(JsonType::Array),
            items: Some(Box::new(Property::object(item.properties.clone()))),
            ..Default::default()
        };

        let flattened = declared_fields(&schema).unwrap();
        let as_object = declared_fields(&object_schema(
            "Rows",
            vec![
                ("name", prop(JsonType::String)),
                ("count", Property::of(JsonType::Integer).with_format("uint32")),
            ],
        ))
        .unwrap();
        let describe = |fields: &[Field]| {
            fields
                .iter()
                .map(|f| (f.wire_name.clone(), f.ty.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(describe(&flattened), describe(&as_object));

        let code = format_tokens(generate_declaration(&schema).unwrap());
        assert!(code.contains("pub struct Rows {"));
        assert!(code.contains("pub name: Option<String>"));
        assert!(code.contains("pub count: Option<u32>"));
        assert!(!code.contains("Vec<"));
    }

    #[test]
    fn other_schema_is_opaque_unit_struct() {
        let schema = SchemaNode {
            id: "Timestamp".to_string(),
            kind: Some(JsonType::String),
            ..Default::default()
        };
        let code = format_tokens(generate_declaration(&schema).unwrap());
        assert!(code.contains("pub struct Timestamp;"));
    }

    #[test]
    fn array_without_items_fails() {
        let schema = SchemaNode {
            id: "Broken".to_string(),
            kind: Some(JsonType::Array),
            ..Default::default()
        };
        assert!(matches!(
            generate_declaration(&schema),
            Err(GeneratorError::Shape(_))
        ));
    }

    #[test]
    fn unmappable_property_fails() {
        let schema = object_schema("Video", vec![("blob", Property::of(JsonType::Object))]);
        assert!(matches!(
            generate_declaration(&schema),
            Err(GeneratorError::UnmappableProperty { .. })
        ));
    }

    #[test]
    fn colliding_field_names_fail() {
        let schema = object_schema(
            "Video",
            vec![
                ("videoId", prop(JsonType::String)),
                ("video_id", prop(JsonType::String)),
            ],
        );
        let err = declared_fields(&schema).unwrap_err();
        assert!(err.to_string().contains("collides"));
    }
}
