//! Maps property descriptors to Rust types.
//!
//! The mapper is the leaf of the generator: the declaration builder, the
//! parts accessor and the doc composer all ask it what type a property has.
//! It never guesses; a descriptor it cannot express is reported as
//! [`GeneratorError::UnmappableProperty`] and aborts the run.

use std::fmt;

use discogen_define::{JsonType, Property};
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};

use crate::errors::GeneratorError;
use crate::naming::nested_type_name;

/// Property name used when mapping the element type of a list schema.
pub const LIST_ELEMENT: &str = "items";

/// The semantic type of a generated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RustType {
    Bool,
    String,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// Arbitrary JSON (`serde_json::Value`).
    Json,
    /// Another generated type, either a catalog schema or a nested type.
    Named(String),
    Vec(Box<RustType>),
    /// `HashMap<String, T>`
    Map(Box<RustType>),
    Option(Box<RustType>),
}

impl RustType {
    /// Returns true for `Vec` and `HashMap` types.
    ///
    /// Collections are never wrapped in `Option`; their presence check is
    /// "non-empty" rather than "has a value".
    pub fn is_collection(&self) -> bool {
        matches!(self, RustType::Vec(_) | RustType::Map(_))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, RustType::Option(_))
    }

    fn optional(self) -> Self {
        RustType::Option(Box::new(self))
    }
}

impl fmt::Display for RustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RustType::Bool => f.write_str("bool"),
            RustType::String => f.write_str("String"),
            RustType::I32 => f.write_str("i32"),
            RustType::U32 => f.write_str("u32"),
            RustType::I64 => f.write_str("i64"),
            RustType::U64 => f.write_str("u64"),
            RustType::F32 => f.write_str("f32"),
            RustType::F64 => f.write_str("f64"),
            RustType::Json => f.write_str("serde_json::Value"),
            RustType::Named(name) => f.write_str(name),
            RustType::Vec(inner) => write!(f, "Vec<{}>", inner),
            RustType::Map(inner) => write!(f, "HashMap<String, {}>", inner),
            RustType::Option(inner) => write!(f, "Option<{}>", inner),
        }
    }
}

impl ToTokens for RustType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ty = match self {
            RustType::Bool => quote! { bool },
            RustType::String => quote! { String },
            RustType::I32 => quote! { i32 },
            RustType::U32 => quote! { u32 },
            RustType::I64 => quote! { i64 },
            RustType::U64 => quote! { u64 },
            RustType::F32 => quote! { f32 },
            RustType::F64 => quote! { f64 },
            RustType::Json => quote! { serde_json::Value },
            RustType::Named(name) => {
                let ident = format_ident!("{}", name);
                quote! { #ident }
            }
            RustType::Vec(inner) => quote! { Vec<#inner> },
            RustType::Map(inner) => quote! { std::collections::HashMap<String, #inner> },
            RustType::Option(inner) => quote! { Option<#inner> },
        };
        tokens.extend(ty);
    }
}

/// Returns true if `name` can be used verbatim as a Rust type identifier.
pub fn is_type_ident(name: &str) -> bool {
    syn::parse_str::<syn::Ident>(name).is_ok()
}

/// Maps the property `property` of schema `schema` to its field type.
///
/// - scalars map to built-in types, wrapped in `Option` unless required
/// - arrays map to `Vec<T>` and maps (`additionalProperties`) to
///   `HashMap<String, T>`, never wrapped in `Option`
/// - anonymous objects map to the nested type `<Schema><Property>`
/// - `$ref`s map to the referenced schema's type, `Option` unless required
///
/// ## Errors
///
/// - `GeneratorError::UnmappableProperty` for descriptors with neither a
///   usable type nor a `$ref`, arrays without items, bare objects, or
///   references that are not valid type names
/// - `GeneratorError::UnknownFormat` for unsupported numeric formats
///
/// ## Examples
///
/// ```
/// use discogen_define::{JsonType, Property};
/// use discogen_gen::type_map::map_property;
///
/// let tags = Property::array_of(Property::of(JsonType::String));
/// let ty = map_property("Video", "tags", &tags).unwrap();
/// assert_eq!(ty.to_string(), "Vec<String>");
///
/// let ty = map_property("Video", "etag", &Property::of(JsonType::String)).unwrap();
/// assert_eq!(ty.to_string(), "Option<String>");
/// ```
pub fn map_property(
    schema: &str,
    property: &str,
    descriptor: &Property,
) -> Result<RustType, GeneratorError> {
    map_descriptor(schema, property, descriptor, true)
}

fn map_descriptor(
    schema: &str,
    property: &str,
    descriptor: &Property,
    allow_optional: bool,
) -> Result<RustType, GeneratorError> {
    let unmappable = |reason: &str| GeneratorError::UnmappableProperty {
        schema: schema.to_string(),
        property: property.to_string(),
        reason: reason.to_string(),
    };
    let wrap = |ty: RustType| {
        if allow_optional && !descriptor.required {
            ty.optional()
        } else {
            ty
        }
    };

    if let Some(reference) = &descriptor.reference {
        if !is_type_ident(reference) {
            return Err(unmappable(&format!(
                "'{}' is not a valid type name",
                reference
            )));
        }
        return Ok(wrap(RustType::Named(reference.clone())));
    }

    let kind = descriptor
        .kind
        .ok_or_else(|| unmappable("descriptor has neither 'type' nor '$ref'"))?;

    match kind {
        JsonType::Array => {
            let items = descriptor
                .items
                .as_deref()
                .ok_or_else(|| unmappable("array without 'items'"))?;
            let element = map_descriptor(schema, property, items, false)?;
            Ok(RustType::Vec(Box::new(element)))
        }
        JsonType::Object if descriptor.is_nested_object() => {
            let name = nested_type_name(schema, property);
            if !is_type_ident(&name) {
                return Err(unmappable(&format!(
                    "nested type name '{}' is not a valid type name",
                    name
                )));
            }
            Ok(wrap(RustType::Named(name)))
        }
        JsonType::Object => {
            let values = descriptor.additional_properties.as_deref().ok_or_else(|| {
                unmappable("object with neither 'properties' nor 'additionalProperties'")
            })?;
            let value = map_descriptor(schema, property, values, false)?;
            Ok(RustType::Map(Box::new(value)))
        }
        scalar => Ok(wrap(scalar_type(
            schema,
            property,
            scalar,
            descriptor.format.as_deref(),
        )?)),
    }
}

/// Resolves a scalar JSON type and its optional `format` to a Rust type.
fn scalar_type(
    schema: &str,
    property: &str,
    kind: JsonType,
    format: Option<&str>,
) -> Result<RustType, GeneratorError> {
    let unknown = |format: &str| GeneratorError::UnknownFormat {
        schema: schema.to_string(),
        property: property.to_string(),
        format: format.to_string(),
    };
    let ty = match (kind, format) {
        (JsonType::Boolean, _) => RustType::Bool,
        // format on strings is informational only
        (JsonType::String, _) => RustType::String,
        (JsonType::Integer, Some("int32")) => RustType::I32,
        (JsonType::Integer, Some("uint32")) => RustType::U32,
        (JsonType::Integer, Some("int64") | None) => RustType::I64,
        (JsonType::Integer, Some("uint64")) => RustType::U64,
        (JsonType::Number, Some("double") | None) => RustType::F64,
        (JsonType::Number, Some("float")) => RustType::F32,
        (JsonType::Integer | JsonType::Number, Some(other)) => return Err(unknown(other)),
        (JsonType::Any, _) => RustType::Json,
        (JsonType::Array | JsonType::Object, _) => {
            return Err(GeneratorError::UnmappableProperty {
                schema: schema.to_string(),
                property: property.to_string(),
                reason: format!("'{}' is not a scalar type", kind),
            });
        }
    };
    Ok(ty)
}
