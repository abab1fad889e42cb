//! Header documentation for generated schema types.
//!
//! This module provides the [`SchemaDocBuilder`] struct which composes the
//! doc comment placed above each generated declaration: the schema's own
//! description, the activities using the schema, and, for types that are not
//! plain objects, the underlying type.

use discogen_define::{IoRole, SchemaNode, SchemaShape};
use strum::IntoEnumIterator;

use crate::codegen::doc_lines;
use crate::context::{GenerationContext, RoleSet, activity_split, method_builder_type};
use crate::errors::GeneratorError;
use crate::naming::{enclose_in, put_and};
use crate::type_map::{LIST_ELEMENT, RustType, map_property};

/// Used when a schema has no description of its own.
pub const NO_DESCRIPTION: &str = "There is no detailed description.";

/// Used when no activity refers to a schema.
pub const PART_ONLY: &str =
    "This type is not used in any activity, and only used as *part* of another schema.";

/// Builds the header doc of a generated schema type.
///
/// The builder generates documentation sections including:
/// - The schema description, or a fallback sentence
/// - An activities section linking every activity that uses the schema
/// - A note on the underlying type for non-object schemas
///
/// ## Examples
///
/// ```
/// use discogen_define::{DiscoveryDocument, SchemaNode};
/// use discogen_gen::codegen::SchemaDocBuilder;
/// use discogen_gen::context::GenerationContext;
///
/// let ctx = GenerationContext::new(&DiscoveryDocument::default()).unwrap();
/// let schema = SchemaNode {
///     id: "Thumbnail".to_string(),
///     kind: Some(discogen_define::JsonType::Object),
///     ..Default::default()
/// };
/// let lines = SchemaDocBuilder::new(&schema, &ctx).build().unwrap();
/// assert!(lines.iter().any(|l| l.contains("only used as *part*")));
/// ```
pub struct SchemaDocBuilder<'a> {
    schema: &'a SchemaNode,
    ctx: &'a GenerationContext,
}

impl<'a> SchemaDocBuilder<'a> {
    /// Creates a new doc builder for `schema`.
    pub fn new(schema: &'a SchemaNode, ctx: &'a GenerationContext) -> Self {
        Self { schema, ctx }
    }

    /// Builds the header doc as `#[doc]` lines (see [`doc_lines`]).
    ///
    /// ## Errors
    ///
    /// - `GeneratorError::Shape` if the schema is an array without items
    /// - Any error of [`map_property`] while computing the underlying type
    /// - `GeneratorError::InvalidActivityName` for malformed activity names
    pub fn build(&self) -> Result<Vec<String>, GeneratorError> {
        let mut sections = vec![self.description_section(), self.activities_section()?];
        if let Some(note) = self.underlying_type_section()? {
            sections.push(note);
        }
        Ok(doc_lines(&sections.join("\n\n")))
    }

    fn description_section(&self) -> String {
        match self.schema.description.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => NO_DESCRIPTION.to_string(),
        }
    }

    /// Lists the activities using the schema, or states that it is only
    /// used as part of other schemas.
    fn activities_section(&self) -> Result<String, GeneratorError> {
        let Some(activities) = self.ctx.activities_of(&self.schema.id) else {
            return Ok(PART_ONLY.to_string());
        };

        let roles: Vec<String> = IoRole::iter().map(|r| r.to_string()).collect();
        let mut lines = vec![
            "# Activities".to_string(),
            String::new(),
            "This type is used in activities, which are methods you may call on this type or \
             where this type is involved in."
                .to_string(),
            format!(
                "The list links the activity name, along with information about where it is \
                 used (one of {}).",
                put_and(&enclose_in("*", &roles))
            ),
            String::new(),
        ];
        for (fqan, roles) in activities {
            let (resource, method) = activity_split(fqan)?;
            lines.push(format!(
                "* [{}.{}](struct.{}.html) ({})",
                resource,
                method,
                method_builder_type(resource, method),
                role_annotation(roles)
            ));
        }
        Ok(lines.join("\n"))
    }

    /// Surfaces the underlying type of schemas whose declaration does not
    /// show it.
    fn underlying_type_section(&self) -> Result<Option<String>, GeneratorError> {
        let ty = match self.schema.shape()? {
            SchemaShape::Object(_) => return Ok(None),
            SchemaShape::Records(_) => {
                RustType::Vec(Box::new(RustType::Named(self.schema.id.clone())))
            }
            SchemaShape::List(_) | SchemaShape::Other => {
                map_property(&self.schema.id, LIST_ELEMENT, &self.schema.as_property())?
            }
        };
        Ok(Some(format!(
            "# Note\n\nThis type is not an object; its underlying type is `{}`.",
            ty
        )))
    }
}

/// Formats a role set as `request|response`, or `none` when empty.
pub fn role_annotation(roles: &RoleSet) -> String {
    if roles.is_empty() {
        return "none".to_string();
    }
    roles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|")
}
