//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: turning every
//! schema into a [`GenerationUnit`], assembling the units into one Rust
//! module, validating the output, formatting it, and writing it to disk
//! atomically.
//!
//! ## Output Structure
//!
//! The generator produces one module file per discovery document:
//! ```text
//! <output>/
//! └── youtube3.rs    # Marker traits plus one unit per schema
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Fail fast**: The first contract violation aborts the run; no partial
//!   unit is emitted
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use discogen_define::{DiscoveryDocument, SchemaNode};
use proc_macro2::{Ident, TokenStream};
use quote::{ToTokens, quote};
use strum::IntoEnumIterator;
use tracing::{debug, error, info};

use crate::codegen::{
    SchemaDocBuilder, declared_fields, doc_lines, generate_declaration, generate_marker_impls,
    generate_marker_traits, generate_parts_accessor, type_ident,
};
use crate::context::GenerationContext;
use crate::errors::GeneratorError;
use crate::markers::Marker;
use crate::nested::iter_nested_types;

/// The generated code for one schema.
///
/// Units are independent of each other; they only refer to other units by
/// type name. Rendering a unit (via [`ToTokens`]) concatenates the header
/// doc, the declaration, the marker impls and the optional accessor.
#[derive(Debug, Clone)]
pub struct GenerationUnit {
    /// The declared type name (the schema id).
    pub type_name: Ident,
    /// Header doc lines, see [`SchemaDocBuilder`].
    pub doc: Vec<String>,
    /// The struct declaration.
    pub declaration: TokenStream,
    /// Markers implemented by the type.
    pub markers: BTreeSet<Marker>,
    /// The `to_parts()` accessor, present for request payloads only.
    pub accessor: Option<TokenStream>,
}

impl ToTokens for GenerationUnit {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let doc = &self.doc;
        let declaration = &self.declaration;
        let marker_impls = generate_marker_impls(&self.type_name, &self.markers);
        let accessor = &self.accessor;
        tokens.extend(quote! {
            #(#[doc = #doc])*
            #declaration
            #marker_impls
            #accessor
        });
    }
}

/// Translates one schema into its generation unit.
///
/// This is a pure function of the schema and the (read-only) context, so
/// schemas may be translated in any order or concurrently.
///
/// ## Errors
///
/// Returns the first contract violation found in the schema (see
/// [`GeneratorError`]).
pub fn generate_unit(
    schema: &SchemaNode,
    ctx: &GenerationContext,
) -> Result<GenerationUnit, GeneratorError> {
    let type_name = type_ident(&schema.id)?;
    let doc = SchemaDocBuilder::new(schema, ctx).build()?;
    let declaration = generate_declaration(schema)?;
    let markers = ctx.markers(schema);

    let accessor = if markers.contains(&Marker::REQUEST) {
        let fields = declared_fields(schema)?;
        Some(generate_parts_accessor(&type_name, &fields))
    } else {
        None
    };

    debug!(
        schema = %schema.id,
        markers = markers.len(),
        accessor = accessor.is_some(),
        "generated unit"
    );

    Ok(GenerationUnit {
        type_name,
        doc,
        declaration,
        markers,
        accessor,
    })
}

/// Translates every schema of `doc`: catalog schemas first, in catalog
/// order, then the synthesized nested types.
///
/// ## Errors
///
/// - `GeneratorError::CodeGenError` if a type name collides with a marker
///   trait, or a nested type name with a catalog schema or another nested type
/// - The first error of [`generate_unit`]; the run stops there
pub fn generate_units(
    doc: &DiscoveryDocument,
    ctx: &GenerationContext,
) -> Result<Vec<GenerationUnit>, GeneratorError> {
    let nested = iter_nested_types(doc.schemas.values()).inspect_err(|e| {
        error!(error = %e, "aborting generation");
    })?;

    let marker_names: HashSet<String> = Marker::iter().map(|m| m.to_string()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    for schema in doc.schemas.values().chain(nested.iter()) {
        let clash = if marker_names.contains(&schema.id) {
            Some("the marker trait")
        } else if !seen.insert(schema.id.as_str()) {
            Some("another type")
        } else {
            None
        };
        if let Some(other) = clash {
            let err = GeneratorError::CodeGenError(format!(
                "type '{}' collides with {} of the same name",
                schema.id, other
            ));
            error!(schema = %schema.id, error = %err, "aborting generation");
            return Err(err);
        }
    }

    doc.schemas
        .values()
        .chain(nested.iter())
        .map(|schema| {
            generate_unit(schema, ctx).inspect_err(|e| {
                error!(schema = %schema.id, error = %e, "aborting generation");
            })
        })
        .collect()
}

/// Assembles the module for a whole discovery document.
///
/// The module contains:
/// - Module documentation from the document's title and description
/// - The serde imports used by every declaration
/// - The marker trait declarations
/// - One generation unit per schema
///
/// ## Errors
///
/// Propagates the errors of [`generate_units`].
pub fn assemble_schema_module(
    doc: &DiscoveryDocument,
    ctx: &GenerationContext,
) -> Result<TokenStream, GeneratorError> {
    let units = generate_units(doc, ctx)?;
    let module_doc = module_doc_lines(doc);
    let marker_traits = generate_marker_traits();

    Ok(quote! {
        #(#![doc = #module_doc])*

        use serde::{Deserialize, Serialize};

        #marker_traits

        #(#units)*
    })
}

fn module_doc_lines(doc: &DiscoveryDocument) -> Vec<String> {
    let title = doc.title.as_deref().unwrap_or(&doc.name);
    let mut lines = vec![format!(" Data types of the {}.", title), String::new()];
    if let Some(description) = doc.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.extend(doc_lines(description));
        lines.push(String::new());
    }
    lines.push(format!(
        " Generated from the `{}` `{}` discovery document.",
        doc.name, doc.version
    ));
    lines
}

/// Loads a discovery document from a JSON file.
///
/// Schemas without an `id` take their catalog key as id.
///
/// ## Errors
///
/// - `GeneratorError::ReadError` if the file cannot be read
/// - `GeneratorError::ParseError` if it is not a valid discovery document
pub fn load_document(path: &Path) -> Result<DiscoveryDocument, GeneratorError> {
    let content = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut doc: DiscoveryDocument = serde_json::from_str(&content)?;
    for (key, schema) in doc.schemas.iter_mut() {
        if schema.id.is_empty() {
            schema.id = key.clone();
        }
    }
    info!(
        path = %path.display(),
        api = %doc.name,
        version = %doc.version,
        schemas = doc.schemas.len(),
        "loaded discovery document"
    );
    Ok(doc)
}

/// Parses the assembled module as a Rust file.
///
/// This catches malformed tokens only. Name clashes between generated items
/// are rejected earlier, by [`generate_units`].
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the tokens do not parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone()).map_err(|e| {
        GeneratorError::CodeGenError(format!("generated schema module does not parse: {}", e))
    })
}

/// Pretty-prints a schema module, headed by a notice naming the document
/// it was generated from.
pub fn format_code(file: &syn::File, doc: &DiscoveryDocument) -> String {
    format!(
        "// This code was automatically generated by discogen-gen. Do not edit manually.\n\
         // Source: the `{}` `{}` discovery document.\n\n{}",
        doc.name,
        doc.version,
        prettyplease::unparse(file)
    )
}

/// Replaces `path` with `content` in one step.
///
/// The content goes to a hidden sibling (`.<file name>.tmp`) which is then
/// renamed over `path`, so a reader sees the previous module or the new one.
/// Missing parent directories are created.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` naming the path that could not be
/// created, written, or renamed.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    let write_error = |path: &Path| {
        let path = path.display().to_string();
        move |source: std::io::Error| GeneratorError::WriteError { path, source }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_error(parent))?;
    }

    let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let staging = path.with_file_name(format!(".{}.tmp", file_name));
    fs::write(&staging, content).map_err(write_error(&staging))?;
    fs::rename(&staging, path).map_err(write_error(path))
}

/// Generates the schema module of `doc` and writes it to
/// `<output_dir>/<module>.rs`.
///
/// ## Arguments
///
/// * `doc` - The discovery document
/// * `ctx` - The generation context built from `doc`
/// * `output_dir` - Directory to write the module to
/// * `module` - Module (file) name, without extension
/// * `dry_run` - If true, print the code instead of writing it
///
/// ## Returns
///
/// The formatted module code.
///
/// ## Errors
///
/// Returns an error if:
/// - Any schema violates the generator's contract
/// - Code generation produces invalid Rust
/// - File writing fails
pub fn generate_and_write(
    doc: &DiscoveryDocument,
    ctx: &GenerationContext,
    output_dir: &Path,
    module: &str,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let tokens = assemble_schema_module(doc, ctx)?;
    let file = validate_code(&tokens).inspect_err(|e| {
        error!(module, error = %e, "generated module failed validation");
    })?;
    let formatted = format_code(&file, doc);

    if dry_run {
        println!("=== {}.rs ===\n{}\n", module, formatted);
    } else {
        let path = output_dir.join(format!("{}.rs", module));
        write_atomic(&path, &formatted)?;
        info!(path = %path.display(), bytes = formatted.len(), "wrote schema module");
    }

    Ok(formatted)
}
