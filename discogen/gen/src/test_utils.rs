//! Shared test utilities for discogen-gen tests.
//!
//! This module provides common helper functions for creating test fixtures
//! across the codebase, reducing duplication and ensuring consistency.

use discogen_define::{
    DiscoveryDocument, JsonType, Method, Property, Reference, Resource, SchemaNode,
};
use indexmap::IndexMap;
use proc_macro2::TokenStream;

use crate::context::GenerationContext;

/// Creates an optional property of the given type.
pub fn prop(kind: JsonType) -> Property {
    Property::of(kind)
}

/// Creates an object schema with the given properties, in order.
pub fn object_schema(id: &str, properties: Vec<(&str, Property)>) -> SchemaNode {
    SchemaNode {
        id: id.to_string(),
        kind: Some(JsonType::Object),
        properties: properties
            .into_iter()
            .map(|(name, property)| (name.to_string(), property))
            .collect(),
        ..Default::default()
    }
}

/// Creates a Method for testing.
///
/// ## Arguments
///
/// * `id` - Fully qualified activity name, e.g. `youtube.videos.list`
/// * `request` - Optional request schema id
/// * `response` - Optional response schema id
pub fn make_method(id: &str, request: Option<&str>, response: Option<&str>) -> Method {
    Method {
        id: id.to_string(),
        http_method: Some("POST".to_string()),
        request: request.map(Reference::new),
        response: response.map(Reference::new),
        ..Default::default()
    }
}

/// Creates a small video API document.
///
/// - `Video` is the request and response of `videos.insert`, and the
///   resource type of `videos.delete` and `videos.list`
/// - `VideoListResponse` is the response of `videos.list`
/// - `VideoSnippet` and `Thumbnail` are only used as parts
/// - `VideoSnippet.localized` is an anonymous object (nested type)
pub fn make_test_document() -> DiscoveryDocument {
    let localized = Property::object(IndexMap::from([
        ("title".to_string(), prop(JsonType::String)),
        ("description".to_string(), prop(JsonType::String)),
    ]));

    let schemas = vec![
        object_schema(
            "Video",
            vec![
                ("id", prop(JsonType::String).with_description("The ID of the video.")),
                ("etag", prop(JsonType::String)),
                ("snippet", Property::reference("VideoSnippet")),
                ("tags", Property::array_of(prop(JsonType::String))),
            ],
        ),
        object_schema(
            "VideoListResponse",
            vec![
                ("items", Property::array_of(Property::reference("Video"))),
                ("nextPageToken", prop(JsonType::String)),
            ],
        ),
        object_schema(
            "VideoSnippet",
            vec![
                ("title", prop(JsonType::String)),
                ("publishedAt", prop(JsonType::String).with_format("date-time")),
                (
                    "thumbnails",
                    Property::map_of(Property::reference("Thumbnail")),
                ),
                ("localized", localized),
            ],
        ),
        object_schema(
            "Thumbnail",
            vec![
                ("url", prop(JsonType::String)),
                ("width", prop(JsonType::Integer).with_format("uint32")),
            ],
        ),
    ];

    let mut videos = Resource::default();
    videos.methods.insert(
        "insert".to_string(),
        make_method("youtube.videos.insert", Some("Video"), Some("Video")),
    );
    videos.methods.insert(
        "delete".to_string(),
        make_method("youtube.videos.delete", None, None),
    );
    videos.methods.insert(
        "list".to_string(),
        make_method("youtube.videos.list", None, Some("VideoListResponse")),
    );

    let mut doc = DiscoveryDocument {
        name: "youtube".to_string(),
        version: "v3".to_string(),
        title: Some("YouTube Data API".to_string()),
        description: Some("Programmatic access to YouTube features.".to_string()),
        ..Default::default()
    };
    for schema in schemas {
        doc.schemas.insert(schema.id.clone(), schema);
    }
    doc.resources.insert("videos".to_string(), videos);
    doc
}

/// Creates the generation context of [`make_test_document`].
pub fn make_test_context() -> GenerationContext {
    GenerationContext::new(&make_test_document()).unwrap()
}

/// Formats a TokenStream as prettyplease-formatted Rust code.
///
/// This makes assertions more readable and less brittle than comparing
/// raw TokenStream strings.
pub fn format_tokens(tokens: TokenStream) -> String {
    let file = syn::parse2::<syn::File>(tokens).expect("generated code should parse");
    prettyplease::unparse(&file)
}
