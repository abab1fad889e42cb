//! The read-only generation context.
//!
//! The context cross-references every schema with the activities (methods)
//! that use it, and carries the marker classifier. It is built once per run
//! from the document's resources and then shared, immutably, by every schema
//! translation. All maps keep document order so output is reproducible.

use std::collections::BTreeSet;
use std::fmt;

use discogen_define::{DiscoveryDocument, IoRole, Method, Resource, SchemaNode};
use indexmap::IndexMap;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::errors::GeneratorError;
use crate::markers::{DefaultMarkerClassifier, Marker, MarkerClassifier};
use crate::naming::{canonical_type_name, singular};

/// The roles a schema plays for one activity. May be empty.
pub type RoleSet = BTreeSet<IoRole>;

/// Schema id -> (fully qualified activity name -> roles), in document order.
pub type ActivityMap = IndexMap<String, IndexMap<String, RoleSet>>;

/// Shared, read-only state for one generation run.
pub struct GenerationContext {
    /// Schema id to the activities using it.
    pub activities: ActivityMap,
    /// Fully qualified activity name to its method.
    pub methods: IndexMap<String, Method>,
    classifier: Box<dyn MarkerClassifier>,
}

impl fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationContext")
            .field("activities", &self.activities)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl GenerationContext {
    /// Builds the context from a document's resources using the default
    /// marker classifier.
    ///
    /// Every method registers its request and response schemas under its
    /// fully qualified name. Every method is also registered, with an empty
    /// role set unless already present, under the type named after its
    /// resource (`videos` -> `Video`), so methods without bodies still
    /// cross-reference their resource type.
    ///
    /// ## Errors
    ///
    /// - `GeneratorError::InvalidActivityName` if a method id is not of the
    ///   form `<api>.<resource>.<method>`
    /// - `GeneratorError::CodeGenError` if two methods share an id
    ///
    /// ## Examples
    ///
    /// ```
    /// use discogen_define::{DiscoveryDocument, Method, Reference, Resource};
    /// use discogen_gen::context::GenerationContext;
    ///
    /// let mut videos = Resource::default();
    /// videos.methods.insert("list".to_string(), Method {
    ///     id: "youtube.videos.list".to_string(),
    ///     response: Some(Reference::new("VideoListResponse")),
    ///     ..Default::default()
    /// });
    /// let mut doc = DiscoveryDocument::default();
    /// doc.resources.insert("videos".to_string(), videos);
    ///
    /// let ctx = GenerationContext::new(&doc).unwrap();
    /// assert!(ctx.activities.contains_key("VideoListResponse"));
    /// assert!(ctx.activities.contains_key("Video"));
    /// ```
    pub fn new(doc: &DiscoveryDocument) -> Result<Self, GeneratorError> {
        let mut ctx = Self {
            activities: ActivityMap::new(),
            methods: IndexMap::new(),
            classifier: Box::new(DefaultMarkerClassifier),
        };
        for resource in doc.resources.values() {
            ctx.register_resource(resource)?;
        }
        debug!(
            schemas = ctx.activities.len(),
            activities = ctx.methods.len(),
            "built activity cross-reference"
        );
        Ok(ctx)
    }

    /// Replaces the marker classifier.
    pub fn with_classifier(mut self, classifier: impl MarkerClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Returns the markers applicable to `schema`.
    pub fn markers(&self, schema: &SchemaNode) -> BTreeSet<Marker> {
        self.classifier.markers(schema, &self.activities)
    }

    /// Returns the activities using the schema with the given id, if any.
    pub fn activities_of(&self, schema_id: &str) -> Option<&IndexMap<String, RoleSet>> {
        self.activities.get(schema_id)
    }

    fn register_resource(&mut self, resource: &Resource) -> Result<(), GeneratorError> {
        for method in resource.methods.values() {
            self.register_method(method)?;
        }
        for sub in resource.resources.values() {
            self.register_resource(sub)?;
        }
        Ok(())
    }

    fn register_method(&mut self, method: &Method) -> Result<(), GeneratorError> {
        let fqan = method.id.as_str();
        let (resource, _) = activity_split(fqan)?;
        if self.methods.contains_key(fqan) {
            return Err(GeneratorError::CodeGenError(format!(
                "duplicate activity id '{}'",
                fqan
            )));
        }

        for role in IoRole::iter() {
            if let Some(schema) = method.role_reference(role) {
                self.activities
                    .entry(schema.reference.clone())
                    .or_default()
                    .entry(fqan.to_string())
                    .or_default()
                    .insert(role);
            }
        }

        self.activities
            .entry(resource_type_name(resource))
            .or_default()
            .entry(fqan.to_string())
            .or_default();
        self.methods.insert(fqan.to_string(), method.clone());
        Ok(())
    }
}

/// Splits a fully qualified activity name into `(resource, method)`.
///
/// The API name is dropped; nested resources keep their dotted path.
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidActivityName` for names with fewer than
/// three non-empty parts.
///
/// ## Examples
///
/// ```
/// use discogen_gen::context::activity_split;
///
/// assert_eq!(activity_split("youtube.videos.list").unwrap(), ("videos", "list"));
/// assert_eq!(
///     activity_split("youtube.liveChat.messages.insert").unwrap(),
///     ("liveChat.messages", "insert")
/// );
/// assert!(activity_split("videos.list").is_err());
/// ```
pub fn activity_split(fqan: &str) -> Result<(&str, &str), GeneratorError> {
    let invalid = || GeneratorError::InvalidActivityName(fqan.to_string());
    let (_, rest) = fqan.split_once('.').ok_or_else(invalid)?;
    let (resource, method) = rest.rsplit_once('.').ok_or_else(invalid)?;
    if fqan.split('.').any(str::is_empty) {
        return Err(invalid());
    }
    Ok((resource, method))
}

/// Returns the type name a resource's methods operate on.
///
/// ## Examples
///
/// ```
/// use discogen_gen::context::resource_type_name;
///
/// assert_eq!(resource_type_name("videos"), "Video");
/// assert_eq!(resource_type_name("activities"), "Activity");
/// assert_eq!(resource_type_name("liveChat.messages"), "LiveChatMessage");
/// ```
pub fn resource_type_name(resource: &str) -> String {
    let joined: String = resource.split('.').map(canonical_type_name).collect();
    singular(&joined)
}

/// Returns the name of the method builder type generated for an activity.
///
/// ## Examples
///
/// ```
/// use discogen_gen::context::method_builder_type;
///
/// assert_eq!(method_builder_type("videos", "getRating"), "VideoGetRatingMethodBuilder");
/// ```
pub fn method_builder_type(resource: &str, method: &str) -> String {
    format!(
        "{}{}MethodBuilder",
        resource_type_name(resource),
        canonical_type_name(method)
    )
}
