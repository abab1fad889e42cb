//! Core types for discovery documents.
//!
//! This module provides the top-level types of an API description:
//!
//! - [`DiscoveryDocument`] - The API with its schema catalog and resources
//! - [`Resource`] - A group of methods (and sub-resources)
//! - [`Method`] - A single callable activity with its request/response schemas
//! - [`IoRole`] - The part a schema plays for a method

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::schema::SchemaNode;

/// The part a schema plays in an activity.
///
/// Roles are ordered so sets of them render deterministically.
///
/// ## Examples
///
/// ```
/// use discogen_define::IoRole;
/// use strum::IntoEnumIterator;
///
/// let roles: Vec<String> = IoRole::iter().map(|r| r.to_string()).collect();
/// assert_eq!(roles, vec!["request", "response"]);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IoRole {
    /// The schema is sent as the method's request body
    Request,
    /// The schema is returned as the method's response body
    Response,
}

/// A reference to a schema in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl Reference {
    pub fn new(id: impl Into<String>) -> Self {
        Self { reference: id.into() }
    }
}

/// A single API method, called an activity by the generator.
///
/// ## Examples
///
/// ```
/// use discogen_define::{Method, Reference};
///
/// let method = Method {
///     id: "youtube.videos.insert".to_string(),
///     request: Some(Reference::new("Video")),
///     response: Some(Reference::new("Video")),
///     ..Default::default()
/// };
/// assert_eq!(method.role_reference(discogen_define::IoRole::Request).unwrap().reference, "Video");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Method {
    /// Fully qualified activity name: `<api>.<resource>.<method>`.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Reference>,
}

impl Method {
    /// Returns the schema reference playing `role` for this method, if any.
    pub fn role_reference(&self, role: IoRole) -> Option<&Reference> {
        match role {
            IoRole::Request => self.request.as_ref(),
            IoRole::Response => self.response.as_ref(),
        }
    }
}

/// A named group of methods, possibly with nested resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub methods: IndexMap<String, Method>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub resources: IndexMap<String, Resource>,
}

/// A complete discovery document.
///
/// Holds everything the generator consumes: the schema catalog (in
/// declaration order) and the resources whose methods cross-reference it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryDocument {
    /// Short API name, e.g. `youtube`.
    pub name: String,
    /// API version, e.g. `v3`.
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schemas: IndexMap<String, SchemaNode>,
    pub resources: IndexMap<String, Resource>,
}
