//! Capability markers and the classifier that assigns them.
//!
//! A marker is an empty trait attached to a generated type to describe the
//! role it plays in the API. The generator only consumes markers through the
//! [`MarkerClassifier`] trait; [`DefaultMarkerClassifier`] implements the
//! rules for discovery documents.

use std::collections::BTreeSet;

use discogen_define::{IoRole, SchemaNode};
use strum::{Display, EnumIter, EnumMessage, EnumString};

use crate::context::{ActivityMap, activity_split, resource_type_name};

/// A capability marker attached to a generated type.
///
/// The variant name doubles as the name of the generated marker trait.
///
/// ## Examples
///
/// ```
/// use discogen_gen::markers::Marker;
/// use strum::EnumMessage;
///
/// assert_eq!(Marker::RequestValue.to_string(), "RequestValue");
/// assert!(Marker::Part.get_documentation().is_some());
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
    Display,
    EnumIter,
    EnumMessage,
    EnumString,
)]
pub enum Marker {
    /// Identifies types which are only used as part of other types.
    Part,
    /// Identifies types named after the resource whose methods operate on them.
    Resource,
    /// Identifies types which are returned as the result of an activity.
    ResponseResult,
    /// Identifies types which are used as the request payload of an activity.
    /// Such types can list their populated fields with `to_parts()`.
    RequestValue,
    /// Identifies types which are synthesized from anonymous object properties.
    NestedType,
}

impl Marker {
    /// The marker that makes a type usable as a request payload.
    pub const REQUEST: Marker = Marker::RequestValue;
}

/// Computes the set of markers applicable to a schema.
///
/// Implementations must be pure: the same schema and activity map always
/// yield the same set.
pub trait MarkerClassifier: Send + Sync {
    fn markers(&self, schema: &SchemaNode, activities: &ActivityMap) -> BTreeSet<Marker>;
}

/// Assigns markers from a schema's activity cross-references.
///
/// - no activities: [`Marker::Part`]
/// - an activity on a resource named after the schema: [`Marker::Resource`]
/// - returned by an activity: [`Marker::ResponseResult`]
/// - sent to an activity: [`Marker::RequestValue`]
/// - synthesized nested type: [`Marker::NestedType`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMarkerClassifier;

impl MarkerClassifier for DefaultMarkerClassifier {
    fn markers(&self, schema: &SchemaNode, activities: &ActivityMap) -> BTreeSet<Marker> {
        let mut markers = BTreeSet::new();

        match activities.get(&schema.id).filter(|a| !a.is_empty()) {
            None => {
                markers.insert(Marker::Part);
            }
            Some(schema_activities) => {
                for (fqan, roles) in schema_activities {
                    let is_resource = activity_split(fqan)
                        .map(|(resource, _)| resource_type_name(resource))
                        .is_ok_and(|tn| tn.eq_ignore_ascii_case(&schema.id));
                    if is_resource {
                        markers.insert(Marker::Resource);
                    }
                    if roles.contains(&IoRole::Response) {
                        markers.insert(Marker::ResponseResult);
                    }
                    if roles.contains(&IoRole::Request) {
                        markers.insert(Marker::RequestValue);
                    }
                }
            }
        }

        if schema.nested {
            markers.insert(Marker::NestedType);
        }

        markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RoleSet;
    use discogen_define::JsonType;
    use indexmap::IndexMap;

    fn schema(id: &str) -> SchemaNode {
        SchemaNode {
            id: id.to_string(),
            kind: Some(JsonType::Object),
            ..Default::default()
        }
    }

    fn activity_map(id: &str, entries: Vec<(&str, Vec<IoRole>)>) -> ActivityMap {
        let inner: IndexMap<String, RoleSet> = entries
            .into_iter()
            .map(|(fqan, roles)| (fqan.to_string(), roles.into_iter().collect()))
            .collect();
        let mut map = ActivityMap::new();
        map.insert(id.to_string(), inner);
        map
    }

    #[test]
    fn unreferenced_schema_is_part() {
        let markers = DefaultMarkerClassifier.markers(&schema("Thumbnail"), &ActivityMap::new());
        assert_eq!(markers, BTreeSet::from([Marker::Part]));
    }

    #[test]
    fn resource_schema_with_both_roles() {
        let activities = activity_map(
            "Video",
            vec![
                ("youtube.videos.insert", vec![IoRole::Request, IoRole::Response]),
                ("youtube.videos.delete", vec![]),
            ],
        );
        let markers = DefaultMarkerClassifier.markers(&schema("Video"), &activities);
        assert_eq!(
            markers,
            BTreeSet::from([Marker::Resource, Marker::ResponseResult, Marker::RequestValue])
        );
    }

    #[test]
    fn response_only_schema_is_not_request_value() {
        let activities = activity_map(
            "VideoListResponse",
            vec![("youtube.videos.list", vec![IoRole::Response])],
        );
        let markers = DefaultMarkerClassifier.markers(&schema("VideoListResponse"), &activities);
        assert_eq!(markers, BTreeSet::from([Marker::ResponseResult]));
    }

    #[test]
    fn resource_match_ignores_case() {
        let activities = activity_map(
            "ChannelSection",
            vec![("youtube.channelSections.list", vec![])],
        );
        let markers = DefaultMarkerClassifier.markers(&schema("ChannelSection"), &activities);
        assert!(markers.contains(&Marker::Resource));
    }

    #[test]
    fn nested_schema_gets_nested_marker() {
        let mut nested = schema("VideoContentDetails");
        nested.nested = true;
        let markers = DefaultMarkerClassifier.markers(&nested, &ActivityMap::new());
        assert_eq!(markers, BTreeSet::from([Marker::Part, Marker::NestedType]));
    }

    #[test]
    fn marker_traits_are_documented() {
        use strum::IntoEnumIterator;
        for marker in Marker::iter() {
            assert!(
                marker.get_documentation().is_some(),
                "{} has no documentation",
                marker
            );
        }
    }
}
