//! GraphQL wire payloads: the observed O-counter mutation and the emitted
//! scene-marker mutation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operation name of the O-counter increment mutation the hook watches for.
pub const TRIGGER_OPERATION: &str = "SceneAddO";

/// Operation name of the emitted marker mutation.
pub const MARKER_CREATE_OPERATION: &str = "SceneMarkerCreate";

/// Mutation document for `SceneMarkerCreate`.
pub const MARKER_CREATE_QUERY: &str = "mutation SceneMarkerCreate($title: String!, $seconds: Float!, $scene_id: ID!, $primary_tag_id: ID!, $tag_ids: [ID!] = []) {
  sceneMarkerCreate(
    input: {title: $title, seconds: $seconds, scene_id: $scene_id, primary_tag_id: $primary_tag_id, tag_ids: $tag_ids}
  ) {
    id
  }
}";

/// Mutation document for `SceneAddO` (sent by the CLI, observed by the hook).
pub const ADD_O_QUERY: &str = "mutation SceneAddO($id: ID!) {\n  sceneAddO(id: $id)\n}";

/// Outgoing GraphQL call body as seen by the observer.
///
/// Only the fields the trigger check reads; everything else in the payload is
/// ignored.
#[derive(Debug, Deserialize)]
pub struct ObservedOperation {
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub variables: Value,
}

impl ObservedOperation {
    /// True when this is the O-counter increment mutation.
    pub fn is_trigger(&self) -> bool {
        self.operation_name.as_deref() == Some(TRIGGER_OPERATION)
    }

    /// `variables.id` normalized to a string. Servers accept both JSON string
    /// and number forms of the scene id; anything else is treated as absent.
    pub fn scene_id(&self) -> Option<String> {
        match self.variables.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Body of the `SceneAddO` mutation call.
#[derive(Debug, Serialize)]
pub struct AddORequest {
    #[serde(rename = "operationName")]
    operation_name: &'static str,
    variables: AddOVariables,
    query: &'static str,
}

#[derive(Debug, Serialize)]
struct AddOVariables {
    id: String,
}

impl AddORequest {
    pub fn new(scene_id: &str) -> Self {
        Self {
            operation_name: TRIGGER_OPERATION,
            variables: AddOVariables {
                id: scene_id.to_string(),
            },
            query: ADD_O_QUERY,
        }
    }

    /// Serialized call body.
    pub fn body(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Body of the `SceneMarkerCreate` mutation call.
#[derive(Debug, Serialize)]
pub struct MarkerCreateRequest {
    #[serde(rename = "operationName")]
    operation_name: &'static str,
    variables: MarkerCreateVariables,
    query: &'static str,
}

/// Marker variables: empty tag list, empty title, fixed primary tag.
/// `seconds` is produced as a whole number but the wire type is Float.
#[derive(Debug, Serialize)]
struct MarkerCreateVariables {
    tag_ids: Vec<String>,
    scene_id: String,
    title: String,
    seconds: f64,
    primary_tag_id: String,
}

impl MarkerCreateRequest {
    pub fn new(scene_id: &str, seconds: u64, primary_tag_id: &str) -> Self {
        Self {
            operation_name: MARKER_CREATE_OPERATION,
            variables: MarkerCreateVariables {
                tag_ids: Vec::new(),
                scene_id: scene_id.to_string(),
                title: String::new(),
                seconds: seconds as f64,
                primary_tag_id: primary_tag_id.to_string(),
            },
            query: MARKER_CREATE_QUERY,
        }
    }
}

/// Success reply envelope: `{"data":{"sceneMarkerCreate":{"id":"..."}}}`.
#[derive(Debug, Deserialize)]
pub struct MarkerCreateReply {
    #[serde(default)]
    pub data: Option<MarkerCreateData>,
}

#[derive(Debug, Deserialize)]
pub struct MarkerCreateData {
    #[serde(rename = "sceneMarkerCreate")]
    pub scene_marker_create: Option<CreatedMarker>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedMarker {
    pub id: String,
}

impl MarkerCreateReply {
    /// Identifier of the created marker, if the reply carried one.
    pub fn marker_id(self) -> Option<String> {
        Some(self.data?.scene_marker_create?.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn observed_trigger_with_string_id() {
        let body = r#"{"operationName":"SceneAddO","variables":{"id":"17"},"query":"mutation ..."}"#;
        let op: ObservedOperation = serde_json::from_str(body).unwrap();
        assert!(op.is_trigger());
        assert_eq!(op.scene_id().as_deref(), Some("17"));
    }

    #[test]
    fn observed_trigger_with_numeric_id() {
        let body = r#"{"operationName":"SceneAddO","variables":{"id":17}}"#;
        let op: ObservedOperation = serde_json::from_str(body).unwrap();
        assert!(op.is_trigger());
        assert_eq!(op.scene_id().as_deref(), Some("17"));
    }

    #[test]
    fn observed_other_operation_is_not_trigger() {
        let body = r#"{"operationName":"FindScenes","variables":{"filter":{}}}"#;
        let op: ObservedOperation = serde_json::from_str(body).unwrap();
        assert!(!op.is_trigger());
    }

    #[test]
    fn observed_without_operation_name() {
        let body = r#"{"query":"{ version }"}"#;
        let op: ObservedOperation = serde_json::from_str(body).unwrap();
        assert!(!op.is_trigger());
        assert!(op.scene_id().is_none());
    }

    #[test]
    fn marker_create_wire_shape() {
        let request = MarkerCreateRequest::new("42", 3723, "9");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["operationName"], "SceneMarkerCreate");
        assert_eq!(
            value["variables"],
            json!({
                "tag_ids": [],
                "scene_id": "42",
                "title": "",
                "seconds": 3723.0,
                "primary_tag_id": "9",
            })
        );
        assert!(value["query"]
            .as_str()
            .unwrap()
            .starts_with("mutation SceneMarkerCreate"));
    }

    #[test]
    fn add_o_wire_shape() {
        let value = serde_json::to_value(AddORequest::new("5")).unwrap();
        assert_eq!(value["operationName"], "SceneAddO");
        assert_eq!(value["variables"], json!({"id": "5"}));
    }

    #[test]
    fn marker_reply_id() {
        let reply: MarkerCreateReply =
            serde_json::from_str(r#"{"data":{"sceneMarkerCreate":{"id":"101"}}}"#).unwrap();
        assert_eq!(reply.marker_id().as_deref(), Some("101"));
    }

    #[test]
    fn marker_reply_without_id() {
        let reply: MarkerCreateReply = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(reply.marker_id().is_none());
    }
}
