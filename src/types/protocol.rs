//! Protocol wire types: envelopes, method calls, typed arguments, results.
//!
//! A method call travels on the wire as a 3-element JSON array
//! `[methodName, arguments, callId]`; [`MethodCall`] and [`MethodResponse`]
//! are tuple structs so the derived serde impls produce exactly that shape.
//!
//! Raw argument mappings are converted into the [`MethodArguments`] tagged
//! union at the dispatcher boundary, so handlers match exhaustively on
//! typed parameters instead of probing loose JSON. Handler outputs are
//! explicit result structs serialized generically when the response entry
//! is assembled.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    CAPABILITIES_GET, SESSION_GET, SESSION_STATE, TASK_GET, TASK_QUERY, TASK_SET,
};
use crate::error::Error;

/// One client request: an ordered batch of method calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// The calls to resolve, in order.
    pub method_calls: Vec<MethodCall>,
}

/// The reply envelope: one response entry per call, in call order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Per-call results or absorbed per-call errors, mirroring call order.
    pub method_responses: Vec<MethodResponse>,
    /// Opaque placeholder token; carries no change-tracking semantics.
    pub session_state: String,
}

impl ResponseEnvelope {
    /// Wraps dispatcher output into the final envelope.
    ///
    /// Pure and order-preserving; attaches the fixed session state token.
    pub fn assemble(method_responses: Vec<MethodResponse>) -> Self {
        Self {
            method_responses,
            session_state: SESSION_STATE.to_string(),
        }
    }
}

/// A named method invocation: `[methodName, arguments, callId]`.
///
/// The call id is client-chosen and opaque; it is echoed verbatim in
/// exactly one corresponding response entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall(pub String, pub Value, pub String);

impl MethodCall {
    /// Creates a call from a method name, raw arguments, and call id.
    pub fn new(name: impl Into<String>, arguments: Value, call_id: impl Into<String>) -> Self {
        Self(name.into(), arguments, call_id.into())
    }

    /// The method name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The raw argument mapping, as received.
    pub fn arguments(&self) -> &Value {
        &self.1
    }

    /// The client-chosen correlation token.
    pub fn call_id(&self) -> &str {
        &self.2
    }
}

/// A correlated response entry: `[methodName, result, callId]`.
///
/// `methodName` is the original name on success, or the sentinel
/// [`ERROR_METHOD`](crate::constants::ERROR_METHOD) when the call failed
/// with an absorbed call-level error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodResponse(pub String, pub Value, pub String);

impl MethodResponse {
    /// Creates a response entry.
    pub fn new(name: impl Into<String>, result: Value, call_id: impl Into<String>) -> Self {
        Self(name.into(), result, call_id.into())
    }

    /// The method name, or `"error"` for absorbed call-level failures.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The result mapping or typed error payload.
    pub fn result(&self) -> &Value {
        &self.1
    }

    /// The echoed correlation token.
    pub fn call_id(&self) -> &str {
        &self.2
    }
}

/// The task resource.
///
/// `id` is server-generated, globally unique, immutable once assigned, and
/// never reused after deletion. `title` is never empty for a persisted
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque server-assigned identifier.
    pub id: String,
    /// Non-empty display title.
    pub title: String,
    /// Completion flag; defaults to `false` at creation.
    pub is_completed: bool,
}

/// Typed arguments for every supported method, validated at the dispatcher
/// boundary before any handler runs.
///
/// [`parse`](MethodArguments::parse) returns `Ok(None)` for an unrecognized
/// method name (absorbed by the dispatcher as an `unknownMethod` response)
/// and `Err` for malformed required arguments (a batch-aborting fault).
#[derive(Debug, Clone)]
pub enum MethodArguments {
    /// `capabilities/get` - static capability descriptor, no arguments.
    CapabilitiesGet,
    /// `session/get` - static session descriptor, no arguments.
    SessionGet,
    /// `task/query` - full scan; arguments are ignored.
    TaskQuery,
    /// `task/get` - per-id resolution.
    TaskGet(GetParams),
    /// `task/set` - create/update/destroy mutation call.
    TaskSet(SetParams),
}

impl MethodArguments {
    /// Resolves a method name and raw arguments into typed arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] when a recognized method's
    /// arguments do not deserialize into its parameter struct.
    pub fn parse(name: &str, arguments: &Value) -> Result<Option<Self>, Error> {
        let parsed = match name {
            CAPABILITIES_GET => Self::CapabilitiesGet,
            SESSION_GET => Self::SessionGet,
            TASK_QUERY => Self::TaskQuery,
            TASK_GET => Self::TaskGet(
                serde_json::from_value(arguments.clone())
                    .map_err(|e| Error::invalid_arguments(name, e.to_string()))?,
            ),
            TASK_SET => Self::TaskSet(
                serde_json::from_value(arguments.clone())
                    .map_err(|e| Error::invalid_arguments(name, e.to_string()))?,
            ),
            _ => return Ok(None),
        };
        Ok(Some(parsed))
    }
}

/// Arguments for `task/get`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetParams {
    /// The ids to resolve. Required; must be a list of strings.
    pub ids: Vec<String>,
}

/// Arguments for `task/set`.
///
/// The three collections are independent and optional. Items inside
/// `create`/`update` and elements of `destroy` stay raw [`Value`]s here:
/// per-item malformation is absorbed into the failure partition, never
/// escalated to a batch-aborting fault.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetParams {
    /// Client-chosen temporary key -> field mapping for new tasks.
    #[serde(default)]
    pub create: Option<IndexMap<String, Value>>,
    /// Existing id -> partial field mapping.
    #[serde(default)]
    pub update: Option<IndexMap<String, Value>>,
    /// Ids to delete.
    #[serde(default)]
    pub destroy: Option<Vec<Value>>,
}

/// Result of `task/query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// The account the listing belongs to.
    pub account_id: String,
    /// Opaque placeholder token.
    pub query_state: String,
    /// Always `false`: delta calculation is unsupported.
    pub can_calculate_changes: bool,
    /// All task ids, in store listing order.
    pub ids: Vec<String>,
}

/// Result of `task/get`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResult {
    /// The account the tasks belong to.
    pub account_id: String,
    /// Opaque placeholder token.
    pub state: String,
    /// Requested ids with no matching record.
    pub not_found: Vec<String>,
    /// Resolved tasks, in request order.
    pub list: Vec<Task>,
}

/// Result of `task/set`: two exhaustive partitions per collection.
///
/// Every key presented in the request's `create`/`update` mappings and
/// every element of `destroy` appears in exactly one of its collection's
/// success/failure partitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetResult {
    /// The account the mutations apply to.
    pub account_id: String,
    /// Opaque placeholder token.
    pub old_state: String,
    /// Opaque placeholder token.
    pub new_state: String,
    /// Client key -> created task.
    pub created: IndexMap<String, Task>,
    /// Id -> task after a successful partial update.
    pub updated: IndexMap<String, Task>,
    /// Successfully deleted ids.
    pub destroyed: Vec<String>,
    /// Client key -> typed creation failure.
    pub not_created: IndexMap<String, SetError>,
    /// Id -> typed update failure.
    pub not_updated: IndexMap<String, SetError>,
    /// Id -> typed destruction failure.
    pub not_destroyed: IndexMap<String, SetError>,
}

impl SetResult {
    /// Creates an empty outcome with the fixed placeholder state tokens.
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            old_state: crate::constants::STATE_INITIAL.to_string(),
            new_state: crate::constants::STATE_UPDATED.to_string(),
            created: IndexMap::new(),
            updated: IndexMap::new(),
            destroyed: Vec::new(),
            not_created: IndexMap::new(),
            not_updated: IndexMap::new(),
            not_destroyed: IndexMap::new(),
        }
    }
}

/// Absorbed call-level error payload, e.g. `{"type": "unknownMethod"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MethodError {
    /// The method name is not registered.
    UnknownMethod,
}

/// Absorbed per-item mutation failure, tagged on `"type"` on the wire.
///
/// # Examples
///
/// ```
/// use jmaplite::SetError;
///
/// let err = SetError::invalid_properties(["title"]);
/// let wire = serde_json::to_value(&err).unwrap();
/// assert_eq!(
///     wire,
///     serde_json::json!({"type": "invalidProperties", "properties": ["title"]})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SetError {
    /// The item's field mapping was invalid; `properties` names the
    /// offending fields, or `["*"]` when the item is not a mapping at all.
    InvalidProperties {
        /// The rejected field names.
        properties: Vec<String>,
    },
    /// A destroy element was not a string id.
    InvalidId,
    /// The referenced id has no matching record.
    NotFound,
    /// The store failed while mutating this item.
    ServerFail,
}

impl SetError {
    /// Builds an `invalidProperties` failure naming the given fields.
    pub fn invalid_properties<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InvalidProperties {
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_call_deserializes_from_wire_array() {
        let call: MethodCall =
            serde_json::from_value(json!(["task/get", {"ids": ["a"]}, "c0"])).unwrap();
        assert_eq!(call.name(), "task/get");
        assert_eq!(call.arguments(), &json!({"ids": ["a"]}));
        assert_eq!(call.call_id(), "c0");
    }

    #[test]
    fn method_response_serializes_as_wire_array() {
        let response = MethodResponse::new("task/query", json!({"ids": []}), "r1");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!(["task/query", {"ids": []}, "r1"])
        );
    }

    #[test]
    fn envelope_uses_camel_case_keys() {
        let envelope = ResponseEnvelope::assemble(vec![]);
        let wire = serde_json::to_value(&envelope).unwrap();
        assert!(wire.get("methodResponses").is_some());
        assert_eq!(wire["sessionState"], json!(SESSION_STATE));
    }

    #[test]
    fn task_serializes_is_completed_in_camel_case() {
        let task = Task {
            id: "t-1".to_string(),
            title: "Buy milk".to_string(),
            is_completed: false,
        };
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({"id": "t-1", "title": "Buy milk", "isCompleted": false})
        );
    }

    #[test]
    fn parse_returns_none_for_unknown_method() {
        let parsed = MethodArguments::parse("Foo/bar", &json!({})).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn parse_rejects_task_get_without_ids() {
        let err = MethodArguments::parse("task/get", &json!({})).unwrap_err();
        assert!(err.to_string().contains("task/get"));
    }

    #[test]
    fn parse_rejects_task_get_with_non_string_ids() {
        assert!(MethodArguments::parse("task/get", &json!({"ids": [1, 2]})).is_err());
    }

    #[test]
    fn parse_rejects_task_set_with_non_array_destroy() {
        assert!(MethodArguments::parse("task/set", &json!({"destroy": "a"})).is_err());
    }

    #[test]
    fn parse_accepts_empty_task_set() {
        let parsed = MethodArguments::parse("task/set", &json!({})).unwrap().unwrap();
        match parsed {
            MethodArguments::TaskSet(params) => {
                assert!(params.create.is_none());
                assert!(params.update.is_none());
                assert!(params.destroy.is_none());
            }
            other => panic!("expected TaskSet, got {other:?}"),
        }
    }

    #[test]
    fn set_error_wire_shapes() {
        assert_eq!(
            serde_json::to_value(SetError::ServerFail).unwrap(),
            json!({"type": "serverFail"})
        );
        assert_eq!(
            serde_json::to_value(SetError::InvalidId).unwrap(),
            json!({"type": "invalidId"})
        );
        assert_eq!(
            serde_json::to_value(SetError::NotFound).unwrap(),
            json!({"type": "notFound"})
        );
        assert_eq!(
            serde_json::to_value(SetError::invalid_properties(["*"])).unwrap(),
            json!({"type": "invalidProperties", "properties": ["*"]})
        );
    }

    #[test]
    fn method_error_wire_shape() {
        assert_eq!(
            serde_json::to_value(MethodError::UnknownMethod).unwrap(),
            json!({"type": "unknownMethod"})
        );
    }
}
