//! Capability and session descriptors.
//!
//! Both descriptors are pure functions of process-wide configuration, not
//! store state; the dispatcher serves them without touching the store.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Protocol limits advertised under the core capability urn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreLimits {
    /// Maximum request body size in bytes.
    pub max_size_request: u64,
    /// Maximum concurrent uploads.
    pub max_concurrent_upload: u32,
    /// Maximum concurrent downloads.
    pub max_concurrent_download: u32,
    /// Maximum objects per get-style call.
    pub max_objects_in_get: u32,
    /// Maximum objects per set-style call.
    pub max_objects_in_set: u32,
    /// String encoding for payloads.
    pub get_string_encoding: String,
    /// Maximum method calls per request batch.
    pub max_calls_in_request: u32,
    /// Maximum objects per query.
    pub max_objects_in_query: u32,
    /// Supported protocol versions.
    pub versions: Vec<String>,
}

impl Default for CoreLimits {
    fn default() -> Self {
        Self {
            max_size_request: 10_000_000,
            max_concurrent_upload: 4,
            max_concurrent_download: 4,
            max_objects_in_get: 500,
            max_objects_in_set: 500,
            get_string_encoding: "UTF-8".to_string(),
            max_calls_in_request: 10,
            max_objects_in_query: 100,
            versions: vec!["1".to_string()],
        }
    }
}

/// Limits and options advertised under the task capability urn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLimits {
    /// Maximum objects per query.
    pub max_objects_in_query: u32,
    /// Maximum objects per set-style call.
    pub max_objects_in_set: u32,
    /// Sort keys a query could support. Advertised only; `task/query`
    /// performs an unsorted full scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_sort_options: Option<Vec<String>>,
}

impl Default for TaskLimits {
    fn default() -> Self {
        Self {
            max_objects_in_query: 100,
            max_objects_in_set: 100,
            query_sort_options: Some(vec!["id".to_string(), "title".to_string()]),
        }
    }
}

/// The capability mapping keyed by urn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapabilitySet {
    /// Core protocol limits.
    #[serde(rename = "urn:ietf:params:jmap:core")]
    pub core: CoreLimits,
    /// Task resource limits.
    #[serde(rename = "urn:example:params:jmap:task")]
    pub task: TaskLimits,
}

/// Result of `capabilities/get`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilitiesResult {
    /// Supported capabilities keyed by urn.
    pub capabilities: CapabilitySet,
}

/// An account entry in the session descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Display name.
    pub name: String,
    /// Whether this is a personal account.
    pub is_personal: bool,
    /// Capabilities scoped to this account, keyed by urn.
    pub account_capabilities: AccountCapabilities,
}

/// Account-scoped capability mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCapabilities {
    /// Task resource limits for this account.
    #[serde(rename = "urn:example:params:jmap:task")]
    pub task: TaskLimits,
}

/// Result of `session/get`.
///
/// A simplified session: real session issuance and authentication are out
/// of scope, so this is static data assembled from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    /// Supported capabilities keyed by urn.
    pub capabilities: CapabilitySet,
    /// Accounts available to the client, keyed by account id.
    pub accounts: IndexMap<String, Account>,
    /// The authenticated username.
    pub username: String,
    /// The batched method endpoint.
    pub api_url: String,
    /// Blob download endpoint (advertised, not served).
    pub download_url: String,
    /// Blob upload endpoint (advertised, not served).
    pub upload_url: String,
    /// Push event source endpoint (advertised, not served).
    pub event_source_url: String,
}
