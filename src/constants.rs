//! Method names and fixed protocol tokens.
//!
//! The state tokens below are opaque placeholders. They carry no
//! change-tracking semantics and must not be treated as optimistic
//! concurrency tokens.

/// Method name for the static capability descriptor.
pub const CAPABILITIES_GET: &str = "capabilities/get";

/// Method name for the static session descriptor.
pub const SESSION_GET: &str = "session/get";

/// Method name for the full-scan id listing.
pub const TASK_QUERY: &str = "task/query";

/// Method name for per-id task resolution.
pub const TASK_GET: &str = "task/get";

/// Method name for the create/update/destroy mutation call.
pub const TASK_SET: &str = "task/set";

/// Sentinel method name used in place of the original name when a call
/// fails with an absorbed, call-level error.
pub const ERROR_METHOD: &str = "error";

/// Placeholder state token for query/get responses and `oldState`.
pub const STATE_INITIAL: &str = "initial";

/// Placeholder `newState` token for `task/set` responses.
pub const STATE_UPDATED: &str = "updated-state";

/// Placeholder session state attached to every response envelope.
pub const SESSION_STATE: &str = "server-session-state-1";
