//! Batch-aborting faults.
//!
//! Errors here are the request-aborting tier: when one of these surfaces
//! during batch resolution, the whole request is abandoned and the caller
//! receives a transport-level failure with no partial `methodResponses`.
//! Absorbed per-call and per-item faults never reach this type; they are
//! encoded as typed payloads ([`MethodError`](crate::types::MethodError),
//! [`SetError`](crate::types::SetError)) inside the response instead.

use thiserror::Error;

use crate::store::StoreError;

/// A fault severe enough that no partial response is safe to return.
#[derive(Debug, Error)]
pub enum Error {
    /// A recognized method was invoked with missing or malformed required
    /// arguments (e.g. `task/get` without a string-list `ids`).
    #[error("invalid arguments for {method}: {message}")]
    InvalidArguments {
        /// The method whose arguments failed validation.
        method: String,
        /// Description of the validation failure.
        message: String,
    },

    /// The resource store failed outside the scope of a single mutation
    /// item (store unreachable during query/get).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A result struct failed to serialize into a response payload.
    #[error("response serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Convenience constructor for argument validation failures.
    pub fn invalid_arguments(method: &str, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            method: method.to_string(),
            message: message.into(),
        }
    }
}

/// Result alias using the crate's batch-aborting [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_arguments_display_names_the_method() {
        let err = Error::invalid_arguments("task/get", "missing field `ids`");
        assert_eq!(
            err.to_string(),
            "invalid arguments for task/get: missing field `ids`"
        );
    }

    #[test]
    fn store_error_display_is_transparent() {
        let err = Error::from(StoreError::NotFound {
            id: "t-1".to_string(),
        });
        assert_eq!(err.to_string(), "task not found: t-1");
    }
}
