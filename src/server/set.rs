//! The `task/set` mutation aggregator.
//!
//! Processes the three optional collections of one set call — `create`,
//! `update`, `destroy` — independently and exhaustively: every presented
//! key or id ends up in exactly one of its collection's success/failure
//! partitions, and a failure in one collection never affects another.
//! Item-level faults are always absorbed as typed [`SetError`] payloads;
//! nothing in here aborts the batch.

use serde_json::Value;
use tracing::warn;

use crate::store::{StoreError, TaskPatch, TaskStore};
use crate::types::{SetError, SetParams, SetResult};

/// Applies one `task/set` call against the store.
pub async fn apply(store: &dyn TaskStore, account_id: &str, params: SetParams) -> SetResult {
    let mut outcome = SetResult::new(account_id);

    if let Some(create) = params.create {
        for (client_key, raw) in create {
            match extract_title(&raw) {
                Ok(title) => match store.create(title).await {
                    Ok(task) => {
                        outcome.created.insert(client_key, task);
                    }
                    Err(err) => {
                        warn!(client_key = %client_key, error = %err, "create failed");
                        outcome.not_created.insert(client_key, SetError::ServerFail);
                    }
                },
                Err(set_err) => {
                    outcome.not_created.insert(client_key, set_err);
                }
            }
        }
    }

    if let Some(update) = params.update {
        for (id, raw) in update {
            match parse_patch(&raw) {
                Ok(patch) => match store.update(&id, patch).await {
                    Ok(task) => {
                        outcome.updated.insert(id, task);
                    }
                    Err(StoreError::NotFound { .. }) => {
                        outcome.not_updated.insert(id, SetError::NotFound);
                    }
                    Err(err) => {
                        warn!(id = %id, error = %err, "update failed");
                        outcome.not_updated.insert(id, SetError::ServerFail);
                    }
                },
                Err(set_err) => {
                    outcome.not_updated.insert(id, set_err);
                }
            }
        }
    }

    if let Some(destroy) = params.destroy {
        for raw in destroy {
            let Some(id) = raw.as_str() else {
                // Key the failure by the element's JSON rendering so the
                // outcome stays exhaustive even for malformed elements.
                outcome.not_destroyed.insert(raw.to_string(), SetError::InvalidId);
                continue;
            };
            match store.delete(id).await {
                Ok(()) => outcome.destroyed.push(id.to_string()),
                Err(StoreError::NotFound { .. }) => {
                    outcome.not_destroyed.insert(id.to_string(), SetError::NotFound);
                }
                Err(err) => {
                    warn!(id = %id, error = %err, "destroy failed");
                    outcome.not_destroyed.insert(id.to_string(), SetError::ServerFail);
                }
            }
        }
    }

    outcome
}

/// Validates a creation item and extracts its title.
///
/// The entry must be a mapping carrying a non-empty string `title`; other
/// fields are ignored at creation.
fn extract_title(raw: &Value) -> Result<&str, SetError> {
    let Some(fields) = raw.as_object() else {
        return Err(SetError::invalid_properties(["*"]));
    };
    match fields.get("title").and_then(Value::as_str) {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(SetError::invalid_properties(["title"])),
    }
}

/// Validates an update item into a [`TaskPatch`].
///
/// Recognized fields are `title` (non-empty string) and `isCompleted`
/// (boolean); any other field name, a wrong-typed value, or an empty title
/// rejects the item. An entry that is not a mapping at all rejects with
/// `["*"]`.
fn parse_patch(raw: &Value) -> Result<TaskPatch, SetError> {
    let Some(fields) = raw.as_object() else {
        return Err(SetError::invalid_properties(["*"]));
    };
    let mut patch = TaskPatch::default();
    for (field, value) in fields {
        match field.as_str() {
            "title" => match value.as_str() {
                Some(title) if !title.is_empty() => patch.title = Some(title.to_string()),
                _ => return Err(SetError::invalid_properties(["title"])),
            },
            "isCompleted" => match value.as_bool() {
                Some(is_completed) => patch.is_completed = Some(is_completed),
                None => return Err(SetError::invalid_properties(["isCompleted"])),
            },
            other => return Err(SetError::invalid_properties([other])),
        }
    }
    Ok(patch)
}
