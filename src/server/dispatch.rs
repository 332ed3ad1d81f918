//! The batch method dispatcher.
//!
//! Resolves each call in a batch strictly in order against the resource
//! store and produces one correlated response entry per call. Failures are
//! split into two tiers: an unrecognized method name is absorbed into the
//! response as an `("error", {type: unknownMethod}, callId)` entry and the
//! batch continues, while protocol-level faults (malformed required
//! arguments, store unavailable) abandon the entire batch so the caller
//! never receives a response that misrepresents server state.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::constants::{ERROR_METHOD, STATE_INITIAL};
use crate::error::{Error, Result};
use crate::server::set;
use crate::store::{StoreError, TaskStore};
use crate::types::{
    GetParams, GetResult, MethodArguments, MethodCall, MethodError, MethodResponse, QueryResult,
};

/// Resolves batches of method calls against a task store.
///
/// Request-scoped state does not exist: the dispatcher owns only the
/// shared store handle and the immutable configuration, so one instance
/// serves every request.
pub struct Dispatcher {
    store: Arc<dyn TaskStore>,
    config: Arc<ServerConfig>,
}

impl Dispatcher {
    /// Creates a dispatcher over the given store and configuration.
    pub fn new(store: Arc<dyn TaskStore>, config: Arc<ServerConfig>) -> Self {
        Self { store, config }
    }

    /// Resolves every call in `calls`, in order.
    ///
    /// The returned vector has exactly one entry per call, mirroring call
    /// order, each echoing its call's correlation token verbatim.
    ///
    /// # Errors
    ///
    /// Returns a batch-aborting [`Error`] on malformed required arguments
    /// or store unavailability; no partial responses are returned.
    pub async fn run_batch(&self, calls: Vec<MethodCall>) -> Result<Vec<MethodResponse>> {
        let mut responses = Vec::with_capacity(calls.len());
        for call in calls {
            let MethodCall(name, arguments, call_id) = call;
            match MethodArguments::parse(&name, &arguments)? {
                None => {
                    warn!(method = %name, call_id = %call_id, "unknown method");
                    let payload = serde_json::to_value(MethodError::UnknownMethod)?;
                    responses.push(MethodResponse::new(ERROR_METHOD, payload, call_id));
                }
                Some(args) => {
                    debug!(method = %name, call_id = %call_id, "dispatching");
                    let result = self.invoke(args).await?;
                    responses.push(MethodResponse::new(name, result, call_id));
                }
            }
        }
        Ok(responses)
    }

    /// Invokes the handler for already-validated arguments.
    async fn invoke(&self, args: MethodArguments) -> Result<Value> {
        let result = match args {
            MethodArguments::CapabilitiesGet => serde_json::to_value(self.config.capabilities())?,
            MethodArguments::SessionGet => serde_json::to_value(self.config.session())?,
            MethodArguments::TaskQuery => serde_json::to_value(self.query().await?)?,
            MethodArguments::TaskGet(params) => serde_json::to_value(self.get(params).await?)?,
            MethodArguments::TaskSet(params) => serde_json::to_value(
                set::apply(self.store.as_ref(), &self.config.account_id, params).await,
            )?,
        };
        Ok(result)
    }

    /// `task/query`: full scan of all task ids. No filter or sort.
    async fn query(&self) -> Result<QueryResult> {
        let tasks = self.store.list().await?;
        Ok(QueryResult {
            account_id: self.config.account_id.clone(),
            query_state: STATE_INITIAL.to_string(),
            can_calculate_changes: false,
            ids: tasks.into_iter().map(|task| task.id).collect(),
        })
    }

    /// `task/get`: resolve each id; missing ids go to `notFound`.
    ///
    /// A backend failure (as opposed to not-found) aborts the batch: the
    /// store being unreachable is a protocol-level fault.
    async fn get(&self, params: GetParams) -> Result<GetResult> {
        let mut list = Vec::new();
        let mut not_found = Vec::new();
        for id in params.ids {
            match self.store.get(&id).await {
                Ok(task) => list.push(task),
                Err(StoreError::NotFound { .. }) => not_found.push(id),
                Err(err) => return Err(Error::from(err)),
            }
        }
        Ok(GetResult {
            account_id: self.config.account_id.clone(),
            state: STATE_INITIAL.to_string(),
            not_found,
            list,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn dispatcher() -> (Arc<InMemoryStore>, Dispatcher) {
        let store = Arc::new(InMemoryStore::new());
        let config = Arc::new(ServerConfig::default());
        (store.clone(), Dispatcher::new(store, config))
    }

    #[tokio::test]
    async fn response_order_mirrors_call_order_with_echoed_ids() {
        let (_, dispatcher) = dispatcher();
        let calls = vec![
            MethodCall::new("capabilities/get", json!({}), "a"),
            MethodCall::new("task/query", json!({}), "b"),
            MethodCall::new("session/get", json!({}), "c"),
        ];
        let responses = dispatcher.run_batch(calls).await.unwrap();
        let ids: Vec<&str> = responses.iter().map(|r| r.call_id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(responses[0].name(), "capabilities/get");
        assert_eq!(responses[1].name(), "task/query");
    }

    #[tokio::test]
    async fn unknown_method_is_absorbed_and_siblings_still_run() {
        let (_, dispatcher) = dispatcher();
        let calls = vec![
            MethodCall::new("Foo/bar", json!({}), "x1"),
            MethodCall::new("task/query", json!({}), "x2"),
        ];
        let responses = dispatcher.run_batch(calls).await.unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].name(), "error");
        assert_eq!(responses[0].result(), &json!({"type": "unknownMethod"}));
        assert_eq!(responses[0].call_id(), "x1");
        assert_eq!(responses[1].name(), "task/query");
    }

    #[tokio::test]
    async fn malformed_arguments_abort_the_batch() {
        let (_, dispatcher) = dispatcher();
        let calls = vec![
            MethodCall::new("task/query", json!({}), "q"),
            MethodCall::new("task/get", json!({"ids": "not-a-list"}), "g"),
        ];
        let err = dispatcher.run_batch(calls).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn get_splits_found_and_not_found() {
        let (store, dispatcher) = dispatcher();
        let task = store.create("Buy milk").await.unwrap();

        let calls = vec![MethodCall::new(
            "task/get",
            json!({"ids": [task.id, "missing"]}),
            "g1",
        )];
        let responses = dispatcher.run_batch(calls).await.unwrap();
        let result = responses[0].result();
        assert_eq!(result["accountId"], "primary");
        assert_eq!(result["list"][0]["title"], "Buy milk");
        assert_eq!(result["list"][0]["isCompleted"], false);
        assert_eq!(result["notFound"], json!(["missing"]));
    }

    #[tokio::test]
    async fn query_lists_all_ids_in_creation_order() {
        let (store, dispatcher) = dispatcher();
        let a = store.create("a").await.unwrap();
        let b = store.create("b").await.unwrap();

        let calls = vec![MethodCall::new("task/query", json!({}), "q1")];
        let responses = dispatcher.run_batch(calls).await.unwrap();
        let result = responses[0].result();
        assert_eq!(result["ids"], json!([a.id, b.id]));
        assert_eq!(result["canCalculateChanges"], false);
        assert_eq!(result["queryState"], "initial");
    }

    #[tokio::test]
    async fn capabilities_get_never_touches_the_store() {
        let (_, dispatcher) = dispatcher();
        let calls = vec![MethodCall::new("capabilities/get", json!({}), "c1")];
        let responses = dispatcher.run_batch(calls).await.unwrap();
        let result = responses[0].result();
        assert_eq!(
            result["capabilities"]["urn:ietf:params:jmap:core"]["maxCallsInRequest"],
            10
        );
    }
}
