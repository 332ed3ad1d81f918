//! Minimal JMAP-style batched method server for task records.
//!
//! A client submits an ordered list of named method invocations in one
//! request and receives an ordered list of correlated responses in one
//! reply, with per-call and per-item error isolation: one bad call or one
//! bad item never aborts the batch, while protocol-level faults (malformed
//! arguments, store unavailable) abort the whole request so a partial
//! response can never misrepresent server state.
//!
//! # Module Organization
//!
//! - [`types`] - Wire types: request/response envelopes, method calls,
//!   tagged-union method arguments, per-method result structs, typed
//!   absorbed-error payloads.
//! - [`store`] - The [`TaskStore`] contract and the in-memory
//!   implementation.
//! - [`server`] - The batch dispatcher, the `task/set` mutation
//!   aggregator, and the HTTP transport.
//! - [`config`] - Process-wide immutable configuration (capability and
//!   session descriptors), loaded once and passed by reference.
//! - [`error`] - The batch-aborting fault tier.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use jmaplite::{Dispatcher, InMemoryStore, MethodCall, ServerConfig};
//! use serde_json::json;
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let store = Arc::new(InMemoryStore::new());
//! let config = Arc::new(ServerConfig::default());
//! let dispatcher = Dispatcher::new(store, config);
//!
//! let calls = vec![MethodCall::new(
//!     "task/set",
//!     json!({"create": {"c1": {"title": "Buy milk"}}}),
//!     "0",
//! )];
//! let responses = dispatcher.run_batch(calls).await.unwrap();
//! assert_eq!(responses.len(), 1);
//! assert_eq!(responses[0].call_id(), "0");
//! # });
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod server;
pub mod store;
pub mod types;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use server::dispatch::Dispatcher;
pub use store::{InMemoryStore, StoreError, TaskPatch, TaskStore};
pub use types::{MethodCall, MethodResponse, RequestEnvelope, ResponseEnvelope, SetError, Task};
