//! The protocol engine: batch dispatch, mutation aggregation, transport.

pub mod dispatch;
pub mod http;
pub mod set;

pub use dispatch::Dispatcher;
