//! Wire types for the batched method protocol.

pub mod capabilities;
pub mod protocol;

pub use capabilities::{
    Account, CapabilitiesResult, CapabilitySet, CoreLimits, SessionResult, TaskLimits,
};
pub use protocol::{
    GetParams, GetResult, MethodArguments, MethodCall, MethodError, MethodResponse, QueryResult,
    RequestEnvelope, ResponseEnvelope, SetError, SetParams, SetResult, Task,
};
