//! Application layer - authorization gate, policy attachment and handlers.
//!
//! Handlers orchestrate domain operations and coordinate between ports.
//! Reads and writes are separate handler types, following CQRS.

pub mod authorization;
pub mod handlers;
pub mod operations;

pub use authorization::{AuthorizationGate, GateDecision, GateState, GuardedOperation, OperationKind};
pub use handlers::ImageUpload;
