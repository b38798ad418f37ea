//! Application layer

pub mod orchestrator;

pub use orchestrator::{CallOrchestrator, InitiateCallRequest};
