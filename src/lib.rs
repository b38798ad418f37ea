//! ivrpilot - outbound IVR call orchestration
//!
//! Places calls through a telephony provider, navigates the callee's IVR
//! with an AI text-classification step, and notifies external systems via
//! webhooks at the key lifecycle transitions.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::result::Result;
