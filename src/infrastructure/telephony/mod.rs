//! Telephony provider adapters

pub mod telnyx;

pub use telnyx::TelnyxGateway;
