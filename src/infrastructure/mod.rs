//! Infrastructure layer

pub mod classifier;
pub mod logging;
pub mod notifier;
pub mod persistence;
pub mod telephony;
