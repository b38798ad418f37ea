//! Call lifecycle bounded context

pub mod aggregate;
pub mod classifier;
pub mod directive;
pub mod gateway;
pub mod notifier;
pub mod repository;
pub mod value_object;

pub use aggregate::CallRecord;
pub use classifier::IvrClassifier;
pub use directive::Directive;
pub use gateway::{PlaceCallRequest, TelephonyGateway};
pub use notifier::{CallNotifier, HumanDetectedPayload};
pub use repository::CallRegistry;
pub use value_object::{CallStatus, TranscriptEntry};
