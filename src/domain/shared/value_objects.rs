//! Shared value objects used across the call lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Internal call identifier
///
/// Rendered as `call_<uuid>` everywhere it leaves the process, so external
/// systems see a stable, recognizable identifier pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(String);

impl CallId {
    pub fn new() -> Self {
        Self(format!("call_{}", Uuid::new_v4()))
    }

    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The telephony vendor's own call handle (Telnyx call_control_id),
/// distinct from the internal [`CallId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderCallId(String);

impl ProviderCallId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderCallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_id_pattern() {
        let id = CallId::new();
        assert!(id.as_str().starts_with("call_"));
        assert!(Uuid::parse_str(&id.as_str()[5..]).is_ok());
    }

    #[test]
    fn test_call_ids_are_unique() {
        assert_ne!(CallId::new(), CallId::new());
    }

    #[test]
    fn test_provider_call_id_display() {
        let id = ProviderCallId::new("v3:abc123");
        assert_eq!(id.to_string(), "v3:abc123");
    }
}
