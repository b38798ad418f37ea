//! Call value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Call status
///
/// `Pending` is the initial state. `WaitingForStaff` is reachable only via
/// human detection. Every other value is terminal: reaching it ends the
/// record's life and removes it from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    /// Call created, IVR navigation in progress
    Pending,
    /// Live person detected, waiting for office staff to join
    WaitingForStaff,
    /// Normal completion
    Completed,
    /// Transfer started but did not fully connect
    PartialTransfer,
    /// Staff never joined the bridged call
    MissedByStaff,
    /// Staff joined after the hold window
    DelayedJoin,
    /// IVR navigation failed
    IvrFailed,
    /// Telephony provider reported an error
    TelnyxError,
    /// Gave up waiting for a live person
    TimeoutWaitingForHuman,
    /// Callee never answered
    NoAnswer,
    /// Call dropped mid-flight
    Disconnected,
    /// Cancelled by the requesting user
    CancelledByUser,
}

impl CallStatus {
    /// Terminal statuses end the record's lifecycle.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CallStatus::Pending | CallStatus::WaitingForStaff)
    }

    /// Check if a status transition is valid
    ///
    /// Statuses advance monotonically: never back to `Pending`, never out
    /// of a terminal state.
    pub fn can_transition_to(&self, new_status: &CallStatus) -> bool {
        use CallStatus::*;

        match (self, new_status) {
            (Pending, WaitingForStaff) => true,
            (Pending, s) if s.is_terminal() => true,
            (WaitingForStaff, s) if s.is_terminal() => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Pending => "pending",
            CallStatus::WaitingForStaff => "waiting_for_staff",
            CallStatus::Completed => "completed",
            CallStatus::PartialTransfer => "partial_transfer",
            CallStatus::MissedByStaff => "missed_by_staff",
            CallStatus::DelayedJoin => "delayed_join",
            CallStatus::IvrFailed => "ivr_failed",
            CallStatus::TelnyxError => "telnyx_error",
            CallStatus::TimeoutWaitingForHuman => "timeout_waiting_for_human",
            CallStatus::NoAnswer => "no_answer",
            CallStatus::Disconnected => "disconnected",
            CallStatus::CancelledByUser => "cancelled_by_user",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One processed IVR turn: what was heard and what the bot decided to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub timestamp: DateTime<Utc>,
    pub heard: String,
    pub bot_action: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!CallStatus::Pending.is_terminal());
        assert!(!CallStatus::WaitingForStaff.is_terminal());
        assert!(CallStatus::Completed.is_terminal());
        assert!(CallStatus::TelnyxError.is_terminal());
        assert!(CallStatus::CancelledByUser.is_terminal());
    }

    #[test]
    fn test_valid_status_transitions() {
        assert!(CallStatus::Pending.can_transition_to(&CallStatus::WaitingForStaff));
        assert!(CallStatus::Pending.can_transition_to(&CallStatus::NoAnswer));
        assert!(CallStatus::WaitingForStaff.can_transition_to(&CallStatus::Completed));
        assert!(CallStatus::WaitingForStaff.can_transition_to(&CallStatus::MissedByStaff));
    }

    #[test]
    fn test_invalid_status_transitions() {
        // No way back to pending, no way into waiting twice
        assert!(!CallStatus::WaitingForStaff.can_transition_to(&CallStatus::Pending));
        assert!(!CallStatus::WaitingForStaff.can_transition_to(&CallStatus::WaitingForStaff));
        // Terminal states are final
        assert!(!CallStatus::Completed.can_transition_to(&CallStatus::Pending));
        assert!(!CallStatus::Completed.can_transition_to(&CallStatus::Disconnected));
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&CallStatus::TimeoutWaitingForHuman).unwrap(),
            "\"timeout_waiting_for_human\""
        );
        assert_eq!(
            serde_json::from_str::<CallStatus>("\"telnyx_error\"").unwrap(),
            CallStatus::TelnyxError
        );
    }
}
