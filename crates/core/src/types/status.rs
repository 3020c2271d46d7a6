//! Request status and the approval actions that move it.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a reimbursement request.
///
/// `Pending` is the only state with outgoing transitions; `Approved` and
/// `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Whether no further transition is defined from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        };
        write!(f, "{s}")
    }
}

/// A reviewer's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalAction {
    Approve,
    Reject,
}

impl ApprovalAction {
    /// The status a pending request transitions to under this action.
    #[must_use]
    pub const fn resulting_status(&self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
        }
    }

    /// The wire identifier for this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_the_only_non_terminal_status() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_actions_map_to_terminal_statuses() {
        assert_eq!(
            ApprovalAction::Approve.resulting_status(),
            RequestStatus::Approved
        );
        assert_eq!(
            ApprovalAction::Reject.resulting_status(),
            RequestStatus::Rejected
        );
    }

    #[test]
    fn test_status_serde_matches_wire_casing() {
        // The backend sends statuses capitalized and actions lowercased.
        assert_eq!(
            serde_json::to_string(&RequestStatus::Approved).unwrap(),
            "\"Approved\""
        );
        let status: RequestStatus = serde_json::from_str("\"Pending\"").unwrap();
        assert_eq!(status, RequestStatus::Pending);

        assert_eq!(
            serde_json::to_string(&ApprovalAction::Reject).unwrap(),
            "\"reject\""
        );
    }
}
