//! Approval lifecycle engine for reimbursement requests.
//!
//! The state machine itself is small: `Pending -> Approved` under `approve`,
//! `Pending -> Rejected` under `reject`, nothing out of a terminal state.
//! What this module adds on top is the two-phase interaction around it:
//!
//! 1. [`ApprovalWorkflow::stage`] records a tentative decision without
//!    touching remote or local state.
//! 2. [`ApprovalWorkflow::confirm`] either discards the staged intent or
//!    commits it remotely and then - strictly after remote success -
//!    reconciles the one affected cached request.
//!
//! The intent slot is an explicit tagged state
//! (`Idle | Staged | Committing | Failed`), so confirming with nothing
//! staged, staging during a commit, or double-applying a transition are
//! unrepresentable rather than merely checked.

use std::mem;

use tracing::{info, instrument, warn};

use outlay_core::{ApprovalAction, EmployeeId, PermissionLevel, RequestId, RequestStatus};

use crate::api::ApiError;
use crate::api::types::{ApprovalCommand, ApprovalReceipt, ReimbursementRequest};
use crate::authz;

/// Remote commit interface for approval decisions.
///
/// Implemented by [`crate::api::BackendClient`]; tests substitute doubles to
/// observe or fail the commit without HTTP.
#[async_trait::async_trait]
pub trait ApprovalBackend {
    /// Submit one approval decision to the system of record.
    async fn submit_decision(&self, command: &ApprovalCommand)
    -> Result<ApprovalReceipt, ApiError>;
}

/// A tentative decision awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedIntent {
    /// Request the decision targets.
    pub request_id: RequestId,
    /// The chosen action.
    pub action: ApprovalAction,
    /// The reviewer who staged it.
    pub reviewer: EmployeeId,
}

/// The single intent slot.
///
/// The UI supports one in-flight confirmation at a time, so there is exactly
/// one slot and staging over it replaces atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IntentState {
    /// Nothing staged.
    #[default]
    Idle,
    /// A decision is staged, awaiting confirmation.
    Staged(StagedIntent),
    /// The decision is being committed remotely.
    Committing(StagedIntent),
    /// The last commit failed; the intent was discarded.
    Failed {
        /// Why the commit failed.
        reason: String,
    },
}

/// Errors surfaced by the workflow engine.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The request is not in the loaded set.
    #[error("request {0} is not in the loaded set")]
    UnknownRequest(RequestId),

    /// The request is already decided; terminal states have no transitions.
    #[error("request {id} is {status}; only pending requests can be decided")]
    NotActionable {
        /// Target request.
        id: RequestId,
        /// Its terminal status.
        status: RequestStatus,
    },

    /// The reviewer's rank does not carry review authority.
    #[error("permission level {0} does not carry review authority")]
    NotAuthorized(PermissionLevel),

    /// Confirm was called with no staged intent.
    #[error("no decision is staged")]
    NothingStaged,

    /// A commit is already in flight.
    #[error("a commit is already in flight")]
    CommitInFlight,

    /// The remote commit failed; the cache is unchanged.
    #[error("commit failed: {0}")]
    Commit(#[source] ApiError),
}

/// Outcome of a confirmation step.
#[derive(Debug)]
pub enum ConfirmOutcome {
    /// The operator answered no; the staged intent was dropped, nothing
    /// changed anywhere.
    Discarded,
    /// The decision was committed and the local cache reconciled.
    Committed(ApprovalReceipt),
}

/// Drives approval decisions over a cached set of team requests.
///
/// The backend stays the system of record: the cache is reconciled
/// optimistically for the one affected request after a successful commit and
/// left untouched on failure. No global refetch.
#[derive(Debug)]
pub struct ApprovalWorkflow {
    requests: Vec<ReimbursementRequest>,
    intent: IntentState,
}

impl ApprovalWorkflow {
    /// Create a workflow over a fetched set of team requests.
    #[must_use]
    pub const fn new(requests: Vec<ReimbursementRequest>) -> Self {
        Self {
            requests,
            intent: IntentState::Idle,
        }
    }

    /// The cached requests, in fetch order.
    #[must_use]
    pub fn requests(&self) -> &[ReimbursementRequest] {
        &self.requests
    }

    /// Look up one cached request.
    #[must_use]
    pub fn request(&self, id: RequestId) -> Option<&ReimbursementRequest> {
        self.requests.iter().find(|r| r.request_id == id)
    }

    /// The current intent slot.
    #[must_use]
    pub const fn intent(&self) -> &IntentState {
        &self.intent
    }

    /// Replace the cached requests after a refetch. Drops any staged intent;
    /// it referred to the old snapshot.
    pub fn reload(&mut self, requests: Vec<ReimbursementRequest>) {
        self.requests = requests;
        self.intent = IntentState::Idle;
    }

    /// Stage a decision for confirmation.
    ///
    /// Nothing is sent and nothing local changes. Staging while another
    /// intent is staged replaces it; the slot is a single assignment, so the
    /// replacement is atomic.
    ///
    /// # Errors
    ///
    /// Rejects - before any network activity - decisions on unknown
    /// requests, on already-decided requests, from reviewers without
    /// authority, and while a commit is in flight.
    #[instrument(skip(self))]
    pub fn stage(
        &mut self,
        request_id: RequestId,
        action: ApprovalAction,
        reviewer: EmployeeId,
        reviewer_level: PermissionLevel,
    ) -> Result<(), WorkflowError> {
        if matches!(self.intent, IntentState::Committing(_)) {
            return Err(WorkflowError::CommitInFlight);
        }

        if !authz::has_review_authority(reviewer_level) {
            return Err(WorkflowError::NotAuthorized(reviewer_level));
        }

        let request = self
            .request(request_id)
            .ok_or(WorkflowError::UnknownRequest(request_id))?;

        if request.status.is_terminal() {
            return Err(WorkflowError::NotActionable {
                id: request_id,
                status: request.status,
            });
        }

        self.intent = IntentState::Staged(StagedIntent {
            request_id,
            action,
            reviewer,
        });
        Ok(())
    }

    /// Discard a staged (or failed) intent. No effect while a commit is in
    /// flight or when nothing is staged.
    pub fn cancel(&mut self) {
        if !matches!(self.intent, IntentState::Committing(_)) {
            self.intent = IntentState::Idle;
        }
    }

    /// Answer the confirmation step.
    ///
    /// `confirmed == false` discards the staged intent with no effect
    /// anywhere. `confirmed == true` commits the decision remotely; only
    /// after the backend acknowledges it is the one cached request moved to
    /// its new status - never before, and never twice.
    ///
    /// # Errors
    ///
    /// `WorkflowError::NothingStaged` without a staged intent;
    /// `WorkflowError::Commit` when the remote commit fails, in which case
    /// the staged intent is discarded (`Failed` slot) and the cache is left
    /// exactly as it was.
    #[instrument(skip(self, backend))]
    pub async fn confirm(
        &mut self,
        confirmed: bool,
        backend: &impl ApprovalBackend,
    ) -> Result<ConfirmOutcome, WorkflowError> {
        let intent = match mem::take(&mut self.intent) {
            IntentState::Staged(intent) => intent,
            committing @ IntentState::Committing(_) => {
                self.intent = committing;
                return Err(WorkflowError::CommitInFlight);
            }
            other => {
                self.intent = other;
                return Err(WorkflowError::NothingStaged);
            }
        };

        if !confirmed {
            info!(request = %intent.request_id, "Decision discarded at confirmation");
            return Ok(ConfirmOutcome::Discarded);
        }

        self.intent = IntentState::Committing(intent);
        let command = ApprovalCommand {
            request_id: intent.request_id,
            action: intent.action,
            employee_id: intent.reviewer,
        };

        match backend.submit_decision(&command).await {
            Ok(receipt) => {
                // Remote commit succeeded; reconcile the one affected request.
                if let Some(request) = self
                    .requests
                    .iter_mut()
                    .find(|r| r.request_id == intent.request_id)
                {
                    request.status = intent.action.resulting_status();
                }
                info!(
                    request = %intent.request_id,
                    action = %intent.action,
                    "Decision committed"
                );
                self.intent = IntentState::Idle;
                Ok(ConfirmOutcome::Committed(receipt))
            }
            Err(e) => {
                warn!(request = %intent.request_id, error = %e, "Decision commit failed");
                self.intent = IntentState::Failed {
                    reason: e.to_string(),
                };
                Err(WorkflowError::Commit(e))
            }
        }
    }
}
