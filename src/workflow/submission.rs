use tracing::{debug, warn};

use crate::domain::ticket::{SanitizedTicket, TicketDraft, TicketField};
use crate::domain::validation::{sanitize, validate};
use crate::error::SubmitError;
use crate::services::{IntakeReceipt, IntakeService};

pub const SUCCESS_MESSAGE: &str = "Ticket submitted successfully!";
pub const CONSTRAINT_MESSAGE: &str =
    "Database constraint error. Please check that all values are valid.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Error submitting ticket. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    /// Banner text for the current state, if there is one to show.
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionState::Succeeded => Some(SUCCESS_MESSAGE),
            SubmissionState::Failed(message) => Some(message),
            SubmissionState::Idle | SubmissionState::Submitting => None,
        }
    }

    /// The submit control should be disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    Edit { field: TicketField, value: String },
    Submit,
    Resolved {
        generation: u64,
        outcome: Result<IntakeReceipt, SubmitError>,
    },
}

/// The one outbound request a `Submit` asks the caller to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub generation: u64,
    pub ticket: SanitizedTicket,
}

/// Owns the draft and the submission lifecycle. All changes go through
/// `dispatch`.
#[derive(Debug)]
pub struct SubmissionController {
    draft: TicketDraft,
    state: SubmissionState,
    next_generation: u64,
    in_flight: Option<u64>,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::with_draft(TicketDraft::default())
    }

    pub fn with_draft(draft: TicketDraft) -> Self {
        Self {
            draft,
            state: SubmissionState::Idle,
            next_generation: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn draft(&self) -> &TicketDraft {
        &self.draft
    }

    /// Applies one event. Returns the request to issue when a submit passes
    /// validation; every other event returns `None`.
    pub fn dispatch(&mut self, event: Event) -> Option<PendingSubmission> {
        match event {
            Event::Edit { field, value } => {
                self.draft.set(field, value);
                None
            }
            Event::Submit => self.begin(),
            Event::Resolved {
                generation,
                outcome,
            } => {
                self.resolve(generation, outcome);
                None
            }
        }
    }

    /// Runs a full sanitize, validate, submit cycle against `intake`.
    ///
    /// The returned future must be driven to completion. Dropping it while the
    /// request is pending leaves the controller in `Submitting`, and every
    /// later `Submit` is ignored.
    pub async fn submit(&mut self, intake: &dyn IntakeService) -> &SubmissionState {
        if let Some(pending) = self.dispatch(Event::Submit) {
            let outcome = intake.submit_ticket(&pending.ticket).await;
            self.dispatch(Event::Resolved {
                generation: pending.generation,
                outcome,
            });
        }
        &self.state
    }

    fn begin(&mut self) -> Option<PendingSubmission> {
        if self.state.is_submitting() {
            debug!("submit ignored: a submission is already in flight");
            return None;
        }

        let ticket = sanitize(&self.draft);
        let validation = validate(&ticket);
        if !validation.is_valid() {
            let error = SubmitError::Validation(validation.into_errors());
            debug!(%error, "draft rejected before submission");
            self.transition(SubmissionState::Failed(failure_message(&error)));
            return None;
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        self.in_flight = Some(generation);
        self.transition(SubmissionState::Submitting);

        Some(PendingSubmission { generation, ticket })
    }

    fn resolve(&mut self, generation: u64, outcome: Result<IntakeReceipt, SubmitError>) {
        if self.in_flight != Some(generation) {
            warn!(
                generation,
                in_flight = ?self.in_flight,
                "discarding stale submission response"
            );
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(receipt) => {
                debug!(status = receipt.status, "ticket accepted");
                self.draft.clear();
                self.transition(SubmissionState::Succeeded);
            }
            Err(error) => {
                warn!(%error, "ticket submission failed");
                self.transition(SubmissionState::Failed(failure_message(&error)));
            }
        }
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!(from = ?self.state, to = ?next, "submission state change");
        self.state = next;
    }
}

/// Picks the user-facing text for a failed submission. First match wins:
/// a server-provided message, then anything mentioning a constraint, then a
/// generic fallback.
pub fn failure_message(error: &SubmitError) -> String {
    if let SubmitError::Validation(errors) = error {
        return format!("Validation Error: {}", errors.join(", "));
    }
    if let Some(message) = error.server_message() {
        return format!("Error: {message}");
    }
    if error.to_string().contains("constraint") {
        return CONSTRAINT_MESSAGE.to_string();
    }
    GENERIC_FAILURE_MESSAGE.to_string()
}
