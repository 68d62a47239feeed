use async_trait::async_trait;

use crate::domain::ticket::SanitizedTicket;
use crate::error::SubmitError;

/// Acknowledgement from the intake endpoint. Only the status is kept; the
/// response body is not needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeReceipt {
    pub status: u16,
}

#[async_trait]
pub trait IntakeService: Send + Sync {
    async fn submit_ticket(&self, ticket: &SanitizedTicket) -> Result<IntakeReceipt, SubmitError>;
}
