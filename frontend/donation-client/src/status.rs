use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    api::Backend,
    types::DonationStatus,
    view::{DonationView, Region},
};

pub const STATUS_PROMPT: &str = "Enter a reference to check status";
pub const STATUS_NOT_FOUND: &str = "Not found or server error";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StatusOutcome {
    /// Blank reference; nothing was sent.
    Prompted,
    NotFound,
    Found(DonationStatus),
    Failed(String),
}

/// One-shot lookup of a donation by reference code.
pub struct StatusChecker {
    backend: Backend,
    view: Arc<dyn DonationView>,
}

impl StatusChecker {
    pub fn new(backend: Backend, view: Arc<dyn DonationView>) -> Self {
        Self { backend, view }
    }

    pub async fn check(&self, reference: &str) -> StatusOutcome {
        let reference = reference.trim();
        if reference.is_empty() {
            self.view.set_text(Region::StatusResult, STATUS_PROMPT);
            return StatusOutcome::Prompted;
        }

        self.view.set_text(Region::StatusResult, "Checking...");

        let outcome = match self.backend.donation_status(reference).await {
            Ok(response) if !response.is_success() => {
                warn!(reference, status = response.status().as_u16(), "Status lookup refused");
                StatusOutcome::NotFound
            }
            Ok(response) => match response.decode::<DonationStatus>() {
                Ok(status) => StatusOutcome::Found(status),
                Err(e) => StatusOutcome::Failed(e.to_string()),
            },
            Err(e) => StatusOutcome::Failed(e.to_string()),
        };

        let text = match &outcome {
            StatusOutcome::Found(status) => {
                info!(reference, status = %status.status, "Donation status fetched");
                describe(status)
            }
            StatusOutcome::NotFound => STATUS_NOT_FOUND.to_string(),
            StatusOutcome::Failed(cause) => {
                warn!(reference, error = %cause, "Status lookup failed");
                format!("Network error: {cause}")
            }
            StatusOutcome::Prompted => STATUS_PROMPT.to_string(),
        };
        self.view.set_text(Region::StatusResult, &text);

        outcome
    }
}

fn describe(status: &DonationStatus) -> String {
    let mut text = format!("Status: {}", status.status);
    if status.is_paid() {
        let approver = status
            .approved_by
            .as_deref()
            .filter(|who| !who.is_empty())
            .unwrap_or("admin");
        text.push_str(&format!("\nApproved by: {approver}"));
        if let Some(at) = status.approved_at.as_deref().filter(|at| !at.is_empty()) {
            text.push_str(&format!(" at {at}"));
        }
    }
    text
}
