// frontend/donation-client/src/submission.rs
//
// Donation form lifecycle.
//
//   Idle ──submit──▶ InFlight ──2xx + reference──▶ Succeeded   (final)
//    ▲                  │ ─────────409──────────▶ Conflicted  (final)
//    │                  └─other / no reference / transport──▶ Failed
//    └──────────────── Failed is re-armed like Idle ◀───────────┘
//
// The idempotency key is created on the first submit and reused by every
// retry from the same controller, so the backend can fold retries together.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;

use reqwest::{
    multipart::{Form, Part},
    StatusCode,
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    api::{ApiResponse, Backend},
    error::ClientError,
    types::{DonationForm, DonationReceipt, ProofFile},
    view::{DonationView, Loading, Region, SubmitControl},
};

pub const ALREADY_SUBMITTED: &str = "This donation has already been submitted.";
pub const MISSING_PROOF: &str = "Please attach a proof of payment file.";

const SUCCESS_FLASH: Duration = Duration::from_millis(1500);
const DUPLICATE_FLASH: Duration = Duration::from_millis(2000);

/// Where the donation form is in its lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmissionState {
    Idle,
    /// Request sent, answer pending. The form is locked.
    InFlight,
    /// Backend accepted the donation. The form stays locked.
    Succeeded,
    /// Backend reported a duplicate. The form stays locked.
    Conflicted,
    /// Last attempt failed; the user may correct the form and retry.
    ///
    /// This is the re-armed `Idle`: it accepts a submit exactly like `Idle`
    /// and only records that an earlier attempt went wrong.
    Failed,
}

impl SubmissionState {
    pub fn accepts_submit(self) -> bool {
        match self {
            SubmissionState::Idle | SubmissionState::Failed => true,
            SubmissionState::InFlight
            | SubmissionState::Succeeded
            | SubmissionState::Conflicted => false,
        }
    }

    pub fn is_final(self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Conflicted)
    }
}

/// Why an attempt failed. Every variant leaves the form open for a retry.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SubmitError {
    /// Non-2xx, non-409 answer.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// 2xx answer without a reference.
    #[error("{0}")]
    Application(String),

    /// The call itself failed or the body could not be read.
    #[error("{0}")]
    Network(String),
}

impl SubmitError {
    fn status_text(&self) -> String {
        match self {
            SubmitError::Rejected { message, .. } | SubmitError::Application(message) => {
                format!("Error: {message}")
            }
            SubmitError::Network(cause) => format!("Network error: {cause}"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    /// Guard tripped; nothing was sent.
    AlreadySubmitted,
    /// No proof file selected; nothing was sent.
    MissingProof,
    Succeeded(DonationReceipt),
    Conflicted(DonationReceipt),
    Failed(SubmitError),
}

/// Owns one donation form for the lifetime of a page.
pub struct SubmissionController {
    backend: Backend,
    view: Arc<dyn DonationView>,
    state: Mutex<SubmissionState>,
    idempotency_key: OnceLock<Uuid>,
}

impl SubmissionController {
    pub fn new(backend: Backend, view: Arc<dyn DonationView>) -> Self {
        Self {
            backend,
            view,
            state: Mutex::new(SubmissionState::Idle),
            idempotency_key: OnceLock::new(),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Key attached to every attempt from this controller.
    pub fn idempotency_key(&self) -> Uuid {
        *self.idempotency_key.get_or_init(Uuid::new_v4)
    }

    /// Submit the donation, render the outcome, and report it.
    ///
    /// At most one request is in flight per controller; calls made while one
    /// is pending, or after a success or duplicate, send nothing.
    pub async fn submit(&self, form: &DonationForm) -> SubmitOutcome {
        let key = self.idempotency_key();

        if let Err(state) = self.lock() {
            warn!(?state, "Donation already submitted, ignoring");
            self.view.alert(ALREADY_SUBMITTED);
            return SubmitOutcome::AlreadySubmitted;
        }

        self.view.set_submit_control(SubmitControl::processing());
        self.view.set_text(Region::Status, "Processing...");
        self.view.set_loading(Loading::Shown("Uploading proof…".to_string()));

        let Some(proof) = form.proof.as_ref() else {
            self.view.set_text(Region::Status, MISSING_PROOF);
            self.view.set_loading(Loading::Hidden);
            self.set_state(SubmissionState::Idle);
            self.view.set_submit_control(SubmitControl::ready());
            return SubmitOutcome::MissingProof;
        };

        let outcome = match multipart(form, proof, key) {
            Ok(body) => {
                info!(idempotency_key = %key, "Submitting donation");
                interpret(self.backend.post_donation(body).await)
            }
            Err(e) => SubmitOutcome::Failed(SubmitError::Application(e.to_string())),
        };

        self.finish(&outcome);
        outcome
    }

    /// Idle/Failed -> InFlight. Returns the blocking state otherwise.
    fn lock(&self) -> Result<(), SubmissionState> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.accepts_submit() {
            return Err(*state);
        }
        *state = SubmissionState::InFlight;
        Ok(())
    }

    fn set_state(&self, next: SubmissionState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    fn finish(&self, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Succeeded(receipt) => {
                self.set_state(SubmissionState::Succeeded);
                let reference = receipt.reference.as_deref().unwrap_or_default();
                info!(reference, "Donation recorded");
                self.view.set_text(
                    Region::Status,
                    &with_message(
                        format!("Donation recorded. Reference: {reference}."),
                        receipt.message.as_deref(),
                    ),
                );
                self.view.set_loading(Loading::Flash {
                    text: "Done".to_string(),
                    duration: SUCCESS_FLASH,
                });
                self.view.set_submit_control(SubmitControl::submitted());
            }
            SubmitOutcome::Conflicted(receipt) => {
                self.set_state(SubmissionState::Conflicted);
                let reference = receipt.reference.as_deref().unwrap_or("unknown");
                warn!(reference, "Duplicate donation detected");
                self.view.set_text(
                    Region::Status,
                    &with_message(
                        format!("Duplicate donation detected. Reference: {reference}."),
                        receipt.message.as_deref(),
                    ),
                );
                self.view.set_loading(Loading::Flash {
                    text: "Duplicate".to_string(),
                    duration: DUPLICATE_FLASH,
                });
                self.view.set_submit_control(SubmitControl::submitted());
            }
            SubmitOutcome::Failed(err) => {
                self.set_state(SubmissionState::Failed);
                error!(error = %err, "Donation submission failed");
                self.view.set_text(Region::Status, &err.status_text());
                self.view.set_loading(Loading::Hidden);
                self.view.set_submit_control(SubmitControl::ready());
            }
            SubmitOutcome::AlreadySubmitted | SubmitOutcome::MissingProof => {}
        }
    }
}

fn interpret(result: Result<ApiResponse, ClientError>) -> SubmitOutcome {
    let response = match result {
        Ok(response) => response,
        Err(e) => return SubmitOutcome::Failed(SubmitError::Network(e.to_string())),
    };

    if response.status() == StatusCode::CONFLICT {
        let receipt = response.decode::<DonationReceipt>().unwrap_or_else(|_| DonationReceipt {
            reference: None,
            message: response.message(),
        });
        return SubmitOutcome::Conflicted(receipt);
    }

    if !response.is_success() {
        return SubmitOutcome::Failed(SubmitError::Rejected {
            status: response.status().as_u16(),
            message: response
                .message()
                .unwrap_or_else(|| "Submission failed".to_string()),
        });
    }

    match response.decode::<DonationReceipt>() {
        Ok(receipt) if receipt.reference.as_deref().is_some_and(|r| !r.is_empty()) => {
            SubmitOutcome::Succeeded(receipt)
        }
        Ok(receipt) => SubmitOutcome::Failed(SubmitError::Application(
            receipt
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Unknown error".to_string()),
        )),
        Err(e) => SubmitOutcome::Failed(SubmitError::Network(e.to_string())),
    }
}

fn multipart(form: &DonationForm, proof: &ProofFile, key: Uuid) -> Result<Form, ClientError> {
    let mut part = Part::bytes(proof.bytes.clone()).file_name(proof.file_name.clone());
    if let Some(content_type) = &proof.content_type {
        part = part
            .mime_str(content_type)
            .map_err(|_| ClientError::InvalidProof(format!("bad content type {content_type:?}")))?;
    }

    let mut body = Form::new()
        .text("fullname", form.fullname.clone())
        .text("email", form.email.clone())
        .text("phone", form.phone.clone())
        .text("amount", form.amount.clone());
    if let Some(id) = form.bank_account_id {
        body = body.text("bank_account_id", id.to_string());
    }

    Ok(body
        .part("proof", part)
        .text("idempotency_key", key.to_string()))
}

fn with_message(head: String, message: Option<&str>) -> String {
    match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(message) => format!("{head} {message}"),
        None => head,
    }
}
