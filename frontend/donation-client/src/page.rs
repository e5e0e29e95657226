use std::sync::Arc;

use tracing::info;

use crate::{
    api::Backend,
    banks::{BankAccountLister, BankListing},
    config::Config,
    error::ClientError,
    status::StatusChecker,
    submission::SubmissionController,
    view::DonationView,
};

/// One loaded donation page: bank list fetched, form and status widget armed.
///
/// The submission controller, and with it the idempotency key, lives exactly
/// as long as the page.
pub struct DonationPage {
    banks: BankListing,
    submission: SubmissionController,
    status: StatusChecker,
}

impl DonationPage {
    pub async fn load(config: &Config, view: Arc<dyn DonationView>) -> Result<Self, ClientError> {
        let backend = Backend::new(config)?;
        Ok(Self::load_with(backend, view).await)
    }

    pub async fn load_with(backend: Backend, view: Arc<dyn DonationView>) -> Self {
        info!(backend = %backend.base_url(), "Loading donation page");

        let banks = BankAccountLister::new(backend.clone(), Arc::clone(&view))
            .load()
            .await;

        Self {
            banks,
            submission: SubmissionController::new(backend.clone(), Arc::clone(&view)),
            status: StatusChecker::new(backend, view),
        }
    }

    pub fn banks(&self) -> &BankListing {
        &self.banks
    }

    pub fn submission(&self) -> &SubmissionController {
        &self.submission
    }

    pub fn status(&self) -> &StatusChecker {
        &self.status
    }
}
