use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    api::Backend,
    types::BankAccount,
    view::{DonationView, Region},
};

pub const BANKS_HEADING: &str = "Bank Transfer Details";
pub const BANKS_UNAVAILABLE: &str = "Unable to fetch bank transfer details.";
pub const BANKS_EMPTY: &str = "No bank transfer details available at the moment.";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BankListing {
    Loaded(Vec<BankAccount>),
    Empty,
    /// Backend refused or the call failed; the message is already rendered.
    Unavailable(String),
}

impl BankListing {
    pub fn accounts(&self) -> &[BankAccount] {
        match self {
            BankListing::Loaded(accounts) => accounts,
            BankListing::Empty | BankListing::Unavailable(_) => &[],
        }
    }
}

/// Fills the bank transfer container. The container is never left blank.
pub struct BankAccountLister {
    backend: Backend,
    view: Arc<dyn DonationView>,
}

impl BankAccountLister {
    pub fn new(backend: Backend, view: Arc<dyn DonationView>) -> Self {
        Self { backend, view }
    }

    pub async fn load(&self) -> BankListing {
        let listing = self.fetch().await;

        match &listing {
            BankListing::Loaded(accounts) => {
                info!(count = accounts.len(), "Bank accounts loaded");
                self.view.set_text(Region::BankAccounts, BANKS_HEADING);
                self.view.render_bank_accounts(accounts);
            }
            BankListing::Empty => {
                info!("No bank accounts published");
                self.view.set_text(Region::BankAccounts, BANKS_EMPTY);
            }
            BankListing::Unavailable(message) => {
                self.view.set_text(Region::BankAccounts, message);
            }
        }

        listing
    }

    async fn fetch(&self) -> BankListing {
        let response = match self.backend.list_bank_accounts().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Bank account request failed");
                return BankListing::Unavailable(format!("Error loading bank accounts: {e}"));
            }
        };

        if !response.is_success() {
            warn!(status = response.status().as_u16(), "Bank accounts refused");
            return BankListing::Unavailable(BANKS_UNAVAILABLE.to_string());
        }

        // `null` is treated like an empty list.
        match response.decode::<Option<Vec<BankAccount>>>() {
            Ok(Some(accounts)) if !accounts.is_empty() => BankListing::Loaded(accounts),
            Ok(_) => BankListing::Empty,
            Err(e) => {
                warn!(error = %e, "Bank account list unreadable");
                BankListing::Unavailable(format!("Error loading bank accounts: {e}"))
            }
        }
    }
}
