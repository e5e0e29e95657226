use std::time::Duration;

use crate::types::BankAccount;

pub const PAY_LABEL: &str = "Pay Now";
pub const PROCESSING_LABEL: &str = "processing...";
pub const SUBMITTED_LABEL: &str = "submitted";

/// Named text regions of the donation page.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Region {
    /// Outcome line under the donation form.
    Status,
    /// Container for the bank transfer choices.
    BankAccounts,
    /// Output of the status checker.
    StatusResult,
}

/// State of the donation form's submit button.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

impl SubmitControl {
    pub fn ready() -> Self {
        Self {
            enabled: true,
            label: PAY_LABEL.to_string(),
        }
    }

    pub fn processing() -> Self {
        Self {
            enabled: false,
            label: PROCESSING_LABEL.to_string(),
        }
    }

    pub fn submitted() -> Self {
        Self {
            enabled: false,
            label: SUBMITTED_LABEL.to_string(),
        }
    }
}

/// Loading overlay.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Loading {
    Shown(String),
    /// Shown, then hidden by the view after `duration`.
    Flash { text: String, duration: Duration },
    Hidden,
}

/// Everything the widgets are allowed to do to the page.
///
/// Each call replaces what the region showed before, so re-running a widget
/// overwrites rather than appends.
pub trait DonationView: Send + Sync {
    fn set_text(&self, region: Region, text: &str);

    fn set_submit_control(&self, control: SubmitControl);

    fn set_loading(&self, loading: Loading);

    /// Render `accounts` as selectable choices bound to their ids.
    fn render_bank_accounts(&self, accounts: &[BankAccount]);

    /// Blocking notice for the user.
    fn alert(&self, message: &str);
}
