// frontend/donation-client/src/types.rs
//
// Wire types for the donation backend plus the form snapshot read at submit
// time. Responses tolerate extra fields: the status route also returns
// fullname / amount / reference, which the client never shows.

use serde::Deserialize;

/// A bank transfer target offered on the donation form.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct BankAccount {
    pub id: i64,
    pub bank_name: String,
    pub account_name: String,
    #[serde(default)]
    pub account_number: Option<String>,
    /// Free-form label such as "savings" or "current".
    #[serde(default)]
    pub bank_type: Option<String>,
}

impl BankAccount {
    /// One line of the bank choice list.
    pub fn label(&self) -> String {
        let mut line = format!("{} - {}", self.bank_name, self.account_name);
        if let Some(number) = self.account_number.as_deref().filter(|n| !n.is_empty()) {
            line.push_str(" - ");
            line.push_str(number);
        }
        if let Some(kind) = self.bank_type.as_deref().filter(|t| !t.is_empty()) {
            line.push_str(&format!(" ({kind})"));
        }
        line
    }
}

/// Body of both the 2xx and the 409 answer to `POST /donate`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct DonationReceipt {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Snapshot of a donation as the backend currently sees it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct DonationStatus {
    pub status: String,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<String>,
}

impl DonationStatus {
    pub fn is_paid(&self) -> bool {
        self.status == "paid"
    }
}

/// Proof of payment attached to a donation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ProofFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Field values of the donation form at the moment it is submitted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DonationForm {
    pub fullname: String,
    pub email: String,
    pub phone: String,
    /// Sent as typed; the backend owns amount validation.
    pub amount: String,
    pub bank_account_id: Option<i64>,
    pub proof: Option<ProofFile>,
}
