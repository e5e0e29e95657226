//! Client side of the CDS donation flow.
//!
//! Three independent widgets share one backend and one [`DonationView`]:
//!
//! - [`SubmissionController`] posts a donation with its proof of payment and
//!   guards against submitting the same donation twice.
//! - [`BankAccountLister`] fetches the bank transfer targets once per page.
//! - [`StatusChecker`] looks up a donation by reference code.
//!
//! [`DonationPage`] wires them together for one page lifetime.

pub mod api;
pub mod banks;
pub mod config;
pub mod error;
pub mod page;
pub mod status;
pub mod submission;
pub mod types;
pub mod view;

#[cfg(test)]
mod test_banks;
#[cfg(test)]
mod test_status;

pub use api::Backend;
pub use banks::{BankAccountLister, BankListing};
pub use config::Config;
pub use error::{ClientError, ConfigError};
pub use page::DonationPage;
pub use status::{StatusChecker, StatusOutcome};
pub use submission::{SubmissionController, SubmissionState, SubmitError, SubmitOutcome};
pub use types::{BankAccount, DonationForm, DonationReceipt, DonationStatus, ProofFile};
pub use view::{DonationView, Loading, Region, SubmitControl};
