use cds_donation_client::{BankAccount, DonationView, Loading, Region, SubmitControl};

/// Renders the donation page as lines on the terminal.
///
/// Regions go to stdout, each line tagged with its region; loading, button
/// state and alerts go to stderr.
pub struct TerminalView;

fn tagged(region: Region, text: &str) -> String {
    let tag = match region {
        Region::Status => "donation",
        Region::BankAccounts => "banks",
        Region::StatusResult => "lookup",
    };
    text.lines()
        .map(|line| format!("{tag}: {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl DonationView for TerminalView {
    fn set_text(&self, region: Region, text: &str) {
        println!("{}", tagged(region, text));
    }

    fn set_submit_control(&self, control: SubmitControl) {
        let state = if control.enabled { "enabled" } else { "disabled" };
        eprintln!("[{}] ({state})", control.label);
    }

    fn set_loading(&self, loading: Loading) {
        match loading {
            Loading::Shown(text) | Loading::Flash { text, .. } => eprintln!("… {text}"),
            Loading::Hidden => {}
        }
    }

    fn render_bank_accounts(&self, accounts: &[BankAccount]) {
        for account in accounts {
            println!("  [{}] {}", account.id, account.label());
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }
}
