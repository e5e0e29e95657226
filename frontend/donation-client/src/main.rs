use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cds_donation_client::{
    Config, DonationForm, DonationPage, ProofFile, StatusOutcome, SubmitOutcome,
};

mod terminal;

use terminal::TerminalView;

#[derive(Parser, Debug)]
#[command(name = "cds-donate", about = "Donate, list bank transfer targets, check donation status")]
struct Cli {
    /// Backend base URL. Overrides BACKEND_URL and DEPLOY_ENV.
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the bank accounts donations can be transferred to.
    Banks,
    /// Submit a donation with its proof of payment.
    Donate(DonateArgs),
    /// Look up a donation by reference code.
    Status { reference: String },
}

#[derive(clap::Args, Debug)]
struct DonateArgs {
    #[arg(long)]
    fullname: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    amount: String,
    /// Id of the bank account the transfer was made to.
    #[arg(long)]
    bank_account: Option<i64>,
    /// Receipt or screenshot of the transfer.
    #[arg(long)]
    proof: Option<PathBuf>,
    #[arg(long, requires = "proof")]
    content_type: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.backend_url.as_deref()).context("configuration")?;
    let page = DonationPage::load(&config, Arc::new(TerminalView))
        .await
        .context("building HTTP client")?;

    let ok = match cli.command {
        Command::Banks => !page.banks().accounts().is_empty(),
        Command::Donate(args) => donate(&page, args).await?,
        Command::Status { reference } => {
            matches!(page.status().check(&reference).await, StatusOutcome::Found(_))
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn donate(page: &DonationPage, args: DonateArgs) -> Result<bool> {
    let proof = match &args.proof {
        Some(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("reading proof file {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "proof".to_string());
            let proof = ProofFile::new(file_name, bytes);
            Some(match args.content_type {
                Some(content_type) => proof.with_content_type(content_type),
                None => proof,
            })
        }
        None => None,
    };

    let form = DonationForm {
        fullname: args.fullname,
        email: args.email,
        phone: args.phone,
        amount: args.amount,
        bank_account_id: args.bank_account,
        proof,
    };

    let controller = page.submission();
    loop {
        match controller.submit(&form).await {
            SubmitOutcome::Succeeded(_) => return Ok(true),
            SubmitOutcome::Conflicted(_) => return Ok(false),
            SubmitOutcome::Failed(_) => {
                if !confirm_retry().await? {
                    return Ok(false);
                }
                info!(idempotency_key = %controller.idempotency_key(), "Retrying donation");
            }
            SubmitOutcome::MissingProof | SubmitOutcome::AlreadySubmitted => return Ok(false),
        }
    }
}

async fn confirm_retry() -> Result<bool> {
    let mut stderr = tokio::io::stderr();
    stderr.write_all(b"Retry? [y/N] ").await?;
    stderr.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("reading answer")?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
