//! Site Mailer
//!
//! Sends the admin notification and the submitter confirmation for a
//! contact, partnership or quote form submission, and checks SMTP
//! connectivity.

pub mod handler;

use clap::{Args, Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv, SmtpConfig};
use domain_notifications::{EmailProvider, Mailer, MockProvider, OutboundMessage, SubmissionKind};
use eyre::{bail, Result};
use handler::DeliveryReport;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "site-mailer")]
#[command(about = "Send form submission emails for the business site")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Handle a contact form submission
    Contact(SendArgs),

    /// Handle a partnership inquiry
    Partner(SendArgs),

    /// Handle a quote request
    Quote(SendArgs),

    /// Check that the SMTP server accepts our session
    Check,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// JSON file holding the submission
    pub file: PathBuf,

    /// Compose the emails and print them instead of sending
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error if any email fails to send
    #[arg(long)]
    pub strict: bool,
}

impl Commands {
    fn submission(&self) -> Option<(SubmissionKind, &SendArgs)> {
        match self {
            Commands::Contact(args) => Some((SubmissionKind::Contact, args)),
            Commands::Partner(args) => Some((SubmissionKind::Partnership, args)),
            Commands::Quote(args) => Some((SubmissionKind::Quote, args)),
            Commands::Check => None,
        }
    }
}

pub async fn run() -> Result<()> {
    install_color_eyre();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let environment = Environment::from_env();
    let config = SmtpConfig::from_env()?;
    init_tracing(&environment, &config.log_directives());

    info!(?config, "Loaded SMTP configuration");

    match cli.command.submission() {
        Some((kind, args)) => submit(&config, kind, args).await,
        None => check(&config).await,
    }
}

async fn submit(config: &SmtpConfig, kind: SubmissionKind, args: &SendArgs) -> Result<()> {
    let report = if args.dry_run {
        let mailer = Mailer::with_provider(config, MockProvider::new())?;
        let report = handler::handle(&mailer, kind, &args.file).await?;
        for message in mailer.provider().sent_messages().await {
            print_message(&message);
        }
        report
    } else {
        let mailer = Mailer::new(config)?;
        handler::handle(&mailer, kind, &args.file).await?
    };

    finish(report, args.strict)
}

/// Failed emails do not fail the command unless `strict` is set.
pub fn finish(report: DeliveryReport, strict: bool) -> Result<()> {
    if report.is_complete() {
        println!("Submission received: {} emails sent", report.kind);
        return Ok(());
    }

    if strict {
        return report.into_result();
    }

    for failure in report.failures() {
        warn!(submission = %report.kind, error = %failure, "Email not sent");
    }
    println!(
        "Submission received: {} of 2 emails could not be sent",
        report.failures().len()
    );
    Ok(())
}

async fn check(config: &SmtpConfig) -> Result<()> {
    let mailer = Mailer::new(config)?;
    let provider = mailer.provider();
    if provider.health_check().await? {
        println!("{} connection to {}:{} OK", provider.name(), config.host, config.port);
        Ok(())
    } else {
        bail!("{} server at {}:{} did not accept the session", provider.name(), config.host, config.port)
    }
}

fn print_message(message: &OutboundMessage) {
    println!("To: {}", message.to);
    if !message.cc.is_empty() {
        println!("Cc: {}", message.cc.join(", "));
    }
    println!("Subject: {}", message.subject);
    println!();
    println!("{}", message.text_body);
    println!("{}", "-".repeat(72));
}
