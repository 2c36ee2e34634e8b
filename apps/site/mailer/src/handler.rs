//! Submission handling: load a form payload, validate it, send both emails.

use domain_notifications::{
    ContactSubmission, EmailProvider, Mailer, NotificationError, NotificationResult, PartnerSubmission,
    QuoteSubmission, SentEmail, SubmissionKind,
};
use eyre::{eyre, Result, WrapErr};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{info, warn};
use validator::Validate;

/// Outcome of the two sends triggered by one submission.
#[derive(Debug)]
pub struct DeliveryReport {
    pub kind: SubmissionKind,
    pub admin: NotificationResult<SentEmail>,
    pub confirmation: NotificationResult<SentEmail>,
}

impl DeliveryReport {
    /// Both emails were handed off.
    pub fn is_complete(&self) -> bool {
        self.admin.is_ok() && self.confirmation.is_ok()
    }

    pub fn failures(&self) -> Vec<&NotificationError> {
        [&self.admin, &self.confirmation]
            .into_iter()
            .filter_map(|r| r.as_ref().err())
            .collect()
    }

    /// Turn the first failure into an error.
    pub fn into_result(self) -> Result<()> {
        let kind = self.kind;
        self.admin
            .wrap_err_with(|| format!("{} admin notification failed", kind))?;
        self.confirmation
            .wrap_err_with(|| format!("{} confirmation failed", kind))?;
        Ok(())
    }
}

/// Read a JSON submission from disk and validate it.
pub async fn load_submission<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let raw = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let submission: T = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("Invalid submission JSON in {}", path.display()))?;
    submission
        .validate()
        .map_err(|e| eyre!("Invalid submission in {}: {}", path.display(), e))?;
    Ok(submission)
}

/// Notify the admin, then confirm to the submitter. The confirmation is
/// attempted even when the admin notification fails.
pub async fn handle<P: EmailProvider>(
    mailer: &Mailer<P>,
    kind: SubmissionKind,
    path: &Path,
) -> Result<DeliveryReport> {
    let report = match kind {
        SubmissionKind::Contact => {
            let submission: ContactSubmission = load_submission(path).await?;
            DeliveryReport {
                kind,
                admin: mailer.notify_contact_admin(&submission).await,
                confirmation: mailer.confirm_contact_user(&submission).await,
            }
        }
        SubmissionKind::Partnership => {
            let submission: PartnerSubmission = load_submission(path).await?;
            DeliveryReport {
                kind,
                admin: mailer.notify_partner_admin(&submission).await,
                confirmation: mailer.confirm_partner_user(&submission).await,
            }
        }
        SubmissionKind::Quote => {
            let submission: QuoteSubmission = load_submission(path).await?;
            DeliveryReport {
                kind,
                admin: mailer.notify_quote_admin(&submission).await,
                confirmation: mailer.confirm_quote_user(&submission).await,
            }
        }
    };

    if report.is_complete() {
        info!(submission = %kind, "Submission received, emails sent");
    } else {
        warn!(
            submission = %kind,
            failed = report.failures().len(),
            "Submission received, but some emails were not sent"
        );
    }

    Ok(report)
}
