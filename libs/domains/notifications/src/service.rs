//! Mailer: composes submission emails and hands them to a provider.

use crate::error::{NotificationError, NotificationResult};
use crate::models::{
    Audience, ContactSubmission, OutboundMessage, PartnerSubmission, QuoteSubmission, Submission, SubmissionKind,
};
use crate::providers::{EmailProvider, SentEmail, SmtpProvider};
use crate::templates::{RenderedEmail, TemplateEngine};
use chrono::{Local, NaiveDateTime};
use core_config::{FromEnv, SmtpConfig};
use lettre::message::Mailbox;
use tracing::{error, info, warn};

/// Sends admin notifications and submitter confirmations for form submissions.
///
/// Each operation composes one message and makes a single delivery attempt.
/// Failures are logged with the submission kind and audience before being
/// returned; the caller decides what the user sees.
pub struct Mailer<P = SmtpProvider> {
    provider: P,
    templates: TemplateEngine,
    admin_email: String,
}

impl Mailer<SmtpProvider> {
    /// Create a mailer delivering over SMTP.
    pub fn new(config: &SmtpConfig) -> NotificationResult<Self> {
        let provider = SmtpProvider::new(config.clone())?;
        Self::with_provider(config, provider)
    }

    /// Resolve the SMTP configuration from the environment and create a mailer.
    pub fn from_env() -> NotificationResult<Self> {
        let config = SmtpConfig::from_env()?;
        Self::new(&config)
    }
}

impl<P: EmailProvider> Mailer<P> {
    /// Create a mailer with a custom provider. The configuration is still
    /// validated so a missing credential or a bad admin address fails here,
    /// not at send time.
    pub fn with_provider(config: &SmtpConfig, provider: P) -> NotificationResult<Self> {
        config.validate()?;

        let admin_email = config.admin_email.trim();
        admin_email.parse::<Mailbox>().map_err(|e| {
            NotificationError::Configuration(format!("Invalid admin address '{}': {}", admin_email, e))
        })?;
        if config.uses_fallback_admin() {
            warn!(admin_email, "ADMIN_EMAIL not set, admin notifications go to the fallback address");
        }

        Ok(Self {
            provider,
            templates: TemplateEngine::new(config.from_name.clone())?,
            admin_email: admin_email.to_string(),
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Address admin notifications go to.
    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Send a fully composed message.
    pub async fn send_email(&self, message: OutboundMessage) -> NotificationResult<SentEmail> {
        self.provider.send(&message).await
    }

    pub async fn notify_contact_admin(&self, submission: &ContactSubmission) -> NotificationResult<SentEmail> {
        let rendered = self.templates.render_contact_admin(submission, &now());
        self.dispatch(submission, Audience::Admin, rendered).await
    }

    pub async fn confirm_contact_user(&self, submission: &ContactSubmission) -> NotificationResult<SentEmail> {
        let rendered = self.templates.render_contact_confirmation(submission, &now());
        self.dispatch(submission, Audience::Submitter, rendered).await
    }

    pub async fn notify_partner_admin(&self, submission: &PartnerSubmission) -> NotificationResult<SentEmail> {
        let rendered = self.templates.render_partner_admin(submission, &now());
        self.dispatch(submission, Audience::Admin, rendered).await
    }

    pub async fn confirm_partner_user(&self, submission: &PartnerSubmission) -> NotificationResult<SentEmail> {
        let rendered = self.templates.render_partner_confirmation(submission, &now());
        self.dispatch(submission, Audience::Submitter, rendered).await
    }

    pub async fn notify_quote_admin(&self, submission: &QuoteSubmission) -> NotificationResult<SentEmail> {
        let rendered = self.templates.render_quote_admin(submission, &now());
        self.dispatch(submission, Audience::Admin, rendered).await
    }

    pub async fn confirm_quote_user(&self, submission: &QuoteSubmission) -> NotificationResult<SentEmail> {
        let rendered = self.templates.render_quote_confirmation(submission, &now());
        self.dispatch(submission, Audience::Submitter, rendered).await
    }

    async fn dispatch(
        &self,
        submission: &impl Submission,
        audience: Audience,
        rendered: NotificationResult<RenderedEmail>,
    ) -> NotificationResult<SentEmail> {
        let kind = submission.kind();
        let to = match audience {
            Audience::Admin => self.admin_email.as_str(),
            Audience::Submitter => submission.submitter_email(),
        };

        let result = match rendered {
            Ok(rendered) => {
                let message = OutboundMessage::new(to, rendered.subject, rendered.text).with_html(rendered.html);
                self.provider.send(&message).await
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(sent) => info!(
                submission = %kind,
                audience = %audience,
                to = %to,
                provider = self.provider.name(),
                message_id = ?sent.message_id,
                "Submission email sent"
            ),
            Err(e) => log_failure(kind, audience, to, e),
        }

        result
    }
}

fn log_failure(kind: SubmissionKind, audience: Audience, to: &str, err: &NotificationError) {
    error!(
        submission = %kind,
        audience = %audience,
        to = %to,
        error = %err,
        "Failed to send submission email"
    );
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
