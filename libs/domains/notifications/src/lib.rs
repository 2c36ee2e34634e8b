//! Notifications Domain
//!
//! Email notifications for the business site's contact, partnership and
//! quote forms.
//!
//! # Features
//!
//! - Admin notification for every submission (quotes flagged high priority)
//! - Confirmation email to the person who submitted the form
//! - HTML and plain-text bodies rendered from the same data
//! - Authenticated, certificate-verified SMTP with a fresh session per send
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Form Handler    │  ← Validates and stores the submission
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │     Mailer      │  ← Renders subject/HTML/text, picks the recipient
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ Email Provider  │  ← SMTP (one session per message) or mock
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use core_config::{FromEnv, SmtpConfig};
//! use domain_notifications::{ContactSubmission, Mailer};
//!
//! let config = SmtpConfig::from_env()?;
//! let mailer = Mailer::new(&config)?;
//!
//! let contact = ContactSubmission::new("Ada Lovelace", "ada@example.com", "Hello");
//! mailer.notify_contact_admin(&contact).await?;
//! mailer.confirm_contact_user(&contact).await?;
//! ```

pub mod error;
pub mod models;
pub mod providers;
pub mod service;
pub mod templates;

// Re-export commonly used types
pub use error::{NotificationError, NotificationResult};
pub use models::{
    AddressList, Attachment, Audience, ContactSubmission, OutboundMessage, PartnerSubmission, QuoteSubmission,
    Submission, SubmissionKind,
};
pub use providers::{EmailProvider, MockProvider, SentEmail, SmtpProvider};
pub use service::Mailer;
pub use templates::{RenderedEmail, TemplateEngine};

/// Name kept for callers that predate [`Mailer`].
pub type HostingerMail = Mailer;
