//! Data models for the notifications domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use validator::Validate;

// ============================================================================
// Submission Records
// ============================================================================

/// Which form a submission came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    /// General contact form.
    Contact,
    /// Partnership inquiry form.
    Partnership,
    /// Quote request form.
    Quote,
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionKind::Contact => write!(f, "contact"),
            SubmissionKind::Partnership => write!(f, "partnership"),
            SubmissionKind::Quote => write!(f, "quote"),
        }
    }
}

/// Who a composed message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Internal admin inbox.
    Admin,
    /// The person who filled in the form.
    Submitter,
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::Admin => write!(f, "admin"),
            Audience::Submitter => write!(f, "submitter"),
        }
    }
}

/// Common view over the three submission records.
pub trait Submission {
    /// Form the record came from.
    fn kind(&self) -> SubmissionKind;

    /// Address the confirmation goes to.
    fn submitter_email(&self) -> &str;
}

/// Contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactSubmission {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

impl ContactSubmission {
    /// Subject used when the submitter left it empty.
    pub const DEFAULT_SUBJECT: &'static str = "General Inquiry";

    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            subject: None,
            message: message.into(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Subject line chosen by the submitter, or the default.
    pub fn subject_or_default(&self) -> &str {
        present(&self.subject).unwrap_or(Self::DEFAULT_SUBJECT)
    }
}

impl Submission for ContactSubmission {
    fn kind(&self) -> SubmissionKind {
        SubmissionKind::Contact
    }

    fn submitter_email(&self) -> &str {
        &self.email
    }
}

/// Partnership inquiry submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PartnerSubmission {
    #[validate(length(min = 1, message = "company name is required"))]
    pub company_name: String,
    #[validate(length(min = 1, message = "contact person is required"))]
    pub contact_person: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Slug such as `tech-partner`.
    #[validate(length(min = 1, message = "business type is required"))]
    pub business_type: String,
    /// Company description.
    #[validate(length(min = 1, message = "description is required"))]
    pub message: String,
}

impl PartnerSubmission {
    /// Display form of `business_type`.
    pub fn business_type_label(&self) -> String {
        humanize_slug(&self.business_type)
    }
}

impl Submission for PartnerSubmission {
    fn kind(&self) -> SubmissionKind {
        SubmissionKind::Partnership
    }

    fn submitter_email(&self) -> &str {
        &self.email
    }
}

/// Quote request submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteSubmission {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// Slug such as `web-development`.
    #[validate(length(min = 1, message = "service type is required"))]
    pub service_type: String,
    #[serde(default)]
    pub project_budget: Option<String>,
    #[serde(default)]
    pub project_timeline: Option<String>,
    #[serde(default)]
    pub project_description: Option<String>,
}

impl QuoteSubmission {
    pub fn new(name: impl Into<String>, email: impl Into<String>, service_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            company: None,
            service_type: service_type.into(),
            project_budget: None,
            project_timeline: None,
            project_description: None,
        }
    }

    /// Display form of `service_type`.
    pub fn service_label(&self) -> String {
        humanize_slug(&self.service_type)
    }
}

impl Submission for QuoteSubmission {
    fn kind(&self) -> SubmissionKind {
        SubmissionKind::Quote
    }

    fn submitter_email(&self) -> &str {
        &self.email
    }
}

/// Value of an optional form field, treating blank input as absent.
pub fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Turn a slug into a display label: `web-development` becomes `Web Development`.
pub fn humanize_slug(slug: &str) -> String {
    slug.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Outbound Message
// ============================================================================

/// Ordered list of addresses, built from a single address or a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList(Vec<String>);

impl AddressList {
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for AddressList {
    fn from(address: &str) -> Self {
        Self(vec![address.to_string()])
    }
}

impl From<String> for AddressList {
    fn from(address: String) -> Self {
        Self(vec![address])
    }
}

impl From<Vec<String>> for AddressList {
    fn from(addresses: Vec<String>) -> Self {
        Self(addresses)
    }
}

impl From<Vec<&str>> for AddressList {
    fn from(addresses: Vec<&str>) -> Self {
        Self(addresses.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for AddressList {
    fn from(addresses: &[&str]) -> Self {
        Self(addresses.iter().map(|a| a.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AddressList {
    fn from(addresses: [&str; N]) -> Self {
        Self(addresses.iter().map(|a| a.to_string()).collect())
    }
}

/// A file to attach, optionally under a different display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    Path(PathBuf),
    Named { path: PathBuf, name: String },
}

impl Attachment {
    pub fn path(&self) -> &Path {
        match self {
            Attachment::Path(path) | Attachment::Named { path, .. } => path,
        }
    }

    /// Name shown to the recipient.
    pub fn display_name(&self) -> String {
        match self {
            Attachment::Named { name, .. } if !name.trim().is_empty() => name.clone(),
            _ => self
                .path()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string()),
        }
    }
}

impl From<&str> for Attachment {
    fn from(path: &str) -> Self {
        Attachment::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for Attachment {
    fn from(path: PathBuf) -> Self {
        Attachment::Path(path)
    }
}

impl From<(&str, &str)> for Attachment {
    fn from((path, name): (&str, &str)) -> Self {
        Attachment::Named {
            path: PathBuf::from(path),
            name: name.to_string(),
        }
    }
}

impl From<(PathBuf, String)> for Attachment {
    fn from((path, name): (PathBuf, String)) -> Self {
        Attachment::Named { path, name }
    }
}

/// A fully composed message, built fresh for a single send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Primary recipient.
    pub to: String,
    pub subject: String,
    /// Plain text body; the alternative part when HTML is present.
    pub text_body: String,
    pub html_body: Option<String>,
    pub cc: Vec<String>,
    pub attachments: Vec<Attachment>,
}

impl OutboundMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text_body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text_body: text_body.into(),
            html_body: None,
            cc: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn with_html(mut self, html_body: impl Into<String>) -> Self {
        self.html_body = Some(html_body.into());
        self
    }

    /// Add CC recipients, one address or several.
    pub fn with_cc(mut self, cc: impl Into<AddressList>) -> Self {
        self.cc.extend(cc.into().into_vec());
        self
    }

    pub fn with_attachment(mut self, attachment: impl Into<Attachment>) -> Self {
        self.attachments.push(attachment.into());
        self
    }

    pub fn is_html(&self) -> bool {
        self.html_body.is_some()
    }
}
