//! Email template rendering engine.
//!
//! Two Handlebars registries share the same templates: the HTML one escapes
//! every interpolated value, the text one renders values verbatim. Each
//! audience has a single data-driven template pair, so the HTML and text
//! bodies always walk the same field list.

mod admin;
mod confirmation;

pub use admin::AdminNotificationData;
pub use confirmation::ConfirmationData;

use crate::error::NotificationResult;
use crate::models::{ContactSubmission, PartnerSubmission, QuoteSubmission};
use chrono::NaiveDateTime;
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;
use tracing::debug;

pub(crate) const NOT_PROVIDED: &str = "Not provided";

const ADMIN_HTML: &str = "admin_html";
const ADMIN_TEXT: &str = "admin_text";
const CONFIRMATION_HTML: &str = "confirmation_html";
const CONFIRMATION_TEXT: &str = "confirmation_text";

const ROW_SHADES: [&str; 2] = ["#ffffff", "#f8f9fa"];

/// Rendered email content.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    /// HTML body content.
    pub html: String,
    /// Plain text body content.
    pub text: String,
    /// Email subject line.
    pub subject: String,
}

/// One label/value row of a details table.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    /// Row background in the HTML table.
    pub shade: &'static str,
}

impl Field {
    /// Build table rows with alternating shades.
    pub fn rows<const N: usize>(rows: [(&'static str, String); N]) -> Vec<Field> {
        rows.into_iter()
            .enumerate()
            .map(|(i, (label, value))| Field {
                label,
                value,
                shade: ROW_SHADES[i % ROW_SHADES.len()],
            })
            .collect()
    }
}

/// Timestamp shown in bodies, e.g. `October 19, 2026 at 3:04 PM`.
pub fn format_submitted_at(at: &NaiveDateTime) -> String {
    at.format("%B %-d, %Y at %-I:%M %p").to_string()
}

handlebars_helper!(nl2br: |s: str| {
    handlebars::html_escape(&s.replace("\r\n", "\n")).replace('\n', "<br>\n")
});

/// Template engine for rendering email templates.
pub struct TemplateEngine {
    html: Handlebars<'static>,
    text: Handlebars<'static>,
    brand: String,
}

impl TemplateEngine {
    /// Create a new template engine with all templates registered.
    pub fn new(brand: impl Into<String>) -> NotificationResult<Self> {
        let mut html = Handlebars::new();
        html.set_strict_mode(true);
        html.register_helper("nl2br", Box::new(nl2br));
        html.register_template_string(ADMIN_HTML, admin::ADMIN_HTML_TEMPLATE)?;
        html.register_template_string(CONFIRMATION_HTML, confirmation::CONFIRMATION_HTML_TEMPLATE)?;

        let mut text = Handlebars::new();
        text.set_strict_mode(true);
        text.register_escape_fn(handlebars::no_escape);
        text.register_template_string(ADMIN_TEXT, admin::ADMIN_TEXT_TEMPLATE)?;
        text.register_template_string(CONFIRMATION_TEXT, confirmation::CONFIRMATION_TEXT_TEMPLATE)?;

        Ok(Self {
            html,
            text,
            brand: brand.into(),
        })
    }

    /// Brand name used in subjects and bodies.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    fn render_admin(&self, data: &AdminNotificationData, subject: String) -> NotificationResult<RenderedEmail> {
        Ok(RenderedEmail {
            html: self.html.render(ADMIN_HTML, data)?,
            text: self.text.render(ADMIN_TEXT, data)?,
            subject,
        })
    }

    fn render_confirmation(&self, data: &ConfirmationData, subject: String) -> NotificationResult<RenderedEmail> {
        Ok(RenderedEmail {
            html: self.html.render(CONFIRMATION_HTML, data)?,
            text: self.text.render(CONFIRMATION_TEXT, data)?,
            subject,
        })
    }

    pub fn render_contact_admin(
        &self,
        submission: &ContactSubmission,
        submitted_at: &NaiveDateTime,
    ) -> NotificationResult<RenderedEmail> {
        debug!(name = %submission.name, "Rendering contact admin notification");
        let data = AdminNotificationData::contact(&self.brand, submission, format_submitted_at(submitted_at));
        self.render_admin(&data, format!("New Contact Form Submission - {}", submission.name))
    }

    pub fn render_contact_confirmation(
        &self,
        submission: &ContactSubmission,
        submitted_at: &NaiveDateTime,
    ) -> NotificationResult<RenderedEmail> {
        debug!(name = %submission.name, "Rendering contact confirmation");
        let data = ConfirmationData::contact(&self.brand, submission, format_submitted_at(submitted_at));
        self.render_confirmation(&data, format!("Thank you for contacting {}", self.brand))
    }

    pub fn render_partner_admin(
        &self,
        submission: &PartnerSubmission,
        submitted_at: &NaiveDateTime,
    ) -> NotificationResult<RenderedEmail> {
        debug!(company = %submission.company_name, "Rendering partnership admin notification");
        let data = AdminNotificationData::partner(&self.brand, submission, format_submitted_at(submitted_at));
        self.render_admin(&data, format!("New Partnership Inquiry - {}", submission.company_name))
    }

    pub fn render_partner_confirmation(
        &self,
        submission: &PartnerSubmission,
        submitted_at: &NaiveDateTime,
    ) -> NotificationResult<RenderedEmail> {
        debug!(company = %submission.company_name, "Rendering partnership confirmation");
        let data = ConfirmationData::partner(&self.brand, submission, format_submitted_at(submitted_at));
        self.render_confirmation(&data, format!("Partnership Inquiry Received - {}", self.brand))
    }

    /// Quote notifications are flagged high priority in both bodies.
    pub fn render_quote_admin(
        &self,
        submission: &QuoteSubmission,
        submitted_at: &NaiveDateTime,
    ) -> NotificationResult<RenderedEmail> {
        debug!(name = %submission.name, service = %submission.service_type, "Rendering quote admin notification");
        let data = AdminNotificationData::quote(&self.brand, submission, format_submitted_at(submitted_at));
        self.render_admin(
            &data,
            format!("New Quote Request - {} ({})", submission.name, submission.service_label()),
        )
    }

    pub fn render_quote_confirmation(
        &self,
        submission: &QuoteSubmission,
        submitted_at: &NaiveDateTime,
    ) -> NotificationResult<RenderedEmail> {
        debug!(name = %submission.name, "Rendering quote confirmation");
        let data = ConfirmationData::quote(&self.brand, submission, format_submitted_at(submitted_at));
        self.render_confirmation(&data, "Quote Request Received - We'll Get Back to You Soon!".to_string())
    }
}
