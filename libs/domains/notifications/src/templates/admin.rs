//! Admin notification: one field table per submission, plus the free text.

use super::{Field, NOT_PROVIDED};
use crate::models::{present, ContactSubmission, PartnerSubmission, QuoteSubmission};
use serde::Serialize;

pub(super) const NOT_SPECIFIED: &str = "Not specified";
pub(super) const NO_DESCRIPTION: &str = "No description provided";

/// Data for the admin notification templates.
#[derive(Debug, Clone, Serialize)]
pub struct AdminNotificationData {
    pub brand: String,
    pub heading: String,
    pub text_heading: String,
    pub details_title: String,
    pub fields: Vec<Field>,
    pub body_label: String,
    pub body: String,
    pub high_priority: bool,
    pub submitted_at: String,
}

impl AdminNotificationData {
    pub fn contact(brand: &str, submission: &ContactSubmission, submitted_at: String) -> Self {
        Self {
            brand: brand.to_string(),
            heading: "New Contact Form Submission".to_string(),
            text_heading: "New Contact Form Submission".to_string(),
            details_title: "Contact Details".to_string(),
            fields: Field::rows([
                ("Name", submission.name.clone()),
                ("Email", submission.email.clone()),
                ("Phone", or_placeholder(&submission.phone, NOT_PROVIDED)),
                ("Subject", submission.subject_or_default().to_string()),
            ]),
            body_label: "Message".to_string(),
            body: submission.message.clone(),
            high_priority: false,
            submitted_at,
        }
    }

    pub fn partner(brand: &str, submission: &PartnerSubmission, submitted_at: String) -> Self {
        Self {
            brand: brand.to_string(),
            heading: "New Partnership Inquiry".to_string(),
            text_heading: format!("New Partnership Inquiry from {}", submission.company_name),
            details_title: "Partnership Details".to_string(),
            fields: Field::rows([
                ("Company", submission.company_name.clone()),
                ("Contact Person", submission.contact_person.clone()),
                ("Email", submission.email.clone()),
                ("Phone", or_placeholder(&submission.phone, NOT_PROVIDED)),
                ("Partnership Type", submission.business_type_label()),
            ]),
            body_label: "Company Description".to_string(),
            body: submission.message.clone(),
            high_priority: false,
            submitted_at,
        }
    }

    pub fn quote(brand: &str, submission: &QuoteSubmission, submitted_at: String) -> Self {
        Self {
            brand: brand.to_string(),
            heading: "New Quote Request".to_string(),
            text_heading: "NEW QUOTE REQUEST - HIGH PRIORITY".to_string(),
            details_title: "Quote Request Details".to_string(),
            fields: Field::rows([
                ("Name", submission.name.clone()),
                ("Email", submission.email.clone()),
                ("Phone", or_placeholder(&submission.phone, NOT_PROVIDED)),
                ("Company", or_placeholder(&submission.company, NOT_PROVIDED)),
                ("Service", submission.service_label()),
                ("Budget", or_placeholder(&submission.project_budget, NOT_SPECIFIED)),
                ("Timeline", or_placeholder(&submission.project_timeline, NOT_SPECIFIED)),
            ]),
            body_label: "Project Description".to_string(),
            body: or_placeholder(&submission.project_description, NO_DESCRIPTION),
            high_priority: true,
            submitted_at,
        }
    }
}

pub(super) fn or_placeholder(value: &Option<String>, placeholder: &str) -> String {
    present(value).unwrap_or(placeholder).to_string()
}

pub(super) const ADMIN_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{{heading}}</title>
</head>
<body style="margin: 0; padding: 0;">
<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: #0d3269; color: white; padding: 20px; text-align: center;">
    <h2 style="margin: 0;">{{heading}}</h2>
  </div>
  <div style="padding: 30px; background: #f8f9fa;">
    <h3 style="color: #0d3269; margin-bottom: 20px;">{{details_title}}:</h3>
    <table style="width: 100%; border-collapse: collapse; margin-bottom: 20px;">
      {{#each fields}}
      <tr style="background: {{shade}};">
        <td style="padding: 12px; font-weight: bold; border: 1px solid #ddd;">{{label}}:</td>
        <td style="padding: 12px; border: 1px solid #ddd;">{{value}}</td>
      </tr>
      {{/each}}
    </table>
    <h4 style="color: #0d3269; margin-bottom: 10px;">{{body_label}}:</h4>
    <div style="background: white; padding: 15px; border: 1px solid #ddd; border-radius: 5px;">
      {{{nl2br body}}}
    </div>
    {{#if high_priority}}
    <div style="margin-top: 30px; padding: 15px; background: #fff3cd; border-radius: 5px;">
      <p style="margin: 0; font-weight: bold; color: #856404;">&#9889; High Priority: Quote Request</p>
      <p style="margin: 5px 0 0 0; font-style: italic; color: #856404;">Submitted on: {{submitted_at}}</p>
    </div>
    {{else}}
    <div style="margin-top: 30px; padding: 15px; background: #e3f2fd; border-radius: 5px;">
      <p style="margin: 0; font-style: italic;">Submitted on: {{submitted_at}}</p>
    </div>
    {{/if}}
  </div>
</div>
</body>
</html>"#;

pub(super) const ADMIN_TEXT_TEMPLATE: &str = r#"{{text_heading}}
{{#if high_priority}}
High Priority: Quote Request
{{/if}}

{{details_title}}:
{{#each fields}}
{{label}}: {{value}}
{{/each}}

{{body_label}}:
{{body}}

Submitted on: {{submitted_at}}"#;
