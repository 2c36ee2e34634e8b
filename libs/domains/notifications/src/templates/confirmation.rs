//! Submitter confirmation: restates the submission and sets expectations.

use super::admin::or_placeholder;
use super::Field;
use crate::models::{ContactSubmission, PartnerSubmission, QuoteSubmission};
use serde::Serialize;

const TO_BE_DISCUSSED: &str = "To be discussed";

/// Data for the confirmation templates.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationData {
    pub brand: String,
    pub title: String,
    pub tagline: String,
    pub greeting_name: String,
    pub paragraphs: Vec<String>,
    pub summary_title: String,
    pub summary: Vec<Field>,
    pub next_steps: Vec<String>,
    pub closing: Option<String>,
    pub signature: String,
}

impl ConfirmationData {
    pub fn contact(brand: &str, submission: &ContactSubmission, submitted_at: String) -> Self {
        Self {
            brand: brand.to_string(),
            title: "Thank You!".to_string(),
            tagline: "We've received your message".to_string(),
            greeting_name: submission.name.clone(),
            paragraphs: vec![
                format!(
                    "Thank you for reaching out to {}. We've received your inquiry and appreciate your interest in our services.",
                    brand
                ),
                "Our team will review your message and get back to you within 24 hours with a detailed response. We're excited about the possibility of working together on your project.".to_string(),
            ],
            summary_title: "Your Inquiry Details".to_string(),
            summary: Field::rows([
                ("Subject", submission.subject_or_default().to_string()),
                ("Submitted", submitted_at),
            ]),
            next_steps: Vec::new(),
            closing: Some(
                "In the meantime, feel free to explore our website to learn more about our services and past projects.".to_string(),
            ),
            signature: format!("The {} Team", brand),
        }
    }

    pub fn partner(brand: &str, submission: &PartnerSubmission, submitted_at: String) -> Self {
        Self {
            brand: brand.to_string(),
            title: "Partnership Inquiry Received".to_string(),
            tagline: "Thank you for your interest in partnering with us".to_string(),
            greeting_name: submission.contact_person.clone(),
            paragraphs: vec![
                format!(
                    "Thank you for expressing interest in a partnership with {}. We're excited about the potential collaboration opportunity with {}.",
                    brand, submission.company_name
                ),
                "Our partnerships team will review your inquiry and get back to you within 2-3 business days to discuss next steps and explore how we can work together.".to_string(),
            ],
            summary_title: "Your Inquiry Summary".to_string(),
            summary: Field::rows([
                ("Company", submission.company_name.clone()),
                ("Partnership Type", submission.business_type_label()),
                ("Submitted", submitted_at),
            ]),
            next_steps: Vec::new(),
            closing: None,
            signature: format!("The {} Partnerships Team", brand),
        }
    }

    pub fn quote(brand: &str, submission: &QuoteSubmission, submitted_at: String) -> Self {
        let service = submission.service_label();
        Self {
            brand: brand.to_string(),
            title: "Quote Request Received!".to_string(),
            tagline: "We're working on your proposal".to_string(),
            greeting_name: submission.name.clone(),
            paragraphs: vec![
                format!(
                    "Thank you for requesting a quote for your {} project. We're excited about the opportunity to work with you!",
                    service
                ),
                "Our team is reviewing your requirements and will provide you with a detailed proposal within 24 hours. We'll include project timeline, cost breakdown, and next steps.".to_string(),
            ],
            summary_title: "Your Quote Request Summary".to_string(),
            summary: Field::rows([
                ("Service", service),
                ("Budget Range", or_placeholder(&submission.project_budget, TO_BE_DISCUSSED)),
                ("Timeline", or_placeholder(&submission.project_timeline, TO_BE_DISCUSSED)),
                ("Submitted", submitted_at),
            ]),
            next_steps: vec![
                "Our experts will analyze your project requirements".to_string(),
                "We'll prepare a customized proposal with detailed pricing".to_string(),
                "You'll receive a comprehensive quote within 24 hours".to_string(),
                "We'll schedule a call to discuss the proposal".to_string(),
            ],
            closing: None,
            signature: format!("The {} Team", brand),
        }
    }
}

pub(super) const CONFIRMATION_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{{title}}</title>
</head>
<body style="margin: 0; padding: 0;">
<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: #0d3269; color: white; padding: 30px; text-align: center;">
    <h1 style="margin: 0; font-size: 28px;">{{title}}</h1>
    <p style="margin: 10px 0 0 0; font-size: 16px;">{{tagline}}</p>
  </div>
  <div style="padding: 40px 30px; background: #f8f9fa;">
    <p style="font-size: 16px; color: #333; margin-bottom: 20px;">Dear {{greeting_name}},</p>
    {{#each paragraphs}}
    <p style="font-size: 16px; color: #333; line-height: 1.6; margin-bottom: 20px;">{{this}}</p>
    {{/each}}
    <div style="background: white; padding: 25px; border-radius: 8px; margin-bottom: 30px;">
      <h3 style="color: #0d3269; margin-bottom: 15px;">{{summary_title}}:</h3>
      {{#each summary}}
      <p style="margin: 5px 0;"><strong>{{label}}:</strong> {{value}}</p>
      {{/each}}
    </div>
    {{#if next_steps}}
    <div style="background: #e8f5e8; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
      <h4 style="color: #155724; margin-bottom: 10px;">What happens next?</h4>
      <ul style="color: #155724; margin: 0; padding-left: 20px;">
        {{#each next_steps}}
        <li>{{this}}</li>
        {{/each}}
      </ul>
    </div>
    {{/if}}
    {{#if closing}}
    <p style="font-size: 16px; color: #333; line-height: 1.6; margin-bottom: 20px;">{{closing}}</p>
    {{/if}}
    <p style="font-size: 16px; color: #333; line-height: 1.6;">
      Best regards,<br>
      <strong>{{signature}}</strong>
    </p>
  </div>
  <div style="background: #0d3269; color: white; padding: 20px; text-align: center; font-size: 14px;">
    <p style="margin: 0;">{{brand}} - Transforming Ideas into Digital Reality</p>
  </div>
</div>
</body>
</html>"#;

pub(super) const CONFIRMATION_TEXT_TEMPLATE: &str = r#"{{title}}
{{tagline}}

Dear {{greeting_name}},

{{#each paragraphs}}
{{this}}

{{/each}}
{{summary_title}}:
{{#each summary}}
{{label}}: {{value}}
{{/each}}

{{#if next_steps}}
What happens next?
{{#each next_steps}}
- {{this}}
{{/each}}

{{/if}}
{{#if closing}}
{{closing}}

{{/if}}
Best regards,
{{signature}}

{{brand}} - Transforming Ideas into Digital Reality"#;
