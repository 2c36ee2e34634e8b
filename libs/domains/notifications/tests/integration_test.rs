//! Integration tests for the notifications domain

use core_config::SmtpConfig;
use domain_notifications::{
    ContactSubmission, HostingerMail, Mailer, MockProvider, NotificationError, OutboundMessage, QuoteSubmission,
    SmtpProvider,
};

fn smtp_config() -> SmtpConfig {
    let mut config = SmtpConfig::new("info@ideovent.com", "secret");
    config.admin_email = "admin@ideovent.com".to_string();
    config
}

mod message_building {
    use super::*;
    use lettre::Message;
    use std::io::Write;

    fn formatted(message: &Message) -> String {
        String::from_utf8_lossy(&message.formatted()).into_owned()
    }

    fn cc_line(formatted: &str) -> String {
        formatted
            .lines()
            .find(|line| line.starts_with("Cc:"))
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn test_single_cc() {
        let provider = SmtpProvider::new(smtp_config()).unwrap();
        let message = OutboundMessage::new("ada@example.com", "Hello", "Body").with_cc("b@example.com");

        let built = formatted(&provider.build_message(&message).await.unwrap());
        let cc = cc_line(&built);
        assert!(cc.contains("b@example.com"));
        assert!(!cc.contains("c@example.com"));
    }

    #[tokio::test]
    async fn test_cc_sequence_adds_every_address() {
        let provider = SmtpProvider::new(smtp_config()).unwrap();
        let message = OutboundMessage::new("ada@example.com", "Hello", "Body")
            .with_cc(vec!["b@example.com", "c@example.com"]);

        let built = formatted(&provider.build_message(&message).await.unwrap());
        let cc = cc_line(&built);
        assert!(cc.contains("b@example.com"));
        assert!(cc.contains("c@example.com"));
    }

    #[tokio::test]
    async fn test_attachment_makes_mixed_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.pdf");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"%PDF-1.4 test")
            .unwrap();

        let provider = SmtpProvider::new(smtp_config()).unwrap();
        let message = OutboundMessage::new("ada@example.com", "Brief", "See attached")
            .with_html("<p>See attached</p>")
            .with_attachment((path.clone(), "Project Brief.pdf".to_string()));

        let built = formatted(&provider.build_message(&message).await.unwrap());
        assert!(built.contains("multipart/mixed"));
        assert!(built.contains("multipart/alternative"));
        assert!(built.contains("application/pdf"));
        assert!(built.contains("Project Brief.pdf"));
    }

    #[tokio::test]
    async fn test_unknown_extension_falls_back_to_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.unknownext");
        std::fs::write(&path, b"\x00\x01\x02").unwrap();

        let provider = SmtpProvider::new(smtp_config()).unwrap();
        let message = OutboundMessage::new("ada@example.com", "Data", "Raw data").with_attachment(path);

        let built = formatted(&provider.build_message(&message).await.unwrap());
        assert!(built.contains("application/octet-stream"));
        assert!(built.contains("payload.unknownext"));
    }

    #[tokio::test]
    async fn test_missing_attachment_is_delivery_error() {
        let provider = SmtpProvider::new(smtp_config()).unwrap();
        let message = OutboundMessage::new("ada@example.com", "Brief", "See attached")
            .with_attachment("/nonexistent/brief.pdf");

        let err = provider.build_message(&message).await.unwrap_err();
        assert!(matches!(err, NotificationError::Delivery(_)));
        assert!(err.to_string().contains("brief.pdf"));
    }
}

mod mailer_flow {
    use super::*;

    #[tokio::test]
    async fn test_contact_with_missing_optionals() {
        let mailer = Mailer::with_provider(&smtp_config(), MockProvider::new()).unwrap();
        let contact = ContactSubmission::new("Ada Lovelace", "ada@example.com", "Hello");

        mailer.notify_contact_admin(&contact).await.unwrap();

        let sent = mailer.provider().sent_messages().await;
        assert_eq!(sent.len(), 1);
        let admin = &sent[0];
        assert_eq!(admin.to, "admin@ideovent.com");
        assert_eq!(admin.subject, "New Contact Form Submission - Ada Lovelace");
        assert!(admin.text_body.contains("Phone: Not provided"));
        assert!(admin.text_body.contains("Subject: General Inquiry"));
        assert!(admin.html_body.as_deref().unwrap().contains("Not provided"));
    }

    #[tokio::test]
    async fn test_blank_optionals_render_placeholders() {
        let mailer = Mailer::with_provider(&smtp_config(), MockProvider::new()).unwrap();
        let mut quote = QuoteSubmission::new("Grace Hopper", "grace@example.com", "web-development");
        quote.project_budget = Some("   ".to_string());

        mailer.notify_quote_admin(&quote).await.unwrap();

        let sent = mailer.provider().sent_messages().await;
        assert!(sent[0].text_body.contains("Budget: Not specified"));
        assert!(sent[0].text_body.contains("Service: Web Development"));
        assert!(sent[0].text_body.contains("NEW QUOTE REQUEST - HIGH PRIORITY"));
        assert!(sent[0].html_body.as_deref().unwrap().contains("High Priority: Quote Request"));
    }

    #[tokio::test]
    async fn test_transport_failure_reaches_caller() {
        let mailer = Mailer::with_provider(&smtp_config(), MockProvider::failing("530 must issue STARTTLS")).unwrap();
        let contact = ContactSubmission::new("Ada Lovelace", "ada@example.com", "Hello");

        let err = mailer.confirm_contact_user(&contact).await.unwrap_err();
        assert!(matches!(err, NotificationError::Delivery(_)));
        assert!(err.to_string().contains("530 must issue STARTTLS"));
    }

    #[test]
    fn test_missing_credentials_fail_before_sending() {
        let err = HostingerMail::new(&SmtpConfig::new("", "")).err().unwrap();
        assert!(err.is_configuration());

        let err = Mailer::with_provider(&SmtpConfig::new("info@ideovent.com", ""), MockProvider::new())
            .err()
            .unwrap();
        assert!(matches!(err, NotificationError::Configuration(_)));
    }

    #[test]
    fn test_invalid_admin_address_fails_at_construction() {
        let mut config = smtp_config();
        config.admin_email = "not an address".to_string();

        let err = HostingerMail::new(&config).err().unwrap();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("admin address"));
    }

    #[test]
    fn test_from_env_requires_credentials() {
        temp_env::with_vars_unset(["SMTP_USERNAME", "SMTP_PASSWORD"], || {
            let err = Mailer::from_env().err().unwrap();
            assert!(err.is_configuration());
            assert!(err.to_string().contains("SMTP_USERNAME"));
        });
    }
}
