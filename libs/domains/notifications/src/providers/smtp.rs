//! SMTP email provider implementation using lettre.
//!
//! Every send builds its own authenticated, TLS-verified session and drops it
//! once the server has answered.

use super::{EmailProvider, SentEmail};
use crate::error::{NotificationError, NotificationResult};
use crate::models::OutboundMessage;
use async_trait::async_trait;
use core_config::{Encryption, SmtpConfig};
use lettre::{
    message::{
        header::{ContentType, Header, HeaderName, HeaderValue, MessageId},
        Attachment as AttachmentPart, Mailbox, MultiPart, SinglePart,
    },
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{Certificate, Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::error::Error as StdError;
use std::sync::Arc;
use tracing::{debug, error, info};

const MAILER_AGENT: &str = "lettre/0.11";

macro_rules! text_header {
    ($ty:ident, $name:literal) => {
        #[derive(Debug, Clone, PartialEq)]
        struct $ty(String);

        impl Header for $ty {
            fn name() -> HeaderName {
                HeaderName::new_from_ascii_str($name)
            }

            fn parse(s: &str) -> Result<Self, Box<dyn StdError + Send + Sync>> {
                Ok(Self(s.to_string()))
            }

            fn display(&self) -> HeaderValue {
                HeaderValue::new(Self::name(), self.0.clone())
            }
        }
    };
}

text_header!(XMailer, "X-Mailer");
text_header!(XPriority, "X-Priority");
text_header!(XMsMailPriority, "X-MSMail-Priority");

/// SMTP email provider.
#[derive(Clone)]
pub struct SmtpProvider {
    config: Arc<SmtpConfig>,
    from: Mailbox,
    reply_to: Option<Mailbox>,
}

impl SmtpProvider {
    /// Create a new SMTP provider. Fails before any network activity when the
    /// credentials are missing or the sender addresses do not parse.
    pub fn new(config: SmtpConfig) -> NotificationResult<Self> {
        config.validate()?;

        let from = Mailbox::new(
            Some(config.from_name.clone()),
            config.from_email().parse().map_err(|e| {
                NotificationError::Configuration(format!(
                    "Invalid sender address '{}': {}",
                    config.from_email(),
                    e
                ))
            })?,
        );

        let reply_to = match config.reply_to.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => Some(Mailbox::new(
                Some(config.from_name.clone()),
                address.parse().map_err(|e| {
                    NotificationError::Configuration(format!("Invalid reply-to address '{}': {}", address, e))
                })?,
            )),
            _ => None,
        };

        Ok(Self {
            config: Arc::new(config),
            from,
            reply_to,
        })
    }

    pub fn config(&self) -> &SmtpConfig {
        &self.config
    }

    /// Build a single-use transport for one message.
    pub async fn build_session(&self) -> NotificationResult<AsyncSmtpTransport<Tokio1Executor>> {
        let config = &self.config;
        check_endpoint(config)?;

        let mut tls = TlsParameters::builder(config.host.clone());
        if let Some(path) = &config.ca_file {
            let pem = tokio::fs::read(path).await.map_err(|e| {
                NotificationError::TransportConfig(format!("Cannot read CA file {}: {}", path.display(), e))
            })?;
            if pem.trim_ascii().is_empty() {
                return Err(NotificationError::TransportConfig(format!(
                    "No certificates found in CA file {}",
                    path.display()
                )));
            }
            // The whole bundle becomes one lettre certificate
            let certificate = Certificate::from_pem(&pem).map_err(|e| {
                NotificationError::TransportConfig(format!("Invalid certificate in {}: {}", path.display(), e))
            })?;
            tls = tls.add_root_certificate(certificate);
        }
        let tls = tls
            .build()
            .map_err(|e| NotificationError::TransportConfig(format!("Failed to set up TLS: {}", e)))?;

        let tls = match config.encryption {
            Encryption::Implicit => Tls::Wrapper(tls),
            Encryption::StartTls => Tls::Required(tls),
        };

        debug!(
            host = %config.host,
            port = config.port,
            encryption = %config.encryption,
            "Built SMTP session"
        );

        Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls)
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .authentication(vec![Mechanism::Plain, Mechanism::Login])
            .build())
    }

    /// Build a lettre Message from an OutboundMessage, reading attachments from disk.
    pub async fn build_message(&self, message: &OutboundMessage) -> NotificationResult<Message> {
        let to: Mailbox = message.to.parse().map_err(|e| {
            NotificationError::Delivery(format!("Invalid recipient address '{}': {}", message.to, e))
        })?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .message_id(None)
            .header(XMailer(format!("{} ({})", MAILER_AGENT, self.config.from_name)))
            .header(XPriority("3".to_string()))
            .header(XMsMailPriority("Normal".to_string()));

        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(reply_to.clone());
        }

        for cc in &message.cc {
            let cc_mailbox: Mailbox = cc
                .parse()
                .map_err(|e| NotificationError::Delivery(format!("Invalid CC address '{}': {}", cc, e)))?;
            builder = builder.cc(cc_mailbox);
        }

        let built = if message.attachments.is_empty() {
            match &message.html_body {
                Some(html) => builder.multipart(MultiPart::alternative_plain_html(
                    message.text_body.clone(),
                    html.clone(),
                )),
                None => builder.singlepart(SinglePart::plain(message.text_body.clone())),
            }
        } else {
            let mut mixed = match &message.html_body {
                Some(html) => MultiPart::mixed().multipart(MultiPart::alternative_plain_html(
                    message.text_body.clone(),
                    html.clone(),
                )),
                None => MultiPart::mixed().singlepart(SinglePart::plain(message.text_body.clone())),
            };

            for attachment in &message.attachments {
                let path = attachment.path();
                let content = tokio::fs::read(path).await.map_err(|e| {
                    NotificationError::Delivery(format!("Cannot read attachment {}: {}", path.display(), e))
                })?;
                let mime = mime_guess::from_path(path).first_or_octet_stream();
                let content_type = ContentType::parse(mime.essence_str()).map_err(|e| {
                    NotificationError::Delivery(format!("Invalid content type for {}: {}", path.display(), e))
                })?;
                mixed = mixed.singlepart(AttachmentPart::new(attachment.display_name()).body(content, content_type));
            }

            builder.multipart(mixed)
        };

        built.map_err(|e| NotificationError::Delivery(format!("Failed to build email message: {}", e)))
    }
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send(&self, message: &OutboundMessage) -> NotificationResult<SentEmail> {
        debug!(
            to = %message.to,
            subject = %message.subject,
            host = %self.config.host,
            port = %self.config.port,
            cc_count = message.cc.len(),
            attachment_count = message.attachments.len(),
            html = message.is_html(),
            "Sending email via SMTP"
        );

        let email = self.build_message(message).await.inspect_err(|e| {
            error!(to = %message.to, error = %e, "Failed to compose email");
        })?;
        let message_id = email
            .headers()
            .get::<MessageId>()
            .map(|id| id.as_ref().to_string());

        let transport = self.build_session().await.inspect_err(|e| {
            error!(host = %self.config.host, port = self.config.port, error = %e, "Failed to build SMTP session");
        })?;

        let response = transport.send(email).await.map_err(|e| {
            error!(
                to = %message.to,
                error = %e,
                "Failed to send email via SMTP"
            );
            NotificationError::Delivery(format!("SMTP send failed: {}", e))
        })?;

        info!(
            to = %message.to,
            message_id = ?message_id,
            response = ?response.message().next(),
            "Email sent successfully via SMTP"
        );

        Ok(SentEmail {
            message_id,
            accepted: true,
        })
    }

    fn name(&self) -> &'static str {
        "SMTP"
    }

    async fn health_check(&self) -> NotificationResult<bool> {
        let transport = self.build_session().await?;
        transport
            .test_connection()
            .await
            .map_err(|e| NotificationError::Delivery(format!("SMTP health check failed: {}", e)))
    }
}

/// Reject endpoints that cannot work before building anything.
fn check_endpoint(config: &SmtpConfig) -> NotificationResult<()> {
    if config.host.trim().is_empty() {
        return Err(NotificationError::TransportConfig("SMTP host is empty".to_string()));
    }
    if config.port == 0 {
        return Err(NotificationError::TransportConfig("SMTP port must be non-zero".to_string()));
    }
    match (config.encryption, config.port) {
        (Encryption::StartTls, 465) => Err(NotificationError::TransportConfig(
            "port 465 expects implicit TLS (SMTP_ENCRYPTION=ssl)".to_string(),
        )),
        (Encryption::Implicit, 587) => Err(NotificationError::TransportConfig(
            "port 587 expects STARTTLS (SMTP_ENCRYPTION=tls)".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config() -> SmtpConfig {
        SmtpConfig::new("info@ideovent.com", "secret")
    }

    fn formatted(message: &Message) -> String {
        String::from_utf8_lossy(&message.formatted()).into_owned()
    }

    #[test]
    fn test_new_requires_credentials() {
        let err = SmtpProvider::new(SmtpConfig::new("", "secret")).err().unwrap();
        assert!(matches!(err, NotificationError::Configuration(_)));

        let err = SmtpProvider::new(SmtpConfig::new("info@ideovent.com", "")).err().unwrap();
        assert!(matches!(err, NotificationError::Configuration(_)));
    }

    #[test]
    fn test_new_rejects_invalid_sender() {
        let err = SmtpProvider::new(SmtpConfig::new("not an address", "secret")).err().unwrap();
        assert!(matches!(err, NotificationError::Configuration(_)));
    }

    #[test]
    fn test_reply_to_omitted_when_blank() {
        let mut config = config();
        config.reply_to = Some("  ".to_string());
        let provider = SmtpProvider::new(config).unwrap();
        assert!(provider.reply_to.is_none());
    }

    #[test]
    fn test_check_endpoint() {
        assert!(check_endpoint(&config()).is_ok());

        let mut starttls = config();
        starttls.encryption = Encryption::StartTls;
        assert!(matches!(check_endpoint(&starttls), Err(NotificationError::TransportConfig(_))));
        starttls.port = 587;
        assert!(check_endpoint(&starttls).is_ok());

        let mut implicit_587 = config();
        implicit_587.port = 587;
        assert!(matches!(check_endpoint(&implicit_587), Err(NotificationError::TransportConfig(_))));

        let mut no_host = config();
        no_host.host = " ".to_string();
        assert!(matches!(check_endpoint(&no_host), Err(NotificationError::TransportConfig(_))));

        let mut no_port = config();
        no_port.port = 0;
        assert!(matches!(check_endpoint(&no_port), Err(NotificationError::TransportConfig(_))));
    }

    #[tokio::test]
    async fn test_build_session_without_network() {
        let provider = SmtpProvider::new(config()).unwrap();
        assert!(provider.build_session().await.is_ok());
    }

    #[tokio::test]
    async fn test_build_session_missing_ca_file() {
        let mut config = config();
        config.ca_file = Some("/nonexistent/ca-bundle.pem".into());
        let provider = SmtpProvider::new(config).unwrap();

        let err = provider.build_session().await.err().unwrap();
        assert!(matches!(err, NotificationError::TransportConfig(_)));
        assert!(err.is_configuration());
    }

    fn provider_with_ca(file: &tempfile::NamedTempFile) -> SmtpProvider {
        let mut config = config();
        config.ca_file = Some(file.path().to_path_buf());
        SmtpProvider::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_build_session_empty_ca_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  ").unwrap();

        let err = provider_with_ca(&file).build_session().await.err().unwrap();
        assert!(matches!(err, NotificationError::TransportConfig(_)));
        assert!(err.to_string().contains("No certificates"));
    }

    #[tokio::test]
    async fn test_build_session_truncated_ca_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "-----BEGIN CERTIFICATE-----\nMIIB").unwrap();

        let err = provider_with_ca(&file).build_session().await.err().unwrap();
        assert!(matches!(err, NotificationError::TransportConfig(_)));
        assert!(err.to_string().contains("Invalid certificate"));
    }

    #[tokio::test]
    async fn test_build_message_headers() {
        let provider = SmtpProvider::new(config()).unwrap();
        let message = OutboundMessage::new("ada@example.com", "Hello", "Plain body");

        let built = formatted(&provider.build_message(&message).await.unwrap());
        assert!(built.contains("X-Priority: 3"));
        assert!(built.contains("X-MSMail-Priority: Normal"));
        assert!(built.contains("X-Mailer: lettre/0.11 (Ideovent Technologies)"));
        assert!(built.contains("Message-ID: <"));
        assert!(built.contains("Reply-To:"));
        assert!(built.contains("info@ideovent.com"));
        assert!(built.contains("text/plain; charset=utf-8"));
        assert!(!built.contains("multipart/alternative"));
    }

    #[tokio::test]
    async fn test_build_message_html_is_alternative() {
        let provider = SmtpProvider::new(config()).unwrap();
        let message = OutboundMessage::new("ada@example.com", "Hello", "Plain body").with_html("<p>Hello</p>");

        let built = formatted(&provider.build_message(&message).await.unwrap());
        assert!(built.contains("multipart/alternative"));
        let text_at = built.find("text/plain").unwrap();
        let html_at = built.find("text/html").unwrap();
        assert!(text_at < html_at);
    }

    #[tokio::test]
    async fn test_build_message_invalid_recipient() {
        let provider = SmtpProvider::new(config()).unwrap();
        let message = OutboundMessage::new("not-an-address", "Hello", "Body");

        let err = provider.build_message(&message).await.unwrap_err();
        assert!(matches!(err, NotificationError::Delivery(_)));
    }
}
