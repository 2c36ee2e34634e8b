use crate::{env_flag, env_optional, env_or_default, env_required, ConfigError, FromEnv};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_SMTP_HOST: &str = "smtp.hostinger.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;
pub const DEFAULT_FROM_NAME: &str = "Ideovent Technologies";
pub const DEFAULT_ADMIN_EMAIL: &str = "acadify.online@gmail.com";

/// Surfaces the SMTP transcript, AUTH exchange included.
pub const TRANSCRIPT_DIRECTIVE: &str = "lettre=trace";

/// lettre writes every protocol line at debug level, so it is held at info
/// unless the transcript is asked for.
pub const QUIET_DIRECTIVE: &str = "lettre=info";

/// How the SMTP connection is encrypted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encryption {
    /// TLS from the first byte (SMTPS, usually port 465).
    #[default]
    Implicit,
    /// Plain connection upgraded with STARTTLS (usually port 587).
    StartTls,
}

impl FromStr for Encryption {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ssl" | "smtps" | "implicit" => Ok(Encryption::Implicit),
            "tls" | "starttls" => Ok(Encryption::StartTls),
            other => Err(ConfigError::ParseError {
                key: "SMTP_ENCRYPTION".to_string(),
                details: format!("unknown encryption mode '{}' (expected ssl or tls)", other),
            }),
        }
    }
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encryption::Implicit => write!(f, "ssl"),
            Encryption::StartTls => write!(f, "tls"),
        }
    }
}

/// SMTP transport configuration, resolved once at startup.
///
/// Reads from environment variables:
/// - `SMTP_HOST` (default `smtp.hostinger.com`)
/// - `SMTP_PORT` (default `465`)
/// - `SMTP_ENCRYPTION`: `ssl` or `tls` (default `ssl`)
/// - `SMTP_USERNAME`, `SMTP_PASSWORD` (required)
/// - `SMTP_FROM_NAME` (default `Ideovent Technologies`)
/// - `ADMIN_EMAIL` (default `acadify.online@gmail.com`)
/// - `SMTP_REPLY_TO` (defaults to the username)
/// - `SMTP_DEBUG`: log the SMTP transcript
/// - `SMTP_CA_FILE`: extra PEM bundle trusted for TLS
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub encryption: Encryption,
    pub username: String,
    pub password: String,
    pub from_name: String,
    pub admin_email: String,
    pub reply_to: Option<String>,
    pub debug: bool,
    pub ca_file: Option<PathBuf>,
}

impl SmtpConfig {
    /// Configuration with defaults for everything but the credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
            encryption: Encryption::default(),
            reply_to: Some(username.clone()),
            username,
            password: password.into(),
            from_name: DEFAULT_FROM_NAME.to_string(),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            debug: false,
            ca_file: None,
        }
    }

    /// Sender address; always the authenticated username.
    pub fn from_email(&self) -> &str {
        &self.username
    }

    /// Whether admin notifications go to the built-in fallback address.
    pub fn uses_fallback_admin(&self) -> bool {
        self.admin_email == DEFAULT_ADMIN_EMAIL
    }

    /// Directives to pass to `init_tracing`. The lettre directive is always
    /// present so `RUST_LOG` cannot enable the transcript on its own.
    pub fn log_directives(&self) -> Vec<String> {
        let directive = if self.debug {
            TRANSCRIPT_DIRECTIVE
        } else {
            QUIET_DIRECTIVE
        };
        vec![directive.to_string()]
    }

    /// Check that the credentials are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar("SMTP_USERNAME".to_string()));
        }
        if self.password.is_empty() {
            return Err(ConfigError::MissingEnvVar("SMTP_PASSWORD".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("encryption", &self.encryption)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from_name", &self.from_name)
            .field("admin_email", &self.admin_email)
            .field("reply_to", &self.reply_to)
            .field("debug", &self.debug)
            .field("ca_file", &self.ca_file)
            .finish()
    }
}

impl FromEnv for SmtpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let username = env_required("SMTP_USERNAME")?;
        let password = env_required("SMTP_PASSWORD")?;

        let port = env_or_default("SMTP_PORT", &DEFAULT_SMTP_PORT.to_string())
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "SMTP_PORT".to_string(),
                details: format!("{}", e),
            })?;

        let encryption = match env_optional("SMTP_ENCRYPTION") {
            Some(value) => value.parse()?,
            None => Encryption::default(),
        };

        let admin_email = env_optional("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());

        let reply_to = env_optional("SMTP_REPLY_TO").or_else(|| Some(username.clone()));

        let config = Self {
            host: env_or_default("SMTP_HOST", DEFAULT_SMTP_HOST),
            port,
            encryption,
            username,
            password,
            from_name: env_or_default("SMTP_FROM_NAME", DEFAULT_FROM_NAME),
            admin_email,
            reply_to,
            debug: env_flag("SMTP_DEBUG"),
            ca_file: env_optional("SMTP_CA_FILE").map(PathBuf::from),
        };
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMTP_VARS: [&str; 10] = [
        "SMTP_HOST",
        "SMTP_PORT",
        "SMTP_ENCRYPTION",
        "SMTP_USERNAME",
        "SMTP_PASSWORD",
        "SMTP_FROM_NAME",
        "ADMIN_EMAIL",
        "SMTP_REPLY_TO",
        "SMTP_DEBUG",
        "SMTP_CA_FILE",
    ];

    fn with_smtp_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let mut all: Vec<(&str, Option<&str>)> = SMTP_VARS.iter().map(|k| (*k, None)).collect();
        for (key, value) in vars {
            if let Some(slot) = all.iter_mut().find(|(k, _)| k == key) {
                slot.1 = Some(*value);
            }
        }
        temp_env::with_vars(all, f);
    }

    #[test]
    fn test_smtp_config_defaults() {
        with_smtp_env(
            &[("SMTP_USERNAME", "info@example.com"), ("SMTP_PASSWORD", "secret")],
            || {
                let config = SmtpConfig::from_env().unwrap();
                assert_eq!(config.host, "smtp.hostinger.com");
                assert_eq!(config.port, 465);
                assert_eq!(config.encryption, Encryption::Implicit);
                assert_eq!(config.from_name, "Ideovent Technologies");
                assert_eq!(config.admin_email, "acadify.online@gmail.com");
                assert!(config.uses_fallback_admin());
                assert_eq!(config.reply_to.as_deref(), Some("info@example.com"));
                assert_eq!(config.from_email(), "info@example.com");
                assert!(!config.debug);
                assert!(config.ca_file.is_none());
            },
        );
    }

    #[test]
    fn test_smtp_config_custom_values() {
        with_smtp_env(
            &[
                ("SMTP_HOST", "mail.example.com"),
                ("SMTP_PORT", "587"),
                ("SMTP_ENCRYPTION", "tls"),
                ("SMTP_USERNAME", "info@example.com"),
                ("SMTP_PASSWORD", "secret"),
                ("SMTP_FROM_NAME", "Example Co"),
                ("ADMIN_EMAIL", "admin@example.com"),
                ("SMTP_REPLY_TO", "hello@example.com"),
                ("SMTP_DEBUG", "1"),
                ("SMTP_CA_FILE", "/etc/ssl/certs/ca-certificates.crt"),
            ],
            || {
                let config = SmtpConfig::from_env().unwrap();
                assert_eq!(config.host, "mail.example.com");
                assert_eq!(config.port, 587);
                assert_eq!(config.encryption, Encryption::StartTls);
                assert_eq!(config.from_name, "Example Co");
                assert_eq!(config.admin_email, "admin@example.com");
                assert_eq!(config.reply_to.as_deref(), Some("hello@example.com"));
                assert!(config.debug);
                assert!(!config.uses_fallback_admin());
                assert_eq!(config.log_directives(), vec!["lettre=trace".to_string()]);
                assert_eq!(
                    config.ca_file,
                    Some(PathBuf::from("/etc/ssl/certs/ca-certificates.crt"))
                );
            },
        );
    }

    #[test]
    fn test_smtp_config_missing_username() {
        with_smtp_env(&[("SMTP_PASSWORD", "secret")], || {
            let err = SmtpConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("SMTP_USERNAME"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_smtp_config_missing_password() {
        with_smtp_env(&[("SMTP_USERNAME", "info@example.com")], || {
            let err = SmtpConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("SMTP_PASSWORD"));
        });
    }

    #[test]
    fn test_smtp_config_blank_credentials_are_missing() {
        with_smtp_env(&[("SMTP_USERNAME", "  "), ("SMTP_PASSWORD", "secret")], || {
            let err = SmtpConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("SMTP_USERNAME"));
        });
    }

    #[test]
    fn test_smtp_config_invalid_port() {
        with_smtp_env(
            &[
                ("SMTP_USERNAME", "info@example.com"),
                ("SMTP_PASSWORD", "secret"),
                ("SMTP_PORT", "smtp"),
            ],
            || {
                let err = SmtpConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("SMTP_PORT"));
            },
        );
    }

    #[test]
    fn test_smtp_config_invalid_encryption() {
        with_smtp_env(
            &[
                ("SMTP_USERNAME", "info@example.com"),
                ("SMTP_PASSWORD", "secret"),
                ("SMTP_ENCRYPTION", "none"),
            ],
            || {
                let err = SmtpConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("SMTP_ENCRYPTION"));
            },
        );
    }

    #[test]
    fn test_encryption_parse_aliases() {
        assert_eq!("SSL".parse::<Encryption>().unwrap(), Encryption::Implicit);
        assert_eq!("smtps".parse::<Encryption>().unwrap(), Encryption::Implicit);
        assert_eq!("starttls".parse::<Encryption>().unwrap(), Encryption::StartTls);
        assert_eq!(Encryption::StartTls.to_string(), "tls");
    }

    #[test]
    fn test_smtp_config_debug_redacts_password() {
        let config = SmtpConfig::new("info@example.com", "hunter2");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_log_directives_follow_debug_flag() {
        let mut config = SmtpConfig::new("info@example.com", "secret");
        assert_eq!(config.log_directives(), vec![QUIET_DIRECTIVE.to_string()]);

        config.debug = true;
        assert_eq!(config.log_directives(), vec![TRANSCRIPT_DIRECTIVE.to_string()]);
    }

    #[test]
    fn test_smtp_config_validate() {
        assert!(SmtpConfig::new("info@example.com", "secret").validate().is_ok());
        assert!(SmtpConfig::new("", "secret").validate().is_err());
        assert!(SmtpConfig::new("info@example.com", "").validate().is_err());
    }
}
