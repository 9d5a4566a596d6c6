//! Configuration management for the lead capture service.
//!
//! This module handles loading and validating configuration from environment
//! variables, optionally seeded from a `.env` file.

use crate::domain::EmailAddress;
use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default Resend API base URL.
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// Sender identity used for operator notifications.
pub const DEFAULT_MAIL_FROM: &str = "No reply <no-reply@cool2scan.com>";

/// Operators notified of every lead.
pub const DEFAULT_MAIL_TO: &[&str] = &["a.nasseur.dev@gmail.com", "dr.chettouh@gmail.com"];

/// Canonical public URL of the website.
pub const DEFAULT_SITE_URL: &str = "https://dentobridge.com";

/// Sender and recipients of operator notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub from: String,
    pub to: Vec<EmailAddress>,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            from: DEFAULT_MAIL_FROM.to_string(),
            to: DEFAULT_MAIL_TO
                .iter()
                .filter_map(|addr| EmailAddress::new(*addr).ok())
                .collect(),
        }
    }
}

/// Configuration for the lead capture service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Resend API base URL
    pub resend_api_url: String,

    /// Resend API key (secret)
    pub resend_api_key: String,

    /// Notification sender and recipients
    pub mail: MailSettings,

    /// Socket address the HTTP server binds to (default: 0.0.0.0:3000)
    pub bind_address: String,

    /// Public site URL used in the sitemap
    pub site_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `RESEND_API_KEY`: API key for the email provider
    ///
    /// Optional environment variables:
    /// - `RESEND_API_URL`: Provider base URL (default: https://api.resend.com)
    /// - `LEADS_MAIL_FROM`: Sender identity
    /// - `LEADS_MAIL_TO`: Comma-separated operator addresses
    /// - `BIND_ADDRESS`: Listen address (default: 0.0.0.0:3000)
    /// - `SITE_URL`: Public site URL (default: https://dentobridge.com)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let resend_api_key = env::var("RESEND_API_KEY")
            .map_err(|_| ConfigError::MissingVar("RESEND_API_KEY".to_string()))?;

        if resend_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "RESEND_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let resend_api_url =
            env::var("RESEND_API_URL").unwrap_or_else(|_| DEFAULT_RESEND_API_URL.to_string());
        Self::require_http_url("RESEND_API_URL", &resend_api_url)?;

        let site_url = env::var("SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.to_string());
        Self::require_http_url("SITE_URL", &site_url)?;

        let from = env::var("LEADS_MAIL_FROM").unwrap_or_else(|_| DEFAULT_MAIL_FROM.to_string());
        if from.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "LEADS_MAIL_FROM".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let to = match env::var("LEADS_MAIL_TO") {
            Ok(list) => Self::parse_recipients(&list)?,
            Err(_) => MailSettings::default().to,
        };

        let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            resend_api_url,
            resend_api_key,
            mail: MailSettings { from, to },
            bind_address,
            site_url,
            request_timeout,
            log_level,
        })
    }

    fn require_http_url(var: &str, value: &str) -> ConfigResult<()> {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(())
    }

    /// Parse a comma-separated recipient list; every entry must be an address.
    fn parse_recipients(list: &str) -> ConfigResult<Vec<EmailAddress>> {
        let recipients = list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                EmailAddress::new(entry).map_err(|_| ConfigError::InvalidValue {
                    var: "LEADS_MAIL_TO".to_string(),
                    reason: format!("Not an email address: {}", entry),
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        if recipients.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "LEADS_MAIL_TO".to_string(),
                reason: "At least one recipient is required".to_string(),
            });
        }
        Ok(recipients)
    }

    /// Parse an environment variable as a non-zero u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be a positive number, got: {}", val),
                }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
            resend_api_key: String::new(),
            mail: MailSettings::default(),
            bind_address: "0.0.0.0:3000".to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            request_timeout: 10,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const MANAGED_VARS: &[&str] = &[
        "RESEND_API_KEY",
        "RESEND_API_URL",
        "LEADS_MAIL_FROM",
        "LEADS_MAIL_TO",
        "BIND_ADDRESS",
        "SITE_URL",
        "REQUEST_TIMEOUT",
    ];

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        /// Start from a clean slate so a developer's `.env` cannot leak in.
        fn new() -> Self {
            let _ = dotenvy::dotenv();
            for var in MANAGED_VARS {
                env::remove_var(var);
            }
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.resend_api_url, "https://api.resend.com");
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.mail.from, "No reply <no-reply@cool2scan.com>");
        assert_eq!(config.mail.to.len(), 2);
    }

    #[test]
    #[serial]
    fn test_config_from_env_missing_key() {
        let _guard = EnvGuard::new();

        // from_env() would reload `.env`, so check the lookup it performs.
        let result = env::var("RESEND_API_KEY")
            .map_err(|_| ConfigError::MissingVar("RESEND_API_KEY".to_string()));
        match result {
            Err(ConfigError::MissingVar(var)) => assert_eq!(var, "RESEND_API_KEY"),
            other => panic!("Expected MissingVar, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_empty_api_key() {
        let mut guard = EnvGuard::new();
        guard.set("RESEND_API_KEY", "   ");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "RESEND_API_KEY"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("RESEND_API_KEY", "re_test");
        guard.set("RESEND_API_URL", "api.resend.com");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "RESEND_API_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("RESEND_API_KEY", "re_test_123");
        guard.set("LEADS_MAIL_TO", "ops@example.com, sales@example.com");
        guard.set("REQUEST_TIMEOUT", "5");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.resend_api_key, "re_test_123");
        assert_eq!(config.resend_api_url, DEFAULT_RESEND_API_URL);
        assert_eq!(config.request_timeout, 5);
        let to: Vec<&str> = config.mail.to.iter().map(EmailAddress::as_str).collect();
        assert_eq!(to, vec!["ops@example.com", "sales@example.com"]);
    }

    #[test]
    #[serial]
    fn test_config_rejects_bad_recipient() {
        let mut guard = EnvGuard::new();
        guard.set("RESEND_API_KEY", "re_test");
        guard.set("LEADS_MAIL_TO", "ops@example.com,not-an-address");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, reason }) => {
                assert_eq!(var, "LEADS_MAIL_TO");
                assert!(reason.contains("not-an-address"));
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_rejects_empty_recipient_list() {
        let mut guard = EnvGuard::new();
        guard.set("RESEND_API_KEY", "re_test");
        guard.set("LEADS_MAIL_TO", " , ");

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_TIMEOUT_INVALID", "ten");

        let result = Config::parse_env_u64("TEST_TIMEOUT_INVALID", 10);
        assert!(result.is_err());
        assert_eq!(Config::parse_env_u64("NONEXISTENT_TIMEOUT", 10).unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_config_rejects_zero_timeout() {
        let mut guard = EnvGuard::new();
        guard.set("RESEND_API_KEY", "re_test");
        guard.set("REQUEST_TIMEOUT", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "REQUEST_TIMEOUT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }
}
