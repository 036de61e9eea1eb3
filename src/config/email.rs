// ABOUTME: Email delivery configuration for the HTTP email provider
// ABOUTME: Parses sender, recipient list, subject, API key and timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use super::environment::{parse_number, EnvLookup};
use crate::constants::{defaults, env_keys};
use crate::errors::{AppError, AppResult};
use std::fmt;
use std::time::Duration;

/// Email provider configuration
#[derive(Clone)]
pub struct EmailConfig {
    /// Provider API key; delivery is impossible without it
    pub api_key: Option<String>,
    /// Provider base URL
    pub api_url: String,
    /// `From` address
    pub sender: String,
    /// `To` addresses
    pub recipients: Vec<String>,
    /// Subject line
    pub subject: String,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "****"))
            .field("api_url", &self.api_url)
            .field("sender", &self.sender)
            .field("recipients", &self.recipients)
            .field("subject", &self.subject)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: defaults::EMAIL_API_URL.to_owned(),
            sender: defaults::SENDER_EMAIL.to_owned(),
            recipients: Vec::new(),
            subject: defaults::EMAIL_SUBJECT.to_owned(),
            timeout: Duration::from_secs(defaults::EMAIL_TIMEOUT_SECS),
        }
    }
}

impl EmailConfig {
    /// Load email configuration from a variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a number
    pub fn from_lookup(lookup: &EnvLookup<'_>) -> AppResult<Self> {
        let timeout_secs = parse_number(
            lookup,
            env_keys::EMAIL_TIMEOUT_SECS,
            defaults::EMAIL_TIMEOUT_SECS,
        )?;

        Ok(Self {
            api_key: lookup(env_keys::EMAIL_API_KEY).filter(|k| !k.trim().is_empty()),
            api_url: lookup(env_keys::EMAIL_API_URL)
                .map_or_else(|| defaults::EMAIL_API_URL.to_owned(), |u| {
                    u.trim_end_matches('/').to_owned()
                }),
            sender: lookup(env_keys::SENDER_EMAIL)
                .unwrap_or_else(|| defaults::SENDER_EMAIL.to_owned()),
            recipients: lookup(env_keys::RECIPIENT_EMAIL)
                .map(|raw| parse_recipients(&raw))
                .unwrap_or_default(),
            subject: lookup(env_keys::EMAIL_SUBJECT)
                .unwrap_or_else(|| defaults::EMAIL_SUBJECT.to_owned()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Check that everything needed to actually send is present
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing variable
    pub fn validate_for_delivery(&self) -> AppResult<()> {
        if self.api_key.is_none() {
            return Err(AppError::config_missing(env_keys::EMAIL_API_KEY));
        }
        if self.recipients.is_empty() {
            return Err(AppError::config_missing(env_keys::RECIPIENT_EMAIL));
        }
        if let Some(bad) = self.recipients.iter().find(|r| !r.contains('@')) {
            return Err(AppError::config_invalid(
                env_keys::RECIPIENT_EMAIL,
                format!("'{bad}' is not an email address"),
            ));
        }
        Ok(())
    }
}

/// Split a comma/semicolon separated recipient list
#[must_use]
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_recipients() {
        assert_eq!(
            parse_recipients(" a@example.com, b@example.com;;c@example.com "),
            vec!["a@example.com", "b@example.com", "c@example.com"]
        );
        assert!(parse_recipients(" , ").is_empty());
    }

    #[test]
    fn test_validate_for_delivery() {
        let mut config = EmailConfig::default();
        assert!(config
            .validate_for_delivery()
            .is_err_and(|e| e.message.contains("EMAIL_API_KEY")));

        config.api_key = Some("re_test".to_owned());
        assert!(config
            .validate_for_delivery()
            .is_err_and(|e| e.message.contains("RECIPIENT_EMAIL")));

        config.recipients = vec!["not-an-address".to_owned()];
        assert!(config.validate_for_delivery().is_err());

        config.recipients = vec!["cook@example.com".to_owned()];
        assert!(config.validate_for_delivery().is_ok());
    }

    #[test]
    fn test_from_lookup_trims_url_and_masks_key() {
        let vars: HashMap<&str, &str> = [
            ("EMAIL_API_KEY", "re_secret"),
            ("EMAIL_API_URL", "http://localhost:9000/"),
            ("RECIPIENT_EMAIL", "cook@example.com"),
            ("EMAIL_TIMEOUT_SECS", "3"),
        ]
        .into_iter()
        .collect();
        let lookup = |key: &str| vars.get(key).map(|v| (*v).to_owned());
        let Ok(config) = EmailConfig::from_lookup(&lookup) else {
            unreachable!("valid email environment must load");
        };
        assert_eq!(config.api_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(!format!("{config:?}").contains("re_secret"));
    }
}
