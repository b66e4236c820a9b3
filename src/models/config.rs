//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Notice page request settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Announcement extraction rules
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Recipient listing API settings
    #[serde(default)]
    pub recipients: RecipientsConfig,

    /// Outbound mail settings
    #[serde(default)]
    pub mail: MailConfig,

    /// Persisted baseline settings
    #[serde(default)]
    pub state: StateConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.url.trim().is_empty() {
            return Err(AppError::validation("fetch.url is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.extract.max_items == 0 {
            return Err(AppError::validation("extract.max_items must be > 0"));
        }
        Selector::parse(&self.extract.item_selector)
            .map_err(|e| AppError::selector(&self.extract.item_selector, format!("{e:?}")))?;
        if self.recipients.api_base.trim().is_empty() {
            return Err(AppError::validation("recipients.api_base is empty"));
        }
        if self.mail.smtp_host.trim().is_empty() {
            return Err(AppError::validation("mail.smtp_host is empty"));
        }
        if self.mail.subject.trim().is_empty() {
            return Err(AppError::validation("mail.subject is empty"));
        }
        if self.mail.timeout_secs == 0 {
            return Err(AppError::validation("mail.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Notice page request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Notice page URL
    #[serde(default = "defaults::page_url")]
    pub url: String,

    /// User-Agent header for the page request
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept-Language header for the page request
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: defaults::page_url(),
            user_agent: defaults::user_agent(),
            accept_language: defaults::accept_language(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Announcement extraction rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// CSS selector matching one anchor per announcement
    #[serde(default = "defaults::item_selector")]
    pub item_selector: String,

    /// Prefix glued in front of every raw href
    #[serde(default = "defaults::link_base")]
    pub link_base: String,

    /// Number of leading entries kept, in document order
    #[serde(default = "defaults::max_items")]
    pub max_items: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            item_selector: defaults::item_selector(),
            link_base: defaults::link_base(),
            max_items: defaults::max_items(),
        }
    }
}

/// Recipient listing API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientsConfig {
    /// Base URL of the spreadsheet listing API
    #[serde(default = "defaults::api_base")]
    pub api_base: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for RecipientsConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::api_base(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Outbound mail settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Submission relay, upgraded with STARTTLS
    #[serde(default = "defaults::smtp_host")]
    pub smtp_host: String,

    /// Subject line shared by every message
    #[serde(default = "defaults::subject")]
    pub subject: String,

    /// Pause after each send attempt, in seconds
    #[serde(default = "defaults::send_delay")]
    pub send_delay_secs: u64,

    /// SMTP command timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl MailConfig {
    pub fn send_delay(&self) -> Duration {
        Duration::from_secs(self.send_delay_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: defaults::smtp_host(),
            subject: defaults::subject(),
            send_delay_secs: defaults::send_delay(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Persisted baseline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Path of the baseline file for local runs
    #[serde(default = "defaults::state_path")]
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: defaults::state_path(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Fetch defaults
    pub fn page_url() -> String {
        "https://www.nu.ac.bd/examination-notice.php".into()
    }
    pub fn user_agent() -> String {
        "Defined".into()
    }
    pub fn accept_language() -> String {
        "en-US,en;q=0.5".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Extraction defaults
    pub fn item_selector() -> String {
        ".news-item a".into()
    }
    pub fn link_base() -> String {
        "https://www.nu.ac.bd/".into()
    }
    pub fn max_items() -> usize {
        10
    }

    // Recipient defaults
    pub fn api_base() -> String {
        "https://api.sheety.co".into()
    }

    // Mail defaults
    pub fn smtp_host() -> String {
        "smtp.gmail.com".into()
    }
    pub fn subject() -> String {
        "The National University's most recent exam news as of now.".into()
    }
    pub fn send_delay() -> u64 {
        5
    }

    // State defaults
    pub fn state_path() -> PathBuf {
        PathBuf::from("_received_news.py")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_items() {
        let mut config = Config::default();
        config.extract.max_items = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let mut config = Config::default();
        config.extract.item_selector = "[[invalid".to_string();
        assert!(matches!(
            config.validate(),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [mail]
            send_delay_secs = 0

            [state]
            path = "/var/lib/nubot/received.py"
            "#,
        )
        .unwrap();

        assert_eq!(config.mail.send_delay_secs, 0);
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(config.extract.max_items, 10);
        assert_eq!(config.state.path, PathBuf::from("/var/lib/nubot/received.py"));
    }

    #[test]
    fn load_or_default_falls_back() {
        let config = Config::load_or_default("/nonexistent/nubot.toml");
        assert_eq!(config.fetch.url, "https://www.nu.ac.bd/examination-notice.php");
    }
}
