// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::FetchConfig;

/// Create an HTTP client that sends the configured page headers on every request.
pub fn create_client(config: &FetchConfig) -> Result<reqwest::Client> {
    let accept_language = HeaderValue::from_str(&config.accept_language)
        .map_err(|e| AppError::config(format!("fetch.accept_language: {e}")))?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, accept_language);

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page body as text.
///
/// The URL is parsed before any request is made so that a malformed
/// address surfaces as [`AppError::Url`].
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let url = url::Url::parse(url)?;
    let text = client.get(url).send().await?.text().await?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_with_defaults() {
        assert!(create_client(&FetchConfig::default()).is_ok());
    }

    #[test]
    fn test_create_client_rejects_bad_header() {
        let config = FetchConfig {
            accept_language: "en\nUS".to_string(),
            ..FetchConfig::default()
        };
        assert!(matches!(create_client(&config), Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_fetch_text_rejects_relative_url() {
        let client = create_client(&FetchConfig::default()).unwrap();
        let err = fetch_text(&client, "examination-notice.php").await.unwrap_err();
        assert!(err.is_invalid_url());
    }
}
