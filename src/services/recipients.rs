// src/services/recipients.rs

//! Recipient resolver backed by the spreadsheet listing API.

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::models::{Recipient, RecipientsConfig, Secrets, SheetListing, SheetRow};

/// Client for the spreadsheet listing endpoint.
pub struct SheetClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl SheetClient {
    /// Create a client for the sheet identified by `secrets`.
    pub fn new(config: &RecipientsConfig, secrets: &Secrets) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config, secrets))
    }

    pub fn with_client(client: Client, config: &RecipientsConfig, secrets: &Secrets) -> Self {
        let endpoint = format!(
            "{}/{}/{}/{}",
            config.api_base.trim_end_matches('/'),
            secrets.project_code,
            secrets.project_name,
            secrets.sheet_name
        );

        Self {
            client,
            endpoint,
            token: secrets.sheet_token.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Download the listing and keep every complete row.
    pub async fn fetch_recipients(&self) -> Result<Vec<Recipient>> {
        let body = self
            .client
            .get(&self.endpoint)
            .bearer_auth(&self.token)
            .send()
            .await?
            .text()
            .await?;

        let listing: SheetListing = serde_json::from_str(&body)?;
        let recipients = normalize_rows(&listing.user_info);

        log::info!(
            "Resolved {} recipient(s) from {} row(s)",
            recipients.len(),
            listing.user_info.len()
        );
        Ok(recipients)
    }
}

/// Turn raw rows into recipients, silently dropping incomplete ones.
pub fn normalize_rows(rows: &[SheetRow]) -> Vec<Recipient> {
    rows.iter().filter_map(Recipient::from_row).collect()
}
