//! AWS S3 storage implementation.
//!
//! Keeps the same baseline text as the local store under
//! `s3://{bucket}/{key}`, for runs where the filesystem does not survive
//! between invocations.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::{AppError, Result};
use crate::models::PreviousState;
use crate::storage::{StateStore, literal};

/// S3-based baseline store.
pub struct S3StateStore {
    client: Client,
    bucket: String,
    key: String,
}

impl S3StateStore {
    /// Create a new S3 store instance.
    pub fn new(client: Client, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Create an S3 store from environment configuration.
    ///
    /// - `STATE_S3_BUCKET`: bucket name (default: `nubot-state`)
    /// - `STATE_S3_KEY`: object key (default: `nubot/_received_news.py`)
    pub async fn from_env() -> Result<Self> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        let bucket = std::env::var("STATE_S3_BUCKET").unwrap_or_else(|_| "nubot-state".to_string());
        let key =
            std::env::var("STATE_S3_KEY").unwrap_or_else(|_| "nubot/_received_news.py".to_string());

        Ok(Self::new(client, bucket, key))
    }
}

#[async_trait]
impl StateStore for S3StateStore {
    async fn load(&self) -> Result<PreviousState> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let bytes = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| AppError::S3(e.to_string()))?;
                let text = String::from_utf8(bytes.into_bytes().to_vec()).map_err(|e| {
                    AppError::S3(format!("{} is not valid UTF-8: {e}", self.location()))
                })?;
                literal::parse(&text)
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    log::warn!("No baseline at {}; treating as first run", self.location());
                    Ok(PreviousState::default())
                } else {
                    Err(AppError::S3(service_err.to_string()))
                }
            }
        }
    }

    async fn save(&self, state: &PreviousState) -> Result<()> {
        let body = ByteStream::from(literal::render(state).into_bytes());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .body(body)
            .content_type("text/x-python; charset=utf-8")
            .send()
            .await
            .map_err(|e| AppError::S3(e.to_string()))?;

        log::info!(
            "Baseline of {} heading(s) and {} link(s) written to {}",
            state.headings.len(),
            state.links.len(),
            self.location()
        );
        Ok(())
    }

    fn location(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}
