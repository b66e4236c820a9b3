//! AWS Lambda entry point for NuBot
//!
//! Deploy with `cargo lambda build --release --features lambda` and attach
//! a schedule rule. The baseline lives in S3 between invocations.
//!
//! ## Environment Variables
//!
//! - `sheet_name`, `project_name`, `project_code`, `shetty_token`,
//!   `sender_email`, `sender_password`: required run secrets
//! - `NUBOT_CONFIG`: optional path to a bundled TOML config
//! - `STATE_S3_BUCKET` / `STATE_S3_KEY`: baseline location
//! - `RUST_LOG`: Log level (e.g., `info`, `debug`)

use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};

use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nubot::error::Result;
use nubot::models::{BotSummary, Config, Secrets};
use nubot::pipeline::{BotContext, run_bot};
use nubot::services::{NoticeFetcher, SheetClient, SmtpMailer};
use nubot::storage::S3StateStore;

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> std::result::Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("NuBot Lambda starting...");
    lambda_runtime::run(service_fn(handler)).await
}

/// Handler for scheduled events.
async fn handler(event: LambdaEvent<Value>) -> std::result::Result<Value, LambdaError> {
    info!("Received event: {:?}", event.payload);

    match run_lambda_pipeline().await {
        Ok(summary) => {
            info!(
                "Lambda execution successful: {}",
                summary.execution_result.as_str()
            );
            Ok(serde_json::json!({
                "status": "success",
                "summary": summary
            }))
        }
        Err(e) => {
            error!("Lambda execution failed: {}", e);
            Ok(serde_json::json!({
                "status": "error",
                "message": e.to_string()
            }))
        }
    }
}

async fn run_lambda_pipeline() -> Result<BotSummary> {
    let secrets = Secrets::from_env()?;
    let config = match std::env::var("NUBOT_CONFIG") {
        Ok(path) => Config::load(path)?,
        Err(_) => Config::default(),
    };
    config.validate()?;

    let store = S3StateStore::from_env().await?;
    let fetcher = NoticeFetcher::new(config.clone())?;
    let sheet = SheetClient::new(&config.recipients, &secrets)?;
    let mailer = SmtpMailer::new(&config.mail);

    let ctx = BotContext {
        config: &config,
        secrets: &secrets,
        fetcher: &fetcher,
        sheet: &sheet,
        store: &store,
        mailer: &mailer,
    };
    run_bot(&ctx).await
}
