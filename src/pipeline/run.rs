// src/pipeline/run.rs

//! Bot pipeline: fetch → extract → diff → notify → record.

use serde::Serialize;

use crate::error::Result;
use crate::models::{
    BotSummary, Config, ExecutionResult, Extraction, PreviousState, RunCounts, Secrets,
};
use crate::services::composer::{Notification, compose};
use crate::services::mailer::{Dispatcher, MailTransport};
use crate::services::{NoticeFetcher, SheetClient};
use crate::storage::StateStore;

use super::diff::{Novelty, detect_novelty};

/// Collaborators used by one run.
pub struct BotContext<'a> {
    pub config: &'a Config,
    pub secrets: &'a Secrets,
    pub fetcher: &'a NoticeFetcher,
    pub sheet: &'a SheetClient,
    pub store: &'a dyn StateStore,
    pub mailer: &'a dyn MailTransport,
}

/// What a run would act on, without acting on it.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub extraction: Extraction,
    pub novelty: Novelty,
    pub has_novelty: bool,
}

/// Run the full pipeline once.
///
/// The baseline is overwritten with the full extraction at the end of
/// every run that gets that far, whether or not anything was new.
pub async fn run_bot(ctx: &BotContext<'_>) -> Result<BotSummary> {
    log::info!("[STEP 1/4] Fetch - reading {}", ctx.config.fetch.url);
    let extraction = ctx.fetcher.fetch_latest().await?;

    log::info!("[STEP 2/4] Diff - comparing with {}", ctx.store.location());
    let previous = ctx.store.load().await?;
    let novelty = detect_novelty(&extraction, &previous);
    log::info!(
        "{} new heading(s), {} new link(s)",
        novelty.headings.len(),
        novelty.links.len()
    );

    let mut counts = RunCounts {
        extracted: extraction.len(),
        novel_headings: novelty.headings.len(),
        novel_links: novelty.links.len(),
        ..RunCounts::default()
    };

    let result = if novelty.has_novelty() {
        if novelty.headings.len() != novelty.links.len() {
            log::warn!(
                "Novel headings and links differ in length; mailing the first {} pair(s)",
                novelty.pairs().count()
            );
        }

        log::info!("[STEP 3/4] Notify - resolving recipients");
        let recipients = ctx.sheet.fetch_recipients().await?;
        let notifications: Vec<Notification> = recipients
            .iter()
            .map(|recipient| compose(recipient, &novelty, &ctx.config.mail.subject))
            .collect();

        let dispatcher = Dispatcher::new(
            ctx.mailer,
            ctx.secrets.sender(),
            ctx.config.mail.send_delay(),
        );
        let report = dispatcher.dispatch(&notifications).await?;

        counts.recipients = recipients.len();
        counts.delivered = report.delivered.len();
        counts.failed = report.failures.len();
        ExecutionResult::NewNewsFound
    } else {
        log::info!("[STEP 3/4] Notify - nothing new, skipping");
        ExecutionResult::NoNewNewsFound
    };

    log::info!("[STEP 4/4] Record - saving baseline");
    ctx.store.save(&PreviousState::from(&extraction)).await?;

    Ok(BotSummary::new(result, counts))
}

/// Fetch and diff without contacting recipients or touching the baseline.
pub async fn preview(fetcher: &NoticeFetcher, store: &dyn StateStore) -> Result<Preview> {
    let extraction = fetcher.fetch_latest().await?;
    let previous = store.load().await?;
    let novelty = detect_novelty(&extraction, &previous);

    Ok(Preview {
        has_novelty: novelty.has_novelty(),
        extraction,
        novelty,
    })
}
