// src/models/mod.rs

//! Domain models for the bot.
//!
//! This module contains the values passed between pipeline stages,
//! organized by their primary purpose.

mod announcement;
mod config;
mod recipient;
mod secrets;
mod summary;

// Re-export all public types
pub use announcement::{Announcement, Extraction, PreviousState};
pub use config::{Config, ExtractConfig, FetchConfig, MailConfig, RecipientsConfig, StateConfig};
pub use recipient::{Recipient, SheetListing, SheetRow};
pub use secrets::{REQUIRED_KEYS, Secrets, SenderCredentials};
pub use summary::{BOT_NAME, BotSummary, ExecutionResult, RunCounts, format_execution_time};
