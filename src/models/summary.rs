//! Run report produced at the end of every run.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Label reported as the bot name.
pub const BOT_NAME: &str = "NuBot";

/// Outcome of the novelty check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExecutionResult {
    #[serde(rename = "New news found.")]
    NewNewsFound,
    #[serde(rename = "No new news found.")]
    NoNewNewsFound,
}

impl ExecutionResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionResult::NewNewsFound => "New news found.",
            ExecutionResult::NoNewNewsFound => "No new news found.",
        }
    }
}

/// Counters gathered while the run progressed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunCounts {
    pub extracted: usize,
    pub novel_headings: usize,
    pub novel_links: usize,
    pub recipients: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Bot execution summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSummary {
    pub name: String,
    pub execution_time: String,
    pub execution_result: ExecutionResult,
    #[serde(default)]
    pub counts: RunCounts,
}

impl BotSummary {
    /// Build a summary stamped with the current local time.
    pub fn new(result: ExecutionResult, counts: RunCounts) -> Self {
        Self::at(Local::now(), result, counts)
    }

    pub fn at(time: DateTime<Local>, result: ExecutionResult, counts: RunCounts) -> Self {
        Self {
            name: BOT_NAME.to_string(),
            execution_time: format_execution_time(time),
            execution_result: result,
            counts,
        }
    }
}

/// Minute-resolution timestamp, e.g. `07 Mar, 2026; 09:05 PM`.
pub fn format_execution_time(time: DateTime<Local>) -> String {
    time.format("%d %b, %Y; %I:%M %p").to_string()
}
