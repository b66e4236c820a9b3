//! Pipeline entry points for bot operations.
//!
//! - `run_bot`: fetch, diff, notify and record the baseline
//! - `preview`: fetch and diff only
//! - `detect_novelty`: the diff itself

pub mod diff;
pub mod run;

pub use diff::{Novelty, detect_novelty};
pub use run::{BotContext, Preview, preview, run_bot};
