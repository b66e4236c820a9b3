//! Storage abstractions for the run baseline.
//!
//! The baseline is the full extraction of the last run, kept as a small
//! text file of two list assignments (see [`literal`]):
//!
//! ```text
//! _received_news.py
//! ├── prev_headings = [...]
//! └── prev_links    = [...]
//! ```
//!
//! Every run overwrites it, whatever the novelty or dispatch outcome.

pub mod literal;
pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PreviousState;

// Re-export for convenience
pub use local::LocalStateStore;
#[cfg(feature = "s3")]
pub use s3::S3StateStore;

/// Trait for baseline storage backends.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the previous baseline; an absent baseline reads as empty.
    async fn load(&self) -> Result<PreviousState>;

    /// Overwrite the baseline.
    async fn save(&self, state: &PreviousState) -> Result<()>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;
}
