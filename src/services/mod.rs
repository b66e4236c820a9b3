//! Services talking to the outside world.
//!
//! - `notices`: notice page fetcher and announcement extractor
//! - `recipients`: spreadsheet-backed recipient listing
//! - `composer`: per-recipient message rendering
//! - `mailer`: SMTP delivery and the dispatch loop

pub mod composer;
pub mod mailer;
pub mod notices;
pub mod recipients;

pub use composer::{Notification, compose};
pub use mailer::{DeliveryError, DispatchReport, Dispatcher, MailTransport, SmtpMailer};
pub use notices::{NoticeFetcher, extract_announcements};
pub use recipients::{SheetClient, normalize_rows};
