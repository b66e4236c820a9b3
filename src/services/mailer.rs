// src/services/mailer.rs

//! Mail dispatch.
//!
//! Every message gets its own SMTP session: connect, STARTTLS upgrade,
//! authenticate, send, quit. Failures that only concern one recipient are
//! recorded and the loop moves on; anything else aborts the run.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::error::Result;
use crate::models::{MailConfig, SenderCredentials};
use crate::services::composer::Notification;

/// Outcome of a single failed delivery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The relay refused the sender's credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The relay refused the recipient address
    #[error("Recipient refused: {0}")]
    RecipientRejected(String),

    /// Connection, TLS or protocol failure
    #[error("Mail transport failed: {0}")]
    Transport(String),
}

impl DeliveryError {
    /// Whether the run may continue with the next recipient.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DeliveryError::Transport(_))
    }

    /// Map an SMTP reply code onto a delivery outcome.
    pub fn classify(code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            Some("530" | "534" | "535" | "538") => DeliveryError::Authentication(message),
            // Every RCPT TO refusal reply, transient or permanent.
            Some("450" | "451" | "452" | "550" | "551" | "552" | "553" | "554") => {
                DeliveryError::RecipientRejected(message)
            }
            _ => DeliveryError::Transport(message),
        }
    }
}

impl From<lettre::transport::smtp::Error> for DeliveryError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        let code = err.status().map(|c| c.to_string());
        Self::classify(code.as_deref(), err.to_string())
    }
}

/// A way of delivering one notification.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver `notification`, authenticating as `sender`.
    async fn deliver(
        &self,
        notification: &Notification,
        sender: &SenderCredentials,
    ) -> std::result::Result<(), DeliveryError>;
}

/// SMTP submission through a STARTTLS relay.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    host: String,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            host: config.smtp_host.clone(),
            timeout: config.timeout(),
        }
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(
        &self,
        notification: &Notification,
        sender: &SenderCredentials,
    ) -> std::result::Result<(), DeliveryError> {
        let message = build_message(notification, &sender.address)?;

        // Built per message and unpooled, so the session closes after this send.
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
            .credentials(Credentials::new(
                sender.address.clone(),
                sender.password.clone(),
            ))
            .timeout(Some(self.timeout))
            .build();

        transport.send(message).await?;
        Ok(())
    }
}

/// Build the MIME message for a notification.
pub fn build_message(
    notification: &Notification,
    from: &str,
) -> std::result::Result<Message, DeliveryError> {
    let from: Mailbox = from
        .parse()
        .map_err(|e| DeliveryError::Transport(format!("sender address {from}: {e}")))?;
    let to: Address = notification.to.email.parse().map_err(|e| {
        DeliveryError::RecipientRejected(format!("{}: {e}", notification.to.email))
    })?;

    Message::builder()
        .from(from)
        .to(Mailbox::new(None, to))
        .subject(notification.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(notification.body.clone())
        .map_err(|e| DeliveryError::Transport(e.to_string()))
}

/// A recipient whose message was abandoned.
#[derive(Debug, Clone)]
pub struct FailedDelivery {
    pub email: String,
    pub error: DeliveryError,
}

/// Summary of a dispatch loop.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub attempted: usize,
    pub delivered: Vec<String>,
    pub failures: Vec<FailedDelivery>,
}

/// Sends notifications one after another with a fixed pause.
pub struct Dispatcher<'a> {
    transport: &'a dyn MailTransport,
    sender: SenderCredentials,
    send_delay: Duration,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        transport: &'a dyn MailTransport,
        sender: SenderCredentials,
        send_delay: Duration,
    ) -> Self {
        Self {
            transport,
            sender,
            send_delay,
        }
    }

    /// Deliver every notification in order.
    pub async fn dispatch(&self, notifications: &[Notification]) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();

        for notification in notifications {
            let email = &notification.to.email;
            report.attempted += 1;

            match self.transport.deliver(notification, &self.sender).await {
                Ok(()) => {
                    log::info!("Mail sent to {email}");
                    report.delivered.push(email.clone());
                }
                Err(error) if error.is_recoverable() => {
                    log::error!("{error} ({email})");
                    report.failures.push(FailedDelivery {
                        email: email.clone(),
                        error,
                    });
                }
                Err(error) => {
                    log::error!("Aborting dispatch at {email}: {error}");
                    return Err(error.into());
                }
            }

            if !self.send_delay.is_zero() {
                tokio::time::sleep(self.send_delay).await;
            }
        }

        Ok(report)
    }
}
