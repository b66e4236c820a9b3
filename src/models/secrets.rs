//! Environment-supplied credentials and identifiers.

use std::fmt;

use lettre::Address;

use crate::error::{AppError, Result};

/// Environment keys that must be present before a run starts.
pub const REQUIRED_KEYS: [&str; 6] = [
    "sheet_name",
    "project_name",
    "project_code",
    "shetty_token",
    "sender_email",
    "sender_password",
];

/// Values read from the environment at startup.
#[derive(Clone)]
pub struct Secrets {
    pub sheet_name: String,
    pub project_name: String,
    pub project_code: String,
    pub sheet_token: String,
    pub sender_email: String,
    pub sender_password: String,
}

/// Sender identity handed to the mail session's authenticate step.
#[derive(Clone)]
pub struct SenderCredentials {
    pub address: String,
    pub password: String,
}

impl Secrets {
    /// Read every required key from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read every required key through `lookup`.
    ///
    /// All absent or blank keys are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut take = |key: &str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(key.to_string());
                String::new()
            }
        };

        let secrets = Self {
            sheet_name: take("sheet_name"),
            project_name: take("project_name"),
            project_code: take("project_code"),
            sheet_token: take("shetty_token"),
            sender_email: take("sender_email").trim().to_string(),
            sender_password: take("sender_password"),
        };

        if !missing.is_empty() {
            return Err(AppError::MissingEnv(missing));
        }

        secrets
            .sender_email
            .parse::<Address>()
            .map_err(|e| AppError::config(format!("sender_email is not a mail address: {e}")))?;

        Ok(secrets)
    }

    pub fn sender(&self) -> SenderCredentials {
        SenderCredentials {
            address: self.sender_email.clone(),
            password: self.sender_password.clone(),
        }
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("sheet_name", &self.sheet_name)
            .field("project_name", &self.project_name)
            .field("project_code", &self.project_code)
            .field("sheet_token", &"<redacted>")
            .field("sender_email", &self.sender_email)
            .field("sender_password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for SenderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderCredentials")
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .finish()
    }
}
