//! Recipient data structures.

use serde::{Deserialize, Serialize};

/// A subscriber that receives notifications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

impl Recipient {
    /// Build a recipient from raw row fields.
    ///
    /// Returns `None` when either field is missing or blank after trimming.
    pub fn from_row(row: &SheetRow) -> Option<Self> {
        let name = row.name.as_deref().map(str::trim).unwrap_or_default();
        let email = row.email_address.as_deref().map(str::trim).unwrap_or_default();

        if name.is_empty() || email.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

/// Response body of the recipient listing API.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetListing {
    #[serde(rename = "userInfo")]
    pub user_info: Vec<SheetRow>,
}

/// One spreadsheet row as returned by the listing API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetRow {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, rename = "emailAddress")]
    pub email_address: Option<String>,
}
