//! Message model as served by the Mail3 API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a message (server-assigned)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mailbox address with optional display name
///
/// The address part is always stored trimmed and lowercased, so two
/// addresses compare equal regardless of how the server or user cased them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// Normalized address (e.g., "0x956...b256@mail3.me")
    pub address: String,
    /// Display name (e.g., "satoshi.eth")
    pub name: Option<String>,
}

impl Address {
    /// Create a new address without a display name
    pub fn new(address: impl AsRef<str>) -> Self {
        Self {
            address: normalize(address.as_ref()),
            name: None,
        }
    }

    /// Create a new address with a display name
    pub fn with_name(name: impl Into<String>, address: impl AsRef<str>) -> Self {
        let name = name.into();
        let name = name.trim();
        Self {
            address: normalize(address.as_ref()),
            name: if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            },
        }
    }

    /// Parse an address from a string like "satoshi.eth <satoshi.eth@mail3.me>"
    pub fn parse(s: &str) -> Self {
        let s = s.trim();

        if let Some(angle_start) = s.rfind('<')
            && let Some(angle_end) = s.rfind('>')
            && angle_start < angle_end
        {
            let name = s[..angle_start].trim().trim_matches('"');
            return Self::with_name(name, &s[angle_start + 1..angle_end]);
        }

        Self::new(s)
    }

    /// Format the address for display
    pub fn display(&self) -> String {
        match &self.name {
            Some(name) => format!("{} <{}>", name, self.address),
            None => self.address.clone(),
        }
    }
}

fn normalize(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Server-side message flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFlag {
    Seen,
    Answered,
    Flagged,
    Deleted,
    Draft,
}

/// Whether a flag is being set or cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagAction {
    Add,
    Remove,
}

/// Message header information, without the body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageMetadata {
    pub date: DateTime<Utc>,
    pub subject: String,
    pub from: Address,
    /// Recipients in server order
    pub to: Vec<Address>,
    /// Opaque reference used to fetch the body
    pub text_body_ref: String,
}

/// Rendered message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    /// Server-rendered HTML; trusted as-is
    pub html: String,
}
